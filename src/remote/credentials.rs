//! On-demand password resolution.
//!
//! Passwords are never stored alongside the data source registry; every
//! connection attempt fetches the current secret from the credential API.

use serde_json::{Value as JsonValue, json};

use crate::error::{AppError, AppResult};
use crate::remote::client::{ApiClient, GraphqlRequest};

const PASSWORD_QUERY: &str = "query getDataSourcePassword($id: Int)\
{allDataSourcePasswords(condition:{id: $id}){nodes{password}}}";

#[derive(Clone)]
pub struct CredentialResolver {
    api: ApiClient,
}

impl CredentialResolver {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetches the decrypted password of a data source.
    ///
    /// No caching; every call re-fetches so rotated secrets take effect
    /// immediately.
    ///
    /// # Errors
    /// - `AppError::NotFound` - If the API reports no matching record
    pub fn resolve_password(&self, auth_token: &str, data_source_id: i32) -> AppResult<String> {
        let request = GraphqlRequest::new(PASSWORD_QUERY, json!({"id": data_source_id}));
        let data = self.api.execute(auth_token, "getDataSourcePassword", &request)?;

        let nodes = data["allDataSourcePasswords"]["nodes"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let Some(first) = nodes.first() else {
            return Err(AppError::NotFound {
                entity: "DataSourcePassword".to_string(),
                field: "data_source_id".to_string(),
                value: data_source_id.to_string(),
            });
        };

        first
            .get("password")
            .and_then(JsonValue::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::Api {
                operation: "getDataSourcePassword".to_string(),
                source: anyhow::anyhow!("response node carries no password field"),
            })
    }
}
