//! Narrow interface over the remote data source registry.
//!
//! Lifecycle code depends on [`CredentialStore`] only, so the wire shape
//! of the credential API can change without touching probe or tracker
//! logic. [`GraphQlCredentialStore`] is the production implementation.

use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::remote::client::{ApiClient, GraphqlRequest};
use crate::remote::credentials::CredentialResolver;

const DATA_SOURCE_QUERY: &str = "query getDataSource($id: Int!)\
{dataSourceById(id: $id){dataSourceTypeId, connectionString, login}}";

const STATUS_MUTATION: &str = "mutation updateDataSourceStatus\
($id: Int!, $dataSourcePatch: DataSourcePatch!)\
{updateDataSourceById(input:{id: $id, dataSourcePatch: $dataSourcePatch})\
{dataSource{connectivityStatus}}}";

/// Connectivity verdict persisted for a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityStatus {
    Success,
    Failed,
}

impl ConnectivityStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ConnectivityStatus::Success => "Success",
            ConnectivityStatus::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Connection description of a remotely registered data source.
///
/// The password is deliberately absent; it travels through
/// [`CredentialResolver`] only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceRecord {
    pub data_source_type_id: i32,
    pub connection_string: String,
    pub login: String,
}

/// The only view lifecycle code gets of the remote registry.
pub trait CredentialStore: Send + Sync {
    /// Reads the connection description of one data source.
    fn fetch_data_source(
        &self,
        auth_token: &str,
        data_source_id: i32,
    ) -> AppResult<DataSourceRecord>;

    /// Resolves the current password of one data source.
    fn resolve_password(&self, auth_token: &str, data_source_id: i32) -> AppResult<String>;

    /// Writes a connectivity verdict back to the registry.
    fn report_connectivity(
        &self,
        auth_token: &str,
        data_source_id: i32,
        status: ConnectivityStatus,
    ) -> AppResult<()>;
}

/// Credential store speaking the GraphQL credential API.
#[derive(Clone)]
pub struct GraphQlCredentialStore {
    api: ApiClient,
    resolver: CredentialResolver,
}

impl GraphQlCredentialStore {
    pub fn new(api: ApiClient) -> Self {
        let resolver = CredentialResolver::new(api.clone());
        Self { api, resolver }
    }
}

impl CredentialStore for GraphQlCredentialStore {
    fn fetch_data_source(
        &self,
        auth_token: &str,
        data_source_id: i32,
    ) -> AppResult<DataSourceRecord> {
        let request = GraphqlRequest::new(DATA_SOURCE_QUERY, json!({"id": data_source_id}));
        let data = self.api.execute(auth_token, "getDataSource", &request)?;

        let node = &data["dataSourceById"];
        if node.is_null() {
            return Err(AppError::NotFound {
                entity: "DataSource".to_string(),
                field: "id".to_string(),
                value: data_source_id.to_string(),
            });
        }

        serde_json::from_value(node.clone()).map_err(|e| AppError::Api {
            operation: "getDataSource".to_string(),
            source: anyhow::Error::from(e),
        })
    }

    fn resolve_password(&self, auth_token: &str, data_source_id: i32) -> AppResult<String> {
        self.resolver.resolve_password(auth_token, data_source_id)
    }

    fn report_connectivity(
        &self,
        auth_token: &str,
        data_source_id: i32,
        status: ConnectivityStatus,
    ) -> AppResult<()> {
        let request = GraphqlRequest::new(
            STATUS_MUTATION,
            json!({
                "id": data_source_id,
                "dataSourcePatch": {"connectivityStatus": status.as_str()},
            }),
        );
        self.api
            .execute(auth_token, "updateDataSourceStatus", &request)?;

        info!(data_source_id, status = %status, "Connectivity status reported");
        Ok(())
    }
}
