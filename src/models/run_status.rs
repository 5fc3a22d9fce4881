use serde::{Deserialize, Serialize};

/// Lifecycle status shared by batches and sessions.
///
/// The numeric ids match the seeded `status` reference rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Started,
    Stopped,
    Failed,
}

impl RunStatus {
    /// Row id of the status in the `status` reference table.
    pub const fn id(self) -> i32 {
        match self {
            RunStatus::Started => 1,
            RunStatus::Stopped => 2,
            RunStatus::Failed => 3,
        }
    }

    /// Maps a stored status id back to the enum.
    pub const fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(RunStatus::Started),
            2 => Some(RunStatus::Stopped),
            3 => Some(RunStatus::Failed),
            _ => None,
        }
    }

    /// Stopped and Failed are terminal; no further transition is allowed.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, RunStatus::Started)
    }

    /// Whether a transition from this status to `target` is legal.
    pub const fn can_transition_to(self, target: RunStatus) -> bool {
        matches!(
            (self, target),
            (RunStatus::Started, RunStatus::Stopped) | (RunStatus::Started, RunStatus::Failed)
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Started => write!(f, "Started"),
            RunStatus::Stopped => write!(f, "Stopped"),
            RunStatus::Failed => write!(f, "Failed"),
        }
    }
}
