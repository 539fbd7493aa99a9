use serde::Serialize;

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("at least one receiver email required")]
    MissingReceiver,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    /// The service answered with a non-success status.
    #[error("{0}")]
    Rejected(String),
    /// No usable response was obtained.
    #[error("{0}")]
    Transport(String),
}

impl SubmitError {
    /// Validation failures are caught before any request is made.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingReceiver | Self::InvalidEmail(_))
    }
}

/// Result of the most recent submission attempt, shown in the form's message slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { updated_count: u64 },
    Error(SubmitError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn message(&self) -> String {
        match self {
            Self::Success { updated_count } => {
                format!("Configuration saved. Updated {updated_count} profile(s).")
            }
            Self::Error(err) => err.to_string(),
        }
    }

    pub fn view(&self) -> OutcomeView {
        OutcomeView {
            kind: if self.is_success() {
                OutcomeKind::Success
            } else {
                OutcomeKind::Error
            },
            message: self.message(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeView {
    pub kind: OutcomeKind,
    pub message: String,
}
