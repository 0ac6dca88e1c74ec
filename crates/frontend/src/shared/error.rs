//! Error taxonomy of the console.
//!
//! Every failure is recovered at the UI action that caused it: the affected
//! list or form is left as it was and a notification is shown.

use thiserror::Error;

/// Transport-level failure of a single API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("no response after {0} ms")]
    Timeout(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// A list could not be loaded; the level stays empty.
    #[error("Failed to load {what}: {source}")]
    Fetch { what: &'static str, source: ApiError },
    /// Add/edit/delete was rejected; local state is unchanged.
    #[error("{action} failed: {reason}")]
    Mutation { action: String, reason: String },
    /// Client-side check failed, nothing was sent.
    #[error("{0}")]
    Validation(String),
}

impl ConsoleError {
    pub fn fetch(what: &'static str, source: ApiError) -> Self {
        Self::Fetch { what, source }
    }

    pub fn mutation(action: impl Into<String>, reason: impl ToString) -> Self {
        Self::Mutation {
            action: action.into(),
            reason: reason.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Short class name shown next to the message.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "Load error",
            Self::Mutation { .. } => "Save error",
            Self::Validation(_) => "Check input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ConsoleError::fetch("machines", ApiError::Status(502));
        assert_eq!(err.to_string(), "Failed to load machines: HTTP 502");
        assert_eq!(err.class(), "Load error");

        let err = ConsoleError::mutation("Delete machine", ApiError::Network("offline".into()));
        assert_eq!(err.to_string(), "Delete machine failed: network error: offline");
    }
}
