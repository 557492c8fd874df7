//! Errors raised while submitting an edit to the AI service

use std::time::Duration;

use thiserror::Error;

/// Why a submission to the AI service did not produce a result
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no region selected")]
    NoRegions,

    #[error("no snapshot of the edited photo is available")]
    MissingSnapshot,

    #[error("a submission is already in progress")]
    InFlight,

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("server returned HTTP {status}")]
    Status { status: u16, message: Option<String> },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("generation failed: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request cancelled")]
    Cancelled,
}

impl SubmitError {
    /// Failed before anything was sent
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SubmitError::NoRegions | SubmitError::MissingSnapshot | SubmitError::InFlight
        )
    }

    /// Message for the user: the server's reason when it gave one
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::NoRegions => "Select an area to change first.".to_string(),
            SubmitError::MissingSnapshot => {
                "Image information not found. Upload a photo and select an area first.".to_string()
            }
            SubmitError::InFlight => "Your room is still being generated.".to_string(),
            SubmitError::Status {
                message: Some(message),
                ..
            }
            | SubmitError::Rejected {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            SubmitError::Rejected { .. } => "AI interior generation failed.".to_string(),
            SubmitError::Timeout(_) => "The server took too long to respond.".to_string(),
            SubmitError::Cancelled => "Generation was cancelled.".to_string(),
            SubmitError::Status { .. } | SubmitError::Transport(_) | SubmitError::Malformed(_) => {
                "An error occurred while communicating with the server.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_reason_preferred() {
        let err = SubmitError::Status {
            status: 500,
            message: Some("GPU out of memory".to_string()),
        };
        assert_eq!(err.user_message(), "GPU out of memory");

        let err = SubmitError::Rejected {
            message: Some("No room detected".to_string()),
        };
        assert_eq!(err.user_message(), "No room detected");
    }

    #[test]
    fn test_generic_wording_without_reason() {
        let err = SubmitError::Status {
            status: 502,
            message: None,
        };
        assert_eq!(
            err.user_message(),
            "An error occurred while communicating with the server."
        );
        let blank = SubmitError::Rejected {
            message: Some("  ".to_string()),
        };
        assert_eq!(blank.user_message(), "AI interior generation failed.");
    }

    #[test]
    fn test_precondition_kinds() {
        assert!(SubmitError::NoRegions.is_precondition());
        assert!(SubmitError::MissingSnapshot.is_precondition());
        assert!(SubmitError::InFlight.is_precondition());
        assert!(!SubmitError::Cancelled.is_precondition());
        assert!(!SubmitError::Malformed("x".into()).is_precondition());
    }
}
