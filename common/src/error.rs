use thiserror::Error;

/// Failure of a single operation attempt.
///
/// All three kinds are terminal for the attempt and are reported to the user
/// the same way. None of them is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Rejected before any request was sent (empty selection, missing field).
    #[error("{0}")]
    Validation(String),
    /// The request failed to complete or the response could not be decoded.
    #[error("{0}")]
    Transport(String),
    /// A well-formed response carrying a non-empty `error` field.
    #[error("{0}")]
    Server(String),
}

impl ApiError {
    /// Text shown to the user. Transport failures are prefixed with the
    /// operation's context (`"Error processing data: ..."`); the other kinds
    /// are shown verbatim.
    pub fn user_message(&self, context: &str) -> String {
        match self {
            ApiError::Transport(detail) => format!("{}: {}", context, detail),
            ApiError::Validation(message) | ApiError::Server(message) => message.clone(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_carry_context() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(
            err.user_message("Error processing data"),
            "Error processing data: connection refused"
        );
    }

    #[test]
    fn server_and_validation_errors_are_verbatim() {
        assert_eq!(
            ApiError::Server("Invalid method".into()).user_message("Error processing data"),
            "Invalid method"
        );
        let validation = ApiError::Validation("Please select at least one column".into());
        assert!(validation.is_validation());
        assert_eq!(validation.user_message("ignored"), "Please select at least one column");
    }
}
