//! Error types for the Letter to Stars AI Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving a rewrite request.
#[derive(Error, Debug)]
pub enum Error {
    /// Request failed local validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Service is missing required configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport, quota, or auth failure from the Gemini API
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The model returned no text
    #[error("Upstream returned an empty response")]
    EmptyResponse,

    /// The model reply was not JSON or did not match the expected schema
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 422,
            _ => 500,
        }
    }

    /// Message safe to return to the caller.
    ///
    /// Upstream and configuration detail stays in the logs; callers get a
    /// stable generic message for anything that is not their own input.
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(message) => message.clone(),
            Error::Config(_) => "The rewrite service is not configured".to_string(),
            Error::Upstream(_) | Error::EmptyResponse | Error::MalformedResponse(_) => {
                "The rewrite service could not process the request. Please try again.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::Validation("text too short".into()).status_code(), 422);
        assert_eq!(Error::Config("no key".into()).status_code(), 500);
        assert_eq!(Error::Upstream("timeout".into()).status_code(), 500);
        assert_eq!(Error::EmptyResponse.status_code(), 500);
        assert_eq!(Error::MalformedResponse("not json".into()).status_code(), 500);
    }

    #[test]
    fn test_public_message_hides_upstream_detail() {
        let error = Error::Upstream("429 RESOURCE_EXHAUSTED: quota exceeded".to_string());
        assert!(!error.public_message().contains("quota"));
        assert!(!error.public_message().contains("429"));

        let error = Error::MalformedResponse("reply is not valid JSON".to_string());
        assert!(!error.public_message().contains("JSON"));
    }

    #[test]
    fn test_validation_message_is_user_visible() {
        let error = Error::Validation("text must be between 10 and 10000 characters".to_string());
        assert_eq!(
            error.public_message(),
            "text must be between 10 and 10000 characters"
        );
    }
}
