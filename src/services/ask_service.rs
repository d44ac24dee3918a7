//! Domain service for the ask/store sequence.
//!
//! Handlers hand a question to an [`AskService`]; the service calls the
//! upstream model, persists the exchange and returns the stored record.

use crate::clients::gemini::GeminiError;
use crate::models::query::QueryRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AskError {
    #[error("No question received")]
    NoQuestion,

    #[error("Upstream returned {status}")]
    Upstream { status: u16, body: String },

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("Upstream unreachable: {0}")]
    Unreachable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AskError {
    /// Short label used for metrics and logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NoQuestion => "no_question",
            Self::Upstream { .. } => "upstream_error",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Unreachable(_) => "unreachable",
            Self::Database(_) => "database_error",
        }
    }
}

impl From<GeminiError> for AskError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Upstream { status, body } => Self::Upstream { status, body },
            GeminiError::MalformedResponse(msg) => Self::MalformedResponse(msg),
            GeminiError::Timeout(_)
            | GeminiError::Transport(_)
            | GeminiError::InvalidEndpoint(_) => Self::Unreachable(err.to_string()),
        }
    }
}

/// Rejects the empty string. Any other text, whitespace included, is forwarded as is.
pub fn validate_question(question: &str) -> Result<&str, AskError> {
    if question.is_empty() {
        return Err(AskError::NoQuestion);
    }
    Ok(question)
}

#[async_trait::async_trait]
pub trait AskService: Send + Sync {
    /// Asks the upstream model and records the exchange.
    ///
    /// # Errors
    ///
    /// - [`AskError::NoQuestion`] for an empty question; nothing is sent or stored
    /// - [`AskError::Upstream`], [`AskError::MalformedResponse`] or
    ///   [`AskError::Unreachable`] when no answer was obtained; nothing is stored
    /// - [`AskError::Database`] when the answer could not be stored
    async fn ask(&self, question: &str) -> Result<QueryRecord, AskError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_question_rejects_only_empty() {
        assert!(matches!(validate_question(""), Err(AskError::NoQuestion)));
        assert_eq!(validate_question("  \n\t").unwrap(), "  \n\t");
        assert_eq!(validate_question(" hi ").unwrap(), " hi ");
    }

    #[test]
    fn gemini_errors_map_to_ask_errors() {
        let err: AskError = GeminiError::Upstream {
            status: 429,
            body: "quota".to_string(),
        }
        .into();
        assert!(matches!(err, AskError::Upstream { status: 429, ref body } if body == "quota"));

        let err: AskError = GeminiError::Timeout(30).into();
        assert_eq!(err.kind(), "unreachable");
        assert!(err.to_string().contains("30s"));

        let err: AskError = GeminiError::MalformedResponse("no candidates".to_string()).into();
        assert_eq!(err.kind(), "malformed_response");
    }
}
