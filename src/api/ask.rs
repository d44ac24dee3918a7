//! `POST /ask-ai`: forward a question to the model and record the answer.
//!
//! Unlike the `/api` endpoints this route answers with flat JSON bodies
//! (`{"answer": ..}` / `{"error": .., "details": ..}`) that the landing page
//! consumes directly.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;

use super::{AppState, AskErrorBody, AskRequest, AskResponse};
use crate::constants::messages;
use crate::services::AskError;

impl IntoResponse for AskError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            Self::NoQuestion => (StatusCode::BAD_REQUEST, messages::NO_QUESTION, None),
            Self::Upstream { body, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                messages::UPSTREAM_ERROR,
                Some(body),
            ),
            Self::MalformedResponse(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                messages::MALFORMED_RESPONSE,
                Some(reason),
            ),
            Self::Unreachable(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                messages::UPSTREAM_UNREACHABLE,
                Some(reason),
            ),
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                messages::DATABASE_ERROR,
                None,
            ),
        };

        (status, Json(AskErrorBody { error, details })).into_response()
    }
}

/// Reads the `question` string out of a raw request body. Anything that is not
/// a JSON object with a string `question` counts as no question.
fn question_from_body(body: &[u8]) -> Result<String, AskError> {
    let request: AskRequest = serde_json::from_slice(body).map_err(|_| AskError::NoQuestion)?;

    match request.question {
        Some(Value::String(question)) => Ok(question),
        _ => Err(AskError::NoQuestion),
    }
}

pub async fn submit_question(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AskResponse>, AskError> {
    let question = question_from_body(&body)?;
    let record = state.ask_service().ask(&question).await?;

    Ok(Json(AskResponse {
        answer: record.ai_answer,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn question_from_body_accepts_string() {
        let q = question_from_body(br#"{"question": "What is 2+2?"}"#).unwrap();
        assert_eq!(q, "What is 2+2?");
    }

    #[test]
    fn question_from_body_rejects_other_shapes() {
        for body in [
            &b"{}"[..],
            br#"{"question": null}"#,
            br#"{"question": 42}"#,
            br#"{"question": ["a"]}"#,
            br#"["question"]"#,
            b"not json",
            b"",
        ] {
            assert!(
                matches!(question_from_body(body), Err(AskError::NoQuestion)),
                "expected rejection for {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    async fn render(err: AskError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn no_question_renders_400() {
        let (status, body) = render(AskError::NoQuestion).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "No question received"}));
    }

    #[tokio::test]
    async fn upstream_error_carries_body_verbatim() {
        let (status, body) = render(AskError::Upstream {
            status: 400,
            body: r#"{"error":{"code":400}}"#.to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({"error": "AI API error", "details": r#"{"error":{"code":400}}"#})
        );
    }

    #[tokio::test]
    async fn database_error_hides_cause() {
        let (status, body) = render(AskError::Database("disk I/O error".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": "Database error"}));
    }
}
