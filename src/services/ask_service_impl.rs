//! Gemini-backed implementation of the `AskService` trait.

use crate::clients::gemini::GeminiClient;
use crate::db::Store;
use crate::models::query::QueryRecord;
use crate::services::ask_service::{AskError, AskService, validate_question};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

pub struct GeminiAskService {
    store: Store,
    gemini: Arc<GeminiClient>,
}

impl GeminiAskService {
    #[must_use]
    pub const fn new(store: Store, gemini: Arc<GeminiClient>) -> Self {
        Self { store, gemini }
    }

    async fn ask_inner(&self, question: &str) -> Result<QueryRecord, AskError> {
        let question = validate_question(question)?;

        let started = Instant::now();
        let answer = self.gemini.generate_content(question).await?;
        metrics::histogram!("askai_upstream_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        // No compensation: the upstream call has already been made.
        let record = self
            .store
            .add_query(question, &answer)
            .await
            .map_err(|e| AskError::Database(format!("{e:#}")))?;

        info!(
            id = record.id,
            question_len = question.len(),
            answer_len = answer.len(),
            "Recorded answer"
        );
        Ok(record)
    }
}

#[async_trait]
impl AskService for GeminiAskService {
    async fn ask(&self, question: &str) -> Result<QueryRecord, AskError> {
        let result = self.ask_inner(question).await;

        let outcome = match &result {
            Ok(_) => "answered",
            Err(e) => {
                match e {
                    AskError::NoQuestion => {}
                    AskError::Database(msg) => error!(error = %msg, "Failed to store answer"),
                    other => warn!(error = %other, kind = other.kind(), "Ask failed"),
                }
                e.kind()
            }
        };
        metrics::counter!("askai_questions_total", "outcome" => outcome).increment(1);

        result
    }
}
