use serde::Serialize;

use crate::entities::ai_queries;

/// A stored question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRecord {
    pub id: i64,
    pub user_question: String,
    pub ai_answer: String,
}

impl From<ai_queries::Model> for QueryRecord {
    fn from(model: ai_queries::Model) -> Self {
        Self {
            id: model.id,
            user_question: model.user_question,
            ai_answer: model.ai_answer,
        }
    }
}
