use crate::entities::{ai_queries, prelude::*};
use crate::models::query::QueryRecord;
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};
use tracing::debug;

/// Repository for the append-only question/answer log
pub struct QueryRepository {
    conn: DatabaseConnection,
}

impl QueryRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, user_question: &str, ai_answer: &str) -> Result<QueryRecord> {
        let active_model = ai_queries::ActiveModel {
            user_question: Set(user_question.to_string()),
            ai_answer: Set(ai_answer.to_string()),
            ..Default::default()
        };

        let res = AiQueries::insert(active_model).exec(&self.conn).await?;
        debug!(id = res.last_insert_id, "Stored query record");

        Ok(QueryRecord {
            id: res.last_insert_id,
            user_question: user_question.to_string(),
            ai_answer: ai_answer.to_string(),
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<QueryRecord>> {
        let row = AiQueries::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(QueryRecord::from))
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<QueryRecord>> {
        let rows = AiQueries::find()
            .order_by_desc(ai_queries::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(QueryRecord::from).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(AiQueries::find().count(&self.conn).await?)
    }
}
