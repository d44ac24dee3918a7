use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One stored question/answer exchange. Rows are insert-only.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "ai_queries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_question: String,
    pub ai_answer: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
