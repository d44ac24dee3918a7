pub use super::ai_queries::Entity as AiQueries;
