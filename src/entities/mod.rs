pub mod prelude;

pub mod ai_queries;
