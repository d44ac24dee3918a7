pub mod env {

    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

    pub const DATABASE_PATH: &str = "ASKAI_DATABASE_PATH";
}

pub mod messages {

    pub const NO_QUESTION: &str = "No question received";

    pub const UPSTREAM_ERROR: &str = "AI API error";

    pub const MALFORMED_RESPONSE: &str = "Malformed AI response";

    pub const UPSTREAM_UNREACHABLE: &str = "AI API unreachable";

    pub const DATABASE_ERROR: &str = "Database error";
}

pub mod limits {

    pub const DEFAULT_HISTORY_LIMIT: u64 = 20;

    pub const MAX_HISTORY_LIMIT: u64 = 1000;
}
