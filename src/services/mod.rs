pub mod ask_service;
pub use ask_service::{AskError, AskService};

pub mod ask_service_impl;
pub use ask_service_impl::GeminiAskService;
