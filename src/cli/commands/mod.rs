mod ask;
mod history;

pub use ask::cmd_ask;
pub use history::cmd_history;
