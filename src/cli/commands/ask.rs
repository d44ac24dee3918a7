use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_ask(config: Config, question: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let record = state.ask_service.ask(question).await?;

    println!("{}", record.ai_answer);
    println!();
    println!("(saved as #{})", record.id);

    Ok(())
}
