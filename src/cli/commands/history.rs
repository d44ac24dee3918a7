use crate::config::Config;
use crate::db::Store;

const PREVIEW_CHARS: usize = 80;

fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS || text.lines().nth(1).is_some() {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}…")
    } else {
        line.to_string()
    }
}

pub async fn cmd_history(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let records = store.recent_queries(limit).await?;

    if records.is_empty() {
        println!("No questions recorded yet.");
        return Ok(());
    }

    println!("Recent Questions (last {}):", records.len());
    println!("{:-<70}", "");

    for record in records {
        println!("#{} Q: {}", record.id, preview(&record.user_question));
        println!("   A: {}", preview(&record.ai_answer));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_keeps_short_single_line() {
        assert_eq!(preview("What is 2+2?"), "What is 2+2?");
    }

    #[test]
    fn preview_truncates_long_or_multiline() {
        let long = "x".repeat(100);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 1);
        assert!(shown.ends_with('…'));

        assert_eq!(preview("first\nsecond"), "first…");
    }
}
