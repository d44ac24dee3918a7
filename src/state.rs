use std::sync::Arc;
use std::time::Duration;

use crate::clients::gemini::GeminiClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{AskService, GeminiAskService};

fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(timeout_seconds.min(10)))
        .user_agent(concat!("askai/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Long-lived resources shared by the HTTP server and the CLI commands.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub ask_service: Arc<dyn AskService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.gemini.request_timeout_seconds)?;
        let gemini = Arc::new(GeminiClient::with_shared_client(
            http_client,
            &config.gemini,
        )?);

        let ask_service: Arc<dyn AskService> =
            Arc::new(GeminiAskService::new(store.clone(), gemini));

        Ok(Self {
            config: Arc::new(config),
            store,
            ask_service,
        })
    }
}
