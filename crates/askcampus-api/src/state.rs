//! Application state wiring the collaborators together.
//!
//! AppState holds the concrete chat service used by the REST API. The
//! service is generic over store/provider traits, but AppState pins it to
//! the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use askcampus_core::chat::service::ChatService;
use askcampus_infra::config::{api_token_from_env, load_global_config, resolve_data_dir, API_TOKEN_ENV};
use askcampus_infra::llm::workers_ai::WorkersAiProvider;
use askcampus_infra::sqlite::history::SqliteHistoryStore;
use askcampus_infra::sqlite::pool::DatabasePool;
use askcampus_types::config::GlobalConfig;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<SqliteHistoryStore, WorkersAiProvider>;

/// Shared application state holding the chat service.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to the DB,
    /// wire the store and provider into the chat service.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("askcampus.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let api_token = api_token_from_env()
            .ok_or_else(|| anyhow::anyhow!("{API_TOKEN_ENV} is not set"))?;
        if config.account_id.is_empty() {
            tracing::warn!("account_id is empty; set it in config.toml before serving traffic");
        }

        let store = SqliteHistoryStore::new(db_pool.clone());
        let provider = WorkersAiProvider::new(
            api_token,
            config.account_id.clone(),
            Duration::from_secs(config.request_timeout_secs),
        );
        let chat_service = ChatService::new(store, provider, config.model.clone());

        Ok(Self {
            chat_service: Arc::new(chat_service),
            config,
            data_dir,
            db_pool,
        })
    }
}
