//! Application state wiring the chat service to its infrastructure.
//!
//! `ChatService` is generic over the store; AppState pins it to SQLite. The
//! pool is created here, shared with the store, and closed on shutdown.

use std::path::Path;
use std::sync::Arc;

use noah_core::chat::generator::ReplyGenerator;
use noah_core::chat::service::ChatService;
use noah_core::llm::box_provider::BoxLlmProvider;
use noah_infra::config::database_url;
use noah_infra::sqlite::conversation::SqliteConversationStore;
use noah_infra::sqlite::pool::DatabasePool;
use noah_types::config::AppConfig;

pub type ConcreteChatService = ChatService<SqliteConversationStore>;

/// Shared state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub db_pool: DatabasePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Open the database under `data_dir` (unless configured elsewhere) and
    /// wire the chat service around `provider`.
    pub async fn init(
        config: AppConfig,
        data_dir: &Path,
        provider: BoxLlmProvider,
    ) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let url = database_url(&config, data_dir);
        let db_pool = DatabasePool::new(&url).await?;
        tracing::info!(database = %url, "Database ready");

        Ok(Self::from_parts(db_pool, provider, config))
    }

    /// Build state from an already-open pool.
    pub fn from_parts(db_pool: DatabasePool, provider: BoxLlmProvider, config: AppConfig) -> Self {
        let mut generator = ReplyGenerator::new(provider, config.llm.model.clone())
            .with_temperature(config.llm.temperature)
            .with_max_output_tokens(config.llm.max_output_tokens);
        if let Some(prompt) = &config.llm.system_prompt {
            generator = generator.with_system_instruction(prompt.clone());
        }

        let store = SqliteConversationStore::new(db_pool.clone());
        let chat_service = ChatService::new(store, generator, &config.chat);

        Self {
            chat_service: Arc::new(chat_service),
            db_pool,
            config: Arc::new(config),
        }
    }
}
