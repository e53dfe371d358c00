//! Application state wiring the relay and transcript services together.
//!
//! Services are generic over model/repository traits; AppState pins them to
//! the concrete infra implementations.

use std::sync::Arc;

use relaychat_core::llm::box_provider::BoxGenerativeModel;
use relaychat_core::relay::RelayService;
use relaychat_core::transcript::service::TranscriptService;
use relaychat_infra::llm::create_model;
use relaychat_infra::sqlite::pool::DatabasePool;
use relaychat_infra::sqlite::record::SqliteChatRecordRepository;
use relaychat_types::config::RelaychatConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteRelayService = RelayService<BoxGenerativeModel>;

pub type ConcreteTranscriptService = TranscriptService<SqliteChatRecordRepository>;

/// Shared state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub relay_service: Arc<ConcreteRelayService>,
    pub transcript_service: Arc<ConcreteTranscriptService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Build the upstream model from config, open the database, wire services.
    pub async fn init(config: &RelaychatConfig) -> anyhow::Result<Self> {
        let model = create_model(&config.gemini)?;
        let db_pool = DatabasePool::new(&config.server.database_url).await?;

        tracing::info!(
            model = %config.gemini.model,
            database = %config.server.database_url,
            "Relay state initialized"
        );

        Ok(Self::from_parts(model, db_pool))
    }

    /// Wire services around an already-built model and pool.
    pub fn from_parts(model: BoxGenerativeModel, db_pool: DatabasePool) -> Self {
        let repo = SqliteChatRecordRepository::new(db_pool.clone());
        Self {
            relay_service: Arc::new(RelayService::new(model)),
            transcript_service: Arc::new(TranscriptService::new(repo)),
            db_pool,
        }
    }
}
