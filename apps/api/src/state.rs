use std::sync::Arc;
use std::time::Duration;

use crate::ai::AiClient;
use crate::config::Config;
use crate::matching::{KeywordMatchScorer, MatchScorer};
use crate::storage::ExportStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no AI key is configured; AI features degrade to local analysis.
    pub ai: Option<AiClient>,
    /// Pluggable match scorer. Default: KeywordMatchScorer.
    pub scorer: Arc<dyn MatchScorer>,
    pub exports: ExportStore,
    /// Client for direct job page fetches.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let ai = AiClient::from_config(&config)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(AppState {
            exports: ExportStore::new(config.export_dir.clone()),
            scorer: Arc::new(KeywordMatchScorer::default()),
            ai,
            http,
            config,
        })
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.config.fetch_timeout_secs)
    }
}
