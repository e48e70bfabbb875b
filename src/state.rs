use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::{Config, EncoderConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    /// Encoder settings are mutable at runtime via PUT /api/config.
    pub encoder_config: Arc<RwLock<EncoderConfig>>,
    /// Bounds concurrent alignment requests; mining is CPU-bound.
    pub align_semaphore: Arc<tokio::sync::Semaphore>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let encoder_config = config.encoder.clone();
        let max_concurrent = config.max_concurrent_aligns;

        Ok(Self {
            config,
            http_client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            encoder_config: Arc::new(RwLock::new(encoder_config)),
            align_semaphore: Arc::new(tokio::sync::Semaphore::new(max_concurrent)),
        })
    }
}
