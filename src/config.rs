use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// External sentence-encoder configuration
    pub encoder: EncoderConfig,
    /// Nearest-neighbor search configuration
    pub search: SearchConfig,
    /// Maximum concurrent alignment requests
    pub max_concurrent_aligns: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// "laser" or "openai"
    pub provider: String,
    /// Base URL for the encoder API
    pub base_url: String,
    /// Model name sent to OpenAI-compatible providers
    pub model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
    /// Embedding vector dimension
    pub embedding_dim: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Working-memory budget for one reference block, in bytes
    pub memory_budget_bytes: usize,
    /// Neighbors per query before the one-to-one reconciliation
    /// (clamped to the reference set size per request)
    pub max_neighbors: usize,
    /// Off: one flat pass over the reference set. On: sharded search with
    /// the per-block scan spread across CPU cores.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8086".to_string(),
            encoder: EncoderConfig::default(),
            search: SearchConfig::default(),
            max_concurrent_aligns: 4,
        }
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            provider: "laser".to_string(),
            base_url: "http://localhost:8050".to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key: None,
            // LASER produces 1024-dimensional sentence embeddings
            embedding_dim: 1024,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            memory_budget_bytes: 5 * 1024 * 1024 * 1024,
            max_neighbors: 4,
            parallel: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("ALIGN_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(provider) = std::env::var("ENCODER_PROVIDER") {
            config.encoder.provider = provider;
        }
        if let Ok(url) = std::env::var("ENCODER_BASE_URL") {
            config.encoder.base_url = url;
        }
        if let Ok(model) = std::env::var("ENCODER_MODEL") {
            config.encoder.model = model;
        }
        if let Ok(key) = std::env::var("ENCODER_API_KEY") {
            config.encoder.api_key = Some(key);
        }
        if let Ok(dim) = std::env::var("ENCODER_EMBEDDING_DIM") {
            if let Ok(d) = dim.parse() {
                config.encoder.embedding_dim = d;
            }
        }
        if let Ok(val) = std::env::var("ALIGN_MEM_BUDGET_MB") {
            if let Ok(v) = val.parse::<usize>() {
                config.search.memory_budget_bytes = v * 1024 * 1024;
            }
        }
        if let Ok(val) = std::env::var("ALIGN_MAX_NEIGHBORS") {
            if let Ok(v) = val.parse() {
                config.search.max_neighbors = v;
            }
        }
        if let Ok(val) = std::env::var("ALIGN_PARALLEL") {
            config.search.parallel = matches!(val.as_str(), "1" | "true" | "yes");
        }
        if let Ok(val) = std::env::var("ALIGN_MAX_CONCURRENT") {
            if let Ok(v) = val.parse() {
                config.max_concurrent_aligns = v;
            }
        }

        config
    }
}
