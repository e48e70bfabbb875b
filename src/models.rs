use serde::{Deserialize, Serialize};

use crate::config::{EncoderConfig, SearchConfig};

/// Alignment request: each text holds one sentence per line.
#[derive(Debug, Clone, Deserialize)]
pub struct AlignTextRequest {
    pub src_lang: String,
    pub src_text: String,
    pub trg_lang: String,
    pub trg_text: String,
}

/// One row of the alignment output.
///
/// `score` is rendered as text. Unmatched rows carry a score of "0" and an
/// empty string on the side that has no counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentRecord {
    pub score: String,
    pub src_text: String,
    pub trg_text: String,
}

/// Current configuration as reported by GET /api/config.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigResponse {
    pub bind_addr: String,
    pub encoder: EncoderConfig,
    pub search: SearchConfig,
}

/// Runtime encoder config update.
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderConfigUpdate {
    pub provider: Option<String>,
    // base_url intentionally omitted: immutable at runtime to prevent SSRF
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub embedding_dim: Option<usize>,
}
