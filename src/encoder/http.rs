use serde::{Deserialize, Serialize};

use crate::config::EncoderConfig;
use crate::encoder::SentenceEncoder;
use crate::error::AlignError;

/// Sentences per encoder call. LASER sidecars slow down sharply on very
/// large batches and OpenAI-compatible APIs cap request sizes, so longer
/// inputs are sent in chunks.
const BATCH_SIZE: usize = 64;

/// HTTP client for the external sentence-encoder service.
///
/// Two providers: `"laser"` posts to a LASER sidecar's `/vectorize`
/// endpoint with an explicit language hint; `"openai"` posts to an
/// OpenAI-compatible `/v1/embeddings` endpoint (multilingual models ignore
/// the language).
pub struct HttpEncoder {
    client: reqwest::Client,
    config: EncoderConfig,
}

impl HttpEncoder {
    pub fn new(client: reqwest::Client, config: EncoderConfig) -> Self {
        Self { client, config }
    }

    async fn embed_laser(
        &self,
        sentences: &[String],
        language: &str,
    ) -> Result<Vec<Vec<f32>>, AlignError> {
        let url = format!("{}/vectorize", self.config.base_url);
        let req = LaserEmbedRequest {
            sentences,
            lang: language,
        };

        let resp = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| AlignError::EncoderFailure(format!("failed to call LASER sidecar: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AlignError::EncoderFailure(format!(
                "LASER sidecar returned {status}: {body}"
            )));
        }

        let body: LaserEmbedResponse = resp
            .json()
            .await
            .map_err(|e| AlignError::EncoderFailure(format!("failed to parse LASER response: {e}")))?;

        Ok(body.embeddings)
    }

    async fn embed_openai(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>, AlignError> {
        let url = format!("{}/v1/embeddings", self.config.base_url);
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let req = OpenAiEmbedRequest {
            model: &self.config.model,
            input: sentences,
        };

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&req)
            .send()
            .await
            .map_err(|e| AlignError::EncoderFailure(format!("failed to call embeddings API: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AlignError::EncoderFailure(format!(
                "embeddings API returned {status}: {body}"
            )));
        }

        let body: OpenAiEmbedResponse = resp.json().await.map_err(|e| {
            AlignError::EncoderFailure(format!("failed to parse embeddings response: {e}"))
        })?;

        Ok(body.data.into_iter().map(|d| d.embedding).collect())
    }
}

impl SentenceEncoder for HttpEncoder {
    async fn embed(
        &self,
        sentences: &[String],
        language: &str,
    ) -> Result<Vec<Vec<f32>>, AlignError> {
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let mut all = Vec::with_capacity(sentences.len());
        for chunk in sentences.chunks(BATCH_SIZE) {
            let embeddings = match self.config.provider.as_str() {
                "laser" => self.embed_laser(chunk, language).await?,
                "openai" => self.embed_openai(chunk).await?,
                other => {
                    return Err(AlignError::EncoderFailure(format!(
                        "unknown encoder provider: {other}"
                    )))
                }
            };
            all.extend(embeddings);
        }

        if all.len() != sentences.len() {
            return Err(AlignError::EncoderFailure(format!(
                "encoder returned {} embeddings for {} sentences",
                all.len(),
                sentences.len()
            )));
        }
        if let Some(row) = all.iter().find(|r| r.len() != self.config.embedding_dim) {
            return Err(AlignError::EncoderFailure(format!(
                "encoder returned dimension {}, configured dimension is {}",
                row.len(),
                self.config.embedding_dim
            )));
        }
        Ok(all)
    }
}

// ─── LASER sidecar ───────────────────────────────────────

#[derive(Serialize)]
struct LaserEmbedRequest<'a> {
    sentences: &'a [String],
    lang: &'a str,
}

#[derive(Deserialize)]
struct LaserEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OpenAiEmbedResponse {
    data: Vec<OpenAiEmbedData>,
}

#[derive(Deserialize)]
struct OpenAiEmbedData {
    embedding: Vec<f32>,
}
