use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::align::{self, AlignedPair};
use crate::encoder::HttpEncoder;
use crate::error::AlignError;
use crate::models::{AlignTextRequest, AlignmentRecord};
use crate::state::AppState;

/// POST /api/align - Mine cross-lingual sentence pairs:
///   1. Split each side into sentences (one per line)
///   2. Embed both sides with the configured encoder
///   3. Bidirectional margin-scored neighbor search, greedy one-to-one
///      reconciliation
///   4. Render matched pairs first, then unmatched leftovers
pub async fn align_text(
    State(state): State<AppState>,
    Json(req): Json<AlignTextRequest>,
) -> Result<Json<Vec<AlignmentRecord>>, (StatusCode, String)> {
    let request_id = Uuid::new_v4();
    let started = std::time::Instant::now();

    let src_sentences: Vec<String> = req.src_text.lines().map(str::to_string).collect();
    let trg_sentences: Vec<String> = req.trg_text.lines().map(str::to_string).collect();

    tracing::info!(
        "align {request_id}: {} {} sentences against {} {} sentences",
        src_sentences.len(),
        req.src_lang,
        trg_sentences.len(),
        req.trg_lang
    );

    let _permit = state.align_semaphore.acquire().await.map_err(|_| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "Server is shutting down".to_string(),
        )
    })?;

    let encoder = HttpEncoder::new(state.http_client.clone(), state.encoder_config.read().clone());

    let pairs = align::align(
        &src_sentences,
        &req.src_lang,
        &trg_sentences,
        &req.trg_lang,
        &encoder,
        &state.config.search,
    )
    .await
    .map_err(|e| match e {
        AlignError::InvalidInput(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unexpected error during processing: {e}"),
        ),
    })?;

    let matched = pairs.iter().filter(|p| p.score > 0.0).count();
    tracing::info!(
        "align {request_id}: {matched} matched pairs, {} leftovers in {:?}",
        pairs.len() - matched,
        started.elapsed()
    );

    Ok(Json(render_records(&pairs, &src_sentences, &trg_sentences)))
}

/// Map alignment pairs back onto sentence text. The uncovered side of an
/// unmatched pair renders as an empty string.
fn render_records(
    pairs: &[AlignedPair],
    src_sentences: &[String],
    trg_sentences: &[String],
) -> Vec<AlignmentRecord> {
    pairs
        .iter()
        .map(|pair| AlignmentRecord {
            score: pair.score.to_string(),
            src_text: pair
                .src
                .and_then(|i| src_sentences.get(i))
                .cloned()
                .unwrap_or_default(),
            trg_text: pair
                .trg
                .and_then(|j| trg_sentences.get(j))
                .cloned()
                .unwrap_or_default(),
        })
        .collect()
}
