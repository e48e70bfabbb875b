use axum::extract::State;
use axum::Json;

use crate::models::{ConfigResponse, EncoderConfigUpdate};
use crate::state::AppState;

/// GET /api/config - Current configuration with the API key redacted.
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(redacted(&state))
}

/// PUT /api/config - Update encoder settings at runtime. Search settings
/// and the encoder base URL are fixed at startup.
pub async fn update_config(
    State(state): State<AppState>,
    Json(update): Json<EncoderConfigUpdate>,
) -> Json<ConfigResponse> {
    {
        let mut encoder = state.encoder_config.write();
        if let Some(provider) = update.provider {
            encoder.provider = provider;
        }
        if let Some(model) = update.model {
            encoder.model = model;
        }
        if let Some(api_key) = update.api_key {
            encoder.api_key = Some(api_key);
        }
        if let Some(dim) = update.embedding_dim {
            encoder.embedding_dim = dim;
        }
    }
    tracing::info!("Encoder configuration updated");

    Json(redacted(&state))
}

fn redacted(state: &AppState) -> ConfigResponse {
    let mut encoder = state.encoder_config.read().clone();
    encoder.api_key = encoder.api_key.map(|_| "***".to_string());
    ConfigResponse {
        bind_addr: state.config.bind_addr.clone(),
        encoder,
        search: state.config.search.clone(),
    }
}
