//! Axum handler for the `/tts/voices` endpoint.

use axum::Json;
use axum::extract::State;

use voxcache_core::VoiceDescriptor;

use crate::error::HttpError;
use crate::state::AppState;

/// `GET /tts/voices`
///
/// The catalog is fetched through the same TTL cache the proxy uses for
/// voice validation, so listing voices does not hammer the backend.
pub async fn list_voices(
    State(state): State<AppState>,
) -> Result<Json<Vec<VoiceDescriptor>>, HttpError> {
    let voices = state
        .catalog
        .voices()
        .await
        .map_err(|e| HttpError::ServiceUnavailable(e.to_string()))?;
    Ok(Json(voices.as_ref().clone()))
}
