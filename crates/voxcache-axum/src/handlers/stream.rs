//! Axum handler for the `/tts/stream` endpoint.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;

use voxcache_core::{AudioReply, SynthesisRequest};

use crate::error::HttpError;
use crate::state::AppState;

const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// `GET /tts/stream?text=...&voice=...&rate=...&volume=...&pitch=...`
///
/// Cache hits are replayed with an exact `Content-Length`; fresh
/// synthesis streams chunked, with caching disabled on the client side
/// so intermediaries never hold a copy the proxy does not control.
pub async fn stream_audio(
    State(state): State<AppState>,
    Query(request): Query<SynthesisRequest>,
) -> Result<Response, HttpError> {
    match state.proxy.handle(request).await? {
        AudioReply::CacheHit { len, stream } => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, AUDIO_CONTENT_TYPE)
            .header(header::CONTENT_LENGTH, len)
            .header(
                header::CONTENT_DISPOSITION,
                "inline; filename=\"tts_cached.mp3\"",
            )
            .body(Body::from_stream(stream))
            .map_err(|e| HttpError::Internal(e.to_string())),
        AudioReply::Fresh { stream } => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, AUDIO_CONTENT_TYPE)
            .header(
                header::CACHE_CONTROL,
                "no-cache, no-store, must-revalidate",
            )
            .header(header::PRAGMA, "no-cache")
            .header(header::EXPIRES, "0")
            .header(
                header::CONTENT_DISPOSITION,
                "inline; filename=\"tts_live.mp3\"",
            )
            .body(Body::from_stream(stream))
            .map_err(|e| HttpError::Internal(e.to_string())),
    }
}
