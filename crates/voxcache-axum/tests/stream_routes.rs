//! Integration tests for the HTTP endpoints.
//!
//! These tests verify:
//!  - `/tts/stream` replays cache hits byte-exact with `Content-Length`
//!    and never calls the backend twice for the same request.
//!  - Fresh responses carry the anti-caching header trio.
//!  - Validation failures come back as 400 with a plain-text body.
//!  - `/tts/voices` exposes the catalog as JSON.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{STUB_AUDIO, StubSynthesizer, test_context};
use voxcache_axum::bootstrap::CorsConfig;
use voxcache_axum::routes::create_router;

// ── Helpers ───────────────────────────────────────────────────────────────────

async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

fn header<'a>(response: &'a axum::response::Response, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .map(|v| v.to_str().unwrap_or(""))
        .unwrap_or("")
}

// ── /health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_200() {
    let (_dir, ctx) = test_context(StubSynthesizer::new(), true);
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ── /tts/stream ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_synthesis_streams_audio_with_no_store_headers() {
    let (_dir, ctx) = test_context(StubSynthesizer::new(), true);
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let response = get(app, "/tts/stream?text=bonjour").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "content-type"), "audio/mpeg");
    assert_eq!(
        header(&response, "cache-control"),
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(header(&response, "pragma"), "no-cache");
    assert_eq!(header(&response, "expires"), "0");
    assert!(header(&response, "content-disposition").contains("tts_live.mp3"));
    assert_eq!(body_bytes(response).await, STUB_AUDIO);
}

#[tokio::test]
async fn repeated_request_is_replayed_from_cache() {
    let synth = StubSynthesizer::new();
    let (_dir, ctx) = test_context(synth.clone(), true);
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let first = get(app.clone(), "/tts/stream?text=bonjour").await;
    assert_eq!(first.status(), StatusCode::OK);
    let first_bytes = body_bytes(first).await;

    // The cache write runs in a background task once the body drains.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let second = get(app, "/tts/stream?text=bonjour").await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(
        header(&second, "content-length"),
        STUB_AUDIO.len().to_string()
    );
    assert!(header(&second, "content-disposition").contains("tts_cached.mp3"));
    assert_eq!(body_bytes(second).await, first_bytes);
    assert_eq!(synth.synth_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn disabled_cache_synthesizes_every_time() {
    let synth = StubSynthesizer::new();
    let (_dir, ctx) = test_context(synth.clone(), false);
    let app = create_router(ctx, &CorsConfig::AllowAll);

    for _ in 0..2 {
        let response = get(app.clone(), "/tts/stream?text=bonjour").await;
        assert_eq!(response.status(), StatusCode::OK);
        body_bytes(response).await;
    }
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(synth.synth_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn missing_text_returns_400() {
    let (_dir, ctx) = test_context(StubSynthesizer::new(), true);
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let response = get(app, "/tts/stream").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("text"));
}

#[tokio::test]
async fn oversized_text_returns_400() {
    let synth = StubSynthesizer::new();
    let (_dir, ctx) = test_context(synth.clone(), true);
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let long = "a".repeat(5001);
    let response = get(app, &format!("/tts/stream?text={long}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(synth.synth_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_voice_returns_400() {
    let (_dir, ctx) = test_context(StubSynthesizer::new(), true);
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let response = get(app, "/tts/stream?text=hi&voice=xx-XX-Nobody").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("voice"));
}

#[tokio::test]
async fn malformed_ssml_returns_400() {
    let (_dir, ctx) = test_context(StubSynthesizer::new(), true);
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let response = get(app, "/tts/stream?text=%3Cspeak%3Eunclosed").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bad_rate_returns_400() {
    let (_dir, ctx) = test_context(StubSynthesizer::new(), true);
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let response = get(app, "/tts/stream?text=hi&rate=fast").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ── /tts/voices ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn voices_returns_the_catalog_as_json() {
    let (_dir, ctx) = test_context(StubSynthesizer::new(), true);
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let response = get(app, "/tts/voices").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(header(&response, "content-type").starts_with("application/json"));

    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let voices = json.as_array().expect("voices must be an array");
    assert_eq!(voices.len(), 2);
    assert_eq!(voices[0]["ShortName"], "fr-FR-DeniseNeural");
}
