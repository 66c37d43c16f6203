use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::cli::ServeArgs;
use crate::upstream::UpstreamClient;

const AVAILABLE_ENDPOINTS: &[&str] = &["GET /", "GET /health", "GET /hospitals"];

#[derive(Clone)]
struct AppState {
    // None when DATA_GOV_API_KEY was not provided; /hospitals reports the
    // missing key instead of calling upstream.
    upstream: Option<Arc<UpstreamClient>>,
}

pub async fn run(opts: ServeArgs) -> anyhow::Result<()> {
    if opts.api_key.is_none() {
        tracing::warn!("DATA_GOV_API_KEY is not set; /hospitals will return errors");
    }

    let state = AppState {
        upstream: opts.api_key.map(|key| Arc::new(UpstreamClient::new(key))),
    };

    let addr: SocketAddr = format!("{}:{}", opts.host, opts.port)
        .parse()
        .context("parse host:port")?;

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(api_root))
        .route("/health", get(api_health))
        .route("/hospitals", get(api_hospitals))
        .fallback(api_not_found)
        .layer(cors)
        .with_state(state)
}

async fn api_root() -> impl IntoResponse {
    Json(json!({
        "service": "hospital-finder",
        "description": "Pincode hospital lookup proxying the data.gov.in hospital directory",
        "endpoints": AVAILABLE_ENDPOINTS,
    }))
}

async fn api_health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Deserialize)]
struct HospitalsParams {
    pincode: Option<String>,
}

/// Pass-through proxy: upstream JSON is returned verbatim on success.
/// Upstream failure detail goes to the log, not to the caller.
async fn api_hospitals(
    State(st): State<AppState>,
    Query(p): Query<HospitalsParams>,
) -> impl IntoResponse {
    let Some(upstream) = st.upstream else {
        tracing::error!("DATA_GOV_API_KEY is not set");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "DATA_GOV_API_KEY is not set"})),
        )
            .into_response();
    };

    match upstream.fetch_hospitals(p.pincode.as_deref()).await {
        Ok(data) => Json(data).into_response(),
        Err(e) => {
            tracing::error!("Server error: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

async fn api_not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "method": method.as_str(),
            "path": uri.path(),
            "availableEndpoints": AVAILABLE_ENDPOINTS,
        })),
    )
}
