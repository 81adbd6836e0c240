pub mod routes;

use crate::config::ServerConfig;
use crate::datasources::{HistoryFetcher, LocationResolver};
use crate::error::{Result, WeatherOddsError};
use crate::logic::AnalysisService;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

impl WeatherOddsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WeatherOddsError::InvalidRequest(_) | WeatherOddsError::LocationNotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            WeatherOddsError::NoHistoricalData => StatusCode::NOT_FOUND,
            WeatherOddsError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            e if e.is_upstream() => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WeatherOddsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

pub fn router<R, F>(service: Arc<AnalysisService<R, F>>, config: &ServerConfig) -> Router
where
    R: LocationResolver + 'static,
    F: HistoryFetcher + 'static,
{
    Router::new()
        .route("/analyze", post(routes::analyze::<R, F>))
        .route("/download_csv", post(routes::download_csv::<R, F>))
        .route("/health", get(routes::health))
        .with_state(service)
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve<R, F>(service: AnalysisService<R, F>, config: &ServerConfig) -> Result<()>
where
    R: LocationResolver + 'static,
    F: HistoryFetcher + 'static,
{
    let addr = config.socket_addr()?;
    let app = router(Arc::new(service), config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
