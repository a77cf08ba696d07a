//! # docfetch_api
//!
//! HTTP API library for Docfetch.

pub mod config;
pub mod error;
pub mod handlers;

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use docfetch_core::DocumentFetcher;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::handlers::{fetch, health};

/// Route paths.
pub mod routes {
    pub const GET_FETCH: &str = "/fetch";
    pub const GET_HEALTH: &str = "/health";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Fetch-and-store pipeline behind `/fetch`.
    pub fetcher: Arc<DocumentFetcher>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// State with a filesystem-backed fetcher built from `config`.
    pub fn from_config(config: ApiConfig) -> Result<Self, docfetch_core::FetcherError> {
        let fetcher = DocumentFetcher::local(&config.fetcher_config())?;
        Ok(Self {
            fetcher: Arc::new(fetcher),
            config,
        })
    }
}

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route(routes::GET_FETCH, get(fetch::fetch_documents_handler))
        .route(routes::GET_HEALTH, get(health::health_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .with_state(state)
}

/// Turns a handler panic into the standard 500 body.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(details).into_response()
}
