//! Gateway server setup
//!
//! Provides the router, state construction and the serve loop.

mod handler;
mod http;
mod session;
mod state;

pub use handler::{live_discovery_handler, pattern_performance_handler};
pub use http::{health_check, live_patterns, websocket_status};
pub use state::GatewayState;

use axum::http::HeaderValue;
use axum::{routing::get, Router};
use quantora_common::{AppConfig, AppError, AppResult, CorsConfig};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/ws/live-discovery", get(live_discovery_handler))
        .route("/ws/pattern-performance/:pattern_id", get(pattern_performance_handler))
        .route("/health", get(health_check))
        .route("/api/health", get(health_check))
        .route("/api/v2/patterns/live", get(live_patterns))
        .route("/api/v2/system/websocket-status", get(websocket_status))
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    let cors = create_cors_layer(&state.config().cors, state.config().app.env.is_production());

    create_router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create CORS layer from configuration
///
/// An empty origin list allows any origin.
fn create_cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.is_empty() {
        if is_production {
            tracing::warn!("CORS: allowing any origin in production. Set CORS_ALLOWED_ORIGINS to restrict it.");
        }
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(origin = %origin, "Invalid CORS origin");
                None
            })
        })
        .collect();

    tracing::info!(origins = origins.len(), "CORS: allowing configured origins");
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Build `GatewayState` and start the background producers
pub fn create_gateway_state(config: AppConfig) -> AppResult<GatewayState> {
    let state = GatewayState::new(config);
    state.supervisor().start(&state.config().producers)?;
    Ok(state)
}

/// Serve `state` on an already bound listener until its shutdown token is cancelled
pub async fn serve(listener: TcpListener, state: GatewayState) -> AppResult<()> {
    let shutdown = state.shutdown().clone();
    let app = create_app(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(AppError::Server)
}

/// Run the gateway server
pub async fn run_server(state: GatewayState) -> AppResult<()> {
    let addr = state.config().gateway.address();
    tracing::info!("Starting Gateway server on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::bind(&addr, e))?;

    tracing::info!("Gateway listening on ws://{}/ws/live-discovery", addr);

    serve(listener, state).await
}

/// Run the complete gateway server with configuration
///
/// Returns after a shutdown signal once every producer has stopped.
pub async fn run(config: AppConfig) -> AppResult<()> {
    let state = create_gateway_state(config)?;

    let signal_token = state.shutdown().clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received");
        signal_token.cancel();
    });

    let result = run_server(state.clone()).await;

    state.supervisor().shutdown().await;
    result
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
