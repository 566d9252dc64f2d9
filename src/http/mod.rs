use std::{future::Future, sync::Arc, time::Duration};

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, put},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod extract;
pub mod routes;

use crate::{
    state::AppState,
    utils::error::{AppError, Result},
};
use routes::{
    health_handler, list_categories_handler, not_found_handler, update_preferences_handler,
    user_categories_handler,
};

pub fn build_router(state: Arc<AppState>) -> Result<Router> {
    let origin = HeaderValue::from_str(&state.config.server.allowed_origin).map_err(|e| {
        AppError::InvalidConfigValueError {
            field: "server.allowed_origin".to_string(),
            value: state.config.server.allowed_origin.clone(),
            reason: e.to_string(),
        }
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60));

    let categories = Router::new()
        .route("/", get(list_categories_handler))
        .route("/user", get(user_categories_handler))
        .route("/user-preferences", put(update_preferences_handler));

    let app = Router::new()
        .route("/", get(health_handler))
        .nest("/api/categories", categories)
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(app)
}

pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let address = state.config.bind_address();
    tracing::info!("Binding to {}", address);

    let listener = TcpListener::bind(&address).await?;
    serve_on(listener, state, shutdown_signal()).await
}

/// 在指定的 listener 上提供服務，直到 `shutdown` 完成
pub async fn serve_on<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state)?;
    tracing::info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
