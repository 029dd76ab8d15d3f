//! HTTP front end for clickform.
//!
//! Serves the static pages, answers button clicks with HTML fragments, and
//! routes form submissions and uploads into `clickform_core`.

use std::io;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, get_service, post},
    Router,
};
use clickform_core::AppConfig;
use log::{error, info};
use tokio::{net::TcpListener, signal};
use tower_http::services::ServeFile;

pub mod error;
pub mod routes;
pub mod state;

use routes::{clicked_handler, submit_handler, test_handler, upload_handler, users_handler};
use state::AppState;

/// Room for multipart boundaries and part headers on top of the file cap.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: Arc<AppState>) -> Router {
    let upload_body_limit = usize::try_from(state.upload_sink.limit_bytes())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route(
            "/",
            get_service(ServeFile::new(state.static_dir.join("index.html"))),
        )
        .route(
            "/otherpage",
            get_service(ServeFile::new(state.static_dir.join("otherpage.html"))),
        )
        .route("/clicked", post(clicked_handler))
        .route("/test", post(test_handler))
        .route("/submit", post(submit_handler))
        .route(
            "/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route("/users", get(users_handler))
        .with_state(state)
}

/// Binds `config.bind_addr` and serves until Ctrl+C or SIGTERM.
pub async fn serve(config: AppConfig) -> io::Result<()> {
    info!("event=server_init module=server status=start");
    let state = AppState::from_config(&config);
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        "event=server_listen module=server status=ok address={}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("event=shutdown module=server status=start signal=ctrl_c"),
            Err(err) => {
                error!("event=shutdown module=server status=error signal=ctrl_c error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("event=shutdown module=server status=start signal=terminate");
            }
            Err(err) => {
                error!("event=shutdown module=server status=error signal=terminate error={err}");
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
