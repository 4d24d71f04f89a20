use axum::{Router, extract::DefaultBodyLimit};
use sea_orm::DatabaseConnection;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::routes::{kegiatan, pengurus, resep, transaksi, upload, volunteer};
use crate::storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: Storage,
}

pub fn create_router(db: DatabaseConnection, storage: Storage) -> Router {
    let state = AppState { db, storage };

    let api = Router::new()
        .merge(kegiatan::routes())
        .merge(volunteer::routes())
        .merge(resep::routes())
        .merge(transaksi::routes())
        .merge(pengurus::routes())
        .merge(upload::routes());

    Router::new()
        .nest("/api", api)
        .with_state(state)
        // Above the 2 MB default so oversized uploads reach the 5 MB check
        // and get a JSON error instead of a bare 413.
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
