pub mod models;
pub mod routes;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::SentinelConfig;
use crate::errors::SentinelError;
use crate::scanner::{MockExecutor, ScanExecutor, SubmissionFlow};
use crate::store::{FileStorage, MemoryStorage, ScanStore, StoragePort};
use crate::watch::ScanViewer;

#[derive(Clone)]
pub struct AppState {
    pub store: ScanStore,
    pub executor: Arc<dyn ScanExecutor>,
}

impl AppState {
    pub fn submission_flow(&self) -> SubmissionFlow {
        SubmissionFlow::new(self.store.clone(), self.executor.clone())
    }

    pub fn viewer(&self) -> ScanViewer {
        ScanViewer::new(self.store.clone(), self.executor.clone())
    }
}

pub fn create_app_state(config: &SentinelConfig) -> Result<AppState, SentinelError> {
    let storage: Arc<dyn StoragePort> = match config.data_dir() {
        Some(dir) => Arc::new(FileStorage::new(Path::new(dir))?),
        None => Arc::new(MemoryStorage::new()),
    };
    let executor = Arc::new(MockExecutor::new(Duration::from_millis(
        config.mock_latency_ms(),
    )));
    Ok(AppState {
        store: ScanStore::new(storage),
        executor,
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/scans", axum::routing::post(routes::scans::create_scan).get(routes::scans::list_scans))
        .route("/api/scans/{id}", axum::routing::get(routes::scans::get_scan))
        .route("/api/scans/{id}/status", axum::routing::get(routes::status::get_status))
        .route("/api/scans/{id}/results", axum::routing::get(routes::scans::get_results))
        .route("/api/tools", axum::routing::get(routes::tools::list_tools))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
