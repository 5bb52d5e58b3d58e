pub mod config;
pub mod error;
pub mod handler;
pub mod locks;
pub mod pipeline;
pub mod telemetry;
pub mod transform;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get};
use axum::Router;
use resize_core::StorageClient;

use crate::locks::KeyLocks;

#[derive(Clone)]
pub struct AppState {
    pub storage_client: StorageClient,
    /// 同じソースの成果物の書き込みを直列化する場合に設定
    pub key_locks: Option<Arc<KeyLocks>>,
}

impl AppState {
    pub fn new(storage_client: StorageClient) -> Self {
        Self {
            storage_client,
            key_locks: None,
        }
    }

    pub fn with_key_locks(mut self) -> Self {
        self.key_locks = Some(Arc::new(KeyLocks::new()));
        self
    }
}

pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", any(handler::resize))
        .route("/resize", any(handler::resize))
        .route("/health", get(handler::health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
