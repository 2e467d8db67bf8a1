//! Application state shared across all request handlers.

use crate::config::runtime::SharedConfig;
use potluck_core::backend::Backend;

/// Cheap to clone: the backend is a pool or an `Arc`, and every config
/// section sits behind its own `Arc<RwLock<_>>`.
#[derive(Clone)]
pub struct AppState {
    pub store: Backend,
    /// Runtime configuration (sections are swapped on SIGHUP).
    pub config: SharedConfig,
}

impl AppState {
    pub fn new(store: Backend, config: SharedConfig) -> Self {
        Self { store, config }
    }
}
