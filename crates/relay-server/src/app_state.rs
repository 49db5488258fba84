// ABOUTME: Shared application state for the relay HTTP server.
// ABOUTME: Holds the metadata store handle and the favicon location.

use std::path::PathBuf;
use std::sync::Arc;

use relay_store::MetadataStore;

/// Shared application state accessible by all Axum handlers.
pub struct AppState {
    pub store: Arc<dyn MetadataStore>,
    /// Favicon to serve, if one is configured. A configured path that does
    /// not exist on disk is treated the same as none.
    pub favicon_path: Option<PathBuf>,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create a new AppState around a store, with no favicon.
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self {
            store,
            favicon_path: None,
        }
    }

    pub fn with_favicon(mut self, path: Option<PathBuf>) -> Self {
        self.favicon_path = path;
        self
    }
}
