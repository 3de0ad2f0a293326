//! Injected dependencies for the application reducers.

use taskboard_client::TodoApi;

/// Environment dependencies shared by all features
///
/// Dependencies are passed down the call chain explicitly instead of living
/// in ambient global state; tests construct one against a mock server.
#[derive(Clone)]
pub struct AppEnvironment {
    /// Client for the remote todo store
    pub api: TodoApi,
}

impl AppEnvironment {
    /// Creates a new `AppEnvironment`
    #[must_use]
    pub const fn new(api: TodoApi) -> Self {
        Self { api }
    }
}
