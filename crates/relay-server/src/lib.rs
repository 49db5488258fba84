// ABOUTME: HTTP server for alexa-relay, exposing push and latest-url routes plus a favicon.
// ABOUTME: Uses Axum with a shared metadata store and an optional Basic-auth tower layer.

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod routes;
pub mod secrets;

pub use app_state::{AppState, SharedState};
pub use auth::BasicAuthLayer;
pub use config::{ConfigError, ConfigOverrides, RelayConfig};
pub use routes::create_router;
pub use secrets::{EnvSecrets, SecretSource};
