// ABOUTME: Core library for alexa-relay, containing the stream metadata record and credentials.
// ABOUTME: This crate defines the shared data model used by the store and the HTTP server.

pub mod credentials;
pub mod record;

pub use credentials::Credentials;
pub use record::{PushRejected, StreamMetadataRecord};
