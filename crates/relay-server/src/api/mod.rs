// ABOUTME: API module containing the HTTP handler functions for the relay.
// ABOUTME: Split into the push/latest metadata handlers and the favicon handler.

pub mod favicon;
pub mod metadata;
