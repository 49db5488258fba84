// ABOUTME: Defines the optional username/password pair that gates the relay's routes.
// ABOUTME: Credentials exist only when both halves were supplied at startup.

use std::fmt;

/// The single shared Basic-auth credential pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Combine two independently resolved secrets. Returns `None` unless both
    /// are present; an empty string still counts as present.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) => Some(Self { username, password }),
            _ => None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// True when both supplied values equal the configured ones exactly.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

// Keep the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
