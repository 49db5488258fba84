// ABOUTME: Named-secret lookup used to resolve the Basic-auth credentials at startup.
// ABOUTME: Reads NAME from the environment, falling back to the file named by NAME_FILE.

use std::collections::HashMap;

use relay_core::Credentials;

/// Secret name holding the Basic-auth username.
pub const USERNAME_SECRET: &str = "API_USERNAME";
/// Secret name holding the Basic-auth password.
pub const PASSWORD_SECRET: &str = "API_PASSWORD";

/// Resolves a named secret. Missing secrets are `None`, never an error.
pub trait SecretSource {
    fn get_secret(&self, name: &str) -> Option<String>;
}

/// Environment-backed secrets.
///
/// `NAME` is used when set. Otherwise `NAME_FILE` may point at a file whose
/// contents (minus a trailing newline) are the secret, which is how Docker
/// and Kubernetes mount secrets.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecrets;

impl SecretSource for EnvSecrets {
    fn get_secret(&self, name: &str) -> Option<String> {
        if let Ok(value) = std::env::var(name) {
            return Some(value);
        }

        let file_var = format!("{}_FILE", name);
        let path = std::env::var(&file_var).ok()?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Some(trim_newline(contents)),
            Err(e) => {
                tracing::warn!("{} points at {} but it could not be read: {}", file_var, path, e);
                None
            }
        }
    }
}

impl SecretSource for HashMap<String, String> {
    fn get_secret(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Look up both credential halves. Returns `None` (auth disabled) unless both
/// are present.
pub fn resolve_credentials(source: &dyn SecretSource) -> Option<Credentials> {
    let username = source.get_secret(USERNAME_SECRET);
    let password = source.get_secret(PASSWORD_SECRET);
    Credentials::from_parts(username, password)
}

fn trim_newline(mut value: String) -> String {
    if value.ends_with('\n') {
        value.pop();
        if value.ends_with('\r') {
            value.pop();
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn both_secrets_enable_credentials() {
        let source = secrets(&[(USERNAME_SECRET, "alexa"), (PASSWORD_SECRET, "pw")]);
        let creds = resolve_credentials(&source).expect("credentials should resolve");

        assert_eq!(creds.username(), "alexa");
        assert!(creds.matches("alexa", "pw"));
    }

    #[test]
    fn missing_password_disables_credentials() {
        let source = secrets(&[(USERNAME_SECRET, "alexa")]);
        assert!(resolve_credentials(&source).is_none());
    }

    #[test]
    fn missing_username_disables_credentials() {
        let source = secrets(&[(PASSWORD_SECRET, "pw")]);
        assert!(resolve_credentials(&source).is_none());
    }

    #[test]
    fn env_secrets_reads_file_fallback() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("secret");
        std::fs::write(&path, "from-file\n").unwrap();

        // Unique names so parallel tests never see each other's variables.
        // SAFETY: test-only code, variables not read by any other test
        unsafe {
            std::env::remove_var("RELAY_TEST_FILE_SECRET");
            std::env::set_var("RELAY_TEST_FILE_SECRET_FILE", &path);
        }

        let value = EnvSecrets.get_secret("RELAY_TEST_FILE_SECRET");

        // SAFETY: test-only code, variables not read by any other test
        unsafe {
            std::env::remove_var("RELAY_TEST_FILE_SECRET_FILE");
        }

        assert_eq!(value.as_deref(), Some("from-file"));
    }

    #[test]
    fn env_secrets_prefers_direct_variable() {
        // SAFETY: test-only code, variables not read by any other test
        unsafe {
            std::env::set_var("RELAY_TEST_DIRECT_SECRET", "direct");
            std::env::set_var("RELAY_TEST_DIRECT_SECRET_FILE", "/nonexistent/secret");
        }

        let value = EnvSecrets.get_secret("RELAY_TEST_DIRECT_SECRET");

        // SAFETY: test-only code, variables not read by any other test
        unsafe {
            std::env::remove_var("RELAY_TEST_DIRECT_SECRET");
            std::env::remove_var("RELAY_TEST_DIRECT_SECRET_FILE");
        }

        assert_eq!(value.as_deref(), Some("direct"));
    }

    #[test]
    fn env_secrets_missing_is_none() {
        assert!(EnvSecrets.get_secret("RELAY_TEST_NEVER_SET_SECRET").is_none());
    }

    #[test]
    fn trim_newline_strips_one_line_ending() {
        assert_eq!(trim_newline("pw\r\n".to_string()), "pw");
        assert_eq!(trim_newline("pw\n\n".to_string()), "pw\n");
        assert_eq!(trim_newline("pw".to_string()), "pw");
    }
}
