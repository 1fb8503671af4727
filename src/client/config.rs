//! Connection configuration.

use std::fmt;

/// Username and password sent as HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// Login name
    pub username: String,
    /// Password
    pub password: String,
}

impl UserCredentials {
    /// Create credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        UserCredentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Settings for an [`EventStoreConnection`](crate::EventStoreConnection).
///
/// # Examples
///
/// ```
/// use eventstore_http::client::{ConnectionSettings, UserCredentials};
///
/// let settings = ConnectionSettings::default()
///     .with_credentials(UserCredentials::new("admin", "changeit"))
///     .with_timeout_ms(5_000);
/// assert_eq!(settings.request_timeout_ms, Some(5_000));
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Credentials attached to every request, if any
    pub default_credentials: Option<UserCredentials>,
    /// Bound on a whole request/response cycle; `None` waits indefinitely
    pub request_timeout_ms: Option<u64>,
    /// Idle connections kept per host by the default transport
    pub pool_max_idle_per_host: usize,
    /// Emit `tracing` events for operations and failures
    pub enable_logging: bool,
}

impl ConnectionSettings {
    /// Attach default credentials.
    pub fn with_credentials(mut self, credentials: UserCredentials) -> Self {
        self.default_credentials = Some(credentials);
        self
    }

    /// Set the request timeout in milliseconds.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = Some(timeout_ms);
        self
    }

    /// Remove the request timeout.
    ///
    /// Long-polling reads then wait as long as the store holds them.
    pub fn without_timeout(mut self) -> Self {
        self.request_timeout_ms = None;
        self
    }

    /// Turn operation logging on or off.
    pub fn with_logging(mut self, enable_logging: bool) -> Self {
        self.enable_logging = enable_logging;
        self
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        ConnectionSettings {
            default_credentials: None,
            request_timeout_ms: Some(30_000),
            pool_max_idle_per_host: 16,
            enable_logging: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ConnectionSettings::default();
        assert!(settings.default_credentials.is_none());
        assert_eq!(settings.request_timeout_ms, Some(30_000));
        assert!(settings.enable_logging);
    }

    #[test]
    fn test_builder_methods() {
        let settings = ConnectionSettings::default()
            .with_credentials(UserCredentials::new("admin", "changeit"))
            .without_timeout()
            .with_logging(false);

        assert_eq!(
            settings.default_credentials,
            Some(UserCredentials::new("admin", "changeit"))
        );
        assert_eq!(settings.request_timeout_ms, None);
        assert!(!settings.enable_logging);
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = UserCredentials::new("admin", "changeit");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("changeit"));
    }
}
