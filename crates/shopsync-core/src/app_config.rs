use std::time::Duration;

/// Process-wide settings, read once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppConfig {
    /// Store identifier: either the `myshopify.com` subdomain (`"acme"`) or a
    /// full host (`"acme.myshopify.com"`).
    pub store: String,
    pub access_token: String,
    /// Admin API version segment, e.g. `"2024-10"`.
    pub api_version: String,
    pub log_level: String,
    pub row_delay_ms: u64,
    pub error_cooldown_ms: u64,
}

impl AppConfig {
    /// Pause after a row that completed without a transport failure.
    #[must_use]
    pub fn row_delay(&self) -> Duration {
        Duration::from_millis(self.row_delay_ms)
    }

    /// Pause after a row aborted by a transport failure.
    #[must_use]
    pub fn error_cooldown(&self) -> Duration {
        Duration::from_millis(self.error_cooldown_ms)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("store", &self.store)
            .field("access_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("log_level", &self.log_level)
            .field("row_delay_ms", &self.row_delay_ms)
            .field("error_cooldown_ms", &self.error_cooldown_ms)
            .finish()
    }
}
