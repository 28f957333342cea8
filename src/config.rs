use std::time::Duration;

#[derive(Debug, Clone)]
pub struct InboxConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub public_base_url: String,
    pub api_token: Option<String>,
    pub stripe_tolerance_secs: u64,
    pub replay_timeout_ms: u64,
    pub replay_max_response_bytes: usize,
}

impl InboxConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("DATABASE_URL")
            && !value.trim().is_empty()
        {
            config.database_url = value;
        }
        if let Ok(value) = std::env::var("INBOX_BIND_ADDR")
            && !value.trim().is_empty()
        {
            config.bind_addr = value;
        }
        if let Ok(value) = std::env::var("PUBLIC_BASE_URL")
            && !value.trim().is_empty()
        {
            config.public_base_url = value.trim().trim_end_matches('/').to_string();
        }
        if let Ok(value) = std::env::var("INBOX_API_TOKEN") {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                config.api_token = Some(trimmed.to_string());
            }
        }
        if let Ok(value) = std::env::var("INBOX_STRIPE_TOLERANCE_SECS")
            && let Ok(parsed) = value.parse::<u64>()
        {
            config.stripe_tolerance_secs = parsed;
        }
        if let Ok(value) = std::env::var("INBOX_REPLAY_TIMEOUT_MS")
            && let Ok(parsed) = value.parse::<u64>()
        {
            config.replay_timeout_ms = parsed.max(1);
        }
        if let Ok(value) = std::env::var("INBOX_REPLAY_MAX_RESPONSE_BYTES")
            && let Ok(parsed) = value.parse::<usize>()
        {
            config.replay_max_response_bytes = parsed;
        }

        config
    }

    /// `None` disables the Stripe freshness check.
    pub fn stripe_tolerance(&self) -> Option<Duration> {
        (self.stripe_tolerance_secs > 0).then(|| Duration::from_secs(self.stripe_tolerance_secs))
    }

    pub fn replay_timeout(&self) -> Duration {
        Duration::from_millis(self.replay_timeout_ms)
    }

    pub fn receiving_url(&self, token: &uuid::Uuid) -> String {
        format!("{}/hooks/{token}", self.public_base_url)
    }
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:inbox.db".to_string(),
            bind_addr: "127.0.0.1:8080".to_string(),
            public_base_url: "http://localhost:8080".to_string(),
            api_token: None,
            stripe_tolerance_secs: 300,
            replay_timeout_ms: 10_000,
            replay_max_response_bytes: 64 * 1024,
        }
    }
}
