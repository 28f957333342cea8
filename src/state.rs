use sqlx::SqlitePool;

use crate::{config::InboxConfig, ingest::IngestSettings, replay::ReplaySettings};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: InboxConfig,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: InboxConfig) -> Result<Self, reqwest::Error> {
        // Replays must not reuse a connection opened by an earlier replay.
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { pool, config, http })
    }

    pub fn ingest_settings(&self) -> IngestSettings {
        IngestSettings::from(&self.config)
    }

    pub fn replay_settings(&self) -> ReplaySettings {
        ReplaySettings::from(&self.config)
    }
}
