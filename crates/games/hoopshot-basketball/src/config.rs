use serde::{Deserialize, Serialize};

use hoopshot_core::time::{Tick, secs_to_ticks};

use crate::court::CourtConfig;
use crate::launcher::ShotConfig;
use crate::scoring::ScoringConfig;

/// Top-level basketball configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasketballConfig {
    pub court: CourtConfig,
    pub shot: ShotConfig,
    pub scoring: ScoringConfig,
    pub tick_rate_hz: f32,
    /// How long outcome messages stay on the HUD.
    pub message_secs: f32,
    /// Flight watchdog. `None` lets a flight run until it lands.
    pub max_flight_secs: Option<f32>,
}

impl Default for BasketballConfig {
    fn default() -> Self {
        Self {
            court: CourtConfig::default(),
            shot: ShotConfig::default(),
            scoring: ScoringConfig::default(),
            tick_rate_hz: 60.0,
            message_secs: 1.0,
            max_flight_secs: Some(15.0),
        }
    }
}

impl BasketballConfig {
    /// Load config from `HOOPSHOT_CONFIG` or `config/basketball.toml`.
    /// Falls back to defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("HOOPSHOT_CONFIG")
            .unwrap_or_else(|_| "config/basketball.toml".to_string());
        Self::load_from(&path)
    }

    /// Load config from an explicit path with the same fallbacks as [`load`](Self::load).
    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(content)
    }

    pub fn message_ticks(&self) -> Tick {
        secs_to_ticks(self.message_secs, self.tick_rate_hz)
    }

    pub fn max_flight_ticks(&self) -> Option<Tick> {
        self.max_flight_secs
            .map(|secs| secs_to_ticks(secs, self.tick_rate_hz))
    }
}
