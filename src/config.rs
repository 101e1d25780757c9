use anyhow::{bail, Context};
use clap::ValueEnum;

use crate::service::Latency;

pub const SEED_VAR: &str = "REEL_SENTIMENT_SEED";
pub const LATENCY_VAR: &str = "REEL_SENTIMENT_LATENCY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LatencyMode {
    /// Fixed 300-800 ms delays per call
    #[default]
    Simulated,
    /// No delays
    Instant,
}

impl LatencyMode {
    pub fn latency(self) -> Latency {
        match self {
            LatencyMode::Simulated => Latency::simulated(),
            LatencyMode::Instant => Latency::instant(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub seed: Option<u64>,
    pub latency: LatencyMode,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let seed = match lookup(SEED_VAR) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{SEED_VAR} must be an unsigned integer"))?,
            ),
            None => None,
        };

        let latency = match lookup(LATENCY_VAR).as_deref().map(str::trim) {
            None | Some("") => LatencyMode::default(),
            Some(raw) => match LatencyMode::from_str(raw, true) {
                Ok(mode) => mode,
                Err(_) => bail!("{LATENCY_VAR} must be `simulated` or `instant`, got `{raw}`"),
            },
        };

        Ok(Self { seed, latency })
    }

    pub fn with_overrides(mut self, seed: Option<u64>, latency: Option<LatencyMode>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(latency) = latency {
            self.latency = latency;
        }
        self
    }
}
