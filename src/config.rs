use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::DEFAULT_LIMIT;
use crate::models::{MatchingConfig, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    #[serde(default = "default_price_tolerance")]
    pub price_tolerance: f64,
    #[serde(default = "default_fallback_distance_km")]
    pub fallback_distance_km: f64,
    #[serde(default = "default_delivery_radius_km")]
    pub delivery_radius_km: f64,
    #[serde(default = "default_video_verification_threshold")]
    pub video_verification_threshold: f64,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_distance_km: default_max_distance_km(),
            price_tolerance: default_price_tolerance(),
            fallback_distance_km: default_fallback_distance_km(),
            delivery_radius_km: default_delivery_radius_km(),
            video_verification_threshold: default_video_verification_threshold(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl MatchingSettings {
    pub fn matching_config(&self) -> MatchingConfig {
        MatchingConfig {
            max_distance_km: self.max_distance_km,
            price_tolerance: self.price_tolerance,
            fallback_distance_km: self.fallback_distance_km,
            delivery_radius_km: self.delivery_radius_km,
            video_verification_threshold: self.video_verification_threshold,
        }
    }
}

fn default_max_distance_km() -> f64 { 25.0 }
fn default_price_tolerance() -> f64 { 0.15 }
fn default_fallback_distance_km() -> f64 { 5.0 }
fn default_delivery_radius_km() -> f64 { 10.0 }
fn default_video_verification_threshold() -> f64 { 1000.0 }
fn default_limit() -> usize { DEFAULT_LIMIT }
fn default_max_limit() -> usize { 50 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_price_weight")]
    pub price: f64,
    #[serde(default = "default_quality_weight")]
    pub quality: f64,
    #[serde(default = "default_trust_weight")]
    pub trust: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            distance: default_distance_weight(),
            price: default_price_weight(),
            quality: default_quality_weight(),
            trust: default_trust_weight(),
            availability: default_availability_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(value: &WeightsConfig) -> Self {
        ScoringWeights {
            distance: value.distance,
            price: value.price,
            quality: value.quality,
            trust: value.trust,
            availability: value.availability,
        }
    }
}

fn default_distance_weight() -> f64 { 30.0 }
fn default_price_weight() -> f64 { 25.0 }
fn default_quality_weight() -> f64 { 20.0 }
fn default_trust_weight() -> f64 { 15.0 }
fn default_availability_weight() -> f64 { 10.0 }

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Text,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SUPPLY__)
    /// 5. DATABASE_URL, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SUPPLY__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SUPPLY")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Let the conventional DATABASE_URL variable win over file settings
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        Err(_) => Ok(settings),
    }
}
