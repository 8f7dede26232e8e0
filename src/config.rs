use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{ProximityMatcher, DEFAULT_MAX_DISTANCE_KM, DEFAULT_PARALLEL_THRESHOLD};
use crate::models::{CoordinateFields, DESTINATION_FIELD, ORIGIN_FIELD};
use crate::services::DEFAULT_LIMIT;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
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
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub rides: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Per-leg distance limit in kilometers
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    pub max_limit: Option<u32>,
    #[serde(default)]
    pub strict_validation: bool,
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    #[serde(default = "default_origin_field")]
    pub origin_field: String,
    #[serde(default = "default_destination_field")]
    pub destination_field: String,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_distance_km: default_max_distance_km(),
            default_limit: default_limit(),
            max_limit: None,
            strict_validation: false,
            parallel_threshold: default_parallel_threshold(),
            origin_field: default_origin_field(),
            destination_field: default_destination_field(),
        }
    }
}

impl MatchingSettings {
    pub fn matcher(&self) -> ProximityMatcher {
        ProximityMatcher::new(self.max_distance_km)
            .with_fields(CoordinateFields {
                origin: self.origin_field.clone(),
                destination: self.destination_field.clone(),
            })
            .with_strict_validation(self.strict_validation)
            .with_parallel_threshold(self.parallel_threshold)
    }
}

fn default_max_distance_km() -> f64 { DEFAULT_MAX_DISTANCE_KM }
fn default_limit() -> u32 { DEFAULT_LIMIT }
fn default_parallel_threshold() -> usize { DEFAULT_PARALLEL_THRESHOLD }
fn default_origin_field() -> String { ORIGIN_FIELD.to_string() }
fn default_destination_field() -> String { DESTINATION_FIELD.to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Appwrite Functions runtime variables and the setting each one overrides
const FUNCTION_ENV_OVERRIDES: [(&str, &str); 5] = [
    ("APPWRITE_FUNCTION_ENDPOINT", "appwrite.endpoint"),
    ("APPWRITE_FUNCTION_PROJECT_ID", "appwrite.project_id"),
    ("APPWRITE_API_KEY", "appwrite.api_key"),
    ("DATABASE_ID", "appwrite.database_id"),
    ("COLLECTION_ID", "collection.rides"),
];

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with RIDE_MATCH__)
    /// 5. Appwrite Functions variables (APPWRITE_FUNCTION_ENDPOINT, DATABASE_ID, ...)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., RIDE_MATCH__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        let settings = apply_function_env(settings, |key| std::env::var(key).ok())?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("RIDE_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Layer the Appwrite Functions variables over the loaded settings
fn apply_function_env<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    for (var, key) in FUNCTION_ENV_OVERRIDES {
        if let Some(value) = lookup(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
