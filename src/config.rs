use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use time::UtcOffset;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub freshness: FreshnessConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON logs even outside production.
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct FreshnessConfig {
    /// Offset used to decide which calendar day "today" is.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i8,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

fn default_utc_offset_hours() -> i8 {
    9
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NotificationsConfig {
    /// Cron expression (with seconds) for the background expiry sweep.
    #[serde(default)]
    pub sweep_schedule: Option<String>,
    #[serde(default)]
    pub weekly_summary_schedule: Option<String>,
}

impl NotificationsConfig {
    pub fn schedules(&self) -> freshkeep_notification::Schedules {
        freshkeep_notification::Schedules {
            sweep: self.sweep_schedule.to_owned(),
            weekly_summary: self.weekly_summary_schedule.to_owned(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (FRESHKEEP__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite:freshkeep.db")?
            .set_default("database.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FRESHKEEP")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !(-12..=14).contains(&self.freshness.utc_offset_hours) {
            return Err("Freshness utc_offset_hours must be between -12 and 14".to_string());
        }
        for (name, schedule) in [
            ("sweep_schedule", &self.notifications.sweep_schedule),
            ("weekly_summary_schedule", &self.notifications.weekly_summary_schedule),
        ] {
            if schedule.as_deref().is_some_and(|s| s.trim().is_empty()) {
                return Err(format!("Notifications {name} must not be blank"));
            }
        }
        Ok(())
    }

    pub fn utc_offset(&self) -> freshkeep_shared::Result<UtcOffset> {
        freshkeep_shared::utc_offset_from_hours(self.freshness.utc_offset_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
            },
            observability: ObservabilityConfig::default(),
            freshness: FreshnessConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
        assert_eq!(config().utc_offset().unwrap(), UtcOffset::from_hms(9, 0, 0).unwrap());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = config();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = config();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_offset_out_of_range() {
        let mut config = config();
        config.freshness.utc_offset_hours = 15;
        assert!(config.validate().is_err());

        config.freshness.utc_offset_hours = -12;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_blank_schedule() {
        let mut config = config();
        config.notifications.sweep_schedule = Some("  ".to_string());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_defaults_without_file() {
        let config = Config::load(Some("does/not/exist.toml".to_string())).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.notifications.sweep_schedule, None);
    }
}
