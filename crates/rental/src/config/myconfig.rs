use anyhow::{Context, Result, anyhow};
use std::{str::FromStr, time::Duration};

#[derive(Debug, Clone)]
pub struct Config {
    /// Absent means the in-memory store, which is only safe for one instance.
    pub database_url: Option<String>,
    pub run_migrations: bool,
    pub port: u16,
    pub kafka_broker: Option<String>,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    pub reservation_timeout_secs: u64,
    pub admin_token: Option<String>,
    pub otel_endpoint: String,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_env_fn(|key| std::env::var(key).ok())
    }

    pub fn from_env_fn<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let run_migrations = match non_empty("RUN_MIGRATIONS").as_deref() {
            None | Some("true") => true,
            Some("false") => false,
            Some(other) => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = parse_or(non_empty("PORT"), 5000).context("PORT must be a valid u16 integer")?;

        let db_max_conn = parse_or(non_empty("DB_MAX_CONNECTION"), 5)
            .context("DB_MAX_CONNECTION must be a valid u32 integer")?;
        let db_min_conn = parse_or(non_empty("DB_MIN_CONNECTION"), 1)
            .context("DB_MIN_CONNECTION must be a valid u32 integer")?;

        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONNECTION ({db_min_conn}) exceeds DB_MAX_CONNECTION ({db_max_conn})"
            ));
        }

        let reservation_timeout_secs = parse_or(non_empty("RESERVATION_TIMEOUT_SECS"), 10)
            .context("RESERVATION_TIMEOUT_SECS must be a valid u64 integer")?;

        if reservation_timeout_secs == 0 {
            return Err(anyhow!("RESERVATION_TIMEOUT_SECS must be greater than zero"));
        }

        let flag = |key: &str| {
            non_empty(key)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false)
        };

        Ok(Self {
            database_url: non_empty("DATABASE_URL"),
            run_migrations,
            port,
            kafka_broker: non_empty("KAFKA"),
            db_max_conn,
            db_min_conn,
            reservation_timeout_secs,
            admin_token: non_empty("ADMIN_TOKEN"),
            otel_endpoint: non_empty("OTEL_ENDPOINT")
                .unwrap_or_else(|| "http://otel-collector:4317".to_string()),
            is_dev: flag("DEV_MODE"),
            enable_file_log: flag("ENABLE_FILE_LOG"),
        })
    }

    pub fn reservation_timeout(&self) -> Duration {
        Duration::from_secs(self.reservation_timeout_secs)
    }
}

fn parse_or<T>(value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => Ok(raw.trim().parse::<T>()?),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_env_fn(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.reservation_timeout(), Duration::from_secs(10));
        assert!(config.database_url.is_none());
        assert!(config.kafka_broker.is_none());
        assert!(config.admin_token.is_none());
        assert!(config.run_migrations);
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/rental"),
            ("PORT", "8080"),
            ("RESERVATION_TIMEOUT_SECS", "3"),
            ("ADMIN_TOKEN", "secret"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/rental"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.reservation_timeout_secs, 3);
        assert_eq!(config.admin_token.as_deref(), Some("secret"));
        assert!(!config.run_migrations);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("ADMIN_TOKEN", "  "), ("DATABASE_URL", "")]).unwrap();
        assert!(config.admin_token.is_none());
        assert!(config.database_url.is_none());
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(config_from(&[("RESERVATION_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn invalid_migration_flag_is_rejected() {
        assert!(config_from(&[("RUN_MIGRATIONS", "maybe")]).is_err());
    }
}
