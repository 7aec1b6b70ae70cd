//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use scribe_infra::{DatabaseConfig, JwtConfig};

/// Longest accepted session lifetime: one year.
const MAX_SESSION_HOURS: i64 = 24 * 365;

/// Configuration errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub session: JwtConfig,
    pub cookie: CookieConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let database = match lookup("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 100)?,
                min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 10)?,
            }),
            None => None,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            database,
            session: JwtConfig {
                secret,
                expiration_hours: session_hours(&lookup)?,
                issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "scribe".to_string()),
            },
            cookie: CookieConfig {
                name: lookup("SESSION_COOKIE_NAME").unwrap_or_else(|| "token".to_string()),
                secure: parse_or(&lookup, "SESSION_COOKIE_SECURE", false)?,
            },
        })
    }
}

fn session_hours<F>(lookup: &F) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let hours: i64 = parse_or(lookup, "JWT_EXPIRATION_HOURS", 24)?;

    if !(1..=MAX_SESSION_HOURS).contains(&hours) {
        return Err(ConfigError::Invalid {
            name: "JWT_EXPIRATION_HOURS",
            value: hours.to_string(),
        });
    }

    Ok(hours)
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_secret_is_required() {
        assert!(matches!(
            load(&[]),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
        assert!(matches!(
            load(&[("JWT_SECRET", "  ")]),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("JWT_SECRET", "s3cret")]).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.session.secret, "s3cret");
        assert_eq!(config.session.expiration_hours, 24);
        assert_eq!(config.session.issuer, "scribe");
        assert_eq!(config.cookie.name, "token");
        assert!(!config.cookie.secure);
    }

    #[test]
    fn test_database_settings() {
        let config = load(&[
            ("JWT_SECRET", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/scribe"),
            ("DB_MAX_CONNECTIONS", "20"),
        ])
        .unwrap();

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/scribe");
        assert_eq!(database.max_connections, 20);
        assert_eq!(database.min_connections, 10);
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let result = load(&[("JWT_SECRET", "s3cret"), ("PORT", "eighty")]);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
    }

    #[test]
    fn test_session_hours_must_be_in_range() {
        for hours in ["0", "-3", "8761", "9223372036854775807"] {
            let result = load(&[("JWT_SECRET", "s3cret"), ("JWT_EXPIRATION_HOURS", hours)]);
            assert!(
                matches!(
                    result,
                    Err(ConfigError::Invalid {
                        name: "JWT_EXPIRATION_HOURS",
                        ..
                    })
                ),
                "{}",
                hours
            );
        }

        let config = load(&[("JWT_SECRET", "s3cret"), ("JWT_EXPIRATION_HOURS", "8760")]).unwrap();
        assert_eq!(config.session.expiration_hours, 8760);
    }
}
