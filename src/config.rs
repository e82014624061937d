use std::env;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub max_connections: u32,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

impl Config {
    /// Reads configuration from the process environment. Call `dotenv()`
    /// first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_address = lookup("BIND_ADDRESS")
            .filter(|addr| !addr.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value,
                    })
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Config {
            database_url,
            bind_address,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn applies_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/employees")]).unwrap();
        assert_eq!(config.database_url, "postgres://localhost/employees");
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn requires_a_database_url() {
        assert_eq!(load(&[]), Err(ConfigError::Missing("DATABASE_URL")));
        assert_eq!(
            load(&[("DATABASE_URL", "  ")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/employees"),
            ("BIND_ADDRESS", "0.0.0.0:9000"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:9000");
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn rejects_bad_pool_size() {
        for value in ["0", "ten", "-3"] {
            let err = load(&[
                ("DATABASE_URL", "postgres://db/employees"),
                ("DATABASE_MAX_CONNECTIONS", value),
            ])
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidNumber { .. }));
        }
    }
}
