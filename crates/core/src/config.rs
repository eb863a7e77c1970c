use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_API_BIND: &str = "0.0.0.0:2343";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONTENT_TABLE: &str = "content";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DB_URL or DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid value `{value}` for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Where each category's rows live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaLayout {
    /// One table with a `category` discriminator column.
    Shared { table: String },
    /// One table per category, named after the category.
    Partitioned,
}

impl Default for SchemaLayout {
    fn default() -> Self {
        SchemaLayout::Shared {
            table: DEFAULT_CONTENT_TABLE.to_string(),
        }
    }
}

impl fmt::Display for SchemaLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaLayout::Shared { table } => write!(f, "shared({table})"),
            SchemaLayout::Partitioned => f.write_str("partitioned"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub api_bind: String,
    pub max_connections: u32,
    pub schema: SchemaLayout,
    pub melody_env: String,
}

impl Settings {
    /// Reads settings from the process environment, pulling in `.env` first when `DB_URL` is
    /// not already exported.
    pub fn load() -> Result<Self, ConfigError> {
        if std::env::var_os("DB_URL").is_none() {
            dotenvy::dotenv().ok();
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DB_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;
        let api_bind = lookup("MELODY_API_BIND").unwrap_or_else(|| DEFAULT_API_BIND.to_string());
        let max_connections = match lookup("MELODY_DB_MAX_CONNECTIONS") {
            Some(value) => parse_var("MELODY_DB_MAX_CONNECTIONS", value)
                .and_then(|n: u32| non_zero("MELODY_DB_MAX_CONNECTIONS", n))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let table = match lookup("MELODY_CONTENT_TABLE") {
            Some(value) if is_identifier(&value) => value,
            Some(value) => {
                return Err(ConfigError::Invalid {
                    key: "MELODY_CONTENT_TABLE",
                    value,
                })
            }
            None => DEFAULT_CONTENT_TABLE.to_string(),
        };
        let schema = match lookup("MELODY_SCHEMA").as_deref() {
            None | Some("shared") => SchemaLayout::Shared { table },
            Some("partitioned") => SchemaLayout::Partitioned,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "MELODY_SCHEMA",
                    value: other.to_string(),
                })
            }
        };
        let melody_env = lookup("MELODY_ENV").unwrap_or_else(|| "development".to_string());

        Ok(Self {
            database_url,
            api_bind,
            max_connections,
            schema,
            melody_env,
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

fn non_zero(key: &'static str, n: u32) -> Result<u32, ConfigError> {
    if n == 0 {
        Err(ConfigError::Invalid {
            key,
            value: n.to_string(),
        })
    } else {
        Ok(n)
    }
}

/// Table names are spliced into SQL, so only plain lowercase identifiers are accepted.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
