/// Configuration loading from environment variables
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("TELEGRAM_API_ID must be an integer, got '{0}'")]
    InvalidApiId(String),
    #[error("BIRTHDAY_RESOLVER must be 'lookup' or 'import', got '{0}'")]
    UnknownResolver(String),
}

/// How a phone number is turned into a sendable recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverStrategy {
    /// Resolve against the account's existing contacts; no platform state
    /// is mutated
    DirectLookup,
    /// Import the row into the account's contact list first, then address
    /// the imported user
    ImportThenResolve,
}

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_id: i32,
    pub api_hash: String,
    pub resolver: ResolverStrategy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("TELEGRAM_API_ID").ok(),
            std::env::var("TELEGRAM_API_HASH").ok(),
            std::env::var("BIRTHDAY_RESOLVER").ok(),
        )
    }

    /// Build a configuration from raw variable values
    fn from_vars(
        api_id: Option<String>,
        api_hash: Option<String>,
        resolver: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_id = api_id.ok_or(ConfigError::Missing("TELEGRAM_API_ID"))?;
        let api_id = api_id
            .trim()
            .parse::<i32>()
            .map_err(|_| ConfigError::InvalidApiId(api_id.clone()))?;

        let api_hash = api_hash
            .filter(|hash| !hash.trim().is_empty())
            .ok_or(ConfigError::Missing("TELEGRAM_API_HASH"))?;

        let resolver = match resolver {
            Some(value) => Self::parse_resolver(&value)?,
            None => ResolverStrategy::DirectLookup,
        };

        Ok(Self {
            api_id,
            api_hash,
            resolver,
        })
    }

    /// Parse the resolver strategy name from the environment
    fn parse_resolver(value: &str) -> Result<ResolverStrategy, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lookup" => Ok(ResolverStrategy::DirectLookup),
            "import" => Ok(ResolverStrategy::ImportThenResolve),
            _ => Err(ConfigError::UnknownResolver(value.to_string())),
        }
    }
}
