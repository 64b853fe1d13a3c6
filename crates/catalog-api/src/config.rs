//! Environment configuration.

use std::net::SocketAddr;
use std::time::Duration;

use catalog_bus::BusConfig;

use crate::error::AppError;

/// Settings for every service hosted by the binary.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface the listeners bind to.
    pub host: String,
    /// Host name reported in service addresses.
    pub hostname: String,
    pub composite_port: u16,
    pub product_port: u16,
    pub recommendation_port: u16,
    pub review_port: u16,
    /// Base URLs the composite uses to reach the owning services.
    pub product_service_url: String,
    pub recommendation_service_url: String,
    pub review_service_url: String,
    /// Postgres stores when set, in-memory stores otherwise.
    pub database_url: Option<String>,
    pub backend_timeout: Duration,
    pub bus: BusConfig,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, applying defaults for
    /// unset variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let composite_port = parse(lookup, "COMPOSITE_PORT", 7000)?;
        let product_port = parse(lookup, "PRODUCT_PORT", 7001)?;
        let recommendation_port = parse(lookup, "RECOMMENDATION_PORT", 7002)?;
        let review_port = parse(lookup, "REVIEW_PORT", 7003)?;

        let partitions: usize = parse(lookup, "BUS_PARTITIONS", BusConfig::default().partitions)?;
        if partitions == 0 {
            return Err(AppError::Config("BUS_PARTITIONS must be at least 1".into()));
        }
        let max_attempts: u32 = parse(lookup, "BUS_MAX_ATTEMPTS", BusConfig::default().max_attempts)?;
        if max_attempts == 0 {
            return Err(AppError::Config("BUS_MAX_ATTEMPTS must be at least 1".into()));
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            hostname: lookup("HOSTNAME").unwrap_or_else(|| "localhost".to_owned()),
            composite_port,
            product_port,
            recommendation_port,
            review_port,
            product_service_url: lookup("PRODUCT_SERVICE_URL")
                .unwrap_or_else(|| format!("http://127.0.0.1:{product_port}")),
            recommendation_service_url: lookup("RECOMMENDATION_SERVICE_URL")
                .unwrap_or_else(|| format!("http://127.0.0.1:{recommendation_port}")),
            review_service_url: lookup("REVIEW_SERVICE_URL")
                .unwrap_or_else(|| format!("http://127.0.0.1:{review_port}")),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            backend_timeout: Duration::from_millis(parse(lookup, "BACKEND_TIMEOUT_MS", 5000)?),
            bus: BusConfig {
                partitions,
                max_attempts,
                ..BusConfig::default()
            },
        })
    }

    /// Socket address to bind for a service listening on `port`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST` is not a valid IP address.
    pub fn socket_addr(&self, port: u16) -> Result<SocketAddr, AppError> {
        format!("{}:{port}", self.host)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|e| AppError::Config(format!("{key} must be valid: {e}")))
    })
}
