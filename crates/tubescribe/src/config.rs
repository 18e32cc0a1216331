//! Layered configuration.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from tubescribe.toml)
//! - `~/.config/tubescribe/tubescribe.toml`
//! - `./tubescribe.toml`
//! - `TUBESCRIBE__<SECTION>__<KEY>` environment variables

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use tubescribe_cache::CacheConfig;
use tubescribe_entitlement::EntitlementConfig;
use tubescribe_error::{ConfigError, TubescribeError, TubescribeResult};

const DEFAULT_CONFIG: &str = include_str!("../../../tubescribe.toml");

/// Tool server identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ServerConfig {
    /// Name reported to agents
    #[serde(default = "default_server_name")]
    name: String,

    /// Version reported to agents
    #[serde(default = "default_server_version")]
    version: String,
}

fn default_server_name() -> String {
    "tubescribe".to_string()
}

fn default_server_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            version: default_server_version(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    level: String,

    /// Emit JSON lines instead of text
    #[serde(default)]
    json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Top-level Tubescribe configuration.
///
/// # Example
///
/// ```no_run
/// use tubescribe::TubescribeConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TubescribeConfig::load()?;
/// println!("single flight: {}", config.cache().single_flight());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct TubescribeConfig {
    /// Tool server identity
    #[serde(default)]
    server: ServerConfig,

    /// Transcript cache settings
    #[serde(default)]
    cache: CacheConfig,

    /// Entitlement gate settings
    #[serde(default)]
    entitlement: EntitlementConfig,

    /// Log output settings
    #[serde(default)]
    logging: LoggingConfig,
}

fn build_error(e: config::ConfigError) -> TubescribeError {
    TubescribeError::from(ConfigError::new(format!(
        "Failed to build configuration: {}",
        e
    )))
}

fn parse_error(e: config::ConfigError) -> TubescribeError {
    TubescribeError::from(ConfigError::new(format!(
        "Failed to parse configuration: {}",
        e
    )))
}

impl TubescribeConfig {
    /// Load configuration from a specific file path.
    ///
    /// Sections missing from the file take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> TubescribeResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                TubescribeError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(parse_error)
    }

    /// Load configuration with precedence: environment > current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> TubescribeResult<Self> {
        debug!("Loading layered configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/tubescribe/tubescribe.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("tubescribe").required(false))
            .add_source(
                Environment::with_prefix("TUBESCRIBE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)
    }

    /// Parses the bundled defaults alone.
    pub fn bundled() -> TubescribeResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)
    }
}
