//! Configuration loading and constants.
//!
//! Configuration is resolved from built-in defaults, an optional TOML file, and
//! environment/CLI overrides, in increasing order of priority. `AppConfig` is the
//! root configuration struct containing all settings.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use const_format::formatcp;
use serde::Deserialize;

// =============================================================================
// HTTP Server Defaults
// =============================================================================

/// Listen on all interfaces by default
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Time allowed for in-flight requests to finish after SIGTERM/SIGINT
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Response Headers
// =============================================================================

/// Health responses must never be served from an intermediary cache
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// Response header carrying the per-request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Configuration file read when `--config` is not given (skipped if absent)
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str =
    formatcp!("{}=info,tower_http=info", env!("CARGO_CRATE_NAME"));

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File this configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Graceful shutdown drain window in seconds
    #[serde(default = "HttpServerConfig::default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_timeout_seconds: Self::default_shutdown_timeout(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_shutdown_timeout() -> u64 {
        DEFAULT_SHUTDOWN_TIMEOUT_SECS
    }

    /// Socket address the server binds to.
    ///
    /// The host must be a literal IPv4 or IPv6 address; hostnames are not resolved.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "http.host '{}' is not a valid IP address",
                self.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Newline-delimited JSON objects
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Values that take precedence over the configuration file.
///
/// Populated from CLI flags, which fall back to environment variables.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_format: Option<LogFormat>,
}

impl AppConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: AppConfig = toml::from_str(&contents)?;
        config.source = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration file to use.
    ///
    /// An explicitly requested file must exist. Without one, `DEFAULT_CONFIG_PATH`
    /// is loaded if present and built-in defaults are used otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::resolve_with_default(explicit, Path::new(DEFAULT_CONFIG_PATH))
    }

    fn resolve_with_default(explicit: Option<&Path>, default: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None if default.is_file() => Self::load(default),
            None => Ok(Self::default()),
        }
    }

    /// Apply overrides on top of the loaded values and re-validate.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(host) = overrides.host {
            self.http.host = host;
        }
        if let Some(port) = overrides.port {
            self.http.port = port;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.http.socket_addr().map(|_| ())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_listen_on_all_interfaces_port_8000() {
        let config = AppConfig::default();
        assert_eq!(
            config.http.socket_addr().unwrap(),
            "0.0.0.0:8000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(config.http.shutdown_timeout_seconds, 30);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.source.is_none());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
    }

    #[test]
    fn test_load_reads_file_values() {
        let file = write_config(
            r#"
[http]
host = "127.0.0.1"
port = 9090
shutdown_timeout_seconds = 5

[logging]
format = "json"
"#,
        );

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 9090);
        assert_eq!(config.http.shutdown_timeout_seconds, 5);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_partial_section_keeps_field_defaults() {
        let config: AppConfig = toml::from_str("[http]\nport = 8080\n").unwrap();
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, 8080);
    }

    #[test]
    fn test_load_rejects_invalid_host() {
        let file = write_config("[http]\nhost = \"localhost\"\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_rejects_unknown_log_format() {
        let file = write_config("[logging]\nformat = \"xml\"\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_ipv6_host_is_accepted() {
        let config = HttpServerConfig {
            host: "::".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "[::]:8000");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = AppConfig::resolve(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_missing_default_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            AppConfig::resolve_with_default(None, &dir.path().join("default.toml")).unwrap();
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert!(config.source.is_none());
    }

    #[test]
    fn test_present_default_file_is_loaded() {
        let file = write_config("[http]\nport = 8123\n");
        let config = AppConfig::resolve_with_default(None, file.path()).unwrap();
        assert_eq!(config.http.port, 8123);
    }

    #[test]
    fn test_overrides_take_precedence_over_file() {
        let mut config: AppConfig = toml::from_str("[http]\nport = 8080\n").unwrap();
        config
            .apply_overrides(ConfigOverrides {
                host: Some("127.0.0.1".to_string()),
                port: Some(3000),
                log_format: Some(LogFormat::Json),
            })
            .unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_empty_overrides_leave_config_untouched() {
        let mut config: AppConfig = toml::from_str("[http]\nport = 8080\n").unwrap();
        config.apply_overrides(ConfigOverrides::default()).unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
    }

    #[test]
    fn test_invalid_host_override_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(ConfigOverrides {
                host: Some("not an address".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("not an address"));
    }

    #[test]
    fn test_default_log_filter_targets_this_crate() {
        assert_eq!(DEFAULT_LOG_FILTER, "cicd_hello=info,tower_http=info");
    }
}
