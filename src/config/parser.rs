use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(alias = "url", default = "default_database_filename")]
    pub filename: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            filename: default_database_filename(),
        }
    }
}

impl DatabaseConfig {
    /// Filesystem path of the SQLite database, with any `sqlite://` scheme removed.
    pub fn sqlite_path(&self) -> String {
        self.filename
            .strip_prefix("sqlite://")
            .unwrap_or(&self.filename)
            .to_string()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(alias = "console", default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from `config.yaml` when it exists.
    ///
    /// An explicitly requested file must exist. Without one, a missing
    /// `config.yaml` falls back to built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::parse_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::parse_file(DEFAULT_CONFIG_PATH)?
            }
            None => Config::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "server.bind_address cannot be empty".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::InvalidConfig(
                "server.port must be between 1 and 65535".to_string(),
            ));
        }

        if self.database.sqlite_path().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "database.filename cannot be empty".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidConfig(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = std::env::var("ITEMS_API_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Ok(value) = std::env::var("ITEMS_API_PORT") {
            self.server.port = value.parse().map_err(|_| {
                ConfigError::InvalidConfig(format!("ITEMS_API_PORT is not a valid port: {value}"))
            })?;
        }
        if let Ok(value) = std::env::var("ITEMS_API_DATABASE") {
            self.database.filename = value;
        }
        if let Ok(value) = std::env::var("ITEMS_API_LOG_LEVEL") {
            self.logging.level = value;
        }
        Ok(())
    }
}

fn default_port() -> u16 {
    8080
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_database_filename() -> String {
    "api.db".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;
    use test_case::test_case;

    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").expect("parse empty config");
        assert_eq!(config.server.listen_addr(), "0.0.0.0:8080");
        assert_eq!(config.database.sqlite_path(), "api.db");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = Config::from_yaml(
            r#"
server:
  port: 9090
database:
  url: "sqlite:///var/lib/items/items.db"
logging:
  console: debug
"#,
        )
        .expect("parse config");

        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.sqlite_path(), "/var/lib/items/items.db");
        assert_eq!(config.logging.level, "debug");
    }

    #[test_case("server:\n  port: 0\n", "server.port" ; "zero port")]
    #[test_case("server:\n  bind_address: \"\"\n", "server.bind_address" ; "empty bind address")]
    #[test_case("database:\n  filename: \"sqlite://\"\n", "database.filename" ; "empty database path")]
    #[test_case("logging:\n  format: xml\n", "logging.format" ; "unknown log format")]
    fn validate_rejects(yaml: &str, field: &str) {
        let config = Config::from_yaml(yaml).expect("parse config");
        match config.validate() {
            Err(ConfigError::InvalidConfig(message)) => assert!(message.contains(field)),
            other => panic!("expected InvalidConfig for {field}, got {other:?}"),
        }
    }

    #[test]
    fn load_reads_explicit_file() {
        let mut file = NamedTempFile::new().expect("temp config file");
        writeln!(file, "database:\n  filename: items-test.db").expect("write config");

        let config = Config::load(Some(file.path())).expect("load config");
        assert_eq!(config.database.sqlite_path(), "items-test.db");
    }

    #[test]
    fn load_fails_for_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/nonexistent/items-api/config.yaml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        let result = Config::from_yaml("server: [1, 2");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }
}
