pub use self::parser::{Config, DatabaseConfig, LoggingConfig};
pub use self::validator::ConfigError;

mod parser;
mod validator;
