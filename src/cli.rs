use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "items-api", version, about = "JSON CRUD service for items backed by SQLite")]
pub struct Cli {
    /// Path to the YAML config file. Defaults to `config.yaml` when present.
    #[arg(short, long, env = "CONFIG_PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_config_flag() {
        let cli = Cli::try_parse_from(["items-api", "--config", "/etc/items-api.yaml"])
            .expect("parse args");
        assert_eq!(cli.config, Some(PathBuf::from("/etc/items-api.yaml")));
    }
}
