use std::path::Path;

use config::{Config, ConfigError, Environment, File, Map};
use ingest::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};

/// Looked up in the working directory when no `--config` is given.
const DEFAULT_CONFIG_FILE: &str = "jobboard";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BoardConfig {
    pub server: ServerConfig,
    pub source: SourceConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourceConfig {
    pub endpoint: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BoardConfig {
    /// Defaults, then the TOML file, then `JOBBOARD__SECTION__KEY` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like `load`, but reads variables from `env` instead of the process
    /// environment when given.
    fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000_i64)?
            .set_default("source.endpoint", DEFAULT_ENDPOINT)?
            .add_source(file)
            .add_source(
                Environment::with_prefix("JOBBOARD")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}
