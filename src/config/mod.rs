//! Server configuration
//!
//! Configuration is resolved from three sources with increasing priority:
//! built-in defaults, environment variables (`KALDI_SERVE_*`, with `.env`
//! support via dotenvy in the binary), and an optional YAML file.
//!
//! # Example
//! ```rust,no_run
//! use kaldi_serve::config::ServerConfig;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Defaults + environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // With a YAML file on top
//! let config = ServerConfig::from_file(Path::new("config.yaml"))?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

mod yaml;

use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use yaml::YamlConfig;

pub use yaml::load_yaml_config;

/// Default listen host
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
const DEFAULT_PORT: u16 = 5017;

/// Default decoder backend
const DEFAULT_BACKEND: &str = "vosk";

/// Default model directory
const DEFAULT_MODEL_PATH: &str = "models/english";

/// Default input sample rate in Hz (the reference clients stream 8 kHz audio)
const DEFAULT_SAMPLE_RATE: u32 = 8000;

/// Decoder engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Backend name (currently `vosk`)
    pub backend: String,
    /// Directory holding the acoustic model and decoding graph
    pub model_path: PathBuf,
    /// Sample rate recognizers are created with, in Hz
    pub sample_rate: u32,
}

/// Server configuration
///
/// Plain TCP only: the baseline deployment is explicitly insecure and is
/// expected to sit behind a terminating proxy in production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            engine: EngineConfig {
                backend: DEFAULT_BACKEND.to_string(),
                model_path: PathBuf::from(DEFAULT_MODEL_PATH),
                sample_rate: DEFAULT_SAMPLE_RATE,
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults and environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file, with environment variables and
    /// defaults filling anything the file leaves out
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.apply_yaml(load_yaml_config(path)?);
        config.validate()?;
        Ok(config)
    }

    /// The `host:port` address to listen on
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("KALDI_SERVE_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("KALDI_SERVE_PORT") {
            self.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidEnvValue {
                    var: "KALDI_SERVE_PORT",
                    value: port,
                })?;
        }
        if let Ok(backend) = std::env::var("KALDI_SERVE_DECODER_BACKEND") {
            self.engine.backend = backend;
        }
        if let Ok(model_path) = std::env::var("KALDI_SERVE_MODEL_PATH") {
            self.engine.model_path = PathBuf::from(model_path);
        }
        if let Ok(sample_rate) = std::env::var("KALDI_SERVE_SAMPLE_RATE") {
            self.engine.sample_rate =
                sample_rate
                    .parse()
                    .map_err(|_| ConfigError::InvalidEnvValue {
                        var: "KALDI_SERVE_SAMPLE_RATE",
                        value: sample_rate,
                    })?;
        }
        Ok(())
    }

    fn apply_yaml(&mut self, yaml: YamlConfig) {
        if let Some(server) = yaml.server {
            if let Some(host) = server.host {
                self.host = host;
            }
            if let Some(port) = server.port {
                self.port = port;
            }
        }
        if let Some(decoder) = yaml.decoder {
            if let Some(backend) = decoder.backend {
                self.engine.backend = backend;
            }
            if let Some(model_path) = decoder.model_path {
                self.engine.model_path = model_path;
            }
            if let Some(sample_rate) = decoder.sample_rate {
                self.engine.sample_rate = sample_rate;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if self.engine.backend.is_empty() {
            return Err(ConfigError::Invalid(
                "decoder backend must not be empty".to_string(),
            ));
        }
        if self.engine.sample_rate == 0 {
            return Err(ConfigError::Invalid(
                "sample rate must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.address(), "0.0.0.0:5017");
        assert_eq!(config.engine.backend, "vosk");
        assert_eq!(config.engine.sample_rate, 8000);
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let mut config = ServerConfig::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "server:\n  host: \"127.0.0.1\"\ndecoder:\n  sample_rate: 16000\n"
        )
        .unwrap();

        config.apply_yaml(load_yaml_config(file.path()).unwrap());
        assert_eq!(config.host, "127.0.0.1");
        // Untouched fields keep their defaults.
        assert_eq!(config.port, 5017);
        assert_eq!(config.engine.sample_rate, 16000);
        assert_eq!(config.engine.backend, "vosk");
    }

    #[test]
    fn test_validate_rejects_zero_sample_rate() {
        let mut config = ServerConfig::default();
        config.engine.sample_rate = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_empty_backend() {
        let mut config = ServerConfig::default();
        config.engine.backend = String::new();
        assert!(config.validate().is_err());
    }
}
