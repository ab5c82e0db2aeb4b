//! YAML configuration file loading

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::ConfigError;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration; anything left out
/// keeps the value already resolved from defaults and environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 5017
///
/// decoder:
///   backend: "vosk"
///   model_path: "models/english"
///   sample_rate: 8000
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub decoder: Option<DecoderYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Decoder engine configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DecoderYaml {
    pub backend: Option<String>,
    pub model_path: Option<PathBuf>,
    pub sample_rate: Option<u32>,
}

/// Load and parse a YAML configuration file
pub fn load_yaml_config(path: &Path) -> Result<YamlConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: YamlConfig = serde_yaml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "server:\n  host: \"127.0.0.1\"\n  port: 6000\ndecoder:\n  backend: \"vosk\"\n  model_path: \"/srv/models/en\"\n  sample_rate: 16000\n"
        )
        .unwrap();

        let config = load_yaml_config(file.path()).unwrap();
        let server = config.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(6000));
        let decoder = config.decoder.unwrap();
        assert_eq!(decoder.backend.as_deref(), Some("vosk"));
        assert_eq!(decoder.sample_rate, Some(16000));
    }

    #[test]
    fn test_load_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 9000\n").unwrap();

        let config = load_yaml_config(file.path()).unwrap();
        assert_eq!(config.server.unwrap().port, Some(9000));
        assert!(config.decoder.is_none());
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "server: [not, a, mapping").unwrap();
        assert!(matches!(
            load_yaml_config(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_fails_with_io_error() {
        let err = load_yaml_config(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
