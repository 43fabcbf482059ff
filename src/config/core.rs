use super::overrides::CliOverrides;
use super::format::ConfigFormat;
use crate::errors::{RegsortError, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Config files picked up from the working directory when `--config` is absent
const LOCAL_CONFIG_FILES: [&str; 4] = ["regsort.toml", "regsort.json", "regsort.yaml", "regsort.yml"];

pub const ENV_PREFIX: &str = "REGSORT_";

/// Merged run settings, before mode validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub markup_sources: Vec<PathBuf>,
    pub data_sources: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub single_match: bool,
    pub follow_symlinks: bool,
}

impl RunConfig {
    /// Load defaults, then the config file, then `REGSORT_*` variables, then CLI flags
    pub fn load(custom_config: Option<&Path>, overrides: &CliOverrides) -> Result<Self> {
        Self::figment(custom_config, overrides)?
            .extract()
            .map_err(|e| RegsortError::Configuration(e.to_string()))
    }

    pub fn figment(custom_config: Option<&Path>, overrides: &CliOverrides) -> Result<Figment> {
        tracing::trace!("CONFIG LOAD: Starting");
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        match custom_config {
            Some(path) => {
                if !path.is_file() {
                    return Err(RegsortError::Configuration(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                let format = ConfigFormat::from_path(path).ok_or_else(|| {
                    RegsortError::Configuration(format!(
                        "config file {} must end in .toml, .json, .yaml or .yml",
                        path.display()
                    ))
                })?;
                tracing::debug!("Using config file {}", path.display());
                figment = format.merge_file(figment, path);
            }
            None => {
                for name in LOCAL_CONFIG_FILES {
                    let path = Path::new(name);
                    if let Some(format) = ConfigFormat::from_path(path).filter(|_| path.is_file()) {
                        tracing::debug!("Using config file {}", path.display());
                        figment = format.merge_file(figment, path);
                    }
                }
            }
        }

        tracing::trace!("CONFIG LOAD: Applying CLI overrides");
        Ok(figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides.to_value())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_loads_defaults() {
        let figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));
        let config: RunConfig = figment.extract().unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_config_file_then_cli_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.yaml");
        fs::write(
            &path,
            "data_sources: [from_file.json]\noutput_dir: file_out\nsingle_match: true\n",
        )
        .unwrap();

        let overrides = CliOverrides {
            output_dir: Some(PathBuf::from("cli_out")),
            ..Default::default()
        };
        let config = RunConfig::load(Some(&path), &overrides).unwrap();

        assert_eq!(config.data_sources, vec![PathBuf::from("from_file.json")]);
        assert_eq!(config.output_dir, Some(PathBuf::from("cli_out")));
        assert!(config.single_match);
    }

    #[test]
    fn test_missing_custom_config_is_a_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = RunConfig::load(Some(&temp_dir.path().join("nope.toml")), &CliOverrides::default())
            .unwrap_err();
        assert!(matches!(err, RegsortError::Configuration(_)));
    }

    #[test]
    fn test_bad_value_is_a_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        fs::write(&path, "single_match = \"sometimes\"\n").unwrap();

        let err = RunConfig::load(Some(&path), &CliOverrides::default()).unwrap_err();
        assert!(matches!(err, RegsortError::Configuration(_)));
    }
}
