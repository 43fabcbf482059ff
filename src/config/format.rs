//! Config file syntaxes

use figment::Figment;
use figment::providers::{self, Format};
use std::path::Path;

/// Syntax of a config file, chosen by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Layer the file at `path` over `figment` with this syntax's provider
    pub fn merge_file(self, figment: Figment, path: &Path) -> Figment {
        match self {
            Self::Toml => figment.merge(providers::Toml::file(path)),
            Self::Json => figment.merge(providers::Json::file(path)),
            Self::Yaml => figment.merge(providers::Yaml::file(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("regsort.toml")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.JSON")), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_path(Path::new("x.yml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("x.ini")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_merge_file_uses_the_matching_syntax() {
        let temp_dir = TempDir::new().unwrap();
        let json = temp_dir.path().join("a.json");
        let yaml = temp_dir.path().join("b.yaml");
        fs::write(&json, r#"{"single_match": true, "output_dir": "json-out"}"#).unwrap();
        fs::write(&yaml, "output_dir: yaml-out\n").unwrap();

        let figment = ConfigFormat::Json.merge_file(Figment::new(), &json);
        let figment = ConfigFormat::Yaml.merge_file(figment, &yaml);

        assert!(figment.extract_inner::<bool>("single_match").unwrap());
        assert_eq!(figment.extract_inner::<String>("output_dir").unwrap(), "yaml-out");
    }
}
