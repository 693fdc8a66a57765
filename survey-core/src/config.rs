//! Viewer configuration, read from TOML.
//!
//! Every field is optional. A missing file means defaults; a file that exists
//! but does not parse is an error naming the path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SurveyError};
use crate::palette::PaletteName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub themes: PathBuf,
    pub countries: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            themes: PathBuf::from("questionsFormat.json"),
            countries: PathBuf::from("final_country.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub palette: PaletteName,
    /// Rows per bar in the terminal chart.
    pub bar_width: u16,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            palette: PaletteName::Tab10,
            bar_width: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub dataset: DatasetConfig,
    pub chart: ChartConfig,
    pub log: LogConfig,
}

impl ViewerConfig {
    /// `<config_dir>/surveylab/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("surveylab").join("config.toml"))
    }

    pub fn from_toml(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| SurveyError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SurveyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load `path`, falling back to defaults only when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Config for a binary: an explicit path must exist; the default location
    /// may be absent. Dataset paths in a file resolve against its directory.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };
        if !required && !path.exists() {
            return Ok(Self::default());
        }
        let cfg = Self::load(&path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        tracing::debug!("config loaded from {}", path.display());
        Ok(cfg.resolve_paths(base))
    }

    /// Resolve relative dataset paths against `base` (usually the config file's directory).
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.dataset.themes.is_relative() {
            self.dataset.themes = base.join(&self.dataset.themes);
        }
        if self.dataset.countries.is_relative() {
            self.dataset.countries = base.join(&self.dataset.countries);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = ViewerConfig::from_toml("", Path::new("config.toml")).unwrap();
        assert_eq!(cfg, ViewerConfig::default());
        assert_eq!(cfg.dataset.themes, PathBuf::from("questionsFormat.json"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = ViewerConfig::from_toml(
            "[chart]\npalette = \"neon\"\n",
            Path::new("config.toml"),
        )
        .unwrap();
        assert_eq!(cfg.chart.palette, PaletteName::Neon);
        assert_eq!(cfg.chart.bar_width, 1);
        assert_eq!(cfg.log.filter, "info");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = ViewerConfig::from_toml("[chart\n", Path::new("bad.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ViewerConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, ViewerConfig::default());
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewerConfig::discover(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
    }

    #[test]
    fn discovered_paths_resolve_next_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[dataset]\nthemes = \"t.json\"\n").unwrap();
        let cfg = ViewerConfig::discover(Some(&path)).unwrap();
        assert_eq!(cfg.dataset.themes, dir.path().join("t.json"));
        assert_eq!(cfg.dataset.countries, dir.path().join("final_country.json"));
    }

    #[test]
    fn relative_dataset_paths_resolve_against_base() {
        let cfg = ViewerConfig::default().resolve_paths(Path::new("/data/survey"));
        assert_eq!(
            cfg.dataset.countries,
            PathBuf::from("/data/survey/final_country.json")
        );
    }
}
