use anyhow::{Context, Result};
use chatfork_types::ExportOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::ColorMode;

const CONFIG_ENV: &str = "CHATFORK_CONFIG";

/// Resolve the config file path based on priority:
/// 1. Explicit `--config` path (with tilde expansion)
/// 2. CHATFORK_CONFIG environment variable (with tilde expansion)
/// 3. `<config dir>/chatfork/config.toml`
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(expand_tilde(&path.to_string_lossy()));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV)
        && !env_path.is_empty()
    {
        return Some(expand_tilde(&env_path));
    }

    dirs::config_dir().map(|dir| dir.join("chatfork").join("config.toml"))
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub show_all: bool,
    pub color: ColorMode,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            show_all: false,
            color: ColorMode::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub include_thinking: bool,
    pub include_artifacts: bool,
    pub include_tools: bool,
    pub include_citations: bool,
    pub include_timestamps: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let defaults = ExportOptions::default();
        Self {
            include_thinking: defaults.include_thinking,
            include_artifacts: defaults.include_artifacts,
            include_tools: defaults.include_tools,
            include_citations: defaults.include_citations,
            include_timestamps: defaults.include_timestamps,
        }
    }
}

impl ExportConfig {
    pub fn to_options(&self) -> ExportOptions {
        ExportOptions {
            include_thinking: self.include_thinking,
            include_artifacts: self.include_artifacts,
            include_tools: self.include_tools,
            include_citations: self.include_citations,
            include_timestamps: self.include_timestamps,
            export_marked_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Load from the resolved path; no resolvable path or a missing file yields defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("none.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.export.include_thinking);
        assert_eq!(config.view.color, ColorMode::Auto);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[export]\ninclude_thinking = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.export.include_thinking);
        assert!(config.export.include_tools);
        assert!(!config.view.show_all);
    }

    #[test]
    fn test_view_section_is_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[view]\nshow_all = true\ncolor = \"never\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.view.show_all);
        assert_eq!(config.view.color, ColorMode::Never);
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[view]\nshow_all = \"sometimes\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/tmp/explicit.toml");
        assert_eq!(resolve_config_path(Some(&path)), Some(path));
    }
}
