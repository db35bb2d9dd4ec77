use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub launch: LaunchConfig,
    #[serde(default)]
    pub sources: SourceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    /// How many results a query shows at most.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize { 100 }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LaunchConfig {
    /// Prefix for `Terminal=true` entries, e.g. "kitty -e".
    #[serde(default)]
    pub terminal: Option<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SourceConfig {
    /// Application directories in priority order. Empty means the XDG defaults.
    #[serde(default)]
    pub directories: Vec<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CacheConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct FilterConfig {
    /// Regexes matched against name or id; matching entries are hidden.
    pub blacklist: Option<Vec<String>>,
    /// Substrings of name or id; when set, only matching entries are shown.
    pub whitelist: Option<Vec<String>>,
}

pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "gell", "gell")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.general.max_results, 100);
        assert!(config.launch.terminal.is_none());
        assert!(config.sources.directories.is_empty());
        assert!(config.cache.path.is_none());
        assert!(config.filter.blacklist.is_none());
    }

    #[test]
    fn reads_all_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[general]
max_results = 20

[launch]
terminal = "kitty -e"
env = { GDK_BACKEND = "wayland" }

[sources]
directories = ["/opt/apps", "/usr/share/applications"]

[cache]
path = "/tmp/gell.json"

[filter]
blacklist = ["^Avahi"]
whitelist = ["Fire"]
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.max_results, 20);
        assert_eq!(config.launch.terminal.as_deref(), Some("kitty -e"));
        assert_eq!(config.launch.env["GDK_BACKEND"], "wayland");
        assert_eq!(
            config.sources.directories,
            vec![PathBuf::from("/opt/apps"), PathBuf::from("/usr/share/applications")]
        );
        assert_eq!(config.cache.path, Some(PathBuf::from("/tmp/gell.json")));
        assert_eq!(config.filter.blacklist, Some(vec!["^Avahi".to_string()]));
        assert_eq!(config.filter.whitelist, Some(vec!["Fire".to_string()]));
    }

    #[test]
    fn partial_section_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[launch]\nterminal = \"foot\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.max_results, 100);
        assert!(config.launch.env.is_empty());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nmax_results = ").unwrap();

        assert!(load_config_from(&path).is_err());
    }
}
