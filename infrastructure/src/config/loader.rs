//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["dezin.toml", ".dezin.toml"];
const ENV_PREFIX: &str = "DEZIN_";
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `GEMINI_API_KEY`
    /// 2. `DEZIN_*` environment variables
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./dezin.toml` or `./.dezin.toml`
    /// 5. XDG config: `$XDG_CONFIG_HOME/dezin/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Self::file_figment(
            Self::global_config_path().as_deref(),
            Path::new("."),
            config_path,
        ))
        .extract()
        .map_err(Box::new)
    }

    /// Defaults plus environment, skipping every file (for --no-config)
    pub fn load_without_files() -> Result<FileConfig, Box<figment::Error>> {
        Self::with_env(Figment::new().merge(Serialized::defaults(FileConfig::default())))
            .extract()
            .map_err(Box::new)
    }

    /// Load file sources only, rooted at `project_dir`
    pub fn load_files(
        global_path: Option<&Path>,
        project_dir: &Path,
        config_path: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        Self::file_figment(global_path, project_dir, config_path)
            .extract()
            .map_err(Box::new)
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&[API_KEY_ENV])
                    .map(|_| "gemini.api_key".into()),
            )
    }

    fn file_figment(
        global_path: Option<&Path>,
        project_dir: &Path,
        config_path: Option<&Path>,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        if let Some(path) = Self::project_config_path_in(project_dir) {
            figment = figment.merge(Toml::file(path));
        }

        // Explicit path is merged even when missing so the error surfaces
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/dezin/config.toml if set,
    /// otherwise falls back to the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("dezin").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_path_in(Path::new("."))
    }

    fn project_config_path_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(config_path: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        let env_found = std::env::var_os(API_KEY_ENV).is_some();
        lines.push(format!(
            "  [{}] Env:     {}",
            if env_found { "FOUND" } else { "     " },
            API_KEY_ENV
        ));
        lines.push(format!("  [     ] Env:     {}*", ENV_PREFIX));

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("  [{}] Explicit: {}", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./dezin.toml or ./.dezin.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_no_files_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_files(None, dir.path(), None).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("dezin"));
    }

    #[test]
    fn test_project_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(
            &global,
            "[retry]\nmax_attempts = 7\nbase_delay_ms = 100\n",
        )
        .unwrap();
        fs::write(dir.path().join("dezin.toml"), "[retry]\nmax_attempts = 2\n").unwrap();

        let config = ConfigLoader::load_files(Some(&global), dir.path(), None).unwrap();

        assert_eq!(config.retry.max_attempts, 2);
        assert_eq!(config.retry.base_delay_ms, 100);
    }

    #[test]
    fn test_hidden_project_file_is_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".dezin.toml"),
            "[models]\ndefault = \"gemini-2.5-pro\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load_files(None, dir.path(), None).unwrap();
        assert_eq!(config.models.default.as_deref(), Some("gemini-2.5-pro"));
    }

    #[test]
    fn test_explicit_file_has_highest_file_priority() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("dezin.toml"),
            "[models]\nhierarchy = [\"a\", \"b\"]\ndefault = \"a\"\n",
        )
        .unwrap();
        let explicit = dir.path().join("custom.toml");
        fs::write(&explicit, "[models]\ndefault = \"b\"\n").unwrap();

        let config = ConfigLoader::load_files(None, dir.path(), Some(&explicit)).unwrap();

        assert_eq!(config.models.default.as_deref(), Some("b"));
        assert_eq!(
            config.models.hierarchy,
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ConfigLoader::load_files(None, dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_value_type_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dezin.toml"), "[retry]\nmax_attempts = \"many\"\n").unwrap();
        assert!(ConfigLoader::load_files(None, dir.path(), None).is_err());
    }
}
