//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "airline-bench";
const PROJECT_FILES: [&str; 2] = ["airline-bench.toml", ".airline-bench.toml"];
const ENV_PREFIX: &str = "AIRLINE_BENCH_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `AIRLINE_BENCH_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./airline-bench.toml` or `./.airline-bench.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/airline-bench/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/airline-bench/config.toml if set,
    /// otherwise falls back to ~/.config/airline-bench/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./airline-bench.toml or ./.airline-bench.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.adapter.idle_limit, 150);
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("airline-bench"));
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_config(
            dir.path(),
            "project.toml",
            "[adapter]\nidle_limit = 10\nmax_drain = 5\n",
        );
        let explicit = write_config(dir.path(), "explicit.toml", "[adapter]\nidle_limit = 20\n");

        let config: FileConfig =
            ConfigLoader::figment(None, Some(&project), Some(&explicit))
                .extract()
                .unwrap();

        assert_eq!(config.adapter.idle_limit, 20);
        assert_eq!(config.adapter.max_drain, 5);
        assert_eq!(config.adapter.max_num_steps, 200);
    }

    #[test]
    fn test_environment_overrides_files() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("explicit.toml", "[adapter]\nidle_limit = 20\n")?;
            jail.set_env("AIRLINE_BENCH_ADAPTER__IDLE_LIMIT", "7");
            jail.set_env("AIRLINE_BENCH_OUTPUT__FORMAT", "json");

            let config: FileConfig =
                ConfigLoader::figment(None, None, Some(Path::new("explicit.toml"))).extract()?;

            assert_eq!(config.adapter.idle_limit, 7);
            assert_eq!(config.output.format, Some(airline_domain::OutputFormat::Json));
            Ok(())
        });
    }
}
