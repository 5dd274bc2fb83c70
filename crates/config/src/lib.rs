//! Configuration loading and validation.
//!
//! Configuration is layered: compiled-in defaults, then an optional TOML
//! file, then environment variables prefixed with `PODIUM_` (nested keys
//! separated by `__`, e.g. `PODIUM_FETCH__WORKERS=8`). Later layers win.

mod error;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::OptionExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::{Error, ErrorKind, Result};

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "PODIUM_";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source: SourceConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

/// Where the conference archive lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Scheme and host, no trailing slash.
    pub base_url: String,
    /// Path of the conference index page.
    pub index_path: String,
    /// Language code appended to every page request.
    pub lang: String,
}

/// HTTP client behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub retries: u32,
    pub backoff_ms: u64,
    /// Concurrent in-flight talk page fetches.
    pub workers: usize,
}

/// Where export artifacts are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Defaults to the platform data directory when unset.
    pub dir: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.churchofjesuschrist.org".to_string(),
            index_path: "/study/general-conference".to_string(),
            lang: "eng".to_string(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            retries: 3,
            backoff_ms: 500,
            workers: 4,
        }
    }
}

impl SourceConfig {
    /// Full URL of the conference index page.
    pub fn index_url(&self) -> String {
        format!("{}{}?lang={}", self.base_url, self.index_path, self.lang)
    }
}

impl Config {
    /// Load configuration from defaults, an optional TOML file, and the
    /// environment.
    ///
    /// A missing file at an explicitly given path is an error; figment
    /// treats the implicit default path as optional.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        figment = match file {
            Some(path) => {
                if !path.exists() {
                    exn::bail!(ErrorKind::ConfigFile(path.to_path_buf()));
                }
                figment.merge(Toml::file(path))
            }
            None => figment.merge(Toml::file("podium.toml")),
        };
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        let config: Config = match figment.extract() {
            Ok(config) => config,
            Err(err) => exn::bail!(ErrorKind::Invalid(err.to_string())),
        };
        config.validate()?;
        debug!(index = %config.source.index_url(), "configuration loaded");
        Ok(config)
    }

    /// Reject configurations that would make the pipeline misbehave.
    pub fn validate(&self) -> Result<()> {
        if !self.source.base_url.starts_with("http") {
            exn::bail!(ErrorKind::Invalid(format!(
                "source.base_url must be an http(s) URL, got {:?}",
                self.source.base_url
            )));
        }
        if self.source.base_url.ends_with('/') {
            exn::bail!(ErrorKind::Invalid(
                "source.base_url must not end with a slash".to_string()
            ));
        }
        if self.fetch.workers == 0 {
            exn::bail!(ErrorKind::Invalid("fetch.workers must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Directory export artifacts are written into, falling back to the
    /// platform data directory.
    pub fn output_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.output.dir {
            return Ok(dir.clone());
        }
        let dirs = ProjectDirs::from("", "", "podium").ok_or_raise(|| ErrorKind::NoDataDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(
            config.source.index_url(),
            "https://www.churchofjesuschrist.org/study/general-conference?lang=eng"
        );
        assert_eq!(config.fetch.workers, 4);
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "[source]\nlang = \"spa\"\n\n[fetch]\nworkers = 8\n\n[output]\ndir = \"/tmp/podium\"\n"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.source.lang, "spa");
        assert_eq!(config.fetch.workers, 8);
        assert_eq!(config.output.dir, Some(PathBuf::from("/tmp/podium")));
        // Untouched sections keep their defaults.
        assert_eq!(config.fetch.retries, 3);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/podium.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_workers_is_rejected() {
        let mut config = Config::default();
        config.fetch.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_trailing_slash_on_base_url_is_rejected() {
        let mut config = Config::default();
        config.source.base_url = "https://example.org/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_output_dir_wins() {
        let mut config = Config::default();
        config.output.dir = Some(PathBuf::from("/data/exports"));
        assert_eq!(config.output_dir().unwrap(), PathBuf::from("/data/exports"));
    }
}
