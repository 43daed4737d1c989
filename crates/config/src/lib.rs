//! Layered configuration for the `mlm` shell.
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. The user config file, `config.toml` in the platform config directory
//!    (e.g. `~/.config/medialib/config.toml` on Linux)
//! 3. A file passed explicitly with `--config` (TOML, YAML or JSON, chosen by
//!    extension)
//! 4. Environment variables prefixed `MEDIALIB_` (e.g. `MEDIALIB_PROMPT`,
//!    `MEDIALIB_LOG`, `MEDIALIB_AUTOLOAD='["library.json"]'`)

pub mod error;

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, Result};

const ENV_PREFIX: &str = "MEDIALIB_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Printed before every command.
    pub prompt: String,
    /// JSON files loaded before the first prompt, in order.
    pub autoload: Vec<String>,
    /// `tracing` filter directive for diagnostics on stderr.
    pub log: String,
}
impl Default for Config {
    fn default() -> Self {
        Self { prompt: "> ".to_string(), autoload: Vec::new(), log: "warn".to_string() }
    }
}
impl Config {
    /// Loads the configuration from every source (see the crate docs).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(explicit)?.extract().or_raise(|| ErrorKind::Load)?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Builds the provider chain without extracting it.
    pub fn figment(explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = Self::user_config_path()
            && path.is_file()
        {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            if !path.is_file() {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            }
            figment = match path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase).as_deref() {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Location of the per-user config file, if the platform has one.
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "medialib").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    /// Points the per-user config lookup inside the jail.
    fn isolate(jail: &mut Jail) {
        let dir = jail.directory().display().to_string();
        jail.set_env("HOME", &dir);
        jail.set_env("XDG_CONFIG_HOME", format!("{dir}/.config"));
    }

    #[test]
    fn test_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let config = Config::load(None).unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.prompt, "> ");
            assert_eq!(config.log, "warn");
            Ok(())
        });
    }

    #[rstest]
    #[case("medialib.toml", "prompt = \"mlm> \"\nautoload = [\"a.json\", \"b.json\"]\n")]
    #[case("medialib.yaml", "prompt: \"mlm> \"\nautoload:\n  - a.json\n  - b.json\n")]
    #[case("medialib.json", r#"{"prompt": "mlm> ", "autoload": ["a.json", "b.json"]}"#)]
    fn test_explicit_file(#[case] name: &str, #[case] contents: &str) {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file(name, contents)?;
            let config = Config::load(Some(Path::new(name))).unwrap();
            assert_eq!(config.prompt, "mlm> ");
            assert_eq!(config.autoload, vec!["a.json".to_string(), "b.json".to_string()]);
            assert_eq!(config.log, "warn");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("medialib.toml", "prompt = \"file> \"\nlog = \"info\"\n")?;
            jail.set_env("MEDIALIB_PROMPT", "env> ");
            let config = Config::load(Some(Path::new("medialib.toml"))).unwrap();
            assert_eq!(config.prompt, "env> ");
            assert_eq!(config.log, "info");
            Ok(())
        });
    }

    #[test]
    fn test_user_config_file() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let path = Config::user_config_path().unwrap();
            assert!(path.starts_with(jail.directory()));
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "prompt = \"user> \"\n").unwrap();
            assert_eq!(Config::load(None).unwrap().prompt, "user> ");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let err = Config::load(Some(Path::new("nope.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::NotFound(PathBuf::from("nope.toml")));
            Ok(())
        });
    }

    #[test]
    fn test_unsupported_format() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("medialib.ini", "prompt = x")?;
            let err = Config::load(Some(Path::new("medialib.ini"))).unwrap_err();
            assert_eq!(*err, ErrorKind::UnsupportedFormat(PathBuf::from("medialib.ini")));
            Ok(())
        });
    }

    #[test]
    fn test_wrong_type_fails() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("medialib.toml", "autoload = 7\n")?;
            let err = Config::load(Some(Path::new("medialib.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::Load);
            Ok(())
        });
    }
}
