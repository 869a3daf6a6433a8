mod keybindings;

use std::path::PathBuf;

use color_eyre::eyre::Result;
use serde::Deserialize;

use crate::utils;

pub use keybindings::{key_event_to_string, parse_key_sequence, KeyBindings};

const CONFIG: &str = include_str!("../.config/config.json5");

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub api_base_url: String,
}

impl Config {
    /// Layers user config files over the embedded defaults. Unlike secrets,
    /// everything here has a usable default, so a missing config file is
    /// fine.
    pub fn new() -> Result<Self, config::ConfigError> {
        let default_config: Config = json5::from_str(CONFIG)
            .map_err(|e| config::ConfigError::Message(format!("bad embedded config: {e}")))?;
        let data_dir = utils::get_data_dir();
        let config_dir = utils::get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_str().unwrap_or_default())?
            .set_default("_config_dir", config_dir.to_str().unwrap_or_default())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        for (mode, default_bindings) in default_config.keybindings.iter() {
            let user_bindings = cfg.keybindings.entry(*mode).or_default();
            for (key, cmd) in default_bindings.iter() {
                user_bindings
                    .entry(key.clone())
                    .or_insert_with(|| cmd.clone());
            }
        }

        if cfg.api_base_url.is_empty() {
            cfg.api_base_url = default_config.api_base_url;
        }
        if cfg.api_base_url.is_empty() {
            cfg.api_base_url = String::from(DEFAULT_API_BASE_URL);
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{action::Action, mode::Mode};

    #[test]
    fn test_embedded_defaults_parse() {
        let cfg: Config = json5::from_str(CONFIG).expect("embedded config must parse");
        assert!(!cfg.api_base_url.is_empty());

        let list = cfg
            .keybindings
            .get(&Mode::List)
            .expect("List mode bindings");
        assert_eq!(
            list.get(&parse_key_sequence("<q>").unwrap_or_default()),
            Some(&Action::Quit)
        );
    }
}
