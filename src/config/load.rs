use std::{env, path::PathBuf};

use crate::error::{Error, Result};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `BGMDECK__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("BGMDECK")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Load and validate; on any failure fall back to defaults and hand the
    /// error back so it can be logged once logging is up.
    pub fn load_or_default() -> (Self, Option<Error>) {
        match Self::load().and_then(|s| s.validate().map(|()| s)) {
            Ok(s) => (s, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<()> {
        let step = self.controls.volume_step;
        if !(step > 0.0 && step <= 1.0) {
            return Err(Error::InvalidConfig(
                "controls.volume_step must be in (0, 1]".to_string(),
            ));
        }
        if let Some(bad) = self.controls.toggle_keys.keys().find(|k| k.chars().count() != 1) {
            return Err(Error::InvalidConfig(format!(
                "controls.toggle_keys: `{bad}` is not a single character"
            )));
        }
        Ok(())
    }

    /// Path of the persisted music settings record.
    pub fn settings_file_path(&self) -> Option<PathBuf> {
        self.storage
            .settings_file
            .clone()
            .or_else(|| config_dir().map(|d| d.join("settings.toml")))
    }

    /// Path of the log file.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log.file.clone().or_else(default_log_path)
    }
}

/// Resolve the config path from `BGMDECK_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("BGMDECK_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/bgmdeck/config.toml`
/// or `~/.config/bgmdeck/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

fn config_dir() -> Option<PathBuf> {
    xdg_home("XDG_CONFIG_HOME", ".config").map(|d| d.join("bgmdeck"))
}

/// `$XDG_STATE_HOME/bgmdeck/bgmdeck.log`, falling back to `~/.local/state`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_home("XDG_STATE_HOME", ".local/state").map(|d| d.join("bgmdeck").join("bgmdeck.log"))
}

fn xdg_home(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
