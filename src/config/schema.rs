use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/bgmdeck/config.toml` or `~/.config/bgmdeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BGMDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub storage: StorageSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Re-queue the background track when it drains instead of ending.
    pub loop_track: bool,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            loop_track: true,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ one track at a time ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Amount the volume slider moves per `h` / `l` press.
    pub volume_step: f32,
    /// Key -> settings key passed to the toggle dispatcher.
    ///
    /// Example: { m = "music", e = "effects" }
    pub toggle_keys: BTreeMap<String, String>,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        let mut toggle_keys = BTreeMap::new();
        toggle_keys.insert("m".to_string(), "music".to_string());
        toggle_keys.insert("e".to_string(), "effects".to_string());
        Self {
            volume_step: 0.05,
            toggle_keys,
        }
    }
}

impl ControlsSettings {
    /// Settings key bound to the pressed character, if any.
    pub fn toggle_for(&self, c: char) -> Option<&str> {
        let mut buf = [0u8; 4];
        self.toggle_keys
            .get(c.encode_utf8(&mut buf) as &str)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory scanned for audio files (each file becomes a descriptor).
    pub dir: Option<PathBuf>,
    /// Optional TOML manifest with explicit descriptors and display titles.
    pub manifest: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            dir: None,
            manifest: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where the music settings record (`bgm`, `music`, `volume`, ...) lives.
    /// Defaults to `settings.toml` next to `config.toml`.
    pub settings_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log file path. Defaults to `$XDG_STATE_HOME/bgmdeck/bgmdeck.log`.
    pub file: Option<PathBuf>,
    /// Filter directive used when `BGMDECK_LOG` is unset.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
