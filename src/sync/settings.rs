//! The host-owned music settings record and its persistence.

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::engine::DEFAULT_VOLUME;
use crate::error::Result;

pub const BGM_KEY: &str = "bgm";
pub const MUSIC_KEY: &str = "music";
pub const VOLUME_KEY: &str = "volume";

/// Settings as the host stores them: `bgm`, `music`, `volume` and whatever
/// other keys the host keeps alongside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsRecord {
    values: Table,
}

impl SettingsRecord {
    /// Fresh record: music on, default volume, no selection.
    pub fn with_defaults() -> Self {
        let mut record = Self::default();
        record.set_music_enabled(true);
        record.set_volume(DEFAULT_VOLUME);
        record.set_bgm("");
        record
    }

    pub fn from_table(values: Table) -> Self {
        Self { values }
    }

    pub fn table(&self) -> &Table {
        &self.values
    }

    /// Selected track id; empty when nothing is selected.
    pub fn bgm(&self) -> &str {
        self.values
            .get(BGM_KEY)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn set_bgm(&mut self, id: &str) {
        self.values
            .insert(BGM_KEY.to_string(), Value::String(id.to_string()));
    }

    pub fn music_enabled(&self) -> bool {
        self.flag(MUSIC_KEY)
    }

    pub fn set_music_enabled(&mut self, on: bool) {
        self.set_flag(MUSIC_KEY, on);
    }

    /// Boolean flag under `key`; anything that is not a boolean reads as off.
    pub fn flag(&self, key: &str) -> bool {
        self.values
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn set_flag(&mut self, key: &str, on: bool) {
        self.values.insert(key.to_string(), Value::Boolean(on));
    }

    /// Stored volume, if present and numeric.
    pub fn volume(&self) -> Option<f32> {
        match self.values.get(VOLUME_KEY)? {
            Value::Float(f) if f.is_finite() => Some(*f as f32),
            Value::Integer(i) => Some(*i as f32),
            _ => None,
        }
    }

    /// Stored volume clamped into `[0, 1]`, or the default.
    pub fn volume_or_default(&self) -> f32 {
        self.volume()
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_VOLUME)
    }

    /// Stored with three decimals so the file stays readable.
    pub fn set_volume(&mut self, volume: f32) {
        let v = (f64::from(volume) * 1000.0).round() / 1000.0;
        self.values.insert(VOLUME_KEY.to_string(), Value::Float(v));
    }
}

/// Access to the host's settings record.
pub trait SettingsStore {
    fn record(&self) -> &SettingsRecord;
    fn record_mut(&mut self) -> &mut SettingsRecord;
    /// Persist the record. Fire-and-forget; a store without persistence
    /// does nothing.
    fn save(&mut self) {}
}

impl SettingsStore for SettingsRecord {
    fn record(&self) -> &SettingsRecord {
        self
    }

    fn record_mut(&mut self) -> &mut SettingsRecord {
        self
    }
}

/// A settings record persisted as a TOML file.
#[derive(Debug)]
pub struct TomlSettingsFile {
    path: PathBuf,
    record: SettingsRecord,
}

impl TomlSettingsFile {
    /// Read `path`, or start from defaults when it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let record = read_record(&path)?;
        Ok(Self { path, record })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pick up changes another process made to the file.
    pub fn reload(&mut self) -> Result<()> {
        self.record = read_record(&self.path)?;
        Ok(())
    }

    fn write(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let text = toml::to_string(self.record.table())?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

fn read_record(path: &Path) -> Result<SettingsRecord> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file yet, using defaults");
        return Ok(SettingsRecord::with_defaults());
    }
    let text = fs::read_to_string(path)?;
    let table: Table = toml::from_str(&text)?;
    Ok(SettingsRecord::from_table(table))
}

impl SettingsStore for TomlSettingsFile {
    fn record(&self) -> &SettingsRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut SettingsRecord {
        &mut self.record
    }

    fn save(&mut self) {
        if let Err(e) = self.write() {
            warn!(path = %self.path.display(), "failed to persist settings: {e}");
        }
    }
}
