//! Error types for bgmdeck.
//!
//! None of these reach the user as a failure message: playback errors
//! degrade to "music off" and are only logged.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration layering failed (file or environment).
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Track manifest could not be interpreted.
    #[error("manifest error: {0}")]
    Manifest(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source could be opened but not decoded.
    #[error("audio decode error: {0}")]
    Decode(String),

    /// Source is not a local file (no network streaming).
    #[error("unsupported source: {0}")]
    UnsupportedSource(String),

    /// No usable output device.
    #[error("audio output error: {0}")]
    AudioOutput(String),

    /// The audio thread is gone.
    #[error("audio thread channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, Error>;
