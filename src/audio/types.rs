//! Audio-related small types.
//!
//! This module defines the commands sent to the audio thread and the
//! lifecycle events it sends back.

/// Identifies one asynchronous start request. Strictly increasing.
pub type RequestToken = u64;

#[derive(Debug)]
pub enum AudioCmd {
    /// Load `source` into the main voice at `volume` and start it.
    Start {
        token: RequestToken,
        source: String,
        volume: f32,
    },
    /// Pause the main voice.
    Pause,
    /// Move the main voice back to position zero.
    Rewind,
    /// Set the main voice volume.
    SetVolume(f32),
    /// Try to open the output device again if it is not available.
    ResumeOutput,
    /// Create a legacy voice for `source` in `slot`, playing if `autoplay`.
    Preload {
        slot: usize,
        source: String,
        autoplay: bool,
    },
    /// Operate on the legacy voice in `slot`.
    Legacy { slot: usize, op: LegacyOp },
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LegacyOp {
    Pause,
    Rewind,
    SetVolume(f32),
}

/// Lifecycle events of the main voice.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceEvent {
    /// The start request `token` succeeded; `source` is audible.
    Started { token: RequestToken, source: String },
    /// The start request `token` failed (missing device, unreadable file...).
    Rejected { token: RequestToken, reason: String },
    /// `source` was paused.
    Paused { source: String },
    /// `source` played to its end.
    Ended { source: String },
}
