use crate::audio::RequestToken;

/// Where the single voice is in its lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EngineState {
    /// No track selected, not playing.
    #[default]
    Idle,
    /// A start was requested and has not been answered yet.
    Loading,
    /// The voice acknowledged the start and is audible.
    Playing,
    /// Explicitly stopped; the voice is back at position zero.
    Stopped,
}

impl EngineState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::Playing => "Playing",
            Self::Stopped => "Stopped",
        }
    }
}

/// Snapshot of the engine for observers.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub current_track_id: Option<String>,
    pub is_playing: bool,
    pub volume: f32,
    pub state: EngineState,
}

/// Result of a `play_by_id` call. The final outcome of a `Requested` start
/// only shows up once the voice answers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayRequest {
    /// Unknown id or no source: the engine fell back to idle.
    Unavailable,
    /// That track is already playing.
    AlreadyPlaying,
    /// A start request is in flight under this token.
    Requested(RequestToken),
    /// The start could not even be dispatched.
    Failed,
}

/// The start request the engine is waiting on.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct Pending {
    pub token: RequestToken,
    pub track_id: String,
    pub source: String,
}
