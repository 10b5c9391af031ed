use crate::error::Result;

use super::types::RequestToken;

/// A raw playback resource.
pub trait Voice {
    fn pause(&mut self);
    /// Return to position zero without starting.
    fn rewind(&mut self);
    fn set_volume(&mut self, volume: f32);
}

/// The single voice the engine drives.
///
/// Starting is asynchronous: `start` only dispatches the request, the
/// outcome arrives later as a [`super::VoiceEvent`] carrying `token`.
pub trait PlaybackVoice: Voice {
    /// Assign a new source without starting it.
    fn load(&mut self, source: &str);
    /// The currently assigned source.
    fn source(&self) -> Option<&str>;
    /// Dispatch a start request for the loaded source.
    fn start(&mut self, token: RequestToken) -> Result<()>;
    /// Bring a suspended output back, if the backend has such a notion.
    fn resume_output(&mut self) -> Result<()> {
        Ok(())
    }
}
