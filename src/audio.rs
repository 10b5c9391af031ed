//! Audio subsystem: the voice traits, the rodio-backed audio thread and the
//! registry of legacy voices.

mod legacy;
mod player;
mod sink;
mod thread;
mod types;
mod voice;

pub use legacy::LegacyVoices;
pub use player::{AudioPlayer, LegacyVoice};
pub use types::*;
pub use voice::{PlaybackVoice, Voice};

#[cfg(test)]
pub(crate) mod fake;
