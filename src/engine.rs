//! Single-player engine: the state machine around the one shared voice.

mod player;
mod state;

pub use player::{DEFAULT_VOLUME, Engine};
pub use state::{EngineState, PlayRequest, PlayerState};

#[cfg(test)]
mod tests;
