//! Debug surface: drive the engine directly, bypassing the settings record.

use crate::audio::PlaybackVoice;
use crate::catalog::Track;
use crate::engine::PlayRequest;

use super::adapter::StateSync;
use super::input::ControlInput;
use super::labels::Labels;
use super::settings::SettingsStore;

pub struct DebugSurface<'a, V: PlaybackVoice, S: SettingsStore, L: Labels> {
    sync: &'a mut StateSync<V, S, L>,
}

impl<V: PlaybackVoice, S: SettingsStore, L: Labels> StateSync<V, S, L> {
    pub fn debug(&mut self) -> DebugSurface<'_, V, S, L> {
        DebugSurface { sync: self }
    }
}

impl<V: PlaybackVoice, S: SettingsStore, L: Labels> DebugSurface<'_, V, S, L> {
    pub fn play_by_id(&mut self, id: &str) -> PlayRequest {
        let req = self.sync.engine.play_by_id(id);
        self.sync.refresh_now_playing();
        req
    }

    pub fn stop(&mut self) {
        self.sync.engine.stop();
        self.sync.refresh_now_playing();
    }

    /// Returns `false` when the value is not numeric.
    pub fn set_volume(&mut self, input: impl Into<ControlInput>) -> bool {
        match input.into().volume() {
            Some(v) => {
                self.sync.engine.set_volume(v);
                true
            }
            None => false,
        }
    }

    pub fn tracks(&self) -> Vec<Track> {
        self.sync.engine.catalog().snapshot()
    }

    /// Run one command line and describe the outcome.
    pub fn run(&mut self, line: &str) -> String {
        match DebugCommand::parse(line) {
            Ok(DebugCommand::Play(id)) => match self.play_by_id(&id) {
                PlayRequest::Requested(token) => format!("requested {id} (#{token})"),
                PlayRequest::AlreadyPlaying => format!("{id} is already playing"),
                PlayRequest::Unavailable => format!("no playable track `{id}`"),
                PlayRequest::Failed => "audio thread unavailable".to_string(),
            },
            Ok(DebugCommand::Stop) => {
                self.stop();
                "stopped".to_string()
            }
            Ok(DebugCommand::Volume(raw)) => {
                if self.set_volume(raw.as_str()) {
                    format!("volume {:.2}", self.sync.engine.volume())
                } else {
                    format!("not a number: `{raw}`")
                }
            }
            Ok(DebugCommand::Tracks) => self
                .tracks()
                .iter()
                .map(|t| {
                    if t.is_playable() {
                        format!("{}: {}", t.id, t.title)
                    } else {
                        format!("{}: {} (no source)", t.id, t.title)
                    }
                })
                .collect::<Vec<_>>()
                .join(" | "),
            Err(msg) => msg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugCommand {
    Play(String),
    Stop,
    Volume(String),
    Tracks,
}

impl DebugCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };
        match (verb, arg.is_empty()) {
            ("play", false) => Ok(Self::Play(arg.to_string())),
            ("stop", true) => Ok(Self::Stop),
            ("vol" | "volume", false) => Ok(Self::Volume(arg.to_string())),
            ("tracks", true) => Ok(Self::Tracks),
            ("play" | "vol" | "volume", true) => Err(format!("`{verb}` needs an argument")),
            _ => Err(format!("unknown command `{line}`")),
        }
    }
}
