use tracing::{debug, warn};

use crate::audio::{PlaybackVoice, RequestToken, VoiceEvent};
use crate::catalog::{Catalog, Track};

use super::state::{EngineState, Pending, PlayRequest, PlayerState};

/// Volume used when nothing valid has been configured.
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Owns the one playback voice and keeps at most one track in it.
///
/// All calls are synchronous requests; the authoritative playing flag only
/// changes when the voice reports back through [`Engine::handle_event`].
pub struct Engine<V: PlaybackVoice> {
    voice: V,
    catalog: Catalog,
    state: EngineState,
    current: Option<String>,
    pending: Option<Pending>,
    is_playing: bool,
    volume: f32,
    last_token: RequestToken,
}

impl<V: PlaybackVoice> Engine<V> {
    pub fn new(voice: V, catalog: Catalog) -> Self {
        Self {
            voice,
            catalog,
            state: EngineState::Idle,
            current: None,
            pending: None,
            is_playing: false,
            volume: DEFAULT_VOLUME,
            last_token: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn voice(&self) -> &V {
        &self.voice
    }

    pub fn voice_mut(&mut self) -> &mut V {
        &mut self.voice
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Idle or stopped: nothing loading, nothing playing.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, EngineState::Idle | EngineState::Stopped)
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn current_track_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn player_state(&self) -> PlayerState {
        PlayerState {
            current_track_id: self.current.clone(),
            is_playing: self.is_playing,
            volume: self.volume,
            state: self.state,
        }
    }

    /// The track held by the voice: playing, or waiting to start.
    pub fn now_playing(&self) -> Option<&Track> {
        match self.state {
            EngineState::Playing => self.current.as_deref().and_then(|id| self.catalog.get(id)),
            EngineState::Loading => self
                .pending
                .as_ref()
                .and_then(|p| self.catalog.get(&p.track_id)),
            EngineState::Idle | EngineState::Stopped => None,
        }
    }

    pub fn play_by_id(&mut self, id: &str) -> PlayRequest {
        let Some(track) = self.catalog.get(id).filter(|t| t.is_playable()).cloned() else {
            debug!(id, "no playable track for id, stopping");
            self.halt();
            return PlayRequest::Unavailable;
        };

        if self.state == EngineState::Playing && self.current.as_deref() == Some(id) {
            return PlayRequest::AlreadyPlaying;
        }

        self.voice.pause();
        self.voice.load(&track.source);
        self.voice.set_volume(self.volume);

        self.last_token += 1;
        let token = self.last_token;
        self.current = None;
        self.is_playing = false;
        self.pending = Some(Pending {
            token,
            track_id: track.id.clone(),
            source: track.source.clone(),
        });
        self.state = EngineState::Loading;

        match self.voice.start(token) {
            Ok(()) => {
                debug!(token, id, "start requested");
                PlayRequest::Requested(token)
            }
            Err(e) => {
                warn!(id, "could not request playback: {e}");
                self.pending = None;
                self.state = EngineState::Idle;
                PlayRequest::Failed
            }
        }
    }

    /// Pause, rewind and forget the current track. Always succeeds.
    pub fn stop(&mut self) {
        self.halt();
    }

    /// NaN is ignored; everything else is clamped into `[0, 1]`.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
        self.voice.set_volume(self.volume);
    }

    /// Apply a lifecycle event from the voice. Returns whether state changed.
    pub fn handle_event(&mut self, event: VoiceEvent) -> bool {
        match event {
            VoiceEvent::Started { token, source } => {
                let Some(pending) = self.pending.as_ref() else {
                    debug!(token, "start acknowledged with nothing pending");
                    return false;
                };
                // Only the newest request may commit, and only while the voice
                // still holds its source.
                if pending.token != token
                    || pending.source != source
                    || self.voice.source() != Some(source.as_str())
                {
                    debug!(token, latest = pending.token, "ignoring stale start");
                    return false;
                }
                let Some(pending) = self.pending.take() else {
                    return false;
                };
                self.current = Some(pending.track_id);
                self.is_playing = true;
                self.state = EngineState::Playing;
                true
            }
            VoiceEvent::Rejected { token, reason } => {
                if self.pending.as_ref().map(|p| p.token) != Some(token) {
                    debug!(token, "ignoring stale rejection");
                    return false;
                }
                warn!(token, "playback start rejected: {reason}");
                self.pending = None;
                self.current = None;
                self.is_playing = false;
                self.state = EngineState::Idle;
                true
            }
            VoiceEvent::Paused { source } | VoiceEvent::Ended { source } => {
                if self.state != EngineState::Playing
                    || self.voice.source() != Some(source.as_str())
                {
                    return false;
                }
                self.current = None;
                self.is_playing = false;
                self.state = EngineState::Idle;
                true
            }
        }
    }

    fn halt(&mut self) {
        self.voice.pause();
        self.voice.rewind();
        self.pending = None;
        self.current = None;
        self.is_playing = false;
        if self.state != EngineState::Idle {
            self.state = EngineState::Stopped;
        }
    }
}
