use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::error::{Error, Result};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, LegacyOp, RequestToken, VoiceEvent};
use super::voice::{PlaybackVoice, Voice};

/// Handle to the audio thread's main voice.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    source: Option<String>,
    volume: f32,
    next_slot: usize,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Spawn the audio thread. Lifecycle events of the main voice arrive on
    /// the returned receiver.
    pub fn new(audio_settings: AudioSettings) -> (Self, Receiver<VoiceEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<VoiceEvent>();

        let audio_handle = spawn_audio_thread(rx, events_tx, audio_settings);

        let player = Self {
            tx,
            source: None,
            volume: 1.0,
            next_slot: 0,
            join: Mutex::new(Some(audio_handle)),
        };
        (player, events_rx)
    }

    fn send(&self, cmd: AudioCmd) -> Result<()> {
        self.tx.send(cmd).map_err(|_| Error::ChannelClosed)
    }

    /// Create a legacy voice on the audio thread for `source`.
    pub fn legacy_voice(&mut self, source: &str, autoplay: bool) -> LegacyVoice {
        let slot = self.next_slot;
        self.next_slot += 1;
        let _ = self.send(AudioCmd::Preload {
            slot,
            source: source.to_string(),
            autoplay,
        });
        LegacyVoice {
            slot,
            tx: self.tx.clone(),
        }
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Voice for AudioPlayer {
    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }

    fn rewind(&mut self) {
        let _ = self.send(AudioCmd::Rewind);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        let _ = self.send(AudioCmd::SetVolume(volume));
    }
}

impl PlaybackVoice for AudioPlayer {
    fn load(&mut self, source: &str) {
        self.source = Some(source.to_string());
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn start(&mut self, token: RequestToken) -> Result<()> {
        let source = self
            .source
            .clone()
            .ok_or_else(|| Error::UnsupportedSource("no source loaded".to_string()))?;
        self.send(AudioCmd::Start {
            token,
            source,
            volume: self.volume,
        })
    }

    fn resume_output(&mut self) -> Result<()> {
        self.send(AudioCmd::ResumeOutput)
    }
}

/// A host-started voice living on the audio thread.
pub struct LegacyVoice {
    slot: usize,
    tx: Sender<AudioCmd>,
}

impl LegacyVoice {
    fn op(&self, op: LegacyOp) {
        let _ = self.tx.send(AudioCmd::Legacy {
            slot: self.slot,
            op,
        });
    }
}

impl Voice for LegacyVoice {
    fn pause(&mut self) {
        self.op(LegacyOp::Pause);
    }

    fn rewind(&mut self) {
        self.op(LegacyOp::Rewind);
    }

    fn set_volume(&mut self, volume: f32) {
        self.op(LegacyOp::SetVolume(volume));
    }
}
