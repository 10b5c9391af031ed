//! Voices a host had started on its own before the shared engine existed.
//!
//! They are kept as inert placeholders: retired once when the catalog is
//! built and silenced again whenever audio state is re-derived.

use tracing::debug;

use super::voice::Voice;

struct Entry {
    voice: Box<dyn Voice>,
    hidden: bool,
}

#[derive(Default)]
pub struct LegacyVoices {
    entries: Vec<Entry>,
}

impl LegacyVoices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, voice: Box<dyn Voice>) {
        self.entries.push(Entry {
            voice,
            hidden: false,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of voices already retired.
    pub fn retired(&self) -> usize {
        self.entries.iter().filter(|e| e.hidden).count()
    }

    /// Pause, rewind and hide every voice.
    pub fn retire_all(&mut self) {
        for entry in &mut self.entries {
            entry.voice.pause();
            entry.voice.rewind();
            entry.hidden = true;
        }
    }

    /// Pause every voice, retired or not.
    pub fn silence_all(&mut self) {
        if !self.entries.is_empty() {
            debug!(count = self.entries.len(), "silencing legacy voices");
        }
        for entry in &mut self.entries {
            entry.voice.pause();
        }
    }

    pub fn set_volume_all(&mut self, volume: f32) {
        for entry in &mut self.entries {
            entry.voice.set_volume(volume);
        }
    }
}
