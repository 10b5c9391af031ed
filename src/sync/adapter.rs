use tracing::{debug, info};

use crate::audio::{LegacyVoices, PlaybackVoice, VoiceEvent};
use crate::engine::Engine;

use super::input::ControlInput;
use super::labels::{Labels, NONE_SELECTED};
use super::settings::{MUSIC_KEY, SettingsStore};
use super::toggles::ToggleTable;

/// Keeps the settings record, the labels and the engine consistent.
///
/// The host talks to this type only; it is the sole owner of the engine and
/// therefore of the voice.
pub struct StateSync<V: PlaybackVoice, S: SettingsStore, L: Labels> {
    pub(super) engine: Engine<V>,
    store: S,
    labels: L,
    legacy: LegacyVoices,
    toggles: ToggleTable,
}

impl<V: PlaybackVoice, S: SettingsStore, L: Labels> StateSync<V, S, L> {
    pub fn new(engine: Engine<V>, store: S, labels: L, legacy: LegacyVoices) -> Self {
        Self {
            engine,
            store,
            labels,
            legacy,
            toggles: ToggleTable::new(),
        }
    }

    /// Use `toggles` for every key other than `music`.
    pub fn with_toggles(mut self, toggles: ToggleTable) -> Self {
        self.toggles = toggles;
        self
    }

    pub fn engine(&self) -> &Engine<V> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<V> {
        &mut self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn labels(&self) -> &L {
        &self.labels
    }

    pub fn legacy(&self) -> &LegacyVoices {
        &self.legacy
    }

    /// Resume the output (best effort) and apply the stored settings.
    pub fn init_audio(&mut self) {
        if let Err(e) = self.engine.voice_mut().resume_output() {
            debug!("audio output not resumed: {e}");
        }
        self.apply_desired_state();
        self.refresh_labels();
        info!(
            tracks = self.engine.catalog().len(),
            music = self.store.record().music_enabled(),
            "audio initialized"
        );
    }

    /// Re-derive playback from the settings record, e.g. after the host
    /// changed it behind our back.
    pub fn update_audio_state(&mut self) {
        self.legacy.silence_all();
        self.apply_desired_state();
        self.refresh_labels();
    }

    pub fn change_bgm(&mut self, input: impl Into<ControlInput>) {
        let id = input.into().text();
        self.store.record_mut().set_bgm(&id);
        if self.store.record().music_enabled() {
            self.sync_volume();
            self.engine.play_by_id(&id);
        }
        self.refresh_now_playing();
        self.store.save();
    }

    /// Returns `false` (and changes nothing) when the input is not numeric.
    pub fn change_volume(&mut self, input: impl Into<ControlInput>) -> bool {
        let input = input.into();
        let Some(volume) = input.volume() else {
            debug!(?input, "ignoring non-numeric volume");
            return false;
        };

        self.store.record_mut().set_volume(volume.clamp(0.0, 1.0));
        let volume = self.store.record().volume_or_default();
        self.engine.set_volume(volume);
        self.legacy.set_volume_all(volume);
        self.store.save();
        true
    }

    pub fn toggle_music(&mut self) {
        let on = !self.store.record().music_enabled();
        self.store.record_mut().set_music_enabled(on);
        if on {
            self.sync_volume();
            let id = self.selected_or_first();
            self.engine.play_by_id(&id);
        } else {
            self.engine.stop();
        }
        self.refresh_labels();
        self.store.save();
    }

    /// Toggle the setting `key`. `music` is handled here; every other key is
    /// forwarded untouched to the toggle table.
    pub fn toggle(&mut self, key: &str) {
        if key == MUSIC_KEY {
            self.toggle_music();
        } else {
            self.toggles.dispatch(key, &mut self.store);
        }
    }

    /// Feed a voice lifecycle event to the engine.
    pub fn handle_voice_event(&mut self, event: VoiceEvent) -> bool {
        let changed = self.engine.handle_event(event);
        if changed {
            self.refresh_now_playing();
        }
        changed
    }

    pub fn refresh_labels(&mut self) {
        self.refresh_now_playing();
        let indicator = if self.store.record().music_enabled() {
            "ON"
        } else {
            "OFF"
        };
        self.labels.set_music_indicator(indicator);
    }

    pub(super) fn refresh_now_playing(&mut self) {
        let text = self
            .engine
            .now_playing()
            .map(|t| t.title.as_str())
            .unwrap_or(NONE_SELECTED);
        self.labels.set_now_playing(text);
    }

    fn selected_or_first(&self) -> String {
        let bgm = self.store.record().bgm();
        if !bgm.is_empty() {
            return bgm.to_string();
        }
        self.engine
            .catalog()
            .first()
            .map(|t| t.id.clone())
            .unwrap_or_default()
    }

    fn sync_volume(&mut self) {
        let volume = self.store.record().volume_or_default();
        self.engine.set_volume(volume);
    }

    fn apply_desired_state(&mut self) {
        if self.store.record().music_enabled() {
            self.sync_volume();
            let id = self.selected_or_first();
            self.engine.play_by_id(&id);
        } else {
            self.engine.stop();
        }
    }
}
