/// Shown when the engine holds no track.
pub const NONE_SELECTED: &str = "none selected";

/// The two text surfaces kept in step with playback.
pub trait Labels {
    fn set_now_playing(&mut self, text: &str);
    fn set_music_indicator(&mut self, text: &str);
}

/// Plain in-memory labels, read by the terminal UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelBoard {
    pub now_playing: String,
    pub music: String,
}

impl Labels for LabelBoard {
    fn set_now_playing(&mut self, text: &str) {
        self.now_playing.clear();
        self.now_playing.push_str(text);
    }

    fn set_music_indicator(&mut self, text: &str) {
        self.music.clear();
        self.music.push_str(text);
    }
}
