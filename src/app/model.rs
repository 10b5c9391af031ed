//! Application model: the track selector, the volume slider arithmetic and
//! the debug command line.

use crate::catalog::Track;

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub selected: usize,

    pub command_mode: bool,
    pub command_line: String,

    /// Last debug command output or error, shown in the footer.
    pub message: Option<String>,
    pub current_dir: Option<String>,
}

impl App {
    /// Create a new `App` over a snapshot of the catalog.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            selected: 0,
            command_mode: false,
            command_line: String::new(),
            message: None,
            current_dir: None,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Move the cursor to the next track, wrapping around.
    pub fn next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move the cursor to the previous track, wrapping around.
    pub fn prev(&mut self) {
        if self.has_tracks() {
            self.selected = if self.selected == 0 {
                self.tracks.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.tracks.len().saturating_sub(1);
    }

    /// Put the cursor on `id` if it is in the list.
    pub fn select_id(&mut self, id: &str) -> bool {
        match self.tracks.iter().position(|t| t.id == id) {
            Some(i) => {
                self.selected = i;
                true
            }
            None => false,
        }
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.tracks.get(self.selected)
    }

    pub fn enter_command_mode(&mut self) {
        self.command_mode = true;
        self.command_line.clear();
        self.message = None;
    }

    pub fn exit_command_mode(&mut self) {
        self.command_mode = false;
        self.command_line.clear();
    }

    pub fn push_command_char(&mut self, c: char) {
        self.command_line.push(c);
    }

    pub fn pop_command_char(&mut self) {
        self.command_line.pop();
    }

    /// Leave command mode, returning what was typed.
    pub fn take_command(&mut self) -> String {
        self.command_mode = false;
        std::mem::take(&mut self.command_line)
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }
}

/// Move a slider value by `step`, staying within `[0, 1]`.
pub fn step_volume(current: f32, step: f32, up: bool) -> f32 {
    let next = if up { current + step } else { current - step };
    // Snap to the step grid so repeated presses don't accumulate float noise.
    ((next / step).round() * step).clamp(0.0, 1.0)
}
