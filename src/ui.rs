//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::engine::EngineState;

/// What the status box shows; gathered from the deck each frame.
pub struct Status<'a> {
    pub now_playing: &'a str,
    pub music: &'a str,
    pub volume: f32,
    pub state: EngineState,
    /// Id of the track held by the voice, marked in the list.
    pub current: Option<&'a str>,
    pub legacy_total: usize,
    pub legacy_retired: usize,
}

/// Render the controls help text, including the configured toggle keys.
fn controls_text(controls: &ControlsSettings) -> String {
    let mut parts: Vec<String> = vec![
        "[j/k] up/down".to_string(),
        "[gg/G] top/bottom".to_string(),
        "[enter] choose track".to_string(),
        "[h/l] volume -/+".to_string(),
    ];
    for (key, setting) in &controls.toggle_keys {
        parts.push(format!("[{key}] toggle {setting}"));
    }
    parts.push("[r] reload settings".to_string());
    parts.push("[:] debug".to_string());
    parts.push("[q] quit".to_string());
    parts.join(" | ")
}

fn status_text(status: Option<&Status>, app: &App) -> String {
    let Some(status) = status else {
        return " Music unavailable (see log)".to_string();
    };

    let mut parts: Vec<String> = vec![
        format!(" Now playing: {}", status.now_playing),
        format!("Music: {}", status.music),
        status.state.label().to_string(),
    ];

    if status.legacy_total > 0 {
        parts.push(format!(
            "Legacy voices: {}/{} retired",
            status.legacy_retired, status.legacy_total
        ));
    }

    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {}", dir));
    }

    parts.join(" • ")
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    status: Option<&Status>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" bgmdeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status_par = Paragraph::new(status_text(status, app))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Volume slider
    let volume = status.map(|s| s.volume).unwrap_or(0.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" volume "))
        .ratio(f64::from(volume))
        .label(format!("{:.0}%", volume * 100.0));
    frame.render_widget(gauge, chunks[2]);

    // Track selector. Center the selected item when possible by creating a visible window.
    {
        let total = app.tracks.len();
        let list_height = chunks[3].height.saturating_sub(2) as usize;
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, app.selected)
        } else {
            let half = list_height / 2;
            let mut start = app.selected.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, app.selected - start)
        };

        let current = status.and_then(|s| s.current);
        let visible_items: Vec<ListItem> = app.tracks[start..end]
            .iter()
            .map(|t| {
                let marker = if current == Some(t.id.as_str()) { "♪ " } else { "  " };
                let text = format!("{marker}{}", t.title);
                if t.is_playable() {
                    ListItem::new(text)
                } else {
                    ListItem::new(text).dim()
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    // Footer: command line, last message, or the controls help.
    let (title, footer_text) = if app.command_mode {
        (" debug ", format!(":{}", app.command_line))
    } else if let Some(msg) = &app.message {
        (" output ", msg.clone())
    } else {
        (" controls ", controls_text(controls_settings))
    };
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_text_lists_toggle_keys() {
        let text = controls_text(&ControlsSettings::default());
        assert!(text.contains("[m] toggle music"));
        assert!(text.contains("[e] toggle effects"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn status_text_reports_unavailable_music() {
        let app = App::new(Vec::new());
        assert!(status_text(None, &app).contains("unavailable"));

        let status = Status {
            now_playing: "Night Market",
            music: "ON",
            volume: 0.5,
            state: EngineState::Playing,
            current: Some("3"),
            legacy_total: 2,
            legacy_retired: 2,
        };
        let text = status_text(Some(&status), &app);
        assert!(text.contains("Now playing: Night Market"));
        assert!(text.contains("Music: ON"));
        assert!(text.contains("Playing"));
        assert!(text.contains("Legacy voices: 2/2 retired"));
    }
}
