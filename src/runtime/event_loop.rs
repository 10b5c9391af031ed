use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::app::{App, step_volume};
use crate::audio::VoiceEvent;
use crate::config;
use crate::sync::ControlEvent;
use crate::sync::SettingsStore;
use crate::ui;

use super::startup::Deck;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: handles input, UI drawing and voice events.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    deck: &mut Option<Deck>,
    events: &Receiver<VoiceEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if let Some(deck) = deck.as_mut() {
            while let Ok(ev) = events.try_recv() {
                deck.handle_voice_event(ev);
            }
        }

        terminal.draw(|f| {
            let status = deck.as_ref().map(|d| ui::Status {
                now_playing: &d.labels().now_playing,
                music: &d.labels().music,
                volume: d.engine().volume(),
                state: d.engine().state(),
                current: d.engine().now_playing().map(|t| t.id.as_str()),
                legacy_total: d.legacy().len(),
                legacy_retired: d.legacy().retired(),
            });
            ui::draw(f, app, status.as_ref(), &settings.ui, &settings.controls)
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, deck, state) {
                    break;
                }
            }
        }
    }

    if let Some(deck) = deck.as_ref() {
        deck.engine()
            .voice()
            .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    }

    Ok(())
}

/// Returns `true` when the user asked to quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    deck: &mut Option<Deck>,
    state: &mut EventLoopState,
) -> bool {
    if app.command_mode {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.exit_command_mode(),
            KeyCode::Backspace => app.pop_command_char(),
            KeyCode::Enter => {
                let line = app.take_command();
                let msg = match deck.as_mut() {
                    Some(deck) => deck.debug().run(&line),
                    None => "music unavailable".to_string(),
                };
                app.set_message(msg);
            }
            KeyCode::Char(c) if !c.is_control() => app.push_command_char(c),
            _ => {}
        }
        return false;
    }

    let KeyCode::Char(c) = key.code else {
        state.pending_gg = false;
        match key.code {
            KeyCode::Down => app.next(),
            KeyCode::Up => app.prev(),
            KeyCode::Left => change_volume(settings, deck, false),
            KeyCode::Right => change_volume(settings, deck, true),
            KeyCode::Enter => choose_selected(app, deck),
            KeyCode::Esc => app.message = None,
            _ => {}
        }
        return false;
    };

    if c != 'g' {
        state.pending_gg = false;
    }

    match c {
        'q' => return true,
        'j' => app.next(),
        'k' => app.prev(),
        'g' => {
            if state.pending_gg {
                state.pending_gg = false;
                app.first();
            } else {
                state.pending_gg = true;
            }
        }
        'G' => app.last(),
        'h' | '-' => change_volume(settings, deck, false),
        'l' | '+' | '=' => change_volume(settings, deck, true),
        ':' => app.enter_command_mode(),
        'r' => reload(app, deck),
        other => {
            if let (Some(key), Some(deck)) = (settings.controls.toggle_for(other), deck.as_mut()) {
                deck.toggle(key);
            }
        }
    }
    false
}

fn choose_selected(app: &App, deck: &mut Option<Deck>) {
    if let (Some(track), Some(deck)) = (app.selected_track(), deck.as_mut()) {
        deck.change_bgm(ControlEvent::selector(track.id.clone()));
    }
}

fn change_volume(settings: &config::Settings, deck: &mut Option<Deck>, up: bool) {
    let Some(deck) = deck.as_mut() else {
        return;
    };
    let current = deck.store().record().volume_or_default();
    let next = step_volume(current, settings.controls.volume_step, up);
    deck.change_volume(ControlEvent::slider(next));
}

/// Re-read the settings file and re-derive playback from it.
fn reload(app: &mut App, deck: &mut Option<Deck>) {
    let Some(deck) = deck.as_mut() else {
        return;
    };
    match deck.store_mut().reload() {
        Ok(()) => {
            deck.update_audio_state();
            let bgm = deck.store().record().bgm().to_string();
            app.select_id(&bgm);
            app.set_message("settings reloaded");
        }
        Err(e) => {
            warn!("settings reload failed: {e}");
            app.set_message(format!("reload failed: {e}"));
        }
    }
}
