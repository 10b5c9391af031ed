use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, warn};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::config;
use crate::sync::SettingsStore;

mod event_loop;
mod logging;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_err) = config::Settings::load_or_default();
    logging::init(&settings);
    if let Some(e) = config_err {
        // Config is optional; a bad one must not keep the deck from starting.
        warn!("config not used, falling back to defaults: {e}");
    }

    // Directory argument wins over `library.dir`; with neither and no
    // manifest, scan the working directory.
    let dir: Option<PathBuf> = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.library.dir.clone())
        .or_else(|| {
            if settings.library.manifest.is_none() {
                env::current_dir().ok()
            } else {
                None
            }
        });

    let (player, events) = AudioPlayer::new(settings.audio.clone());

    // Without a deck the UI still runs, just without music.
    let mut deck = match startup::init_deck(&settings, dir.as_deref(), player) {
        Ok(deck) => Some(deck),
        Err(e) => {
            error!("music manager not initialized: {e}");
            None
        }
    };

    let mut app = App::new(
        deck.as_ref()
            .map(|d| d.engine().catalog().snapshot())
            .unwrap_or_default(),
    );
    if let Some(dir) = &dir {
        app.set_current_dir(dir.display().to_string());
    }
    if let Some(d) = &deck {
        let bgm = d.store().record().bgm().to_string();
        app.select_id(&bgm);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut deck,
            &events,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
