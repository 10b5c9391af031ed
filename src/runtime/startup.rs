use std::path::Path;

use tracing::{debug, info};

use crate::audio::{AudioPlayer, LegacyVoices};
use crate::catalog::{self, RawTrack, TitleLookup};
use crate::config;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::sync::{LabelBoard, StateSync, TomlSettingsFile};

pub type Deck = StateSync<AudioPlayer, TomlSettingsFile, LabelBoard>;

/// Collect descriptors: manifest entries first, then the scanned directory.
pub fn collect_descriptors(
    settings: &config::Settings,
    dir: Option<&Path>,
) -> Result<(Vec<RawTrack>, TitleLookup)> {
    let mut descriptors: Vec<RawTrack> = Vec::new();
    let mut titles = TitleLookup::new();

    if let Some(path) = &settings.library.manifest {
        let manifest = catalog::load_manifest(path)?;
        debug!(path = %path.display(), tracks = manifest.tracks.len(), "manifest loaded");
        titles = manifest.titles;
        descriptors.extend(manifest.tracks);
    }

    if let Some(dir) = dir {
        descriptors.extend(catalog::scan(dir, &settings.library));
    }

    Ok((descriptors, titles))
}

/// Build the catalog and the state sync around `player`, then initialize
/// audio from the stored settings.
pub fn init_deck(
    settings: &config::Settings,
    dir: Option<&Path>,
    mut player: AudioPlayer,
) -> Result<Deck> {
    let (descriptors, titles) = collect_descriptors(settings, dir)?;

    // Voices the manifest says were already started.
    let mut legacy = LegacyVoices::new();
    for raw in descriptors.iter().filter(|r| r.autoplay) {
        let source = raw.resolve_source();
        if !source.is_empty() {
            legacy.push(Box::new(player.legacy_voice(&source, true)));
        }
    }

    let catalog = catalog::build_and_retire(&descriptors, &titles, &mut legacy);
    info!(
        descriptors = descriptors.len(),
        tracks = catalog.len(),
        "catalog ready"
    );

    let settings_path = settings
        .settings_file_path()
        .ok_or_else(|| Error::InvalidConfig("no location for the settings file".to_string()))?;
    let store = TomlSettingsFile::open(settings_path)?;

    let engine = Engine::new(player, catalog);
    let mut deck = StateSync::new(engine, store, LabelBoard::default(), legacy);
    deck.init_audio();
    Ok(deck)
}
