use std::collections::HashSet;

use tracing::debug;

use crate::audio::LegacyVoices;

use super::model::{Catalog, RawTrack, TitleLookup, Track};

#[derive(Debug, PartialEq, Eq, Hash)]
enum DedupeKey {
    Source(String),
    /// Sourceless descriptors are only ever equal through their id.
    Id(String),
}

fn title_for(id: &str, titles: &TitleLookup) -> String {
    titles
        .get(id)
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Track {id}"))
}

/// Build the catalog: resolve sources and titles, keep the first
/// occurrence of every source and of every id.
pub fn build(descriptors: &[RawTrack], titles: &TitleLookup) -> Catalog {
    let mut seen_keys: HashSet<DedupeKey> = HashSet::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut tracks: Vec<Track> = Vec::with_capacity(descriptors.len());

    for raw in descriptors {
        let id = raw.id_fragment().to_string();
        let source = raw.resolve_source();

        let key = if source.is_empty() {
            DedupeKey::Id(id.clone())
        } else {
            DedupeKey::Source(source.clone())
        };

        if seen_keys.contains(&key) || seen_ids.contains(&id) {
            debug!(id = %id, source = %source, "dropping duplicate track descriptor");
            continue;
        }

        seen_keys.insert(key);
        seen_ids.insert(id.clone());

        let title = title_for(&id, titles);
        tracks.push(Track { id, source, title });
    }

    Catalog { tracks }
}

/// [`build`], then retire every voice the host had already set up for the
/// raw descriptors so only the shared engine voice can sound.
pub fn build_and_retire(
    descriptors: &[RawTrack],
    titles: &TitleLookup,
    legacy: &mut LegacyVoices,
) -> Catalog {
    let catalog = build(descriptors, titles);
    legacy.retire_all();
    debug!(
        descriptors = descriptors.len(),
        tracks = catalog.len(),
        retired = legacy.retired(),
        "catalog built"
    );
    catalog
}
