use std::collections::HashMap;

use serde::Deserialize;

/// Display names keyed by descriptor id fragment.
pub type TitleLookup = HashMap<String, String>;

/// A track descriptor as found in a manifest or on disk, before deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawTrack {
    pub id: Option<String>,
    /// Explicit source; wins over any fallback.
    pub src: Option<String>,
    /// Alternative sources tried in order when `src` is missing or blank.
    pub fallbacks: Vec<String>,
    /// The host already started this source on its own voice.
    pub autoplay: bool,
}

impl RawTrack {
    pub fn new(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            src: Some(src.into()),
            ..Self::default()
        }
    }

    /// The descriptor's id, or `""` when it has none.
    pub fn id_fragment(&self) -> &str {
        self.id.as_deref().map(str::trim).unwrap_or("")
    }

    /// Explicit source, else the first usable fallback, else `""`.
    pub fn resolve_source(&self) -> String {
        self.src
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| {
                self.fallbacks
                    .iter()
                    .map(|f| f.trim())
                    .find(|f| !f.is_empty())
            })
            .unwrap_or("")
            .to_string()
    }
}

/// A deduplicated playable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    /// Resolved source; may be empty, in which case the track cannot play.
    pub source: String,
    pub title: String,
}

impl Track {
    pub fn is_playable(&self) -> bool {
        !self.source.is_empty()
    }
}

/// The final ordered, deduplicated track list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub(super) tracks: Vec<Track>,
}

impl Catalog {
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Owned copy of the track list for consumers outside the engine.
    pub fn snapshot(&self) -> Vec<Track> {
        self.tracks.clone()
    }
}
