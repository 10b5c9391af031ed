//! Track manifest: explicit descriptors plus a title lookup table.
//!
//! ```toml
//! [titles]
//! "1" = "Harbor at Dawn"
//!
//! [[track]]
//! id = "1"
//! src = "harbor.ogg"
//! fallbacks = ["harbor.mp3"]
//! autoplay = true
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

use super::model::{RawTrack, TitleLookup};
use super::scan::normalize_source;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub titles: TitleLookup,
    #[serde(rename = "track")]
    pub tracks: Vec<RawTrack>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Rebase relative local sources onto `base` and normalize them.
    fn rebase(&mut self, base: &Path) {
        let fix = |s: &str| -> String {
            let s = s.trim();
            if s.is_empty() || s.contains("://") || Path::new(s).is_absolute() {
                normalize_source(s)
            } else {
                normalize_source(&base.join(s).display().to_string())
            }
        };

        for raw in &mut self.tracks {
            raw.src = raw.src.as_deref().map(fix);
            raw.fallbacks = raw.fallbacks.iter().map(|f| fix(f)).collect();
        }
    }
}

/// Read a manifest file, resolving relative sources against its directory.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::Manifest(format!("{}: {e}", path.display())))?;
    let mut manifest = Manifest::parse(&text)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    manifest.rebase(base);
    Ok(manifest)
}
