use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::RawTrack;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Descriptor id for a scanned file: its path below `root`, without
/// extension, with `/` separators.
fn id_for(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path).with_extension("");
    rel.components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Make two spellings of the same local file compare equal.
///
/// `file://` prefixes are stripped and existing paths are canonicalized;
/// anything else is returned trimmed but untouched.
pub fn normalize_source(source: &str) -> String {
    let trimmed = source.trim();
    let local = trimmed.strip_prefix("file://").unwrap_or(trimmed);
    if local.is_empty() {
        return String::new();
    }
    match std::fs::canonicalize(local) {
        Ok(p) => p.display().to_string(),
        Err(_) => local.to_string(),
    }
}

/// Turn every audio file below `dir` into a descriptor.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<RawTrack> {
    let mut found: Vec<(String, PathBuf)> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            found.push((id_for(dir, path), path.to_path_buf()));
        }
    }

    found.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));
    found
        .into_iter()
        .map(|(id, path)| RawTrack::new(id, normalize_source(&path.display().to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn ids(raw: &[RawTrack]) -> Vec<String> {
        raw.iter().map(|r| r.id_fragment().to_string()).collect()
    }

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.ogg"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn scan_filters_non_audio_and_sorts_by_id_case_insensitive() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let raw = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(ids(&raw), vec!["A", "b"]);
        assert!(raw[0].resolve_source().ends_with("A.ogg"));
    }

    #[test]
    fn scan_uses_relative_path_as_id() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("ambient");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("rain.ogg"), b"not real").unwrap();
        fs::write(dir.path().join("rain.ogg"), b"not real").unwrap();

        let raw = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(ids(&raw), vec!["ambient/rain", "rain"]);
    }

    #[test]
    fn scan_skips_hidden_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let raw = scan(dir.path(), &LibrarySettings::default());
        assert_eq!(ids(&raw), vec!["visible"]);
    }

    #[test]
    fn scan_respects_recursive_false() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            recursive: false,
            ..LibrarySettings::default()
        };
        assert_eq!(ids(&scan(dir.path(), &settings)), vec!["root"]);
    }

    #[test]
    fn normalize_source_strips_file_scheme_and_canonicalizes() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.mp3");
        fs::write(&file, b"not real").unwrap();
        let canonical = fs::canonicalize(&file).unwrap().display().to_string();

        let with_dot = format!("{}/./a.mp3", dir.path().display());
        assert_eq!(normalize_source(&with_dot), canonical);
        assert_eq!(normalize_source(&format!("file://{with_dot}")), canonical);
        assert_eq!(normalize_source("  "), "");
        assert_eq!(normalize_source("/does/not/exist.mp3"), "/does/not/exist.mp3");
    }
}
