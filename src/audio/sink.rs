//! Utilities for creating `rodio` sinks from source strings.
//!
//! The helpers here encapsulate resolving a source to a local file,
//! opening/decoding it and preparing a paused `Sink`.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use rodio::{Decoder, OutputStream, Sink};

use crate::error::{Error, Result};

/// Local path for `source`. Only plain paths and `file://` URIs are playable.
pub(super) fn local_path(source: &str) -> Result<PathBuf> {
    let source = source.trim();
    if source.is_empty() {
        return Err(Error::UnsupportedSource("empty source".to_string()));
    }
    if let Some(path) = source.strip_prefix("file://") {
        return Ok(PathBuf::from(path));
    }
    if source.contains("://") {
        return Err(Error::UnsupportedSource(source.to_string()));
    }
    Ok(PathBuf::from(source))
}

pub(super) fn open_decoder(source: &str) -> Result<Decoder<BufReader<File>>> {
    let path = local_path(source)?;
    let file = File::open(&path)?;
    Decoder::new(BufReader::new(file)).map_err(|e| Error::Decode(format!("{}: {e}", path.display())))
}

/// Create a paused `Sink` for `source` at `volume`.
pub(super) fn create_sink(stream: &OutputStream, source: &str, volume: f32) -> Result<Sink> {
    let decoder = open_decoder(source)?;
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(decoder);
    sink.pause();
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_path_accepts_plain_and_file_uris() {
        assert_eq!(local_path("/a/b.ogg").unwrap(), PathBuf::from("/a/b.ogg"));
        assert_eq!(
            local_path("file:///a/b.ogg").unwrap(),
            PathBuf::from("/a/b.ogg")
        );
    }

    #[test]
    fn local_path_rejects_empty_and_network_sources() {
        assert!(matches!(local_path("  "), Err(Error::UnsupportedSource(_))));
        assert!(matches!(
            local_path("https://example.com/a.mp3"),
            Err(Error::UnsupportedSource(_))
        ));
    }

    #[test]
    fn open_decoder_reports_missing_and_garbage_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ogg");
        assert!(matches!(
            open_decoder(missing.to_str().unwrap()),
            Err(Error::Io(_))
        ));

        let garbage = dir.path().join("garbage.mp3");
        std::fs::write(&garbage, b"not audio at all").unwrap();
        assert!(matches!(
            open_decoder(garbage.to_str().unwrap()),
            Err(Error::Decode(_))
        ));
    }
}
