//! Track catalog: descriptor discovery and deduplication.
//!
//! Descriptors come from a manifest and/or a directory scan. The builder
//! resolves each descriptor's source and title and keeps only the first
//! occurrence of every source, producing the immutable `Catalog` shared by
//! the engine and the UI.

mod build;
mod manifest;
mod model;
mod scan;

pub use build::{build, build_and_retire};
pub use manifest::{Manifest, load_manifest};
pub use model::*;
pub use scan::{normalize_source, scan};
