//! Capture-date and GPS tagging engine for photo folders.
//!
//! JPEGs carry the metadata in their embedded EXIF block; every other
//! recognized image format pairs with a regenerated `.xmp` sidecar document.
//! Embedded metadata is authoritative on read, the sidecar fills in what the
//! binary source left absent. The catalog classifies each photo by date and
//! location presence for filtering, and edits go through a bounded undo/redo
//! history.
//!
//! Folder access and geocoding stay behind the [`storage::FolderStore`] and
//! [`geocode::Geocoder`] seams; the core never touches a UI.

pub mod core;
pub mod error;
pub mod geocode;
pub mod models;
pub mod storage;

pub use error::{Result, TaggerError};
