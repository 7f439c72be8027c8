//! Metadata extraction: merge the embedded tag block and the sidecar document
//! into one normalized record. Embedded metadata is authoritative; the sidecar
//! only fills fields the binary source left absent. Every failure on this path
//! degrades to "no metadata" rather than propagating.

use crate::core::{formats, sidecar, tags::TagBlock};
use crate::models::{MetadataRecord, PhotoEntry};
use crate::storage::FolderStore;

pub async fn extract(store: &dyn FolderStore, photo: &PhotoEntry) -> MetadataRecord {
    let mut record = MetadataRecord::default();

    if formats::supports_embedded_tags(&photo.name) {
        match store.read(&photo.name).await {
            Ok(bytes) => {
                let block = TagBlock::decode(&bytes);
                record.date = block.date();
                record.coordinates = block.coordinates();
                record.camera = block.camera();
            }
            Err(err) => {
                log::warn!("could not read {}: {err}; treating as untagged", photo.name);
            }
        }
    }

    if let Some(sidecar_name) = resolve_sidecar(store, photo).await {
        match store.read(&sidecar_name).await {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => merge_sidecar(&mut record, sidecar::parse(&text)),
                Err(err) => {
                    log::warn!("sidecar {sidecar_name} is not text: {err}");
                }
            },
            Err(err) => {
                // Deleted between enumeration and read, most likely.
                log::warn!("sidecar {sidecar_name} unreadable: {err}");
            }
        }
    }

    record
}

/// Apply the fallback precedence: sidecar fields only land where the embedded
/// source left absence.
pub fn merge_sidecar(record: &mut MetadataRecord, fields: sidecar::SidecarFields) {
    if record.date.is_none() {
        record.date = fields.date;
    }
    if record.coordinates.is_none() {
        record.coordinates = fields.coordinates;
    }
}

async fn resolve_sidecar(store: &dyn FolderStore, photo: &PhotoEntry) -> Option<String> {
    match &photo.sidecar {
        Some(name) => Some(name.clone()),
        // The entry may predate a sidecar save; probe the store.
        None => store.sidecar_for(&photo.name).await,
    }
}
