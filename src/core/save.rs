//! Write paths. JPEGs get their embedded tag block rewritten in place;
//! everything else gets a wholesale regenerated sidecar document. Batch saves
//! run strictly sequentially so a failure in one photo never leaves a
//! partially-written sibling, and per-photo failures never abort the batch.

use crate::core::sidecar::{self, SidecarFields};
use crate::core::{formats, tags::TagBlock};
use crate::error::{Result, TaggerError};
use crate::models::{Coordinates, PhotoDate, PhotoEntry, SaveOutcome, SaveSummary};
use crate::storage::FolderStore;

/// The fields a save writes. `None` leaves the corresponding target untouched
/// in the embedded path and omits the block in the sidecar path.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PendingEdit {
    pub date: Option<PhotoDate>,
    pub coordinates: Option<Coordinates>,
}

pub async fn save_photo(
    store: &dyn FolderStore,
    photo: &PhotoEntry,
    edit: PendingEdit,
) -> Result<()> {
    if formats::supports_embedded_tags(&photo.name) {
        save_embedded(store, &photo.name, edit).await
    } else {
        save_sidecar(store, &photo.name, edit).await
    }
}

async fn save_embedded(store: &dyn FolderStore, name: &str, edit: PendingEdit) -> Result<()> {
    let original = store.read(name).await?;

    // Decode degrades to an empty block, so untagged photos stay writable.
    let mut block = TagBlock::decode(&original);
    if let Some(date) = edit.date {
        block.set_date(date);
    }
    if let Some(coordinates) = edit.coordinates {
        block.set_location(coordinates);
    }

    let encoded = block.encode(&original)?;
    store.write(name, &encoded).await
}

async fn save_sidecar(store: &dyn FolderStore, name: &str, edit: PendingEdit) -> Result<()> {
    let fields = SidecarFields {
        date: edit.date,
        coordinates: edit.coordinates,
    };
    let document = sidecar::generate(&fields, name);
    store
        .write(&formats::sidecar_name(name), document.as_bytes())
        .await
}

/// Sequential batch save. Never fans out: per-photo writes are serialized by
/// iterating one at a time, and a failing photo is recorded and skipped.
pub async fn save_many(
    store: &dyn FolderStore,
    photos: &[PhotoEntry],
    edit: PendingEdit,
) -> Vec<SaveOutcome> {
    let mut outcomes = Vec::with_capacity(photos.len());

    for photo in photos {
        match save_photo(store, photo, edit).await {
            Ok(()) => outcomes.push(SaveOutcome::success(&photo.name)),
            Err(err) => {
                log::warn!("save failed for {}: {err}", photo.name);
                outcomes.push(SaveOutcome::failure(&photo.name, err.to_string()));
            }
        }
    }

    outcomes
}

pub fn summarize(outcomes: &[SaveOutcome]) -> SaveSummary {
    SaveSummary::from_outcomes(outcomes)
}

/// Rename a photo on disk, moving any sidecar along so the filename
/// convention keeps holding. Returns the new sidecar name, if one moved.
pub async fn rename_photo(
    store: &dyn FolderStore,
    photo: &PhotoEntry,
    new_name: &str,
) -> Result<Option<String>> {
    let new_name = new_name.trim();
    if new_name.is_empty() || new_name == photo.name {
        return Err(TaggerError::WriteFailed(String::from(
            "new filename must be non-empty and different",
        )));
    }

    store.rename(&photo.name, new_name).await?;

    if let Some(old_sidecar) = &photo.sidecar {
        let new_sidecar = formats::sidecar_name(new_name);
        store.rename(old_sidecar, &new_sidecar).await?;
        return Ok(Some(new_sidecar));
    }

    Ok(None)
}
