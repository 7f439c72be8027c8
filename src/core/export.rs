//! Export-pattern mini-language and the sequential copy-out it drives.
//!
//! Pattern tokens: `{original}`, `{year}`, `{month}`, `{day}`, `{index}`,
//! `{location}`. Unresolved date fields substitute `YYYY`/`MM`/`DD`, an
//! unresolved location substitutes `Unknown`, and `{index}` is the 1-based
//! batch position zero-padded to four digits.

use crate::core::formats;
use crate::models::{MetadataRecord, SaveOutcome};
use crate::storage::FolderStore;

pub fn apply_pattern(
    pattern: &str,
    photo_name: &str,
    record: Option<&MetadataRecord>,
    location_label: Option<&str>,
    index: usize,
) -> String {
    let (stem, extension) = formats::split_name(photo_name);

    let (year, month, day) = match record.and_then(|r| r.date) {
        Some(date) => (
            format!("{:04}", date.year),
            format!("{:02}", date.month),
            format!("{:02}", date.day),
        ),
        None => (
            String::from("YYYY"),
            String::from("MM"),
            String::from("DD"),
        ),
    };

    let name = pattern
        .replace("{original}", stem)
        .replace("{year}", &year)
        .replace("{month}", &month)
        .replace("{day}", &day)
        .replace("{index}", &format!("{index:04}"))
        .replace("{location}", location_label.unwrap_or("Unknown"));

    match extension {
        Some(ext) => format!("{name}.{ext}"),
        None => name,
    }
}

/// Copy each photo into the destination store under its patterned name.
/// Strictly sequential; one failing photo is recorded and the rest continue.
pub async fn export_batch(
    source: &dyn FolderStore,
    destination: &dyn FolderStore,
    photos: &[(String, Option<MetadataRecord>)],
    pattern: &str,
    location_label: Option<&str>,
) -> Vec<SaveOutcome> {
    let mut outcomes = Vec::with_capacity(photos.len());

    for (position, (name, record)) in photos.iter().enumerate() {
        let target = apply_pattern(pattern, name, record.as_ref(), location_label, position + 1);

        let result = match source.read(name).await {
            Ok(bytes) => destination.write(&target, &bytes).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => outcomes.push(SaveOutcome::success(name.clone())),
            Err(err) => {
                log::warn!("export failed for {name}: {err}");
                outcomes.push(SaveOutcome::failure(name.clone(), err.to_string()));
            }
        }
    }

    outcomes
}
