use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::{Coordinates, PhotoDate};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum EditKind {
    Date,
    Location,
    Rename,
}

/// Self-contained snapshot of the editable fields for one photo. Enough to
/// restore them without re-reading any external state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditSnapshot {
    pub photo_name: String,
    pub date: Option<PhotoDate>,
    pub coordinates: Option<Coordinates>,
}

impl EditSnapshot {
    pub fn new(
        photo_name: impl Into<String>,
        date: Option<PhotoDate>,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            photo_name: photo_name.into(),
            date,
            coordinates,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditAction {
    pub kind: EditKind,
    pub before: EditSnapshot,
    pub after: EditSnapshot,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl EditAction {
    pub fn new(kind: EditKind, before: EditSnapshot, after: EditSnapshot) -> Self {
        Self {
            kind,
            before,
            after,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}
