use serde::{Deserialize, Serialize};

/// One discovered image file. The `name` is the primary key within its folder;
/// the file content itself lives behind the storage collaborator and is
/// re-read on demand, so saved bytes are always picked up fresh.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PhotoEntry {
    pub name: String,
    pub size: u64,
    /// Milliseconds since the Unix epoch.
    pub last_modified: u64,
    /// Actual filename of the associated sidecar document, if one exists.
    /// Kept with its original casing because the match is case-insensitive.
    pub sidecar: Option<String>,
}

impl PhotoEntry {
    pub fn new(name: impl Into<String>, size: u64, last_modified: u64) -> Self {
        Self {
            name: name.into(),
            size,
            last_modified,
            sidecar: None,
        }
    }

    pub fn has_sidecar(&self) -> bool {
        self.sidecar.is_some()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PhotoDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl PhotoDate {
    pub fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// `YYYY-MM-DD`, the form used by sidecars and export patterns.
    pub fn to_iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Display-only capture details carried through extraction. Never re-written.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraInfo {
    pub make: Option<String>,
    pub model: Option<String>,
    /// Exposure time as a rational, e.g. (1, 250).
    pub exposure_time: Option<(u32, u32)>,
    pub f_number: Option<(u32, u32)>,
    pub iso: Option<u32>,
    pub focal_length: Option<(u32, u32)>,
}

/// Normalized extraction result for one photo. `has_date`/`has_location`
/// are accessors rather than stored flags so they can never drift from the
/// optional fields they describe.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetadataRecord {
    pub date: Option<PhotoDate>,
    pub coordinates: Option<Coordinates>,
    pub camera: CameraInfo,
}

impl MetadataRecord {
    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }

    pub fn has_location(&self) -> bool {
        self.coordinates.is_some()
    }

    pub fn classification(&self) -> Classification {
        Classification {
            has_date: self.has_date(),
            has_location: self.has_location(),
        }
    }
}

/// The boolean pair that drives filtering.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Classification {
    pub has_date: bool,
    pub has_location: bool,
}
