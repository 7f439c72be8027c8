use crate::models::{Coordinates, EditSnapshot, MetadataRecord, PhotoDate};

/// Map viewport state mirrored by whatever widget renders it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
}

impl MapView {
    /// Neutral whole-world view shown when a photo has no location.
    pub fn world() -> Self {
        Self {
            center: Coordinates::new(0.0, 0.0),
            zoom: 2,
        }
    }

    pub fn focused(center: Coordinates) -> Self {
        Self { center, zoom: 13 }
    }
}

/// Explicit view-model for the editable fields. The core mutates this struct;
/// rendering it is someone else's job. Inputs hold raw text so partially typed
/// values survive until commit.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorView {
    pub year: String,
    pub month: String,
    pub day: String,
    pub latitude: String,
    pub longitude: String,
    pub marker: Option<Coordinates>,
    pub map: MapView,
}

impl Default for EditorView {
    fn default() -> Self {
        Self {
            year: String::new(),
            month: String::new(),
            day: String::new(),
            latitude: String::new(),
            longitude: String::new(),
            marker: None,
            map: MapView::world(),
        }
    }
}

impl EditorView {
    /// Refresh the inputs from a freshly extracted record. Absent fields are
    /// cleared so a previous photo's values never linger; an absent location
    /// also drops the marker and resets the map to the world view.
    pub fn apply_record(&mut self, record: &MetadataRecord) {
        match record.date {
            Some(date) => {
                self.year = format!("{:04}", date.year);
                self.month = format!("{:02}", date.month);
                self.day = format!("{:02}", date.day);
            }
            None => {
                self.year.clear();
                self.month.clear();
                self.day.clear();
            }
        }

        match record.coordinates {
            Some(coords) => self.set_marker(coords),
            None => {
                self.latitude.clear();
                self.longitude.clear();
                self.marker = None;
                self.map = MapView::world();
            }
        }
    }

    /// Restore the fields captured in an undo/redo snapshot. Same clearing
    /// semantics as [`Self::apply_record`]: absent means cleared, not kept.
    pub fn apply_snapshot(&mut self, snapshot: &EditSnapshot) {
        let record = MetadataRecord {
            date: snapshot.date,
            coordinates: snapshot.coordinates,
            camera: Default::default(),
        };
        self.apply_record(&record);
    }

    pub fn set_marker(&mut self, coords: Coordinates) {
        self.latitude = format!("{:.6}", coords.latitude);
        self.longitude = format!("{:.6}", coords.longitude);
        self.marker = Some(coords);
        self.map = MapView::focused(coords);
    }

    /// The date currently typed into the inputs, if complete and numeric.
    pub fn edited_date(&self) -> Option<PhotoDate> {
        let year = self.year.trim().parse().ok()?;
        let month = self.month.trim().parse().ok()?;
        let day = self.day.trim().parse().ok()?;
        Some(PhotoDate::new(year, month, day))
    }

    pub fn edited_coordinates(&self) -> Option<Coordinates> {
        let latitude = self.latitude.trim().parse().ok()?;
        let longitude = self.longitude.trim().parse().ok()?;
        Some(Coordinates::new(latitude, longitude))
    }
}
