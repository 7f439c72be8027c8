use crate::models::MetadataRecord;

/// Filter predicates over the classification cache. A photo with no cached
/// record is treated as lacking both date and location.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FilterKind {
    #[default]
    All,
    Untagged,
    NoDate,
    NoLocation,
    HasLocation,
}

impl FilterKind {
    pub fn matches(self, record: Option<&MetadataRecord>) -> bool {
        match self {
            Self::All => true,
            Self::Untagged => record.map_or(true, |r| !r.has_date() && !r.has_location()),
            Self::NoDate => record.map_or(true, |r| !r.has_date()),
            Self::NoLocation => record.map_or(true, |r| !r.has_location()),
            Self::HasLocation => record.is_some_and(|r| r.has_location()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Untagged => "untagged",
            Self::NoDate => "no-date",
            Self::NoLocation => "no-location",
            Self::HasLocation => "has-location",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "untagged" => Some(Self::Untagged),
            "no-date" => Some(Self::NoDate),
            "no-location" => Some(Self::NoLocation),
            "has-location" => Some(Self::HasLocation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, PhotoDate};

    fn record(date: bool, location: bool) -> MetadataRecord {
        MetadataRecord {
            date: date.then(|| PhotoDate::new(2024, 3, 5)),
            coordinates: location.then(|| Coordinates::new(48.85, 2.35)),
            camera: Default::default(),
        }
    }

    #[test]
    fn untagged_requires_both_flags_false() {
        let records = [
            record(false, false),
            record(true, false),
            record(false, true),
            record(true, true),
        ];

        let untagged: Vec<bool> = records
            .iter()
            .map(|r| FilterKind::Untagged.matches(Some(r)))
            .collect();
        assert_eq!(untagged, vec![true, false, false, false]);

        let has_location: Vec<bool> = records
            .iter()
            .map(|r| FilterKind::HasLocation.matches(Some(r)))
            .collect();
        assert_eq!(has_location, vec![false, false, true, true]);
    }

    #[test]
    fn absent_record_counts_as_untagged() {
        assert!(FilterKind::Untagged.matches(None));
        assert!(FilterKind::NoDate.matches(None));
        assert!(FilterKind::NoLocation.matches(None));
        assert!(!FilterKind::HasLocation.matches(None));
        assert!(FilterKind::All.matches(None));
    }

    #[test]
    fn round_trips_through_str() {
        for kind in [
            FilterKind::All,
            FilterKind::Untagged,
            FilterKind::NoDate,
            FilterKind::NoLocation,
            FilterKind::HasLocation,
        ] {
            assert_eq!(FilterKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(FilterKind::from_str("bogus"), None);
    }
}
