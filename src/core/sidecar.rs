//! The sidecar codec: parse and regenerate the XMP companion document used by
//! formats that cannot embed a tag block. Parsing is tagged-span matching over
//! the text; anything malformed or missing degrades to absent fields, never an
//! error. Saves regenerate the whole document rather than patching in place.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Coordinates, PhotoDate};

static DATE_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<exif:DateTimeOriginal>([^<]+)</exif:DateTimeOriginal>").expect("valid pattern")
});
static DATE_PARTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("valid pattern"));
static LAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<exif:GPSLatitude>([^<]+)</exif:GPSLatitude>").expect("valid pattern"));
static LAT_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<exif:GPSLatitudeRef>([^<]+)</exif:GPSLatitudeRef>").expect("valid pattern")
});
static LON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<exif:GPSLongitude>([^<]+)</exif:GPSLongitude>").expect("valid pattern")
});
static LON_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<exif:GPSLongitudeRef>([^<]+)</exif:GPSLongitudeRef>").expect("valid pattern")
});

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SidecarFields {
    pub date: Option<PhotoDate>,
    pub coordinates: Option<Coordinates>,
}

pub fn parse(text: &str) -> SidecarFields {
    SidecarFields {
        date: parse_date(text),
        coordinates: parse_coordinates(text),
    }
}

fn parse_date(text: &str) -> Option<PhotoDate> {
    let tag = DATE_TAG_RE.captures(text)?;
    let parts = DATE_PARTS_RE.captures(tag.get(1)?.as_str())?;
    Some(PhotoDate::new(
        parts[1].parse().ok()?,
        parts[2].parse().ok()?,
        parts[3].parse().ok()?,
    ))
}

fn parse_coordinates(text: &str) -> Option<Coordinates> {
    let lat_span = LAT_RE.captures(text)?;
    let lon_span = LON_RE.captures(text)?;

    let mut latitude: f64 = lat_span.get(1)?.as_str().trim().parse().ok()?;
    let mut longitude: f64 = lon_span.get(1)?.as_str().trim().parse().ok()?;

    if let Some(lat_ref) = LAT_REF_RE.captures(text) {
        if &lat_ref[1] == "S" {
            latitude = -latitude;
        }
    }
    if let Some(lon_ref) = LON_REF_RE.captures(text) {
        if &lon_ref[1] == "W" {
            longitude = -longitude;
        }
    }

    Some(Coordinates::new(latitude, longitude))
}

/// Produce a complete sidecar document from scratch. Absent fields omit their
/// blocks entirely rather than emitting empty tags.
pub fn generate(fields: &SidecarFields, source_filename: &str) -> String {
    let now = Utc::now().to_rfc3339();

    let date_block = match fields.date {
        Some(date) => {
            let stamp = format!("{}T12:00:00", date.to_iso());
            format!(
                "\n   <exif:DateTimeOriginal>{stamp}</exif:DateTimeOriginal>\n   <xmp:CreateDate>{stamp}</xmp:CreateDate>"
            )
        }
        None => String::new(),
    };

    let gps_block = match fields.coordinates {
        Some(coords) => {
            let lat_ref = crate::core::coords::latitude_ref(coords.latitude);
            let lon_ref = crate::core::coords::longitude_ref(coords.longitude);
            format!(
                "\n   <exif:GPSLatitude>{:.6}</exif:GPSLatitude>\n   <exif:GPSLatitudeRef>{lat_ref}</exif:GPSLatitudeRef>\n   <exif:GPSLongitude>{:.6}</exif:GPSLongitude>\n   <exif:GPSLongitudeRef>{lon_ref}</exif:GPSLongitudeRef>",
                coords.latitude.abs(),
                coords.longitude.abs(),
            )
        }
        None => String::new(),
    };

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/" x:xmptk="photo-tagger">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about=""
   xmlns:xmp="http://ns.adobe.com/xap/1.0/"
   xmlns:exif="http://ns.adobe.com/exif/1.0/"
   xmlns:dc="http://purl.org/dc/elements/1.1/">
   <xmp:ModifyDate>{now}</xmp:ModifyDate>
   <dc:source>{source_filename}</dc:source>{date_block}{gps_block}
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>"#
    )
}
