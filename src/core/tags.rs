//! The binary tag codec: an explicit value type over the embedded EXIF
//! container of a JPEG. Only the fields this application edits get named
//! accessors; everything else rides along untouched so decode/encode with no
//! edits is round-trip stable.

use little_exif::exif_tag::ExifTag;
use little_exif::filetype::FileExtension;
use little_exif::metadata::Metadata as ExifMetadata;
use little_exif::rational::uR64;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::coords;
use crate::error::TaggerError;
use crate::models::{CameraInfo, Coordinates, PhotoDate};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})[:-](\d{2})[:-](\d{2})").expect("valid date pattern"));

pub struct TagBlock {
    metadata: ExifMetadata,
}

impl TagBlock {
    /// All IFDs present but empty. The fallback when an image carries no
    /// readable container; the write path still works from here.
    pub fn empty() -> Self {
        Self {
            metadata: ExifMetadata::new(),
        }
    }

    /// Decode the tag block from an image byte buffer. A malformed or missing
    /// container degrades to an empty block instead of failing, so a photo
    /// with no existing tags stays writable.
    pub fn decode(bytes: &[u8]) -> Self {
        let buffer = bytes.to_vec();

        // little_exif panics on some malformed containers; treat that the
        // same as a parse error.
        let prev_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));
        let result = std::panic::catch_unwind(move || {
            ExifMetadata::new_from_vec(&buffer, FileExtension::JPEG)
        });
        std::panic::set_hook(prev_hook);

        match result {
            Ok(Ok(metadata)) => Self { metadata },
            Ok(Err(err)) => {
                log::debug!("no readable tag container: {err}");
                Self::empty()
            }
            Err(_) => {
                log::debug!("tag container parser panicked; treating as empty");
                Self::empty()
            }
        }
    }

    /// Re-serialize the block into the original image byte stream. Pixel data
    /// is left untouched; only the tag segment is replaced.
    pub fn encode(&self, original: &[u8]) -> Result<Vec<u8>, TaggerError> {
        let mut buffer = original.to_vec();
        self.metadata
            .write_to_vec(&mut buffer, FileExtension::JPEG)
            .map_err(|err| TaggerError::WriteFailed(err.to_string()))?;
        Ok(buffer)
    }

    /// Write the capture date as `YYYY:MM:DD 12:00:00` into the zeroth-IFD
    /// modify date and the capture-info original/digitized fields. Noon is
    /// used because the source data carries no time; it keeps the date stable
    /// across timezone shifts on display.
    pub fn set_date(&mut self, date: PhotoDate) {
        let stamp = format!(
            "{:04}:{:02}:{:02} 12:00:00",
            date.year, date.month, date.day
        );
        self.metadata.set_tag(ExifTag::ModifyDate(stamp.clone()));
        self.metadata
            .set_tag(ExifTag::DateTimeOriginal(stamp.clone()));
        self.metadata.set_tag(ExifTag::CreateDate(stamp));
    }

    /// Write GPS coordinates into the GPS IFD as DMS rationals with
    /// hemisphere reference letters derived from the sign.
    pub fn set_location(&mut self, coordinates: Coordinates) {
        let lat = coords::to_rational(coordinates.latitude.abs());
        let lon = coords::to_rational(coordinates.longitude.abs());

        self.metadata.set_tag(ExifTag::GPSLatitudeRef(
            coords::latitude_ref(coordinates.latitude).to_string(),
        ));
        self.metadata.set_tag(ExifTag::GPSLatitude(vec![
            ur64(lat.degrees, 1),
            ur64(lat.minutes, 1),
            ur64(lat.seconds_num, lat.seconds_den),
        ]));
        self.metadata.set_tag(ExifTag::GPSLongitudeRef(
            coords::longitude_ref(coordinates.longitude).to_string(),
        ));
        self.metadata.set_tag(ExifTag::GPSLongitude(vec![
            ur64(lon.degrees, 1),
            ur64(lon.minutes, 1),
            ur64(lon.seconds_num, lon.seconds_den),
        ]));
    }

    /// Capture date, preferring DateTimeOriginal, then CreateDate, then the
    /// zeroth-IFD ModifyDate.
    pub fn date(&self) -> Option<PhotoDate> {
        let mut original = None;
        let mut created = None;
        let mut modified = None;

        for tag in &self.metadata {
            match tag {
                ExifTag::DateTimeOriginal(s) => original = parse_date(s),
                ExifTag::CreateDate(s) => created = parse_date(s),
                ExifTag::ModifyDate(s) => modified = parse_date(s),
                _ => {}
            }
        }

        original.or(created).or(modified)
    }

    /// Signed decimal coordinates from the GPS IFD, if both axes are present.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let mut lat_ref: Option<String> = None;
        let mut lat_dms: Option<(f64, f64, f64)> = None;
        let mut lon_ref: Option<String> = None;
        let mut lon_dms: Option<(f64, f64, f64)> = None;

        for tag in &self.metadata {
            match tag {
                ExifTag::GPSLatitudeRef(s) => lat_ref = Some(clean_string(s)),
                ExifTag::GPSLatitude(rats) if rats.len() >= 3 => {
                    lat_dms = Some(rational_triple(rats));
                }
                ExifTag::GPSLongitudeRef(s) => lon_ref = Some(clean_string(s)),
                ExifTag::GPSLongitude(rats) if rats.len() >= 3 => {
                    lon_dms = Some(rational_triple(rats));
                }
                _ => {}
            }
        }

        let (lat_d, lat_m, lat_s) = lat_dms?;
        let (lon_d, lon_m, lon_s) = lon_dms?;

        let mut latitude = coords::dms_to_decimal(lat_d, lat_m, lat_s);
        let mut longitude = coords::dms_to_decimal(lon_d, lon_m, lon_s);
        if lat_ref.as_deref() == Some("S") {
            latitude = -latitude;
        }
        if lon_ref.as_deref() == Some("W") {
            longitude = -longitude;
        }

        Some(Coordinates::new(latitude, longitude))
    }

    /// Display-only capture details. Read, never written back.
    pub fn camera(&self) -> CameraInfo {
        let mut info = CameraInfo::default();

        for tag in &self.metadata {
            match tag {
                ExifTag::Make(s) => info.make = Some(clean_string(s)),
                ExifTag::Model(s) => info.model = Some(clean_string(s)),
                ExifTag::ExposureTime(v) => {
                    info.exposure_time = v.first().map(|r| (r.nominator, r.denominator));
                }
                ExifTag::FNumber(v) => {
                    info.f_number = v.first().map(|r| (r.nominator, r.denominator));
                }
                ExifTag::ISO(v) => info.iso = v.first().map(|value| *value as u32),
                ExifTag::FocalLength(v) => {
                    info.focal_length = v.first().map(|r| (r.nominator, r.denominator));
                }
                _ => {}
            }
        }

        info
    }
}

fn ur64(nominator: u32, denominator: u32) -> uR64 {
    uR64 {
        nominator,
        denominator,
    }
}

fn rational_triple(rats: &[uR64]) -> (f64, f64, f64) {
    let d: f64 = rats[0].clone().into();
    let m: f64 = rats[1].clone().into();
    let s: f64 = rats[2].clone().into();
    (d, m, s)
}

fn clean_string(s: &str) -> String {
    s.trim_end_matches('\0').trim().to_string()
}

fn parse_date(value: &str) -> Option<PhotoDate> {
    let caps = DATE_RE.captures(value)?;
    Some(PhotoDate::new(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}
