//! Conversion between decimal degrees and the degree/minute/second rational
//! form the EXIF GPS IFD stores. Hemisphere is carried as a reference letter
//! (`N`/`S`, `E`/`W`), never as a sign bit.

/// DMS representation with seconds as a rational. The fixed denominator of 100
/// gives two-decimal-place seconds, bounding round-trip error to 1/720000 deg.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DmsRational {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds_num: u32,
    pub seconds_den: u32,
}

pub const SECONDS_DENOMINATOR: u32 = 100;

/// Convert non-negative decimal degrees to DMS rationals. Callers pass
/// `abs()` and keep the hemisphere separately.
pub fn to_rational(decimal_degrees: f64) -> DmsRational {
    let degrees = decimal_degrees as u32;
    let minutes_full = (decimal_degrees - degrees as f64) * 60.0;
    let minutes = minutes_full as u32;
    let seconds = (minutes_full - minutes as f64) * 60.0;

    DmsRational {
        degrees,
        minutes,
        seconds_num: (seconds * SECONDS_DENOMINATOR as f64).round() as u32,
        seconds_den: SECONDS_DENOMINATOR,
    }
}

/// Inverse of [`to_rational`]; applies the hemisphere sign after
/// reconstruction.
pub fn from_rational(dms: DmsRational, negative_hemisphere: bool) -> f64 {
    let seconds = dms.seconds_num as f64 / dms.seconds_den as f64;
    let value = dms_to_decimal(dms.degrees as f64, dms.minutes as f64, seconds);
    if negative_hemisphere {
        -value
    } else {
        value
    }
}

/// Degrees/minutes/seconds to decimal degrees. Components come in as floats
/// because EXIF data in the wild uses arbitrary rationals for each.
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

pub fn latitude_ref(latitude: f64) -> &'static str {
    if latitude >= 0.0 {
        "N"
    } else {
        "S"
    }
}

pub fn longitude_ref(longitude: f64) -> &'static str {
    if longitude >= 0.0 {
        "E"
    } else {
        "W"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two-decimal seconds precision.
    const TOLERANCE: f64 = 1.0 / 360_000.0;

    #[test]
    fn round_trips_within_tolerance() {
        let samples = [
            0.0,
            0.000001,
            1.5,
            40.689247,
            48.858844,
            89.999999,
            90.0,
            120.123456,
            151.2093,
            179.999999,
            180.0,
        ];

        for degrees in samples {
            let dms = to_rational(degrees);
            let back = from_rational(dms, false);
            assert!(
                (back - degrees).abs() <= TOLERANCE,
                "{degrees} -> {dms:?} -> {back}"
            );
        }
    }

    #[test]
    fn negative_hemisphere_restores_sign() {
        for degrees in [-33.8688f64, -0.1275, -90.0, -179.5] {
            let dms = to_rational(degrees.abs());
            let back = from_rational(dms, degrees < 0.0);
            assert!((back - degrees).abs() <= TOLERANCE, "{degrees} -> {back}");
        }
    }

    #[test]
    fn components_match_hand_computation() {
        // 48.858844 = 48 deg 51 min 31.8384 sec
        let dms = to_rational(48.858844);
        assert_eq!(dms.degrees, 48);
        assert_eq!(dms.minutes, 51);
        assert_eq!(dms.seconds_num, 3184);
        assert_eq!(dms.seconds_den, 100);
    }

    #[test]
    fn hemisphere_letters_from_sign() {
        assert_eq!(latitude_ref(48.85), "N");
        assert_eq!(latitude_ref(-33.86), "S");
        assert_eq!(latitude_ref(0.0), "N");
        assert_eq!(longitude_ref(2.35), "E");
        assert_eq!(longitude_ref(-74.0), "W");
    }
}
