//! Special-case rendering of EXIF values into human-readable strings.
//!
//! Most values pass through as the decoder rendered them; orientation, flash,
//! exposure time, focal length, and GPS coordinates get friendlier forms.
//! Anything unrecognized is passed through unchanged.

use super::dictionary::{
    TAG_EXPOSURE_TIME, TAG_FLASH, TAG_FOCAL_LENGTH, TAG_GPS_LATITUDE, TAG_GPS_LONGITUDE,
    TAG_ORIENTATION,
};
use super::reader::{DmsCoordinate, GpsPosition, Metadata, TagEntry};

/// Render an entry's value for display, applying the special cases.
pub fn format_value(entry: &TagEntry, metadata: &Metadata) -> String {
    match entry.code {
        TAG_ORIENTATION => match entry.value.parse::<u16>().ok().and_then(orientation_description) {
            Some(desc) => desc.to_string(),
            None => entry.value.clone(),
        },
        TAG_FLASH => match entry.value.parse::<u16>().ok().and_then(flash_description) {
            Some(desc) => desc.to_string(),
            None => entry.value.clone(),
        },
        TAG_EXPOSURE_TIME => format_exposure(&entry.value),
        TAG_FOCAL_LENGTH => format_focal_length(&entry.value),
        TAG_GPS_LATITUDE => match metadata.gps {
            Some(ref gps) => format_dms(&gps.latitude),
            None => entry.value.clone(),
        },
        TAG_GPS_LONGITUDE => match metadata.gps {
            Some(ref gps) => format_dms(&gps.longitude),
            None => entry.value.clone(),
        },
        _ => entry.value.clone(),
    }
}

/// Description of an EXIF orientation value (1-8).
pub fn orientation_description(value: u16) -> Option<&'static str> {
    match value {
        1 => Some("Normal"),
        2 => Some("Mirror horizontal"),
        3 => Some("Rotate 180°"),
        4 => Some("Mirror vertical"),
        5 => Some("Mirror horizontal and rotate 270° CW"),
        6 => Some("Rotate 90° CW"),
        7 => Some("Mirror horizontal and rotate 90° CW"),
        8 => Some("Rotate 270° CW"),
        _ => None,
    }
}

/// Description of an EXIF flash value.
pub fn flash_description(value: u16) -> Option<&'static str> {
    match value {
        0 => Some("No flash"),
        1 => Some("Fired"),
        5 => Some("Fired, return not detected"),
        7 => Some("Fired, return detected"),
        8 => Some("On, did not fire"),
        9 => Some("On, fired"),
        13 => Some("On, return not detected"),
        15 => Some("On, return detected"),
        16 => Some("Off, did not fire"),
        24 => Some("Auto, did not fire"),
        25 => Some("Auto, fired"),
        29 => Some("Auto, fired, return not detected"),
        31 => Some("Auto, fired, return detected"),
        32 => Some("No flash function"),
        65 => Some("Fired, red-eye reduction"),
        69 => Some("Fired, red-eye reduction, return not detected"),
        71 => Some("Fired, red-eye reduction, return detected"),
        73 => Some("On, red-eye reduction"),
        77 => Some("On, red-eye reduction, return not detected"),
        79 => Some("On, red-eye reduction, return detected"),
        89 => Some("Auto, fired, red-eye reduction"),
        93 => Some("Auto, fired, red-eye reduction, return not detected"),
        95 => Some("Auto, fired, red-eye reduction, return detected"),
        _ => None,
    }
}

/// Render an exposure time in seconds (`1/125 s`, `2.5 s`).
pub fn format_exposure(raw: &str) -> String {
    let Some(seconds) = parse_numeric(raw) else {
        return raw.to_string();
    };
    if seconds <= 0.0 {
        return raw.to_string();
    }

    if seconds < 1.0 {
        format!("1/{} s", (1.0 / seconds).round() as u64)
    } else {
        format!("{} s", trim_decimal(seconds))
    }
}

/// Render a focal length with an `mm` suffix.
pub fn format_focal_length(raw: &str) -> String {
    match parse_numeric(raw) {
        Some(mm) => format!("{} mm", trim_decimal(mm)),
        None => raw.to_string(),
    }
}

/// Render an f-number as a bare decimal (`1.75`), for `f/` prefixing.
pub fn format_aperture(raw: &str) -> String {
    match parse_numeric(raw) {
        Some(value) => trim_decimal(value),
        None => raw.to_string(),
    }
}

/// Render a DMS coordinate (`40° 42' 51.6" N`).
pub fn format_dms(coord: &DmsCoordinate) -> String {
    format!(
        "{}° {}' {}\" {}",
        trim_decimal(coord.degrees),
        trim_decimal(coord.minutes),
        trim_decimal(coord.seconds),
        coord.reference
    )
}

/// Google Maps link for a GPS position.
pub fn maps_url(gps: &GpsPosition) -> String {
    format!(
        "https://www.google.com/maps?q={:.6},{:.6}",
        gps.latitude.to_decimal(),
        gps.longitude.to_decimal()
    )
}

/// Render a capture date (`YYYY:MM:DD HH:MM:SS` or RFC 3339) as `YYYY-MM-DD`.
pub fn format_capture_date(raw: &str) -> String {
    let date = raw.split(['T', ' ']).next().unwrap_or(raw);
    let parts: Vec<&str> = date.split(':').collect();
    if parts.len() == 3 {
        parts.join("-")
    } else {
        date.to_string()
    }
}

/// Render a byte count with binary units (`1.27 MB`).
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    format!("{} {}", trim_decimal(value), UNITS[exponent])
}

/// Parse the leading number out of a rendered EXIF value: a plain number or
/// a rational like `9997/1000000 (0.0100)`.
fn parse_numeric(raw: &str) -> Option<f64> {
    let token = raw.split_whitespace().next()?;

    if let Some((numerator, denominator)) = token.split_once('/') {
        let numerator: f64 = numerator.parse().ok()?;
        let denominator: f64 = denominator.parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(numerator / denominator);
    }

    token.parse().ok()
}

/// Format with two decimals and trim trailing zeros.
fn trim_decimal(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
