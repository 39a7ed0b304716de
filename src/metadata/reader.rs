use anyhow::{Context, Result};
use nom_exif::*;
use std::path::Path;

use super::dictionary;

/// A single extracted metadata entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TagEntry {
    /// Raw EXIF tag code.
    pub code: u16,
    /// Canonical tag name (`"Make"`, `"GPSLatitude"`, `"Tag 0x1234"` for
    /// unrecognized codes).
    pub name: String,
    /// Value rendered as a string.
    pub value: String,
}

/// One GPS coordinate in degrees/minutes/seconds with its hemisphere
/// reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmsCoordinate {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    /// `'N'`/`'S'` for latitude, `'E'`/`'W'` for longitude.
    pub reference: char,
}

impl DmsCoordinate {
    /// Convert to signed decimal degrees (negative for southern/western
    /// hemispheres).
    pub fn to_decimal(&self) -> f64 {
        let mut coord = self.degrees + self.minutes / 60.0 + self.seconds / 3600.0;

        if self.reference == 'S' || self.reference == 'W' {
            coord = -coord;
        }

        coord
    }
}

/// Structured GPS position parsed from the GPS IFD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsPosition {
    pub latitude: DmsCoordinate,
    pub longitude: DmsCoordinate,
}

/// All metadata extracted from one image.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Entries in the order the decoder produced them.
    pub entries: Vec<TagEntry>,
    /// Raw EXIF orientation (1-8), if present.
    pub orientation: Option<u16>,
    /// Structured GPS position, if both coordinates are present.
    pub gps: Option<GpsPosition>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of the entry with the given canonical name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }

    pub fn has_gps(&self) -> bool {
        self.gps.is_some()
    }
}

/// Read all EXIF metadata from an image file.
///
/// Files without EXIF, or in formats the decoder does not understand (PNG,
/// BMP), yield an empty [`Metadata`], not an error.
pub fn read_metadata(path: &Path) -> Result<Metadata> {
    std::fs::metadata(path).with_context(|| format!("Failed to open {}", path.display()))?;

    // The decoder rejects formats without EXIF support (PNG, BMP) at source
    // construction; both that and a parse miss mean "no metadata here".
    let mut parser = MediaParser::new();
    let iter: ExifIter = match MediaSource::file_path(path).and_then(|ms| parser.parse(ms)) {
        Ok(iter) => iter,
        Err(e) => {
            log::debug!("No EXIF data found in {}: {e}", path.display());
            return Ok(Metadata::default());
        }
    };

    // Parse GPS info before iterating (iteration consumes the entries)
    let gps_info = iter.parse_gps_info().ok().flatten();

    let mut metadata = Metadata::default();

    if let Some(gps) = gps_info {
        metadata.gps = Some(GpsPosition {
            latitude: latlng_to_dms(&gps.latitude, gps.latitude_ref),
            longitude: latlng_to_dms(&gps.longitude, gps.longitude_ref),
        });
    }

    for mut entry in iter {
        let code = entry.tag_code();
        let name = tag_name(entry.tag(), code);

        let Some(value) = entry.take_value() else {
            continue;
        };
        let value = clean_value(&value.to_string());
        if value.is_empty() {
            continue;
        }

        if code == dictionary::TAG_ORIENTATION && metadata.orientation.is_none() {
            metadata.orientation = value.parse().ok();
        }

        // The thumbnail IFD repeats IFD0 tags; keep the first occurrence.
        if metadata.entries.iter().any(|e| e.name == name) {
            continue;
        }

        metadata.entries.push(TagEntry { code, name, value });
    }

    log::debug!(
        "Extracted {} EXIF entries from {}",
        metadata.entries.len(),
        path.display()
    );

    Ok(metadata)
}

/// Canonical name for a tag: the dictionary name when known, the decoder's
/// name otherwise, and a hex placeholder for unrecognized codes.
fn tag_name(tag: Option<ExifTag>, code: u16) -> String {
    if let Some(info) = dictionary::lookup(code) {
        return info.name.to_string();
    }

    match tag {
        // nom-exif renders tags as "Name(0xcode)"; keep just the name
        Some(t) if t != ExifTag::Unknown => {
            let s = t.to_string();
            match s.split_once('(') {
                Some((name, _)) => name.to_string(),
                None => s,
            }
        }
        _ => format!("Tag 0x{code:04X}"),
    }
}

/// Strip surrounding quotes, NUL padding, and whitespace from a rendered
/// entry value.
fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_matches('"')
        .trim_end_matches('\0')
        .trim()
        .to_string()
}

/// Convert a nom-exif LatLng (3 URationals: deg, min, sec) to a
/// [`DmsCoordinate`].
fn latlng_to_dms(latlng: &LatLng, reference: char) -> DmsCoordinate {
    DmsCoordinate {
        degrees: latlng.0.0 as f64 / latlng.0.1 as f64,
        minutes: latlng.1.0 as f64 / latlng.1.1 as f64,
        seconds: latlng.2.0 as f64 / latlng.2.1 as f64,
        reference,
    }
}
