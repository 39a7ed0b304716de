//! EXIF metadata extraction, categorization, and formatting.
//!
//! This module provides the viewing half of the crate:
//!
//! - [`read_metadata`] — Extract all EXIF entries from an image file
//! - [`MetadataReport`] — Categorize and format them for display
//!
//! Binary EXIF decoding is delegated to `nom-exif`; the [`dictionary`] maps
//! the ~60 known tags to labels, categories, and icons, and [`format`]
//! handles the special-cased values (orientation, flash, exposure, focal
//! length, GPS).

pub mod dictionary;
pub mod format;
mod reader;
mod report;

pub use reader::{read_metadata, DmsCoordinate, GpsPosition, Metadata, TagEntry};
pub use report::{MetadataReport, ReportItem, ReportSection};
