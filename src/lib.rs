//! # exif-scrub
//!
//! View, categorize, and strip EXIF metadata from images — entirely offline.
//!
//! Cameras and phones embed EXIF metadata (GPS coordinates, device identifiers,
//! capture timestamps) into every photo they produce. This crate extracts that
//! metadata, organizes it into human-readable categories, and removes it by
//! re-encoding the pixel data. Re-encoding never copies metadata segments, so
//! the clean image carries no EXIF, no XMP, no IPTC, no thumbnail.
//!
//! ## Quick Start
//!
//! The simplest way to use the library is through the pipeline module, which
//! handles the full read → report → strip flow:
//!
//! ```rust,no_run
//! use exif_scrub::config::Config;
//! use exif_scrub::metadata::MetadataReport;
//! use exif_scrub::pipeline::{collect_images, process_image};
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Some("config.json".as_ref()))?;
//!
//!     // Collect supported image files from paths (files or directories)
//!     let images = collect_images(&[PathBuf::from("./photos")]);
//!
//!     for path in &images {
//!         let result = process_image(path, &config, true);
//!
//!         if let Some(ref err) = result.error {
//!             eprintln!("Error processing {}: {err}", path.display());
//!             continue;
//!         }
//!
//!         let report = MetadataReport::build(&result.metadata);
//!         for line in &report.summary {
//!             println!("  {line}");
//!         }
//!         if let Some(ref outcome) = result.strip {
//!             println!("  Clean image: {}", outcome.output.display());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! For more control, you can call the reader, stripper, and exporter
//! individually:
//!
//! ```rust,no_run
//! use exif_scrub::export::{render, ExportFormat};
//! use exif_scrub::metadata::read_metadata;
//! use exif_scrub::strip::{strip_file, StripOptions};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let path = Path::new("photo.jpg");
//!
//!     // 1. Read the metadata
//!     let metadata = read_metadata(path)?;
//!     println!("Found {} EXIF entries", metadata.entries.len());
//!     println!("Has GPS: {}", metadata.has_gps());
//!
//!     // 2. Export it for the record
//!     let json = render(&metadata, ExportFormat::Json)?;
//!     std::fs::write("exif-data.json", json)?;
//!
//!     // 3. Write a clean copy
//!     let outcome = strip_file(
//!         path,
//!         Path::new("photo_clean.jpg"),
//!         &metadata,
//!         &StripOptions::default(),
//!     )?;
//!     println!("Wrote {} bytes", outcome.bytes_out);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Supported Formats
//!
//! | Format | Strip Strategy |
//! |--------|---------------|
//! | JPEG (`.jpg`, `.jpeg`) | Re-encode (quality 95) or lossless EXIF segment drop |
//! | PNG (`.png`) | Re-encode or lossless eXIf chunk drop |
//! | WebP (`.webp`) | Lossless re-encode or EXIF chunk drop |
//! | BMP (`.bmp`) | Re-encode (output converts to PNG) |
//!
//! ## Modules
//!
//! - [`config`] — Configuration types and loading/saving
//! - [`export`] — JSON, CSV, and plain-text metadata export
//! - [`metadata`] — EXIF extraction, tag dictionary, categorized reports
//! - [`pipeline`] — High-level processing, image collection, format detection
//! - [`strip`] — Metadata removal by re-encode or segment surgery

pub mod config;
pub mod export;
pub mod metadata;
pub mod pipeline;
pub mod strip;
