//! Metadata removal: pixel re-encode or EXIF segment surgery.
//!
//! The default strategy decodes the image and re-encodes the pixel data.
//! Re-encoding never copies metadata segments, so the output carries no EXIF,
//! no XMP, no IPTC, no embedded thumbnail. The EXIF orientation can be baked
//! into the pixels first so the clean image still displays upright.
//!
//! [`StripMode::Lossless`] instead drops the EXIF segment/chunk in place
//! (JPEG/PNG/WebP); pixel data is untouched, but segments other than EXIF
//! survive.

use anyhow::{anyhow, bail, Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader};
use img_parts::{Bytes, ImageEXIF};
use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata as ExifWriter;
use std::io::Cursor;
use std::panic;
use std::path::{Path, PathBuf};

use crate::metadata::Metadata;
use crate::pipeline::ImageKind;

/// Default JPEG re-encode quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// How metadata is removed from a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripMode {
    /// Decode and re-encode the pixel data, discarding every metadata
    /// segment.
    ReEncode,
    /// Drop the EXIF segment/chunk without touching pixel data
    /// (JPEG/PNG/WebP only).
    Lossless,
}

/// Options controlling a strip operation.
#[derive(Debug, Clone)]
pub struct StripOptions {
    pub mode: StripMode,
    /// JPEG re-encode quality (1-100).
    pub jpeg_quality: u8,
    /// Bake the EXIF orientation into the pixels before re-encoding.
    pub correct_orientation: bool,
    /// Fields to write back into the clean file after stripping.
    pub keep: Vec<KeepField>,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            mode: StripMode::ReEncode,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            correct_orientation: true,
            keep: Vec::new(),
        }
    }
}

/// Simple string-valued fields that may be preserved across a strip.
///
/// Structured tags, GPS included, are not preservable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepField {
    Make,
    Model,
    Software,
    Artist,
    Copyright,
    Description,
    DateTaken,
    Lens,
}

impl KeepField {
    pub const ALL: [KeepField; 8] = [
        KeepField::Make,
        KeepField::Model,
        KeepField::Software,
        KeepField::Artist,
        KeepField::Copyright,
        KeepField::Description,
        KeepField::DateTaken,
        KeepField::Lens,
    ];

    /// CLI/config token for this field.
    pub fn token(self) -> &'static str {
        match self {
            KeepField::Make => "make",
            KeepField::Model => "model",
            KeepField::Software => "software",
            KeepField::Artist => "artist",
            KeepField::Copyright => "copyright",
            KeepField::Description => "description",
            KeepField::DateTaken => "date-taken",
            KeepField::Lens => "lens",
        }
    }

    /// Canonical tag name this field maps to in extracted metadata.
    pub fn tag_name(self) -> &'static str {
        match self {
            KeepField::Make => "Make",
            KeepField::Model => "Model",
            KeepField::Software => "Software",
            KeepField::Artist => "Artist",
            KeepField::Copyright => "Copyright",
            KeepField::Description => "ImageDescription",
            KeepField::DateTaken => "DateTimeOriginal",
            KeepField::Lens => "LensModel",
        }
    }

    fn to_exif_tag(self, value: String) -> ExifTag {
        match self {
            KeepField::Make => ExifTag::Make(value),
            KeepField::Model => ExifTag::Model(value),
            KeepField::Software => ExifTag::Software(value),
            KeepField::Artist => ExifTag::Artist(value),
            KeepField::Copyright => ExifTag::Copyright(value),
            KeepField::Description => ExifTag::ImageDescription(value),
            KeepField::DateTaken => ExifTag::DateTimeOriginal(exif_date_string(&value)),
            KeepField::Lens => ExifTag::LensModel(value),
        }
    }
}

impl std::str::FromStr for KeepField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_ascii_lowercase();
        KeepField::ALL
            .iter()
            .copied()
            .find(|f| f.token() == token)
            .ok_or_else(|| {
                let expected: Vec<&str> = KeepField::ALL.iter().map(|f| f.token()).collect();
                anyhow!("unknown field {s:?} (expected one of: {})", expected.join(", "))
            })
    }
}

/// Outcome of a strip operation.
#[derive(Debug, Clone)]
pub struct StripOutcome {
    /// Path the clean image was written to.
    pub output: PathBuf,
    pub bytes_in: u64,
    pub bytes_out: u64,
    /// Whether an orientation transform was baked into the pixels.
    pub orientation_corrected: bool,
    /// Canonical names of fields written back into the clean file.
    pub kept: Vec<&'static str>,
}

/// Strip metadata from `input`, writing the clean image to `output`.
///
/// `metadata` is the previously extracted metadata for `input`; it supplies
/// the orientation value and the values of any kept fields.
pub fn strip_file(
    input: &Path,
    output: &Path,
    metadata: &Metadata,
    options: &StripOptions,
) -> Result<StripOutcome> {
    let bytes = std::fs::read(input).context("Failed to read image file")?;
    let kind = ImageKind::from_path(input)
        .with_context(|| format!("Unsupported image format: {}", input.display()))?;

    let orientation = metadata.orientation.unwrap_or(1);
    let needs_correction = options.correct_orientation && (2..=8).contains(&orientation);

    let clean = match options.mode {
        StripMode::ReEncode => reencode(&bytes, kind, orientation, options)?,
        StripMode::Lossless => drop_exif_segment(&bytes, kind)?,
    };

    std::fs::write(output, &clean).context("Failed to write clean image")?;
    log::debug!(
        "Stripped {} -> {} ({} -> {} bytes)",
        input.display(),
        output.display(),
        bytes.len(),
        clean.len()
    );

    let kept = if options.keep.is_empty() {
        Vec::new()
    } else {
        preserve_fields(output, metadata, &options.keep)?
    };

    Ok(StripOutcome {
        output: output.to_path_buf(),
        bytes_in: bytes.len() as u64,
        bytes_out: clean.len() as u64,
        orientation_corrected: needs_correction && options.mode == StripMode::ReEncode,
        kept,
    })
}

/// Decode the pixels and re-encode them without any metadata.
fn reencode(bytes: &[u8], kind: ImageKind, orientation: u16, options: &StripOptions) -> Result<Vec<u8>> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("Failed to read image header")?;
    let mut img = reader.decode().context("Failed to decode image")?;

    if options.correct_orientation {
        img = apply_orientation(img, orientation);
    }

    let mut out = Cursor::new(Vec::new());
    match kind.output_kind() {
        ImageKind::Jpeg => {
            // JPEG has no alpha channel
            let rgb = img.to_rgb8();
            let mut encoder =
                JpegEncoder::new_with_quality(&mut out, options.jpeg_quality.clamp(1, 100));
            encoder
                .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
                .context("Failed to re-encode JPEG")?;
        }
        ImageKind::Png | ImageKind::Bmp => {
            PngEncoder::new(&mut out)
                .write_image(img.as_bytes(), img.width(), img.height(), img.color().into())
                .context("Failed to re-encode PNG")?;
        }
        ImageKind::WebP => {
            let rgba = img.to_rgba8();
            WebPEncoder::new_lossless(&mut out)
                .encode(
                    rgba.as_raw(),
                    rgba.width(),
                    rgba.height(),
                    ExtendedColorType::Rgba8,
                )
                .context("Failed to re-encode WebP")?;
        }
    }

    Ok(out.into_inner())
}

/// Apply the inverse transform for an EXIF orientation so the pixels display
/// upright without the tag.
fn apply_orientation(img: DynamicImage, orientation: u16) -> DynamicImage {
    match orientation {
        2 => img.fliph(),             // Mirror horizontal
        3 => img.rotate180(),         // Rotate 180°
        4 => img.flipv(),             // Mirror vertical
        5 => img.rotate270().fliph(), // Mirror horizontal and rotate 270° CW
        6 => img.rotate90(),          // Rotate 90° CW
        7 => img.rotate90().fliph(),  // Mirror horizontal and rotate 90° CW
        8 => img.rotate270(),         // Rotate 270° CW
        _ => img,
    }
}

/// Remove the EXIF segment/chunk without re-encoding pixel data.
fn drop_exif_segment(bytes: &[u8], kind: ImageKind) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    match kind {
        ImageKind::Jpeg => {
            let mut jpeg = img_parts::jpeg::Jpeg::from_bytes(Bytes::copy_from_slice(bytes))
                .context("Failed to parse JPEG")?;
            jpeg.set_exif(None);
            jpeg.encoder()
                .write_to(&mut out)
                .context("Failed to write JPEG")?;
        }
        ImageKind::Png => {
            let mut png = img_parts::png::Png::from_bytes(Bytes::copy_from_slice(bytes))
                .context("Failed to parse PNG")?;
            png.set_exif(None);
            png.encoder()
                .write_to(&mut out)
                .context("Failed to write PNG")?;
        }
        ImageKind::WebP => {
            let mut webp = img_parts::webp::WebP::from_bytes(Bytes::copy_from_slice(bytes))
                .context("Failed to parse WebP")?;
            webp.set_exif(None);
            webp.encoder()
                .write_to(&mut out)
                .context("Failed to write WebP")?;
        }
        ImageKind::Bmp => bail!("Lossless stripping is not supported for BMP"),
    }

    Ok(out)
}

/// Write the kept fields back into the freshly stripped file. Returns the
/// canonical names of the fields actually written (fields absent from the
/// source metadata are skipped).
fn preserve_fields(
    output: &Path,
    metadata: &Metadata,
    keep: &[KeepField],
) -> Result<Vec<&'static str>> {
    let mut tags = Vec::new();
    let mut kept = Vec::new();

    for field in keep {
        let Some(value) = metadata.get(field.tag_name()) else {
            log::debug!("Keep field {} not present in source metadata", field.token());
            continue;
        };
        tags.push(field.to_exif_tag(value.to_string()));
        kept.push(field.tag_name());
    }

    if !tags.is_empty() {
        write_tags(output, tags)?;
        log::debug!("Preserved fields in {}: {}", output.display(), kept.join(", "));
    }

    Ok(kept)
}

/// Write EXIF tags to a file with little_exif, containing its panics the
/// same way parse errors are contained.
fn write_tags(path: &Path, tags: Vec<ExifTag>) -> Result<()> {
    let path_owned = path.to_path_buf();
    let prev_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(panic::AssertUnwindSafe(move || {
        let mut writer = ExifWriter::new();
        for tag in tags {
            writer.set_tag(tag);
        }
        writer.write_to_file(&path_owned)
    }));
    panic::set_hook(prev_hook);

    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(anyhow!("Failed to write preserved fields: {e:?}")),
        Err(_) => Err(anyhow!(
            "Metadata writer panicked; preserved fields were not written"
        )),
    }
}

/// Convert a decoder-rendered date (possibly RFC 3339) back to the EXIF
/// `YYYY:MM:DD HH:MM:SS` form.
fn exif_date_string(raw: &str) -> String {
    if !raw.contains('T') {
        return raw.to_string();
    }
    let s: String = raw.chars().take(19).collect();
    if s.len() < 19 {
        return raw.to_string();
    }
    let s = s.replace('T', " ");
    let (date, time) = s.split_at(10);
    format!("{} {}", date.replace('-', ":"), time.trim())
}
