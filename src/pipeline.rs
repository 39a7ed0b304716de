use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::metadata::{self, format, Metadata};
use crate::strip::{self, KeepField, StripMode, StripOptions, StripOutcome};

/// Supported image extensions.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp"];

/// Image format of a file, determined by its extension.
///
/// Use [`ImageKind::from_path`] to detect the format from a file extension.
///
/// # Example
///
/// ```rust
/// use exif_scrub::pipeline::ImageKind;
/// use std::path::Path;
///
/// let kind = ImageKind::from_path(Path::new("photo.jpg"));
/// assert_eq!(kind, Some(ImageKind::Jpeg));
///
/// // BMP input re-encodes to PNG
/// let kind = ImageKind::from_path(Path::new("scan.bmp")).unwrap();
/// assert_eq!(kind.output_kind(), ImageKind::Png);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    WebP,
    /// BMP is read-only; clean copies convert to PNG.
    Bmp,
}

impl ImageKind {
    /// Determine the image kind from a file path extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::WebP),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// MIME type of this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Bmp => "image/bmp",
        }
    }

    /// The format clean copies are written in. BMP converts to PNG.
    pub fn output_kind(self) -> Self {
        match self {
            Self::Bmp => Self::Png,
            other => other,
        }
    }

    /// File extension for clean copies.
    pub fn output_extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png | Self::Bmp => "png",
            Self::WebP => "webp",
        }
    }
}

/// The result of processing a single image.
#[derive(Debug)]
pub struct ProcessResult {
    pub path: PathBuf,
    pub file_size: u64,
    /// Pixel dimensions, read from the image header.
    pub dimensions: Option<(u32, u32)>,
    /// Extracted metadata (empty when the file carries none).
    pub metadata: Metadata,
    /// Strip outcome, when stripping was requested and succeeded.
    pub strip: Option<StripOutcome>,
    pub error: Option<String>,
}

/// Collect supported image files from the given paths.
///
/// Accepts a mix of file paths and directory paths. Directories are walked
/// recursively (following symlinks). Only files with supported image
/// extensions are included.
///
/// # Example
///
/// ```rust,no_run
/// use exif_scrub::pipeline::collect_images;
/// use std::path::PathBuf;
///
/// let images = collect_images(&[
///     PathBuf::from("photo.jpg"),       // single file
///     PathBuf::from("./photos/"),        // entire directory
/// ]);
/// println!("Found {} images", images.len());
/// ```
pub fn collect_images(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut images = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_supported_image(path) {
                images.push(path.clone());
            } else {
                log::warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let p = entry.path();
                if p.is_file() && is_supported_image(p) {
                    images.push(p.to_path_buf());
                }
            }
        } else {
            log::warn!("Path does not exist: {}", path.display());
        }
    }

    images
}

/// Check if a file has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Create a backup of the original file.
pub fn backup_file(path: &Path) -> Result<PathBuf> {
    let backup_path = path.with_extension(format!(
        "{}.bak",
        path.extension().unwrap_or_default().to_string_lossy()
    ));

    if !backup_path.exists() {
        std::fs::copy(path, &backup_path).context("Failed to create backup")?;
        log::debug!("Backup created: {}", backup_path.display());
    }

    Ok(backup_path)
}

/// Path of the clean copy for an input image: `<stem><suffix>.<ext>` next to
/// the input, with the extension mapped through [`ImageKind::output_extension`].
pub fn clean_output_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    let ext = ImageKind::from_path(path)
        .map(|k| k.output_extension())
        .unwrap_or("jpg");
    path.with_file_name(format!("{stem}{suffix}.{ext}"))
}

/// Check a file against the configured size limit. Returns the size in bytes.
pub fn validate_file_size(path: &Path, max_mb: u64) -> Result<u64> {
    let size = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();

    if max_mb > 0 && size > max_mb * 1024 * 1024 {
        anyhow::bail!(
            "{} is {}, larger than the {max_mb} MB limit",
            path.display(),
            format::format_file_size(size)
        );
    }

    Ok(size)
}

/// Build [`StripOptions`] from the configuration, dropping unknown keep
/// tokens with a warning.
pub fn strip_options(config: &Config) -> StripOptions {
    let mut keep: Vec<KeepField> = Vec::new();
    for token in &config.strip.keep {
        match token.parse::<KeepField>() {
            Ok(field) => {
                if !keep.contains(&field) {
                    keep.push(field);
                }
            }
            Err(e) => log::warn!("Ignoring keep field: {e}"),
        }
    }

    StripOptions {
        mode: if config.strip.lossless {
            StripMode::Lossless
        } else {
            StripMode::ReEncode
        },
        jpeg_quality: config.strip.jpeg_quality,
        correct_orientation: config.strip.correct_orientation,
        keep,
    }
}

/// Process a single image: validate, read metadata, and optionally write a
/// clean copy.
///
/// This is the main entry point for the library. Failures are reported in
/// [`ProcessResult::error`] rather than returned, so a batch keeps going
/// when one file is broken.
///
/// # Example
///
/// ```rust,no_run
/// use exif_scrub::config::Config;
/// use exif_scrub::pipeline::process_image;
/// use std::path::Path;
///
/// let config = Config::default();
/// let result = process_image(Path::new("photo.jpg"), &config, true);
///
/// if result.error.is_none() {
///     println!("{} EXIF entries", result.metadata.entries.len());
///     if let Some(ref outcome) = result.strip {
///         println!("Clean image: {}", outcome.output.display());
///     }
/// }
/// ```
pub fn process_image(path: &Path, config: &Config, do_strip: bool) -> ProcessResult {
    let mut result = ProcessResult {
        path: path.to_path_buf(),
        file_size: 0,
        dimensions: None,
        metadata: Metadata::default(),
        strip: None,
        error: None,
    };

    match validate_file_size(path, config.limits.max_file_size_mb) {
        Ok(size) => result.file_size = size,
        Err(e) => {
            result.error = Some(e.to_string());
            return result;
        }
    }

    // Dimensions come from the header alone, no full decode
    result.dimensions = image::image_dimensions(path).ok();

    match metadata::read_metadata(path) {
        Ok(m) => result.metadata = m,
        Err(e) => {
            log::warn!("Failed to read metadata from {}: {e}", path.display());
        }
    }

    if !do_strip {
        return result;
    }

    let output = clean_output_path(path, &config.strip.output_suffix);

    if config.output.dry_run {
        log::info!("DRY RUN — would write {}", output.display());
        return result;
    }

    if config.output.backup_originals {
        if let Err(e) = backup_file(path) {
            log::warn!("Failed to backup {}: {e}", path.display());
        }
    }

    let options = strip_options(config);
    match strip::strip_file(path, &output, &result.metadata, &options) {
        Ok(outcome) => result.strip = Some(outcome),
        Err(e) => result.error = Some(format!("Failed to strip metadata: {e}")),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // ── ImageKind::from_path ──────────────────────────────────────────

    #[test]
    fn image_kind_jpeg() {
        assert_eq!(ImageKind::from_path(Path::new("photo.jpg")), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_path(Path::new("photo.jpeg")), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_path(Path::new("PHOTO.JPG")), Some(ImageKind::Jpeg));
    }

    #[test]
    fn image_kind_png() {
        assert_eq!(ImageKind::from_path(Path::new("image.png")), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_path(Path::new("IMAGE.PNG")), Some(ImageKind::Png));
    }

    #[test]
    fn image_kind_webp() {
        assert_eq!(ImageKind::from_path(Path::new("image.webp")), Some(ImageKind::WebP));
    }

    #[test]
    fn image_kind_bmp() {
        assert_eq!(ImageKind::from_path(Path::new("scan.bmp")), Some(ImageKind::Bmp));
    }

    #[test]
    fn image_kind_unsupported() {
        assert_eq!(ImageKind::from_path(Path::new("doc.pdf")), None);
        assert_eq!(ImageKind::from_path(Path::new("photo.heic")), None);
        assert_eq!(ImageKind::from_path(Path::new("noext")), None);
    }

    // ── ImageKind output mapping ─────────────────────────────────────

    #[test]
    fn output_kind_maps_bmp_to_png() {
        assert_eq!(ImageKind::Bmp.output_kind(), ImageKind::Png);
        assert_eq!(ImageKind::Jpeg.output_kind(), ImageKind::Jpeg);
        assert_eq!(ImageKind::WebP.output_kind(), ImageKind::WebP);
    }

    #[test]
    fn output_extensions() {
        assert_eq!(ImageKind::Jpeg.output_extension(), "jpg");
        assert_eq!(ImageKind::Png.output_extension(), "png");
        assert_eq!(ImageKind::Bmp.output_extension(), "png");
        assert_eq!(ImageKind::WebP.output_extension(), "webp");
    }

    #[test]
    fn mime_types() {
        assert_eq!(ImageKind::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ImageKind::Png.mime_type(), "image/png");
        assert_eq!(ImageKind::WebP.mime_type(), "image/webp");
        assert_eq!(ImageKind::Bmp.mime_type(), "image/bmp");
    }

    // ── is_supported_image ───────────────────────────────────────────

    #[test]
    fn supported_image_extensions() {
        assert!(is_supported_image(Path::new("photo.jpg")));
        assert!(is_supported_image(Path::new("photo.JPEG")));
        assert!(is_supported_image(Path::new("photo.png")));
        assert!(is_supported_image(Path::new("photo.webp")));
        assert!(is_supported_image(Path::new("photo.bmp")));
    }

    #[test]
    fn unsupported_image_extensions() {
        assert!(!is_supported_image(Path::new("doc.pdf")));
        assert!(!is_supported_image(Path::new("video.mp4")));
        assert!(!is_supported_image(Path::new("photo.tiff")));
        assert!(!is_supported_image(Path::new("noext")));
    }

    // ── collect_images ───────────────────────────────────────────────

    #[test]
    fn collect_images_single_file() {
        let dir = TempDir::new().unwrap();
        let jpg = dir.path().join("test.jpg");
        fs::write(&jpg, b"fake").unwrap();

        let images = collect_images(&[jpg.clone()]);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0], jpg);
    }

    #[test]
    fn collect_images_skips_unsupported() {
        let dir = TempDir::new().unwrap();
        let txt = dir.path().join("readme.txt");
        fs::write(&txt, b"hello").unwrap();

        let images = collect_images(&[txt]);
        assert!(images.is_empty());
    }

    #[test]
    fn collect_images_directory_recursive() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();

        fs::write(dir.path().join("a.jpg"), b"fake").unwrap();
        fs::write(sub.join("b.png"), b"fake").unwrap();
        fs::write(sub.join("c.txt"), b"fake").unwrap();

        let images = collect_images(&[dir.path().to_path_buf()]);
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn collect_images_nonexistent_path() {
        let images = collect_images(&[PathBuf::from("/nonexistent/path")]);
        assert!(images.is_empty());
    }

    // ── clean_output_path ────────────────────────────────────────────

    #[test]
    fn clean_output_path_keeps_format() {
        assert_eq!(
            clean_output_path(Path::new("/tmp/photo.jpg"), "_clean"),
            PathBuf::from("/tmp/photo_clean.jpg")
        );
        assert_eq!(
            clean_output_path(Path::new("pic.webp"), "_clean"),
            PathBuf::from("pic_clean.webp")
        );
    }

    #[test]
    fn clean_output_path_converts_bmp() {
        assert_eq!(
            clean_output_path(Path::new("scan.bmp"), "_clean"),
            PathBuf::from("scan_clean.png")
        );
    }

    #[test]
    fn clean_output_path_custom_suffix() {
        assert_eq!(
            clean_output_path(Path::new("a.png"), ".stripped"),
            PathBuf::from("a.stripped.png")
        );
    }

    // ── validate_file_size ───────────────────────────────────────────

    #[test]
    fn file_size_within_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("small.jpg");
        fs::write(&path, vec![0u8; 1024]).unwrap();

        assert_eq!(validate_file_size(&path, 10).unwrap(), 1024);
    }

    #[test]
    fn file_size_over_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.jpg");
        fs::write(&path, vec![0u8; 2 * 1024 * 1024]).unwrap();

        let err = validate_file_size(&path, 1).unwrap_err();
        assert!(err.to_string().contains("1 MB limit"));
    }

    #[test]
    fn file_size_limit_disabled() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.jpg");
        fs::write(&path, vec![0u8; 2 * 1024 * 1024]).unwrap();

        assert!(validate_file_size(&path, 0).is_ok());
    }

    // ── backup_file ──────────────────────────────────────────────────

    #[test]
    fn backup_creates_bak_copy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        fs::write(&path, b"data").unwrap();

        let backup = backup_file(&path).unwrap();
        assert_eq!(backup, dir.path().join("photo.jpg.bak"));
        assert_eq!(fs::read(&backup).unwrap(), b"data");
    }

    #[test]
    fn backup_does_not_overwrite_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        fs::write(&path, b"new").unwrap();
        fs::write(dir.path().join("photo.jpg.bak"), b"old").unwrap();

        let backup = backup_file(&path).unwrap();
        assert_eq!(fs::read(&backup).unwrap(), b"old");
    }

    // ── strip_options ────────────────────────────────────────────────

    #[test]
    fn strip_options_from_config() {
        let mut config = Config::default();
        config.strip.lossless = true;
        config.strip.jpeg_quality = 80;
        config.strip.correct_orientation = false;
        config.strip.keep = vec![
            "make".to_string(),
            "bogus".to_string(),
            "make".to_string(),
            "model".to_string(),
        ];

        let options = strip_options(&config);
        assert_eq!(options.mode, StripMode::Lossless);
        assert_eq!(options.jpeg_quality, 80);
        assert!(!options.correct_orientation);
        assert_eq!(options.keep, vec![KeepField::Make, KeepField::Model]);
    }

    // ── process_image ────────────────────────────────────────────────

    #[test]
    fn process_image_view_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.png");
        let img = image::ImageBuffer::from_fn(10, 8, |_, _| image::Rgb([1u8, 2, 3]));
        img.save(&path).unwrap();

        let result = process_image(&path, &Config::default(), false);
        assert!(result.error.is_none());
        assert_eq!(result.dimensions, Some((10, 8)));
        assert!(result.metadata.is_empty());
        assert!(result.strip.is_none());
    }

    #[test]
    fn process_image_with_strip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.png");
        let img = image::ImageBuffer::from_fn(10, 8, |_, _| image::Rgb([1u8, 2, 3]));
        img.save(&path).unwrap();

        let result = process_image(&path, &Config::default(), true);
        assert!(result.error.is_none());
        let outcome = result.strip.unwrap();
        assert_eq!(outcome.output, dir.path().join("photo_clean.png"));
        assert!(outcome.output.exists());
    }

    #[test]
    fn process_image_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.png");
        let img = image::ImageBuffer::from_fn(4, 4, |_, _| image::Rgb([0u8, 0, 0]));
        img.save(&path).unwrap();

        let mut config = Config::default();
        config.output.dry_run = true;

        let result = process_image(&path, &config, true);
        assert!(result.error.is_none());
        assert!(result.strip.is_none());
        assert!(!dir.path().join("photo_clean.png").exists());
    }

    #[test]
    fn process_image_oversized_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.jpg");
        fs::write(&path, vec![0u8; 2 * 1024 * 1024]).unwrap();

        let mut config = Config::default();
        config.limits.max_file_size_mb = 1;

        let result = process_image(&path, &config, false);
        assert!(result.error.is_some());
    }

    #[test]
    fn process_image_garbage_file_reports_error_on_strip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.jpg");
        fs::write(&path, b"not a jpeg").unwrap();

        let result = process_image(&path, &Config::default(), true);
        assert!(result.error.is_some());
    }
}
