use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use exif_scrub::config;
use exif_scrub::export::{self, ExportFormat};
use exif_scrub::metadata::{format as value_format, MetadataReport};
use exif_scrub::pipeline::{self, ProcessResult};
use exif_scrub::strip::KeepField;

#[derive(Parser, Debug)]
#[command(
    name = "exif-scrub",
    version,
    about = "View, categorize, and strip EXIF metadata from images — offline, privacy-first"
)]
struct Cli {
    /// Image files or directories to inspect
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Write a metadata-free copy of each image
    #[arg(long)]
    strip: bool,

    /// Drop the EXIF segment without re-encoding pixels (JPEG/PNG/WebP)
    #[arg(long, requires = "strip")]
    lossless: bool,

    /// Comma-separated fields to preserve in the clean image
    /// (make, model, software, artist, copyright, description, date-taken, lens)
    #[arg(long, value_name = "FIELDS", value_delimiter = ',', requires = "strip")]
    keep: Vec<String>,

    /// JPEG re-encode quality (1-100)
    #[arg(long, value_name = "N")]
    quality: Option<u8>,

    /// Do not bake the EXIF orientation into the re-encoded pixels
    #[arg(long = "no-orientation-fix")]
    no_orientation_fix: bool,

    /// Export extracted metadata instead of printing it (json, csv, text)
    #[arg(long, value_name = "FORMAT")]
    export: Option<String>,

    /// Export destination; '-' writes to stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Preview actions without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    // Validate inputs
    if cli.paths.is_empty() {
        anyhow::bail!("No input files or directories specified. Use --help for usage.");
    }

    // Load config and apply CLI overrides
    let mut config = config::Config::load(cli.config.as_deref())?;
    if cli.dry_run {
        config.output.dry_run = true;
    }
    if let Some(quality) = cli.quality {
        if !(1..=100).contains(&quality) {
            anyhow::bail!("--quality must be between 1 and 100");
        }
        config.strip.jpeg_quality = quality;
    }
    if cli.no_orientation_fix {
        config.strip.correct_orientation = false;
    }
    if cli.lossless {
        config.strip.lossless = true;
    }
    if !cli.keep.is_empty() {
        // Reject unknown field names up front
        for token in &cli.keep {
            token.parse::<KeepField>()?;
        }
        config.strip.keep = cli.keep.clone();
    }

    let export_format = match cli.export.as_deref() {
        Some(s) => Some(s.parse::<ExportFormat>()?),
        None => None,
    };

    // Collect images
    let images = pipeline::collect_images(&cli.paths);
    if images.is_empty() {
        anyhow::bail!("No supported image files found in the specified paths.");
    }

    // Handle --export
    if let Some(format) = export_format {
        return run_export(&images, format, cli.output.as_deref(), config.output.dry_run);
    }

    log::info!("Found {} image(s) to process", images.len());
    if config.output.dry_run {
        log::info!("DRY RUN — no files will be modified");
    }

    // Process each image
    let mut results = Vec::new();
    let total = images.len();

    for (i, image_path) in images.iter().enumerate() {
        log::info!(
            "[{}/{}] Processing: {}",
            i + 1,
            total,
            image_path.display()
        );

        let result = pipeline::process_image(image_path, &config, cli.strip);

        if let Some(ref err) = result.error {
            log::error!("  Error: {err}");
        } else if !cli.json {
            if cli.strip {
                print_strip_outcome(&result);
            } else {
                print_metadata_view(&result);
            }
        }

        results.push(result);
    }

    // JSON output
    if cli.json {
        let json_results: Vec<serde_json::Value> = results.iter().map(result_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&json_results)?);
    }

    // Summary
    let success = results.iter().filter(|r| r.error.is_none()).count();
    let failed = results.iter().filter(|r| r.error.is_some()).count();
    log::info!("Done: {success} succeeded, {failed} failed out of {total} images");

    Ok(())
}

/// Export metadata for each image in the requested format.
fn run_export(
    images: &[PathBuf],
    format: ExportFormat,
    output: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let to_stdout = output == Some(Path::new("-"));

    if images.len() > 1 && !to_stdout {
        anyhow::bail!("Exporting multiple images requires --output - (stdout)");
    }

    for image_path in images {
        let metadata = exif_scrub::metadata::read_metadata(image_path)?;
        let document = export::render(&metadata, format)?;

        if to_stdout {
            if images.len() > 1 {
                println!("# {}", image_path.display());
            }
            println!("{document}");
            continue;
        }

        let destination = match output {
            Some(p) => p.to_path_buf(),
            None => PathBuf::from(format.default_file_name()),
        };

        if dry_run {
            log::info!("DRY RUN — would write {}", destination.display());
            continue;
        }

        std::fs::write(&destination, document)?;
        log::info!("Exported {} to {}", image_path.display(), destination.display());
    }

    Ok(())
}

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Max width for the value column before wrapping.
const VAL_WIDTH: usize = 46;
/// Indent for continuation lines (label column width + " : " = 25 chars + 2 leading spaces).
const INDENT: &str = "                           ";

/// Print the categorized metadata view for one image.
fn print_metadata_view(result: &ProcessResult) {
    println!();
    println!("{BOLD}File:{RESET} {}", result.path.display());
    println!("{DIM}{}{RESET}", "═".repeat(72));

    print_row("FileSize", &value_format::format_file_size(result.file_size));
    if let Some((width, height)) = result.dimensions {
        print_row("Dimensions", &format!("{width} × {height}"));
    }
    println!();

    if result.metadata.is_empty() {
        println!("  {DIM}(no EXIF metadata found){RESET}");
        println!();
        return;
    }

    let report = MetadataReport::build(&result.metadata);

    if !report.summary.is_empty() {
        println!("  {BOLD}Summary{RESET}");
        println!("  {DIM}{}{RESET}", "─".repeat(70));
        for line in &report.summary {
            println!("  {line}");
        }
        println!();
    }

    for section in &report.sections {
        println!(
            "  {BOLD}{} {}{RESET} {DIM}({} items){RESET}",
            section.category.icon(),
            section.category,
            section.items.len()
        );
        println!("  {DIM}{}{RESET}", "─".repeat(70));
        for item in &section.items {
            print_row(&format!("{} {}", item.icon, item.label), &item.value);
        }
        println!();
    }
}

/// Print the strip outcome for one image.
fn print_strip_outcome(result: &ProcessResult) {
    let Some(ref outcome) = result.strip else {
        return;
    };

    log::info!("  Clean image: {}", outcome.output.display());
    log::info!(
        "  Size: {} -> {}",
        value_format::format_file_size(outcome.bytes_in),
        value_format::format_file_size(outcome.bytes_out)
    );
    if outcome.orientation_corrected {
        log::info!("  Orientation baked into pixels");
    }
    if !outcome.kept.is_empty() {
        log::info!("  Kept: {}", outcome.kept.join(", "));
    }

    let removed = result.metadata.entries.len();
    if removed > 0 {
        println!("  {GREEN}Removed {removed} metadata entries{RESET}");
    } else {
        println!("  {DIM}No metadata to remove{RESET}");
    }
}

/// Machine-readable result for `--json`.
fn result_to_json(result: &ProcessResult) -> serde_json::Value {
    let entries: serde_json::Map<String, serde_json::Value> = result
        .metadata
        .entries
        .iter()
        .map(|e| (e.name.clone(), serde_json::Value::String(e.value.clone())))
        .collect();

    serde_json::json!({
        "path": result.path.display().to_string(),
        "file_size": result.file_size,
        "dimensions": result.dimensions.map(|(w, h)| serde_json::json!({ "width": w, "height": h })),
        "entry_count": result.metadata.entries.len(),
        "entries": entries,
        "has_gps": result.metadata.has_gps(),
        "orientation": result.metadata.orientation,
        "strip": result.strip.as_ref().map(|o| serde_json::json!({
            "output": o.output.display().to_string(),
            "bytes_in": o.bytes_in,
            "bytes_out": o.bytes_out,
            "orientation_corrected": o.orientation_corrected,
            "kept": o.kept,
        })),
        "error": result.error,
    })
}

/// Print a single label/value row in the display table.
fn print_row(label: &str, val: &str) {
    let label_col = format!("{label:<22}");
    let lines = wrap_text(val, VAL_WIDTH);
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            println!("  {label_col} : {line}");
        } else {
            println!("  {INDENT}{line}");
        }
    }
}

/// Wrap text at word boundaries to fit within max_width.
fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in s.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(s.to_string());
    }

    lines
}
