use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for the exif-scrub library.
///
/// Controls input limits, how images are stripped, and output behavior
/// (dry run, backups).
///
/// # Loading
///
/// ```rust,no_run
/// use exif_scrub::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.strip.jpeg_quality = 85;
/// config.strip.keep = vec!["make".into(), "model".into()];
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input validation limits.
    pub limits: Limits,
    /// How clean images are produced.
    pub strip: StripConfig,
    /// Output behavior (dry run, backups, logging).
    pub output: OutputConfig,
}

/// Input validation limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum input file size in megabytes. `0` disables the check.
    pub max_file_size_mb: u64,
}

/// Controls how clean images are produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripConfig {
    /// JPEG re-encode quality (1-100).
    pub jpeg_quality: u8,
    /// Bake the EXIF orientation into the pixels so the clean image still
    /// displays upright.
    pub correct_orientation: bool,
    /// Drop the EXIF segment without re-encoding pixels (JPEG/PNG/WebP only).
    pub lossless: bool,
    /// Suffix appended to the file stem of clean images.
    pub output_suffix: String,
    /// Fields written back into the clean image after stripping
    /// (e.g. `"make"`, `"model"`, `"date-taken"`).
    pub keep: Vec<String>,
}

/// Output and behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// If `true`, preview what would be written without modifying any files.
    pub dry_run: bool,
    /// If `true`, create a `.bak` copy of the original before writing the
    /// clean image.
    pub backup_originals: bool,
    /// Optional path to a log file.
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: Limits {
                max_file_size_mb: 10,
            },
            strip: StripConfig {
                jpeg_quality: crate::strip::DEFAULT_JPEG_QUALITY,
                correct_orientation: true,
                lossless: false,
                output_suffix: "_clean".to_string(),
                keep: Vec::new(),
            },
            output: OutputConfig {
                dry_run: false,
                backup_originals: false,
                log_file: None,
            },
        }
    }
}

impl Config {
    /// Resolve the config file path — same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }
}
