//! Metadata export: JSON, CSV, and plain-text renderings.
//!
//! Exports carry the raw extracted values (not the display-formatted ones)
//! in extraction order, so a dump can be diffed against other tools.

use anyhow::Result;

use crate::metadata::Metadata;

/// Export document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
}

impl ExportFormat {
    /// Default file name for this format.
    pub fn default_file_name(self) -> &'static str {
        match self {
            ExportFormat::Json => "exif-data.json",
            ExportFormat::Csv => "exif-data.csv",
            ExportFormat::Text => "exif-data.txt",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => anyhow::bail!("unknown export format {s:?} (expected json, csv, or text)"),
        }
    }
}

/// Render the metadata in the given format.
pub fn render(metadata: &Metadata, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => render_json(metadata),
        ExportFormat::Csv => Ok(render_csv(metadata)),
        ExportFormat::Text => Ok(render_text(metadata)),
    }
}

/// Pretty-printed JSON object of tag name → value, in extraction order.
fn render_json(metadata: &Metadata) -> Result<String> {
    let mut map = serde_json::Map::new();
    for entry in &metadata.entries {
        map.insert(
            entry.name.clone(),
            serde_json::Value::String(entry.value.clone()),
        );
    }
    Ok(serde_json::to_string_pretty(&serde_json::Value::Object(
        map,
    ))?)
}

/// `Field,Value` rows with RFC 4180 quoting.
fn render_csv(metadata: &Metadata) -> String {
    let mut out = String::from("Field,Value\n");
    for entry in &metadata.entries {
        out.push_str(&csv_escape(&entry.name));
        out.push(',');
        out.push_str(&csv_escape(&entry.value));
        out.push('\n');
    }
    out
}

fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// `Name: value` lines, the clipboard form.
fn render_text(metadata: &Metadata) -> String {
    metadata
        .entries
        .iter()
        .map(|entry| format!("{}: {}", entry.name, entry.value))
        .collect::<Vec<_>>()
        .join("\n")
}
