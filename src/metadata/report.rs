use super::dictionary::{self, Category};
use super::format;
use super::reader::Metadata;

/// One formatted row in a report section.
#[derive(Debug, Clone)]
pub struct ReportItem {
    /// Canonical tag name.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    pub icon: &'static str,
    /// Display-formatted value.
    pub value: String,
}

/// One category section of the report.
#[derive(Debug, Clone)]
pub struct ReportSection {
    pub category: Category,
    pub items: Vec<ReportItem>,
}

/// Categorized, display-formatted view of one image's metadata.
///
/// Sections appear in dictionary category order; empty categories are
/// omitted. Every extracted tag lands in exactly one section; unknown tags
/// fall into [`Category::Other`] with their raw name as label.
///
/// # Example
///
/// ```rust,no_run
/// use exif_scrub::metadata::{read_metadata, MetadataReport};
///
/// # fn main() -> anyhow::Result<()> {
/// let metadata = read_metadata("photo.jpg".as_ref())?;
/// let report = MetadataReport::build(&metadata);
///
/// for line in &report.summary {
///     println!("{line}");
/// }
/// for section in &report.sections {
///     println!("{} {} ({} items)", section.category.icon(), section.category, section.items.len());
///     for item in &section.items {
///         println!("  {} {}: {}", item.icon, item.label, item.value);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetadataReport {
    /// Compact digest lines (camera, date, GPS marker, exposure triple).
    pub summary: Vec<String>,
    /// Non-empty category sections in display order.
    pub sections: Vec<ReportSection>,
}

impl MetadataReport {
    /// Build the categorized report for the given metadata.
    pub fn build(metadata: &Metadata) -> Self {
        let mut sections: Vec<ReportSection> = Category::ALL
            .iter()
            .map(|&category| ReportSection {
                category,
                items: Vec::new(),
            })
            .collect();

        for entry in &metadata.entries {
            let (label, icon, category) = match dictionary::lookup(entry.code) {
                Some(info) => (info.label.to_string(), info.icon, info.category),
                None => (entry.name.clone(), Category::Other.icon(), Category::Other),
            };

            let item = ReportItem {
                name: entry.name.clone(),
                label,
                icon,
                value: format::format_value(entry, metadata),
            };
            sections[section_index(category)].items.push(item);
        }

        // A location section gets a map link when both coordinates are known
        if let Some(ref gps) = metadata.gps {
            let location = &mut sections[section_index(Category::Location)];
            if !location.items.is_empty() {
                location.items.push(ReportItem {
                    name: "MapLink".to_string(),
                    label: "View on Map".to_string(),
                    icon: "📍",
                    value: format::maps_url(gps),
                });
            }
        }

        sections.retain(|s| !s.items.is_empty());

        MetadataReport {
            summary: build_summary(metadata),
            sections,
        }
    }

    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

fn section_index(category: Category) -> usize {
    match category {
        Category::Camera => 0,
        Category::Image => 1,
        Category::Location => 2,
        Category::Technical => 3,
        Category::File => 4,
        Category::Other => 5,
    }
}

/// Compact digest: camera, capture date, GPS marker, exposure triple.
fn build_summary(metadata: &Metadata) -> Vec<String> {
    let mut summary = Vec::new();

    if let (Some(make), Some(model)) = (metadata.get("Make"), metadata.get("Model")) {
        summary.push(format!("📷 {make} {model}"));
    }

    if let Some(date) = metadata.get("DateTimeOriginal") {
        summary.push(format!("📅 {}", format::format_capture_date(date)));
    }

    if metadata.has_gps() {
        summary.push("📍 GPS Location Available".to_string());
    }

    if let (Some(exposure), Some(f_number), Some(iso)) = (
        metadata.get("ExposureTime"),
        metadata.get("FNumber"),
        metadata.get("ISOSpeedRatings"),
    ) {
        summary.push(format!(
            "⚙️ {}, f/{}, ISO {}",
            format::format_exposure(exposure),
            format::format_aperture(f_number),
            iso
        ));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::reader::{DmsCoordinate, GpsPosition, TagEntry};

    fn entry(code: u16, name: &str, value: &str) -> TagEntry {
        TagEntry {
            code,
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn sample_metadata() -> Metadata {
        Metadata {
            entries: vec![
                entry(0x010f, "Make", "Canon"),
                entry(0x0110, "Model", "EOS R5"),
                entry(0x9003, "DateTimeOriginal", "2023:07:09 20:36:33"),
                entry(0x0112, "Orientation", "6"),
                entry(0x829a, "ExposureTime", "1/125"),
                entry(0x829d, "FNumber", "175/100 (1.7500)"),
                entry(0x8827, "ISOSpeedRatings", "400"),
                entry(0x0002, "GPSLatitude", "40/1 42/1 516/10"),
                entry(0x0004, "GPSLongitude", "74/1 0/1 215/10"),
                entry(0xbeef, "Tag 0xBEEF", "opaque"),
            ],
            orientation: Some(6),
            gps: Some(GpsPosition {
                latitude: DmsCoordinate {
                    degrees: 40.0,
                    minutes: 42.0,
                    seconds: 51.6,
                    reference: 'N',
                },
                longitude: DmsCoordinate {
                    degrees: 74.0,
                    minutes: 0.0,
                    seconds: 21.5,
                    reference: 'W',
                },
            }),
        }
    }

    // ── sections ─────────────────────────────────────────────────────

    #[test]
    fn sections_follow_category_order() {
        let report = MetadataReport::build(&sample_metadata());
        let categories: Vec<Category> = report.sections.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Camera,
                Category::Image,
                Category::Location,
                Category::Technical,
                Category::Other,
            ]
        );
    }

    #[test]
    fn empty_categories_are_omitted() {
        let metadata = Metadata {
            entries: vec![entry(0x010f, "Make", "Canon")],
            ..Default::default()
        };
        let report = MetadataReport::build(&metadata);
        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].category, Category::Camera);
    }

    #[test]
    fn every_entry_lands_in_a_section() {
        let metadata = sample_metadata();
        let report = MetadataReport::build(&metadata);
        // +1 for the map link row
        assert_eq!(report.item_count(), metadata.entries.len() + 1);
    }

    #[test]
    fn unknown_tags_fall_into_other() {
        let report = MetadataReport::build(&sample_metadata());
        let other = report
            .sections
            .iter()
            .find(|s| s.category == Category::Other)
            .unwrap();
        assert_eq!(other.items.len(), 1);
        assert_eq!(other.items[0].label, "Tag 0xBEEF");
    }

    #[test]
    fn values_are_formatted() {
        let report = MetadataReport::build(&sample_metadata());
        let image = report
            .sections
            .iter()
            .find(|s| s.category == Category::Image)
            .unwrap();
        let orientation = image.items.iter().find(|i| i.name == "Orientation").unwrap();
        assert_eq!(orientation.value, "Rotate 90° CW");
        assert_eq!(orientation.label, "Orientation");
    }

    #[test]
    fn map_link_added_when_gps_present() {
        let report = MetadataReport::build(&sample_metadata());
        let location = report
            .sections
            .iter()
            .find(|s| s.category == Category::Location)
            .unwrap();
        let link = location.items.last().unwrap();
        assert_eq!(link.name, "MapLink");
        assert!(link.value.starts_with("https://www.google.com/maps?q="));
    }

    #[test]
    fn no_map_link_without_gps() {
        let metadata = Metadata {
            entries: vec![entry(0x010f, "Make", "Canon")],
            ..Default::default()
        };
        let report = MetadataReport::build(&metadata);
        assert!(report.sections.iter().all(|s| s.category != Category::Location));
    }

    // ── summary ──────────────────────────────────────────────────────

    #[test]
    fn summary_lines() {
        let report = MetadataReport::build(&sample_metadata());
        assert_eq!(
            report.summary,
            vec![
                "📷 Canon EOS R5",
                "📅 2023-07-09",
                "📍 GPS Location Available",
                "⚙️ 1/125 s, f/1.75, ISO 400",
            ]
        );
    }

    #[test]
    fn summary_empty_for_empty_metadata() {
        let report = MetadataReport::build(&Metadata::default());
        assert!(report.summary.is_empty());
        assert!(report.sections.is_empty());
    }

    #[test]
    fn summary_skips_partial_camera_info() {
        let metadata = Metadata {
            entries: vec![entry(0x010f, "Make", "Canon")],
            ..Default::default()
        };
        let report = MetadataReport::build(&metadata);
        assert!(report.summary.is_empty());
    }
}
