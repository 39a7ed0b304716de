//! Dictionary of known EXIF tags: display label, category, and icon.

use std::fmt;

// Tag codes with special handling elsewhere in the crate.
pub const TAG_ORIENTATION: u16 = 0x0112;
pub const TAG_FLASH: u16 = 0x9209;
pub const TAG_EXPOSURE_TIME: u16 = 0x829a;
pub const TAG_FOCAL_LENGTH: u16 = 0x920a;
pub const TAG_GPS_LATITUDE: u16 = 0x0002;
pub const TAG_GPS_LONGITUDE: u16 = 0x0004;

/// Metadata category, in the order sections are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Camera,
    Image,
    Location,
    Technical,
    File,
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Camera,
        Category::Image,
        Category::Location,
        Category::Technical,
        Category::File,
        Category::Other,
    ];

    /// Human-readable section title.
    pub fn title(self) -> &'static str {
        match self {
            Category::Camera => "Camera Information",
            Category::Image => "Image Details",
            Category::Location => "Location Data",
            Category::Technical => "Technical Data",
            Category::File => "File Information",
            Category::Other => "Other",
        }
    }

    /// Section icon.
    pub fn icon(self) -> &'static str {
        match self {
            Category::Camera => "📷",
            Category::Image => "🖼️",
            Category::Location => "📍",
            Category::Technical => "⚙️",
            Category::File => "📁",
            Category::Other => "📋",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Display information for a known EXIF tag.
#[derive(Debug, Clone, Copy)]
pub struct TagInfo {
    /// Raw EXIF tag code (GPS tags use their GPS IFD codes).
    pub code: u16,
    /// Canonical tag name.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub category: Category,
    pub icon: &'static str,
}

const fn tag(
    code: u16,
    name: &'static str,
    label: &'static str,
    category: Category,
    icon: &'static str,
) -> TagInfo {
    TagInfo {
        code,
        name,
        label,
        category,
        icon,
    }
}

/// Known EXIF tags, grouped by category.
const KNOWN_TAGS: &[TagInfo] = &[
    // Camera Information
    tag(0x010f, "Make", "Camera Make", Category::Camera, "📷"),
    tag(0x0110, "Model", "Camera Model", Category::Camera, "📷"),
    tag(0x0131, "Software", "Software", Category::Camera, "💻"),
    tag(0x013b, "Artist", "Artist", Category::Camera, "👤"),
    tag(0x8298, "Copyright", "Copyright", Category::Camera, "©️"),
    tag(0xa420, "ImageUniqueID", "Image Unique ID", Category::Camera, "🆔"),
    // Image Details
    tag(0x0132, "DateTime", "Date & Time", Category::Image, "📅"),
    tag(0x9003, "DateTimeOriginal", "Original Date", Category::Image, "📅"),
    tag(0x9004, "DateTimeDigitized", "Digitized Date", Category::Image, "📅"),
    tag(0x010e, "ImageDescription", "Description", Category::Image, "📝"),
    tag(0x0112, "Orientation", "Orientation", Category::Image, "🔄"),
    tag(0x011a, "XResolution", "X Resolution", Category::Image, "📐"),
    tag(0x011b, "YResolution", "Y Resolution", Category::Image, "📐"),
    tag(0x0128, "ResolutionUnit", "Resolution Unit", Category::Image, "📐"),
    tag(0xa001, "ColorSpace", "Color Space", Category::Image, "🎨"),
    tag(0x0213, "YCbCrPositioning", "YCbCr Positioning", Category::Image, "🎨"),
    // Location Data
    tag(0x0002, "GPSLatitude", "GPS Latitude", Category::Location, "📍"),
    tag(0x0004, "GPSLongitude", "GPS Longitude", Category::Location, "📍"),
    tag(0x0006, "GPSAltitude", "GPS Altitude", Category::Location, "🏔️"),
    tag(0x0007, "GPSTimeStamp", "GPS Time", Category::Location, "⏰"),
    tag(0x001d, "GPSDateStamp", "GPS Date", Category::Location, "📅"),
    tag(0x001b, "GPSProcessingMethod", "GPS Processing Method", Category::Location, "🔧"),
    tag(0x0000, "GPSVersionID", "GPS Version ID", Category::Location, "🔧"),
    // Technical Data
    tag(0x829a, "ExposureTime", "Exposure Time", Category::Technical, "⏱️"),
    tag(0x829d, "FNumber", "F-Number", Category::Technical, "🔍"),
    tag(0x8827, "ISOSpeedRatings", "ISO Speed", Category::Technical, "📸"),
    tag(0x920a, "FocalLength", "Focal Length", Category::Technical, "🔭"),
    tag(0x9209, "Flash", "Flash", Category::Technical, "⚡"),
    tag(0xa403, "WhiteBalance", "White Balance", Category::Technical, "⚖️"),
    tag(0x9207, "MeteringMode", "Metering Mode", Category::Technical, "📊"),
    tag(0xa402, "ExposureMode", "Exposure Mode", Category::Technical, "📸"),
    tag(0x8822, "ExposureProgram", "Exposure Program", Category::Technical, "📸"),
    tag(0x9204, "ExposureBiasValue", "Exposure Bias", Category::Technical, "📊"),
    tag(0x9205, "MaxApertureValue", "Max Aperture", Category::Technical, "🔍"),
    tag(0x9206, "SubjectDistance", "Subject Distance", Category::Technical, "📏"),
    tag(0xa432, "LensSpecification", "Lens Specification", Category::Technical, "🔭"),
    tag(0xa433, "LensMake", "Lens Make", Category::Technical, "🔭"),
    tag(0xa434, "LensModel", "Lens Model", Category::Technical, "🔭"),
    tag(0x9201, "ShutterSpeedValue", "Shutter Speed Value", Category::Technical, "⏱️"),
    tag(0x9202, "ApertureValue", "Aperture Value", Category::Technical, "🔍"),
    tag(0x9203, "BrightnessValue", "Brightness Value", Category::Technical, "💡"),
    tag(0x9208, "LightSource", "Light Source", Category::Technical, "💡"),
    tag(0xa301, "SceneType", "Scene Type", Category::Technical, "🎬"),
    tag(0xa401, "CustomRendered", "Custom Rendered", Category::Technical, "🎨"),
    tag(0xa404, "DigitalZoomRatio", "Digital Zoom Ratio", Category::Technical, "🔍"),
    tag(0xa405, "FocalLengthIn35mmFilm", "Focal Length (35mm)", Category::Technical, "🎞️"),
    tag(0xa406, "SceneCaptureType", "Scene Capture Type", Category::Technical, "📸"),
    tag(0xa407, "GainControl", "Gain Control", Category::Technical, "📊"),
    tag(0xa408, "Contrast", "Contrast", Category::Technical, "📊"),
    tag(0xa409, "Saturation", "Saturation", Category::Technical, "🎨"),
    tag(0xa40a, "Sharpness", "Sharpness", Category::Technical, "🔪"),
    tag(0xa40c, "SubjectDistanceRange", "Subject Distance Range", Category::Technical, "📏"),
    // File Information
    tag(0xa300, "FileSource", "File Source", Category::File, "📁"),
    tag(0x9101, "ComponentsConfiguration", "Components Configuration", Category::File, "⚙️"),
    tag(0x0103, "Compression", "Compression", Category::File, "🗜️"),
    tag(0x0201, "JPEGInterchangeFormat", "JPEG Interchange Format", Category::File, "🖼️"),
    tag(0x0202, "JPEGInterchangeFormatLength", "JPEG Interchange Format Length", Category::File, "📏"),
];

/// Look up display information for a tag code. Unknown tags return `None`
/// and are rendered under [`Category::Other`].
pub fn lookup(code: u16) -> Option<&'static TagInfo> {
    KNOWN_TAGS.iter().find(|t| t.code == code)
}

/// Look up display information by canonical tag name.
pub fn lookup_name(name: &str) -> Option<&'static TagInfo> {
    KNOWN_TAGS.iter().find(|t| t.name == name)
}
