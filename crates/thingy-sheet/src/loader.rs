use std::path::Path;

use crate::error::SheetError;
use crate::raw::parse_sheet;
use crate::types::RawSheet;

/// Location the embedded default sheet pretends to live at.
pub const DEFAULT_SHEET_LOCATION: &str = "assets/sprites/Thingy.json";

const DEFAULT_SHEET_JSON: &[u8] = include_bytes!("../../../assets/sprites/Thingy.json");
const DEFAULT_SHEET_PNG: &[u8] = include_bytes!("../../../assets/sprites/Thingy.png");

/// Where sheet bytes come from.
///
/// The shell decides how a location is fetched (disk, network, embedded);
/// the loader only parses what it is handed. A failed fetch is final for that
/// attempt; retrying means calling [`load_sheet`] again.
pub trait SheetSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, SheetError>;
}

/// Reads sheets from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSource;

impl SheetSource for FileSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, SheetError> {
        std::fs::read(Path::new(location)).map_err(|e| SheetError::Io {
            location: location.to_string(),
            message: e.to_string(),
        })
    }
}

/// Fetch and parse the sheet at `location`.
///
/// On success `image` has been resolved relative to the sheet's directory.
pub fn load_sheet(source: &dyn SheetSource, location: &str) -> Result<RawSheet, SheetError> {
    let bytes = source.fetch(location)?;
    load_from_bytes(&bytes, location)
}

/// Parse sheet JSON that was fetched from `location`.
pub fn load_from_bytes(json: &[u8], location: &str) -> Result<RawSheet, SheetError> {
    let mut sheet = parse_sheet(json)?;
    sheet.image = relative_image_path(location, &sheet.image);
    tracing::info!(
        location,
        image = %sheet.image,
        frames = sheet.frames.len(),
        tags = sheet.tags.len(),
        "loaded sprite sheet"
    );
    Ok(sheet)
}

/// The Thingy sheet compiled into the binary.
pub fn default_sheet() -> Result<RawSheet, SheetError> {
    load_from_bytes(DEFAULT_SHEET_JSON, DEFAULT_SHEET_LOCATION)
}

/// PNG bytes of the embedded default sheet image.
pub fn default_sheet_png() -> &'static [u8] {
    DEFAULT_SHEET_PNG
}

/// Resolve `image` against the directory part of `sheet_location`.
///
/// `"sprites/Thingy.json"` + `"Thingy.png"` gives `"sprites/Thingy.png"`.
/// A location without a directory leaves the image path untouched.
pub fn relative_image_path(sheet_location: &str, image: &str) -> String {
    match sheet_location.rfind('/') {
        Some(idx) => format!("{}{}", &sheet_location[..=idx], image),
        None => image.to_string(),
    }
}
