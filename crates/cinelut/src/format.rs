//! Source format selection.

use std::path::Path;

use crate::error::{LutError, LutResult};

/// The supported 3D LUT file formats.
///
/// Selection is a closed-set match: a tag or extension outside this set is
/// an error, never a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// DaVinci `.dat`: bare float triples with an optional `3DLUTSIZE`
    /// directive.
    Dat,
    /// Iridas/Adobe/Resolve `.cube`.
    Cube,
    /// Autodesk `.3dl`: fixed 17-point grid of 12-bit integers.
    ThreeDl,
    /// Pandora `.m3d`/MGA.
    M3d,
    /// Rising Sun Research cineSpace `.csp`.
    Csp,
}

impl Format {
    /// Matches a format tag or bare file extension, case-insensitively.
    pub fn from_tag(tag: &str) -> LutResult<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "dat" => Ok(Format::Dat),
            "cube" => Ok(Format::Cube),
            "3dl" => Ok(Format::ThreeDl),
            "m3d" => Ok(Format::M3d),
            "csp" => Ok(Format::Csp),
            _ => Err(LutError::UnrecognizedFormat(tag.to_string())),
        }
    }

    /// Derives the format from a file name's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> LutResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| LutError::UnrecognizedFormat(path.display().to_string()))?;
        Self::from_tag(ext)
    }

    /// Canonical lowercase tag for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Dat => "dat",
            Format::Cube => "cube",
            Format::ThreeDl => "3dl",
            Format::M3d => "m3d",
            Format::Csp => "csp",
        }
    }
}
