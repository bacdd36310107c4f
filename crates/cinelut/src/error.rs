//! LUT loading error types.

use thiserror::Error;

/// Result type for LUT loading operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while loading a 3D LUT.
///
/// Parsing is strict: the first malformed line aborts the load. There is
/// no partial recovery, since a half-read color table is worse than none.
#[derive(Debug, Error)]
pub enum LutError {
    /// Cube size outside the supported `2..=256` range.
    #[error("too large or invalid 3D LUT size: {0}")]
    SizeOutOfRange(usize),

    /// Buffer allocation failed.
    #[error("failed to allocate {0} LUT samples")]
    Allocation(usize),

    /// Wrong token count, bad numeric literal, or unexpected end of input.
    #[error("malformed LUT data: {0}")]
    MalformedData(String),

    /// The source does not carry the expected format signature.
    #[error("signature mismatch: {0}")]
    SignatureMismatch(String),

    /// A channel declares more than one shaper curve.
    #[error("channel declares multiple shaper curves")]
    DuplicateCurve,

    /// Shaper curve input samples are not non-decreasing.
    #[error("non-increasing shaper curve")]
    NonMonotonicCurve,

    /// The three per-channel cube sizes differ.
    #[error("unsupported size combination: {r}x{g}x{b}")]
    SizeMismatch {
        /// Red channel size.
        r: usize,
        /// Green channel size.
        g: usize,
        /// Blue channel size.
        b: usize,
    },

    /// Recognized but deliberately unimplemented variant.
    #[error("unsupported LUT variant: {0}")]
    Unsupported(String),

    /// Format tag or file extension outside the supported set.
    #[error("unrecognized LUT format: {0}")]
    UnrecognizedFormat(String),

    /// Parser finished without producing any table entries.
    #[error("3D LUT is empty")]
    EmptyResult,

    /// Source file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
