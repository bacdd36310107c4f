//! # cinelut
//!
//! Loading of 3D color look-up tables from the common textual formats into
//! one canonical in-memory layout.
//!
//! Color-grading and video pipelines exchange RGB->RGB transforms as
//! regular-grid "cube" files, in a handful of mutually incompatible
//! dialects. This crate parses all of them into a single [`Lut3D`]: a flat
//! `size³` table of [`Rgb`] samples plus a per-channel post-lookup scale
//! and, for sources that carry a nonlinear input transfer curve, a
//! fixed-resolution [`PreLut`]. An interpolation engine consuming the
//! result never has to know which dialect a table came from.
//!
//! # Supported Formats
//!
//! - `.dat` - DaVinci, bare float triples with an optional size directive
//! - `.cube` - Iridas/Adobe/Resolve
//! - `.3dl` - Autodesk, fixed 17-point 12-bit grid
//! - `.m3d` - Pandora MGA
//! - `.csp` - Rising Sun Research cineSpace, with shaper-curve prelut
//!
//! # Usage
//!
//! ```rust
//! use cinelut::{Format, Lut3D};
//!
//! // Identity table when no source is available.
//! let lut = Lut3D::identity(33)?;
//! assert_eq!(lut.entry_count(), 33 * 33 * 33);
//!
//! // Parse an in-memory source with an explicit format tag.
//! let src = "LUT_3D_SIZE 2\n0 0 0\n1 0 0\n0 1 0\n1 1 0\n0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
//! let lut = Lut3D::from_source(Format::from_tag("cube")?, src)?;
//! assert_eq!(lut.size, 2);
//! # Ok::<(), cinelut::LutError>(())
//! ```
//!
//! Loading is strict: the first malformed line aborts with a [`LutError`]
//! and the context is left empty. Falling back to an identity mapping on
//! failure is an application policy, not something this crate decides.
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod csp;
mod cube;
mod dat;
mod error;
mod format;
mod lut3d;
mod pandora;
mod prelut;
mod reader;
mod threedl;

pub use error::{LutError, LutResult};
pub use format::Format;
pub use lut3d::{Lut3D, MAX_SIZE, MIN_SIZE, Rgb};
pub use prelut::{PRELUT_SIZE, PreLut};
