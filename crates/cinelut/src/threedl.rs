//! Autodesk/Discreet `.3dl` 3D LUT format.
//!
//! ```text
//! 0 64 128 192 ... 1023
//! 0 0 0
//! 0 0 64
//! ...
//! ```
//!
//! The first content line is the input mesh row and is discarded; the rest
//! is a fixed 17x17x17 grid of integer triples with an implied 12-bit
//! depth, stored in outer-major line order and normalized by 4096.
//!
//! Several `.3dl` sub-dialects exist with other sizes and depths; only
//! this common one is handled.

use crate::error::LutResult;
use crate::lut3d::{Lut3D, Rgb, offset_k_major};
use crate::reader::{LutReader, parse_fields};

/// Fixed grid size of the supported dialect.
const SIZE: usize = 17;

/// Implied 12-bit integer range.
const VALUE_SCALE: f32 = 4096.0;

pub(crate) fn parse(lut3d: &mut Lut3D, reader: &mut LutReader<'_>) -> LutResult<()> {
    lut3d.allocate(SIZE, false)?;
    let size2 = lut3d.size2;

    // Input mesh row, unused.
    reader.require_content_line()?;

    for k in 0..SIZE {
        for j in 0..SIZE {
            for i in 0..SIZE {
                let line = reader.require_content_line()?;
                let [r, g, b] = parse_fields::<i32, 3>(line)?;
                lut3d.data[offset_k_major(SIZE, size2, k, j, i)] = Rgb::new(
                    r as f32 / VALUE_SCALE,
                    g as f32 / VALUE_SCALE,
                    b as f32 / VALUE_SCALE,
                );
            }
        }
    }
    Ok(())
}
