//! DaVinci `.dat` 3D LUT format.
//!
//! The simplest of the dialects: one float triple per line in outer-major
//! order, with comments and blank lines allowed anywhere. An optional
//! leading directive overrides the grid size:
//!
//! ```text
//! # comment
//! 3DLUTSIZE 33
//! 0.0 0.0 0.0
//! ...
//! ```
//!
//! Without the directive the grid is assumed to be 33 points per axis, the
//! de-facto convention of the tools that emit these files. No domain is
//! declared, so the scale stays at one.

use crate::error::LutResult;
use crate::lut3d::{Lut3D, Rgb, offset_k_major};
use crate::reader::{LutReader, first_int, parse_fields};

/// Grid size assumed when no `3DLUTSIZE` directive is present.
const DEFAULT_SIZE: usize = 33;

pub(crate) fn parse(lut3d: &mut Lut3D, reader: &mut LutReader<'_>) -> LutResult<()> {
    let mut size = DEFAULT_SIZE;

    let mut line = reader.require_content_line()?;
    if let Some(rest) = line.strip_prefix("3DLUTSIZE") {
        size = first_int(rest)?;
        line = reader.require_content_line()?;
    }

    lut3d.allocate(size, false)?;
    let size2 = lut3d.size2;

    for k in 0..size {
        for j in 0..size {
            for i in 0..size {
                // The first data line is already in hand.
                if k != 0 || j != 0 || i != 0 {
                    line = reader.require_content_line()?;
                }
                let [r, g, b] = parse_fields::<f32, 3>(line)?;
                lut3d.data[offset_k_major(size, size2, k, j, i)] = Rgb::new(r, g, b);
            }
        }
    }
    Ok(())
}
