//! Pandora `.m3d`/MGA 3D LUT format.
//!
//! ```text
//! in 4096
//! out 4096
//! values red green blue
//! 0.0 0.0 0.0
//! ...
//! ```
//!
//! The header scan stops at the `values` directive, which names the column
//! order of the data that follows (any permutation of `r`/`g`/`b` words).
//! `in` is the total entry count; the grid size is the smallest integer
//! whose cube reaches it. `out` is the code range of the stored values,
//! which are normalized by `1/(out-1)` at store time. Data lines are read
//! verbatim, with no comment skipping.

use crate::error::{LutError, LutResult};
use crate::lut3d::{Lut3D, MAX_SIZE, Rgb, offset_k_major};
use crate::reader::{LutReader, first_int, parse_fields};

/// Largest accepted `in`/`out` declaration: a full-range cube.
const MAX_POINTS: i64 = (MAX_SIZE * MAX_SIZE * MAX_SIZE) as i64;

pub(crate) fn parse(lut3d: &mut Lut3D, reader: &mut LutReader<'_>) -> LutResult<()> {
    let mut in_points: i64 = -1;
    let mut out_points: i64 = -1;
    let mut rgb_map = [0usize, 1, 2];

    while let Some(line) = reader.next_line() {
        if let Some(rest) = line.strip_prefix("values") {
            for (slot, word) in rest.split_whitespace().take(3).enumerate() {
                match word.chars().next() {
                    Some('r') => rgb_map[slot] = 0,
                    Some('g') => rgb_map[slot] = 1,
                    Some('b') => rgb_map[slot] = 2,
                    _ => {}
                }
            }
            break;
        } else if let Some(rest) = line.strip_prefix("in") {
            in_points = first_int(rest)?;
        } else if let Some(rest) = line.strip_prefix("out") {
            out_points = first_int(rest)?;
        }
    }

    if in_points == -1 || out_points == -1 {
        return Err(LutError::MalformedData("in and out must be defined".into()));
    }
    if in_points < 2 || out_points < 2 || in_points > MAX_POINTS || out_points > MAX_POINTS {
        return Err(LutError::MalformedData(format!(
            "invalid in ({in_points}) or out ({out_points})"
        )));
    }

    let mut size = 1usize;
    while ((size * size * size) as i64) < in_points {
        size += 1;
    }

    lut3d.allocate(size, false)?;
    let size2 = lut3d.size2;
    let scale = 1.0 / (out_points - 1) as f32;

    for k in 0..size {
        for j in 0..size {
            for i in 0..size {
                let line = reader.require_line()?;
                let val = parse_fields::<f32, 3>(line)?;
                lut3d.data[offset_k_major(size, size2, k, j, i)] = Rgb::new(
                    val[rgb_map[0]] * scale,
                    val[rgb_map[1]] * scale,
                    val[rgb_map[2]] * scale,
                );
            }
        }
    }
    Ok(())
}
