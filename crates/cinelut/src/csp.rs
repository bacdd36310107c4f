//! Rising Sun Research cineSpace `.csp` 3D LUT format.
//!
//! ```text
//! CSPLUTV100
//! 3D
//!
//! BEGIN METADATA
//! ...anything...
//! END METADATA
//!
//! 2                 <- per channel (R, G, B): point count
//! 0.0 1.0           <- input min/max   (2 points: plain domain)
//! 0.0 1.0           <- output min/max
//! ...
//! 11                <- or N > 2: a shaper curve
//! 0.0 0.1 ... 1.0   <-   N input samples  (may span lines)
//! 0.0 0.2 ... 1.0   <-   N output samples
//! ...
//! 32 32 32
//! 0.0 0.0 0.0
//! ...
//! ```
//!
//! Each channel declares either a two-point domain or a proper curve.
//! When all three channels carry curves, the curves are absorbed into a
//! fixed-resolution prelut and the scale vector stays at one; otherwise
//! the input domain becomes the scale, as with `.cube`. Stored cube values
//! are expanded by the declared output range either way.
//!
//! Cube data lists red fastest, like `.cube`.

use crate::error::{LutError, LutResult};
use crate::lut3d::{Lut3D, Rgb, domain_scale, offset_i_major};
use crate::prelut::{PRELUT_SIZE, sample_curve};
use crate::reader::{LutReader, first_int, parse_fields};

pub(crate) fn parse(lut3d: &mut Lut3D, reader: &mut LutReader<'_>) -> LutResult<()> {
    let mut in_min = [0.0f32; 3];
    let mut in_max = [1.0f32; 3];
    let mut out_min = [0.0f32; 3];
    let mut out_max = [1.0f32; 3];
    let mut in_curve: [Vec<f32>; 3] = Default::default();
    let mut out_curve: [Vec<f32>; 3] = Default::default();

    let line = reader.require_content_line()?;
    if !line.starts_with("CSPLUTV100") {
        return Err(LutError::SignatureMismatch("not a cineSpace LUT".into()));
    }
    let line = reader.require_content_line()?;
    if !line.starts_with("3D") {
        return Err(LutError::SignatureMismatch("not a 3D cineSpace LUT".into()));
    }

    let mut inside_metadata = false;
    loop {
        let mut line = reader.require_content_line()?;

        if line.starts_with("BEGIN METADATA") {
            inside_metadata = true;
            continue;
        }
        if line.starts_with("END METADATA") {
            inside_metadata = false;
            continue;
        }
        if inside_metadata {
            continue;
        }

        for c in 0..3 {
            let npoints: i64 = first_int(line)?;

            if npoints > 2 {
                let npoints = npoints as usize;
                if npoints > PRELUT_SIZE {
                    return Err(LutError::MalformedData(format!(
                        "shaper curve of {npoints} points exceeds {PRELUT_SIZE}"
                    )));
                }
                if !in_curve[c].is_empty() || !out_curve[c].is_empty() {
                    return Err(LutError::DuplicateCurve);
                }

                in_min[c] = f32::MAX;
                in_max[c] = f32::MIN;
                out_min[c] = f32::MAX;
                out_max[c] = f32::MIN;

                let mut last = 0.0f32;
                for n in 0..npoints {
                    let v = reader.next_f32()?;
                    in_min[c] = in_min[c].min(v);
                    in_max[c] = in_max[c].max(v);
                    if n > 0 && v < last {
                        return Err(LutError::NonMonotonicCurve);
                    }
                    in_curve[c].push(v);
                    last = v;
                }
                for _ in 0..npoints {
                    let v = reader.next_f32()?;
                    out_min[c] = out_min[c].min(v);
                    out_max[c] = out_max[c].max(v);
                    out_curve[c].push(v);
                }
            } else if npoints == 2 {
                let pair = parse_fields::<f32, 2>(reader.require_content_line()?)?;
                in_min[c] = pair[0];
                in_max[c] = pair[1];
                let pair = parse_fields::<f32, 2>(reader.require_content_line()?)?;
                out_min[c] = pair[0];
                out_max[c] = pair[1];
            } else {
                return Err(LutError::Unsupported(format!(
                    "{npoints} pre-lut points"
                )));
            }

            line = reader.require_content_line()?;
        }

        let [size_r, size_g, size_b] = parse_fields::<usize, 3>(line)?;
        if size_r != size_g || size_r != size_b {
            return Err(LutError::SizeMismatch {
                r: size_r,
                g: size_g,
                b: size_b,
            });
        }
        let size = size_r;

        let want_prelut = in_curve.iter().all(|curve| !curve.is_empty());
        lut3d.allocate(size, want_prelut)?;
        let size2 = lut3d.size2;

        for k in 0..size {
            for j in 0..size {
                for i in 0..size {
                    let data = reader.require_content_line()?;
                    let [r, g, b] = parse_fields::<f32, 3>(data)?;
                    lut3d.data[offset_i_major(size, size2, k, j, i)] = Rgb::new(
                        r * (out_max[0] - out_min[0]),
                        g * (out_max[1] - out_min[1]),
                        b * (out_max[2] - out_min[2]),
                    );
                }
            }
        }
        break;
    }

    if !lut3d.prelut.is_empty() {
        for c in 0..3 {
            lut3d.prelut.min[c] = in_min[c];
            lut3d.prelut.max[c] = in_max[c];
            lut3d.prelut.scale[c] = (1.0 / (in_max[c] - in_min[c])) * (PRELUT_SIZE - 1) as f32;
            sample_curve(
                &mut lut3d.prelut.lut[c],
                &in_curve[c],
                &out_curve[c],
                in_min[c],
                in_max[c],
            );
        }
        // The nonlinearity lives in the prelut now.
        lut3d.scale = Rgb::new(1.0, 1.0, 1.0);
    } else {
        lut3d.scale = domain_scale(&in_min, &in_max);
    }
    Ok(())
}
