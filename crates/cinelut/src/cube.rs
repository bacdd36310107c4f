//! Iridas/Adobe/Resolve `.cube` 3D LUT format.
//!
//! ```text
//! # comment
//! TITLE "Grade"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.0 0.0 0.0
//! ...
//! ```
//!
//! Everything before `LUT_3D_SIZE` is ignored. `TITLE`, `DOMAIN_MIN`,
//! `DOMAIN_MAX`, comments and blank lines may also appear interleaved with
//! the data, so each sample read classifies lines until an actual triple
//! turns up. Data lists red fastest, hence the transposed store offset.
//!
//! The declared domain does not rescale stored values; it becomes the
//! post-lookup scale vector, `clamp(1/(max-min), 0, 1)` per channel.

use crate::error::{LutError, LutResult};
use crate::lut3d::{Lut3D, Rgb, domain_scale, offset_i_major};
use crate::reader::{LutReader, first_int, parse_fields, skip_line};

pub(crate) fn parse(lut3d: &mut Lut3D, reader: &mut LutReader<'_>) -> LutResult<()> {
    let mut min = [0.0f32; 3];
    let mut max = [1.0f32; 3];

    while let Some(line) = reader.next_line() {
        if let Some(rest) = line.strip_prefix("LUT_3D_SIZE") {
            let size: usize = first_int(rest)?;

            lut3d.allocate(size, false)?;
            let size2 = lut3d.size2;

            for k in 0..size {
                for j in 0..size {
                    for i in 0..size {
                        let data = next_data_line(reader, &mut min, &mut max)?;
                        let [r, g, b] = parse_fields::<f32, 3>(data)?;
                        lut3d.data[offset_i_major(size, size2, k, j, i)] = Rgb::new(r, g, b);
                    }
                }
            }
            break;
        }
    }

    // A file without LUT_3D_SIZE falls through with an empty table; the
    // dispatcher postcondition reports that.
    lut3d.scale = domain_scale(&min, &max);
    Ok(())
}

/// Skips directives, comments and blanks until the next sample line,
/// recording any domain declarations on the way.
fn next_data_line<'a>(
    reader: &mut LutReader<'a>,
    min: &mut [f32; 3],
    max: &mut [f32; 3],
) -> LutResult<&'a str> {
    loop {
        let line = reader.require_line()?;
        if let Some(rest) = line.strip_prefix("DOMAIN_") {
            let vals: &mut [f32; 3] = if rest.starts_with("MIN ") {
                min
            } else if rest.starts_with("MAX ") {
                max
            } else {
                return Err(LutError::MalformedData(format!("unknown directive: `{line}`")));
            };
            *vals = parse_fields::<f32, 3>(&rest[4..])?;
            continue;
        }
        if line.starts_with("TITLE") || skip_line(line) {
            continue;
        }
        return Ok(line);
    }
}

#[cfg(test)]
mod tests {
    use crate::error::LutError;
    use crate::format::Format;
    use crate::lut3d::{Lut3D, Rgb};

    const IDENTITY_2: &str = "LUT_3D_SIZE 2\n0 0 0\n1 0 0\n0 1 0\n1 1 0\n0 0 1\n1 0 1\n0 1 1\n1 1 1\n";

    #[test]
    fn data_is_stored_red_major() {
        let lut3d = Lut3D::from_source(Format::Cube, IDENTITY_2).unwrap();
        assert_eq!(lut3d.size, 2);
        // The file lists red fastest; canonical layout puts red on the
        // largest stride, so the parsed identity stays an identity.
        for r in 0..2 {
            for g in 0..2 {
                for b in 0..2 {
                    let vec = lut3d.data[r * 4 + g * 2 + b];
                    assert_eq!(vec, Rgb::new(r as f32, g as f32, b as f32));
                }
            }
        }
    }

    #[test]
    fn domain_becomes_scale() {
        let src = "LUT_3D_SIZE 2\nDOMAIN_MIN 0 0 0\nDOMAIN_MAX 2 2 2\n\
                   0 0 0\n1 0 0\n0 1 0\n1 1 0\n0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
        let lut3d = Lut3D::from_source(Format::Cube, src).unwrap();
        assert_eq!(lut3d.scale, Rgb::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn directives_may_interleave_with_data() {
        let src = "TITLE \"before size\"\nLUT_3D_SIZE 2\n0 0 0\n# half way\n1 0 0\n0 1 0\n\
                   TITLE \"mid data\"\n1 1 0\n0 0 1\n\nDOMAIN_MAX 4 4 4\n1 0 1\n0 1 1\n1 1 1\n";
        let lut3d = Lut3D::from_source(Format::Cube, src).unwrap();
        assert_eq!(lut3d.size, 2);
        assert_eq!(lut3d.scale, Rgb::new(0.25, 0.25, 0.25));
        assert_eq!(lut3d.data[7], Rgb::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn inverted_domain_clamps_scale_to_zero() {
        let src = "LUT_3D_SIZE 2\nDOMAIN_MIN 3 3 3\nDOMAIN_MAX 1 1 1\n\
                   0 0 0\n1 0 0\n0 1 0\n1 1 0\n0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
        let lut3d = Lut3D::from_source(Format::Cube, src).unwrap();
        assert_eq!(lut3d.scale, Rgb::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn missing_size_keyword_is_an_empty_result() {
        let src = "TITLE \"no size\"\n0 0 0\n1 1 1\n";
        assert!(matches!(
            Lut3D::from_source(Format::Cube, src),
            Err(LutError::EmptyResult)
        ));
    }

    #[test]
    fn unknown_domain_directive_is_rejected() {
        let src = "LUT_3D_SIZE 2\nDOMAIN_MID 1 1 1\n0 0 0\n";
        assert!(matches!(
            Lut3D::from_source(Format::Cube, src),
            Err(LutError::MalformedData(_))
        ));
    }

    #[test]
    fn error_on_short_line() {
        let src = "LUT_3D_SIZE 2\n0 0\n";
        assert!(matches!(
            Lut3D::from_source(Format::Cube, src),
            Err(LutError::MalformedData(_))
        ));
    }

    #[test]
    fn error_on_unexpected_eof() {
        let src = "LUT_3D_SIZE 2\n0 0 0\n1 0 0\n";
        assert!(matches!(
            Lut3D::from_source(Format::Cube, src),
            Err(LutError::MalformedData(_))
        ));
    }
}
