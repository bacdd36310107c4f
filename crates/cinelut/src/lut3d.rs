//! The 3D LUT context: canonical cube storage plus loading entry points.
//!
//! Whatever the source format, a loaded table always ends up in the same
//! layout: a flat `size³` sequence of [`Rgb`] samples with the red grid
//! coordinate on the largest stride, a per-channel post-lookup
//! [`scale`](Lut3D::scale), and an optional [`PreLut`]. Interpolators can
//! consume the result without caring which dialect produced it.

use std::fs;
use std::path::Path;

use crate::error::{LutError, LutResult};
use crate::format::Format;
use crate::prelut::{PRELUT_SIZE, PreLut};
use crate::reader::LutReader;
use crate::{csp, cube, dat, pandora, threedl};

/// Smallest supported cube edge.
pub const MIN_SIZE: usize = 2;

/// Largest supported cube edge.
///
/// Cube files rarely go past 65 points, but Hald CLUTs of 512x512 unroll
/// to 64x64x64 and larger grids exist in the wild.
pub const MAX_SIZE: usize = 256;

/// Edge length of the identity table built when no source is supplied.
const IDENTITY_SIZE: usize = 32;

/// One RGB sample of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
}

impl Rgb {
    /// Creates a triple from components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    const ONE: Rgb = Rgb::new(1.0, 1.0, 1.0);
}

/// Flattened cube offset for formats whose outermost data loop axis sits
/// on the largest stride (DAT, 3DL, M3D): sequential lines land at
/// sequential offsets.
#[inline]
pub(crate) fn offset_k_major(size: usize, size2: usize, k: usize, j: usize, i: usize) -> usize {
    k * size2 + j * size + i
}

/// Transposed offset for formats that list the innermost loop axis on the
/// largest stride instead (CUBE, CSP, which write red fastest).
#[inline]
pub(crate) fn offset_i_major(size: usize, size2: usize, k: usize, j: usize, i: usize) -> usize {
    i * size2 + j * size + k
}

/// Post-lookup scale derived from a declared `[min, max]` input domain.
pub(crate) fn domain_scale(min: &[f32; 3], max: &[f32; 3]) -> Rgb {
    Rgb {
        r: (1.0 / (max[0] - min[0])).clamp(0.0, 1.0),
        g: (1.0 / (max[1] - min[1])).clamp(0.0, 1.0),
        b: (1.0 / (max[2] - min[2])).clamp(0.0, 1.0),
    }
}

fn try_alloc<T: Clone + Default>(len: usize) -> LutResult<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| LutError::Allocation(len))?;
    buf.resize(len, T::default());
    Ok(buf)
}

/// A 3-dimensional lookup table in canonical layout.
///
/// # Structure
///
/// - `size³` entries, red grid coordinate on the largest stride:
///   `data[r*size² + g*size + b]`
/// - `scale` multiplies the looked-up value per channel to compensate for
///   a source format's declared domain
/// - `prelut` optionally reshapes inputs before the cube lookup
///
/// # Lifecycle
///
/// Every `init_*` entry point first releases prior state, so a context can
/// be reused; a failed load leaves it empty. Once loaded the table is
/// plain immutable data and can be shared freely across readers.
///
/// # Example
///
/// ```rust
/// use cinelut::{Format, Lut3D};
///
/// let src = "LUT_3D_SIZE 2\n0 0 0\n1 0 0\n0 1 0\n1 1 0\n0 0 1\n1 0 1\n0 1 1\n1 1 1\n";
/// let lut = Lut3D::from_source(Format::Cube, src)?;
/// assert_eq!(lut.size, 2);
/// # Ok::<(), cinelut::LutError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Lut3D {
    /// Cube samples, exactly `size³` entries (empty when uninitialized).
    pub data: Vec<Rgb>,
    /// Cube edge length; 0 when uninitialized.
    pub size: usize,
    /// Cached `size²`.
    pub(crate) size2: usize,
    /// Per-channel post-lookup multiplier.
    pub scale: Rgb,
    /// Optional per-channel input shaper.
    pub prelut: PreLut,
}

impl Default for Lut3D {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            size: 0,
            size2: 0,
            scale: Rgb::ONE,
            prelut: PreLut::default(),
        }
    }
}

impl Lut3D {
    /// Creates an empty, uninitialized context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an identity (pass-through) table of the given size.
    pub fn identity(size: usize) -> LutResult<Self> {
        let mut lut3d = Self::new();
        lut3d.set_identity(size)?;
        Ok(lut3d)
    }

    /// Parses a table from an in-memory source with an explicit format.
    pub fn from_source(format: Format, source: &str) -> LutResult<Self> {
        let mut lut3d = Self::new();
        lut3d.init_from_source(format, source)?;
        Ok(lut3d)
    }

    /// Loads a table from a file, format selected by extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> LutResult<Self> {
        let mut lut3d = Self::new();
        lut3d.init_from_path(path)?;
        Ok(lut3d)
    }

    /// Total number of cube entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.size * self.size * self.size
    }

    /// True when no table has been loaded.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// (Re)allocates the cube and, optionally, the prelut buffers.
    ///
    /// Previously owned buffers are released first. `size` must be within
    /// `2..=256`; on any failure the context is left empty.
    pub fn allocate(&mut self, size: usize, want_prelut: bool) -> LutResult<()> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(LutError::SizeOutOfRange(size));
        }

        self.data = Vec::new();
        self.prelut.clear();

        self.data = match try_alloc(size * size * size) {
            Ok(buf) => buf,
            Err(err) => {
                self.release();
                return Err(err);
            }
        };

        if want_prelut {
            for channel in 0..3 {
                match try_alloc(PRELUT_SIZE) {
                    Ok(buf) => self.prelut.lut[channel] = buf,
                    Err(err) => {
                        self.release();
                        return Err(err);
                    }
                }
            }
            self.prelut.size = PRELUT_SIZE;
        }

        self.size = size;
        self.size2 = size * size;
        Ok(())
    }

    /// Fills the context with a linear ramp mapping every input to itself.
    ///
    /// The coordinate-to-channel convention (outer axis is red, inner is
    /// blue) must match the data parsers exactly or downstream sampling
    /// would transpose colors.
    pub fn set_identity(&mut self, size: usize) -> LutResult<()> {
        self.allocate(size, false)?;

        let c = 1.0 / (size - 1) as f32;
        for k in 0..size {
            for j in 0..size {
                for i in 0..size {
                    self.data[offset_k_major(size, self.size2, k, j, i)] =
                        Rgb::new(k as f32 * c, j as f32 * c, i as f32 * c);
                }
            }
        }
        Ok(())
    }

    /// Parses a table from an in-memory source.
    ///
    /// An empty source builds a size-32 identity table instead; otherwise
    /// exactly one format parser runs, and a parser that succeeds without
    /// producing any entries is reported as [`LutError::EmptyResult`].
    pub fn init_from_source(&mut self, format: Format, source: &str) -> LutResult<()> {
        if source.is_empty() {
            self.release();
            return self.set_identity(IDENTITY_SIZE);
        }
        self.init_parsed(format, source)
    }

    /// Loads a table from a named file, format selected by extension.
    pub fn init_from_path<P: AsRef<Path>>(&mut self, path: P) -> LutResult<()> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let format = Format::from_path(path)?;
        self.init_parsed(format, &source)
    }

    fn init_parsed(&mut self, format: Format, source: &str) -> LutResult<()> {
        self.release();

        let mut reader = LutReader::new(source);
        let parsed = match format {
            Format::Dat => dat::parse(self, &mut reader),
            Format::Cube => cube::parse(self, &mut reader),
            Format::ThreeDl => threedl::parse(self, &mut reader),
            Format::M3d => pandora::parse(self, &mut reader),
            Format::Csp => csp::parse(self, &mut reader),
        };
        if let Err(err) = parsed {
            self.release();
            return Err(err);
        }

        if self.size == 0 {
            return Err(LutError::EmptyResult);
        }
        Ok(())
    }

    /// Releases all owned buffers and resets the scale. Idempotent, and
    /// safe whether or not a load ever ran or succeeded.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.size = 0;
        self.size2 = 0;
        self.scale = Rgb::ONE;
        self.prelut.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn offsets_transpose_each_other() {
        let (size, size2) = (3, 9);
        assert_eq!(offset_k_major(size, size2, 2, 1, 0), 2 * 9 + 3);
        assert_eq!(offset_i_major(size, size2, 2, 1, 0), 3 + 2);
        for k in 0..size {
            for j in 0..size {
                for i in 0..size {
                    assert_eq!(
                        offset_k_major(size, size2, k, j, i),
                        offset_i_major(size, size2, i, j, k),
                    );
                }
            }
        }
    }

    #[test]
    fn allocate_rejects_out_of_range_sizes() {
        let mut lut3d = Lut3D::new();
        assert!(matches!(
            lut3d.allocate(1, false),
            Err(LutError::SizeOutOfRange(1))
        ));
        assert!(matches!(
            lut3d.allocate(257, false),
            Err(LutError::SizeOutOfRange(257))
        ));
        assert!(lut3d.is_empty());
    }

    #[test]
    fn allocate_accepts_domain_bounds() {
        let mut lut3d = Lut3D::new();
        lut3d.allocate(2, false).unwrap();
        assert_eq!(lut3d.data.len(), 8);
        lut3d.allocate(256, false).unwrap();
        assert_eq!(lut3d.data.len(), 256 * 256 * 256);
    }

    #[test]
    fn allocate_with_prelut_sizes_channels() {
        let mut lut3d = Lut3D::new();
        lut3d.allocate(4, true).unwrap();
        assert_eq!(lut3d.prelut.size, PRELUT_SIZE);
        assert!(lut3d.prelut.lut.iter().all(|c| c.len() == PRELUT_SIZE));

        // Reallocating without a prelut empties it again.
        lut3d.allocate(4, false).unwrap();
        assert!(lut3d.prelut.is_empty());
        assert!(lut3d.prelut.lut.iter().all(Vec::is_empty));
    }

    #[test]
    fn identity_is_a_linear_ramp() {
        let size = 5;
        let lut3d = Lut3D::identity(size).unwrap();
        assert_eq!(lut3d.data.len(), size * size * size);
        assert_eq!(lut3d.scale, Rgb::ONE);

        let c = 1.0 / (size - 1) as f32;
        for k in 0..size {
            for j in 0..size {
                for i in 0..size {
                    let vec = lut3d.data[k * size * size + j * size + i];
                    assert_eq!(vec, Rgb::new(k as f32 * c, j as f32 * c, i as f32 * c));
                }
            }
        }
    }

    #[test]
    fn empty_source_builds_identity_32() {
        let lut3d = Lut3D::from_source(Format::Cube, "").unwrap();
        assert_eq!(lut3d.size, 32);
        assert_eq!(lut3d.data.len(), 32 * 32 * 32);
        assert_eq!(lut3d.data[0], Rgb::new(0.0, 0.0, 0.0));
        let last = lut3d.data.len() - 1;
        assert_eq!(lut3d.data[last], Rgb::ONE);
    }

    #[test]
    fn reinit_fully_replaces_previous_table() {
        let mut lut3d = Lut3D::new();
        lut3d
            .init_from_source(
                Format::Dat,
                "3DLUTSIZE 2\n0 0 0\n1 0 0\n0 1 0\n1 1 0\n0 0 1\n1 0 1\n0 1 1\n1 1 1\n",
            )
            .unwrap();
        assert_eq!(lut3d.size, 2);

        lut3d.set_identity(3).unwrap();
        assert_eq!(lut3d.size, 3);
        assert_eq!(lut3d.data.len(), 27);
        assert_eq!(lut3d.size2, 9);
    }

    #[test]
    fn failed_init_leaves_context_empty() {
        let mut lut3d = Lut3D::identity(4).unwrap();
        let err = lut3d.init_from_source(Format::Dat, "3DLUTSIZE 2\n0 0\n");
        assert!(err.is_err());
        assert!(lut3d.is_empty());
        assert!(lut3d.data.is_empty());

        // Release after a failed init must not fault, nor after another.
        lut3d.release();
        lut3d.release();
        assert_eq!(lut3d.scale, Rgb::ONE);
    }

    #[test]
    fn load_from_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grade.cube");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "LUT_3D_SIZE 2\n0 0 0\n1 0 0\n0 1 0\n1 1 0\n0 0 1\n1 0 1\n0 1 1\n1 1 1\n"
        )
        .unwrap();
        drop(file);

        let lut3d = Lut3D::from_path(&path).unwrap();
        assert_eq!(lut3d.size, 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Lut3D::from_path("/nonexistent/grade.cube"),
            Err(LutError::Io(_))
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grade.xyz");
        std::fs::write(&path, "whatever").unwrap();
        assert!(matches!(
            Lut3D::from_path(&path),
            Err(LutError::UnrecognizedFormat(_))
        ));
    }
}
