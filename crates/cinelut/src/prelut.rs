//! Per-channel shaper curves ("prelut").
//!
//! Some formats (CSP in practice) front the cube with a nonlinear transfer
//! curve per channel. The curve is resampled once at load time into a
//! fixed-resolution table so the per-pixel path stays a plain lookup.

/// Number of samples per prelut channel.
///
/// Baked into the file format's expected numerical behavior; not tunable.
pub const PRELUT_SIZE: usize = 65536;

/// Optional per-channel 1D lookup applied before the 3D cube.
///
/// `size == 0` means no prelut is present and the channel tables are empty.
#[derive(Debug, Clone, Default)]
pub struct PreLut {
    /// Samples per channel: 0 or [`PRELUT_SIZE`].
    pub size: usize,
    /// Input domain minimum per channel.
    pub min: [f32; 3],
    /// Input domain maximum per channel.
    pub max: [f32; 3],
    /// Input-to-index scale per channel: `(size-1) / (max-min)`.
    pub scale: [f32; 3],
    /// Resampled output values, one table per channel.
    pub lut: [Vec<f32>; 3],
}

impl PreLut {
    /// True when no prelut is present.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub(crate) fn clear(&mut self) {
        *self = PreLut::default();
    }
}

#[inline]
pub(crate) fn lerp(v0: f32, v1: f32, f: f32) -> f32 {
    v0 + (v1 - v0) * f
}

/// Clamps non-finite values to something the interpolator can chew on.
pub(crate) fn sanitize(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else if v == f32::INFINITY {
        f32::MAX
    } else if v == f32::NEG_INFINITY {
        f32::MIN
    } else {
        v
    }
}

/// Greatest index with `data[idx] <= x`, clamped to the slice bounds.
///
/// `data` must be non-decreasing.
pub(crate) fn nearest_sample_index(data: &[f32], x: f32) -> usize {
    let mut low = 0;
    let mut hi = data.len() - 1;

    if x < data[low] {
        return low;
    }
    if x > data[hi] {
        return hi;
    }

    while hi - low > 1 {
        let mid = (low + hi) / 2;
        if x < data[mid] {
            hi = mid;
        } else {
            low = mid;
        }
    }
    low
}

/// Resamples one monotonic channel curve into `samples` evenly spaced
/// outputs over `[min, max]`.
///
/// `inputs` carries at least two non-decreasing sample coordinates with
/// `inputs[0] == min` and `inputs[last] == max`; `outputs` is parallel to
/// it. Anything else is a bug in the calling parser, not bad input, hence
/// the hard assert.
pub(crate) fn sample_curve(samples: &mut [f32], inputs: &[f32], outputs: &[f32], min: f32, max: f32) {
    debug_assert!(inputs.len() >= 2);
    debug_assert_eq!(inputs.len(), outputs.len());

    let last = (samples.len() - 1) as f32;
    for (n, sample) in samples.iter_mut().enumerate() {
        let mix = n as f32 / last;
        let x = lerp(min, max, mix);

        let idx = nearest_sample_index(inputs, x);
        assert!(idx + 1 < inputs.len());

        let frac = x - inputs[idx];
        *sample = sanitize(lerp(outputs[idx], outputs[idx + 1], frac));
    }
}
