//! Quantization and delta encoding of projected arcs.
//!
//! Each coordinate is scaled and rounded to an integer, then every position
//! after the first in an arc is stored as the difference from its
//! predecessor. Readers undo this with a running sum and the topology's
//! [`Transform`].

use crate::topology::Transform;

/// Scale used when quantization is requested without an explicit factor.
pub const DEFAULT_SCALE: f64 = 5000.0;

/// Largest magnitude a quantized position may have. Positions stay within
/// the exactly representable integer range of `f64`, so deltas between any
/// two of them cannot overflow `i64`.
pub const MAX_POSITION: f64 = 9_007_199_254_740_992.0;

/// Largest scale at which every on-canvas longitude (|lon| <= 180) stays
/// within [`MAX_POSITION`].
pub const MAX_SCALE: f64 = MAX_POSITION / 180.0;

/// Whether `scale` can be used as a quantization factor.
pub fn valid_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 0.0 && scale <= MAX_SCALE
}

fn position(v: f64, scale: f64) -> Option<i64> {
    let q = (v * scale).round();
    (q.is_finite() && q.abs() <= MAX_POSITION).then_some(q as i64)
}

/// The transform that maps positions quantized with `scale` back to
/// coordinates.
pub fn transform_for(scale: f64) -> Transform {
    Transform {
        scale: [1.0 / scale, 1.0 / scale],
        translate: [0.0, 0.0],
    }
}

/// Quantize one arc and delta-encode it.
///
/// Returns `None` when a coordinate scaled by `scale` exceeds
/// [`MAX_POSITION`] (e.g. points far outside the canvas).
pub fn quantize_arc(arc: &[[f64; 2]], scale: f64) -> Option<Vec<[i64; 2]>> {
    let mut previous = [0i64, 0i64];
    arc.iter()
        .map(|&[x, y]| {
            let current = [position(x, scale)?, position(y, scale)?];
            let delta = [current[0] - previous[0], current[1] - previous[1]];
            previous = current;
            Some(delta)
        })
        .collect()
}
