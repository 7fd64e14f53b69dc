//! Unimodal density shaping over a placement window.
//!
//! A plan biases where in its window units land through two parameters:
//! a symmetric `mean` in `[-1, 1]` (window start vs. window end) and a
//! concentration `kappa >= 0` (0 = uniform). The shape is a relative
//! density only; callers use it as a sampling weight and never need the
//! normalizing constant.

/// Clamp applied to `p` so boundary positions never produce `0^negative`.
const EDGE_EPSILON: f32 = 1e-4;

/// Relative density weight at normalized position `p` in `[0, 1]`.
///
/// `mean` is clamped into `[-1, 1]` and mapped onto the unit interval;
/// the concentration is reparameterized as `nu = kappa + 2` so that both
/// shape exponents stay `>= 1` and the density has a single peak, never a
/// U-shape. `kappa <= 0` disables shaping entirely and returns `1.0`.
pub fn shape_weight(p: f32, mean: f32, kappa: f32) -> f32 {
    if kappa <= 0.0 {
        return 1.0;
    }

    let m = 0.5 * (mean.clamp(-1.0, 1.0) + 1.0);
    let nu = kappa + 2.0;
    let a = m * (nu - 2.0) + 1.0;
    let b = (1.0 - m) * (nu - 2.0) + 1.0;

    let p = p.clamp(EDGE_EPSILON, 1.0 - EDGE_EPSILON);
    p.powf(a - 1.0) * (1.0 - p).powf(b - 1.0)
}

/// Maps a window offset to a normalized position in `[0, 1]`.
///
/// A single-slot window maps to `0.5` so shaping treats it as the center.
pub fn normalized_position(index: usize, window_len: usize) -> f32 {
    debug_assert!(index < window_len.max(1), "index must lie in the window");
    if window_len <= 1 {
        0.5
    } else {
        index as f32 / (window_len - 1) as f32
    }
}
