//! Rank-weighted recovery curve
//!
//! A parameter's pull toward its tracked displacement depends on where it
//! was registered in its group:
//!
//! ```text
//! w(i) = (1 - (i / (n - 1))^pow) · level
//! ```
//!
//! The first-registered parameter gets `level`, the last gets `0`, and
//! `pow` shapes the curve in between.

/// Recover weight for the parameter at `p_index` in a group of `num_layers`
///
/// A group with a single recovering parameter has no rank spread; it is
/// treated as rank 0 and gets the full `recover_level`.
pub fn recover_weight(
    p_index: usize,
    num_layers: usize,
    recover_pow: f32,
    recover_level: f32,
) -> f32 {
    if num_layers <= 1 {
        return recover_level;
    }
    let depth = p_index as f32 / (num_layers - 1) as f32;
    (1.0 - depth.powf(recover_pow)) * recover_level
}
