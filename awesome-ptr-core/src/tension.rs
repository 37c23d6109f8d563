//! Drag resistance

/// Raw power curve: `raw_delta ^ exponent`.
///
/// Exponents in `(0, 1)` make the output grow slower than the finger,
/// `1` is linear, and anything above `1` amplifies the drag.
pub fn tension(raw_delta: f64, exponent: f64) -> f64 {
    raw_delta.powf(exponent)
}

/// A height sample the projector may consume
pub fn is_valid_height(height: f64) -> bool {
    height.is_finite() && height > 0.0
}

/// Damped height for a raw finger delta, or `None` when the sample must be
/// dropped (non-positive or non-finite delta).
pub fn damped_height(raw_delta: f64, exponent: f64) -> Option<f64> {
    if !is_valid_height(raw_delta) {
        return None;
    }
    let height = tension(raw_delta, exponent);
    is_valid_height(height).then_some(height)
}
