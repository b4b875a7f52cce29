//! Turning live-typed host input into numbers.

use crate::constants::Bounds;
use tracing::debug;

/// Parse a text field. Empty or unparsable text is unset, not zero.
pub fn parse_optional(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    // Italian keyboards type the decimal comma.
    t.replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Soft clamp: out-of-range input is pulled back into `bounds`, non-finite
/// input takes `fallback`.
pub(crate) fn clamp_soft(name: &str, v: f64, bounds: Bounds, fallback: f64) -> f64 {
    if !v.is_finite() {
        debug!(param = name, value = v, fallback, "non-finite input, using default");
        return fallback;
    }
    let c = v.clamp(bounds.min, bounds.max);
    if c != v {
        debug!(param = name, value = v, clamped = c, "parameter clamped");
    }
    c
}
