/// Guard used when normalizing by a span that may collapse to zero.
pub(crate) const SPAN_EPSILON: f64 = 1e-6;

pub(crate) fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Linear blend that lands exactly on `a` at `t = 0` and on `b` at `t = 1`.
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
