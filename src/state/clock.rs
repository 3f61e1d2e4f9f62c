/// Elapsed seconds between two host timestamps (milliseconds), bounded by `max_dt`.
///
/// A missing `last_ms` means the run is (re)starting, which yields zero. Timestamps that run
/// backwards also yield zero. Never panics, even for a negative or NaN `max_dt`.
pub fn frame_delta(last_ms: Option<f64>, now_ms: f64, max_dt: f64) -> f64 {
    let last_ms = last_ms.unwrap_or(now_ms);
    ((now_ms - last_ms) / 1000.0).min(max_dt).max(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/state/clock.rs"]
mod tests;
