/// Advances a normalised `progress` by `delta / duration`, clamped to [0, 1].
///
/// Negative or NaN deltas never move progress backwards. A non-positive
/// duration completes immediately.
pub fn advance_progress(progress: f32, delta: f32, duration: f32) -> f32 {
    let delta = if delta.is_nan() { 0.0 } else { delta.max(0.0) };
    if duration <= 0.0 || !duration.is_finite() {
        return 1.0;
    }
    let next = progress + delta / duration;
    if next.is_nan() {
        return progress.clamp(0.0, 1.0);
    }
    next.clamp(0.0, 1.0)
}
