//! Easing curves and the shared first-order smoothing step.

/// Cubic ease-in-out. Fixes 0, 0.5, and 1; monotone on [0, 1].
#[inline]
pub fn cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Quadratic ease-in-out used by the tile animator. Same fixed points as
/// [`cubic_in_out`] with a gentler acceleration profile.
#[inline]
pub fn quad_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// One step of exponential approach of `current` toward `target`.
///
/// The blend factor is clamped to 1 so a stalled frame (huge `dt_sec`)
/// lands exactly on the target instead of overshooting past it.
#[inline]
pub fn approach(current: f32, target: f32, dt_sec: f32, rate_per_sec: f32) -> f32 {
    let alpha = (dt_sec * rate_per_sec).clamp(0.0, 1.0);
    current + (target - current) * alpha
}
