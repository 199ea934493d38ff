// Math utilities and helper functions

/// Move `value` toward zero by `amount` without crossing it
///
/// Returns exactly `0.0` when the step would overshoot, so the sign of
/// `value` is never reversed.
pub fn approach_zero(value: f32, amount: f32) -> f32 {
    if value.abs() < amount {
        0.0
    } else {
        value - value.signum() * amount
    }
}

/// Aspect ratio of a framebuffer, treating a zero height as one pixel
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    let height = height.max(1);
    width as f32 / height as f32
}
