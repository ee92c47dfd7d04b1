use std::time::Duration;

pub const SMOOTH_DURATION: Duration = Duration::from_millis(300);
pub const SMOOTH_STEP: Duration = Duration::from_millis(20);

/// Intermediate bar positions for sliding from `start` to `target`.
///
/// Linear interpolation over `ceil(duration / step)` frames, always at least
/// one. The last frame is exactly `target`.
pub fn smooth_steps(start: f64, target: f64, duration: Duration, step: Duration) -> Vec<f64> {
    let frames = if step.is_zero() {
        1
    } else {
        duration.as_nanos().div_ceil(step.as_nanos()).clamp(1, u128::from(u32::MAX)) as u32
    };
    let change = target - start;

    (1..=frames)
        .map(|frame| {
            if frame == frames {
                target
            } else {
                start + change * f64::from(frame) / f64::from(frames)
            }
        })
        .collect()
}
