//! Placeholder for mascot lip-sync animation.
//!
//! Real lip-sync belongs to an external animation service. Until one is
//! integrated, [`pulse_scale`] produces a cosmetic scale factor that would
//! simulate mouth movement. The composition plan does not consume it.

use std::f64::consts::PI;

/// Pulses per second.
pub const PULSE_FREQUENCY_HZ: f64 = 3.0;

/// Peak deviation from a scale of 1.0.
pub const PULSE_AMPLITUDE: f64 = 0.05;

/// Scale factor for the mascot at `frame_index`, oscillating between 0.95
/// and 1.05 at [`PULSE_FREQUENCY_HZ`].
///
/// Returns 1.0 for a zero frame rate.
pub fn pulse_scale(frame_index: u64, fps: u32) -> f64 {
    if fps == 0 {
        return 1.0;
    }
    let t = frame_index as f64 / f64::from(fps);
    1.0 + PULSE_AMPLITUDE * (2.0 * PI * PULSE_FREQUENCY_HZ * t).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_unscaled() {
        assert!((pulse_scale(0, 24) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn stays_within_bounds() {
        for frame in 0..(24 * 15) {
            let scale = pulse_scale(frame, 24);
            assert!((0.95 - 1e-9..=1.05 + 1e-9).contains(&scale), "frame {frame}: {scale}");
        }
    }

    #[test]
    fn peaks_a_quarter_period_in() {
        // 3 Hz at 24 fps: a period is 8 frames, the peak lands on frame 2.
        assert!((pulse_scale(2, 24) - 1.05).abs() < 1e-9);
        assert!((pulse_scale(6, 24) - 0.95).abs() < 1e-9);
    }

    #[test]
    fn zero_fps_is_neutral() {
        assert_eq!(pulse_scale(10, 0), 1.0);
    }
}
