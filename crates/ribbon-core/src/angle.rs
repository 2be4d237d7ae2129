use crate::constants::{CLAMP_PADDING, SMOOTHING, THETA};

/// Scroll position of the carousel, split into intent and rendered state.
///
/// `target` is the authoritative destination, mutated instantly by every
/// input source (drag, wheel, keys, programmatic jump). `current` is the
/// rendered position, eased toward `target` once per display frame. The
/// split lets input handlers stay ignorant of easing and keeps rendering a
/// pure function of `current` alone.
///
/// Bounds depend only on the entry count, which the caller passes in.
#[derive(Clone, Copy, Debug, Default)]
pub struct AngleController {
    target: f64,
    current: f64,
}

impl AngleController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Assign the target directly, then clamp.
    pub fn set_target(&mut self, angle: f64, n: usize) {
        self.target = angle;
        self.clamp(n);
    }

    /// Shift the target, then clamp. Wheel and keyboard path.
    pub fn nudge(&mut self, delta: f64, n: usize) {
        self.target += delta;
        self.clamp(n);
    }

    /// Shift the target without clamping. Drag path: bounds are advisory
    /// while a drag is live and enforced at drag-end.
    pub fn nudge_unclamped(&mut self, delta: f64) {
        self.target += delta;
    }

    /// Constrain the target to `[-PADDING, (n-1)*THETA + PADDING]`.
    /// No-op when the collection is empty (the angle is meaningless then;
    /// the controller forces target 0 separately).
    pub fn clamp(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let max = (n - 1) as f64 * THETA + CLAMP_PADDING;
        self.target = self.target.clamp(-CLAMP_PADDING, max);
    }

    /// Scroll directly to an item's resting angle. Bypasses smoothing only
    /// for the target; the visual transition still eases via `tick`.
    pub fn jump_to(&mut self, index: usize, n: usize) {
        self.set_target(index as f64 * THETA, n);
    }

    /// Force the target back to zero (collection became empty).
    pub fn reset_target(&mut self) {
        self.target = 0.0;
    }

    /// One continuous-time step, run once per display frame regardless of
    /// input activity. First-order low-pass filter: never overshoots,
    /// converges geometrically, never terminates exactly.
    pub fn tick(&mut self) {
        self.current += (self.target - self.current) * SMOOTHING;
    }

    /// Whether the rendered angle has converged to within `epsilon`.
    /// A renderer may skip its visual update when settled, but the host
    /// must keep calling `tick`: new targets can arrive at any time.
    pub fn is_settled(&self, epsilon: f64) -> bool {
        (self.target - self.current).abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tick_converges_monotonically_without_overshoot() {
        let mut a = AngleController::new();
        a.set_target(90.0, 10);

        let mut prev_diff = (a.target() - a.current()).abs();
        for _ in 0..500 {
            a.tick();
            let diff = (a.target() - a.current()).abs();
            assert!(diff <= prev_diff, "diff grew: {diff} > {prev_diff}");
            assert!(a.current() <= a.target(), "overshot the target");
            prev_diff = diff;
        }
        assert!(a.is_settled(1e-6), "not settled after 500 ticks");
    }

    #[test]
    fn test_tick_geometric_rate() {
        let mut a = AngleController::new();
        a.set_target(100.0, 10);
        a.tick();
        assert_relative_eq!(a.current(), 10.0);
        a.tick();
        assert_relative_eq!(a.current(), 19.0);
    }

    #[test]
    fn test_clamp_bounds() {
        let mut a = AngleController::new();
        a.set_target(1000.0, 5);
        assert_relative_eq!(a.target(), 4.0 * THETA + CLAMP_PADDING);

        a.set_target(-1000.0, 5);
        assert_relative_eq!(a.target(), -CLAMP_PADDING);
    }

    #[test]
    fn test_clamp_idempotent() {
        let mut a = AngleController::new();
        a.set_target(500.0, 3);
        let once = a.target();
        a.clamp(3);
        assert_relative_eq!(a.target(), once);
    }

    #[test]
    fn test_clamp_empty_collection_is_noop() {
        let mut a = AngleController::new();
        a.nudge_unclamped(123.0);
        a.clamp(0);
        assert_relative_eq!(a.target(), 123.0);
    }

    #[test]
    fn test_within_bounds_untouched() {
        let mut a = AngleController::new();
        a.set_target(36.0, 10);
        assert_relative_eq!(a.target(), 36.0);
    }

    #[test]
    fn test_jump_to_resting_angle() {
        let mut a = AngleController::new();
        a.jump_to(1, 2);
        assert_relative_eq!(a.target(), 18.0);
        // current is unaffected until ticks ease it over
        assert_relative_eq!(a.current(), 0.0);
    }

    #[test]
    fn test_nudge_unclamped_exceeds_bounds() {
        let mut a = AngleController::new();
        a.nudge_unclamped(900.0);
        assert_relative_eq!(a.target(), 900.0);
        a.clamp(2);
        assert_relative_eq!(a.target(), THETA + CLAMP_PADDING);
    }

    #[test]
    fn test_reset_target() {
        let mut a = AngleController::new();
        a.set_target(54.0, 4);
        a.reset_target();
        assert_relative_eq!(a.target(), 0.0);
    }
}
