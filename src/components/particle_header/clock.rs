//! Frame timing for the animation loop.

/// Turns `requestAnimationFrame` timestamps into bounded frame steps.
///
/// A backgrounded tab can stall for seconds between frames; the step handed
/// to the integrator never exceeds `max_step` so particles do not jump.
#[derive(Clone, Debug)]
pub struct FrameClock {
	last_ms: f64,
	max_step: f64,
}

impl FrameClock {
	/// `max_step` is in seconds.
	pub fn new(max_step: f64) -> Self {
		Self {
			last_ms: 0.0,
			max_step,
		}
	}

	/// Sets the reference timestamp (milliseconds) for the next tick.
	pub fn reset(&mut self, now_ms: f64) {
		self.last_ms = now_ms;
	}

	/// Seconds since the previous tick, clamped to `[0, max_step]`.
	pub fn tick(&mut self, now_ms: f64) -> f64 {
		if !now_ms.is_finite() {
			return 0.0;
		}
		let elapsed = (now_ms - self.last_ms) / 1000.0;
		self.last_ms = now_ms;
		elapsed.clamp(0.0, self.max_step)
	}
}
