//! Canvas buffer sizing.
//!
//! The canvas is drawn in logical (CSS) pixels while its backing buffer is
//! scaled by the device pixel ratio so particles stay crisp on dense screens.

/// Logical and backing-buffer dimensions for one resize pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
	/// Container width in CSS pixels.
	pub logical_width: f64,
	/// Container height in CSS pixels.
	pub logical_height: f64,
	/// Effective pixel ratio, capped.
	pub ratio: f64,
	/// Backing buffer width in device pixels (at least 1).
	pub buffer_width: u32,
	/// Backing buffer height in device pixels (at least 1).
	pub buffer_height: u32,
}

impl SurfaceSize {
	/// Computes the buffer for a container of `width` x `height` CSS pixels.
	///
	/// `device_ratio` is taken as reported by the browser; anything that is
	/// not a positive finite number counts as 1.
	pub fn measure(width: f64, height: f64, device_ratio: f64, max_ratio: f64) -> Self {
		let ratio = effective_ratio(device_ratio, max_ratio);
		let width = width.max(0.0);
		let height = height.max(0.0);

		Self {
			logical_width: width,
			logical_height: height,
			ratio,
			buffer_width: buffer_len(width, ratio),
			buffer_height: buffer_len(height, ratio),
		}
	}
}

fn effective_ratio(device_ratio: f64, max_ratio: f64) -> f64 {
	let ratio = if device_ratio.is_finite() && device_ratio > 0.0 {
		device_ratio
	} else {
		1.0
	};
	ratio.min(max_ratio)
}

fn buffer_len(logical: f64, ratio: f64) -> u32 {
	((logical * ratio).ceil() as u32).max(1)
}
