//! Visual tuning for the particle header.
//!
//! Every constant that shapes the field (density, motion ranges, link
//! distance, surface limits) lives in [`FieldStyle`], alongside the CSS
//! applied to the header container and its canvas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS `rgba()` string with the alpha rounded to three decimals.
	pub fn to_css(self) -> String {
		format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
	}
}

/// Tuning for particle seeding, motion and drawing.
#[derive(Clone, Debug)]
pub struct FieldStyle {
	/// Particles per square logical pixel
	pub density: f64,
	/// Lower bound on the particle count, whatever the area
	pub min_count: usize,
	/// Upper bound on the particle count
	pub max_count: usize,
	/// Drift speed range in px/s, `[min, max)`
	pub speed: (f64, f64),
	/// Radius range in px, `[min, max)`
	pub radius: (f64, f64),
	/// Base opacity range, `[min, max)`
	pub alpha: (f64, f64),
	/// Distance past each edge before a particle wraps to the opposite side
	pub wrap_margin: f64,
	/// Pairs closer than this are joined by a line
	pub link_distance: f64,
	/// Line opacity for coincident particles, fading to zero at `link_distance`
	pub link_opacity: f64,
	/// Multiplier applied to a particle's alpha when filling it
	pub fill_alpha_scale: f64,
	/// Particle and line color (alpha is taken from the particle/link)
	pub color: Color,
	/// Cap on the device pixel ratio used for the backing buffer
	pub max_pixel_ratio: f64,
	/// Longest frame step fed to the integrator, in seconds
	pub max_frame_step: f64,
}

impl Default for FieldStyle {
	fn default() -> Self {
		Self {
			density: 0.0018,
			min_count: 8,
			max_count: 60,
			speed: (20.0, 40.0),
			radius: (0.8, 2.6),
			alpha: (0.25, 0.70),
			wrap_margin: 20.0,
			link_distance: 120.0,
			link_opacity: 0.12,
			fill_alpha_scale: 0.9,
			color: Color::WHITE,
			max_pixel_ratio: 2.0,
			max_frame_step: 0.05,
		}
	}
}

/// Inline style for the header container.
pub const HEADER_CSS: &str = "position: relative; width: 100%; display: flex; \
	align-items: center; overflow: hidden; \
	background: linear-gradient(135deg, var(--mat-sys-primary) 0%, var(--mat-sys-surface) 100%); \
	color: var(--mat-sys-on-primary);";

/// Inline style for the background canvas. Sits under the projected content
/// and never takes pointer events.
pub const CANVAS_CSS: &str = "position: absolute; inset: 0; width: 100%; height: 100%; \
	pointer-events: none; z-index: 0; mix-blend-mode: soft-light;";
