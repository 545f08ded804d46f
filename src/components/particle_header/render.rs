//! Canvas rendering for the particle header.
//!
//! One pass per frame: clear, then with additive compositing fill every
//! particle and stroke a fading line between each pair closer than the link
//! distance.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::field::ParticleField;

/// The drawing primitives the header needs from a 2D context.
pub trait Painter {
	fn save(&self);
	fn restore(&self);
	fn clear(&self, width: f64, height: f64);
	fn set_composite(&self, operation: &str);
	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str);
	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: &str);
}

impl Painter for CanvasRenderingContext2d {
	fn save(&self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn set_composite(&self, operation: &str) {
		let _ = self.set_global_composite_operation(operation);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str) {
		self.begin_path();
		self.set_fill_style_str(color);
		let _ = self.arc(x, y, radius, 0.0, TAU);
		self.fill();
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: &str) {
		self.set_stroke_style_str(color);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// Opacity of the line joining two particles `distance` apart: linear from
/// `max_opacity` at zero down to nothing at `max_distance`.
pub fn link_alpha(distance: f64, max_distance: f64, max_opacity: f64) -> f64 {
	if max_distance <= 0.0 {
		return 0.0;
	}
	(max_opacity * (1.0 - distance / max_distance)).max(0.0)
}

/// Repaints the whole field. `clear_width`/`clear_height` cover the backing
/// buffer, which is at least as large as the logical area.
pub fn render<P: Painter + ?Sized>(painter: &P, field: &ParticleField, clear_width: f64, clear_height: f64) {
	let style = field.style();

	painter.clear(clear_width, clear_height);

	painter.save();
	painter.set_composite("lighter");

	for p in &field.particles {
		let fill = style.color.with_alpha(p.alpha * style.fill_alpha_scale);
		painter.fill_circle(p.x, p.y, p.radius, &fill.to_css());
	}

	let max_d2 = style.link_distance * style.link_distance;
	let particles = &field.particles;
	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let d2 = dx * dx + dy * dy;
			if d2 < max_d2 {
				let alpha = link_alpha(d2.sqrt(), style.link_distance, style.link_opacity);
				let stroke = style.color.with_alpha(alpha);
				painter.stroke_line((a.x, a.y), (b.x, b.y), &stroke.to_css());
			}
		}
	}

	painter.restore();
}
