//! Drifting particle field behind the header.

use std::f64::consts::TAU;

use rand::Rng;

use super::style::FieldStyle;

/// A single drifting particle.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Velocity in px/s
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub alpha: f64,
}

impl Particle {
	/// Draws a particle at a random position inside `width` x `height`
	/// with random heading, speed, size and opacity.
	pub fn spawn<R: Rng + ?Sized>(rng: &mut R, style: &FieldStyle, width: f64, height: f64) -> Self {
		let speed = sample(rng, style.speed);
		let angle = sample(rng, (0.0, TAU));

		Self {
			x: sample(rng, (0.0, width.max(0.0))),
			y: sample(rng, (0.0, height.max(0.0))),
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			radius: sample(rng, style.radius),
			alpha: sample(rng, style.alpha),
		}
	}
}

/// Uniform sample in `[min, max)`. Tolerates an empty range, which yields `min`.
fn sample<R: Rng + ?Sized>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
	min + rng.gen_range(0.0..1.0) * (max - min)
}

/// Number of particles a `width` x `height` area should hold.
pub fn target_count(style: &FieldStyle, width: f64, height: f64) -> usize {
	let raw = (width * height * style.density).floor().max(0.0) as usize;
	raw.clamp(style.min_count, style.max_count)
}

/// Owns the particles and the logical bounds they wrap around.
pub struct ParticleField {
	pub particles: Vec<Particle>,
	style: FieldStyle,
	width: f64,
	height: f64,
}

impl ParticleField {
	pub fn new(style: FieldStyle) -> Self {
		Self {
			particles: Vec::with_capacity(style.max_count),
			style,
			width: 0.0,
			height: 0.0,
		}
	}

	pub fn style(&self) -> &FieldStyle {
		&self.style
	}

	pub fn bounds(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Drops every particle; the next [`seed`](Self::seed) starts from scratch.
	pub fn clear(&mut self) {
		self.particles.clear();
	}

	/// Grows or trims the field to the count for the new area and adopts
	/// `width` x `height` as the wrap bounds. Particles are trimmed from the
	/// tail; new ones are spawned inside the new area.
	pub fn seed<R: Rng + ?Sized>(&mut self, rng: &mut R, width: f64, height: f64) {
		self.width = width;
		self.height = height;

		let target = target_count(&self.style, width, height);
		if self.particles.len() > target {
			self.particles.truncate(target);
		} else {
			while self.particles.len() < target {
				self.particles
					.push(Particle::spawn(rng, &self.style, width, height));
			}
		}
	}

	/// Advances every particle by `dt` seconds, wrapping across edges.
	/// Steps are clamped to `[0, max_frame_step]`; a non-finite step is 0.
	pub fn update(&mut self, dt: f64) {
		let dt = if dt.is_finite() {
			dt.clamp(0.0, self.style.max_frame_step)
		} else {
			0.0
		};
		let margin = self.style.wrap_margin;
		let (w, h) = (self.width, self.height);

		for p in &mut self.particles {
			p.x += p.vx * dt;
			p.y += p.vy * dt;

			if p.x < -margin {
				p.x = w + margin;
			} else if p.x > w + margin {
				p.x = -margin;
			}
			if p.y < -margin {
				p.y = h + margin;
			} else if p.y > h + margin {
				p.y = -margin;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn field() -> (ParticleField, StdRng) {
		(
			ParticleField::new(FieldStyle::default()),
			StdRng::seed_from_u64(7),
		)
	}

	#[test]
	fn target_count_follows_area() {
		let style = FieldStyle::default();
		assert_eq!(target_count(&style, 400.0, 300.0), 60);
		assert_eq!(target_count(&style, 60.0, 60.0), 8);
		assert_eq!(target_count(&style, 0.0, 0.0), 8);
		assert_eq!(target_count(&style, 0.0, 900.0), 8);
		// 150 * 100 * 0.0018 = 27
		assert_eq!(target_count(&style, 150.0, 100.0), 27);
		assert_eq!(target_count(&style, 5000.0, 5000.0), 60);
	}

	#[test]
	fn target_count_matches_formula_across_areas() {
		let style = FieldStyle::default();
		for w in (0..600).step_by(37) {
			for h in (0..400).step_by(23) {
				let (w, h) = (w as f64, h as f64);
				let expected = ((w * h * 0.0018).floor() as usize).clamp(8, 60);
				assert_eq!(target_count(&style, w, h), expected, "{w}x{h}");
			}
		}
	}

	#[test]
	fn seeding_converges_and_is_idempotent() {
		let (mut field, mut rng) = field();
		field.seed(&mut rng, 150.0, 100.0);
		assert_eq!(field.particles.len(), 27);

		let before: Vec<(f64, f64)> = field.particles.iter().map(|p| (p.x, p.y)).collect();
		field.seed(&mut rng, 150.0, 100.0);
		field.seed(&mut rng, 150.0, 100.0);
		let after: Vec<(f64, f64)> = field.particles.iter().map(|p| (p.x, p.y)).collect();
		assert_eq!(before, after);
	}

	#[test]
	fn shrinking_trims_to_target() {
		let (mut field, mut rng) = field();
		field.seed(&mut rng, 400.0, 300.0);
		assert_eq!(field.particles.len(), 60);

		field.seed(&mut rng, 60.0, 60.0);
		assert_eq!(field.particles.len(), 8);
		assert_eq!(field.bounds(), (60.0, 60.0));

		field.seed(&mut rng, 200.0, 100.0);
		assert_eq!(field.particles.len(), 36);
	}

	#[test]
	fn clear_then_seed_respawns() {
		let (mut field, mut rng) = field();
		field.seed(&mut rng, 400.0, 300.0);
		field.clear();
		assert!(field.particles.is_empty());
		field.seed(&mut rng, 60.0, 60.0);
		assert_eq!(field.particles.len(), 8);
	}

	#[test]
	fn spawned_particles_stay_in_ranges() {
		let style = FieldStyle::default();
		let mut rng = StdRng::seed_from_u64(42);
		for _ in 0..2000 {
			let p = Particle::spawn(&mut rng, &style, 320.0, 180.0);
			assert!((0.0..320.0).contains(&p.x));
			assert!((0.0..180.0).contains(&p.y));
			assert!((0.8..2.6).contains(&p.radius));
			assert!((0.25..0.70).contains(&p.alpha));
			let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
			assert!(speed >= 20.0 - 1e-9 && speed < 40.0 + 1e-9, "speed {speed}");
		}
	}

	#[test]
	fn zero_area_spawns_at_origin() {
		let (mut field, mut rng) = field();
		field.seed(&mut rng, 0.0, 0.0);
		assert_eq!(field.particles.len(), 8);
		assert!(field.particles.iter().all(|p| p.x == 0.0 && p.y == 0.0));
	}

	#[test]
	fn update_integrates_velocity() {
		let (mut field, _) = field();
		field.width = 100.0;
		field.height = 100.0;
		field.particles.push(Particle {
			x: 50.0,
			y: 50.0,
			vx: 20.0,
			vy: -10.0,
			radius: 1.0,
			alpha: 0.5,
		});
		field.update(0.05);
		let p = &field.particles[0];
		assert!((p.x - 51.0).abs() < 1e-9);
		assert!((p.y - 49.5).abs() < 1e-9);
	}

	#[test]
	fn update_wraps_past_margin() {
		let (mut field, _) = field();
		field.width = 100.0;
		field.height = 80.0;
		let at = |x, y, vx, vy| Particle {
			x,
			y,
			vx,
			vy,
			radius: 1.0,
			alpha: 0.5,
		};
		field.particles = vec![
			at(-19.5, 40.0, -20.0, 0.0),
			at(119.5, 40.0, 20.0, 0.0),
			at(50.0, -19.5, 0.0, -20.0),
			at(50.0, 99.5, 0.0, 20.0),
		];
		field.update(0.05);
		assert_eq!(field.particles[0].x, 120.0);
		assert_eq!(field.particles[1].x, -20.0);
		assert_eq!(field.particles[2].y, 100.0);
		assert_eq!(field.particles[3].y, -20.0);
	}

	#[test]
	fn particles_never_leave_wrap_bounds() {
		let (mut field, mut rng) = field();
		field.seed(&mut rng, 400.0, 300.0);
		for step in 0..5000 {
			let dt = [0.0, 0.016, 0.05, 3.0][step % 4];
			field.update(dt);
			for p in &field.particles {
				assert!((-20.0..=420.0).contains(&p.x), "x {}", p.x);
				assert!((-20.0..=320.0).contains(&p.y), "y {}", p.y);
			}
		}
	}

	#[test]
	fn stale_positions_wrap_after_shrink() {
		let (mut field, mut rng) = field();
		field.seed(&mut rng, 400.0, 300.0);
		field.seed(&mut rng, 60.0, 60.0);
		field.update(0.0);
		for p in &field.particles {
			assert!((-20.0..=80.0).contains(&p.x));
			assert!((-20.0..=80.0).contains(&p.y));
		}
	}

	#[test]
	fn non_finite_dt_leaves_field_in_bounds() {
		let (mut field, mut rng) = field();
		field.seed(&mut rng, 400.0, 300.0);
		let before: Vec<(f64, f64)> = field.particles.iter().map(|p| (p.x, p.y)).collect();
		field.update(f64::NAN);
		field.update(f64::INFINITY);
		let after: Vec<(f64, f64)> = field.particles.iter().map(|p| (p.x, p.y)).collect();
		assert_eq!(before, after);

		field.update(0.016);
		for p in &field.particles {
			assert!((-20.0..=420.0).contains(&p.x), "x {}", p.x);
			assert!((-20.0..=320.0).contains(&p.y), "y {}", p.y);
		}
	}

	#[test]
	fn update_ignores_negative_dt() {
		let (mut field, mut rng) = field();
		field.seed(&mut rng, 400.0, 300.0);
		let before: Vec<f64> = field.particles.iter().map(|p| p.x).collect();
		field.update(-1.0);
		let after: Vec<f64> = field.particles.iter().map(|p| p.x).collect();
		assert_eq!(before, after);
	}
}
