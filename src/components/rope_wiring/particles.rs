//! Slowly drifting background particles.

use glam::DVec2;

use super::theme::ParticleConfig;

/// Deterministic pseudo-random value in `[0, 1)`.
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

fn wrap(v: f64, max: f64) -> f64 {
	let w = v.rem_euclid(max);
	// rem_euclid can round up to `max` for tiny negative inputs
	if w >= max { 0.0 } else { w }
}

#[derive(Clone, Debug)]
pub struct Particle {
	pub pos: DVec2,
	pub vel: DVec2,
	pub radius: f64,
}

#[derive(Clone, Debug)]
pub struct ParticleSystem {
	particles: Vec<Particle>,
	bounds: DVec2,
}

impl ParticleSystem {
	pub fn new(config: &ParticleConfig, width: f64, height: f64) -> Self {
		let particles = (0..config.count)
			.map(|i| {
				let seed = i * 4;
				let angle = rand_simple(seed + 2) * std::f64::consts::TAU;
				Particle {
					pos: DVec2::new(rand_simple(seed) * width, rand_simple(seed + 1) * height),
					vel: DVec2::new(angle.cos(), angle.sin()) * config.speed,
					radius: config.min_radius
						+ rand_simple(seed + 3) * (config.max_radius - config.min_radius),
				}
			})
			.collect();
		Self {
			particles,
			bounds: DVec2::new(width, height),
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Moves every particle by `dt` seconds, wrapping at the edges.
	pub fn update(&mut self, dt: f64) {
		let bounds = self.bounds;
		if bounds.x <= 0.0 || bounds.y <= 0.0 {
			return;
		}
		for p in &mut self.particles {
			p.pos += p.vel * dt;
			p.pos.x = wrap(p.pos.x, bounds.x);
			p.pos.y = wrap(p.pos.y, bounds.y);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.bounds = DVec2::new(width, height);
		self.update(0.0);
	}
}
