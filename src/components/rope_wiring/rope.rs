//! Rope simulation: chains of point masses held together by distance
//! constraints, integrated once per animation frame.

use std::collections::HashMap;
use std::fmt;

use glam::DVec2;

use super::config::PhysicsConfig;
use super::geometry::RopeEndpoints;

/// Stand-in distance for coincident points, keeps corrections finite.
const MIN_DISTANCE: f64 = 1e-4;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RopePoint {
	pub pos: DVec2,
	pub vel: DVec2,
}

#[derive(Clone, Debug)]
pub struct Rope {
	points: Vec<RopePoint>,
	rest_length: f64,
}

fn taut_segment(ends: RopeEndpoints, segments: usize) -> f64 {
	ends.span() / segments as f64
}

fn finite_or_zero(v: DVec2) -> DVec2 {
	if v.is_finite() { v } else { DVec2::ZERO }
}

impl Rope {
	/// Straight rope between the endpoints, at rest.
	pub fn new(ends: RopeEndpoints, config: &PhysicsConfig) -> Self {
		let segments = config.segments.max(1);
		let points = (0..=segments)
			.map(|i| RopePoint {
				pos: ends.start.lerp(ends.end, i as f64 / segments as f64),
				vel: DVec2::ZERO,
			})
			.collect();
		Self {
			points,
			rest_length: taut_segment(ends, segments) * config.slack,
		}
	}

	pub fn points(&self) -> &[RopePoint] {
		&self.points
	}

	pub fn rest_length(&self) -> f64 {
		self.rest_length
	}

	pub fn segments(&self) -> usize {
		self.points.len() - 1
	}

	/// Snaps the first and last point onto the endpoints.
	pub fn pin(&mut self, ends: RopeEndpoints) {
		let last = self.segments();
		self.points[0].pos = ends.start;
		self.points[last].pos = ends.end;
	}

	/// Advances the rope by one frame.
	pub fn step(&mut self, ends: RopeEndpoints, config: &PhysicsConfig) {
		let target = taut_segment(ends, self.segments()) * config.slack;
		if self.rest_length > target {
			self.rest_length = target;
		}

		self.pin(ends);
		let last = self.segments();
		for point in &mut self.points[1..last] {
			point.vel = finite_or_zero(point.vel * config.damping);
			point.pos += point.vel;
		}
		for _ in 0..config.constraint_iterations {
			self.relax();
		}
		self.pin(ends);
	}

	/// One relaxation pass over every segment. End points are pinned, so at
	/// the chain ends the free neighbour takes the whole correction.
	fn relax(&mut self) {
		let last = self.segments();
		for i in 0..last {
			let delta = self.points[i + 1].pos - self.points[i].pos;
			let dist = delta.length().max(MIN_DISTANCE);
			let correction = delta * ((dist - self.rest_length) / dist);

			match (i == 0, i + 1 == last) {
				(true, true) => {}
				(true, false) => self.points[i + 1].pos -= correction,
				(false, true) => self.points[i].pos += correction,
				(false, false) => {
					self.points[i].pos += correction * 0.5;
					self.points[i + 1].pos -= correction * 0.5;
				}
			}
		}
	}

	/// Kicks interior points with a release velocity (px/s), strongest next to
	/// the dragged node and fading towards the anchor, then recoils the rest
	/// length towards its floor.
	pub fn inject(&mut self, velocity: DVec2, ends: RopeEndpoints, config: &PhysicsConfig) {
		let velocity = finite_or_zero(velocity).clamp_length_max(config.velocity_cap);
		let segments = self.segments();
		let n = segments as f64;
		for (i, point) in self.points.iter_mut().enumerate().take(segments).skip(1) {
			let falloff = 1.0 - i as f64 / n;
			point.vel += velocity * config.impulse_scale * falloff;
		}

		let floor = taut_segment(ends, segments) * config.recoil_floor;
		let recoiled = (self.rest_length * config.recoil_decay).max(floor);
		if recoiled < self.rest_length {
			self.rest_length = recoiled;
		}
	}

	/// Smooth path through the points: each interior point is the control of
	/// a quadratic curve ending at the midpoint to its successor.
	pub fn path(&self) -> RopePath {
		let last = self.segments();
		let at = |i: usize| self.points[i].pos;
		let mut curves: Vec<QuadCurve> = (1..last)
			.map(|i| QuadCurve {
				control: at(i),
				to: if i + 1 == last {
					at(last)
				} else {
					(at(i) + at(i + 1)) * 0.5
				},
			})
			.collect();
		if curves.is_empty() {
			curves.push(QuadCurve {
				control: (at(0) + at(last)) * 0.5,
				to: at(last),
			});
		}
		RopePath { start: at(0), curves }
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadCurve {
	pub control: DVec2,
	pub to: DVec2,
}

/// Drawable rope outline. `Display` renders it as an SVG path string.
#[derive(Clone, Debug, PartialEq)]
pub struct RopePath {
	pub start: DVec2,
	pub curves: Vec<QuadCurve>,
}

impl fmt::Display for RopePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "M{:.1} {:.1}", self.start.x, self.start.y)?;
		for c in &self.curves {
			write!(f, " Q{:.1} {:.1} {:.1} {:.1}", c.control.x, c.control.y, c.to.x, c.to.y)?;
		}
		Ok(())
	}
}

/// Every rope of the overlay, created lazily on first access.
#[derive(Clone, Debug)]
pub struct RopeSimulator {
	config: PhysicsConfig,
	ropes: HashMap<String, Rope>,
}

impl RopeSimulator {
	pub fn new(config: PhysicsConfig) -> Self {
		Self {
			config,
			ropes: HashMap::new(),
		}
	}

	pub fn rope(&self, key: &str) -> Option<&Rope> {
		self.ropes.get(key)
	}

	pub fn ensure(&mut self, key: &str, ends: RopeEndpoints) -> &mut Rope {
		let config = &self.config;
		self.ropes
			.entry(key.to_owned())
			.or_insert_with(|| Rope::new(ends, config))
	}

	pub fn step(&mut self, key: &str, ends: RopeEndpoints) {
		let Self { config, ropes } = self;
		ropes
			.entry(key.to_owned())
			.or_insert_with(|| Rope::new(ends, config))
			.step(ends, config);
	}

	pub fn pin(&mut self, key: &str, ends: RopeEndpoints) {
		self.ensure(key, ends).pin(ends);
	}

	pub fn inject(&mut self, key: &str, velocity: DVec2, ends: RopeEndpoints) {
		let Self { config, ropes } = self;
		ropes
			.entry(key.to_owned())
			.or_insert_with(|| Rope::new(ends, config))
			.inject(velocity, ends, config);
	}

	/// Drops the rope so the next access lays it out afresh.
	pub fn reset(&mut self, key: &str) {
		self.ropes.remove(key);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ends(ax: f64, ay: f64, bx: f64, by: f64) -> RopeEndpoints {
		RopeEndpoints {
			start: DVec2::new(ax, ay),
			end: DVec2::new(bx, by),
		}
	}

	fn max_constraint_error(rope: &Rope) -> f64 {
		rope.points
			.windows(2)
			.map(|w| (w[0].pos.distance(w[1].pos) - rope.rest_length).abs() / rope.rest_length)
			.fold(0.0, f64::max)
	}

	#[test]
	fn new_rope_is_straight_and_slightly_slack() {
		let config = PhysicsConfig::hubs();
		let rope = Rope::new(ends(0.0, 0.0, 120.0, 0.0), &config);
		assert_eq!(rope.points().len(), 13);
		assert_eq!(rope.points()[6].pos, DVec2::new(60.0, 0.0));
		assert!((rope.rest_length() - 10.2).abs() < 1e-9);
		assert!(rope.points().iter().all(|p| p.vel == DVec2::ZERO));
	}

	#[test]
	fn endpoints_stay_pinned_through_motion() {
		let config = PhysicsConfig::hubs();
		let mut rope = Rope::new(ends(0.0, 0.0, 200.0, 50.0), &config);
		rope.inject(DVec2::new(900.0, -400.0), ends(0.0, 0.0, 200.0, 50.0), &config);
		for tick in 0..50 {
			let t = tick as f64;
			let e = ends(t * 3.0, 10.0 + t, 200.0, 50.0 + t * 0.5);
			rope.step(e, &config);
			assert_eq!(rope.points()[0].pos, e.start);
			assert_eq!(rope.points()[12].pos, e.end);
		}
	}

	#[test]
	fn rest_length_never_grows() {
		let config = PhysicsConfig::hubs();
		let mut rope = Rope::new(ends(0.0, 0.0, 100.0, 0.0), &config);
		let mut previous = rope.rest_length();
		for tick in 0..40 {
			// Anchors first converge, then pull apart well beyond the initial span.
			let x = if tick < 20 { 100.0 - tick as f64 * 3.0 } else { 40.0 + tick as f64 * 10.0 };
			rope.step(ends(0.0, 0.0, x, 0.0), &config);
			if tick % 7 == 0 {
				rope.inject(DVec2::new(300.0, 0.0), ends(0.0, 0.0, x, 0.0), &config);
			}
			assert!(rope.rest_length() <= previous);
			previous = rope.rest_length();
		}
	}

	#[test]
	fn sagging_rope_settles_onto_its_rest_length() {
		let config = PhysicsConfig::hubs();
		let e = ends(100.0, 200.0, 340.0, 200.0);
		let mut rope = Rope::new(e, &config);
		for i in 1..12 {
			let t = i as f64 / 12.0;
			let zigzag = if i % 2 == 1 { 3.0 } else { -3.0 };
			rope.points[i].pos.y = 200.0 + 60.0 * t * (1.0 - t) + zigzag;
		}
		assert!(max_constraint_error(&rope) > 0.05);

		for _ in 0..10 {
			rope.step(e, &config);
		}
		assert!(max_constraint_error(&rope) < 0.01);
	}

	#[test]
	fn coincident_endpoints_stay_finite() {
		let config = PhysicsConfig::hubs();
		let e = ends(50.0, 50.0, 50.0, 50.0);
		let mut rope = Rope::new(e, &config);
		rope.inject(DVec2::new(100.0, 100.0), e, &config);
		for _ in 0..5 {
			rope.step(e, &config);
		}
		assert!(rope.points().iter().all(|p| p.pos.is_finite() && p.vel.is_finite()));
		assert_eq!(rope.rest_length(), 0.0);
	}

	#[test]
	fn impulse_fades_towards_the_anchor() {
		let config = PhysicsConfig::hubs();
		let e = ends(0.0, 0.0, 240.0, 0.0);
		let mut rope = Rope::new(e, &config);
		rope.inject(DVec2::new(600.0, 0.0), e, &config);

		let vx: Vec<f64> = rope.points().iter().map(|p| p.vel.x).collect();
		assert_eq!(vx[0], 0.0);
		assert_eq!(vx[12], 0.0);
		assert!((vx[1] - 600.0 * 0.016 * 11.0 / 12.0).abs() < 1e-9);
		assert!(vx[1..12].windows(2).all(|w| w[0] > w[1] && w[1] > 0.0));
	}

	#[test]
	fn impulse_speed_is_capped() {
		let config = PhysicsConfig::flat();
		let e = ends(0.0, 0.0, 240.0, 0.0);
		let mut rope = Rope::new(e, &config);
		rope.inject(DVec2::new(3000.0, 4000.0), e, &config);
		let expected = DVec2::new(480.0, 640.0) * config.impulse_scale * 11.0 / 12.0;
		assert!(rope.points()[1].vel.distance(expected) < 1e-9);
	}

	#[test]
	fn non_finite_impulses_are_ignored() {
		let config = PhysicsConfig::hubs();
		let e = ends(0.0, 0.0, 240.0, 0.0);
		let mut rope = Rope::new(e, &config);
		rope.inject(DVec2::new(f64::NAN, f64::INFINITY), e, &config);
		assert!(rope.points().iter().all(|p| p.vel == DVec2::ZERO));
	}

	#[test]
	fn repeated_releases_recoil_down_to_the_floor() {
		let config = PhysicsConfig::flat();
		let e = ends(0.0, 0.0, 240.0, 0.0);
		let mut rope = Rope::new(e, &config);
		let initial = rope.rest_length();
		rope.inject(DVec2::ZERO, e, &config);
		assert!((rope.rest_length() - initial * config.recoil_decay).abs() < 1e-9);

		for _ in 0..500 {
			rope.inject(DVec2::ZERO, e, &config);
		}
		assert!((rope.rest_length() - 20.0 * config.recoil_floor).abs() < 1e-9);
	}

	#[test]
	fn path_passes_through_midpoints() {
		let config = PhysicsConfig::hubs();
		let rope = Rope::new(ends(0.0, 0.0, 120.0, 0.0), &config);
		let path = rope.path();
		assert_eq!(path.start, DVec2::ZERO);
		assert_eq!(path.curves.len(), 11);
		assert_eq!(path.curves[0].control, DVec2::new(10.0, 0.0));
		assert_eq!(path.curves[0].to, DVec2::new(15.0, 0.0));
		assert_eq!(path.curves[10].to, DVec2::new(120.0, 0.0));
		let svg = path.to_string();
		assert!(svg.starts_with("M0.0 0.0 Q10.0 0.0 15.0 0.0"));
		assert!(svg.ends_with("Q110.0 0.0 120.0 0.0"));
	}

	#[test]
	fn simulator_creates_ropes_lazily_and_resets_them() {
		let mut sim = RopeSimulator::new(PhysicsConfig::hubs());
		assert!(sim.rope("a").is_none());
		sim.step("a", ends(0.0, 0.0, 120.0, 0.0));
		assert_eq!(sim.rope("a").map(|r| r.points().len()), Some(13));
		sim.reset("a");
		assert!(sim.rope("a").is_none());
	}
}
