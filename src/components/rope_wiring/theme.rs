//! Colours and stroke settings for the canvas layer.

#[derive(Clone, Debug)]
pub struct ParticleConfig {
	pub enabled: bool,
	pub count: usize,
	pub min_radius: f64,
	pub max_radius: f64,
	/// Drift speed in px/s.
	pub speed: f64,
	pub color: String,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			count: 70,
			min_radius: 0.6,
			max_radius: 2.2,
			speed: 14.0,
			color: "rgba(160, 200, 255, 0.35)".into(),
		}
	}
}

#[derive(Clone, Debug)]
pub struct Theme {
	pub background: String,
	pub hub_rope: String,
	pub child_rope: String,
	pub active_rope: String,
	pub rope_width: f64,
	/// Dash and gap lengths of hub ropes.
	pub dash: (f64, f64),
	/// Dash travel speed in px/s.
	pub dash_speed: f64,
	pub particles: ParticleConfig,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: "#10121c".into(),
			hub_rope: "rgba(120, 190, 255, 0.75)".into(),
			child_rope: "rgba(200, 170, 255, 0.7)".into(),
			active_rope: "rgba(255, 210, 120, 0.95)".into(),
			rope_width: 2.0,
			dash: (8.0, 5.0),
			dash_speed: 30.0,
			particles: ParticleConfig::default(),
		}
	}
}
