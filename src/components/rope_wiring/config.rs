//! Tunable constants and the node layout, loadable from JSON.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

use super::types::{GroupDescriptor, GroupingMode, NodeDescriptor, Side};

/// Physics constants shared by every rope.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
	/// Number of intervals per rope; a rope has `segments + 1` points.
	pub segments: usize,
	/// Per-tick velocity multiplier for interior points.
	pub damping: f64,
	/// Relaxation passes per tick.
	pub constraint_iterations: usize,
	/// Release speed cap in px/s.
	pub velocity_cap: f64,
	/// Rest length relative to the taut per-segment length.
	pub slack: f64,
	/// Converts a release velocity in px/s into a per-tick point velocity.
	pub impulse_scale: f64,
	/// Lowest rest length a release may recoil to, as a fraction of taut.
	pub recoil_floor: f64,
	/// Rest length multiplier applied on every release.
	pub recoil_decay: f64,
}

impl PhysicsConfig {
	/// Constants of the hub/child layout.
	pub fn hubs() -> Self {
		Self {
			segments: 12,
			damping: 0.988,
			constraint_iterations: 3,
			velocity_cap: 1200.0,
			slack: 1.02,
			impulse_scale: 0.016,
			recoil_floor: 0.9,
			recoil_decay: 0.995,
		}
	}

	/// Constants of the flat layout, where every node is wired to the container.
	pub fn flat() -> Self {
		Self {
			damping: 0.965,
			velocity_cap: 800.0,
			recoil_floor: 0.6,
			recoil_decay: 0.98,
			..Self::hubs()
		}
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.segments < 2 {
			return Err(ConfigError::TooFewSegments(self.segments));
		}
		if !(self.damping > 0.0 && self.damping < 1.0) {
			return Err(ConfigError::Damping(self.damping));
		}
		if !(self.velocity_cap.is_finite() && self.velocity_cap > 0.0) {
			return Err(ConfigError::VelocityCap(self.velocity_cap));
		}
		Ok(())
	}
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self::hubs()
	}
}

/// Pixel margins, gesture thresholds and fan-out geometry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Minimum distance from the viewport's left, right and bottom edges.
	pub margin: f64,
	/// Minimum distance from the top of the viewport.
	pub top_margin: f64,
	/// Distance nodes must keep from the container edge on their side.
	pub side_gap: f64,
	/// Pointer travel on either axis that turns a press into a drag.
	pub drag_threshold: f64,
	/// Lower bound for the time between two drag samples.
	pub min_sample_ms: f64,
	/// Anchors on the container edge stay this far from its top and bottom.
	pub edge_inset: f64,
	/// Bounds for a node's anchor height as a fraction of the container.
	pub anchor_ratio_min: f64,
	/// See `anchor_ratio_min`.
	pub anchor_ratio_max: f64,
	/// Arc covered by an opened group's children.
	pub fan_span_degrees: f64,
	/// Distance from the hub center to its children's centers.
	pub fan_radius: f64,
	/// Extra radius for every other child.
	pub fan_stagger: f64,
	/// Size of nodes without one in their descriptor, until measured.
	pub node_size: [f64; 2],
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			margin: 8.0,
			top_margin: 80.0,
			side_gap: 12.0,
			drag_threshold: 4.0,
			min_sample_ms: 16.0,
			edge_inset: 24.0,
			anchor_ratio_min: 0.05,
			anchor_ratio_max: 0.95,
			fan_span_degrees: 150.0,
			fan_radius: 120.0,
			fan_stagger: 16.0,
			node_size: [44.0, 44.0],
		}
	}
}

/// Why a config document was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The document is not valid JSON for this schema.
	#[error("invalid wiring config JSON: {0}")]
	Json(#[from] serde_json::Error),
	/// Two nodes share an id.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),
	/// A group names a hub that is not a node.
	#[error("group hub `{0}` is not a configured node")]
	UnknownHub(String),
	/// A group lists a member that is not a node.
	#[error("group `{hub}` lists unknown member `{member}`")]
	UnknownMember {
		/// Hub of the group.
		hub: String,
		/// The member that was not found.
		member: String,
	},
	/// A node is listed by two groups.
	#[error("node `{0}` belongs to more than one group")]
	MultipleGroups(String),
	/// A hub is listed as another group's member.
	#[error("node `{0}` cannot be both a hub and a group member")]
	NestedHub(String),
	/// Fewer than two segments per rope.
	#[error("ropes need at least 2 segments, got {0}")]
	TooFewSegments(usize),
	/// Damping outside the open interval (0, 1).
	#[error("damping must be between 0 and 1, got {0}")]
	Damping(f64),
	/// Non-positive or non-finite velocity cap.
	#[error("velocity cap must be positive, got {0}")]
	VelocityCap(f64),
}

/// Physics settings as written in a config document. Fields left out keep
/// the value of the preset for the document's grouping mode.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PhysicsOverrides {
	segments: Option<usize>,
	damping: Option<f64>,
	constraint_iterations: Option<usize>,
	velocity_cap: Option<f64>,
	slack: Option<f64>,
	impulse_scale: Option<f64>,
	recoil_floor: Option<f64>,
	recoil_decay: Option<f64>,
}

impl PhysicsOverrides {
	fn apply(self, base: PhysicsConfig) -> PhysicsConfig {
		PhysicsConfig {
			segments: self.segments.unwrap_or(base.segments),
			damping: self.damping.unwrap_or(base.damping),
			constraint_iterations: self.constraint_iterations.unwrap_or(base.constraint_iterations),
			velocity_cap: self.velocity_cap.unwrap_or(base.velocity_cap),
			slack: self.slack.unwrap_or(base.slack),
			impulse_scale: self.impulse_scale.unwrap_or(base.impulse_scale),
			recoil_floor: self.recoil_floor.unwrap_or(base.recoil_floor),
			recoil_decay: self.recoil_decay.unwrap_or(base.recoil_decay),
		}
	}
}

/// Config document as written in the page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WiringDocument {
	mode: GroupingMode,
	physics: PhysicsOverrides,
	layout: LayoutConfig,
	nodes: Option<Vec<NodeDescriptor>>,
	groups: Option<Vec<GroupDescriptor>>,
}

impl From<WiringDocument> for WiringConfig {
	/// The built-in layout fills in what the document leaves out. Its groups
	/// only apply when the document keeps the built-in nodes too.
	fn from(doc: WiringDocument) -> Self {
		let builtin = WiringConfig::default();
		let base = match doc.mode {
			GroupingMode::Hubs => PhysicsConfig::hubs(),
			GroupingMode::Flat => PhysicsConfig::flat(),
		};
		let groups = match (&doc.nodes, doc.groups) {
			(_, Some(groups)) => groups,
			(None, None) => builtin.groups,
			(Some(_), None) => Vec::new(),
		};
		Self {
			mode: doc.mode,
			physics: doc.physics.apply(base),
			layout: doc.layout,
			nodes: doc.nodes.unwrap_or(builtin.nodes),
			groups,
		}
	}
}

/// Complete configuration of the wiring overlay.
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "WiringDocument")]
pub struct WiringConfig {
	/// Hub-and-children or flat wiring.
	pub mode: GroupingMode,
	/// Rope constants.
	pub physics: PhysicsConfig,
	/// Margins, gestures and fan-out geometry.
	pub layout: LayoutConfig,
	/// Every node, in display order.
	pub nodes: Vec<NodeDescriptor>,
	/// Hubs and their children; ignored in flat mode.
	pub groups: Vec<GroupDescriptor>,
}

impl WiringConfig {
	/// Parse and validate a JSON document.
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks ids, group topology and physics constants.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.physics.validate()?;

		let mut ids = HashSet::new();
		for node in &self.nodes {
			if !ids.insert(node.id.as_str()) {
				return Err(ConfigError::DuplicateNode(node.id.clone()));
			}
		}
		if self.mode == GroupingMode::Flat {
			return Ok(());
		}

		let hubs: HashSet<&str> = self.groups.iter().map(|g| g.hub.as_str()).collect();
		let mut owner: HashMap<&str, &str> = HashMap::new();
		for group in &self.groups {
			if !ids.contains(group.hub.as_str()) {
				return Err(ConfigError::UnknownHub(group.hub.clone()));
			}
			for member in &group.members {
				if !ids.contains(member.as_str()) {
					return Err(ConfigError::UnknownMember {
						hub: group.hub.clone(),
						member: member.clone(),
					});
				}
				if hubs.contains(member.as_str()) {
					return Err(ConfigError::NestedHub(member.clone()));
				}
				if owner.insert(member, &group.hub).is_some() {
					return Err(ConfigError::MultipleGroups(member.clone()));
				}
			}
		}
		Ok(())
	}

	/// Id of the node whose prompt matches `text`, ignoring case and surrounding space.
	pub fn node_for_prompt(&self, text: &str) -> Option<&str> {
		let text = text.trim();
		self.nodes
			.iter()
			.find(|n| {
				n.prompt
					.as_deref()
					.is_some_and(|p| p.trim().eq_ignore_ascii_case(text))
			})
			.map(|n| n.id.as_str())
	}
}

impl Default for WiringConfig {
	/// The chat assistant's functions: document sources, animal APIs and mood replies.
	fn default() -> Self {
		let hub = |id: &str, label: &str, side: Side, y: f64| NodeDescriptor {
			size: Some([124.0, 44.0]),
			..NodeDescriptor::new(id, label, side, 240.0, y)
		};
		let child = |id: &str, label: &str, side: Side, prompt: &str| {
			NodeDescriptor::new(id, label, side, 240.0, 160.0).with_prompt(prompt)
		};

		let nodes = vec![
			hub("docs", "📚 Documents", Side::Left, 180.0),
			child("pdf-python", "🐍", Side::Left, "What is the difference between a list and a tuple in Python?"),
			child("pdf-constitution", "⚖️", Side::Left, "What does the constitution say about freedom of expression?"),
			child("pdf-clean", "🏗️", Side::Left, "What is the dependency rule in Clean Architecture?"),
			hub("animals", "🐾 Animals", Side::Right, 260.0),
			child("dog-photo", "🐶", Side::Right, "Show me a dog photo"),
			child("dog-facts", "🦴", Side::Right, "Tell me a dog fact"),
			child("cat-facts", "🐱", Side::Right, "Tell me a cat fact"),
			child("cat-photo", "📷", Side::Right, "Show me a cat photo"),
			child("fox-photo", "🦊", Side::Right, "Show me a fox photo"),
			child("duck-photo", "🦆", Side::Right, "Show me a duck photo"),
			hub("mood", "💬 Mood", Side::Left, 460.0),
			child("mood-chat", "😊", Side::Left, "I feel great today!"),
			child("mood-stats-today", "📅", Side::Left, "How many times was I happy today?"),
			child("mood-stats-all", "📊", Side::Left, "Show my mood statistics"),
		];
		let group = |hub: &str, members: &[&str]| GroupDescriptor {
			hub: hub.into(),
			members: members.iter().map(|m| m.to_string()).collect(),
		};

		Self {
			mode: GroupingMode::Hubs,
			physics: PhysicsConfig::hubs(),
			layout: LayoutConfig::default(),
			nodes,
			groups: vec![
				group("docs", &["pdf-python", "pdf-constitution", "pdf-clean"]),
				group(
					"animals",
					&["dog-photo", "dog-facts", "cat-facts", "cat-photo", "fox-photo", "duck-photo"],
				),
				group("mood", &["mood-chat", "mood-stats-today", "mood-stats-all"]),
			],
		}
	}
}
