//! Static descriptors for the wired nodes, as read from configuration.

use serde::Deserialize;

/// Which edge of the chat container a node lives beside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	/// Left of the container.
	#[default]
	Left,
	/// Right of the container.
	Right,
}

impl Side {
	/// Base fan-out angle in degrees: right hubs fan around 0°, left hubs around 180°.
	pub fn base_angle(self) -> f64 {
		match self {
			Side::Left => 180.0,
			Side::Right => 0.0,
		}
	}

	/// Lowercase name, as used in configuration.
	pub fn as_str(self) -> &'static str {
		match self {
			Side::Left => "left",
			Side::Right => "right",
		}
	}
}

/// Whether nodes hang off hubs or each connect straight to the container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
	/// Children hang off hubs; hubs are wired to the container.
	#[default]
	Hubs,
	/// Every node is wired to the container.
	Flat,
}

/// A node as described in configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct NodeDescriptor {
	/// Unique identifier, also used as the key of the node's rope.
	pub id: String,
	/// Text shown on the node.
	pub label: String,
	/// Container edge the node belongs to.
	#[serde(default)]
	pub side: Side,
	/// Horizontal offset in pixels: from the left edge for left nodes, from the
	/// right edge for right nodes.
	pub x: f64,
	/// Offset from the top of the viewport in pixels.
	pub y: f64,
	/// Initial size in pixels, until the rendered element is measured.
	#[serde(default)]
	pub size: Option<[f64; 2]>,
	/// Prompt handed to the chat input when the node is clicked.
	#[serde(default)]
	pub prompt: Option<String>,
}

/// A hub and the nodes it fans out when opened.
#[derive(Clone, Debug, Deserialize)]
pub struct GroupDescriptor {
	/// Id of the hub node.
	pub hub: String,
	/// Ids of the children, in fan-out order.
	pub members: Vec<String>,
}

impl NodeDescriptor {
	/// Descriptor with the default size and no prompt.
	pub fn new(id: &str, label: &str, side: Side, x: f64, y: f64) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			side,
			x,
			y,
			size: None,
			prompt: None,
		}
	}

	/// Sets the prompt emitted when the node is clicked.
	pub fn with_prompt(mut self, prompt: &str) -> Self {
		self.prompt = Some(prompt.into());
		self
	}
}
