use std::collections::HashMap;

use glam::DVec2;

use super::geometry::Rect;
use super::types::{NodeDescriptor, Side};

/// Runtime state of a wired node. Positions are viewport pixels of the
/// top-left corner.
#[derive(Clone, Debug)]
pub struct Node {
	pub id: String,
	pub label: String,
	pub side: Side,
	pub position: DVec2,
	pub size: DVec2,
	/// Vertical anchor on the container edge as a fraction of its height,
	/// fixed at construction.
	pub anchor_ratio: f64,
	pub group: Option<String>,
	pub prompt: Option<String>,
	pub visible: bool,
	pub active: bool,
}

impl Node {
	pub(crate) fn from_descriptor(desc: &NodeDescriptor, viewport: DVec2, default_size: DVec2) -> Self {
		let size = desc.size.map(DVec2::from).unwrap_or(default_size);
		let x = match desc.side {
			Side::Left => desc.x,
			Side::Right => viewport.x - desc.x - size.x,
		};
		Self {
			id: desc.id.clone(),
			label: desc.label.clone(),
			side: desc.side,
			position: DVec2::new(x, desc.y),
			size,
			anchor_ratio: 0.5,
			group: None,
			prompt: desc.prompt.clone(),
			visible: true,
			active: false,
		}
	}

	pub fn rect(&self) -> Rect {
		Rect::new(self.position, self.size)
	}

	pub fn center(&self) -> DVec2 {
		self.position + self.size * 0.5
	}

	/// Moves the node so its center lands on `center`.
	pub fn center_on(&mut self, center: DVec2) {
		self.position = center - self.size * 0.5;
	}
}

/// Nodes in configuration order, addressable by id.
#[derive(Clone, Debug, Default)]
pub struct NodeTable {
	nodes: Vec<Node>,
	index: HashMap<String, usize>,
}

impl NodeTable {
	pub fn insert(&mut self, node: Node) {
		match self.index.get(&node.id) {
			Some(&i) => self.nodes[i] = node,
			None => {
				self.index.insert(node.id.clone(), self.nodes.len());
				self.nodes.push(node);
			}
		}
	}

	pub fn get(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.index.get(id).map(|&i| &mut self.nodes[i])
	}

	pub fn iter(&self) -> impl Iterator<Item = &Node> {
		self.nodes.iter()
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
		self.nodes.iter_mut()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn right_nodes_are_offset_from_the_right_edge() {
		let desc = NodeDescriptor::new("r", "R", Side::Right, 40.0, 100.0);
		let node = Node::from_descriptor(&desc, DVec2::new(1000.0, 800.0), DVec2::new(60.0, 30.0));
		assert_eq!(node.position, DVec2::new(900.0, 100.0));
		assert_eq!(node.center(), DVec2::new(930.0, 115.0));
	}

	#[test]
	fn insert_replaces_existing_id() {
		let mut table = NodeTable::default();
		let desc = NodeDescriptor::new("a", "A", Side::Left, 10.0, 10.0);
		let mut node = Node::from_descriptor(&desc, DVec2::new(800.0, 600.0), DVec2::splat(40.0));
		table.insert(node.clone());
		node.center_on(DVec2::new(100.0, 100.0));
		table.insert(node);
		assert_eq!(table.len(), 1);
		assert_eq!(table.get("a").map(|n| n.position), Some(DVec2::new(80.0, 80.0)));
	}
}
