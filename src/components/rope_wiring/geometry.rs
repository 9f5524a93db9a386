//! Rope endpoint geometry.
//!
//! [`GeometryCache`] keeps the last known rectangles of the chat container and
//! of every node, keyed by node id, and answers endpoint queries from that
//! snapshot alone. Queries have no side effects, so every rope advanced within
//! one frame sees the same layout, and tests can feed synthetic geometry.

use std::collections::HashMap;

use glam::DVec2;
use thiserror::Error;

use super::types::Side;

/// Axis-aligned rectangle in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	/// Top-left corner.
	pub origin: DVec2,
	/// Width and height.
	pub size: DVec2,
}

impl Rect {
	/// Rectangle from its top-left corner and size.
	pub fn new(origin: DVec2, size: DVec2) -> Self {
		Self { origin, size }
	}

	/// Rectangle in the shape of a DOM bounding box.
	pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self::new(DVec2::new(x, y), DVec2::new(width, height))
	}

	/// Left edge.
	pub fn left(&self) -> f64 {
		self.origin.x
	}

	/// Right edge.
	pub fn right(&self) -> f64 {
		self.origin.x + self.size.x
	}

	/// Top edge.
	pub fn top(&self) -> f64 {
		self.origin.y
	}

	/// Bottom edge.
	pub fn bottom(&self) -> f64 {
		self.origin.y + self.size.y
	}

	/// Center point.
	pub fn center(&self) -> DVec2 {
		self.origin + self.size * 0.5
	}
}

/// Where the far end of a rope is attached.
#[derive(Clone, Debug, PartialEq)]
pub enum Anchor {
	/// Center of the hub node with this id.
	Hub(String),
	/// Container edge on the given side, at its vertical middle.
	ContainerMiddle(Side),
	/// Container edge on the given side, at a fixed fraction of its height.
	ContainerRatio { side: Side, ratio: f64 },
}

/// Both ends of a rope: `start` is the node center, `end` the anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RopeEndpoints {
	pub start: DVec2,
	pub end: DVec2,
}

impl RopeEndpoints {
	pub fn span(&self) -> f64 {
		self.start.distance(self.end)
	}
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
	#[error("no geometry for node `{0}`")]
	UnknownNode(String),
	#[error("container has not been measured")]
	MissingContainer,
	#[error("hub `{hub}` of node `{node}` has no geometry")]
	MissingHub { node: String, hub: String },
}

/// Point on the container's `side` edge at `ratio` of its height, kept at
/// least `inset` pixels from the top and bottom.
pub fn container_edge_point(container: &Rect, side: Side, ratio: f64, inset: f64) -> DVec2 {
	let x = match side {
		Side::Left => container.left(),
		Side::Right => container.right(),
	};
	let (lo, hi) = (container.top() + inset, container.bottom() - inset);
	let y = if lo <= hi {
		(container.top() + container.size.y * ratio).clamp(lo, hi)
	} else {
		container.center().y
	};
	DVec2::new(x, y)
}

#[derive(Clone, Debug)]
pub struct GeometryCache {
	viewport: DVec2,
	container: Option<Rect>,
	nodes: HashMap<String, Rect>,
	anchors: HashMap<String, Anchor>,
	edge_inset: f64,
	stale: bool,
}

impl GeometryCache {
	pub fn new(viewport: DVec2, edge_inset: f64) -> Self {
		Self {
			viewport,
			container: None,
			nodes: HashMap::new(),
			anchors: HashMap::new(),
			edge_inset,
			stale: true,
		}
	}

	pub fn viewport(&self) -> DVec2 {
		self.viewport
	}

	pub fn set_viewport(&mut self, viewport: DVec2) {
		self.viewport = viewport;
	}

	pub fn container(&self) -> Option<Rect> {
		self.container
	}

	pub fn set_container(&mut self, container: Option<Rect>) {
		self.container = container;
	}

	pub fn node(&self, id: &str) -> Option<Rect> {
		self.nodes.get(id).copied()
	}

	pub fn set_node(&mut self, id: &str, rect: Rect) {
		match self.nodes.get_mut(id) {
			Some(r) => *r = rect,
			None => {
				self.nodes.insert(id.to_owned(), rect);
			}
		}
	}

	pub fn set_anchor(&mut self, id: &str, anchor: Anchor) {
		self.anchors.insert(id.to_owned(), anchor);
	}

	pub fn anchor(&self, id: &str) -> Option<&Anchor> {
		self.anchors.get(id)
	}

	/// Marks DOM measurements as outdated, after a resize or scroll.
	pub fn invalidate(&mut self) {
		self.stale = true;
	}

	pub fn is_stale(&self) -> bool {
		self.stale
	}

	pub fn mark_fresh(&mut self) {
		self.stale = false;
	}

	/// Current endpoints of the rope keyed by `key`.
	pub fn endpoints(&self, key: &str) -> Result<RopeEndpoints, GeometryError> {
		let start = self
			.node(key)
			.ok_or_else(|| GeometryError::UnknownNode(key.to_owned()))?
			.center();
		let anchor = self
			.anchors
			.get(key)
			.ok_or_else(|| GeometryError::UnknownNode(key.to_owned()))?;

		let end = match anchor {
			Anchor::Hub(hub) => self
				.node(hub)
				.ok_or_else(|| GeometryError::MissingHub {
					node: key.to_owned(),
					hub: hub.clone(),
				})?
				.center(),
			Anchor::ContainerMiddle(side) => {
				let container = self.container.ok_or(GeometryError::MissingContainer)?;
				container_edge_point(&container, *side, 0.5, self.edge_inset)
			}
			Anchor::ContainerRatio { side, ratio } => {
				let container = self.container.ok_or(GeometryError::MissingContainer)?;
				container_edge_point(&container, *side, *ratio, self.edge_inset)
			}
		};
		Ok(RopeEndpoints { start, end })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cache() -> GeometryCache {
		let mut cache = GeometryCache::new(DVec2::new(1280.0, 800.0), 24.0);
		cache.set_container(Some(Rect::from_xywh(300.0, 100.0, 600.0, 600.0)));
		cache.set_node("hub", Rect::from_xywh(100.0, 300.0, 120.0, 40.0));
		cache.set_anchor("hub", Anchor::ContainerMiddle(Side::Left));
		cache.set_node("child", Rect::from_xywh(20.0, 200.0, 40.0, 40.0));
		cache.set_anchor("child", Anchor::Hub("hub".into()));
		cache
	}

	#[test]
	fn hub_ropes_end_at_container_middle() {
		let ends = cache().endpoints("hub").unwrap();
		assert_eq!(ends.start, DVec2::new(160.0, 320.0));
		assert_eq!(ends.end, DVec2::new(300.0, 400.0));
	}

	#[test]
	fn child_ropes_end_at_hub_center() {
		let ends = cache().endpoints("child").unwrap();
		assert_eq!(ends.start, DVec2::new(40.0, 220.0));
		assert_eq!(ends.end, DVec2::new(160.0, 320.0));
	}

	#[test]
	fn ratio_anchors_stay_inside_the_edge_inset() {
		let mut cache = cache();
		cache.set_node("free", Rect::from_xywh(1000.0, 90.0, 40.0, 40.0));
		cache.set_anchor("free", Anchor::ContainerRatio { side: Side::Right, ratio: 0.0 });
		assert_eq!(cache.endpoints("free").unwrap().end, DVec2::new(900.0, 124.0));

		cache.set_anchor("free", Anchor::ContainerRatio { side: Side::Right, ratio: 1.0 });
		assert_eq!(cache.endpoints("free").unwrap().end, DVec2::new(900.0, 676.0));

		cache.set_anchor("free", Anchor::ContainerRatio { side: Side::Right, ratio: 0.25 });
		assert_eq!(cache.endpoints("free").unwrap().end, DVec2::new(900.0, 250.0));
	}

	#[test]
	fn short_containers_anchor_at_their_middle() {
		let rect = Rect::from_xywh(0.0, 0.0, 100.0, 30.0);
		assert_eq!(container_edge_point(&rect, Side::Left, 0.9, 24.0), DVec2::new(0.0, 15.0));
	}

	#[test]
	fn missing_geometry_is_reported() {
		let mut cache = cache();
		assert_eq!(
			cache.endpoints("nope"),
			Err(GeometryError::UnknownNode("nope".into()))
		);
		cache.set_anchor("child", Anchor::Hub("gone".into()));
		assert!(matches!(cache.endpoints("child"), Err(GeometryError::MissingHub { .. })));
		cache.set_container(None);
		assert_eq!(cache.endpoints("hub"), Err(GeometryError::MissingContainer));
	}
}
