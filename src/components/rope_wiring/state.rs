//! The simulation context behind the wiring overlay.
//!
//! [`WiringState`] owns the node table, the geometry cache, the rope simulator
//! and both controllers. Input arrives as [`WiringCommand`]s and each command
//! reports an [`Outcome`] the caller reacts to (redraw, schedule a settle,
//! forward a prompt). Only drag and hierarchy handling move nodes; only the
//! simulator and the release impulse touch rope points.

use glam::DVec2;
use log::{debug, info, trace};

use super::config::{LayoutConfig, WiringConfig};
use super::drag::{DragBounds, DragController, clamp_position};
use super::geometry::{Anchor, GeometryCache, Rect};
use super::hierarchy::HierarchyController;
use super::node::{Node, NodeTable};
use super::rope::{Rope, RopePath, RopeSimulator};
use super::types::{GroupingMode, Side};

/// Input to [`WiringState::dispatch`]. Pointer coordinates are client
/// pixels, times are event timestamps in milliseconds.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub enum WiringCommand {
	PointerDown {
		node: String,
		pointer_id: i32,
		x: f64,
		y: f64,
		time_ms: f64,
	},
	PointerMove {
		node: String,
		pointer_id: i32,
		x: f64,
		y: f64,
		time_ms: f64,
	},
	PointerUp {
		node: String,
		pointer_id: i32,
	},
	PointerCancel {
		node: String,
		pointer_id: i32,
	},
	Click {
		node: String,
	},
	/// Deferred follow-up of a pointer-up: forget the `moved` flag.
	SettleMoved {
		node: String,
	},
	/// A node was triggered from outside the overlay.
	Activate {
		node: String,
	},
	/// The viewport changed size.
	Resize {
		width: f64,
		height: f64,
	},
	/// Rendered size of a node element.
	NodeMeasured {
		node: String,
		width: f64,
		height: f64,
	},
	/// Last step of a measurement pass; `None` when the container is gone.
	ContainerMeasured(Option<Rect>),
}

/// What a command did, so the caller knows what to refresh.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
	/// Nothing changed.
	Ignored,
	/// A drag session started.
	Pressed,
	/// A node followed the pointer; ropes should be redrawn right away.
	Moved,
	/// A drag ended; its release velocity in px/s was injected into the rope.
	Released {
		/// Clamped-position velocity at release.
		velocity: DVec2,
	},
	/// A drag was abandoned without an impulse.
	Cancelled,
	/// A click that ended a drag, swallowed.
	Suppressed,
	/// A hub click opened or closed its group.
	Toggled {
		/// The hub that was clicked.
		hub: String,
		/// Whether the group is now open.
		open: bool,
	},
	/// A click on a node with a prompt; the text goes to the chat input.
	Prompt(String),
	/// A node was marked active from outside.
	Activated {
		/// The activated node.
		node: String,
		/// Hub whose group had to be opened for it, if any.
		opened: Option<String>,
	},
	/// Sizes or the viewport changed.
	Relayout,
}

impl Outcome {
	/// Whether node positions, visibility, highlight or drag status may have
	/// changed.
	pub fn changes_layout(&self) -> bool {
		!matches!(
			self,
			Outcome::Ignored | Outcome::Suppressed | Outcome::Prompt(_)
		)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RopeKind {
	/// Hub to container edge.
	Hub,
	/// Child to its hub.
	Child,
	/// Ungrouped node to container edge.
	Free,
}

/// What the renderer needs for one rope.
#[derive(Clone, Debug)]
pub struct RopeView {
	pub key: String,
	pub kind: RopeKind,
	pub active: bool,
	pub path: RopePath,
}

/// What the DOM needs for one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeLayout {
	pub id: String,
	pub position: DVec2,
	pub visible: bool,
	pub active: bool,
	pub dragging: bool,
}

/// Nodes, geometry, ropes and gestures of one overlay.
pub struct WiringState {
	mode: GroupingMode,
	layout: LayoutConfig,
	nodes: NodeTable,
	geometry: GeometryCache,
	ropes: RopeSimulator,
	drag: DragController,
	hierarchy: HierarchyController,
	flow_time: f64,
}

impl WiringState {
	/// Builds the overlay for a viewport. `container` may be unknown until the
	/// first measurement pass.
	pub fn new(config: &WiringConfig, viewport: DVec2, container: Option<Rect>) -> Self {
		let layout = config.layout.clone();
		let default_size = DVec2::from(layout.node_size);
		let reference = container.unwrap_or(Rect::new(DVec2::ZERO, viewport));

		let mut nodes = NodeTable::default();
		for desc in &config.nodes {
			let mut node = Node::from_descriptor(desc, viewport, default_size);
			node.anchor_ratio = if reference.size.y > 0.0 {
				((node.center().y - reference.top()) / reference.size.y)
					.clamp(layout.anchor_ratio_min, layout.anchor_ratio_max)
			} else {
				0.5
			};
			nodes.insert(node);
		}

		let hierarchy = match config.mode {
			GroupingMode::Hubs => HierarchyController::new(&config.groups, &nodes),
			GroupingMode::Flat => HierarchyController::default(),
		};
		for node in nodes.iter_mut() {
			node.group = hierarchy.hub_of(&node.id).map(str::to_owned);
		}
		hierarchy.collapse_closed(&mut nodes);

		let mut geometry = GeometryCache::new(viewport, layout.edge_inset);
		geometry.set_container(container);
		for node in nodes.iter() {
			let anchor = match &node.group {
				Some(hub) => Anchor::Hub(hub.clone()),
				None if hierarchy.is_hub(&node.id) => Anchor::ContainerMiddle(node.side),
				None => Anchor::ContainerRatio {
					side: node.side,
					ratio: node.anchor_ratio,
				},
			};
			geometry.set_anchor(&node.id, anchor);
		}

		info!(
			"rope-wiring: {} nodes, {} groups ({:?} mode)",
			nodes.len(),
			hierarchy.groups().len(),
			config.mode
		);

		let mut state = Self {
			mode: config.mode,
			layout,
			nodes,
			geometry,
			ropes: RopeSimulator::new(config.physics.clone()),
			drag: DragController::default(),
			hierarchy,
			flow_time: 0.0,
		};
		state.sync_geometry();
		state
	}

	/// Grouping mode the overlay was built with.
	pub fn mode(&self) -> GroupingMode {
		self.mode
	}

	/// Runtime record of a node.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.get(id)
	}

	/// The rope of a node, once it has been created.
	pub fn rope(&self, key: &str) -> Option<&Rope> {
		self.ropes.rope(key)
	}

	/// Cached node rectangles, anchors and container.
	pub fn geometry(&self) -> &GeometryCache {
		&self.geometry
	}

	/// Whether the hub's group is open.
	pub fn is_open(&self, hub: &str) -> bool {
		self.hierarchy.is_open(hub)
	}

	/// Whether the latest gesture on `node` was a drag rather than a click.
	pub fn moved(&self, node: &str) -> bool {
		self.drag.moved(node)
	}

	/// Seconds of simulated time, drives the dash animation.
	pub fn flow_time(&self) -> f64 {
		self.flow_time
	}

	/// Current viewport size in pixels.
	pub fn viewport(&self) -> DVec2 {
		self.geometry.viewport()
	}

	/// Whether DOM sizes need to be measured again.
	pub fn needs_measure(&self) -> bool {
		self.geometry.is_stale()
	}

	/// Applies one input command.
	pub fn dispatch(&mut self, command: WiringCommand) -> Outcome {
		match command {
			WiringCommand::PointerDown {
				node,
				pointer_id,
				x,
				y,
				time_ms,
			} => match self.nodes.get(&node) {
				Some(n) if n.visible => {
					let position = n.position;
					self.drag
						.press(&node, pointer_id, DVec2::new(x, y), position, time_ms);
					Outcome::Pressed
				}
				_ => Outcome::Ignored,
			},
			WiringCommand::PointerMove {
				node,
				pointer_id,
				x,
				y,
				time_ms,
			} => self.drag_to(&node, pointer_id, DVec2::new(x, y), time_ms),
			WiringCommand::PointerUp { node, pointer_id } => {
				let Some(velocity) = self.drag.release(&node, pointer_id) else {
					return Outcome::Ignored;
				};
				match self.geometry.endpoints(&node) {
					Ok(ends) => self.ropes.inject(&node, velocity, ends),
					Err(err) => trace!("rope-wiring: no impulse for `{}`: {}", node, err),
				}
				debug!(
					"rope-wiring: released `{}` at ({:.0}, {:.0}) px/s",
					node, velocity.x, velocity.y
				);
				Outcome::Released { velocity }
			}
			WiringCommand::PointerCancel { node, pointer_id } => {
				if self.drag.cancel(&node, pointer_id) {
					Outcome::Cancelled
				} else {
					Outcome::Ignored
				}
			}
			WiringCommand::Click { node } => self.click(&node),
			WiringCommand::SettleMoved { node } => {
				self.drag.settle(&node);
				Outcome::Ignored
			}
			WiringCommand::Activate { node } => self.activate(&node),
			WiringCommand::Resize { width, height } => self.resize(DVec2::new(width, height)),
			WiringCommand::NodeMeasured {
				node,
				width,
				height,
			} => {
				let size = DVec2::new(width, height);
				let Some(n) = self.nodes.get_mut(&node) else {
					return Outcome::Ignored;
				};
				if !(size.is_finite() && width > 0.0 && height > 0.0) || n.size == size {
					return Outcome::Ignored;
				}
				n.size = size;
				self.hierarchy.collapse_closed(&mut self.nodes);
				self.sync_geometry();
				Outcome::Relayout
			}
			WiringCommand::ContainerMeasured(rect) => {
				self.geometry.set_container(rect);
				self.geometry.mark_fresh();
				Outcome::Relayout
			}
		}
	}

	fn drag_to(&mut self, id: &str, pointer_id: i32, pointer: DVec2, time_ms: f64) -> Outcome {
		let Some(node) = self.nodes.get(id) else {
			return Outcome::Ignored;
		};
		let bounds = DragBounds {
			viewport: self.geometry.viewport(),
			container: self.geometry.container(),
			side: node.side,
			size: node.size,
		};
		let Some(position) = self
			.drag
			.drag(id, pointer_id, pointer, time_ms, &bounds, &self.layout)
		else {
			return Outcome::Ignored;
		};

		if let Some(node) = self.nodes.get_mut(id) {
			node.position = position;
		}
		if self.hierarchy.is_hub(id) {
			self.hierarchy.collapse_closed(&mut self.nodes);
		}
		self.sync_geometry();
		self.refresh_rope(id);
		Outcome::Moved
	}

	fn click(&mut self, id: &str) -> Outcome {
		if self.drag.moved(id) {
			debug!("rope-wiring: click on `{}` ended a drag, ignored", id);
			return Outcome::Suppressed;
		}
		if self.hierarchy.is_hub(id) {
			let viewport = self.geometry.viewport();
			return match self
				.hierarchy
				.toggle(id, &mut self.nodes, viewport, &self.layout)
			{
				Some(open) => {
					if open {
						self.reset_children(id);
					}
					self.sync_geometry();
					Outcome::Toggled {
						hub: id.to_owned(),
						open,
					}
				}
				None => Outcome::Ignored,
			};
		}
		match self.nodes.get(id).and_then(|n| n.prompt.clone()) {
			Some(prompt) => Outcome::Prompt(prompt),
			None => Outcome::Ignored,
		}
	}

	fn activate(&mut self, id: &str) -> Outcome {
		if self.nodes.get(id).is_none() {
			return Outcome::Ignored;
		}
		let viewport = self.geometry.viewport();
		let opened = self
			.hierarchy
			.open_for(id, &mut self.nodes, viewport, &self.layout);
		if let Some(hub) = &opened {
			self.reset_children(hub);
		}
		for node in self.nodes.iter_mut() {
			node.active = node.id == id;
		}
		self.sync_geometry();
		Outcome::Activated {
			node: id.to_owned(),
			opened,
		}
	}

	/// Right nodes keep their distance from the right edge, then everything is
	/// pulled back inside the viewport.
	fn resize(&mut self, viewport: DVec2) -> Outcome {
		if !viewport.is_finite() {
			return Outcome::Ignored;
		}
		let shift = viewport.x - self.geometry.viewport().x;
		for node in self.nodes.iter_mut() {
			if node.side == Side::Right {
				node.position.x += shift;
			}
			let bounds = DragBounds {
				viewport,
				container: None,
				side: node.side,
				size: node.size,
			};
			node.position = clamp_position(node.position, &bounds, &self.layout);
		}
		self.hierarchy.collapse_closed(&mut self.nodes);
		self.geometry.set_viewport(viewport);
		self.geometry.invalidate();
		self.sync_geometry();
		Outcome::Relayout
	}

	fn reset_children(&mut self, hub: &str) {
		if let Some(group) = self.hierarchy.group(hub) {
			for child in &group.children {
				self.ropes.reset(child);
			}
		}
	}

	fn sync_geometry(&mut self) {
		for node in self.nodes.iter() {
			self.geometry.set_node(&node.id, node.rect());
		}
	}

	/// Re-pins the rope of `id`, and those hanging off it when it is a hub,
	/// without waiting for the next frame.
	pub fn refresh_rope(&mut self, id: &str) {
		let mut keys = vec![id.to_owned()];
		if let Some(group) = self.hierarchy.group(id) {
			keys.extend(group.children.iter().cloned());
		}
		for key in keys {
			let visible = self.nodes.get(&key).is_some_and(|n| n.visible);
			if !visible {
				continue;
			}
			if let Ok(ends) = self.geometry.endpoints(&key) {
				self.ropes.pin(&key, ends);
			}
		}
	}

	/// Advances every visible rope by one frame of `dt` seconds. All ropes see
	/// the same geometry snapshot.
	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
		for node in self.nodes.iter().filter(|n| n.visible) {
			match self.geometry.endpoints(&node.id) {
				Ok(ends) => self.ropes.step(&node.id, ends),
				Err(err) => trace!("rope-wiring: skipping rope `{}`: {}", node.id, err),
			}
		}
	}

	/// How the rope of `key` is anchored.
	pub fn rope_kind(&self, key: &str) -> RopeKind {
		if self.hierarchy.is_hub(key) {
			RopeKind::Hub
		} else if self.hierarchy.hub_of(key).is_some() {
			RopeKind::Child
		} else {
			RopeKind::Free
		}
	}

	/// Ropes of visible nodes, in node order.
	pub fn ropes(&self) -> Vec<RopeView> {
		self.nodes
			.iter()
			.filter(|n| n.visible)
			.filter_map(|n| {
				self.ropes.rope(&n.id).map(|rope| RopeView {
					key: n.id.clone(),
					kind: self.rope_kind(&n.id),
					active: n.active,
					path: rope.path(),
				})
			})
			.collect()
	}

	/// SVG path data for every visible rope, keyed by node id.
	pub fn paths(&self) -> Vec<(String, String)> {
		self.ropes()
			.into_iter()
			.map(|view| (view.key, view.path.to_string()))
			.collect()
	}

	/// Position and status of every node, in configuration order.
	pub fn layouts(&self) -> Vec<NodeLayout> {
		self.nodes
			.iter()
			.map(|n| NodeLayout {
				id: n.id.clone(),
				position: n.position,
				visible: n.visible,
				active: n.active,
				dragging: self.drag.is_dragging(&n.id),
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::rope_wiring::types::{GroupDescriptor, NodeDescriptor};

	const VIEWPORT: DVec2 = DVec2::new(1280.0, 800.0);

	fn container() -> Rect {
		Rect::from_xywh(400.0, 80.0, 480.0, 640.0)
	}

	fn config() -> WiringConfig {
		let hub = NodeDescriptor {
			size: Some([120.0, 40.0]),
			..NodeDescriptor::new("hub", "Hub", Side::Left, 200.0, 300.0)
		};
		WiringConfig {
			nodes: vec![
				hub,
				NodeDescriptor::new("a", "A", Side::Left, 0.0, 0.0).with_prompt("alpha"),
				NodeDescriptor::new("b", "B", Side::Left, 0.0, 0.0).with_prompt("beta"),
				NodeDescriptor::new("free", "F", Side::Right, 100.0, 200.0).with_prompt("free"),
			],
			groups: vec![GroupDescriptor {
				hub: "hub".into(),
				members: vec!["a".into(), "b".into()],
			}],
			..WiringConfig::default()
		}
	}

	fn state() -> WiringState {
		WiringState::new(&config(), VIEWPORT, Some(container()))
	}

	fn down(node: &str, x: f64, y: f64, time_ms: f64) -> WiringCommand {
		WiringCommand::PointerDown {
			node: node.into(),
			pointer_id: 1,
			x,
			y,
			time_ms,
		}
	}

	fn mv(node: &str, x: f64, y: f64, time_ms: f64) -> WiringCommand {
		WiringCommand::PointerMove {
			node: node.into(),
			pointer_id: 1,
			x,
			y,
			time_ms,
		}
	}

	fn up(node: &str) -> WiringCommand {
		WiringCommand::PointerUp {
			node: node.into(),
			pointer_id: 1,
		}
	}

	fn click(node: &str) -> WiringCommand {
		WiringCommand::Click { node: node.into() }
	}

	#[test]
	fn anchors_follow_the_node_kind() {
		let state = state();
		let g = state.geometry();
		assert_eq!(g.anchor("hub"), Some(&Anchor::ContainerMiddle(Side::Left)));
		assert_eq!(g.anchor("a"), Some(&Anchor::Hub("hub".into())));
		assert!(matches!(
			g.anchor("free"),
			Some(Anchor::ContainerRatio { side: Side::Right, .. })
		));
		assert_eq!(state.rope_kind("hub"), RopeKind::Hub);
		assert_eq!(state.rope_kind("a"), RopeKind::Child);
		assert_eq!(state.rope_kind("free"), RopeKind::Free);
	}

	#[test]
	fn closed_children_have_no_ropes() {
		let mut state = state();
		state.tick(0.016);
		let keys: Vec<String> = state.ropes().into_iter().map(|r| r.key).collect();
		assert_eq!(keys, vec!["hub".to_string(), "free".to_string()]);
	}

	#[test]
	fn clicking_a_hub_toggles_its_children() {
		let mut state = state();
		assert_eq!(
			state.dispatch(click("hub")),
			Outcome::Toggled {
				hub: "hub".into(),
				open: true
			}
		);
		state.tick(0.016);
		assert_eq!(state.ropes().len(), 4);
		let rope = state.rope("a").unwrap();
		assert_eq!(rope.points()[12].pos, state.node("hub").unwrap().center());

		state.dispatch(click("hub"));
		assert!(!state.node("a").unwrap().visible);
		assert_eq!(state.node("a").unwrap().center(), state.node("hub").unwrap().center());
	}

	#[test]
	fn drags_suppress_the_following_click() {
		let mut state = state();
		let start = state.node("hub").unwrap().position;
		state.dispatch(down("hub", 250.0, 320.0, 0.0));
		assert_eq!(state.dispatch(mv("hub", 250.0, 340.0, 50.0)), Outcome::Moved);
		assert_eq!(state.node("hub").unwrap().position, start + DVec2::new(0.0, 20.0));
		assert!(matches!(state.dispatch(up("hub")), Outcome::Released { .. }));
		assert_eq!(state.dispatch(click("hub")), Outcome::Suppressed);
		assert!(!state.is_open("hub"));

		state.dispatch(WiringCommand::SettleMoved { node: "hub".into() });
		assert!(matches!(state.dispatch(click("hub")), Outcome::Toggled { open: true, .. }));
	}

	#[test]
	fn closed_children_follow_a_dragged_hub() {
		let mut state = state();
		state.dispatch(down("hub", 250.0, 320.0, 0.0));
		state.dispatch(mv("hub", 200.0, 400.0, 50.0));
		let hub = state.node("hub").unwrap().center();
		assert_eq!(state.node("b").unwrap().center(), hub);
	}

	#[test]
	fn pressing_hidden_nodes_is_ignored() {
		let mut state = state();
		assert_eq!(state.dispatch(down("a", 0.0, 0.0, 0.0)), Outcome::Ignored);
		assert_eq!(state.dispatch(mv("a", 50.0, 0.0, 10.0)), Outcome::Ignored);
		assert_eq!(state.dispatch(up("a")), Outcome::Ignored);
	}

	#[test]
	fn cancelled_drags_inject_nothing() {
		let mut state = state();
		state.tick(0.016);
		state.dispatch(down("free", 1100.0, 220.0, 0.0));
		state.dispatch(mv("free", 1060.0, 260.0, 20.0));
		let cancel = WiringCommand::PointerCancel {
			node: "free".into(),
			pointer_id: 1,
		};
		assert_eq!(state.dispatch(cancel), Outcome::Cancelled);
		assert!(state.rope("free").unwrap().points().iter().all(|p| p.vel == DVec2::ZERO));
	}

	#[test]
	fn prompts_come_from_plain_clicks() {
		let mut state = state();
		let outcome = state.dispatch(click("free"));
		assert_eq!(outcome, Outcome::Prompt("free".into()));
		assert!(!outcome.changes_layout());
	}

	#[test]
	fn drag_status_changes_are_layout_changes() {
		let mut state = state();
		let before = state.layouts();
		let pressed = state.dispatch(down("free", 1100.0, 220.0, 0.0));
		assert!(pressed.changes_layout());
		assert_ne!(state.layouts(), before);
		assert!(state.layouts().iter().any(|l| l.id == "free" && l.dragging));

		let released = state.dispatch(up("free"));
		assert!(matches!(released, Outcome::Released { .. }));
		assert!(released.changes_layout());
		assert!(state.layouts().iter().all(|l| !l.dragging));

		let stray = state.dispatch(up("free"));
		assert_eq!(stray, Outcome::Ignored);
		assert!(!stray.changes_layout());
	}

	#[test]
	fn activation_opens_the_owning_group() {
		let mut state = state();
		assert_eq!(
			state.dispatch(WiringCommand::Activate { node: "b".into() }),
			Outcome::Activated {
				node: "b".into(),
				opened: Some("hub".into())
			}
		);
		assert!(state.is_open("hub"));
		assert!(state.node("b").unwrap().active);
		assert!(state.node("b").unwrap().visible);

		state.dispatch(WiringCommand::Activate { node: "free".into() });
		assert!(!state.node("b").unwrap().active);
		assert!(state.node("free").unwrap().active);
		assert_eq!(
			state.dispatch(WiringCommand::Activate { node: "nope".into() }),
			Outcome::Ignored
		);
	}

	#[test]
	fn resizing_keeps_right_nodes_on_the_right() {
		let mut state = state();
		let before = state.node("free").unwrap().position;
		assert_eq!(
			state.dispatch(WiringCommand::Resize {
				width: 1380.0,
				height: 800.0
			}),
			Outcome::Relayout
		);
		assert_eq!(state.node("free").unwrap().position, before + DVec2::new(100.0, 0.0));
		assert!(state.needs_measure());
		state.dispatch(WiringCommand::ContainerMeasured(Some(container())));
		assert!(!state.needs_measure());
	}

	#[test]
	fn missing_container_skips_edge_ropes_only() {
		let mut state = WiringState::new(&config(), VIEWPORT, None);
		state.dispatch(click("hub"));
		state.tick(0.016);
		let keys: Vec<String> = state.ropes().into_iter().map(|r| r.key).collect();
		assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
	}

	#[test]
	fn measured_sizes_recenter_closed_children() {
		let mut state = state();
		let outcome = state.dispatch(WiringCommand::NodeMeasured {
			node: "a".into(),
			width: 60.0,
			height: 30.0,
		});
		assert_eq!(outcome, Outcome::Relayout);
		assert_eq!(state.node("a").unwrap().center(), state.node("hub").unwrap().center());
		let zero = WiringCommand::NodeMeasured {
			node: "a".into(),
			width: 0.0,
			height: 30.0,
		};
		assert_eq!(state.dispatch(zero), Outcome::Ignored);
	}

	#[test]
	fn flat_mode_wires_every_node_to_the_container() {
		let config = WiringConfig {
			mode: GroupingMode::Flat,
			..config()
		};
		let mut state = WiringState::new(&config, VIEWPORT, Some(container()));
		assert!(state.node("a").unwrap().visible);
		assert!(matches!(
			state.geometry().anchor("a"),
			Some(Anchor::ContainerRatio { .. })
		));
		assert_eq!(state.mode(), GroupingMode::Flat);
		assert_eq!(state.dispatch(click("hub")), Outcome::Ignored);
		state.tick(0.016);
		assert_eq!(state.ropes().len(), 4);
	}
}
