//! Open/closed state of hub groups.
//!
//! A closed group keeps every child stacked on the hub center and hidden. An
//! open group spreads its children along an arc on the hub's outer side.

use std::collections::HashMap;

use glam::DVec2;
use log::info;

use super::config::LayoutConfig;
use super::drag::{DragBounds, clamp_position};
use super::node::NodeTable;
use super::types::{GroupDescriptor, Side};

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
	pub hub: String,
	pub side: Side,
	pub children: Vec<String>,
	pub open: bool,
}

/// Top-left positions for `sizes.len()` children fanned around `hub_center`.
///
/// Children are spaced evenly across the configured span, centered on the
/// side's base angle, with every other child pushed out by the stagger so
/// neighbours overlap less. Results are clamped into the viewport margins.
pub fn fan_out_targets(
	hub_center: DVec2,
	side: Side,
	sizes: &[DVec2],
	viewport: DVec2,
	layout: &LayoutConfig,
) -> Vec<DVec2> {
	let n = sizes.len();
	let (first, step) = if n > 1 {
		let span = layout.fan_span_degrees;
		(side.base_angle() - span / 2.0, span / (n - 1) as f64)
	} else {
		(side.base_angle(), 0.0)
	};

	sizes
		.iter()
		.enumerate()
		.map(|(i, &size)| {
			let angle = (first + step * i as f64).to_radians();
			let radius = layout.fan_radius + if i % 2 == 1 { layout.fan_stagger } else { 0.0 };
			let center = hub_center + DVec2::new(angle.cos(), angle.sin()) * radius;
			let bounds = DragBounds {
				viewport,
				container: None,
				side,
				size,
			};
			clamp_position(center - size * 0.5, &bounds, layout)
		})
		.collect()
}

#[derive(Clone, Debug, Default)]
pub struct HierarchyController {
	groups: Vec<Group>,
	by_hub: HashMap<String, usize>,
	by_child: HashMap<String, usize>,
}

impl HierarchyController {
	/// Builds closed groups. Descriptors naming unknown hubs are skipped; the
	/// config validator reports those.
	pub fn new(descriptors: &[GroupDescriptor], nodes: &NodeTable) -> Self {
		let mut this = Self::default();
		for desc in descriptors {
			let Some(hub) = nodes.get(&desc.hub) else {
				continue;
			};
			let idx = this.groups.len();
			this.by_hub.insert(desc.hub.clone(), idx);
			for child in &desc.members {
				this.by_child.insert(child.clone(), idx);
			}
			this.groups.push(Group {
				hub: desc.hub.clone(),
				side: hub.side,
				children: desc.members.clone(),
				open: false,
			});
		}
		this
	}

	pub fn groups(&self) -> &[Group] {
		&self.groups
	}

	pub fn group(&self, hub: &str) -> Option<&Group> {
		self.by_hub.get(hub).map(|&i| &self.groups[i])
	}

	pub fn is_hub(&self, id: &str) -> bool {
		self.by_hub.contains_key(id)
	}

	pub fn hub_of(&self, child: &str) -> Option<&str> {
		self.by_child
			.get(child)
			.map(|&i| self.groups[i].hub.as_str())
	}

	pub fn is_open(&self, hub: &str) -> bool {
		self.group(hub).is_some_and(|g| g.open)
	}

	/// Flips a group. Returns the new open state, or `None` for unknown hubs.
	pub fn toggle(
		&mut self,
		hub: &str,
		nodes: &mut NodeTable,
		viewport: DVec2,
		layout: &LayoutConfig,
	) -> Option<bool> {
		if self.is_open(hub) {
			self.close(hub, nodes).then_some(false)
		} else {
			self.open(hub, nodes, viewport, layout).then_some(true)
		}
	}

	/// Fans the group's children out. Returns false if already open or unknown.
	pub fn open(&mut self, hub: &str, nodes: &mut NodeTable, viewport: DVec2, layout: &LayoutConfig) -> bool {
		let Some(&idx) = self.by_hub.get(hub) else {
			return false;
		};
		let group = &mut self.groups[idx];
		let Some(center) = nodes.get(hub).map(|n| n.center()) else {
			return false;
		};
		if group.open {
			return false;
		}

		let sizes: Vec<DVec2> = group
			.children
			.iter()
			.map(|id| nodes.get(id).map_or(DVec2::new(layout.node_size[0], layout.node_size[1]), |n| n.size))
			.collect();
		let targets = fan_out_targets(center, group.side, &sizes, viewport, layout);
		for (id, target) in group.children.iter().zip(targets) {
			if let Some(node) = nodes.get_mut(id) {
				node.position = target;
				node.visible = true;
			}
		}
		group.open = true;
		info!("rope-wiring: opened group `{}`", hub);
		true
	}

	/// Retracts the group's children onto the hub. Returns false if already
	/// closed or unknown.
	pub fn close(&mut self, hub: &str, nodes: &mut NodeTable) -> bool {
		let Some(&idx) = self.by_hub.get(hub) else {
			return false;
		};
		if !self.groups[idx].open {
			return false;
		}
		self.groups[idx].open = false;
		self.collapse(idx, nodes);
		info!("rope-wiring: closed group `{}`", hub);
		true
	}

	/// Opens the group owning `child` if it is closed, returning its hub.
	pub fn open_for(
		&mut self,
		child: &str,
		nodes: &mut NodeTable,
		viewport: DVec2,
		layout: &LayoutConfig,
	) -> Option<String> {
		let hub = self.hub_of(child)?.to_owned();
		self.open(&hub, nodes, viewport, layout).then_some(hub)
	}

	/// Re-stacks the children of every closed group on their hub, after the
	/// hub moved or node sizes changed.
	pub fn collapse_closed(&self, nodes: &mut NodeTable) {
		for (idx, group) in self.groups.iter().enumerate() {
			if !group.open {
				self.collapse(idx, nodes);
			}
		}
	}

	fn collapse(&self, idx: usize, nodes: &mut NodeTable) {
		let group = &self.groups[idx];
		let Some(center) = nodes.get(&group.hub).map(|n| n.center()) else {
			return;
		};
		for id in &group.children {
			if let Some(node) = nodes.get_mut(id) {
				node.center_on(center);
				node.visible = false;
			}
		}
	}
}
