//! Pointer drag gestures on nodes.
//!
//! Each node runs its own `idle -> dragging -> idle` machine. A session lives
//! from pointer-down to pointer-up/cancel; the `moved` flag outlives it until
//! [`DragController::settle`] so click handlers can still tell a drag apart
//! from a click.

use std::collections::{HashMap, HashSet};

use glam::DVec2;

use super::config::LayoutConfig;
use super::geometry::Rect;
use super::types::Side;

/// Everything a drag position is clamped against.
#[derive(Clone, Copy, Debug)]
pub struct DragBounds {
	pub viewport: DVec2,
	pub container: Option<Rect>,
	pub side: Side,
	pub size: DVec2,
}

/// Keeps a node's top-left corner inside the viewport margins and on its own
/// side of the container. When the limits cross, the lower one wins.
pub fn clamp_position(candidate: DVec2, bounds: &DragBounds, layout: &LayoutConfig) -> DVec2 {
	let mut x_lo = layout.margin;
	let mut x_hi = bounds.viewport.x - bounds.size.x - layout.margin;
	let (y_lo, y_hi) = (
		layout.top_margin,
		bounds.viewport.y - bounds.size.y - layout.margin,
	);
	if let Some(container) = bounds.container {
		match bounds.side {
			Side::Left => x_hi = x_hi.min(container.left() - layout.side_gap - bounds.size.x),
			Side::Right => x_lo = x_lo.max(container.right() + layout.side_gap),
		}
	}
	DVec2::new(
		candidate.x.min(x_hi).max(x_lo),
		candidate.y.min(y_hi).max(y_lo),
	)
}

#[derive(Clone, Debug)]
struct DragSession {
	pointer_id: i32,
	start_pointer: DVec2,
	start_position: DVec2,
	prev_position: DVec2,
	last_sample_ms: f64,
	velocity: DVec2,
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
	sessions: HashMap<String, DragSession>,
	moved: HashSet<String>,
}

impl DragController {
	pub fn press(&mut self, node: &str, pointer_id: i32, pointer: DVec2, position: DVec2, time_ms: f64) {
		self.moved.remove(node);
		self.sessions.insert(
			node.to_owned(),
			DragSession {
				pointer_id,
				start_pointer: pointer,
				start_position: position,
				prev_position: position,
				last_sample_ms: time_ms,
				velocity: DVec2::ZERO,
			},
		);
	}

	/// Position the node should take for this pointer sample, or `None` when
	/// the node is not being dragged by this pointer.
	pub fn drag(
		&mut self,
		node: &str,
		pointer_id: i32,
		pointer: DVec2,
		time_ms: f64,
		bounds: &DragBounds,
		layout: &LayoutConfig,
	) -> Option<DVec2> {
		let session = self
			.sessions
			.get_mut(node)
			.filter(|s| s.pointer_id == pointer_id)?;

		let elapsed_ms = time_ms - session.last_sample_ms;
		let elapsed_ms = if elapsed_ms.is_finite() {
			elapsed_ms.max(layout.min_sample_ms)
		} else {
			layout.min_sample_ms
		};
		let delta = pointer - session.start_pointer;
		let position = clamp_position(session.start_position + delta, bounds, layout);

		if delta.x.abs() >= layout.drag_threshold || delta.y.abs() >= layout.drag_threshold {
			self.moved.insert(node.to_owned());
		}
		let velocity = (position - session.prev_position) / (elapsed_ms / 1000.0);
		session.velocity = if velocity.is_finite() { velocity } else { DVec2::ZERO };
		session.prev_position = position;
		session.last_sample_ms = time_ms;
		Some(position)
	}

	/// Ends the drag and returns the last velocity estimate in px/s.
	pub fn release(&mut self, node: &str, pointer_id: i32) -> Option<DVec2> {
		self.take_session(node, pointer_id).map(|s| s.velocity)
	}

	/// Ends the drag without a velocity. Returns whether a drag was active.
	pub fn cancel(&mut self, node: &str, pointer_id: i32) -> bool {
		self.take_session(node, pointer_id).is_some()
	}

	fn take_session(&mut self, node: &str, pointer_id: i32) -> Option<DragSession> {
		match self.sessions.get(node) {
			Some(s) if s.pointer_id == pointer_id => self.sessions.remove(node),
			_ => None,
		}
	}

	pub fn is_dragging(&self, node: &str) -> bool {
		self.sessions.contains_key(node)
	}

	/// Whether the latest gesture on `node` travelled past the drag threshold.
	pub fn moved(&self, node: &str) -> bool {
		self.moved.contains(node)
	}

	/// Clears the `moved` flag once click handlers have seen it.
	pub fn settle(&mut self, node: &str) {
		if !self.is_dragging(node) {
			self.moved.remove(node);
		}
	}
}
