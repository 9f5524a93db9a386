//! Draggable function nodes tied to a chat panel by simulated ropes.

mod component;
mod config;
mod drag;
mod geometry;
mod hierarchy;
mod node;
mod particles;
mod render;
mod rope;
mod state;
mod theme;
mod types;

pub use component::RopeWiring;
pub use config::{ConfigError, PhysicsConfig, WiringConfig};
pub use geometry::Rect;
pub use state::{Outcome, WiringCommand, WiringState};
pub use types::{GroupDescriptor, GroupingMode, NodeDescriptor, Side};
