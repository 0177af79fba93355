//! Graph view state and interaction tracking.
//!
//! Wraps the force simulation with per-node display metadata, the pan/zoom
//! view transform, and the drag state machine. The animation loop calls
//! [`ForceGraphState::tick`] once per frame; rendering works off the layout
//! snapshot captured there and never mutates simulation state.

use super::scale::OrdinalScale;
use super::simulation::{LayoutSnapshot, Simulation, SimulationConfig};
use super::types::{GraphData, GraphError};

/// Presentation parameters.
///
/// The label threshold and node padding are presentation choices with no
/// deeper semantics; they are configuration rather than constants.
#[derive(Clone, Debug)]
pub struct ViewConfig {
	/// Padding added to a node's degree to get its circle radius.
	pub node_pad: f64,
	/// Minimum degree at which a node's label is visible.
	pub label_degree_threshold: f64,
	/// Horizontal label offset from the node center, in world units.
	pub label_offset_x: f64,
	/// Label font size in pixels.
	pub label_font_size: f64,
	/// Lower bound on the hit-test radius so small nodes stay grabbable.
	pub hit_radius_min: f64,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			node_pad: 2.0,
			label_degree_threshold: 10.0,
			label_offset_x: 10.0,
			label_font_size: 12.0,
			hit_radius_min: 8.0,
		}
	}
}

impl ViewConfig {
	/// Rendered circle radius for a node of the given degree.
	pub fn node_radius(&self, degree: f64) -> f64 {
		degree.max(0.0) + self.node_pad
	}

	/// Whether a node of the given degree shows its label.
	pub fn label_visible(&self, degree: f64) -> bool {
		degree >= self.label_degree_threshold
	}
}

/// Per-node display metadata, parallel to the simulation's node set.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	/// Node id, doubling as the label text.
	pub id: String,
	/// Precomputed degree from the input data.
	pub degree: f64,
	/// Fill color mapped from the node's modularity class.
	pub color: String,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	#[allow(missing_docs)]
	pub x: f64,
	#[allow(missing_docs)]
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag gesture.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	#[allow(missing_docs)]
	pub active: bool,
	#[allow(missing_docs)]
	pub node_idx: Option<usize>,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	#[allow(missing_docs)]
	pub active: bool,
	#[allow(missing_docs)]
	pub start_x: f64,
	#[allow(missing_docs)]
	pub start_y: f64,
	#[allow(missing_docs)]
	pub transform_start_x: f64,
	#[allow(missing_docs)]
	pub transform_start_y: f64,
}

/// Core graph state combining the physics simulation with interaction
/// tracking and the latest layout snapshot.
#[derive(Debug)]
pub struct ForceGraphState {
	#[allow(missing_docs)]
	pub simulation: Simulation,
	/// Display metadata, indexed like the simulation's nodes.
	pub nodes: Vec<NodeInfo>,
	/// Positions from the most recent tick; what the renderer draws.
	pub layout: LayoutSnapshot,
	#[allow(missing_docs)]
	pub transform: ViewTransform,
	#[allow(missing_docs)]
	pub drag: DragState,
	#[allow(missing_docs)]
	pub pan: PanState,
	/// Node under the pointer, if any. Hovered nodes show their label.
	pub hover: Option<usize>,
	#[allow(missing_docs)]
	pub width: f64,
	#[allow(missing_docs)]
	pub height: f64,
	#[allow(missing_docs)]
	pub view: ViewConfig,
}

impl ForceGraphState {
	/// Build the view state from input records.
	///
	/// The color scale is constructed here, once, from the nodes' modularity
	/// classes in first-seen order. Referential errors from link resolution
	/// propagate before anything is drawn.
	pub fn new(
		data: &GraphData,
		width: f64,
		height: f64,
		view: ViewConfig,
	) -> Result<Self, GraphError> {
		let scale = OrdinalScale::category10(data.nodes.iter().map(|n| &n.modularity));
		let nodes = data
			.nodes
			.iter()
			.map(|node| NodeInfo {
				id: node.id.clone(),
				degree: node.degree,
				color: scale.color(&node.modularity).to_string(),
			})
			.collect();

		let config = SimulationConfig {
			collide_pad: view.node_pad,
			..SimulationConfig::default()
		};
		let simulation = Simulation::new(data, width, height, config)?;
		let layout = simulation.snapshot();

		Ok(Self {
			simulation,
			nodes,
			layout,
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: None,
			width,
			height,
			view,
		})
	}

	/// Convert screen-space pointer coordinates to graph space.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Hit-test the node circles (and their grab slack) at a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		for (idx, info) in self.nodes.iter().enumerate() {
			let (x, y) = self.layout.positions[idx];
			let hit = self
				.view
				.node_radius(info.degree)
				.max(self.view.hit_radius_min);
			let (dx, dy) = (x - gx, y - gy);
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(idx);
			}
		}
		found
	}

	/// Update which node is hovered.
	pub fn set_hover(&mut self, node: Option<usize>) {
		self.hover = node;
	}

	/// Begin dragging a node: pin it at its current position and raise the
	/// simulation's energy target so the layout stays live.
	pub fn drag_start(&mut self, idx: usize) {
		let (x, y) = self.layout.positions[idx];
		self.simulation.pin(idx, x, y);
		let target = self.simulation.config.drag_alpha_target;
		self.simulation.set_alpha_target(target);
		self.drag.active = true;
		self.drag.node_idx = Some(idx);
	}

	/// Move the active drag's pin to follow the pointer.
	pub fn drag_move(&mut self, sx: f64, sy: f64) {
		if !self.drag.active {
			return;
		}
		if let Some(idx) = self.drag.node_idx {
			let (gx, gy) = self.screen_to_graph(sx, sy);
			self.simulation.pin(idx, gx, gy);
		}
	}

	/// End the drag: release the pin and let the simulation settle.
	pub fn drag_end(&mut self) {
		if let Some(idx) = self.drag.node_idx {
			self.simulation.release(idx);
		}
		self.simulation.set_alpha_target(0.0);
		self.drag.active = false;
		self.drag.node_idx = None;
	}

	/// Advance the simulation one step and capture the layout snapshot.
	pub fn tick(&mut self) {
		self.layout = self.simulation.tick();
	}

	#[allow(missing_docs)]
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{ClassLabel, GraphLink, GraphNode};

	fn pair_fixture() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode {
					id: "A".into(),
					degree: 1.0,
					modularity: ClassLabel::Index(0),
				},
				GraphNode {
					id: "B".into(),
					degree: 20.0,
					modularity: ClassLabel::Index(1),
				},
			],
			links: vec![GraphLink {
				source: "A".into(),
				target: "B".into(),
				value: 4.0,
			}],
		}
	}

	fn state() -> ForceGraphState {
		ForceGraphState::new(&pair_fixture(), 640.0, 600.0, ViewConfig::default()).unwrap()
	}

	#[test]
	fn drag_start_pins_at_the_current_position() {
		let mut s = state();
		let pos = s.layout.positions[1];
		s.drag_start(1);
		assert_eq!(s.simulation.nodes[1].pin, Some(pos));
		assert!(s.drag.active);
	}

	#[test]
	fn drag_start_raises_the_energy_target() {
		let mut s = state();
		for _ in 0..1000 {
			s.tick();
		}
		assert!(s.simulation.is_settled());
		s.drag_start(0);
		assert!(!s.simulation.is_settled());
		assert_eq!(s.simulation.alpha_target(), 0.3);
	}

	#[test]
	fn drag_move_tracks_the_pointer() {
		let mut s = state();
		s.drag_start(1);
		s.drag_move(123.0, 456.0);
		// Identity transform at startup: screen coords are graph coords.
		assert_eq!(s.simulation.nodes[1].pin, Some((123.0, 456.0)));
		s.drag_move(130.0, 450.0);
		assert_eq!(s.simulation.nodes[1].pin, Some((130.0, 450.0)));
	}

	#[test]
	fn drag_move_respects_the_view_transform() {
		let mut s = state();
		s.transform = ViewTransform {
			x: 100.0,
			y: 50.0,
			k: 2.0,
		};
		s.drag_start(0);
		s.drag_move(300.0, 250.0);
		assert_eq!(s.simulation.nodes[0].pin, Some((100.0, 100.0)));
	}

	#[test]
	fn drag_end_clears_the_pin_and_lowers_the_target() {
		let mut s = state();
		s.drag_start(1);
		s.drag_move(123.0, 456.0);
		s.drag_end();
		assert_eq!(s.simulation.nodes[1].pin, None);
		assert_eq!(s.simulation.alpha_target(), 0.0);
		assert!(!s.drag.active);
	}

	#[test]
	fn drag_move_without_an_active_drag_is_a_no_op() {
		let mut s = state();
		s.drag_move(123.0, 456.0);
		assert_eq!(s.simulation.nodes[0].pin, None);
		assert_eq!(s.simulation.nodes[1].pin, None);
	}

	#[test]
	fn colors_come_from_distinct_modularity_classes() {
		let s = state();
		assert_ne!(s.nodes[0].color, s.nodes[1].color);
	}

	#[test]
	fn radius_and_label_rules_match_the_fixture() {
		let s = state();
		assert_eq!(s.view.node_radius(s.nodes[0].degree), 3.0);
		assert_eq!(s.view.node_radius(s.nodes[1].degree), 22.0);
		assert!(!s.view.label_visible(s.nodes[0].degree));
		assert!(s.view.label_visible(s.nodes[1].degree));
	}

	#[test]
	fn label_visibility_boundary_sits_at_the_threshold() {
		let view = ViewConfig::default();
		assert!(view.label_visible(10.0));
		assert!(!view.label_visible(9.0));
	}

	#[test]
	fn zero_degree_node_keeps_the_minimum_radius() {
		let view = ViewConfig::default();
		assert_eq!(view.node_radius(0.0), 2.0);
	}

	#[test]
	fn hit_test_finds_a_node_and_misses_empty_space() {
		let s = state();
		let (x, y) = s.layout.positions[1];
		assert_eq!(s.node_at_position(x, y), Some(1));
		assert_eq!(s.node_at_position(x + 500.0, y + 500.0), None);
	}

	#[test]
	fn referential_error_propagates_from_construction() {
		let mut data = pair_fixture();
		data.links[0].target = "ghost".into();
		let err = ForceGraphState::new(&data, 640.0, 600.0, ViewConfig::default()).unwrap_err();
		assert!(matches!(err, GraphError::UnknownNode { .. }));
	}
}
