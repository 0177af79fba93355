//! CPU force simulation for graph layout.
//!
//! Iterative physics solver combining four forces: spring attraction along
//! links, many-body repulsion between all node pairs, a centering pull toward
//! the canvas midpoint, and a collision constraint keeping node circles from
//! overlapping. Each tick advances the integration and returns an immutable
//! [`LayoutSnapshot`] for the renderer; the renderer never touches live nodes.
//!
//! The simulation carries an energy budget (`alpha`) that decays toward an
//! adjustable target. It self-terminates once alpha falls below `alpha_min`
//! with the target at rest; interaction raises the target to keep the layout
//! live, and lowers it again so the system can settle.

use std::collections::HashMap;
use std::f64::consts::PI;

use super::types::{GraphData, GraphError};

/// Tunable physics parameters.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
	/// Many-body charge. Negative repels.
	pub charge: f64,
	/// Rest length of link springs.
	pub link_distance: f64,
	/// Link spring stiffness.
	pub link_strength: f64,
	/// Padding added to a node's degree to get its collision radius.
	pub collide_pad: f64,
	/// Velocity retained per tick (friction).
	pub velocity_decay: f64,
	/// Alpha threshold below which the simulation is considered settled.
	pub alpha_min: f64,
	/// Per-tick interpolation rate of alpha toward its target.
	pub alpha_decay: f64,
	/// Alpha target raised while a drag gesture is active.
	pub drag_alpha_target: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			charge: -30.0,
			link_distance: 30.0,
			link_strength: 1.0,
			collide_pad: 2.0,
			velocity_decay: 0.6,
			alpha_min: 0.001,
			// Reaches alpha_min from 1.0 in roughly 300 ticks.
			alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
			drag_alpha_target: 0.3,
		}
	}
}

/// A node as the integrator sees it.
///
/// Position is single-writer: while `pin` is `None` the integrator owns
/// `x`/`y`; while `pin` is `Some` the pin coordinates override them and the
/// integrator skips the node entirely.
#[derive(Clone, Debug)]
pub struct SimNode {
	#[allow(missing_docs)]
	pub x: f64,
	#[allow(missing_docs)]
	pub y: f64,
	#[allow(missing_docs)]
	pub vx: f64,
	#[allow(missing_docs)]
	pub vy: f64,
	/// Collision radius (degree + pad).
	pub radius: f64,
	/// Manual position override set by an active drag.
	pub pin: Option<(f64, f64)>,
}

/// A link resolved to node indices.
#[derive(Clone, Debug)]
pub struct SimLink {
	#[allow(missing_docs)]
	pub source: usize,
	#[allow(missing_docs)]
	pub target: usize,
	/// Relationship weight carried through for rendering.
	pub value: f64,
}

/// Immutable per-tick position table handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutSnapshot {
	/// One `(x, y)` per node, indexed like the simulation's node set.
	pub positions: Vec<(f64, f64)>,
}

/// The force-directed layout solver.
#[derive(Debug)]
pub struct Simulation {
	#[allow(missing_docs)]
	pub nodes: Vec<SimNode>,
	#[allow(missing_docs)]
	pub links: Vec<SimLink>,
	#[allow(missing_docs)]
	pub config: SimulationConfig,
	alpha: f64,
	alpha_target: f64,
	center: (f64, f64),
}

impl Simulation {
	/// Build a simulation from input records, resolving link endpoints.
	///
	/// Nodes start on a circle around the canvas midpoint. A link naming an
	/// id not present in the node set is fatal.
	pub fn new(
		data: &GraphData,
		width: f64,
		height: f64,
		config: SimulationConfig,
	) -> Result<Self, GraphError> {
		let total = data.nodes.len().max(1);
		let center = (width / 2.0, height / 2.0);

		let mut id_to_idx = HashMap::new();
		let nodes: Vec<SimNode> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				id_to_idx.insert(node.id.as_str(), i);
				let angle = (i as f64) * 2.0 * PI / total as f64;
				SimNode {
					x: center.0 + 100.0 * angle.cos(),
					y: center.1 + 100.0 * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					radius: node.degree.max(0.0) + config.collide_pad,
					pin: None,
				}
			})
			.collect();

		let links = data
			.links
			.iter()
			.map(|link| {
				let resolve = |id: &String| {
					id_to_idx.get(id.as_str()).copied().ok_or_else(|| {
						GraphError::UnknownNode { id: id.clone() }
					})
				};
				Ok(SimLink {
					source: resolve(&link.source)?,
					target: resolve(&link.target)?,
					value: link.value,
				})
			})
			.collect::<Result<Vec<_>, GraphError>>()?;

		Ok(Self {
			nodes,
			links,
			config,
			alpha: 1.0,
			alpha_target: 0.0,
			center,
		})
	}

	/// Remaining energy budget.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Current energy target (nonzero while interaction is active).
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Raise or lower the energy target. A settled simulation with a raised
	/// target becomes live again on the next tick.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Whether the layout has converged and ticks are no-ops.
	pub fn is_settled(&self) -> bool {
		self.alpha < self.config.alpha_min && self.alpha_target < self.config.alpha_min
	}

	/// Pin a node at the given coordinates, overriding the integrator.
	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.pin = Some((x, y));
		}
	}

	/// Release a node's pin, returning it to integrator control.
	pub fn release(&mut self, idx: usize) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.pin = None;
		}
	}

	/// Current positions as an immutable table.
	pub fn snapshot(&self) -> LayoutSnapshot {
		LayoutSnapshot {
			positions: self.nodes.iter().map(|n| (n.x, n.y)).collect(),
		}
	}

	/// Advance the integration by one step and return the new layout.
	///
	/// Settled simulations return the current layout unchanged.
	pub fn tick(&mut self) -> LayoutSnapshot {
		if self.is_settled() || self.nodes.is_empty() {
			return self.snapshot();
		}

		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

		// Pinned nodes sit exactly at their pin for the whole step.
		for node in &mut self.nodes {
			if let Some((px, py)) = node.pin {
				node.x = px;
				node.y = py;
				node.vx = 0.0;
				node.vy = 0.0;
			}
		}

		self.apply_link_force();
		self.apply_many_body_force();

		for node in &mut self.nodes {
			if node.pin.is_some() {
				node.vx = 0.0;
				node.vy = 0.0;
				continue;
			}
			node.vx *= self.config.velocity_decay;
			node.vy *= self.config.velocity_decay;
			node.x += node.vx * self.alpha;
			node.y += node.vy * self.alpha;
		}

		self.apply_collide();
		self.apply_center_force();

		self.snapshot()
	}

	/// Spring force along each link toward the rest distance, split between
	/// the endpoints (Hooke's law).
	fn apply_link_force(&mut self) {
		for link in &self.links {
			let (s, t) = (link.source, link.target);
			if s == t {
				continue;
			}
			let dx = self.nodes[t].x - self.nodes[s].x;
			let dy = self.nodes[t].y - self.nodes[s].y;
			let dist = (dx * dx + dy * dy).sqrt().max(1.0);

			let stretch = dist - self.config.link_distance;
			let f = self.config.link_strength * stretch / dist * 0.5;

			self.nodes[s].vx += f * dx;
			self.nodes[s].vy += f * dy;
			self.nodes[t].vx -= f * dx;
			self.nodes[t].vy -= f * dy;
		}
	}

	/// Pairwise Coulomb repulsion between all nodes.
	fn apply_many_body_force(&mut self) {
		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let dx = self.nodes[j].x - self.nodes[i].x;
				let dy = self.nodes[j].y - self.nodes[i].y;
				let dist_sq = (dx * dx + dy * dy).max(1.0);
				let dist = dist_sq.sqrt();

				let f = self.config.charge / dist_sq;
				let (fx, fy) = (f * dx / dist, f * dy / dist);

				self.nodes[i].vx += fx;
				self.nodes[i].vy += fy;
				self.nodes[j].vx -= fx;
				self.nodes[j].vy -= fy;
			}
		}
	}

	/// Separate overlapping circles by direct position correction so that
	/// settled layouts carry no residual overlap.
	fn apply_collide(&mut self) {
		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let dx = self.nodes[j].x - self.nodes[i].x;
				let dy = self.nodes[j].y - self.nodes[i].y;
				let dist = (dx * dx + dy * dy).sqrt().max(1.0);

				let overlap = self.nodes[i].radius + self.nodes[j].radius - dist;
				if overlap <= 0.0 {
					continue;
				}
				let (ux, uy) = (dx / dist, dy / dist);

				match (self.nodes[i].pin.is_some(), self.nodes[j].pin.is_some()) {
					(false, false) => {
						let half = overlap * 0.5;
						self.nodes[i].x -= ux * half;
						self.nodes[i].y -= uy * half;
						self.nodes[j].x += ux * half;
						self.nodes[j].y += uy * half;
					}
					(false, true) => {
						self.nodes[i].x -= ux * overlap;
						self.nodes[i].y -= uy * overlap;
					}
					(true, false) => {
						self.nodes[j].x += ux * overlap;
						self.nodes[j].y += uy * overlap;
					}
					(true, true) => {}
				}
			}
		}
	}

	/// Translate free nodes so the centroid sits at the canvas midpoint.
	fn apply_center_force(&mut self) {
		let free = self.nodes.iter().filter(|n| n.pin.is_none()).count();
		if free == 0 {
			return;
		}
		let (mut cx, mut cy) = (0.0, 0.0);
		for node in &self.nodes {
			cx += node.x;
			cy += node.y;
		}
		cx /= self.nodes.len() as f64;
		cy /= self.nodes.len() as f64;

		let (sx, sy) = (self.center.0 - cx, self.center.1 - cy);
		for node in &mut self.nodes {
			if node.pin.is_none() {
				node.x += sx;
				node.y += sy;
			}
		}
	}
}
