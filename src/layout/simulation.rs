use std::f64::consts::PI;

use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::LayoutConfig;
use super::forces::Force;
use crate::graph::{Node, Pin};

/// Fixed so runs over the same input are repeatable.
const JIGGLE_SEED: u64 = 1;

/// Damped velocity relaxation over a node set with a decaying energy
/// (`alpha`).
///
/// Every tick: alpha moves toward its target, each force adds to the
/// velocities, then free nodes take a damped step and pinned nodes snap to
/// their pin.
#[derive(Debug)]
pub struct Simulation {
	nodes: Vec<Node>,
	forces: IndexMap<&'static str, Box<dyn Force>>,
	alpha: f64,
	alpha_min: f64,
	alpha_decay: f64,
	alpha_target: f64,
	velocity_decay: f64,
	rng: SmallRng,
	ticks: u64,
}

impl Simulation {
	/// An empty simulation at full energy, with no forces.
	pub fn new(config: &LayoutConfig) -> Self {
		Self {
			nodes: Vec::new(),
			forces: IndexMap::new(),
			alpha: config.alpha_restart,
			alpha_min: config.alpha_min,
			alpha_decay: config.alpha_decay,
			alpha_target: 0.0,
			velocity_decay: config.velocity_decay,
			rng: SmallRng::seed_from_u64(JIGGLE_SEED),
			ticks: 0,
		}
	}

	/// Replace the node set, returning the old one. Forces are re-initialized.
	pub(crate) fn set_nodes(&mut self, nodes: Vec<Node>) -> Vec<Node> {
		let old = std::mem::replace(&mut self.nodes, nodes);
		for force in self.forces.values_mut() {
			force.initialize(&self.nodes);
		}
		old
	}

	/// Install `force` under `name`, replacing any force already there.
	/// Forces run in the order their names were first installed.
	pub fn insert_force(&mut self, name: &'static str, mut force: impl Force + 'static) {
		force.initialize(&self.nodes);
		self.forces.insert(name, Box::new(force));
	}

	/// Remove a force; returns whether it existed.
	pub fn remove_force(&mut self, name: &str) -> bool {
		self.forces.shift_remove(name).is_some()
	}

	/// Names of installed forces, in application order.
	pub fn force_names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.forces.keys().copied()
	}

	/// Advance one step.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		let alpha = self.alpha;

		for force in self.forces.values_mut() {
			force.apply(&mut self.nodes, alpha, &mut self.rng);
		}

		let keep = 1.0 - self.velocity_decay;
		for node in &mut self.nodes {
			match node.pin {
				Pin::Pinned { x, y } => {
					node.x = x;
					node.y = y;
					node.vx = 0.0;
					node.vy = 0.0;
				}
				Pin::Free => {
					node.vx *= keep;
					node.vy *= keep;
					node.x += node.vx;
					node.y += node.vy;
				}
			}
		}
		self.ticks += 1;
	}

	/// Has the energy fallen below the resting threshold?
	pub fn is_settled(&self) -> bool {
		self.alpha < self.alpha_min
	}

	/// Current energy.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Set the energy directly (a restart sets it high).
	pub fn set_alpha(&mut self, alpha: f64) {
		self.alpha = alpha.max(0.0);
	}

	/// Level alpha decays toward.
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Hold alpha near `target` instead of letting it decay to zero.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target.max(0.0);
	}

	/// Ticks taken since construction.
	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	/// The node set.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// The node set, for writing positions and pins.
	pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}
}

/// Offset of the `i`th seed position on a sunflower spiral.
///
/// Consecutive indices land far apart in angle but close in radius, so a
/// fresh node set starts compact, overlap-free and without symmetric ties.
pub(crate) fn phyllotaxis(i: usize, initial_radius: f64) -> (f64, f64) {
	let golden_angle = PI * (3.0 - 5f64.sqrt());
	let radius = initial_radius * (0.5 + i as f64).sqrt();
	let angle = i as f64 * golden_angle;
	(radius * angle.cos(), radius * angle.sin())
}
