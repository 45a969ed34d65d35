//! Forces acting on the simulation's nodes.
//!
//! A force reads positions and adds to velocities (the center force is the
//! exception: it translates positions directly). All of them see pinned
//! nodes, so a dragged node keeps pulling and pushing its neighbours.

use std::fmt;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::graph::Node;

/// One named component of the simulation.
pub trait Force: fmt::Debug {
	/// Called whenever the node set is replaced or the force is installed.
	fn initialize(&mut self, _nodes: &[Node]) {}

	/// Accumulate this force into the nodes' velocities for one tick.
	fn apply(&mut self, nodes: &mut [Node], alpha: f64, rng: &mut SmallRng);
}

/// A displacement small enough to be invisible, used to break symmetry when
/// two nodes coincide.
pub fn jiggle(rng: &mut SmallRng) -> f64 {
	(rng.r#gen::<f64>() - 0.5) * 1e-6
}

fn nonzero(value: f64, rng: &mut SmallRng) -> f64 {
	if value == 0.0 { jiggle(rng) } else { value }
}

/// Spring along every link toward a rest length.
///
/// Each link's stiffness is `1 / min(degree(source), degree(target))` so hubs
/// are not yanked around by their many spokes, and the correction is split
/// between the endpoints by relative degree (the better-connected end moves
/// less).
#[derive(Debug)]
pub struct LinkForce {
	edges: Vec<(usize, usize)>,
	distance: f64,
	strengths: Vec<f64>,
	bias: Vec<f64>,
}

impl LinkForce {
	/// Springs between node indices.
	pub fn new(edges: Vec<(usize, usize)>, distance: f64) -> Self {
		Self {
			edges,
			distance,
			strengths: Vec::new(),
			bias: Vec::new(),
		}
	}

	/// Number of springs.
	pub fn len(&self) -> usize {
		self.edges.len()
	}

	/// Are there no springs?
	pub fn is_empty(&self) -> bool {
		self.edges.is_empty()
	}
}

impl Force for LinkForce {
	fn initialize(&mut self, nodes: &[Node]) {
		let n = nodes.len();
		self.edges.retain(|&(s, t)| s < n && t < n);

		let mut degree = vec![0usize; n];
		for &(s, t) in &self.edges {
			degree[s] += 1;
			degree[t] += 1;
		}
		self.strengths = self
			.edges
			.iter()
			.map(|&(s, t)| 1.0 / degree[s].min(degree[t]) as f64)
			.collect();
		self.bias = self
			.edges
			.iter()
			.map(|&(s, t)| degree[s] as f64 / (degree[s] + degree[t]) as f64)
			.collect();
	}

	fn apply(&mut self, nodes: &mut [Node], alpha: f64, rng: &mut SmallRng) {
		for (i, &(s, t)) in self.edges.iter().enumerate() {
			if s == t {
				continue;
			}
			let (src, tgt) = (&nodes[s], &nodes[t]);
			let dx = nonzero(tgt.x + tgt.vx - src.x - src.vx, rng);
			let dy = nonzero(tgt.y + tgt.vy - src.y - src.vy, rng);
			let len = (dx * dx + dy * dy).sqrt();
			let k = (len - self.distance) / len * alpha * self.strengths[i];
			let (dx, dy) = (dx * k, dy * k);
			let b = self.bias[i];

			nodes[t].vx -= dx * b;
			nodes[t].vy -= dy * b;
			nodes[s].vx += dx * (1.0 - b);
			nodes[s].vy += dy * (1.0 - b);
		}
	}
}

/// Charge between every pair of nodes, falling off with squared distance.
#[derive(Debug)]
pub struct ManyBodyForce {
	strength: f64,
	distance_min2: f64,
}

impl ManyBodyForce {
	/// `strength < 0` repels. Distances under `distance_min` are clamped so
	/// near-coincident nodes do not explode apart.
	pub fn new(strength: f64, distance_min: f64) -> Self {
		Self {
			strength,
			distance_min2: distance_min * distance_min,
		}
	}
}

impl Force for ManyBodyForce {
	fn apply(&mut self, nodes: &mut [Node], alpha: f64, rng: &mut SmallRng) {
		let n = nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let dx = nonzero(nodes[j].x - nodes[i].x, rng);
				let dy = nonzero(nodes[j].y - nodes[i].y, rng);
				let mut l2 = dx * dx + dy * dy;
				if l2 < self.distance_min2 {
					l2 = (self.distance_min2 * l2).sqrt();
				}
				let w = self.strength * alpha / l2;

				nodes[i].vx += dx * w;
				nodes[i].vy += dy * w;
				nodes[j].vx -= dx * w;
				nodes[j].vy -= dy * w;
			}
		}
	}
}

/// Keeps node centers at least `2 * radius` apart, regardless of alpha.
#[derive(Debug)]
pub struct CollideForce {
	radius: f64,
	strength: f64,
}

impl CollideForce {
	/// Uniform collision radius; `strength` is the fraction of overlap
	/// resolved per tick.
	pub fn new(radius: f64, strength: f64) -> Self {
		Self { radius, strength }
	}
}

impl Force for CollideForce {
	fn apply(&mut self, nodes: &mut [Node], _alpha: f64, rng: &mut SmallRng) {
		let n = nodes.len();
		let r = self.radius * 2.0;
		let r2 = r * r;
		for i in 0..n {
			// predicted positions
			let (xi, yi) = (nodes[i].x + nodes[i].vx, nodes[i].y + nodes[i].vy);
			for j in (i + 1)..n {
				let dx = xi - (nodes[j].x + nodes[j].vx);
				let dy = yi - (nodes[j].y + nodes[j].vy);
				if dx * dx + dy * dy >= r2 {
					continue;
				}
				let (dx, dy) = (nonzero(dx, rng), nonzero(dy, rng));
				let len = (dx * dx + dy * dy).sqrt();
				let k = (r - len) / len * self.strength;
				let (dx, dy) = (dx * k * 0.5, dy * k * 0.5);

				nodes[i].vx += dx;
				nodes[i].vy += dy;
				nodes[j].vx -= dx;
				nodes[j].vy -= dy;
			}
		}
	}
}

/// Translates the whole node set so its mean position moves onto a point.
#[derive(Debug)]
pub struct CenterForce {
	x: f64,
	y: f64,
	strength: f64,
}

impl CenterForce {
	/// Center on `(x, y)`; `strength` 1 snaps the mean there every tick.
	pub fn new(x: f64, y: f64, strength: f64) -> Self {
		Self { x, y, strength }
	}
}

impl Force for CenterForce {
	fn apply(&mut self, nodes: &mut [Node], _alpha: f64, _rng: &mut SmallRng) {
		if nodes.is_empty() {
			return;
		}
		let n = nodes.len() as f64;
		let (sx, sy) = nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let dx = (sx / n - self.x) * self.strength;
		let dy = (sy / n - self.y) * self.strength;
		for node in nodes {
			node.x -= dx;
			node.y -= dy;
		}
	}
}
