use std::collections::HashMap;

use log::{debug, info, trace, warn};

use super::config::LayoutConfig;
use super::forces::{CenterForce, CollideForce, Force, LinkForce, ManyBodyForce};
use super::simulation::{Simulation, phyllotaxis};
use crate::graph::{Graph, Link, Node, NodeId, Pin};

/// Name of the link spring force.
pub const LINK_FORCE: &str = "link";
/// Name of the many-body repulsion.
pub const CHARGE_FORCE: &str = "charge";
/// Name of the centering force.
pub const CENTER_FORCE: &str = "center";
/// Name of the collision force.
pub const COLLIDE_FORCE: &str = "collide";

/// Size of the drawing surface, in graph units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width.
	pub width: f64,
	/// Height.
	pub height: f64,
}

impl Viewport {
	/// The point the layout is centered on.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}

#[derive(Clone, Debug)]
struct Drag {
	node: NodeId,
	index: usize,
}

/// Owns the live node and link sets and keeps them laid out.
///
/// The graph is swapped in wholesale with [`load`](Self::load); positions
/// are written onto the nodes in place on every [`step`](Self::step).
/// Pointer input drives at most one drag at a time through
/// [`drag_start`](Self::drag_start), [`drag_move`](Self::drag_move) and
/// [`drag_end`](Self::drag_end).
#[derive(Debug)]
pub struct LayoutEngine {
	config: LayoutConfig,
	simulation: Simulation,
	links: Vec<Link>,
	index: HashMap<NodeId, usize>,
	viewport: Viewport,
	drag: Option<Drag>,
}

impl LayoutEngine {
	/// An engine with no graph, centered in a `width` x `height` viewport.
	pub fn new(config: LayoutConfig, width: f64, height: f64) -> Self {
		let mut simulation = Simulation::new(&config);
		simulation.insert_force(
			LINK_FORCE,
			LinkForce::new(Vec::new(), config.link_distance),
		);
		simulation.insert_force(
			CHARGE_FORCE,
			ManyBodyForce::new(config.charge_strength, config.charge_distance_min),
		);
		let viewport = Viewport { width, height };
		let (cx, cy) = viewport.center();
		simulation.insert_force(
			CENTER_FORCE,
			CenterForce::new(cx, cy, config.center_strength),
		);
		simulation.insert_force(
			COLLIDE_FORCE,
			CollideForce::new(config.node_radius, config.collide_strength),
		);

		Self {
			config,
			simulation,
			links: Vec::new(),
			index: HashMap::new(),
			viewport,
			drag: None,
		}
	}

	/// Replace the graph and hot-restart the layout.
	///
	/// Any drag in progress is dropped along with the old node set. Nodes
	/// are seeded on a spiral around the viewport center, unless
	/// `retain_positions_on_reload` is set and the id existed before.
	pub fn load(&mut self, graph: Graph) {
		let Graph { mut nodes, mut links } = graph;

		if let Some(drag) = self.drag.take() {
			debug!("reload dropped drag on {}", drag.node);
		}

		let previous: HashMap<&NodeId, (f64, f64)> = if self.config.retain_positions_on_reload {
			self.simulation
				.nodes()
				.iter()
				.map(|node| (&node.id, (node.x, node.y)))
				.collect()
		} else {
			HashMap::new()
		};
		let (cx, cy) = self.viewport.center();
		let mut retained = 0;
		for (i, node) in nodes.iter_mut().enumerate() {
			node.vx = 0.0;
			node.vy = 0.0;
			node.pin = Pin::Free;
			let (x, y) = match previous.get(&node.id) {
				Some(&position) => {
					retained += 1;
					position
				}
				None => {
					let (dx, dy) = phyllotaxis(i, self.config.initial_radius);
					(cx + dx, cy + dy)
				}
			};
			node.x = x;
			node.y = y;
		}

		self.index = nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.id.clone(), i))
			.collect();
		let before = links.len();
		links.retain(|link| {
			self.index.contains_key(&link.source) && self.index.contains_key(&link.target)
		});
		if links.len() != before {
			warn!("ignored {} links with unknown endpoints", before - links.len());
		}
		let edges = links
			.iter()
			.map(|link| (self.index[&link.source], self.index[&link.target]))
			.collect();

		info!(
			"loading graph: {} nodes ({retained} kept their position), {} links",
			nodes.len(),
			links.len()
		);
		self.simulation.set_nodes(nodes);
		self.links = links;
		self.simulation.insert_force(
			LINK_FORCE,
			LinkForce::new(edges, self.config.link_distance),
		);
		self.simulation.set_alpha_target(0.0);
		self.recenter();
		self.restart();
	}

	/// Track a new viewport size: recenter and hot-restart, keeping positions.
	pub fn resize(&mut self, width: f64, height: f64) {
		info!("viewport resized to {width}x{height}");
		self.viewport = Viewport { width, height };
		self.recenter();
		self.restart();
	}

	/// Begin dragging `id`, pinning it at `(x, y)`.
	///
	/// A drag already in progress on another node is ended first. Returns
	/// `false` (and changes nothing) if the node is unknown.
	pub fn drag_start(&mut self, id: &NodeId, x: f64, y: f64) -> bool {
		let Some(&index) = self.index.get(id) else {
			debug!("drag start on unknown node {id}");
			return false;
		};
		if let Some(previous) = self.drag.take() {
			debug!("drag on {} superseded by {id}", previous.node);
			self.release(previous.index);
		}

		hold(&mut self.simulation.nodes_mut()[index], x, y);
		self.drag = Some(Drag {
			node: id.clone(),
			index,
		});

		let floor = self.config.drag_alpha_target;
		self.simulation.set_alpha_target(floor);
		if self.simulation.alpha() < floor {
			if self.simulation.is_settled() {
				trace!("layout reheated by drag on {id}");
			}
			self.simulation.set_alpha(floor);
		}
		debug!("drag start {id} at ({x:.1}, {y:.1})");
		true
	}

	/// Move the dragged node to `(x, y)`. Ignored unless `id` is being dragged.
	pub fn drag_move(&mut self, id: &NodeId, x: f64, y: f64) -> bool {
		let index = match &self.drag {
			Some(drag) if &drag.node == id => drag.index,
			_ => return false,
		};
		hold(&mut self.simulation.nodes_mut()[index], x, y);
		true
	}

	/// Release the dragged node and let the layout settle. Ignored unless
	/// `id` is being dragged.
	pub fn drag_end(&mut self, id: &NodeId) -> bool {
		let Some(drag) = self.drag.take_if(|drag| &drag.node == id) else {
			return false;
		};
		self.release(drag.index);
		self.simulation.set_alpha_target(0.0);
		debug!("drag end {id}");
		true
	}

	/// Tick once unless settled. Returns whether positions changed.
	pub fn step(&mut self) -> bool {
		if self.simulation.is_settled() {
			return false;
		}
		self.simulation.tick();
		if self.simulation.is_settled() {
			trace!("layout settled after {} ticks", self.simulation.ticks());
		}
		true
	}

	/// Top-most node whose center is within `radius` of `(x, y)`.
	pub fn node_at(&self, x: f64, y: f64, radius: f64) -> Option<&Node> {
		self.nodes()
			.iter()
			.rev()
			.find(|node| (node.x - x).hypot(node.y - y) < radius)
	}

	/// Ids linked to `id`, in either direction (repeats for repeated links).
	pub fn neighbors<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
		self.links.iter().filter_map(move |link| {
			if &link.source == id {
				Some(&link.target)
			} else if &link.target == id {
				Some(&link.source)
			} else {
				None
			}
		})
	}

	/// Nodes with their current positions, in build order.
	pub fn nodes(&self) -> &[Node] {
		self.simulation.nodes()
	}

	/// Links of the current graph.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Look up a node by id.
	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.simulation.nodes()[i])
	}

	/// The node being dragged, if any.
	pub fn dragging(&self) -> Option<&NodeId> {
		self.drag.as_ref().map(|drag| &drag.node)
	}

	/// Current simulation energy.
	pub fn alpha(&self) -> f64 {
		self.simulation.alpha()
	}

	/// Has the layout come to rest?
	pub fn is_settled(&self) -> bool {
		self.simulation.is_settled()
	}

	/// Current viewport.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Active configuration.
	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// The underlying simulation.
	pub fn simulation(&self) -> &Simulation {
		&self.simulation
	}

	/// Install an extra named force, or replace [`CHARGE_FORCE`] or
	/// [`COLLIDE_FORCE`]. Installed forces survive reloads.
	///
	/// [`LINK_FORCE`] and [`CENTER_FORCE`] follow the loaded graph and the
	/// viewport; they are refused and `false` is returned.
	pub fn insert_force(&mut self, name: &'static str, force: impl Force + 'static) -> bool {
		if is_managed(name) {
			warn!("force {name:?} is managed by the engine, not replacing it");
			return false;
		}
		self.simulation.insert_force(name, force);
		true
	}

	/// Remove a force installed with [`insert_force`](Self::insert_force) or
	/// one of the defaults. Managed forces are refused.
	pub fn remove_force(&mut self, name: &str) -> bool {
		if is_managed(name) {
			warn!("force {name:?} is managed by the engine, not removing it");
			return false;
		}
		self.simulation.remove_force(name)
	}

	fn recenter(&mut self) {
		let (cx, cy) = self.viewport.center();
		self.simulation.insert_force(
			CENTER_FORCE,
			CenterForce::new(cx, cy, self.config.center_strength),
		);
	}

	fn restart(&mut self) {
		if self.simulation.is_settled() {
			trace!("layout reheated after {} ticks", self.simulation.ticks());
		}
		self.simulation.set_alpha(self.config.alpha_restart);
	}

	fn release(&mut self, index: usize) {
		let pin_on_release = self.config.pin_on_release;
		let node = &mut self.simulation.nodes_mut()[index];
		node.pin = if pin_on_release {
			Pin::Pinned {
				x: node.x,
				y: node.y,
			}
		} else {
			Pin::Free
		};
	}
}

fn is_managed(name: &str) -> bool {
	name == LINK_FORCE || name == CENTER_FORCE
}

fn hold(node: &mut Node, x: f64, y: f64) {
	node.pin = Pin::Pinned { x, y };
	node.x = x;
	node.y = y;
	node.vx = 0.0;
	node.vy = 0.0;
}
