use std::collections::HashSet;

use crate::graph::NodeId;
use crate::layout::LayoutEngine;

pub const FRAME_DT: f64 = 1.0 / 60.0;

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<NodeId>,
	pub neighbors: HashSet<NodeId>,
	/// 0 = no highlight, 1 = fully highlighted; eases toward the target.
	pub highlight_t: f64,
}

/// Everything about the canvas that is not the layout: the pan/zoom
/// transform, hover highlight and surface size.
pub struct CanvasState {
	pub transform: ViewTransform,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl CanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Node under a screen point. The hit radius is the collision radius in
	/// graph space, so it scales with zoom like the nodes do.
	pub fn hit(&self, engine: &LayoutEngine, sx: f64, sy: f64) -> Option<NodeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		engine
			.node_at(gx, gy, engine.config().node_radius)
			.map(|node| node.id.clone())
	}

	pub fn set_hover(&mut self, node: Option<NodeId>, engine: &LayoutEngine) {
		if self.hover.node == node {
			return;
		}
		self.hover.neighbors = match &node {
			Some(id) => engine.neighbors(id).cloned().collect(),
			None => HashSet::new(),
		};
		self.hover.node = node;
	}

	pub fn is_highlighted(&self, id: &NodeId) -> bool {
		self.hover.node.as_ref() == Some(id) || self.hover.neighbors.contains(id)
	}

	pub fn is_hovered(&self, id: &NodeId) -> bool {
		self.hover.node.as_ref() == Some(id)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() && self.hover.highlight_t > 0.01
	}

	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Advance view-only animation (edge flow, highlight easing).
	pub fn advance(&mut self, dt: f64) {
		self.flow_time += dt;
		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * (dt * 6.0).min(1.0);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
