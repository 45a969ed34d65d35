use serde::Deserialize;

/// Tuning for the force simulation and its interaction policy.
///
/// Deserializes from partial JSON; missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Rest length of every link spring.
	pub link_distance: f64,
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Distances below this are clamped in the many-body force.
	pub charge_distance_min: f64,
	/// Collision radius of a node; centers stay at least twice this apart.
	pub node_radius: f64,
	/// Fraction of an overlap resolved per tick, in `[0, 1]`.
	pub collide_strength: f64,
	/// How strongly the mean position is pulled onto the viewport center, in `[0, 1]`.
	pub center_strength: f64,
	/// Alpha a hot restart starts from.
	pub alpha_restart: f64,
	/// Below this alpha the simulation is settled and stops ticking.
	pub alpha_min: f64,
	/// Per-tick fraction of the gap between alpha and its target that closes.
	pub alpha_decay: f64,
	/// Alpha floor held while a node is being dragged.
	pub drag_alpha_target: f64,
	/// Fraction of velocity lost per tick, in `[0, 1]`.
	pub velocity_decay: f64,
	/// Radius scale of the spiral new nodes are seeded on.
	pub initial_radius: f64,
	/// On reload, start nodes whose id existed before at their old position.
	pub retain_positions_on_reload: bool,
	/// Keep a node pinned where it was dropped instead of releasing it.
	pub pin_on_release: bool,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			link_distance: 100.0,
			charge_strength: -30.0,
			charge_distance_min: 1.0,
			node_radius: 12.0,
			collide_strength: 1.0,
			center_strength: 0.1,
			alpha_restart: 1.0,
			alpha_min,
			// settles in ~300 ticks from a full restart
			alpha_decay: 1.0 - f64::powf(alpha_min, 1.0 / 300.0),
			drag_alpha_target: 0.3,
			velocity_decay: 0.4,
			initial_radius: 10.0,
			retain_positions_on_reload: false,
			pin_on_release: false,
		}
	}
}
