/// Space kept free between a node's edge and each side of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
	/// Top inset, leaves room for the header bar.
	pub top: f64,
	/// Right inset.
	pub right: f64,
	/// Bottom inset.
	pub bottom: f64,
	/// Left inset.
	pub left: f64,
}

impl Default for Margins {
	fn default() -> Self {
		Self {
			top: 80.0,
			right: 50.0,
			bottom: 50.0,
			left: 50.0,
		}
	}
}

/// Force-directed layout parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
	/// Rest length of every link.
	pub link_distance: f64,
	/// Many-body strength, negative repels.
	pub charge_strength: f64,
	/// Squared distance under which repulsion stops growing.
	pub charge_distance_min2: f64,
	/// Extra gap kept between two node rims.
	pub collide_padding: f64,
	/// Upper bound on collision relaxation sweeps per tick.
	pub collide_iterations: usize,
	/// Viewport insets used when clamping.
	pub margins: Margins,
	/// Starting alpha of a fresh simulation.
	pub alpha_start: f64,
	/// Alpha under which the layout counts as settled.
	pub alpha_min: f64,
	/// Fraction of the gap to the alpha target closed each tick.
	pub alpha_decay: f64,
	/// Fraction of velocity lost each tick.
	pub velocity_decay: f64,
	/// Alpha the simulation is reheated to on drag and resize.
	pub reheat_alpha: f64,
	/// Radius of the random offset leaves are seeded with.
	pub seed_jitter: f64,
	/// Logical ticks per second for [`Simulation::step`](super::Simulation::step).
	pub tick_rate: f64,
	/// Ticks a single `step` may run to catch up.
	pub max_ticks_per_step: usize,
}

impl Default for LayoutParams {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			link_distance: 150.0,
			charge_strength: -300.0,
			charge_distance_min2: 1.0,
			collide_padding: 20.0,
			collide_iterations: 1000,
			margins: Margins::default(),
			alpha_start: 1.0,
			alpha_min,
			// Reaches alpha_min from 1.0 in 300 ticks.
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			reheat_alpha: 0.3,
			seed_jitter: 10.0,
			tick_rate: 60.0,
			max_ticks_per_step: 4,
		}
	}
}
