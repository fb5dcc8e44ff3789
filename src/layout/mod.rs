//! Force-directed layout engine.
//!
//! A damped, alpha-cooled simulation in the style of d3-force:
//! - Link springs toward a fixed rest length
//! - Pairwise many-body repulsion
//! - Centering of the node set on the viewport centre
//! - Hard collision resolution by radius plus padding
//! - Clamping inside the viewport
//!
//! The engine never reads a clock. Callers drive it with [`Simulation::tick`]
//! or [`Simulation::step`] from whatever scheduler they own.

mod params;
mod simulation;

pub use params::{LayoutParams, Margins};
pub use simulation::{Simulation, TickEvent};

/// A position in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// Creates a point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Whether both coordinates are finite.
	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// Size of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl Viewport {
	/// Creates a viewport.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Centre point, the target of the centering force.
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	/// Keeps a node of `radius` inside the viewport minus `margins`.
	///
	/// When the viewport is too small for the node the midpoint of the
	/// allowed band is used.
	pub fn clamp(&self, p: Point, radius: f64, margins: &Margins) -> Point {
		Point::new(
			clamp_band(p.x, radius + margins.left, self.width - radius - margins.right),
			clamp_band(p.y, radius + margins.top, self.height - radius - margins.bottom),
		)
	}
}

fn clamp_band(v: f64, lo: f64, hi: f64) -> f64 {
	if lo > hi { (lo + hi) / 2.0 } else { v.clamp(lo, hi) }
}
