use crate::graph::{Graph, Role};
use crate::layout::{Point, Viewport};
use crate::session::{ActiveGraph, SimulationHandle};

// Pointer travel, in pixels, past which a press counts as a drag.
const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<usize>,
	pub start: Point,
	pub moved: bool,
}

pub struct GraphViewState {
	pub graph: Graph,
	pub sim: SimulationHandle,
	pub positions: Vec<Point>,
	pub radii: Vec<f64>,
	pub drag: DragState,
	pub hover: Option<usize>,
	pub pointer: Point,
	pub viewport: Viewport,
}

impl GraphViewState {
	pub fn new(active: ActiveGraph) -> Self {
		let (positions, radii, viewport) = {
			let sim = active.simulation.borrow();
			(sim.positions(), sim.radii().collect::<Vec<_>>(), sim.viewport())
		};
		Self {
			graph: active.graph,
			sim: active.simulation,
			positions,
			radii,
			drag: DragState::default(),
			hover: None,
			pointer: Point::default(),
			viewport,
		}
	}

	pub fn is_running(&self) -> bool {
		!self.sim.borrow().is_stopped()
	}

	/// Topmost node under `p`.
	pub fn node_at(&self, p: Point) -> Option<usize> {
		self.positions
			.iter()
			.zip(&self.radii)
			.enumerate()
			.rev()
			.find(|(_, (pos, r))| pos.distance(p) <= **r)
			.map(|(i, _)| i)
	}

	pub fn tick(&mut self, dt: f64) {
		if let Some(event) = self.sim.borrow_mut().step(dt) {
			self.positions = event.positions;
		}
	}

	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		self.sim.borrow_mut().resize(viewport);
	}

	pub fn hover(&mut self, p: Point) {
		self.pointer = p;
		if self.drag.node_idx.is_none() {
			self.hover = self.node_at(p);
		}
	}

	/// Starts dragging the node under `p`, pinning it where it is.
	pub fn press(&mut self, p: Point) -> bool {
		let Some(idx) = self.node_at(p) else {
			return false;
		};
		let at = self.positions[idx];
		if self.sim.borrow_mut().pin(&self.graph.nodes[idx].id, at) {
			self.drag = DragState {
				node_idx: Some(idx),
				start: p,
				moved: false,
			};
		}
		true
	}

	pub fn drag_to(&mut self, p: Point) {
		self.pointer = p;
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		if p.distance(self.drag.start) > CLICK_SLOP {
			self.drag.moved = true;
		}
		if self.drag.moved {
			let mut sim = self.sim.borrow_mut();
			let at = self.viewport.clamp(p, self.radii[idx], &sim.margins());
			if sim.pin(&self.graph.nodes[idx].id, at) {
				self.positions[idx] = at;
			}
		}
	}

	/// Ends a drag. A press that never moved on a leaf returns its word.
	pub fn release(&mut self) -> Option<String> {
		let drag = std::mem::take(&mut self.drag);
		let idx = drag.node_idx?;
		self.sim.borrow_mut().unpin(&self.graph.nodes[idx].id);
		let node = &self.graph.nodes[idx];
		(!drag.moved && node.role != Role::Center).then(|| node.label.clone())
	}

	/// Leaf under the pointer, for the tooltip.
	pub fn hovered_leaf(&self) -> Option<&str> {
		let node = &self.graph.nodes[self.hover?];
		(node.role != Role::Center).then_some(node.label.as_str())
	}
}
