use log::{debug, warn};
use rand::Rng;
use rand::rngs::StdRng;

use super::{LayoutParams, Margins, Point, Viewport};
use crate::graph::{Graph, Role};

// Residual overlap treated as resolved, absorbs rounding after projection.
const COLLIDE_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Debug)]
struct Body {
	pos: Point,
	vx: f64,
	vy: f64,
	radius: f64,
	pin: Option<Point>,
}

#[derive(Clone, Copy, Debug)]
struct Spring {
	source: usize,
	target: usize,
	strength: f64,
	// Share of the correction taken by the target.
	bias: f64,
}

/// Positions produced by one tick, index-aligned with [`Graph::nodes`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickEvent {
	/// Alpha after this tick's decay.
	pub alpha: f64,
	/// Largest distance any node moved during the tick.
	pub max_displacement: f64,
	/// Node positions.
	pub positions: Vec<Point>,
}

/// Live layout state for one graph.
pub struct Simulation {
	ids: Vec<String>,
	bodies: Vec<Body>,
	springs: Vec<Spring>,
	params: LayoutParams,
	viewport: Viewport,
	alpha: f64,
	alpha_target: f64,
	settled: bool,
	stopped: bool,
	pending: f64,
	rng: StdRng,
}

impl Simulation {
	/// Seeds a simulation for `graph`.
	///
	/// The centre node starts on the viewport centre, leaves start on it
	/// too with a small random offset so no two nodes coincide.
	pub fn new(graph: &Graph, viewport: Viewport, params: LayoutParams, mut rng: StdRng) -> Self {
		let center = viewport.center();
		let bodies: Vec<Body> = graph
			.nodes
			.iter()
			.map(|node| {
				let pos = if node.role == Role::Center {
					center
				} else {
					let angle = rng.gen_range(0.0..std::f64::consts::TAU);
					let r = rng.gen_range(0.0..=params.seed_jitter);
					Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
				};
				Body {
					pos,
					vx: 0.0,
					vy: 0.0,
					radius: node.radius,
					pin: None,
				}
			})
			.collect();

		let mut degree = vec![0usize; bodies.len()];
		let mut ends = Vec::with_capacity(graph.links.len());
		for link in &graph.links {
			if let (Some(s), Some(t)) = (graph.index_of(&link.source), graph.index_of(&link.target)) {
				degree[s] += 1;
				degree[t] += 1;
				ends.push((s, t));
			} else {
				warn!("dropping link {} -> {}: endpoint missing", link.source, link.target);
			}
		}
		let springs = ends
			.into_iter()
			.map(|(source, target)| {
				let (ds, dt) = (degree[source] as f64, degree[target] as f64);
				Spring {
					source,
					target,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();

		debug!("simulation seeded with {} nodes", bodies.len());
		Self {
			ids: graph.nodes.iter().map(|n| n.id.clone()).collect(),
			bodies,
			springs,
			alpha: params.alpha_start,
			alpha_target: 0.0,
			params,
			viewport,
			settled: false,
			stopped: false,
			pending: 0.0,
			rng,
		}
	}

	/// Current alpha.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Current viewport.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Insets free nodes are clamped to.
	pub fn margins(&self) -> Margins {
		self.params.margins
	}

	/// Whether alpha has cooled below the settle threshold.
	pub fn is_settled(&self) -> bool {
		self.settled
	}

	/// Whether [`stop`](Self::stop) was called.
	pub fn is_stopped(&self) -> bool {
		self.stopped
	}

	/// Position of node `id`.
	pub fn position(&self, id: &str) -> Option<Point> {
		self.index(id).map(|i| self.bodies[i].pos)
	}

	/// All positions, index-aligned with the graph's nodes.
	pub fn positions(&self) -> Vec<Point> {
		self.bodies.iter().map(|b| b.pos).collect()
	}

	/// Radius of each node, index-aligned with the graph's nodes.
	pub fn radii(&self) -> impl Iterator<Item = f64> + '_ {
		self.bodies.iter().map(|b| b.radius)
	}

	fn index(&self, id: &str) -> Option<usize> {
		self.ids.iter().position(|n| n == id)
	}

	/// Fixes node `id` at `at` until [`unpin`](Self::unpin).
	///
	/// The pinned node keeps pushing and pulling the others. Returns false
	/// for unknown ids, non-finite coordinates, or a stopped simulation.
	pub fn pin(&mut self, id: &str, at: Point) -> bool {
		if self.stopped || !at.is_finite() {
			return false;
		}
		let Some(i) = self.index(id) else {
			return false;
		};
		let body = &mut self.bodies[i];
		body.pin = Some(at);
		body.pos = at;
		body.vx = 0.0;
		body.vy = 0.0;
		self.alpha_target = self.params.reheat_alpha;
		self.settled = false;
		true
	}

	/// Releases node `id` back to the forces.
	pub fn unpin(&mut self, id: &str) -> bool {
		let Some(i) = self.index(id) else {
			return false;
		};
		if self.bodies[i].pin.take().is_none() {
			return false;
		}
		if self.bodies.iter().all(|b| b.pin.is_none()) {
			self.alpha_target = 0.0;
		}
		true
	}

	/// Moves the centering target to the new viewport centre and reheats.
	pub fn resize(&mut self, viewport: Viewport) {
		if self.stopped {
			return;
		}
		self.viewport = viewport;
		self.alpha = self.params.reheat_alpha;
		self.settled = false;
	}

	/// Stops the simulation for good; no tick runs afterwards.
	pub fn stop(&mut self) {
		if !self.stopped {
			debug!("simulation stopped at alpha {:.4}", self.alpha);
		}
		self.stopped = true;
	}

	/// Advances by `dt` seconds of wall time, running whole ticks at the
	/// configured rate. Returns the last tick's event, if any ran.
	pub fn step(&mut self, dt: f64) -> Option<TickEvent> {
		if self.stopped || self.settled {
			self.pending = 0.0;
			return None;
		}
		let interval = 1.0 / self.params.tick_rate;
		self.pending += dt.max(0.0);
		let mut last = None;
		let mut ran = 0;
		while self.pending >= interval && ran < self.params.max_ticks_per_step {
			self.pending -= interval;
			ran += 1;
			match self.tick() {
				Some(event) => last = Some(event),
				None => break,
			}
		}
		if ran == self.params.max_ticks_per_step {
			// Drop the backlog rather than spiral after a long stall.
			self.pending = 0.0;
		}
		last
	}

	/// Runs one tick. Returns `None` once stopped or settled.
	pub fn tick(&mut self) -> Option<TickEvent> {
		if self.stopped || self.settled {
			return None;
		}
		let before = self.positions();

		self.apply_links();
		self.apply_charge();
		self.apply_centering();
		self.integrate();
		self.resolve_collisions();
		self.clamp();

		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;
		if self.alpha < self.params.alpha_min {
			self.settled = true;
			debug!("layout settled");
		}

		let positions = self.positions();
		let max_displacement = before
			.iter()
			.zip(&positions)
			.map(|(a, b)| a.distance(*b))
			.fold(0.0, f64::max);
		Some(TickEvent {
			alpha: self.alpha,
			max_displacement,
			positions,
		})
	}

	fn jiggle(&mut self) -> f64 {
		(self.rng.gen_range(0.0..1.0) - 0.5) * 1e-6
	}

	fn apply_links(&mut self) {
		let alpha = self.alpha;
		for k in 0..self.springs.len() {
			let Spring {
				source,
				target,
				strength,
				bias,
			} = self.springs[k];
			let (s, t) = (&self.bodies[source], &self.bodies[target]);
			let mut dx = t.pos.x + t.vx - s.pos.x - s.vx;
			let mut dy = t.pos.y + t.vy - s.pos.y - s.vy;
			if dx == 0.0 {
				dx = self.jiggle();
			}
			if dy == 0.0 {
				dy = self.jiggle();
			}
			let len = dx.hypot(dy);
			let f = (len - self.params.link_distance) / len * alpha * strength;
			let (fx, fy) = (dx * f, dy * f);

			let t = &mut self.bodies[target];
			t.vx -= fx * bias;
			t.vy -= fy * bias;
			let s = &mut self.bodies[source];
			s.vx += fx * (1.0 - bias);
			s.vy += fy * (1.0 - bias);
		}
	}

	fn apply_charge(&mut self) {
		let n = self.bodies.len();
		let k = self.params.charge_strength * self.alpha;
		let min2 = self.params.charge_distance_min2;
		for i in 0..n {
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut dx = self.bodies[j].pos.x - self.bodies[i].pos.x;
				let mut dy = self.bodies[j].pos.y - self.bodies[i].pos.y;
				if dx == 0.0 {
					dx = self.jiggle();
				}
				if dy == 0.0 {
					dy = self.jiggle();
				}
				let mut l2 = dx * dx + dy * dy;
				if l2 < min2 {
					l2 = (min2 * l2).sqrt();
				}
				let body = &mut self.bodies[i];
				body.vx += dx * k / l2;
				body.vy += dy * k / l2;
			}
		}
	}

	// Shifts free nodes so the centroid of all nodes lands on the viewport
	// centre. Pinned nodes stay put.
	fn apply_centering(&mut self) {
		let n = self.bodies.len() as f64;
		if n == 0.0 {
			return;
		}
		let (sx, sy) = self
			.bodies
			.iter()
			.fold((0.0, 0.0), |(x, y), b| (x + b.pos.x, y + b.pos.y));
		let target = self.viewport.center();
		let (ox, oy) = (target.x - sx / n, target.y - sy / n);
		for body in self.bodies.iter_mut().filter(|b| b.pin.is_none()) {
			body.pos.x += ox;
			body.pos.y += oy;
		}
	}

	fn integrate(&mut self) {
		let keep = 1.0 - self.params.velocity_decay;
		let center = self.viewport.center();
		for body in &mut self.bodies {
			if let Some(pin) = body.pin {
				body.pos = pin;
				body.vx = 0.0;
				body.vy = 0.0;
				continue;
			}
			body.vx *= keep;
			body.vy *= keep;
			body.pos.x += body.vx;
			body.pos.y += body.vy;
			if !body.pos.is_finite() || !body.vx.is_finite() || !body.vy.is_finite() {
				warn!("non-finite node position, reseeding at centre");
				body.pos = center;
				body.vx = 0.0;
				body.vy = 0.0;
			}
		}
	}

	/// Pushes apart every pair closer than their radii plus padding, keeping
	/// free nodes inside the viewport band between sweeps.
	///
	/// Pairs already far enough apart are never touched; pinned nodes never
	/// move. Sweeps repeat until a sweep finds no overlap or the sweep budget
	/// runs out, which only happens when the band is too small for the graph.
	pub fn resolve_collisions(&mut self) {
		let pad = self.params.collide_padding;
		let n = self.bodies.len();
		for sweep in 0..self.params.collide_iterations {
			let mut moved = false;
			for i in 0..n {
				for j in (i + 1)..n {
					let (a, b) = (&self.bodies[i], &self.bodies[j]);
					let (wa, wb) = match (a.pin.is_some(), b.pin.is_some()) {
						(true, true) => continue,
						(true, false) => (0.0, 1.0),
						(false, true) => (1.0, 0.0),
						(false, false) => {
							let (ra2, rb2) = (a.radius * a.radius, b.radius * b.radius);
							(rb2 / (ra2 + rb2), ra2 / (ra2 + rb2))
						}
					};
					let min = a.radius + b.radius + pad;
					let (mut dx, mut dy) = (b.pos.x - a.pos.x, b.pos.y - a.pos.y);
					let mut dist = dx.hypot(dy);
					if dist >= min - COLLIDE_TOLERANCE {
						continue;
					}
					let overlap = min - dist;
					if dist == 0.0 {
						let angle = self.rng.gen_range(0.0..std::f64::consts::TAU);
						(dx, dy, dist) = (angle.cos(), angle.sin(), 1.0);
					}
					let (ux, uy) = (dx / dist, dy / dist);
					let a = &mut self.bodies[i];
					a.pos.x -= ux * overlap * wa;
					a.pos.y -= uy * overlap * wa;
					let b = &mut self.bodies[j];
					b.pos.x += ux * overlap * wb;
					b.pos.y += uy * overlap * wb;
					moved = true;
				}
			}
			if !moved {
				return;
			}
			self.clamp();
			if sweep + 1 == self.params.collide_iterations {
				debug!("collision budget exhausted with {n} nodes");
			}
		}
	}

	fn clamp(&mut self) {
		let margins = self.params.margins;
		for body in self.bodies.iter_mut().filter(|b| b.pin.is_none()) {
			body.pos = self.viewport.clamp(body.pos, body.radius, &margins);
		}
	}
}
