//! Query lifecycle for one viewer: at most one request in flight and at
//! most one live simulation.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::QueryError;
use crate::graph::{Graph, build_graph};
use crate::layout::{LayoutParams, Simulation, Viewport};
use crate::search::SearchResponse;

/// Shared handle to the running simulation, also held by the renderer.
pub type SimulationHandle = Rc<RefCell<Simulation>>;

/// Proof that a query was started; answers must present it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryTicket {
	token: u64,
	word: String,
}

impl QueryTicket {
	/// The submitted word, trimmed.
	pub fn word(&self) -> &str {
		&self.word
	}
}

/// The graph currently on screen.
#[derive(Clone)]
pub struct ActiveGraph {
	/// Centre word.
	pub word: String,
	/// Nodes and links.
	pub graph: Graph,
	/// Layout driving the node positions.
	pub simulation: SimulationHandle,
}

/// Explicit owner of the current word, the in-flight guard and the live
/// simulation.
pub struct Session {
	rng: StdRng,
	params: LayoutParams,
	next_token: u64,
	pending: Option<u64>,
	last_word: Option<String>,
	active: Option<ActiveGraph>,
}

impl Session {
	/// A session drawing radii and jitter from `rng`.
	pub fn new(rng: StdRng) -> Self {
		Self::with_params(rng, LayoutParams::default())
	}

	/// A session with custom layout parameters.
	pub fn with_params(rng: StdRng, params: LayoutParams) -> Self {
		Self {
			rng,
			params,
			next_token: 0,
			pending: None,
			last_word: None,
			active: None,
		}
	}

	/// Whether a query is waiting for its answer.
	pub fn is_busy(&self) -> bool {
		self.pending.is_some()
	}

	/// Last submitted word, kept for retries until reset.
	pub fn last_word(&self) -> Option<&str> {
		self.last_word.as_deref()
	}

	/// Graph currently shown, if any.
	pub fn active(&self) -> Option<&ActiveGraph> {
		self.active.as_ref()
	}

	/// Starts a query for `input`, discarding the shown graph.
	pub fn start_query(&mut self, input: &str) -> Result<QueryTicket, QueryError> {
		let word = input.trim();
		if word.is_empty() {
			return Err(QueryError::EmptyInput);
		}
		if self.pending.is_some() {
			return Err(QueryError::QueryInFlight);
		}
		self.discard_graph();

		self.next_token += 1;
		self.pending = Some(self.next_token);
		self.last_word = Some(word.to_string());
		info!("query #{} for {word:?}", self.next_token);
		Ok(QueryTicket {
			token: self.next_token,
			word: word.to_string(),
		})
	}

	/// Re-issues the last submitted word.
	pub fn retry(&mut self) -> Result<QueryTicket, QueryError> {
		let word = self.last_word.clone().unwrap_or_default();
		self.start_query(&word)
	}

	/// Resets the view and starts a query for a word picked from the graph.
	pub fn explore(&mut self, word: &str) -> Result<QueryTicket, QueryError> {
		self.reset();
		self.start_query(word)
	}

	/// Applies the answer to `ticket`.
	///
	/// Answers to a ticket that is no longer current are dropped. Nothing
	/// is built unless the answer carries at least one related word.
	pub fn complete_query(
		&mut self,
		ticket: &QueryTicket,
		outcome: Result<SearchResponse, QueryError>,
		viewport: Viewport,
	) -> Result<ActiveGraph, QueryError> {
		if self.pending != Some(ticket.token) {
			warn!("dropping stale answer for query #{}", ticket.token);
			return Err(QueryError::StaleResponse);
		}
		self.pending = None;

		let (word, relations) = outcome.and_then(|body| body.into_relations(&ticket.word))?;
		let graph = build_graph(&word, &relations, &mut self.rng);
		let sim_rng = StdRng::seed_from_u64(self.rng.next_u64());
		let simulation = Simulation::new(&graph, viewport, self.params.clone(), sim_rng);
		info!(
			"query #{} built {} nodes, {} links",
			ticket.token,
			graph.nodes.len(),
			graph.links.len()
		);

		let active = ActiveGraph {
			word,
			graph,
			simulation: Rc::new(RefCell::new(simulation)),
		};
		self.active = Some(active.clone());
		Ok(active)
	}

	/// Back to search: stops the simulation and invalidates pending answers.
	pub fn reset(&mut self) {
		self.discard_graph();
		if let Some(token) = self.pending.take() {
			debug!("query #{token} abandoned");
		}
		self.last_word = None;
	}

	fn discard_graph(&mut self) {
		if let Some(active) = self.active.take() {
			active.simulation.borrow_mut().stop();
		}
	}
}

impl Drop for Session {
	fn drop(&mut self) {
		self.discard_graph();
	}
}
