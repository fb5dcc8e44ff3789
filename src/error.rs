//! Failures surfaced at the query boundary.

use thiserror::Error;

/// Generic message used when the source fails without a usable reason.
pub const SEARCH_FAILED: &str = "Errore nella ricerca";

/// Why a query produced no graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QueryError {
	/// Blank input; nothing is submitted.
	#[error("Inserisci una parola")]
	EmptyInput,
	/// Another query for this session has not answered yet.
	#[error("Ricerca già in corso")]
	QueryInFlight,
	/// Retrieval failed in transport; the original reason is kept.
	#[error("{message}")]
	SourceUnavailable {
		/// Reason reported by the transport or the endpoint.
		message: String,
	},
	/// The source has no entry for the word.
	#[error("Parola \"{word}\" non trovata")]
	NotFound {
		/// Queried word.
		word: String,
	},
	/// The source answered but listed no synonyms or antonyms.
	#[error("Nessun sinonimo o contrario trovato per questa parola")]
	NoRelationsFound {
		/// Queried word.
		word: String,
	},
	/// A response arrived for a query that is no longer current.
	#[error("risposta scartata: la ricerca non è più attuale")]
	StaleResponse,
}

impl QueryError {
	/// Whether the user may retry the same word.
	pub fn is_retryable(&self) -> bool {
		matches!(self, QueryError::SourceUnavailable { .. })
	}
}
