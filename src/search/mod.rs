//! The `/api/search/{word}` contract shared by the endpoint and the client.

mod config;

use log::{error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{QueryError, SEARCH_FAILED};
use crate::relations::{DocumentNode, Relations, extract_relations, locate_container};

pub use config::ServerConfig;

/// Path prefix of the search endpoint.
pub const SEARCH_PATH: &str = "/api/search/";

/// Failure of the remote dictionary fetch.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RetrievalError {
	/// Connection-level failure.
	#[error("{0}")]
	Transport(String),
	/// No answer within the deadline.
	#[error("timeout of {0}ms exceeded")]
	Timeout(u64),
	/// The source answered with a non-success status.
	#[error("Request failed with status code {0}")]
	Status(u16),
}

/// JSON body of the search endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	/// Normalized query word, absent on failures.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub word: Option<String>,
	/// Synonyms in document order.
	#[serde(default)]
	pub sinonimi: Vec<String>,
	/// Antonyms in document order.
	#[serde(default)]
	pub contrari: Vec<String>,
	/// Set when the source has no entry for the word.
	#[serde(default, skip_serializing_if = "is_false")]
	pub not_found: bool,
	/// Short failure label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	/// Underlying failure reason.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

fn is_false(v: &bool) -> bool {
	!*v
}

impl SearchResponse {
	/// Successful lookup.
	pub fn found(word: &str, relations: Relations) -> Self {
		Self {
			word: Some(word.to_string()),
			sinonimi: relations.synonyms,
			contrari: relations.antonyms,
			..Default::default()
		}
	}

	/// The source has no such word.
	pub fn not_found(word: &str) -> Self {
		Self {
			word: Some(word.to_string()),
			not_found: true,
			..Default::default()
		}
	}

	/// Retrieval failed.
	pub fn failure(message: impl Into<String>) -> Self {
		Self {
			error: Some(SEARCH_FAILED.to_string()),
			message: Some(message.into()),
			..Default::default()
		}
	}

	/// Classifies the body into related words or a query error.
	///
	/// `requested` names the word when the body does not.
	pub fn into_relations(self, requested: &str) -> Result<(String, Relations), QueryError> {
		let word = self.word.unwrap_or_else(|| requested.to_string());
		if self.error.is_some() {
			return Err(QueryError::SourceUnavailable {
				message: self
					.message
					.or(self.error)
					.unwrap_or_else(|| SEARCH_FAILED.to_string()),
			});
		}
		if self.not_found {
			return Err(QueryError::NotFound { word });
		}
		let relations = Relations::new(self.sinonimi, self.contrari);
		if relations.is_empty() {
			return Err(QueryError::NoRelationsFound { word });
		}
		Ok((word, relations))
	}
}

/// Status code plus body the endpoint answers with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
	/// HTTP status.
	pub status: u16,
	/// JSON body.
	pub body: SearchResponse,
}

/// Trims and lowercases a raw query; `None` when nothing is left.
pub fn normalize_query(raw: &str) -> Option<String> {
	let word = raw.trim().to_lowercase();
	(!word.is_empty()).then_some(word)
}

/// Builds the endpoint reply for the raw path segment `word` from the
/// fetched page.
///
/// The word is trimmed and lowercased before it is echoed; a blank word is
/// a 400. A 404 from the source is an empty, `notFound` success; any other
/// retrieval failure is a 500 carrying the underlying message.
pub fn respond<N: DocumentNode>(word: &str, fetched: Result<N, RetrievalError>) -> Reply {
	let Some(word) = normalize_query(word) else {
		return Reply {
			status: 400,
			body: SearchResponse::failure(QueryError::EmptyInput.to_string()),
		};
	};
	match fetched {
		Ok(root) => {
			let container = locate_container(&root);
			let relations = extract_relations(container.as_ref());
			info!(
				"{word}: {} synonyms, {} antonyms",
				relations.synonyms.len(),
				relations.antonyms.len()
			);
			Reply {
				status: 200,
				body: SearchResponse::found(&word, relations),
			}
		}
		Err(RetrievalError::Status(404)) => Reply {
			status: 200,
			body: SearchResponse::not_found(&word),
		},
		Err(err) => {
			error!("search for {word} failed: {err}");
			Reply {
				status: 500,
				body: SearchResponse::failure(err.to_string()),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Clone)]
	struct Page {
		tag: &'static str,
		class: &'static str,
		text: &'static str,
		children: Vec<Page>,
	}

	impl DocumentNode for Page {
		fn tag(&self) -> String {
			self.tag.into()
		}
		fn has_class(&self, class: &str) -> bool {
			self.class == class
		}
		fn text(&self) -> String {
			let mut s = self.text.to_string();
			for c in &self.children {
				s.push_str(&c.text());
			}
			s
		}
		fn children(&self) -> Vec<Self> {
			self.children.clone()
		}
	}

	fn leaf(tag: &'static str, class: &'static str, text: &'static str) -> Page {
		Page {
			tag,
			class,
			text,
			children: vec![],
		}
	}

	fn para(words: &[&'static str]) -> Page {
		Page {
			tag: "p",
			class: "",
			text: "",
			children: words.iter().map(|w| leaf("a", "", w)).collect(),
		}
	}

	fn felice_page() -> Page {
		Page {
			tag: "html",
			class: "",
			text: "",
			children: vec![Page {
				tag: "div",
				class: "sct-descr",
				text: "",
				children: vec![
					leaf("div", "sct-macrotipo", "Sinonimi"),
					para(&["contento", "allegro", "Leggi tutto >>"]),
					leaf("div", "sct-macrotipo", "Contrari"),
					para(&["triste"]),
				],
			}],
		}
	}

	#[test]
	fn found_reply_lists_words_in_order() {
		let reply = respond("felice", Ok(felice_page()));
		assert_eq!(reply.status, 200);
		assert_eq!(
			serde_json::to_value(&reply.body).unwrap(),
			serde_json::json!({
				"word": "felice",
				"sinonimi": ["contento", "allegro"],
				"contrari": ["triste"],
			})
		);
	}

	#[test]
	fn source_404_is_not_found_success() {
		let reply = respond::<Page>("zzzz", Err(RetrievalError::Status(404)));
		assert_eq!(reply.status, 200);
		assert_eq!(
			serde_json::to_value(&reply.body).unwrap(),
			serde_json::json!({
				"word": "zzzz",
				"sinonimi": [],
				"contrari": [],
				"notFound": true,
			})
		);
	}

	#[test]
	fn transport_failure_is_500_with_message() {
		let reply = respond::<Page>("felice", Err(RetrievalError::Timeout(10_000)));
		assert_eq!(reply.status, 500);
		assert_eq!(
			serde_json::to_value(&reply.body).unwrap(),
			serde_json::json!({
				"error": "Errore nella ricerca",
				"message": "timeout of 10000ms exceeded",
				"sinonimi": [],
				"contrari": [],
			})
		);
		let reply = respond::<Page>("felice", Err(RetrievalError::Status(503)));
		assert_eq!(reply.status, 500);
	}

	#[test]
	fn page_without_container_is_empty_success() {
		let reply = respond("felice", Ok(leaf("html", "", "niente")));
		assert_eq!(reply.status, 200);
		assert!(reply.body.sinonimi.is_empty() && reply.body.contrari.is_empty());
		assert!(!reply.body.not_found);
	}

	#[test]
	fn client_classifies_bodies() {
		let ok: SearchResponse = serde_json::from_str(
			r#"{"word":"felice","sinonimi":["contento","allegro"],"contrari":["triste"]}"#,
		)
		.unwrap();
		let (word, rel) = ok.into_relations("Felice").unwrap();
		assert_eq!(word, "felice");
		assert_eq!(rel.synonyms, vec!["contento", "allegro"]);
		assert_eq!(rel.antonyms, vec!["triste"]);

		let nf: SearchResponse =
			serde_json::from_str(r#"{"word":"zz","sinonimi":[],"contrari":[],"notFound":true}"#)
				.unwrap();
		assert_eq!(
			nf.into_relations("zz"),
			Err(QueryError::NotFound { word: "zz".into() })
		);

		let empty: SearchResponse =
			serde_json::from_str(r#"{"word":"zz","sinonimi":[],"contrari":[]}"#).unwrap();
		assert_eq!(
			empty.into_relations("zz"),
			Err(QueryError::NoRelationsFound { word: "zz".into() })
		);

		let failed: SearchResponse = serde_json::from_str(
			r#"{"error":"Errore nella ricerca","message":"socket hang up","sinonimi":[],"contrari":[]}"#,
		)
		.unwrap();
		assert_eq!(
			failed.into_relations("zz"),
			Err(QueryError::SourceUnavailable {
				message: "socket hang up".into()
			})
		);
	}

	#[test]
	fn client_caps_oversized_lists() {
		let body = SearchResponse {
			word: Some("x".into()),
			sinonimi: (0..25).map(|i| format!("s{i}")).collect(),
			contrari: (0..25).map(|i| format!("a{i}")).collect(),
			..Default::default()
		};
		let (_, rel) = body.into_relations("x").unwrap();
		assert_eq!((rel.synonyms.len(), rel.antonyms.len()), (20, 15));
	}

	#[test]
	fn reply_echoes_normalized_word() {
		let reply = respond("  Felice ", Ok(felice_page()));
		assert_eq!(reply.status, 200);
		assert_eq!(reply.body.word.as_deref(), Some("felice"));
		assert_eq!(reply.body.sinonimi, vec!["contento", "allegro"]);

		let reply = respond::<Page>(" ZZZZ", Err(RetrievalError::Status(404)));
		assert_eq!(reply.body.word.as_deref(), Some("zzzz"));
		assert!(reply.body.not_found);
	}

	#[test]
	fn blank_word_is_rejected_before_lookup() {
		let reply = respond("   ", Ok(felice_page()));
		assert_eq!(reply.status, 400);
		assert_eq!(reply.body.word, None);
		assert!(reply.body.sinonimi.is_empty());
		assert_eq!(reply.body.message.as_deref(), Some("Inserisci una parola"));
	}

	#[test]
	fn normalizes_query() {
		assert_eq!(normalize_query("  Felice "), Some("felice".into()));
		assert_eq!(normalize_query("   "), None);
	}
}
