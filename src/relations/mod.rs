//! Synonym/antonym extraction from the dictionary page markup.

mod dom;
mod extract;

use serde::{Deserialize, Serialize};

pub use dom::parse_document;
pub use extract::{
	CONTAINER_CLASS, DocumentNode, HEADER_CLASS, extract_relations, locate_container,
};

/// Maximum number of synonyms kept per query.
pub const MAX_SYNONYMS: usize = 20;
/// Maximum number of antonyms kept per query.
pub const MAX_ANTONYMS: usize = 15;

/// The kind of association between the query word and a related word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
	/// Same or similar meaning.
	Synonym,
	/// Opposite meaning.
	Antonym,
}

impl RelationKind {
	/// Cap applied to the word list of this kind.
	pub fn cap(self) -> usize {
		match self {
			RelationKind::Synonym => MAX_SYNONYMS,
			RelationKind::Antonym => MAX_ANTONYMS,
		}
	}
}

/// Related words in document order, one list per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Relations {
	/// Synonyms, at most [`MAX_SYNONYMS`].
	pub synonyms: Vec<String>,
	/// Antonyms, at most [`MAX_ANTONYMS`].
	pub antonyms: Vec<String>,
}

impl Relations {
	/// Builds a relation set, dropping anything past each kind's cap.
	pub fn new(mut synonyms: Vec<String>, mut antonyms: Vec<String>) -> Self {
		synonyms.truncate(MAX_SYNONYMS);
		antonyms.truncate(MAX_ANTONYMS);
		Self { synonyms, antonyms }
	}

	/// True when neither list holds a word.
	pub fn is_empty(&self) -> bool {
		self.synonyms.is_empty() && self.antonyms.is_empty()
	}

	/// Total number of related words.
	pub fn len(&self) -> usize {
		self.synonyms.len() + self.antonyms.len()
	}

	/// Words of one kind.
	pub fn words(&self, kind: RelationKind) -> &[String] {
		match kind {
			RelationKind::Synonym => &self.synonyms,
			RelationKind::Antonym => &self.antonyms,
		}
	}

	fn push(&mut self, kind: RelationKind, word: String) {
		match kind {
			RelationKind::Synonym => self.synonyms.push(word),
			RelationKind::Antonym => self.antonyms.push(word),
		}
	}
}
