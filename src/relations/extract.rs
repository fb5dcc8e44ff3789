use log::debug;

use super::{RelationKind, Relations};

/// Class of the element wrapping the synonym/antonym description.
pub const CONTAINER_CLASS: &str = "sct-descr";
/// Class of the section headers inside the container.
pub const HEADER_CLASS: &str = "sct-macrotipo";

const SYNONYMS_MARKER: &str = "sinonimi";
const ANTONYMS_MARKER: &str = "contrari";
const WORD_LIST_TAG: &str = "p";
const LINK_TAG: &str = "a";
// Matched case-sensitively against the trimmed link text.
const NOISE: &[&str] = &["Leggi", ">>"];

/// Read-only view of a parsed markup element.
///
/// Only the handful of queries the extractor needs are required; the tree
/// walks have depth-first, document-order defaults that adapters may
/// override with native lookups.
pub trait DocumentNode: Clone {
	/// Lowercase tag name.
	fn tag(&self) -> String;
	/// Whether the element carries `class` in its class list.
	fn has_class(&self, class: &str) -> bool;
	/// Concatenated text of the element and its descendants.
	fn text(&self) -> String;
	/// Direct element children in document order.
	fn children(&self) -> Vec<Self>;

	/// Every descendant with the given tag, in document order.
	fn descendants(&self, tag: &str) -> Vec<Self> {
		let mut out = Vec::new();
		for child in self.children() {
			let nested = child.descendants(tag);
			if child.tag() == tag {
				out.push(child);
			}
			out.extend(nested);
		}
		out
	}

	/// First element (self included) carrying `class`, in document order.
	fn find_by_class(&self, class: &str) -> Option<Self> {
		if self.has_class(class) {
			return Some(self.clone());
		}
		self.children()
			.iter()
			.find_map(|child| child.find_by_class(class))
	}
}

/// Finds the description container under `root`.
pub fn locate_container<N: DocumentNode>(root: &N) -> Option<N> {
	root.find_by_class(CONTAINER_CLASS)
}

/// Walks the container's children and collects related words per section.
///
/// A missing container yields empty lists. Headers that name neither
/// section leave the current section untouched.
pub fn extract_relations<N: DocumentNode>(container: Option<&N>) -> Relations {
	let Some(container) = container else {
		debug!("no description container, nothing to extract");
		return Relations::default();
	};

	let mut relations = Relations::default();
	let mut section: Option<RelationKind> = None;

	for child in container.children() {
		if child.has_class(HEADER_CLASS) {
			section = classify_header(&child.text()).or(section);
		} else if child.tag() == WORD_LIST_TAG {
			let Some(kind) = section else {
				continue;
			};
			for link in child.descendants(LINK_TAG) {
				let text = link.text();
				let word = text.trim();
				if is_word(word) {
					relations.push(kind, word.to_string());
				}
			}
		}
	}

	let relations = Relations::new(relations.synonyms, relations.antonyms);
	debug!(
		"extracted {} synonyms, {} antonyms",
		relations.synonyms.len(),
		relations.antonyms.len()
	);
	relations
}

fn classify_header(text: &str) -> Option<RelationKind> {
	let text = text.trim().to_lowercase();
	if text.contains(SYNONYMS_MARKER) {
		Some(RelationKind::Synonym)
	} else if text.contains(ANTONYMS_MARKER) {
		Some(RelationKind::Antonym)
	} else {
		None
	}
}

// Length is in Unicode scalar values, so a lone emoji or accented letter
// counts as one character and is dropped.
fn is_word(text: &str) -> bool {
	text.chars().count() > 1 && !NOISE.iter().any(|noise| text.contains(noise))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Clone, Debug)]
	struct El {
		tag: &'static str,
		classes: Vec<&'static str>,
		text: String,
		children: Vec<El>,
	}

	fn el(tag: &'static str, classes: &[&'static str], children: Vec<El>) -> El {
		El {
			tag,
			classes: classes.to_vec(),
			text: String::new(),
			children,
		}
	}

	fn text(tag: &'static str, classes: &[&'static str], text: &str) -> El {
		El {
			tag,
			classes: classes.to_vec(),
			text: text.to_string(),
			children: Vec::new(),
		}
	}

	fn header(title: &str) -> El {
		text("h3", &[HEADER_CLASS], title)
	}

	fn para(words: &[&str]) -> El {
		el("p", &[], words.iter().map(|w| text("a", &[], w)).collect())
	}

	fn container(children: Vec<El>) -> El {
		el("div", &[CONTAINER_CLASS], children)
	}

	impl DocumentNode for El {
		fn tag(&self) -> String {
			self.tag.to_string()
		}

		fn has_class(&self, class: &str) -> bool {
			self.classes.contains(&class)
		}

		fn text(&self) -> String {
			let mut out = self.text.clone();
			for child in &self.children {
				out.push_str(&child.text());
			}
			out
		}

		fn children(&self) -> Vec<Self> {
			self.children.clone()
		}
	}

	#[test]
	fn collects_words_per_section_in_document_order() {
		let doc = container(vec![
			header("Sinonimi"),
			para(&["contento", "allegro"]),
			header("Contrari"),
			para(&["triste"]),
		]);
		let rel = extract_relations(Some(&doc));
		assert_eq!(rel.synonyms, vec!["contento", "allegro"]);
		assert_eq!(rel.antonyms, vec!["triste"]);
	}

	#[test]
	fn missing_container_is_empty() {
		let rel = extract_relations::<El>(None);
		assert!(rel.is_empty());
	}

	#[test]
	fn container_without_sections_is_empty() {
		let doc = container(vec![para(&["contento"]), text("span", &[], "ciao")]);
		assert!(extract_relations(Some(&doc)).is_empty());
	}

	#[test]
	fn paragraph_before_any_header_contributes_nothing() {
		let doc = container(vec![
			para(&["orfano"]),
			header("SINONIMI di felice"),
			para(&["lieto"]),
		]);
		let rel = extract_relations(Some(&doc));
		assert_eq!(rel.synonyms, vec!["lieto"]);
		assert!(rel.antonyms.is_empty());
	}

	#[test]
	fn unrecognized_header_keeps_active_section() {
		let doc = container(vec![
			header("Sinonimi"),
			para(&["lieto"]),
			header("Pubblicità"),
			para(&["gioioso"]),
		]);
		let rel = extract_relations(Some(&doc));
		assert_eq!(rel.synonyms, vec!["lieto", "gioioso"]);
	}

	#[test]
	fn filters_noise_short_and_blank_links() {
		let doc = container(vec![
			header("Sinonimi"),
			para(&["Leggi tutto >>", "Bello", " ", "", "a", "altro >>", "  ok  "]),
		]);
		let rel = extract_relations(Some(&doc));
		assert_eq!(rel.synonyms, vec!["Bello", "ok"]);
	}

	#[test]
	fn noise_match_is_case_sensitive() {
		let doc = container(vec![header("Sinonimi"), para(&["leggiadro"])]);
		let rel = extract_relations(Some(&doc));
		assert_eq!(rel.synonyms, vec!["leggiadro"]);
	}

	#[test]
	fn nested_links_are_found() {
		let nested = el(
			"p",
			&[],
			vec![el("span", &[], vec![text("a", &[], "gaio")]), text("a", &[], "lieto")],
		);
		let doc = container(vec![header("Sinonimi"), nested]);
		let rel = extract_relations(Some(&doc));
		assert_eq!(rel.synonyms, vec!["gaio", "lieto"]);
	}

	#[test]
	fn caps_keep_first_words() {
		let syn: Vec<String> = (0..30).map(|i| format!("syn{i}")).collect();
		let ant: Vec<String> = (0..30).map(|i| format!("ant{i}")).collect();
		let syn_refs: Vec<&str> = syn.iter().map(String::as_str).collect();
		let ant_refs: Vec<&str> = ant.iter().map(String::as_str).collect();
		let doc = container(vec![
			header("Sinonimi"),
			para(&syn_refs),
			header("Contrari"),
			para(&ant_refs),
		]);
		let rel = extract_relations(Some(&doc));
		assert_eq!(rel.synonyms.len(), 20);
		assert_eq!(rel.antonyms.len(), 15);
		assert_eq!(rel.synonyms.first().map(String::as_str), Some("syn0"));
		assert_eq!(rel.synonyms.last().map(String::as_str), Some("syn19"));
		assert_eq!(rel.antonyms.last().map(String::as_str), Some("ant14"));
	}

	#[test]
	fn header_naming_both_markers_picks_synonyms() {
		let doc = container(vec![header("Sinonimi e contrari"), para(&["lieto"])]);
		assert_eq!(extract_relations(Some(&doc)).synonyms, vec!["lieto"]);
	}

	#[test]
	fn locates_nested_container() {
		let root = el(
			"body",
			&[],
			vec![el(
				"main",
				&[],
				vec![container(vec![header("Contrari"), para(&["triste"])])],
			)],
		);
		let found = locate_container(&root);
		assert!(found.is_some());
		let rel = extract_relations(found.as_ref());
		assert_eq!(rel.antonyms, vec!["triste"]);
	}

	#[test]
	fn locate_container_absent() {
		let root = el("body", &[], vec![para(&["x"])]);
		assert!(locate_container(&root).is_none());
	}

	#[test]
	fn single_character_means_one_scalar_value() {
		assert!(!is_word("è"));
		assert!(!is_word("😀"));
		assert!(is_word("sì"));
		assert!(is_word("😀😀"));
	}
}
