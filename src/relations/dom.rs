use log::warn;
use web_sys::{DomParser, Element, HtmlCollection, SupportedType};

use super::extract::DocumentNode;

fn collect(list: HtmlCollection) -> Vec<Element> {
	(0..list.length()).filter_map(|i| list.item(i)).collect()
}

impl DocumentNode for Element {
	fn tag(&self) -> String {
		self.tag_name().to_lowercase()
	}

	fn has_class(&self, class: &str) -> bool {
		self.class_name().split_whitespace().any(|c| c == class)
	}

	fn text(&self) -> String {
		self.text_content().unwrap_or_default()
	}

	fn children(&self) -> Vec<Self> {
		collect(Element::children(self))
	}

	fn descendants(&self, tag: &str) -> Vec<Self> {
		collect(self.get_elements_by_tag_name(tag))
	}

	fn find_by_class(&self, class: &str) -> Option<Self> {
		if DocumentNode::has_class(self, class) {
			return Some(self.clone());
		}
		self.query_selector(&format!(".{class}")).ok().flatten()
	}
}

/// Parses raw page markup with the browser's DOM parser.
///
/// Returns the document element, or `None` when parsing is unavailable.
pub fn parse_document(markup: &str) -> Option<Element> {
	let parser = match DomParser::new() {
		Ok(parser) => parser,
		Err(err) => {
			warn!("DOMParser unavailable: {:?}", err);
			return None;
		}
	};
	match parser.parse_from_string(markup, SupportedType::TextHtml) {
		Ok(document) => document.document_element(),
		Err(err) => {
			warn!("failed to parse markup: {:?}", err);
			None
		}
	}
}
