//! Browser client for the search endpoint.

use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::QueryError;
use crate::search::{SEARCH_PATH, SearchResponse};

fn js_message(value: &JsValue) -> String {
	value
		.dyn_ref::<js_sys::Error>()
		.map(|e| String::from(e.message()))
		.or_else(|| value.as_string())
		.unwrap_or_else(|| format!("{value:?}"))
}

fn unavailable(value: JsValue) -> QueryError {
	let message = js_message(&value);
	warn!("search request failed: {message}");
	QueryError::SourceUnavailable { message }
}

/// Fetches `/api/search/{word}` and decodes the body.
///
/// Failure bodies still decode; classifying them is left to
/// [`SearchResponse::into_relations`].
pub async fn fetch_relations(word: &str) -> Result<SearchResponse, QueryError> {
	let window = web_sys::window().ok_or_else(|| QueryError::SourceUnavailable {
		message: "no window".into(),
	})?;
	let url = format!(
		"{SEARCH_PATH}{}",
		String::from(js_sys::encode_uri_component(word))
	);
	debug!("GET {url}");

	let response: Response = JsFuture::from(window.fetch_with_str(&url))
		.await
		.map_err(unavailable)?
		.dyn_into()
		.map_err(unavailable)?;
	let status = response.status();
	let text = JsFuture::from(response.text().map_err(unavailable)?)
		.await
		.map_err(unavailable)?
		.as_string()
		.unwrap_or_default();

	serde_json::from_str(&text).map_err(|err| {
		warn!("undecodable search body (HTTP {status}): {err}");
		QueryError::SourceUnavailable {
			message: if response.ok() {
				err.to_string()
			} else {
				format!("HTTP {status}")
			},
		}
	})
}
