//! LexiPop: type a word, watch it burst into a force-directed graph of its
//! synonyms and antonyms.
//!
//! The core is browser-independent: [`relations`] pulls related words out of
//! the dictionary page markup, [`graph`] turns them into a star graph, and
//! [`layout`] positions that graph with a stepped physics simulation.
//! [`session`] ties one query at a time to one live simulation. The Leptos
//! client wiring and routes live alongside.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Only needed to turn on the `js` randomness backend for wasm.
use getrandom as _;

pub mod api;
pub mod error;
pub mod graph;
pub mod layout;
pub mod relations;
pub mod search;
pub mod session;

// Modules
mod components;
mod pages;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the search page and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="it" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="LexiPop - Sinonimi e Contrari" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
