use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::api;
use crate::components::force_graph::{ForceGraphCanvas, window_viewport};
use crate::error::QueryError;
use crate::session::{QueryTicket, Session};

#[derive(Clone, Debug, PartialEq)]
enum Screen {
	Search,
	Loading,
	/// Carries a build counter so each new graph remounts the canvas.
	Graph(u64),
	Failed { message: String, retryable: bool },
}

/// Search page: word input, loading state, error with retry, and the graph.
#[component]
pub fn Home() -> impl IntoView {
	let session = StoredValue::new_local(Session::new(StdRng::from_entropy()));
	let screen = RwSignal::new(Screen::Search);
	let input = RwSignal::new(String::new());
	let built = StoredValue::new(0u64);

	let run_query = move |ticket: QueryTicket| {
		screen.set(Screen::Loading);
		spawn_local(async move {
			let outcome = api::fetch_relations(ticket.word()).await;
			let viewport = window_viewport();
			let Some(result) =
				session.try_update_value(|s| s.complete_query(&ticket, outcome, viewport))
			else {
				return;
			};
			match result {
				Ok(_) => {
					built.update_value(|n| *n += 1);
					screen.set(Screen::Graph(built.get_value()));
				}
				Err(QueryError::StaleResponse) => debug!("ignoring answer for {:?}", ticket.word()),
				Err(err) => {
					warn!("query for {:?} failed: {err}", ticket.word());
					screen.set(Screen::Failed {
						message: err.to_string(),
						retryable: err.is_retryable(),
					});
				}
			}
		});
	};

	let dispatch = move |started: Option<Result<QueryTicket, QueryError>>| match started {
		Some(Ok(ticket)) => run_query(ticket),
		Some(Err(err)) => debug!("query not started: {err}"),
		None => {}
	};

	let submit = move || {
		let word = input.get_untracked();
		dispatch(session.try_update_value(|s| s.start_query(&word)));
	};

	let retry = move |_: MouseEvent| dispatch(session.try_update_value(|s| s.retry()));

	let back = move |_: MouseEvent| {
		session.update_value(|s| s.reset());
		input.set(String::new());
		screen.set(Screen::Search);
	};

	let explore = Callback::new(move |word: String| {
		input.set(word.clone());
		dispatch(session.try_update_value(|s| s.explore(&word)));
	});

	view! {
		<div class="container">
			{move || match screen.get() {
				Screen::Search => view! {
					<form
						class="search-section"
						on:submit=move |ev: SubmitEvent| {
							ev.prevent_default();
							submit();
						}
					>
						<h1 class="title">"LexiPop"</h1>
						<p class="subtitle">"Fai esplodere una parola nei suoi sinonimi e contrari"</p>
						<input
							type="text"
							class="word-input"
							placeholder="Scrivi una parola..."
							autofocus=true
							prop:value=move || input.get()
							on:input=move |ev| input.set(event_target_value(&ev))
						/>
						<button type="submit" class="explode-btn">"Esplodi!"</button>
					</form>
				}
				.into_any(),
				Screen::Loading => view! {
					<div class="loading active">
						<div class="spinner"></div>
						<p>"Cerco sinonimi e contrari..."</p>
					</div>
				}
				.into_any(),
				Screen::Failed { message, retryable } => view! {
					<div class="error-message active">
						<p class="error-text">{message}</p>
						<Show when=move || retryable>
							<button class="retry-btn" on:click=retry>"Riprova"</button>
						</Show>
						<button class="back-btn" on:click=back>"Nuova ricerca"</button>
					</div>
				}
				.into_any(),
				Screen::Graph(_) => {
					let active = session.with_value(|s| s.active().cloned());
					match active {
						Some(active) => view! {
							<div class="graph-section active">
								<div class="graph-header">
									<button class="back-btn" on:click=back>"← Nuova ricerca"</button>
									<h2 class="graph-word">{active.word.clone()}</h2>
									<div class="legend">
										<span class="legend-synonym">"Sinonimi"</span>
										<span class="legend-antonym">"Contrari"</span>
									</div>
								</div>
								<ForceGraphCanvas active=active on_explore=explore />
							</div>
						}
						.into_any(),
						None => view! { <p>"Nessun grafo attivo"</p> }.into_any(),
					}
				}
			}}
		</div>
	}
}
