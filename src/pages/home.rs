use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::components::force_graph::ForceGraphCanvas;
use crate::graph::{Graph, build_with_stats};
use crate::source::HttpDataSource;

/// Served next to the app bundle.
const DATASET_URL: &str = "/data/credits.json";

/// Fetches the dataset, builds the graph and hands it to the canvas.
/// A failed load keeps whatever graph is already on screen.
#[component]
pub fn Home() -> impl IntoView {
	let source = HttpDataSource::new(DATASET_URL);
	let (graph, set_graph) = signal(None::<Graph>);
	let (error, set_error) = signal(None::<String>);
	let (loading, set_loading) = signal(false);

	let reload = move || {
		let source = source.clone();
		set_loading.set(true);
		spawn_local(async move {
			match source.fetch().await {
				Ok(dataset) => {
					let (built, stats) = build_with_stats(&dataset);
					info!(
						"graph ready: {} nodes, {} links from {} works",
						built.nodes.len(),
						built.links.len(),
						stats.works
					);
					set_graph.set(Some(built));
					set_error.set(None);
				}
				Err(err) => {
					warn!("dataset load failed: {err}");
					set_error.set(Some(err.to_string()));
				}
			}
			set_loading.set(false);
		});
	};
	reload();

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas graph=graph fullscreen=true />
			<div class="graph-overlay">
				<h1>"Credits Graph"</h1>
				<p class="subtitle">
					"Drag people and works to reposition. Scroll to zoom. Drag background to pan."
				</p>
				<button on:click=move |_| reload() disabled=move || loading.get()>
					{move || if loading.get() { "Loading…" } else { "Reload" }}
				</button>
				{move || error.get().map(|e| view! { <p class="error">{e}</p> })}
			</div>
		</div>
	}
}
