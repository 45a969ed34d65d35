//! Leptos client-side app: logging setup and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Route browser logs to the console and panics to `console.error`.
///
/// Debug builds log at `Debug`, so drag transitions and dropped credits show
/// up; release builds keep to `Info`.
pub fn init_logging() {
	let level = if cfg!(debug_assertions) {
		Level::Debug
	} else {
		Level::Info
	};
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("{} {} logging at {level}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}

/// The graph page at `/`; anything else is a 404.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		<Title text="Credits Graph" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Meta name="description" content="Works and the people credited on them, as a force-directed graph" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
