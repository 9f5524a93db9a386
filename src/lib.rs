//! Leptos client-side app: a chat panel wired to its function nodes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

// Modules
pub mod components;
mod pages;

// Top-Level pages
use crate::components::rope_wiring::WiringConfig;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Id of the optional `<script type="application/json">` holding the layout.
pub const CONFIG_ELEMENT_ID: &str = "wiring-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Reads the wiring layout embedded in the page, falling back to the
/// built-in layout when it is absent or invalid.
pub fn load_wiring_config() -> WiringConfig {
	let text = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
		.and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
		.and_then(|script| script.text().ok());

	let Some(text) = text else {
		info!("rope-wiring: no #{CONFIG_ELEMENT_ID} element, using the built-in layout");
		return WiringConfig::default();
	};
	match WiringConfig::from_json(&text) {
		Ok(config) => {
			info!(
				"rope-wiring: loaded {} nodes and {} groups",
				config.nodes.len(),
				config.groups.len()
			);
			config
		}
		Err(err) => {
			warn!("rope-wiring: invalid #{CONFIG_ELEMENT_ID}: {err}; using the built-in layout");
			WiringConfig::default()
		}
	}
}

/// An app router which renders the chat page and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Rope Wiring Chat" />

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
