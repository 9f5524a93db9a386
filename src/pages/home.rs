use leptos::ev::KeyboardEvent;
use leptos::html::Div;
use leptos::prelude::*;

use crate::components::rope_wiring::RopeWiring;
use crate::load_wiring_config;

/// Chat panel surrounded by its wired function nodes.
#[component]
pub fn Home() -> impl IntoView {
	let config = load_wiring_config();
	let lookup = StoredValue::new(config.clone());
	let container = NodeRef::<Div>::new();
	let draft = RwSignal::new(String::new());
	let transcript = RwSignal::new(Vec::<String>::new());
	let activate = RwSignal::new(None::<String>);

	// Clicking a function node fills the input rather than sending.
	let on_prompt = Callback::new(move |prompt: String| draft.set(prompt));

	let send = move || {
		let text = draft.get_untracked().trim().to_owned();
		if text.is_empty() {
			return;
		}
		if let Some(node) = lookup.with_value(|c| c.node_for_prompt(&text).map(str::to_owned)) {
			activate.set(Some(node));
		}
		transcript.update(|t| t.push(text));
		draft.set(String::new());
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" && !ev.shift_key() {
			ev.prevent_default();
			send();
		}
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<RopeWiring config=config container=container activate=activate on_prompt=on_prompt />
			<div
				class="chat-panel"
				node_ref=container
				style="position: relative; z-index: 2; width: min(480px, 90vw); margin: 80px auto;"
			>
				<h1>"Chat"</h1>
				<p class="subtitle">"Click a node to use its prompt. Drag nodes to rearrange them."</p>
				<ul class="transcript">
					{move || {
						transcript
							.get()
							.into_iter()
							.map(|line| view! { <li class="message user">{line}</li> })
							.collect_view()
					}}
				</ul>
				<div class="composer">
					<textarea
						rows="2"
						placeholder="Ask something..."
						prop:value=move || draft.get()
						on:input=move |ev| draft.set(event_target_value(&ev))
						on:keydown=on_keydown
					/>
					<button type="button" on:click=move |_| send()>
						"Send"
					</button>
				</div>
			</div>
		</ErrorBoundary>
	}
}
