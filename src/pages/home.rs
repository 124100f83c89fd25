use leptos::prelude::*;

use crate::components::overlay::{DisplayMode, Overlays, PathwayKey};
use crate::config::VizConfig;

/// Default Home Page: the configured pathway results, plus a form for
/// opening any other key.
#[component]
pub fn Home() -> impl IntoView {
	let config = expect_context::<VizConfig>();
	let overlays = expect_context::<Overlays>();

	let rows = config
		.pathways
		.into_iter()
		.map(|key| {
			let (image_key, graph_key) = (key.clone(), key.clone());
			view! {
				<tr>
					<td>{key.pathway().to_string()}</td>
					<td>{key.centrality().to_string()}</td>
					<td>
						<button on:click=move |_| overlays.show_image_view(image_key.clone())>
							"show image view"
						</button>
						<button on:click=move |_| overlays.show_graph_view(graph_key.clone())>
							"show graph view"
						</button>
					</td>
				</tr>
			}
		})
		.collect_view();

	view! {
		<h1>"Pathway centrality results"</h1>
		<table class="pathway-list">
			<tr>
				<th>"Pathway"</th>
				<th>"Centrality"</th>
				<th></th>
			</tr>
			{rows}
		</table>
		<KeyForm />
	}
}

#[component]
fn KeyForm() -> impl IntoView {
	let overlays = expect_context::<Overlays>();
	let pathway = RwSignal::new(String::new());
	let centrality = RwSignal::new(String::from("degree"));
	let error = RwSignal::new(None::<String>);

	let open = move |mode: DisplayMode| {
		match PathwayKey::new(pathway.get_untracked(), centrality.get_untracked()) {
			Ok(key) => {
				error.set(None);
				overlays.show(mode, key);
			}
			Err(err) => error.set(Some(err.to_string())),
		}
	};

	view! {
		<div class="key-form">
			<input
				type="text"
				placeholder="pathway"
				prop:value=move || pathway.get()
				on:input=move |ev| pathway.set(event_target_value(&ev))
			/>
			<input
				type="text"
				placeholder="centrality"
				prop:value=move || centrality.get()
				on:input=move |ev| centrality.set(event_target_value(&ev))
			/>
			<button on:click=move |_| open(DisplayMode::Image)>"show image view"</button>
			<button on:click=move |_| open(DisplayMode::Graph)>"show graph view"</button>
			{move || error.get().map(|msg| view! { <p class="error">{msg}</p> })}
		</div>
	}
}
