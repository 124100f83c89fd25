use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, warn};
use wasm_bindgen::prelude::*;

use super::state::{GraphSession, GraphStatus};
use super::style::Layout;
use super::widget::CytoscapeWidget;
use crate::components::info_panel::NodeInfo;
use crate::components::overlay::{CancelToken, OverlayHandle};
use crate::config::VizConfig;
use crate::error::VizError;
use crate::transport::BrowserTransport;

type BrowserSession = GraphSession<BrowserTransport, CytoscapeWidget>;

/// Drawing surface of the graph overlay: mounts the widget, fetches the
/// network and draws it, then offers the layout selector.
#[component]
pub fn GraphSurface(handle: OverlayHandle, selected: RwSignal<Option<NodeInfo>>) -> impl IntoView {
	let config = expect_context::<VizConfig>();
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let container_id = handle.element_id("cytoscapeweb");
	let status = RwSignal::new(GraphStatus::Loading);
	let session = StoredValue::new_local(None::<Rc<BrowserSession>>);
	let size = format!(
		"width: {}px; height: {}px;",
		config.surface_width, config.surface_height
	);

	let effect_id = container_id.clone();
	Effect::new(move |_| {
		if container_ref.get().is_none() || session.with_value(Option::is_some) {
			return;
		}
		let cancel = handle.cancel_token();
		let started = mount_widget(&effect_id, &config, &handle, status, selected).map(Rc::new);
		match started {
			Ok(s) => {
				session.set_value(Some(s.clone()));
				spawn_local(draw(s, status, config.ready_timeout_ms, cancel));
			}
			Err(err) => {
				error!("Cannot start graph view for {}: {err}", handle.key());
				status.update(|s| s.on_error(&err));
			}
		}
	});

	let on_select = move |layout: Layout| {
		session.with_value(|s| {
			let Some(s) = s else {
				return;
			};
			if let Err(err) = s.select_layout(layout) {
				status.try_update(|s| s.on_error(&err));
			}
		});
	};

	view! {
		<div class="graph-surface">
			<div id=container_id node_ref=container_ref style=size></div>
			{move || match status.get() {
				GraphStatus::Loading => {
					Some(view! { <p class="graph-status">"Loading network..."</p> }.into_any())
				}
				GraphStatus::Failed(msg) => {
					Some(view! { <p class="graph-status error">{msg}</p> }.into_any())
				}
				GraphStatus::Drawing | GraphStatus::Ready => None,
			}}
			<Show when=move || status.get() == GraphStatus::Ready>
				<LayoutSelect on_select=on_select />
			</Show>
		</div>
	}
}

fn mount_widget(
	container_id: &str,
	config: &VizConfig,
	handle: &OverlayHandle,
	status: RwSignal<GraphStatus>,
	selected: RwSignal<Option<NodeInfo>>,
) -> Result<BrowserSession, VizError> {
	let widget = CytoscapeWidget::new(container_id, &config.widget)?;

	let cancel = handle.cancel_token();
	widget.on_ready(move || {
		debug!("Graph widget ready");
		status.try_update(|s| s.on_ready(cancel.is_cancelled()));
	})?;

	let cancel = handle.cancel_token();
	widget.on_node_click(move |label| {
		if !cancel.is_cancelled() {
			selected.set(label.map(|l| NodeInfo::from_label(&l)));
		}
	})?;

	Ok(GraphSession::new(
		handle.key().clone(),
		&config.network_dir,
		BrowserTransport::new(),
		widget,
		handle.cancel_token(),
	))
}

async fn draw(session: Rc<BrowserSession>, status: RwSignal<GraphStatus>, timeout_ms: u32, cancel: CancelToken) {
	match session.run().await {
		Ok(_) => {
			status.try_update(GraphStatus::on_drawn);
			arm_ready_timeout(status, timeout_ms, cancel);
		}
		Err(VizError::Cancelled) => debug!("Dropping network for closed overlay {}", session.key()),
		Err(err) => {
			error!("Graph view for {} failed: {err}", session.key());
			status.try_update(|s| s.on_error(&err));
		}
	}
}

fn arm_ready_timeout(status: RwSignal<GraphStatus>, timeout_ms: u32, cancel: CancelToken) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let on_timeout = Closure::once_into_js(move || {
		let failed = status.try_update(|s| s.on_timeout(cancel.is_cancelled(), timeout_ms));
		if failed == Some(true) {
			warn!("{}", VizError::RenderTimeout { timeout_ms });
		}
	});
	let delay = i32::try_from(timeout_ms).unwrap_or(i32::MAX);
	if window
		.set_timeout_with_callback_and_timeout_and_arguments_0(on_timeout.unchecked_ref(), delay)
		.is_err()
	{
		warn!("Could not arm the render timeout");
	}
}

/// Layout picker shown once the widget has drawn.
#[component]
pub fn LayoutSelect<F>(on_select: F) -> impl IntoView
where
	F: Fn(Layout) + Send + Sync + 'static,
{
	let on_change = move |ev: web_sys::Event| match event_target_value(&ev).parse::<Layout>() {
		Ok(layout) => on_select(layout),
		Err(err) => warn!("{err}"),
	};

	view! {
		<select class="layout-select" on:change=on_change>
			{Layout::ALL
				.into_iter()
				.map(|layout| {
					let initial = layout == Layout::default();
					view! {
						<option value=layout.name() selected=initial>
							{layout.name()}
						</option>
					}
				})
				.collect_view()}
		</select>
	}
}
