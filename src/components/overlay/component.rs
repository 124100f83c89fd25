use leptos::prelude::*;

use super::state::{OverlayHandle, OverlayManager};
use super::types::{DisplayMode, ImagePlot, PathwayKey};
use crate::components::graph_view::GraphSurface;
use crate::components::info_panel::{InfoPanel, NodeInfo};
use crate::config::VizConfig;

/// Flash Player settings manager page where the plugin's local access is allowed.
const FLASH_SETTINGS_URL: &str =
	"http://www.macromedia.com/support/documentation/en/flashplayer/help/settings_manager04.html";
const BROWSER_HINT: &str = "We suggest you visualize it in modern browsers such as Firefox or Chrome.";

/// The page's overlays, shared through context. Copy it into handlers freely.
#[derive(Clone, Copy)]
pub struct Overlays {
	manager: RwSignal<OverlayManager>,
}

impl Default for Overlays {
	fn default() -> Self {
		Self::new()
	}
}

impl Overlays {
	pub fn new() -> Self {
		Self {
			manager: RwSignal::new(OverlayManager::new()),
		}
	}

	pub fn show(&self, mode: DisplayMode, key: PathwayKey) {
		self.manager.update(|m| {
			m.open(mode, key);
		});
	}

	/// Open the static plots for `key`.
	pub fn show_image_view(&self, key: PathwayKey) {
		self.show(DisplayMode::Image, key);
	}

	/// Open the interactive graph for `key`.
	pub fn show_graph_view(&self, key: PathwayKey) {
		self.show(DisplayMode::Graph, key);
	}

	pub fn close(&self, handle: &OverlayHandle) {
		self.manager.update(|m| {
			m.close(handle);
		});
	}

	pub fn switch(&self, handle: &OverlayHandle) {
		self.manager.update(|m| {
			m.switch(handle);
		});
	}

	/// The live overlay of `mode`. Only changes when that slot is replaced.
	pub fn live(&self, mode: DisplayMode) -> Memo<Option<OverlayHandle>> {
		let manager = self.manager;
		Memo::new(move |_| manager.with(|m| m.live(mode).cloned()))
	}
}

/// Renders whichever overlays are currently live.
#[component]
pub fn OverlayHost() -> impl IntoView {
	let overlays = expect_context::<Overlays>();
	let (image, graph) = (
		overlays.live(DisplayMode::Image),
		overlays.live(DisplayMode::Graph),
	);

	view! {
		{move || image.get().map(|handle| view! { <ImageOverlay handle=handle /> })}
		{move || graph.get().map(|handle| view! { <GraphOverlay handle=handle /> })}
	}
}

/// Backdrop height that covers the whole scrollable page.
pub fn backdrop_height(page_height: i32, margin: u32) -> u32 {
	u32::try_from(page_height).unwrap_or(0) + margin
}

fn page_height() -> i32 {
	web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
		.map(|el| el.scroll_height())
		.unwrap_or(0)
}

#[component]
fn OverlayFrame(handle: OverlayHandle, children: Children) -> impl IntoView {
	let overlays = expect_context::<Overlays>();
	let config = expect_context::<VizConfig>();
	let mode = handle.mode();
	let height = backdrop_height(page_height(), config.backdrop_margin);
	if let Some(window) = web_sys::window() {
		window.scroll_to_with_x_and_y(0.0, 0.0);
	}
	let title = handle.key().to_string();
	let close_handle = handle.clone();

	view! {
		<div id=mode.backdrop_id() class="overlay-backdrop" style=format!("height: {height}px;")></div>
		<div id=mode.content_id() class="overlay-content">
			<div class="overlay-controls">
				<ModeSwitch handle=handle />
				<button class="overlay-close" on:click=move |_| overlays.close(&close_handle)>
					"close"
				</button>
			</div>
			<h2>{title}</h2>
			{children()}
		</div>
	}
}

/// Closes its overlay and opens the other mode for the same key.
#[component]
pub fn ModeSwitch(handle: OverlayHandle) -> impl IntoView {
	let overlays = expect_context::<Overlays>();
	let label = handle.mode().switch_label();

	view! {
		<button class="mode-switch" on:click=move |_| overlays.switch(&handle)>
			{label}
		</button>
	}
}

#[component]
pub fn ImageOverlay(handle: OverlayHandle) -> impl IntoView {
	let config = expect_context::<VizConfig>();
	let key = handle.key().clone();

	view! {
		<OverlayFrame handle=handle>
			<div class="image-plots">
				{ImagePlot::ALL
					.into_iter()
					.map(|plot| {
						let src = key.image_url(&config.image_dir, plot);
						let caption = plot.caption(&key);
						view! {
							<figure>
								<img src=src alt=caption.clone() />
								<figcaption>
									<b>"Figure " {plot.number()}</b>
									". "
									{caption}
								</figcaption>
							</figure>
						}
					})
					.collect_view()}
			</div>
		</OverlayFrame>
	}
}

#[component]
pub fn GraphOverlay(handle: OverlayHandle) -> impl IntoView {
	let selected = RwSignal::new(None::<NodeInfo>);
	let surface_handle = handle.clone();

	view! {
		<OverlayFrame handle=handle>
			<div class="graph-columns">
				<GraphSurface handle=surface_handle selected=selected />
				<InfoPanel info=selected />
			</div>
			<p class="plugin-help">
				"Cannot see the network? You need to set the "
				<a href=FLASH_SETTINGS_URL>"security settings"</a>
				" of Adobe Flash Player."
				<br />
				{BROWSER_HINT}
			</p>
		</OverlayFrame>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn backdrop_covers_page_plus_margin() {
		assert_eq!(backdrop_height(1800, 100), 1900);
		assert_eq!(backdrop_height(-5, 100), 100);
	}

	#[test]
	fn plugin_help_points_at_flash_settings() {
		assert!(FLASH_SETTINGS_URL.ends_with("flashplayer/help/settings_manager04.html"));
		assert!(BROWSER_HINT.contains("Firefox or Chrome"));
	}
}
