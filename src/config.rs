//! Page-level settings, read once from an optional JSON block in the host page.

use log::{debug, warn};
use serde::Deserialize;

use crate::components::overlay::PathwayKey;

/// Id of the `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "pathway-viz-config";

/// Settings shared by every overlay. Missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct VizConfig {
	/// Directory holding the pre-rendered plots.
	pub image_dir: String,
	/// Directory holding the network XML files.
	pub network_dir: String,
	/// Extra backdrop height below the page, in px.
	pub backdrop_margin: u32,
	/// Size of the graph drawing surface, in px.
	pub surface_width: u32,
	pub surface_height: u32,
	/// How long the widget may take to signal readiness after a draw.
	pub ready_timeout_ms: u32,
	/// Where the Flash widget's own files are served from.
	pub widget: WidgetConfig,
	/// Keys offered on the home page.
	pub pathways: Vec<PathwayKey>,
}

/// Resource paths handed to the Cytoscape Web constructor.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
	/// Path of the Cytoscape Web movie, without the `.swf` extension.
	pub swf_path: String,
	/// Movie run when the Flash plugin is missing or too old.
	pub flash_installer_path: String,
}

impl Default for VizConfig {
	fn default() -> Self {
		Self {
			image_dir: "image".into(),
			network_dir: "xml".into(),
			backdrop_margin: 100,
			surface_width: 600,
			surface_height: 500,
			ready_timeout_ms: 15_000,
			widget: WidgetConfig::default(),
			pathways: Vec::new(),
		}
	}
}

impl Default for WidgetConfig {
	fn default() -> Self {
		Self {
			swf_path: "swf/CytoscapeWeb".into(),
			flash_installer_path: "swf/playerProductInstall".into(),
		}
	}
}

impl VizConfig {
	/// Parse overrides; invalid JSON falls back to the defaults.
	pub fn from_json(json: &str) -> Self {
		serde_json::from_str(json).unwrap_or_else(|err| {
			warn!("Ignoring invalid {CONFIG_ELEMENT_ID} block: {err}");
			Self::default()
		})
	}

	/// Read the config block from the current document, if there is one.
	pub fn load() -> Self {
		let text = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.text_content());
		match text {
			Some(json) => Self::from_json(&json),
			None => {
				debug!("No {CONFIG_ELEMENT_ID} element, using defaults");
				Self::default()
			}
		}
	}
}
