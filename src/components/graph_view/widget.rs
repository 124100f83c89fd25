//! Bindings to the Cytoscape Web visualization and the seam the session
//! draws through.

use js_sys::{Function, JSON, Reflect};
use log::debug;
use wasm_bindgen::prelude::*;

use super::style::{DrawRequest, Layout};
use crate::config::WidgetConfig;
use crate::error::{VizError, describe_js};

/// What the session needs from a graph widget.
pub trait GraphWidget {
	fn draw(&self, request: &DrawRequest) -> Result<(), VizError>;
	fn layout(&self, layout: Layout) -> Result<(), VizError>;
}

#[wasm_bindgen(js_namespace = ["org", "cytoscapeweb"])]
extern "C" {
	type Visualization;

	#[wasm_bindgen(constructor, catch)]
	fn new(container_id: &str, options: &JsValue) -> Result<Visualization, JsValue>;

	#[wasm_bindgen(method, catch)]
	fn ready(this: &Visualization, callback: &Function) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(method, catch, js_name = addListener)]
	fn add_listener(
		this: &Visualization,
		event: &str,
		group: &str,
		callback: &Function,
	) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(method, catch, js_name = draw)]
	fn js_draw(this: &Visualization, options: &JsValue) -> Result<JsValue, JsValue>;

	#[wasm_bindgen(method, catch, js_name = layout)]
	fn js_layout(this: &Visualization, name: &str) -> Result<JsValue, JsValue>;
}

/// A Cytoscape Web instance mounted in one container element.
pub struct CytoscapeWidget {
	vis: Visualization,
}

impl CytoscapeWidget {
	/// Create the visualization inside the element with id `container_id`.
	/// Fails when the Cytoscape Web script is not loaded.
	pub fn new(container_id: &str, config: &WidgetConfig) -> Result<Self, VizError> {
		let options = js_sys::Object::new();
		let set = |k: &str, v: &str| Reflect::set(&options, &k.into(), &v.into());
		set("swfPath", &config.swf_path)
			.and_then(|_| set("flashInstallerPath", &config.flash_installer_path))
			.map_err(|e| VizError::WidgetUnavailable(describe_js(&e)))?;

		let vis = Visualization::new(container_id, &options)
			.map_err(|e| VizError::WidgetUnavailable(describe_js(&e)))?;
		debug!("Cytoscape Web created in #{container_id}");
		Ok(Self { vis })
	}

	/// Run `f` every time the widget reports it finished drawing.
	pub fn on_ready(&self, f: impl FnMut() + 'static) -> Result<(), VizError> {
		let cb = Closure::<dyn FnMut()>::new(f).into_js_value();
		self.vis
			.ready(cb.unchecked_ref())
			.map(|_| ())
			.map_err(|e| VizError::widget_call("ready", &e))
	}

	/// Run `f` with the label of each clicked node. Nodes without a label
	/// are reported as `None`.
	pub fn on_node_click(&self, mut f: impl FnMut(Option<String>) + 'static) -> Result<(), VizError> {
		let cb = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
			f(node_label(&event));
		})
		.into_js_value();
		self.vis
			.add_listener("click", "nodes", cb.unchecked_ref())
			.map(|_| ())
			.map_err(|e| VizError::widget_call("addListener", &e))
	}
}

/// `event.target.data.label`
fn node_label(event: &JsValue) -> Option<String> {
	["target", "data", "label"]
		.into_iter()
		.try_fold(event.clone(), |obj, field| {
			Reflect::get(&obj, &JsValue::from_str(field))
				.ok()
				.filter(|v| !v.is_undefined() && !v.is_null())
		})?
		.as_string()
}

impl GraphWidget for CytoscapeWidget {
	fn draw(&self, request: &DrawRequest) -> Result<(), VizError> {
		let json = serde_json::to_string(request).map_err(|e| VizError::WidgetCall {
			call: "draw",
			message: e.to_string(),
		})?;
		let options = JSON::parse(&json).map_err(|e| VizError::widget_call("draw", &e))?;
		self.vis
			.js_draw(&options)
			.map(|_| ())
			.map_err(|e| VizError::widget_call("draw", &e))
	}

	fn layout(&self, layout: Layout) -> Result<(), VizError> {
		debug!("Switching layout to {layout}");
		self.vis
			.js_layout(layout.name())
			.map(|_| ())
			.map_err(|e| VizError::widget_call("layout", &e))
	}
}
