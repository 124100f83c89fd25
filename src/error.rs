//! Error type shared by the transport, the widget bindings and the overlays.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong between opening an overlay and seeing a graph.
///
/// The `Display` text is shown inline inside the overlay, so it is written
/// for the person looking at the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VizError {
	/// Neither `fetch` nor `XMLHttpRequest` exists in the host environment.
	#[error("this browser offers no way to request network data")]
	TransportUnavailable,

	/// The request completed with a non-success status, or never completed.
	#[error("could not load {url} (status {status})")]
	FetchFailed { url: String, status: u16 },

	/// The fetched body is not a well-formed network document.
	#[error("network data is malformed: {0}")]
	MalformedNetwork(String),

	/// The widget did not signal readiness within the configured time.
	#[error("the graph viewer did not start within {timeout_ms} ms; is the Flash plugin enabled?")]
	RenderTimeout { timeout_ms: u32 },

	/// The widget constructor is missing or threw.
	#[error("the graph viewer could not be created: {0}")]
	WidgetUnavailable(String),

	/// A widget method threw.
	#[error("the graph viewer rejected `{call}`: {message}")]
	WidgetCall { call: &'static str, message: String },

	/// A pathway key with an empty component.
	#[error("invalid pathway key: {0}")]
	InvalidKey(String),

	/// The owning overlay was torn down while the work was pending.
	#[error("cancelled")]
	Cancelled,
}

impl VizError {
	/// Status used for `FetchFailed` when the request errored before any
	/// response arrived.
	pub const NO_STATUS: u16 = 0;

	/// Build a `WidgetCall` error from a thrown JS value.
	pub fn widget_call(call: &'static str, thrown: &JsValue) -> Self {
		Self::WidgetCall {
			call,
			message: describe_js(thrown),
		}
	}
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe_js(value: &JsValue) -> String {
	if let Some(s) = value.as_string() {
		return s;
	}
	js_sys::Reflect::get(value, &JsValue::from_str("message"))
		.ok()
		.and_then(|m| m.as_string())
		.unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fetch_failed_names_url_and_status() {
		let err = VizError::FetchFailed {
			url: "xml/glycolysis-degree.xml".into(),
			status: 404,
		};
		assert_eq!(
			err.to_string(),
			"could not load xml/glycolysis-degree.xml (status 404)"
		);
	}

	#[test]
	fn render_timeout_mentions_plugin() {
		let msg = VizError::RenderTimeout { timeout_ms: 500 }.to_string();
		assert!(msg.contains("500 ms"));
		assert!(msg.contains("Flash"));
	}
}
