//! Fetching network documents from the host page's origin.

use std::future::Future;

use js_sys::{Promise, Reflect};
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, XmlHttpRequest};

use crate::error::{VizError, describe_js};

/// Single GET of a text resource. No retries, no timeout.
pub trait Transport {
	fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, VizError>>;
}

/// Ways a browser may let us make a request, tried in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
	FetchApi,
	XmlHttpRequest,
}

impl Provider {
	fn is_available(self) -> bool {
		let global = js_sys::global();
		let name = match self {
			Provider::FetchApi => "fetch",
			Provider::XmlHttpRequest => "XMLHttpRequest",
		};
		Reflect::has(&global, &JsValue::from_str(name)).unwrap_or(false)
	}
}

/// [`Transport`] backed by whatever request API the browser offers.
#[derive(Clone, Debug)]
pub struct BrowserTransport {
	providers: Vec<Provider>,
}

impl Default for BrowserTransport {
	fn default() -> Self {
		Self {
			providers: vec![Provider::FetchApi, Provider::XmlHttpRequest],
		}
	}
}

impl BrowserTransport {
	pub fn new() -> Self {
		Self::default()
	}

	fn provider(&self) -> Result<Provider, VizError> {
		self.providers
			.iter()
			.copied()
			.find(|p| p.is_available())
			.ok_or(VizError::TransportUnavailable)
	}
}

impl Transport for BrowserTransport {
	fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, VizError>> {
		let url = url.to_owned();
		let provider = self.provider();
		async move {
			let provider = provider?;
			debug!("GET {url} via {provider:?}");
			let result = match provider {
				Provider::FetchApi => fetch_api(&url).await,
				Provider::XmlHttpRequest => xml_http_request(&url).await,
			};
			if let Err(err) = &result {
				warn!("GET {url} failed: {err}");
			}
			result
		}
	}
}

fn request_failed(url: &str) -> VizError {
	VizError::FetchFailed {
		url: url.to_owned(),
		status: VizError::NO_STATUS,
	}
}

async fn fetch_api(url: &str) -> Result<String, VizError> {
	let window = web_sys::window().ok_or(VizError::TransportUnavailable)?;
	let init = RequestInit::new();
	init.set_method("GET");
	let request = Request::new_with_str_and_init(url, &init).map_err(|_| request_failed(url))?;

	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|_| request_failed(url))?
		.dyn_into()
		.map_err(|_| request_failed(url))?;
	if !response.ok() {
		return Err(VizError::FetchFailed {
			url: url.to_owned(),
			status: response.status(),
		});
	}

	let text = response.text().map_err(|_| request_failed(url))?;
	JsFuture::from(text)
		.await
		.map_err(|_| request_failed(url))?
		.as_string()
		.ok_or_else(|| request_failed(url))
}

async fn xml_http_request(url: &str) -> Result<String, VizError> {
	let xhr = XmlHttpRequest::new().map_err(|e| {
		warn!("XMLHttpRequest constructor threw: {}", describe_js(&e));
		VizError::TransportUnavailable
	})?;
	xhr.open("GET", url).map_err(|_| request_failed(url))?;

	let done = Promise::new(&mut |resolve, reject| {
		let onload = Closure::once_into_js(move || {
			let _ = resolve.call0(&JsValue::UNDEFINED);
		});
		let onerror = Closure::once_into_js(move || {
			let _ = reject.call0(&JsValue::UNDEFINED);
		});
		xhr.set_onload(Some(onload.unchecked_ref()));
		xhr.set_onerror(Some(onerror.unchecked_ref()));
	});
	xhr.send().map_err(|_| request_failed(url))?;
	JsFuture::from(done).await.map_err(|_| request_failed(url))?;

	let status = xhr.status().map_err(|_| request_failed(url))?;
	if !(200..300).contains(&status) {
		return Err(VizError::FetchFailed {
			url: url.to_owned(),
			status,
		});
	}
	xhr.response_text()
		.ok()
		.flatten()
		.ok_or_else(|| request_failed(url))
}
