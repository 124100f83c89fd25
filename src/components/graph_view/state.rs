use log::{debug, info};

use super::style::{DrawRequest, Layout, VisualStyle};
use super::types::NetworkPayload;
use super::widget::GraphWidget;
use crate::components::overlay::{CancelToken, PathwayKey};
use crate::error::VizError;
use crate::transport::Transport;

/// What the drawing surface shows.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphStatus {
	Loading,
	/// Handed to the widget, waiting for its ready signal.
	Drawing,
	Ready,
	Failed(String),
}

impl GraphStatus {
	/// The draw call returned. The ready signal may already have fired
	/// during it, in which case the status stays `Ready`.
	pub fn on_drawn(&mut self) {
		if *self == GraphStatus::Loading {
			*self = GraphStatus::Drawing;
		}
	}

	/// The widget finished drawing. A ready arriving after a timeout still
	/// recovers the view.
	pub fn on_ready(&mut self, cancelled: bool) {
		if !cancelled {
			*self = GraphStatus::Ready;
		}
	}

	/// The readiness timer expired. Returns whether the view failed.
	pub fn on_timeout(&mut self, cancelled: bool, timeout_ms: u32) -> bool {
		if cancelled || *self != GraphStatus::Drawing {
			return false;
		}
		*self = GraphStatus::Failed(VizError::RenderTimeout { timeout_ms }.to_string());
		true
	}

	pub fn on_error(&mut self, err: &VizError) {
		if *err != VizError::Cancelled {
			*self = GraphStatus::Failed(err.to_string());
		}
	}
}

/// Fetch-then-draw lifecycle of one graph overlay.
pub struct GraphSession<T, W> {
	key: PathwayKey,
	network_url: String,
	transport: T,
	widget: W,
	cancel: CancelToken,
}

impl<T: Transport, W: GraphWidget> GraphSession<T, W> {
	pub fn new(key: PathwayKey, network_dir: &str, transport: T, widget: W, cancel: CancelToken) -> Self {
		Self {
			network_url: key.network_url(network_dir),
			key,
			transport,
			widget,
			cancel,
		}
	}

	pub fn key(&self) -> &PathwayKey {
		&self.key
	}

	pub fn widget(&self) -> &W {
		&self.widget
	}

	fn check_live(&self) -> Result<(), VizError> {
		if self.cancel.is_cancelled() {
			debug!("Graph session for {} was cancelled", self.key);
			return Err(VizError::Cancelled);
		}
		Ok(())
	}

	/// Fetch and parse the network. Yields `Cancelled` if the overlay was
	/// torn down while the request was in flight.
	pub async fn load(&self) -> Result<NetworkPayload, VizError> {
		self.check_live()?;
		let raw = self.transport.fetch_text(&self.network_url).await;
		// A torn-down overlay gets Cancelled even if the request failed.
		self.check_live()?;
		NetworkPayload::parse(raw?)
	}

	/// Style the network and hand it to the widget with the initial layout.
	pub fn draw(&self, payload: &NetworkPayload) -> Result<DrawRequest, VizError> {
		self.check_live()?;
		let style = VisualStyle::from_network(&payload.document);
		let request = DrawRequest::new(payload.raw.clone(), style);
		info!(
			"Drawing {} ({} nodes, {} edges)",
			self.key,
			payload.document.nodes.len(),
			payload.document.edges.len()
		);
		self.widget.draw(&request)?;
		Ok(request)
	}

	/// Re-layout the drawn network. Nothing is fetched or redrawn.
	pub fn select_layout(&self, layout: Layout) -> Result<(), VizError> {
		self.check_live()?;
		self.widget.layout(layout)
	}

	/// [`load`](Self::load) followed by [`draw`](Self::draw).
	pub async fn run(&self) -> Result<DrawRequest, VizError> {
		let payload = self.load().await?;
		self.draw(&payload)
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use std::cell::RefCell;
	use std::future::{Future, ready};
	use std::pin::pin;
	use std::task::{Context, Poll, Waker};

	use super::*;
	use crate::components::graph_view::types::tests::graphml;

	/// Drive an immediately-ready future to completion.
	pub(crate) fn now<F: Future>(fut: F) -> F::Output {
		let mut cx = Context::from_waker(Waker::noop());
		match pin!(fut).poll(&mut cx) {
			Poll::Ready(out) => out,
			Poll::Pending => panic!("future was not ready"),
		}
	}

	#[derive(Default)]
	pub(crate) struct FakeTransport {
		pub(crate) body: Option<String>,
		pub(crate) requests: RefCell<Vec<String>>,
	}

	impl Transport for FakeTransport {
		fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, VizError>> {
			self.requests.borrow_mut().push(url.to_owned());
			ready(self.body.clone().ok_or(VizError::FetchFailed {
				url: url.to_owned(),
				status: 404,
			}))
		}
	}

	#[derive(Default)]
	pub(crate) struct FakeWidget {
		pub(crate) draws: RefCell<Vec<DrawRequest>>,
		pub(crate) layouts: RefCell<Vec<Layout>>,
	}

	impl GraphWidget for FakeWidget {
		fn draw(&self, request: &DrawRequest) -> Result<(), VizError> {
			self.draws.borrow_mut().push(request.clone());
			Ok(())
		}

		fn layout(&self, layout: Layout) -> Result<(), VizError> {
			self.layouts.borrow_mut().push(layout);
			Ok(())
		}
	}

	fn session(body: Option<String>) -> (GraphSession<FakeTransport, FakeWidget>, CancelToken) {
		let cancel = CancelToken::new();
		let transport = FakeTransport {
			body,
			..Default::default()
		};
		let key = PathwayKey::new("glycolysis", "degree").unwrap();
		(
			GraphSession::new(key, "xml", transport, FakeWidget::default(), cancel.clone()),
			cancel,
		)
	}

	#[test]
	fn draws_once_then_relayouts_without_refetch() {
		let (session, _) = session(Some(graphml(&["red", "blue"])));

		let request = now(session.run()).unwrap();
		assert_eq!(request.layout, Layout::Tree);
		assert_eq!(*session.transport.requests.borrow(), ["xml/glycolysis-degree.xml"]);
		assert_eq!(session.widget.draws.borrow().len(), 1);

		session.select_layout(Layout::Circle).unwrap();
		assert_eq!(*session.widget.layouts.borrow(), [Layout::Circle]);
		assert_eq!(session.transport.requests.borrow().len(), 1);
		assert_eq!(session.widget.draws.borrow().len(), 1);
	}

	#[test]
	fn cancelled_session_never_draws() {
		let (session, cancel) = session(Some(graphml(&["red"])));
		let payload = now(session.load()).unwrap();

		cancel.cancel();
		assert_eq!(session.draw(&payload), Err(VizError::Cancelled));
		assert_eq!(session.select_layout(Layout::Radial), Err(VizError::Cancelled));
		assert!(session.widget.draws.borrow().is_empty());
		assert!(session.widget.layouts.borrow().is_empty());
	}

	/// Cancels its token while "in flight", then fails.
	struct FailsAfterTeardown {
		cancel: CancelToken,
	}

	impl Transport for FailsAfterTeardown {
		fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, VizError>> {
			self.cancel.cancel();
			ready(Err(VizError::FetchFailed {
				url: url.to_owned(),
				status: 500,
			}))
		}
	}

	#[test]
	fn failed_fetch_after_teardown_reports_cancelled() {
		let cancel = CancelToken::new();
		let session = GraphSession::new(
			PathwayKey::new("glycolysis", "degree").unwrap(),
			"xml",
			FailsAfterTeardown {
				cancel: cancel.clone(),
			},
			FakeWidget::default(),
			cancel,
		);
		assert_eq!(now(session.run()), Err(VizError::Cancelled));
		assert!(session.widget.draws.borrow().is_empty());
	}

	#[test]
	fn cancelled_before_fetch_issues_no_request() {
		let (session, cancel) = session(Some(graphml(&["red"])));
		cancel.cancel();
		assert!(matches!(now(session.run()), Err(VizError::Cancelled)));
		assert!(session.transport.requests.borrow().is_empty());
	}

	#[test]
	fn timeout_while_drawing_fails_the_view() {
		let mut status = GraphStatus::Loading;
		status.on_drawn();
		assert!(status.on_timeout(false, 500));
		assert_eq!(
			status,
			GraphStatus::Failed(VizError::RenderTimeout { timeout_ms: 500 }.to_string())
		);

		// A late ready still brings the graph back.
		status.on_ready(false);
		assert_eq!(status, GraphStatus::Ready);
	}

	#[test]
	fn timeout_after_ready_is_ignored() {
		let mut status = GraphStatus::Loading;
		status.on_drawn();
		status.on_ready(false);
		assert!(!status.on_timeout(false, 500));
		assert_eq!(status, GraphStatus::Ready);
	}

	#[test]
	fn timeout_after_cancellation_is_ignored() {
		let mut status = GraphStatus::Loading;
		status.on_drawn();
		assert!(!status.on_timeout(true, 500));
		assert_eq!(status, GraphStatus::Drawing);

		status.on_ready(true);
		assert_eq!(status, GraphStatus::Drawing);
	}

	#[test]
	fn ready_during_draw_call_stays_ready() {
		let mut status = GraphStatus::Loading;
		status.on_ready(false);
		status.on_drawn();
		assert_eq!(status, GraphStatus::Ready);
		assert!(!status.on_timeout(false, 500));
	}

	#[test]
	fn cancellation_is_not_shown_as_failure() {
		let mut status = GraphStatus::Loading;
		status.on_error(&VizError::Cancelled);
		assert_eq!(status, GraphStatus::Loading);
		status.on_error(&VizError::TransportUnavailable);
		assert!(matches!(status, GraphStatus::Failed(_)));
	}

	#[test]
	fn fetch_failure_is_surfaced() {
		let (session, _) = session(None);
		assert_eq!(
			now(session.run()),
			Err(VizError::FetchFailed {
				url: "xml/glycolysis-degree.xml".into(),
				status: 404
			})
		);
		assert!(session.widget.draws.borrow().is_empty());
	}

	#[test]
	fn malformed_network_is_not_drawn() {
		let (session, _) = session(Some("<graphml><node".into()));
		assert!(matches!(now(session.run()), Err(VizError::MalformedNetwork(_))));
		assert!(session.widget.draws.borrow().is_empty());
	}
}
