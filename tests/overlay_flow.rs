//! End-to-end overlay flow against recording fakes for the widget and the
//! transport.

use std::cell::RefCell;
use std::future::{Future, ready};
use std::pin::pin;
use std::task::{Context, Poll, Waker};

use pathway_viz::components::graph_view::{DrawRequest, GraphSession, GraphWidget, Layout, NetworkDocument, color_palette};
use pathway_viz::components::info_panel::NodeInfo;
use pathway_viz::components::overlay::{DisplayMode, OverlayManager, PathwayKey};
use pathway_viz::error::VizError;
use pathway_viz::transport::Transport;

const NETWORK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="label" for="node" attr.name="label" attr.type="string"/>
  <key id="v_color" for="node" attr.name="color" attr.type="string"/>
  <graph edgedefault="directed">
    <node id="hk"><data key="label">HK1
[HK2]</data><data key="v_color">red</data></node>
    <node id="pgi"><data key="label">GPI</data><data key="v_color">red</data></node>
    <node id="pfk"><data key="label">PFKM</data><data key="v_color">blue</data></node>
    <edge source="hk" target="pgi"/>
    <edge source="pgi" target="pfk"/>
  </graph>
</graphml>"#;

fn now<F: Future>(fut: F) -> F::Output {
	let mut cx = Context::from_waker(Waker::noop());
	match pin!(fut).poll(&mut cx) {
		Poll::Ready(out) => out,
		Poll::Pending => panic!("future was not ready"),
	}
}

#[derive(Default)]
struct Server {
	requests: RefCell<Vec<String>>,
}

impl Transport for &Server {
	fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, VizError>> {
		self.requests.borrow_mut().push(url.to_owned());
		ready(Ok(NETWORK.to_string()))
	}
}

#[derive(Default)]
struct Recorder {
	draws: RefCell<Vec<DrawRequest>>,
	layouts: RefCell<Vec<Layout>>,
}

impl GraphWidget for &Recorder {
	fn draw(&self, request: &DrawRequest) -> Result<(), VizError> {
		self.draws.borrow_mut().push(request.clone());
		Ok(())
	}

	fn layout(&self, layout: Layout) -> Result<(), VizError> {
		self.layouts.borrow_mut().push(layout);
		Ok(())
	}
}

#[test]
fn graph_overlay_fetches_once_and_relayouts_in_place() {
	let (server, widget) = (Server::default(), Recorder::default());
	let mut overlays = OverlayManager::new();
	let handle = overlays.open(
		DisplayMode::Graph,
		PathwayKey::new("glycolysis", "degree").unwrap(),
	);

	let session = GraphSession::new(
		handle.key().clone(),
		"xml",
		&server,
		&widget,
		handle.cancel_token(),
	);
	now(session.run()).unwrap();

	assert_eq!(*server.requests.borrow(), ["xml/glycolysis-degree.xml"]);
	let draws = widget.draws.borrow();
	assert_eq!(draws.len(), 1);
	assert_eq!(draws[0].layout, Layout::Tree);
	assert_eq!(draws[0].network, NETWORK);
	let palette = draws[0].visual_style.nodes.color.discrete_mapper.as_ref().unwrap();
	assert_eq!(palette.attr_name, "color");
	assert_eq!(palette.entries.len(), 3);
	drop(draws);

	session.select_layout(Layout::Circle).unwrap();
	assert_eq!(*widget.layouts.borrow(), [Layout::Circle]);
	assert_eq!(server.requests.borrow().len(), 1);
	assert_eq!(widget.draws.borrow().len(), 1);
}

#[test]
fn switching_away_cancels_the_graph_session() {
	let (server, widget) = (Server::default(), Recorder::default());
	let mut overlays = OverlayManager::new();
	let graph = overlays.open(
		DisplayMode::Graph,
		PathwayKey::new("glycolysis", "degree").unwrap(),
	);
	let session = GraphSession::new(
		graph.key().clone(),
		"xml",
		&server,
		&widget,
		graph.cancel_token(),
	);
	let payload = now(session.load()).unwrap();

	let image = overlays.switch(&graph).unwrap();
	assert_eq!(image.mode(), DisplayMode::Image);
	assert_eq!(image.key(), graph.key());

	// The response arrived, but its overlay is gone.
	assert_eq!(session.draw(&payload), Err(VizError::Cancelled));
	assert!(widget.draws.borrow().is_empty());

	let back = overlays.switch(&image).unwrap();
	assert_eq!(back.mode(), DisplayMode::Graph);
	assert_eq!(back.key(), graph.key());
	assert_eq!(overlays.live_count(), 1);
}

#[test]
fn clicked_label_becomes_gene_table() {
	let doc = NetworkDocument::parse(NETWORK).unwrap();
	let label = &doc.nodes[0].data[0].1;
	let info = NodeInfo::from_label(label);

	assert_eq!(info.joined(), "HK1, HK2");
	assert!(info.has_flagged());
	assert_eq!(color_palette(&doc).len(), 3);
}
