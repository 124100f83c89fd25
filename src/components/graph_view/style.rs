use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::types::NetworkDocument;

/// Data key whose values form the node color palette.
pub const COLOR_KEY: &str = "v_color";
const SHAPE_ATTR: &str = "shape";
const SIZE_ATTR: &str = "size";

const BACKGROUND_COLOR: &str = "#FFFFFF";
const NODE_BORDER_WIDTH: f64 = 3.0;
const NODE_BORDER_COLOR: &str = "#ffffff";
const NODE_SIZE_DEFAULT: f64 = 25.0;
const NODE_SIZE_MIN: f64 = 25.0;
const NODE_SIZE_MAX: f64 = 75.0;
const NODE_LABEL_ANCHOR: &str = "center";
const EDGE_WIDTH: f64 = 3.0;
const EDGE_COLOR: &str = "#0B94B1";

/// Layout algorithms offered by the selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Layout {
	#[default]
	Tree,
	Circle,
	Radial,
}

impl Layout {
	pub const ALL: [Layout; 3] = [Layout::Tree, Layout::Circle, Layout::Radial];

	pub fn name(self) -> &'static str {
		match self {
			Layout::Tree => "Tree",
			Layout::Circle => "Circle",
			Layout::Radial => "Radial",
		}
	}
}

impl fmt::Display for Layout {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Layout {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Layout::ALL
			.into_iter()
			.find(|l| l.name() == s)
			.ok_or_else(|| format!("unknown layout {s:?}"))
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscreteEntry<T> {
	pub attr_value: String,
	pub value: T,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscreteMapper<T> {
	pub attr_name: String,
	pub entries: Vec<DiscreteEntry<T>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuousMapper<T> {
	pub attr_name: String,
	pub min_value: T,
	pub max_value: T,
}

/// A visual property driven by node data. Unset parts are omitted from the
/// serialized form.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping<T> {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default_value: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub discrete_mapper: Option<DiscreteMapper<T>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub continuous_mapper: Option<ContinuousMapper<T>>,
}

impl<T> Mapping<T> {
	fn discrete(attr_name: &str, entries: Vec<DiscreteEntry<T>>) -> Self {
		Self {
			default_value: None,
			discrete_mapper: Some(DiscreteMapper {
				attr_name: attr_name.to_string(),
				entries,
			}),
			continuous_mapper: None,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStyle {
	pub background_color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
	pub shape: Mapping<String>,
	pub border_width: f64,
	pub border_color: String,
	pub size: Mapping<f64>,
	pub color: Mapping<String>,
	pub label_horizontal_anchor: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
	pub width: f64,
	pub color: String,
}

/// Style descriptor in the shape Cytoscape Web's `visualStyle` expects.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisualStyle {
	pub global: GlobalStyle,
	pub nodes: NodeStyle,
	pub edges: EdgeStyle,
}

impl VisualStyle {
	pub fn from_network(doc: &NetworkDocument) -> Self {
		let shapes = [("circle", "ELLIPSE"), ("square", "RECTANGLE")]
			.into_iter()
			.map(|(attr_value, value)| DiscreteEntry {
				attr_value: attr_value.to_string(),
				value: value.to_string(),
			})
			.collect();
		let color_attr = doc.node_attribute_name(COLOR_KEY).unwrap_or(COLOR_KEY);

		Self {
			global: GlobalStyle {
				background_color: BACKGROUND_COLOR.into(),
			},
			nodes: NodeStyle {
				shape: Mapping::discrete(SHAPE_ATTR, shapes),
				border_width: NODE_BORDER_WIDTH,
				border_color: NODE_BORDER_COLOR.into(),
				size: Mapping {
					default_value: Some(NODE_SIZE_DEFAULT),
					discrete_mapper: None,
					continuous_mapper: Some(ContinuousMapper {
						attr_name: SIZE_ATTR.into(),
						min_value: NODE_SIZE_MIN,
						max_value: NODE_SIZE_MAX,
					}),
				},
				color: Mapping::discrete(color_attr, color_palette(doc)),
				label_horizontal_anchor: NODE_LABEL_ANCHOR.into(),
			},
			edges: EdgeStyle {
				width: EDGE_WIDTH,
				color: EDGE_COLOR.into(),
			},
		}
	}
}

/// Every `v_color` value mapped to itself, in node order. Repeated values
/// are kept.
pub fn color_palette(doc: &NetworkDocument) -> Vec<DiscreteEntry<String>> {
	doc.nodes
		.iter()
		.flat_map(|node| node.data.iter())
		.filter(|(key, _)| key == COLOR_KEY)
		.map(|(_, value)| DiscreteEntry {
			attr_value: value.clone(),
			value: value.clone(),
		})
		.collect()
}

/// Arguments of the widget's `draw` call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawRequest {
	pub network: String,
	pub layout: Layout,
	pub visual_style: VisualStyle,
	pub pan_zoom_control_visible: bool,
}

impl DrawRequest {
	pub fn new(network: String, visual_style: VisualStyle) -> Self {
		Self {
			network,
			layout: Layout::Tree,
			visual_style,
			pan_zoom_control_visible: true,
		}
	}
}
