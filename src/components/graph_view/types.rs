use roxmltree::{Document, Node};

use crate::error::VizError;

/// A `<key>` declaration: maps a data key id to the attribute name the
/// widget sees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeKey {
	pub id: String,
	pub name: String,
	/// `node`, `edge`, `graph` or `all`.
	pub domain: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkNode {
	pub id: String,
	/// `(key, value)` in document order.
	pub data: Vec<(String, String)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkEdge {
	pub source: String,
	pub target: String,
	pub data: Vec<(String, String)>,
}

/// Parsed view of a fetched GraphML network.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkDocument {
	pub keys: Vec<AttributeKey>,
	pub nodes: Vec<NetworkNode>,
	pub edges: Vec<NetworkEdge>,
}

impl NetworkDocument {
	pub fn parse(xml: &str) -> Result<Self, VizError> {
		let doc = Document::parse(xml).map_err(|e| VizError::MalformedNetwork(e.to_string()))?;
		let elements = |name: &'static str| {
			doc.descendants()
				.filter(move |n| n.is_element() && n.tag_name().name() == name)
		};

		let keys = elements("key")
			.filter_map(|k| {
				let id = k.attribute("id")?.to_string();
				let name = k.attribute("attr.name").unwrap_or(&id).to_string();
				Some(AttributeKey {
					id,
					name,
					domain: k.attribute("for").unwrap_or("all").to_string(),
				})
			})
			.collect();

		let nodes = elements("node")
			.map(|n| NetworkNode {
				id: n.attribute("id").unwrap_or_default().to_string(),
				data: data_entries(n),
			})
			.collect();

		let edges = elements("edge")
			.filter_map(|e| {
				Some(NetworkEdge {
					source: e.attribute("source")?.to_string(),
					target: e.attribute("target")?.to_string(),
					data: data_entries(e),
				})
			})
			.collect();

		Ok(Self { keys, nodes, edges })
	}

	/// Attribute name declared for a node data key, if any.
	pub fn node_attribute_name(&self, key_id: &str) -> Option<&str> {
		self.keys
			.iter()
			.find(|k| k.id == key_id && (k.domain == "node" || k.domain == "all"))
			.map(|k| k.name.as_str())
	}
}

fn data_entries(owner: Node<'_, '_>) -> Vec<(String, String)> {
	owner
		.children()
		.filter(|c| c.is_element() && c.tag_name().name() == "data")
		.filter_map(|d| {
			let key = d.attribute("key")?;
			Some((key.to_string(), d.text().unwrap_or_default().trim().to_string()))
		})
		.collect()
}

/// The fetched network in both views: the raw text goes to the widget, the
/// parsed document feeds the style mapper.
#[derive(Clone, Debug)]
pub struct NetworkPayload {
	pub raw: String,
	pub document: NetworkDocument,
}

impl NetworkPayload {
	pub fn parse(raw: String) -> Result<Self, VizError> {
		let document = NetworkDocument::parse(&raw)?;
		Ok(Self { raw, document })
	}
}
