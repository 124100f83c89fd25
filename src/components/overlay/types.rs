use std::fmt;

use serde::Deserialize;

use crate::error::VizError;

/// Identifies one precomputed result set: which pathway, ranked by which
/// centrality measure.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawKey")]
pub struct PathwayKey {
	pathway: String,
	centrality: String,
}

#[derive(Deserialize)]
struct RawKey {
	pathway: String,
	centrality: String,
}

impl TryFrom<RawKey> for PathwayKey {
	type Error = VizError;

	fn try_from(raw: RawKey) -> Result<Self, Self::Error> {
		Self::new(raw.pathway, raw.centrality)
	}
}

impl PathwayKey {
	/// Both parts must be non-blank.
	pub fn new(pathway: impl Into<String>, centrality: impl Into<String>) -> Result<Self, VizError> {
		let (pathway, centrality) = (pathway.into(), centrality.into());
		if pathway.trim().is_empty() || centrality.trim().is_empty() {
			return Err(VizError::InvalidKey(format!("{pathway:?}/{centrality:?}")));
		}
		Ok(Self {
			pathway,
			centrality,
		})
	}

	pub fn pathway(&self) -> &str {
		&self.pathway
	}

	pub fn centrality(&self) -> &str {
		&self.centrality
	}

	/// `<pathway>-<centrality>`, the shared file-name stem.
	pub fn stem(&self) -> String {
		format!("{}-{}", self.pathway, self.centrality)
	}

	/// `<image_dir>/<stem>-<null|graph>.png`
	pub fn image_url(&self, image_dir: &str, plot: ImagePlot) -> String {
		format!("{image_dir}/{}-{}.png", self.stem(), plot.suffix())
	}

	/// `<network_dir>/<stem>.xml`
	pub fn network_url(&self, network_dir: &str) -> String {
		format!("{network_dir}/{}.xml", self.stem())
	}
}

impl fmt::Display for PathwayKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({})", self.pathway, self.centrality)
	}
}

/// The two pre-rendered plots of the image view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImagePlot {
	NullDistribution,
	Graph,
}

impl ImagePlot {
	/// Page order.
	pub const ALL: [ImagePlot; 2] = [ImagePlot::NullDistribution, ImagePlot::Graph];

	fn suffix(self) -> &'static str {
		match self {
			ImagePlot::NullDistribution => "null",
			ImagePlot::Graph => "graph",
		}
	}

	/// Figure number on the page.
	pub fn number(self) -> u8 {
		match self {
			ImagePlot::NullDistribution => 1,
			ImagePlot::Graph => 2,
		}
	}

	/// Figure caption text, after the number.
	pub fn caption(self, key: &PathwayKey) -> String {
		let (p, c) = (key.pathway(), key.centrality());
		match self {
			ImagePlot::NullDistribution => format!("Null distribution of pathway scores of {p} under {c}."),
			ImagePlot::Graph => format!("Graph of {p} under {c}."),
		}
	}
}

/// Which presentation an overlay shows. Each mode has its own overlay slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayMode {
	Image,
	Graph,
}

impl DisplayMode {
	/// The other mode.
	pub fn toggled(self) -> Self {
		match self {
			DisplayMode::Image => DisplayMode::Graph,
			DisplayMode::Graph => DisplayMode::Image,
		}
	}

	/// Label of the mode-switch control shown while in this mode.
	pub fn switch_label(self) -> &'static str {
		match self {
			DisplayMode::Image => "switch to graph view",
			DisplayMode::Graph => "switch to image view",
		}
	}

	/// Fixed element ids, so a new overlay of a mode replaces the old one.
	pub fn backdrop_id(self) -> &'static str {
		match self {
			DisplayMode::Image => "image-overlay-backdrop",
			DisplayMode::Graph => "graph-overlay-backdrop",
		}
	}

	pub fn content_id(self) -> &'static str {
		match self {
			DisplayMode::Image => "image-overlay-content",
			DisplayMode::Graph => "graph-overlay-content",
		}
	}
}
