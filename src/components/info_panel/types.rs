/// NCBI Gene search; the symbol and the organism filter are appended.
pub const GENE_LOOKUP_URL: &str = "http://www.ncbi.nlm.nih.gov/gene?term=";

pub fn gene_lookup_url(symbol: &str) -> String {
	format!("{GENE_LOOKUP_URL}{symbol}[gene]+human[organism]")
}

/// One identifier from a node label. Flagged identifiers were written in
/// brackets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneToken {
	pub symbol: String,
	pub flagged: bool,
}

impl GeneToken {
	fn parse(raw: &str) -> Option<Self> {
		let raw = raw.trim();
		let flagged = raw
			.find('[')
			.is_some_and(|open| raw[open + 1..].contains(']'));
		let symbol = raw.replace(['[', ']'], "").trim().to_string();
		(!symbol.is_empty()).then_some(Self { symbol, flagged })
	}

	pub fn href(&self) -> String {
		gene_lookup_url(&self.symbol)
	}
}

/// Contents of the annotation panel for one clicked node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeInfo {
	pub tokens: Vec<GeneToken>,
}

impl NodeInfo {
	pub const HEADER: &'static str = "Genes and compounds";
	pub const LEGEND: &'static str = "Differential genes are marked with '[ ]'";
	pub const SEPARATOR: &'static str = ", ";

	/// Split a node label on line breaks, one identifier per line.
	pub fn from_label(label: &str) -> Self {
		Self {
			tokens: label.lines().filter_map(GeneToken::parse).collect(),
		}
	}

	pub fn has_flagged(&self) -> bool {
		self.tokens.iter().any(|t| t.flagged)
	}

	/// Plain-text rendering of the data row.
	pub fn joined(&self) -> String {
		self.tokens
			.iter()
			.map(|t| t.symbol.as_str())
			.collect::<Vec<_>>()
			.join(Self::SEPARATOR)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bracketed_token_is_flagged_and_adds_legend() {
		let info = NodeInfo::from_label("TP53\n[BRCA1]");
		assert_eq!(
			info.tokens,
			vec![
				GeneToken {
					symbol: "TP53".into(),
					flagged: false
				},
				GeneToken {
					symbol: "BRCA1".into(),
					flagged: true
				},
			]
		);
		assert!(info.has_flagged());
		assert_eq!(info.joined(), "TP53, BRCA1");
		assert_eq!(
			info.tokens[1].href(),
			"http://www.ncbi.nlm.nih.gov/gene?term=BRCA1[gene]+human[organism]"
		);
	}

	#[test]
	fn legend_names_the_bracket_marker() {
		assert_eq!(NodeInfo::HEADER, "Genes and compounds");
		assert!(NodeInfo::LEGEND.starts_with("Differential genes"));
		assert!(NodeInfo::LEGEND.ends_with("'[ ]'"));
	}

	#[test]
	fn plain_label_has_no_legend() {
		let info = NodeInfo::from_label("TP53\nMDM2\r\nCDKN1A");
		assert_eq!(info.tokens.len(), 3);
		assert_eq!(info.tokens[2].symbol, "CDKN1A");
		assert!(!info.has_flagged());
	}

	#[test]
	fn blank_lines_and_lone_brackets_are_skipped() {
		let info = NodeInfo::from_label("\nHK1\n  \n[]\n");
		assert_eq!(info.joined(), "HK1");
	}

	#[test]
	fn unmatched_bracket_is_not_flagged() {
		let info = NodeInfo::from_label("PFK]\n[ALDOA");
		assert!(!info.has_flagged());
		assert_eq!(info.joined(), "PFK, ALDOA");
	}
}
