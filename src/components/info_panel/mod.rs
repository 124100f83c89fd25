mod component;
mod types;

pub use component::InfoPanel;
pub use types::{GENE_LOOKUP_URL, GeneToken, NodeInfo, gene_lookup_url};
