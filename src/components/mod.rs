//! Overlays, the graph view and the node annotation panel.

pub mod graph_view;
pub mod info_panel;
pub mod overlay;
