mod component;
pub mod state;
pub mod style;
pub mod types;
pub mod widget;

pub use component::{GraphSurface, LayoutSelect};
pub use state::GraphSession;
pub use style::{DrawRequest, Layout, VisualStyle, color_palette};
pub use types::{NetworkDocument, NetworkPayload};
pub use widget::{CytoscapeWidget, GraphWidget};
