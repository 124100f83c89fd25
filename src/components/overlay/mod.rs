mod component;
mod state;
mod types;

pub use component::{GraphOverlay, ImageOverlay, ModeSwitch, OverlayHost, Overlays, backdrop_height};
pub use state::{CancelToken, OverlayHandle, OverlayManager};
pub use types::{DisplayMode, ImagePlot, PathwayKey};
