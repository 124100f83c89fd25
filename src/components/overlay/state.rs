use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error, info};

use super::types::{DisplayMode, PathwayKey};

/// Shared flag flipped when the owning overlay goes away. Pending work checks
/// it before touching anything the overlay owned.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// One live overlay instance. Handles are cheap to clone; two handles are
/// equal only if they refer to the same instance.
#[derive(Clone, Debug)]
pub struct OverlayHandle {
	id: u64,
	mode: DisplayMode,
	key: PathwayKey,
	cancel: CancelToken,
}

impl PartialEq for OverlayHandle {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for OverlayHandle {}

impl OverlayHandle {
	pub fn id(&self) -> u64 {
		self.id
	}

	pub fn mode(&self) -> DisplayMode {
		self.mode
	}

	pub fn key(&self) -> &PathwayKey {
		&self.key
	}

	pub fn cancel_token(&self) -> CancelToken {
		self.cancel.clone()
	}

	/// Element id unique to this instance, for things that must not collide
	/// with a previous overlay of the same kind (the widget container).
	pub fn element_id(&self, prefix: &str) -> String {
		format!("{prefix}-{}", self.id)
	}
}

/// Owns at most one live overlay per [`DisplayMode`].
#[derive(Debug, Default)]
pub struct OverlayManager {
	next_id: u64,
	image: Option<OverlayHandle>,
	graph: Option<OverlayHandle>,
}

impl OverlayManager {
	pub fn new() -> Self {
		Self::default()
	}

	fn slot(&mut self, mode: DisplayMode) -> &mut Option<OverlayHandle> {
		match mode {
			DisplayMode::Image => &mut self.image,
			DisplayMode::Graph => &mut self.graph,
		}
	}

	pub fn live(&self, mode: DisplayMode) -> Option<&OverlayHandle> {
		match mode {
			DisplayMode::Image => self.image.as_ref(),
			DisplayMode::Graph => self.graph.as_ref(),
		}
	}

	pub fn is_live(&self, handle: &OverlayHandle) -> bool {
		self.live(handle.mode) == Some(handle)
	}

	pub fn live_count(&self) -> usize {
		usize::from(self.image.is_some()) + usize::from(self.graph.is_some())
	}

	/// Open an overlay, replacing any live overlay of the same mode. The other
	/// mode's overlay is left alone.
	pub fn open(&mut self, mode: DisplayMode, key: PathwayKey) -> OverlayHandle {
		self.close_mode(mode);
		self.next_id += 1;
		let handle = OverlayHandle {
			id: self.next_id,
			mode,
			key,
			cancel: CancelToken::new(),
		};
		info!("Opening {:?} overlay #{} for {}", mode, handle.id, handle.key);
		*self.slot(mode) = Some(handle.clone());
		handle
	}

	/// Close whatever overlay is live for `mode`, cancelling its pending work.
	pub fn close_mode(&mut self, mode: DisplayMode) -> Option<OverlayHandle> {
		let old = self.slot(mode).take()?;
		debug!("Closing {:?} overlay #{}", mode, old.id);
		old.cancel.cancel();
		Some(old)
	}

	/// Close `handle` if it is still the live overlay of its mode.
	pub fn close(&mut self, handle: &OverlayHandle) -> bool {
		if !self.is_live(handle) {
			debug!("Overlay #{} already closed", handle.id);
			return false;
		}
		self.close_mode(handle.mode).is_some()
	}

	/// Close `handle` and open the other mode for the same key.
	///
	/// The switch control lives inside the overlay it closes, so `handle`
	/// must be live here.
	pub fn switch(&mut self, handle: &OverlayHandle) -> Option<OverlayHandle> {
		debug_assert!(
			self.is_live(handle),
			"mode switch fired for overlay #{} which is not live",
			handle.id
		);
		if !self.close(handle) {
			error!("Ignoring mode switch from stale overlay #{}", handle.id);
			return None;
		}
		Some(self.open(handle.mode.toggled(), handle.key.clone()))
	}
}
