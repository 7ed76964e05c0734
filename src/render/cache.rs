use crate::render::renderer::{CacheHandle, Renderer};

/// Tracks at most one live renderer-side cache handle for a piece of content.
///
/// The attach/detach lifecycle runs through slots: attach installs a freshly
/// minted handle, detach releases it. Installing over a live handle releases
/// the old one first, so a leaf never holds two live caches for the same
/// logical content, and release is idempotent so repeated detach is safe.
#[derive(Debug, Default)]
pub struct CacheSlot {
    handle: Option<CacheHandle>,
}

impl CacheSlot {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `handle`, releasing any previously live handle first.
    pub fn install(&mut self, renderer: &mut dyn Renderer, handle: Option<CacheHandle>) {
        self.release(renderer);
        self.handle = handle;
    }

    /// Release the live handle if there is one. Safe to call repeatedly.
    pub fn release(&mut self, renderer: &mut dyn Renderer) {
        if let Some(handle) = self.handle.take() {
            tracing::debug!(handle = handle.raw(), "release cached resource");
            renderer.uncache(handle);
        }
    }

    /// The live handle, if any.
    pub fn handle(&self) -> Option<CacheHandle> {
        self.handle
    }

    /// Return `true` while a handle is installed.
    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cache.rs"]
mod tests;
