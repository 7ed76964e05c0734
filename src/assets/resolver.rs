use std::collections::VecDeque;

use crate::assets::image::PixelImage;
use crate::foundation::error::VexelResult;

/// Opaque identifier for one in-flight image load.
///
/// Minted by the resolver when it answers [`Resolution::Pending`]; the leaf
/// holds it until a matching [`ImageEvent`] arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageTicket(u64);

impl ImageTicket {
    /// Wrap a resolver-chosen raw value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value, for resolver bookkeeping.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Outcome of resolving an image key.
#[derive(Clone, Debug)]
pub enum Resolution {
    /// The image was already decoded and can back a leaf immediately.
    Ready(PixelImage),
    /// The load is in flight; completion arrives as an [`ImageEvent`].
    Pending(ImageTicket),
}

/// Boundary through which leaves obtain backing images.
///
/// Implementations own fetching and decoding. The core never blocks on them:
/// a `Pending` answer leaves the leaf not ready until the event is delivered.
pub trait ImageResolver {
    /// Resolve `key` to a decoded image or an in-flight ticket.
    fn resolve(&mut self, key: &str) -> VexelResult<Resolution>;
}

/// Terminal outcome of an asynchronous image load.
#[derive(Clone, Debug)]
pub enum ImageEventKind {
    /// The image decoded successfully.
    Loaded(PixelImage),
    /// The load failed; the reason is informational only.
    Failed(String),
}

/// Completion notice for one pending load, delivered on the frame thread.
#[derive(Clone, Debug)]
pub struct ImageEvent {
    /// Ticket the resolver handed out for this load.
    pub ticket: ImageTicket,
    /// How the load ended.
    pub kind: ImageEventKind,
}

/// FIFO queue of load completions, drained once per frame by the driver.
///
/// Resolvers push from wherever their IO finishes; the driver drains on the
/// frame thread and offers each event to the leaves still waiting on it.
/// Events nobody claims are dropped, which is the correct fate for loads
/// whose leaf was torn down first.
#[derive(Debug, Default)]
pub struct ImageEvents {
    queue: VecDeque<ImageEvent>,
}

impl ImageEvents {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completion notice.
    pub fn push(&mut self, event: ImageEvent) {
        self.queue.push_back(event);
    }

    /// Take every queued event, oldest first, leaving the queue empty.
    pub fn drain(&mut self) -> VecDeque<ImageEvent> {
        std::mem::take(&mut self.queue)
    }

    /// Number of undelivered events.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Return `true` when no events are waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
