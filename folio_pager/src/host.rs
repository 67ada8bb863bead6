// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

use kurbo::Rect;

use thiserror::Error;

/// Identifies one issued page load.
///
/// Tickets are handed to [`PageHost::begin_load`] and must be echoed back
/// through [`crate::Pager::complete_load`] when the load finishes. The pager
/// stamps each ticket with a generation, so a completion that arrives after
/// its page was evicted (or evicted and re-requested) is recognized as stale
/// and discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    page: usize,
    generation: u64,
}

impl LoadTicket {
    pub(crate) const fn new(page: usize, generation: u64) -> Self {
        Self { page, generation }
    }

    /// The page this ticket's load was issued for.
    #[must_use]
    pub const fn page(self) -> usize {
        self.page
    }

    pub(crate) const fn generation(self) -> u64 {
        self.generation
    }
}

/// A page load that did not produce usable content.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("page content failed to load: {reason}")]
pub struct LoadError {
    /// Host-provided failure description.
    pub reason: String,
}

impl LoadError {
    /// Creates an error with the given description.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Lifecycle state of a resident page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// The host is still fetching the page's content.
    Loading,
    /// Content arrived and the page is displayable.
    Ready,
    /// The load failed. The page stays resident (and evictable) so it is
    /// not re-requested in a loop.
    Errored,
}

/// Page-content host capability: creates, positions, and releases the
/// embedder-side representation of a resident page.
///
/// Loads are asynchronous from the pager's point of view. `begin_load`
/// returns a handle immediately; the host later reports the outcome by
/// calling [`crate::Pager::complete_load`] with the ticket. The pager never
/// blocks on a load.
pub trait PageHost {
    /// Embedder-side representation of one resident page.
    type Handle: Debug;

    /// Starts loading `page`'s content. `rect` is the page's placement in
    /// logical space when already known; `None` means the placement will be
    /// delivered by a later [`PageHost::reposition`] call once upstream
    /// sizes arrive.
    fn begin_load(&mut self, page: usize, rect: Option<Rect>, ticket: LoadTicket) -> Self::Handle;

    /// Moves a resident page to `rect`.
    fn reposition(&mut self, handle: &mut Self::Handle, rect: Rect);

    /// Shows or hides a resident page.
    fn set_visible(&mut self, handle: &mut Self::Handle, visible: bool);

    /// Releases a resident page's resources. Any in-flight load for the
    /// handle should be abandoned; a completion that races this call is
    /// discarded by the pager.
    fn release(&mut self, page: usize, handle: Self::Handle);
}
