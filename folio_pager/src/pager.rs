// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;

use kurbo::{Point, Rect, Size, Vec2};

use thiserror::Error;

use folio_camera::Surface;
use folio_focus::{FitMode, FocusPlanner, Overlay, Scheduler};
use folio_layout::{PageFlow, SizeConstraint, constrain_size};

use crate::host::{LoadError, LoadStatus, LoadTicket, PageHost};
use crate::meta::{DocumentMeta, Viewpoint};

/// Tunable pager behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagerConfig {
    /// Soft cap on resident pages. The protected neighborhood may push the
    /// actual count past this.
    pub max_loaded: usize,
    /// Pages on each side of the current page that are kept resident and
    /// never evicted.
    pub safe_neighbors: usize,
    /// Whether [`Pager::step`] walks viewpoints within a page before moving
    /// to the adjacent page.
    pub step_by_viewpoint: bool,
    /// Whether non-current resident pages are hidden.
    pub hide_unfocused: bool,
    /// Gap between consecutive pages, in logical units.
    pub padding: f64,
    /// Translation applied to every page placement.
    pub origin: Vec2,
    /// Forcing applied to natural page sizes before layout.
    pub constraint: SizeConstraint,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            max_loaded: 7,
            safe_neighbors: 2,
            step_by_viewpoint: true,
            hide_unfocused: false,
            padding: 0.0,
            origin: Vec2::ZERO,
            constraint: SizeConstraint::None,
        }
    }
}

/// Direction of a [`Pager::step`] through the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    /// Toward later viewpoints and pages.
    Forward,
    /// Toward earlier viewpoints and pages.
    Backward,
}

/// Navigation errors. The pager's state is untouched when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PagerError {
    /// The requested page does not exist, or a step ran off either end of
    /// the document.
    #[error("page index out of range (document has {total} pages)")]
    PageOutOfRange {
        /// Number of pages in the document.
        total: usize,
    },
    /// The requested viewpoint index does not exist on the page.
    #[error("viewpoint {viewpoint} out of range on page {page} ({available} available)")]
    ViewpointOutOfRange {
        /// The page the viewpoint was requested on.
        page: usize,
        /// The requested viewpoint index.
        viewpoint: usize,
        /// Number of viewpoints the page has.
        available: usize,
    },
}

#[derive(Debug)]
struct Slot<H> {
    handle: H,
    status: LoadStatus,
    generation: u64,
}

/// Windowed pager over a document: keeps a bounded set of pages resident
/// around the current one, lays them out as a strip, and drives a
/// [`FocusPlanner`] to frame the current page or viewpoint.
///
/// Eviction is insertion-ordered: when residency exceeds the configured cap,
/// the pages loaded longest ago go first, except that the current page and
/// its `safe_neighbors` on either side are never evicted. The soft cap can
/// therefore be exceeded while the protected neighborhood alone fills it.
///
/// Loads are asynchronous. [`Pager::load_page`] hands the host a stamped
/// [`LoadTicket`]; the embedder reports the outcome through
/// [`Pager::complete_load`], which discards completions whose page was
/// evicted or re-requested in the meantime.
#[derive(Debug)]
pub struct Pager<S: Surface, O: Overlay, T: Scheduler, H: PageHost> {
    flow: PageFlow,
    viewpoints: Vec<Vec<Viewpoint>>,
    total: usize,
    current: Option<usize>,
    current_viewpoint: Option<usize>,
    loaded: HashMap<usize, Slot<H::Handle>>,
    load_order: Vec<usize>,
    next_generation: u64,
    config: PagerConfig,
    planner: FocusPlanner<S, O, T>,
    host: H,
}

impl<S: Surface, O: Overlay, T: Scheduler, H: PageHost> Pager<S, O, T, H> {
    /// Creates a pager over `meta`'s pages. Nothing is loaded until the
    /// first [`Pager::set_page`] or [`Pager::load_page`].
    #[must_use]
    pub fn new(
        meta: &DocumentMeta,
        planner: FocusPlanner<S, O, T>,
        host: H,
        config: PagerConfig,
    ) -> Self {
        let total = meta.len();
        let sizes = (0..total)
            .map(|i| {
                meta.page_size(i)
                    .map(|natural| constrain_size(natural, config.constraint))
            })
            .collect();
        let flow = PageFlow::from_sizes(sizes, meta.direction, config.padding);
        let viewpoints = (0..total).map(|i| meta.viewpoints_for(i).to_vec()).collect();
        Self {
            flow,
            viewpoints,
            total,
            current: None,
            current_viewpoint: None,
            loaded: HashMap::new(),
            load_order: Vec::new(),
            next_generation: 0,
            config,
            planner,
            host,
        }
    }

    /// Number of pages in the document.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total
    }

    /// The current page, once one has been set.
    #[must_use]
    pub fn current_page(&self) -> Option<usize> {
        self.current
    }

    /// The active viewpoint on the current page, if any.
    #[must_use]
    pub fn current_viewpoint(&self) -> Option<usize> {
        self.current_viewpoint
    }

    /// Returns `true` while `page` is resident.
    #[must_use]
    pub fn is_loaded(&self, page: usize) -> bool {
        self.loaded.contains_key(&page)
    }

    /// Lifecycle state of a resident page, or `None` when not resident.
    #[must_use]
    pub fn load_status(&self, page: usize) -> Option<LoadStatus> {
        self.loaded.get(&page).map(|slot| slot.status)
    }

    /// Number of resident pages.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Placement of `page` in logical space, if already determined.
    #[must_use]
    pub fn page_rect(&self, page: usize) -> Option<Rect> {
        self.flow.try_rect(page).map(|rect| rect + self.config.origin)
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Returns a shared reference to the focus planner.
    #[must_use]
    pub fn planner(&self) -> &FocusPlanner<S, O, T> {
        &self.planner
    }

    /// Returns a mutable reference to the focus planner, for routing resize
    /// and scroll signals through to it.
    pub fn planner_mut(&mut self) -> &mut FocusPlanner<S, O, T> {
        &mut self.planner
    }

    /// Returns a shared reference to the page host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Makes `page` resident if it is in range and not already resident.
    ///
    /// Eviction runs *before* the load, so the page being requested is never
    /// an eviction candidate for its own admission.
    pub fn load_page(&mut self, page: usize) {
        if page >= self.total || self.loaded.contains_key(&page) {
            return;
        }
        self.cull_loaded_pages();
        let generation = self.next_generation;
        self.next_generation += 1;
        let ticket = LoadTicket::new(page, generation);
        let rect = self.page_rect(page);
        let mut handle = self.host.begin_load(page, rect, ticket);
        if self.config.hide_unfocused {
            self.host.set_visible(&mut handle, false);
        }
        log::debug!("loading page {page} (generation {generation})");
        self.loaded.insert(
            page,
            Slot {
                handle,
                status: LoadStatus::Loading,
                generation,
            },
        );
        self.load_order.push(page);
    }

    /// Evicts resident pages past the configured cap, oldest first, skipping
    /// the protected neighborhood of the current page.
    pub fn cull_loaded_pages(&mut self) {
        let mut excess = self.loaded.len().saturating_sub(self.config.max_loaded);
        if excess == 0 {
            return;
        }
        let order = core::mem::take(&mut self.load_order);
        for page in order {
            let protected = self
                .current
                .is_some_and(|c| page.abs_diff(c) <= self.config.safe_neighbors);
            if excess > 0
                && !protected
                && let Some(slot) = self.loaded.remove(&page)
            {
                log::debug!("culling page {page}");
                self.host.release(page, slot.handle);
                excess -= 1;
            } else {
                self.load_order.push(page);
            }
        }
    }

    /// Load-outcome report from the host.
    ///
    /// Stale tickets (the page was evicted, or evicted and re-requested
    /// since the load began) are discarded. A successful completion records
    /// the page's natural size; if that changes the layout, every resident
    /// page is repositioned and the current focus re-framed.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Size, LoadError>) {
        let page = ticket.page();
        let Some(slot) = self.loaded.get_mut(&page) else {
            log::trace!("discarding completion for evicted page {page}");
            return;
        };
        if slot.generation != ticket.generation() {
            log::trace!("discarding stale completion for page {page}");
            return;
        }
        match result {
            Ok(natural) => {
                slot.status = LoadStatus::Ready;
                log::info!("page {page} loaded");
                let display = constrain_size(natural, self.config.constraint);
                if self.flow.set_size(page, display) {
                    self.reposition_loaded();
                    self.reframe_current();
                }
            }
            Err(error) => {
                slot.status = LoadStatus::Errored;
                log::error!("page {page} failed to load: {error}");
            }
        }
    }

    /// Jumps to `page`, framing `viewpoint` when given and the whole page
    /// otherwise.
    ///
    /// Changing page loads the protected neighborhood around the new page
    /// (the new current page is always resident afterwards) and swaps
    /// visibility when unfocused pages are hidden. Re-targeting the current
    /// page only re-frames.
    pub fn set_page(&mut self, page: usize, viewpoint: Option<usize>) -> Result<(), PagerError> {
        if page >= self.total {
            return Err(PagerError::PageOutOfRange { total: self.total });
        }
        if let Some(vp) = viewpoint {
            let available = self.viewpoints[page].len();
            if vp >= available {
                return Err(PagerError::ViewpointOutOfRange {
                    page,
                    viewpoint: vp,
                    available,
                });
            }
        }

        if self.current != Some(page) {
            if let Some(previous) = self.current {
                self.set_page_visibility(previous, false);
            }
            self.current = Some(page);
            let first = page.saturating_sub(self.config.safe_neighbors);
            let last = (page + self.config.safe_neighbors).min(self.total - 1);
            for neighbor in first..=last {
                self.load_page(neighbor);
            }
            self.set_page_visibility(page, true);
        }

        self.current_viewpoint = viewpoint;
        self.apply_focus_for(page, viewpoint);
        Ok(())
    }

    /// Advances one step through the document.
    ///
    /// With viewpoint stepping enabled, the step walks the current page's
    /// viewpoints first and spills onto the adjacent page only past either
    /// end of the list, entering that page at its nearest viewpoint (first
    /// when moving forward, last when moving backward) or framing it whole
    /// when it has none. A page with no viewpoints always steps straight to
    /// its neighbor.
    ///
    /// Before any page has been set, a forward step goes to page 0.
    pub fn step(&mut self, direction: StepDirection) -> Result<(), PagerError> {
        if self.config.step_by_viewpoint {
            if let Some(current) = self.current {
                let count = self.viewpoints[current].len();
                if count > 0 {
                    let next = match self.current_viewpoint {
                        Some(vp) => match direction {
                            StepDirection::Forward => vp.checked_add(1).filter(|&n| n < count),
                            StepDirection::Backward => vp.checked_sub(1),
                        },
                        None => {
                            let fallback = match direction {
                                StepDirection::Forward => 0,
                                StepDirection::Backward => count - 1,
                            };
                            log::warn!(
                                "no active viewpoint on page {current}; resuming at {fallback}"
                            );
                            Some(fallback)
                        }
                    };
                    if let Some(vp) = next {
                        return self.set_page(current, Some(vp));
                    }
                }
            }
            let page = self.adjacent_page(direction)?;
            let count = self.viewpoints[page].len();
            let viewpoint = if count == 0 {
                None
            } else {
                Some(match direction {
                    StepDirection::Forward => 0,
                    StepDirection::Backward => count - 1,
                })
            };
            self.set_page(page, viewpoint)
        } else {
            let page = self.adjacent_page(direction)?;
            self.set_page(page, None)
        }
    }

    /// Sets the fit/fill policy and re-frames the current focus, if any.
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        self.planner.set_fit_mode(mode);
    }

    /// Enables or disables viewpoint stepping.
    ///
    /// Enabling it on a page that has viewpoints activates the first one;
    /// disabling it drops back to whole-page framing. Either way the current
    /// page is re-framed.
    pub fn set_step_by_viewpoint(&mut self, enabled: bool) {
        if self.config.step_by_viewpoint == enabled {
            return;
        }
        self.config.step_by_viewpoint = enabled;
        let Some(current) = self.current else {
            self.current_viewpoint = None;
            return;
        };
        self.current_viewpoint = if enabled && !self.viewpoints[current].is_empty() {
            Some(0)
        } else {
            None
        };
        self.apply_focus_for(current, self.current_viewpoint);
    }

    /// Shows or hides non-current resident pages.
    pub fn set_hide_unfocused(&mut self, hide: bool) {
        if self.config.hide_unfocused == hide {
            return;
        }
        self.config.hide_unfocused = hide;
        for (&page, slot) in self.loaded.iter_mut() {
            let visible = !hide || Some(page) == self.current;
            self.host.set_visible(&mut slot.handle, visible);
        }
    }

    fn adjacent_page(&self, direction: StepDirection) -> Result<usize, PagerError> {
        let err = PagerError::PageOutOfRange { total: self.total };
        match (self.current, direction) {
            (None, StepDirection::Forward) => {
                if self.total > 0 {
                    Ok(0)
                } else {
                    Err(err)
                }
            }
            (None, StepDirection::Backward) => Err(err),
            (Some(current), StepDirection::Forward) => {
                let next = current + 1;
                if next < self.total { Ok(next) } else { Err(err) }
            }
            (Some(current), StepDirection::Backward) => current.checked_sub(1).ok_or(err),
        }
    }

    fn set_page_visibility(&mut self, page: usize, visible: bool) {
        if !self.config.hide_unfocused {
            return;
        }
        if let Some(slot) = self.loaded.get_mut(&page) {
            self.host.set_visible(&mut slot.handle, visible);
        }
    }

    fn reposition_loaded(&mut self) {
        for (&page, slot) in self.loaded.iter_mut() {
            if let Some(rect) = self.flow.try_rect(page) {
                self.host.reposition(&mut slot.handle, rect + self.config.origin);
            }
        }
    }

    fn reframe_current(&mut self) {
        if let Some(page) = self.current {
            self.apply_focus_for(page, self.current_viewpoint);
        }
    }

    fn apply_focus_for(&mut self, page: usize, viewpoint: Option<usize>) {
        let Some(rect) = self.page_rect(page) else {
            // Placement unknown until upstream sizes stream in; the
            // completion that fills the gap re-frames.
            return;
        };
        let direction = self.flow.direction();
        // The scroll anchor is the page's leading corner in the direction
        // of travel, so entering scroll emulation starts reading from the
        // page's start.
        let anchor = Point::new(
            if direction.dx() >= 0.0 { rect.x0 } else { rect.x1 },
            if direction.dy() >= 0.0 { rect.y0 } else { rect.y1 },
        );
        let focus = match viewpoint {
            Some(vp) => {
                let Some(size) = self.flow.size(page) else {
                    return;
                };
                self.viewpoints[page][vp].resolve(size) + rect.origin().to_vec2()
            }
            None => rect,
        };
        self.planner.set_focus(focus, Some(anchor));
    }
}
