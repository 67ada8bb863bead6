// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document metadata: per-page sizes, flow direction, and viewpoints.

use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

use folio_layout::FlowDirection;

/// A named sub-rectangle of a page, in normalized page coordinates.
///
/// All four fields are fractions of the page extent, so a viewpoint is
/// independent of the page's display size. `x`/`y` locate the top-left
/// corner; `w`/`h` give the extent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    /// Left edge as a fraction of the page width.
    pub x: f64,
    /// Top edge as a fraction of the page height.
    pub y: f64,
    /// Width as a fraction of the page width.
    pub w: f64,
    /// Height as a fraction of the page height.
    pub h: f64,
}

impl Viewpoint {
    /// Resolves the viewpoint against a concrete page size, yielding a
    /// rectangle in page-local units.
    #[must_use]
    pub fn resolve(&self, page: Size) -> Rect {
        Rect::new(
            self.x * page.width,
            self.y * page.height,
            (self.x + self.w) * page.width,
            (self.y + self.h) * page.height,
        )
    }
}

/// Declarative description of a paged document.
///
/// Every field has a default, so partial metadata deserializes cleanly:
/// `direction` falls back to [`FlowDirection::Right`], and a missing or
/// short `viewpoints` list means those pages have no viewpoints. A `null`
/// entry in `pages` is a page whose size is not known yet; the pager fills
/// it in when the page's content arrives.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMeta {
    /// Per-page natural sizes as `[width, height]`, with `null` for pages
    /// whose size is still unknown. The list length is the page count.
    pub pages: Vec<Option<[f64; 2]>>,
    /// Direction consecutive pages are laid out in.
    pub direction: FlowDirection,
    /// Per-page viewpoint lists, parallel to `pages`. Missing or `null`
    /// entries mean the page has none.
    pub viewpoints: Vec<Option<Vec<Viewpoint>>>,
}

impl DocumentMeta {
    /// Number of pages in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns `true` for a document with no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Natural size of page `index`, if declared.
    #[must_use]
    pub fn page_size(&self, index: usize) -> Option<Size> {
        self.pages
            .get(index)
            .copied()
            .flatten()
            .map(|[w, h]| Size::new(w, h))
    }

    /// Viewpoints of page `index`; empty when the page has none.
    #[must_use]
    pub fn viewpoints_for(&self, index: usize) -> &[Viewpoint] {
        self.viewpoints
            .get(index)
            .and_then(|v| v.as_deref())
            .unwrap_or(&[])
    }
}
