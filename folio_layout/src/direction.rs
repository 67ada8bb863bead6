// Copyright 2026 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Axis along which consecutive pages are concatenated.
///
/// The direction is one of the four unit vectors; the perpendicular axis is
/// always centered by the layout. [`FlowDirection::Right`] is the default and
/// matches western left-to-right reading order; [`FlowDirection::Left`] is
/// the common choice for manga.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowDirection {
    /// Pages advance toward +X.
    #[default]
    Right,
    /// Pages advance toward −X.
    Left,
    /// Pages advance toward +Y.
    Down,
    /// Pages advance toward −Y.
    Up,
}

impl FlowDirection {
    /// The X component of the direction unit vector.
    #[must_use]
    pub const fn dx(self) -> f64 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
            Self::Down | Self::Up => 0.0,
        }
    }

    /// The Y component of the direction unit vector.
    #[must_use]
    pub const fn dy(self) -> f64 {
        match self {
            Self::Down => 1.0,
            Self::Up => -1.0,
            Self::Right | Self::Left => 0.0,
        }
    }

    /// Returns `true` when pages advance along the X axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Right | Self::Left)
    }
}
