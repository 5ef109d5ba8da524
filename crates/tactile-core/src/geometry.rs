#![forbid(unsafe_code)]

//! Geometric primitives and threshold helpers.
//!
//! Positions are physical pixels with the origin at the top-left of the
//! viewport. Distances that are specified in density-independent units go
//! through [`Density`] before being compared with pointer deltas.
//!
//! # Invariants
//!
//! 1. [`Density::dp`] rounds half away from zero, so `dp(-x) == -dp(x)`.
//! 2. [`LayoutDirection::edge_for`] and [`LayoutDirection::direction_for`] are
//!    inverses for both layout directions.
//! 3. [`exceeds_slop`] is symmetric in the sign of the delta.

/// A point in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`.
    #[inline]
    #[must_use]
    pub fn delta_from(self, origin: Point) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// A measured size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Display density: physical pixels per density-independent unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Density {
    scale: f32,
}

impl Default for Density {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Density {
    /// Create a density. Non-finite or non-positive scales fall back to 1.0.
    #[must_use]
    pub fn new(scale: f32) -> Self {
        if scale.is_finite() && scale > 0.0 {
            Self { scale }
        } else {
            Self::default()
        }
    }

    /// The scale factor.
    #[inline]
    #[must_use]
    pub fn scale(self) -> f32 {
        self.scale
    }

    /// Convert to fractional pixels.
    #[inline]
    #[must_use]
    pub fn dpf(self, size: f32) -> f32 {
        size * self.scale
    }

    /// Convert to whole pixels, rounding half away from zero.
    #[inline]
    #[must_use]
    pub fn dp(self, size: f32) -> i32 {
        round_half_away(self.dpf(size))
    }

    /// Convert to whole pixels using at most `max_scale` as the factor.
    ///
    /// Used for velocity thresholds that must not grow on very dense screens.
    #[must_use]
    pub fn dp_capped(self, size: f32, max_scale: f32) -> i32 {
        round_half_away(size * self.scale.min(max_scale))
    }
}

fn round_half_away(f: f32) -> i32 {
    if f >= 0.0 {
        (f + 0.5) as i32
    } else {
        (f - 0.5) as i32
    }
}

/// Whether `delta` has travelled at least `slop` in either direction.
#[inline]
#[must_use]
pub fn exceeds_slop(delta: f32, slop: f32) -> bool {
    delta.abs() >= slop
}

// ---------------------------------------------------------------------------
// Directions
// ---------------------------------------------------------------------------

/// Text direction of the hosting layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left (mirrored).
    Rtl,
}

/// Physical direction of a horizontal drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalDirection {
    /// Toward the left screen edge (negative dx).
    Left,
    /// Toward the right screen edge (positive dx).
    Right,
}

impl HorizontalDirection {
    /// Direction of a signed horizontal delta, `None` for zero.
    #[must_use]
    pub fn from_dx(dx: f32) -> Option<Self> {
        if dx < 0.0 {
            Some(Self::Left)
        } else if dx > 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Logical swipe edge, independent of text direction.
///
/// The start edge carries reply and quick-reaction; the end edge carries
/// share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeEdge {
    /// Reply / quick-react side. A leftward swipe under LTR.
    Start,
    /// Share side. A rightward swipe under LTR.
    End,
}

impl LayoutDirection {
    /// The logical edge a physical drag direction resolves to.
    #[must_use]
    pub fn edge_for(self, direction: HorizontalDirection) -> SwipeEdge {
        match (self, direction) {
            (Self::Ltr, HorizontalDirection::Left) | (Self::Rtl, HorizontalDirection::Right) => {
                SwipeEdge::Start
            }
            (Self::Ltr, HorizontalDirection::Right) | (Self::Rtl, HorizontalDirection::Left) => {
                SwipeEdge::End
            }
        }
    }

    /// The physical drag direction that resolves to `edge`.
    #[must_use]
    pub fn direction_for(self, edge: SwipeEdge) -> HorizontalDirection {
        match (self, edge) {
            (Self::Ltr, SwipeEdge::Start) | (Self::Rtl, SwipeEdge::End) => HorizontalDirection::Left,
            (Self::Ltr, SwipeEdge::End) | (Self::Rtl, SwipeEdge::Start) => HorizontalDirection::Right,
        }
    }

    /// Whether this is the mirrored layout.
    #[inline]
    #[must_use]
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}
