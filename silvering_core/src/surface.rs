// Copyright 2026 the Silvering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface dimensions and integer rectangle math.
//!
//! Every update command the mirror applies is expressed in *surface
//! coordinates* — the remote display's true pixel grid, independent of any
//! local viewport. [`SurfaceDimensions`] is the entity of record for that
//! grid; it changes only when the remote side announces a resize.
//!
//! The pixel format is fixed: one [`Pixel`] per sample, ARGB8888. Color
//! conversion, if any, happens in the protocol layer before pixels reach
//! this crate.

use core::fmt;

/// One sample of the fixed pixel format, ARGB8888 packed into a `u32`.
pub type Pixel = u32;

/// Width and height of the remote display surface, in pixels.
///
/// Mutated only by an explicit surface-resize event. Zero-sized dimensions
/// are representable (a surface can be announced before its first real
/// size); callers are responsible for rejecting nonsensical values from the
/// wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SurfaceDimensions {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
}

impl SurfaceDimensions {
    /// Creates surface dimensions from a width and height.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of pixels on the surface.
    #[inline]
    #[must_use]
    pub const fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns whether the point `(x, y)` lies on the surface.
    #[inline]
    #[must_use]
    pub const fn contains(self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Returns whether `other` fits inside these dimensions on both axes.
    #[inline]
    #[must_use]
    pub const fn covers(self, other: Self) -> bool {
        other.width <= self.width && other.height <= self.height
    }
}

impl fmt::Display for SurfaceDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An axis-aligned rectangle in surface coordinates.
///
/// Describes the extent of a single pending compositing operation (fill,
/// blit, or copy). A rect is well-formed for a surface when
/// `x + width <= surface.width` and `y + height <= surface.height`; the
/// mirror drops ill-formed rects rather than propagating them, to tolerate
/// protocol edge cases near a resize boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SurfaceRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceRect {
    /// Creates a rect from its top-left corner and size.
    #[inline]
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rect covering an entire surface.
    #[inline]
    #[must_use]
    pub const fn from_dims(dims: SurfaceDimensions) -> Self {
        Self::new(0, 0, dims.width, dims.height)
    }

    /// One past the right edge. Widened to `u64` so the sum cannot wrap.
    #[inline]
    #[must_use]
    pub const fn right(self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// One past the bottom edge. Widened to `u64` so the sum cannot wrap.
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Returns whether the rect covers no pixels.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns whether the rect lies entirely within `dims`.
    #[inline]
    #[must_use]
    pub const fn fits_within(self, dims: SurfaceDimensions) -> bool {
        self.right() <= dims.width as u64 && self.bottom() <= dims.height as u64
    }

    /// Intersects two rects. Disjoint rects produce an empty result.
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if (x as u64) >= right || (y as u64) >= bottom {
            return Self::default();
        }
        // The min() above bounds both differences by the narrower rect's
        // width/height, so they fit back into u32.
        #[expect(clippy::cast_possible_truncation, reason = "bounded by operand widths")]
        let (width, height) = ((right - x as u64) as u32, (bottom - y as u64) as u32);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clamps the rect to `dims`, trimming any overhang.
    #[must_use]
    pub fn clamped_to(self, dims: SurfaceDimensions) -> Self {
        self.intersect(Self::from_dims(dims))
    }
}
