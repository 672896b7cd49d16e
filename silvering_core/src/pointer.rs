// Copyright 2026 the Silvering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic pointer marker state.
//!
//! When the remote side does not render its own cursor, the paint cycle
//! overlays a small marker at the last reported pointer position. The state
//! here is purely cosmetic: it has no coupling to the pixel buffer, and it
//! is mutated and read only from the presentation thread.

use crate::surface::{SurfaceDimensions, SurfaceRect};

/// Default side length of the square pointer marker, in surface pixels.
pub const DEFAULT_MARKER_SIZE: u32 = 8;

/// Position, shape, and visibility of the synthetic pointer marker.
///
/// The marker rect is anchored so its *hotspot* (the pixel that clicks)
/// sits at the reported pointer position; for the default square marker the
/// hotspot is the center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerOverlay {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    hot_x: u32,
    hot_y: u32,
    enabled: bool,
}

impl Default for PointerOverlay {
    fn default() -> Self {
        Self::new(
            DEFAULT_MARKER_SIZE,
            DEFAULT_MARKER_SIZE,
            DEFAULT_MARKER_SIZE / 2,
            DEFAULT_MARKER_SIZE / 2,
        )
    }
}

impl PointerOverlay {
    /// Creates a hidden overlay with the given marker shape and hotspot.
    /// The hotspot is clamped into the marker.
    #[must_use]
    pub const fn new(width: u32, height: u32, hot_x: u32, hot_y: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            hot_x: if hot_x < width { hot_x } else { 0 },
            hot_y: if hot_y < height { hot_y } else { 0 },
            enabled: false,
        }
    }

    /// Last reported pointer position (the hotspot), in surface
    /// coordinates.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Whether the marker should be painted.
    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replaces the marker shape, keeping the hotspot at the current
    /// pointer position.
    pub fn set_shape(&mut self, width: u32, height: u32, hot_x: u32, hot_y: u32) {
        self.width = width;
        self.height = height;
        self.hot_x = if hot_x < width { hot_x } else { 0 };
        self.hot_y = if hot_y < height { hot_y } else { 0 };
    }

    /// Records a pointer move and shows the marker. Returns the regions
    /// needing repaint: where the marker was and where it is now.
    pub fn move_to(&mut self, x: u32, y: u32, dims: SurfaceDimensions) -> [SurfaceRect; 2] {
        let before = self.marker_rect(dims);
        self.x = x;
        self.y = y;
        self.enabled = true;
        [before, self.marker_rect(dims)]
    }

    /// Hides the marker, returning the region it occupied.
    pub fn disable(&mut self, dims: SurfaceDimensions) -> SurfaceRect {
        let before = self.marker_rect(dims);
        self.enabled = false;
        before
    }

    /// The marker rectangle, hotspot-anchored at the pointer position and
    /// clamped to the surface. Empty when the marker is hidden.
    #[must_use]
    pub fn marker_rect(&self, dims: SurfaceDimensions) -> SurfaceRect {
        if !self.enabled {
            return SurfaceRect::default();
        }
        let x = self.x.saturating_sub(self.hot_x);
        let y = self.y.saturating_sub(self.hot_y);
        SurfaceRect::new(x, y, self.width, self.height).clamped_to(dims)
    }
}
