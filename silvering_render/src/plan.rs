// Copyright 2026 the Silvering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint plan: the ordered draw commands for one paint cycle.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use silvering_core::surface::{Pixel, SurfaceRect};

/// A single draw command in the paint plan.
///
/// Ops are produced in paint order; later ops draw over earlier ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaintOp {
    /// Draw a surface sub-rectangle scaled into the presentation area.
    Blit {
        /// Source rectangle in surface coordinates.
        src: SurfaceRect,
        /// Presentation-space position of the source rect's top-left
        /// corner.
        dst: Point,
        /// Scale applied to the source.
        scale: f64,
    },
    /// Fill a presentation-space rectangle with a solid color.
    Fill {
        /// Destination rectangle in presentation coordinates.
        rect: Rect,
        /// Fill color, ARGB8888.
        color: Pixel,
    },
}

/// The ordered draw commands for a single paint cycle.
///
/// Backends translate this into native blit and fill calls; nothing in the
/// plan borrows mirror state, so it can outlive the lock it was built
/// under.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaintPlan {
    /// Draw commands in paint order.
    pub ops: Vec<PaintOp>,
    /// Clip applied to the pointer-overlay fills, in presentation
    /// coordinates. `None` when no overlay is drawn.
    pub overlay_clip: Option<Rect>,
}

impl PaintPlan {
    /// Creates an empty plan.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ops: Vec::new(),
            overlay_clip: None,
        }
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.overlay_clip = None;
    }
}
