// Copyright 2026 the Silvering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builds the paint plan for one cycle from viewport and pointer state.

use kurbo::Rect;
use silvering_core::pointer::PointerOverlay;
use silvering_core::surface::{Pixel, SurfaceRect};
use silvering_core::viewport::Viewport;

use crate::plan::{PaintOp, PaintPlan};

/// Outer outline and core color of the pointer marker.
const OVERLAY_LIGHT: Pixel = 0xFFFF_FFFF;
/// Middle ring color of the pointer marker.
const OVERLAY_DARK: Pixel = 0xFF00_0000;

/// Plans one paint cycle.
///
/// The body of the plan is a single blit of the visible surface window at
/// the viewport's origin — the whole surface in fit-to-screen mode, the
/// per-axis clamped window in the panning modes. If the synthetic pointer
/// is enabled and its marker intersects the visible window, the marker is
/// appended as concentric light/dark/light fills under a clip, so it stays
/// visible over both light and dark remote content.
#[must_use]
pub fn plan_frame(viewport: &Viewport, pointer: &PointerOverlay) -> PaintPlan {
    let mut plan = PaintPlan::new();
    let visible = viewport.visible_rect();
    let dst = viewport.surface_to_presentation(f64::from(visible.x), f64::from(visible.y));
    plan.ops.push(PaintOp::Blit {
        src: visible,
        dst,
        scale: viewport.scale(),
    });

    if pointer.is_enabled() {
        let marker = pointer.marker_rect(viewport.surface());
        let clip = marker.intersect(visible);
        if !clip.is_empty() {
            plan.overlay_clip = Some(presentation_rect(viewport, clip));
            for (inset, color) in [(0, OVERLAY_LIGHT), (1, OVERLAY_DARK), (2, OVERLAY_LIGHT)] {
                let layer = shrink(marker, inset);
                if layer.is_empty() {
                    break;
                }
                plan.ops.push(PaintOp::Fill {
                    rect: presentation_rect(viewport, layer),
                    color,
                });
            }
        }
    }
    plan
}

/// Maps a surface rect through the viewport transform.
fn presentation_rect(viewport: &Viewport, rect: SurfaceRect) -> Rect {
    let p0 = viewport.surface_to_presentation(f64::from(rect.x), f64::from(rect.y));
    #[expect(clippy::cast_precision_loss, reason = "surface extents are far below 2^52")]
    let p1 = viewport.surface_to_presentation(rect.right() as f64, rect.bottom() as f64);
    Rect::new(p0.x, p0.y, p1.x, p1.y)
}

/// Shrinks a rect by `n` pixels on every side.
fn shrink(rect: SurfaceRect, n: u32) -> SurfaceRect {
    SurfaceRect::new(
        rect.x + n,
        rect.y + n,
        rect.width.saturating_sub(2 * n),
        rect.height.saturating_sub(2 * n),
    )
}
