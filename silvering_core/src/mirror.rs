// Copyright 2026 the Silvering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mirror: applies update primitives onto the frame buffer.
//!
//! A [`Mirror`] owns a [`FrameBuffer`] and exposes the three update
//! primitives a remote-display protocol decodes to: solid fills, blits of
//! decoded pixel rows, and intra-surface copies. Every successful primitive
//! republishes the touched rectangle to the presentation array and adds it
//! to the accumulated [`Damage`], which the paint side drains once per
//! paint cycle.
//!
//! The drop-and-continue policy lives here: a command whose destination
//! fails the buffer's bounds rules is dropped (and reported as
//! [`ApplyOutcome::Dropped`]) rather than tearing down the session. Bounds
//! violations are expected near a resize boundary, where commands sized for
//! the new surface can arrive before the resize event itself. A drop caused
//! by exhausted capacity also raises the full-update flag so the protocol
//! layer can re-request the whole surface.

use alloc::vec::Vec;

use crate::buffer::{AllocError, FrameBuffer, SizingStrategy};
use crate::surface::{Pixel, SurfaceDimensions, SurfaceRect};
use crate::trace::{DamageFlushEvent, ResizeEvent, Tracer, UpdateEvent, UpdateKind};

/// Rects accumulated past this count escalate to full-surface damage.
/// Beyond it, tracking individual rects costs more than repainting.
const MAX_DAMAGE_RECTS: usize = 64;

/// Row fills narrower than this use a per-pixel loop; wider rows use a
/// bulk slice fill.
const BULK_FILL_MIN_WIDTH: u32 = 10;

/// Whether an update command landed on the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The command was applied (possibly partially, for a blit whose
    /// source data ran short).
    Applied,
    /// The command was dropped without touching the buffer.
    Dropped,
}

/// Accumulated dirty region since the last paint cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Damage {
    /// Nothing changed.
    #[default]
    None,
    /// These rects changed.
    Rects(Vec<SurfaceRect>),
    /// Repaint everything.
    Full,
}

impl Damage {
    /// Records a dirtied rect, escalating to [`Damage::Full`] past the
    /// rect-count limit.
    fn note(&mut self, rect: SurfaceRect) {
        if rect.is_empty() {
            return;
        }
        match self {
            Self::None => *self = Self::Rects(alloc::vec![rect]),
            Self::Rects(rects) => {
                rects.push(rect);
                if rects.len() > MAX_DAMAGE_RECTS {
                    *self = Self::Full;
                }
            }
            Self::Full => {}
        }
    }

    /// Returns whether nothing needs repainting.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Read-only view of the presentation pixels, handed to the paint side.
///
/// Rows are `stride` pixels apart; only the leftmost `dims.width` pixels
/// of each row are meaningful.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    /// The presentation pixel array.
    pub pixels: &'a [Pixel],
    /// Row stride in pixels.
    pub stride: u32,
    /// Current surface dimensions.
    pub dims: SurfaceDimensions,
}

/// A local replica of the remote display surface.
///
/// Single-threaded by itself; [`crate::shared`] wraps it for the two-thread
/// arrangement. A disposed mirror drops every subsequent command, so late
/// updates from a closing session are harmless.
#[derive(Debug)]
pub struct Mirror {
    buffer: FrameBuffer,
    damage: Damage,
    full_update_wanted: bool,
    disposed: bool,
}

impl Mirror {
    /// Creates a mirror for a surface of the given size.
    pub fn new(strategy: SizingStrategy, dims: SurfaceDimensions) -> Result<Self, AllocError> {
        Ok(Self {
            buffer: FrameBuffer::allocate(strategy, dims)?,
            damage: Damage::None,
            full_update_wanted: false,
            disposed: false,
        })
    }

    /// Current surface dimensions.
    #[inline]
    #[must_use]
    pub fn dims(&self) -> SurfaceDimensions {
        self.buffer.dims()
    }

    /// Whether `rect` can currently be drawn. See
    /// [`FrameBuffer::valid_draw`].
    #[inline]
    #[must_use]
    pub fn valid_draw(&self, rect: SurfaceRect) -> bool {
        !self.disposed && self.buffer.valid_draw(rect)
    }

    /// Whether the mirror has been disposed.
    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Fills `rect` with a solid color.
    pub fn fill_rect(
        &mut self,
        rect: SurfaceRect,
        color: Pixel,
        tracer: &mut Tracer<'_>,
    ) -> ApplyOutcome {
        let outcome = self.fill_rect_inner(rect, color);
        tracer.update(&UpdateEvent {
            kind: UpdateKind::Fill,
            rect,
            outcome,
        });
        outcome
    }

    fn fill_rect_inner(&mut self, rect: SurfaceRect, color: Pixel) -> ApplyOutcome {
        if self.disposed || rect.is_empty() {
            return ApplyOutcome::Dropped;
        }
        if !self.buffer.valid_draw(rect) {
            self.full_update_wanted = true;
            return ApplyOutcome::Dropped;
        }
        if !rect.fits_within(self.buffer.storage_dims()) {
            return ApplyOutcome::Dropped;
        }
        let stride = self.buffer.stride() as usize;
        let width = rect.width as usize;
        let start = self.buffer.offset(rect.x, rect.y);
        let pixels = self.buffer.pixels_mut();
        if rect.width > BULK_FILL_MIN_WIDTH {
            for row in 0..rect.height as usize {
                let at = start + row * stride;
                pixels[at..at + width].fill(color);
            }
        } else {
            // Narrow fills skip the slice machinery.
            for row in 0..rect.height as usize {
                let at = start + row * stride;
                for px in &mut pixels[at..at + width] {
                    *px = color;
                }
            }
        }
        self.committed(rect);
        ApplyOutcome::Applied
    }

    /// Blits decoded pixel rows into `rect`.
    ///
    /// `src` holds `rect.width`-pixel rows, tightly packed. Rows that would
    /// land below the storage area are skipped; processing stops early if
    /// `src` runs short. Either way the rows that did land are published,
    /// so a truncated blit still shows its partial content.
    pub fn blit_rect(
        &mut self,
        rect: SurfaceRect,
        src: &[Pixel],
        tracer: &mut Tracer<'_>,
    ) -> ApplyOutcome {
        let outcome = self.blit_rect_inner(rect, src);
        tracer.update(&UpdateEvent {
            kind: UpdateKind::Blit,
            rect,
            outcome,
        });
        outcome
    }

    fn blit_rect_inner(&mut self, rect: SurfaceRect, src: &[Pixel]) -> ApplyOutcome {
        if self.disposed || rect.is_empty() {
            return ApplyOutcome::Dropped;
        }
        if !self.buffer.valid_draw(rect) {
            self.full_update_wanted = true;
            return ApplyOutcome::Dropped;
        }
        let storage = self.buffer.storage_dims();
        if rect.right() > u64::from(storage.width) {
            return ApplyOutcome::Dropped;
        }
        let stride = self.buffer.stride() as usize;
        let width = rect.width as usize;
        let mut applied_rows = 0;
        {
            let start = self.buffer.offset(rect.x, rect.y);
            let pixels = self.buffer.pixels_mut();
            for row in 0..rect.height {
                let from = row as usize * width;
                if from + width > src.len() {
                    break;
                }
                if rect.y + row >= storage.height {
                    continue;
                }
                let at = start + row as usize * stride;
                pixels[at..at + width].copy_from_slice(&src[from..from + width]);
                applied_rows = row + 1;
            }
        }
        if applied_rows == 0 {
            return ApplyOutcome::Dropped;
        }
        self.committed(SurfaceRect::new(rect.x, rect.y, rect.width, applied_rows));
        ApplyOutcome::Applied
    }

    /// Copies the `dst`-sized region at `(src_x, src_y)` to `dst`.
    ///
    /// Overlapping regions copy with memmove semantics: row order is
    /// chosen so source rows are read before this copy overwrites them,
    /// and within a row the per-row copy handles overlap itself.
    pub fn copy_rect(
        &mut self,
        src_x: u32,
        src_y: u32,
        dst: SurfaceRect,
        tracer: &mut Tracer<'_>,
    ) -> ApplyOutcome {
        let outcome = self.copy_rect_inner(src_x, src_y, dst);
        tracer.update(&UpdateEvent {
            kind: UpdateKind::Copy,
            rect: dst,
            outcome,
        });
        outcome
    }

    fn copy_rect_inner(&mut self, src_x: u32, src_y: u32, dst: SurfaceRect) -> ApplyOutcome {
        if self.disposed || dst.is_empty() {
            return ApplyOutcome::Dropped;
        }
        let src = SurfaceRect::new(src_x, src_y, dst.width, dst.height);
        if !self.buffer.valid_draw(src) || !self.buffer.valid_draw(dst) {
            self.full_update_wanted = true;
            return ApplyOutcome::Dropped;
        }
        let storage = self.buffer.storage_dims();
        if !src.fits_within(storage) || !dst.fits_within(storage) {
            return ApplyOutcome::Dropped;
        }
        let stride = self.buffer.stride() as usize;
        let width = dst.width as usize;
        let src_start = self.buffer.offset(src_x, src_y);
        let dst_start = self.buffer.offset(dst.x, dst.y);
        let pixels = self.buffer.pixels_mut();
        let copy_row = |pixels: &mut [Pixel], row: usize| {
            let from = src_start + row * stride;
            let to = dst_start + row * stride;
            pixels.copy_within(from..from + width, to);
        };
        if src_y > dst.y {
            // Moving content up: walk top to bottom so each source row is
            // still unmodified when read.
            for row in 0..dst.height as usize {
                copy_row(pixels, row);
            }
        } else {
            // Moving content down (or sideways): walk bottom to top.
            for row in (0..dst.height as usize).rev() {
                copy_row(pixels, row);
            }
        }
        self.committed(dst);
        ApplyOutcome::Applied
    }

    /// Adopts a new surface size announced by the remote side.
    ///
    /// Storage is rebuilt to the side and swapped in whole, so the paint
    /// side (synchronized by the caller's lock) never sees a torn resize.
    /// The whole surface is marked damaged and a full update is requested,
    /// since even a size-preserving reallocation leaves contents stale.
    pub fn surface_resized(
        &mut self,
        new: SurfaceDimensions,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), AllocError> {
        if self.disposed {
            return Ok(());
        }
        let old = self.buffer.dims();
        self.buffer.resize(new)?;
        self.damage = Damage::Full;
        self.full_update_wanted = true;
        tracer.resize(&ResizeEvent { old, new });
        Ok(())
    }

    /// Takes the accumulated damage, leaving the mirror clean.
    pub fn take_damage(&mut self, tracer: &mut Tracer<'_>) -> Damage {
        let damage = core::mem::take(&mut self.damage);
        #[expect(clippy::cast_possible_truncation, reason = "rect count is bounded")]
        tracer.damage_flush(&DamageFlushEvent {
            full: matches!(damage, Damage::Full),
            rects: match &damage {
                Damage::Rects(rects) => rects.len() as u32,
                _ => 0,
            },
        });
        damage
    }

    /// Takes the full-update request flag, if raised.
    ///
    /// The protocol layer polls this once per incoming message and sends a
    /// non-incremental update request when it returns `true`.
    pub fn take_full_update_request(&mut self) -> bool {
        core::mem::replace(&mut self.full_update_wanted, false)
    }

    /// A read-only view of the presentation pixels for painting.
    #[must_use]
    pub fn frame(&self) -> FrameView<'_> {
        FrameView {
            pixels: self.buffer.shown(),
            stride: self.buffer.stride(),
            dims: self.buffer.dims(),
        }
    }

    /// Releases pixel storage and drops all further commands. Idempotent.
    pub fn dispose(&mut self) {
        self.buffer.release();
        self.damage = Damage::None;
        self.disposed = true;
    }

    /// Publishes `rect` and records it as damaged.
    fn committed(&mut self, rect: SurfaceRect) {
        self.buffer.publish(rect);
        // Damage is reported in visible coordinates; capacity-area writes
        // beyond the surface produce none.
        self.damage.note(rect.clamped_to(self.buffer.dims()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::CapacityPolicy;

    fn mirror(w: u32, h: u32) -> Mirror {
        Mirror::new(SizingStrategy::ExactFit, SurfaceDimensions::new(w, h)).unwrap()
    }

    fn shown_at(m: &Mirror, x: u32, y: u32) -> Pixel {
        let view = m.frame();
        view.pixels[y as usize * view.stride as usize + x as usize]
    }

    #[test]
    fn fill_lands_and_publishes() {
        let mut m = mirror(8, 8);
        let mut t = Tracer::none();
        let outcome = m.fill_rect(SurfaceRect::new(2, 2, 3, 3), 0xFF00_00FF, &mut t);
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(shown_at(&m, 2, 2), 0xFF00_00FF);
        assert_eq!(shown_at(&m, 4, 4), 0xFF00_00FF);
        assert_eq!(shown_at(&m, 5, 5), 0, "outside the rect stays untouched");
    }

    #[test]
    fn wide_and_narrow_fills_agree() {
        // Both sides of the bulk-fill threshold must produce identical
        // results.
        let mut narrow = mirror(30, 4);
        let mut wide = mirror(30, 4);
        let mut t = Tracer::none();
        narrow.fill_rect(SurfaceRect::new(0, 0, 10, 4), 5, &mut t);
        wide.fill_rect(SurfaceRect::new(0, 0, 11, 4), 5, &mut t);
        for x in 0..10 {
            assert_eq!(shown_at(&narrow, x, 3), 5);
            assert_eq!(shown_at(&wide, x, 3), 5);
        }
        assert_eq!(shown_at(&wide, 10, 3), 5);
    }

    #[test]
    fn out_of_bounds_fill_is_dropped() {
        let mut m = mirror(8, 8);
        let mut t = Tracer::none();
        let outcome = m.fill_rect(SurfaceRect::new(6, 6, 4, 4), 1, &mut t);
        assert_eq!(outcome, ApplyOutcome::Dropped);
        assert_eq!(shown_at(&m, 6, 6), 0);
        // The mirror stays usable afterwards.
        assert_eq!(
            m.fill_rect(SurfaceRect::new(0, 0, 2, 2), 2, &mut t),
            ApplyOutcome::Applied
        );
    }

    #[test]
    fn blit_places_rows() {
        let mut m = mirror(6, 4);
        let mut t = Tracer::none();
        let src = [1, 2, 3, 4, 5, 6];
        let outcome = m.blit_rect(SurfaceRect::new(1, 1, 3, 2), &src, &mut t);
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(shown_at(&m, 1, 1), 1);
        assert_eq!(shown_at(&m, 3, 1), 3);
        assert_eq!(shown_at(&m, 1, 2), 4);
        assert_eq!(shown_at(&m, 3, 2), 6);
    }

    #[test]
    fn blit_truncates_on_short_source() {
        let mut m = mirror(4, 4);
        let mut t = Tracer::none();
        // Two full rows of data for a three-row rect.
        let src = [9; 8];
        let outcome = m.blit_rect(SurfaceRect::new(0, 0, 4, 3), &src, &mut t);
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(shown_at(&m, 0, 1), 9);
        assert_eq!(shown_at(&m, 0, 2), 0, "row without data stays untouched");
    }

    #[test]
    fn blit_skips_rows_below_storage() {
        let mut m = mirror(4, 4);
        let mut t = Tracer::none();
        let src = [7; 16];
        // Bottom two rows hang below the surface.
        let outcome = m.blit_rect(SurfaceRect::new(0, 2, 4, 4), &src, &mut t);
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(shown_at(&m, 0, 2), 7);
        assert_eq!(shown_at(&m, 3, 3), 7);
    }

    #[test]
    fn copy_moves_content_up() {
        let mut m = mirror(4, 6);
        let mut t = Tracer::none();
        m.fill_rect(SurfaceRect::new(0, 3, 4, 1), 8, &mut t);
        // Scroll up by two rows over an overlapping range.
        let outcome = m.copy_rect(0, 2, SurfaceRect::new(0, 0, 4, 4), &mut t);
        assert_eq!(outcome, ApplyOutcome::Applied);
        // Top-to-bottom ordering reads row 3 before the scrolled-in rows
        // overwrite it.
        assert_eq!(shown_at(&m, 0, 1), 8, "row 3 arrives at row 1");
        assert_eq!(shown_at(&m, 0, 3), 0, "row 5 scrolls in over row 3");
    }

    #[test]
    fn copy_moves_content_down() {
        let mut m = mirror(4, 6);
        let mut t = Tracer::none();
        m.fill_rect(SurfaceRect::new(0, 1, 4, 1), 8, &mut t);
        // Scroll down by two rows over an overlapping range.
        let outcome = m.copy_rect(0, 0, SurfaceRect::new(0, 2, 4, 4), &mut t);
        assert_eq!(outcome, ApplyOutcome::Applied);
        // Bottom-to-top ordering reads row 3 (now holding row 1's content)
        // only after row 5 took its value from the original row 3.
        assert_eq!(shown_at(&m, 0, 3), 8, "row 1 arrives at row 3");
        assert_eq!(shown_at(&m, 0, 1), 8, "row above the window is untouched");
        assert_eq!(shown_at(&m, 0, 5), 0, "row 3 was still empty when read");
    }

    #[test]
    fn overlapping_copy_preserves_each_row() {
        let mut m = mirror(8, 1);
        let mut t = Tracer::none();
        let src: alloc::vec::Vec<Pixel> = (1..=8).collect();
        m.blit_rect(SurfaceRect::new(0, 0, 8, 1), &src, &mut t);
        // Shift right by two within the same row.
        m.copy_rect(0, 0, SurfaceRect::new(2, 0, 6, 1), &mut t);
        for x in 0..6 {
            assert_eq!(shown_at(&m, x + 2, 0), src[x as usize], "column {x}");
        }
    }

    #[test]
    fn overlapping_copy_matches_copy_through_scratch() {
        let mut t = Tracer::none();
        let mut direct = mirror(16, 16);
        let mut scratch = mirror(16, 16);
        let src: alloc::vec::Vec<Pixel> = (0..16 * 16).collect();
        direct.blit_rect(SurfaceRect::new(0, 0, 16, 16), &src, &mut t);
        scratch.blit_rect(SurfaceRect::new(0, 0, 16, 16), &src, &mut t);

        let region = SurfaceRect::new(3, 5, 10, 8);
        direct.copy_rect(1, 2, region, &mut t);

        // The same copy staged through a detached snapshot of the source.
        let mut staged = alloc::vec::Vec::new();
        {
            let view = scratch.frame();
            for row in 0..region.height {
                let at = (2 + row) as usize * view.stride as usize + 1;
                staged.extend_from_slice(&view.pixels[at..at + region.width as usize]);
            }
        }
        scratch.blit_rect(region, &staged, &mut t);

        let a = direct.frame();
        let b = scratch.frame();
        assert_eq!(a.pixels, b.pixels, "overlap handling changes nothing");
    }

    #[test]
    fn blit_after_shrink_is_dropped() {
        let mut m = mirror(16, 16);
        let mut t = Tracer::none();
        m.surface_resized(SurfaceDimensions::new(8, 8), &mut t)
            .unwrap();
        let src = [1; 16];
        // Sized for the old surface: wider than the shrunk one.
        let outcome = m.blit_rect(SurfaceRect::new(10, 0, 4, 4), &src, &mut t);
        assert_eq!(outcome, ApplyOutcome::Dropped);
        // In-bounds updates keep flowing.
        assert_eq!(
            m.blit_rect(SurfaceRect::new(0, 0, 4, 4), &src, &mut t),
            ApplyOutcome::Applied
        );
    }

    #[test]
    fn capacity_overflow_raises_full_update_request() {
        let policy = CapacityPolicy {
            reserve_factor: 1.0,
        };
        let mut m = Mirror::new(
            SizingStrategy::Capacity(policy),
            SurfaceDimensions::new(8, 8),
        )
        .unwrap();
        let mut t = Tracer::none();
        assert!(!m.take_full_update_request());
        let outcome = m.fill_rect(SurfaceRect::new(0, 0, 16, 16), 1, &mut t);
        assert_eq!(outcome, ApplyOutcome::Dropped);
        assert!(m.take_full_update_request());
        assert!(!m.take_full_update_request(), "flag is taken, not peeked");
    }

    #[test]
    fn capacity_write_beyond_surface_is_held_back() {
        let policy = CapacityPolicy {
            reserve_factor: 2.0,
        };
        let mut m = Mirror::new(
            SizingStrategy::Capacity(policy),
            SurfaceDimensions::new(4, 4),
        )
        .unwrap();
        let mut t = Tracer::none();
        // In capacity but beyond the surface: applied, no visible damage.
        let outcome = m.fill_rect(SurfaceRect::new(4, 0, 4, 4), 3, &mut t);
        assert_eq!(outcome, ApplyOutcome::Applied);
        assert!(m.take_damage(&mut t).is_clean());
        // After growth the region becomes visible without a new draw.
        m.surface_resized(SurfaceDimensions::new(8, 8), &mut t)
            .unwrap();
        m.fill_rect(SurfaceRect::new(4, 0, 4, 4), 3, &mut t);
        assert_eq!(shown_at(&m, 5, 1), 3);
    }

    #[test]
    fn damage_accumulates_and_drains() {
        let mut m = mirror(16, 16);
        let mut t = Tracer::none();
        assert!(m.take_damage(&mut t).is_clean());
        m.fill_rect(SurfaceRect::new(0, 0, 2, 2), 1, &mut t);
        m.fill_rect(SurfaceRect::new(4, 4, 2, 2), 1, &mut t);
        match m.take_damage(&mut t) {
            Damage::Rects(rects) => assert_eq!(rects.len(), 2, "two rects recorded"),
            other => panic!("expected rects, got {other:?}"),
        }
        assert!(m.take_damage(&mut t).is_clean());
    }

    #[test]
    fn damage_escalates_to_full() {
        let mut m = mirror(256, 256);
        let mut t = Tracer::none();
        let limit = u32::try_from(MAX_DAMAGE_RECTS).unwrap();
        for i in 0..=limit {
            m.fill_rect(SurfaceRect::new(i % 200, i % 200, 1, 1), 1, &mut t);
        }
        assert_eq!(m.take_damage(&mut t), Damage::Full);
    }

    #[test]
    fn resize_marks_full_damage_and_requests_update() {
        let mut m = mirror(8, 8);
        let mut t = Tracer::none();
        m.surface_resized(SurfaceDimensions::new(16, 16), &mut t)
            .unwrap();
        assert_eq!(m.dims(), SurfaceDimensions::new(16, 16));
        assert_eq!(m.take_damage(&mut t), Damage::Full);
        assert!(m.take_full_update_request());
        // The grown area is drawable immediately.
        assert_eq!(
            m.fill_rect(SurfaceRect::new(12, 12, 4, 4), 1, &mut t),
            ApplyOutcome::Applied
        );
    }

    #[test]
    fn disposed_mirror_drops_everything() {
        let mut m = mirror(8, 8);
        let mut t = Tracer::none();
        m.dispose();
        m.dispose();
        assert!(m.is_disposed());
        assert_eq!(
            m.fill_rect(SurfaceRect::new(0, 0, 2, 2), 1, &mut t),
            ApplyOutcome::Dropped
        );
        assert_eq!(
            m.copy_rect(0, 0, SurfaceRect::new(0, 0, 1, 1), &mut t),
            ApplyOutcome::Dropped
        );
        assert!(m.frame().pixels.is_empty());
        assert!(m.surface_resized(SurfaceDimensions::new(4, 4), &mut t).is_ok());
    }

    #[test]
    fn tracer_sees_outcomes() {
        struct Recorder {
            events: alloc::vec::Vec<(UpdateKind, ApplyOutcome)>,
        }
        impl crate::trace::TraceSink for Recorder {
            fn on_update(&mut self, e: &UpdateEvent) {
                self.events.push((e.kind, e.outcome));
            }
        }
        let mut sink = Recorder {
            events: alloc::vec::Vec::new(),
        };
        let mut m = mirror(8, 8);
        {
            let mut t = Tracer::new(&mut sink);
            m.fill_rect(SurfaceRect::new(0, 0, 2, 2), 1, &mut t);
            m.fill_rect(SurfaceRect::new(6, 6, 4, 4), 1, &mut t);
        }
        if cfg!(feature = "trace") {
            assert_eq!(
                sink.events,
                &[
                    (UpdateKind::Fill, ApplyOutcome::Applied),
                    (UpdateKind::Fill, ApplyOutcome::Dropped),
                ]
            );
        } else {
            assert!(sink.events.is_empty());
        }
    }
}
