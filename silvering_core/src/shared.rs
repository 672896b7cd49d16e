// Copyright 2026 the Silvering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two-thread mirror handle.
//!
//! [`SharedMirror`] is the single point of shared mutable state between the
//! network thread (which applies decoded [`UpdateOp`]s) and the
//! presentation thread (which borrows a [`FrameView`] to paint). Both sides
//! hold clones of the same handle; a `Mutex` around the [`Mirror`] is the
//! entire synchronization story.
//!
//! The critical ordering this module guarantees: a resize rebuilds storage
//! and swaps it in while holding the lock, so a paint that races a resize
//! observes either the fully-old or the fully-new buffer, never a torn one.
//! Updates decoded against the new size that arrive before the resize event
//! fall out as drops, which is why the network side forwards the
//! full-update request the mirror raises afterwards.
//!
//! No operation blocks beyond the mutex; every call is synchronous and
//! bounded by buffer size.

use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::buffer::{AllocError, SizingStrategy};
use crate::mirror::{ApplyOutcome, Damage, FrameView, Mirror};
use crate::surface::{Pixel, SurfaceDimensions, SurfaceRect};
use crate::trace::Tracer;

/// A decoded update primitive, as produced by the protocol layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOp {
    /// Fill a rectangle with a solid color.
    Fill {
        /// Destination rectangle.
        rect: SurfaceRect,
        /// Fill color.
        color: Pixel,
    },
    /// Blit decoded pixel rows into a rectangle.
    Blit {
        /// Destination rectangle.
        rect: SurfaceRect,
        /// `rect.width`-pixel rows, tightly packed.
        pixels: Vec<Pixel>,
    },
    /// Copy an equally-sized region from elsewhere on the surface.
    Copy {
        /// Source left edge.
        src_x: u32,
        /// Source top edge.
        src_y: u32,
        /// Destination rectangle; also gives the extent.
        dst: SurfaceRect,
    },
    /// Adopt a new surface size.
    Resize {
        /// The new surface dimensions.
        dims: SurfaceDimensions,
    },
}

/// The channel back to the remote side for update requests.
///
/// Implemented by the protocol layer. `incremental = false` asks for the
/// whole surface; the mirror needs that after capacity overflow or a
/// resize, when its copy can no longer be patched forward.
pub trait UpdateSource {
    /// Requests the next framebuffer update from the remote side.
    fn request_update(&mut self, incremental: bool);
}

/// Cloneable handle to a mutex-guarded [`Mirror`].
#[derive(Clone, Debug)]
pub struct SharedMirror {
    inner: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    mirror: Mutex<Mirror>,
    disposed: AtomicBool,
}

impl SharedMirror {
    /// Creates a mirror and wraps it for sharing.
    pub fn new(strategy: SizingStrategy, dims: SurfaceDimensions) -> Result<Self, AllocError> {
        Ok(Self {
            inner: Arc::new(Shared {
                mirror: Mutex::new(Mirror::new(strategy, dims)?),
                disposed: AtomicBool::new(false),
            }),
        })
    }

    /// Applies one decoded update.
    ///
    /// Drops and capacity overflows are absorbed here: after the op, any
    /// full-update request the mirror raised is forwarded to `source` as a
    /// non-incremental request. Only allocation failure (during a resize)
    /// surfaces, and it is fatal to the mirror.
    pub fn apply(
        &self,
        op: &UpdateOp,
        source: &mut dyn UpdateSource,
        tracer: &mut Tracer<'_>,
    ) -> Result<ApplyOutcome, AllocError> {
        if self.inner.disposed.load(Ordering::Acquire) {
            return Ok(ApplyOutcome::Dropped);
        }
        let Ok(mut mirror) = self.inner.mirror.lock() else {
            // A poisoned lock means a writer panicked mid-update; the
            // session is over for this mirror.
            return Ok(ApplyOutcome::Dropped);
        };
        let outcome = match op {
            UpdateOp::Fill { rect, color } => mirror.fill_rect(*rect, *color, tracer),
            UpdateOp::Blit { rect, pixels } => mirror.blit_rect(*rect, pixels, tracer),
            UpdateOp::Copy { src_x, src_y, dst } => mirror.copy_rect(*src_x, *src_y, *dst, tracer),
            UpdateOp::Resize { dims } => {
                mirror.surface_resized(*dims, tracer)?;
                ApplyOutcome::Applied
            }
        };
        if mirror.take_full_update_request() {
            source.request_update(false);
        }
        Ok(outcome)
    }

    /// Borrows the presentation pixels and the damage accumulated since
    /// the last paint, for the duration of one paint cycle.
    ///
    /// Returns `None` when the mirror is disposed. The lock is held while
    /// `paint` runs; keep paint bodies short.
    pub fn with_frame<R>(
        &self,
        tracer: &mut Tracer<'_>,
        paint: impl FnOnce(FrameView<'_>, Damage) -> R,
    ) -> Option<R> {
        if self.inner.disposed.load(Ordering::Acquire) {
            return None;
        }
        let Ok(mut mirror) = self.inner.mirror.lock() else {
            return None;
        };
        let damage = mirror.take_damage(tracer);
        Some(paint(mirror.frame(), damage))
    }

    /// Current surface dimensions, or `None` once disposed.
    #[must_use]
    pub fn dims(&self) -> Option<SurfaceDimensions> {
        if self.inner.disposed.load(Ordering::Acquire) {
            return None;
        }
        let Ok(mirror) = self.inner.mirror.lock() else {
            return None;
        };
        Some(mirror.dims())
    }

    /// Whether either handle has disposed the mirror.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }

    /// Releases pixel storage. Every subsequent operation on any clone of
    /// this handle no-ops. Idempotent.
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::Release);
        if let Ok(mut mirror) = self.inner.mirror.lock() {
            mirror.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    struct RequestLog {
        requests: Vec<bool>,
    }

    impl RequestLog {
        fn new() -> Self {
            Self {
                requests: Vec::new(),
            }
        }
    }

    impl UpdateSource for RequestLog {
        fn request_update(&mut self, incremental: bool) {
            self.requests.push(incremental);
        }
    }

    fn shared(w: u32, h: u32) -> SharedMirror {
        SharedMirror::new(SizingStrategy::ExactFit, SurfaceDimensions::new(w, h)).unwrap()
    }

    #[test]
    fn apply_and_paint_through_the_handle() {
        let m = shared(8, 8);
        let mut source = RequestLog::new();
        let mut t = Tracer::none();
        let outcome = m
            .apply(
                &UpdateOp::Fill {
                    rect: SurfaceRect::new(0, 0, 8, 8),
                    color: 0xFFFF_FFFF,
                },
                &mut source,
                &mut t,
            )
            .unwrap();
        assert_eq!(outcome, ApplyOutcome::Applied);
        let seen = m
            .with_frame(&mut t, |view, damage| {
                assert!(!damage.is_clean(), "fill produced damage");
                view.pixels[0]
            })
            .unwrap();
        assert_eq!(seen, 0xFFFF_FFFF);
        assert!(source.requests.is_empty());
    }

    #[test]
    fn resize_is_whole_under_the_lock() {
        let m = shared(4, 4);
        let mut source = RequestLog::new();
        let mut t = Tracer::none();
        m.apply(
            &UpdateOp::Resize {
                dims: SurfaceDimensions::new(64, 64),
            },
            &mut source,
            &mut t,
        )
        .unwrap();
        assert_eq!(source.requests, &[false], "resize requests a full update");
        // A reader after the resize sees consistent dims and storage.
        m.with_frame(&mut t, |view, damage| {
            assert_eq!(view.dims, SurfaceDimensions::new(64, 64));
            assert_eq!(view.pixels.len(), 64 * 64);
            assert_eq!(damage, Damage::Full);
        })
        .unwrap();
    }

    #[test]
    fn capacity_overflow_is_forwarded_as_full_request() {
        use crate::buffer::CapacityPolicy;
        let m = SharedMirror::new(
            SizingStrategy::Capacity(CapacityPolicy {
                reserve_factor: 1.0,
            }),
            SurfaceDimensions::new(8, 8),
        )
        .unwrap();
        let mut source = RequestLog::new();
        let mut t = Tracer::none();
        let outcome = m
            .apply(
                &UpdateOp::Fill {
                    rect: SurfaceRect::new(0, 0, 16, 16),
                    color: 1,
                },
                &mut source,
                &mut t,
            )
            .unwrap();
        assert_eq!(outcome, ApplyOutcome::Dropped);
        assert_eq!(source.requests, &[false]);
    }

    #[test]
    fn dispose_stops_both_sides() {
        let m = shared(8, 8);
        let reader = m.clone();
        m.dispose();
        m.dispose();
        let mut source = RequestLog::new();
        let mut t = Tracer::none();
        let outcome = m
            .apply(
                &UpdateOp::Fill {
                    rect: SurfaceRect::new(0, 0, 2, 2),
                    color: 1,
                },
                &mut source,
                &mut t,
            )
            .unwrap();
        assert_eq!(outcome, ApplyOutcome::Dropped);
        assert!(reader.with_frame(&mut t, |_, _| ()).is_none());
        assert!(reader.dims().is_none());
        assert!(reader.is_disposed());
    }

    #[test]
    fn concurrent_writer_and_reader_stay_consistent() {
        let m = shared(64, 64);
        let writer = m.clone();
        let handle = thread::spawn(move || {
            let mut source = RequestLog::new();
            let mut t = Tracer::none();
            for i in 0..200 {
                writer
                    .apply(
                        &UpdateOp::Fill {
                            rect: SurfaceRect::new(i % 32, i % 32, 16, 16),
                            color: 0xFF00_0000 | i,
                        },
                        &mut source,
                        &mut t,
                    )
                    .unwrap();
            }
        });
        let mut t = Tracer::none();
        for _ in 0..200 {
            m.with_frame(&mut t, |view, _| {
                // Storage always matches the advertised geometry.
                assert_eq!(
                    view.pixels.len(),
                    view.stride as usize * view.dims.height as usize
                );
            })
            .unwrap();
        }
        handle.join().unwrap();
    }

    #[test]
    fn concurrent_resize_never_tears_the_view() {
        let m = shared(16, 16);
        let writer = m.clone();
        let handle = thread::spawn(move || {
            let mut source = RequestLog::new();
            let mut t = Tracer::none();
            for i in 1..100 {
                writer
                    .apply(
                        &UpdateOp::Resize {
                            dims: SurfaceDimensions::new(16 * i, 16 * i),
                        },
                        &mut source,
                        &mut t,
                    )
                    .unwrap();
            }
        });
        let mut t = Tracer::none();
        for _ in 0..100 {
            m.with_frame(&mut t, |view, _| {
                // Old or new, never partial: the pixel slice is always
                // exactly as large as dims and stride claim.
                assert_eq!(
                    view.pixels.len(),
                    view.stride as usize * view.dims.height as usize
                );
                assert_eq!(view.stride, view.dims.width);
            })
            .unwrap();
        }
        handle.join().unwrap();
    }
}
