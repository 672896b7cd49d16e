// Copyright 2026 the Silvering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the update pipeline.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! pipeline instrumentation calls as update commands flow through the
//! mirror. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.

use crate::mirror::ApplyOutcome;
use crate::surface::{SurfaceDimensions, SurfaceRect};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which update primitive an event describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// Solid fill of a rectangle.
    Fill,
    /// Decoded pixel rows blitted into place.
    Blit,
    /// Intra-surface copy.
    Copy,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after the mirror processes one update command.
#[derive(Clone, Copy, Debug)]
pub struct UpdateEvent {
    /// Which primitive was applied.
    pub kind: UpdateKind,
    /// Destination rectangle in surface coordinates.
    pub rect: SurfaceRect,
    /// Whether the command landed or was dropped.
    pub outcome: ApplyOutcome,
}

/// Emitted when the mirror adopts a new surface size.
#[derive(Clone, Copy, Debug)]
pub struct ResizeEvent {
    /// Surface dimensions before the resize.
    pub old: SurfaceDimensions,
    /// Surface dimensions after the resize.
    pub new: SurfaceDimensions,
}

/// Emitted when the paint side drains accumulated damage.
#[derive(Clone, Copy, Debug)]
pub struct DamageFlushEvent {
    /// Whether damage had escalated to the full surface.
    pub full: bool,
    /// Number of rects handed over (0 when `full` or when clean).
    pub rects: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the update pipeline.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after each update command is processed.
    fn on_update(&mut self, e: &UpdateEvent) {
        _ = e;
    }

    /// Called when the surface is resized.
    fn on_resize(&mut self, e: &ResizeEvent) {
        _ = e;
    }

    /// Called when the paint side drains damage.
    fn on_damage_flush(&mut self, e: &DamageFlushEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`UpdateEvent`].
    #[inline]
    pub fn update(&mut self, e: &UpdateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_update(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResizeEvent`].
    #[inline]
    pub fn resize(&mut self, e: &ResizeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_resize(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DamageFlushEvent`].
    #[inline]
    pub fn damage_flush(&mut self, e: &DamageFlushEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_damage_flush(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_update() -> UpdateEvent {
        UpdateEvent {
            kind: UpdateKind::Fill,
            rect: SurfaceRect::new(0, 0, 16, 16),
            outcome: ApplyOutcome::Applied,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_update(&sample_update());
        sink.on_resize(&ResizeEvent {
            old: SurfaceDimensions::new(640, 480),
            new: SurfaceDimensions::new(800, 600),
        });
        sink.on_damage_flush(&DamageFlushEvent {
            full: false,
            rects: 3,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.update(&sample_update());
        tracer.damage_flush(&DamageFlushEvent {
            full: true,
            rects: 0,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            kinds: Vec<UpdateKind>,
        }
        impl TraceSink for RecordingSink {
            fn on_update(&mut self, e: &UpdateEvent) {
                self.kinds.push(e.kind);
            }
        }

        let mut sink = RecordingSink { kinds: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.update(&sample_update());
        drop(tracer);
        assert_eq!(sink.kinds, &[UpdateKind::Fill]);
    }
}
