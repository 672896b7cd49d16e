// Copyright 2026 the Silvering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for mirroring a remote framebuffer.
//!
//! `silvering_core` keeps a local pixel buffer synchronized with a remote
//! display surface whose contents arrive as a stream of rectangular update
//! commands, while a presentation thread concurrently reads that buffer to
//! paint a scaled, panned, or cropped viewport. It is `no_std` compatible
//! (with `alloc`); the `std` feature adds the two-thread shared handle.
//!
//! # Architecture
//!
//! Two threads meet in the middle at the mirror:
//!
//! ```text
//!   Protocol decoder (network thread)
//!       │  fill / blit / copy / resize
//!       ▼
//!   Mirror ──► FrameBuffer mutation ──► publish ──► presentation pixels
//!       │                                               │
//!       │  Damage                                       │
//!       ▼                                               ▼
//!   take_damage() ◄── paint cycle (presentation thread) reads FrameView
//!                           │
//!                           ▼
//!                  Viewport + PointerOverlay ──► paint plan (silvering_render)
//! ```
//!
//! **[`surface`]** — Surface dimensions and integer rectangle math. All
//! update commands are expressed in surface coordinates.
//!
//! **[`buffer`]** — The owned pixel storage behind the mirror, as a tagged
//! choice between two sizing strategies: exact-fit (storage tracks the
//! surface size) and capacity (storage over-provisioned to amortize growth).
//!
//! **[`mirror`]** — Applies update primitives onto the buffer, republishes
//! dirtied regions to the presentation array, and accumulates [`Damage`]
//! for the paint side.
//!
//! **[`viewport`]** — The three scaling strategies (fit-to-screen,
//! one-to-one, free-zoom) and the surface ↔ presentation coordinate
//! transform, including pan clamping and focus-preserving zoom.
//!
//! **[`pointer`]** — Synthetic pointer marker state, read at paint time.
//!
//! **[`shared`]** (`std` feature) — The mutual-exclusion discipline that
//! lets a network thread mutate the mirror while a presentation thread
//! reads it, with resize as an atomic storage swap under the lock.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types
//! for pipeline instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): enables the [`shared`] module and `std`
//!   support in dependencies.
//! - `trace` (disabled by default): enables `Tracer` method bodies (one
//!   branch per call site).
//!
//! [`Damage`]: mirror::Damage

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod buffer;
pub mod mirror;
pub mod pointer;
#[cfg(feature = "std")]
pub mod shared;
pub mod surface;
pub mod trace;
pub mod viewport;
