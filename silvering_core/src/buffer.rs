// Copyright 2026 the Silvering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned pixel storage behind the mirror, with two sizing strategies.
//!
//! A [`FrameBuffer`] holds two parallel pixel arrays with the same stride:
//! the *working* array that update commands mutate, and the *presentation*
//! array (`shown`) that the paint side reads. [`publish`](FrameBuffer::publish)
//! copies a rectangle from working to presentation; the mirror calls it after
//! every successful update so the paint side never observes a half-applied
//! command.
//!
//! The two strategies trade memory for reallocation frequency:
//!
//! - [`ExactFitBuffer`] — storage is exactly `width * height`; every remote
//!   surface growth reallocates. `valid_draw` is always `true` because the
//!   buffer resizes reactively on the next size-change event, never on
//!   demand.
//! - [`CapacityBuffer`] — storage is over-provisioned by a configured
//!   [`CapacityPolicy`], so most growths fit the existing allocation and the
//!   resize race window (see [`crate::shared`]) opens less often. A rect
//!   that exceeds allocated capacity fails `valid_draw`, signalling the
//!   caller to fall back to a full (non-incremental) update.
//!
//! Each strategy's `offset` formula matches its own `valid_draw`: exact-fit
//! indexes with the surface width as stride, capacity with the capacity
//! width. Reallocation builds the new storage to the side and installs it
//! with a single assignment, so under the mirror's lock a concurrent reader
//! sees either the fully-old or the fully-new arrays.

use alloc::vec::Vec;
use core::fmt;

use crate::surface::{Pixel, SurfaceDimensions, SurfaceRect};

/// Failure to allocate pixel storage.
///
/// Fatal to the mirror instance: there is no degraded mode for a buffer
/// that cannot be allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocError {
    /// Number of pixels the failed allocation asked for.
    pub requested: usize,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to allocate pixel storage for {} pixels",
            self.requested
        )
    }
}

impl core::error::Error for AllocError {}

/// Allocates a zeroed pixel array, reporting failure instead of aborting.
fn alloc_pixels(count: usize) -> Result<Vec<Pixel>, AllocError> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(count)
        .map_err(|_| AllocError { requested: count })?;
    pixels.resize(count, 0);
    Ok(pixels)
}

/// Over-provisioning policy for [`CapacityBuffer`].
///
/// The policy shape is fixed (allocate ahead of need, reject draws that
/// exceed capacity); the factor is configuration, tuned against the
/// deployment's memory limits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapacityPolicy {
    /// Multiplier applied to each surface dimension when (re)allocating.
    /// Must be `>= 1.0`.
    pub reserve_factor: f64,
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            reserve_factor: 1.5,
        }
    }
}

impl CapacityPolicy {
    /// Capacity dimensions for a given surface size.
    fn capacity_for(self, dims: SurfaceDimensions) -> SurfaceDimensions {
        #[expect(clippy::cast_possible_truncation, reason = "dims are u32-ranged")]
        let scale = |d: u32| -> u32 {
            let scaled = (f64::from(d) * self.reserve_factor) as u64;
            scaled.min(u64::from(u32::MAX)) as u32
        };
        SurfaceDimensions::new(
            scale(dims.width).max(dims.width),
            scale(dims.height).max(dims.height),
        )
    }
}

/// Which sizing strategy a [`FrameBuffer`] should use.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SizingStrategy {
    /// Storage tracks the surface size exactly.
    #[default]
    ExactFit,
    /// Storage over-provisioned per the given policy.
    Capacity(CapacityPolicy),
}

/// Exact-fit storage: `stride == surface width`, no headroom.
#[derive(Clone, Debug)]
pub struct ExactFitBuffer {
    dims: SurfaceDimensions,
    /// Pixels the current allocation can hold. May exceed
    /// `dims.pixel_count()` after a shrink, which keeps the allocation.
    allocated: usize,
    pixels: Vec<Pixel>,
    shown: Vec<Pixel>,
}

impl ExactFitBuffer {
    /// Allocates storage for a surface of the given size.
    pub fn allocate(dims: SurfaceDimensions) -> Result<Self, AllocError> {
        let count = dims.pixel_count();
        Ok(Self {
            dims,
            allocated: count,
            pixels: alloc_pixels(count)?,
            shown: alloc_pixels(count)?,
        })
    }

    /// Index of `(x, y)` in the pixel arrays: `y * width + x`.
    #[inline]
    #[must_use]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.dims.width as usize + x as usize
    }

    /// Always `true`: this strategy resizes reactively on the next
    /// size-change event, never on demand.
    #[inline]
    #[must_use]
    pub fn valid_draw(&self, _rect: SurfaceRect) -> bool {
        true
    }

    /// Adopts a new surface size, reallocating only when the current
    /// allocation is too small. Shrinking keeps the allocation to avoid
    /// churn; contents are then stale until the next full update, which the
    /// protocol layer requests after every resize.
    pub fn resize(&mut self, new: SurfaceDimensions) -> Result<(), AllocError> {
        if new == self.dims {
            return Ok(());
        }
        let count = new.pixel_count();
        if count > self.allocated {
            // Build to the side first so failure leaves the old storage
            // authoritative.
            let pixels = alloc_pixels(count)?;
            let shown = alloc_pixels(count)?;
            self.pixels = pixels;
            self.shown = shown;
            self.allocated = count;
        }
        self.dims = new;
        Ok(())
    }
}

/// Over-provisioned storage: `stride == capacity width >= surface width`.
#[derive(Clone, Debug)]
pub struct CapacityBuffer {
    dims: SurfaceDimensions,
    capacity: SurfaceDimensions,
    policy: CapacityPolicy,
    pixels: Vec<Pixel>,
    shown: Vec<Pixel>,
}

impl CapacityBuffer {
    /// Allocates storage with headroom for a surface of the given size.
    pub fn allocate(dims: SurfaceDimensions, policy: CapacityPolicy) -> Result<Self, AllocError> {
        let capacity = policy.capacity_for(dims);
        let count = capacity.pixel_count();
        Ok(Self {
            dims,
            capacity,
            policy,
            pixels: alloc_pixels(count)?,
            shown: alloc_pixels(count)?,
        })
    }

    /// Index of `(x, y)` in the pixel arrays: `y * capacity_width + x`.
    #[inline]
    #[must_use]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.capacity.width as usize + x as usize
    }

    /// Whether `rect` fits entirely inside allocated capacity, without
    /// triggering a resize. A `false` here is the capacity-exhaustion
    /// signal: the caller must request a full update instead of applying
    /// the partial one.
    #[inline]
    #[must_use]
    pub fn valid_draw(&self, rect: SurfaceRect) -> bool {
        rect.fits_within(self.capacity)
    }

    /// Allocated capacity dimensions.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> SurfaceDimensions {
        self.capacity
    }

    /// Adopts a new surface size, reallocating (with fresh headroom) only
    /// when the new surface exceeds current capacity. The stride never
    /// changes without a reallocation, so in-capacity resizes preserve
    /// contents.
    pub fn resize(&mut self, new: SurfaceDimensions) -> Result<(), AllocError> {
        if !self.capacity.covers(new) {
            let capacity = self.policy.capacity_for(new);
            let count = capacity.pixel_count();
            let pixels = alloc_pixels(count)?;
            let shown = alloc_pixels(count)?;
            self.pixels = pixels;
            self.shown = shown;
            self.capacity = capacity;
        }
        self.dims = new;
        Ok(())
    }
}

/// The mirror's pixel storage, as one of two interchangeable strategies.
///
/// Construction chooses the strategy; every later operation goes through
/// this enum so the mirror never cares which one is active.
#[derive(Clone, Debug)]
pub enum FrameBuffer {
    /// Exactly-sized storage.
    ExactFit(ExactFitBuffer),
    /// Over-provisioned storage.
    Capacity(CapacityBuffer),
}

impl FrameBuffer {
    /// Allocates storage for `dims` using the given strategy.
    pub fn allocate(strategy: SizingStrategy, dims: SurfaceDimensions) -> Result<Self, AllocError> {
        match strategy {
            SizingStrategy::ExactFit => Ok(Self::ExactFit(ExactFitBuffer::allocate(dims)?)),
            SizingStrategy::Capacity(policy) => {
                Ok(Self::Capacity(CapacityBuffer::allocate(dims, policy)?))
            }
        }
    }

    /// Current surface dimensions.
    #[inline]
    #[must_use]
    pub fn dims(&self) -> SurfaceDimensions {
        match self {
            Self::ExactFit(b) => b.dims,
            Self::Capacity(b) => b.dims,
        }
    }

    /// Dimensions of the writable storage area: the surface itself for
    /// exact-fit, the allocated capacity for the capacity strategy. Writes
    /// beyond the surface but inside capacity are legal; they become visible
    /// if the surface later grows into that region.
    #[inline]
    #[must_use]
    pub fn storage_dims(&self) -> SurfaceDimensions {
        match self {
            Self::ExactFit(b) => b.dims,
            Self::Capacity(b) => b.capacity,
        }
    }

    /// Row stride of both pixel arrays, in pixels.
    #[inline]
    #[must_use]
    pub fn stride(&self) -> u32 {
        match self {
            Self::ExactFit(b) => b.dims.width,
            Self::Capacity(b) => b.capacity.width,
        }
    }

    /// Index of `(x, y)` in the pixel arrays.
    ///
    /// Pure arithmetic; never panics for any `(x, y)` the buffer claims to
    /// cover. Callers are responsible for bounds — the slice operations in
    /// the mirror check row extents before indexing.
    #[inline]
    #[must_use]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        match self {
            Self::ExactFit(b) => b.offset(x, y),
            Self::Capacity(b) => b.offset(x, y),
        }
    }

    /// Whether `rect` can be drawn without exceeding current storage.
    #[inline]
    #[must_use]
    pub fn valid_draw(&self, rect: SurfaceRect) -> bool {
        match self {
            Self::ExactFit(b) => b.valid_draw(rect),
            Self::Capacity(b) => b.valid_draw(rect),
        }
    }

    /// Adopts a new surface size. Called exactly once per remote
    /// size-change notification, under the mirror's lock.
    pub fn resize(&mut self, new: SurfaceDimensions) -> Result<(), AllocError> {
        match self {
            Self::ExactFit(b) => b.resize(new),
            Self::Capacity(b) => b.resize(new),
        }
    }

    /// The working pixel array.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        match self {
            Self::ExactFit(b) => &b.pixels,
            Self::Capacity(b) => &b.pixels,
        }
    }

    /// The working pixel array, mutably.
    #[inline]
    #[must_use]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        match self {
            Self::ExactFit(b) => &mut b.pixels,
            Self::Capacity(b) => &mut b.pixels,
        }
    }

    /// The presentation pixel array the paint side reads.
    #[inline]
    #[must_use]
    pub fn shown(&self) -> &[Pixel] {
        match self {
            Self::ExactFit(b) => &b.shown,
            Self::Capacity(b) => &b.shown,
        }
    }

    /// Copies `rect` (clamped to the surface) from the working array to the
    /// presentation array.
    pub fn publish(&mut self, rect: SurfaceRect) {
        let rect = rect.clamped_to(self.dims());
        if rect.is_empty() {
            return;
        }
        let stride = self.stride() as usize;
        let width = rect.width as usize;
        let start = self.offset(rect.x, rect.y);
        let (pixels, shown) = match self {
            Self::ExactFit(b) => (&b.pixels, &mut b.shown),
            Self::Capacity(b) => (&b.pixels, &mut b.shown),
        };
        for row in 0..rect.height as usize {
            let at = start + row * stride;
            shown[at..at + width].copy_from_slice(&pixels[at..at + width]);
        }
    }

    /// Releases backing storage. Idempotent; the mirror's lifecycle flag
    /// prevents any further drawing once storage is gone.
    pub fn release(&mut self) {
        match self {
            Self::ExactFit(b) => {
                b.pixels = Vec::new();
                b.shown = Vec::new();
                b.allocated = 0;
                b.dims = SurfaceDimensions::default();
            }
            Self::Capacity(b) => {
                b.pixels = Vec::new();
                b.shown = Vec::new();
                b.capacity = SurfaceDimensions::default();
                b.dims = SurfaceDimensions::default();
            }
        }
    }
}
