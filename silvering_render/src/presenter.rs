// Copyright 2026 the Silvering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract between paint planning and a concrete backend.

use silvering_core::mirror::FrameView;

use crate::plan::PaintPlan;

/// Executes paint plans against a platform drawing surface.
///
/// Implemented once per backend (a software canvas, a GPU texture upload,
/// a test double). Called on the presentation thread with the mirror lock
/// held, so implementations should do the minimum and return.
pub trait Presenter {
    /// Draws `plan` using the pixels in `view`.
    fn apply(&mut self, view: &FrameView<'_>, plan: &PaintPlan);
}
