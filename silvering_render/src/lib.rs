// Copyright 2026 the Silvering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint-plan construction and the presenter contract for silvering.
//!
//! This crate is the intermediate representation between
//! [`silvering_core`]'s mirror state and backend-specific painting. It
//! defines:
//!
//! - [`PaintOp`] — a single draw command in the paint plan
//! - [`PaintPlan`] — the ordered draw commands for one paint cycle
//! - [`plan_frame`] — builds the plan from viewport and pointer state
//! - [`Presenter`] — the trait backends implement to execute a plan

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

mod compose;
mod plan;
mod presenter;

pub use compose::plan_frame;
pub use plan::{PaintOp, PaintPlan};
pub use presenter::Presenter;
