// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! The region-annotation editor core.
//!
//! Everything here is UI-toolkit-agnostic: the store, the history stack,
//! the gesture state machine, the taxonomy configuration, and the
//! recognition suggestion contract. The `ui` module renders this state
//! and feeds pointer events into it.

pub mod history;
pub mod interaction;
pub mod session;
pub mod store;
pub mod suggest;
pub mod taxonomy;
