// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the SheetMark application.

pub mod canvas;
pub mod properties;
pub mod toolbar;
