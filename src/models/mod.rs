// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for sheet region annotation.

pub mod region;
pub mod sheet;
