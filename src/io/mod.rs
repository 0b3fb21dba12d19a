// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: media loading, sheet persistence, recognition.

pub mod media;
pub mod recognition;
pub mod serialization;
