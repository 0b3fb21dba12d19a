// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! SheetMark - answer-sheet region annotation.
//!
//! A desktop tool for marking classified rectangular regions of interest
//! on digitized answer-sheet photos: student info blocks, barcodes,
//! question areas, and answer-card bubbles. One editor core serves every
//! region classification task through an injected taxonomy.

pub mod app;
pub mod editor;
pub mod io;
pub mod models;
pub mod ui;
pub mod util;
