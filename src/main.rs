// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! SheetMark - answer-sheet region annotation.
//!
//! A cross-platform desktop application for marking classified regions
//! of interest on digitized answer-sheet images.

use anyhow::Result;
use sheetmark::app::SheetMarkApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("SheetMark - Answer Sheet Annotation"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "SheetMark",
        options,
        Box::new(|_cc| Ok(Box::new(SheetMarkApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
