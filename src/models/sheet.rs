// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Sheet document state.
//!
//! This module holds the serializable document form: the sheet image
//! reference plus the ordered region list handed across the host
//! boundary on save/load.

use super::region::Region;
use serde::{Deserialize, Serialize};

/// Complete sheet annotation data for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetData {
    pub image_file: String,
    pub image_width: u32,
    pub image_height: u32,
    /// Which taxonomy preset the regions were classified under.
    pub taxonomy: String,
    pub regions: Vec<Region>,
}

impl SheetData {
    /// Create an empty document for the given sheet image.
    pub fn new(image_file: String, image_width: u32, image_height: u32, taxonomy: String) -> Self {
        Self {
            image_file,
            image_width,
            image_height,
            taxonomy,
            regions: Vec::new(),
        }
    }
}
