// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Sheet data serialization and deserialization.
//!
//! This module handles exporting and importing the annotated region
//! list in YAML and JSON formats.

use crate::models::sheet::SheetData;
use anyhow::Result;
use std::path::Path;

/// Export sheet data to YAML format.
pub fn export_yaml(data: &SheetData, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export sheet data to JSON format.
pub fn export_json(data: &SheetData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import sheet data from YAML format.
pub fn import_yaml(path: &Path) -> Result<SheetData> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import sheet data from JSON format.
pub fn import_json(path: &Path) -> Result<SheetData> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::{Region, RegionId, RegionOrigin};

    fn sample() -> SheetData {
        let mut data = SheetData::new("sheet_001.jpg".to_string(), 800, 1200, "answer_sheet".to_string());
        data.regions.push(Region {
            id: RegionId(1),
            kind: "student_info".to_string(),
            x: 50.0,
            y: 50.0,
            width: 400.0,
            height: 150.0,
            label: "Student info".to_string(),
            sequence: None,
            confidence: None,
            origin: RegionOrigin::Manual,
            attributes: serde_json::Map::new(),
        });
        data.regions.push(Region {
            id: RegionId(2),
            kind: "barcode".to_string(),
            x: 500.0,
            y: 60.0,
            width: 220.0,
            height: 80.0,
            label: "Barcode".to_string(),
            sequence: None,
            confidence: Some(0.92),
            origin: RegionOrigin::Suggested,
            attributes: serde_json::Map::new(),
        });
        data
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.json");
        let data = sample();

        export_json(&data, &path).unwrap();
        let loaded = import_json(&path).unwrap();

        assert_eq!(loaded.image_file, data.image_file);
        assert_eq!(loaded.taxonomy, data.taxonomy);
        assert_eq!(loaded.regions, data.regions);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.yaml");
        let data = sample();

        export_yaml(&data, &path).unwrap();
        let loaded = import_yaml(&path).unwrap();

        assert_eq!(loaded.regions, data.regions);
        assert_eq!(loaded.regions[1].origin, RegionOrigin::Suggested);
        assert_eq!(loaded.regions[1].confidence, Some(0.92));
    }
}
