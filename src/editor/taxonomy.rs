// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Region taxonomy configuration.
//!
//! A taxonomy describes the region types one editor instance may create:
//! label, display color, default attributes, and whether a type is
//! mandatory for a saveable sheet. The editor core never hard-codes type
//! names; the same core serves every digitization task by injecting a
//! different taxonomy.

use serde_json::json;

/// Configuration for one region type within a taxonomy.
#[derive(Debug, Clone)]
pub struct TypeSpec {
    /// Stable type id stored on regions, e.g. "student_info".
    pub kind: String,
    /// Human-readable label, the default region label.
    pub label: String,
    /// Display color as RGB.
    pub color: [u8; 3],
    /// At least one region of this type must exist before the sheet can
    /// be saved.
    pub required: bool,
    /// Type-specific attributes copied onto new regions (opaque to the
    /// core beyond storage and display).
    pub default_attributes: serde_json::Map<String, serde_json::Value>,
}

impl TypeSpec {
    pub fn new(kind: &str, label: &str, color: [u8; 3]) -> Self {
        Self {
            kind: kind.to_string(),
            label: label.to_string(),
            color,
            required: false,
            default_attributes: serde_json::Map::new(),
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn attributes(mut self, value: serde_json::Value) -> Self {
        if let serde_json::Value::Object(map) = value {
            self.default_attributes = map;
        }
        self
    }
}

/// The injected set of allowed region types for one editor instance.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    pub name: String,
    /// Regions carry a question-style ordinal and the UI warns when the
    /// numbering is not contiguous.
    pub ordered: bool,
    types: Vec<TypeSpec>,
}

impl Taxonomy {
    pub fn new(name: &str, ordered: bool, types: Vec<TypeSpec>) -> Self {
        Self {
            name: name.to_string(),
            ordered,
            types,
        }
    }

    pub fn types(&self) -> &[TypeSpec] {
        &self.types
    }

    pub fn get(&self, kind: &str) -> Option<&TypeSpec> {
        self.types.iter().find(|t| t.kind == kind)
    }

    /// The default draw type for a fresh session.
    pub fn first_kind(&self) -> &str {
        &self.types[0].kind
    }

    pub fn required_kinds(&self) -> impl Iterator<Item = &str> {
        self.types
            .iter()
            .filter(|t| t.required)
            .map(|t| t.kind.as_str())
    }

    /// Sheet layout regions: student identity block and machine-readable
    /// fields of the answer-sheet header.
    pub fn answer_sheet() -> Self {
        Self::new(
            "answer_sheet",
            false,
            vec![
                TypeSpec::new("student_info", "Student info", [66, 133, 244]).required(),
                TypeSpec::new("barcode", "Barcode", [52, 168, 83]),
                TypeSpec::new("exam_number", "Exam number", [251, 188, 5]),
                TypeSpec::new("name_field", "Name field", [234, 67, 53]),
                TypeSpec::new("class_field", "Class field", [171, 71, 188]),
            ],
        )
    }

    /// Question blocks of a test paper, numbered in reading order.
    pub fn question_blocks() -> Self {
        Self::new(
            "question_blocks",
            true,
            vec![
                TypeSpec::new("choice", "Choice", [66, 133, 244]),
                TypeSpec::new("fill_blank", "Fill in the blank", [52, 168, 83]),
                TypeSpec::new("calculation", "Calculation", [251, 188, 5]),
                TypeSpec::new("essay", "Essay", [234, 67, 53]),
                TypeSpec::new("analysis", "Analysis", [171, 71, 188]),
            ],
        )
    }

    /// Objective answer-card bubbles, numbered per question.
    pub fn answer_card() -> Self {
        Self::new(
            "answer_card",
            true,
            vec![
                TypeSpec::new("single_choice", "Single choice", [66, 133, 244]).attributes(json!({
                    "option_count": 4,
                    "option_layout": "horizontal",
                })),
                TypeSpec::new("multiple_choice", "Multiple choice", [52, 168, 83]).attributes(
                    json!({
                        "option_count": 4,
                        "option_layout": "horizontal",
                    }),
                ),
            ],
        )
    }

    /// All built-in presets, for the taxonomy picker.
    pub fn presets() -> Vec<Taxonomy> {
        vec![
            Self::answer_sheet(),
            Self::question_blocks(),
            Self::answer_card(),
        ]
    }

    pub fn preset(name: &str) -> Option<Taxonomy> {
        Self::presets().into_iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_sheet_requires_student_info() {
        let taxonomy = Taxonomy::answer_sheet();
        let required: Vec<&str> = taxonomy.required_kinds().collect();
        assert_eq!(required, vec!["student_info"]);
        assert!(!taxonomy.ordered);
    }

    #[test]
    fn test_answer_card_default_attributes() {
        let taxonomy = Taxonomy::answer_card();
        let spec = taxonomy.get("single_choice").unwrap();
        assert_eq!(spec.default_attributes["option_count"], 4);
        assert_eq!(spec.default_attributes["option_layout"], "horizontal");
        assert!(taxonomy.ordered);
    }

    #[test]
    fn test_preset_lookup() {
        assert!(Taxonomy::preset("question_blocks").is_some());
        assert!(Taxonomy::preset("nonexistent").is_none());
    }
}
