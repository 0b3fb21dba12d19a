// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Region properties panel.
//!
//! Lists the regions of the sheet in z-order and edits the selected
//! region's metadata: label, type, and question number. Text edits are
//! committed to history on focus loss rather than per keystroke.

use crate::editor::session::EditorSession;
use crate::models::region::{RegionId, RegionOrigin, RegionPatch};

/// Panel state that survives between frames (in-flight text edits).
#[derive(Default)]
pub struct PropertiesPanel {
    label_buffer: String,
    editing_label_for: Option<RegionId>,
}

impl PropertiesPanel {
    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut EditorSession) {
        ui.heading("Regions");
        ui.separator();

        if session.region_count() == 0 {
            ui.label(egui::RichText::new("No regions yet").weak());
            return;
        }

        let mut delete_request = None;
        egui::ScrollArea::vertical()
            .max_height(ui.available_height() * 0.5)
            .show(ui, |ui| {
                let rows: Vec<(RegionId, String, RegionOrigin)> = session
                    .regions()
                    .iter()
                    .map(|r| (r.id, r.label.clone(), r.origin))
                    .collect();
                for (id, label, origin) in rows {
                    ui.horizontal(|ui| {
                        let selected = session.selected() == Some(id);
                        let text = match origin {
                            RegionOrigin::Manual => label.clone(),
                            RegionOrigin::Suggested => format!("{} (suggested)", label),
                        };
                        if ui.selectable_label(selected, text).clicked() {
                            session.select(id);
                        }
                        if ui.small_button("🗑").clicked() {
                            delete_request = Some(id);
                        }
                    });
                }
            });
        if let Some(id) = delete_request {
            session.delete_region(id);
        }

        ui.separator();

        let Some(region) = session.selected().and_then(|id| session.region(id)).cloned() else {
            ui.label(egui::RichText::new("Select a region to edit it").weak());
            return;
        };

        // Reset the edit buffer when the selection changes.
        if self.editing_label_for != Some(region.id) {
            self.editing_label_for = Some(region.id);
            self.label_buffer = region.label.clone();
        }

        ui.label("Label:");
        let response = ui.text_edit_singleline(&mut self.label_buffer);
        if response.lost_focus() && self.label_buffer != region.label {
            session.edit_region(region.id, RegionPatch::label(self.label_buffer.clone()));
        }

        ui.add_space(4.0);
        ui.label("Type:");
        let current_label = session
            .taxonomy()
            .get(&region.kind)
            .map_or_else(|| region.kind.clone(), |s| s.label.clone());
        let kinds: Vec<(String, String)> = session
            .taxonomy()
            .types()
            .iter()
            .map(|t| (t.kind.clone(), t.label.clone()))
            .collect();
        let mut new_kind = None;
        egui::ComboBox::from_id_source("region_kind")
            .selected_text(current_label)
            .show_ui(ui, |ui| {
                for (kind, label) in kinds {
                    if ui
                        .selectable_label(region.kind == kind, label)
                        .clicked()
                    {
                        new_kind = Some(kind);
                    }
                }
            });
        if let Some(kind) = new_kind {
            if kind != region.kind {
                session.edit_region(
                    region.id,
                    RegionPatch {
                        kind: Some(kind),
                        ..Default::default()
                    },
                );
            }
        }

        if session.taxonomy().ordered {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Number:");
                let mut sequence = region.sequence.unwrap_or(0) as i64;
                let response = ui.add(egui::DragValue::new(&mut sequence).range(0..=999));
                if response.changed() {
                    let value = (sequence > 0).then_some(sequence as u32);
                    session.edit_region(
                        region.id,
                        RegionPatch {
                            sequence: Some(value),
                            ..Default::default()
                        },
                    );
                }
            });
            if let Some(warning) = session.sequence_warning() {
                ui.colored_label(egui::Color32::YELLOW, warning);
            }
        }

        ui.add_space(4.0);
        ui.label(format!(
            "Bounds: ({:.0}, {:.0}) {:.0}×{:.0}",
            region.x, region.y, region.width, region.height
        ));
        if region.origin == RegionOrigin::Suggested {
            let confidence = region.confidence.unwrap_or(1.0);
            ui.label(format!("Suggested · {:.0}% confidence", confidence * 100.0));
        }
        if !region.attributes.is_empty() {
            ui.add_space(4.0);
            ui.label("Attributes:");
            for (key, value) in &region.attributes {
                ui.label(egui::RichText::new(format!("  {}: {}", key, value)).weak());
            }
        }
    }
}
