// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar: region type selection and common operations.
//!
//! The type chips come from the injected taxonomy, so the toolbar adapts
//! to whichever digitization task the session was opened for.

use crate::editor::session::EditorSession;

/// Operations the app shell must carry out for the toolbar.
pub enum ToolbarAction {
    None,
    /// Ask the recognition collaborator for suggested regions.
    DetectRegions,
}

/// Display the toolbar. `has_image` gates image-dependent actions.
pub fn show(
    ui: &mut egui::Ui,
    session: &mut EditorSession,
    show_grid: &mut bool,
    has_image: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Type:");
        let kinds: Vec<(String, String, [u8; 3])> = session
            .taxonomy()
            .types()
            .iter()
            .map(|t| (t.kind.clone(), t.label.clone(), t.color))
            .collect();
        for (kind, label, [r, g, b]) in kinds {
            let selected = session.active_kind() == kind;
            let text = egui::RichText::new(format!("■ {}", label))
                .color(egui::Color32::from_rgb(r, g, b));
            if ui.selectable_label(selected, text).clicked() {
                session.set_active_kind(&kind);
            }
        }

        ui.separator();

        if ui
            .add_enabled(session.can_undo(), egui::Button::new("⟲ Undo"))
            .clicked()
        {
            session.undo();
        }
        if ui
            .add_enabled(session.can_redo(), egui::Button::new("⟳ Redo"))
            .clicked()
        {
            session.redo();
        }

        ui.separator();

        if ui.button("−").clicked() {
            session.transform_mut().zoom_out();
        }
        ui.label(format!("{:.0}%", session.transform().scale() * 100.0));
        if ui.button("+").clicked() {
            session.transform_mut().zoom_in();
        }
        if ui.button("1:1").clicked() {
            session.transform_mut().reset();
        }

        ui.separator();
        ui.checkbox(show_grid, "Grid");

        ui.separator();
        if ui
            .add_enabled(has_image, egui::Button::new("✨ Detect regions"))
            .clicked()
        {
            action = ToolbarAction::DetectRegions;
        }
    });

    action
}
