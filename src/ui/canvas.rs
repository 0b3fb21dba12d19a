// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for sheet display and region annotation.
//!
//! Renders one frame in a fixed order: sheet image, alignment grid,
//! regions in z-order, the ephemeral draw preview, and the selected
//! region's corner handles on top. Pointer events on the image are fed
//! into the session's gesture state machine.

use crate::editor::session::EditorSession;
use crate::models::region::{Region, RegionOrigin};
use crate::util::geometry::Point;

/// Grid spacing in image pixels.
const GRID_STEP: f64 = 50.0;
/// Corner handle square size in screen pixels.
const HANDLE_SIZE: f32 = 8.0;

/// Display the canvas area and route pointer interactions.
pub fn show(
    ui: &mut egui::Ui,
    session: &mut EditorSession,
    image_texture: &Option<egui::TextureHandle>,
    image_size: Option<(u32, u32)>,
    show_grid: bool,
) {
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);
    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let (Some(texture), Some((img_width, img_height))) = (image_texture, image_size) else {
            welcome_screen(ui);
            return;
        };

        // Ctrl+scroll zooms around the native scroll position.
        let zoom_delta = ui.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            let scale = session.transform().scale();
            session.transform_mut().set_scale(scale * zoom_delta as f64);
        }

        let scale = session.transform().scale() as f32;
        let scaled = egui::vec2(img_width as f32 * scale, img_height as f32 * scale);

        egui::ScrollArea::both()
            .id_source("sheet_canvas_scroll")
            .show(ui, |ui| {
                let (outer_rect, _) = ui.allocate_exact_size(
                    scaled.max(ui.available_size()),
                    egui::Sense::hover(),
                );
                let image_rect = egui::Rect::from_min_size(outer_rect.min, scaled);
                let painter = ui.painter_at(outer_rect);

                // 1. Sheet image at the current scale
                painter.image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                // 2. Alignment grid
                if show_grid {
                    draw_grid(&painter, image_rect, scale);
                }

                // 3. Regions in z-order
                for region in session.regions() {
                    let selected = session.selected() == Some(region.id);
                    draw_region(&painter, session, region, image_rect, selected);
                }

                // 4. Ephemeral draw preview
                if let Some(preview) = session.preview_rect() {
                    let rect = to_screen_rect(preview.x, preview.y, preview.width, preview.height, image_rect, scale);
                    dashed_rect(&painter, rect, egui::Stroke::new(1.5, egui::Color32::LIGHT_BLUE));
                }

                // 5. Selection handles, always on top
                if let Some(region) = session.selected().and_then(|id| session.region(id)) {
                    let rect = to_screen_rect(region.x, region.y, region.width, region.height, image_rect, scale);
                    draw_handles(&painter, rect);
                }

                handle_pointer(ui, session, image_rect);
            });
    });

    ui.separator();
    ui.horizontal(|ui| {
        let kind_label = session
            .taxonomy()
            .get(session.active_kind())
            .map_or_else(|| session.active_kind().to_string(), |s| s.label.clone());
        ui.label(format!("Draw type: {}", kind_label));
        ui.separator();
        ui.label(format!("{} regions", session.region_count()));
        ui.separator();
        ui.label(format!("{:.0}%", session.transform().scale() * 100.0));
        if let Some(warning) = session.sequence_warning() {
            ui.separator();
            ui.colored_label(egui::Color32::YELLOW, warning);
        }
    });
}

/// Feed pointer events on the image area into the gesture state machine.
fn handle_pointer(ui: &mut egui::Ui, session: &mut EditorSession, image_rect: egui::Rect) {
    let response = ui.allocate_rect(image_rect, egui::Sense::click_and_drag());

    let to_point = |pos: egui::Pos2| {
        Point::new(
            (pos.x - image_rect.min.x) as f64,
            (pos.y - image_rect.min.y) as f64,
        )
    };

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            session.pointer_down(to_point(pos));
        }
    } else if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            session.pointer_move(to_point(pos));
        }
    } else if response.drag_stopped() {
        if let Some(pos) = response.interact_pointer_pos() {
            session.pointer_up(to_point(pos));
        }
    } else if response.clicked() {
        // A plain click (no drag threshold crossed) still selects or
        // deselects; a click-sized draw is rejected by the minimum size.
        if let Some(pos) = response.interact_pointer_pos() {
            let p = to_point(pos);
            session.pointer_down(p);
            session.pointer_up(p);
        }
    }
}

fn to_screen_rect(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    image_rect: egui::Rect,
    scale: f32,
) -> egui::Rect {
    egui::Rect::from_min_size(
        image_rect.min + egui::vec2(x as f32 * scale, y as f32 * scale),
        egui::vec2(width as f32 * scale, height as f32 * scale),
    )
}

fn draw_grid(painter: &egui::Painter, image_rect: egui::Rect, scale: f32) {
    let stroke = egui::Stroke::new(0.5, egui::Color32::from_white_alpha(24));
    let step = GRID_STEP as f32 * scale;

    let mut x = image_rect.min.x;
    while x <= image_rect.max.x {
        painter.line_segment(
            [egui::pos2(x, image_rect.min.y), egui::pos2(x, image_rect.max.y)],
            stroke,
        );
        x += step;
    }
    let mut y = image_rect.min.y;
    while y <= image_rect.max.y {
        painter.line_segment(
            [egui::pos2(image_rect.min.x, y), egui::pos2(image_rect.max.x, y)],
            stroke,
        );
        y += step;
    }
}

/// Draw one region: translucent fill, solid stroke for manual regions and
/// dashed for suggestions, label text, and the confidence badge.
fn draw_region(
    painter: &egui::Painter,
    session: &EditorSession,
    region: &Region,
    image_rect: egui::Rect,
    selected: bool,
) {
    let scale = session.transform().scale() as f32;
    let rect = to_screen_rect(region.x, region.y, region.width, region.height, image_rect, scale);

    let [r, g, b] = session
        .taxonomy()
        .get(&region.kind)
        .map_or([200, 200, 200], |spec| spec.color);
    let color = egui::Color32::from_rgb(r, g, b);

    painter.rect_filled(rect, 0.0, egui::Color32::from_rgba_unmultiplied(r, g, b, 36));

    let stroke_width = if selected { 2.5 } else { 1.5 };
    let stroke = egui::Stroke::new(stroke_width, color);
    match region.origin {
        RegionOrigin::Manual => {
            painter.rect_stroke(rect, 0.0, stroke);
        }
        RegionOrigin::Suggested => {
            dashed_rect(painter, rect, stroke);
        }
    }

    painter.text(
        rect.min + egui::vec2(4.0, 2.0),
        egui::Align2::LEFT_TOP,
        &region.label,
        egui::FontId::proportional(12.0),
        color,
    );

    if let Some(confidence) = region.confidence {
        painter.text(
            egui::pos2(rect.max.x - 4.0, rect.min.y + 2.0),
            egui::Align2::RIGHT_TOP,
            format!("{:.0}%", confidence * 100.0),
            egui::FontId::proportional(11.0),
            egui::Color32::from_gray(220),
        );
    }
}

fn dashed_rect(painter: &egui::Painter, rect: egui::Rect, stroke: egui::Stroke) {
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(&corners, stroke, 6.0, 4.0));
}

/// Corner handles of the selected region, drawn after everything else.
fn draw_handles(painter: &egui::Painter, rect: egui::Rect) {
    let half = HANDLE_SIZE / 2.0;
    for corner in [
        rect.left_top(),
        rect.right_top(),
        rect.left_bottom(),
        rect.right_bottom(),
    ] {
        let handle = egui::Rect::from_center_size(corner, egui::vec2(half * 2.0, half * 2.0));
        painter.rect_filled(handle, 1.0, egui::Color32::WHITE);
        painter.rect_stroke(handle, 1.0, egui::Stroke::new(1.0, egui::Color32::BLACK));
    }
}

fn welcome_screen(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("SheetMark")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Answer-sheet region annotation")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Open a sheet image to begin marking regions")
                    .color(egui::Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("File → Open Sheet Image...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}
