// Copyright (c) 2025, SheetMark Contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the editor session to the window chrome: menus,
//! toolbar, properties panel, canvas, keyboard shortcuts, and the
//! background channels for image loading and region recognition.

use crate::editor::session::EditorSession;
use crate::editor::store::StoreConfig;
use crate::editor::suggest::{RecognitionResponse, SuggestionOutcome};
use crate::editor::taxonomy::Taxonomy;
use crate::models::sheet::SheetData;
use crate::ui::properties::PropertiesPanel;
use crate::ui::{canvas, toolbar};
use std::sync::mpsc::{channel, Receiver};

/// Result of background image loading.
struct LoadedSheet {
    image_file: String,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    /// Regions restored alongside the image when loading a saved sheet.
    data: Option<SheetData>,
}

/// Main application state.
pub struct SheetMarkApp {
    /// The annotation session for the current sheet
    session: EditorSession,

    /// Path of the loaded sheet image
    image_file: Option<String>,

    /// Loaded sheet texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Sheet dimensions (width, height)
    image_size: Option<(u32, u32)>,

    /// Whether the alignment grid is drawn
    show_grid: bool,

    /// Recognition sensitivity forwarded as a hint
    sensitivity: f32,

    /// Receiver for background image loading
    sheet_loader: Option<Receiver<Result<LoadedSheet, String>>>,

    /// Receiver for an in-flight recognition request
    recognition: Option<Receiver<Result<RecognitionResponse, String>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Non-fatal notice surfaced at the bottom of the window
    notice: Option<String>,

    /// Properties panel edit state
    properties: PropertiesPanel,
}

impl Default for SheetMarkApp {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetMarkApp {
    /// Create a new SheetMark application instance.
    pub fn new() -> Self {
        Self {
            session: EditorSession::new(Taxonomy::answer_sheet(), StoreConfig::default()),
            image_file: None,
            image_texture: None,
            image_size: None,
            show_grid: false,
            sensitivity: 0.5,
            sheet_loader: None,
            recognition: None,
            loading_message: None,
            notice: None,
            properties: PropertiesPanel::default(),
        }
    }

    /// Load a sheet image file asynchronously.
    fn load_sheet_image(&mut self, path: std::path::PathBuf) {
        let (sender, receiver) = channel();
        self.sheet_loader = Some(receiver);
        self.loading_message = Some("Loading sheet image...".to_string());

        let path_string = path.to_string_lossy().to_string();
        std::thread::spawn(move || {
            let result = (|| -> Result<LoadedSheet, String> {
                let loaded = crate::io::media::load_image(&path)
                    .map_err(|e| format!("Failed to load image: {}", e))?;
                log::info!(
                    "Loaded sheet image: {} ({}x{})",
                    path.display(),
                    loaded.width,
                    loaded.height
                );
                Ok(LoadedSheet {
                    image_file: path_string,
                    width: loaded.width,
                    height: loaded.height,
                    pixels: loaded.pixels,
                    data: None,
                })
            })();
            let _ = sender.send(result);
        });
    }

    /// Load a saved region file and the sheet image it references.
    fn load_sheet_data(&mut self, path: std::path::PathBuf) {
        let (sender, receiver) = channel();
        self.sheet_loader = Some(receiver);
        self.loading_message = Some("Loading regions and sheet image...".to_string());

        std::thread::spawn(move || {
            let result = (|| -> Result<LoadedSheet, String> {
                let extension = path.extension().and_then(|s| s.to_str());
                let data = match extension {
                    Some("yaml") | Some("yml") => crate::io::serialization::import_yaml(&path)
                        .map_err(|e| format!("Failed to import YAML: {}", e))?,
                    Some("json") => crate::io::serialization::import_json(&path)
                        .map_err(|e| format!("Failed to import JSON: {}", e))?,
                    _ => return Err(format!("Unsupported file extension: {:?}", extension)),
                };
                log::info!("Imported {} regions from {}", data.regions.len(), path.display());

                let image_path = std::path::PathBuf::from(&data.image_file);
                if !image_path.exists() {
                    return Err(format!(
                        "Referenced sheet image not found: {}",
                        image_path.display()
                    ));
                }
                let loaded = crate::io::media::load_image(&image_path)
                    .map_err(|e| format!("Failed to load image: {}", e))?;

                Ok(LoadedSheet {
                    image_file: data.image_file.clone(),
                    width: loaded.width,
                    height: loaded.height,
                    pixels: loaded.pixels,
                    data: Some(data),
                })
            })();
            let _ = sender.send(result);
        });
    }

    /// Export the region list, gated by the session's save validation.
    fn export_regions(&mut self, path: std::path::PathBuf) {
        if let Some(reason) = self.session.save_blocker() {
            self.notice = Some(format!("Cannot save: {}", reason));
            log::warn!("Save blocked: {}", reason);
            return;
        }
        let (Some(image_file), Some((width, height))) = (&self.image_file, self.image_size) else {
            self.notice = Some("Cannot save: no sheet image loaded".to_string());
            return;
        };

        let data = SheetData {
            image_file: image_file.clone(),
            image_width: width,
            image_height: height,
            taxonomy: self.session.taxonomy().name.clone(),
            regions: self.session.regions().to_vec(),
        };

        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => crate::io::serialization::export_yaml(&data, &path),
            Some("json") => crate::io::serialization::export_json(&data, &path),
            _ => {
                log::error!("Unsupported file extension: {:?}", extension);
                return;
            }
        };
        match result {
            Ok(_) => {
                log::info!("Exported regions to {}", path.display());
                self.notice = Some(format!("Saved {} regions", data.regions.len()));
            }
            Err(e) => {
                log::error!("Failed to export regions: {}", e);
                self.notice = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Start a recognition request on a background thread. A newer
    /// request or a manual edit supersedes it via the generation token.
    fn request_recognition(&mut self) {
        let (Some(image_file), Some((width, height))) = (&self.image_file, self.image_size) else {
            return;
        };
        let request = self
            .session
            .begin_recognition(image_file, width, height, self.sensitivity);

        let (sender, receiver) = channel();
        self.recognition = Some(receiver);
        log::info!("Requested recognition (generation {})", request.generation);

        std::thread::spawn(move || {
            let result =
                crate::io::recognition::detect_regions(&request).map_err(|e| e.to_string());
            let _ = sender.send(result);
        });
    }

    fn poll_background_channels(&mut self, ctx: &egui::Context) {
        if let Some(ref receiver) = self.sheet_loader {
            if let Ok(result) = receiver.try_recv() {
                self.sheet_loader = None;
                self.loading_message = None;
                match result {
                    Ok(loaded) => {
                        let size = [loaded.width as usize, loaded.height as usize];
                        let color_image =
                            egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                        let texture = ctx.load_texture(
                            "sheet_image",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        );
                        self.image_texture = Some(texture);
                        self.image_size = Some((loaded.width, loaded.height));
                        self.image_file = Some(loaded.image_file);

                        if let Some(data) = loaded.data {
                            let taxonomy = Taxonomy::preset(&data.taxonomy)
                                .unwrap_or_else(Taxonomy::answer_sheet);
                            self.session =
                                EditorSession::new(taxonomy, StoreConfig::default());
                            self.session.load(data.regions);
                        } else {
                            // Fresh sheet: keep the taxonomy, drop regions.
                            let taxonomy = self.session.taxonomy().clone();
                            self.session = EditorSession::new(taxonomy, StoreConfig::default());
                        }
                        self.properties = PropertiesPanel::default();
                        log::info!("Sheet loaded");
                    }
                    Err(e) => {
                        log::error!("Failed to load sheet: {}", e);
                        self.notice = Some(e);
                    }
                }
            }
        }

        if let Some(ref receiver) = self.recognition {
            if let Ok(result) = receiver.try_recv() {
                self.recognition = None;
                match result {
                    Ok(response) => match self.session.apply_recognition(&response, None) {
                        SuggestionOutcome::Applied { added } => {
                            self.notice = Some(format!("Detected {} regions", added));
                        }
                        SuggestionOutcome::Stale => {
                            self.notice =
                                Some("Discarded outdated detection result".to_string());
                        }
                    },
                    Err(e) => {
                        // Editor stays fully usable in manual mode.
                        log::warn!("Recognition failed: {}", e);
                        self.notice = Some(format!("Detection failed: {}", e));
                    }
                }
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.session.gesture_active() {
                self.session.cancel_gesture();
            } else {
                self.session.deselect();
            }
        }

        // Skip editing shortcuts while a text field is focused
        if ctx.wants_keyboard_input() {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
            self.session.delete_selected();
        }

        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift) {
            self.session.undo();
        }
        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) {
            self.session.redo();
        }
    }
}

impl eframe::App for SheetMarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background_channels(ctx);

        // Request repaint while background work is pending
        if self.loading_message.is_some() || self.recognition.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Sheet Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif"])
                            .pick_file()
                        {
                            self.load_sheet_image(path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Load Regions...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Regions", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.load_sheet_data(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.menu_button("Export Regions", |ui| {
                        if ui.button("Export as YAML...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("regions.yaml")
                                .save_file()
                            {
                                self.export_regions(path);
                            }
                            ui.close_menu();
                        }
                        if ui.button("Export as JSON...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("regions.json")
                                .save_file()
                            {
                                self.export_regions(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui
                        .add_enabled(self.session.can_undo(), egui::Button::new("Undo (Ctrl+Z)"))
                        .clicked()
                    {
                        self.session.undo();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(
                            self.session.can_redo(),
                            egui::Button::new("Redo (Ctrl+Shift+Z)"),
                        )
                        .clicked()
                    {
                        self.session.redo();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui
                        .add_enabled(
                            self.session.selected().is_some(),
                            egui::Button::new("Delete Selected"),
                        )
                        .clicked()
                    {
                        self.session.delete_selected();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Zoom In").clicked() {
                        self.session.transform_mut().zoom_in();
                        ui.close_menu();
                    }
                    if ui.button("Zoom Out").clicked() {
                        self.session.transform_mut().zoom_out();
                        ui.close_menu();
                    }
                    if ui.button("Reset Zoom").clicked() {
                        self.session.transform_mut().reset();
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.checkbox(&mut self.show_grid, "Alignment Grid");
                });

                ui.menu_button("Detect", |ui| {
                    ui.add(
                        egui::Slider::new(&mut self.sensitivity, 0.0..=1.0).text("Sensitivity"),
                    );
                    let ready = self.image_texture.is_some() && self.recognition.is_none();
                    if ui
                        .add_enabled(ready, egui::Button::new("Detect Regions"))
                        .clicked()
                    {
                        self.request_recognition();
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let has_image = self.image_texture.is_some() && self.recognition.is_none();
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.session, &mut self.show_grid, has_image)
            })
            .inner;
        if let toolbar::ToolbarAction::DetectRegions = toolbar_action {
            self.request_recognition();
        }

        // Notice bar (non-fatal warnings and results)
        if self.notice.is_some() {
            egui::TopBottomPanel::bottom("notice_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(ref notice) = self.notice {
                        ui.label(egui::RichText::new(notice).color(egui::Color32::YELLOW));
                    }
                    if ui.small_button("✖").clicked() {
                        self.notice = None;
                    }
                });
            });
        }

        // Properties panel (right side)
        egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| {
                self.properties.show(ui, &mut self.session);
            });

        self.handle_shortcuts(ctx);

        // Main canvas (center)
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref message) = self.loading_message {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.spinner();
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new(message)
                                .size(16.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                    });
                });
            } else {
                canvas::show(
                    ui,
                    &mut self.session,
                    &self.image_texture,
                    self.image_size,
                    self.show_grid,
                );
            }
        });
    }
}
