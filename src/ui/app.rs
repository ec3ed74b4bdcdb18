//! The eframe application: a content-root picking phase, then the editor
//! shell. The shell collects reducers from every panel during the frame and
//! folds them over the state once at the end, so there is exactly one
//! writer per frame regardless of how many widgets queued edits.

use std::path::Path;

use eframe::egui::{self, Color32, Context, ScrollArea, TextureHandle, TextureOptions};
use image::RgbaImage;
use log::info;

use crate::data::{last_content_root, remember_content_root, GameDataIndex, Tileset};
use crate::document::{export_mapgen, parse_mapgen, MapgenDocument};
use crate::editor::{apply_all, AppState, Reducer, Tab};
use crate::render::{render_map, CanvasOverlay};
use crate::ui::canvas_panel;
use crate::ui::dialog::{DialogManager, DialogResult};
use crate::ui::picker_modal;
use crate::ui::symbols_tab::{self, to_color_image, SwatchCache};
use crate::ui::zones_tab;

enum Phase {
    PickRoot { error: Option<String> },
    Ready(Box<EditorShell>),
}

pub struct EditorApp {
    phase: Phase,
}

impl EditorApp {
    /// Starts from the remembered content root when one is still valid,
    /// otherwise asks for one.
    pub fn new() -> Self {
        let phase = match last_content_root() {
            Some(root) => match EditorShell::load(&root) {
                Ok(shell) => Phase::Ready(Box::new(shell)),
                Err(error) => Phase::PickRoot { error: Some(error) },
            },
            None => Phase::PickRoot { error: None },
        };
        Self { phase }
    }
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        match &mut self.phase {
            Phase::PickRoot { error } => {
                let mut next = None;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Mapgen Editor");
                    ui.label("Pick a game content folder (the one containing data/json and gfx).");
                    if let Some(error) = error {
                        ui.colored_label(Color32::RED, error.as_str());
                    }
                    if ui.button("Choose content folder...").clicked() {
                        if let Some(root) = rfd::FileDialog::new().pick_folder() {
                            next = Some(EditorShell::load(&root));
                        }
                    }
                });
                match next {
                    Some(Ok(shell)) => self.phase = Phase::Ready(Box::new(shell)),
                    Some(Err(e)) => *error = Some(e),
                    None => {}
                }
            }
            Phase::Ready(shell) => {
                shell.update(ctx);
                if shell.change_root_requested {
                    self.phase = Phase::PickRoot { error: None };
                }
            }
        }
    }
}

/// Everything a loaded editing session owns.
struct EditorShell {
    data: GameDataIndex,
    tileset: Tileset,
    atlas: RgbaImage,
    state: AppState,
    queue: Vec<Reducer>,
    map_texture: Option<TextureHandle>,
    /// What the cached map texture was rendered from.
    map_key: Option<(MapgenDocument, CanvasOverlay)>,
    swatches: SwatchCache,
    drag_anchor: Option<(i32, i32)>,
    overmap_buffer: String,
    dialogs: DialogManager,
    change_root_requested: bool,
}

impl EditorShell {
    fn load(root: &Path) -> Result<Self, String> {
        let data = GameDataIndex::load(root).map_err(|e| e.to_string())?;
        let tileset = data.preferred_tileset().clone();
        let atlas = tileset
            .load_atlas()
            .map_err(|e| format!("could not load tileset atlas: {}", e))?;
        remember_content_root(root);
        info!("content root ready: {}", root.display());
        let state = AppState::default();
        let overmap_buffer = state.document.overmap_terrain_ids.join(" ");
        Ok(Self {
            data,
            tileset,
            atlas,
            state,
            queue: Vec::new(),
            map_texture: None,
            map_key: None,
            swatches: SwatchCache::default(),
            drag_anchor: None,
            overmap_buffer,
            dialogs: DialogManager::new(),
            change_root_requested: false,
        })
    }

    fn update(&mut self, ctx: &Context) {
        if let Some(DialogResult::Discard) = self.dialogs.update(ctx) {
            self.queue.push(Reducer::NewDocument);
        }

        self.bottom_bar(ctx);
        self.side_panel(ctx);
        self.central_panel(ctx);
        picker_modal::show(ctx, &self.state, &self.data, &mut self.queue);

        if !self.queue.is_empty() {
            let queue = std::mem::take(&mut self.queue);
            let prev = std::mem::take(&mut self.state);
            self.state = apply_all(queue, prev);
            ctx.request_repaint();
        }
    }

    fn bottom_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("New").clicked() {
                    if self.state.document == MapgenDocument::empty() {
                        self.queue.push(Reducer::NewDocument);
                    } else {
                        self.dialogs.show_discard_dialog();
                    }
                }
                if ui.button("Open...").clicked() {
                    self.open_document();
                }
                if ui.button("Export...").clicked() {
                    self.export_document();
                }
                if ui.button("Content root...").clicked() {
                    self.change_root_requested = true;
                }

                ui.separator();
                ui.label("overmap terrain:");
                let response = ui.text_edit_singleline(&mut self.overmap_buffer);
                if response.changed() {
                    self.queue
                        .push(Reducer::SetOvermapIds(self.overmap_buffer.clone()));
                }
                if !response.has_focus() {
                    self.overmap_buffer = self.state.document.overmap_terrain_ids.join(" ");
                }

                ui.label("weight:");
                let mut weight = self.state.document.weight.unwrap_or(0);
                if ui
                    .add(egui::DragValue::new(&mut weight))
                    .changed()
                {
                    let weight = (weight > 0).then_some(weight);
                    self.queue.push(Reducer::SetWeight(weight));
                }

                if let Some(message) = &self.state.error_message {
                    ui.separator();
                    ui.colored_label(Color32::RED, message.as_str());
                    if ui.small_button("dismiss").clicked() {
                        self.queue.push(Reducer::ClearError);
                    }
                }
            });
        });
    }

    fn side_panel(&mut self, ctx: &Context) {
        egui::SidePanel::left("palette").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (tab, label) in [(Tab::Symbols, "Symbols"), (Tab::Zones, "Zones")] {
                    if ui.selectable_label(self.state.tab == tab, label).clicked() {
                        self.queue.push(Reducer::SetTab(tab));
                    }
                }
            });
            ui.separator();
            ScrollArea::vertical().show(ui, |ui| match self.state.tab {
                Tab::Symbols => symbols_tab::show(
                    ui,
                    &self.state,
                    &self.data,
                    &self.tileset,
                    &self.atlas,
                    &mut self.swatches,
                    &mut self.queue,
                ),
                Tab::Zones => zones_tab::show(ui, &self.state, &self.data, &mut self.queue),
            });
            if let Some((x, y)) = self.state.hover {
                ui.separator();
                ui.label(format!("({}, {}) {}", x, y, self.hover_description(x, y)));
            }
        });
    }

    fn central_panel(&mut self, ctx: &Context) {
        self.ensure_map_texture(ctx);
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                ScrollArea::both().show(ui, |ui| {
                    if let Some(texture) = &self.map_texture {
                        canvas_panel::show(
                            ui,
                            &self.state,
                            texture,
                            self.tileset.tile_size(),
                            &mut self.queue,
                            &mut self.drag_anchor,
                        );
                    }
                });
            });
    }

    /// Re-renders the map texture only when the document or the overlay it
    /// was drawn with changed.
    fn ensure_map_texture(&mut self, ctx: &Context) {
        let overlay = self.overlay();
        let key = (self.state.document.clone(), overlay);
        if self.map_key.as_ref() == Some(&key) && self.map_texture.is_some() {
            return;
        }
        let img = render_map(
            &self.state.document,
            &self.data,
            &self.tileset,
            &self.atlas,
            &overlay,
        );
        self.map_texture =
            Some(ctx.load_texture("map", to_color_image(&img), TextureOptions::NEAREST));
        self.map_key = Some(key);
    }

    fn overlay(&self) -> CanvasOverlay {
        let zones_active = self.state.tab == Tab::Zones;
        CanvasOverlay {
            zone_kind: zones_active.then_some(self.state.zone_options.kind),
            selected_zone: if zones_active { self.state.selected_zone } else { None },
            hover: self.state.hover,
            drag_rect: if zones_active { self.state.drag_rect } else { None },
        }
    }

    /// Display name of what the cursor is over: terrain, plus furniture
    /// when the symbol carries one.
    fn hover_description(&self, x: i32, y: i32) -> String {
        let doc = &self.state.document;
        let terrain_id = doc.terrain_id_at(x, y);
        let mut desc = self
            .data
            .terrain
            .get(terrain_id)
            .filter(|t| !t.name.is_empty())
            .map(|t| t.name.clone())
            .unwrap_or_else(|| terrain_id.to_owned());
        if let Some(furn_id) = doc.furniture_by_symbol.get(&doc.symbol_at(x, y)) {
            let furn = self
                .data
                .furniture
                .get(furn_id)
                .filter(|f| !f.name.is_empty())
                .map(|f| f.name.as_str())
                .unwrap_or(furn_id);
            desc = format!("{} / {}", desc, furn);
        }
        desc
    }

    fn open_document(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };
        let reducer = match load_document(&path) {
            Ok(doc) => Reducer::LoadDocument(doc),
            Err(e) => Reducer::ShowError(e),
        };
        self.queue.push(reducer);
    }

    fn export_document(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("mapgen.json")
            .save_file()
        else {
            return;
        };
        let out = export_mapgen(&self.state.document);
        if let Err(e) = std::fs::write(&path, out) {
            self.queue
                .push(Reducer::ShowError(format!("could not write file: {}", e)));
        } else {
            info!("exported {}", path.display());
        }
    }
}

fn load_document(path: &Path) -> Result<MapgenDocument, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("could not read file: {}", e))?;
    parse_mapgen(&bytes).map_err(|e| e.to_string())
}
