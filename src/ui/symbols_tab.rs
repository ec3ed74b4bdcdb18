//! The symbol palette tab: one row per mapped symbol with its swatch,
//! terrain and furniture pickers, plus brush selection and add/remove.

use std::collections::HashMap;

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions, Vec2};
use image::RgbaImage;

use crate::data::{GameDataIndex, Tileset};
use crate::editor::{AppState, PickerTarget, Reducer, SPACE_SYMBOL};
use crate::render::render_swatch;
use crate::ui::canvas_panel::CANVAS_SCALE;

/// Caches swatch textures keyed by what they depict. Rendering a swatch is
/// cheap but texture uploads every frame are not.
#[derive(Default)]
pub struct SwatchCache {
    textures: HashMap<(String, Option<String>, bool), TextureHandle>,
}

impl SwatchCache {
    fn get(
        &mut self,
        ctx: &egui::Context,
        data: &GameDataIndex,
        tileset: &Tileset,
        atlas: &RgbaImage,
        terrain_id: &str,
        furniture_id: Option<&str>,
        selected: bool,
    ) -> TextureHandle {
        let key = (
            terrain_id.to_owned(),
            furniture_id.map(str::to_owned),
            selected,
        );
        self.textures
            .entry(key)
            .or_insert_with(|| {
                let img = render_swatch(data, tileset, atlas, terrain_id, furniture_id, selected);
                ctx.load_texture("swatch", to_color_image(&img), TextureOptions::NEAREST)
            })
            .clone()
    }
}

pub fn to_color_image(img: &RgbaImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [img.width() as usize, img.height() as usize],
        img.as_raw(),
    )
}

pub fn show(
    ui: &mut egui::Ui,
    state: &AppState,
    data: &GameDataIndex,
    tileset: &Tileset,
    atlas: &RgbaImage,
    swatches: &mut SwatchCache,
    queue: &mut Vec<Reducer>,
) {
    let doc = &state.document;
    let swatch_size = {
        let (tw, th) = tileset.tile_size();
        Vec2::new(tw as f32, th as f32) * CANVAS_SCALE
    };

    ui.horizontal(|ui| {
        ui.label("Fill terrain:");
        if ui.button(&doc.fill_terrain).clicked() {
            queue.push(Reducer::OpenPicker(PickerTarget::FillTerrain));
        }
    });
    ui.separator();

    // The space symbol is always present: it paints the fill terrain.
    ui.horizontal(|ui| {
        let tex = swatches.get(
            ui.ctx(),
            data,
            tileset,
            atlas,
            &doc.fill_terrain,
            None,
            state.brush == SPACE_SYMBOL,
        );
        if ui
            .add(egui::ImageButton::new(tex.id(), swatch_size))
            .clicked()
        {
            queue.push(Reducer::SetBrush(SPACE_SYMBOL));
        }
        ui.monospace("(space)");
    });

    let symbols: Vec<char> = doc.terrain_by_symbol.keys().copied().collect();
    for symbol in symbols {
        let terrain_id = &doc.terrain_by_symbol[&symbol];
        let furniture_id = doc.furniture_by_symbol.get(&symbol).map(String::as_str);
        ui.horizontal(|ui| {
            let tex = swatches.get(
                ui.ctx(),
                data,
                tileset,
                atlas,
                terrain_id,
                furniture_id,
                state.brush == symbol,
            );
            if ui
                .add(egui::ImageButton::new(tex.id(), swatch_size))
                .clicked()
            {
                queue.push(Reducer::SetBrush(symbol));
            }
            ui.monospace(symbol.to_string());
            if ui.button(terrain_id).clicked() {
                queue.push(Reducer::OpenPicker(PickerTarget::SymbolTerrain(symbol)));
            }
            match furniture_id {
                Some(furn) => {
                    if ui.button(furn).clicked() {
                        queue.push(Reducer::OpenPicker(PickerTarget::SymbolFurniture(symbol)));
                    }
                    if ui.small_button("x").on_hover_text("remove furniture").clicked() {
                        queue.push(Reducer::RemoveSymbolFurniture(symbol));
                    }
                }
                None => {
                    if ui.small_button("+ furniture").clicked() {
                        queue.push(Reducer::OpenPicker(PickerTarget::SymbolFurniture(symbol)));
                    }
                }
            }
            if ui.small_button("-").on_hover_text("remove symbol").clicked() {
                queue.push(Reducer::RemoveSymbol(symbol));
            }
        });
    }

    ui.separator();
    let exhausted = doc.unused_symbol().is_none();
    if ui
        .add_enabled(!exhausted, egui::Button::new("Add symbol"))
        .clicked()
    {
        queue.push(Reducer::AddSymbol);
    }
}
