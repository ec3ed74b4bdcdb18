//! Offscreen composition of the map view and palette swatches into RGBA
//! images the UI uploads as textures. Rendering is a pure function of the
//! document, the loaded content, and the overlay description; the UI only
//! re-renders when one of those changed.

use image::{Rgba, RgbaImage};

use crate::data::{GameDataIndex, Tileset};
use crate::document::{Extent, MapgenDocument, ZoneKind};
use crate::render::symbol::{resolve_cell, resolve_ids};
use crate::render::tile::{blend, draw_glyph};

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const SELECTED_SWATCH_BG: Rgba<u8> = Rgba([255, 0, 0, 255]);
const HOVER_OUTLINE: Rgba<u8> = Rgba([255, 0, 0, 255]);
const HOVER_OUTLINE_PX: u32 = 4;

/// Transient view state composited over the tile grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanvasOverlay {
    /// Zone kind whose rectangles are shown; `None` on the symbols tab.
    pub zone_kind: Option<ZoneKind>,
    /// Index of the selected zone of that kind, drawn filled.
    pub selected_zone: Option<usize>,
    /// Grid cell under the cursor.
    pub hover: Option<(i32, i32)>,
    /// In-progress zone drag rectangle.
    pub drag_rect: Option<(Extent, Extent)>,
}

fn zone_stroke(kind: ZoneKind) -> Rgba<u8> {
    match kind {
        ZoneKind::Loot => Rgba([255, 166, 0, 255]),
        ZoneKind::Monsters => Rgba([0, 128, 0, 255]),
    }
}

fn zone_fill(kind: ZoneKind) -> Rgba<u8> {
    let Rgba([r, g, b, _]) = zone_stroke(kind);
    Rgba([r, g, b, 128])
}

/// Pixel rectangle covering a cell-extent pair, `(x, y, w, h)`.
fn cell_rect_px(tileset: &Tileset, xr: Extent, yr: Extent) -> (u32, u32, u32, u32) {
    let (tw, th) = tileset.tile_size();
    (
        xr.lo.max(0) as u32 * tw,
        yr.lo.max(0) as u32 * th,
        xr.len() * tw,
        yr.len() * th,
    )
}

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x1 = (x + w).min(img.width());
    let y1 = (y + h).min(img.height());
    for py in y.min(img.height())..y1 {
        for px in x.min(img.width())..x1 {
            let dst = img.get_pixel_mut(px, py);
            *dst = blend(*dst, color);
        }
    }
}

fn stroke_rect(
    img: &mut RgbaImage,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    thickness: u32,
    color: Rgba<u8>,
) {
    if w == 0 || h == 0 {
        return;
    }
    let t = thickness.min(w).min(h);
    fill_rect(img, x, y, w, t, color);
    fill_rect(img, x, y + h - t, w, t, color);
    fill_rect(img, x, y, t, h, color);
    fill_rect(img, x + w - t, y, t, h, color);
}

/// Renders the whole document grid plus the overlay into a fresh image.
pub fn render_map(
    doc: &MapgenDocument,
    data: &GameDataIndex,
    tileset: &Tileset,
    atlas: &RgbaImage,
    overlay: &CanvasOverlay,
) -> RgbaImage {
    let (tw, th) = tileset.tile_size();
    let width = doc.width() as u32;
    let height = doc.height() as u32;
    let mut img = RgbaImage::from_pixel(width * tw, height * th, BACKGROUND);

    for y in 0..height {
        for x in 0..width {
            let app = resolve_cell(doc, data, x as i32, y as i32);
            draw_glyph(&mut img, atlas, tileset, app, x, y);
        }
    }

    match overlay.zone_kind {
        Some(kind) => {
            let hovered = overlay
                .hover
                .and_then(|(hx, hy)| doc.zone_index_at(kind, hx, hy));
            for idx in 0..doc.zone_count(kind) {
                let Some((xr, yr)) = doc.zone_rect(kind, idx) else {
                    continue;
                };
                let (x, y, w, h) = cell_rect_px(tileset, xr, yr);
                if overlay.selected_zone == Some(idx) || hovered == Some(idx) {
                    fill_rect(&mut img, x, y, w, h, zone_fill(kind));
                }
                stroke_rect(&mut img, x, y, w, h, 1, zone_stroke(kind));
            }
            if let Some((xr, yr)) = overlay.drag_rect {
                let (x, y, w, h) = cell_rect_px(tileset, xr, yr);
                stroke_rect(&mut img, x, y, w, h, 1, zone_stroke(kind));
            }
        }
        None => {
            if let Some((hx, hy)) = overlay.hover {
                if doc.in_bounds(hx, hy) {
                    let (x, y, w, h) =
                        cell_rect_px(tileset, Extent::new(hx, hx), Extent::new(hy, hy));
                    stroke_rect(&mut img, x, y, w, h, HOVER_OUTLINE_PX, HOVER_OUTLINE);
                }
            }
        }
    }

    img
}

/// Renders a single palette swatch tile. Selected swatches sit on a red
/// background, all others on the canvas background.
pub fn render_swatch(
    data: &GameDataIndex,
    tileset: &Tileset,
    atlas: &RgbaImage,
    terrain_id: &str,
    furniture_id: Option<&str>,
    selected: bool,
) -> RgbaImage {
    let (tw, th) = tileset.tile_size();
    let bg = if selected { SELECTED_SWATCH_BG } else { BACKGROUND };
    let mut img = RgbaImage::from_pixel(tw, th, bg);
    let app = resolve_ids(data, terrain_id, furniture_id);
    draw_glyph(&mut img, atlas, tileset, app, 0, 0);
    img
}
