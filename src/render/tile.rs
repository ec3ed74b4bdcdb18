//! Pixel blitting of single glyph tiles from an ascii atlas onto a target
//! image. The atlas is a grid of fixed-size tiles; a glyph's tile index is
//! its codepoint plus the palette row's base offset.

use image::RgbaImage;

use crate::data::Tileset;
use crate::render::color::PaletteKey;
use crate::render::symbol::Appearance;

/// Copies the atlas tile for `appearance` into the cell `(cell_x, cell_y)`
/// of `target`. Cells the atlas or target cannot cover are left untouched.
pub fn draw_glyph(
    target: &mut RgbaImage,
    atlas: &RgbaImage,
    tileset: &Tileset,
    appearance: Appearance,
    cell_x: u32,
    cell_y: u32,
) {
    let Some(offset) = tileset.ascii_offset(appearance.color) else {
        return;
    };
    let (tw, th) = tileset.tile_size();
    if tw == 0 || th == 0 {
        return;
    }
    let tiles_per_row = atlas.width() / tw;
    if tiles_per_row == 0 {
        return;
    }
    let index = offset + appearance.glyph as u32;
    let src_x = (index % tiles_per_row) * tw;
    let src_y = (index / tiles_per_row) * th;
    if src_x + tw > atlas.width() || src_y + th > atlas.height() {
        return;
    }
    let dst_x = cell_x * tw;
    let dst_y = cell_y * th;
    if dst_x + tw > target.width() || dst_y + th > target.height() {
        return;
    }
    for dy in 0..th {
        for dx in 0..tw {
            let src = *atlas.get_pixel(src_x + dx, src_y + dy);
            let dst = target.get_pixel_mut(dst_x + dx, dst_y + dy);
            *dst = blend(*dst, src);
        }
    }
}

/// Source-over alpha blend; atlases with transparent glyph backgrounds keep
/// whatever the cell was cleared to.
pub(crate) fn blend(dst: image::Rgba<u8>, src: image::Rgba<u8>) -> image::Rgba<u8> {
    let sa = src[3] as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let inv = 255 - sa;
    let ch = |s: u8, d: u8| ((s as u32 * sa + d as u32 * inv) / 255) as u8;
    image::Rgba([
        ch(src[0], dst[0]),
        ch(src[1], dst[1]),
        ch(src[2], dst[2]),
        (sa + dst[3] as u32 * inv / 255) as u8,
    ])
}

/// Same blit addressed by raw glyph and palette key.
pub fn draw_char(
    target: &mut RgbaImage,
    atlas: &RgbaImage,
    tileset: &Tileset,
    glyph: char,
    color: PaletteKey,
    cell_x: u32,
    cell_y: u32,
) {
    draw_glyph(
        target,
        atlas,
        tileset,
        Appearance { glyph, color },
        cell_x,
        cell_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TileConfig;
    use crate::render::{BaseColor, PaletteKey};
    use image::Rgba;
    use std::path::PathBuf;

    fn test_tileset() -> Tileset {
        let config: TileConfig = serde_json::from_str(
            r#"{
                "tile_info": [{"width": 2, "height": 2}],
                "tiles-new": [{"file": "ascii.png", "ascii": [
                    {"offset": 0, "bold": false, "color": "WHITE"},
                    {"offset": 16, "bold": true, "color": "RED"}
                ]}]
            }"#,
        )
        .unwrap();
        Tileset::new(PathBuf::from("/gfx/Test"), config).unwrap()
    }

    /// 8 tiles per row of 2x2 tiles; every pixel of tile `i` has red = i.
    fn test_atlas(rows_of_tiles: u32) -> RgbaImage {
        let mut atlas = RgbaImage::new(16, rows_of_tiles * 2);
        for (x, y, px) in atlas.enumerate_pixels_mut() {
            let index = (y / 2) * 8 + x / 2;
            *px = Rgba([index as u8, 0, 0, 255]);
        }
        atlas
    }

    #[test]
    fn test_blits_indexed_tile() {
        let tileset = test_tileset();
        let atlas = test_atlas(8);
        let mut target = RgbaImage::new(8, 8);
        // '!' is codepoint 33; white/plain row starts at offset 0.
        draw_char(
            &mut target,
            &atlas,
            &tileset,
            '!',
            PaletteKey::new(BaseColor::White, false),
            1,
            2,
        );
        assert_eq!(target.get_pixel(2, 4), &Rgba([33, 0, 0, 255]));
        assert_eq!(target.get_pixel(3, 5), &Rgba([33, 0, 0, 255]));
        // Neighboring cells stay clear.
        assert_eq!(target.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_palette_offset_shifts_index() {
        let tileset = test_tileset();
        let atlas = test_atlas(16);
        let mut target = RgbaImage::new(4, 4);
        draw_char(
            &mut target,
            &atlas,
            &tileset,
            '\u{1}',
            PaletteKey::new(BaseColor::Red, true),
            0,
            0,
        );
        // offset 16 + codepoint 1 = tile 17.
        assert_eq!(target.get_pixel(0, 0), &Rgba([17, 0, 0, 255]));
    }

    #[test]
    fn test_missing_palette_row_draws_nothing() {
        let tileset = test_tileset();
        let atlas = test_atlas(8);
        let mut target = RgbaImage::new(4, 4);
        draw_char(
            &mut target,
            &atlas,
            &tileset,
            '!',
            PaletteKey::new(BaseColor::Blue, false),
            0,
            0,
        );
        assert_eq!(target.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_out_of_range_index_is_skipped() {
        let tileset = test_tileset();
        let atlas = test_atlas(2); // only 16 tiles
        let mut target = RgbaImage::new(4, 4);
        draw_char(
            &mut target,
            &atlas,
            &tileset,
            '\u{ff}',
            PaletteKey::new(BaseColor::White, false),
            0,
            0,
        );
        assert_eq!(target.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }
}
