//! Resolves a grid cell (or a swatch's raw ids) to the glyph and palette
//! color it should be drawn with. Furniture masks terrain; auto-wall
//! terrains swap their glyph for a box-drawing corner.

use log::warn;

use crate::data::GameDataIndex;
use crate::document::MapgenDocument;
use crate::render::color::{map_color, BaseColor, PaletteKey};
use crate::render::walls::{determine_wall_corner, wall_corner_glyph};

/// What a cell looks like: one glyph in one palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub glyph: char,
    pub color: PaletteKey,
}

impl Appearance {
    fn blank() -> Self {
        Self {
            glyph: ' ',
            color: PaletteKey::new(BaseColor::White, false),
        }
    }
}

/// Appearance of the document cell at `(x, y)`.
///
/// The cell's symbol is looked up in the furniture map first, then the
/// terrain map, then falls through to the fill terrain. Terrain ids with no
/// definition in the content index render as a blank cell rather than
/// aborting the repaint.
pub fn resolve_cell(
    doc: &MapgenDocument,
    data: &GameDataIndex,
    x: i32,
    y: i32,
) -> Appearance {
    let symbol = doc.symbol_at(x, y);
    if let Some(furn_id) = doc.furniture_by_symbol.get(&symbol) {
        if let Some(furn) = data.furniture.get(furn_id) {
            return Appearance {
                glyph: furn.glyph(),
                color: map_color(furn.color_name()),
            };
        }
        warn!("furniture id {:?} not present in loaded content", furn_id);
    }

    let ter_id = doc.terrain_id_at(x, y);
    let Some(ter) = data.terrain.get(ter_id) else {
        debug_assert!(false, "terrain id {:?} not present in loaded content", ter_id);
        warn!("terrain id {:?} not present in loaded content", ter_id);
        return Appearance::blank();
    };
    let glyph = if ter.has_flag("AUTO_WALL_SYMBOL") {
        determine_wall_corner(doc, data, x, y)
    } else {
        ter.glyph()
    };
    Appearance {
        glyph,
        color: map_color(ter.color_name()),
    }
}

/// Appearance of a terrain/furniture pairing outside any grid context, as
/// used by palette swatches. Auto-wall terrains have no neighbors here and
/// draw the isolated corner form.
pub fn resolve_ids(
    data: &GameDataIndex,
    terrain_id: &str,
    furniture_id: Option<&str>,
) -> Appearance {
    if let Some(furn) = furniture_id.and_then(|id| data.furniture.get(id)) {
        return Appearance {
            glyph: furn.glyph(),
            color: map_color(furn.color_name()),
        };
    }
    let Some(ter) = data.terrain.get(terrain_id) else {
        return Appearance::blank();
    };
    let glyph = if ter.has_flag("AUTO_WALL_SYMBOL") {
        wall_corner_glyph(0)
    } else {
        ter.glyph()
    };
    Appearance {
        glyph,
        color: map_color(ter.color_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FurnitureDef, OneOrMany, TerrainDef};

    fn index_with(terrains: Vec<TerrainDef>, furniture: Vec<FurnitureDef>) -> GameDataIndex {
        let mut data = GameDataIndex::default();
        for t in terrains {
            data.terrain.insert(t.id.clone(), t);
        }
        for f in furniture {
            data.furniture.insert(f.id.clone(), f);
        }
        data
    }

    fn terrain(id: &str, symbol: &str, color: &str) -> TerrainDef {
        TerrainDef {
            id: id.to_owned(),
            symbol: symbol.to_owned(),
            color: Some(OneOrMany::One(color.to_owned())),
            ..TerrainDef::default()
        }
    }

    #[test]
    fn test_fill_terrain_appearance() {
        let data = index_with(vec![terrain("t_rock", "#", "dkgray")], vec![]);
        let doc = MapgenDocument::empty();
        let app = resolve_cell(&doc, &data, 3, 3);
        assert_eq!(app.glyph, '#');
        assert_eq!(app.color, map_color("dkgray"));
    }

    #[test]
    fn test_furniture_masks_terrain() {
        let data = index_with(
            vec![terrain("t_rock", "#", "dkgray"), terrain("t_floor", ".", "ltgray")],
            vec![FurnitureDef {
                id: "f_chair".to_owned(),
                symbol: "h".to_owned(),
                color: Some(OneOrMany::One("brown".to_owned())),
                ..FurnitureDef::default()
            }],
        );
        let mut doc = MapgenDocument::empty();
        doc.terrain_by_symbol.insert('c', "t_floor".to_owned());
        doc.furniture_by_symbol.insert('c', "f_chair".to_owned());
        doc.set_symbol(2, 2, 'c');
        let app = resolve_cell(&doc, &data, 2, 2);
        assert_eq!(app.glyph, 'h');
        assert_eq!(app.color, map_color("brown"));
        // A symbol with no furniture still shows its terrain.
        assert_eq!(resolve_cell(&doc, &data, 0, 0).glyph, '#');
    }

    #[test]
    fn test_auto_wall_uses_corner_glyph() {
        let mut wall = terrain("t_wall", "|", "ltgray");
        wall.flags = vec!["WALL".to_owned(), "AUTO_WALL_SYMBOL".to_owned()];
        let data = index_with(vec![terrain("t_rock", "#", "dkgray"), wall], vec![]);
        let mut doc = MapgenDocument::empty();
        doc.terrain_by_symbol.insert('w', "t_wall".to_owned());
        doc.set_symbol(4, 4, 'w');
        doc.set_symbol(5, 4, 'w');
        let app = resolve_cell(&doc, &data, 4, 4);
        // One wall to the right: the literal '|' is replaced.
        assert_eq!(app.glyph, wall_corner_glyph(2));
    }

    #[test]
    fn test_swatch_auto_wall_is_isolated_form() {
        let mut wall = terrain("t_wall", "|", "ltgray");
        wall.flags = vec!["AUTO_WALL_SYMBOL".to_owned()];
        let data = index_with(vec![wall], vec![]);
        let app = resolve_ids(&data, "t_wall", None);
        assert_eq!(app.glyph, wall_corner_glyph(0));
    }

    #[test]
    fn test_unknown_ids_render_blank() {
        let data = GameDataIndex::default();
        assert_eq!(resolve_ids(&data, "t_missing", None), Appearance::blank());
        assert_eq!(
            resolve_ids(&data, "t_missing", Some("f_missing")),
            Appearance::blank()
        );
    }
}
