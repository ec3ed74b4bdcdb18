//! Auto-wall corner glyph selection.
//!
//! Terrains flagged `AUTO_WALL_SYMBOL` are not drawn with their literal
//! glyph; instead the glyph is chosen from how the cell joins its four
//! neighbors within the same connectivity group, using a fixed 16-entry
//! box-drawing table indexed by a directional bit code.

use crate::data::{GameDataIndex, TerrainDef};
use crate::document::MapgenDocument;

pub const CONNECT_LEFT: u8 = 8;
pub const CONNECT_UP: u8 = 4;
pub const CONNECT_RIGHT: u8 = 2;
pub const CONNECT_DOWN: u8 = 1;

/// bit code (left*8 + up*4 + right*2 + down*1) -> glyph. The codepoints
/// index the reference tileset's font atlas; the visual semantics only hold
/// if these exact values are kept.
const WALL_GLYPHS: [char; 16] = [
    '\u{cd}', // 0b0000 isolated
    '\u{ba}', // 0b0001 down
    '\u{cd}', // 0b0010 right
    '\u{c9}', // 0b0011 right+down
    '\u{ba}', // 0b0100 up
    '\u{ba}', // 0b0101 up+down
    '\u{c8}', // 0b0110 up+right
    '\u{cc}', // 0b0111 up+right+down
    '\u{cd}', // 0b1000 left
    '\u{bb}', // 0b1001 left+down
    '\u{cd}', // 0b1010 left+right
    '\u{cb}', // 0b1011 left+right+down
    '\u{bc}', // 0b1100 left+up
    '\u{b9}', // 0b1101 left+up+down
    '\u{ca}', // 0b1110 left+up+right
    '\u{ce}', // 0b1111 all four
];

/// Glyph for a 4-bit directional code.
pub fn wall_corner_glyph(code: u8) -> char {
    WALL_GLYPHS[(code & 0x0f) as usize]
}

/// A terrain's connectivity group: its explicit `connects_to` group, or
/// "WALL" when it carries a wall capability flag, or none. Terrains with no
/// group never connect to anything, each other included.
pub fn connect_group(ter: &TerrainDef) -> Option<&str> {
    if let Some(group) = ter.connects_to.as_deref() {
        return Some(group);
    }
    if ter.has_flag("WALL") || ter.has_flag("CONNECT_TO_WALL") {
        return Some("WALL");
    }
    None
}

/// Computes the corner glyph for the auto-wall terrain at `(x, y)`.
/// Out-of-grid neighbors resolve to the document's fill terrain.
pub fn determine_wall_corner(
    doc: &MapgenDocument,
    data: &GameDataIndex,
    x: i32,
    y: i32,
) -> char {
    let own = group_at(doc, data, x, y);
    let connected = |neighbor: Option<&str>| matches!((own, neighbor), (Some(a), Some(b)) if a == b);
    let mut code = 0u8;
    if connected(group_at(doc, data, x - 1, y)) {
        code |= CONNECT_LEFT;
    }
    if connected(group_at(doc, data, x, y - 1)) {
        code |= CONNECT_UP;
    }
    if connected(group_at(doc, data, x + 1, y)) {
        code |= CONNECT_RIGHT;
    }
    if connected(group_at(doc, data, x, y + 1)) {
        code |= CONNECT_DOWN;
    }
    wall_corner_glyph(code)
}

fn group_at<'a>(doc: &MapgenDocument, data: &'a GameDataIndex, x: i32, y: i32) -> Option<&'a str> {
    data.terrain
        .get(doc.terrain_id_at(x, y))
        .and_then(connect_group)
}
