//! Translation of game content color names into the legacy 16-color
//! terminal palette used by ASCII tileset fallback tables.

use log::warn;

/// One of the eight base terminal colors. The tileset's ascii table keys
/// its rows by base color name plus a bold flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl BaseColor {
    /// The uppercase name used in tileset `ascii` entries.
    pub fn key(self) -> &'static str {
        match self {
            BaseColor::Black => "BLACK",
            BaseColor::Red => "RED",
            BaseColor::Green => "GREEN",
            BaseColor::Yellow => "YELLOW",
            BaseColor::Blue => "BLUE",
            BaseColor::Magenta => "MAGENTA",
            BaseColor::Cyan => "CYAN",
            BaseColor::White => "WHITE",
        }
    }
}

/// A `(base color, bold)` pair indexing into a tileset's ascii offset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteKey {
    pub color: BaseColor,
    pub bold: bool,
}

impl PaletteKey {
    pub const fn new(color: BaseColor, bold: bool) -> Self {
        Self { color, bold }
    }
}

/// Maps a content color name (e.g. "ltgreen", "dkgray") onto the legacy
/// terminal palette. Unknown names degrade to plain white so a single odd
/// content entry can never break a repaint.
pub fn map_color(name: &str) -> PaletteKey {
    use BaseColor::*;
    match name {
        "dkgray" => PaletteKey::new(Black, true),
        "red" => PaletteKey::new(Red, false),
        "ltred_green" => PaletteKey::new(Red, true),
        "green" => PaletteKey::new(Green, false),
        "ltgreen" => PaletteKey::new(Green, true),
        "light_green" => PaletteKey::new(Green, true),
        "brown" => PaletteKey::new(Yellow, false),
        "blue" => PaletteKey::new(Blue, false),
        "magenta" => PaletteKey::new(Magenta, false),
        "cyan" => PaletteKey::new(Cyan, false),
        "ltcyan" => PaletteKey::new(Cyan, true),
        "white" => PaletteKey::new(White, false),
        "ltgray" => PaletteKey::new(White, true),
        "ltred" => PaletteKey::new(Red, true),
        "yellow" => PaletteKey::new(Yellow, true),
        "black_white" => PaletteKey::new(Black, false),
        "black" => PaletteKey::new(Black, false),
        "" => PaletteKey::new(White, false),
        other => {
            warn!("unknown foreground color {:?}, rendering as white", other);
            PaletteKey::new(White, false)
        }
    }
}
