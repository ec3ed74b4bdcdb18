// src/render/mod.rs
pub mod canvas;
pub mod color;
pub mod symbol;
pub mod tile;
pub mod walls;

pub use canvas::{render_map, render_swatch, CanvasOverlay};
pub use color::{map_color, BaseColor, PaletteKey};
pub use symbol::{resolve_cell, resolve_ids, Appearance};
pub use walls::{connect_group, determine_wall_corner, wall_corner_glyph};
