// src/data/mod.rs
pub mod config;
pub mod defs;
pub mod index;
pub mod tileset;

pub use config::{last_content_root, remember_content_root};
pub use defs::{FurnitureDef, ItemGroupDef, MonsterDef, MonsterGroupDef, OneOrMany, TerrainDef};
pub use index::{DataError, GameDataIndex};
pub use tileset::{TileConfig, Tileset};
