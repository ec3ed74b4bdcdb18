// src/document/mod.rs
pub mod document;
pub mod io;
pub mod pretty;

pub use self::document::{
    Extent, LootZone, MapgenDocument, MonsterZone, Repeat, ZoneKind, SYMBOL_ALPHABET,
};
pub use self::io::{export_mapgen, parse_mapgen, DocumentError};
