//! Tileset configs: a glyph atlas image plus an `ascii` fallback table
//! mapping `(color, bold)` pairs to base offsets into the atlas.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use serde::Deserialize;

use crate::render::PaletteKey;

#[derive(Debug, Clone, Deserialize)]
pub struct TileInfo {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AsciiEntry {
    pub offset: u32,
    pub bold: bool,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileGroup {
    pub file: String,
    #[serde(default)]
    pub ascii: Option<Vec<AsciiEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileConfig {
    pub tile_info: Vec<TileInfo>,
    #[serde(rename = "tiles-new")]
    pub tiles_new: Vec<TileGroup>,
}

/// A discovered tileset: its base directory, parsed config, and the
/// precomputed `(color, bold)` offset table from its ascii fallback group.
#[derive(Debug, Clone)]
pub struct Tileset {
    pub root: PathBuf,
    pub config: TileConfig,
    ascii_offsets: HashMap<(String, bool), u32>,
    ascii_file: Option<String>,
}

impl Tileset {
    /// Builds a tileset from a parsed config, indexing the first tile group
    /// that declares an ascii fallback table. Returns `None` when the config
    /// has no such group or no tile dimensions (the editor cannot render
    /// with it).
    pub fn new(root: PathBuf, config: TileConfig) -> Option<Self> {
        if config.tile_info.is_empty() {
            return None;
        }
        let fallback = config
            .tiles_new
            .iter()
            .find(|group| group.ascii.is_some())?;
        let mut ascii_offsets = HashMap::new();
        for entry in fallback.ascii.as_deref().unwrap_or_default() {
            ascii_offsets.insert((entry.color.clone(), entry.bold), entry.offset);
        }
        let ascii_file = Some(fallback.file.clone());
        Some(Self {
            root,
            config,
            ascii_offsets,
            ascii_file,
        })
    }

    /// Tile pixel dimensions, `(width, height)`.
    pub fn tile_size(&self) -> (u32, u32) {
        let info = &self.config.tile_info[0];
        (info.width, info.height)
    }

    /// Base atlas offset for a palette key, if the ascii table declares it.
    pub fn ascii_offset(&self, key: PaletteKey) -> Option<u32> {
        self.ascii_offsets
            .get(&(key.color.key().to_owned(), key.bold))
            .copied()
    }

    /// Path of the ascii fallback atlas image.
    pub fn atlas_path(&self) -> PathBuf {
        self.root.join(self.ascii_file.as_deref().unwrap_or_default())
    }

    /// Decodes the atlas image from disk.
    pub fn load_atlas(&self) -> image::ImageResult<RgbaImage> {
        Ok(image::open(self.atlas_path())?.to_rgba8())
    }
}

/// Parses a `tile_config.json` found under `dir` into a usable tileset.
pub fn load_tileset(dir: &Path) -> Option<Tileset> {
    let config_path = dir.join("tile_config.json");
    let bytes = std::fs::read(&config_path).ok()?;
    let config: TileConfig = serde_json::from_slice(&bytes).ok()?;
    Tileset::new(dir.to_path_buf(), config)
}
