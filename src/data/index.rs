//! Loads and indexes a game content root: every JSON file under
//! `data/json/` is parsed (in parallel) and dispatched by its `type` tag
//! into per-id lookup tables, and `gfx/*/tile_config.json` configs are
//! discovered as candidate tilesets. The index is read-only for the rest
//! of the session.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;
use serde_json::Value;
use thiserror::Error;

use crate::data::defs::{FurnitureDef, ItemGroupDef, MonsterDef, MonsterGroupDef, TerrainDef};
use crate::data::tileset::{load_tileset, Tileset};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no data/json directory under {0}")]
    NoContent(PathBuf),
    #[error("no usable tileset (with an ascii fallback table) under {0}")]
    NoTileset(PathBuf),
}

#[derive(Debug, Default)]
pub struct GameDataIndex {
    pub terrain: HashMap<String, TerrainDef>,
    pub furniture: HashMap<String, FurnitureDef>,
    pub item_group: HashMap<String, ItemGroupDef>,
    /// Keyed by `name` rather than `id`; that is how mapgen zones refer to
    /// monster groups.
    pub monster_group: HashMap<String, MonsterGroupDef>,
    pub monster: HashMap<String, MonsterDef>,
    pub tilesets: Vec<Tileset>,
}

impl GameDataIndex {
    /// Loads and indexes the content tree under `root`.
    pub fn load(root: &Path) -> Result<Self, DataError> {
        let json_root = root.join("data").join("json");
        if !json_root.is_dir() {
            return Err(DataError::NoContent(root.to_path_buf()));
        }

        let mut files = Vec::new();
        collect_json_files(&json_root, &mut files)?;
        info!("indexing {} content files under {}", files.len(), json_root.display());

        let objects: Vec<Value> = files
            .par_iter()
            .flat_map_iter(|path| parse_objects(path))
            .collect();

        let mut index = GameDataIndex::default();
        for obj in objects {
            index.ingest(obj);
        }

        index.tilesets = discover_tilesets(root);
        if index.tilesets.is_empty() {
            return Err(DataError::NoTileset(root.to_path_buf()));
        }
        info!(
            "indexed {} terrain, {} furniture, {} item groups, {} monster groups, {} tilesets",
            index.terrain.len(),
            index.furniture.len(),
            index.item_group.len(),
            index.monster_group.len(),
            index.tilesets.len()
        );
        Ok(index)
    }

    /// Files a single content object into the matching table, ignoring
    /// types the editor does not consume.
    fn ingest(&mut self, obj: Value) {
        let ty = obj.get("type").and_then(Value::as_str).unwrap_or_default();
        match ty {
            "terrain" => {
                if let Ok(def) = serde_json::from_value::<TerrainDef>(obj) {
                    self.terrain.insert(def.id.clone(), def);
                }
            }
            "furniture" => {
                if let Ok(def) = serde_json::from_value::<FurnitureDef>(obj) {
                    self.furniture.insert(def.id.clone(), def);
                }
            }
            "item_group" => {
                if let Ok(def) = serde_json::from_value::<ItemGroupDef>(obj) {
                    self.item_group.insert(def.id.clone(), def);
                }
            }
            "monstergroup" => {
                if let Ok(def) = serde_json::from_value::<MonsterGroupDef>(obj) {
                    self.monster_group.insert(def.name.clone(), def);
                }
            }
            "MONSTER" => {
                if let Ok(def) = serde_json::from_value::<MonsterDef>(obj) {
                    self.monster.insert(def.id.clone(), def);
                }
            }
            _ => {}
        }
    }

    /// The tileset the editor renders with: prefers the ChestHole ascii
    /// tileset when present, otherwise the first usable one.
    pub fn preferred_tileset(&self) -> &Tileset {
        self.tilesets
            .iter()
            .find(|ts| {
                ts.root
                    .file_name()
                    .map(|n| n.to_string_lossy().ends_with("ChestHoleTileset"))
                    .unwrap_or(false)
            })
            .unwrap_or(&self.tilesets[0])
    }

    pub fn terrain_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.terrain.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn furniture_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.furniture.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn item_group_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.item_group.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn monster_group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.monster_group.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_json_files(&path, out)?;
        } else if path.extension().map(|e| e == "json").unwrap_or(false) {
            out.push(path);
        }
    }
    Ok(())
}

/// Parses one content file into its top-level objects. A file may hold a
/// single object or an array of them; unreadable files are skipped with a
/// diagnostic rather than aborting the whole load.
fn parse_objects(path: &Path) -> Vec<Value> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            warn!("skipping unreadable {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Array(objs)) => objs,
        Ok(obj) => vec![obj],
        Err(e) => {
            warn!("skipping malformed {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn discover_tilesets(root: &Path) -> Vec<Tileset> {
    let gfx = root.join("gfx");
    let Ok(entries) = std::fs::read_dir(&gfx) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs.iter().filter_map(|dir| load_tileset(dir)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ingest_dispatches_by_type() {
        let mut index = GameDataIndex::default();
        index.ingest(json!({"type": "terrain", "id": "t_rock", "symbol": "#"}));
        index.ingest(json!({"type": "furniture", "id": "f_chair", "symbol": "H"}));
        index.ingest(json!({"type": "item_group", "id": "everyday_gear"}));
        index.ingest(json!({"type": "monstergroup", "name": "GROUP_ZOMBIE"}));
        index.ingest(json!({"type": "MONSTER", "id": "mon_zombie", "name": "zombie"}));
        index.ingest(json!({"type": "recipe", "result": "nailboard"}));

        assert!(index.terrain.contains_key("t_rock"));
        assert!(index.furniture.contains_key("f_chair"));
        assert!(index.item_group.contains_key("everyday_gear"));
        assert!(index.monster_group.contains_key("GROUP_ZOMBIE"));
        assert!(index.monster.contains_key("mon_zombie"));
    }

    #[test]
    fn test_id_lists_are_sorted() {
        let mut index = GameDataIndex::default();
        index.ingest(json!({"type": "terrain", "id": "t_wall"}));
        index.ingest(json!({"type": "terrain", "id": "t_grass"}));
        index.ingest(json!({"type": "terrain", "id": "t_rock"}));
        assert_eq!(index.terrain_ids(), vec!["t_grass", "t_rock", "t_wall"]);
    }
}
