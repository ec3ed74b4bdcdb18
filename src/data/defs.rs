//! Typed records for the game content the editor consults: terrain and
//! furniture definitions, item groups, monster groups and monsters.
//!
//! Content JSON is loosely shaped, so most fields default when absent and
//! one-or-many fields (colors, entry lists) use untagged enums.

use serde::Deserialize;

/// A JSON field that may hold either a single value or a list of variants.
/// The first variant is canonical for rendering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(v) => Some(v),
            OneOrMany::Many(vs) => vs.first(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(vs) => vs,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TerrainDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub color: Option<OneOrMany<String>>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub connects_to: Option<String>,
    #[serde(default)]
    pub move_cost: Option<i32>,
}

impl TerrainDef {
    /// The glyph drawn for this terrain when it is not an auto-wall.
    pub fn glyph(&self) -> char {
        self.symbol.chars().next().unwrap_or(' ')
    }

    /// The canonical color name (first variant when a list is declared).
    pub fn color_name(&self) -> &str {
        self.color
            .as_ref()
            .and_then(|c| c.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FurnitureDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub color: Option<OneOrMany<String>>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub move_cost_mod: Option<i32>,
}

impl FurnitureDef {
    pub fn glyph(&self) -> char {
        self.symbol.chars().next().unwrap_or(' ')
    }

    pub fn color_name(&self) -> &str {
        self.color
            .as_ref()
            .and_then(|c| c.first())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// One weighted entry inside an item group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemGroupEntry {
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub prob: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemGroupDef {
    pub id: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub entries: Vec<ItemGroupEntry>,
}

impl ItemGroupDef {
    /// Flattens `items` (which mixes `[id, prob]` pairs and entry objects)
    /// and `entries` into a uniform list for display.
    pub fn display_entries(&self) -> Vec<ItemGroupEntry> {
        let mut out: Vec<ItemGroupEntry> = Vec::new();
        for v in &self.items {
            if let Some(pair) = v.as_array() {
                if let Some(id) = pair.first().and_then(|p| p.as_str()) {
                    out.push(ItemGroupEntry {
                        item: Some(id.to_owned()),
                        group: None,
                        prob: pair.get(1).and_then(|p| p.as_u64()).map(|p| p as u32),
                    });
                }
            } else if let Ok(entry) = serde_json::from_value::<ItemGroupEntry>(v.clone()) {
                out.push(entry);
            }
        }
        out.extend(self.entries.iter().cloned());
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MonsterGroupMember {
    pub monster: String,
    #[serde(default)]
    pub freq: u32,
    #[serde(default)]
    pub cost_multiplier: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MonsterGroupDef {
    pub name: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub monsters: Vec<MonsterGroupMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MonsterDef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_from_json() {
        let ter: TerrainDef = serde_json::from_str(
            r#"{
                "id": "t_wall",
                "name": "wall",
                "symbol": "|",
                "color": ["ltgray", "white"],
                "flags": ["WALL", "AUTO_WALL_SYMBOL"],
                "move_cost": 0
            }"#,
        )
        .unwrap();
        assert_eq!(ter.glyph(), '|');
        assert_eq!(ter.color_name(), "ltgray");
        assert!(ter.has_flag("WALL"));
        assert!(!ter.has_flag("CONNECT_TO_WALL"));
    }

    #[test]
    fn test_terrain_missing_fields_default() {
        let ter: TerrainDef = serde_json::from_str(r#"{"id": "t_null"}"#).unwrap();
        assert_eq!(ter.glyph(), ' ');
        assert_eq!(ter.color_name(), "");
        assert!(ter.connects_to.is_none());
    }

    #[test]
    fn test_item_group_pair_entries() {
        let group: ItemGroupDef = serde_json::from_str(
            r#"{"id": "everyday_gear", "items": [["knife", 50], {"item": "rock"}]}"#,
        )
        .unwrap();
        let entries = group.display_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].item.as_deref(), Some("knife"));
        assert_eq!(entries[0].prob, Some(50));
        assert_eq!(entries[1].item.as_deref(), Some("rock"));
        assert_eq!(entries[1].prob, None);
    }
}
