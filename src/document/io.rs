//! Loading and exporting mapgen files.
//!
//! A mapgen file is a JSON array with exactly one data-driven (`"method":
//! "json"`) mapgen entry. Loading is atomic: any shape problem rejects the
//! whole file with a message and leaves the previous document untouched.
//! Export re-serializes the entry as a single-element array, 2-space
//! indented with a 100-column wrap, terminated by a newline.

use std::collections::BTreeMap;

use log::warn;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::data::OneOrMany;
use crate::document::document::{Extent, LootZone, MapgenDocument, MonsterZone, Repeat};
use crate::document::pretty::to_pretty;

const WRAP_WIDTH: usize = 100;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("this doesn't look like a valid mapgen JSON file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("root of the file must be a JSON array")]
    NotAnArray,
    #[error("no mapgen entry found in this file")]
    NoMapgenEntry,
    #[error("only one mapgen entry per file is supported")]
    MultipleMapgens,
    #[error("script-based mapgens cannot be edited")]
    ScriptedMapgen,
    #[error("malformed mapgen: {0}")]
    InvalidShape(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct MapgenEntryIn {
    method: String,
    #[serde(default)]
    om_terrain: Option<OneOrMany<String>>,
    #[serde(default)]
    weight: Option<u64>,
    object: MapgenObjectIn,
}

#[derive(Debug, Deserialize)]
struct MapgenObjectIn {
    fill_ter: String,
    rows: Vec<String>,
    #[serde(default)]
    terrain: BTreeMap<String, OneOrMany<String>>,
    #[serde(default)]
    furniture: BTreeMap<String, OneOrMany<String>>,
    #[serde(default)]
    place_loot: Vec<LootZoneIn>,
    #[serde(default)]
    place_monsters: Vec<MonsterZoneIn>,
}

/// A coordinate on the wire: bare number, or a one/two(+) element array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RangeIn {
    Scalar(i32),
    List(Vec<i32>),
}

impl RangeIn {
    fn into_extent(self) -> Result<Extent, DocumentError> {
        match self {
            RangeIn::Scalar(v) => Ok(Extent::new(v, v)),
            RangeIn::List(vs) => {
                let lo = *vs
                    .iter()
                    .min()
                    .ok_or_else(|| DocumentError::InvalidShape("empty coordinate range".into()))?;
                let hi = *vs.iter().max().expect("non-empty");
                Ok(Extent { lo, hi })
            }
        }
    }
}

/// Historical files carry `repeat` as a bare number or a one/two element
/// array; everything normalizes to a range at load time.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RepeatIn {
    Scalar(u32),
    List(Vec<u32>),
}

impl RepeatIn {
    fn into_repeat(self) -> Result<Repeat, DocumentError> {
        match self {
            RepeatIn::Scalar(n) => Ok(Repeat::exact(n)),
            RepeatIn::List(vs) => match vs.as_slice() {
                [n] => Ok(Repeat::exact(*n)),
                [a, b] => Ok(Repeat::range(*a, *b)),
                _ => Err(DocumentError::InvalidShape(
                    "repeat must be a count or a [lo, hi] range".into(),
                )),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct LootZoneIn {
    group: String,
    #[serde(default)]
    chance: Option<u32>,
    #[serde(default)]
    repeat: Option<RepeatIn>,
    x: RangeIn,
    y: RangeIn,
}

#[derive(Debug, Deserialize)]
struct MonsterZoneIn {
    monster: String,
    #[serde(default)]
    chance: Option<u32>,
    #[serde(default)]
    repeat: Option<RepeatIn>,
    x: RangeIn,
    y: RangeIn,
}

/// Parses mapgen file bytes into a document, or a reason to reject them.
pub fn parse_mapgen(bytes: &[u8]) -> Result<MapgenDocument, DocumentError> {
    let root: Value = serde_json::from_slice(bytes)?;
    let Value::Array(entries) = root else {
        return Err(DocumentError::NotAnArray);
    };
    let mut mapgens = entries
        .into_iter()
        .filter(|e| e.get("type").and_then(Value::as_str) == Some("mapgen"));
    let entry = mapgens.next().ok_or(DocumentError::NoMapgenEntry)?;
    if mapgens.next().is_some() {
        return Err(DocumentError::MultipleMapgens);
    }

    let entry: MapgenEntryIn = serde_json::from_value(entry)?;
    if entry.method != "json" {
        return Err(DocumentError::ScriptedMapgen);
    }

    let object = entry.object;
    let width = object
        .rows
        .first()
        .map(|r| r.chars().count())
        .unwrap_or(0);
    if width == 0 {
        return Err(DocumentError::InvalidShape("rows must not be empty".into()));
    }
    if object.rows.iter().any(|r| r.chars().count() != width) {
        return Err(DocumentError::InvalidShape(
            "all rows must have equal length".into(),
        ));
    }

    let placed_loot = object
        .place_loot
        .into_iter()
        .map(|z| {
            Ok(LootZone {
                group: z.group,
                chance: z.chance,
                repeat: z.repeat.map(RepeatIn::into_repeat).transpose()?,
                x: z.x.into_extent()?,
                y: z.y.into_extent()?,
            })
        })
        .collect::<Result<Vec<_>, DocumentError>>()?;
    let placed_monsters = object
        .place_monsters
        .into_iter()
        .map(|z| {
            Ok(MonsterZone {
                monster: z.monster,
                chance: z.chance,
                repeat: z.repeat.map(RepeatIn::into_repeat).transpose()?,
                x: z.x.into_extent()?,
                y: z.y.into_extent()?,
            })
        })
        .collect::<Result<Vec<_>, DocumentError>>()?;

    Ok(MapgenDocument {
        fill_terrain: object.fill_ter,
        rows: object.rows,
        terrain_by_symbol: symbol_map(object.terrain)?,
        furniture_by_symbol: symbol_map(object.furniture)?,
        placed_loot,
        placed_monsters,
        overmap_terrain_ids: entry
            .om_terrain
            .map(OneOrMany::into_vec)
            .unwrap_or_default(),
        weight: entry.weight,
    })
}

/// Converts a wire symbol map (string keys, one-or-many id values) into the
/// document's char-keyed form. Multi-variant values keep their first (the
/// canonical) id; an explicit space mapping is dropped since space is
/// reserved for the fill terrain.
fn symbol_map(
    wire: BTreeMap<String, OneOrMany<String>>,
) -> Result<BTreeMap<char, String>, DocumentError> {
    let mut out = BTreeMap::new();
    for (key, value) in wire {
        let mut chars = key.chars();
        let (Some(sym), None) = (chars.next(), chars.next()) else {
            return Err(DocumentError::InvalidShape(format!(
                "symbol {:?} is not a single character",
                key
            )));
        };
        if sym == ' ' {
            warn!("ignoring explicit mapping for the reserved space symbol");
            continue;
        }
        let id = value.first().cloned().ok_or_else(|| {
            DocumentError::InvalidShape(format!("symbol {:?} maps to an empty list", key))
        })?;
        out.insert(sym, id);
    }
    Ok(out)
}

/// Serializes the document back into single-element-array file text.
pub fn export_mapgen(doc: &MapgenDocument) -> String {
    let mut object = Map::new();
    object.insert("fill_ter".into(), json!(doc.fill_terrain));
    object.insert("rows".into(), json!(doc.rows));
    object.insert(
        "terrain".into(),
        symbol_map_value(&doc.terrain_by_symbol),
    );
    object.insert(
        "furniture".into(),
        symbol_map_value(&doc.furniture_by_symbol),
    );
    if !doc.placed_loot.is_empty() {
        let zones: Vec<Value> = doc
            .placed_loot
            .iter()
            .map(|z| zone_value("group", &z.group, z.chance, z.repeat, z.x, z.y))
            .collect();
        object.insert("place_loot".into(), Value::Array(zones));
    }
    if !doc.placed_monsters.is_empty() {
        let zones: Vec<Value> = doc
            .placed_monsters
            .iter()
            .map(|z| zone_value("monster", &z.monster, z.chance, z.repeat, z.x, z.y))
            .collect();
        object.insert("place_monsters".into(), Value::Array(zones));
    }

    let mut entry = Map::new();
    entry.insert("type".into(), json!("mapgen"));
    entry.insert("method".into(), json!("json"));
    entry.insert("om_terrain".into(), json!(doc.overmap_terrain_ids));
    if let Some(weight) = doc.weight {
        entry.insert("weight".into(), json!(weight));
    }
    entry.insert("object".into(), Value::Object(object));

    let mut text = to_pretty(&Value::Array(vec![Value::Object(entry)]), WRAP_WIDTH);
    text.push('\n');
    text
}

fn symbol_map_value(map: &BTreeMap<char, String>) -> Value {
    let mut out = Map::new();
    for (sym, id) in map {
        out.insert(sym.to_string(), json!(id));
    }
    Value::Object(out)
}

fn zone_value(
    group_key: &str,
    group: &str,
    chance: Option<u32>,
    repeat: Option<Repeat>,
    x: Extent,
    y: Extent,
) -> Value {
    let mut zone = Map::new();
    zone.insert(group_key.into(), json!(group));
    zone.insert("x".into(), json!([x.lo, x.hi]));
    zone.insert("y".into(), json!([y.lo, y.hi]));
    if let Some(chance) = chance {
        zone.insert("chance".into(), json!(chance));
    }
    if let Some(repeat) = repeat {
        let value = if repeat.lo == repeat.hi {
            json!([repeat.lo])
        } else {
            json!([repeat.lo, repeat.hi])
        };
        zone.insert("repeat".into(), value);
    }
    Value::Object(zone)
}
