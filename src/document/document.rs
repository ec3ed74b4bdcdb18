// src/document/document.rs

//! The editable mapgen document: a fixed-size grid of symbol characters,
//! symbol-to-terrain/furniture maps, and declarative loot/monster zones.
//!
//! The document is only ever advanced by reducers folding over the previous
//! snapshot; nothing mutates a document a renderer can still see.

use std::collections::BTreeMap;

/// Symbols handed out by "add symbol", in order.
pub const SYMBOL_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Grid edge length of a freshly created document.
pub const DEFAULT_GRID: usize = 24;

/// An inclusive coordinate range along one axis, normalized so `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub lo: i32,
    pub hi: i32,
}

impl Extent {
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    pub fn contains(&self, v: i32) -> bool {
        v >= self.lo && v <= self.hi
    }

    pub fn len(&self) -> u32 {
        (self.hi - self.lo + 1) as u32
    }
}

/// A spawn repeat count: either exact (`lo == hi`) or a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeat {
    pub lo: u32,
    pub hi: u32,
}

impl Repeat {
    pub fn exact(n: u32) -> Self {
        Self { lo: n, hi: n }
    }

    pub fn range(a: u32, b: u32) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Loot,
    Monsters,
}

impl ZoneKind {
    pub fn label(self) -> &'static str {
        match self {
            ZoneKind::Loot => "loot",
            ZoneKind::Monsters => "monsters",
        }
    }
}

/// A rectangular loot placement referencing an item group.
#[derive(Debug, Clone, PartialEq)]
pub struct LootZone {
    pub group: String,
    pub chance: Option<u32>,
    pub repeat: Option<Repeat>,
    pub x: Extent,
    pub y: Extent,
}

/// A rectangular monster placement referencing a monster group by name.
#[derive(Debug, Clone, PartialEq)]
pub struct MonsterZone {
    pub monster: String,
    pub chance: Option<u32>,
    pub repeat: Option<Repeat>,
    pub x: Extent,
    pub y: Extent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapgenDocument {
    /// Default terrain for unmapped symbols and the reserved space symbol.
    pub fill_terrain: String,
    /// Equal-length rows; one character addresses one grid cell.
    pub rows: Vec<String>,
    pub terrain_by_symbol: BTreeMap<char, String>,
    pub furniture_by_symbol: BTreeMap<char, String>,
    pub placed_loot: Vec<LootZone>,
    pub placed_monsters: Vec<MonsterZone>,
    pub overmap_terrain_ids: Vec<String>,
    pub weight: Option<u64>,
}

impl Default for MapgenDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl MapgenDocument {
    /// A fresh 24x24 document, all fill terrain.
    pub fn empty() -> Self {
        Self {
            fill_terrain: "t_rock".to_owned(),
            rows: vec![" ".repeat(DEFAULT_GRID); DEFAULT_GRID],
            terrain_by_symbol: BTreeMap::new(),
            furniture_by_symbol: BTreeMap::new(),
            placed_loot: Vec::new(),
            placed_monsters: Vec::new(),
            overmap_terrain_ids: vec!["house".to_owned()],
            weight: None,
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.chars().count()).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// The symbol at a cell; out-of-grid cells read as the space symbol.
    pub fn symbol_at(&self, x: i32, y: i32) -> char {
        if !self.in_bounds(x, y) {
            return ' ';
        }
        self.rows[y as usize]
            .chars()
            .nth(x as usize)
            .unwrap_or(' ')
    }

    /// The terrain id a cell resolves to: its symbol's mapping, or the fill
    /// terrain for space / unmapped symbols / out-of-grid cells.
    pub fn terrain_id_at(&self, x: i32, y: i32) -> &str {
        self.terrain_by_symbol
            .get(&self.symbol_at(x, y))
            .map(String::as_str)
            .unwrap_or(&self.fill_terrain)
    }

    /// Replaces a single cell's symbol, preserving row length. Returns false
    /// when the cell already holds `symbol` (the caller can skip the write).
    pub fn set_symbol(&mut self, x: i32, y: i32, symbol: char) -> bool {
        if !self.in_bounds(x, y) || self.symbol_at(x, y) == symbol {
            return false;
        }
        let row = &self.rows[y as usize];
        let mut chars: Vec<char> = row.chars().collect();
        chars[x as usize] = symbol;
        self.rows[y as usize] = chars.into_iter().collect();
        true
    }

    /// First symbol from the fixed alphabet not yet mapped to a terrain.
    pub fn unused_symbol(&self) -> Option<char> {
        SYMBOL_ALPHABET
            .chars()
            .find(|c| !self.terrain_by_symbol.contains_key(c))
    }

    /// Drops a symbol entirely: its terrain and furniture mappings, and
    /// every use in the grid (rewritten to space).
    pub fn remove_symbol(&mut self, symbol: char) {
        self.terrain_by_symbol.remove(&symbol);
        self.furniture_by_symbol.remove(&symbol);
        for row in &mut self.rows {
            if row.contains(symbol) {
                *row = row.replace(symbol, " ");
            }
        }
    }

    pub fn zone_count(&self, kind: ZoneKind) -> usize {
        match kind {
            ZoneKind::Loot => self.placed_loot.len(),
            ZoneKind::Monsters => self.placed_monsters.len(),
        }
    }

    /// Rectangle of a zone by kind and index.
    pub fn zone_rect(&self, kind: ZoneKind, idx: usize) -> Option<(Extent, Extent)> {
        match kind {
            ZoneKind::Loot => self.placed_loot.get(idx).map(|z| (z.x, z.y)),
            ZoneKind::Monsters => self.placed_monsters.get(idx).map(|z| (z.x, z.y)),
        }
    }

    /// First zone of `kind`, in document order, whose rectangle contains the
    /// cell. Document order is the only z-order.
    pub fn zone_index_at(&self, kind: ZoneKind, x: i32, y: i32) -> Option<usize> {
        (0..self.zone_count(kind)).find(|&idx| {
            let (xr, yr) = self.zone_rect(kind, idx).expect("index in range");
            xr.contains(x) && yr.contains(y)
        })
    }

    pub fn remove_zone(&mut self, kind: ZoneKind, idx: usize) {
        match kind {
            ZoneKind::Loot => {
                if idx < self.placed_loot.len() {
                    self.placed_loot.remove(idx);
                }
            }
            ZoneKind::Monsters => {
                if idx < self.placed_monsters.len() {
                    self.placed_monsters.remove(idx);
                }
            }
        }
    }
}
