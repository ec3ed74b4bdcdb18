//! The single authoritative application state: the document plus all the
//! transient UI state reducers are allowed to advance.

use crate::document::{Extent, MapgenDocument, Repeat, ZoneKind};
use crate::editor::picker::PickerSession;

/// Reserved brush symbol painting the fill terrain.
pub const SPACE_SYMBOL: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Symbols,
    Zones,
}

/// Options the zone tool stamps onto the next drawn zone. Editing a
/// selected zone mirrors the edit back here.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneOptions {
    pub kind: ZoneKind,
    pub group: String,
    pub chance: Option<u32>,
    pub repeat: Option<Repeat>,
}

impl ZoneOptions {
    pub fn defaults(kind: ZoneKind) -> Self {
        match kind {
            ZoneKind::Loot => Self {
                kind,
                group: "everyday_gear".to_owned(),
                chance: Some(100),
                repeat: Some(Repeat::exact(1)),
            },
            ZoneKind::Monsters => Self {
                kind,
                group: "GROUP_ZOMBIE".to_owned(),
                chance: Some(1),
                repeat: Some(Repeat::exact(1)),
            },
        }
    }

    /// Chance shown when a selected zone declares none.
    pub fn default_chance(kind: ZoneKind) -> u32 {
        match kind {
            ZoneKind::Loot => 100,
            ZoneKind::Monsters => 1,
        }
    }
}

/// Document plus UI state, advanced only by reducers folding over the
/// previous value.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub document: MapgenDocument,
    pub brush: char,
    pub tab: Tab,
    pub zone_options: ZoneOptions,
    /// Index into the active kind's zone list.
    pub selected_zone: Option<usize>,
    pub hover: Option<(i32, i32)>,
    pub drag_rect: Option<(Extent, Extent)>,
    pub picker: Option<PickerSession>,
    pub error_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            document: MapgenDocument::empty(),
            brush: SPACE_SYMBOL,
            tab: Tab::Symbols,
            zone_options: ZoneOptions::defaults(ZoneKind::Loot),
            selected_zone: None,
            hover: None,
            drag_rect: None,
            picker: None,
            error_message: None,
        }
    }
}

impl AppState {
    /// Resets everything that refers into the replaced document.
    pub(crate) fn reset_for_document(&mut self, document: MapgenDocument) {
        self.document = document;
        self.brush = SPACE_SYMBOL;
        self.selected_zone = None;
        self.hover = None;
        self.drag_rect = None;
        self.picker = None;
        self.error_message = None;
    }
}
