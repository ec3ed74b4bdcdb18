//! Pure state transitions. Every edit the UI can make is a `Reducer` value;
//! the frame loop collects them into one ordered queue and folds the queue
//! over the previous [`AppState`]. One logical writer, no locks.

use crate::document::{
    Extent, LootZone, MapgenDocument, MonsterZone, Repeat, ZoneKind,
};
use crate::editor::picker::{PickerSession, PickerTarget};
use crate::editor::state::{AppState, Tab, ZoneOptions, SPACE_SYMBOL};

/// Terrain a freshly added palette symbol maps to.
const NEW_SYMBOL_TERRAIN: &str = "t_rock_floor";

#[derive(Debug, Clone, PartialEq)]
pub enum Reducer {
    /// Paints the current brush symbol at a cell. No-op when the cell
    /// already holds the brush symbol.
    PaintCell { x: i32, y: i32 },
    /// Updates (or clears) the hovered cell.
    Hover(Option<(i32, i32)>),
    SetBrush(char),
    SetTab(Tab),
    /// Switches the zone tool's kind and resets its options to that kind's
    /// defaults.
    SetZoneKind(ZoneKind),
    /// Replaces the overmap terrain id list (whitespace-separated input).
    SetOvermapIds(String),
    SetWeight(Option<u64>),
    /// Updates the in-progress drag rectangle from anchor and current cell.
    DragUpdate { anchor: (i32, i32), current: (i32, i32) },
    DragClear,
    /// On drag release: turns the live drag rectangle into a new zone of
    /// the active kind, stamped from the zone-tool options, and selects it.
    CommitZoneRect,
    /// On a plain click: selects the first zone of the active kind whose
    /// rectangle contains the cell, adopting its fields into the options;
    /// clears the selection when no zone matches.
    SelectZoneAt { x: i32, y: i32 },
    EditSelectedZoneGroup(String),
    EditSelectedZoneChance(Option<u32>),
    EditSelectedZoneRepeat(Option<Repeat>),
    DeleteSelectedZone,
    /// Maps the first unused alphabet symbol to a default terrain. Surfaces
    /// an error and leaves the document untouched when none is left.
    AddSymbol,
    /// Drops a symbol's mappings and rewrites its grid uses to space.
    RemoveSymbol(char),
    /// Drops only a symbol's furniture mapping.
    RemoveSymbolFurniture(char),
    OpenPicker(PickerTarget),
    /// Replaces the picker query; the selected index resets to 0.
    PickerSearch(String),
    /// Moves the picker selection, clamped to the visible candidate count.
    PickerMove { delta: i32, visible_len: usize },
    PickerHover(usize),
    /// Writes the chosen id into the session's captured target and closes.
    PickerConfirm(String),
    PickerCancel,
    /// Atomic replacement by a successfully parsed document.
    LoadDocument(MapgenDocument),
    NewDocument,
    ShowError(String),
    ClearError,
}

impl Reducer {
    pub fn apply(self, mut state: AppState) -> AppState {
        match self {
            Reducer::PaintCell { x, y } => {
                let brush = state.brush;
                state.document.set_symbol(x, y, brush);
            }
            Reducer::Hover(cell) => {
                state.hover = cell.filter(|&(x, y)| state.document.in_bounds(x, y));
            }
            Reducer::SetBrush(symbol) => state.brush = symbol,
            Reducer::SetTab(tab) => {
                state.tab = tab;
                state.drag_rect = None;
            }
            Reducer::SetZoneKind(kind) => {
                state.zone_options = ZoneOptions::defaults(kind);
                state.selected_zone = None;
                state.drag_rect = None;
            }
            Reducer::SetOvermapIds(text) => {
                state.document.overmap_terrain_ids =
                    text.split_whitespace().map(str::to_owned).collect();
            }
            Reducer::SetWeight(weight) => state.document.weight = weight,
            Reducer::DragUpdate { anchor, current } => {
                state.drag_rect = Some((
                    Extent::new(anchor.0, current.0),
                    Extent::new(anchor.1, current.1),
                ));
            }
            Reducer::DragClear => state.drag_rect = None,
            Reducer::CommitZoneRect => {
                let rect = state.drag_rect.take();
                if let Some(rect) = rect {
                    if let Some((xr, yr)) = clamp_rect(&state.document, rect) {
                        push_zone(&mut state, xr, yr);
                    }
                }
            }
            Reducer::SelectZoneAt { x, y } => {
                let kind = state.zone_options.kind;
                state.selected_zone = state.document.zone_index_at(kind, x, y);
                if let Some(idx) = state.selected_zone {
                    adopt_zone_options(&mut state, kind, idx);
                }
            }
            Reducer::EditSelectedZoneGroup(group) => {
                state.zone_options.group = group.clone();
                if let Some(idx) = state.selected_zone {
                    if let Some(slot) =
                        zone_group_mut(&mut state.document, state.zone_options.kind, idx)
                    {
                        *slot = group;
                    }
                }
            }
            Reducer::EditSelectedZoneChance(chance) => {
                state.zone_options.chance = chance;
                if let Some(idx) = state.selected_zone {
                    if let Some(slot) =
                        zone_chance_mut(&mut state.document, state.zone_options.kind, idx)
                    {
                        *slot = chance;
                    }
                }
            }
            Reducer::EditSelectedZoneRepeat(repeat) => {
                state.zone_options.repeat = repeat;
                if let Some(idx) = state.selected_zone {
                    if let Some(slot) =
                        zone_repeat_mut(&mut state.document, state.zone_options.kind, idx)
                    {
                        *slot = repeat;
                    }
                }
            }
            Reducer::DeleteSelectedZone => {
                if let Some(idx) = state.selected_zone.take() {
                    state.document.remove_zone(state.zone_options.kind, idx);
                }
            }
            Reducer::AddSymbol => match state.document.unused_symbol() {
                Some(symbol) => {
                    state
                        .document
                        .terrain_by_symbol
                        .insert(symbol, NEW_SYMBOL_TERRAIN.to_owned());
                    state.brush = symbol;
                }
                None => {
                    state.error_message =
                        Some("every palette symbol is already in use".to_owned());
                }
            },
            Reducer::RemoveSymbol(symbol) => {
                state.document.remove_symbol(symbol);
                if state.brush == symbol {
                    state.brush = SPACE_SYMBOL;
                }
            }
            Reducer::RemoveSymbolFurniture(symbol) => {
                state.document.furniture_by_symbol.remove(&symbol);
            }
            Reducer::OpenPicker(target) => {
                let initial = picker_initial_search(&state, target);
                state.picker = Some(PickerSession::open(target, initial));
            }
            Reducer::PickerSearch(query) => {
                if let Some(picker) = state.picker.as_mut() {
                    if picker.search != query {
                        picker.search = query;
                        picker.selected = 0;
                    }
                }
            }
            Reducer::PickerMove { delta, visible_len } => {
                if let Some(picker) = state.picker.as_mut() {
                    let max = visible_len.saturating_sub(1) as i32;
                    picker.selected =
                        (picker.selected as i32 + delta).clamp(0, max) as usize;
                }
            }
            Reducer::PickerHover(index) => {
                if let Some(picker) = state.picker.as_mut() {
                    picker.selected = index;
                }
            }
            Reducer::PickerConfirm(id) => {
                if let Some(picker) = state.picker.take() {
                    confirm_picker(&mut state, picker.target, id);
                }
            }
            Reducer::PickerCancel => state.picker = None,
            Reducer::LoadDocument(document) => state.reset_for_document(document),
            Reducer::NewDocument => state.reset_for_document(MapgenDocument::empty()),
            Reducer::ShowError(message) => state.error_message = Some(message),
            Reducer::ClearError => state.error_message = None,
        }
        state
    }
}

/// Folds a queue of reducers in arrival order.
pub fn apply_all<I>(reducers: I, state: AppState) -> AppState
where
    I: IntoIterator<Item = Reducer>,
{
    reducers.into_iter().fold(state, |s, r| r.apply(s))
}

/// Clips a drag rectangle to the grid; `None` when nothing remains.
fn clamp_rect(
    doc: &MapgenDocument,
    (xr, yr): (Extent, Extent),
) -> Option<(Extent, Extent)> {
    let x_lo = xr.lo.max(0);
    let x_hi = xr.hi.min(doc.width() as i32 - 1);
    let y_lo = yr.lo.max(0);
    let y_hi = yr.hi.min(doc.height() as i32 - 1);
    if x_lo > x_hi || y_lo > y_hi {
        return None;
    }
    Some((Extent::new(x_lo, x_hi), Extent::new(y_lo, y_hi)))
}

fn push_zone(state: &mut AppState, x: Extent, y: Extent) {
    let opts = &state.zone_options;
    match opts.kind {
        ZoneKind::Loot => {
            state.document.placed_loot.push(LootZone {
                group: opts.group.clone(),
                chance: opts.chance,
                repeat: opts.repeat,
                x,
                y,
            });
            state.selected_zone = Some(state.document.placed_loot.len() - 1);
        }
        ZoneKind::Monsters => {
            state.document.placed_monsters.push(MonsterZone {
                monster: opts.group.clone(),
                chance: opts.chance,
                repeat: opts.repeat,
                x,
                y,
            });
            state.selected_zone = Some(state.document.placed_monsters.len() - 1);
        }
    }
}

/// Copies a clicked zone's fields into the zone-tool options, substituting
/// the kind's defaults for fields the zone leaves unset.
fn adopt_zone_options(state: &mut AppState, kind: ZoneKind, idx: usize) {
    let (group, chance, repeat) = match kind {
        ZoneKind::Loot => {
            let z = &state.document.placed_loot[idx];
            (z.group.clone(), z.chance, z.repeat)
        }
        ZoneKind::Monsters => {
            let z = &state.document.placed_monsters[idx];
            (z.monster.clone(), z.chance, z.repeat)
        }
    };
    state.zone_options.group = group;
    state.zone_options.chance = Some(chance.unwrap_or(ZoneOptions::default_chance(kind)));
    state.zone_options.repeat = Some(repeat.unwrap_or(Repeat::exact(1)));
}

fn zone_group_mut(
    doc: &mut MapgenDocument,
    kind: ZoneKind,
    idx: usize,
) -> Option<&mut String> {
    match kind {
        ZoneKind::Loot => doc.placed_loot.get_mut(idx).map(|z| &mut z.group),
        ZoneKind::Monsters => doc.placed_monsters.get_mut(idx).map(|z| &mut z.monster),
    }
}

fn zone_chance_mut(
    doc: &mut MapgenDocument,
    kind: ZoneKind,
    idx: usize,
) -> Option<&mut Option<u32>> {
    match kind {
        ZoneKind::Loot => doc.placed_loot.get_mut(idx).map(|z| &mut z.chance),
        ZoneKind::Monsters => doc.placed_monsters.get_mut(idx).map(|z| &mut z.chance),
    }
}

fn zone_repeat_mut(
    doc: &mut MapgenDocument,
    kind: ZoneKind,
    idx: usize,
) -> Option<&mut Option<Repeat>> {
    match kind {
        ZoneKind::Loot => doc.placed_loot.get_mut(idx).map(|z| &mut z.repeat),
        ZoneKind::Monsters => doc.placed_monsters.get_mut(idx).map(|z| &mut z.repeat),
    }
}

/// The edited field's current value seeds the picker search box.
fn picker_initial_search(state: &AppState, target: PickerTarget) -> String {
    match target {
        PickerTarget::FillTerrain => state.document.fill_terrain.clone(),
        PickerTarget::SymbolTerrain(symbol) => state
            .document
            .terrain_by_symbol
            .get(&symbol)
            .cloned()
            .unwrap_or_default(),
        PickerTarget::SymbolFurniture(symbol) => state
            .document
            .furniture_by_symbol
            .get(&symbol)
            .cloned()
            .unwrap_or_default(),
        PickerTarget::ZoneGroup => state.zone_options.group.clone(),
    }
}

fn confirm_picker(state: &mut AppState, target: PickerTarget, id: String) {
    match target {
        PickerTarget::FillTerrain => state.document.fill_terrain = id,
        PickerTarget::SymbolTerrain(symbol) => {
            state.document.terrain_by_symbol.insert(symbol, id);
        }
        PickerTarget::SymbolFurniture(symbol) => {
            state.document.furniture_by_symbol.insert(symbol, id);
        }
        PickerTarget::ZoneGroup => {
            state.zone_options.group = id.clone();
            if let Some(idx) = state.selected_zone {
                if let Some(slot) = zone_group_mut(&mut state.document, state.zone_options.kind, idx)
                {
                    *slot = id;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{export_mapgen, SYMBOL_ALPHABET};

    fn painted_state() -> AppState {
        let mut state = AppState::default();
        state
            .document
            .terrain_by_symbol
            .insert('a', "t_rock_floor".to_owned());
        state.brush = 'a';
        state
    }

    #[test]
    fn test_paint_preserves_row_lengths() {
        let state = painted_state();
        let lengths: Vec<usize> = state.document.rows.iter().map(|r| r.len()).collect();
        let state = Reducer::PaintCell { x: 7, y: 3 }.apply(state);
        let after: Vec<usize> = state.document.rows.iter().map(|r| r.len()).collect();
        assert_eq!(lengths, after);
    }

    #[test]
    fn test_paint_is_idempotent() {
        let state = Reducer::PaintCell { x: 2, y: 2 }.apply(painted_state());
        let again = Reducer::PaintCell { x: 2, y: 2 }.apply(state.clone());
        assert_eq!(state, again);
    }

    #[test]
    fn test_paint_then_export_end_to_end() {
        let state = Reducer::PaintCell { x: 0, y: 0 }.apply(painted_state());
        let out = export_mapgen(&state.document);
        assert!(out.contains(r#""a": "t_rock_floor""#));
        let first_row_starts_with_a = state.document.rows[0].starts_with('a');
        assert!(first_row_starts_with_a);
        assert!(out.contains(&format!("\"{}\"", state.document.rows[0])));
    }

    #[test]
    fn test_zone_drag_end_to_end() {
        let mut state = AppState::default();
        state.tab = Tab::Zones;
        let state = apply_all(
            [
                Reducer::DragUpdate {
                    anchor: (1, 1),
                    current: (3, 3),
                },
                Reducer::CommitZoneRect,
            ],
            state,
        );
        assert_eq!(state.document.placed_loot.len(), 1);
        let zone = &state.document.placed_loot[0];
        assert_eq!(zone.x, Extent::new(1, 3));
        assert_eq!(zone.y, Extent::new(1, 3));
        assert_eq!(zone.group, "everyday_gear");
        assert_eq!(zone.chance, Some(100));
        assert_eq!(zone.repeat, Some(Repeat::exact(1)));
        assert_eq!(state.selected_zone, Some(0));
        assert_eq!(state.drag_rect, None);
    }

    #[test]
    fn test_commit_clamps_drag_to_grid() {
        let state = apply_all(
            [
                Reducer::DragUpdate {
                    anchor: (-3, 20),
                    current: (2, 40),
                },
                Reducer::CommitZoneRect,
            ],
            AppState::default(),
        );
        let zone = &state.document.placed_loot[0];
        assert_eq!(zone.x, Extent::new(0, 2));
        assert_eq!(zone.y, Extent::new(20, 23));
    }

    #[test]
    fn test_commit_entirely_outside_grid_is_dropped() {
        let state = apply_all(
            [
                Reducer::DragUpdate {
                    anchor: (30, 30),
                    current: (40, 40),
                },
                Reducer::CommitZoneRect,
            ],
            AppState::default(),
        );
        assert!(state.document.placed_loot.is_empty());
        assert_eq!(state.selected_zone, None);
    }

    #[test]
    fn test_select_zone_tie_break_prefers_earlier() {
        let mut state = AppState::default();
        for _ in 0..2 {
            state = apply_all(
                [
                    Reducer::DragUpdate {
                        anchor: (2, 2),
                        current: (8, 8),
                    },
                    Reducer::CommitZoneRect,
                ],
                state,
            );
        }
        let state = Reducer::SelectZoneAt { x: 5, y: 5 }.apply(state);
        assert_eq!(state.selected_zone, Some(0));
    }

    #[test]
    fn test_select_zone_adopts_options_with_defaults() {
        let mut state = AppState::default();
        state.document.placed_loot.push(LootZone {
            group: "guns".to_owned(),
            chance: None,
            repeat: None,
            x: Extent::new(0, 4),
            y: Extent::new(0, 4),
        });
        let state = Reducer::SelectZoneAt { x: 1, y: 1 }.apply(state);
        assert_eq!(state.selected_zone, Some(0));
        assert_eq!(state.zone_options.group, "guns");
        assert_eq!(state.zone_options.chance, Some(100));
        assert_eq!(state.zone_options.repeat, Some(Repeat::exact(1)));
    }

    #[test]
    fn test_select_outside_clears_selection() {
        let mut state = AppState::default();
        state.selected_zone = Some(0);
        let state = Reducer::SelectZoneAt { x: 9, y: 9 }.apply(state);
        assert_eq!(state.selected_zone, None);
    }

    #[test]
    fn test_edit_selected_zone_mirrors_options() {
        let state = apply_all(
            [
                Reducer::DragUpdate {
                    anchor: (0, 0),
                    current: (1, 1),
                },
                Reducer::CommitZoneRect,
                Reducer::EditSelectedZoneChance(Some(40)),
                Reducer::EditSelectedZoneRepeat(Some(Repeat::range(2, 4))),
            ],
            AppState::default(),
        );
        let zone = &state.document.placed_loot[0];
        assert_eq!(zone.chance, Some(40));
        assert_eq!(zone.repeat, Some(Repeat::range(2, 4)));
        assert_eq!(state.zone_options.chance, Some(40));
        assert_eq!(state.zone_options.repeat, Some(Repeat::range(2, 4)));
    }

    #[test]
    fn test_delete_selected_zone() {
        let state = apply_all(
            [
                Reducer::DragUpdate {
                    anchor: (0, 0),
                    current: (1, 1),
                },
                Reducer::CommitZoneRect,
                Reducer::DeleteSelectedZone,
            ],
            AppState::default(),
        );
        assert!(state.document.placed_loot.is_empty());
        assert_eq!(state.selected_zone, None);
    }

    #[test]
    fn test_zone_kind_switch_resets_options() {
        let mut state = AppState::default();
        state.zone_options.group = "guns".to_owned();
        state.selected_zone = Some(3);
        let state = Reducer::SetZoneKind(ZoneKind::Monsters).apply(state);
        assert_eq!(state.zone_options, ZoneOptions::defaults(ZoneKind::Monsters));
        assert_eq!(state.zone_options.chance, Some(1));
        assert_eq!(state.selected_zone, None);
    }

    #[test]
    fn test_add_symbol_maps_first_unused() {
        let state = Reducer::AddSymbol.apply(AppState::default());
        assert_eq!(
            state.document.terrain_by_symbol.get(&'a').map(String::as_str),
            Some("t_rock_floor")
        );
        assert_eq!(state.brush, 'a');
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn test_add_symbol_exhaustion_is_an_error() {
        let mut state = AppState::default();
        for c in SYMBOL_ALPHABET.chars() {
            state.document.terrain_by_symbol.insert(c, "t_dirt".to_owned());
        }
        let before = state.document.clone();
        let state = Reducer::AddSymbol.apply(state);
        assert!(state.error_message.is_some());
        assert_eq!(state.document, before);
    }

    #[test]
    fn test_remove_symbol_scrubs_grid() {
        let mut state = AppState::default();
        state.document.rows = vec![" ".repeat(10); 10];
        state
            .document
            .terrain_by_symbol
            .insert('x', "t_dirt".to_owned());
        state
            .document
            .furniture_by_symbol
            .insert('x', "f_chair".to_owned());
        state.document.set_symbol(2, 3, 'x');
        state.document.set_symbol(5, 5, 'x');
        let state = Reducer::RemoveSymbol('x').apply(state);
        assert_eq!(state.document.symbol_at(2, 3), ' ');
        assert_eq!(state.document.symbol_at(5, 5), ' ');
        assert!(!state.document.terrain_by_symbol.contains_key(&'x'));
        assert!(!state.document.furniture_by_symbol.contains_key(&'x'));
    }

    #[test]
    fn test_remove_brush_symbol_resets_brush() {
        let state = Reducer::AddSymbol.apply(AppState::default());
        let state = Reducer::RemoveSymbol('a').apply(state);
        assert_eq!(state.brush, SPACE_SYMBOL);
    }

    #[test]
    fn test_hover_clamps_to_grid() {
        let state = Reducer::Hover(Some((5, 5))).apply(AppState::default());
        assert_eq!(state.hover, Some((5, 5)));
        let state = Reducer::Hover(Some((-1, 5))).apply(state);
        assert_eq!(state.hover, None);
    }

    #[test]
    fn test_picker_search_resets_index() {
        let mut state = Reducer::OpenPicker(PickerTarget::FillTerrain)
            .apply(AppState::default());
        assert_eq!(
            state.picker.as_ref().map(|p| p.search.as_str()),
            Some("t_rock")
        );
        state = apply_all(
            [
                Reducer::PickerMove {
                    delta: 3,
                    visible_len: 10,
                },
                Reducer::PickerSearch("rof".to_owned()),
            ],
            state,
        );
        let picker = state.picker.expect("picker open");
        assert_eq!(picker.search, "rof");
        assert_eq!(picker.selected, 0);
    }

    #[test]
    fn test_picker_move_clamps() {
        let state = apply_all(
            [
                Reducer::OpenPicker(PickerTarget::FillTerrain),
                Reducer::PickerMove {
                    delta: -5,
                    visible_len: 3,
                },
            ],
            AppState::default(),
        );
        assert_eq!(state.picker.as_ref().map(|p| p.selected), Some(0));
        let state = Reducer::PickerMove {
            delta: 10,
            visible_len: 3,
        }
        .apply(state);
        assert_eq!(state.picker.as_ref().map(|p| p.selected), Some(2));
    }

    #[test]
    fn test_picker_confirm_writes_captured_target() {
        let state = apply_all(
            [
                Reducer::OpenPicker(PickerTarget::SymbolTerrain('a')),
                Reducer::PickerConfirm("t_grass".to_owned()),
            ],
            AppState::default(),
        );
        assert_eq!(
            state.document.terrain_by_symbol.get(&'a').map(String::as_str),
            Some("t_grass")
        );
        assert_eq!(state.picker, None);
    }

    #[test]
    fn test_picker_cancel_changes_nothing() {
        let before = AppState::default();
        let state = apply_all(
            [
                Reducer::OpenPicker(PickerTarget::FillTerrain),
                Reducer::PickerCancel,
            ],
            before.clone(),
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_picker_confirm_zone_group_updates_selected_zone() {
        let state = apply_all(
            [
                Reducer::DragUpdate {
                    anchor: (0, 0),
                    current: (1, 1),
                },
                Reducer::CommitZoneRect,
                Reducer::OpenPicker(PickerTarget::ZoneGroup),
                Reducer::PickerConfirm("guns".to_owned()),
            ],
            AppState::default(),
        );
        assert_eq!(state.document.placed_loot[0].group, "guns");
        assert_eq!(state.zone_options.group, "guns");
    }

    #[test]
    fn test_load_document_resets_ui_state() {
        let mut state = Reducer::AddSymbol.apply(AppState::default());
        state.error_message = Some("old".to_owned());
        state.selected_zone = Some(0);
        let mut replacement = MapgenDocument::empty();
        replacement.fill_terrain = "t_dirt".to_owned();
        let state = Reducer::LoadDocument(replacement.clone()).apply(state);
        assert_eq!(state.document, replacement);
        assert_eq!(state.brush, SPACE_SYMBOL);
        assert_eq!(state.selected_zone, None);
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn test_overmap_ids_split_on_whitespace() {
        let state =
            Reducer::SetOvermapIds("house house_2".to_owned()).apply(AppState::default());
        assert_eq!(
            state.document.overmap_terrain_ids,
            vec!["house".to_owned(), "house_2".to_owned()]
        );
    }
}
