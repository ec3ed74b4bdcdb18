//! The modal id picker window: a focused search box over the candidate ids
//! for the session's target, keyboard navigation, a detail pane describing
//! the highlighted candidate, and a single confirm or cancel before the
//! session closes.

use eframe::egui::{self, Context, Key, ScrollArea};

use crate::data::GameDataIndex;
use crate::document::ZoneKind;
use crate::editor::{filter_candidates, AppState, PickerTarget, Reducer};

const VISIBLE_LIMIT: usize = 50;

pub fn show(ctx: &Context, state: &AppState, data: &GameDataIndex, queue: &mut Vec<Reducer>) {
    let Some(session) = &state.picker else {
        return;
    };

    let candidates = candidates_for(data, state, session.target);
    let mut visible = filter_candidates(candidates, &session.search);
    visible.truncate(VISIBLE_LIMIT);
    let selected = session.selected.min(visible.len().saturating_sub(1));

    let (confirm_key, cancel, move_delta) = {
        let input = ctx.input();
        (
            input.key_pressed(Key::Enter),
            input.key_pressed(Key::Escape),
            input.key_pressed(Key::ArrowDown) as i32 - input.key_pressed(Key::ArrowUp) as i32,
        )
    };

    egui::Window::new(title_for(session.target))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let mut search = session.search.clone();
            let response = ui.text_edit_singleline(&mut search);
            response.request_focus();
            if response.changed() {
                queue.push(Reducer::PickerSearch(search));
            }

            ui.horizontal_top(|ui| {
                ScrollArea::vertical()
                    .id_source("picker_list")
                    .max_height(300.0)
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            for (i, id) in visible.iter().enumerate() {
                                let row = ui.selectable_label(i == selected, *id);
                                if row.clicked() {
                                    queue.push(Reducer::PickerConfirm((*id).to_owned()));
                                } else if row.hovered() && i != selected {
                                    queue.push(Reducer::PickerHover(i));
                                }
                            }
                            if visible.is_empty() {
                                ui.label("no matches");
                            }
                        });
                    });
                if let Some(id) = visible.get(selected) {
                    ui.separator();
                    ScrollArea::vertical()
                        .id_source("picker_detail")
                        .max_height(300.0)
                        .show(ui, |ui| {
                            ui.vertical(|ui| {
                                for line in detail_lines(data, state, session.target, id) {
                                    ui.label(line);
                                }
                            });
                        });
                }
            });
        });

    if move_delta != 0 {
        queue.push(Reducer::PickerMove {
            delta: move_delta,
            visible_len: visible.len(),
        });
    }
    if confirm_key {
        if let Some(id) = visible.get(selected) {
            queue.push(Reducer::PickerConfirm((*id).to_owned()));
        }
    }
    if cancel {
        queue.push(Reducer::PickerCancel);
    }
}

fn candidates_for<'a>(
    data: &'a GameDataIndex,
    state: &AppState,
    target: PickerTarget,
) -> Vec<&'a str> {
    match target {
        PickerTarget::FillTerrain | PickerTarget::SymbolTerrain(_) => data.terrain_ids(),
        PickerTarget::SymbolFurniture(_) => data.furniture_ids(),
        PickerTarget::ZoneGroup => match state.zone_options.kind {
            ZoneKind::Loot => data.item_group_ids(),
            ZoneKind::Monsters => data.monster_group_names(),
        },
    }
}

fn title_for(target: PickerTarget) -> &'static str {
    match target {
        PickerTarget::FillTerrain => "Pick fill terrain",
        PickerTarget::SymbolTerrain(_) => "Pick terrain",
        PickerTarget::SymbolFurniture(_) => "Pick furniture",
        PickerTarget::ZoneGroup => "Pick group",
    }
}

/// Description of the highlighted candidate, one line per row of the detail
/// pane.
fn detail_lines(
    data: &GameDataIndex,
    state: &AppState,
    target: PickerTarget,
    id: &str,
) -> Vec<String> {
    match target {
        PickerTarget::FillTerrain | PickerTarget::SymbolTerrain(_) => terrain_detail(data, id),
        PickerTarget::SymbolFurniture(_) => furniture_detail(data, id),
        PickerTarget::ZoneGroup => match state.zone_options.kind {
            ZoneKind::Loot => item_group_detail(data, id),
            ZoneKind::Monsters => monster_group_detail(data, id),
        },
    }
}

fn flags_line(flags: &[String]) -> String {
    if flags.is_empty() {
        "No flags.".to_owned()
    } else {
        flags.join(", ")
    }
}

fn terrain_detail(data: &GameDataIndex, id: &str) -> Vec<String> {
    let Some(ter) = data.terrain.get(id) else {
        return vec![id.to_owned()];
    };
    let mut lines = vec![ter.name.clone(), flags_line(&ter.flags)];
    if let Some(cost) = ter.move_cost {
        lines.push(format!("Move cost: {}", cost));
    }
    lines
}

fn furniture_detail(data: &GameDataIndex, id: &str) -> Vec<String> {
    let Some(furn) = data.furniture.get(id) else {
        return vec![id.to_owned()];
    };
    let mut lines = vec![furn.name.clone(), flags_line(&furn.flags)];
    if let Some(cost) = furn.move_cost_mod {
        lines.push(format!("Move cost modifier: {}", cost));
    }
    lines
}

/// Weighted entry list, most probable first; a missing probability counts
/// as 100, and percentages are relative to the group's total.
fn item_group_detail(data: &GameDataIndex, id: &str) -> Vec<String> {
    let Some(group) = data.item_group.get(id) else {
        return vec![id.to_owned()];
    };
    let mut entries = group.display_entries();
    entries.sort_by_key(|e| std::cmp::Reverse(e.prob.unwrap_or(100)));
    let total: u32 = entries.iter().map(|e| e.prob.unwrap_or(100)).sum();
    let mut lines = vec![group.id.clone()];
    for entry in entries {
        let pct = entry.prob.unwrap_or(100) as f32 / total.max(1) as f32 * 100.0;
        let line = match (&entry.item, &entry.group) {
            (Some(item), _) => format!("{:.1}% {}", pct, item),
            (None, Some(sub)) => format!("{:.1}% {} (group)", pct, sub),
            (None, None) => continue,
        };
        lines.push(line);
    }
    lines
}

/// Member list, most frequent first. Frequencies are out of 1000; whatever
/// is left over spawns the group's default monster. Monster ids resolve to
/// display names through the monster table.
fn monster_group_detail(data: &GameDataIndex, name: &str) -> Vec<String> {
    let Some(group) = data.monster_group.get(name) else {
        return vec![name.to_owned()];
    };
    let mut members = group.monsters.clone();
    members.sort_by_key(|m| std::cmp::Reverse(m.freq));
    let total_freq: u32 = members.iter().map(|m| m.freq).sum();
    let mut lines = vec![group.name.clone()];
    if let Some(default) = group.default.as_deref().filter(|d| *d != "mon_null") {
        let pct = (1000u32.saturating_sub(total_freq)) as f32 / 10.0;
        lines.push(format!("{:.1}% {} ({})", pct, monster_name(data, default), default));
    }
    for member in members {
        lines.push(format!(
            "{:.1}% {} ({})",
            member.freq as f32 / 10.0,
            monster_name(data, &member.monster),
            member.monster
        ));
    }
    lines
}

fn monster_name<'a>(data: &'a GameDataIndex, id: &'a str) -> &'a str {
    data.monster
        .get(id)
        .filter(|m| !m.name.is_empty())
        .map(|m| m.name.as_str())
        .unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MonsterDef, MonsterGroupDef, TerrainDef};
    use serde_json::json;

    fn index() -> GameDataIndex {
        let mut data = GameDataIndex::default();
        data.terrain.insert(
            "t_wall".to_owned(),
            TerrainDef {
                id: "t_wall".to_owned(),
                name: "wall".to_owned(),
                flags: vec!["WALL".to_owned(), "AUTO_WALL_SYMBOL".to_owned()],
                move_cost: Some(0),
                ..TerrainDef::default()
            },
        );
        data.item_group.insert(
            "everyday_gear".to_owned(),
            serde_json::from_value(json!({
                "id": "everyday_gear",
                "items": [["knife", 300], ["rock", 100]]
            }))
            .unwrap(),
        );
        data.monster_group.insert(
            "GROUP_ZOMBIE".to_owned(),
            serde_json::from_value::<MonsterGroupDef>(json!({
                "name": "GROUP_ZOMBIE",
                "default": "mon_zombie",
                "monsters": [
                    {"monster": "mon_zombie_dog", "freq": 100},
                    {"monster": "mon_zombie_cop", "freq": 300}
                ]
            }))
            .unwrap(),
        );
        data.monster.insert(
            "mon_zombie".to_owned(),
            MonsterDef {
                id: "mon_zombie".to_owned(),
                name: "zombie".to_owned(),
            },
        );
        data.monster.insert(
            "mon_zombie_cop".to_owned(),
            MonsterDef {
                id: "mon_zombie_cop".to_owned(),
                name: "zombie cop".to_owned(),
            },
        );
        data
    }

    #[test]
    fn test_terrain_detail() {
        let lines = terrain_detail(&index(), "t_wall");
        assert_eq!(lines, vec!["wall", "WALL, AUTO_WALL_SYMBOL", "Move cost: 0"]);
    }

    #[test]
    fn test_terrain_detail_unknown_id_degrades_to_id() {
        assert_eq!(terrain_detail(&index(), "t_missing"), vec!["t_missing"]);
    }

    #[test]
    fn test_item_group_detail_sorts_by_probability() {
        let lines = item_group_detail(&index(), "everyday_gear");
        assert_eq!(lines[0], "everyday_gear");
        assert_eq!(lines[1], "75.0% knife");
        assert_eq!(lines[2], "25.0% rock");
    }

    #[test]
    fn test_monster_group_detail_resolves_names() {
        let lines = monster_group_detail(&index(), "GROUP_ZOMBIE");
        assert_eq!(lines[0], "GROUP_ZOMBIE");
        // Default member takes the frequency not claimed by the others.
        assert_eq!(lines[1], "60.0% zombie (mon_zombie)");
        assert_eq!(lines[2], "30.0% zombie cop (mon_zombie_cop)");
        // No monster table entry: the id stands in for the name.
        assert_eq!(lines[3], "10.0% mon_zombie_dog (mon_zombie_dog)");
    }
}
