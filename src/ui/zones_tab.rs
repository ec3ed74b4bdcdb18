//! The zone tab: loot/monster kind switch, zone-tool options, and editing
//! of the selected zone. Drawing happens on the canvas; this panel only
//! adjusts what the next drawn zone (or the selected one) carries.

use eframe::egui;

use crate::data::GameDataIndex;
use crate::document::{Repeat, ZoneKind};
use crate::editor::{AppState, PickerTarget, Reducer, ZoneOptions};

pub fn show(
    ui: &mut egui::Ui,
    state: &AppState,
    data: &GameDataIndex,
    queue: &mut Vec<Reducer>,
) {
    let opts = &state.zone_options;

    ui.horizontal(|ui| {
        for kind in [ZoneKind::Loot, ZoneKind::Monsters] {
            if ui
                .radio(opts.kind == kind, kind.label())
                .clicked()
                && opts.kind != kind
            {
                queue.push(Reducer::SetZoneKind(kind));
            }
        }
    });
    ui.separator();

    let group_label = match opts.kind {
        ZoneKind::Loot => "Item group:",
        ZoneKind::Monsters => "Monster group:",
    };
    ui.horizontal(|ui| {
        ui.label(group_label);
        if ui.button(&opts.group).clicked() {
            queue.push(Reducer::OpenPicker(PickerTarget::ZoneGroup));
        }
    });
    if missing_group(data, opts.kind, &opts.group) {
        ui.colored_label(egui::Color32::YELLOW, "group not found in loaded content");
    }

    ui.horizontal(|ui| {
        ui.label("Chance:");
        let mut chance = opts
            .chance
            .unwrap_or(ZoneOptions::default_chance(opts.kind));
        if ui
            .add(egui::DragValue::new(&mut chance).clamp_range(0..=100))
            .changed()
        {
            queue.push(Reducer::EditSelectedZoneChance(Some(chance)));
        }
    });

    ui.horizontal(|ui| {
        ui.label("Repeat:");
        let repeat = opts.repeat.unwrap_or(Repeat::exact(1));
        let (mut lo, mut hi) = (repeat.lo, repeat.hi);
        let lo_changed = ui
            .add(egui::DragValue::new(&mut lo).clamp_range(1..=100))
            .changed();
        ui.label("to");
        let hi_changed = ui
            .add(egui::DragValue::new(&mut hi).clamp_range(1..=100))
            .changed();
        if lo_changed || hi_changed {
            queue.push(Reducer::EditSelectedZoneRepeat(Some(Repeat::range(lo, hi))));
        }
    });

    ui.separator();
    let count = state.document.zone_count(opts.kind);
    match state.selected_zone {
        Some(idx) => {
            ui.label(format!("Selected: {} zone {} of {}", opts.kind.label(), idx + 1, count));
            if ui.button("Delete zone").clicked() {
                queue.push(Reducer::DeleteSelectedZone);
            }
        }
        None => {
            ui.label(format!("{} {} zones", count, opts.kind.label()));
            ui.label("Drag on the map to draw a zone; click one to select it.");
        }
    }
}

fn missing_group(data: &GameDataIndex, kind: ZoneKind, group: &str) -> bool {
    match kind {
        ZoneKind::Loot => !data.item_group.contains_key(group),
        ZoneKind::Monsters => !data.monster_group.contains_key(group),
    }
}
