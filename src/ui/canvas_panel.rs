//! The map viewport: shows the rendered grid texture and translates pointer
//! gestures into reducers. Painting, zone drags and zone clicks all leave
//! here as queued reducers; nothing is mutated in place.

use eframe::egui::{self, Color32, Pos2, Rect, Sense, TextureHandle};

use crate::editor::{AppState, Reducer, Tab};

/// On-screen magnification of the tile grid.
pub const CANVAS_SCALE: f32 = 2.0;

/// Lays out the map texture and feeds pointer events into the reducer
/// queue. `drag_anchor` is the cell where the current zone drag started; it
/// lives in the UI because it is gesture state, not document state.
pub fn show(
    ui: &mut egui::Ui,
    state: &AppState,
    texture: &TextureHandle,
    tile_size: (u32, u32),
    queue: &mut Vec<Reducer>,
    drag_anchor: &mut Option<(i32, i32)>,
) {
    let size = texture.size_vec2() * CANVAS_SCALE;
    let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
    ui.painter().image(
        texture.id(),
        rect,
        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
        Color32::WHITE,
    );

    let cell_at = |pos: Pos2| cell_of(pos, rect, tile_size, state);

    let hover_cell = response.hover_pos().and_then(cell_at);
    if hover_cell != state.hover {
        queue.push(Reducer::Hover(hover_cell));
    }

    match state.tab {
        Tab::Symbols => {
            // Click paints one cell; holding the button paints a stroke.
            if response.clicked() || response.dragged() {
                if let Some((x, y)) = response.interact_pointer_pos().and_then(cell_at) {
                    queue.push(Reducer::PaintCell { x, y });
                }
            }
        }
        Tab::Zones => {
            if response.drag_started() {
                *drag_anchor = response.interact_pointer_pos().and_then(cell_at);
            }
            if response.dragged() {
                if let (Some(anchor), Some(current)) = (
                    *drag_anchor,
                    response.interact_pointer_pos().and_then(cell_at),
                ) {
                    queue.push(Reducer::DragUpdate { anchor, current });
                }
            }
            if response.drag_released() {
                queue.push(Reducer::CommitZoneRect);
                *drag_anchor = None;
            }
            if response.clicked() {
                if let Some((x, y)) = response.interact_pointer_pos().and_then(cell_at) {
                    queue.push(Reducer::SelectZoneAt { x, y });
                }
            }
        }
    }
}

fn cell_of(
    pos: Pos2,
    rect: Rect,
    (tw, th): (u32, u32),
    state: &AppState,
) -> Option<(i32, i32)> {
    let local = (pos - rect.min) / CANVAS_SCALE;
    if local.x < 0.0 || local.y < 0.0 {
        return None;
    }
    let cell = (
        (local.x / tw as f32) as i32,
        (local.y / th as f32) as i32,
    );
    state.document.in_bounds(cell.0, cell.1).then_some(cell)
}
