use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::{App, Mode};
use crate::tui::layout::{self, Hit};

/// Handle a mouse event: buttons act on press, a press on a row body starts
/// a drag and a release over another row swaps the two tasks.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let hit = layout::compute(app.screen, app).hit(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_press(app, hit),
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.drag_source.is_some() {
                app.drag_hover = hit.and_then(Hit::row_index);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => handle_release(app, hit),
        MouseEventKind::ScrollUp if app.mode != Mode::AwaitingFilename => app.scroll_by(-1),
        MouseEventKind::ScrollDown if app.mode != Mode::AwaitingFilename => app.scroll_by(1),
        _ => {}
    }
}

fn handle_press(app: &mut App, hit: Option<Hit>) {
    let Some(hit) = hit else {
        return;
    };
    match hit {
        Hit::SaveFilename => app.confirm_filename(),
        Hit::Submit => app.submit_entry(),
        Hit::Done(i) => app.toggle_done(i),
        Hit::Delete(i) => app.delete(i),
        Hit::Edit(i) => app.begin_edit(i),
        Hit::Row(i) => {
            app.cursor = i;
            app.drag_source = Some(i);
            app.drag_hover = Some(i);
        }
    }
}

fn handle_release(app: &mut App, hit: Option<Hit>) {
    app.drag_hover = None;
    let Some(source) = app.drag_source.take() else {
        return;
    };
    if let Some(target) = hit.and_then(Hit::row_index)
        && target != source
    {
        app.swap(source, target);
    }
}
