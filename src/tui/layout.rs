//! Screen geometry shared by rendering and mouse hit-testing.
//!
//! Both sides compute the same `ScreenLayout` from the terminal area and
//! the app state, so a click always lands on what was drawn.

use ratatui::layout::{Position, Rect};

use super::app::{App, Mode};

/// Rows taken by one task: text line, deadline line, gap
pub const TASK_HEIGHT: u16 = 3;

pub const DONE_LABEL: &str = "Done";
pub const DELETE_LABEL: &str = "Delete";
pub const EDIT_LABEL: &str = "Edit";
pub const ADD_LABEL: &str = "+ Add";
pub const SAVE_LABEL: &str = "Save";

/// Width of the submit button next to the input box
const SUBMIT_WIDTH: u16 = 9;
/// Width of the filename box on the prompt screen
const NAME_BOX_WIDTH: u16 = 40;
/// Width of the prompt's Save button
const PROMPT_BUTTON_WIDTH: u16 = 10;

/// Something the pointer can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Save button on the filename prompt
    SaveFilename,
    /// Add / Save button next to the input box
    Submit,
    Done(usize),
    Delete(usize),
    Edit(usize),
    /// Body of a task row (drag handle)
    Row(usize),
}

impl Hit {
    /// Task index under the pointer, whatever part of the row was hit
    pub fn row_index(self) -> Option<usize> {
        match self {
            Hit::Done(i) | Hit::Delete(i) | Hit::Edit(i) | Hit::Row(i) => Some(i),
            Hit::SaveFilename | Hit::Submit => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLayout {
    pub title: Rect,
    pub name_box: Rect,
    pub save_button: Rect,
    pub status: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    /// Index into the task list
    pub index: usize,
    /// Text line followed by the deadline line
    pub area: Rect,
    pub text: Rect,
    pub deadline: Rect,
    pub done_button: Rect,
    pub delete_button: Rect,
    pub edit_button: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLayout {
    pub header: Rect,
    pub list_area: Rect,
    pub rows: Vec<RowLayout>,
    pub input_box: Rect,
    pub submit_button: Rect,
    pub status: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenLayout {
    Prompt(PromptLayout),
    List(ListLayout),
}

/// Width of a button drawn around `label`
pub fn button_width(label: &str) -> u16 {
    crate::util::unicode::display_width(label) as u16 + 2
}

/// Number of whole tasks that fit in a list area of `height` rows
pub fn visible_task_count(height: u16) -> usize {
    // The gap after the last visible task may fall off the bottom
    ((height + 1) / TASK_HEIGHT) as usize
}

/// Height of the list area for a screen of `height` rows
pub fn list_height(height: u16) -> u16 {
    // header + blank above, blank + input + status below
    height.saturating_sub(5)
}

pub fn compute(area: Rect, app: &App) -> ScreenLayout {
    match app.mode {
        Mode::AwaitingFilename => ScreenLayout::Prompt(compute_prompt(area)),
        Mode::Browsing | Mode::Editing(_) => ScreenLayout::List(compute_list(area, app)),
    }
}

fn compute_prompt(area: Rect) -> PromptLayout {
    let mid = area.y + area.height / 2;
    let box_w = NAME_BOX_WIDTH.min(area.width.saturating_sub(4));
    let button_w = PROMPT_BUTTON_WIDTH.min(area.width);
    let bottom = area.y + area.height.saturating_sub(1);

    PromptLayout {
        title: Rect::new(area.x, mid.saturating_sub(3).max(area.y), area.width, 1),
        name_box: Rect::new(
            area.x + (area.width.saturating_sub(box_w)) / 2,
            mid.saturating_sub(1).max(area.y),
            box_w,
            1,
        ),
        save_button: Rect::new(
            area.x + (area.width.saturating_sub(button_w)) / 2,
            (mid + 1).min(bottom),
            button_w,
            1,
        ),
        status: Rect::new(area.x, bottom, area.width, 1),
    }
}

fn compute_list(area: Rect, app: &App) -> ListLayout {
    let bottom = area.y + area.height.saturating_sub(1);
    let header = Rect::new(area.x, area.y, area.width, 1);
    let list_area = Rect::new(
        area.x,
        area.y + 2.min(area.height),
        area.width,
        list_height(area.height),
    );
    let input_y = bottom.saturating_sub(1).max(area.y);
    let status = Rect::new(area.x, bottom, area.width, 1);

    let submit_w = SUBMIT_WIDTH.min(area.width.saturating_sub(2));
    let submit_button = Rect::new(
        area.x + area.width.saturating_sub(submit_w + 1),
        input_y,
        submit_w,
        1,
    );
    let input_box = Rect::new(
        area.x + 1.min(area.width),
        input_y,
        area.width.saturating_sub(submit_w + 3),
        1,
    );

    let rows = compute_rows(list_area, app);

    ListLayout {
        header,
        list_area,
        rows,
        input_box,
        submit_button,
        status,
    }
}

fn compute_rows(list_area: Rect, app: &App) -> Vec<RowLayout> {
    let done_w = button_width(DONE_LABEL);
    let delete_w = button_width(DELETE_LABEL);
    let edit_w = button_width(EDIT_LABEL);
    let buttons_w = done_w + delete_w + edit_w + 2;

    let right = list_area.x + list_area.width.saturating_sub(1);
    let edit_x = right.saturating_sub(edit_w);
    let delete_x = edit_x.saturating_sub(delete_w + 1);
    let done_x = delete_x.saturating_sub(done_w + 1);
    let text_x = list_area.x + 1.min(list_area.width);
    let text_w = list_area.width.saturating_sub(buttons_w + 4);

    let visible = visible_task_count(list_area.height);
    let end = (app.scroll_offset + visible).min(app.list.len());

    (app.scroll_offset..end)
        .enumerate()
        .map(|(slot, index)| {
            let y = list_area.y + slot as u16 * TASK_HEIGHT;
            RowLayout {
                index,
                area: Rect::new(list_area.x, y, list_area.width, 2),
                text: Rect::new(text_x, y, text_w, 1),
                deadline: Rect::new(text_x, y + 1, text_w, 1),
                done_button: Rect::new(done_x, y, done_w, 1),
                delete_button: Rect::new(delete_x, y, delete_w, 1),
                edit_button: Rect::new(edit_x, y, edit_w, 1),
            }
        })
        .collect()
}

impl ScreenLayout {
    /// What lies under the cell at (`column`, `row`)
    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let pos = Position::new(column, row);
        match self {
            ScreenLayout::Prompt(p) => p.save_button.contains(pos).then_some(Hit::SaveFilename),
            ScreenLayout::List(l) => {
                if l.submit_button.contains(pos) {
                    return Some(Hit::Submit);
                }
                let row = l.rows.iter().find(|r| r.area.contains(pos))?;
                Some(if row.done_button.contains(pos) {
                    Hit::Done(row.index)
                } else if row.delete_button.contains(pos) {
                    Hit::Delete(row.index)
                } else if row.edit_button.contains(pos) {
                    Hit::Edit(row.index)
                } else {
                    Hit::Row(row.index)
                })
            }
        }
    }
}
