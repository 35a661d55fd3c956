// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::RecordId;
use crate::model::Field;

/// Cell coordinates inside the current derived view: row index into the
/// filtered/sorted rows, column index into the visible columns. Not
/// stable across re-filtering or re-sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

/// The single open editor, addressed by row identity so the target
/// survives view reordering while the editor is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub row_id: RecordId,
    pub field: Field,
    pub buffer: String,
}

/// Dimensions of the derived view at the moment a key event is handled.
/// Callers must rebuild this from the current view on every dispatch;
/// bounds captured earlier go stale whenever filters, sort, or column
/// visibility change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewBounds {
    pub rows: usize,
    pub cols: usize,
}

impl ViewBounds {
    pub const fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCommand {
    MoveFocus { rows: isize, cols: isize },
    /// Open the editor for the cell under focus; the caller resolves the
    /// (row identity, field, current text) from the current view.
    BeginEdit {
        row_id: RecordId,
        field: Field,
        text: String,
    },
    /// Direct editor open, bypassing focus (the pointer double-click
    /// path).
    OpenEditor {
        row_id: RecordId,
        field: Field,
        text: String,
    },
    EditInput(char),
    EditBackspace,
    CommitEdit,
    CancelEdit,
    ClearFocus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    FocusMoved(CellPosition),
    FocusCleared,
    EditOpened { row_id: RecordId, field: Field },
    EditCanceled,
    /// Hand the edited text back to the caller for the store write.
    EditCommitted {
        row_id: RecordId,
        field: Field,
        text: String,
    },
    Ignored,
}

/// Focus and edit state. `focused` is kept while an editor is open so
/// canceling the editor lands back on the same cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridState {
    pub focused: Option<CellPosition>,
    pub editing: Option<EditTarget>,
}

impl GridState {
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn dispatch(&mut self, command: GridCommand, bounds: ViewBounds) -> GridEvent {
        match command {
            GridCommand::MoveFocus { rows, cols } => self.move_focus(rows, cols, bounds),
            GridCommand::BeginEdit {
                row_id,
                field,
                text,
            }
            | GridCommand::OpenEditor {
                row_id,
                field,
                text,
            } => {
                // Opening a new editor implicitly closes any previous one.
                self.editing = Some(EditTarget {
                    row_id,
                    field,
                    buffer: text,
                });
                GridEvent::EditOpened { row_id, field }
            }
            GridCommand::EditInput(ch) => match &mut self.editing {
                Some(target) => {
                    target.buffer.push(ch);
                    GridEvent::Ignored
                }
                None => GridEvent::Ignored,
            },
            GridCommand::EditBackspace => match &mut self.editing {
                Some(target) => {
                    target.buffer.pop();
                    GridEvent::Ignored
                }
                None => GridEvent::Ignored,
            },
            GridCommand::CommitEdit => match self.editing.take() {
                Some(target) => GridEvent::EditCommitted {
                    row_id: target.row_id,
                    field: target.field,
                    text: target.buffer,
                },
                None => GridEvent::Ignored,
            },
            GridCommand::CancelEdit => match self.editing.take() {
                Some(_) => GridEvent::EditCanceled,
                None => GridEvent::Ignored,
            },
            GridCommand::ClearFocus => {
                if self.editing.is_some() {
                    return GridEvent::Ignored;
                }
                match self.focused.take() {
                    Some(_) => GridEvent::FocusCleared,
                    None => GridEvent::Ignored,
                }
            }
        }
    }

    /// Clamps an existing focus after the view shrank underneath it.
    pub fn clamp_focus(&mut self, bounds: ViewBounds) {
        if bounds.is_empty() {
            self.focused = None;
            return;
        }
        if let Some(position) = &mut self.focused {
            position.row = position.row.min(bounds.rows - 1);
            position.col = position.col.min(bounds.cols - 1);
        }
    }

    fn move_focus(&mut self, rows: isize, cols: isize, bounds: ViewBounds) -> GridEvent {
        if self.editing.is_some() || bounds.is_empty() {
            return GridEvent::Ignored;
        }

        let next = match self.focused {
            // First movement key focuses the origin cell.
            None => CellPosition { row: 0, col: 0 },
            Some(position) => CellPosition {
                row: step_clamped(position.row, rows, bounds.rows),
                col: step_clamped(position.col, cols, bounds.cols),
            },
        };
        self.focused = Some(next);
        GridEvent::FocusMoved(next)
    }
}

fn step_clamped(current: usize, delta: isize, len: usize) -> usize {
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    next.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::{CellPosition, GridCommand, GridEvent, GridState, ViewBounds};
    use crate::ids::RecordId;
    use crate::model::Field;

    const BOUNDS: ViewBounds = ViewBounds { rows: 5, cols: 9 };

    fn focused_at(row: usize, col: usize) -> GridState {
        GridState {
            focused: Some(CellPosition { row, col }),
            editing: None,
        }
    }

    fn begin_edit(text: &str) -> GridCommand {
        GridCommand::BeginEdit {
            row_id: RecordId::new(2),
            field: Field::Task,
            text: text.to_owned(),
        }
    }

    #[test]
    fn first_movement_key_focuses_the_origin() {
        let mut state = GridState::default();
        let event = state.dispatch(GridCommand::MoveFocus { rows: 1, cols: 0 }, BOUNDS);
        assert_eq!(event, GridEvent::FocusMoved(CellPosition { row: 0, col: 0 }));
    }

    #[test]
    fn movement_clamps_at_all_four_edges() {
        let mut state = focused_at(0, 0);
        state.dispatch(GridCommand::MoveFocus { rows: -1, cols: 0 }, BOUNDS);
        state.dispatch(GridCommand::MoveFocus { rows: 0, cols: -1 }, BOUNDS);
        assert_eq!(state.focused, Some(CellPosition { row: 0, col: 0 }));

        let mut state = focused_at(4, 8);
        state.dispatch(GridCommand::MoveFocus { rows: 1, cols: 0 }, BOUNDS);
        state.dispatch(GridCommand::MoveFocus { rows: 0, cols: 1 }, BOUNDS);
        assert_eq!(state.focused, Some(CellPosition { row: 4, col: 8 }));
    }

    #[test]
    fn movement_uses_bounds_passed_at_dispatch_time() {
        // The view narrowed from 5 rows to 2 between key events; the
        // second dispatch must clamp against the new bounds.
        let mut state = focused_at(1, 3);
        let narrowed = ViewBounds { rows: 2, cols: 4 };
        state.dispatch(GridCommand::MoveFocus { rows: 3, cols: 3 }, narrowed);
        assert_eq!(state.focused, Some(CellPosition { row: 1, col: 3 }));
    }

    #[test]
    fn movement_in_an_empty_view_is_ignored() {
        let mut state = GridState::default();
        let event = state.dispatch(
            GridCommand::MoveFocus { rows: 1, cols: 0 },
            ViewBounds { rows: 0, cols: 9 },
        );
        assert_eq!(event, GridEvent::Ignored);
        assert_eq!(state.focused, None);
    }

    #[test]
    fn escape_clears_focus_only_when_not_editing() {
        let mut state = focused_at(2, 1);
        assert_eq!(state.dispatch(GridCommand::ClearFocus, BOUNDS), GridEvent::FocusCleared);
        assert_eq!(state.focused, None);
        assert_eq!(state.dispatch(GridCommand::ClearFocus, BOUNDS), GridEvent::Ignored);
    }

    #[test]
    fn begin_edit_enters_editing_and_keeps_focus_underneath() {
        let mut state = focused_at(1, 0);
        let event = state.dispatch(begin_edit("Update press kit"), BOUNDS);
        assert_eq!(
            event,
            GridEvent::EditOpened {
                row_id: RecordId::new(2),
                field: Field::Task,
            }
        );
        assert!(state.is_editing());
        assert_eq!(state.focused, Some(CellPosition { row: 1, col: 0 }));
    }

    #[test]
    fn opening_a_second_editor_replaces_the_first() {
        let mut state = focused_at(1, 0);
        state.dispatch(begin_edit("first"), BOUNDS);
        state.dispatch(
            GridCommand::OpenEditor {
                row_id: RecordId::new(4),
                field: Field::Assignee,
                text: "Tom Wright".to_owned(),
            },
            BOUNDS,
        );

        let target = state.editing.as_ref().expect("open editor");
        assert_eq!(target.row_id, RecordId::new(4));
        assert_eq!(target.field, Field::Assignee);
        assert_eq!(target.buffer, "Tom Wright");
    }

    #[test]
    fn edit_input_and_backspace_mutate_the_buffer() {
        let mut state = focused_at(0, 0);
        state.dispatch(begin_edit(""), BOUNDS);
        state.dispatch(GridCommand::EditInput('h'), BOUNDS);
        state.dispatch(GridCommand::EditInput('i'), BOUNDS);
        state.dispatch(GridCommand::EditBackspace, BOUNDS);
        assert_eq!(state.editing.as_ref().map(|t| t.buffer.as_str()), Some("h"));
    }

    #[test]
    fn movement_keys_are_captured_while_editing() {
        let mut state = focused_at(1, 1);
        state.dispatch(begin_edit("text"), BOUNDS);
        let event = state.dispatch(GridCommand::MoveFocus { rows: 1, cols: 0 }, BOUNDS);
        assert_eq!(event, GridEvent::Ignored);
        assert_eq!(state.focused, Some(CellPosition { row: 1, col: 1 }));
    }

    #[test]
    fn commit_leaves_editing_and_hands_back_the_buffer() {
        let mut state = focused_at(1, 0);
        state.dispatch(begin_edit("Update press kit v2"), BOUNDS);
        let event = state.dispatch(GridCommand::CommitEdit, BOUNDS);
        assert_eq!(
            event,
            GridEvent::EditCommitted {
                row_id: RecordId::new(2),
                field: Field::Task,
                text: "Update press kit v2".to_owned(),
            }
        );
        assert!(!state.is_editing());
        assert!(state.focused.is_some());
    }

    #[test]
    fn cancel_discards_the_buffer_and_returns_to_focused() {
        let mut state = focused_at(3, 2);
        state.dispatch(begin_edit("unsaved"), BOUNDS);
        assert_eq!(state.dispatch(GridCommand::CancelEdit, BOUNDS), GridEvent::EditCanceled);
        assert!(!state.is_editing());
        assert_eq!(state.focused, Some(CellPosition { row: 3, col: 2 }));
    }

    #[test]
    fn clamp_focus_follows_a_shrinking_view() {
        let mut state = focused_at(4, 8);
        state.clamp_focus(ViewBounds { rows: 2, cols: 3 });
        assert_eq!(state.focused, Some(CellPosition { row: 1, col: 2 }));

        state.clamp_focus(ViewBounds { rows: 0, cols: 3 });
        assert_eq!(state.focused, None);
    }
}
