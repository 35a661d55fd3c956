// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::collections::BTreeSet;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tasksheet_app::{
    CellPosition, Field, GridCommand, GridEvent, GridState, Priority, Record, RecordId, SheetStore,
    SortDirection, Status, ViewBounds, ViewState, derived_rows,
};
use time::Date;
use time::macros::format_description;

const SORT_MARK_ASC: &str = "▲";
const SORT_MARK_DESC: &str = "▼";
const FILTER_MARK: &str = "◆";
const SELECT_MARK: &str = "✓";
const TAB_TITLES: [&str; 3] = ["All Orders", "Pending", "Completed"];

/// Columns that carry a categorical filter, in panel order.
const FILTER_FIELDS: [Field; 3] = [Field::Status, Field::Priority, Field::Assignee];

/// Toolbar actions that live outside the grid itself. Implementations
/// may be stubs; the outcome drives the status line either way.
pub trait SheetActions {
    fn import_rows(&mut self) -> Result<ActionOutcome>;
    fn export_rows(&mut self) -> Result<ActionOutcome>;
    fn share_view(&mut self) -> Result<ActionOutcome>;
    fn add_tab(&mut self) -> Result<ActionOutcome>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Done(String),
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Grid,
    Search,
    Filter,
}

/// Cursor within the filter overlay: one of the filterable columns and
/// one of its candidate values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPanelState {
    pub field_cursor: usize,
    pub value_cursor: usize,
}

#[derive(Debug)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    /// Minimum number of grid lines drawn; short data sets are padded
    /// with blank rows so the sheet keeps its shape.
    pub placeholder_rows: usize,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            placeholder_rows: 15,
        }
    }
}

/// Everything the renderer needs besides the store itself.
#[derive(Debug, Default)]
pub struct UiState {
    pub mode: InputMode,
    pub grid: GridState,
    pub view: ViewState,
    pub filter_panel: FilterPanelState,
    pub help_visible: bool,
    pub active_tab: usize,
    pub status_line: Option<String>,
    pub placeholder_rows: usize,
    status_token: u64,
}

impl UiState {
    pub fn new(options: UiOptions) -> Self {
        Self {
            placeholder_rows: options.placeholder_rows,
            ..Self::default()
        }
    }
}

/// Feedback for a grid-level command, rendered into the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum GridStatus {
    Sorted {
        field: Field,
        direction: SortDirection,
    },
    SortCleared,
    ColumnHidden(Field),
    LastColumnKept,
    ColumnsRestored,
    RowAdded(RecordId),
    SelectionChanged(usize),
    EditSaved(Field),
    EditCanceled,
    EditTargetMissing,
    NothingFocused,
    SearchApplied(usize),
    SearchCleared,
    FiltersCleared,
}

impl GridStatus {
    fn message(&self) -> String {
        match self {
            Self::Sorted { field, direction } => {
                let mark = match direction {
                    SortDirection::Asc => SORT_MARK_ASC,
                    SortDirection::Desc => SORT_MARK_DESC,
                };
                format!("sorted by {} {mark}", field.label())
            }
            Self::SortCleared => "sort cleared".to_owned(),
            Self::ColumnHidden(field) => format!("{} hidden", field.label()),
            Self::LastColumnKept => "cannot hide the last column".to_owned(),
            Self::ColumnsRestored => "all columns shown".to_owned(),
            Self::RowAdded(id) => format!("row {} added", id.get()),
            Self::SelectionChanged(0) => "selection cleared".to_owned(),
            Self::SelectionChanged(1) => "1 row selected".to_owned(),
            Self::SelectionChanged(count) => format!("{count} rows selected"),
            Self::EditSaved(field) => format!("{} saved", field.label()),
            Self::EditCanceled => "edit discarded".to_owned(),
            Self::EditTargetMissing => "row no longer exists".to_owned(),
            Self::NothingFocused => "no cell focused".to_owned(),
            Self::SearchApplied(1) => "1 row matches".to_owned(),
            Self::SearchApplied(count) => format!("{count} rows match"),
            Self::SearchCleared => "search cleared".to_owned(),
            Self::FiltersCleared => "filters cleared".to_owned(),
        }
    }
}

pub fn run_app<A: SheetActions>(
    store: &mut SheetStore,
    actions: &mut A,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut ui = UiState::new(options);
    let (internal_tx, internal_rx) = mpsc::channel();

    let mut result = Ok(());
    loop {
        process_internal_events(&mut ui, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, store, &ui)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(store, actions, &mut ui, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(ui: &mut UiState, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == ui.status_token => {
                ui.status_line = None;
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(ui: &mut UiState, internal_tx: &Sender<InternalEvent>, message: impl Into<String>) {
    ui.status_line = Some(message.into());
    ui.status_token = ui.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, ui.status_token);
}

fn view_bounds(store: &SheetStore, view: &ViewState) -> ViewBounds {
    ViewBounds {
        rows: derived_rows(store.rows(), view).len(),
        cols: view.visible_fields().len(),
    }
}

/// Resolves the focused cell to (row identity, field, cell text) against
/// the view as it stands right now.
fn resolve_focused_cell(
    store: &SheetStore,
    view: &ViewState,
    position: CellPosition,
) -> Option<(RecordId, Field, String)> {
    let rows = derived_rows(store.rows(), view);
    let row = rows.get(position.row)?;
    let field = view.visible_fields().get(position.col).copied()?;
    Some((row.id, field, row.field_text(field)))
}

fn handle_key_event<A: SheetActions>(
    store: &mut SheetStore,
    actions: &mut A,
    ui: &mut UiState,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if ui.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            ui.help_visible = false;
        }
        return false;
    }

    if ui.grid.is_editing() {
        handle_edit_key(store, ui, internal_tx, key);
        return false;
    }

    match ui.mode {
        InputMode::Search => handle_search_key(store, ui, internal_tx, key),
        InputMode::Filter => handle_filter_key(store, ui, internal_tx, key),
        InputMode::Grid => return handle_grid_key(store, actions, ui, internal_tx, key),
    }
    false
}

fn handle_edit_key(
    store: &mut SheetStore,
    ui: &mut UiState,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let bounds = view_bounds(store, &ui.view);
    match key.code {
        KeyCode::Enter => {
            if let GridEvent::EditCommitted {
                row_id,
                field,
                text,
            } = ui.grid.dispatch(GridCommand::CommitEdit, bounds)
            {
                let status = if store.update_field(row_id, field, &text) {
                    GridStatus::EditSaved(field)
                } else {
                    GridStatus::EditTargetMissing
                };
                // The commit may have moved the row out of the view.
                ui.grid.clamp_focus(view_bounds(store, &ui.view));
                emit_status(ui, internal_tx, status.message());
            }
        }
        KeyCode::Esc => {
            if ui.grid.dispatch(GridCommand::CancelEdit, bounds) == GridEvent::EditCanceled {
                emit_status(ui, internal_tx, GridStatus::EditCanceled.message());
            }
        }
        KeyCode::Backspace => {
            ui.grid.dispatch(GridCommand::EditBackspace, bounds);
        }
        KeyCode::Char(ch) => {
            ui.grid.dispatch(GridCommand::EditInput(ch), bounds);
        }
        _ => {}
    }
}

fn handle_search_key(
    store: &mut SheetStore,
    ui: &mut UiState,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Enter => {
            ui.mode = InputMode::Grid;
            let matched = derived_rows(store.rows(), &ui.view).len();
            emit_status(ui, internal_tx, GridStatus::SearchApplied(matched).message());
        }
        KeyCode::Esc => {
            ui.view.search.clear();
            ui.mode = InputMode::Grid;
            ui.grid.clamp_focus(view_bounds(store, &ui.view));
            emit_status(ui, internal_tx, GridStatus::SearchCleared.message());
        }
        KeyCode::Backspace => {
            ui.view.search.pop();
            ui.grid.clamp_focus(view_bounds(store, &ui.view));
        }
        KeyCode::Char(ch) => {
            ui.view.search.push(ch);
            ui.grid.clamp_focus(view_bounds(store, &ui.view));
        }
        _ => {}
    }
}

fn handle_filter_key(
    store: &mut SheetStore,
    ui: &mut UiState,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let field = FILTER_FIELDS[ui.filter_panel.field_cursor];
    let values = filter_values(field, store);

    match key.code {
        KeyCode::Esc => {
            ui.mode = InputMode::Grid;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            ui.filter_panel.field_cursor = ui.filter_panel.field_cursor.saturating_sub(1);
            ui.filter_panel.value_cursor = 0;
        }
        KeyCode::Right | KeyCode::Char('l') => {
            ui.filter_panel.field_cursor =
                (ui.filter_panel.field_cursor + 1).min(FILTER_FIELDS.len() - 1);
            ui.filter_panel.value_cursor = 0;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            ui.filter_panel.value_cursor = ui.filter_panel.value_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            ui.filter_panel.value_cursor =
                (ui.filter_panel.value_cursor + 1).min(values.len().saturating_sub(1));
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(value) = values.get(ui.filter_panel.value_cursor) {
                ui.view.filters.toggle(field, value);
                ui.grid.clamp_focus(view_bounds(store, &ui.view));
                let matched = derived_rows(store.rows(), &ui.view).len();
                emit_status(ui, internal_tx, GridStatus::SearchApplied(matched).message());
            }
        }
        KeyCode::Char('c') => {
            ui.view.filters = Default::default();
            ui.grid.clamp_focus(view_bounds(store, &ui.view));
            emit_status(ui, internal_tx, GridStatus::FiltersCleared.message());
        }
        _ => {}
    }
}

fn handle_grid_key<A: SheetActions>(
    store: &mut SheetStore,
    actions: &mut A,
    ui: &mut UiState,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let bounds = view_bounds(store, &ui.view);

    let movement = match (key.code, key.modifiers) {
        (KeyCode::Up | KeyCode::Char('k'), KeyModifiers::NONE) => Some((-1, 0)),
        (KeyCode::Down | KeyCode::Char('j'), KeyModifiers::NONE) => Some((1, 0)),
        (KeyCode::Left | KeyCode::Char('h'), KeyModifiers::NONE) => Some((0, -1)),
        (KeyCode::Right | KeyCode::Char('l'), KeyModifiers::NONE) => Some((0, 1)),
        _ => None,
    };
    if let Some((rows, cols)) = movement {
        ui.grid.dispatch(GridCommand::MoveFocus { rows, cols }, bounds);
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => match ui.grid.focused {
            Some(position) => match resolve_focused_cell(store, &ui.view, position) {
                Some((row_id, field, text)) => {
                    ui.grid.dispatch(
                        GridCommand::BeginEdit {
                            row_id,
                            field,
                            text,
                        },
                        bounds,
                    );
                }
                None => emit_status(ui, internal_tx, GridStatus::EditTargetMissing.message()),
            },
            None => emit_status(ui, internal_tx, GridStatus::NothingFocused.message()),
        },
        (KeyCode::Esc, _) => {
            if ui.grid.dispatch(GridCommand::ClearFocus, bounds) == GridEvent::Ignored {
                ui.status_line = None;
            }
        }
        (KeyCode::Char('/'), KeyModifiers::NONE) => {
            ui.mode = InputMode::Search;
        }
        (KeyCode::Char('f'), KeyModifiers::NONE) => {
            ui.mode = InputMode::Filter;
            ui.filter_panel = FilterPanelState::default();
        }
        (KeyCode::Char('s'), KeyModifiers::NONE) => {
            let field = ui
                .grid
                .focused
                .and_then(|position| ui.view.visible_fields().get(position.col).copied())
                .unwrap_or(Field::Task);
            let direction = ui.view.cycle_sort(field);
            emit_status(
                ui,
                internal_tx,
                GridStatus::Sorted { field, direction }.message(),
            );
        }
        (KeyCode::Char('S'), _) => {
            ui.view.clear_sort();
            emit_status(ui, internal_tx, GridStatus::SortCleared.message());
        }
        (KeyCode::Char('H'), _) => {
            let Some(position) = ui.grid.focused else {
                emit_status(ui, internal_tx, GridStatus::NothingFocused.message());
                return false;
            };
            let Some(field) = ui.view.visible_fields().get(position.col).copied() else {
                return false;
            };
            let status = if ui.view.hide_field(field) {
                ui.grid.clamp_focus(view_bounds(store, &ui.view));
                GridStatus::ColumnHidden(field)
            } else {
                GridStatus::LastColumnKept
            };
            emit_status(ui, internal_tx, status.message());
        }
        (KeyCode::Char('V'), _) => {
            ui.view.show_all_fields();
            emit_status(ui, internal_tx, GridStatus::ColumnsRestored.message());
        }
        (KeyCode::Char(' '), KeyModifiers::NONE) => {
            let Some(position) = ui.grid.focused else {
                emit_status(ui, internal_tx, GridStatus::NothingFocused.message());
                return false;
            };
            if let Some((row_id, _, _)) = resolve_focused_cell(store, &ui.view, position) {
                ui.view.toggle_selected(row_id);
                emit_status(
                    ui,
                    internal_tx,
                    GridStatus::SelectionChanged(ui.view.selected.len()).message(),
                );
            }
        }
        (KeyCode::Char('a'), KeyModifiers::NONE) => {
            ui.view.toggle_select_all(&store.record_ids());
            emit_status(
                ui,
                internal_tx,
                GridStatus::SelectionChanged(ui.view.selected.len()).message(),
            );
        }
        (KeyCode::Char('n'), KeyModifiers::NONE) => {
            let id = store.add_row();
            emit_status(ui, internal_tx, GridStatus::RowAdded(id).message());
        }
        (KeyCode::Tab, KeyModifiers::NONE) => {
            ui.active_tab = (ui.active_tab + 1) % TAB_TITLES.len();
        }
        (KeyCode::BackTab, _) => {
            ui.active_tab = (ui.active_tab + TAB_TITLES.len() - 1) % TAB_TITLES.len();
        }
        (KeyCode::Char('+'), _) => {
            run_action(ui, internal_tx, "add tab", actions.add_tab());
        }
        (KeyCode::Char('I'), _) => {
            run_action(ui, internal_tx, "import", actions.import_rows());
        }
        (KeyCode::Char('E'), _) => {
            run_action(ui, internal_tx, "export", actions.export_rows());
        }
        (KeyCode::Char('Y'), _) => {
            run_action(ui, internal_tx, "share", actions.share_view());
        }
        (KeyCode::Char('?'), KeyModifiers::NONE) => {
            ui.help_visible = true;
        }
        _ => {}
    }
    false
}

fn run_action(
    ui: &mut UiState,
    internal_tx: &Sender<InternalEvent>,
    label: &str,
    outcome: Result<ActionOutcome>,
) {
    let message = match outcome {
        Ok(ActionOutcome::Done(message)) => message,
        Ok(ActionOutcome::Unavailable) => format!("{label} is not available in this build"),
        Err(error) => format!("{label} failed: {error}"),
    };
    emit_status(ui, internal_tx, message);
}

/// Candidate values for a filterable column. Enumerated columns offer
/// their full domain; assignees come from the data.
fn filter_values(field: Field, store: &SheetStore) -> Vec<String> {
    match field {
        Field::Status => Status::ALL
            .into_iter()
            .map(|status| status.as_str().to_owned())
            .collect(),
        Field::Priority => Priority::ALL
            .into_iter()
            .map(|priority| priority.as_str().to_owned())
            .collect(),
        Field::Assignee => {
            let unique: BTreeSet<String> = store
                .rows()
                .iter()
                .map(|row| row.assignee.clone())
                .collect();
            unique.into_iter().collect()
        }
        _ => Vec::new(),
    }
}

fn render(frame: &mut ratatui::Frame<'_>, store: &SheetStore, ui: &UiState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let toolbar = Paragraph::new(toolbar_text(ui))
        .block(Block::default().title("tasksheet").borders(Borders::ALL));
    frame.render_widget(toolbar, layout[0]);

    render_grid(frame, layout[1], store, ui);

    let tabs = Tabs::new(TAB_TITLES.map(str::to_owned).to_vec())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(ui.active_tab);
    frame.render_widget(tabs, layout[2]);

    let status = Paragraph::new(status_text(ui))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[3]);

    if ui.mode == InputMode::Filter {
        let area = centered_rect(60, 55, frame.area());
        frame.render_widget(Clear, area);
        let panel = Paragraph::new(render_filter_panel_text(store, ui))
            .block(Block::default().title("filters").borders(Borders::ALL));
        frame.render_widget(panel, area);
    }

    if ui.help_visible {
        let area = centered_rect(70, 65, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_grid(frame: &mut ratatui::Frame<'_>, area: Rect, store: &SheetStore, ui: &UiState) {
    let rows = derived_rows(store.rows(), &ui.view);
    let fields = ui.view.visible_fields();

    // Leading "#" and selection columns, then the data columns.
    let mut widths = vec![Constraint::Length(4), Constraint::Length(2)];
    widths.extend(std::iter::repeat_n(Constraint::Min(8), fields.len()));

    let mut header_cells = vec![Cell::from("#"), Cell::from(" ")];
    header_cells.extend(fields.iter().map(|field| {
        Cell::from(header_label(*field, &ui.view)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));
    let header = Row::new(header_cells);

    let line_count = rows.len().max(ui.placeholder_rows);
    let body = (0..line_count).map(|row_index| match rows.get(row_index) {
        Some(record) => data_row(record, row_index, &fields, ui),
        None => Row::new(vec![Cell::from(""); fields.len() + 2]),
    });

    let grid = Table::new(body, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(grid_title(rows.len(), store.len()))
                .borders(Borders::ALL),
        );
    frame.render_widget(grid, area);
}

fn data_row<'a>(record: &Record, row_index: usize, fields: &[Field], ui: &'a UiState) -> Row<'a> {
    let focused_row = ui.grid.focused.map(|position| position.row) == Some(row_index);
    let selected = ui.view.selected.contains(&record.id);

    let select_cell = if selected {
        Cell::from(SELECT_MARK).style(Style::default().fg(Color::Cyan))
    } else {
        Cell::from(" ")
    };
    let mut cells = vec![Cell::from(record.id.get().to_string()), select_cell];

    cells.extend(fields.iter().enumerate().map(|(col_index, field)| {
        let focused_cell =
            focused_row && ui.grid.focused.map(|position| position.col) == Some(col_index);

        let editing_here = ui
            .grid
            .editing
            .as_ref()
            .map(|target| target.row_id == record.id && target.field == *field)
            .unwrap_or(false);
        let text = if editing_here {
            let buffer = ui
                .grid
                .editing
                .as_ref()
                .map(|target| target.buffer.clone())
                .unwrap_or_default();
            format!("{buffer}_")
        } else {
            display_cell_text(record, *field)
        };

        let mut style = cell_style(record, *field);
        if focused_row {
            style = style.bg(Color::DarkGray);
        }
        if focused_cell {
            style = Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD);
        }
        if editing_here {
            style = Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        Cell::from(text).style(style)
    }));

    Row::new(cells)
}

fn header_label(field: Field, view: &ViewState) -> String {
    let mut label = field.label().to_owned();
    if let Some(sort) = view.sort
        && sort.field == field
    {
        label.push(' ');
        label.push_str(match sort.direction {
            SortDirection::Asc => SORT_MARK_ASC,
            SortDirection::Desc => SORT_MARK_DESC,
        });
    }
    let filtered = view
        .filters
        .get(field)
        .map(|set| !set.is_empty())
        .unwrap_or(false);
    if filtered {
        label.push(' ');
        label.push_str(FILTER_MARK);
    }
    label
}

/// Presentation text for one cell: currency for values, DD/MM/YYYY for
/// well-formed dates, raw text otherwise.
fn display_cell_text(record: &Record, field: Field) -> String {
    match field {
        Field::Value => match record.value.amount() {
            Some(amount) => format_currency(amount),
            None => record.value.display(),
        },
        Field::Date => format_display_date(&record.date),
        Field::DueDate => format_display_date(&record.due_date),
        _ => record.field_text(field),
    }
}

fn cell_style(record: &Record, field: Field) -> Style {
    match field {
        Field::Status => match record.status.known() {
            Some(Status::InProcess) => Style::default().fg(Color::Yellow),
            Some(Status::NeedToStart) => Style::default().fg(Color::Blue),
            Some(Status::Complete) => Style::default().fg(Color::Green),
            Some(Status::Blocked) => Style::default().fg(Color::Red),
            None => Style::default(),
        },
        Field::Priority => match record.priority.known() {
            Some(Priority::High) => Style::default().fg(Color::Red),
            Some(Priority::Medium) => Style::default().fg(Color::Yellow),
            Some(Priority::Low) => Style::default().fg(Color::Green),
            None => Style::default(),
        },
        _ => Style::default(),
    }
}

fn grid_title(visible: usize, total: usize) -> String {
    if visible == total {
        format!("{total} rows")
    } else {
        format!("{visible} of {total} rows")
    }
}

fn toolbar_text(ui: &UiState) -> String {
    let search = if ui.mode == InputMode::Search {
        format!("search: {}_", ui.view.search)
    } else if ui.view.search.is_empty() {
        "search: -".to_owned()
    } else {
        format!("search: {}", ui.view.search)
    };

    let filters = ui.view.filters.status.len()
        + ui.view.filters.priority.len()
        + ui.view.filters.assignee.len();
    let filters = if filters == 0 {
        "filters: -".to_owned()
    } else {
        format!("filters: {filters}")
    };

    let sort = match ui.view.sort {
        Some(sort) => {
            let mark = match sort.direction {
                SortDirection::Asc => SORT_MARK_ASC,
                SortDirection::Desc => SORT_MARK_DESC,
            };
            format!("sort: {} {mark}", sort.field.label())
        }
        None => "sort: -".to_owned(),
    };

    format!("{search} | {filters} | {sort}")
}

fn status_text(ui: &UiState) -> String {
    let mode = if ui.grid.is_editing() {
        "EDIT"
    } else {
        match ui.mode {
            InputMode::Grid => "GRID",
            InputMode::Search => "SEARCH",
            InputMode::Filter => "FILTER",
        }
    };
    let default =
        "arrows/hjkl move | enter edit | / search | f filters | s sort | space/a select | n new | H/V cols | I/E/Y/+ | ? help | ctrl+q";
    match &ui.status_line {
        Some(status) => format!("{mode} | {status} | {default}"),
        None => format!("{mode} | {default}"),
    }
}

fn render_filter_panel_text(store: &SheetStore, ui: &UiState) -> String {
    let mut lines = Vec::new();
    for (field_index, field) in FILTER_FIELDS.into_iter().enumerate() {
        let marker = if field_index == ui.filter_panel.field_cursor {
            ">"
        } else {
            " "
        };
        lines.push(format!("{marker} {}", field.label()));

        if field_index == ui.filter_panel.field_cursor {
            for (value_index, value) in filter_values(field, store).into_iter().enumerate() {
                let cursor = if value_index == ui.filter_panel.value_cursor {
                    ">"
                } else {
                    " "
                };
                let active = ui
                    .view
                    .filters
                    .get(field)
                    .map(|set| set.contains(&value))
                    .unwrap_or(false);
                let mark = if active { "[x]" } else { "[ ]" };
                lines.push(format!("  {cursor} {mark} {value}"));
            }
        }
    }
    lines.push(String::new());
    lines.push("h/l column  j/k value  space toggle  c clear  esc close".to_owned());
    lines.join("\n")
}

fn help_overlay_text() -> &'static str {
    "arrows or hjkl  move cell focus\n\
     enter           edit the focused cell\n\
     esc             cancel edit / clear focus\n\
     /               search all columns\n\
     f               categorical filters\n\
     s / S           sort focused column / clear sort\n\
     H / V           hide focused column / show all\n\
     space / a       select row / select all\n\
     n               add a row\n\
     tab             switch sheet tab\n\
     I / E / Y / +   import / export / share / add tab\n\
     ctrl+q          quit"
}

/// `$6,200,000` shape; negative amounts carry a leading minus.
pub fn format_currency(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(amount.unsigned_abs()))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// ISO `YYYY-MM-DD` rendered as `DD/MM/YYYY`; anything unparseable is
/// shown verbatim.
pub fn format_display_date(value: &str) -> String {
    let iso = format_description!("[year]-[month]-[day]");
    match Date::parse(value, &iso) {
        Ok(date) => format!(
            "{:02}/{:02}/{}",
            date.day(),
            u8::from(date.month()),
            date.year()
        ),
        Err(_) => value.to_owned(),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
