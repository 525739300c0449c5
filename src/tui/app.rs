//! Main application logic for the terminal user interface.
//!
//! This module contains the `BoardApp` struct which manages the TUI state:
//! the kanban board itself, column/card selection, the live filter, the
//! add/edit form, and the confirm and detail popups.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::board::KanbanBoard;
use crate::boardfile::slugify;
use crate::column::{Column, ColumnConfig};
use crate::fields::format_priority;
use crate::list::format_date_relative;
use crate::task::Task;
use crate::tui::colors::{accent_color, priority_color};
use crate::tui::input::InputField;
use crate::tui::task_form::{
    TaskForm, ASSIGNEES_FIELD, COLUMN_FIELD, DATE_FIELD, DESCRIPTION_FIELD, PRIORITY_FIELD,
    PROGRESS_FIELD, TITLE_FIELD,
};

/// Which screen the TUI is on.
#[derive(Clone, Copy, PartialEq)]
enum AppState {
    Board,
    TaskForm,
    AddColumn,
    Confirm,
}

/// Destructive action awaiting a confirmation keypress.
enum ConfirmAction {
    DeleteTask(String),
    RemoveColumn(String),
}

/// Main application state for the terminal user interface.
pub struct BoardApp {
    board: KanbanBoard,
    state: AppState,
    selected_column: usize,
    selected_card: usize,
    column_scroll_offsets: Vec<usize>,
    status_message: String,
    show_task_detail: bool,
    filter_active: bool,
    filter_text: String,
    form: Option<TaskForm>,
    /// Id of the task being edited; `None` while adding.
    editing_task: Option<String>,
    column_title: InputField,
    confirm: Option<ConfirmAction>,
}

impl BoardApp {
    /// Create the app over an already-initialized board.
    pub fn new(board: KanbanBoard) -> Self {
        let column_count = board.columns.len();
        BoardApp {
            board,
            state: AppState::Board,
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: vec![0; column_count],
            status_message: String::new(),
            show_task_detail: false,
            filter_active: false,
            filter_text: String::new(),
            form: None,
            editing_task: None,
            column_title: InputField::new(),
            confirm: None,
        }
    }

    /// Task ids of a column that pass the live filter, in column order.
    fn visible_ids(&self, column: &Column) -> Vec<String> {
        if self.filter_text.is_empty() {
            return column.task_ids.clone();
        }
        let query = self.filter_text.to_lowercase();
        column
            .task_ids
            .iter()
            .filter(|id| {
                self.board.tasks.get(id).is_some_and(|t| {
                    t.title.to_lowercase().contains(&query)
                        || t.description.to_lowercase().contains(&query)
                })
            })
            .cloned()
            .collect()
    }

    fn visible_column(&self, column_index: usize) -> Vec<String> {
        self.board
            .columns
            .get(column_index)
            .map(|c| self.visible_ids(c))
            .unwrap_or_default()
    }

    /// Id of the currently selected card, if any.
    fn selected_task_id(&self) -> Option<String> {
        self.visible_column(self.selected_column)
            .get(self.selected_card)
            .cloned()
    }

    /// Ensure selected column and card indices are valid.
    fn clamp_selection(&mut self) {
        self.column_scroll_offsets
            .resize(self.board.columns.len(), 0);
        if self.selected_column >= self.board.columns.len() {
            self.selected_column = self.board.columns.len().saturating_sub(1);
        }
        let column_len = self.visible_column(self.selected_column).len();
        if column_len == 0 {
            self.selected_card = 0;
            if let Some(offset) = self.column_scroll_offsets.get_mut(self.selected_column) {
                *offset = 0;
            }
        } else if self.selected_card >= column_len {
            self.selected_card = column_len - 1;
        }
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Move the selected card to the adjacent column via the board's
    /// transactional move.
    fn move_card(&mut self, forward: bool) {
        if self.board.columns.is_empty() {
            return;
        }
        let target = if forward {
            self.selected_column + 1
        } else {
            match self.selected_column.checked_sub(1) {
                Some(t) => t,
                None => return,
            }
        };
        if target >= self.board.columns.len() {
            return;
        }
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        let from_id = self.board.columns[self.selected_column].id.clone();
        let to_id = self.board.columns[target].id.clone();

        if self.board.move_task(&task_id, &from_id, &to_id) {
            let title = self.board.columns[target].title.clone();
            self.set_status_message(format!("Moved task to {title}"));
            self.selected_column = target;
            let visible = self.visible_column(target);
            self.selected_card = visible.iter().position(|id| *id == task_id).unwrap_or(0);
            self.clamp_selection();
        } else {
            self.set_status_message("Move failed".to_string());
        }
    }

    /// Complete the selected task; it rehomes to the done column.
    fn complete_selected(&mut self) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        if self.board.complete_task(&task_id) {
            let landed = match self.board.column_of(&task_id) {
                Some(column) => format!("moved to {}", column.title),
                None => "now unplaced (no done column)".to_string(),
            };
            self.set_status_message(format!("Completed {task_id}, {landed}"));
        }
        self.clamp_selection();
    }

    /// Open the add-task form over the selected column.
    fn open_add_form(&mut self) {
        if self.board.columns.is_empty() {
            self.set_status_message("Add a column first (n)".to_string());
            return;
        }
        let titles = self.board.columns.iter().map(|c| c.title.clone()).collect();
        self.form = Some(TaskForm::new(titles, self.selected_column));
        self.editing_task = None;
        self.state = AppState::TaskForm;
    }

    /// Open the edit form prefilled from the selected task.
    fn open_edit_form(&mut self) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        let Some(task) = self.board.tasks.get(&task_id) else {
            return;
        };
        let titles: Vec<String> = self.board.columns.iter().map(|c| c.title.clone()).collect();
        self.form = Some(TaskForm::from_task(task, titles, self.selected_column));
        self.editing_task = Some(task_id);
        self.state = AppState::TaskForm;
    }

    /// Commit the open form: add a new task, or patch and maybe move an
    /// existing one.
    fn save_form(&mut self) {
        let Some(form) = self.form.take() else {
            return;
        };
        if form.title.trimmed().is_empty() {
            self.set_status_message("Title is required".to_string());
            self.form = Some(form);
            return;
        }

        match self.editing_task.take() {
            None => {
                let status = self.board.columns[form.column].status.clone();
                let id = self.board.tasks.next_task_id();
                let record = form.build_task(id.clone(), &status);
                if self.board.add_task(record) {
                    self.set_status_message(format!("Added {id}"));
                } else {
                    self.set_status_message(format!("Added {id} (unplaced)"));
                }
            }
            Some(task_id) => {
                let target_column_id = self.board.columns[form.column].id.clone();
                if let Some(original) = self.board.tasks.get(&task_id) {
                    let patch = form.build_patch(original);
                    self.board.tasks.update(&task_id, &patch);
                }
                // The column selector doubles as a move request.
                if let Some(current) = self.board.column_of(&task_id).map(|c| c.id.clone()) {
                    if current != target_column_id {
                        self.board.move_task(&task_id, &current, &target_column_id);
                    }
                }
                self.set_status_message(format!("Updated {task_id}"));
            }
        }

        self.state = AppState::Board;
        self.clamp_selection();
    }

    /// Commit the add-column prompt.
    fn save_column(&mut self) {
        let title = self.column_title.trimmed().to_string();
        let slug = slugify(&title);
        if slug.is_empty() {
            self.set_status_message("Column title is required".to_string());
            return;
        }
        let id = format!("col-{slug}");
        if self.board.get_column(&id).is_some() {
            self.set_status_message(format!("Column '{title}' already exists"));
            return;
        }
        self.board.add_column(ColumnConfig::new(&id, &title, &slug));
        self.column_scroll_offsets.push(0);
        self.state = AppState::Board;
        self.set_status_message(format!("Added column {title} (status '{slug}')"));
    }

    /// Run the pending confirmed action.
    fn run_confirmed(&mut self) {
        match self.confirm.take() {
            Some(ConfirmAction::DeleteTask(task_id)) => {
                if self.board.delete_task(&task_id) {
                    self.set_status_message(format!("Deleted {task_id}"));
                }
            }
            Some(ConfirmAction::RemoveColumn(column_id)) => {
                let orphans = self
                    .board
                    .get_column(&column_id)
                    .map(|c| c.task_count())
                    .unwrap_or(0);
                if self.board.remove_column(&column_id) {
                    self.set_status_message(format!(
                        "Removed column ({orphans} task(s) now unplaced)"
                    ));
                }
            }
            None => {}
        }
        self.state = AppState::Board;
        self.clamp_selection();
    }

    /// Handle keyboard input. Returns true when the app should exit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(false);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(false);
        };

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        match self.state {
            AppState::Board => return self.handle_board_input(key.code, key.modifiers),
            AppState::TaskForm => self.handle_form_input(key.code, key.modifiers),
            AppState::AddColumn => self.handle_add_column_input(key.code),
            AppState::Confirm => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.run_confirmed(),
                _ => {
                    self.confirm = None;
                    self.state = AppState::Board;
                    self.set_status_message("Cancelled".to_string());
                }
            },
        }
        Ok(false)
    }

    fn handle_board_input(&mut self, code: KeyCode, modifiers: KeyModifiers) -> io::Result<bool> {
        // Live filter captures most keys while active.
        if self.filter_active {
            match code {
                KeyCode::Esc => {
                    self.filter_active = false;
                    self.filter_text.clear();
                    self.clamp_selection();
                    self.clear_status_message();
                }
                KeyCode::Enter => {
                    self.filter_active = false;
                    if self.filter_text.is_empty() {
                        self.set_status_message("Filter cleared".to_string());
                    } else {
                        let matches = self.board.search_tasks(&self.filter_text);
                        let unplaced = matches
                            .iter()
                            .filter(|t| self.board.column_of(&t.id).is_none())
                            .count();
                        self.set_status_message(format!(
                            "Filter: '{}' ({} match(es), {} unplaced)",
                            self.filter_text,
                            matches.len(),
                            unplaced
                        ));
                    }
                }
                KeyCode::Backspace => {
                    if !self.filter_text.is_empty() {
                        self.filter_text.pop();
                        self.clamp_selection();
                    }
                }
                KeyCode::Char(c) => {
                    self.filter_text.push(c);
                    self.clamp_selection();
                }
                _ => {}
            }
            return Ok(false);
        }

        self.clear_status_message();

        match code {
            KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Esc => {
                if self.show_task_detail {
                    self.show_task_detail = false;
                } else {
                    return Ok(true);
                }
            }

            // Card movement between columns (check first, before navigation)
            KeyCode::Left if modifiers.contains(KeyModifiers::CONTROL) => self.move_card(false),
            KeyCode::Right if modifiers.contains(KeyModifiers::CONTROL) => self.move_card(true),

            // Column navigation
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.board.columns.len() {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }

            // Card navigation within column
            KeyCode::Up => {
                if self.selected_card > 0 {
                    self.selected_card -= 1;
                }
            }
            KeyCode::Down => {
                let column_len = self.visible_column(self.selected_column).len();
                if column_len > 0 && self.selected_card + 1 < column_len {
                    self.selected_card += 1;
                }
            }

            KeyCode::Enter => {
                if self.selected_task_id().is_some() {
                    self.show_task_detail = !self.show_task_detail;
                }
            }

            KeyCode::Char('c') => self.complete_selected(),
            KeyCode::Char('a') => self.open_add_form(),
            KeyCode::Char('e') => self.open_edit_form(),
            KeyCode::Char('x') => {
                if let Some(task_id) = self.selected_task_id() {
                    self.confirm = Some(ConfirmAction::DeleteTask(task_id));
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('s') => {
                if let Some(column) = self.board.columns.get_mut(self.selected_column) {
                    column.sort_by_date(&self.board.tasks);
                    self.set_status_message("Column sorted by date".to_string());
                }
            }
            KeyCode::Char('n') => {
                self.column_title.clear();
                self.state = AppState::AddColumn;
            }
            KeyCode::Char('X') => {
                if let Some(column) = self.board.columns.get(self.selected_column) {
                    self.confirm = Some(ConfirmAction::RemoveColumn(column.id.clone()));
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('/') => {
                self.filter_active = true;
                self.set_status_message(
                    "Filter: Type to search title/description, Enter to apply, Esc to cancel"
                        .to_string(),
                );
            }
            KeyCode::Char('h') => {
                self.set_status_message(
                    "Enter: Details | a: Add | e: Edit | c: Complete | x: Delete | \
                     Ctrl+←/→: Move | s: Sort | n/X: Column | /: Filter | Esc: Exit"
                        .to_string(),
                );
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_form_input(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let Some(form) = self.form.as_mut() else {
            self.state = AppState::Board;
            return;
        };
        match code {
            KeyCode::Esc => {
                self.form = None;
                self.editing_task = None;
                self.state = AppState::Board;
                self.set_status_message("Cancelled".to_string());
            }
            KeyCode::Enter => self.save_form(),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Left => {
                if form.on_selector() {
                    form.cycle_selector(false);
                } else if let Some(input) = form.active_input() {
                    input.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if form.on_selector() {
                    form.cycle_selector(true);
                } else if let Some(input) = form.active_input() {
                    input.move_cursor_right();
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = form.active_input() {
                    input.handle_backspace();
                }
            }
            KeyCode::Delete => {
                if let Some(input) = form.active_input() {
                    input.handle_delete();
                }
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(input) = form.active_input() {
                    input.handle_char(c);
                }
            }
            _ => {}
        }
    }

    fn handle_add_column_input(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.state = AppState::Board;
                self.set_status_message("Cancelled".to_string());
            }
            KeyCode::Enter => self.save_column(),
            KeyCode::Backspace => self.column_title.handle_backspace(),
            KeyCode::Delete => self.column_title.handle_delete(),
            KeyCode::Left => self.column_title.move_cursor_left(),
            KeyCode::Right => self.column_title.move_cursor_right(),
            KeyCode::Char(c) => self.column_title.handle_char(c),
            _ => {}
        }
    }

    /// Render the whole screen.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_board(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);

        if self.show_task_detail {
            self.render_task_detail_popup(f);
        }
        match self.state {
            AppState::TaskForm => self.render_form_popup(f),
            AppState::AddColumn => self.render_add_column_popup(f),
            AppState::Confirm => self.render_confirm_popup(f),
            AppState::Board => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let unplaced = self.board.unplaced_tasks().len();
        let counts = format!(
            "Cards: {} | Columns: {} | Unplaced: {}",
            self.board.tasks.len(),
            self.board.columns.len(),
            unplaced
        );
        let header_text = vec![Line::from(vec![
            Span::styled("KANBAN BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                counts,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ])];

        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, area);
    }

    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let column_count = self.board.columns.len();
        if column_count == 0 {
            let empty = Paragraph::new("No columns. Press n to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(empty, area);
            return;
        }
        let constraints: Vec<Constraint> = (0..column_count)
            .map(|_| Constraint::Percentage(100 / column_count as u16))
            .collect();

        let columns_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (i, &column_area) in columns_layout.iter().enumerate() {
            self.render_column(f, column_area, i);
        }
    }

    fn render_column(&mut self, f: &mut Frame, area: Rect, column_index: usize) {
        let is_selected = column_index == self.selected_column;
        let column = &self.board.columns[column_index];
        let accent = accent_color(&column.accent_color, column_index);
        let visible = self.visible_ids(column);

        let border_style = if is_selected {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent)
        };

        let mut title = format!(" {} ({}) ", column.title, visible.len());
        if column.is_active_column {
            title.push_str("* ");
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style);

        let inner = block.inner(area);
        f.render_widget(block, area);

        if visible.is_empty() {
            if column.show_add_button {
                let hint = Paragraph::new("[ a: add task ]")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center);
                f.render_widget(hint, inner);
            }
            return;
        }

        let card_height = 5;
        let available_height = inner.height as usize;
        let visible_cards = available_height / card_height;

        // Keep the selected card in the scrolled window.
        let scroll_offset = if is_selected {
            let start_visible = self.column_scroll_offsets[column_index];
            let end_visible = start_visible + visible_cards;
            if self.selected_card < start_visible {
                self.column_scroll_offsets[column_index] = self.selected_card;
                self.selected_card
            } else if self.selected_card >= end_visible && end_visible > 0 {
                let new_offset = self.selected_card + 1 - visible_cards;
                self.column_scroll_offsets[column_index] = new_offset;
                new_offset
            } else {
                start_visible
            }
        } else {
            self.column_scroll_offsets[column_index]
        };

        let mut current_y = 0;
        let mut rendered_cards = 0;

        for (card_index, task_id) in visible.iter().enumerate().skip(scroll_offset) {
            let Some(task) = self.board.tasks.get(task_id) else {
                continue;
            };
            if current_y + card_height > available_height {
                break;
            }
            let is_this_card_selected = is_selected && card_index == self.selected_card;
            let card_area = Rect {
                x: inner.x,
                y: inner.y + current_y as u16,
                width: inner.width,
                height: card_height as u16,
            };

            render_card(f, card_area, task, accent, is_this_card_selected);
            current_y += card_height;
            rendered_cards += 1;
        }

        if scroll_offset > 0 {
            let indicator = Paragraph::new(format!("▲ +{scroll_offset} above"))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    x: inner.x,
                    y: inner.y,
                    width: inner.width,
                    height: 1,
                },
            );
        }

        let remaining = visible.len().saturating_sub(scroll_offset + rendered_cards);
        if remaining > 0 && inner.height > 0 {
            let indicator = Paragraph::new(format!("▼ +{remaining} below"))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    x: inner.x,
                    y: inner.y + inner.height - 1,
                    width: inner.width,
                    height: 1,
                },
            );
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if self.filter_active {
            format!(
                "Filter: {} | Type to search, Enter to apply, Esc to cancel",
                self.filter_text
            )
        } else if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let filter_indicator = if self.filter_text.is_empty() {
                String::new()
            } else {
                format!(" [Filter: {}]", self.filter_text)
            };
            format!(
                "Cards: {}{} | a: Add | e: Edit | c: Complete | Ctrl+←/→: Move | /: Filter | h: Help",
                self.board.tasks.len(),
                filter_indicator
            )
        };

        let accent = self
            .board
            .columns
            .get(self.selected_column)
            .map(|c| accent_color(&c.accent_color, self.selected_column))
            .unwrap_or(Color::Blue);

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(accent).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn render_task_detail_popup(&self, f: &mut Frame) {
        let Some(task_id) = self.selected_task_id() else {
            return;
        };
        let Some(task) = self.board.tasks.get(&task_id) else {
            return;
        };

        let popup_area = centered_rect(f.area(), 70, 70);
        f.render_widget(Clear, popup_area);

        let today = Local::now().date_naive();
        let assignees = if task.assignees.is_empty() {
            "-".to_string()
        } else {
            task.assignees
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let column = self
            .board
            .column_of(&task.id)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| "(unplaced)".to_string());

        let detail_lines = vec![
            Line::from(vec![Span::styled(
                format!("{}: {}", task.id, task.title),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(format!("Column:      {column}")),
            Line::from(format!("Status:      {}", task.status)),
            Line::from(format!("Priority:    {}", format_priority(task.priority))),
            Line::from(format!("Assignees:   {assignees}")),
            Line::from(format!(
                "Date:        {}",
                format_date_relative(task.date, today)
            )),
            Line::from(format!("Progress:    {}%", task.progress)),
            Line::from(format!("Comments:    {}", task.comments)),
            Line::from(format!("Attachments: {}", task.attachments)),
            Line::from(format!(
                "Verified:    {}",
                if task.verified { "yes" } else { "no" }
            )),
            Line::from(""),
            Line::from("Description:"),
            Line::from(task.description.as_str()),
        ];

        let accent = self
            .board
            .columns
            .get(self.selected_column)
            .map(|c| accent_color(&c.accent_color, self.selected_column))
            .unwrap_or(Color::Blue);
        let popup_block = Block::default()
            .borders(Borders::ALL)
            .title("Task Details (Press Esc to close)")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));

        let popup = Paragraph::new(detail_lines)
            .block(popup_block)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, popup_area);
    }

    fn render_form_popup(&self, f: &mut Frame) {
        let Some(form) = &self.form else {
            return;
        };
        let popup_area = centered_rect(f.area(), 60, 60);
        f.render_widget(Clear, popup_area);

        let field_line = |label: &str, value: String, focused: bool| {
            let style = if focused {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(format!("{label:<12}")),
                Span::styled(value, style),
            ])
        };

        let current = form.current_field;
        let column_title = form
            .column_titles
            .get(form.column)
            .cloned()
            .unwrap_or_default();
        let lines = vec![
            field_line("Title:", form.title.value.clone(), current == TITLE_FIELD),
            field_line(
                "Description:",
                form.description.value.clone(),
                current == DESCRIPTION_FIELD,
            ),
            field_line(
                "Assignees:",
                form.assignees.value.clone(),
                current == ASSIGNEES_FIELD,
            ),
            field_line("Date:", form.date.value.clone(), current == DATE_FIELD),
            field_line(
                "Progress:",
                form.progress.value.clone(),
                current == PROGRESS_FIELD,
            ),
            field_line(
                "Priority:",
                format!("< {} >", format_priority(form.selected_priority())),
                current == PRIORITY_FIELD,
            ),
            field_line(
                "Column:",
                format!("< {column_title} >"),
                current == COLUMN_FIELD,
            ),
            Line::from(""),
            Line::from(Span::styled(
                "Tab: Next field | ←/→: Edit/cycle | Enter: Save | Esc: Cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let title = if self.editing_task.is_some() {
            "Edit Task"
        } else {
            "Add Task"
        };
        let popup = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_alignment(Alignment::Center),
            )
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, popup_area);
    }

    fn render_add_column_popup(&self, f: &mut Frame) {
        let popup_area = centered_rect(f.area(), 50, 20);
        f.render_widget(Clear, popup_area);

        let lines = vec![
            Line::from(format!("Title: {}", self.column_title.value)),
            Line::from(""),
            Line::from(Span::styled(
                "The column status is derived from the title. Enter: Save | Esc: Cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let popup = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Add Column")
                    .title_alignment(Alignment::Center),
            )
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, popup_area);
    }

    fn render_confirm_popup(&self, f: &mut Frame) {
        let message = match &self.confirm {
            Some(ConfirmAction::DeleteTask(id)) => format!("Delete task {id}?"),
            Some(ConfirmAction::RemoveColumn(id)) => {
                let held = self
                    .board
                    .get_column(id)
                    .map(|c| c.task_count())
                    .unwrap_or(0);
                format!("Remove this column? {held} task(s) will become unplaced.")
            }
            None => return,
        };

        let popup_area = centered_rect(f.area(), 50, 20);
        f.render_widget(Clear, popup_area);

        let lines = vec![
            Line::from(message),
            Line::from(""),
            Line::from(Span::styled(
                "y: Confirm | any other key: Cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let popup = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Confirm")
                    .title_alignment(Alignment::Center),
            )
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, popup_area);
    }

    /// Main event loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Render a single task card.
fn render_card(f: &mut Frame, area: Rect, task: &Task, accent: Color, is_selected: bool) {
    let style = if is_selected {
        Style::default()
            .bg(accent)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray)
    };

    let mut card_text = vec![Line::from(vec![
        Span::styled("● ", Style::default().fg(priority_color(task.priority))),
        Span::raw(task.id.clone()),
        Span::raw(if task.verified { " ✓" } else { "" }),
    ])];

    // Manual word wrap, capped at two title lines.
    let available_width = area.width.saturating_sub(2) as usize;
    let mut current_line = String::new();
    let mut lines = Vec::new();
    for word in task.title.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= available_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line.clone());
            current_line = word.to_string();
            if lines.len() >= 2 {
                break;
            }
        }
    }
    if !current_line.is_empty() && lines.len() < 2 {
        lines.push(current_line);
    }
    for line in lines {
        card_text.push(Line::from(line));
    }

    let today = Local::now().date_naive();
    let names = if task.assignees.is_empty() {
        "-".to_string()
    } else {
        task.assignees
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    };
    card_text.push(Line::from(format!(
        "{}% | {} | {}",
        task.progress,
        format_date_relative(task.date, today),
        names
    )));

    let card_block = Paragraph::new(card_text)
        .block(Block::default().borders(Borders::ALL))
        .style(style)
        .wrap(Wrap { trim: true });
    f.render_widget(card_block, area);
}

/// Centered popup area sized as a percentage of the full frame.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let popup_width = (area.width * percent_x) / 100;
    let popup_height = (area.height * percent_y) / 100;
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(x, y, popup_width, popup_height)
}
