//! Input mapping for the adlens TUI.
//!
//! Turns crossterm key and mouse events into reducer [`Action`]s. What a
//! key means depends on what is on top: the help overlay, then the modal,
//! then an open dropdown, then the focused control.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use adlens_core::SortKey;

use crate::state::{Action, DashboardState, Focus, SORT_MENU};
use crate::table::TableLayout;
use crate::widgets::{DropdownIntent, ModalIntent, ModalLayout, dropdown};

/// Screen areas recorded during the last draw, used for mouse hit testing.
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    /// Control bar buttons with the action a click performs
    pub buttons: Vec<(Rect, Action)>,
    pub sort_trigger: Rect,
    /// Popup area while the dropdown is open
    pub sort_menu: Option<Rect>,
    pub filter: Rect,
    pub table: Option<TableLayout>,
    /// First visible row of the table
    pub table_offset: usize,
    /// Channel of each table row; `None` for region rows
    pub row_channels: Vec<Option<String>>,
    pub modal: Option<ModalLayout>,
}

/// Map a key press to an action.
///
/// `cursor_channel` is the channel of the row under the table cursor.
pub fn key_action(key: KeyEvent, state: &DashboardState, cursor_channel: Option<&str>) -> Action {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if state.show_help {
        return Action::HideHelp;
    }
    if state.modal_open {
        return modal_key(key);
    }
    if state.dropdown.open {
        return dropdown_key(key);
    }
    if state.focus.is_text_entry() {
        return filter_key(key);
    }
    normal_key(key, state.focus, cursor_channel)
}

fn is_back_tab(key: &KeyEvent) -> bool {
    key.code == KeyCode::BackTab
        || (key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT))
}

/// Keys while the modal is open. Nothing reaches the dashboard behind it.
fn modal_key(key: KeyEvent) -> Action {
    if is_back_tab(&key) {
        return Action::ModalFocusPrev;
    }
    match key.code {
        KeyCode::Esc => Action::CloseModal,
        KeyCode::Tab => Action::ModalFocusNext,
        KeyCode::Enter | KeyCode::Char(' ') => Action::ModalActivate,
        _ => Action::None,
    }
}

fn dropdown_key(key: KeyEvent) -> Action {
    if is_back_tab(&key) {
        return Action::FocusPrev;
    }
    match key.code {
        KeyCode::Esc => Action::CloseDropdown,
        KeyCode::Down | KeyCode::Char('j') => Action::DropdownNext,
        KeyCode::Up | KeyCode::Char('k') => Action::DropdownPrev,
        KeyCode::Enter | KeyCode::Char(' ') => Action::DropdownConfirm,
        KeyCode::Tab => Action::FocusNext,
        _ => Action::None,
    }
}

fn filter_key(key: KeyEvent) -> Action {
    if is_back_tab(&key) {
        return Action::FocusPrev;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('u') => Action::SetFilter(String::new()),
            _ => Action::None,
        };
    }
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Down => Action::FocusOn(Focus::Table),
        KeyCode::Tab => Action::FocusNext,
        KeyCode::Backspace => Action::FilterBackspace,
        KeyCode::Char(c) => Action::FilterInput(c),
        _ => Action::None,
    }
}

fn normal_key(key: KeyEvent, focus: Focus, cursor_channel: Option<&str>) -> Action {
    if is_back_tab(&key) {
        return Action::FocusPrev;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char('/') => Action::FocusOn(Focus::Filter),
        KeyCode::Tab => Action::FocusNext,

        // Column headers 1-5
        KeyCode::Char(c @ '1'..='5') => {
            let index = usize::from(c as u8 - b'1');
            Action::SortBy(SortKey::ALL[index])
        }

        KeyCode::Up | KeyCode::Char('k') => Action::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => Action::CursorDown,
        KeyCode::Home | KeyCode::Char('g') => Action::CursorTo(0),
        KeyCode::End | KeyCode::Char('G') => Action::CursorTo(usize::MAX),

        KeyCode::Enter | KeyCode::Char(' ') => activate(focus, cursor_channel),
        KeyCode::Esc => Action::FocusOn(Focus::Table),
        _ => Action::None,
    }
}

/// Enter or Space on the focused control.
fn activate(focus: Focus, cursor_channel: Option<&str>) -> Action {
    match focus {
        Focus::ConfigureButton => Action::OpenModal,
        Focus::ClicksButton => Action::SortBy(SortKey::TotalClicks),
        Focus::SortMenu => Action::ToggleDropdown,
        Focus::Table => cursor_channel.map_or(Action::None, |c| Action::ToggleExpand(c.to_string())),
        Focus::DisabledButton | Focus::Filter => Action::None,
    }
}

/// Map a mouse event to actions, in the order they should be applied.
pub fn mouse_actions(mouse: MouseEvent, state: &DashboardState, hits: &HitAreas) -> Vec<Action> {
    let overlay = state.show_help || state.modal_open;
    match mouse.kind {
        MouseEventKind::ScrollUp if !overlay => vec![Action::CursorUp],
        MouseEventKind::ScrollDown if !overlay => vec![Action::CursorDown],
        MouseEventKind::Down(MouseButton::Left) => click(mouse.column, mouse.row, state, hits),
        _ => Vec::new(),
    }
}

fn click(column: u16, row: u16, state: &DashboardState, hits: &HitAreas) -> Vec<Action> {
    if state.show_help {
        return vec![Action::HideHelp];
    }
    if state.modal_open {
        return match hits.modal.and_then(|layout| state.modal.click(column, row, &layout)) {
            Some(ModalIntent::Close) => vec![Action::CloseModal],
            None => Vec::new(),
        };
    }

    let position = Position::new(column, row);
    let mut actions = Vec::new();

    if let (true, Some(menu)) = (state.dropdown.open, hits.sort_menu) {
        if let Some(index) = dropdown::item_at(menu, SORT_MENU.len(), column, row) {
            return vec![Action::SelectSortItem(index)];
        }
        if menu.contains(position) {
            return actions;
        }
        let mut menu_state = state.dropdown;
        if menu_state.click_outside(column, row, hits.sort_trigger, menu) == Some(DropdownIntent::Close) {
            actions.push(Action::CloseDropdown);
        }
    }

    if let Some((_, action)) = hits.buttons.iter().find(|(area, _)| area.contains(position)) {
        actions.push(action.clone());
    } else if hits.sort_trigger.contains(position) {
        actions.push(Action::ToggleDropdown);
    } else if hits.filter.contains(position) {
        actions.push(Action::FocusOn(Focus::Filter));
    } else if let Some(table) = &hits.table {
        if let Some(key) = table.header_at(column, row) {
            actions.push(Action::SortBy(key));
        } else if let Some(index) = table.row_at(column, row, hits.table_offset, hits.row_channels.len()) {
            actions.push(Action::CursorTo(index));
            if let Some(Some(channel)) = hits.row_channels.get(index) {
                actions.push(Action::ToggleExpand(channel.clone()));
            }
        }
    }

    actions
}
