//! Dashboard UI state and its reducer.
//!
//! All interactive state lives in [`DashboardState`] and changes only
//! through [`reduce`]. The aggregated data itself is not part of it; the
//! shell derives the visible view from the aggregate plus this state.

use adlens_config::DashboardConfig;
use adlens_core::{SortKey, SortState};
use adlens_data::toggle_expansion;
use tracing::debug;

use crate::widgets::{DropdownIntent, DropdownItem, DropdownState, InputRules, ModalIntent, ModalState};

/// Items offered by the sort dropdown.
pub const SORT_MENU: [DropdownItem<SortKey>; 3] = [
    DropdownItem {
        label: "Spend",
        value: SortKey::TotalSpend,
    },
    DropdownItem {
        label: "Conversions",
        value: SortKey::TotalConversions,
    },
    DropdownItem {
        label: "Reset",
        value: SortKey::Channel,
    },
];

/// Dropdown trigger text before anything is chosen.
pub const SORT_MENU_PLACEHOLDER: &str = "Select metric";

/// Focusable regions of the dashboard, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    ConfigureButton,
    ClicksButton,
    DisabledButton,
    SortMenu,
    Filter,
    #[default]
    Table,
}

impl Focus {
    pub const ALL: [Focus; 6] = [
        Focus::ConfigureButton,
        Focus::ClicksButton,
        Focus::DisabledButton,
        Focus::SortMenu,
        Focus::Filter,
        Focus::Table,
    ];

    /// Whether Tab can land here. The disabled button never takes focus.
    pub fn is_focusable(&self) -> bool {
        !matches!(self, Focus::DisabledButton)
    }

    /// Whether typed characters go into a text field.
    pub fn is_text_entry(&self) -> bool {
        matches!(self, Focus::Filter)
    }

    fn step(self, forward: bool) -> Focus {
        let len = Self::ALL.len();
        let mut index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        for _ in 0..len {
            index = if forward { (index + 1) % len } else { (index + len - 1) % len };
            if Self::ALL[index].is_focusable() {
                return Self::ALL[index];
            }
        }
        self
    }

    pub fn next(self) -> Focus {
        self.step(true)
    }

    pub fn prev(self) -> Focus {
        self.step(false)
    }
}

/// Everything the user can change, owned by the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub sort: SortState,
    /// Channel whose regions are shown, if any
    pub expanded: Option<String>,
    pub filter: String,
    pub filter_error: Option<String>,
    pub filter_rules: InputRules,
    pub modal_open: bool,
    pub modal: ModalState,
    pub dropdown: DropdownState,
    /// Index into [`SORT_MENU`] of the last choice
    pub sort_selection: Option<usize>,
    pub focus: Focus,
    /// Selected row in the flattened table
    pub cursor: usize,
    pub show_help: bool,
    pub should_quit: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl DashboardState {
    /// Initial state from configuration defaults.
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            sort: config.default_sort,
            expanded: None,
            filter: String::new(),
            filter_error: None,
            filter_rules: config.filter.into(),
            modal_open: false,
            modal: ModalState::default(),
            dropdown: DropdownState::default(),
            sort_selection: None,
            focus: Focus::default(),
            cursor: 0,
            show_help: false,
            should_quit: false,
        }
    }

    /// Label for the dropdown trigger.
    pub fn sort_menu_label(&self) -> &'static str {
        self.sort_selection
            .and_then(|i| SORT_MENU.get(i))
            .map_or(SORT_MENU_PLACEHOLDER, |item| item.label)
    }

    fn clamp_cursor(&mut self, row_count: usize) {
        self.cursor = self.cursor.min(row_count.saturating_sub(1));
    }

    fn set_filter(&mut self, value: String) {
        self.filter_error = self.filter_rules.validate(&value);
        self.filter = value;
        self.cursor = 0;
    }

    fn focus_table(&mut self) {
        self.dropdown.close();
        self.focus = Focus::Table;
    }

    fn close_modal(&mut self) {
        self.modal_open = false;
        self.focus = Focus::ConfigureButton;
    }
}

/// A requested state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Column header activated: same key flips, new key sorts descending
    SortBy(SortKey),
    /// Sort dropdown item chosen by index
    SelectSortItem(usize),
    /// Channel row activated
    ToggleExpand(String),
    /// Replace the filter text
    SetFilter(String),
    /// Character typed into the filter
    FilterInput(char),
    /// Backspace in the filter
    FilterBackspace,
    FocusNext,
    FocusPrev,
    FocusOn(Focus),
    CursorUp,
    CursorDown,
    /// Jump to a row; out-of-range values are clamped by [`Action::SyncCursor`]
    CursorTo(usize),
    /// Fit the cursor to the derived table after another action
    SyncCursor {
        row_count: usize,
        /// Row the cursor should move to first, if any
        follow: Option<usize>,
    },
    ToggleDropdown,
    CloseDropdown,
    DropdownNext,
    DropdownPrev,
    DropdownConfirm,
    OpenModal,
    CloseModal,
    ModalFocusNext,
    ModalFocusPrev,
    ModalActivate,
    ShowHelp,
    HideHelp,
    Quit,
    None,
}

/// Apply `action` to `state`.
pub fn reduce(mut state: DashboardState, action: Action) -> DashboardState {
    match action {
        Action::SortBy(key) => {
            state.sort = state.sort.toggled(key);
            debug!(key = %state.sort.key, direction = %state.sort.direction, "sort changed");
        }
        Action::SelectSortItem(index) => {
            state.dropdown.close();
            if let Some(item) = SORT_MENU.get(index) {
                state.sort_selection = Some(index);
                state = reduce(state, Action::SortBy(item.value));
            }
        }
        Action::ToggleExpand(channel) => {
            state.expanded = toggle_expansion(state.expanded.as_deref(), &channel);
        }
        Action::SetFilter(value) => state.set_filter(value),
        Action::FilterInput(c) => {
            let mut value = std::mem::take(&mut state.filter);
            value.push(c);
            state.set_filter(value);
        }
        Action::FilterBackspace => {
            let mut value = std::mem::take(&mut state.filter);
            value.pop();
            state.set_filter(value);
        }
        Action::FocusNext => {
            state.dropdown.close();
            state.focus = state.focus.next();
        }
        Action::FocusPrev => {
            state.dropdown.close();
            state.focus = state.focus.prev();
        }
        Action::FocusOn(focus) => {
            if focus.is_focusable() {
                if focus != Focus::SortMenu {
                    state.dropdown.close();
                }
                state.focus = focus;
            }
        }
        Action::CursorUp => {
            state.focus_table();
            state.cursor = state.cursor.saturating_sub(1);
        }
        Action::CursorDown => {
            state.focus_table();
            state.cursor = state.cursor.saturating_add(1);
        }
        Action::CursorTo(index) => {
            state.focus_table();
            state.cursor = index;
        }
        Action::SyncCursor { row_count, follow } => {
            if let Some(index) = follow {
                state.cursor = index;
            }
            state.clamp_cursor(row_count);
        }
        Action::ToggleDropdown => {
            state.focus = Focus::SortMenu;
            state.dropdown.toggle();
        }
        Action::CloseDropdown => {
            if state.dropdown.cancel() == Some(DropdownIntent::Close) {
                state.focus = Focus::SortMenu;
            }
        }
        Action::DropdownNext => state.dropdown.focus_next(SORT_MENU.len()),
        Action::DropdownPrev => state.dropdown.focus_prev(SORT_MENU.len()),
        Action::DropdownConfirm => {
            if let Some(DropdownIntent::Select(index)) = state.dropdown.confirm() {
                state = reduce(state, Action::SelectSortItem(index));
            }
        }
        Action::OpenModal => {
            state.dropdown.close();
            state.modal = ModalState::default();
            state.modal_open = true;
        }
        Action::CloseModal => {
            if state.modal_open {
                state.close_modal();
            }
        }
        Action::ModalFocusNext => state.modal.focus_next(),
        Action::ModalFocusPrev => state.modal.focus_prev(),
        Action::ModalActivate => {
            if state.modal.activate() == Some(ModalIntent::Close) {
                state.close_modal();
            }
        }
        Action::ShowHelp => state.show_help = true,
        Action::HideHelp => state.show_help = false,
        Action::Quit => state.should_quit = true,
        Action::None => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use adlens_config::FilterRules;
    use adlens_core::SortDirection;

    fn apply(state: DashboardState, actions: impl IntoIterator<Item = Action>) -> DashboardState {
        actions.into_iter().fold(state, reduce)
    }

    #[test]
    fn test_initial_state_from_config() {
        let config = DashboardConfig {
            default_sort: SortState::new(SortKey::Channel, SortDirection::Asc),
            filter: FilterRules { min_len: 2, max_len: 8 },
            ..DashboardConfig::default()
        };
        let state = DashboardState::new(&config);
        assert_eq!(state.sort, SortState::new(SortKey::Channel, SortDirection::Asc));
        assert_eq!(state.filter_rules, InputRules { min_len: 2, max_len: 8 });
        assert_eq!(state.focus, Focus::Table);
        assert_eq!(state.sort_menu_label(), SORT_MENU_PLACEHOLDER);
    }

    #[test]
    fn test_default_sort_is_spend_descending() {
        let state = DashboardState::default();
        assert_eq!(state.sort, SortState::new(SortKey::TotalSpend, SortDirection::Desc));
    }

    #[test]
    fn test_sort_same_key_flips_direction() {
        let state = reduce(DashboardState::default(), Action::SortBy(SortKey::TotalSpend));
        assert_eq!(state.sort.direction, SortDirection::Asc);
        let state = reduce(state, Action::SortBy(SortKey::TotalSpend));
        assert_eq!(state.sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_sort_new_key_starts_descending() {
        let state = apply(
            DashboardState::default(),
            [Action::SortBy(SortKey::TotalSpend), Action::SortBy(SortKey::TotalClicks)],
        );
        assert_eq!(state.sort, SortState::new(SortKey::TotalClicks, SortDirection::Desc));
    }

    #[test]
    fn test_dropdown_selection_sorts_and_labels() {
        let state = apply(
            DashboardState::default(),
            [Action::ToggleDropdown, Action::DropdownNext, Action::DropdownNext, Action::DropdownConfirm],
        );
        assert!(!state.dropdown.open);
        assert_eq!(state.sort_selection, Some(1));
        assert_eq!(state.sort_menu_label(), "Conversions");
        assert_eq!(state.sort, SortState::new(SortKey::TotalConversions, SortDirection::Desc));
    }

    #[test]
    fn test_dropdown_selecting_active_key_flips() {
        // Spend is already the default key
        let state = reduce(DashboardState::default(), Action::SelectSortItem(0));
        assert_eq!(state.sort, SortState::new(SortKey::TotalSpend, SortDirection::Asc));
    }

    #[test]
    fn test_dropdown_reset_sorts_by_channel() {
        let state = reduce(DashboardState::default(), Action::SelectSortItem(2));
        assert_eq!(state.sort.key, SortKey::Channel);
        assert_eq!(state.sort_menu_label(), "Reset");
    }

    #[test]
    fn test_dropdown_out_of_range_selection_is_ignored() {
        let before = DashboardState::default();
        let after = reduce(before.clone(), Action::SelectSortItem(9));
        assert_eq!(after, before);
    }

    #[test]
    fn test_close_dropdown_returns_focus_to_trigger() {
        let state = apply(
            DashboardState::default(),
            [Action::ToggleDropdown, Action::CloseDropdown],
        );
        assert!(!state.dropdown.open);
        assert_eq!(state.focus, Focus::SortMenu);
    }

    #[test]
    fn test_toggle_expand() {
        let state = reduce(DashboardState::default(), Action::ToggleExpand("Google".into()));
        assert_eq!(state.expanded.as_deref(), Some("Google"));
        let state = reduce(state, Action::ToggleExpand("Meta".into()));
        assert_eq!(state.expanded.as_deref(), Some("Meta"));
        let state = reduce(state, Action::ToggleExpand("Meta".into()));
        assert_eq!(state.expanded, None);
    }

    #[test]
    fn test_filter_typing_validates_without_blocking() {
        let mut state = DashboardState::default();
        state.filter_rules = InputRules { min_len: 0, max_len: 3 };
        state.cursor = 4;

        let state = apply(state, "goog".chars().map(Action::FilterInput));
        assert_eq!(state.filter, "goog");
        assert!(state.filter_error.is_some());
        assert_eq!(state.cursor, 0);

        let state = reduce(state, Action::FilterBackspace);
        assert_eq!(state.filter, "goo");
        assert_eq!(state.filter_error, None);
    }

    #[test]
    fn test_set_filter_keeps_expansion() {
        let state = apply(
            DashboardState::default(),
            [Action::ToggleExpand("Google".into()), Action::SetFilter("xyz".into())],
        );
        assert_eq!(state.expanded.as_deref(), Some("Google"));
    }

    #[test]
    fn test_focus_ring_skips_disabled_button() {
        assert_eq!(Focus::ClicksButton.next(), Focus::SortMenu);
        assert_eq!(Focus::SortMenu.prev(), Focus::ClicksButton);
        assert_eq!(Focus::Table.next(), Focus::ConfigureButton);
        assert_eq!(Focus::ConfigureButton.prev(), Focus::Table);

        let mut focus = Focus::Table;
        for _ in 0..Focus::ALL.len() * 2 {
            focus = focus.next();
            assert_ne!(focus, Focus::DisabledButton);
        }
    }

    #[test]
    fn test_focus_on_disabled_is_ignored() {
        let state = reduce(DashboardState::default(), Action::FocusOn(Focus::DisabledButton));
        assert_eq!(state.focus, Focus::Table);
    }

    #[test]
    fn test_tab_closes_open_dropdown() {
        let state = apply(DashboardState::default(), [Action::ToggleDropdown, Action::FocusNext]);
        assert!(!state.dropdown.open);
        assert_eq!(state.focus, Focus::Filter);
    }

    #[test]
    fn test_modal_open_and_close_by_button() {
        let state = apply(
            DashboardState::default(),
            [Action::OpenModal, Action::ModalActivate],
        );
        // Setting field is focused first; activating it does nothing
        assert!(state.modal_open);

        let state = apply(state, [Action::ModalFocusNext, Action::ModalActivate]);
        assert!(!state.modal_open);
        assert_eq!(state.focus, Focus::ConfigureButton);
    }

    #[test]
    fn test_modal_focus_wraps() {
        let state = apply(
            DashboardState::default(),
            [Action::OpenModal, Action::ModalFocusPrev],
        );
        assert_eq!(state.modal.focus, 1);
        let state = reduce(state, Action::ModalFocusNext);
        assert_eq!(state.modal.focus, 0);
    }

    #[test]
    fn test_reopened_modal_starts_on_first_element() {
        let state = apply(
            DashboardState::default(),
            [Action::OpenModal, Action::ModalFocusNext, Action::CloseModal, Action::OpenModal],
        );
        assert_eq!(state.modal.focus, 0);
    }

    #[test]
    fn test_cursor_moves_and_clamps() {
        let mut state = apply(
            DashboardState::default(),
            [Action::CursorDown, Action::CursorDown, Action::CursorDown],
        );
        assert_eq!(state.cursor, 3);
        let state = reduce(state, Action::SyncCursor { row_count: 2, follow: None });
        assert_eq!(state.cursor, 1);
        let state = reduce(state, Action::SyncCursor { row_count: 0, follow: None });
        assert_eq!(state.cursor, 0);

        let state = reduce(state, Action::CursorUp);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_sync_cursor_follows_then_clamps() {
        let state = reduce(DashboardState::default(), Action::SyncCursor { row_count: 8, follow: Some(5) });
        assert_eq!(state.cursor, 5);
        let state = reduce(state, Action::SyncCursor { row_count: 3, follow: Some(5) });
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn test_cursor_movement_closes_dropdown() {
        let state = apply(
            DashboardState::default(),
            [Action::ToggleDropdown, Action::DropdownNext, Action::CursorDown],
        );
        assert!(!state.dropdown.open);
        assert_eq!(state.focus, Focus::Table);

        // Confirm has nothing to act on once the menu is gone
        let state = reduce(state, Action::DropdownConfirm);
        assert_eq!(state.sort_selection, None);
        assert_eq!(state.sort, DashboardState::default().sort);
    }

    #[test]
    fn test_help_and_quit() {
        let state = reduce(DashboardState::default(), Action::ShowHelp);
        assert!(state.show_help);
        let state = reduce(state, Action::HideHelp);
        assert!(!state.show_help);
        assert!(reduce(state, Action::Quit).should_quit);
    }
}
