//! Dropdown menu: a trigger button plus a popup item list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::button::{Button, ButtonVariant};
use crate::theme::ThemeColors;

/// An item in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownItem<T> {
    pub label: &'static str,
    pub value: T,
}

/// What the dropdown asks its owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownIntent {
    /// The item at this index was chosen
    Select(usize),
    /// The menu was dismissed without a choice
    Close,
}

/// Open state and keyboard focus of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropdownState {
    pub open: bool,
    pub focused: Option<usize>,
}

impl DropdownState {
    /// Open the menu with no item focused.
    pub fn open(&mut self) {
        self.open = true;
        self.focused = None;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Move focus down, wrapping from the last item to the first.
    pub fn focus_next(&mut self, len: usize) {
        if !self.open || len == 0 {
            return;
        }
        self.focused = Some(match self.focused {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        });
    }

    /// Move focus up, wrapping from the first item to the last.
    pub fn focus_prev(&mut self, len: usize) {
        if !self.open || len == 0 {
            return;
        }
        self.focused = Some(match self.focused {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        });
    }

    /// Choose the focused item. Closes the menu on success.
    pub fn confirm(&mut self) -> Option<DropdownIntent> {
        if !self.open {
            return None;
        }
        let index = self.focused?;
        self.close();
        Some(DropdownIntent::Select(index))
    }

    /// Dismiss an open menu.
    pub fn cancel(&mut self) -> Option<DropdownIntent> {
        if !self.open {
            return None;
        }
        self.close();
        Some(DropdownIntent::Close)
    }

    /// React to a mouse-down at (`column`, `row`).
    ///
    /// Presses outside both the trigger and the open menu dismiss it.
    pub fn click_outside(&mut self, column: u16, row: u16, trigger: Rect, menu: Rect) -> Option<DropdownIntent> {
        let inside = |r: Rect| r.contains((column, row).into());
        if !self.open || inside(trigger) || inside(menu) {
            return None;
        }
        self.cancel()
    }
}

/// Area of the popup menu for a trigger, clamped to `bounds`.
pub fn menu_area<T>(trigger: Rect, items: &[DropdownItem<T>], bounds: Rect) -> Rect {
    let widest = items
        .iter()
        .map(|item| item.label.chars().count())
        .max()
        .unwrap_or(0);
    let width = u16::try_from(widest + 4)
        .unwrap_or(u16::MAX)
        .max(trigger.width)
        .min(bounds.width);
    let height = u16::try_from(items.len() + 2)
        .unwrap_or(u16::MAX)
        .min(bounds.height);

    let x = trigger.x.min(bounds.right().saturating_sub(width));
    let y = trigger.bottom().min(bounds.bottom().saturating_sub(height));
    Rect::new(x, y, width, height)
}

/// Row of the item under (`column`, `row`) inside a menu drawn at `menu`.
pub fn item_at(menu: Rect, len: usize, column: u16, row: u16) -> Option<usize> {
    let inner = Rect {
        x: menu.x + 1,
        y: menu.y + 1,
        width: menu.width.saturating_sub(2),
        height: menu.height.saturating_sub(2),
    };
    if !inner.contains((column, row).into()) {
        return None;
    }
    let index = usize::from(row - inner.y);
    (index < len).then_some(index)
}

/// The trigger button. Shows ▲ while open and ▼ while closed.
#[derive(Debug, Clone)]
pub struct Dropdown<'a> {
    label: &'a str,
    state: DropdownState,
    focused: bool,
    colors: &'a ThemeColors,
}

impl<'a> Dropdown<'a> {
    pub fn new(label: &'a str, state: DropdownState, colors: &'a ThemeColors) -> Self {
        Self {
            label,
            state,
            focused: false,
            colors,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn is_expanded(&self) -> bool {
        self.state.open
    }

    fn trigger_text(&self) -> String {
        format!("{} {}", self.label, if self.state.open { "▲" } else { "▼" })
    }

    pub fn width(&self) -> u16 {
        let text = self.trigger_text();
        Button::new(&text, self.colors).variant(ButtonVariant::Secondary).width()
    }
}

impl Widget for Dropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.trigger_text();
        Button::new(&text, self.colors)
            .variant(ButtonVariant::Secondary)
            .focused(self.focused)
            .render(area, buf);
    }
}

/// The open item list, drawn over whatever is below it.
#[derive(Debug)]
pub struct DropdownMenu<'a, T> {
    items: &'a [DropdownItem<T>],
    focused: Option<usize>,
    colors: &'a ThemeColors,
}

impl<'a, T> DropdownMenu<'a, T> {
    pub fn new(items: &'a [DropdownItem<T>], state: DropdownState, colors: &'a ThemeColors) -> Self {
        Self {
            items,
            focused: state.focused,
            colors,
        }
    }
}

impl<T> Widget for DropdownMenu<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if self.focused == Some(i) {
                    Line::from(Span::styled(
                        format!("› {}", item.label),
                        Style::default()
                            .fg(self.colors.focus_highlight)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {}", item.label),
                        Style::default().fg(self.colors.text),
                    ))
                }
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.colors.header))
                    .style(Style::default().bg(self.colors.overlay_bg)),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    const ITEMS: [DropdownItem<u8>; 3] = [
        DropdownItem { label: "Spend", value: 1 },
        DropdownItem { label: "Conversions", value: 2 },
        DropdownItem { label: "Reset", value: 3 },
    ];

    fn opened() -> DropdownState {
        let mut state = DropdownState::default();
        state.open();
        state
    }

    #[test]
    fn test_down_from_none_focuses_first() {
        let mut state = opened();
        state.focus_next(3);
        assert_eq!(state.focused, Some(0));
    }

    #[test]
    fn test_up_from_none_focuses_last() {
        let mut state = opened();
        state.focus_prev(3);
        assert_eq!(state.focused, Some(2));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = opened();
        state.focused = Some(2);
        state.focus_next(3);
        assert_eq!(state.focused, Some(0));
        state.focus_prev(3);
        assert_eq!(state.focused, Some(2));
    }

    #[test]
    fn test_navigation_ignored_while_closed() {
        let mut state = DropdownState::default();
        state.focus_next(3);
        assert_eq!(state.focused, None);
    }

    #[test]
    fn test_confirm_selects_and_closes() {
        let mut state = opened();
        state.focus_next(3);
        state.focus_next(3);
        assert_eq!(state.confirm(), Some(DropdownIntent::Select(1)));
        assert!(!state.open);
    }

    #[test]
    fn test_confirm_without_focus_keeps_open() {
        let mut state = opened();
        assert_eq!(state.confirm(), None);
        assert!(state.open);
    }

    #[test]
    fn test_cancel_closes() {
        let mut state = opened();
        assert_eq!(state.cancel(), Some(DropdownIntent::Close));
        assert!(!state.open);
        assert_eq!(state.cancel(), None);
    }

    #[test]
    fn test_reopen_clears_focus() {
        let mut state = opened();
        state.focus_next(3);
        state.toggle();
        state.toggle();
        assert!(state.open);
        assert_eq!(state.focused, None);
    }

    #[test]
    fn test_click_outside_closes() {
        let trigger = Rect::new(10, 0, 12, 3);
        let menu = Rect::new(10, 3, 15, 5);

        let mut state = opened();
        assert_eq!(state.click_outside(12, 4, trigger, menu), None);
        assert_eq!(state.click_outside(11, 1, trigger, menu), None);
        assert!(state.open);

        assert_eq!(state.click_outside(50, 20, trigger, menu), Some(DropdownIntent::Close));
        assert!(!state.open);
    }

    #[test]
    fn test_menu_area_below_trigger() {
        let trigger = Rect::new(5, 2, 10, 3);
        let area = menu_area(trigger, &ITEMS, Rect::new(0, 0, 80, 24));
        assert_eq!(area.x, 5);
        assert_eq!(area.y, 5);
        assert_eq!(area.height, 5);
        assert_eq!(area.width, "Conversions".len() as u16 + 4);
    }

    #[test]
    fn test_item_at() {
        let menu = Rect::new(5, 5, 15, 5);
        assert_eq!(item_at(menu, 3, 7, 6), Some(0));
        assert_eq!(item_at(menu, 3, 7, 8), Some(2));
        assert_eq!(item_at(menu, 3, 5, 6), None);
        assert_eq!(item_at(menu, 3, 7, 5), None);
    }

    #[test]
    fn test_trigger_arrow_reflects_state() {
        let theme = Theme::default();
        let closed = Dropdown::new("Select metric", DropdownState::default(), &theme.colors);
        assert!(!closed.is_expanded());
        assert!(closed.trigger_text().ends_with('▼'));

        let open = Dropdown::new("Select metric", opened(), &theme.colors);
        assert!(open.is_expanded());
        assert!(open.trigger_text().ends_with('▲'));
    }
}
