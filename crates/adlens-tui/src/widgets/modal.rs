//! Modal dialog with a read-only setting and a Close button.
//!
//! While the dialog is open it owns keyboard focus. Tab and Shift+Tab
//! cycle through its focusable elements and wrap at both ends.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::button::{Button, ButtonSize, ButtonVariant};
use super::input::Input;
use crate::theme::ThemeColors;

/// Focusable elements inside the dialog, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalElement {
    Setting,
    CloseButton,
}

impl ModalElement {
    pub const ALL: [ModalElement; 2] = [ModalElement::Setting, ModalElement::CloseButton];
}

/// What the dialog asks its owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalIntent {
    Close,
}

/// Focus position within the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModalState {
    pub focus: usize,
}

impl ModalState {
    pub fn focused(&self) -> ModalElement {
        ModalElement::ALL[self.focus % ModalElement::ALL.len()]
    }

    /// Tab: last wraps to first.
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % ModalElement::ALL.len();
    }

    /// Shift+Tab: first wraps to last.
    pub fn focus_prev(&mut self) {
        let len = ModalElement::ALL.len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Enter or Space on the focused element.
    pub fn activate(&self) -> Option<ModalIntent> {
        match self.focused() {
            ModalElement::CloseButton => Some(ModalIntent::Close),
            ModalElement::Setting => None,
        }
    }

    /// Escape.
    pub fn cancel(&self) -> ModalIntent {
        ModalIntent::Close
    }

    /// A mouse-down at (`column`, `row`).
    ///
    /// The backdrop and the Close button both close the dialog.
    pub fn click(&self, column: u16, row: u16, layout: &ModalLayout) -> Option<ModalIntent> {
        let position = Position::new(column, row);
        if !layout.dialog.contains(position) || layout.close.contains(position) {
            Some(ModalIntent::Close)
        } else {
            None
        }
    }
}

/// Screen areas of the dialog parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalLayout {
    pub dialog: Rect,
    pub description: Rect,
    pub setting: Rect,
    pub info: Rect,
    pub close: Rect,
}

const CLOSE_LABEL: &str = "Close";
const DIALOG_WIDTH: u16 = 64;
const DIALOG_HEIGHT: u16 = 14;

impl ModalLayout {
    /// Center the dialog within `bounds`.
    pub fn centered(bounds: Rect, colors: &ThemeColors) -> Self {
        let width = DIALOG_WIDTH.min(bounds.width.saturating_sub(4));
        let height = DIALOG_HEIGHT.min(bounds.height.saturating_sub(2));
        let dialog = Rect::new(
            bounds.x + (bounds.width - width) / 2,
            bounds.y + (bounds.height - height) / 2,
            width,
            height,
        );

        let inner = Block::default().borders(Borders::ALL).inner(dialog);
        let [description, setting, info, _, buttons] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(inner);

        let close_width = close_button(colors, false).width().min(buttons.width);
        let close = Rect::new(buttons.right() - close_width, buttons.y, close_width, buttons.height);

        Self {
            dialog,
            description,
            setting,
            info,
            close,
        }
    }
}

fn close_button(colors: &ThemeColors, focused: bool) -> Button<'_> {
    Button::new(CLOSE_LABEL, colors)
        .variant(ButtonVariant::Secondary)
        .size(ButtonSize::Sm)
        .accessible_label("Close dialog")
        .focused(focused)
}

/// The dialog body.
#[derive(Debug, Clone)]
pub struct Modal<'a> {
    title: &'a str,
    description: &'a str,
    setting_label: &'a str,
    setting_value: &'a str,
    info: &'a str,
    state: ModalState,
    colors: &'a ThemeColors,
}

impl<'a> Modal<'a> {
    pub fn new(title: &'a str, state: ModalState, colors: &'a ThemeColors) -> Self {
        Self {
            title,
            description: "",
            setting_label: "",
            setting_value: "",
            info: "",
            state,
            colors,
        }
    }

    pub fn description(mut self, text: &'a str) -> Self {
        self.description = text;
        self
    }

    pub fn setting(mut self, label: &'a str, value: &'a str) -> Self {
        self.setting_label = label;
        self.setting_value = value;
        self
    }

    pub fn info(mut self, text: &'a str) -> Self {
        self.info = text;
        self
    }
}

impl Widget for Modal<'_> {
    /// `area` is the full screen; the dialog is centered inside it.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = ModalLayout::centered(area, self.colors);
        let colors = self.colors;
        let focused = self.state.focused();

        Clear.render(layout.dialog, buf);
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(colors.header))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(colors.header).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(colors.overlay_bg))
            .render(layout.dialog, buf);

        Paragraph::new(self.description)
            .style(Style::default().fg(colors.text))
            .wrap(Wrap { trim: true })
            .render(layout.description, buf);

        Input::new(self.setting_label, self.setting_value, colors)
            .read_only(true)
            .focused(focused == ModalElement::Setting)
            .render(layout.setting, buf);

        Paragraph::new(Span::styled(
            self.info,
            Style::default().fg(colors.text_dim).add_modifier(Modifier::ITALIC),
        ))
        .render(layout.info, buf);

        close_button(colors, focused == ModalElement::CloseButton).render(layout.close, buf);
    }
}
