//! Push button widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::theme::ThemeColors;

/// Visual emphasis of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

/// Button size, expressed as horizontal padding around the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl ButtonSize {
    /// Blank cells on each side of the label.
    pub fn padding(&self) -> u16 {
        match self {
            ButtonSize::Sm => 1,
            ButtonSize::Md => 2,
            ButtonSize::Lg => 3,
        }
    }
}

/// A bordered, focusable button.
///
/// The button never performs its own action. Callers ask [`Button::activate`]
/// whether a press should go through, which is refused while disabled.
#[derive(Debug, Clone)]
pub struct Button<'a> {
    label: &'a str,
    accessible_label: Option<&'a str>,
    variant: ButtonVariant,
    size: ButtonSize,
    disabled: bool,
    focused: bool,
    colors: &'a ThemeColors,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, colors: &'a ThemeColors) -> Self {
        Self {
            label,
            accessible_label: None,
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            disabled: false,
            focused: false,
            colors,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Override the label announced for this button.
    pub fn accessible_label(mut self, label: &'a str) -> Self {
        self.accessible_label = Some(label);
        self
    }

    /// Label announced for this button; the visible text unless overridden.
    pub fn label(&self) -> &'a str {
        self.accessible_label.unwrap_or(self.label)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Press the button. Yields `Some(())` only when enabled.
    pub fn activate(&self) -> Option<()> {
        (!self.disabled).then_some(())
    }

    /// Total width including borders and padding.
    pub fn width(&self) -> u16 {
        let text = u16::try_from(self.label.chars().count()).unwrap_or(u16::MAX);
        text.saturating_add(self.size.padding() * 2).saturating_add(2)
    }

    fn label_style(&self) -> Style {
        if self.disabled {
            return Style::default()
                .fg(self.colors.disabled)
                .add_modifier(Modifier::DIM);
        }
        let base = match self.variant {
            ButtonVariant::Primary => Style::default()
                .fg(self.colors.primary)
                .add_modifier(Modifier::BOLD),
            ButtonVariant::Secondary => Style::default().fg(self.colors.secondary),
        };
        if self.focused {
            base.fg(self.colors.focus_highlight)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            base
        }
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (border_type, border_style) = if self.focused && !self.disabled {
            (BorderType::Double, Style::default().fg(self.colors.focus_highlight))
        } else if self.disabled {
            (BorderType::Plain, Style::default().fg(self.colors.disabled))
        } else {
            (BorderType::Rounded, Style::default().fg(self.colors.border_dim))
        };

        let pad = " ".repeat(self.size.padding() as usize);
        let text = Span::styled(format!("{pad}{}{pad}", self.label), self.label_style());

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(border_style),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn test_enabled_button_activates() {
        let theme = Theme::default();
        let button = Button::new("Configure", &theme.colors);
        assert_eq!(button.activate(), Some(()));
    }

    #[test]
    fn test_disabled_button_does_not_activate() {
        let theme = Theme::default();
        let button = Button::new("Archive", &theme.colors).disabled(true);
        assert!(button.is_disabled());
        assert_eq!(button.activate(), None);
    }

    #[test]
    fn test_accessible_label_defaults_to_text() {
        let theme = Theme::default();
        let plain = Button::new("Close", &theme.colors);
        assert_eq!(plain.label(), "Close");

        let labelled = plain.accessible_label("Close configuration");
        assert_eq!(labelled.label(), "Close configuration");
    }

    #[test]
    fn test_width_grows_with_size() {
        let theme = Theme::default();
        let sm = Button::new("Go", &theme.colors).size(ButtonSize::Sm).width();
        let md = Button::new("Go", &theme.colors).size(ButtonSize::Md).width();
        let lg = Button::new("Go", &theme.colors).size(ButtonSize::Lg).width();
        assert_eq!(sm, 2 + 2 + 2);
        assert!(sm < md && md < lg);
    }

    #[test]
    fn test_renders_label() {
        let theme = Theme::default();
        let button = Button::new("Apply", &theme.colors).variant(ButtonVariant::Secondary);
        let area = Rect::new(0, 0, button.width(), 3);
        let mut buf = Buffer::empty(area);
        button.render(area, &mut buf);

        let middle: String = (0..area.width).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(middle.contains("Apply"));
    }
}
