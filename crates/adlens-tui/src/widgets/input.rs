//! Labelled single-line text input with inline validation.

use adlens_config::FilterRules;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::theme::ThemeColors;

/// Length rules for a text value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRules {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for InputRules {
    fn default() -> Self {
        FilterRules::default().into()
    }
}

impl From<FilterRules> for InputRules {
    fn from(rules: FilterRules) -> Self {
        Self {
            min_len: rules.min_len,
            max_len: rules.max_len,
        }
    }
}

impl InputRules {
    /// Error message for `value`, or `None` when it is acceptable.
    ///
    /// An empty value is always acceptable.
    pub fn validate(&self, value: &str) -> Option<String> {
        let len = value.chars().count();
        if len == 0 {
            None
        } else if len < self.min_len {
            Some(format!("Enter at least {} characters", self.min_len))
        } else if len > self.max_len {
            Some(format!("Use at most {} characters", self.max_len))
        } else {
            None
        }
    }
}

/// Text input widget.
///
/// Renders a bordered box titled with the label. When an error is set, an
/// extra line below the box shows it and [`Input::is_invalid`] reports true.
#[derive(Debug, Clone)]
pub struct Input<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    error: Option<&'a str>,
    focused: bool,
    read_only: bool,
    colors: &'a ThemeColors,
}

impl<'a> Input<'a> {
    pub fn new(label: &'a str, value: &'a str, colors: &'a ThemeColors) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            error: None,
            focused: false,
            read_only: false,
            colors,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error.filter(|e| !e.is_empty());
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn is_invalid(&self) -> bool {
        self.error.is_some()
    }

    /// Rows needed to render the box plus the error line when present.
    pub fn height(&self) -> u16 {
        if self.is_invalid() { 4 } else { 3 }
    }
}

impl Widget for Input<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.is_invalid() {
            self.colors.error
        } else if self.focused {
            self.colors.focus_highlight
        } else {
            self.colors.border_dim
        };
        let border_type = if self.focused {
            BorderType::Double
        } else {
            BorderType::Plain
        };
        let title_style = if self.focused {
            Style::default()
                .fg(self.colors.focus_highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.colors.text)
        };

        let mut spans = Vec::with_capacity(2);
        if self.value.is_empty() {
            spans.push(Span::styled(self.placeholder, Style::default().fg(self.colors.text_dim)));
        } else {
            spans.push(Span::styled(self.value, Style::default().fg(self.colors.text)));
        }
        if self.focused && !self.read_only {
            spans.push(Span::styled("_", Style::default().fg(self.colors.focus_highlight)));
        }

        let box_area = Rect {
            height: area.height.min(3),
            ..area
        };
        Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(Style::default().fg(border_color))
                    .title(Span::styled(format!(" {} ", self.label), title_style)),
            )
            .render(box_area, buf);

        if let Some(error) = self.error {
            if area.height > 3 {
                let error_area = Rect {
                    y: area.y + 3,
                    height: 1,
                    ..area
                };
                Paragraph::new(Span::styled(
                    format!(" ⚠ {}", error),
                    Style::default().fg(self.colors.error),
                ))
                .render(error_area, buf);
            }
        }
    }
}
