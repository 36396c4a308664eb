//! Channel data table widget.
//!
//! Shows one line per derived row: channel totals with a ►/▼ expansion
//! marker, and indented region lines beneath the expanded channel. The
//! active sort column carries ▲ (ascending) or ▼ (descending).

use adlens_core::{SortKey, SortState};
use adlens_data::{Row, format_currency, format_number};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row as TableRow, StatefulWidget, Table, TableState, Widget},
};

use crate::theme::ThemeColors;

/// Message shown when the view has no channels.
pub const NO_DATA: &str = "No data";

const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Fill(2),
    Constraint::Fill(1),
    Constraint::Fill(1),
    Constraint::Fill(1),
    Constraint::Fill(1),
];
const COLUMN_SPACING: u16 = 1;

/// Sort state announced for a column header.
pub fn aria_sort(sort: SortState, key: SortKey) -> &'static str {
    sort.direction_for(key).map_or("none", |direction| direction.describe())
}

/// Header text for a column, with the direction arrow when active.
pub fn header_label(sort: SortState, key: SortKey) -> String {
    match sort.direction_for(key) {
        Some(direction) => format!("{} {}", key.label(), direction.indicator()),
        None => key.label().to_string(),
    }
}

/// Screen areas used for mouse hit testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// Header cells, in [`SortKey::ALL`] order
    pub headers: [Rect; 5],
    /// Region below the header where data rows are drawn
    pub body: Rect,
}

impl TableLayout {
    pub fn new(area: Rect) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let header_line = Rect { height: inner.height.min(1), ..inner };
        let headers = Layout::horizontal(COLUMN_WIDTHS)
            .flex(Flex::Start)
            .spacing(COLUMN_SPACING)
            .areas(header_line);
        let body = Rect {
            y: inner.y + header_line.height,
            height: inner.height.saturating_sub(header_line.height),
            ..inner
        };
        Self { headers, body }
    }

    /// Column whose header contains (`column`, `row`).
    pub fn header_at(&self, column: u16, row: u16) -> Option<SortKey> {
        self.headers
            .iter()
            .position(|r| r.contains((column, row).into()))
            .map(|i| SortKey::ALL[i])
    }

    /// Row index under (`column`, `row`) given the table's scroll offset.
    pub fn row_at(&self, column: u16, row: u16, offset: usize, len: usize) -> Option<usize> {
        if !self.body.contains((column, row).into()) {
            return None;
        }
        let index = offset + usize::from(row - self.body.y);
        (index < len).then_some(index)
    }
}

/// The channel table.
///
/// Rendered with a [`TableState`] so the caller can read back the scroll
/// offset for mouse hit testing.
#[derive(Debug)]
pub struct DataTable<'a> {
    rows: &'a [Row<'a>],
    sort: SortState,
    focused: bool,
    colors: &'a ThemeColors,
}

impl<'a> DataTable<'a> {
    pub fn new(rows: &'a [Row<'a>], sort: SortState, colors: &'a ThemeColors) -> Self {
        Self {
            rows,
            sort,
            focused: false,
            colors,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn header_row(&self) -> TableRow<'static> {
        let cells = SortKey::ALL.iter().map(|&key| {
            let style = if self.sort.key == key {
                Style::default()
                    .fg(self.colors.header)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.colors.text_dim).add_modifier(Modifier::BOLD)
            };
            let line = Line::from(Span::styled(header_label(self.sort, key), style));
            Cell::from(if key.is_numeric() {
                line.alignment(Alignment::Right)
            } else {
                line
            })
        });
        TableRow::new(cells)
    }

    fn body_row(&self, row: &Row<'_>) -> TableRow<'static> {
        let (name, values, style) = match *row {
            Row::Channel { summary, is_expanded } => (
                format!("{} {}", if is_expanded { "▼" } else { "►" }, summary.channel),
                [
                    format_currency(summary.total_spend),
                    format_number(summary.total_impressions),
                    format_number(summary.total_conversions),
                    format_number(summary.total_clicks),
                ],
                Style::default().fg(self.colors.text),
            ),
            Row::Region { summary, .. } => (
                format!("  — {}", summary.region),
                [
                    format_currency(summary.spend),
                    format_number(summary.impressions),
                    format_number(summary.conversions),
                    format_number(summary.clicks),
                ],
                Style::default().fg(self.colors.region_text),
            ),
        };

        let mut cells = Vec::with_capacity(5);
        cells.push(Cell::from(name));
        cells.extend(
            values
                .into_iter()
                .map(|value| Cell::from(Line::from(value).alignment(Alignment::Right))),
        );
        TableRow::new(cells).style(style)
    }
}

impl StatefulWidget for DataTable<'_> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TableState) {
        let (border_type, border_style, title_style) = if self.focused {
            (
                BorderType::Double,
                Style::default().fg(self.colors.focus_highlight),
                Style::default()
                    .fg(self.colors.focus_highlight)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                BorderType::Plain,
                Style::default().fg(self.colors.border_dim),
                Style::default().fg(self.colors.text),
            )
        };

        let title = format!(
            " Channels · sorted by {}, {} ",
            self.sort.key.label(),
            self.sort.direction.describe()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .title(Span::styled(title, title_style));

        let rows: Vec<TableRow> = self.rows.iter().map(|row| self.body_row(row)).collect();
        let is_empty = rows.is_empty();

        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(self.header_row())
            .column_spacing(COLUMN_SPACING)
            .flex(Flex::Start)
            .row_highlight_style(
                Style::default()
                    .fg(self.colors.focus_highlight)
                    .add_modifier(Modifier::REVERSED),
            )
            .block(block);

        StatefulWidget::render(table, area, buf, state);

        if is_empty {
            let layout = TableLayout::new(area);
            Paragraph::new(NO_DATA)
                .style(Style::default().fg(self.colors.text_dim))
                .alignment(Alignment::Center)
                .render(layout.body, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use adlens_core::{ChannelSummary, Record, SortDirection};
    use adlens_data::{aggregate, flatten_rows};

    fn render_rows(rows: &[Row<'_>], sort: SortState, width: u16, height: u16) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        let mut state = TableState::default();
        DataTable::new(rows, sort, &theme.colors).render(area, &mut buf, &mut state);

        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn sample() -> Vec<ChannelSummary> {
        aggregate(&[
            Record::new("Google", "US", 150.0, 15, 1, 7),
            Record::new("Meta", "EU", 200.0, 20, 2, 8),
            Record::new("Google", "EU", 1250.0, 1200, 3, 9),
        ])
    }

    #[test]
    fn test_header_label_marks_active_column() {
        let sort = SortState::new(SortKey::TotalClicks, SortDirection::Asc);
        assert_eq!(header_label(sort, SortKey::TotalClicks), "Clicks ▲");
        assert_eq!(header_label(sort, SortKey::Channel), "Channel");

        let sort = SortState::new(SortKey::TotalSpend, SortDirection::Desc);
        assert_eq!(header_label(sort, SortKey::TotalSpend), "Total Spend ▼");
    }

    #[test]
    fn test_aria_sort() {
        let sort = SortState::new(SortKey::Channel, SortDirection::Asc);
        assert_eq!(aria_sort(sort, SortKey::Channel), "ascending");
        assert_eq!(aria_sort(sort, SortKey::TotalSpend), "none");
    }

    #[test]
    fn test_renders_channels_and_expanded_regions() {
        let summaries = sample();
        let view: Vec<&ChannelSummary> = summaries.iter().collect();
        let rows = flatten_rows(&view, Some("Google"));
        let out = render_rows(&rows, SortState::default(), 90, 10);

        assert!(out.contains("▼ Google"));
        assert!(out.contains("► Meta"));
        assert!(out.contains("— EU"));
        assert!(out.contains("— US"));
        assert!(out.contains("$1,400"));
        assert!(out.contains("1,215"));
        assert!(out.contains("Total Spend ▼"));
    }

    #[test]
    fn test_empty_rows_show_no_data() {
        let out = render_rows(&[], SortState::default(), 80, 6);
        assert!(out.contains(NO_DATA));
        assert!(out.contains("Channel"));
    }

    #[test]
    fn test_layout_hit_testing() {
        let layout = TableLayout::new(Rect::new(0, 10, 80, 12));
        assert_eq!(layout.body.y, 12);

        assert_eq!(layout.header_at(layout.headers[0].x, 11), Some(SortKey::Channel));
        assert_eq!(layout.header_at(layout.headers[4].x + 1, 11), Some(SortKey::TotalClicks));
        assert_eq!(layout.header_at(layout.headers[4].x, 12), None);

        assert_eq!(layout.row_at(5, 12, 0, 3), Some(0));
        assert_eq!(layout.row_at(5, 14, 0, 3), Some(2));
        assert_eq!(layout.row_at(5, 15, 0, 3), None);
        assert_eq!(layout.row_at(5, 13, 4, 8), Some(5));
    }
}
