//! Main application state and drawing for the adlens TUI.
//!
//! `App` owns the aggregated data and the [`DashboardState`]. Every input
//! is turned into an [`Action`] and applied with [`reduce`]; the visible
//! table is derived from the aggregate and the state on each draw.

use std::io;
use std::time::{Duration, Instant};

use adlens_config::DashboardConfig;
use adlens_core::{ChannelSummary, Record, SortKey};
use adlens_data::{aggregate, derive_view, flatten_rows};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, TableState, Wrap},
};
use tracing::{debug, info};

use crate::event::{HitAreas, key_action, mouse_actions};
use crate::state::{Action, DashboardState, Focus, SORT_MENU, reduce};
use crate::table::{DataTable, TableLayout};
use crate::theme::Theme;
use crate::widgets::{
    Button, ButtonSize, ButtonVariant, Dropdown, DropdownMenu, Input, Modal, ModalLayout, dropdown,
};

/// Result type for app operations.
pub type AppResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Header timestamp cache duration (update every second).
const TIMESTAMP_CACHE_DURATION: Duration = Duration::from_secs(1);

const CONFIGURE_LABEL: &str = "Configure";
const CLICKS_LABEL: &str = "Sort by Clicks";
const DISABLED_LABEL: &str = "Disabled";
const FILTER_LABEL: &str = "Filter channels";
const FILTER_PLACEHOLDER: &str = "Type part of a channel name";
const MODAL_TITLE: &str = "Dashboard Configuration";
const MODAL_DESCRIPTION: &str =
    "Campaign records are grouped by channel and region. Totals update as you sort and filter.";
const MODAL_SETTING_LABEL: &str = "Data source";
const MODAL_INFO: &str = "Settings are read from the configuration file at startup.";
const BUNDLED_SOURCE: &str = "Bundled sample data";

/// Main application state.
pub struct App {
    /// Dashboard title from configuration
    title: String,
    /// Aggregated channel summaries, computed once
    summaries: Vec<ChannelSummary>,
    /// Time spent aggregating at startup
    aggregation_time: Duration,
    /// Interactive state, changed only through `reduce`
    state: DashboardState,
    /// Where the records came from, shown in the configuration dialog
    data_source: String,
    theme: Theme,
    /// Hit areas from the last draw
    hits: HitAreas,
    /// Table scroll state
    table_state: TableState,
    /// Event poll interval
    tick_rate: Duration,
    /// Dirty flag - whether UI needs redraw
    dirty: bool,
    cached_timestamp: Option<String>,
    last_timestamp_update: Instant,
}

impl App {
    /// Aggregate `records` and set up the initial state from `config`.
    pub fn new(config: &DashboardConfig, records: &[Record]) -> Self {
        let started = Instant::now();
        let summaries = aggregate(records);
        let aggregation_time = started.elapsed();
        info!(
            records = records.len(),
            channels = summaries.len(),
            elapsed_us = aggregation_time.as_micros() as u64,
            "aggregated records"
        );

        let data_source = config
            .data_path
            .as_ref()
            .map_or_else(|| BUNDLED_SOURCE.to_string(), |p| p.display().to_string());

        Self {
            title: config.title.clone(),
            summaries,
            aggregation_time,
            state: DashboardState::new(config),
            data_source,
            theme: Theme::by_name(config.theme),
            hits: HitAreas::default(),
            table_state: TableState::default(),
            tick_rate: Duration::from_millis(config.tick_rate_ms),
            dirty: true,
            cached_timestamp: None,
            last_timestamp_update: Instant::now(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn summaries(&self) -> &[ChannelSummary] {
        &self.summaries
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    /// Aggregation time rounded to whole milliseconds.
    pub fn aggregation_millis(&self) -> u64 {
        (self.aggregation_time.as_secs_f64() * 1000.0).round() as u64
    }

    /// Channels currently visible, filtered and sorted.
    pub fn view(&self) -> Vec<&ChannelSummary> {
        derive_view(&self.summaries, &self.state.filter, self.state.sort)
    }

    /// Status line text.
    pub fn status_text(&self) -> String {
        format!(
            "Showing {} of {} channels · aggregated in {} ms",
            self.view().len(),
            self.summaries.len(),
            self.aggregation_millis()
        )
    }

    fn cursor_channel(&self) -> Option<String> {
        let view = self.view();
        let rows = flatten_rows(&view, self.state.expanded.as_deref());
        rows.get(self.state.cursor).map(|row| row.channel().to_string())
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn get_cached_timestamp(&mut self) -> String {
        if self.cached_timestamp.is_none()
            || self.last_timestamp_update.elapsed() >= TIMESTAMP_CACHE_DURATION
        {
            self.cached_timestamp = Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
            self.last_timestamp_update = Instant::now();
        }
        self.cached_timestamp.clone().unwrap_or_default()
    }

    /// Apply an action and keep the table cursor on a valid row.
    ///
    /// After an expansion toggle the cursor follows the toggled channel.
    pub fn dispatch(&mut self, action: Action) {
        if action == Action::None {
            return;
        }
        debug!(?action, "dispatch");

        let follow = match &action {
            Action::ToggleExpand(channel) => Some(channel.clone()),
            _ => None,
        };
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);

        let (row_count, follow_index) = {
            let view = self.view();
            let rows = flatten_rows(&view, self.state.expanded.as_deref());
            let index = follow.and_then(|channel| {
                rows.iter()
                    .position(|row| row.is_channel() && row.channel() == channel)
            });
            (rows.len(), index)
        };
        let state = std::mem::take(&mut self.state);
        self.state = reduce(
            state,
            Action::SyncCursor {
                row_count,
                follow: follow_index,
            },
        );
        self.mark_dirty();
    }

    /// Handle a key press.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let channel = self.cursor_channel();
        let action = key_action(key, &self.state, channel.as_deref());
        self.dispatch(action);
    }

    /// Handle a mouse event against the areas of the last draw.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        for action in mouse_actions(mouse, &self.state, &self.hits) {
            self.dispatch(action);
        }
    }

    /// Run the main application loop.
    pub fn run(&mut self) -> AppResult<()> {
        // Setup terminal
        crossterm::terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(
            stdout,
            crossterm::terminal::EnterAlternateScreen,
            crossterm::event::EnableMouseCapture
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal);

        // Restore terminal
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            terminal.backend_mut(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    /// Draw when dirty, then wait up to one tick for the next event.
    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> AppResult<()> {
        while !self.state.should_quit {
            let frame_start = Instant::now();

            let needs_redraw =
                self.take_dirty() || self.last_timestamp_update.elapsed() >= TIMESTAMP_CACHE_DURATION;
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
            }

            let timeout = self
                .tick_rate
                .saturating_sub(frame_start.elapsed())
                .max(Duration::from_millis(1));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    Event::Resize(..) => self.mark_dirty(),
                    _ => {}
                }
            }
        }
        info!("quit requested");
        Ok(())
    }

    /// Draw the UI and record hit areas for mouse input.
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.hits = HitAreas::default();

        let filter_height = if self.state.filter_error.is_some() { 4 } else { 3 };
        let [header, controls, filter, status, table, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(filter_height),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .areas(area);

        self.draw_header(frame, header);
        self.draw_controls(frame, controls);
        self.draw_filter(frame, filter);
        self.draw_status(frame, status);
        self.draw_table(frame, table);
        self.draw_footer(frame, footer);

        if self.state.dropdown.open {
            self.draw_sort_menu(frame, area);
        }
        if self.state.modal_open {
            self.draw_modal(frame, area);
        }
        if self.state.show_help {
            self.draw_help_overlay(frame, area);
        }
    }

    /// Draw the title bar with the cached timestamp right-aligned.
    fn draw_header(&mut self, frame: &mut Frame, area: Rect) {
        let now = self.get_cached_timestamp();
        let colors = &self.theme.colors;
        let title = format!(" {} ", self.title);

        let spacing = area
            .width
            .saturating_sub(title.chars().count() as u16 + now.len() as u16 + 3) as usize;

        let header = Paragraph::new(Line::from(vec![
            Span::styled(title, Style::default().fg(colors.header).add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(spacing)),
            Span::styled(now, Style::default().fg(colors.text_dim)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border_dim)),
        );

        frame.render_widget(header, area);
    }

    /// Draw the button row and the sort dropdown trigger.
    fn draw_controls(&mut self, frame: &mut Frame, area: Rect) {
        let colors = &self.theme.colors;
        let focus = self.state.focus;
        let mut x = area.x;
        let mut slot = |width: u16| {
            let width = width.min(area.right().saturating_sub(x));
            let rect = Rect::new(x, area.y, width, area.height);
            x = x.saturating_add(width + 1).min(area.right());
            rect
        };

        let buttons = [
            (
                Button::new(CONFIGURE_LABEL, colors)
                    .variant(ButtonVariant::Primary)
                    .accessible_label("Open configuration dialog")
                    .focused(focus == Focus::ConfigureButton),
                Action::OpenModal,
            ),
            (
                Button::new(CLICKS_LABEL, colors)
                    .variant(ButtonVariant::Secondary)
                    .accessible_label("Sort table by total clicks")
                    .focused(focus == Focus::ClicksButton),
                Action::SortBy(SortKey::TotalClicks),
            ),
            (
                Button::new(DISABLED_LABEL, colors)
                    .size(ButtonSize::Sm)
                    .disabled(true),
                Action::None,
            ),
        ];

        for (button, action) in buttons {
            let rect = slot(button.width());
            let action = button.activate().map_or(Action::None, |()| action);
            self.hits.buttons.push((rect, action));
            frame.render_widget(button, rect);
        }

        let trigger = Dropdown::new(self.state.sort_menu_label(), self.state.dropdown, colors)
            .focused(focus == Focus::SortMenu);
        let rect = slot(trigger.width());
        self.hits.sort_trigger = rect;
        frame.render_widget(trigger, rect);
    }

    fn draw_filter(&mut self, frame: &mut Frame, area: Rect) {
        let input = Input::new(FILTER_LABEL, &self.state.filter, &self.theme.colors)
            .placeholder(FILTER_PLACEHOLDER)
            .error(self.state.filter_error.as_deref())
            .focused(self.state.focus == Focus::Filter);
        self.hits.filter = Rect {
            height: area.height.min(3),
            ..area
        };
        frame.render_widget(input, area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let status = Paragraph::new(format!(" {}", self.status_text()))
            .style(Style::default().fg(self.theme.colors.text_dim));
        frame.render_widget(status, area);
    }

    fn draw_table(&mut self, frame: &mut Frame, area: Rect) {
        let view = derive_view(&self.summaries, &self.state.filter, self.state.sort);
        let rows = flatten_rows(&view, self.state.expanded.as_deref());

        self.table_state
            .select((!rows.is_empty()).then_some(self.state.cursor));
        let table = DataTable::new(&rows, self.state.sort, &self.theme.colors)
            .focused(self.state.focus == Focus::Table);
        frame.render_stateful_widget(table, area, &mut self.table_state);

        self.hits.table = Some(TableLayout::new(area));
        self.hits.table_offset = self.table_state.offset();
        self.hits.row_channels = rows
            .iter()
            .map(|row| row.is_channel().then(|| row.channel().to_string()))
            .collect();
    }

    /// Draw the footer with hotkey hints.
    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let colors = &self.theme.colors;
        let hotkey_style = Style::default().fg(colors.hotkey);
        let hints = vec![
            Span::styled("[Tab]", hotkey_style),
            Span::raw("Focus "),
            Span::styled("[↑↓]", hotkey_style),
            Span::raw("Move "),
            Span::styled("[Enter]", hotkey_style),
            Span::raw("Expand "),
            Span::styled("[1-5]", hotkey_style),
            Span::raw("Sort "),
            Span::styled("[/]", hotkey_style),
            Span::raw("Filter "),
            Span::styled("[?]", hotkey_style),
            Span::raw("Help "),
            Span::styled("[q]", hotkey_style),
            Span::raw("Quit"),
        ];

        let footer = Paragraph::new(Line::from(hints))
            .style(Style::default().fg(colors.text_dim))
            .block(Block::default().borders(Borders::TOP));

        frame.render_widget(footer, area);
    }

    fn draw_sort_menu(&mut self, frame: &mut Frame, area: Rect) {
        let menu_area = dropdown::menu_area(self.hits.sort_trigger, &SORT_MENU, area);
        let menu = DropdownMenu::new(&SORT_MENU, self.state.dropdown, &self.theme.colors);
        frame.render_widget(menu, menu_area);
        self.hits.sort_menu = Some(menu_area);
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect) {
        let colors = &self.theme.colors;
        let modal = Modal::new(MODAL_TITLE, self.state.modal, colors)
            .description(MODAL_DESCRIPTION)
            .setting(MODAL_SETTING_LABEL, &self.data_source)
            .info(MODAL_INFO);
        frame.render_widget(modal, area);
        self.hits.modal = Some(ModalLayout::centered(area, colors));
    }

    /// Draw the help overlay.
    fn draw_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let colors = &self.theme.colors;
        let overlay_width = 56.min(area.width.saturating_sub(4));
        let overlay_height = 22.min(area.height.saturating_sub(2));
        let overlay_x = (area.width - overlay_width) / 2;
        let overlay_y = (area.height - overlay_height) / 2;

        let overlay_area = Rect::new(overlay_x, overlay_y, overlay_width, overlay_height);

        frame.render_widget(Clear, overlay_area);

        let help_text = "\
adlens Hotkey Reference

Navigation:
  Tab        Focus next control
  Shift+Tab  Focus previous control
  ↑ k / ↓ j  Move table cursor
  g / G      First / last row
  /          Focus the channel filter

Table:
  Enter      Expand or collapse channel
  Space      Expand or collapse channel
  1-5        Sort by column (again to flip)

General:
  ?          Show this help
  Esc        Close menu or dialog
  q          Quit
  Ctrl+C     Force quit

Press any key to close this help.";

        let help = Paragraph::new(help_text)
            .style(Style::default().fg(colors.text))
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(colors.header))
                    .title(Span::styled(
                        " Help ",
                        Style::default().fg(colors.header).add_modifier(Modifier::BOLD),
                    ))
                    .style(Style::default().bg(colors.overlay_bg)),
            )
            .wrap(Wrap { trim: false });

        frame.render_widget(help, overlay_area);
    }
}
