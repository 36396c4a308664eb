//! Terminal UI for adlens.
//!
//! A ratatui dashboard over aggregated campaign metrics: a sortable,
//! filterable channel table with expandable region details, plus the
//! control widgets around it.
//!
//! ## Hotkeys
//!
//! - `Tab` / `Shift+Tab` - Cycle focus between controls
//! - `↑` `↓` - Move the table cursor
//! - `Enter` / `Space` - Activate the focused control or expand a channel
//! - `1`-`5` - Sort by column (repeat to flip direction)
//! - `/` - Focus the channel filter
//! - `?` - Help
//! - `q` - Quit
//! - `Esc` - Close menu or dialog

pub mod app;
pub mod event;
pub mod state;
pub mod table;
pub mod theme;
pub mod widgets;

pub use app::{App, AppResult};
pub use state::{Action, DashboardState, Focus, reduce};
pub use theme::Theme;
