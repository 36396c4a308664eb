//! # adlens-data
//!
//! Record loading, aggregation and display derivation for adlens.
//!
//! This crate provides:
//! - [`loader`] - Read and validate records (bundled fixture or JSON file)
//! - [`aggregate()`] - Group records into channel → region summaries
//! - [`derive_view`] - Filter and sort the aggregated channels
//! - [`flatten_rows`] - Expand the view into table rows
//! - [`format`] - Currency and number formatting
//!
//! ## Example
//!
//! ```
//! use adlens_core::{SortKey, SortDirection, SortState};
//! use adlens_data::{aggregate, bundled_records, derive_view, flatten_rows};
//!
//! let records = bundled_records().unwrap();
//! let summaries = aggregate(&records);
//! let view = derive_view(&summaries, "", SortState::new(SortKey::TotalSpend, SortDirection::Desc));
//! let rows = flatten_rows(&view, None);
//! assert_eq!(rows.len(), view.len());
//! ```

pub mod aggregate;
pub mod error;
pub mod format;
pub mod loader;
pub mod rows;
pub mod view;

pub use aggregate::{aggregate, locale_cmp};
pub use error::{DataError, Result};
pub use format::{format_currency, format_number};
pub use loader::{bundled_records, load_records, load_records_or_bundled, parse_records, validate_records};
pub use rows::{Row, flatten_rows, toggle_expansion};
pub use view::{derive_view, filter_channels, sort_channels};
