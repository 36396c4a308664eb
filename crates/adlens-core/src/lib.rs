//! # adlens-core
//!
//! Core types, errors, and utilities shared by the adlens crates.
//!
//! This crate provides:
//! - [`AdlensError`] - Error type for configuration, data and terminal failures
//! - [`logging`] - Tracing setup and log file locations
//! - [`types`] - Records, channel/region summaries and sort keys
//!
//! ## Example
//!
//! ```no_run
//! use adlens_core::{AdlensError, Result, logging};
//!
//! fn main() -> adlens_core::Result<()> {
//!     let _guard = logging::init_logging(None, false, true)?;
//!
//!     let max_len = 0;
//!     if max_len == 0 {
//!         return Err(AdlensError::config_validation("filter.max_len must be at least 1"));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

pub use error::{AdlensError, Result};
pub use logging::{LogGuard, init_logging};
pub use types::{ChannelSummary, Record, RegionSummary, SortDirection, SortKey, SortState};
