//! Table row derivation (expansion flattening).
//!
//! Turns the derived channel view into the flat row list the table
//! renders: one channel row per channel, followed by its region rows when
//! that channel is the expanded one.

use adlens_core::{ChannelSummary, RegionSummary};

/// A single table row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Row<'a> {
    /// Channel totals row.
    Channel {
        summary: &'a ChannelSummary,
        is_expanded: bool,
    },
    /// Region detail row belonging to `channel`.
    Region {
        channel: &'a str,
        summary: &'a RegionSummary,
    },
}

impl<'a> Row<'a> {
    /// Channel this row belongs to.
    pub fn channel(&self) -> &'a str {
        match *self {
            Row::Channel { summary, .. } => summary.channel.as_str(),
            Row::Region { channel, .. } => channel,
        }
    }

    /// Whether this is a channel (expandable) row.
    pub fn is_channel(&self) -> bool {
        matches!(self, Row::Channel { .. })
    }

    /// Expanded state for channel rows; `None` for region rows.
    pub fn expanded(&self) -> Option<bool> {
        match self {
            Row::Channel { is_expanded, .. } => Some(*is_expanded),
            Row::Region { .. } => None,
        }
    }
}

/// Flatten a view into rows, expanding at most one channel.
pub fn flatten_rows<'a>(view: &[&'a ChannelSummary], expanded: Option<&str>) -> Vec<Row<'a>> {
    let mut rows = Vec::with_capacity(view.len());

    for &summary in view {
        let is_expanded = expanded == Some(summary.channel.as_str());
        rows.push(Row::Channel {
            summary,
            is_expanded,
        });

        if is_expanded {
            rows.extend(summary.regions.iter().map(move |region| Row::Region {
                channel: &summary.channel,
                summary: region,
            }));
        }
    }

    rows
}

/// Expanded channel after a channel row is activated.
///
/// Activating the expanded channel collapses it; activating any other
/// channel makes it the only expanded one.
pub fn toggle_expansion(current: Option<&str>, clicked: &str) -> Option<String> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked.to_string())
    }
}
