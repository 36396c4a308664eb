//! Sort and filter derivation over aggregated channels.
//!
//! Derived views are new vectors; the aggregated base list is never
//! reordered in place.

use adlens_core::{ChannelSummary, SortState};

/// Keep channels whose name contains `filter_text`, ignoring case.
///
/// An empty filter keeps everything. Regions are never filtered.
pub fn filter_channels<'a>(base: &'a [ChannelSummary], filter_text: &str) -> Vec<&'a ChannelSummary> {
    if filter_text.is_empty() {
        return base.iter().collect();
    }

    let needle = filter_text.to_lowercase();
    base.iter()
        .filter(|c| c.channel.to_lowercase().contains(&needle))
        .collect()
}

/// Sort channels in place by the given sort state.
///
/// The sort is stable, so equal keys keep their relative order.
pub fn sort_channels(channels: &mut [&ChannelSummary], sort: SortState) {
    channels.sort_by(|a, b| sort.compare(a, b));
}

/// Filter then sort the aggregated list for display.
pub fn derive_view<'a>(
    base: &'a [ChannelSummary],
    filter_text: &str,
    sort: SortState,
) -> Vec<&'a ChannelSummary> {
    let mut view = filter_channels(base, filter_text);
    sort_channels(&mut view, sort);
    view
}
