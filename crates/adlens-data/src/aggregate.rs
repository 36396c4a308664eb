//! Channel → region aggregation.
//!
//! Groups a flat list of [`Record`]s into one [`ChannelSummary`] per
//! distinct channel, each carrying a per-region breakdown.
//!
//! ## Usage
//!
//! ```
//! use adlens_core::Record;
//! use adlens_data::aggregate;
//!
//! let records = vec![
//!     Record::new("Google", "US", 100.0, 10, 1, 5),
//!     Record::new("Google", "EU", 50.0, 5, 0, 2),
//! ];
//! let summaries = aggregate(&records);
//! assert_eq!(summaries.len(), 1);
//! assert_eq!(summaries[0].regions[0].region, "EU");
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use adlens_core::{ChannelSummary, Record, RegionSummary};
use feruca::{Collator, Locale, Tailoring};
use tracing::debug;

/// Per-channel accumulator used during the single pass.
struct ChannelAccumulator {
    summary: ChannelSummary,
    region_index: HashMap<String, usize>,
}

impl ChannelAccumulator {
    fn new(channel: &str) -> Self {
        Self {
            summary: ChannelSummary::empty(channel),
            region_index: HashMap::new(),
        }
    }

    fn add(&mut self, record: &Record) {
        self.summary.accumulate(record);

        let regions = &mut self.summary.regions;
        let idx = *self
            .region_index
            .entry(record.region.clone())
            .or_insert_with(|| {
                regions.push(RegionSummary::empty(&record.region));
                regions.len() - 1
            });
        regions[idx].accumulate(record);
    }

    fn finish(mut self, collator: &mut Collator) -> ChannelSummary {
        self.summary
            .regions
            .sort_by(|a, b| collator.collate(a.region.as_str(), b.region.as_str()));
        self.summary
    }
}

/// Aggregate records into channel summaries.
///
/// Channels appear in first-seen order. Within each channel, regions are
/// sorted by name with [`locale_cmp`]. The input is not modified.
pub fn aggregate(records: &[Record]) -> Vec<ChannelSummary> {
    let mut channel_index: HashMap<&str, usize> = HashMap::new();
    let mut channels: Vec<ChannelAccumulator> = Vec::new();

    for record in records {
        let idx = *channel_index
            .entry(record.channel.as_str())
            .or_insert_with(|| {
                channels.push(ChannelAccumulator::new(&record.channel));
                channels.len() - 1
            });
        channels[idx].add(record);
    }

    debug!(
        records = records.len(),
        channels = channels.len(),
        "aggregated records"
    );

    let mut collator = region_collator();
    channels
        .into_iter()
        .map(|channel| channel.finish(&mut collator))
        .collect()
}

/// CLDR root collation with spaces and punctuation kept significant.
fn region_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

/// Compare two names with the Unicode Collation Algorithm.
///
/// Accents and case only break ties: `"Éire" < "Espana"` and
/// `"europe" < "Europe"`. Identical collation keys fall back to byte order,
/// so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    region_collator().collate(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const EPSILON: f64 = 1e-6;

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new("Google", "US", 120.25, 1000, 12, 80),
            Record::new("Meta", "EU", 75.5, 800, 4, 33),
            Record::new("Google", "APAC", 40.0, 300, 2, 19),
            Record::new("TikTok", "US", 10.1, 2000, 1, 140),
            Record::new("Google", "US", 60.75, 500, 5, 41),
            Record::new("Meta", "APAC", 22.0, 210, 0, 9),
            Record::new("Meta", "EU", 18.3, 90, 1, 4),
            Record::new("LinkedIn", "EU", 300.0, 150, 6, 12),
        ]
    }

    #[test]
    fn test_empty_input_yields_no_channels() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_end_to_end_example() {
        let records = vec![
            Record::new("Google", "US", 100.0, 10, 1, 5),
            Record::new("Google", "US", 50.0, 5, 0, 2),
            Record::new("Meta", "EU", 200.0, 20, 2, 8),
        ];
        let summaries = aggregate(&records);
        assert_eq!(summaries.len(), 2);

        let google = &summaries[0];
        assert_eq!(google.channel, "Google");
        assert!((google.total_spend - 150.0).abs() < EPSILON);
        assert_eq!(google.total_impressions, 15);
        assert_eq!(google.total_conversions, 1);
        assert_eq!(google.total_clicks, 7);
        assert_eq!(google.regions.len(), 1);
        assert_eq!(google.regions[0].region, "US");
        assert!((google.regions[0].spend - 150.0).abs() < EPSILON);
        assert_eq!(google.regions[0].impressions, 15);
        assert_eq!(google.regions[0].conversions, 1);
        assert_eq!(google.regions[0].clicks, 7);

        let meta = &summaries[1];
        assert_eq!(meta.channel, "Meta");
        assert!((meta.total_spend - 200.0).abs() < EPSILON);
        assert_eq!(meta.total_impressions, 20);
        assert_eq!(meta.total_conversions, 2);
        assert_eq!(meta.total_clicks, 8);
        assert_eq!(meta.regions.len(), 1);
        assert_eq!(meta.regions[0].region, "EU");
        assert!((meta.regions[0].spend - 200.0).abs() < EPSILON);
        assert_eq!(meta.regions[0].clicks, 8);
    }

    #[test]
    fn test_channel_totals_match_input_totals() {
        let records = sample_records();
        let summaries = aggregate(&records);

        let input_spend: f64 = records.iter().map(|r| r.spend).sum();
        let output_spend: f64 = summaries.iter().map(|c| c.total_spend).sum();
        assert!((input_spend - output_spend).abs() < EPSILON);

        let sum_u64 = |f: fn(&Record) -> u64| records.iter().map(f).sum::<u64>();
        assert_eq!(
            summaries.iter().map(|c| c.total_impressions).sum::<u64>(),
            sum_u64(|r| r.impressions)
        );
        assert_eq!(
            summaries.iter().map(|c| c.total_conversions).sum::<u64>(),
            sum_u64(|r| r.conversions)
        );
        assert_eq!(
            summaries.iter().map(|c| c.total_clicks).sum::<u64>(),
            sum_u64(|r| r.clicks)
        );
    }

    #[test]
    fn test_region_sums_match_channel_totals() {
        for channel in aggregate(&sample_records()) {
            let spend: f64 = channel.regions.iter().map(|r| r.spend).sum();
            assert!((spend - channel.total_spend).abs() < EPSILON, "{}", channel.channel);
            assert_eq!(
                channel.regions.iter().map(|r| r.impressions).sum::<u64>(),
                channel.total_impressions
            );
            assert_eq!(
                channel.regions.iter().map(|r| r.conversions).sum::<u64>(),
                channel.total_conversions
            );
            assert_eq!(
                channel.regions.iter().map(|r| r.clicks).sum::<u64>(),
                channel.total_clicks
            );
        }
    }

    #[test]
    fn test_regions_sorted_by_name() {
        for channel in aggregate(&sample_records()) {
            let names: Vec<&str> = channel.regions.iter().map(|r| r.region.as_str()).collect();
            let mut sorted = names.clone();
            sorted.sort_by(|a, b| locale_cmp(a, b));
            assert_eq!(names, sorted, "{}", channel.channel);
        }

        let google = aggregate(&sample_records())
            .into_iter()
            .find(|c| c.channel == "Google")
            .unwrap();
        let names: Vec<&str> = google.regions.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, vec!["APAC", "US"]);
    }

    #[test]
    fn test_one_summary_per_distinct_channel() {
        let records = sample_records();
        let summaries = aggregate(&records);

        let input: HashSet<&str> = records.iter().map(|r| r.channel.as_str()).collect();
        let output: Vec<&str> = summaries.iter().map(|c| c.channel.as_str()).collect();
        let output_set: HashSet<&str> = output.iter().copied().collect();

        assert_eq!(output.len(), output_set.len(), "duplicate channel in output");
        assert_eq!(input, output_set);
    }

    #[test]
    fn test_channels_in_first_seen_order() {
        let names: Vec<String> = aggregate(&sample_records())
            .into_iter()
            .map(|c| c.channel)
            .collect();
        assert_eq!(names, vec!["Google", "Meta", "TikTok", "LinkedIn"]);
    }

    #[test]
    fn test_input_is_not_modified() {
        let records = sample_records();
        let before = records.clone();
        let _ = aggregate(&records);
        assert_eq!(records, before);
    }

    #[test]
    fn test_region_keys_are_scoped_per_channel() {
        let records = vec![
            Record::new("Google", "US", 1.0, 1, 1, 1),
            Record::new("Meta", "US", 2.0, 2, 2, 2),
        ];
        let summaries = aggregate(&records);
        assert_eq!(summaries[0].regions[0].clicks, 1);
        assert_eq!(summaries[1].regions[0].clicks, 2);
    }

    #[test]
    fn test_locale_cmp_is_case_insensitive_first() {
        assert_eq!(locale_cmp("apac", "EU"), Ordering::Less);
        assert_eq!(locale_cmp("europe", "Europe"), Ordering::Less);
        assert_eq!(locale_cmp("Europe", "europe"), Ordering::Greater);
        assert_eq!(locale_cmp("US", "US"), Ordering::Equal);
    }

    #[test]
    fn test_accented_regions_sort_with_their_base_letter() {
        assert_eq!(locale_cmp("Éire", "Espana"), Ordering::Less);
        assert_eq!(locale_cmp("Österreich", "Zürich"), Ordering::Less);
        assert_eq!(locale_cmp("US East", "USA"), Ordering::Less);

        let records = vec![
            Record::new("Google", "Espana", 1.0, 1, 0, 1),
            Record::new("Google", "Zürich", 1.0, 1, 0, 1),
            Record::new("Google", "Éire", 1.0, 1, 0, 1),
            Record::new("Google", "Österreich", 1.0, 1, 0, 1),
        ];
        let summaries = aggregate(&records);
        let names: Vec<&str> = summaries[0].regions.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, vec!["Éire", "Espana", "Österreich", "Zürich"]);
    }
}
