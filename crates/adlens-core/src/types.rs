//! Shared type definitions used across adlens crates.
//!
//! Records are the raw input rows; summaries are what the aggregator
//! produces from them. Sort keys and directions live here as well because
//! both the configuration layer and the dashboard state need them.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single advertising record as supplied by the data file.
///
/// Records have no identity beyond their position; duplicates are valid
/// and every one of them contributes to the sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Marketing channel (e.g. "Google", "TikTok")
    pub channel: String,
    /// Geographic region within the channel
    pub region: String,
    /// Spend in USD
    pub spend: f64,
    /// Number of ad impressions
    pub impressions: u64,
    /// Number of conversions
    pub conversions: u64,
    /// Number of clicks
    pub clicks: u64,
}

impl Record {
    /// Create a new record.
    pub fn new(
        channel: impl Into<String>,
        region: impl Into<String>,
        spend: f64,
        impressions: u64,
        conversions: u64,
        clicks: u64,
    ) -> Self {
        Self {
            channel: channel.into(),
            region: region.into(),
            spend,
            impressions,
            conversions,
            clicks,
        }
    }
}

/// Metrics summed over every record sharing a (channel, region) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub region: String,
    pub spend: f64,
    pub impressions: u64,
    pub conversions: u64,
    pub clicks: u64,
}

impl RegionSummary {
    /// Create an empty summary for a region.
    pub fn empty(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            spend: 0.0,
            impressions: 0,
            conversions: 0,
            clicks: 0,
        }
    }

    /// Add a record's metrics to this summary.
    pub fn accumulate(&mut self, record: &Record) {
        self.spend += record.spend;
        self.impressions = self.impressions.saturating_add(record.impressions);
        self.conversions = self.conversions.saturating_add(record.conversions);
        self.clicks = self.clicks.saturating_add(record.clicks);
    }
}

/// Metrics summed over every record of a channel, with a per-region breakdown.
///
/// Each `total_*` field equals the sum of the matching field across
/// `regions`. Regions are ordered by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub channel: String,
    pub total_spend: f64,
    pub total_impressions: u64,
    pub total_conversions: u64,
    pub total_clicks: u64,
    pub regions: Vec<RegionSummary>,
}

impl ChannelSummary {
    /// Create an empty summary for a channel.
    pub fn empty(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            total_spend: 0.0,
            total_impressions: 0,
            total_conversions: 0,
            total_clicks: 0,
            regions: Vec::new(),
        }
    }

    /// Add a record's metrics to the channel totals.
    ///
    /// The region breakdown is maintained separately by the aggregator.
    pub fn accumulate(&mut self, record: &Record) {
        self.total_spend += record.spend;
        self.total_impressions = self.total_impressions.saturating_add(record.impressions);
        self.total_conversions = self.total_conversions.saturating_add(record.conversions);
        self.total_clicks = self.total_clicks.saturating_add(record.clicks);
    }
}

/// Column a channel list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Channel name (lexicographic)
    Channel,
    /// Total spend
    #[default]
    TotalSpend,
    /// Total impressions
    TotalImpressions,
    /// Total conversions
    TotalConversions,
    /// Total clicks
    TotalClicks,
}

impl SortKey {
    /// All sort keys in table column order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Channel,
        SortKey::TotalSpend,
        SortKey::TotalImpressions,
        SortKey::TotalConversions,
        SortKey::TotalClicks,
    ];

    /// Compare two channel summaries by this key, ascending.
    pub fn compare(&self, a: &ChannelSummary, b: &ChannelSummary) -> Ordering {
        match self {
            SortKey::Channel => a.channel.cmp(&b.channel),
            SortKey::TotalSpend => a.total_spend.total_cmp(&b.total_spend),
            SortKey::TotalImpressions => a.total_impressions.cmp(&b.total_impressions),
            SortKey::TotalConversions => a.total_conversions.cmp(&b.total_conversions),
            SortKey::TotalClicks => a.total_clicks.cmp(&b.total_clicks),
        }
    }

    /// Column header label.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Channel => "Channel",
            SortKey::TotalSpend => "Total Spend",
            SortKey::TotalImpressions => "Impressions",
            SortKey::TotalConversions => "Conversions",
            SortKey::TotalClicks => "Clicks",
        }
    }

    /// Field name as it appears in serialized summaries.
    pub fn field_name(&self) -> &'static str {
        match self {
            SortKey::Channel => "channel",
            SortKey::TotalSpend => "totalSpend",
            SortKey::TotalImpressions => "totalImpressions",
            SortKey::TotalConversions => "totalConversions",
            SortKey::TotalClicks => "totalClicks",
        }
    }

    /// Parse a sort key from a field name or a short alias.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['_', '-'], "").as_str() {
            "channel" | "name" => Some(SortKey::Channel),
            "totalspend" | "spend" => Some(SortKey::TotalSpend),
            "totalimpressions" | "impressions" => Some(SortKey::TotalImpressions),
            "totalconversions" | "conversions" => Some(SortKey::TotalConversions),
            "totalclicks" | "clicks" => Some(SortKey::TotalClicks),
            _ => None,
        }
    }

    /// Whether the column holds numbers (right-aligned) rather than text.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, SortKey::Channel)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Apply this direction to an ascending ordering.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Indicator glyph shown next to the active column header.
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }

    /// Accessible description ("ascending" / "descending").
    pub fn describe(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ascending",
            SortDirection::Desc => "descending",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    /// Create a sort state.
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Sort state after a header activation.
    ///
    /// Activating the current key flips the direction; activating a new
    /// key selects it in descending order.
    pub fn toggled(&self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.flipped())
        } else {
            Self::new(key, SortDirection::Desc)
        }
    }

    /// Direction for a column, if it is the active one.
    pub fn direction_for(&self, key: SortKey) -> Option<SortDirection> {
        (self.key == key).then_some(self.direction)
    }

    /// Compare two summaries according to this state.
    pub fn compare(&self, a: &ChannelSummary, b: &ChannelSummary) -> Ordering {
        self.direction.apply(self.key.compare(a, b))
    }
}
