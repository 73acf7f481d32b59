//! Usage aggregation over a conversation export.
//!
//! This module provides:
//! - Per-day message, token, and word buckets
//! - Running totals
//! - Gap-free expansion of the buckets over the active date range
//!
//! Aggregation is a pure function of its inputs: the records, an
//! [`AggregateOptions`], and a [`TokenCounter`]. Nothing is kept between runs.

pub mod equivalent;
pub mod summary;

pub use equivalent::{fun_equivalent, FunEquivalent};
pub use summary::{PeakDay, UsageSummary};

use std::collections::BTreeMap;
use std::ops::AddAssign;

use chrono::{Local, NaiveDate, TimeZone};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::model::{ConversationRecord, Message};
use crate::tokenizer::{count_words, TokenCounter};

/// Which messages feed the daily buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RoleScope {
    /// Messages and tokens from every role; words from assistant messages only.
    #[default]
    All,
    /// Only assistant messages contribute, to every metric.
    Assistant,
}

impl RoleScope {
    /// Whether a message with this role contributes messages and tokens.
    fn admits(self, message: &Message) -> bool {
        match self {
            Self::All => true,
            Self::Assistant => message.is_assistant(),
        }
    }
}

/// Options controlling which messages are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Messages dated before this day are excluded.
    pub cutoff: NaiveDate,
    /// Role gating.
    pub role_scope: RoleScope,
}

impl AggregateOptions {
    /// Options with the given cutoff and the default role scope.
    pub fn new(cutoff: NaiveDate) -> Self {
        Self {
            cutoff,
            role_scope: RoleScope::default(),
        }
    }

    /// Set the role scope.
    pub fn with_role_scope(mut self, role_scope: RoleScope) -> Self {
        self.role_scope = role_scope;
        self
    }
}

/// Counts for one day, or totals over many.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCounts {
    /// Qualifying messages.
    pub messages: u64,
    /// Tokens across qualifying messages.
    pub tokens: u64,
    /// Words across assistant messages.
    pub words: u64,
}

impl AddAssign for DailyCounts {
    fn add_assign(&mut self, other: Self) {
        self.messages += other.messages;
        self.tokens += other.tokens;
        self.words += other.words;
    }
}

/// One calendar day of the expanded series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Calendar date.
    pub date: NaiveDate,
    /// Counts for that date (zero on inactive days).
    pub counts: DailyCounts,
}

impl DailyEntry {
    /// Whether any message was recorded on this day.
    pub fn is_active(&self) -> bool {
        self.counts.messages > 0
    }
}

/// A per-day metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Message count.
    Messages,
    /// Token count.
    Tokens,
    /// Assistant word count.
    Words,
}

impl Metric {
    /// Value of this metric in `counts`.
    pub fn of(self, counts: &DailyCounts) -> u64 {
        match self {
            Self::Messages => counts.messages,
            Self::Tokens => counts.tokens,
            Self::Words => counts.words,
        }
    }
}

/// Why messages were left out of the aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipStats {
    /// Messages inspected.
    pub seen: usize,
    /// No usable `create_time`.
    pub missing_timestamp: usize,
    /// Dated before the cutoff.
    pub before_cutoff: usize,
    /// Excluded by the role scope.
    pub out_of_scope: usize,
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageAggregate {
    days: Vec<DailyEntry>,
    totals: DailyCounts,
    options: AggregateOptions,
    skipped: SkipStats,
}

impl UsageAggregate {
    /// Expanded daily series, ascending and gap-free.
    pub fn days(&self) -> &[DailyEntry] {
        &self.days
    }

    /// Totals across all days.
    pub fn totals(&self) -> DailyCounts {
        self.totals
    }

    /// Options the aggregate was built with.
    pub fn options(&self) -> &AggregateOptions {
        &self.options
    }

    /// Skip counters.
    pub fn skipped(&self) -> &SkipStats {
        &self.skipped
    }

    /// Whether no message qualified.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// First day of the range.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    /// Last day of the range.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    /// Days with at least one message.
    pub fn active_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_active()).count()
    }

    /// The daily values of one metric.
    pub fn series(&self, metric: Metric) -> Vec<u64> {
        self.days.iter().map(|d| metric.of(&d.counts)).collect()
    }
}

/// Aggregate in the local time zone.
pub fn aggregate<C: TokenCounter + ?Sized>(
    conversations: &[ConversationRecord],
    options: AggregateOptions,
    counter: &C,
) -> UsageAggregate {
    aggregate_in(&Local, conversations, options, counter)
}

/// Aggregate, converting timestamps to calendar dates in `tz`.
pub fn aggregate_in<Tz: TimeZone, C: TokenCounter + ?Sized>(
    tz: &Tz,
    conversations: &[ConversationRecord],
    options: AggregateOptions,
    counter: &C,
) -> UsageAggregate {
    let mut buckets: BTreeMap<NaiveDate, DailyCounts> = BTreeMap::new();
    let mut totals = DailyCounts::default();
    let mut skipped = SkipStats::default();

    for message in conversations.iter().flat_map(ConversationRecord::messages) {
        skipped.seen += 1;

        let Some(date) = message.date_in(tz) else {
            trace!("Skipping message without timestamp");
            skipped.missing_timestamp += 1;
            continue;
        };
        if date < options.cutoff {
            trace!(%date, "Skipping message before cutoff");
            skipped.before_cutoff += 1;
            continue;
        }
        if !options.role_scope.admits(message) {
            skipped.out_of_scope += 1;
            continue;
        }

        let text = message.text();
        let mut counts = DailyCounts {
            messages: 1,
            tokens: counter.count(&text) as u64,
            words: 0,
        };
        if message.is_assistant() {
            counts.words = count_words(&text) as u64;
        }

        *buckets.entry(date).or_default() += counts;
        totals += counts;
    }

    let days = expand_range(&buckets);
    debug!(
        days = days.len(),
        messages = totals.messages,
        tokens = totals.tokens,
        words = totals.words,
        ?skipped,
        "Aggregation complete"
    );

    UsageAggregate {
        days,
        totals,
        options,
        skipped,
    }
}

/// Materialize one entry per day between the first and last bucket.
fn expand_range(buckets: &BTreeMap<NaiveDate, DailyCounts>) -> Vec<DailyEntry> {
    let (Some((&first, _)), Some((&last, _))) = (buckets.first_key_value(), buckets.last_key_value())
    else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| DailyEntry {
            date,
            counts: buckets.get(&date).copied().unwrap_or_default(),
        })
        .collect()
}
