//! Summary statistics derived from a [`UsageAggregate`].

use chrono::NaiveDate;
use serde::Serialize;

use super::equivalent::fun_equivalent;
use super::{DailyCounts, DailyEntry, Metric, UsageAggregate};
use crate::error::{Result, UsageError};

/// The day a metric peaked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeakDay {
    /// Date of the peak (earliest on ties).
    pub date: NaiveDate,
    /// Value on that date.
    pub value: u64,
}

/// Average of one metric over all days and over active days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    /// Total divided by the number of days in the range.
    pub per_day_all: f64,
    /// Total divided by the number of active days (zero without active days).
    pub per_day_active: f64,
}

impl Averages {
    fn compute(total: u64, total_days: usize, active_days: usize) -> Self {
        let per_day_active = if active_days > 0 {
            total as f64 / active_days as f64
        } else {
            0.0
        };
        Self {
            per_day_all: total as f64 / total_days as f64,
            per_day_active,
        }
    }
}

/// Everything the reports need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    /// First day of the range.
    pub start_date: NaiveDate,
    /// Last day of the range.
    pub end_date: NaiveDate,
    /// Days in the range.
    pub total_days: usize,
    /// Days with at least one message.
    pub active_days: usize,
    /// Totals.
    pub totals: DailyCounts,
    /// Message averages.
    pub messages: Averages,
    /// Token averages.
    pub tokens: Averages,
    /// Word averages.
    pub words: Averages,
    /// Busiest day by messages.
    pub peak_messages: PeakDay,
    /// Busiest day by tokens.
    pub peak_tokens: PeakDay,
    /// Busiest day by assistant words.
    pub peak_words: PeakDay,
    /// Size comparison for the word total.
    pub fun_equivalent: &'static str,
}

impl UsageSummary {
    /// Summarize an aggregate.
    ///
    /// Fails with [`UsageError::EmptyDataset`] when the aggregate has no days.
    pub fn from_aggregate(aggregate: &UsageAggregate) -> Result<Self> {
        let days = aggregate.days();
        let empty = || UsageError::EmptyDataset {
            cutoff: aggregate.options().cutoff,
        };

        let (Some(first), Some(last)) = (days.first(), days.last()) else {
            return Err(empty());
        };
        let peak = |metric| peak_day(days, metric).ok_or_else(empty);

        let totals = aggregate.totals();
        let total_days = days.len();
        let active_days = aggregate.active_days();

        Ok(Self {
            start_date: first.date,
            end_date: last.date,
            total_days,
            active_days,
            totals,
            messages: Averages::compute(totals.messages, total_days, active_days),
            tokens: Averages::compute(totals.tokens, total_days, active_days),
            words: Averages::compute(totals.words, total_days, active_days),
            peak_messages: peak(Metric::Messages)?,
            peak_tokens: peak(Metric::Tokens)?,
            peak_words: peak(Metric::Words)?,
            fun_equivalent: fun_equivalent(totals.words),
        })
    }
}

/// The first day holding the maximum value of `metric`.
pub fn peak_day(days: &[DailyEntry], metric: Metric) -> Option<PeakDay> {
    days.iter().fold(None, |best: Option<PeakDay>, day| {
        let value = metric.of(&day.counts);
        match best {
            Some(b) if b.value >= value => Some(b),
            _ => Some(PeakDay {
                date: day.date,
                value,
            }),
        }
    })
}
