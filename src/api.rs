//! High-level programmatic API for chatgpt-usage.
//!
//! Wraps the pipeline (locate, load, aggregate, summarize) behind a single
//! entry point so callers don't need to know the module layout.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chatgpt_usage::api::UsageAnalyzer;
//! use chatgpt_usage::config::Config;
//!
//! fn main() -> chatgpt_usage::Result<()> {
//!     let analyzer = UsageAnalyzer::from_config(&Config::default())?;
//!     let analysis = analyzer.analyze_first_existing(&["conversations.json"])?;
//!
//!     let summary = analysis.summary()?;
//!     println!("{} messages over {} days", summary.totals.messages, summary.total_days);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use crate::analytics::{aggregate, AggregateOptions, UsageAggregate, UsageSummary};
use crate::config::Config;
use crate::error::Result;
use crate::model::ConversationRecord;
use crate::parser::{load_conversations, locate_input};
use crate::tokenizer::{TiktokenCounter, TokenCounter};

/// Runs the aggregation pipeline with a fixed set of options.
pub struct UsageAnalyzer<C = TiktokenCounter> {
    options: AggregateOptions,
    counter: C,
}

impl<C: std::fmt::Debug> std::fmt::Debug for UsageAnalyzer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageAnalyzer")
            .field("options", &self.options)
            .field("counter", &self.counter)
            .finish()
    }
}

impl UsageAnalyzer<TiktokenCounter> {
    /// Build an analyzer from configuration, loading the configured encoding.
    pub fn from_config(config: &Config) -> Result<Self> {
        let options = AggregateOptions::new(config.analysis.cutoff()?)
            .with_role_scope(config.analysis.role_scope);
        let counter = TiktokenCounter::for_model(&config.analysis.model)?;
        Ok(Self::new(options, counter))
    }
}

impl<C: TokenCounter> UsageAnalyzer<C> {
    /// Build an analyzer with an explicit token counter.
    pub fn new(options: AggregateOptions, counter: C) -> Self {
        Self { options, counter }
    }

    /// Aggregation options in use.
    pub fn options(&self) -> &AggregateOptions {
        &self.options
    }

    /// Token counter in use.
    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// Aggregate already-loaded conversations.
    pub fn analyze(&self, conversations: &[ConversationRecord]) -> Analysis {
        Analysis {
            conversations: conversations.len(),
            aggregate: aggregate(conversations, self.options, &self.counter),
        }
    }

    /// Load and aggregate one export file.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<Analysis> {
        let conversations = load_conversations(path)?;
        Ok(self.analyze(&conversations))
    }

    /// Aggregate the first candidate path that exists.
    pub fn analyze_first_existing<P: AsRef<Path>>(&self, candidates: &[P]) -> Result<Analysis> {
        let path = locate_input(candidates)?;
        self.analyze_file(path)
    }
}

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct Analysis {
    conversations: usize,
    aggregate: UsageAggregate,
}

impl Analysis {
    /// Number of conversation records read.
    pub fn conversation_count(&self) -> usize {
        self.conversations
    }

    /// The daily aggregate.
    pub fn aggregate(&self) -> &UsageAggregate {
        &self.aggregate
    }

    /// Summary statistics; fails with `EmptyDataset` if nothing qualified.
    pub fn summary(&self) -> Result<UsageSummary> {
        UsageSummary::from_aggregate(&self.aggregate)
    }
}
