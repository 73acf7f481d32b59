//! chatgpt-usage: daily usage statistics from a ChatGPT conversation export.
//!
//! Reads a `conversations.json` export, buckets messages, tokens, and
//! assistant words by calendar day, derives summary statistics, and renders
//! a console report plus an annotated chart.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chatgpt_usage::api::UsageAnalyzer;
//! use chatgpt_usage::config::Config;
//! use chatgpt_usage::report::render_console;
//!
//! fn main() -> chatgpt_usage::Result<()> {
//!     let config = Config::default();
//!     let analyzer = UsageAnalyzer::from_config(&config)?;
//!     let analysis = analyzer.analyze_first_existing(&config.input.search_paths)?;
//!
//!     print!("{}", render_console(&analysis.summary()?));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Data flows one way: records, daily buckets, totals and averages, text,
//! chart.
//!
//! - [`api`]: High-level entry point for the whole pipeline
//! - [`model`]: Export data structures
//! - [`parser`]: Locating and loading the export
//! - [`tokenizer`]: Token counting
//! - [`analytics`]: Aggregation, summary statistics, fun equivalents
//! - [`report`]: Console report and chart annotation text
//! - [`chart`]: PNG rendering
//! - [`viewer`]: Opening the rendered chart
//! - [`cli`]: Command-line interface
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod analytics;
pub mod api;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod tokenizer;
pub mod util;
pub mod viewer;

// Re-export commonly used types at the crate root
pub use error::{Result, UsageError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        aggregate, AggregateOptions, DailyCounts, DailyEntry, RoleScope, UsageAggregate,
        UsageSummary,
    };
    pub use crate::api::{Analysis, UsageAnalyzer};
    pub use crate::error::{Result, UsageError};
    pub use crate::model::{ConversationRecord, Message};
    pub use crate::tokenizer::{TiktokenCounter, TokenCounter};
}
