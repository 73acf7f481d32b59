//! Command-line interface for chatgpt-usage.
//!
//! One invocation is one batch run: locate the export, aggregate it, print
//! the report, render the chart, and optionally open it.

mod analyze;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::analytics::RoleScope;
use crate::config::Config;
use crate::error::Result;

/// Daily usage statistics from a ChatGPT conversations.json export.
#[derive(Debug, Parser)]
#[command(name = "chatgpt-usage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Export file to read; repeat to give several candidates, tried in order.
    #[arg(short = 'i', long = "input", env = "CHATGPT_USAGE_INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Ignore messages dated before this day (YYYY-MM-DD).
    #[arg(long, env = "CHATGPT_USAGE_CUTOFF")]
    pub cutoff: Option<String>,

    /// Model whose token encoding is used.
    #[arg(short = 'm', long, env = "CHATGPT_USAGE_MODEL")]
    pub model: Option<String>,

    /// Which roles feed the daily counts.
    #[arg(long, value_enum, env = "CHATGPT_USAGE_ROLE_SCOPE")]
    pub role_scope: Option<RoleScope>,

    /// Chart image path.
    #[arg(long, env = "CHATGPT_USAGE_CHART")]
    pub chart: Option<PathBuf>,

    /// Do not render the chart.
    #[arg(long)]
    pub no_chart: bool,

    /// Do not open the chart after rendering.
    #[arg(long)]
    pub no_open: bool,

    /// Output format for the report.
    #[arg(short = 'o', long, default_value = "text", env = "CHATGPT_USAGE_OUTPUT")]
    pub output: OutputFormat,

    /// Output as JSON (shorthand for -o json).
    #[arg(long)]
    pub json: bool,

    /// Suppress non-essential output.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "warn", env = "CHATGPT_USAGE_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format (text, json, compact, pretty).
    #[arg(long, default_value = "text", env = "CHATGPT_USAGE_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Path to custom configuration file.
    #[arg(long, env = "CHATGPT_USAGE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Tab-separated values.
    Tsv,
}

/// Log level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Errors, warnings, and informational messages.
    Info,
    /// All of the above plus debug messages.
    Debug,
    /// All messages including trace-level details.
    Trace,
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// Structured JSON format for machine consumption.
    Json,
    /// Compact single-line format.
    Compact,
    /// Pretty format with full details.
    Pretty,
}

impl LogLevel {
    /// Convert to tracing filter level.
    #[must_use]
    pub fn to_filter_string(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Cli {
    /// Get effective output format.
    #[must_use]
    pub fn effective_output(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }

    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if !self.inputs.is_empty() {
            config.input.search_paths = self.inputs.clone();
        }
        if let Some(cutoff) = &self.cutoff {
            config.analysis.cutoff_date = cutoff.clone();
        }
        if let Some(model) = &self.model {
            config.analysis.model = model.clone();
        }
        if let Some(scope) = self.role_scope {
            config.analysis.role_scope = scope;
        }
        if let Some(chart) = &self.chart {
            config.output.chart_path = chart.clone();
        }
        if self.no_open {
            config.output.open_chart = false;
        }
    }
}

/// Initialize tracing/logging based on CLI options.
fn init_logging(cli: &Cli) {
    use tracing_subscriber::{
        fmt::{self, format::FmtSpan},
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_filter_string()));

    let result = match cli.log_format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Text => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
    };

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}

/// Load the configuration named on the command line, or the default one.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable default configuration");
            Config::default()
        }),
    };
    cli.apply_to(&mut config);
    Ok(config)
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);

    let config = load_config(&cli)?;
    analyze::run(&cli, &config)
}
