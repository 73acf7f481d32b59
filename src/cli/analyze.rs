//! The single batch run behind the CLI.

use tracing::{info, warn};

use crate::analytics::{UsageAggregate, UsageSummary};
use crate::api::UsageAnalyzer;
use crate::chart::{render_chart, ChartOptions};
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::report::{render_console, render_tsv};
use crate::viewer::viewer_for;

/// JSON report: the summary plus the expanded daily series.
#[derive(Debug, serde::Serialize)]
struct JsonReport<'a> {
    conversations: usize,
    cutoff: chrono::NaiveDate,
    summary: &'a UsageSummary,
    days: &'a [crate::analytics::DailyEntry],
}

/// Run the analysis described by `config`.
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let analyzer = UsageAnalyzer::from_config(config)?;
    info!(
        encoding = analyzer.counter().encoding_label(),
        cutoff = %analyzer.options().cutoff,
        role_scope = ?analyzer.options().role_scope,
        "Starting analysis"
    );

    let analysis = analyzer.analyze_first_existing(&config.input.search_paths)?;
    let summary = analysis.summary()?;

    print_report(cli, analysis.conversation_count(), analysis.aggregate(), &summary)?;

    if cli.no_chart {
        return Ok(());
    }

    let chart_path = &config.output.chart_path;
    render_chart(
        analysis.aggregate(),
        &summary,
        chart_path,
        &ChartOptions::default(),
    )?;
    if !cli.quiet {
        eprintln!("Plot saved as {}", chart_path.display());
    }

    if let Err(e) = viewer_for(config.output.open_chart).open(chart_path) {
        warn!(error = %e, "Could not open chart");
    }

    Ok(())
}

fn print_report(
    cli: &Cli,
    conversations: usize,
    aggregate: &UsageAggregate,
    summary: &UsageSummary,
) -> Result<()> {
    match cli.effective_output() {
        OutputFormat::Json => {
            let report = JsonReport {
                conversations,
                cutoff: aggregate.options().cutoff,
                summary,
                days: aggregate.days(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Tsv => print!("{}", render_tsv(summary)),
        OutputFormat::Text => {
            if !cli.quiet {
                println!();
            }
            print!("{}", render_console(summary));
        }
    }
    Ok(())
}
