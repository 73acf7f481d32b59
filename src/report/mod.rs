//! Text rendering of a [`UsageSummary`].
//!
//! Three outputs share the same numbers:
//! - the console report
//! - the left chart annotation (volume across all messages)
//! - the right chart annotation (assistant words and their fun equivalent)
//!
//! The two annotation blocks are padded to the same line count so they
//! render as boxes of equal height.

use std::fmt::Write as _;

use crate::analytics::{RoleScope, UsageSummary};
use crate::util::{format_thousands, wrap_columns};

/// Column width of the right annotation block.
pub const RIGHT_BLOCK_WIDTH: usize = 55;

/// Indentation placed before the fun-equivalent sentence before wrapping.
///
/// One column short of the block width, so the sentence always starts on a
/// fresh line below a blank one.
const FUN_LINE_INDENT: usize = RIGHT_BLOCK_WIDTH - 1;

/// Scope label for figures counted over every role.
pub const ALL_MESSAGES_LABEL: &str = "*scoped to all messages*";

/// Scope label for figures counted over assistant messages only.
pub const ASSISTANT_LABEL: &str = "*scoped to assistant responses*";

/// Labels drawn above the left and right blocks.
///
/// Words are always assistant-only. Messages and tokens follow the scope.
pub fn scope_labels(scope: RoleScope) -> (&'static str, &'static str) {
    let left = match scope {
        RoleScope::All => ALL_MESSAGES_LABEL,
        RoleScope::Assistant => ASSISTANT_LABEL,
    };
    (left, ASSISTANT_LABEL)
}

/// Console report.
pub fn render_console(summary: &UsageSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📊 ChatGPT Combined Usage Summary");
    let _ = writeln!(out, "{}", "-".repeat(35));
    let _ = writeln!(out, "Start date: {}", summary.start_date);
    let _ = writeln!(out, "End date:   {}", summary.end_date);
    let _ = writeln!(out, "Total messages: {}", summary.totals.messages);
    let _ = writeln!(out, "Total tokens:   {}", summary.totals.tokens);
    let _ = writeln!(out, "Total words:    {}", summary.totals.words);
    let _ = writeln!(out, "Total days:     {}", summary.total_days);
    let _ = writeln!(out, "Days used:      {}", summary.active_days);
    let _ = writeln!(out, "▶ Avg msgs/day (all):    {:.2}", summary.messages.per_day_all);
    let _ = writeln!(out, "▶ Avg msgs/day (active): {:.2}", summary.messages.per_day_active);
    let _ = writeln!(out, "▶ Avg tokens/day (all):    {:.2}", summary.tokens.per_day_all);
    let _ = writeln!(out, "▶ Avg tokens/day (active): {:.2}", summary.tokens.per_day_active);
    let _ = writeln!(out, "▶ Avg words/day (all):    {:.2}", summary.words.per_day_all);
    let _ = writeln!(out, "▶ Avg words/day (active): {:.2}", summary.words.per_day_active);
    out
}

/// Tab-separated `metric\tvalue` report.
pub fn render_tsv(summary: &UsageSummary) -> String {
    let rows: [(&str, String); 17] = [
        ("start_date", summary.start_date.to_string()),
        ("end_date", summary.end_date.to_string()),
        ("total_messages", summary.totals.messages.to_string()),
        ("total_tokens", summary.totals.tokens.to_string()),
        ("total_words", summary.totals.words.to_string()),
        ("total_days", summary.total_days.to_string()),
        ("active_days", summary.active_days.to_string()),
        ("avg_messages_all", format!("{:.2}", summary.messages.per_day_all)),
        ("avg_messages_active", format!("{:.2}", summary.messages.per_day_active)),
        ("avg_tokens_all", format!("{:.2}", summary.tokens.per_day_all)),
        ("avg_tokens_active", format!("{:.2}", summary.tokens.per_day_active)),
        ("avg_words_all", format!("{:.2}", summary.words.per_day_all)),
        ("avg_words_active", format!("{:.2}", summary.words.per_day_active)),
        ("peak_messages", format!("{}\t{}", summary.peak_messages.value, summary.peak_messages.date)),
        ("peak_tokens", format!("{}\t{}", summary.peak_tokens.value, summary.peak_tokens.date)),
        ("peak_words", format!("{}\t{}", summary.peak_words.value, summary.peak_words.date)),
        ("fun_equivalent", summary.fun_equivalent.to_string()),
    ];

    let mut out = String::from("metric\tvalue\n");
    for (metric, value) in rows {
        let _ = writeln!(out, "{metric}\t{value}");
    }
    out
}

/// Left annotation block: overall message and token statistics.
pub fn left_block(summary: &UsageSummary) -> String {
    [
        format!("START: {} | END: {}", summary.start_date, summary.end_date),
        format!("TOTAL MESSAGES: {}", summary.totals.messages),
        format!("TOTAL TOKENS: {}", summary.totals.tokens),
        String::new(),
        format!("ACTIVE DAYS: {}/{}", summary.active_days, summary.total_days),
        format!(
            "MSGS/DAY (ALL): {:.2} | MSGS/DAY (ACTIVE): {:.2}",
            summary.messages.per_day_all, summary.messages.per_day_active
        ),
        format!(
            "TOKENS/DAY (ALL): {:.2} | TOKENS/DAY (ACTIVE): {:.2}",
            summary.tokens.per_day_all, summary.tokens.per_day_active
        ),
        String::new(),
        format!(
            "MAX MESSAGES: {} on {}",
            summary.peak_messages.value, summary.peak_messages.date
        ),
        format!(
            "MAX TOKENS:   {} on {}",
            summary.peak_tokens.value, summary.peak_tokens.date
        ),
    ]
    .join("\n")
}

/// Headline of the right block.
pub fn words_headline(total_words: u64) -> String {
    format!(
        "ChatGPT has written {} words for you",
        format_thousands(total_words)
    )
}

/// Right annotation block, padded with blank lines to `min_lines`.
pub fn right_block(summary: &UsageSummary, min_lines: usize) -> String {
    let fun_line = format!("{}{}", " ".repeat(FUN_LINE_INDENT), summary.fun_equivalent);

    let mut lines = vec![words_headline(summary.totals.words), String::new()];
    lines.extend(wrap_columns(&fun_line, RIGHT_BLOCK_WIDTH));
    if lines.len() < min_lines {
        lines.resize(min_lines, String::new());
    }
    lines.join("\n")
}

/// Both annotation blocks with equal line counts.
pub fn annotation_blocks(summary: &UsageSummary) -> (String, String) {
    let left = left_block(summary);
    let right = right_block(summary, line_count(&left));
    let left = pad_lines(left, line_count(&right));
    (left, right)
}

fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

fn pad_lines(mut text: String, lines: usize) -> String {
    for _ in line_count(&text)..lines {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::summary::{Averages, PeakDay};
    use crate::analytics::{fun_equivalent, DailyCounts};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn summary(words: u64) -> UsageSummary {
        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        UsageSummary {
            start_date: day(1),
            end_date: day(10),
            total_days: 10,
            active_days: 4,
            totals: DailyCounts { messages: 40, tokens: 1234, words },
            messages: Averages { per_day_all: 4.0, per_day_active: 10.0 },
            tokens: Averages { per_day_all: 123.4, per_day_active: 308.5 },
            words: Averages { per_day_all: words as f64 / 10.0, per_day_active: words as f64 / 4.0 },
            peak_messages: PeakDay { date: day(3), value: 17 },
            peak_tokens: PeakDay { date: day(7), value: 600 },
            peak_words: PeakDay { date: day(7), value: 250 },
            fun_equivalent: fun_equivalent(words),
        }
    }

    #[test]
    fn test_left_block() {
        let expected = "\
START: 2024-05-01 | END: 2024-05-10
TOTAL MESSAGES: 40
TOTAL TOKENS: 1234

ACTIVE DAYS: 4/10
MSGS/DAY (ALL): 4.00 | MSGS/DAY (ACTIVE): 10.00
TOKENS/DAY (ALL): 123.40 | TOKENS/DAY (ACTIVE): 308.50

MAX MESSAGES: 17 on 2024-05-03
MAX TOKENS:   600 on 2024-05-07";
        assert_eq!(left_block(&summary(0)), expected);
    }

    #[test]
    fn test_right_block_layout() {
        let s = summary(100_388);
        let block = right_block(&s, 10);
        let lines: Vec<&str> = block.split('\n').collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "ChatGPT has written 100,388 words for you");
        assert_eq!(lines[1], "");
        assert!(lines[2].trim().is_empty());
        assert!(lines[3].starts_with("That’s the full word count"));
        assert!(lines.iter().all(|l| l.chars().count() <= RIGHT_BLOCK_WIDTH));

        let sentence: String = lines[3..].concat();
        assert_eq!(sentence.trim_end(), s.fun_equivalent);
    }

    #[test]
    fn test_annotation_blocks_equal_height() {
        for words in [0, 12_000, 22_000_000] {
            let (left, right) = annotation_blocks(&summary(words));
            assert_eq!(line_count(&left), line_count(&right), "words = {words}");
            assert!(line_count(&left) >= 10);
        }
    }

    #[test]
    fn test_console_report() {
        let expected = "\
📊 ChatGPT Combined Usage Summary
-----------------------------------
Start date: 2024-05-01
End date:   2024-05-10
Total messages: 40
Total tokens:   1234
Total words:    50
Total days:     10
Days used:      4
▶ Avg msgs/day (all):    4.00
▶ Avg msgs/day (active): 10.00
▶ Avg tokens/day (all):    123.40
▶ Avg tokens/day (active): 308.50
▶ Avg words/day (all):    5.00
▶ Avg words/day (active): 12.50
";
        assert_eq!(render_console(&summary(50)), expected);
    }

    #[test]
    fn test_scope_labels_follow_role_scope() {
        assert_eq!(
            scope_labels(RoleScope::All),
            ("*scoped to all messages*", "*scoped to assistant responses*")
        );
        assert_eq!(
            scope_labels(RoleScope::Assistant),
            ("*scoped to assistant responses*", "*scoped to assistant responses*")
        );
    }

    #[test]
    fn test_tsv_report() {
        let report = render_tsv(&summary(50));
        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("metric\tvalue"));
        assert!(report.contains("peak_messages\t17\t2024-05-03\n"));
        assert!(report.contains("total_words\t50\n"));
    }
}
