//! Text and JSON rendering of a finished tally.

use std::io::IsTerminal;

use crossterm::style::{self, Color, Stylize};
use serde::Serialize;

use collapse_core::api::{CliError, Tally, TallyKind};

const PREFERRED_COLORS: [Color; 4] = [Color::Yellow, Color::Green, Color::Cyan, Color::Blue];
const MIN_BAR: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: usize,
    pub color: bool,
}

/// Colors only on a terminal, and never when `--no-color` or `NO_COLOR` is set.
pub fn color_enabled(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

pub fn render_text(tally: &Tally, opts: RenderOptions) -> String {
    let paint = |text: String, color: Color| {
        if opts.color {
            style::style(text).with(color).to_string()
        } else {
            text
        }
    };

    let mut lines = vec![paint("Results:".to_string(), Color::Green)];
    let entries = tally.entries();
    if entries.is_empty() {
        lines.push("(no outcomes)".to_string());
        return lines.join("\n") + "\n";
    }

    let total = tally.total();
    let max = entries.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let values: Vec<String> = entries
        .iter()
        .map(|(_, v)| format_value(tally.kind(), *v))
        .collect();
    let label_w = entries.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let value_w = values.iter().map(String::len).max().unwrap_or(0);
    // label | value | 100.0% | bar
    let bar_w = opts
        .width
        .saturating_sub(label_w + value_w + 14)
        .max(MIN_BAR);

    for (i, ((label, value), shown)) in entries.iter().zip(&values).enumerate() {
        let percent = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        let filled = bar_length(*value, max, bar_w);
        let color = PREFERRED_COLORS.get(i).copied().unwrap_or(Color::White);

        lines.push(format!(
            "{} | {:>value_w$} | {:>5.1}% | {}",
            paint(format!("{label:<label_w$}"), color),
            shown,
            percent,
            paint("█".repeat(filled), color),
        ));
    }

    let summary = match tally.kind() {
        TallyKind::Counts => format!("Total shots: {}", format_value(TallyKind::Counts, total)),
        TallyKind::Weights => format!("Total weight: {}", format_value(TallyKind::Weights, total)),
    };
    lines.push(paint(summary, Color::Grey));
    lines.join("\n") + "\n"
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    tally: &'a Tally,
    total: f64,
}

pub fn render_json(tally: &Tally) -> Result<String, CliError> {
    let report = JsonReport {
        tally,
        total: tally.total(),
    };
    serde_json::to_string_pretty(&report).map_err(CliError::Serialize)
}

fn format_value(kind: TallyKind, value: f64) -> String {
    match kind {
        TallyKind::Counts => format!("{}", value.round() as u64),
        TallyKind::Weights => format!("{value:.4}"),
    }
}

fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round().max(1.0) as usize
}
