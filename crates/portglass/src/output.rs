//! Output formatting: tables, rate humanization, and the text panel.
//!
//! Table output uses `tabled`; JSON uses serde; plain emits one value
//! per line. Link state coloring goes through `owo-colors` and respects
//! non-terminal stdout.

use std::io::{self, IsTerminal, Write};

use bytesize::ByteSize;
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use portglass_core::LinkState;

use crate::cli::OutputFormat;

/// Whether color output should be enabled.
pub fn should_color() -> bool {
    io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err()
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Print rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn render_json<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("<serialization error: {e}>"))
}

// ── Rate / speed humanization ────────────────────────────────────────

/// Negotiated link speed, decimal units: `"1.00 Gbps"`, `"100.00 Mbps"`.
pub fn format_speed(bps: u64) -> String {
    if bps == 0 {
        return "0 bps".into();
    }
    #[allow(clippy::cast_precision_loss)]
    let bps_f = bps as f64;
    if bps >= 1_000_000_000 {
        format!("{:.2} Gbps", bps_f / 1e9)
    } else if bps >= 1_000_000 {
        format!("{:.2} Mbps", bps_f / 1e6)
    } else if bps >= 1_000 {
        format!("{:.2} Kbps", bps_f / 1e3)
    } else {
        format!("{bps} bps")
    }
}

/// Traffic rate in bytes per second: `"1.2 MB/s"`.
pub fn format_rate(bytes_per_sec: u64) -> String {
    format!("{}/s", ByteSize(bytes_per_sec))
}

/// A colored UP/DOWN label.
pub fn state_label(state: LinkState, color: bool) -> String {
    match (state, color) {
        (LinkState::Up, true) => format!("{}", "UP".green().bold()),
        (LinkState::Down, true) => format!("{}", "DOWN".dimmed()),
        (LinkState::Up, false) => "UP".into(),
        (LinkState::Down, false) => "DOWN".into(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn speed_formatting_thresholds() {
        assert_eq!(format_speed(0), "0 bps");
        assert_eq!(format_speed(500), "500 bps");
        assert_eq!(format_speed(1_500), "1.50 Kbps");
        assert_eq!(format_speed(100_000_000), "100.00 Mbps");
        assert_eq!(format_speed(10_000_000_000), "10.00 Gbps");
    }

    #[test]
    fn rate_is_bytes_per_second() {
        assert_eq!(format_rate(0), "0 B/s");
        assert_eq!(format_rate(1_500_000), "1.5 MB/s");
    }

    #[test]
    fn uncolored_labels_are_bare() {
        assert_eq!(state_label(LinkState::Up, false), "UP");
        assert_eq!(state_label(LinkState::Down, false), "DOWN");
    }
}
