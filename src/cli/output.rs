//! Output formatting for the CLI

use clap::ValueEnum;
use serde::Serialize;

use crate::error::ArchiveResult;
use crate::facade::{EventView, StatsView};
use crate::types::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Text,
    /// The same JSON the HTTP API returns
    Json,
}

impl OutputFormat {
    pub fn is_text(&self) -> bool {
        matches!(self, OutputFormat::Text)
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> ArchiveResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

const LIST_COLUMNS: [(&str, usize); 5] = [
    ("ID", 5),
    ("TITLE", 36),
    ("CATEGORY", 10),
    ("IMPORTANCE", 10),
    ("DATE", 10),
];

/// Render events as a table, one row per event
pub fn render_event_table(events: &[Event]) -> String {
    let mut out = render_row(&LIST_COLUMNS.map(|(name, width)| (name.to_string(), width)));
    for event in events {
        let view = EventView::from(event);
        out.push_str(&render_row(&[
            (view.id, LIST_COLUMNS[0].1),
            (view.title, LIST_COLUMNS[1].1),
            (view.category, LIST_COLUMNS[2].1),
            (view.importance, LIST_COLUMNS[3].1),
            (view.date, LIST_COLUMNS[4].1),
        ]));
    }
    out
}

/// Render a single event as label/value lines
pub fn render_event_detail(event: &Event) -> String {
    let view = EventView::from(event);
    view.fields()
        .into_iter()
        .map(|(label, value)| format!("{:<13} {}\n", format!("{}:", label), value))
        .collect()
}

pub fn render_stats(view: &StatsView) -> String {
    view.rows
        .iter()
        .map(|(label, count)| format!("{:<14} {:>6}\n", label, count))
        .collect()
}

fn render_row(cells: &[(String, usize)]) -> String {
    let line = cells
        .iter()
        .map(|(value, width)| format!("{:<width$}", truncate(value, *width), width = width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let kept: String = value.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
