//! Plain text and JSON rendering of the user table.

use crate::{edit::RowState, manager::Row};
use serde::Serialize;
use std::{fmt::Write as _, str::FromStr};

const HEADERS: [&str; 7] = [
    "ID",
    "First Name",
    "Last Name",
    "Email",
    "Company",
    "Phone",
    "State",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unsupported output format: {other}")),
        }
    }
}

#[derive(Serialize)]
struct JsonView<'a> {
    users: &'a [Row],
    error: Option<&'a str>,
}

/// Renders rows and the current error message in the requested format.
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render(
    rows: &[Row],
    error: Option<&str>,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(render_table(rows, error)),
        OutputFormat::Json => serde_json::to_string_pretty(&JsonView { users: rows, error }),
    }
}

#[must_use]
pub fn render_table(rows: &[Row], error: Option<&str>) -> String {
    let cells: Vec<[String; 7]> = rows.iter().map(row_cells).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(ToString::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    if rows.is_empty() {
        out.push_str("(no users)\n");
    }
    if let Some(message) = error {
        let _ = writeln!(out, "error: {message}");
    }
    out
}

fn row_cells(row: &Row) -> [String; 7] {
    let record = &row.record;
    let state = match &row.state {
        RowState::Viewing => String::new(),
        RowState::Editing { error: None } => "editing".to_string(),
        RowState::Editing { error: Some(_) } => "editing (save failed)".to_string(),
    };
    [
        record.id.to_string(),
        record.first_name.clone(),
        record.last_name.clone(),
        record.email.clone(),
        record.company.clone(),
        record.phone.clone().unwrap_or_default(),
        state,
    ]
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
