use crate::builder::ScheduleOutcome;
use polars::prelude::{AnyValue, DataFrame};
use std::fmt::Write as _;
use std::io;

const RULE: &str = "===============================================================";

/// Human-readable dump of a build: warnings first, then every year and term.
pub fn render_schedule(outcome: &ScheduleOutcome) -> String {
    let mut out = String::new();
    let schedule = &outcome.schedule;

    if !outcome.quota_met {
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(
            out,
            "Warning: Total credits are less than {} ({}), schedule may be incomplete.",
            schedule.limits().graduation_quota,
            outcome.catalog_credits
        );
        let _ = writeln!(out, "{RULE}");
    }
    if !outcome.unplaced.is_empty() {
        let _ = writeln!(
            out,
            "Warning: Not all courses could be added to the schedule. Remaining courses: {}",
            outcome.unplaced.join(", ")
        );
    }
    if !outcome.quota_met || !outcome.unplaced.is_empty() {
        out.push('\n');
    }

    for year in schedule.years() {
        let _ = writeln!(out, "Year {:02}", year.year());
        for slot in year.slots() {
            let courses = if slot.is_empty() {
                "-".to_string()
            } else {
                slot.courses()
                    .iter()
                    .map(|course| format!("{} ({})", course.label, course.credits))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let _ = writeln!(
                out,
                "  {} ({} credits): {}",
                slot.term(),
                slot.total_credits(),
                courses
            );
        }
        out.push('\n');
    }

    out
}

pub fn write_schedule<W: io::Write>(outcome: &ScheduleOutcome, mut writer: W) -> io::Result<()> {
    writer.write_all(render_schedule(outcome).as_bytes())?;
    writer.flush()
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Boxed text table for catalog and schedule frames.
pub fn render_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| {
                col.get(row_idx)
                    .map(|value| cell_text(&value))
                    .unwrap_or_default()
            })
            .collect();
        rows.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.len());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &col_names, &widths);
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(width.saturating_sub(cell.len())));
        out.push_str(" |");
    }
    out.push('\n');
}
