//! Output formatting for range and position results.
//!
//! Range results render as a fixed-width table, JSON, or CSV. Each format has
//! a multi-system variant used by `--system all`.

use std::fmt::{Display, Write};

use anyhow::Result;
use serde::{Serialize, Serializer};
use zt_core::Interval;
use zt_ephem::{SignPosition, format_dms};

/// One interval, flattened for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeRecord {
    pub start_date: String,
    pub start_time: Option<String>,
    pub end_date: String,
    pub end_time: Option<String>,
    pub sign: String,
    pub duration_days: f64,
}

impl RangeRecord {
    /// Times are only carried at minute precision.
    pub fn from_interval<L: Display>(interval: &Interval<L>, include_time: bool) -> Self {
        let time = |t: chrono::DateTime<chrono::Utc>| {
            include_time.then(|| t.format("%H:%M").to_string())
        };
        Self {
            start_date: interval.start.format("%Y-%m-%d").to_string(),
            start_time: time(interval.start),
            end_date: interval.end.format("%Y-%m-%d").to_string(),
            end_time: time(interval.end),
            sign: interval.label.to_string(),
            duration_days: (interval.duration_days() * 100.0).round() / 100.0,
        }
    }

    fn start(&self) -> String {
        join_date_time(&self.start_date, self.start_time.as_deref())
    }

    fn end(&self) -> String {
        join_date_time(&self.end_date, self.end_time.as_deref())
    }
}

fn join_date_time(date: &str, time: Option<&str>) -> String {
    time.map_or_else(|| date.to_string(), |time| format!("{date} {time}"))
}

/// The records found by one zodiac system.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemRanges {
    pub system: String,
    pub records: Vec<RangeRecord>,
}

// ========== Table ==========

fn table_header() -> String {
    format!("Start{}End{}Duration (days)", " ".repeat(12), " ".repeat(14))
}

fn write_table(output: &mut String, records: &[RangeRecord]) {
    if records.is_empty() {
        output.push_str("No ranges found.");
        return;
    }

    let header = table_header();
    let rule = "-".repeat(header.chars().count());
    writeln!(output, "{header}").unwrap();
    writeln!(output, "{rule}").unwrap();
    for record in records {
        writeln!(
            output,
            "{:<17} {:<17} {:>10.1}",
            record.start(),
            record.end(),
            record.duration_days
        )
        .unwrap();
    }
    writeln!(output, "{rule}").unwrap();
    write!(output, "Total ranges: {}", records.len()).unwrap();
}

/// Human-readable table for one system.
pub fn table(records: &[RangeRecord]) -> String {
    let mut output = String::new();
    write_table(&mut output, records);
    output
}

/// One table per system, each under a `=== system ===` heading.
pub fn multi_table(results: &[SystemRanges]) -> String {
    let mut output = String::new();
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            output.push_str("\n\n");
        }
        writeln!(output, "=== {} ===", result.system).unwrap();
        write_table(&mut output, &result.records);
    }
    output
}

// ========== JSON ==========

pub fn json(records: &[RangeRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Object keyed by system name, in search order.
struct BySystem<'a>(&'a [SystemRanges]);

impl Serialize for BySystem<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|r| (&r.system, &r.records)))
    }
}

pub fn multi_json(results: &[SystemRanges]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&BySystem(results))?)
}

// ========== CSV ==========

const CSV_HEADER: [&str; 6] = [
    "start_date",
    "start_time",
    "end_date",
    "end_time",
    "sign",
    "duration_days",
];

/// Quotes a field when it contains a delimiter, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row(output: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
    writeln!(output, "{}", row.join(",")).unwrap();
}

fn csv_record(output: &mut String, system: Option<&str>, record: &RangeRecord) {
    let duration = format!("{:.2}", record.duration_days);
    let mut fields = Vec::with_capacity(7);
    fields.extend(system);
    fields.extend([
        record.start_date.as_str(),
        record.start_time.as_deref().unwrap_or_default(),
        record.end_date.as_str(),
        record.end_time.as_deref().unwrap_or_default(),
        record.sign.as_str(),
        duration.as_str(),
    ]);
    csv_row(output, &fields);
}

pub fn csv(records: &[RangeRecord]) -> String {
    let mut output = String::new();
    csv_row(&mut output, &CSV_HEADER);
    for record in records {
        csv_record(&mut output, None, record);
    }
    output
}

/// CSV with a leading `system` column.
pub fn multi_csv(results: &[SystemRanges]) -> String {
    let mut output = String::new();
    let mut header = vec!["system"];
    header.extend(CSV_HEADER);
    csv_row(&mut output, &header);
    for result in results {
        for record in &result.records {
            csv_record(&mut output, Some(&result.system), record);
        }
    }
    output
}

// ========== Positions ==========

/// One line describing a position, e.g.
/// `Tropical: Aquarius (5°30' in sign, 305°30'45.00" absolute)`.
pub fn sign_line<L: Display>(system: &str, position: &SignPosition<L>) -> String {
    let absolute = position.format_longitude(2);
    match position.longitude_in_sign {
        Some(in_sign) => format!(
            "{system}: {} ({} in sign, {absolute} absolute)",
            position.sign,
            format_dms(in_sign, 1)
        ),
        None => format!("{system}: {} ({absolute})", position.sign),
    }
}
