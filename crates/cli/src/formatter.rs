//! Output formatting for reports and row counts.
//!
//! Supports table, JSON and CSV output.

use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde_json::{Map, Value as JsonValue};

use shoplytics_db::Table as DbTable;
use shoplytics_db::reports::ReportData;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Formatted table output.
    #[default]
    Table,
    /// JSON output.
    Json,
    /// CSV output.
    Csv,
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

/// Format the results of one or more reports.
///
/// With several reports, table and CSV output put each report under its
/// title, and JSON output is an object keyed by report name.
///
/// # Errors
///
/// Returns `serde_json::Error` if a row cannot be serialized.
pub fn format_reports(
    reports: &[ReportData],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if let [report] = reports {
        return format_report(report, format);
    }

    match format {
        OutputFormat::Json => {
            let mut object = Map::new();
            for report in reports {
                object.insert(report.kind().name().to_owned(), serde_json::to_value(report)?);
            }
            serde_json::to_string_pretty(&JsonValue::Object(object))
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let sections = reports
                .iter()
                .map(|report| {
                    let body = format_report(report, format)?;
                    Ok(format!("{}\n{body}", report.kind().title()))
                })
                .collect::<Result<Vec<_>, serde_json::Error>>()?;
            Ok(sections.join("\n\n"))
        }
    }
}

/// Format a single report.
///
/// # Errors
///
/// Returns `serde_json::Error` if a row cannot be serialized.
pub fn format_report(report: &ReportData, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(format_table(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Csv => Ok(format_csv(report)),
    }
}

fn format_table(report: &ReportData) -> String {
    let mut table = new_table();
    table.set_header(report.columns().iter().map(Cell::new));

    for row in report.rows() {
        table.add_row(row);
    }

    if report.is_empty() {
        format!("{table}\n(no rows)")
    } else {
        table.to_string()
    }
}

fn format_csv(report: &ReportData) -> String {
    let mut output = String::new();

    let header: Vec<String> = report.columns().iter().map(|c| escape_csv(c)).collect();
    output.push_str(&header.join(","));
    output.push('\n');

    for row in report.rows() {
        let values: Vec<String> = row.iter().map(|v| escape_csv(v)).collect();
        output.push_str(&values.join(","));
        output.push('\n');
    }

    output
}

/// Escapes a value for CSV output.
fn escape_csv(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Format per-table row counts; `None` renders as `N/A`.
pub fn format_counts(counts: &[(DbTable, Option<i64>)]) -> String {
    let mut table = new_table();
    table.set_header(vec![Cell::new("Table"), Cell::new("Rows")]);

    for (name, count) in counts {
        let count = count.map_or_else(|| "N/A".to_owned(), |c| c.to_string());
        table.add_row(vec![
            Cell::new(name.name()),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shoplytics_core::{CustomerId, ProductId};
    use shoplytics_db::reports::{BestSeller, RepeatCustomer};

    use super::*;

    fn best_sellers() -> ReportData {
        ReportData::BestSellers(vec![
            BestSeller {
                product_id: ProductId::new(7),
                name: "Desk Lamp, Brass".to_owned(),
                total_units_sold: 12,
            },
            BestSeller {
                product_id: ProductId::new(3),
                name: "Trail \"Pro\" Shoe".to_owned(),
                total_units_sold: 9,
            },
        ])
    }

    #[test]
    fn test_table_contains_headers_and_values() {
        let output = format_report(&best_sellers(), OutputFormat::Table).unwrap();
        assert!(output.contains("total_units_sold"));
        assert!(output.contains("Desk Lamp, Brass"));
        assert!(output.contains("12"));
    }

    #[test]
    fn test_empty_table_says_so() {
        let output = format_report(&ReportData::BestSellers(vec![]), OutputFormat::Table).unwrap();
        assert!(output.contains("(no rows)"));
    }

    #[test]
    fn test_csv_escapes_separators_and_quotes() {
        let output = format_report(&best_sellers(), OutputFormat::Csv).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "product_id,name,total_units_sold");
        assert_eq!(lines[1], "7,\"Desk Lamp, Brass\",12");
        assert_eq!(lines[2], "3,\"Trail \"\"Pro\"\" Shoe\",9");
    }

    #[test]
    fn test_json_is_array_of_rows() {
        let output = format_report(&best_sellers(), OutputFormat::Json).unwrap();
        let value: JsonValue = serde_json::from_str(&output).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["total_units_sold"], 12);
    }

    #[test]
    fn test_multiple_reports_json_keyed_by_name() {
        let repeat = ReportData::RepeatCustomers(vec![RepeatCustomer {
            customer_id: CustomerId::new(1),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            orders_count: 2,
        }]);
        let output = format_reports(&[best_sellers(), repeat], OutputFormat::Json).unwrap();
        let value: JsonValue = serde_json::from_str(&output).unwrap();
        assert_eq!(value["best-sellers"].as_array().unwrap().len(), 2);
        assert_eq!(value["repeat-customers"][0]["orders_count"], 2);
    }

    #[test]
    fn test_multiple_reports_table_has_titles() {
        let output =
            format_reports(&[best_sellers(), ReportData::BestSellers(vec![])], OutputFormat::Csv)
                .unwrap();
        let title = shoplytics_db::reports::ReportKind::BestSellers.title();
        assert_eq!(output.matches(title).count(), 2);
    }

    #[test]
    fn test_counts_show_na_for_failures() {
        let output = format_counts(&[(DbTable::Customers, Some(42)), (DbTable::Reviews, None)]);
        assert!(output.contains("Customers"));
        assert!(output.contains("42"));
        assert!(output.contains("Reviews"));
        assert!(output.contains("N/A"));
    }
}
