//! Output rendering shared by the commands.

use serde::Serialize;

use crate::{CliError, Result};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Box-drawn table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values with a header row
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json, csv",
                other
            ))),
        }
    }
}

/// A grid of pre-formatted cells under a header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty, extra cells are dropped.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render with box-drawing characters. The first column is left
    /// aligned, the others right aligned.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}\n", left, segments.join(mid), right)
        };
        let line = |cells: &[String]| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, &w))| {
                    if i == 0 {
                        format!(" {:<w$} ", cell, w = w)
                    } else {
                        format!(" {:>w$} ", cell, w = w)
                    }
                })
                .collect();
            format!("│{}│\n", padded.join("│"))
        };

        let mut out = rule("┌", "┬", "┐");
        out.push_str(&line(&self.headers));
        out.push_str(&rule("├", "┼", "┤"));
        for row in &self.rows {
            out.push_str(&line(row));
        }
        out.push_str(&rule("└", "┴", "┘"));
        out
    }

    /// Render as CSV with a header row.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| CliError::Io(std::io::Error::new(e.error().kind(), e.to_string())))?;
        String::from_utf8(bytes)
            .map_err(|e| CliError::InvalidArgument(format!("CSV output is not UTF-8: {}", e)))
    }
}

/// Render `table` or `value` according to `format`.
pub fn render<T: Serialize>(format: OutputFormat, table: &Table, value: &T) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table.render()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)? + "\n"),
        OutputFormat::Csv => table.to_csv(),
    }
}

/// Render several tables, separated by a blank line, or `value` as JSON.
pub fn render_all<T: Serialize>(
    format: OutputFormat,
    tables: &[Table],
    value: &T,
) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(value)? + "\n");
    }
    let sections = tables
        .iter()
        .map(|t| render(format, t, value))
        .collect::<Result<Vec<String>>>()?;
    Ok(sections.join("\n"))
}

/// Format a monetary amount with two decimals.
pub fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a weight as a whole percentage.
pub fn percent(weight: f64) -> String {
    format!("{:.0}%", weight * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["Item", "Value"]);
        table.push_row(["Price", "891.43"]);
        table.push_row(["Scaling factor", "0.530928"]);
        table
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(err.to_string().contains("Unknown format: xml"));
    }

    #[test]
    fn test_table_render() {
        let rendered = sample().render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "┌────────────────┬──────────┐");
        assert_eq!(lines[1], "│ Item           │    Value │");
        assert_eq!(lines[3], "│ Price          │   891.43 │");
        assert_eq!(lines[5], "└────────────────┴──────────┘");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(["A", "B", "C"]);
        table.push_row(["x"]);
        assert_eq!(table.to_csv().unwrap(), "A,B,C\nx,,\n");
    }

    #[test]
    fn test_csv_output() {
        let csv = sample().to_csv().unwrap();
        assert_eq!(csv, "Item,Value\nPrice,891.43\nScaling factor,0.530928\n");
    }

    #[test]
    fn test_render_dispatch() {
        let json = render(OutputFormat::Json, &sample(), &vec![1, 2]).unwrap();
        assert_eq!(json, "[\n  1,\n  2\n]\n");
    }

    #[test]
    fn test_render_all_separates_sections() {
        let mut second = Table::new(["X"]);
        second.push_row(["1"]);
        let csv = render_all(OutputFormat::Csv, &[sample(), second], &()).unwrap();
        assert!(csv.ends_with("0.530928\n\nX\n1\n"));
    }

    #[test]
    fn test_helpers() {
        assert_eq!(money(900.0), "900.00");
        assert_eq!(percent(0.05), "5%");
    }
}
