//! Low-level writer for analysis reports.
//!
//! The writer produces, in order: the caution area (conflict list or
//! resolution notice), the expression count, and the variable table.
use super::config::{ReportOptions, TableStyle};
use super::session::CautionState;
use crate::analysis::{AnalysisReport, Row};
use crate::common::Result;
use std::fmt::Write as FmtWrite;

static HEADERS: [&str; 3] = ["Variable", "Quantity", "Snippet"];
const EMPTY_TABLE: &str = "No LaTeX variables were detected.";

/// Render a report to a string.
pub fn render(report: &AnalysisReport, caution: &CautionState, options: &ReportOptions) -> Result<String> {
    let mut writer = ReportWriter::new(options);
    writer.write_caution(caution)?;
    writer.write_status(report.expression_count)?;
    writer.write_table(report)?;
    Ok(writer.finish())
}

/// Serialize a report as pretty-printed JSON.
pub fn to_json(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// One rendered table cell.
struct Cell {
    text: String,
    conflict: bool,
}

pub(crate) struct ReportWriter<'a> {
    /// The output buffer
    buffer: String,
    options: &'a ReportOptions,
}

impl<'a> ReportWriter<'a> {
    pub fn new(options: &'a ReportOptions) -> Self {
        Self {
            buffer: String::with_capacity(1024),
            options,
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn write_caution(&mut self, caution: &CautionState) -> Result<()> {
        match caution {
            CautionState::Conflicts(messages) => {
                self.buffer.push_str("Warnings:\n");
                for message in messages {
                    writeln!(self.buffer, "- {}", message)?;
                }
                self.buffer.push('\n');
            },
            CautionState::Resolved(message) => {
                writeln!(self.buffer, "{}\n", message)?;
            },
            CautionState::Clear => {},
        }
        Ok(())
    }

    pub fn write_status(&mut self, expression_count: usize) -> Result<()> {
        writeln!(self.buffer, "LaTeX expressions detected: {}\n", expression_count)?;
        Ok(())
    }

    pub fn write_table(&mut self, report: &AnalysisReport) -> Result<()> {
        let result = &report.result;
        if result.rows.is_empty() {
            self.buffer.push_str(EMPTY_TABLE);
            self.buffer.push('\n');
            return Ok(());
        }

        let rows: Vec<Vec<Cell>> = result
            .rows
            .iter()
            .map(|row| self.cells(row, result.is_row_conflicting(row)))
            .collect();

        match self.options.table_style {
            TableStyle::Plain => self.write_plain_table(&rows),
            TableStyle::Markdown => self.write_markdown_table(&rows),
        }
    }

    fn headers(&self) -> &'static [&'static str] {
        if self.options.include_snippets {
            &HEADERS
        } else {
            &HEADERS[..2]
        }
    }

    fn cells(&self, row: &Row, conflict: bool) -> Vec<Cell> {
        let quantity = if row.is_unknown() {
            self.options.unknown_label.clone()
        } else {
            row.quantity.clone()
        };

        let mut cells = vec![
            Cell { text: row.variable.clone(), conflict },
            Cell { text: quantity, conflict },
        ];
        if self.options.include_snippets {
            cells.push(Cell {
                text: row.snippet.clone(),
                conflict: false,
            });
        }
        cells
    }

    fn plain_cell(cell: &Cell) -> String {
        if cell.conflict {
            format!("{}!", cell.text)
        } else {
            cell.text.clone()
        }
    }

    fn write_plain_table(&mut self, rows: &[Vec<Cell>]) -> Result<()> {
        let headers = self.headers();
        let rendered: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(Self::plain_cell).collect())
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &rendered {
            for (width, text) in widths.iter_mut().zip(row) {
                *width = (*width).max(text.chars().count());
            }
        }

        let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        self.write_plain_line(&header_cells, &widths)?;
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        self.write_plain_line(&rule, &widths)?;
        for row in &rendered {
            self.write_plain_line(row, &widths)?;
        }
        Ok(())
    }

    fn write_plain_line(&mut self, cells: &[String], widths: &[usize]) -> Result<()> {
        let last = cells.len().saturating_sub(1);
        for (i, (text, &width)) in cells.iter().zip(widths).enumerate() {
            if i == last {
                self.buffer.push_str(text);
            } else {
                write!(self.buffer, "{:<width$}  ", text, width = width)?;
            }
        }
        self.buffer.push('\n');
        Ok(())
    }

    fn write_markdown_table(&mut self, rows: &[Vec<Cell>]) -> Result<()> {
        // Write header row
        self.buffer.push('|');
        for header in self.headers() {
            write!(self.buffer, " {} |", header)?;
        }
        self.buffer.push('\n');

        // Write separator row
        self.buffer.push('|');
        for _ in self.headers() {
            self.buffer.push_str("----------|");
        }
        self.buffer.push('\n');

        // Write data rows
        for row in rows {
            self.buffer.push('|');
            for cell in row {
                let escaped = cell.text.replace('|', "\\|").replace('\n', " ");
                if cell.conflict {
                    write!(self.buffer, " **{}** |", escaped)?;
                } else {
                    write!(self.buffer, " {} |", escaped)?;
                }
            }
            self.buffer.push('\n');
        }
        Ok(())
    }
}
