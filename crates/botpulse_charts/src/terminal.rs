use crate::config::ChartConfig;
use crate::surface::{RenderError, Surface};
use prettytable::format::consts::FORMAT_BOX_CHARS;
use prettytable::{Cell, Row, Table};
use std::io::{self, Write};

/// Draws a chart as a text table: one row per category plus a total.
pub struct TerminalSurface<W: Write> {
    id: String,
    writer: W,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout(id: impl Into<String>) -> Self {
        Self::new(id, io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(id: impl Into<String>, writer: W) -> Self {
        Self {
            id: id.into(),
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn id(&self) -> &str {
        &self.id
    }

    fn draw(&mut self, chart: &ChartConfig) -> Result<(), RenderError> {
        let total: u64 = chart.points().map(|(_, value)| value).sum();

        let mut table = Table::new();
        table.set_format(*FORMAT_BOX_CHARS);
        table.set_titles(Row::new(vec![
            Cell::new(chart.title()),
            Cell::new("Count"),
            Cell::new("Share"),
        ]));

        for (label, value) in chart.points() {
            table.add_row(Row::new(vec![
                Cell::new(label),
                Cell::new(&value.to_string()),
                Cell::new(&share(value, total)),
            ]));
        }
        table.add_row(Row::new(vec![
            Cell::new("Total"),
            Cell::new(&total.to_string()),
            Cell::new(if total == 0 { "0.0%" } else { "100.0%" }),
        ]));

        writeln!(self.writer, "{} ({} chart)", self.id, chart.kind)?;
        table.print(&mut self.writer)?;
        writeln!(self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}

fn share(value: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value as f64 * 100.0 / total as f64)
}
