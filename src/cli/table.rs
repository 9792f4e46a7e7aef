//! Plain-text table layout used for account lists and statements.

use colored::Colorize;

use crate::ledger::Amount;
use crate::reporting::Row;

/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            header: header.into(),
            min_width: 0,
            max_width: None,
            alignment,
        }
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Emphasis applied to a whole rendered line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Plain,
    Title,
    Total,
    Highlight,
}

pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<(Vec<String>, LineStyle)>,
    pub padding: usize,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            padding: 1,
        }
    }

    pub fn push(&mut self, cells: Vec<String>, style: LineStyle) {
        self.rows.push((cells, style));
    }

    /// Content width of each column, bounded by the column constraints.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let mut width = visible_width(&column.header).max(column.min_width);
                for (cells, _) in &self.rows {
                    if let Some(cell) = cells.get(idx) {
                        width = width.max(visible_width(cell));
                    }
                }
                match column.max_width {
                    Some(max_width) => width.min(max_width),
                    None => width,
                }
            })
            .collect()
    }

    pub fn render_row(&self, cells: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let text = cells.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, widths[idx], column.alignment, self.padding)
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        let mut lines = vec![
            self.render_row(&header, &widths),
            horizontal_rule(&widths, self.padding),
        ];
        for (cells, style) in &self.rows {
            let line = self.render_row(cells, &widths);
            lines.push(match style {
                LineStyle::Plain => line,
                LineStyle::Title => line.bold().to_string(),
                LineStyle::Total => line.bold().to_string(),
                LineStyle::Highlight => line.bold().bright_green().to_string(),
            });
        }
        lines.join("\n")
    }
}

/// Lays out statement rows as `Ref | Libellé | Montant`.
pub fn statement_table(rows: &[Row], format_amount: impl Fn(Amount) -> String) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("Réf", Alignment::Left),
        TableColumn::new("Libellé", Alignment::Left).max_width(48),
        TableColumn::new("Montant", Alignment::Right),
    ]);
    for row in rows {
        let style = if row.highlight {
            LineStyle::Highlight
        } else if row.is_total {
            LineStyle::Total
        } else if row.is_title {
            LineStyle::Title
        } else {
            LineStyle::Plain
        };
        let label = if row.is_title || row.is_total {
            row.label.clone()
        } else {
            format!("  {}", row.label)
        };
        table.push(
            vec![
                row.reference.clone().unwrap_or_default(),
                label,
                row.value.map(&format_amount).unwrap_or_default(),
            ],
            style,
        );
    }
    table
}

fn visible_width(text: &str) -> usize {
    text.chars().count()
}

fn truncate_text(text: &str, width: usize) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

pub fn render_cell(text: &str, width: usize, alignment: Alignment, padding: usize) -> String {
    let fitted = truncate_text(text, width);
    let remaining = width.saturating_sub(visible_width(&fitted));
    let (left, right) = match alignment {
        Alignment::Left => (0, remaining),
        Alignment::Right => (remaining, 0),
    };
    format!(
        "{pad}{}{fitted}{}{pad}",
        " ".repeat(left),
        " ".repeat(right),
        pad = " ".repeat(padding)
    )
}

pub fn horizontal_rule(widths: &[usize], padding: usize) -> String {
    let total: usize =
        widths.iter().map(|w| w + padding * 2).sum::<usize>() + widths.len().saturating_sub(1);
    "─".repeat(total)
}
