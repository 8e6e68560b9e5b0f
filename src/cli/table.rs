//! # ASCII Table Formatter
//!
//! Renders query results as ASCII tables with box-drawing characters:
//!
//! ```text
//! +----+-------+
//! | c0 | c1    |
//! +----+-------+
//! |  1 | alice |
//! |  2 | bob   |
//! +----+-------+
//! ```
//!
//! Column headers are the positional names `c0..cN` for the widest row in
//! the result. Integers are right-aligned, text is left-aligned, and rows
//! shorter than the widest one render empty trailing cells.

use std::fmt::Write;

use crate::record::Value;

pub struct TableFormatter {
    headers: Vec<String>,
    widths: Vec<usize>,
    rows: Vec<Vec<Cell>>,
}

struct Cell {
    text: String,
    numeric: bool,
}

impl TableFormatter {
    pub fn new(rows: &[Vec<Value>]) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let headers: Vec<String> = (0..columns).map(|i| format!("c{}", i)).collect();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

        let formatted_rows: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| {
                (0..columns)
                    .map(|i| {
                        let cell = match row.get(i) {
                            Some(value) => Cell {
                                text: value.to_string(),
                                numeric: matches!(value, Value::Integer(_)),
                            },
                            None => Cell {
                                text: String::new(),
                                numeric: false,
                            },
                        };
                        widths[i] = widths[i].max(cell.text.len());
                        cell
                    })
                    .collect()
            })
            .collect();

        Self {
            headers,
            widths,
            rows: formatted_rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn render(&self) -> String {
        if self.headers.is_empty() {
            return String::new();
        }

        let mut output = String::new();

        self.write_separator(&mut output);
        self.write_header_row(&mut output);
        self.write_separator(&mut output);
        for row in &self.rows {
            self.write_data_row(&mut output, row);
        }
        self.write_separator(&mut output);

        output
    }

    fn write_separator(&self, output: &mut String) {
        output.push('+');
        for width in &self.widths {
            for _ in 0..(*width + 2) {
                output.push('-');
            }
            output.push('+');
        }
        output.push('\n');
    }

    fn write_header_row(&self, output: &mut String) {
        output.push('|');
        for (header, width) in self.headers.iter().zip(&self.widths) {
            let _ = write!(output, " {:<width$} |", header, width = width);
        }
        output.push('\n');
    }

    fn write_data_row(&self, output: &mut String, row: &[Cell]) {
        output.push('|');
        for (cell, width) in row.iter().zip(&self.widths) {
            if cell.numeric {
                let _ = write!(output, " {:>width$} |", cell.text, width = width);
            } else {
                let _ = write!(output, " {:<width$} |", cell.text, width = width);
            }
        }
        output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_aligned_columns() {
        let rows = vec![
            vec![Value::Integer(1), Value::Text("alice".to_string())],
            vec![Value::Integer(20), Value::Text("bob".to_string())],
        ];

        let formatter = TableFormatter::new(&rows);
        let rendered = formatter.render();

        assert_eq!(
            rendered,
            "+----+-------+\n\
             | c0 | c1    |\n\
             +----+-------+\n\
             |  1 | alice |\n\
             | 20 | bob   |\n\
             +----+-------+\n"
        );
        assert_eq!(formatter.row_count(), 2);
    }

    #[test]
    fn ragged_rows_render_empty_cells() {
        let rows = vec![
            vec![Value::Integer(1)],
            vec![Value::Integer(2), Value::Text("two".to_string())],
        ];

        let rendered = TableFormatter::new(&rows).render();
        assert!(rendered.contains("|  1 |     |"));
    }

    #[test]
    fn empty_result_renders_nothing() {
        let formatter = TableFormatter::new(&[]);
        assert_eq!(formatter.render(), "");
        assert_eq!(formatter.row_count(), 0);
    }
}
