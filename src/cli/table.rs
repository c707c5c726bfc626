//! Plain-text tables sized to the terminal.

use std::io::IsTerminal;

use crate::cli::output::current_preferences;

const FALLBACK_WIDTH: usize = 100;
const MIN_SHRUNK_WIDTH: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            alignment: Alignment::Left,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            alignment: Alignment::Right,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Natural width of every column: the widest of header and cells.
    pub fn natural_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .chain(std::iter::once(visible_width(&column.header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Shrinks the widest left-aligned columns until the table fits `max_width`.
    pub fn fitted_widths(&self, max_width: usize) -> Vec<usize> {
        let mut widths = self.natural_widths();
        let separators = widths.len().saturating_sub(1) * 2;
        loop {
            let total: usize = widths.iter().sum::<usize>() + separators;
            if total <= max_width {
                break;
            }
            let widest = widths
                .iter()
                .enumerate()
                .filter(|(idx, width)| {
                    self.columns[*idx].alignment == Alignment::Left && **width > MIN_SHRUNK_WIDTH
                })
                .max_by_key(|(_, width)| **width)
                .map(|(idx, _)| idx);
            match widest {
                Some(idx) => widths[idx] -= 1,
                None => break,
            }
        }
        widths
    }

    pub fn render_with_width(&self, max_width: usize) -> String {
        let widths = self.fitted_widths(max_width);
        let rule_char = if current_preferences().plain { '-' } else { '─' };
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();

        let mut lines = vec![self.render_row(&headers, &widths)];
        let rule_width = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
        lines.push(rule_char.to_string().repeat(rule_width));
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }

    pub fn render(&self) -> String {
        self.render_with_width(terminal_width())
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                pad(&truncate(text, *width), *width, column.alignment)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

/// Current terminal width, or a fixed width when stdout is not a terminal.
pub fn terminal_width() -> usize {
    if !std::io::stdout().is_terminal() {
        return FALLBACK_WIDTH;
    }
    crossterm::terminal::size()
        .map(|(cols, _)| usize::from(cols))
        .unwrap_or(FALLBACK_WIDTH)
}

/// Character count ignoring ANSI colour sequences.
fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for ch in text.chars() {
        match (in_escape, ch) {
            (false, '\u{1b}') => in_escape = true,
            (true, c) if c.is_ascii_alphabetic() => in_escape = false,
            (true, _) => {}
            (false, _) => width += 1,
        }
    }
    width
}

fn truncate(text: &str, width: usize) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    // Coloured cells are never truncated mid-sequence; drop the colour instead.
    let plain: String = strip_ansi(text);
    let mut kept: String = plain.chars().take(width - 1).collect();
    kept.push('…');
    kept
}

fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_escape = false;
    for ch in text.chars() {
        match (in_escape, ch) {
            (false, '\u{1b}') => in_escape = true,
            (true, c) if c.is_ascii_alphabetic() => in_escape = false,
            (true, _) => {}
            (false, c) => out.push(c),
        }
    }
    out
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let gap = " ".repeat(width.saturating_sub(visible_width(text)));
    match alignment {
        Alignment::Left => format!("{text}{gap}"),
        Alignment::Right => format!("{gap}{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec![TableColumn::left("Category"), TableColumn::right("Total")]);
        table.push_row(vec!["Transportation".into(), "$200.00".into()]);
        table.push_row(vec!["Food".into(), "$500.00".into()]);
        table
    }

    #[test]
    fn right_aligned_columns_pad_on_the_left() {
        let rendered = sample().render_with_width(80);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Category          Total");
        assert_eq!(lines[3], "Food            $500.00");
    }

    #[test]
    fn narrow_terminals_truncate_left_columns() {
        let rendered = sample().render_with_width(18);
        assert!(rendered.contains("Transpor…"));
        assert!(rendered.contains("$200.00"));
    }

    #[test]
    fn ansi_sequences_do_not_count_toward_width() {
        assert_eq!(visible_width("\u{1b}[31mred\u{1b}[0m"), 3);
    }
}
