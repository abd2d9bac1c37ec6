//! Table rendering for listings.

/// Table rendering style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    #[default]
    Plain,
    Bordered,
}

/// Column alignment.
#[derive(Debug, Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// Picks an ANSI color for a cell from its text.
pub type CellPainter = fn(&str) -> Option<&'static str>;

/// Table column definition.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub alignment: Alignment,
    pub max_width: Option<usize>,
    pub painter: Option<CellPainter>,
}

impl Column {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            alignment: Alignment::Left,
            max_width: None,
            painter: None,
        }
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Color cells of this column after padding.
    pub fn painted(mut self, painter: CellPainter) -> Self {
        self.painter = Some(painter);
        self
    }
}

/// Rows of text under a fixed set of columns.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    style: TableStyle,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            style: TableStyle::default(),
        }
    }

    pub fn style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn add_row(&mut self, row: Vec<impl Into<String>>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let content = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| text_width(cell))
                    .max()
                    .unwrap_or(0);
                let width = content.max(text_width(&col.header));
                col.max_width.map_or(width, |max| width.min(max))
            })
            .collect()
    }

    /// Render the table. `color` bolds headers and applies column painters.
    pub fn render(&self, color: bool) -> String {
        let widths = self.widths();
        let mut output = String::new();
        match self.style {
            TableStyle::Plain => self.render_plain(&mut output, &widths, color),
            TableStyle::Bordered => self.render_bordered(&mut output, &widths, color),
        }
        output
    }

    fn header_cells(&self, widths: &[usize], color: bool) -> Vec<String> {
        self.columns
            .iter()
            .zip(widths)
            .map(|(col, &w)| {
                let cell = pad(&col.header, w, col.alignment);
                if color {
                    format!("\x1b[1m{cell}\x1b[0m")
                } else {
                    cell
                }
            })
            .collect()
    }

    fn row_cells(&self, row: &[String], widths: &[usize], color: bool) -> Vec<String> {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (col, &w))| {
                let raw = row.get(i).map(String::as_str).unwrap_or("");
                let cell = pad(raw, w, col.alignment);
                match col.painter.and_then(|p| p(raw)) {
                    Some(ansi) if color => format!("\x1b[{ansi}m{cell}\x1b[0m"),
                    _ => cell,
                }
            })
            .collect()
    }

    fn render_plain(&self, output: &mut String, widths: &[usize], color: bool) {
        output.push_str(self.header_cells(widths, color).join("  ").trim_end());
        output.push('\n');

        let sep: Vec<_> = widths.iter().map(|&w| "-".repeat(w)).collect();
        output.push_str(&sep.join("  "));
        output.push('\n');

        for row in &self.rows {
            output.push_str(self.row_cells(row, widths, color).join("  ").trim_end());
            output.push('\n');
        }
    }

    fn render_bordered(&self, output: &mut String, widths: &[usize], color: bool) {
        let rule = |output: &mut String, left: &str, mid: &str, right: &str| {
            let parts: Vec<_> = widths.iter().map(|&w| "─".repeat(w + 2)).collect();
            output.push_str(left);
            output.push_str(&parts.join(mid));
            output.push_str(right);
            output.push('\n');
        };
        let line = |output: &mut String, cells: Vec<String>| {
            output.push('│');
            for cell in cells {
                output.push_str(&format!(" {cell} │"));
            }
            output.push('\n');
        };

        rule(output, "┌", "┬", "┐");
        line(output, self.header_cells(widths, color));
        rule(output, "├", "┼", "┤");
        for row in &self.rows {
            line(output, self.row_cells(row, widths, color));
        }
        rule(output, "└", "┴", "┘");
    }
}

/// Display width in characters; labels carry accents like "Válido".
fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn pad(content: &str, width: usize, alignment: Alignment) -> String {
    let content: String = if text_width(content) > width {
        let kept: String = content.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        content.to_string()
    };

    match alignment {
        Alignment::Left => format!("{content:<width$}"),
        Alignment::Right => format!("{content:>width$}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_plain() {
        let mut table = Table::new(vec![Column::new("Tipo"), Column::new("Dias").align(Alignment::Right)]);
        table.add_row(vec!["cnd_fgts", "4"]);
        table.add_row(vec!["estatuto", ""]);

        let output = table.render(false);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "Tipo      Dias");
        assert_eq!(lines[1], "--------  ----");
        assert_eq!(lines[2], "cnd_fgts     4");
        assert_eq!(lines[3], "estatuto");
    }

    #[test]
    fn test_accented_cells_align() {
        let mut table = Table::new(vec![Column::new("Status"), Column::new("X")]);
        table.add_row(vec!["Válido", "a"]);
        table.add_row(vec!["Vencendo", "b"]);

        let output = table.render(false);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[2].chars().count(), lines[3].chars().count());
    }

    #[test]
    fn test_max_width_truncates() {
        let mut table = Table::new(vec![Column::new("Nome").max_width(10)]);
        table.add_row(vec!["Certidão Negativa de Débitos"]);
        let output = table.render(false);
        assert!(output.contains("Certidã..."));
    }

    #[test]
    fn test_painter_only_with_color() {
        fn red(_: &str) -> Option<&'static str> {
            Some("31")
        }
        let mut table = Table::new(vec![Column::new("Status").painted(red)]);
        table.add_row(vec!["Vencido"]);

        assert!(!table.render(false).contains("\x1b[31m"));
        assert!(table.render(true).contains("\x1b[31mVencido"));
    }

    #[test]
    fn test_bordered() {
        let mut table = Table::new(vec![Column::new("A"), Column::new("B")]).style(TableStyle::Bordered);
        table.add_row(vec!["1", "2"]);
        let output = table.render(false);
        assert!(output.starts_with("┌"));
        assert!(output.contains("│ 1 │ 2 │"));
        assert!(output.trim_end().ends_with("┘"));
    }
}
