//! Table rendering.
//!
//! Every cell is rendered through the general tree walker, stripped of line
//! breaks, and measured. All columns then share one width: the longest cell
//! plus one, but never less than the configured minimum. Cells are rendered
//! exactly once, so images inside tables are extracted once.

use crate::error::Result;
use crate::ir::NodeId;

use super::escape::strip_line_breaks;
use super::render::RenderContext;

/// Lay out rendered cell contents as a Markdown table.
///
/// A header separator is written before the second row, one segment per
/// cell of that row. A single-row table has no separator.
///
/// # Examples
///
/// ```
/// use mdmaker::markdown::layout_table;
///
/// let rows = vec![
///     vec!["Name".to_string(), "Qty".to_string()],
///     vec!["Apple".to_string(), "3".to_string()],
/// ];
/// assert_eq!(
///     layout_table(&rows, 6),
///     "| Name  | Qty    |\n|-------|--------|\n| Apple | 3      |\n\n"
/// );
/// ```
pub fn layout_table(rows: &[Vec<String>], min_width: usize) -> String {
    let measured = rows
        .iter()
        .flatten()
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0);
    let width = min_width.max(measured + 1);

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        if i == 1 {
            for _ in row {
                out.push_str("|-");
                out.push_str(&"-".repeat(width));
            }
            out.push_str("-|\n");
        }

        for cell in row {
            out.push_str("| ");
            out.push_str(cell);
            let len = cell.chars().count();
            if width > len {
                out.push_str(&" ".repeat(width - len));
            }
        }
        out.push_str(" |\n");
    }
    out.push('\n');
    out
}

impl RenderContext<'_> {
    pub(super) fn render_table(&mut self, id: NodeId) -> Result<()> {
        let tree = self.tree;

        let mut rows = Vec::new();
        for row_id in tree.children(id) {
            let mut cells = Vec::new();
            for cell_id in tree.children(row_id) {
                let rendered = self.render_children_to_string(cell_id)?;
                cells.push(strip_line_breaks(&rendered).into_owned());
            }
            rows.push(cells);
        }

        self.output.push('\n');
        self.output
            .push_str(&layout_table(&rows, self.config.min_table_width));
        self.output.push('\n');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_minimum_width() {
        let rows = vec![cells(&["a", "b"]), cells(&["c", "d"])];
        let table = layout_table(&rows, 10);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines[0], format!("| a{0}| b{0} |", " ".repeat(9)));
        assert_eq!(lines[1], format!("|-{0}|-{0}-|", "-".repeat(10)));
        assert_eq!(lines[2], format!("| c{0}| d{0} |", " ".repeat(9)));
    }

    #[test]
    fn test_width_follows_longest_cell() {
        let long = "a considerably longer cell";
        let rows = vec![cells(&["h1", "h2"]), cells(&[long, "x"])];
        let table = layout_table(&rows, 10);
        let width = long.len() + 1;

        let first = table.lines().next().unwrap();
        assert_eq!(first, format!("| h1{}| h2{} |", " ".repeat(width - 2), " ".repeat(width - 2)));
        assert!(table.contains(&format!("| {long} | x")));
    }

    #[test]
    fn test_single_row_has_no_separator() {
        let rows = vec![cells(&["only"])];
        assert!(!layout_table(&rows, 10).contains("|-"));
    }

    #[test]
    fn test_separator_segments_match_second_row() {
        let rows = vec![cells(&["a", "b", "c"]), cells(&["1", "2", "3"])];
        let table = layout_table(&rows, 10);
        let separator = table.lines().nth(1).unwrap();
        assert_eq!(separator.matches("|-").count(), 3);
        assert!(separator.ends_with("-|"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(layout_table(&[], 10), "\n");
    }
}
