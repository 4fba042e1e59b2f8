/// Renders rows as a pipe table. The first row is the header; shorter rows
/// are padded with empty cells.
pub fn table(rows: &[Vec<String>]) -> String {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (index, row) in rows.iter().enumerate() {
        let cells: Vec<String> = (0..width)
            .map(|i| row.get(i).map(|cell| escape_cell(cell)).unwrap_or_default())
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));

        if index == 0 {
            lines.push(format!("|{}", " --- |".repeat(width)));
        }
    }

    lines.join("\n")
}

fn escape_cell(cell: &str) -> String {
    cell.trim()
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

/// Strips trailing whitespace from every line and collapses runs of blank
/// lines to a single one.
///
/// Blank lines at the end are removed rather than collapsed: at most one
/// final newline survives, and only when the input ended with one. So
/// `"a\n\n\n"` becomes `"a\n"` and whitespace-only input becomes `""`, where a
/// plain `\n{3,}` collapse would keep `"a\n\n"` and `"\n\n"`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    let trimmed_len = out.trim_end_matches('\n').len();
    let keep_newline = text.ends_with('\n') && trimmed_len > 0;
    out.truncate(trimmed_len);
    if keep_newline {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_table_pads_ragged_rows() {
        let rows = vec![row(&["name", "qty"]), row(&["apple"]), row(&["pear", "3", "x"])];

        assert_eq!(
            table(&rows),
            "| name | qty |  |\n| --- | --- | --- |\n| apple |  |  |\n| pear | 3 | x |"
        );
    }

    #[test]
    fn test_table_escapes_pipes_and_newlines() {
        let rows = vec![row(&["a|b"]), row(&["line1\nline2"])];
        assert_eq!(table(&rows), "| a\\|b |\n| --- |\n| line1 line2 |");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(table(&[]), "");
        assert_eq!(table(&[Vec::new()]), "");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a  \n\n\n\nb\t\n"), "a\n\nb\n");
        assert_eq!(normalize("plain"), "plain");
        assert_eq!(normalize("\n\n"), "");
        assert_eq!(normalize("a\n\n\n"), "a\n");
        assert_eq!(normalize("a \n \n"), "a\n");
        assert_eq!(normalize("x\r\ny"), "x\ny");
    }
}
