//! Column layout for text and Markdown tables

/// Left-align cells into columns separated by two spaces
///
/// Widths are computed on the raw cells; `paint` styles a cell after padding
/// so escape codes never skew alignment.
pub fn columns<F>(rows: &[Vec<String>], paint: F) -> String
where
    F: Fn(usize, &str) -> String,
{
    let ncols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..ncols)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for (c, cell) in row.iter().enumerate() {
            if c > 0 {
                line.push_str("  ");
            }
            let padded = if c + 1 == row.len() {
                cell.clone()
            } else {
                format!("{:<width$}", cell, width = widths[c])
            };
            line.push_str(&paint(c, &padded));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// GitHub-flavored Markdown table
pub fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = format!("| {} |\n", headers.join(" | "));
    out.push_str(&format!(
        "|{}\n",
        headers.iter().map(|_| " --- |").collect::<String>()
    ));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

/// First line of a possibly multi-line string, capped at `max` characters
pub fn first_line(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() > max {
        let cut: String = line.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}
