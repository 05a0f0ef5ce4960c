//! Table renderer
//!
//! Renders history as a bordered, 1-indexed text table:
//!
//! ```text
//! +---+-----------+-----------+-----------+--------+
//! |   | Operation | Operand 1 | Operand 2 | Result |
//! +---+-----------+-----------+-----------+--------+
//! | 1 | addition  |    5.0    |    5.0    |  10.0  |
//! +---+-----------+-----------+-----------+--------+
//! ```

use crate::store::HEADER;
use crate::HistoryEntry;

/// Render entries as a table. Duplicate rows are dropped before numbering.
/// Returns `None` when there is nothing to show.
pub fn render_table(entries: &[HistoryEntry]) -> Option<String> {
    let mut unique: Vec<&HistoryEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if !unique.contains(&entry) {
            unique.push(entry);
        }
    }
    if unique.is_empty() {
        return None;
    }

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(unique.len() + 1);
    rows.push(std::iter::once(String::new())
        .chain(HEADER.iter().map(|h| h.to_string()))
        .collect());
    for (idx, entry) in unique.iter().enumerate() {
        rows.push(std::iter::once((idx + 1).to_string())
            .chain(entry.cells())
            .collect());
    }

    let widths: Vec<usize> = (0..rows[0].len())
        .map(|col| rows.iter().map(|r| r[col].chars().count()).max().unwrap_or(0))
        .collect();

    let border = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line
    };

    let mut output = String::new();
    output.push_str(&border);
    output.push('\n');
    for (i, row) in rows.iter().enumerate() {
        output.push('|');
        for (cell, w) in row.iter().zip(&widths) {
            output.push(' ');
            // Header left as-is, operation names left-aligned, numbers centered
            output.push_str(&pad(cell, *w, i > 0 && cell.parse::<f64>().is_ok()));
            output.push_str(" |");
        }
        output.push('\n');
        if i == 0 {
            output.push_str(&border);
            output.push('\n');
        }
    }
    output.push_str(&border);
    Some(output)
}

fn pad(cell: &str, width: usize, center: bool) -> String {
    let len = cell.chars().count();
    let extra = width.saturating_sub(len);
    if center {
        let left = extra / 2;
        format!("{}{}{}", " ".repeat(left), cell, " ".repeat(extra - left))
    } else {
        format!("{}{}", cell, " ".repeat(extra))
    }
}
