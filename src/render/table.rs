//! Pipe-table recognition

/// Check whether a line is a table rule row such as `|---|:--:|`
///
/// Every pipe-delimited group must be non-empty and hold only dashes,
/// colons and whitespace. A single group only counts when it is fenced by
/// pipes on both sides, so `| - item` stays prose.
pub fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    let (leading, inner) = match trimmed.strip_prefix('|') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let (trailing, inner) = match inner.strip_suffix('|') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };

    let groups: Vec<&str> = inner.split('|').collect();
    let well_formed = groups.iter().all(|group| {
        !group.is_empty()
            && group
                .chars()
                .all(|c| c == '-' || c == ':' || c.is_whitespace())
    });

    well_formed && (groups.len() >= 2 || (leading && trailing))
}

/// Split a table row into trimmed cells
///
/// A leading or trailing pipe is a delimiter, not an empty cell.
pub fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let mut cells: Vec<&str> = trimmed.split('|').collect();
    if trimmed.starts_with('|') && !cells.is_empty() {
        cells.remove(0);
    }
    if trimmed.ends_with('|') {
        cells.pop();
    }
    cells.into_iter().map(|cell| cell.trim().to_string()).collect()
}
