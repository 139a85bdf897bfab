//! Header row naming shared by the CSV and workbook loaders.

/// Turn raw header cells into unique column names.
///
/// - Blank cells become `Unnamed: <n>`, where `n` is the absolute zero-based column index
///   (`first_column` is the sheet column of `raw[0]`).
/// - Repeated names get `.1`, `.2`, ... suffixes in order of appearance.
pub(crate) fn column_names(raw: &[String], first_column: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for (offset, cell) in raw.iter().enumerate() {
        let base = if cell.trim().is_empty() {
            format!("Unnamed: {}", first_column + offset)
        } else {
            cell.clone()
        };

        let mut name = base.clone();
        let mut n = 0;
        while out.contains(&name) {
            n += 1;
            name = format!("{base}.{n}");
        }
        out.push(name);
    }
    out
}
