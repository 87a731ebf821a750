//! Reading simulator histogram files back in for fitting.

use std::path::Path;

use cs_core::{Error, Result, Tokens};

/// Read `(coordinate, density)` rows from a histogram file.
///
/// Rows are whitespace-separated: one or more coordinates followed by the
/// density. The fitter works on one-dimensional line shapes, so the first
/// coordinate and the trailing density are kept.
pub fn read_histogram_rows(path: &Path) -> Result<Vec<(f64, f64)>> {
    let text = std::fs::read_to_string(path)?;
    let mut rows = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let mut tokens = Tokens::from_line(line);
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() < 2 {
            return Err(Error::Parse(format!(
                "{}:{}: expected coordinates and a density",
                path.display(),
                lineno + 1
            )));
        }
        let g: f64 = tokens.next_parse("coordinate")?;
        let mut density: f64 = 0.0;
        while !tokens.is_empty() {
            density = tokens.next_parse("density")?;
        }
        rows.push((g, density));
    }
    Ok(rows)
}
