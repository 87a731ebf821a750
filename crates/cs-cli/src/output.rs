//! Histogram file output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use cs_hist::BinnedHistogram;

/// Write one row per bin: the representative coordinates followed by the
/// density, whitespace-separated, in the histogram's row-major bin order.
pub fn write_histogram(path: &Path, binned: &BinnedHistogram) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    for (coords, density) in binned.iter() {
        for coord in &coords {
            write!(file, "{coord:.6e} ")?;
        }
        writeln!(file, "{density:.6e}")?;
    }
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_hist::{BinStyle, Histogram};

    #[test]
    fn test_rows_round_trip_through_the_fit_reader() {
        let mut hist = Histogram::new(1).unwrap();
        for i in 0..10 {
            hist.add_data(vec![i as f64]).unwrap();
        }
        let binned = hist.bin(&[BinStyle::linear(3).unwrap()]).unwrap();

        let file = tempfile::NamedTempFile::new().unwrap();
        write_histogram(file.path(), &binned).unwrap();

        let rows = cs_fit::read_histogram_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 3);
        let expected: Vec<(f64, f64)> = binned.iter().map(|(c, d)| (c[0], d)).collect();
        for ((g, f), (eg, ef)) in rows.iter().zip(expected) {
            assert!((g - eg).abs() < 1e-9);
            assert!((f - ef).abs() < 1e-9);
        }
    }
}
