//! Two-state N-dimensional histogram: accumulate, then bin once.
//!
//! Binning needs the bounds of the data, so tuples are stored raw while
//! per-axis extremes are tracked; the single `bin` call then partitions
//! each axis into equal-width intervals in masked coordinates. Consuming
//! the accumulator makes the transition irreversible: there is no way to
//! add data to a [`BinnedHistogram`].

use cs_core::{Error, Result};

use crate::BinStyle;

/// Accumulating histogram of raw observable tuples.
#[derive(Debug, Clone)]
pub struct Histogram {
    ndim: usize,
    data: Vec<Vec<f64>>,
    extremes: Vec<(f64, f64)>,
}

impl Histogram {
    /// A histogram over `ndim`-dimensional tuples. Requires `ndim >= 1`.
    pub fn new(ndim: usize) -> Result<Self> {
        if ndim == 0 {
            return Err(Error::Validation("histogram dimensionality must be >= 1".into()));
        }
        Ok(Self {
            ndim,
            data: Vec::new(),
            extremes: vec![(f64::INFINITY, f64::NEG_INFINITY); ndim],
        })
    }

    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Number of tuples accumulated so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append one raw tuple, updating the per-axis extremes.
    pub fn add_data(&mut self, tuple: Vec<f64>) -> Result<()> {
        if tuple.len() != self.ndim {
            return Err(Error::Validation(format!(
                "tuple has dimension {}, histogram has dimension {}",
                tuple.len(),
                self.ndim
            )));
        }
        if tuple.iter().any(|v| !v.is_finite()) {
            return Err(Error::Validation("tuple contains a non-finite value".into()));
        }
        for (j, &v) in tuple.iter().enumerate() {
            let (min, max) = &mut self.extremes[j];
            if v < *min {
                *min = v;
            }
            if v > *max {
                *max = v;
            }
        }
        self.data.push(tuple);
        Ok(())
    }

    /// Bin the accumulated data, one style per axis.
    ///
    /// Each axis is split into `styles[j].nbins()` intervals of equal
    /// masked width between the observed extremes. The partition is
    /// closed-open: a coordinate equal to the observed axis maximum falls
    /// outside the last bin and the tuple is dropped. A degenerate axis
    /// (all values equal) is allowed only with a single bin.
    pub fn bin(self, styles: &[BinStyle]) -> Result<BinnedHistogram> {
        if styles.len() != self.ndim {
            return Err(Error::Validation(format!(
                "got {} binning styles for {} axes",
                styles.len(),
                self.ndim
            )));
        }
        if self.data.is_empty() {
            return Err(Error::Domain("cannot bin an empty histogram".into()));
        }

        let ndim = self.ndim;
        let mut lo = vec![0.0; ndim];
        let mut hi = vec![0.0; ndim];
        let mut width = vec![0.0; ndim];
        let mut coords: Vec<Vec<f64>> = Vec::with_capacity(ndim);
        for (j, style) in styles.iter().enumerate() {
            let (min, max) = self.extremes[j];
            if !style.domain_contains(min) || !style.domain_contains(max) {
                return Err(Error::Domain(format!(
                    "axis {j} value range [{min}, {max}] is outside the domain of {style}"
                )));
            }
            if min == max && style.nbins() > 1 {
                return Err(Error::Domain(format!(
                    "axis {j} has no spread of values; cannot use {} bins",
                    style.nbins()
                )));
            }

            lo[j] = style.mask(min);
            hi[j] = style.mask(max);
            width[j] = (hi[j] - lo[j]) / style.nbins() as f64;

            // Representative coordinate: average of the bin's unmasked
            // endpoints, not the midpoint of the raw interval.
            let axis_coords = (0..style.nbins())
                .map(|b| {
                    let lower = style.invmask(lo[j] + b as f64 * width[j]);
                    let upper = style.invmask(lo[j] + (b + 1) as f64 * width[j]);
                    0.5 * (lower + upper)
                })
                .collect();
            coords.push(axis_coords);
        }

        let shape: Vec<usize> = styles.iter().map(BinStyle::nbins).collect();
        // Row-major strides: the last axis varies fastest.
        let mut strides = vec![1usize; ndim];
        for j in (0..ndim.saturating_sub(1)).rev() {
            strides[j] = strides[j + 1] * shape[j + 1];
        }
        let total_bins: usize = shape.iter().product();

        let mut counts = vec![0u64; total_bins];
        let mut total = 0u64;
        'tuples: for tuple in &self.data {
            let mut flat = 0usize;
            for j in 0..ndim {
                let u = styles[j].mask(tuple[j]);
                let idx = if width[j] == 0.0 {
                    // Degenerate single-bin axis: everything lands in it.
                    0
                } else if u >= hi[j] {
                    // The upper bound is exclusive: a coordinate at the
                    // axis maximum belongs to no bin and the tuple drops.
                    continue 'tuples;
                } else {
                    let raw = ((u - lo[j]) / width[j]).floor() as isize;
                    raw.clamp(0, shape[j] as isize - 1) as usize
                };
                flat += idx * strides[j];
            }
            counts[flat] += 1;
            total += 1;
        }

        // Density correction: a bin of masked width Δu covers a raw width
        // of about Δu / (du/dx), so scaling the count by the mask
        // derivative at the representative coordinate turns equal-masked
        // counts back into a density over the raw variable.
        let mut densities = vec![0.0; total_bins];
        for flat in 0..total_bins {
            let mut factor = 1.0;
            for j in 0..ndim {
                let idx = (flat / strides[j]) % shape[j];
                factor *= styles[j].dmaskdx(coords[j][idx]);
            }
            densities[flat] = counts[flat] as f64 * factor;
        }

        Ok(BinnedHistogram { shape, strides, coords, counts, densities, total })
    }
}

/// The binned, immutable result of [`Histogram::bin`].
#[derive(Debug, Clone)]
pub struct BinnedHistogram {
    shape: Vec<usize>,
    strides: Vec<usize>,
    /// Per-axis representative coordinates, one per bin.
    coords: Vec<Vec<f64>>,
    counts: Vec<u64>,
    densities: Vec<f64>,
    total: u64,
}

impl BinnedHistogram {
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Bins per axis.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Raw (uncorrected) count of one bin by multi-index.
    pub fn count_at(&self, index: &[usize]) -> u64 {
        debug_assert_eq!(index.len(), self.shape.len());
        let flat: usize = index.iter().zip(&self.strides).map(|(i, s)| i * s).sum();
        self.counts[flat]
    }

    /// Number of tuples that landed in a bin (excludes the tuples dropped
    /// at the axis maxima).
    pub fn total_count(&self) -> u64 {
        self.total
    }

    /// Iterate `(representative coordinates, density)` over all bins in
    /// row-major order (last axis fastest). The iterator is restartable:
    /// each call starts a fresh pass.
    pub fn iter(&self) -> Bins<'_> {
        Bins { hist: self, flat: 0 }
    }
}

/// Row-major iterator over the bins of a [`BinnedHistogram`].
pub struct Bins<'a> {
    hist: &'a BinnedHistogram,
    flat: usize,
}

impl<'a> Iterator for Bins<'a> {
    type Item = (Vec<f64>, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.hist;
        if self.flat >= h.densities.len() {
            return None;
        }
        let flat = self.flat;
        self.flat += 1;
        let coords = (0..h.shape.len())
            .map(|j| h.coords[j][(flat / h.strides[j]) % h.shape[j]])
            .collect();
        Some((coords, h.densities[flat]))
    }
}
