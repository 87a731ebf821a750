//! Histogram construction for CondStat.
//!
//! Sampled observable tuples accumulate in a [`Histogram`]; a one-shot
//! binning pass partitions each axis under a [`BinStyle`] (a monotonic
//! mask transform) and produces the binned density estimate that the
//! fitter and the output file consume.

pub mod bin_style;
pub mod histogram;

pub use bin_style::BinStyle;
pub use histogram::{BinnedHistogram, Histogram};
