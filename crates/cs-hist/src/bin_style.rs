//! Binning styles: monotonic coordinate transforms for histogram axes.
//!
//! A style defines the "mask" `u = mask(x)` under which an axis is split
//! into equal-width bins, its inverse, and the derivative `du/dx` used to
//! correct bin counts back into a density over the raw coordinate.

use std::fmt;

use cs_core::{Error, Result, Tokens};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    /// Identity mask; uniformly spaced bins.
    Linear,
    /// `log_base(x)` mask; logarithmically spaced bins, domain `x > 0`.
    Log { base: f64 },
}

/// A binning style plus the number of bins on its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinStyle {
    nbins: usize,
    kind: Kind,
}

impl BinStyle {
    /// Linear (uniform) binning. Requires `nbins >= 1`.
    pub fn linear(nbins: usize) -> Result<Self> {
        Self::build(nbins, Kind::Linear)
    }

    /// Logarithmic binning with the given base. Requires `nbins >= 1` and
    /// `base > 1`.
    pub fn log(nbins: usize, base: f64) -> Result<Self> {
        if !base.is_finite() || base <= 1.0 {
            return Err(Error::Validation(format!(
                "logarithmic binning requires base > 1, got {base}"
            )));
        }
        Self::build(nbins, Kind::Log { base })
    }

    fn build(nbins: usize, kind: Kind) -> Result<Self> {
        if nbins == 0 {
            return Err(Error::Validation("binning requires at least 1 bin".into()));
        }
        Ok(Self { nbins, kind })
    }

    /// Parse `<nbins> <style> [args...]`: `linear`, or `log [base]` with
    /// the base defaulting to 10.
    pub fn from_tokens(tokens: &mut Tokens) -> Result<Self> {
        let nbins = tokens.next_parse("bin count")?;
        let style = tokens.expect_lower("binning style")?;
        match style.as_str() {
            "linear" => Self::linear(nbins),
            "log" => {
                let base = if tokens.is_empty() { 10.0 } else { tokens.next_parse("log base")? };
                Self::log(nbins, base)
            }
            other => Err(Error::Parse(format!(
                "unrecognized binning style \"{other}\"; options are \
                 linear, log (base defaults to 10)"
            ))),
        }
    }

    pub fn nbins(&self) -> usize {
        self.nbins
    }

    /// The mask transform `u = mask(x)`.
    pub fn mask(&self, x: f64) -> f64 {
        match self.kind {
            Kind::Linear => x,
            Kind::Log { base } => x.ln() / base.ln(),
        }
    }

    /// The inverse transform `x = invmask(u)`.
    pub fn invmask(&self, u: f64) -> f64 {
        match self.kind {
            Kind::Linear => u,
            Kind::Log { base } => base.powf(u),
        }
    }

    /// Derivative `du/dx` of the mask, used for density correction.
    pub fn dmaskdx(&self, x: f64) -> f64 {
        match self.kind {
            Kind::Linear => 1.0,
            Kind::Log { base } => 1.0 / (x * base.ln()),
        }
    }

    /// Whether `x` lies in the mask's domain.
    pub fn domain_contains(&self, x: f64) -> bool {
        match self.kind {
            Kind::Linear => x.is_finite(),
            Kind::Log { .. } => x.is_finite() && x > 0.0,
        }
    }
}

impl fmt::Display for BinStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Kind::Linear => write!(f, "linear, {} bins", self.nbins),
            Kind::Log { base } => write!(f, "log (base {base}), {} bins", self.nbins),
        }
    }
}
