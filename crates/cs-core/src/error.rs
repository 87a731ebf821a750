//! Error types for CondStat

use thiserror::Error;

/// CondStat error type.
///
/// Binding and configuration problems are reported eagerly (at parse or
/// bind time) so that a long simulation run cannot die halfway through on
/// a misconfigured input file.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input line: bad token, wrong field count, unknown name.
    #[error("parse error: {0}")]
    Parse(String),

    /// A declared model parameter was never bound to a distribution.
    #[error("missing distribution for parameter \"{0}\"")]
    MissingDistribution(String),

    /// The model does not implement the requested observable.
    #[error("model \"{0}\" does not implement observable \"{1}\"")]
    IncompatibleObservable(String, String),

    /// A submodel was supplied to a model that takes none.
    #[error("model \"{0}\" is not a composite model")]
    NotComposite(String),

    /// The submodel's kind does not match the composite's requirement.
    #[error("submodel \"{0}\" cannot be used within \"{1}\"")]
    IncompatibleSubmodel(String, String),

    /// A composite model was finalized with an empty submodel list.
    #[error("composite model \"{0}\" requires at least one submodel")]
    NoSubmodels(String),

    /// A simulator was run before any observable was bound.
    #[error("no observables specified")]
    NoObservables,

    /// Constructor constraint violation (e.g. a nonpositive scale).
    #[error("validation error: {0}")]
    Validation(String),

    /// Numeric/domain error (degenerate binning range, log of nonpositive
    /// data, and the like).
    #[error("domain error: {0}")]
    Domain(String),

    /// Computation error
    #[error("computation error: {0}")]
    Computation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
