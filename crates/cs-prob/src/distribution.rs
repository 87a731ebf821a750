//! The `RandomDistribution` sum type and its token-stream factory.

use std::fmt;

use cs_core::{Error, Result, Tokens};
use rand::Rng;

use crate::{Constant, Gamma, LogNormal, Normal, Uniform};

/// A scalar random-variable specification bound to a model parameter.
///
/// Stateless after construction: `sample` may be called indefinitely and
/// all mutation happens in the caller's generator.
#[derive(Debug, Clone)]
pub enum RandomDistribution {
    Constant(Constant),
    Uniform(Uniform),
    Normal(Normal),
    LogNormal(LogNormal),
    Gamma(Gamma),
}

impl RandomDistribution {
    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Constant(d) => d.sample(rng),
            Self::Uniform(d) => d.sample(rng),
            Self::Normal(d) => d.sample(rng),
            Self::LogNormal(d) => d.sample(rng),
            Self::Gamma(d) => d.sample(rng),
        }
    }

    /// Parse `<kind> <params...>` from a token stream.
    ///
    /// The kind is case-insensitive (`normal` and `gaussian` are synonyms).
    /// Unknown kinds and bad or missing parameters fail with a parse error
    /// naming the offending token.
    pub fn from_tokens(tokens: &mut Tokens) -> Result<Self> {
        let kind = tokens.expect_lower("distribution kind")?;
        match kind.as_str() {
            "constant" => {
                let value = tokens.next_parse("constant value")?;
                Ok(Self::Constant(Constant::new(value)?))
            }
            "uniform" => {
                let low = tokens.next_parse("uniform lower bound")?;
                let high = tokens.next_parse("uniform upper bound")?;
                Ok(Self::Uniform(Uniform::new(low, high)?))
            }
            "normal" | "gaussian" => {
                let mean = tokens.next_parse("normal mean")?;
                let stddev = tokens.next_parse("normal standard deviation")?;
                Ok(Self::Normal(Normal::new(mean, stddev)?))
            }
            "lognormal" => {
                let zeta = tokens.next_parse("lognormal zeta")?;
                let sigma = tokens.next_parse("lognormal sigma")?;
                Ok(Self::LogNormal(LogNormal::new(zeta, sigma)?))
            }
            "gamma" => {
                let shape = tokens.next_parse("gamma shape")?;
                let scale = tokens.next_parse("gamma scale")?;
                Ok(Self::Gamma(Gamma::new(shape, scale)?))
            }
            other => Err(Error::Parse(format!(
                "unrecognized distribution \"{other}\"; options are \
                 constant, uniform, normal (gaussian), lognormal, gamma"
            ))),
        }
    }
}

impl fmt::Display for RandomDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(d) => d.fmt(f),
            Self::Uniform(d) => d.fmt(f),
            Self::Normal(d) => d.fmt(f),
            Self::LogNormal(d) => d.fmt(f),
            Self::Gamma(d) => d.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parse(line: &str) -> Result<RandomDistribution> {
        RandomDistribution::from_tokens(&mut Tokens::from_line(line))
    }

    #[test]
    fn test_parse_all_kinds() {
        assert!(matches!(parse("constant 4.2").unwrap(), RandomDistribution::Constant(_)));
        assert!(matches!(parse("Uniform -1 1").unwrap(), RandomDistribution::Uniform(_)));
        assert!(matches!(parse("normal 0 1").unwrap(), RandomDistribution::Normal(_)));
        assert!(matches!(parse("GAUSSIAN 0 1").unwrap(), RandomDistribution::Normal(_)));
        assert!(matches!(parse("lognormal 0 0.1").unwrap(), RandomDistribution::LogNormal(_)));
        assert!(matches!(parse("gamma 2 0.5").unwrap(), RandomDistribution::Gamma(_)));
    }

    #[test]
    fn test_parse_unknown_kind_lists_options() {
        let err = parse("cauchy 0 1").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("cauchy"));
        assert!(msg.contains("lognormal"));
    }

    #[test]
    fn test_parse_bad_arity() {
        assert!(parse("uniform 0").is_err());
        assert!(parse("normal").is_err());
    }

    #[test]
    fn test_parse_bad_number() {
        let err = parse("constant five").unwrap_err();
        assert!(err.to_string().contains("five"));
    }

    #[test]
    fn test_constant_samples_exact() {
        let dist = parse("constant 5.0").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..32 {
            assert_eq!(dist.sample(&mut rng), 5.0);
        }
    }
}
