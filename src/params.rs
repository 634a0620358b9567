use std::path::Path;

use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::{ShamirError, ShamirResult};
use crate::field::PrimeField;
use crate::generator::SampleRange;

const DEFAULT_CONFIG: &str = include_str!("../config/default.json");

lazy_static! {
    /// Built-in configuration: 256 bits per share over an 8192-bit prime.
    pub static ref DEFAULT_PARAMETERS: Parameters =
        Parameters::from_json_str(DEFAULT_CONFIG).expect("config/default.json is well formed");
    pub static ref DEFAULT_PRIME: BigUint = DEFAULT_PARAMETERS.prime.clone();
}

/// Settings shared by a split and the reconstruction of its shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(default)]
    pub num_shares: usize,
    #[serde(default)]
    pub threshold: usize,
    /// `None` draws coefficients and x-coordinates from the whole field.
    #[serde(default)]
    pub bits_per_share: Option<u64>,
    #[serde(with = "crate::bigint_serde::decimal")]
    pub prime: BigUint,
}

impl Parameters {
    pub fn new(
        num_shares: usize,
        threshold: usize,
        bits_per_share: Option<u64>,
        prime: BigUint,
    ) -> Self {
        Parameters {
            num_shares,
            threshold,
            bits_per_share,
            prime,
        }
    }

    /// `num_shares`/`threshold` over the built-in prime and share width.
    pub fn with_defaults(num_shares: usize, threshold: usize) -> Self {
        Parameters {
            num_shares,
            threshold,
            ..DEFAULT_PARAMETERS.clone()
        }
    }

    pub fn from_json_str(json: &str) -> ShamirResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ShamirResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn sample_range(&self) -> SampleRange {
        SampleRange::from_bits(self.bits_per_share)
    }

    fn check_counts(&self) -> ShamirResult<()> {
        if self.num_shares < 1 || self.threshold < 1 {
            return Err(invalid(format!(
                "num_shares ({}) and threshold ({}) must both be positive",
                self.num_shares, self.threshold
            )));
        }
        if self.threshold > self.num_shares {
            return Err(invalid(format!(
                "threshold ({}) exceeds num_shares ({})",
                self.threshold, self.num_shares
            )));
        }
        Ok(())
    }

    /// Checks everything `split_secret` needs before any randomness is drawn.
    pub fn validate_for_split(&self, secret: &BigUint) -> ShamirResult<PrimeField> {
        let field = PrimeField::new(self.prime.clone())?;
        self.check_counts()?;

        if secret >= &self.prime {
            return Err(invalid("secret must be smaller than the prime".to_string()));
        }
        if BigUint::from(self.num_shares) >= self.prime {
            return Err(invalid(format!(
                "num_shares ({}) must be smaller than the prime",
                self.num_shares
            )));
        }
        // threshold <= num_shares < prime already holds here

        if let Some(bits) = self.bits_per_share {
            if bits == 0 {
                return Err(invalid("bits_per_share must be positive".to_string()));
            }
            if self.prime.bits() <= bits {
                return Err(invalid(format!(
                    "prime has {} bits, needs more than bits_per_share ({})",
                    self.prime.bits(),
                    bits
                )));
            }
        }

        // x = secret is never handed out
        let range = self.sample_range();
        let mut available = range.size(&field);
        if !secret.is_zero() && secret < &range.upper(&field) {
            available -= 1u32;
        }
        if BigUint::from(self.num_shares) > available {
            return Err(invalid(format!(
                "not enough distinct x-coordinates for {} shares",
                self.num_shares
            )));
        }

        Ok(field)
    }

    pub fn validate_for_reconstruct(&self) -> ShamirResult<PrimeField> {
        let field = PrimeField::new(self.prime.clone())?;
        self.check_counts()?;
        Ok(field)
    }
}

fn invalid(reason: String) -> ShamirError {
    ShamirError::InvalidParameters(reason)
}
