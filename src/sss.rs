use std::collections::HashSet;

use num_bigint::BigUint;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{ShamirError, ShamirResult};
use crate::field::{FieldElement, PrimeField};
use crate::generator::{sample_nonzero, SampleRange};
use crate::params::Parameters;

/// Times a split is regenerated when a share happens to equal the secret.
const MAX_SPLIT_ATTEMPTS: usize = 16;

/// One point `(x, y)` on the secret-encoding polynomial.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Share {
    #[serde(with = "crate::bigint_serde::hex")]
    pub x: BigUint,
    #[serde(with = "crate::bigint_serde::hex")]
    pub y: BigUint,
}

impl Share {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Share { x, y }
    }

    fn exposes(&self, secret: &BigUint) -> bool {
        &self.x == secret || &self.y == secret
    }
}

/// A random polynomial with the secret as its constant term. Lives only for one split.
pub struct Polynomial {
    coefficients: Vec<FieldElement>,
}

impl Polynomial {
    /// Degree `threshold - 1`, with coefficients `c_1..c_{threshold-1}` drawn from `range`.
    pub fn random<R: RngCore + CryptoRng>(
        rng: &mut R,
        secret: FieldElement,
        threshold: usize,
        range: SampleRange,
    ) -> Self {
        let field = secret.field();
        let mut coefficients = vec![secret];
        for _ in 1..threshold {
            coefficients.push(sample_nonzero(rng, range, &field));
        }
        Polynomial { coefficients }
    }

    pub fn coefficients(&self) -> &[FieldElement] {
        &self.coefficients
    }

    /// `c_0 + c_1 * x + ... + c_k * x^k`, keeping a running power of `x`.
    pub fn evaluate(&self, x: &FieldElement) -> ShamirResult<FieldElement> {
        let mut result = x.field().zero();
        let mut x_pow_i = x.field().one();

        for coefficient in &self.coefficients {
            result = result.add(&coefficient.mul(&x_pow_i)?)?;
            x_pow_i = x_pow_i.mul(x)?;
        }

        Ok(result)
    }
}

/// Splits `secret` into `params.num_shares` shares using the operating system's CSPRNG.
pub fn split_secret(secret: &BigUint, params: &Parameters) -> ShamirResult<Vec<Share>> {
    split_secret_with_rng(&mut OsRng, secret, params)
}

/// Same as [`split_secret`] with a caller-supplied cryptographic generator.
///
/// Shares are returned in the order their x-coordinates were drawn. The
/// x-coordinates are pairwise distinct and no share has a coordinate equal to
/// the secret.
pub fn split_secret_with_rng<R: RngCore + CryptoRng>(
    rng: &mut R,
    secret: &BigUint,
    params: &Parameters,
) -> ShamirResult<Vec<Share>> {
    let field = params.validate_for_split(secret)?;
    // A constant polynomial evaluates to the secret everywhere.
    if params.threshold == 1 {
        return Err(ShamirError::LeakingShare);
    }

    for _ in 0..MAX_SPLIT_ATTEMPTS {
        let shares = split_once(rng, secret, params, &field)?;
        if !shares.iter().any(|share| share.exposes(secret)) {
            return Ok(shares);
        }
    }
    Err(ShamirError::LeakingShare)
}

fn split_once<R: RngCore + CryptoRng>(
    rng: &mut R,
    secret: &BigUint,
    params: &Parameters,
    field: &PrimeField,
) -> ShamirResult<Vec<Share>> {
    let range = params.sample_range();
    let polynomial = Polynomial::random(rng, field.element(secret), params.threshold, range);

    let mut seen = HashSet::with_capacity(params.num_shares);
    let mut xs = Vec::with_capacity(params.num_shares);
    while xs.len() < params.num_shares {
        let x = sample_nonzero(rng, range, field);
        if x.value() != secret && seen.insert(x.value().clone()) {
            xs.push(x);
        }
    }

    xs.into_iter()
        .map(|x| {
            let y = polynomial.evaluate(&x)?;
            Ok(Share::new(x.into_value(), y.into_value()))
        })
        .collect()
}

/// Recovers the secret from between `threshold` and `num_shares` shares.
///
/// Share order does not matter. Fewer than `threshold` shares are refused
/// rather than interpolated into a wrong value. Two shares with the same x
/// surface as [`ShamirError::NotInvertible`].
pub fn reconstruct_secret(shares: &[Share], params: &Parameters) -> ShamirResult<BigUint> {
    let field = params.validate_for_reconstruct()?;

    if shares.len() < params.threshold || shares.len() > params.num_shares {
        return Err(ShamirError::InsufficientOrExcessShares {
            supplied: shares.len(),
            threshold: params.threshold,
            num_shares: params.num_shares,
        });
    }
    if let Some(index) = shares
        .iter()
        .position(|share| share.x >= params.prime || share.y >= params.prime)
    {
        return Err(ShamirError::ShareOutOfRange { index });
    }

    Ok(interpolate_at_zero(shares, &field)?.into_value())
}

/// Lagrange interpolation of the polynomial through `shares`, evaluated at x = 0.
///
/// Performs no count check: with too few points it silently yields some other
/// field element.
pub(crate) fn interpolate_at_zero(
    shares: &[Share],
    field: &PrimeField,
) -> ShamirResult<FieldElement> {
    let points = shares
        .iter()
        .map(|share| (field.element(&share.x), field.element(&share.y)))
        .collect::<Vec<_>>();

    let mut secret = field.zero();
    for (j, (x_j, y_j)) in points.iter().enumerate() {
        let mut product = field.one();
        for (m, (x_m, _)) in points.iter().enumerate() {
            if m != j {
                product = product.mul(&x_m.div(&x_m.sub(x_j)?)?)?;
            }
        }
        secret = secret.add(&y_j.mul(&product)?)?;
    }
    Ok(secret)
}
