use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::{CryptoRng, RngCore};

use crate::field::{FieldElement, PrimeField};

/// Where random coefficients and x-coordinates are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleRange {
    /// `[1, 2^bits - 1]`
    Bits(u64),
    /// `[1, p - 1]`
    Field,
}

impl SampleRange {
    pub fn from_bits(bits_per_share: Option<u64>) -> Self {
        match bits_per_share {
            Some(bits) => SampleRange::Bits(bits),
            None => SampleRange::Field,
        }
    }

    /// Exclusive upper bound of the range.
    pub fn upper(&self, field: &PrimeField) -> BigUint {
        match self {
            SampleRange::Bits(bits) => BigUint::one() << *bits,
            SampleRange::Field => field.modulus().clone(),
        }
    }

    /// Number of distinct values the range holds.
    pub fn size(&self, field: &PrimeField) -> BigUint {
        self.upper(field) - BigUint::one()
    }
}

/// Draws a uniform non-zero value from `range`, reduced into `field`.
///
/// Callers must have checked that the range is non-empty.
pub fn sample_nonzero<R: RngCore + CryptoRng>(
    rng: &mut R,
    range: SampleRange,
    field: &PrimeField,
) -> FieldElement {
    let value = rng.gen_biguint_range(&BigUint::one(), &range.upper(field));
    field.element(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn samples_stay_inside_the_bit_range() {
        let field = PrimeField::new(BigUint::from(65_537u32)).unwrap();
        for _ in 0..500 {
            let x = sample_nonzero(&mut OsRng, SampleRange::Bits(4), &field);
            assert!(!x.is_zero());
            assert!(x.value() < &BigUint::from(16u32));
        }
    }

    #[test]
    fn field_range_never_yields_zero() {
        let field = PrimeField::new(BigUint::from(3u32)).unwrap();
        for _ in 0..200 {
            let x = sample_nonzero(&mut OsRng, SampleRange::Field, &field);
            assert!(!x.is_zero());
        }
    }

    #[test]
    fn range_sizes() {
        let field = PrimeField::new(BigUint::from(23u32)).unwrap();
        assert_eq!(SampleRange::Bits(3).size(&field), BigUint::from(7u32));
        assert_eq!(SampleRange::Field.size(&field), BigUint::from(22u32));
    }
}
