//! Arithmetic in the prime field GF(p).
//!
//! Every [`FieldElement`] carries the modulus it was created under and every
//! binary operation checks that both operands agree on it. Operations never
//! mutate their inputs; each returns a fresh element.

use std::fmt;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{ShamirError, ShamirResult};

/// Handle on GF(p). Cheap to clone; elements created from it share the modulus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    modulus: Arc<BigUint>,
}

impl PrimeField {
    /// The modulus is assumed prime; only `p >= 2` is checked.
    pub fn new(modulus: BigUint) -> ShamirResult<Self> {
        if modulus < BigUint::from(2u32) {
            return Err(ShamirError::InvalidParameters(format!(
                "field modulus must be at least 2, got {}",
                modulus
            )));
        }
        Ok(PrimeField {
            modulus: Arc::new(modulus),
        })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Reduces `value` into `[0, p)`.
    pub fn element(&self, value: &BigUint) -> FieldElement {
        FieldElement {
            value: value % self.modulus.as_ref(),
            modulus: Arc::clone(&self.modulus),
        }
    }

    pub fn from_u64(&self, value: u64) -> FieldElement {
        self.element(&BigUint::from(value))
    }

    pub fn zero(&self) -> FieldElement {
        FieldElement {
            value: BigUint::zero(),
            modulus: Arc::clone(&self.modulus),
        }
    }

    /// Multiplicative identity. In GF(p) with `p >= 2` this is always 1.
    pub fn one(&self) -> FieldElement {
        FieldElement {
            value: BigUint::one(),
            modulus: Arc::clone(&self.modulus),
        }
    }
}

/// An integer `n` with `0 <= n < p`, paired with its modulus `p`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement {
    value: BigUint,
    modulus: Arc<BigUint>,
}

#[allow(clippy::should_implement_trait)]
impl FieldElement {
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn field(&self) -> PrimeField {
        PrimeField {
            modulus: Arc::clone(&self.modulus),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn same_field(&self, other: &FieldElement) -> ShamirResult<()> {
        if Arc::ptr_eq(&self.modulus, &other.modulus) || self.modulus == other.modulus {
            Ok(())
        } else {
            Err(ShamirError::FieldMismatch {
                left: self.modulus.as_ref().clone(),
                right: other.modulus.as_ref().clone(),
            })
        }
    }

    fn with_value(&self, value: BigUint) -> FieldElement {
        FieldElement {
            value: value % self.modulus.as_ref(),
            modulus: Arc::clone(&self.modulus),
        }
    }

    pub fn add(&self, other: &FieldElement) -> ShamirResult<FieldElement> {
        self.same_field(other)?;
        Ok(self.with_value(&self.value + &other.value))
    }

    pub fn sub(&self, other: &FieldElement) -> ShamirResult<FieldElement> {
        self.same_field(other)?;
        let value = if self.value >= other.value {
            &self.value - &other.value
        } else {
            self.modulus.as_ref() - (&other.value - &self.value)
        };
        Ok(self.with_value(value))
    }

    pub fn mul(&self, other: &FieldElement) -> ShamirResult<FieldElement> {
        self.same_field(other)?;
        Ok(self.with_value(&self.value * &other.value))
    }

    /// Square-and-multiply. `pow(0)` is one, even for the zero element.
    pub fn pow(&self, exponent: u64) -> FieldElement {
        let mut result = self.with_value(BigUint::one());
        let mut base = self.value.clone();
        let mut e = exponent;
        while e > 0 {
            if e & 1 == 1 {
                result = self.with_value(&result.value * &base);
            }
            e >>= 1;
            if e > 0 {
                base = (&base * &base) % self.modulus.as_ref();
            }
        }
        result
    }

    /// Modular inverse via the extended Euclidean algorithm.
    ///
    /// Fails with [`ShamirError::NotInvertible`] for zero, or when the modulus
    /// turns out not to be prime and shares a factor with the value.
    pub fn inverse(&self) -> ShamirResult<FieldElement> {
        let p = BigInt::from(self.modulus.as_ref().clone());
        let (mut t, mut new_t) = (BigInt::zero(), BigInt::one());
        let (mut r, mut new_r) = (p.clone(), BigInt::from(self.value.clone()));

        while !new_r.is_zero() {
            let quotient = &r / &new_r;
            let next_t = &t - &quotient * &new_t;
            t = std::mem::replace(&mut new_t, next_t);
            let next_r = &r - &quotient * &new_r;
            r = std::mem::replace(&mut new_r, next_r);
        }

        if !r.is_one() {
            return Err(ShamirError::NotInvertible(self.value.clone()));
        }
        Ok(self.with_value(t.mod_floor(&p).magnitude().clone()))
    }

    pub fn div(&self, other: &FieldElement) -> ShamirResult<FieldElement> {
        self.same_field(other)?;
        self.mul(&other.inverse()?)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf(p: u64) -> PrimeField {
        PrimeField::new(BigUint::from(p)).unwrap()
    }

    #[test]
    fn small_field_scenario() {
        let field = gf(23);
        let a = field.from_u64(7);
        let b = field.from_u64(20);

        assert_eq!(a.add(&b).unwrap(), field.from_u64(4));
        assert_eq!(a.sub(&b).unwrap(), field.from_u64(10));
        assert_eq!(b.pow(3), field.from_u64(19));
        assert_eq!(a.mul(&a.inverse().unwrap()).unwrap(), field.one());
        assert_eq!(field.one().div(&b).unwrap().mul(&b).unwrap(), field.one());
    }

    #[test]
    fn construction_reduces() {
        let field = gf(23);
        assert_eq!(field.from_u64(23 * 4 + 5).value(), &BigUint::from(5u32));
        assert!(field.from_u64(46).is_zero());
    }

    #[test]
    fn field_laws_hold_in_gf_101() {
        let field = gf(101);
        for i in 0..101u64 {
            let a = field.from_u64(i);
            assert_eq!(a.pow(0), field.one());
            assert_eq!(a.pow(1), a);
            for j in (0..101u64).step_by(7) {
                let b = field.from_u64(j);
                assert_eq!(a.add(&b).unwrap().sub(&b).unwrap(), a);
            }
            if i != 0 {
                assert_eq!(a.mul(&a.inverse().unwrap()).unwrap(), field.one());
                // Fermat
                assert_eq!(a.pow(100), field.one());
            }
        }
    }

    #[test]
    fn pow_matches_modpow_for_large_exponents() {
        let field = gf(1_000_000_007);
        let a = field.from_u64(123_456_789);
        let expected = BigUint::from(123_456_789u64)
            .modpow(&BigUint::from(u64::MAX), field.modulus());
        assert_eq!(a.pow(u64::MAX).value(), &expected);
    }

    #[test]
    fn zero_is_not_invertible() {
        let field = gf(23);
        assert!(matches!(
            field.zero().inverse(),
            Err(ShamirError::NotInvertible(_))
        ));
        assert!(matches!(
            field.one().div(&field.zero()),
            Err(ShamirError::NotInvertible(_))
        ));
    }

    #[test]
    fn composite_modulus_is_detected_on_inverse() {
        let ring = gf(6);
        assert!(matches!(
            ring.from_u64(4).inverse(),
            Err(ShamirError::NotInvertible(v)) if v == BigUint::from(4u32)
        ));
        assert_eq!(ring.from_u64(5).inverse().unwrap(), ring.from_u64(5));
    }

    #[test]
    fn mixing_fields_is_rejected() {
        let a = gf(23).from_u64(3);
        let b = gf(29).from_u64(3);
        assert!(matches!(a.add(&b), Err(ShamirError::FieldMismatch { .. })));
        assert!(matches!(a.sub(&b), Err(ShamirError::FieldMismatch { .. })));
        assert!(matches!(a.mul(&b), Err(ShamirError::FieldMismatch { .. })));
        assert!(matches!(a.div(&b), Err(ShamirError::FieldMismatch { .. })));
    }

    #[test]
    fn separately_built_fields_with_equal_moduli_interoperate() {
        let a = gf(23).from_u64(3);
        let b = gf(23).from_u64(4);
        assert_eq!(a.mul(&b).unwrap().value(), &BigUint::from(12u32));
    }

    #[test]
    fn tiny_moduli_are_rejected() {
        assert!(PrimeField::new(BigUint::zero()).is_err());
        assert!(PrimeField::new(BigUint::one()).is_err());
    }
}
