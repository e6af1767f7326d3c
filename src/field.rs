use ark_ff::fields::{Fp64, MontBackend, MontConfig};
use ark_ff::Field;
use ark_serialize::CanonicalSerialize;

use crate::error::{GkrError, GkrResult};

/// Goldilocks prime `2^64 - 2^32 + 1`.
#[derive(MontConfig)]
#[modulus = "18446744069414584321"]
#[generator = "7"]
pub struct GoldilocksConfig;

pub type Goldilocks = Fp64<MontBackend<GoldilocksConfig, 1>>;

/// Small prime field, handy for hand-checked examples.
#[derive(MontConfig)]
#[modulus = "97"]
#[generator = "5"]
pub struct F97Config;

pub type F97 = Fp64<MontBackend<F97Config, 1>>;

/// Field used by the command line front end and the default protocol.
pub type DefaultField = Goldilocks;

pub fn try_inverse<F: Field>(e: F, context: &'static str) -> GkrResult<F> {
    e.inverse().ok_or(GkrError::DivisionByZero(context))
}

pub fn to_f<F: Field>(values: &[u64]) -> Vec<F> {
    values.iter().copied().map(F::from).collect()
}

/// Byte width of one serialized field element. Fixed per field.
pub fn element_width<F: Field>() -> usize {
    F::zero().compressed_size()
}

#[cfg(test)]
mod tests {
    use ark_ff::{One, PrimeField, Zero};
    use super::*;

    #[test]
    fn small_field_wraps() {
        let a = F97::from(90u64);
        let b = F97::from(10u64);

        assert_eq!(a + b, F97::from(3u64));
        assert_eq!(b - a, F97::from(17u64));
        assert_eq!(a * b, F97::from(27u64));
        assert_eq!(-b, F97::from(87u64));
        assert_eq!(F97::from(97u64), F97::zero());
    }

    #[test]
    fn inverse_of_zero_fails() {
        let res = try_inverse(Goldilocks::zero(), "testing");
        assert_eq!(res, Err(GkrError::DivisionByZero("testing")));

        let three = Goldilocks::from(3u64);
        let inv = try_inverse(three, "testing").unwrap();
        assert_eq!(inv * three, Goldilocks::one());
    }

    #[test]
    fn goldilocks_modulus() {
        let p_minus_one = Goldilocks::from(u64::MAX - (1 << 32) + 1);
        assert_eq!(p_minus_one + Goldilocks::one(), Goldilocks::zero());
        assert_eq!(Goldilocks::MODULUS_BIT_SIZE, 64);
    }

    #[test]
    fn fixed_width_encoding() {
        assert_eq!(element_width::<Goldilocks>(), 8);
        assert_eq!(element_width::<F97>(), 1);

        let mut bytes = vec![];
        Goldilocks::from(258u64).serialize_compressed(&mut bytes).unwrap();
        assert_eq!(bytes, vec![2, 1, 0, 0, 0, 0, 0, 0]);
    }
}
