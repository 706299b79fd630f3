//! Ring arithmetic as seen by the verification engine.
//!
//! The engine only ever calls through [`RingArithmetic`], so an accelerated backend can replace
//! [`Portable`] without touching the verification logic.  Every backend must produce results
//! identical to the portable one.

use hybrid_array::typenum::Unsigned;

use crate::algebra::{
    BaseField, Decompose, Elem, Field, NttMatrix, NttPolynomial, NttVector, Polynomial, Vector,
};
use module_lattice::ArraySize;
use crate::ntt::{Ntt, NttInverse};

pub(crate) trait RingArithmetic {
    fn ntt(p: &Polynomial) -> NttPolynomial;
    fn ntt_vector<K: ArraySize>(v: &Vector<K>) -> NttVector<K>;
    fn ntt_inverse_vector<K: ArraySize>(v: &NttVector<K>) -> Vector<K>;

    /// `A * v` for a `K x L` matrix
    fn multiply_matrix<K: ArraySize, L: ArraySize>(
        a: &NttMatrix<K, L>,
        v: &NttVector<L>,
    ) -> NttVector<K>;

    /// `c * v` for a single NTT polynomial `c`
    fn multiply_scalar<K: ArraySize>(c: &NttPolynomial, v: &NttVector<K>) -> NttVector<K>;

    fn subtract<K: ArraySize>(lhs: &NttVector<K>, rhs: &NttVector<K>) -> NttVector<K>;

    fn decompose<TwoGamma2: Unsigned>(r: Elem) -> (Elem, Elem);

    /// Recover the high bits of `r + z` from `r` and the hint bit for `z`.  A set hint moves the
    /// high part one step (mod `(q - 1) / (2 * gamma2)`) in the direction of the sign of the low
    /// part, where a zero low part counts as negative.
    #[allow(clippy::integer_division_remainder_used)]
    fn use_hint<TwoGamma2: Unsigned>(h: bool, r: Elem) -> Elem {
        let m = (BaseField::Q - 1) / TwoGamma2::U32;
        let gamma2 = TwoGamma2::U32 >> 1;
        let (r1, r0) = Self::decompose::<TwoGamma2>(r);

        if !h {
            r1
        } else if r0.0 > 0 && r0.0 <= gamma2 {
            Elem::new((r1.0 + 1) % m)
        } else {
            Elem::new((r1.0 + m - 1) % m)
        }
    }
}

/// Straightforward scalar implementation
pub(crate) struct Portable;

impl RingArithmetic for Portable {
    fn ntt(p: &Polynomial) -> NttPolynomial {
        p.ntt()
    }

    fn ntt_vector<K: ArraySize>(v: &Vector<K>) -> NttVector<K> {
        v.ntt()
    }

    fn ntt_inverse_vector<K: ArraySize>(v: &NttVector<K>) -> Vector<K> {
        v.ntt_inverse()
    }

    fn multiply_matrix<K: ArraySize, L: ArraySize>(
        a: &NttMatrix<K, L>,
        v: &NttVector<L>,
    ) -> NttVector<K> {
        a * v
    }

    fn multiply_scalar<K: ArraySize>(c: &NttPolynomial, v: &NttVector<K>) -> NttVector<K> {
        c * v
    }

    fn subtract<K: ArraySize>(lhs: &NttVector<K>, rhs: &NttVector<K>) -> NttVector<K> {
        lhs - rhs
    }

    fn decompose<TwoGamma2: Unsigned>(r: Elem) -> (Elem, Elem) {
        r.decompose::<TwoGamma2>()
    }
}
