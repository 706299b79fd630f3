use module_lattice::Truncate;
use hybrid_array::{
    Array,
    typenum::{U256, Unsigned},
};

use crate::algebra::{Polynomial, Vector};
use crate::arith::RingArithmetic;
use crate::error::Rejection;
use crate::param::{EncodedHint, SignatureParams};

/// One hint bit per coefficient of a `K`-vector.
///
/// On the wire the hint is `omega` position bytes followed by `K` cumulative counts: polynomial
/// `i` owns positions `cuts[i - 1]..cuts[i]`.  Positions within a polynomial are strictly
/// increasing and unused position bytes are zero, which makes the encoding unique.
#[derive(Clone, PartialEq, Debug)]
pub(crate) struct Hint<P>(pub Array<Array<bool, U256>, P::K>)
where
    P: SignatureParams;

impl<P> Default for Hint<P>
where
    P: SignatureParams,
{
    fn default() -> Self {
        Self(Array::default())
    }
}

impl<P> Hint<P>
where
    P: SignatureParams,
{
    pub(crate) fn hamming_weight(&self) -> usize {
        self.0
            .iter()
            .map(|x| x.iter().filter(|x| **x).count())
            .sum()
    }

    pub(crate) fn use_hint<A: RingArithmetic>(&self, r: &Vector<P::K>) -> Vector<P::K> {
        let hi = self.0.iter();
        let ri = r.0.iter();

        Vector::new(
            hi.zip(ri)
                .map(|(hv, rv)| {
                    let hvi = hv.iter();
                    let rvi = rv.0.iter();

                    Polynomial::new(
                        hvi.zip(rvi)
                            .map(|(&h, &r)| A::use_hint::<P::TwoGamma2>(h, r))
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    // Positions beyond `omega` cannot be represented and are dropped.  A decoded hint never has
    // more than `omega` of them.
    pub(crate) fn bit_pack(&self) -> EncodedHint<P> {
        let mut y: EncodedHint<P> = Array::default();
        let mut index = 0;
        let omega = P::Omega::USIZE;
        for (i, hv) in self.0.iter().enumerate() {
            for (j, _) in hv.iter().enumerate().filter(|(_, h)| **h) {
                if index < omega {
                    y[index] = Truncate::truncate(j);
                    index += 1;
                }
            }

            y[omega + i] = Truncate::truncate(index);
        }

        y
    }

    fn strictly_increasing(a: &[u8]) -> bool {
        a.windows(2).all(|w| w[0] < w[1])
    }

    pub(crate) fn bit_unpack(y: &EncodedHint<P>) -> Result<Self, Rejection> {
        let (indices, cuts) = P::split_hint(y);
        let omega = P::Omega::USIZE;

        let mut h = Self::default();
        let mut start = 0;
        for (i, &end) in cuts.iter().enumerate() {
            let end = usize::from(end);
            if end < start {
                return Err(Rejection::Malformed);
            }
            if end > omega {
                return Err(Rejection::OutOfBounds);
            }

            let positions = &indices[start..end];
            if !Self::strictly_increasing(positions) {
                return Err(Rejection::Malformed);
            }

            for &j in positions {
                h.0[i][usize::from(j)] = true;
            }

            start = end;
        }

        if indices[start..].iter().any(|&x| x != 0) {
            return Err(Rejection::Malformed);
        }

        Ok(h)
    }
}
