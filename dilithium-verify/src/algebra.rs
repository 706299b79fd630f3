use hybrid_array::typenum::Unsigned;
use module_lattice::ArraySize;

pub(crate) use module_lattice::Field;

module_lattice::define_field!(
    BaseField,
    u32,
    u64,
    u128,
    8_380_417,
    "The field of integers mod q = 2^23 - 2^13 + 1"
);

pub(crate) type Int = <BaseField as Field>::Int;

pub(crate) type Elem = module_lattice::Elem<BaseField>;
pub(crate) type Polynomial = module_lattice::Polynomial<BaseField>;
pub(crate) type Vector<K> = module_lattice::Vector<BaseField, K>;
pub(crate) type NttPolynomial = module_lattice::NttPolynomial<BaseField>;
pub(crate) type NttVector<K> = module_lattice::NttVector<BaseField, K>;
pub(crate) type NttMatrix<K, L> = module_lattice::NttMatrix<BaseField, K, L>;

// Residues above (q - 1) / 2 stand for negative integers.  Every signed quantity handled here is
// far below q / 2 in magnitude, so the two halves of the field never overlap.
pub(crate) trait AlgebraExt: Sized {
    fn mod_plus_minus<M: Unsigned>(&self) -> Self;
    fn infinity_norm(&self) -> Int;
}

impl AlgebraExt for Elem {
    // The modulus is public, so the division here is not secret-dependent
    #[allow(clippy::integer_division_remainder_used)]
    fn mod_plus_minus<M: Unsigned>(&self) -> Self {
        let raw_mod = Elem::new(self.0 % M::U32);
        if raw_mod.0 <= M::U32 >> 1 {
            raw_mod
        } else {
            raw_mod - Elem::new(M::U32)
        }
    }

    fn infinity_norm(&self) -> Int {
        if self.0 <= BaseField::Q >> 1 {
            self.0
        } else {
            BaseField::Q - self.0
        }
    }
}

impl AlgebraExt for Polynomial {
    fn mod_plus_minus<M: Unsigned>(&self) -> Self {
        Self(self.0.iter().map(AlgebraExt::mod_plus_minus::<M>).collect())
    }

    fn infinity_norm(&self) -> Int {
        self.0.iter().map(AlgebraExt::infinity_norm).max().unwrap_or(0)
    }
}

impl<K: ArraySize> AlgebraExt for Vector<K> {
    fn mod_plus_minus<M: Unsigned>(&self) -> Self {
        Self(self.0.iter().map(AlgebraExt::mod_plus_minus::<M>).collect())
    }

    fn infinity_norm(&self) -> Int {
        self.0.iter().map(AlgebraExt::infinity_norm).max().unwrap_or(0)
    }
}

/// Splitting a residue into high and low parts with respect to `2 * gamma2`
pub(crate) trait Decompose {
    fn decompose<TwoGamma2: Unsigned>(self) -> (Elem, Elem);
}

impl Decompose for Elem {
    // r = r1 * 2 * gamma2 + r0 with -gamma2 < r0 <= gamma2, except that the top residue class
    // wraps to r1 = 0 with r0 shifted down by one.
    #[allow(clippy::integer_division_remainder_used)]
    fn decompose<TwoGamma2: Unsigned>(self) -> (Elem, Elem) {
        let r_plus = self;
        let r0 = r_plus.mod_plus_minus::<TwoGamma2>();

        if r_plus - r0 == Elem::new(BaseField::Q - 1) {
            (Elem::new(0), r0 - Elem::new(1))
        } else {
            let mut r1 = r_plus - r0;
            r1.0 /= TwoGamma2::U32;
            (r1, r0)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Dilithium2, param::ParameterSet};
    use hybrid_array::typenum::U4;

    type TwoGamma2 = <Dilithium2 as ParameterSet>::TwoGamma2;
    const GAMMA2: u32 = 95_232;

    fn neg(x: u32) -> Elem {
        -Elem::new(x)
    }

    #[test]
    fn base_field_reduction() {
        let q = u64::from(BaseField::Q);
        let cases = [
            (0, 0),
            (1, BaseField::Q - 1),
            (4_808_194, 3_765_607),
            (BaseField::Q - 1, BaseField::Q - 1),
        ];

        for (a, b) in cases {
            let expected = (u64::from(a) * u64::from(b)) % q;
            assert_eq!((Elem::new(a) * Elem::new(b)).0, u32::try_from(expected).unwrap());
        }

        assert_eq!(Elem::new(BaseField::Q - 1) + Elem::new(2), Elem::new(1));
        assert_eq!(Elem::new(1) - Elem::new(2), Elem::new(BaseField::Q - 1));
        assert_eq!(-Elem::new(0), Elem::new(0));
    }

    #[test]
    fn gamma2_constants() {
        assert_eq!(TwoGamma2::U32, 2 * GAMMA2);
        assert_eq!((BaseField::Q - 1) % TwoGamma2::U32, 0);
    }

    #[test]
    fn decompose_edges() {
        let cases = [
            (Elem::new(0), Elem::new(0), Elem::new(0)),
            (Elem::new(GAMMA2), Elem::new(0), Elem::new(GAMMA2)),
            (Elem::new(GAMMA2 + 1), Elem::new(1), neg(GAMMA2 - 1)),
            (Elem::new(BaseField::Q - 1), Elem::new(0), neg(1)),
            (Elem::new(BaseField::Q - GAMMA2 - 1), Elem::new(43), Elem::new(GAMMA2)),
            (Elem::new(BaseField::Q - GAMMA2), Elem::new(0), neg(GAMMA2)),
        ];

        for (r, r1, r0) in cases {
            assert_eq!(r.decompose::<TwoGamma2>(), (r1, r0), "r = {}", r.0);
        }
    }

    #[test]
    fn decompose_recombines() {
        for r in (0..BaseField::Q).step_by(7717) {
            let r = Elem::new(r);
            let (r1, r0) = r.decompose::<TwoGamma2>();

            assert!(r1.0 < 44);
            assert!(r0.infinity_norm() <= GAMMA2);

            // Also holds for the wrapped class, where r0 absorbs the difference mod q
            let recombined = Elem::new(r1.0 * TwoGamma2::U32) + r0;
            assert_eq!(recombined, r);
        }
    }

    #[test]
    fn infinity_norm() {
        assert_eq!(Elem::new(0).infinity_norm(), 0);
        assert_eq!(Elem::new(5).infinity_norm(), 5);
        assert_eq!(neg(5).infinity_norm(), 5);
        assert_eq!(Elem::new(BaseField::Q >> 1).infinity_norm(), BaseField::Q >> 1);

        let mut v = Vector::<U4>::default();
        assert_eq!(v.infinity_norm(), 0);

        v.0[2].0[17] = neg(130_993);
        v.0[3].0[255] = Elem::new(42);
        assert_eq!(v.infinity_norm(), 130_993);
    }

    #[test]
    fn mod_plus_minus() {
        type M = hybrid_array::typenum::U10;
        assert_eq!(Elem::new(14).mod_plus_minus::<M>(), Elem::new(4));
        assert_eq!(Elem::new(15).mod_plus_minus::<M>(), Elem::new(5));
        assert_eq!(Elem::new(17).mod_plus_minus::<M>(), neg(3));
    }
}
