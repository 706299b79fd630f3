use module_lattice::ArraySize;
use module_lattice::Truncate;
use hybrid_array::Array;

use crate::algebra::{BaseField, Elem, Field, Int, NttMatrix, NttPolynomial, NttVector, Polynomial};
use crate::crypto::{G, H};

// Bit i of a little-endian bit string
fn bit_set(z: &[u8], i: usize) -> bool {
    let bit_index = i & 0x07;
    let byte_index = i >> 3;
    z[byte_index] & (1 << bit_index) != 0
}

// 23-bit little-endian candidate, accepted only if it is already reduced
fn coeff_from_three_bytes(b: [u8; 3]) -> Option<Elem> {
    let b0: Int = b[0].into();
    let b1: Int = b[1].into();
    let b2: Int = b[2].into();

    let b2p = b2 & 0x7f;

    let z = (b2p << 16) + (b1 << 8) + b0;
    (z < BaseField::Q).then_some(Elem::new(z))
}

/// The challenge polynomial: exactly `tau` coefficients are +1 or -1 and the rest are zero.
///
/// The first 8 bytes of `SHAKE256(seed)` supply the signs.  Positions come from a Fisher-Yates
/// style shuffle driven by the following bytes, rejecting any byte larger than the current index.
pub(crate) fn sample_in_ball(seed: &[u8], tau: usize) -> Polynomial {
    const ONE: Elem = Elem::new(1);
    const MINUS_ONE: Elem = Elem::new(BaseField::Q - 1);

    let mut c = Polynomial::default();
    let mut ctx = H::default().absorb(seed);

    let mut signs = [0u8; 8];
    ctx.squeeze(&mut signs);

    let mut j = [0u8];
    for i in (256 - tau)..256 {
        ctx.squeeze(&mut j);
        while usize::from(j[0]) > i {
            ctx.squeeze(&mut j);
        }

        let j = usize::from(j[0]);
        c.0[i] = c.0[j];
        c.0[j] = if bit_set(&signs, i + tau - 256) {
            MINUS_ONE
        } else {
            ONE
        };
    }

    c
}

// Uniform NTT-domain polynomial from SHAKE128(rho || column || row)
fn rej_ntt_poly(rho: &[u8], row: u8, column: u8) -> NttPolynomial {
    let mut j = 0;
    let mut ctx = G::default().absorb(rho).absorb(&[column, row]);

    let mut a = NttPolynomial::default();
    let mut s = [0u8; 3];
    while j < 256 {
        ctx.squeeze(&mut s);
        if let Some(x) = coeff_from_three_bytes(s) {
            a.0[j] = x;
            j += 1;
        }
    }

    a
}

/// The public matrix `A`, sampled directly in the NTT domain
pub(crate) fn expand_a<K: ArraySize, L: ArraySize>(rho: &[u8]) -> NttMatrix<K, L> {
    NttMatrix::new(Array::from_fn(|r| {
        NttVector::new(Array::from_fn(|s| {
            rej_ntt_poly(rho, Truncate::truncate(r), Truncate::truncate(s))
        }))
    }))
}
