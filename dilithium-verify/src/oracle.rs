//! The hash evaluations of verification.  All of them are SHAKE256 with a fixed output length:
//!
//! * `tr = H(pk)`, 32 bytes
//! * `mu = H(tr || M)`, 64 bytes
//! * `c_tilde = H(mu || w1)`, one challenge seed

use hybrid_array::Array;

use crate::crypto::H;
use module_lattice::ArraySize;
use crate::util::{B32, B64};

/// `tr`, the digest that binds every message representative to one public key
pub(crate) fn public_key_digest(encoded_key: &[u8]) -> B32 {
    H::default().absorb(encoded_key).squeeze_new()
}

/// `mu`, computed over the concatenation of `message` without materializing it
pub(crate) fn message_representative(tr: &B32, message: &[&[u8]]) -> B64 {
    message
        .iter()
        .fold(H::default().absorb(tr), |h, part| h.absorb(part))
        .squeeze_new()
}

/// The challenge seed committed to by `w1_encoded`
pub(crate) fn challenge_seed<N: ArraySize>(mu: &B64, w1_encoded: &[u8]) -> Array<u8, N> {
    H::default().absorb(mu).absorb(w1_encoded).squeeze_new()
}
