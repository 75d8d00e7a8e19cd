// Copyright 2025 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Hashing of arbitrary octet strings to points of the BLS12-381 G1
//! subgroup, following RFC 9380 with the parameters of the BBS
//! ciphersuites: `expand_message_xmd` (SHA-256) or `expand_message_xof`
//! (SHAKE-256), `hash_to_field` with m = 1 and count = 2, the simplified
//! SWU map to an 11-isogenous curve, the isogeny back to E, and cofactor
//! clearing.
//!
//! The base field arithmetic comes from `bls12_381_plus::fp` (exposed by
//! the `expose-fields` feature); the map itself lives here.

use crate::bbs::ciphersuites::BbsCiphersuite;
use crate::errors::Error;
use bls12_381_plus::fp::Fp;
use bls12_381_plus::{G1Affine, G1Projective};
use digest::{ExtendableOutput, Update, XofReader};
use sha2::{Digest, Sha256};
use sha3::Shake256;

/// Isogeny evaluation and cofactor clearing
pub mod isogeny;
/// Simplified SWU map to the isogenous curve
pub mod sswu;

/// Output length of the SHA-256 compression function.
const B_IN_BYTES: usize = 32;
/// Input block size of SHA-256.
const R_IN_BYTES: usize = 64;
/// Octets of uniform output consumed per field element (L).
const L_FIELD: usize = 64;

fn check_dst(dst: &[u8]) -> Result<(), Error> {
    if dst.is_empty() || dst.len() > 255 {
        return Err(Error::InvalidArgument(format!(
            "DST length {} outside (0, 255]",
            dst.len()
        )));
    }
    Ok(())
}

/// `expand_message_xmd` of RFC 9380 §5.3.1, instantiated with SHA-256.
///
/// Produces `len_in_bytes` pseudorandom octets from `msg` under the domain
/// separation tag `dst`.
pub fn expand_message_xmd(msg: &[u8], dst: &[u8], len_in_bytes: usize) -> Result<Vec<u8>, Error> {
    check_dst(dst)?;
    let ell = (len_in_bytes + B_IN_BYTES - 1) / B_IN_BYTES;
    if ell > 255 || len_in_bytes == 0 {
        return Err(Error::InvalidArgument(format!(
            "expand_message_xmd length {} out of range",
            len_in_bytes
        )));
    }

    let dst_prime = [dst, &[dst.len() as u8]].concat();
    let z_pad = [0u8; R_IN_BYTES];
    let l_i_b_str = [(len_in_bytes >> 8) as u8, len_in_bytes as u8];

    let mut hasher = Sha256::new();
    Digest::update(&mut hasher, z_pad);
    Digest::update(&mut hasher, msg);
    Digest::update(&mut hasher, l_i_b_str);
    Digest::update(&mut hasher, [0u8]);
    Digest::update(&mut hasher, &dst_prime);
    let b_0: [u8; B_IN_BYTES] = hasher.finalize().into();

    let mut uniform = Vec::with_capacity(ell * B_IN_BYTES);
    let mut b_prev: [u8; B_IN_BYTES] = {
        let mut hasher = Sha256::new();
        Digest::update(&mut hasher, b_0);
        Digest::update(&mut hasher, [1u8]);
        Digest::update(&mut hasher, &dst_prime);
        hasher.finalize().into()
    };
    uniform.extend_from_slice(&b_prev);

    for i in 2..=ell {
        let mut xored = [0u8; B_IN_BYTES];
        for (out, (a, b)) in xored.iter_mut().zip(b_0.iter().zip(b_prev.iter())) {
            *out = a ^ b;
        }
        let mut hasher = Sha256::new();
        Digest::update(&mut hasher, xored);
        Digest::update(&mut hasher, [i as u8]);
        Digest::update(&mut hasher, &dst_prime);
        b_prev = hasher.finalize().into();
        uniform.extend_from_slice(&b_prev);
    }

    uniform.truncate(len_in_bytes);
    Ok(uniform)
}

/// `expand_message_xof` of RFC 9380 §5.3.2, instantiated with SHAKE-256.
pub fn expand_message_xof(msg: &[u8], dst: &[u8], len_in_bytes: usize) -> Result<Vec<u8>, Error> {
    check_dst(dst)?;
    if len_in_bytes == 0 || len_in_bytes >= 65536 {
        return Err(Error::InvalidArgument(format!(
            "expand_message_xof length {} out of range",
            len_in_bytes
        )));
    }

    let mut hasher = Shake256::default();
    hasher.update(msg);
    hasher.update(&[(len_in_bytes >> 8) as u8, len_in_bytes as u8]);
    hasher.update(dst);
    hasher.update(&[dst.len() as u8]);

    let mut uniform = vec![0u8; len_in_bytes];
    hasher.finalize_xof().read(&mut uniform);
    Ok(uniform)
}

/// Fp element from a small integer.
pub(crate) fn fp_from_u64(v: u64) -> Fp {
    let mut bytes = [0u8; 48];
    bytes[40..].copy_from_slice(&v.to_be_bytes());
    Fp::from_bytes(&bytes).unwrap()
}

/// Big-endian OS2IP of a 64-octet block, reduced mod p.
///
/// Folds 8-octet limbs through field arithmetic so no canonical-width
/// constructor of the backend is needed.
pub(crate) fn fp_from_wide_be(bytes: &[u8; L_FIELD]) -> Fp {
    let radix = fp_from_u64(u64::MAX) + fp_from_u64(1);
    let mut acc = fp_from_u64(0);
    for limb in bytes.chunks(8) {
        let mut be = [0u8; 8];
        be.copy_from_slice(limb);
        acc = acc * radix + fp_from_u64(u64::from_be_bytes(be));
    }
    acc
}

/// Square-and-multiply exponentiation by a big-endian exponent.
///
/// Variable time; only ever used on public inputs (generator seed material).
pub(crate) fn fp_pow(base: &Fp, exp_be: &[u8]) -> Fp {
    let mut acc = fp_from_u64(1);
    for byte in exp_be {
        for bit in (0..8).rev() {
            acc = acc * acc;
            if (byte >> bit) & 1 == 1 {
                acc = acc * *base;
            }
        }
    }
    acc
}

/// Fp element from a 96-char big-endian hex constant.
pub(crate) fn fp_from_hex(hex_str: &str) -> Fp {
    let bytes: [u8; 48] = hex::decode(hex_str)
        .expect("valid hex constant")
        .try_into()
        .expect("48-octet constant");
    Fp::from_bytes(&bytes).unwrap()
}

/// sgn0 of a base field element: the parity of its canonical encoding.
pub(crate) fn fp_sgn0(x: &Fp) -> u8 {
    x.to_bytes()[47] & 1
}

pub(crate) fn fp_is_zero(x: &Fp) -> bool {
    *x == fp_from_u64(0)
}

/// A G1 point (on the curve, not necessarily in the subgroup) from affine
/// coordinates, assembled through the uncompressed wire layout.
pub(crate) fn g1_from_coordinates(x: Fp, y: Fp) -> Result<G1Projective, Error> {
    let mut uncompressed = [0u8; 96];
    uncompressed[..48].copy_from_slice(&x.to_bytes());
    uncompressed[48..].copy_from_slice(&y.to_bytes());
    Option::<G1Affine>::from(G1Affine::from_uncompressed_unchecked(&uncompressed))
        .map(G1Projective::from)
        .ok_or_else(|| Error::CryptoFailure("point assembly failed".into()))
}

/// `hash_to_field` specialized to m = 1, count = 2: two Fp elements from
/// 128 octets of uniform output, 64 octets each.
pub fn hash_to_field_m1_c2<CS: BbsCiphersuite>(msg: &[u8], dst: &[u8]) -> Result<[Fp; 2], Error> {
    let uniform = CS::expand_message(msg, dst, 2 * L_FIELD)?;
    let mut block = [0u8; L_FIELD];
    block.copy_from_slice(&uniform[..L_FIELD]);
    let u0 = fp_from_wide_be(&block);
    block.copy_from_slice(&uniform[L_FIELD..]);
    let u1 = fp_from_wide_be(&block);
    Ok([u0, u1])
}

/// Hash an octet string to a uniformly distributed point of the G1
/// subgroup under `dst` (hash_to_curve of RFC 9380, `BLS12381G1_SSWU_RO`).
pub fn hash_to_curve<CS: BbsCiphersuite>(msg: &[u8], dst: &[u8]) -> Result<G1Projective, Error> {
    let [u0, u1] = hash_to_field_m1_c2::<CS>(msg, dst)?;
    let q0 = isogeny::iso_map(sswu::map_to_curve_simple_swu(&u0))?;
    let q1 = isogeny::iso_map(sswu::map_to_curve_simple_swu(&u1))?;
    Ok(isogeny::clear_cofactor(q0 + q1))
}
