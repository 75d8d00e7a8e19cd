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

use crate::bbs::ciphersuites::BbsCiphersuite;
use crate::bbs::keys::BbsPublicKey;
use crate::errors::Error;
use crate::utils::serialize::{i2osp, serialize, SerializeItem};
use bls12_381_plus::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use rand::RngCore;

/// Retries of the 32-octet rejection sampler before giving up. Each draw
/// succeeds with probability r / 2^256 ≈ 0.45, so 128 misses in a row do
/// not happen with a sound RNG.
const RANDOM_SCALAR_MAX_RETRIES: usize = 128;

/// Big-endian scalar codec helpers on [`Scalar`].
pub trait ScalarExt: Sized {
    /// Reduce 48 octets of uniform output modulo r (big-endian OS2IP).
    fn from_okm(okm: &[u8; 48]) -> Self;
    /// Canonical scalar from exactly 32 big-endian octets; rejects
    /// non-canonical values (≥ r) and wrong lengths.
    fn from_bytes_be(bytes: &[u8]) -> Result<Self, Error>;
}

impl ScalarExt for Scalar {
    fn from_okm(okm: &[u8; 48]) -> Scalar {
        // Fold 8-octet limbs through the field; Fr has no canonical
        // wide-reduction entry point at a stable name.
        let radix = Scalar::from(u64::MAX) + Scalar::from(1u64);
        let mut acc = Scalar::from(0u64);
        for limb in okm.chunks(8) {
            let mut be = [0u8; 8];
            be.copy_from_slice(limb);
            acc = acc * radix + Scalar::from(u64::from_be_bytes(be));
        }
        acc
    }

    fn from_bytes_be(bytes: &[u8]) -> Result<Scalar, Error> {
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidEncoding("scalar must be 32 octets".into()))?;
        Option::<Scalar>::from(Scalar::from_be_bytes(&bytes))
            .ok_or_else(|| Error::InvalidEncoding("non-canonical scalar".into()))
    }
}

/// hash_to_scalar: expand `msg_octets` to 48 uniform octets under `dst`
/// and reduce modulo r. The result may be zero with negligible
/// probability; call sites that need a nonzero scalar check at use.
pub fn hash_to_scalar<CS: BbsCiphersuite>(msg_octets: &[u8], dst: &[u8]) -> Result<Scalar, Error> {
    let uniform = CS::expand_message(msg_octets, dst, CS::EXPAND_LEN)?;
    let okm: [u8; 48] = uniform
        .try_into()
        .map_err(|_| Error::CryptoFailure("expand output length mismatch".into()))?;
    Ok(Scalar::from_okm(&okm))
}

/// The domain scalar binding generators, public key, api id and header
/// (spec layout: serialize((L, Q1, H_1..H_L)) ‖ api_id ‖ PK ‖
/// I2OSP(len(header), 8) ‖ header).
pub fn calculate_domain<CS: BbsCiphersuite>(
    pk: &BbsPublicKey,
    q1: G1Projective,
    h_points: &[G1Projective],
    header: Option<&[u8]>,
) -> Result<Scalar, Error> {
    let header = header.unwrap_or(b"");

    let mut items = Vec::with_capacity(h_points.len() + 2);
    items.push(SerializeItem::U64(h_points.len() as u64));
    items.push(SerializeItem::Point1(q1));
    items.extend(h_points.iter().map(|h| SerializeItem::Point1(*h)));

    let mut dom_input = serialize(&items);
    dom_input.extend_from_slice(CS::API_ID);
    dom_input.extend_from_slice(&pk.to_bytes());
    dom_input.extend_from_slice(&i2osp::<8>(header.len()));
    dom_input.extend_from_slice(header);

    hash_to_scalar::<CS>(&dom_input, &CS::hash_to_scalar_dst())
}

/// Draw `count` uniform scalars below r by rejection sampling 32-octet
/// strings from a CSPRNG. Wide reduction is deliberately not used: the
/// proof construction fixes this sampler.
pub fn calculate_random_scalars(count: usize) -> Result<Vec<Scalar>, Error> {
    let mut rng = rand::thread_rng();
    let mut scalars = Vec::with_capacity(count);
    for _ in 0..count {
        let mut accepted = None;
        for _ in 0..RANDOM_SCALAR_MAX_RETRIES {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            if let Some(s) = Option::<Scalar>::from(Scalar::from_be_bytes(&bytes)) {
                accepted = Some(s);
                break;
            }
        }
        scalars.push(accepted.ok_or_else(|| {
            Error::CryptoFailure("random scalar sampling exhausted its retries".into())
        })?);
    }
    Ok(scalars)
}

/// Strict G1 parser: 48 octets, valid Zcash encoding, on curve, in the
/// prime-order subgroup, not the identity.
pub fn parse_g1_projective(bytes: &[u8]) -> Result<G1Projective, Error> {
    let bytes: [u8; 48] = bytes
        .try_into()
        .map_err(|_| Error::InvalidEncoding("G1 point must be 48 octets".into()))?;
    let point = Option::<G1Affine>::from(G1Affine::from_compressed(&bytes))
        .map(G1Projective::from)
        .ok_or_else(|| Error::InvalidEncoding("invalid G1 encoding".into()))?;
    if point == G1Projective::IDENTITY {
        return Err(Error::InvalidEncoding("G1 identity not allowed".into()));
    }
    Ok(point)
}

/// Strict G2 parser: 96 octets, valid encoding, in subgroup, not identity.
pub fn parse_g2_projective(bytes: &[u8]) -> Result<G2Projective, Error> {
    let bytes: [u8; 96] = bytes
        .try_into()
        .map_err(|_| Error::InvalidEncoding("G2 point must be 96 octets".into()))?;
    let point = Option::<G2Affine>::from(G2Affine::from_compressed(&bytes))
        .map(G2Projective::from)
        .ok_or_else(|| Error::InvalidEncoding("invalid G2 encoding".into()))?;
    if point == G2Projective::IDENTITY {
        return Err(Error::InvalidEncoding("G2 identity not allowed".into()));
    }
    Ok(point)
}

/// The ordered complement of `indexes` in `0..len`.
pub fn get_remaining_indexes(len: usize, indexes: &[usize]) -> Vec<usize> {
    (0..len).filter(|i| !indexes.contains(i)).collect()
}
