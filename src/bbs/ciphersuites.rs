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

use crate::errors::Error;
use crate::hash2curve::{expand_message_xmd, expand_message_xof};
use bls12_381_plus::{G1Affine, G1Projective};
use serde::{Deserialize, Serialize};

/// Parameters of a BBS ciphersuite: identifiers, domain separation tags,
/// the fixed base point P1 and the message-expansion function.
///
/// The two implementors differ only in the expand function identity
/// (XMD/SHA-256 vs XOF/SHAKE-256) and in every derived constant that
/// embeds the ciphersuite ID.
pub trait BbsCiphersuite: Eq + 'static {
    /// Ciphersuite identifier
    const ID: &'static [u8];
    /// API identifier: `ID || "H2G_HM2S_"`
    const API_ID: &'static [u8];
    /// Seed for the message generator sequence
    const GENERATOR_SEED: &'static [u8] = b"MESSAGE_GENERATOR_SEED";
    /// Seed from which the fixed base point P1 is derived
    const BP_GENERATOR_SEED: &'static [u8] = b"BP_MESSAGE_GENERATOR_SEED";
    /// DST for the generator seed expansion
    const GENERATOR_SEED_DST: &'static [u8] = b"SIG_GENERATOR_SEED_";
    /// DST for hashing generator candidates to the curve
    const GENERATOR_DST: &'static [u8] = b"SIG_GENERATOR_DST_";
    /// DST suffix for mapping messages to scalars
    const MAP_MSG_SCALAR: &'static [u8] = b"MAP_MSG_TO_SCALAR_AS_HASH_";
    /// DST suffix for hash-to-scalar
    const H2S: &'static [u8] = b"H2S_";
    /// DST suffix for key generation
    const KEYGEN_DST: &'static [u8] = b"KEYGEN_DST_";

    /// The fixed G1 base point of the ciphersuite, Zcash-compressed hex
    const P1: &'static str;

    /// Octets drawn from the expand function per uniform value
    const EXPAND_LEN: usize = 48;
    /// Serialized scalar width
    const OCTET_SCALAR_LEN: usize = 32;
    /// Serialized compressed G1 point width
    const OCTET_POINT_LEN: usize = 48;
    /// Minimum length of input key material
    const IKM_LEN: usize = 32;

    /// The ciphersuite's `expand_message` (RFC 9380 §5.3).
    fn expand_message(msg: &[u8], dst: &[u8], len_in_bytes: usize) -> Result<Vec<u8>, Error>;

    /// Default key generation DST: `ID || "KEYGEN_DST_"`.
    fn keygen_dst() -> Vec<u8> {
        [Self::ID, Self::KEYGEN_DST].concat()
    }

    /// Default hash-to-scalar DST: `API_ID || "H2S_"`.
    fn hash_to_scalar_dst() -> Vec<u8> {
        [Self::API_ID, Self::H2S].concat()
    }

    /// DST mapping message octets to scalars.
    fn map_msg_to_scalar_as_hash_dst() -> Vec<u8> {
        [Self::API_ID, Self::MAP_MSG_SCALAR].concat()
    }

    /// Seed of the message generator sequence.
    fn generator_seed() -> Vec<u8> {
        [Self::API_ID, Self::GENERATOR_SEED].concat()
    }

    /// DST of the rolling seed expansion.
    fn generator_seed_dst() -> Vec<u8> {
        [Self::API_ID, Self::GENERATOR_SEED_DST].concat()
    }

    /// DST of the candidate-to-curve hashing.
    fn generator_dst() -> Vec<u8> {
        [Self::API_ID, Self::GENERATOR_DST].concat()
    }

    /// The fixed base point P1.
    fn p1() -> G1Projective {
        let bytes: [u8; 48] = hex::decode(Self::P1)
            .expect("valid ciphersuite constant")
            .try_into()
            .expect("48-octet ciphersuite constant");
        G1Affine::from_compressed(&bytes)
            .map(G1Projective::from)
            .unwrap()
    }
}

/// BLS12-381 ciphersuite with SHAKE-256 based message expansion.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Bls12381Shake256;

/// BLS12-381 ciphersuite with SHA-256 based message expansion.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Bls12381Sha256;

impl BbsCiphersuite for Bls12381Shake256 {
    const ID: &'static [u8] = b"BBS_BLS12381G1_XOF:SHAKE-256_SSWU_RO_";
    const API_ID: &'static [u8] = b"BBS_BLS12381G1_XOF:SHAKE-256_SSWU_RO_H2G_HM2S_";

    const P1: &'static str = "8929dfbc7e6642c4ed9cba0856e493f8b9d7d5fcb0c31ef8fdcd34d50648a56c795e106e9eada6e0bda386b414150755";

    fn expand_message(msg: &[u8], dst: &[u8], len_in_bytes: usize) -> Result<Vec<u8>, Error> {
        expand_message_xof(msg, dst, len_in_bytes)
    }
}

impl BbsCiphersuite for Bls12381Sha256 {
    const ID: &'static [u8] = b"BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_";
    const API_ID: &'static [u8] = b"BBS_BLS12381G1_XMD:SHA-256_SSWU_RO_H2G_HM2S_";

    const P1: &'static str = "a8ce256102840821a3e94ea9025e4662b205762f9776b3a766c872b948f1fd225e7c59698588e70d11406d161b4e28c9";

    fn expand_message(msg: &[u8], dst: &[u8], len_in_bytes: usize) -> Result<Vec<u8>, Error> {
        expand_message_xmd(msg, dst, len_in_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash2curve::hash_to_curve;
    use crate::utils::serialize::i2osp;
    use elliptic_curve::group::Curve;

    // P1 is not an arbitrary constant: it is the first generator of the
    // BP_MESSAGE_GENERATOR_SEED sequence. Re-deriving it exercises the
    // whole expand / hash-to-field / SSWU / isogeny / cofactor pipeline.
    fn derive_p1<CS: BbsCiphersuite>() -> G1Projective {
        let seed = [CS::API_ID, CS::BP_GENERATOR_SEED].concat();
        let seed_dst = CS::generator_seed_dst();
        let mut v = CS::expand_message(&seed, &seed_dst, CS::EXPAND_LEN).unwrap();
        v = CS::expand_message(&[v.as_slice(), &i2osp::<8>(1)].concat(), &seed_dst, CS::EXPAND_LEN)
            .unwrap();
        hash_to_curve::<CS>(&v, &CS::generator_dst()).unwrap()
    }

    #[test]
    fn p1_matches_its_seed_derivation_sha256() {
        let derived = derive_p1::<Bls12381Sha256>();
        assert_eq!(
            hex::encode(derived.to_affine().to_compressed()),
            Bls12381Sha256::P1
        );
    }

    #[test]
    fn p1_matches_its_seed_derivation_shake256() {
        let derived = derive_p1::<Bls12381Shake256>();
        assert_eq!(
            hex::encode(derived.to_affine().to_compressed()),
            Bls12381Shake256::P1
        );
    }
}
