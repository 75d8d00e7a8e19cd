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
use crate::errors::Error;
use crate::utils::serialize::i2osp;
use crate::utils::util::{hash_to_scalar, parse_g2_projective, ScalarExt};
use bls12_381_plus::{G2Affine, G2Projective, Scalar};
use elliptic_curve::group::Curve;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// A BBS public key: W = g2 · SK, 96 octets on the wire.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BbsPublicKey(pub G2Projective);

impl BbsPublicKey {
    /// Zcash-compressed encoding (96 octets).
    pub fn to_bytes(&self) -> [u8; G2Affine::COMPRESSED_BYTES] {
        self.0.to_affine().to_compressed()
    }

    /// Hex form of [`Self::to_bytes`].
    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Decode and validate a public key: 96 octets, valid encoding, in the
    /// prime-order subgroup, not the identity.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self(parse_g2_projective(bytes)?))
    }
}

/// A BBS secret key: a nonzero Fr scalar, held by the Issuer.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BbsSecretKey(pub Scalar);

impl BbsSecretKey {
    /// Big-endian 32-octet encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes()
    }

    /// Hex form of [`Self::to_bytes`].
    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Decode a secret key; rejects non-canonical and zero scalars.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let s = Scalar::from_bytes_be(bytes)?;
        if s == Scalar::from(0u64) {
            return Err(Error::InvalidEncoding("secret key must be nonzero".into()));
        }
        Ok(Self(s))
    }

    /// The corresponding [`BbsPublicKey`].
    pub fn public_key(&self) -> BbsPublicKey {
        BbsPublicKey(sk_to_pk(self.0))
    }
}

/// A (SK, PK) pair for one ciphersuite.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct KeyPair<CS: BbsCiphersuite> {
    pub(crate) public: BbsPublicKey,
    pub(crate) private: BbsSecretKey,
    #[serde(skip)]
    pub(crate) _suite: core::marker::PhantomData<CS>,
}

impl<CS: BbsCiphersuite> KeyPair<CS> {
    /// Returns a reference to the public key.
    pub fn public_key(&self) -> &BbsPublicKey {
        &self.public
    }

    /// Returns a reference to the private key.
    pub fn private_key(&self) -> &BbsSecretKey {
        &self.private
    }

    /// Returns the couple `(sk, pk)`.
    pub fn into_parts(self) -> (BbsSecretKey, BbsPublicKey) {
        (self.private, self.public)
    }

    /// Generate a keypair deterministically from secret key material.
    ///
    /// * `key_material` MUST hold at least 32 octets of entropy.
    /// * `key_info` defaults to the empty octet string; at most 65535 octets.
    /// * `key_dst` defaults to `ciphersuite_id || "KEYGEN_DST_"`.
    pub fn generate(
        key_material: &[u8],
        key_info: Option<&[u8]>,
        key_dst: Option<&[u8]>,
    ) -> Result<Self, Error> {
        let sk = key_gen::<CS>(key_material, key_info, key_dst)?;
        Ok(Self {
            public: BbsPublicKey(sk_to_pk(sk)),
            private: BbsSecretKey(sk),
            _suite: core::marker::PhantomData,
        })
    }

    /// Generate a random keypair from fresh CSPRNG key material.
    pub fn random() -> Result<Self, Error> {
        let mut key_material = vec![0u8; CS::IKM_LEN];
        rand::thread_rng().fill_bytes(&mut key_material);
        Self::generate(&key_material, None, None)
    }
}

/// KeyGen: SK = hash_to_scalar(key_material ‖ I2OSP(len(key_info), 2) ‖
/// key_info, key_dst).
fn key_gen<CS: BbsCiphersuite>(
    key_material: &[u8],
    key_info: Option<&[u8]>,
    key_dst: Option<&[u8]>,
) -> Result<Scalar, Error> {
    if key_material.len() < CS::IKM_LEN {
        return Err(Error::InvalidArgument(
            "length(key_material) < 32".into(),
        ));
    }
    let key_info = key_info.unwrap_or(&[]);
    if key_info.len() > 65535 {
        return Err(Error::InvalidArgument("length(key_info) > 65535".into()));
    }

    let key_dst_default = CS::keygen_dst();
    let key_dst = key_dst.unwrap_or(&key_dst_default);

    let derive_input = [key_material, &i2osp::<2>(key_info.len()), key_info].concat();
    let sk = hash_to_scalar::<CS>(&derive_input, key_dst)?;
    if sk == Scalar::from(0u64) {
        return Err(Error::CryptoFailure("derived zero secret key".into()));
    }
    Ok(sk)
}

/// SkToPk: W = SK · BP2.
fn sk_to_pk(sk: Scalar) -> G2Projective {
    G2Affine::generator() * sk
}
