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
use crate::bbs::generators::Generators;
use crate::bbs::keys::{BbsPublicKey, BbsSecretKey};
use crate::errors::Error;
use crate::utils::message::BbsMessage;
use crate::utils::serialize::{serialize, SerializeItem};
use crate::utils::util::{calculate_domain, hash_to_scalar, parse_g1_projective, ScalarExt};
use bls12_381_plus::{multi_miller_loop, G1Projective, G2Prepared, G2Projective, Gt, Scalar};
use elliptic_curve::group::Curve;
use serde::{Deserialize, Serialize};

/// A BBS signature: the pair (A ∈ G1, e ∈ Fr), 80 octets on the wire.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BbsSignature<CS: BbsCiphersuite> {
    /// The signature point
    pub A: G1Projective,
    /// The signature scalar
    pub e: Scalar,
    #[serde(skip)]
    _suite: core::marker::PhantomData<CS>,
}

impl<CS: BbsCiphersuite> BbsSignature<CS> {
    /// Wire length: `A (48) ‖ e (32)`.
    pub const BYTES: usize = 80;

    /// Sign `messages` under `header` with the Issuer secret key.
    ///
    /// Deterministic: identical inputs yield identical signatures.
    pub fn sign(
        sk: &BbsSecretKey,
        pk: &BbsPublicKey,
        header: Option<&[u8]>,
        messages: &[Vec<u8>],
    ) -> Result<Self, Error> {
        let message_scalars = BbsMessage::messages_to_scalar::<CS>(messages)?;
        let generators = Generators::create::<CS>(messages.len() + 1)?;
        core_sign::<CS>(sk, pk, &generators, header, &message_scalars)
    }

    /// Check the signature over `messages` and `header` against `pk`.
    ///
    /// `Ok(false)` means the pairing equation does not hold; structural
    /// problems with the inputs surface as errors instead.
    pub fn verify(
        &self,
        pk: &BbsPublicKey,
        header: Option<&[u8]>,
        messages: &[Vec<u8>],
    ) -> Result<bool, Error> {
        let message_scalars = BbsMessage::messages_to_scalar::<CS>(messages)?;
        let generators = Generators::create::<CS>(messages.len() + 1)?;
        core_verify::<CS>(pk, self, &generators, header, &message_scalars)
    }

    /// The 80-octet wire form.
    pub fn to_bytes(&self) -> [u8; 80] {
        let mut bytes = [0u8; 80];
        bytes[..48].copy_from_slice(&self.A.to_affine().to_compressed());
        bytes[48..].copy_from_slice(&self.e.to_be_bytes());
        bytes
    }

    /// Strict decoder: exactly 80 octets; A decodes, is in the subgroup
    /// and is neither the identity nor the G1 base point sentinel; e is
    /// strictly in (0, r).
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() != Self::BYTES {
            return Err(Error::InvalidEncoding(format!(
                "signature must be {} octets, got {}",
                Self::BYTES,
                data.len()
            )));
        }
        let A = parse_g1_projective(&data[..48])?;
        if A == G1Projective::GENERATOR {
            return Err(Error::InvalidEncoding(
                "signature point is the G1 base point".into(),
            ));
        }
        let e = Scalar::from_bytes_be(&data[48..])?;
        if e == Scalar::from(0u64) {
            return Err(Error::InvalidEncoding("signature scalar is zero".into()));
        }
        Ok(Self {
            A,
            e,
            _suite: core::marker::PhantomData,
        })
    }
}

/// B = P1 + Q1 · domain + Σ H_i · msg_i, shared by signing, verification
/// and proof generation.
pub(super) fn compute_b<CS: BbsCiphersuite>(
    domain: Scalar,
    generators: &Generators,
    messages: &[BbsMessage],
) -> G1Projective {
    let q1 = generators.values[0];
    let h_points = &generators.values[1..];
    let mut b = CS::p1() + q1 * domain;
    for (h, m) in h_points.iter().zip(messages) {
        b += *h * m.value;
    }
    b
}

fn core_sign<CS: BbsCiphersuite>(
    sk: &BbsSecretKey,
    pk: &BbsPublicKey,
    generators: &Generators,
    header: Option<&[u8]>,
    messages: &[BbsMessage],
) -> Result<BbsSignature<CS>, Error> {
    let L = messages.len();
    if generators.values.len() != L + 1 {
        return Err(Error::InvalidArgument("not enough generators".into()));
    }
    let q1 = generators.values[0];
    let h_points = &generators.values[1..];

    let domain = calculate_domain::<CS>(pk, q1, h_points, header)?;

    // e = hash_to_scalar(serialize((SK, domain, msg_1, ..., msg_L)))
    let mut e_input = Vec::with_capacity(L + 2);
    e_input.push(SerializeItem::Scalar(sk.0));
    e_input.push(SerializeItem::Scalar(domain));
    e_input.extend(messages.iter().map(|m| SerializeItem::Scalar(m.value)));
    let e = hash_to_scalar::<CS>(&serialize(&e_input), &CS::hash_to_scalar_dst())?;

    let B = compute_b::<CS>(domain, generators, messages);

    let sk_e = sk.0 + e;
    let sk_e_inv = Option::<Scalar>::from(sk_e.invert())
        .ok_or_else(|| Error::CryptoFailure("SK + e = 0 mod r".into()))?;
    let A = B * sk_e_inv;
    if A == G1Projective::IDENTITY {
        return Err(Error::CryptoFailure("signature point is the identity".into()));
    }

    Ok(BbsSignature {
        A,
        e,
        _suite: core::marker::PhantomData,
    })
}

fn core_verify<CS: BbsCiphersuite>(
    pk: &BbsPublicKey,
    signature: &BbsSignature<CS>,
    generators: &Generators,
    header: Option<&[u8]>,
    messages: &[BbsMessage],
) -> Result<bool, Error> {
    let L = messages.len();
    if generators.values.len() != L + 1 {
        return Err(Error::InvalidArgument("not enough generators".into()));
    }
    let q1 = generators.values[0];
    let h_points = &generators.values[1..];

    let domain = calculate_domain::<CS>(pk, q1, h_points, header)?;
    let B = compute_b::<CS>(domain, generators, messages);

    // e(A, W + BP2 * e) == e(B, BP2)
    let BP2 = G2Projective::GENERATOR;
    let A2 = pk.0 + BP2 * signature.e;

    let term1 = (
        &signature.A.to_affine(),
        &G2Prepared::from(A2.to_affine()),
    );
    let neg_bp2 = -BP2;
    let term2 = (&B.to_affine(), &G2Prepared::from(neg_bp2.to_affine()));

    let pairing = multi_miller_loop(&[term1, term2]).final_exponentiation();
    if pairing == Gt::IDENTITY {
        Ok(true)
    } else {
        log::debug!("signature pairing check failed");
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbs::ciphersuites::{Bls12381Sha256, Bls12381Shake256};
    use crate::bbs::keys::KeyPair;

    const IKM: &str = "746869732d49532d6a7573742d616e2d546573742d494b4d2d746f2d67656e65726174652d246528724074232d6b6579";
    const KEY_INFO: &str = "746869732d49532d736f6d652d6b65792d6d657461646174612d746f2d62652d757365642d696e2d746573742d6b65792d67656e";
    const HEADER: &str = "11223344556677889900aabbccddeeff";

    const MESSAGES: [&str; 10] = [
        "9872ad089e452c7b6e283dfac2a80d58e8d0ff71cc4d5e310a1debdda4a45f02",
        "87a8bd656d49ee07b8110e1d8fd4f1dcef6fb9bc368c492d9bc8c4f98a739ac6",
        "96012096adda3f13dd4adbe4eea481a4c4b5717932b73b00e31807d3c5894b90",
        "ac55fb33a75909edac8994829b250779298aa75d69324a365733f16c333fa943",
        "d183ddc6e2665aa4e2f088af9297b78c0d22b4290273db637ed33ff5cf703151",
        "515ae153e22aae04ad16f759e07237b43022cb1ced4c176e0999c6a8ba5817cc",
        "496694774c5604ab1b2544eababcf0f53278ff5040c1e77c811656e8220417a2",
        "77fe97eb97a1ebe2e81e4e3597a3ee740a66e9ef2412472c23364568523f8b91",
        "7372e9daa5ed31e6cd5c825eac1b855e84476a1d94932aa348e07b73",
        "c344136d9ab02da4dd5908bbba913ae6f58c2cc844b802a6f811f5fb075f9b80",
    ];

    fn fixture_keypair<CS: BbsCiphersuite>() -> KeyPair<CS> {
        KeyPair::<CS>::generate(
            &hex::decode(IKM).unwrap(),
            Some(&hex::decode(KEY_INFO).unwrap()),
            None,
        )
        .unwrap()
    }

    fn fixture_messages(n: usize) -> Vec<Vec<u8>> {
        MESSAGES[..n]
            .iter()
            .map(|m| hex::decode(m).unwrap())
            .collect()
    }

    fn signature_known_answer<CS: BbsCiphersuite>(n: usize, expected_hex: &str) {
        let keypair = fixture_keypair::<CS>();
        let header = hex::decode(HEADER).unwrap();
        let messages = fixture_messages(n);
        let signature = BbsSignature::<CS>::sign(
            keypair.private_key(),
            keypair.public_key(),
            Some(&header),
            &messages,
        )
        .unwrap();
        assert_eq!(hex::encode(signature.to_bytes()), expected_hex);
        assert!(signature
            .verify(keypair.public_key(), Some(&header), &messages)
            .unwrap());
    }

    #[test]
    fn single_message_signature_sha256() {
        signature_known_answer::<Bls12381Sha256>(
            1,
            "8efbfc68b322c490e759664c89d766663999a6e95ebd6afe5ea9d0d78b8c84ff85cde81ea9211d28c2aa57663c0defba56a5bf06cf877a7a55c46e3841bae41800d2d52edb04ff69afcb977a24027146",
        );
    }

    #[test]
    fn multi_message_signature_sha256() {
        signature_known_answer::<Bls12381Sha256>(
            10,
            "a0587b31d7d35120daac6bd989d0eec68c90d0f58fa2d2b1436f627738e25275d8f0bc35a26534a7c1ff8103308ce9573ff6c1a8d3999f5cf458198d26228596a2bf5bdb9bc9a4eb0bd7f8163e675d01",
        );
    }

    #[test]
    fn single_message_signature_shake256() {
        signature_known_answer::<Bls12381Shake256>(
            1,
            "a7bbc45ff258770e39b4f21e42769e1ec331bd1c188c70f4c7311c2ebd21db80f0942c0ee820c3d61fc4b0702aea953a3c625ece24a63b113c118fd186e0b36c39635ed56bc1183a3744170889e63b0a",
        );
    }

    #[test]
    fn multi_message_signature_shake256() {
        signature_known_answer::<Bls12381Shake256>(
            10,
            "963dcf85a5bcdfabfeb995f1424718e1812bc902f6608ee7df7e1f509061128332b6420f1946f2ea7d2366580100512e1cb01ecbfe13a7fb3bb475975bcc82649dac0238e9ec9db9b66555bb42393920",
        );
    }

    #[test]
    fn empty_header_signature_sha256() {
        let keypair = fixture_keypair::<Bls12381Sha256>();
        let messages = fixture_messages(1);
        let signature = BbsSignature::<Bls12381Sha256>::sign(
            keypair.private_key(),
            keypair.public_key(),
            None,
            &messages,
        )
        .unwrap();
        assert_eq!(
            hex::encode(signature.to_bytes()),
            "b7cfc00fd385f04370c18fa6555ea481f0eb5068334a952caa9d98138da683ad7f43a8ef8daa61689b09b0eb660320531312f309ed900f32491468e2111af3466e202bc68aa9010e01bdbbc23982d318"
        );
    }

    #[test]
    fn sign_is_deterministic() {
        let keypair = fixture_keypair::<Bls12381Sha256>();
        let messages = fixture_messages(3);
        let a = BbsSignature::<Bls12381Sha256>::sign(
            keypair.private_key(),
            keypair.public_key(),
            None,
            &messages,
        )
        .unwrap();
        let b = BbsSignature::<Bls12381Sha256>::sign(
            keypair.private_key(),
            keypair.public_key(),
            None,
            &messages,
        )
        .unwrap();
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn tampered_message_fails_verification() {
        let keypair = fixture_keypair::<Bls12381Sha256>();
        let header = hex::decode(HEADER).unwrap();
        let mut messages = fixture_messages(3);
        let signature = BbsSignature::<Bls12381Sha256>::sign(
            keypair.private_key(),
            keypair.public_key(),
            Some(&header),
            &messages,
        )
        .unwrap();

        messages[1][0] ^= 1;
        assert!(!signature
            .verify(keypair.public_key(), Some(&header), &messages)
            .unwrap());
    }

    #[test]
    fn tampered_header_fails_verification() {
        let keypair = fixture_keypair::<Bls12381Sha256>();
        let messages = fixture_messages(2);
        let signature = BbsSignature::<Bls12381Sha256>::sign(
            keypair.private_key(),
            keypair.public_key(),
            Some(b"ctx-a"),
            &messages,
        )
        .unwrap();
        assert!(!signature
            .verify(keypair.public_key(), Some(b"ctx-b"), &messages)
            .unwrap());
    }

    #[test]
    fn wrong_length_is_an_encoding_error_not_false() {
        let err = BbsSignature::<Bls12381Sha256>::from_bytes(&[0u8; 79]).unwrap_err();
        assert!(matches!(err, Error::InvalidEncoding(_)));
    }

    #[test]
    fn sentinel_and_zero_scalar_are_rejected() {
        let mut bytes = [0u8; 80];
        bytes[..48].copy_from_slice(&G1Projective::GENERATOR.to_affine().to_compressed());
        bytes[79] = 1;
        assert!(BbsSignature::<Bls12381Sha256>::from_bytes(&bytes).is_err());

        let keypair = fixture_keypair::<Bls12381Sha256>();
        let signature = BbsSignature::<Bls12381Sha256>::sign(
            keypair.private_key(),
            keypair.public_key(),
            None,
            &fixture_messages(1),
        )
        .unwrap();
        let mut bytes = signature.to_bytes();
        bytes[48..].fill(0);
        assert!(BbsSignature::<Bls12381Sha256>::from_bytes(&bytes).is_err());
    }

    #[test]
    fn signature_roundtrips_through_octets() {
        let keypair = fixture_keypair::<Bls12381Shake256>();
        let messages = fixture_messages(2);
        let signature = BbsSignature::<Bls12381Shake256>::sign(
            keypair.private_key(),
            keypair.public_key(),
            None,
            &messages,
        )
        .unwrap();
        let decoded = BbsSignature::<Bls12381Shake256>::from_bytes(&signature.to_bytes()).unwrap();
        assert_eq!(decoded, signature);
    }

    #[test]
    fn cross_suite_verification_fails() {
        let sha_keypair = fixture_keypair::<Bls12381Sha256>();
        let messages = fixture_messages(2);
        let signature = BbsSignature::<Bls12381Sha256>::sign(
            sha_keypair.private_key(),
            sha_keypair.public_key(),
            None,
            &messages,
        )
        .unwrap();

        // same signature octets, interpreted under the SHAKE-256 suite
        let shake_signature =
            BbsSignature::<Bls12381Shake256>::from_bytes(&signature.to_bytes()).unwrap();
        let pk = crate::bbs::keys::BbsPublicKey::from_bytes(&sha_keypair.public_key().to_bytes())
            .unwrap();
        assert!(!shake_signature.verify(&pk, None, &messages).unwrap());
    }
}
