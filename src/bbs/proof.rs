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
use crate::bbs::keys::BbsPublicKey;
use crate::bbs::signature::{compute_b, BbsSignature};
use crate::errors::Error;
use crate::utils::message::BbsMessage;
use crate::utils::serialize::{i2osp, serialize, SerializeItem};
use crate::utils::util::{
    calculate_domain, calculate_random_scalars, get_remaining_indexes, hash_to_scalar,
    parse_g1_projective, ScalarExt,
};
use bls12_381_plus::{multi_miller_loop, G1Projective, G2Prepared, G2Projective, Gt, Scalar};
use elliptic_curve::group::Curve;
use serde::{Deserialize, Serialize};

/// Minimum proof length: three G1 points and four scalars.
pub const PROOF_LEN_FLOOR: usize = 3 * 48 + 4 * 32;

/// A zero-knowledge proof of knowledge of a BBS signature, disclosing a
/// subset of the signed messages.
///
/// Wire form: `Abar ‖ Bbar ‖ D ‖ ê ‖ r̂1 ‖ r̂3 ‖ m̂_1..m̂_U ‖ c`, which is
/// `3·48 + (4 + U)·32` octets for U undisclosed messages.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PoKSignature<CS: BbsCiphersuite> {
    Abar: G1Projective,
    Bbar: G1Projective,
    D: G1Projective,
    e_cap: Scalar,
    r1_cap: Scalar,
    r3_cap: Scalar,
    m_cap: Vec<Scalar>,
    challenge: Scalar,
    #[serde(skip)]
    _suite: core::marker::PhantomData<CS>,
}

/// Check that `indexes` are 1-based, strictly increasing and within
/// `[1, L]`.
fn validate_disclosed_indexes(indexes: &[usize], L: usize) -> Result<(), Error> {
    let mut previous = 0usize;
    for &i in indexes {
        if i < 1 || i > L {
            return Err(Error::InvalidArgument(format!(
                "disclosed index {} outside [1, {}]",
                i, L
            )));
        }
        if i <= previous {
            return Err(Error::InvalidArgument(
                "disclosed indexes must be strictly increasing".into(),
            ));
        }
        previous = i;
    }
    Ok(())
}

impl<CS: BbsCiphersuite> PoKSignature<CS> {
    /// Fiat–Shamir challenge over the full public transcript:
    /// serialize((Abar, Bbar, D, T1, T2, R, i_1−1..i_R−1,
    /// disclosed_msg_1..disclosed_msg_R, domain)) ‖ I2OSP(len(ph), 8) ‖ ph.
    fn calculate_challenge(
        Abar: G1Projective,
        Bbar: G1Projective,
        D: G1Projective,
        T1: G1Projective,
        T2: G1Projective,
        disclosed_indexes: &[usize],
        disclosed_messages: &[BbsMessage],
        domain: Scalar,
        ph: Option<&[u8]>,
    ) -> Result<Scalar, Error> {
        let ph = ph.unwrap_or(b"");
        let R = disclosed_indexes.len();
        if R != disclosed_messages.len() {
            return Err(Error::InvalidArgument(
                "disclosed indexes and messages differ in length".into(),
            ));
        }

        let mut items = Vec::with_capacity(2 * R + 7);
        items.push(SerializeItem::Point1(Abar));
        items.push(SerializeItem::Point1(Bbar));
        items.push(SerializeItem::Point1(D));
        items.push(SerializeItem::Point1(T1));
        items.push(SerializeItem::Point1(T2));
        items.push(SerializeItem::U64(R as u64));
        // the transcript carries 0-based positions
        items.extend(disclosed_indexes.iter().map(|&i| SerializeItem::U64(i as u64)));
        items.extend(disclosed_messages.iter().map(|m| SerializeItem::Scalar(m.value)));
        items.push(SerializeItem::Scalar(domain));

        let mut c_octs = serialize(&items);
        c_octs.extend_from_slice(&i2osp::<8>(ph.len()));
        c_octs.extend_from_slice(ph);

        hash_to_scalar::<CS>(&c_octs, &CS::hash_to_scalar_dst())
    }

    /// Derive a selective-disclosure proof from a signature.
    ///
    /// * `signature` — the 80-octet signature over `messages` and `header`.
    /// * `ph` — the Holder-chosen presentation header bound into the proof.
    /// * `disclosed_indexes` — 1-based, strictly increasing positions of
    ///   the messages to reveal.
    ///
    /// Randomized: every call yields a fresh, unlinkable proof.
    pub fn proof_gen(
        pk: &BbsPublicKey,
        signature: &[u8],
        header: Option<&[u8]>,
        ph: Option<&[u8]>,
        messages: &[Vec<u8>],
        disclosed_indexes: &[usize],
    ) -> Result<Self, Error> {
        let signature = BbsSignature::<CS>::from_bytes(signature)?;
        let L = messages.len();
        validate_disclosed_indexes(disclosed_indexes, L)?;

        let message_scalars = BbsMessage::messages_to_scalar::<CS>(messages)?;
        let generators = Generators::create::<CS>(L + 1)?;
        let h_points = &generators.values[1..];

        let disclosed: Vec<usize> = disclosed_indexes.iter().map(|&i| i - 1).collect();
        let undisclosed = get_remaining_indexes(L, &disclosed);
        let U = undisclosed.len();

        let random_scalars = calculate_random_scalars(5 + U)?;
        let r1 = random_scalars[0];
        let r2 = random_scalars[1];
        let e_tilde = random_scalars[2];
        let r1_tilde = random_scalars[3];
        let r3_tilde = random_scalars[4];
        let m_tilde = &random_scalars[5..];

        let domain = calculate_domain::<CS>(pk, generators.values[0], h_points, header)?;
        let B = compute_b::<CS>(domain, &generators, &message_scalars);

        let D = B * r2;
        let Abar = signature.A * (r1 * r2);
        let Bbar = D * r1 - Abar * signature.e;

        let T1 = Abar * e_tilde + D * r1_tilde;
        let mut T2 = D * r3_tilde;
        for (&j, m_tilde_j) in undisclosed.iter().zip(m_tilde) {
            T2 += h_points[j] * *m_tilde_j;
        }

        let disclosed_messages: Vec<BbsMessage> =
            disclosed.iter().map(|&i| message_scalars[i]).collect();
        let challenge = Self::calculate_challenge(
            Abar,
            Bbar,
            D,
            T1,
            T2,
            &disclosed,
            &disclosed_messages,
            domain,
            ph,
        )?;

        let r3 = Option::<Scalar>::from(r2.invert())
            .ok_or_else(|| Error::CryptoFailure("degenerate random scalar".into()))?;
        let e_cap = e_tilde + signature.e * challenge;
        let r1_cap = r1_tilde - r1 * challenge;
        let r3_cap = r3_tilde - r3 * challenge;
        let m_cap: Vec<Scalar> = undisclosed
            .iter()
            .zip(m_tilde)
            .map(|(&j, m_tilde_j)| *m_tilde_j + message_scalars[j].value * challenge)
            .collect();

        Ok(Self {
            Abar,
            Bbar,
            D,
            e_cap,
            r1_cap,
            r3_cap,
            m_cap,
            challenge,
            _suite: core::marker::PhantomData,
        })
    }

    /// Verify the proof against the Issuer public key and the disclosed
    /// messages at their claimed (1-based) positions.
    ///
    /// `Ok(false)` for any cryptographic mismatch (challenge or pairing);
    /// structural problems surface as errors.
    pub fn proof_verify(
        &self,
        pk: &BbsPublicKey,
        header: Option<&[u8]>,
        ph: Option<&[u8]>,
        disclosed_messages: &[Vec<u8>],
        disclosed_indexes: &[usize],
    ) -> Result<bool, Error> {
        let U = self.m_cap.len();
        let R = disclosed_indexes.len();
        if disclosed_messages.len() != R {
            return Err(Error::InvalidArgument(
                "disclosed indexes and messages differ in length".into(),
            ));
        }
        let L = R + U;
        validate_disclosed_indexes(disclosed_indexes, L)?;

        let disclosed: Vec<usize> = disclosed_indexes.iter().map(|&i| i - 1).collect();
        let undisclosed = get_remaining_indexes(L, &disclosed);

        let disclosed_scalars = BbsMessage::messages_to_scalar::<CS>(disclosed_messages)?;
        let generators = Generators::create::<CS>(L + 1)?;
        let q1 = generators.values[0];
        let h_points = &generators.values[1..];

        let domain = calculate_domain::<CS>(pk, q1, h_points, header)?;

        let T1 = self.Bbar * self.challenge + self.Abar * self.e_cap + self.D * self.r1_cap;
        let mut Bv = CS::p1() + q1 * domain;
        for (&i, m) in disclosed.iter().zip(&disclosed_scalars) {
            Bv += h_points[i] * m.value;
        }
        let mut T2 = Bv * self.challenge + self.D * self.r3_cap;
        for (&j, m_cap_j) in undisclosed.iter().zip(&self.m_cap) {
            T2 += h_points[j] * *m_cap_j;
        }

        let challenge = Self::calculate_challenge(
            self.Abar,
            self.Bbar,
            self.D,
            T1,
            T2,
            &disclosed,
            &disclosed_scalars,
            domain,
            ph,
        )?;
        // Scalar equality is constant time in the backend
        if challenge != self.challenge {
            log::debug!("proof challenge mismatch");
            return Ok(false);
        }

        // e(Abar, W) == e(Bbar, BP2)
        let term1 = (
            &self.Abar.to_affine(),
            &G2Prepared::from(pk.0.to_affine()),
        );
        let neg_bp2 = -G2Projective::GENERATOR;
        let term2 = (&self.Bbar.to_affine(), &G2Prepared::from(neg_bp2.to_affine()));

        let pairing = multi_miller_loop(&[term1, term2]).final_exponentiation();
        if pairing == Gt::IDENTITY {
            Ok(true)
        } else {
            log::debug!("proof pairing check failed");
            Ok(false)
        }
    }

    /// Number of undisclosed messages the proof commits to.
    pub fn undisclosed_count(&self) -> usize {
        self.m_cap.len()
    }

    /// Wire form: `3·48 + (4 + U)·32` octets.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PROOF_LEN_FLOOR + 32 * self.m_cap.len());
        bytes.extend_from_slice(&self.Abar.to_affine().to_compressed());
        bytes.extend_from_slice(&self.Bbar.to_affine().to_compressed());
        bytes.extend_from_slice(&self.D.to_affine().to_compressed());
        bytes.extend_from_slice(&self.e_cap.to_be_bytes());
        bytes.extend_from_slice(&self.r1_cap.to_be_bytes());
        bytes.extend_from_slice(&self.r3_cap.to_be_bytes());
        for m in &self.m_cap {
            bytes.extend_from_slice(&m.to_be_bytes());
        }
        bytes.extend_from_slice(&self.challenge.to_be_bytes());
        bytes
    }

    /// Strict decoder: length at the floor plus a whole number of scalars,
    /// three non-identity subgroup points, every scalar strictly in (0, r).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < PROOF_LEN_FLOOR || (bytes.len() - PROOF_LEN_FLOOR) % 32 != 0 {
            return Err(Error::InvalidEncoding(format!(
                "proof length {} is not {} + a multiple of 32",
                bytes.len(),
                PROOF_LEN_FLOOR
            )));
        }
        let U = (bytes.len() - PROOF_LEN_FLOOR) / 32;

        let Abar = parse_g1_projective(&bytes[0..48])?;
        let Bbar = parse_g1_projective(&bytes[48..96])?;
        let D = parse_g1_projective(&bytes[96..144])?;

        let mut scalars = Vec::with_capacity(4 + U);
        for chunk in bytes[144..].chunks(32) {
            let s = Scalar::from_bytes_be(chunk)?;
            if s == Scalar::from(0u64) {
                return Err(Error::InvalidEncoding("proof scalar is zero".into()));
            }
            scalars.push(s);
        }

        let challenge = scalars[3 + U];
        Ok(Self {
            Abar,
            Bbar,
            D,
            e_cap: scalars[0],
            r1_cap: scalars[1],
            r3_cap: scalars[2],
            m_cap: scalars[3..3 + U].to_vec(),
            challenge,
            _suite: core::marker::PhantomData,
        })
    }
}
