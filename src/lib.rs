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

//! # zkbbs
//!
//! An implementation of the [BBS signature scheme](https://datatracker.ietf.org/doc/html/draft-irtf-cfrg-bbs-signatures)
//! over the BLS12-381 pairing-friendly curve.
//!
//! BBS lets an Issuer sign a vector of messages with one short signature
//! (80 octets), and lets a Holder derive an unlinkable zero-knowledge proof
//! that discloses any chosen subset of the signed messages while proving
//! possession of a valid signature over the whole vector. A Verifier checks
//! such proofs against the Issuer public key alone, learning nothing about
//! the undisclosed messages.
//!
//! Two ciphersuites are provided, selected by a type parameter:
//! * [`Bls12381Sha256`](bbs::ciphersuites::Bls12381Sha256) — `expand_message_xmd` with SHA-256
//! * [`Bls12381Shake256`](bbs::ciphersuites::Bls12381Shake256) — `expand_message_xof` with SHAKE-256
//!
//! ## Example
//!
//! ```
//! use zkbbs::bbs::ciphersuites::Bls12381Sha256;
//! use zkbbs::bbs::keys::KeyPair;
//! use zkbbs::bbs::signature::BbsSignature;
//! use zkbbs::bbs::proof::PoKSignature;
//!
//! let keypair = KeyPair::<Bls12381Sha256>::random()?;
//! let messages: Vec<Vec<u8>> = vec![b"m1".to_vec(), b"m2".to_vec(), b"m3".to_vec()];
//!
//! let signature = BbsSignature::<Bls12381Sha256>::sign(
//!     keypair.private_key(),
//!     keypair.public_key(),
//!     None,
//!     &messages,
//! )?;
//! assert!(signature.verify(keypair.public_key(), None, &messages)?);
//!
//! // disclose the first and third message only (indexes are 1-based)
//! let proof = PoKSignature::<Bls12381Sha256>::proof_gen(
//!     keypair.public_key(),
//!     &signature.to_bytes(),
//!     None,
//!     Some(b"presentation-nonce"),
//!     &messages,
//!     &[1, 3],
//! )?;
//! let disclosed = vec![messages[0].clone(), messages[2].clone()];
//! assert!(proof.proof_verify(
//!     keypair.public_key(),
//!     None,
//!     Some(b"presentation-nonce"),
//!     &disclosed,
//!     &[1, 3],
//! )?);
//! # Ok::<(), zkbbs::errors::Error>(())
//! ```

#![warn(missing_docs)]
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

/// Errors module
pub mod errors;
/// Hash-to-curve to BLS12-381 G1 (RFC 9380)
pub mod hash2curve;
/// Utils module
pub mod utils;

/// BBS signature scheme module
pub mod bbs;
