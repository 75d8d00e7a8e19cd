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

//! The [BBS Signature Scheme](https://datatracker.ietf.org/doc/html/draft-irtf-cfrg-bbs-signatures)
//! over BLS12-381: compact multi-message signatures with selective
//! disclosure. An Issuer signs a vector of messages with a single
//! 80-octet signature; a Holder turns that signature into an unlinkable
//! proof of knowledge revealing only a chosen subset of the messages; a
//! Verifier checks the proof against the Issuer public key without
//! learning anything about the hidden messages.

/// Module for ciphersuites
pub mod ciphersuites;
/// Module for generators
pub mod generators;
/// Module for keys
pub mod keys;
/// Module for proofs
pub mod proof;
/// Module for signatures
pub mod signature;
/// Module for structural validators
pub mod validate;
