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

//! Structural validators over raw octets, usable before any cryptographic
//! verification. Pure and total: they consult no key, message or
//! ciphersuite state, only the encoding rules.

use crate::bbs::ciphersuites::Bls12381Sha256;
use crate::bbs::keys::BbsPublicKey;
use crate::bbs::proof::PoKSignature;
use crate::bbs::signature::BbsSignature;

/// Is `octets` a well-formed public key? 96 octets, valid encoding, in the
/// G2 subgroup, not the identity.
pub fn pubkey_valid(octets: &[u8]) -> bool {
    BbsPublicKey::from_bytes(octets).is_ok()
}

/// Is `octets` a well-formed signature? 80 octets, A decodes and is
/// neither the identity nor the base point sentinel, e strictly in (0, r).
pub fn signature_valid(octets: &[u8]) -> bool {
    // decoding rules are ciphersuite independent
    BbsSignature::<Bls12381Sha256>::from_bytes(octets).is_ok()
}

/// Is `octets` a well-formed proof? Length `3·48 + (4 + U)·32` for some U,
/// three non-identity subgroup points, all scalars strictly in (0, r).
pub fn proof_valid(octets: &[u8]) -> bool {
    PoKSignature::<Bls12381Sha256>::from_bytes(octets).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbs::keys::KeyPair;

    #[test]
    fn validators_accept_honest_material() {
        let keypair = KeyPair::<Bls12381Sha256>::random().unwrap();
        assert!(pubkey_valid(&keypair.public_key().to_bytes()));

        let messages = vec![b"a".to_vec(), b"b".to_vec()];
        let signature = BbsSignature::<Bls12381Sha256>::sign(
            keypair.private_key(),
            keypair.public_key(),
            None,
            &messages,
        )
        .unwrap();
        assert!(signature_valid(&signature.to_bytes()));

        let proof = PoKSignature::<Bls12381Sha256>::proof_gen(
            keypair.public_key(),
            &signature.to_bytes(),
            None,
            None,
            &messages,
            &[1],
        )
        .unwrap();
        assert!(proof_valid(&proof.to_bytes()));
    }

    #[test]
    fn validators_reject_malformed_octets() {
        assert!(!pubkey_valid(&[0u8; 96]));
        assert!(!pubkey_valid(&[0u8; 95]));
        let mut identity = [0u8; 96];
        identity[0] = 0xc0;
        assert!(!pubkey_valid(&identity));

        assert!(!signature_valid(&[0u8; 79]));
        assert!(!signature_valid(&[0u8; 80]));

        assert!(!proof_valid(&[0u8; 271]));
        assert!(!proof_valid(&[0u8; 272]));
        assert!(!proof_valid(&[0u8; 273]));
    }
}
