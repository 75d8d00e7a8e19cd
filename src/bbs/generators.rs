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
use crate::hash2curve::hash_to_curve;
use crate::utils::serialize::i2osp;
use bls12_381_plus::G1Projective;
use std::collections::HashMap;
use std::sync::Mutex;

/// Cached state of one ciphersuite's generator sequence: the rolling
/// 48-octet expand state and every point derived so far. The sequence is
/// fully determined by the ciphersuite seeds; the cache only ever grows,
/// so concurrent extensions append identical points.
struct GeneratorCache {
    v: [u8; 48],
    points: Vec<G1Projective>,
}

static GENERATOR_CACHES: Mutex<Option<HashMap<&'static [u8], GeneratorCache>>> = Mutex::new(None);

/// The first `n` points of a ciphersuite's deterministic generator
/// sequence: `values[0]` is Q1, the rest are the message generators
/// H_1..H_{n-1}.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Generators {
    /// Q1 followed by the message generators, in sequence order
    pub values: Vec<G1Projective>,
}

impl Generators {
    /// Return the first `count` generators, extending the per-ciphersuite
    /// cache if needed. Requests at or below the cached length are served
    /// as a prefix copy without touching the sequence state.
    pub fn create<CS: BbsCiphersuite>(count: usize) -> Result<Self, Error> {
        let seed_dst = CS::generator_seed_dst();

        let mut guard = GENERATOR_CACHES
            .lock()
            .map_err(|_| Error::CryptoFailure("generator cache lock poisoned".into()))?;
        let caches = guard.get_or_insert_with(HashMap::new);

        if !caches.contains_key(CS::ID) {
            let v0 = CS::expand_message(&CS::generator_seed(), &seed_dst, CS::EXPAND_LEN)?;
            let v0: [u8; 48] = v0
                .try_into()
                .map_err(|_| Error::CryptoFailure("expand output length mismatch".into()))?;
            caches.insert(
                CS::ID,
                GeneratorCache {
                    v: v0,
                    points: Vec::new(),
                },
            );
        }
        let state = caches
            .get_mut(CS::ID)
            .ok_or_else(|| Error::CryptoFailure("generator cache missing".into()))?;

        if count > state.points.len() {
            log::debug!(
                "extending generator cache from {} to {} points",
                state.points.len(),
                count
            );
        }
        while state.points.len() < count {
            let i = state.points.len() + 1;
            let input = [state.v.as_slice(), &i2osp::<8>(i)].concat();
            let v = CS::expand_message(&input, &seed_dst, CS::EXPAND_LEN)?;
            state.v.copy_from_slice(&v);
            let point = hash_to_curve::<CS>(&state.v, &CS::generator_dst())?;
            state.points.push(point);
        }

        Ok(Generators {
            values: state.points[..count].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbs::ciphersuites::{Bls12381Sha256, Bls12381Shake256};
    use elliptic_curve::group::Curve;

    const GENERATORS_SHA256: [&str; 11] = [
        "a9ec65b70a7fbe40c874c9eb041c2cb0a7af36ccec1bea48fa2ba4c2eb67ef7f9ecb17ed27d38d27cdeddff44c8137be",
        "98cd5313283aaf5db1b3ba8611fe6070d19e605de4078c38df36019fbaad0bd28dd090fd24ed27f7f4d22d5ff5dea7d4",
        "a31fbe20c5c135bcaa8d9fc4e4ac665cc6db0226f35e737507e803044093f37697a9d452490a970eea6f9ad6c3dcaa3a",
        "b479263445f4d2108965a9086f9d1fdc8cde77d14a91c856769521ad3344754cc5ce90d9bc4c696dffbc9ef1d6ad1b62",
        "ac0401766d2128d4791d922557c7b4d1ae9a9b508ce266575244a8d6f32110d7b0b7557b77604869633bb49afbe20035",
        "b95d2898370ebc542857746a316ce32fa5151c31f9b57915e308ee9d1de7db69127d919e984ea0747f5223821b596335",
        "8f19359ae6ee508157492c06765b7df09e2e5ad591115742f2de9c08572bb2845cbf03fd7e23b7f031ed9c7564e52f39",
        "abc914abe2926324b2c848e8a411a2b6df18cbe7758db8644145fefb0bf0a2d558a8c9946bd35e00c69d167aadf304c1",
        "80755b3eb0dd4249cbefd20f177cee88e0761c066b71794825c9997b551f24051c352567ba6c01e57ac75dff763eaa17",
        "82701eb98070728e1769525e73abff1783cedc364adb20c05c897a62f2ab2927f86f118dcb7819a7b218d8f3fee4bd7f",
        "a1f229540474f4d6f1134761b92b788128c7ac8dc9b0c52d59493132679673032ac7db3fb3d79b46b13c1c41ee495bca",
    ];

    const GENERATORS_SHAKE256: [&str; 11] = [
        "a9d40131066399fd41af51d883f4473b0dcd7d028d3d34ef17f3241d204e28507d7ecae032afa1d5490849b7678ec1f8",
        "903c7ca0b7e78a2017d0baf74103bd00ca8ff9bf429f834f071c75ffe6bfdec6d6dca15417e4ac08ca4ae1e78b7adc0e",
        "84321f5855bfb6b001f0dfcb47ac9b5cc68f1a4edd20f0ec850e0563b27d2accee6edff1a26b357762fb24e8ddbb6fcb",
        "b3060dff0d12a32819e08da00e61810676cc9185fdd750e5ef82b1a9798c7d76d63de3b6225d6c9a479d6c21a7c8bf93",
        "8f1093d1e553cdead3c70ce55b6d664e5d1912cc9edfdd37bf1dad11ca396a0a8bb062092d391ebf8790ea5722413f68",
        "990824e00b48a68c3d9a308e8c52a57b1bc84d1cf5d3c0f8c6fb6b1230e4e5b8eb752fb374da0b1ef687040024868140",
        "b86d1c6ab8ce22bc53f625d1ce9796657f18060fcb1893ce8931156ef992fe56856199f8fa6c998e5d855a354a26b0dd",
        "b4cdd98c5c1e64cb324e0c57954f719d5c5f9e8d991fd8e159b31c8d079c76a67321a30311975c706578d3a0ddc313b7",
        "8311492d43ec9182a5fc44a75419b09547e311251fe38b6864dc1e706e29446cb3ea4d501634eb13327245fd8a574f77",
        "ac00b493f92d17837a28d1f5b07991ca5ab9f370ae40d4f9b9f2711749ca200110ce6517dc28400d4ea25dddc146cacc",
        "965a6c62451d4be6cb175dec39727dc665762673ee42bf0ac13a37a74784fbd61e84e0915277a6f59863b2bb4f5f6005",
    ];

    fn check_sequence<CS: BbsCiphersuite>(expected: &[&str]) {
        let generators = Generators::create::<CS>(expected.len()).unwrap();
        for (point, exp) in generators.values.iter().zip(expected) {
            assert_eq!(hex::encode(point.to_affine().to_compressed()), *exp);
        }
    }

    #[test]
    fn known_sequence_sha256() {
        check_sequence::<Bls12381Sha256>(&GENERATORS_SHA256);
    }

    #[test]
    fn known_sequence_shake256() {
        check_sequence::<Bls12381Shake256>(&GENERATORS_SHAKE256);
    }

    #[test]
    fn extend_then_read_equivalence() {
        let small = Generators::create::<Bls12381Sha256>(3).unwrap();
        let large = Generators::create::<Bls12381Sha256>(9).unwrap();
        assert_eq!(&large.values[..3], &small.values[..]);
        // shrinking reads keep returning the same prefix
        let again = Generators::create::<Bls12381Sha256>(3).unwrap();
        assert_eq!(again, small);
    }

    #[test]
    fn suites_generate_distinct_sequences() {
        let sha = Generators::create::<Bls12381Sha256>(2).unwrap();
        let shake = Generators::create::<Bls12381Shake256>(2).unwrap();
        assert_ne!(sha.values[0], shake.values[0]);
    }
}
