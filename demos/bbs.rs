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

//! Issuer → Holder → Verifier walkthrough. Run with
//! `cargo run --example bbs <BLS12-381-SHA-256 | BLS12-381-SHAKE-256>`.

#![allow(non_upper_case_globals)]

use zkbbs::bbs::ciphersuites::{BbsCiphersuite, Bls12381Sha256, Bls12381Shake256};
use zkbbs::bbs::keys::KeyPair;
use zkbbs::bbs::proof::PoKSignature;
use zkbbs::bbs::signature::BbsSignature;
use zkbbs::errors::Error;

fn bbs_main<CS: BbsCiphersuite>() -> Result<(), Error> {
    const msgs: [&str; 3] = [
        "9872ad089e452c7b6e283dfac2a80d58e8d0ff71cc4d5e310a1debdda4a45f02",
        "87a8bd656d49ee07b8110e1d8fd4f1dcef6fb9bc368c492d9bc8c4f98a739ac6",
        "96012096adda3f13dd4adbe4eea481a4c4b5717932b73b00e31807d3c5894b90",
    ];
    const header_hex: &str = "11223344556677889900aabbccddeeff";

    let header = hex::decode(header_hex).unwrap();
    let messages: Vec<Vec<u8>> = msgs.iter().map(|m| hex::decode(m).unwrap()).collect();
    log::info!("Messages: {:?}", msgs);

    log::info!("Keypair Generation");
    let issuer_keypair = KeyPair::<CS>::random()?;
    let issuer_sk = issuer_keypair.private_key();
    let issuer_pk = issuer_keypair.public_key();
    log::info!("SK: {}", issuer_sk.encode());
    log::info!("PK: {}", issuer_pk.encode());

    log::info!("Signing...");
    let signature = BbsSignature::<CS>::sign(issuer_sk, issuer_pk, Some(&header), &messages)?;
    log::info!("Signature: {}", hex::encode(signature.to_bytes()));

    let valid = signature.verify(issuer_pk, Some(&header), &messages)?;
    assert!(valid, "Signature NOT VALID!");
    log::info!("Signature is VALID!");

    // Holder receives a presentation nonce from the Verifier
    let ph = b"verifier-session-42".to_vec();
    log::info!("Presentation header: {}", hex::encode(&ph));

    let disclosed_indexes = [1usize, 3];
    log::info!("Disclosing messages at {:?}", disclosed_indexes);
    let proof = PoKSignature::<CS>::proof_gen(
        issuer_pk,
        &signature.to_bytes(),
        Some(&header),
        Some(&ph),
        &messages,
        &disclosed_indexes,
    )?;
    log::info!("Proof: {}", hex::encode(proof.to_bytes()));

    // Verifier sees only the disclosed messages
    let disclosed: Vec<Vec<u8>> = disclosed_indexes
        .iter()
        .map(|&i| messages[i - 1].clone())
        .collect();
    log::info!("Signature Proof of Knowledge verification...");
    let proof_result = proof.proof_verify(
        issuer_pk,
        Some(&header),
        Some(&ph),
        &disclosed,
        &disclosed_indexes,
    )?;
    assert!(proof_result, "Signature Proof of Knowledge Verification Failed!");
    log::info!("Signature Proof of Knowledge is VALID!");

    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        println!("Usage: {} <ciphersuite>", args[0]);
        println!("Ciphersuites:");
        println!("  - BLS12-381-SHA-256");
        println!("  - BLS12-381-SHAKE-256");
        return;
    }

    let result = match args[1].as_str() {
        "BLS12-381-SHA-256" => bbs_main::<Bls12381Sha256>(),
        "BLS12-381-SHAKE-256" => bbs_main::<Bls12381Shake256>(),
        unknown => {
            println!("Unknown ciphersuite: {}", unknown);
            return;
        }
    };

    if let Err(error) = result {
        println!("Error: {}", error);
    }
}
