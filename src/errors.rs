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

use std::fmt;

/// Errors raised by the BBS core.
///
/// Cryptographic mismatches (a signature or proof that simply does not
/// verify) are never reported through this type: `verify` and `proof_verify`
/// return `Ok(false)` for those. An `Err` always means the input was
/// structurally unusable or an internal operation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Wrong length, bad point encoding, identity where forbidden, scalar
    /// out of range, or a point outside the prime-order subgroup.
    InvalidEncoding(String),
    /// A well-formed but unacceptable argument: key material too short,
    /// key_info too long, disclosed indexes out of range or inconsistent
    /// with the disclosed messages, DST out of bounds.
    InvalidArgument(String),
    /// An internal cryptographic operation failed, e.g. `SK + e = 0 mod r`
    /// during signing or the random scalar sampler exhausting its retries.
    CryptoFailure(String),
    /// A signature or proof did not satisfy its verification equation.
    ///
    /// Only surfaced by callers that choose to promote a `false` result;
    /// the verification APIs themselves return `Ok(false)`.
    VerificationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidEncoding(m) => write!(f, "invalid encoding: {}", m),
            Error::InvalidArgument(m) => write!(f, "invalid argument: {}", m),
            Error::CryptoFailure(m) => write!(f, "cryptographic failure: {}", m),
            Error::VerificationFailed => write!(f, "verification failed"),
        }
    }
}

impl std::error::Error for Error {}
