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
use crate::utils::util::hash_to_scalar;
use bls12_381_plus::Scalar;
use serde::{Deserialize, Serialize};

/// A message after preprocessing: its representative Fr scalar.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BbsMessage {
    /// The message scalar
    pub value: Scalar,
}

impl BbsMessage {
    /// Wrap an already-mapped scalar.
    pub fn new(value: Scalar) -> Self {
        Self { value }
    }

    /// Map one message octet string to a scalar with the ciphersuite's
    /// map-to-scalar DST.
    pub fn map_message_to_scalar_as_hash<CS: BbsCiphersuite>(data: &[u8]) -> Result<Self, Error> {
        let scalar = hash_to_scalar::<CS>(data, &CS::map_msg_to_scalar_as_hash_dst())?;
        Ok(Self { value: scalar })
    }

    /// Map a list of message octet strings, preserving order.
    pub fn messages_to_scalar<CS: BbsCiphersuite>(
        messages: &[Vec<u8>],
    ) -> Result<Vec<Self>, Error> {
        messages
            .iter()
            .map(|m| Self::map_message_to_scalar_as_hash::<CS>(m))
            .collect()
    }
}
