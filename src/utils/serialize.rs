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

use bls12_381_plus::{G1Projective, G2Projective, Scalar};
use elliptic_curve::group::Curve;

/// I2OSP: big-endian encoding of `x` into exactly `N` octets.
///
/// `x` MUST be representable in `N` octets; every call site bounds its input
/// first (generator counters and length prefixes fit 8 octets by
/// construction, 2-octet and 1-octet uses are range-checked by the caller).
pub fn i2osp<const N: usize>(x: usize) -> [u8; N] {
    debug_assert!(N >= 8 || (x as u128) < (1u128 << (8 * N)));
    let mut out = [0u8; N];
    let be = (x as u64).to_be_bytes();
    if N >= 8 {
        out[N - 8..].copy_from_slice(&be);
    } else {
        out.copy_from_slice(&be[8 - N..]);
    }
    out
}

/// OS2IP over at most 8 octets, the inverse of [`i2osp`] for small integers.
pub fn os2ip(octets: &[u8]) -> u64 {
    debug_assert!(octets.len() <= 8);
    let mut be = [0u8; 8];
    be[8 - octets.len()..].copy_from_slice(octets);
    u64::from_be_bytes(be)
}

/// One element of a heterogeneous serialization input.
///
/// The BBS operations serialize fixed-shape tuples mixing curve points,
/// scalars and small integers; each variant maps to its wire form:
/// G1 → 48 octets compressed, G2 → 96 octets compressed, Fr → 32 octets
/// big-endian, integer → 8 octets big-endian.
#[derive(Clone, Copy, Debug)]
pub enum SerializeItem {
    /// A point of G1, Zcash-compressed (48 octets)
    Point1(G1Projective),
    /// A point of G2, Zcash-compressed (96 octets)
    Point2(G2Projective),
    /// An Fr scalar, 32 octets big-endian
    Scalar(Scalar),
    /// A nonnegative integer, 8 octets big-endian
    U64(u64),
}

/// Concatenation of the wire forms of `items`, in order.
///
/// The order and type of each element are fixed by the calling algorithm
/// and are part of the wire contract.
pub fn serialize(items: &[SerializeItem]) -> Vec<u8> {
    let mut out = Vec::new();
    for item in items {
        match item {
            SerializeItem::Point1(p) => out.extend_from_slice(&p.to_affine().to_compressed()),
            SerializeItem::Point2(p) => out.extend_from_slice(&p.to_affine().to_compressed()),
            SerializeItem::Scalar(s) => out.extend_from_slice(&s.to_be_bytes()),
            SerializeItem::U64(n) => out.extend_from_slice(&n.to_be_bytes()),
        }
    }
    out
}
