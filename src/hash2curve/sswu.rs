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

//! Simplified Shallue–van de Woestijne–Ulas map to the curve E' that is
//! 11-isogenous to BLS12-381 E (RFC 9380 §6.6.2 / §F.2), with the
//! square-root-ratio subroutine specialized to p ≡ 3 (mod 4).

use super::{fp_from_hex, fp_from_u64, fp_is_zero, fp_pow, fp_sgn0};
use bls12_381_plus::fp::Fp;

/// A' of the isogenous curve E': y² = x³ + A'x + B'.
const ISO_A: &str = "00144698a3b8e9433d693a02c96d4982b0ea985383ee66a8d8e8981aefd881ac98936f8da0e0f97f5cf428082d584c1d";
/// B' of the isogenous curve.
const ISO_B: &str = "12e2908d11688030018b12e8753eee3b2016c1f0f24f4070a0b9c14fcef35ef55a23215a316ceaa5d1cc48e98e172be0";
/// Z = 11, the non-square of the SSWU ciphersuite.
const Z_U64: u64 = 11;

/// (p − 3) / 4, big-endian.
const SQRT_RATIO_C1: &str = "0680447a8e5ff9a692c6e9ed90d2eb35d91dd2e13ce144afd9cc34a83dac3d8907aaffffac54ffffee7fbfffffffeaaa";
/// (p + 1) / 4, big-endian; exponentiation by it computes square roots of
/// quadratic residues since p ≡ 3 (mod 4).
const SQRT_EXP: &str = "0680447a8e5ff9a692c6e9ed90d2eb35d91dd2e13ce144afd9cc34a83dac3d8907aaffffac54ffffee7fbfffffffeaab";

fn inv0(x: &Fp) -> Fp {
    Option::<Fp>::from(x.invert()).unwrap_or_else(|| fp_from_u64(0))
}

/// sqrt_ratio for p ≡ 3 (mod 4) (RFC 9380 §F.2.1.2).
///
/// Returns `(true, sqrt(u / v))` when u/v is square, otherwise
/// `(false, sqrt(Z · u / v))`.
pub(crate) fn sqrt_ratio_3mod4(u: &Fp, v: &Fp) -> (bool, Fp) {
    let c1 = hex::decode(SQRT_RATIO_C1).expect("valid hex constant");
    // c2 = sqrt(-Z); -Z is a QR by ciphersuite construction
    let minus_z = -fp_from_u64(Z_U64);
    let c2 = fp_pow(&minus_z, &hex::decode(SQRT_EXP).expect("valid hex constant"));

    let mut tv1 = *v * *v;
    let tv2 = *u * *v;
    tv1 = tv1 * tv2;
    let mut y1 = fp_pow(&tv1, &c1);
    y1 = y1 * tv2;
    let y2 = y1 * c2;
    let mut tv3 = y1 * y1;
    tv3 = tv3 * *v;
    let is_qr = tv3 == *u;
    let y = if is_qr { y1 } else { y2 };
    (is_qr, y)
}

/// The simplified SWU map: a field element to an affine point of E'.
///
/// Straight-line sequence of RFC 9380 §F.2; never produces the point at
/// infinity.
pub fn map_to_curve_simple_swu(u: &Fp) -> (Fp, Fp) {
    let a = fp_from_hex(ISO_A);
    let b = fp_from_hex(ISO_B);
    let z = fp_from_u64(Z_U64);
    let one = fp_from_u64(1);

    let mut tv1 = *u * *u;
    tv1 = z * tv1;
    let mut tv2 = tv1 * tv1;
    tv2 = tv2 + tv1;
    let mut tv3 = tv2 + one;
    tv3 = b * tv3;
    // tv4 = Z if tv2 == 0 else -tv2
    let tv4 = if fp_is_zero(&tv2) { z } else { -tv2 };
    let tv4 = a * tv4;
    tv2 = tv3 * tv3;
    let mut tv6 = tv4 * tv4;
    let mut tv5 = a * tv6;
    tv2 = tv2 + tv5;
    tv2 = tv2 * tv3;
    tv6 = tv6 * tv4;
    tv5 = b * tv6;
    tv2 = tv2 + tv5;
    let mut x = tv1 * tv3;
    let (is_gx1_square, y1) = sqrt_ratio_3mod4(&tv2, &tv6);
    let mut y = tv1 * *u;
    y = y * y1;
    if is_gx1_square {
        x = tv3;
        y = y1;
    }
    if fp_sgn0(u) != fp_sgn0(&y) {
        y = -y;
    }
    x = x * inv0(&tv4);
    (x, y)
}
