// Copyright (C) 2019-2020 Aleo Systems Inc.
// This file is part of the snarkOS library.

// The snarkOS library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The snarkOS library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the snarkOS library. If not, see <https://www.gnu.org/licenses/>.

//! Precomputed doubles of the base point: a JSON file mapping `"0".."L-1"` to
//! `{x, y}` integer pairs, plus the classical (non-symbolic) point doubling
//! used to generate it offline. Nothing in this module touches the BQM —
//! [`crate::ecc`] only ever consumes the result as [`crate::ecc::PointConst`]s.

use std::collections::BTreeMap;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

/// One entry of the precomputed-doubles file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoubleEntry {
    pub x: BigUint,
    pub y: BigUint,
}

type DoublesFile = BTreeMap<String, DoubleEntry>;

/// Parses a precomputed-doubles JSON document into `2^i * G` coordinates,
/// ordered by `i`.
pub fn load_doubles(json: &str) -> Result<Vec<(BigUint, BigUint)>, serde_json::Error> {
    let map: DoublesFile = serde_json::from_str(json)?;
    let mut entries: Vec<(usize, DoubleEntry)> = map
        .into_iter()
        .map(|(k, v)| (k.parse().expect("doubles file keys must be decimal indices"), v))
        .collect();
    entries.sort_by_key(|(i, _)| *i);
    Ok(entries.into_iter().map(|(_, e)| (e.x, e.y)).collect())
}

/// Serialises `2^i * G` coordinates into the precomputed-doubles JSON format.
pub fn save_doubles(doubles: &[(BigUint, BigUint)]) -> String {
    let map: DoublesFile = doubles
        .iter()
        .enumerate()
        .map(|(i, (x, y))| {
            (
                i.to_string(),
                DoubleEntry {
                    x: x.clone(),
                    y: y.clone(),
                },
            )
        })
        .collect();
    serde_json::to_string_pretty(&map).expect("a map of plain integers always serialises")
}

fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    let a = a % p;
    let b = b % p;
    if a >= b {
        a - b
    } else {
        (a + p) - b
    }
}

/// Modular inverse of `a` mod `p` via the extended Euclidean algorithm.
/// `None` iff `a` and `p` are not coprime (in particular, iff `a = 0`).
fn mod_inverse(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(p.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    while !r.is_zero() {
        let q = &old_r / &r;
        let new_r = &old_r - &q * &r;
        old_r = r;
        r = new_r;
        let new_s = &old_s - &q * &s;
        old_s = s;
        s = new_s;
    }
    if old_r != BigInt::one() {
        return None;
    }
    let p_signed = BigInt::from(p.clone());
    let mut result = old_s % &p_signed;
    if result.sign() == Sign::Minus {
        result += &p_signed;
    }
    result.to_biguint()
}

/// Classically doubles `(x, y)` on `y^2 = x^3 + a*x + b (mod p)`. Permitted
/// outside the symbolic path: this only ever runs once per index, offline,
/// to build the doubles file handed to [`crate::ecc::EccController::ecc_multiply`].
///
/// # Panics
/// Panics if `2y` is not invertible mod `p` (i.e. `y = 0`, a 2-torsion point).
pub fn classical_double(x: &BigUint, y: &BigUint, a: &BigUint, p: &BigUint) -> (BigUint, BigUint) {
    let two_y = (y * BigUint::from(2u8)) % p;
    let inv_two_y = mod_inverse(&two_y, p).expect("2y must be invertible mod p to double this point");

    let three_x_sq = (BigUint::from(3u8) * x * x) % p;
    let numerator = (&three_x_sq + a) % p;
    let lambda = (&numerator * &inv_two_y) % p;

    let lambda_sq = (&lambda * &lambda) % p;
    let two_x = (BigUint::from(2u8) * x) % p;
    let x3 = sub_mod(&lambda_sq, &two_x, p);

    let x_minus_x3 = sub_mod(x, &x3, p);
    let y3 = sub_mod(&((&lambda * &x_minus_x3) % p), y, p);

    (x3, y3)
}

/// Builds `count` entries `2^0*G, 2^1*G, ..., 2^(count-1)*G` by repeated
/// classical doubling.
pub fn generate_doubles(g: (BigUint, BigUint), a: &BigUint, p: &BigUint, count: usize) -> Vec<(BigUint, BigUint)> {
    let mut doubles = Vec::with_capacity(count);
    let mut current = g;
    for _ in 0..count {
        doubles.push(current.clone());
        current = classical_double(&current.0, &current.1, a, p);
    }
    doubles
}
