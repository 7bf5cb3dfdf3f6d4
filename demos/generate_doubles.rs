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

//! Builds the `2^i * G` precomputed-doubles file for secp256k1 and prints it
//! to stdout as JSON. This is ordinary (non-symbolic) integer arithmetic —
//! the only curve arithmetic this crate performs outside the BQM.

use ecc_bqm_compiler::doubles::{generate_doubles, save_doubles};
use num_bigint::BigUint;

fn secp256k1_field() -> BigUint {
    BigUint::parse_bytes(
        b"FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
        16,
    )
    .unwrap()
}

fn secp256k1_base() -> (BigUint, BigUint) {
    let x = BigUint::parse_bytes(
        b"79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
        16,
    )
    .unwrap();
    let y = BigUint::parse_bytes(
        b"483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B",
        16,
    )
    .unwrap();
    (x, y)
}

fn main() {
    tracing_subscriber::fmt::init();

    let p = secp256k1_field();
    let a = BigUint::from(0u8); // secp256k1 has a = 0
    let g = secp256k1_base();

    let doubles = generate_doubles(g, &a, &p, 256);
    println!("{}", save_doubles(&doubles));
}
