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

//! Compiles a single scalar multiplication on the toy curve
//! `y^2 = x^3 + 7x + 3 (mod 13)`, `G = (3, 5)`, and prints the resulting
//! BQM's variable count and the ground-state coordinates of `key * G`.

use ecc_bqm_compiler::doubles::generate_doubles;
use ecc_bqm_compiler::number::bits_to_int;
use ecc_bqm_compiler::sampler::ExactEnumerator;
use ecc_bqm_compiler::EccController;
use num_bigint::BigUint;

fn main() {
    tracing_subscriber::fmt::init();

    let p = BigUint::from(13u8);
    let a = BigUint::from(7u8);
    let g = (BigUint::from(3u8), BigUint::from(5u8));
    let key_value: u64 = 7;

    let mut ecc = EccController::new(p.clone());
    let g_const = ecc.point_const(g.0.clone(), g.1.clone()).expect("G fits in the modulus width");

    let double_coords = generate_doubles(g.clone(), &a, &p, ecc.modulus_len());
    let doubles: Vec<_> = double_coords
        .into_iter()
        .map(|(x, y)| ecc.point_const(x, y).expect("doubles fit in the modulus width"))
        .collect();

    let key = ecc.new_bits(ecc.modulus_len());
    let key_bits = ecc_bqm_compiler::number::u64_to_bits(key_value, Some(ecc.modulus_len())).unwrap();
    ecc.set_variable_constant(&key, &key_bits).unwrap();

    let out = ecc.ecc_multiply(&doubles, &key, &g_const).expect("well-formed scalar multiplication");

    println!("variables in the BQM: {}", ecc.bqm().num_variables());

    let set = ecc.run_sampler(&ExactEnumerator);
    let lowest = set.lowest();
    // A key with a run of set low bits revisits the same degenerate slope
    // ecc_multiply's doc comment describes, so more than one sample can tie
    // at the ground energy; any of them reads back to the correct point.
    println!("ground states tied at minimum energy: {}", lowest.len());

    let x_bits: Vec<bool> = out.x.iter().map(|&b| ecc.extract_bit(lowest[0], b).unwrap()).collect();
    let y_bits: Vec<bool> = out.y.iter().map(|&b| ecc.extract_bit(lowest[0], b).unwrap()).collect();
    println!(
        "{key_value} * G = ({}, {})",
        bits_to_int(&x_bits),
        bits_to_int(&y_bits)
    );
}
