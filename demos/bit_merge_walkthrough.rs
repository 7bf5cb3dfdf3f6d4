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

//! Wires up `c = a AND b`, `f = d OR e`, then merges `c` and `f` into the
//! same bit and samples the result, to show that aliasing after the fact
//! folds the two gates' penalties into one consistent constraint.

use ecc_bqm_compiler::sampler::ExactEnumerator;
use ecc_bqm_compiler::Controller;

fn main() {
    tracing_subscriber::fmt::init();

    let mut controller = Controller::new();
    let bits = controller.new_bits(6);
    let (a, b, c, d, e, f) = (bits[0], bits[1], bits[2], bits[3], bits[4], bits[5]);

    controller.and_gate(a, b, c);
    controller.or_gate(d, e, f);
    controller.merge(c, f);

    let set = controller.run_sampler(&ExactEnumerator);
    let lowest = set.lowest();

    println!("ground states after merging c and f: {}", lowest.len());
    for sample in lowest {
        let values: Vec<(&str, bool)> = [("a", a), ("b", b), ("c", c), ("d", d), ("e", e), ("f", f)]
            .into_iter()
            .map(|(name, bit)| (name, controller.extract_bit(sample, bit).unwrap()))
            .collect();
        println!("{values:?}");
    }
}
