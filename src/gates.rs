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

//! Penalty-function emitters for the elementary logic gates.
//!
//! Every gate here adds terms to the BQM such that the ground energy over the
//! gate's bits is zero exactly on satisfying assignments, and strictly
//! positive otherwise. The coefficient tables are load-bearing: downstream
//! arithmetic depends on them being zero-energy when the gate holds, so they
//! must not be "simplified" without re-deriving the penalty by hand.

use itertools::izip;

use crate::bit::Bit;
use crate::controller::Controller;
use crate::error::CompilerError;

impl Controller {
    /// Forces `a = 0`.
    pub fn zero(&mut self, a: Bit) {
        let na = self.name_of(a);
        self.bqm_mut().add_linear(na, 1);
    }

    /// Forces `a = 1`.
    pub fn one(&mut self, a: Bit) {
        let na = self.name_of(a);
        self.bqm_mut().add_linear(na, -1);
        self.bqm_mut().add_offset(1);
    }

    /// `z = NOT a`.
    pub fn not_gate(&mut self, a: Bit, z: Bit) {
        let (na, nz) = (self.name_of(a), self.name_of(z));
        let bqm = self.bqm_mut();
        bqm.add_linear(na, -1);
        bqm.add_linear(nz, -1);
        bqm.add_quadratic(na, nz, 2);
        bqm.add_offset(1);
    }

    /// `z = a AND b`.
    pub fn and_gate(&mut self, a: Bit, b: Bit, z: Bit) {
        let (na, nb, nz) = (self.name_of(a), self.name_of(b), self.name_of(z));
        let bqm = self.bqm_mut();
        bqm.add_linear(nz, 3);
        bqm.add_quadratic(na, nb, 1);
        bqm.add_quadratic(na, nz, -2);
        bqm.add_quadratic(nb, nz, -2);
    }

    /// `z = a OR b`.
    pub fn or_gate(&mut self, a: Bit, b: Bit, z: Bit) {
        let (na, nb, nz) = (self.name_of(a), self.name_of(b), self.name_of(z));
        let bqm = self.bqm_mut();
        bqm.add_linear(na, 1);
        bqm.add_linear(nb, 1);
        bqm.add_linear(nz, 1);
        bqm.add_quadratic(na, nb, 1);
        bqm.add_quadratic(na, nz, -2);
        bqm.add_quadratic(nb, nz, -2);
    }

    /// `z = a XOR b`, via a fresh ancilla bit.
    pub fn xor_gate(&mut self, a: Bit, b: Bit, z: Bit) {
        let t = self.new_bit();
        let (na, nb, nz, nt) = (self.name_of(a), self.name_of(b), self.name_of(z), self.name_of(t));
        let bqm = self.bqm_mut();
        bqm.add_linear(na, 1);
        bqm.add_linear(nb, 1);
        bqm.add_linear(nz, 1);
        bqm.add_linear(nt, 4);
        bqm.add_quadratic(na, nb, 2);
        bqm.add_quadratic(na, nz, -2);
        bqm.add_quadratic(nb, nz, -2);
        bqm.add_quadratic(na, nt, -4);
        bqm.add_quadratic(nb, nt, -4);
        bqm.add_quadratic(nt, nz, 4);
    }

    /// `z = a XNOR b`.
    pub fn xnor_gate(&mut self, a: Bit, b: Bit, z: Bit) {
        self.xor_gate(a, b, z);
        let nz = self.name_of(z);
        self.bqm_mut().flip(nz);
    }

    /// `s = a XOR b`, `c = a AND b` (sum and carry-out with no carry-in).
    pub fn half_adder(&mut self, a: Bit, b: Bit, s: Bit, c: Bit) {
        let (na, nb, ns, nc) = (self.name_of(a), self.name_of(b), self.name_of(s), self.name_of(c));
        let bqm = self.bqm_mut();
        bqm.add_linear(na, 1);
        bqm.add_linear(nb, 1);
        bqm.add_linear(ns, 1);
        bqm.add_linear(nc, 4);
        bqm.add_quadratic(na, nb, 2);
        bqm.add_quadratic(na, ns, -2);
        bqm.add_quadratic(na, nc, -4);
        bqm.add_quadratic(nb, ns, -2);
        bqm.add_quadratic(nb, nc, -4);
        bqm.add_quadratic(ns, nc, 4);
    }

    /// `s = a XOR b XOR d`, `c = majority(a, b, d)` (sum and carry-out with
    /// carry-in `d`).
    pub fn full_adder(&mut self, a: Bit, b: Bit, d: Bit, s: Bit, c: Bit) {
        let (na, nb, nd, ns, nc) = (
            self.name_of(a),
            self.name_of(b),
            self.name_of(d),
            self.name_of(s),
            self.name_of(c),
        );
        let bqm = self.bqm_mut();
        bqm.add_linear(na, 1);
        bqm.add_linear(nb, 1);
        bqm.add_linear(nd, 1);
        bqm.add_linear(ns, 1);
        bqm.add_linear(nc, 4);
        bqm.add_quadratic(na, nb, 2);
        bqm.add_quadratic(na, nd, 2);
        bqm.add_quadratic(na, ns, -2);
        bqm.add_quadratic(na, nc, -4);
        bqm.add_quadratic(nb, nd, 2);
        bqm.add_quadratic(nb, ns, -2);
        bqm.add_quadratic(nb, nc, -4);
        bqm.add_quadratic(nd, ns, -2);
        bqm.add_quadratic(nd, nc, -4);
        bqm.add_quadratic(ns, nc, 4);
    }

    /// `z = a` if `ctrl = 0`, else `z = b`, via a fresh ancilla bit.
    pub fn mux(&mut self, a: Bit, b: Bit, ctrl: Bit, z: Bit) {
        let t = self.new_bit();
        let (na, nb, nctrl, nz, nt) = (
            self.name_of(a),
            self.name_of(b),
            self.name_of(ctrl),
            self.name_of(z),
            self.name_of(t),
        );
        let bqm = self.bqm_mut();
        bqm.add_linear(na, 1);
        bqm.add_linear(nz, 3);
        bqm.add_linear(nt, 8);
        bqm.add_quadratic(na, nb, 2);
        bqm.add_quadratic(na, nctrl, -1);
        bqm.add_quadratic(nb, nctrl, 1);
        bqm.add_quadratic(na, nz, -4);
        bqm.add_quadratic(nb, nz, -2);
        bqm.add_quadratic(nctrl, nz, 2);
        bqm.add_quadratic(na, nt, 2);
        bqm.add_quadratic(nb, nt, -4);
        bqm.add_quadratic(nctrl, nt, -4);
        bqm.add_quadratic(nz, nt, -4);
    }

    /// Position-wise [`Controller::mux`] over equal-length variables, sharing
    /// one `ctrl` bit.
    pub fn mux_var(&mut self, a: &[Bit], b: &[Bit], ctrl: Bit, z: &[Bit]) -> Result<(), CompilerError> {
        require_equal_len(a, b)?;
        require_equal_len(a, z)?;
        for (&ai, &bi, &zi) in izip!(a, b, z) {
            self.mux(ai, bi, ctrl, zi);
        }
        Ok(())
    }

    /// Position-wise [`Controller::and_gate`] of `ctrl` against every bit of `a`.
    pub fn and_var(&mut self, ctrl: Bit, a: &[Bit], z: &[Bit]) -> Result<(), CompilerError> {
        require_equal_len(a, z)?;
        for (&ai, &zi) in izip!(a, z) {
            self.and_gate(ctrl, ai, zi);
        }
        Ok(())
    }
}

pub(crate) fn require_equal_len(a: &[Bit], b: &[Bit]) -> Result<(), CompilerError> {
    if a.len() != b.len() {
        return Err(CompilerError::LengthMismatch(format!(
            "expected equal lengths, got {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{ExactEnumerator, Sampler};

    fn ground_states(c: &Controller) -> Vec<i64> {
        ExactEnumerator.sample(c.bqm()).lowest().iter().map(|s| s.energy).collect()
    }

    #[test]
    fn and_gate_truth_table() {
        for &(av, bv, zv) in &[
            (false, false, false),
            (false, true, false),
            (true, false, false),
            (true, true, true),
        ] {
            let mut c = Controller::new();
            let (a, b, z) = (c.new_bit(), c.new_bit(), c.new_bit());
            c.and_gate(a, b, z);
            c.set_bit_constant(a, av);
            c.set_bit_constant(b, bv);
            let set = c.run_sampler(&ExactEnumerator);
            let lowest = set.lowest();
            assert_eq!(lowest.len(), 1, "gate must have a unique ground state per input");
            assert_eq!(lowest[0].energy, 0);
            let nz = c.name_of(z);
            assert_eq!(lowest[0].assignment.get(&nz), Some(&zv));
        }
    }

    #[test]
    fn xor_gate_truth_table() {
        for &(av, bv, zv) in &[
            (false, false, false),
            (false, true, true),
            (true, false, true),
            (true, true, false),
        ] {
            let mut c = Controller::new();
            let (a, b, z) = (c.new_bit(), c.new_bit(), c.new_bit());
            c.xor_gate(a, b, z);
            c.set_bit_constant(a, av);
            c.set_bit_constant(b, bv);
            let set = c.run_sampler(&ExactEnumerator);
            let lowest = set.lowest();
            assert_eq!(lowest[0].energy, 0);
            let nz = c.name_of(z);
            assert_eq!(lowest[0].assignment.get(&nz), Some(&zv));
        }
    }

    #[test]
    fn not_gate_ground_energy_is_zero() {
        let mut c = Controller::new();
        let (a, z) = (c.new_bit(), c.new_bit());
        c.not_gate(a, z);
        assert_eq!(ground_states(&c), vec![0]);
    }

    #[test]
    fn mux_selects_a_when_ctrl_is_zero() {
        let mut c = Controller::new();
        let (a, b, ctrl, z) = (c.new_bit(), c.new_bit(), c.new_bit(), c.new_bit());
        c.mux(a, b, ctrl, z);
        c.set_bit_constant(a, true);
        c.set_bit_constant(b, false);
        c.set_bit_constant(ctrl, false);
        let set = c.run_sampler(&ExactEnumerator);
        let lowest = set.lowest();
        assert_eq!(lowest[0].energy, 0);
        let nz = c.name_of(z);
        assert_eq!(lowest[0].assignment.get(&nz), Some(&true));
    }

    #[test]
    fn mux_selects_b_when_ctrl_is_one() {
        let mut c = Controller::new();
        let (a, b, ctrl, z) = (c.new_bit(), c.new_bit(), c.new_bit(), c.new_bit());
        c.mux(a, b, ctrl, z);
        c.set_bit_constant(a, true);
        c.set_bit_constant(b, false);
        c.set_bit_constant(ctrl, true);
        let set = c.run_sampler(&ExactEnumerator);
        let lowest = set.lowest();
        assert_eq!(lowest[0].energy, 0);
        let nz = c.name_of(z);
        assert_eq!(lowest[0].assignment.get(&nz), Some(&false));
    }

    #[test]
    fn half_adder_truth_table() {
        for &(av, bv) in &[(false, false), (false, true), (true, false), (true, true)] {
            let mut c = Controller::new();
            let (a, b, s, cout) = (c.new_bit(), c.new_bit(), c.new_bit(), c.new_bit());
            c.half_adder(a, b, s, cout);
            c.set_bit_constant(a, av);
            c.set_bit_constant(b, bv);
            let set = c.run_sampler(&ExactEnumerator);
            let lowest = set.lowest();
            assert_eq!(lowest[0].energy, 0);
            let (ns, nc) = (c.name_of(s), c.name_of(cout));
            assert_eq!(lowest[0].assignment.get(&ns), Some(&(av ^ bv)));
            assert_eq!(lowest[0].assignment.get(&nc), Some(&(av && bv)));
        }
    }

    #[test]
    fn full_adder_truth_table() {
        for &(av, bv, dv) in &[
            (false, false, false),
            (false, false, true),
            (false, true, false),
            (false, true, true),
            (true, false, false),
            (true, false, true),
            (true, true, false),
            (true, true, true),
        ] {
            let mut c = Controller::new();
            let (a, b, d, s, cout) = (c.new_bit(), c.new_bit(), c.new_bit(), c.new_bit(), c.new_bit());
            c.full_adder(a, b, d, s, cout);
            c.set_bit_constant(a, av);
            c.set_bit_constant(b, bv);
            c.set_bit_constant(d, dv);
            let set = c.run_sampler(&ExactEnumerator);
            let lowest = set.lowest();
            assert_eq!(lowest[0].energy, 0);
            let sum = av as u8 + bv as u8 + dv as u8;
            let (ns, nc) = (c.name_of(s), c.name_of(cout));
            assert_eq!(lowest[0].assignment.get(&ns), Some(&(sum % 2 == 1)));
            assert_eq!(lowest[0].assignment.get(&nc), Some(&(sum >= 2)));
        }
    }

    #[test]
    fn mux_var_rejects_mismatched_lengths() {
        let mut c = Controller::new();
        let a = c.new_bits(3);
        let b = c.new_bits(2);
        let ctrl = c.new_bit();
        let z = c.new_bits(3);
        assert!(matches!(
            c.mux_var(&a, &b, ctrl, &z).unwrap_err(),
            CompilerError::LengthMismatch(_)
        ));
    }
}
