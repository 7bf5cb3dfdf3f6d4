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

//! Modulo-`P` reduction and the modular arithmetic gadgets built on it.
//!
//! Backward operations (subtract, divide, inverse) are encoded as forward
//! equations about the result rather than by constructing an explicit
//! inverse circuit: the solver is free to pick whatever value satisfies the
//! equation, halving the circuit relative to an explicit construction.

use std::ops::{Deref, DerefMut};

use num_bigint::BigUint;

use crate::bit::{Bit, Variable};
use crate::controller::Controller;
use crate::error::CompilerError;
use crate::number::int_to_bits;

/// Wraps a [`Controller`] with a fixed prime modulus `P` and its little-endian
/// bit expansion, and adds the modular-arithmetic operations.
#[derive(Debug)]
pub struct ModuloController {
    inner: Controller,
    p: BigUint,
    p_bits: Vec<bool>,
    l: usize,
}

impl Deref for ModuloController {
    type Target = Controller;
    fn deref(&self) -> &Controller {
        &self.inner
    }
}

impl DerefMut for ModuloController {
    fn deref_mut(&mut self) -> &mut Controller {
        &mut self.inner
    }
}

impl ModuloController {
    pub fn new(p: BigUint) -> Self {
        let p_bits = int_to_bits(&p, None).expect("unbounded encoding never fails");
        let l = p_bits.len();
        Self {
            inner: Controller::new(),
            p,
            p_bits,
            l,
        }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Bit length of the modulus (`L` throughout this module).
    pub fn modulus_len(&self) -> usize {
        self.l
    }

    pub fn modulus_bits(&self) -> &[bool] {
        &self.p_bits
    }

    /// Asserts `0 <= a < P` for `a` of length `L`.
    pub fn ensure_range(&mut self, a: &[Bit]) -> Result<(), CompilerError> {
        if a.len() != self.l {
            return Err(CompilerError::LengthMismatch(format!(
                "ensure_range expects {} bits, got {}",
                self.l,
                a.len()
            )));
        }
        let p_bits = self.p_bits.clone();
        let (_, underflow) = self.inner.subtract_const(a, &p_bits)?;
        self.inner.one(underflow);
        Ok(())
    }

    /// Introduces a fresh quotient and enforces `a = quotient * P + r`. `r`
    /// must already be allocated by the caller, length `L`.
    pub fn modulo_p(&mut self, a: &[Bit], r: &[Bit], ensure_modulo: bool) -> Result<(), CompilerError> {
        if a.len() < self.l {
            return Err(CompilerError::InputTooShort(format!(
                "modulo_p requires at least {} bits, got {}",
                self.l,
                a.len()
            )));
        }
        if r.len() != self.l {
            return Err(CompilerError::LengthMismatch(format!(
                "modulo_p residue must have {} bits, got {}",
                self.l,
                r.len()
            )));
        }

        let quotient_len = a.len() - self.l + 1;
        let quotient = self.inner.new_bits(quotient_len);
        let p_bits = self.p_bits.clone();

        let mut product = self.inner.new_bits(a.len() + 1);
        self.inner.multiply_const(&quotient, &p_bits, &product)?;
        let top = product.pop().expect("product has at least one bit");
        self.inner.zero(top);

        self.inner.add_no_overflow(&product, r, a)?;

        if ensure_modulo {
            self.ensure_range(r)?;
        }
        Ok(())
    }

    /// `c = (a + b) mod P`.
    pub fn add_modp(&mut self, a: &[Bit], b: &[Bit], c: &[Bit], ensure_modulo: bool) -> Result<(), CompilerError> {
        let t = self.inner.new_bits(self.l + 1);
        self.inner.add(a, b, &t)?;
        self.modulo_p(&t, c, ensure_modulo)
    }

    /// `c = (a - b) mod P`, encoded as `b + c ≡ a (mod P)`.
    pub fn sub_modp(&mut self, a: &[Bit], b: &[Bit], c: &[Bit], ensure_modulo: bool) -> Result<(), CompilerError> {
        self.add_modp(b, c, a, ensure_modulo)
    }

    /// `c = (a * b) mod P`.
    pub fn mult_modp(&mut self, a: &[Bit], b: &[Bit], c: &[Bit], ensure_modulo: bool) -> Result<(), CompilerError> {
        let t = self.inner.new_bits(2 * self.l);
        self.inner.multiply(a, b, &t)?;
        self.modulo_p(&t, c, ensure_modulo)
    }

    /// `c = (a * b_const) mod P`.
    pub fn mult_const_modp(
        &mut self,
        a: &[Bit],
        b: &[bool],
        c: &[Bit],
        ensure_modulo: bool,
    ) -> Result<(), CompilerError> {
        let t = self.inner.new_bits(a.len() + b.len());
        self.inner.multiply_const(a, b, &t)?;
        self.modulo_p(&t, c, ensure_modulo)
    }

    /// `c = (a + b_const) mod P`.
    pub fn add_const_modp(
        &mut self,
        a: &[Bit],
        b: &[bool],
        c: &[Bit],
        ensure_modulo: bool,
    ) -> Result<(), CompilerError> {
        let t = self.inner.new_bits(a.len() + 1);
        self.inner.add_const(a, b, &t)?;
        self.modulo_p(&t, c, ensure_modulo)
    }

    /// `c = (a - b_const) mod P`, encoded as `c + b_const ≡ a (mod P)`.
    pub fn sub_const_modp(
        &mut self,
        a: &[Bit],
        b: &[bool],
        c: &[Bit],
        ensure_modulo: bool,
    ) -> Result<(), CompilerError> {
        self.add_const_modp(c, b, a, ensure_modulo)
    }

    /// `c = a^2 mod P`.
    pub fn square_modp(&mut self, a: &[Bit], c: &[Bit], ensure_modulo: bool) -> Result<(), CompilerError> {
        let t = self.inner.new_bits(2 * self.l);
        self.inner.square(a, &t)?;
        self.modulo_p(&t, c, ensure_modulo)
    }

    /// `c = a^-1 mod P`. Infeasible (no zero-energy ground state) when `a = 0`.
    pub fn inv_modp(&mut self, a: &[Bit], c: &[Bit]) -> Result<(), CompilerError> {
        let r = self.inner.new_bits(self.l);
        self.mult_modp(a, c, &r, true)?;
        let mut one = vec![false; self.l];
        one[0] = true;
        self.inner.set_variable_constant(&r, &one)?;
        Ok(())
    }

    /// `c = a / b mod P`, encoded as `b * c ≡ a (mod P)`.
    pub fn div_modp(&mut self, a: &[Bit], b: &[Bit], c: &[Bit], ensure_modulo: bool) -> Result<(), CompilerError> {
        self.mult_modp(b, c, a, ensure_modulo)
    }

    /// `c = 2a mod P`.
    pub fn double_modp(&mut self, a: &[Bit], c: &[Bit], ensure_modulo: bool) -> Result<(), CompilerError> {
        let zero_bit = self.inner.new_bit();
        self.inner.zero(zero_bit);
        let mut shifted: Variable = vec![zero_bit];
        shifted.extend_from_slice(a);
        self.modulo_p(&shifted, c, ensure_modulo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::{bits_to_int, u64_to_bits};
    use crate::sampler::ExactEnumerator;

    fn fixed(c: &mut ModuloController, value: u64, len: usize) -> Variable {
        let var = c.new_bits(len);
        let bits = u64_to_bits(value, Some(len)).unwrap();
        for (&bit, &v) in var.iter().zip(&bits) {
            c.set_bit_constant(bit, v);
        }
        var
    }

    fn readback(c: &mut ModuloController, var: &[Bit]) -> u64 {
        let set = c.run_sampler(&ExactEnumerator);
        let lowest = set.lowest();
        assert_eq!(lowest.len(), 1, "expected a unique ground state");
        let bits: Vec<bool> = var.iter().map(|&b| c.extract_bit(lowest[0], b).unwrap()).collect();
        let val = bits_to_int(&bits);
        val.iter_u64_digits().next().unwrap_or(0)
    }

    #[test]
    fn ensure_range_accepts_only_residues_below_p() {
        let p = BigUint::from(5u8);
        let l = 3; // |5| = 3 bits
        for v in 0u64..8 {
            let mut c = ModuloController::new(p.clone());
            let a = fixed(&mut c, v, l);
            c.ensure_range(&a).unwrap();
            let set = c.run_sampler(&ExactEnumerator);
            let ground = set.lowest()[0].energy == 0;
            assert_eq!(ground, v < 5, "v={v}");
        }
    }

    #[test]
    fn add_modp_reduces_into_canonical_range() {
        let p = BigUint::from(7u8);
        for av in 0u64..7 {
            for bv in 0u64..7 {
                let mut c = ModuloController::new(p.clone());
                let l = c.modulus_len();
                let a = fixed(&mut c, av, l);
                let b = fixed(&mut c, bv, l);
                let out = c.new_bits(l);
                c.add_modp(&a, &b, &out, true).unwrap();
                assert_eq!(readback(&mut c, &out), (av + bv) % 7);
            }
        }
    }

    #[test]
    fn sub_modp_matches_modular_subtraction() {
        let p = BigUint::from(13u8);
        for av in 0u64..13 {
            for bv in 0u64..13 {
                let mut c = ModuloController::new(p.clone());
                let l = c.modulus_len();
                let a = fixed(&mut c, av, l);
                let b = fixed(&mut c, bv, l);
                let out = c.new_bits(l);
                c.sub_modp(&a, &b, &out, true).unwrap();
                let expected = (av as i64 - bv as i64).rem_euclid(13) as u64;
                assert_eq!(readback(&mut c, &out), expected);
            }
        }
    }

    #[test]
    fn mult_modp_matches_modular_multiplication() {
        let p = BigUint::from(5u8);
        for av in 0u64..5 {
            for bv in 0u64..5 {
                let mut c = ModuloController::new(p.clone());
                let l = c.modulus_len();
                let a = fixed(&mut c, av, l);
                let b = fixed(&mut c, bv, l);
                let out = c.new_bits(l);
                c.mult_modp(&a, &b, &out, true).unwrap();
                assert_eq!(readback(&mut c, &out), (av * bv) % 5);
            }
        }
    }

    #[test]
    fn inv_modp_computes_the_modular_inverse() {
        let p = BigUint::from(7u8);
        for av in 1u64..7 {
            let mut c = ModuloController::new(p.clone());
            let l = c.modulus_len();
            let a = fixed(&mut c, av, l);
            let out = c.new_bits(l);
            c.inv_modp(&a, &out).unwrap();
            let inverse = readback(&mut c, &out);
            assert_eq!((av * inverse) % 7, 1);
        }
    }

    #[test]
    fn inv_modp_of_zero_is_infeasible() {
        let p = BigUint::from(7u8);
        let mut c = ModuloController::new(p);
        let l = c.modulus_len();
        let a = fixed(&mut c, 0, l);
        let out = c.new_bits(l);
        c.inv_modp(&a, &out).unwrap();
        let set = c.run_sampler(&ExactEnumerator);
        assert!(set.lowest()[0].energy > 0);
    }

    #[test]
    fn double_modp_matches_modular_doubling() {
        let p = BigUint::from(13u8);
        for av in 0u64..13 {
            let mut c = ModuloController::new(p.clone());
            let l = c.modulus_len();
            let a = fixed(&mut c, av, l);
            let out = c.new_bits(l);
            c.double_modp(&a, &out, true).unwrap();
            assert_eq!(readback(&mut c, &out), (2 * av) % 13);
        }
    }
}
