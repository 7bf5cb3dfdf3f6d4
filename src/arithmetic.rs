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

//! Ripple-carry arithmetic over little-endian [`Variable`]s, built out of the
//! gates in [`crate::gates`].

use crate::bit::{Bit, Variable};
use crate::controller::Controller;
use crate::error::CompilerError;

impl Controller {
    /// `C = A + B`. Requires `|C| = max(|A|, |B|) + 1`.
    pub fn add(&mut self, a: &[Bit], b: &[Bit], c: &[Bit]) -> Result<(), CompilerError> {
        if a.is_empty() || b.is_empty() {
            return Err(CompilerError::InputTooShort("add requires non-empty operands".into()));
        }
        let (a, b) = if a.len() >= b.len() { (a, b) } else { (b, a) };
        if c.len() != a.len() + 1 {
            return Err(CompilerError::LengthMismatch(format!(
                "add output must have {} bits, got {}",
                a.len() + 1,
                c.len()
            )));
        }

        let mut carry = self.new_bit();
        self.half_adder(a[0], b[0], c[0], carry);
        for i in 1..b.len() {
            let next_carry = self.new_bit();
            self.full_adder(a[i], b[i], carry, c[i], next_carry);
            carry = next_carry;
        }
        for i in b.len()..a.len() {
            let next_carry = self.new_bit();
            self.half_adder(a[i], carry, c[i], next_carry);
            carry = next_carry;
        }
        self.merge(c[a.len()], carry);
        Ok(())
    }

    /// `C = A + B`, asserting the true sum fits in `max(|A|, |B|)` bits
    /// (infeasible — ground energy > 0 — when it does not).
    pub fn add_no_overflow(&mut self, a: &[Bit], b: &[Bit], c: &[Bit]) -> Result<(), CompilerError> {
        let expected = a.len().max(b.len());
        if c.len() != expected {
            return Err(CompilerError::LengthMismatch(format!(
                "add_no_overflow output must have {expected} bits, got {}",
                c.len()
            )));
        }
        let overflow = self.new_bit();
        let mut extended = c.to_vec();
        extended.push(overflow);
        self.add(a, b, &extended)?;
        self.zero(overflow);
        Ok(())
    }

    /// `C = A + b`, `b` a known little-endian constant with `|b| <= |A|`.
    /// Requires `|C| = |A| + 1`.
    pub fn add_const(&mut self, a: &[Bit], b: &[bool], c: &[Bit]) -> Result<(), CompilerError> {
        if a.is_empty() {
            return Err(CompilerError::InputTooShort("add_const requires a non-empty operand".into()));
        }
        if b.len() > a.len() {
            return Err(CompilerError::LengthMismatch(format!(
                "constant has {} bits but operand only has {}",
                b.len(),
                a.len()
            )));
        }
        if c.len() != a.len() + 1 {
            return Err(CompilerError::LengthMismatch(format!(
                "add_const output must have {} bits, got {}",
                a.len() + 1,
                c.len()
            )));
        }

        if b.is_empty() {
            for i in 0..a.len() {
                self.merge(c[i], a[i]);
            }
            self.zero(c[a.len()]);
            return Ok(());
        }

        // Ancilla bits that will be fixed to the constant at sampler time.
        // Fewer ancillas than synthesising XOR/AND/OR directly on the
        // constant bit for each position.
        let const_bits: Variable = b
            .iter()
            .map(|&bit| {
                let anc = self.new_bit();
                self.set_bit_constant(anc, bit);
                anc
            })
            .collect();

        let mut carry = self.new_bit();
        self.half_adder(a[0], const_bits[0], c[0], carry);
        for i in 1..b.len() {
            let next_carry = self.new_bit();
            self.full_adder(a[i], const_bits[i], carry, c[i], next_carry);
            carry = next_carry;
        }
        for i in b.len()..a.len() {
            let next_carry = self.new_bit();
            self.half_adder(a[i], carry, c[i], next_carry);
            carry = next_carry;
        }
        self.merge(c[a.len()], carry);
        Ok(())
    }

    /// `B + C = A` (mod `2^(|A|+1)`): returns the difference `C` (length
    /// `|A|`) and the underflow bit, which is `1` exactly when `A < B`.
    pub fn subtract(&mut self, a: &[Bit], b: &[Bit]) -> Result<(Variable, Bit), CompilerError> {
        if b.len() > a.len() {
            return Err(CompilerError::LengthMismatch(format!(
                "subtrahend has {} bits but minuend only has {}",
                b.len(),
                a.len()
            )));
        }
        let c = self.new_bits(a.len());
        let underflow = self.new_bit();
        let mut combined = a.to_vec();
        combined.push(underflow);
        self.add(b, &c, &combined)?;
        Ok((c, underflow))
    }

    /// As [`Controller::subtract`], with a known constant subtrahend.
    pub fn subtract_const(&mut self, a: &[Bit], b: &[bool]) -> Result<(Variable, Bit), CompilerError> {
        if b.len() > a.len() {
            return Err(CompilerError::LengthMismatch(format!(
                "constant has {} bits but minuend only has {}",
                b.len(),
                a.len()
            )));
        }
        let c = self.new_bits(a.len());
        let underflow = self.new_bit();
        let mut combined = a.to_vec();
        combined.push(underflow);
        self.add_const(&c, b, &combined)?;
        Ok((c, underflow))
    }

    /// `C = A * B`, shift-and-add. Requires `|C| = |A| + |B|`.
    pub fn multiply(&mut self, a: &[Bit], b: &[Bit], c: &[Bit]) -> Result<(), CompilerError> {
        if a.is_empty() || b.is_empty() {
            return Err(CompilerError::InputTooShort("multiply requires non-empty operands".into()));
        }
        if c.len() != a.len() + b.len() {
            return Err(CompilerError::LengthMismatch(format!(
                "multiply output must have {} bits, got {}",
                a.len() + b.len(),
                c.len()
            )));
        }

        let p0 = self.new_bits(a.len());
        self.and_var(b[0], a, &p0)?;
        self.merge(c[0], p0[0]);
        let mut running: Variable = p0[1..].to_vec();

        for i in 1..b.len() {
            let pi = self.new_bits(a.len());
            self.and_var(b[i], a, &pi)?;
            let sum = self.new_bits(a.len() + 1);
            self.add(&running, &pi, &sum)?;
            self.merge(c[i], sum[0]);
            running = sum[1..].to_vec();
        }

        self.alias_remaining_product_bits(&mut running, &c[b.len()..])?;
        Ok(())
    }

    /// `C = A * b`, `b` a known little-endian constant. Needs no AND gates.
    pub fn multiply_const(&mut self, a: &[Bit], b: &[bool], c: &[Bit]) -> Result<(), CompilerError> {
        if a.is_empty() {
            return Err(CompilerError::InputTooShort("multiply_const requires a non-empty operand".into()));
        }
        if c.len() != a.len() + b.len() {
            return Err(CompilerError::LengthMismatch(format!(
                "multiply_const output must have {} bits, got {}",
                a.len() + b.len(),
                c.len()
            )));
        }

        let mut running: Variable = Vec::new();
        for (i, &bit) in b.iter().enumerate() {
            if bit {
                if running.is_empty() {
                    self.merge(c[i], a[0]);
                    running = a[1..].to_vec();
                } else {
                    let sum_len = running.len().max(a.len()) + 1;
                    let sum = self.new_bits(sum_len);
                    self.add(&running, a, &sum)?;
                    self.merge(c[i], sum[0]);
                    running = sum[1..].to_vec();
                }
            } else if running.is_empty() {
                self.zero(c[i]);
            } else {
                self.merge(c[i], running[0]);
                running = running[1..].to_vec();
            }
        }

        self.alias_remaining_product_bits(&mut running, &c[b.len()..])?;
        Ok(())
    }

    /// `C = A^2`. Like [`Controller::multiply`], but the `i`-th partial
    /// product aliases `A_i` directly at position `i` (since `A_i * A_i =
    /// A_i`) instead of spending an AND gate on it. Requires `|C| = 2|A|`.
    pub fn square(&mut self, a: &[Bit], c: &[Bit]) -> Result<(), CompilerError> {
        if a.is_empty() {
            return Err(CompilerError::InputTooShort("square requires a non-empty operand".into()));
        }
        if c.len() != 2 * a.len() {
            return Err(CompilerError::LengthMismatch(format!(
                "square output must have {} bits, got {}",
                2 * a.len(),
                c.len()
            )));
        }

        let p0 = self.square_partial_product(a, 0);
        self.merge(c[0], p0[0]);
        let mut running: Variable = p0[1..].to_vec();

        for i in 1..a.len() {
            let pi = self.square_partial_product(a, i);
            let sum = self.new_bits(a.len() + 1);
            self.add(&running, &pi, &sum)?;
            self.merge(c[i], sum[0]);
            running = sum[1..].to_vec();
        }

        self.alias_remaining_product_bits(&mut running, &c[a.len()..])?;
        Ok(())
    }

    fn square_partial_product(&mut self, a: &[Bit], i: usize) -> Variable {
        let p = self.new_bits(a.len());
        for (j, &pj) in p.iter().enumerate() {
            if j == i {
                self.merge(pj, a[i]);
            } else {
                self.and_gate(a[i], a[j], pj);
            }
        }
        p
    }

    /// Aliases the trailing carry-propagation window `running` onto `rest`,
    /// zero-filling any high bits `running` never grew into (the sole case
    /// is a 1-bit multiplier/constant, where the ripple loop never runs).
    fn alias_remaining_product_bits(&mut self, running: &mut Variable, rest: &[Bit]) -> Result<(), CompilerError> {
        while running.len() < rest.len() {
            let z = self.new_bit();
            self.zero(z);
            running.push(z);
        }
        if running.len() != rest.len() {
            return Err(CompilerError::LengthMismatch(
                "product accumulator overran its output window".into(),
            ));
        }
        for (i, &bit) in running.iter().enumerate() {
            self.merge(rest[i], bit);
        }
        Ok(())
    }
}
