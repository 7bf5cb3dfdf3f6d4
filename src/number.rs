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

//! Integer &lt;-&gt; little-endian binary list conversions.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::CompilerError;

/// Encodes `value` as a little-endian list of bits (index 0 = least significant).
///
/// Without a `length`, returns the minimal-length encoding (trailing zero bits
/// dropped, except that zero itself encodes as a single `false`). With a
/// `length`, zero-pads to exactly that many bits, or fails with
/// [`CompilerError::ValueTooLarge`] if `value` does not fit.
pub fn int_to_bits(value: &BigUint, length: Option<usize>) -> Result<Vec<bool>, CompilerError> {
    let mut bits = Vec::new();
    let mut remaining = value.clone();
    let two = BigUint::from(2u8);
    while !remaining.is_zero() {
        bits.push(&remaining % &two == BigUint::one());
        remaining /= &two;
    }

    match length {
        None => {
            if bits.is_empty() {
                bits.push(false);
            }
            Ok(bits)
        }
        Some(len) => {
            if bits.len() > len {
                return Err(CompilerError::ValueTooLarge {
                    value: value.to_string(),
                    bits: len,
                });
            }
            bits.resize(len, false);
            Ok(bits)
        }
    }
}

/// Convenience wrapper over [`int_to_bits`] for plain `u64` constants.
pub fn u64_to_bits(value: u64, length: Option<usize>) -> Result<Vec<bool>, CompilerError> {
    int_to_bits(&BigUint::from(value), length)
}

/// Decodes a little-endian bit list back into an integer.
pub fn bits_to_int(bits: &[bool]) -> BigUint {
    let mut result = BigUint::zero();
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            result += BigUint::one() << i;
        }
    }
    result
}

/// Decodes a little-endian list of possibly-unknown bits. Returns `None` if
/// any bit is unknown.
pub fn opt_bits_to_int(bits: &[Option<bool>]) -> Option<BigUint> {
    let mut result = BigUint::zero();
    for (i, bit) in bits.iter().enumerate() {
        if (*bit)? {
            result += BigUint::one() << i;
        }
    }
    Some(result)
}

/// Bit length of `value` (the length `int_to_bits(value, None)` would return).
pub fn bit_length(value: &BigUint) -> usize {
    int_to_bits(value, None).expect("unbounded encoding never fails").len()
}
