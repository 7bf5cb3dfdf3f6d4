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

use thiserror::Error;

/// Errors raised while compiling arithmetic and elliptic-curve operations into a BQM.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilerError {
    #[error("length mismatch: {0}")]
    LengthMismatch(String),

    #[error("input too short: {0}")]
    InputTooShort(String),

    #[error("variable `{0}` already exists")]
    DuplicateName(String),

    #[error("unknown variable `{0}`")]
    UnknownName(String),

    #[error("value {value} does not fit in {bits} bits")]
    ValueTooLarge { value: String, bits: usize },
}
