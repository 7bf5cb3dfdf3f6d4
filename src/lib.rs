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

//! Compiles elliptic-curve scalar multiplication into a Binary Quadratic
//! Model: a quadratic pseudo-Boolean function over `{0,1}` variables whose
//! ground states encode the correct result. The compiled model is meant to
//! be handed to an external sampler (an exact enumerator for small tests, a
//! stochastic annealer for real runs); this crate never searches for a
//! ground state itself.
//!
//! Layering, leaves first:
//! - [`bit`] — bit identity and aliasing (a union-find over names).
//! - [`bqm`] — the sparse quadratic model itself.
//! - [`number`] — integer <-> little-endian bit list coding.
//! - [`error`] — the crate-wide error type.
//! - [`sampler`] — the sampler boundary and a bundled exact enumerator.
//! - [`controller`] — allocation, named variables, deferred constant fixing.
//! - [`gates`] — penalty-function emitters for the elementary logic gates.
//! - [`arithmetic`] — ripple-carry add/subtract/multiply/square.
//! - [`modulo`] — reduction mod a fixed prime and the modular arithmetic built on it.
//! - [`ecc`] — affine point addition and scalar multiplication.
//! - [`doubles`] — the precomputed-doubles file format and classical (non-symbolic) doubling.

pub mod arithmetic;
pub mod bit;
pub mod bqm;
pub mod controller;
pub mod doubles;
pub mod ecc;
pub mod error;
pub mod gates;
pub mod modulo;
pub mod number;
pub mod sampler;

pub use bit::{Bit, BitTable, Name, Variable};
pub use bqm::Bqm;
pub use controller::Controller;
pub use ecc::{EccController, Point, PointConst};
pub use error::CompilerError;
pub use modulo::ModuloController;
pub use sampler::{ExactEnumerator, Sample, SampleSet, Sampler};
