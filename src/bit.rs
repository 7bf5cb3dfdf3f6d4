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

//! Identity and aliasing for the binary variables of a [`crate::bqm::Bqm`].
//!
//! A [`Bit`] is an opaque handle; circuit code is not recommended to read its
//! numeric value. Its current [`Name`] — the key under which it lives inside
//! the BQM — is tracked by [`BitTable`] as a union-find over names, so that
//! `merge` can unify two bits after the fact without invalidating any handle
//! already held by the caller.

/// Canonical identifier of a bit's equivalence class inside the BQM.
pub type Name = usize;

/// An opaque handle for a single binary variable.
///
/// Circuit implementations are not recommended to rely on the numeric value
/// inside; use [`BitTable::name_of`] to resolve it to a [`Name`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Bit(usize);

impl Bit {
    /// Constructs a bit with an arbitrary index. Circuit implementations are
    /// not recommended to use this; allocate bits via [`BitTable::new_bit`].
    pub fn new_unchecked(index: usize) -> Self {
        Bit(index)
    }

    /// Returns the index underlying this handle.
    pub fn get_unchecked(&self) -> usize {
        self.0
    }
}

/// An ordered, little-endian sequence of bits encoding a non-negative integer.
pub type Variable = Vec<Bit>;

/// Union-find over bit names, with path compression.
///
/// Every allocated bit starts out as its own name. `merge(keep, other)`
/// unifies the classes of `keep` and `other`, always choosing `keep`'s
/// (possibly already-merged) name as the representative going forward.
#[derive(Default, Debug, Clone)]
pub struct BitTable {
    parent: Vec<Name>,
}

impl BitTable {
    pub fn new() -> Self {
        Self { parent: Vec::new() }
    }

    /// Allocates a fresh bit. Allocating new bits never invalidates existing handles.
    pub fn new_bit(&mut self) -> Bit {
        let id = self.parent.len();
        self.parent.push(id);
        Bit(id)
    }

    /// Allocates `n` fresh bits, in index order.
    pub fn new_bits(&mut self, n: usize) -> Variable {
        (0..n).map(|_| self.new_bit()).collect()
    }

    /// Resolves a bit to its current canonical name, compressing the path.
    pub fn name_of(&mut self, bit: Bit) -> Name {
        self.find(bit.0)
    }

    /// Resolves every bit in `var` to its current canonical name.
    pub fn names_of(&mut self, var: &[Bit]) -> Vec<Name> {
        var.iter().map(|&b| self.name_of(b)).collect()
    }

    fn find(&mut self, x: Name) -> Name {
        if self.parent[x] == x {
            return x;
        }
        let root = self.find(self.parent[x]);
        self.parent[x] = root;
        root
    }

    /// Unifies the classes of `keep` and `other`. Returns `Some((winner, loser))`
    /// with the two *previous* canonical names if they differed, or `None` if
    /// they were already aliased (a no-op). The caller is responsible for
    /// folding the loser's BQM terms into the winner's (see [`crate::bqm::Bqm::merge_fold`]).
    pub fn union(&mut self, keep: Bit, other: Bit) -> Option<(Name, Name)> {
        let winner = self.find(keep.0);
        let loser = self.find(other.0);
        if winner == loser {
            return None;
        }
        self.parent[loser] = winner;
        Some((winner, loser))
    }
}
