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

//! The sparse quadratic pseudo-Boolean form a circuit compiles into.
//!
//! `E(s) = offset + sum_i h_i s_i + sum_{i<j} J_ij s_i s_j`, `s_i in {0,1}`.

use std::collections::{HashMap, HashSet};

use crate::bit::Name;

fn edge_key(a: Name, b: Name) -> (Name, Name) {
    if a <= b { (a, b) } else { (b, a) }
}

/// A sparse binary quadratic model over pseudo-Boolean names.
#[derive(Default, Debug, Clone)]
pub struct Bqm {
    linear: HashMap<Name, i64>,
    quadratic: HashMap<(Name, Name), i64>,
    adjacency: HashMap<Name, HashSet<Name>>,
    offset: i64,
}

impl Bqm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn add_offset(&mut self, delta: i64) {
        self.offset += delta;
    }

    /// Accumulates `delta` into the linear bias of `name`, registering the
    /// name in the model even when `delta` is zero.
    pub fn add_linear(&mut self, name: Name, delta: i64) {
        *self.linear.entry(name).or_insert(0) += delta;
    }

    pub fn get_linear(&self, name: Name) -> Option<i64> {
        self.linear.get(&name).copied()
    }

    /// Accumulates `delta` into the quadratic bias between `a` and `b`. A
    /// self-quadratic term (`a == b`) collapses to a linear one, since
    /// `s*s == s` on `{0,1}` — this is the case after two endpoints of the
    /// same edge have been merged.
    pub fn add_quadratic(&mut self, a: Name, b: Name, delta: i64) {
        if a == b {
            self.add_linear(a, delta);
            return;
        }
        let key = edge_key(a, b);
        *self.quadratic.entry(key).or_insert(0) += delta;
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    pub fn get_quadratic(&self, a: Name, b: Name) -> Option<i64> {
        if a == b {
            return None;
        }
        self.quadratic.get(&edge_key(a, b)).copied()
    }

    /// Every `(neighbour, bias)` pair incident to `name`.
    pub fn neighbours(&self, name: Name) -> Vec<(Name, i64)> {
        match self.adjacency.get(&name) {
            None => Vec::new(),
            Some(ns) => ns
                .iter()
                .map(|&m| (m, self.quadratic[&edge_key(name, m)]))
                .collect(),
        }
    }

    pub fn num_variables(&self) -> usize {
        self.linear.len()
    }

    /// Every name still present in the model (i.e. not yet fixed/removed).
    pub fn names(&self) -> Vec<Name> {
        self.linear.keys().copied().collect()
    }

    pub fn iter_linear(&self) -> impl Iterator<Item = (Name, i64)> + '_ {
        self.linear.iter().map(|(&k, &v)| (k, v))
    }

    pub fn iter_quadratic(&self) -> impl Iterator<Item = ((Name, Name), i64)> + '_ {
        self.quadratic.iter().map(|(&k, &v)| (k, v))
    }

    /// Evaluates `E(s)` for a (possibly partial — missing names default to 0) assignment.
    pub fn energy(&self, assignment: &HashMap<Name, bool>) -> i64 {
        let mut e = self.offset;
        for (n, h) in self.iter_linear() {
            if *assignment.get(&n).unwrap_or(&false) {
                e += h;
            }
        }
        for ((a, b), j) in self.iter_quadratic() {
            if *assignment.get(&a).unwrap_or(&false) && *assignment.get(&b).unwrap_or(&false) {
                e += j;
            }
        }
        e
    }

    fn detach(&mut self, name: Name) -> Vec<(Name, i64)> {
        let neighbours = self.neighbours(name);
        for &(m, _) in &neighbours {
            self.quadratic.remove(&edge_key(name, m));
            if let Some(set) = self.adjacency.get_mut(&m) {
                set.remove(&name);
            }
        }
        self.adjacency.remove(&name);
        neighbours
    }

    /// Deletes every term touching `name`, without folding anything into the
    /// offset. Use [`Bqm::fix`] to substitute a concrete value instead.
    pub fn remove(&mut self, name: Name) {
        self.detach(name);
        self.linear.remove(&name);
    }

    /// Substitutes `s_name = v`, folding the removed terms into the linear
    /// biases of its neighbours and into the offset.
    pub fn fix(&mut self, name: Name, v: bool) {
        let h = self.linear.remove(&name).unwrap_or(0);
        let neighbours = self.detach(name);
        if v {
            self.offset += h;
            for (m, j) in neighbours {
                self.add_linear(m, j);
            }
        }
    }

    /// Substitutes `s_name -> 1 - s_name`.
    pub fn flip(&mut self, name: Name) {
        let h = self.linear.get(&name).copied().unwrap_or(0);
        self.offset += h;
        self.linear.insert(name, -h);

        let neighbours = self.neighbours(name);
        for (m, j) in neighbours {
            self.add_linear(m, j);
            let key = edge_key(name, m);
            if let Some(slot) = self.quadratic.get_mut(&key) {
                *slot = -j;
            }
        }
    }

    /// Folds `loser`'s terms into `winner` (used once [`crate::bit::BitTable`]
    /// has decided the two names are now the same variable) and removes `loser`.
    pub fn merge_fold(&mut self, winner: Name, loser: Name) {
        if winner == loser {
            return;
        }
        let loser_linear = self.linear.remove(&loser).unwrap_or(0);
        self.add_linear(winner, loser_linear);

        let neighbours = self.detach(loser);
        for (m, bias) in neighbours {
            self.add_quadratic(winner, m, bias);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_quadratic_collapses_to_linear() {
        let mut bqm = Bqm::new();
        bqm.add_quadratic(0, 0, 5);
        assert_eq!(bqm.get_linear(0), Some(5));
        assert_eq!(bqm.neighbours(0).len(), 0);
    }

    #[test]
    fn fix_folds_neighbours_and_offset() {
        let mut bqm = Bqm::new();
        bqm.add_linear(0, 3);
        bqm.add_linear(1, -1);
        bqm.add_quadratic(0, 1, 7);

        bqm.fix(0, true);

        assert_eq!(bqm.get_linear(0), None);
        assert_eq!(bqm.offset(), 3);
        assert_eq!(bqm.get_linear(1), Some(6));
        assert_eq!(bqm.neighbours(1).len(), 0);
    }

    #[test]
    fn fix_to_zero_drops_neighbour_contribution() {
        let mut bqm = Bqm::new();
        bqm.add_linear(0, 3);
        bqm.add_linear(1, -1);
        bqm.add_quadratic(0, 1, 7);

        bqm.fix(0, false);

        assert_eq!(bqm.offset(), 0);
        assert_eq!(bqm.get_linear(1), Some(-1));
    }

    #[test]
    fn fix_folds_a_name_with_only_quadratic_terms() {
        // Mirrors an AND gate's inputs: no linear bias of their own, only
        // quadratic edges to the other input and the output.
        let mut bqm = Bqm::new();
        bqm.add_quadratic(0, 1, 1);
        bqm.add_quadratic(0, 2, -2);
        bqm.add_linear(2, 3);

        bqm.fix(0, true);

        assert_eq!(bqm.get_linear(0), None);
        assert_eq!(bqm.neighbours(0).len(), 0);
        assert_eq!(bqm.get_linear(1), Some(1));
        assert_eq!(bqm.get_linear(2), Some(1));
    }

    #[test]
    fn fix_on_absent_name_is_a_no_op() {
        let mut bqm = Bqm::new();
        bqm.fix(42, true);
        assert_eq!(bqm.offset(), 0);
    }

    #[test]
    fn flip_negates_linear_and_quadratic_terms() {
        let mut bqm = Bqm::new();
        bqm.add_linear(0, 5);
        bqm.add_linear(1, 2);
        bqm.add_quadratic(0, 1, 3);

        bqm.flip(0);

        assert_eq!(bqm.get_linear(0), Some(-5));
        assert_eq!(bqm.offset(), 5);
        assert_eq!(bqm.get_linear(1), Some(5));
        assert_eq!(bqm.get_quadratic(0, 1), Some(-3));
    }

    #[test]
    fn merge_fold_collapses_shared_neighbour_to_linear() {
        // winner=0, loser=1, both connected to m=2 — after folding, the
        // winner-m and loser-m edges must combine (not stay separate terms).
        let mut bqm = Bqm::new();
        bqm.add_quadratic(0, 2, 3);
        bqm.add_quadratic(1, 2, 4);
        bqm.add_linear(1, 10);

        bqm.merge_fold(0, 1);

        assert_eq!(bqm.get_linear(1), None);
        assert_eq!(bqm.get_linear(0), Some(10));
        assert_eq!(bqm.get_quadratic(0, 2), Some(7));
    }

    #[test]
    fn merge_fold_of_directly_connected_names_collapses_to_linear() {
        let mut bqm = Bqm::new();
        bqm.add_quadratic(0, 1, 6);
        bqm.merge_fold(0, 1);
        assert_eq!(bqm.get_linear(0), Some(6));
    }
}
