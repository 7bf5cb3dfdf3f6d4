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

//! The sampler boundary: the compiler hands off an immutable [`Bqm`] and gets
//! back a [`SampleSet`]. No sampler beyond the bundled exact enumerator is
//! implemented here — a stochastic annealer is an external collaborator.

use std::collections::HashMap;

use tracing::warn;

use crate::bit::Name;
use crate::bqm::Bqm;

/// One candidate assignment, its energy, and how many times it was observed.
#[derive(Debug, Clone)]
pub struct Sample {
    pub assignment: HashMap<Name, bool>,
    pub energy: i64,
    pub occurrences: u64,
}

/// A collection of samples returned by a [`Sampler`].
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    pub samples: Vec<Sample>,
}

impl SampleSet {
    /// All samples tied for the lowest energy.
    pub fn lowest(&self) -> Vec<&Sample> {
        match self.samples.iter().map(|s| s.energy).min() {
            None => Vec::new(),
            Some(min_energy) => self.samples.iter().filter(|s| s.energy == min_energy).collect(),
        }
    }

    /// The first sample, in whatever order the sampler produced them.
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }
}

/// A pluggable ground-state (or near-ground-state) search over a [`Bqm`].
pub trait Sampler {
    fn sample(&self, bqm: &Bqm) -> SampleSet;
}

/// Brute-force enumeration of every assignment of the model's active names.
///
/// Practical only up to a couple dozen variables — exactly the regime the
/// gate and small arithmetic tests in this crate exercise.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactEnumerator;

impl Sampler for ExactEnumerator {
    fn sample(&self, bqm: &Bqm) -> SampleSet {
        let mut names: std::collections::HashSet<Name> = bqm.names().into_iter().collect();
        for ((a, b), _) in bqm.iter_quadratic() {
            names.insert(a);
            names.insert(b);
        }
        let mut names: Vec<Name> = names.into_iter().collect();
        names.sort_unstable();

        let n = names.len();
        if n > 24 {
            warn!(variables = n, "exact enumeration over this many variables will not finish in practice; \
                  use a stochastic sampler for models this size");
        }

        let mut samples = Vec::with_capacity(1usize << n);
        for mask in 0u64..(1u64 << n) {
            let assignment: HashMap<Name, bool> = names
                .iter()
                .enumerate()
                .map(|(i, &name)| (name, (mask >> i) & 1 == 1))
                .collect();
            let energy = bqm.energy(&assignment);
            samples.push(Sample {
                assignment,
                energy,
                occurrences: 1,
            });
        }

        SampleSet { samples }
    }
}
