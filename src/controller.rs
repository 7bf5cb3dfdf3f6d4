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

//! The base controller: bit/variable allocation, named-variable registry, the
//! deferred constant-fixing queue, and the sampler hand-off. Gate, arithmetic,
//! modular and elliptic-curve operations are added to [`Controller`] (and to
//! the wrapping [`crate::modulo::ModuloController`] /
//! [`crate::ecc::EccController`]) in their own modules.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::bit::{Bit, BitTable, Name, Variable};
use crate::bqm::Bqm;
use crate::error::CompilerError;
use crate::sampler::{Sample, SampleSet, Sampler};

/// Composes bit identity, the growing BQM, named variables, and the deferred
/// constant-fixing queue. Every higher-level controller in this crate wraps
/// one of these (directly, or transitively through another wrapper).
#[derive(Debug, Default)]
pub struct Controller {
    bits: BitTable,
    bqm: Bqm,
    variables: HashMap<String, Variable>,
    /// Fixings queued by `set_bit_constant`/`set_variable_constant`, applied
    /// to the bit's *current* canonical name only at `run_sampler` time.
    constants_queue: Vec<(Bit, bool)>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bqm(&self) -> &Bqm {
        &self.bqm
    }

    pub fn bqm_mut(&mut self) -> &mut Bqm {
        &mut self.bqm
    }

    pub fn new_bit(&mut self) -> Bit {
        self.bits.new_bit()
    }

    pub fn new_bits(&mut self, n: usize) -> Variable {
        self.bits.new_bits(n)
    }

    pub fn name_of(&mut self, bit: Bit) -> Name {
        self.bits.name_of(bit)
    }

    pub fn names_of(&mut self, var: &[Bit]) -> Vec<Name> {
        self.bits.names_of(var)
    }

    /// Allocates `length` fresh bits and registers them under `name`.
    pub fn create_variable(&mut self, name: &str, length: usize) -> Result<Variable, CompilerError> {
        if self.variables.contains_key(name) {
            return Err(CompilerError::DuplicateName(name.to_string()));
        }
        let var = self.new_bits(length);
        self.variables.insert(name.to_string(), var.clone());
        Ok(var)
    }

    pub fn get_variable(&self, name: &str) -> Result<&Variable, CompilerError> {
        self.variables
            .get(name)
            .ok_or_else(|| CompilerError::UnknownName(name.to_string()))
    }

    pub fn exists_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Unifies the classes of `keep` and `other`, folding `other`'s BQM terms
    /// into `keep`'s current canonical name. A no-op if they already alias.
    pub fn merge(&mut self, keep: Bit, other: Bit) {
        if let Some((winner, loser)) = self.bits.union(keep, other) {
            self.bqm.merge_fold(winner, loser);
        }
    }

    /// Queues `bit` to be fixed to `value` just before sampling.
    pub fn set_bit_constant(&mut self, bit: Bit, value: bool) {
        self.constants_queue.push((bit, value));
    }

    /// Queues every bit of `var` to its corresponding entry in `values`.
    pub fn set_variable_constant(&mut self, var: &[Bit], values: &[bool]) -> Result<(), CompilerError> {
        if var.len() != values.len() {
            return Err(CompilerError::LengthMismatch(format!(
                "variable has {} bits but {} values were given",
                var.len(),
                values.len()
            )));
        }
        for (&bit, &value) in var.iter().zip(values) {
            self.set_bit_constant(bit, value);
        }
        Ok(())
    }

    /// Drains the constants queue (in insertion order) onto the BQM, resolving
    /// each bit to its *current* canonical name. A fixing whose name has
    /// already been removed (e.g. folded away by an earlier fix, or never
    /// referenced by any gate) is a no-op on the BQM but is not an error —
    /// such calls are expected to be idempotent in normal usage after merges.
    fn apply_constants_queue(&mut self) {
        let pending: Vec<(Bit, bool)> = self.constants_queue.drain(..).collect();
        for (bit, value) in pending {
            let name = self.bits.name_of(bit);
            if self.bqm.get_linear(name).is_none() {
                warn!(name, value, "fixing a name already absent from the BQM");
            }
            self.bqm.fix(name, value);
        }
    }

    /// Applies all queued constant fixings and hands the resulting BQM to
    /// `sampler`.
    pub fn run_sampler(&mut self, sampler: &dyn Sampler) -> SampleSet {
        debug!(queued = self.constants_queue.len(), "applying deferred constant fixings");
        self.apply_constants_queue();
        sampler.sample(&self.bqm)
    }

    /// Resolves `bit` against `sample`; bits absent from the sample (because
    /// they were fixed away before sampling) fall back to the recorded
    /// constant.
    pub fn extract_bit(&mut self, sample: &Sample, bit: Bit) -> Option<bool> {
        let name = self.bits.name_of(bit);
        if let Some(v) = sample.assignment.get(&name) {
            return Some(*v);
        }
        let queued = self.constants_queue.clone();
        queued
            .into_iter()
            .rev()
            .find(|&(b, _)| self.bits.name_of(b) == name)
            .map(|(_, v)| v)
    }

    pub fn extract_variable(&mut self, sample: &Sample, var: &[Bit]) -> Vec<Option<bool>> {
        var.iter().map(|&b| self.extract_bit(sample, b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::ExactEnumerator;

    #[test]
    fn create_variable_rejects_duplicate_names() {
        let mut c = Controller::new();
        c.create_variable("a", 4).unwrap();
        assert_eq!(
            c.create_variable("a", 4).unwrap_err(),
            CompilerError::DuplicateName("a".to_string())
        );
    }

    #[test]
    fn get_variable_rejects_unknown_names() {
        let c = Controller::new();
        assert_eq!(
            c.get_variable("nope").unwrap_err(),
            CompilerError::UnknownName("nope".to_string())
        );
    }

    #[test]
    fn merge_folds_bqm_terms_and_is_idempotent() {
        let mut c = Controller::new();
        let a = c.new_bit();
        let b = c.new_bit();
        let m = c.new_bit();
        let na = c.name_of(a);
        let nb = c.name_of(b);
        let nm = c.name_of(m);
        c.bqm_mut().add_quadratic(na, nm, 3);
        c.bqm_mut().add_quadratic(nb, nm, 4);
        c.bqm_mut().add_linear(nb, 10);

        c.merge(a, b);
        // merging again must not double-fold anything.
        c.merge(a, b);

        let na_after = c.name_of(a);
        assert_eq!(c.bqm().get_linear(na_after), Some(10));
        assert_eq!(c.bqm().get_quadratic(na_after, nm), Some(7));
    }

    #[test]
    fn run_sampler_applies_queued_fixings_by_current_name() {
        let mut c = Controller::new();
        let a = c.new_bit();
        let b = c.new_bit();
        let na = c.name_of(a);
        c.bqm_mut().add_linear(na, 5);

        c.merge(b, a); // b becomes the representative; a's name folds away
        c.set_bit_constant(a, true);

        let set = c.run_sampler(&ExactEnumerator);
        assert_eq!(set.samples.len(), 1);
        assert_eq!(set.samples[0].energy, 5);
    }
}
