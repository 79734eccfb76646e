// posterior.rs - Posterior accumulation and normalization

use crate::core::error::InferenceError;
use crate::core::hypothesis::{GeneCount, Hypothesis};
use crate::data::Pedigree;
use std::collections::HashSet;

/// Gene and trait weights of one person
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PersonPosterior {
    /// Weights for 0, 1 and 2 copies
    pub gene: [f64; 3],
    /// Weights for trait absent (index 0) and present (index 1)
    pub trait_weights: [f64; 2],
}

impl PersonPosterior {
    pub fn gene(&self, gene: GeneCount) -> f64 {
        self.gene[gene.index()]
    }

    pub fn trait_probability(&self, present: bool) -> f64 {
        self.trait_weights[usize::from(present)]
    }
}

/// Per-person gene and trait distributions for one inference run
///
/// Starts at all-zero weights, receives one `update` per hypothesis and is
/// normalized exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct PosteriorTable {
    names: Vec<String>,
    entries: Vec<PersonPosterior>,
    normalized: bool,
}

impl PosteriorTable {
    /// Empty table with one zeroed entry per person
    pub fn new(pedigree: &Pedigree) -> Self {
        Self {
            names: pedigree.names().map(str::to_string).collect(),
            entries: vec![PersonPosterior::default(); pedigree.len()],
            normalized: false,
        }
    }

    /// Add the joint probability `p` of `hypothesis` to every person
    pub fn update(&mut self, hypothesis: &Hypothesis, p: f64) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.gene[hypothesis.gene(i).index()] += p;
            entry.trait_weights[usize::from(hypothesis.has_trait(i))] += p;
        }
    }

    /// Same as `update`, with the hypothesis given as named groups
    pub fn update_with_sets(
        &mut self,
        pedigree: &Pedigree,
        one_gene: &HashSet<String>,
        two_genes: &HashSet<String>,
        have_trait: &HashSet<String>,
        p: f64,
    ) -> Result<(), InferenceError> {
        let hypothesis = Hypothesis::from_sets(pedigree, one_gene, two_genes, have_trait)?;
        self.update(&hypothesis, p);
        Ok(())
    }

    /// Elementwise sum with a table built over the same people
    pub fn merge(&mut self, other: &PosteriorTable) -> Result<(), InferenceError> {
        if self.names != other.names {
            return Err(InferenceError::state("Cannot merge posterior tables over different people"));
        }
        if self.normalized || other.normalized {
            return Err(InferenceError::state("Cannot merge normalized posterior tables"));
        }
        for (mine, theirs) in self.entries.iter_mut().zip(&other.entries) {
            for (a, b) in mine.gene.iter_mut().zip(theirs.gene) {
                *a += b;
            }
            for (a, b) in mine.trait_weights.iter_mut().zip(theirs.trait_weights) {
                *a += b;
            }
        }
        Ok(())
    }

    /// Rescale every distribution to sum to one
    pub fn normalize(&mut self) -> Result<(), InferenceError> {
        if self.normalized {
            return Err(InferenceError::state("Posterior table is already normalized"));
        }
        if self.entries.is_empty() {
            return Err(InferenceError::state("Cannot normalize an empty posterior table"));
        }

        for (name, entry) in self.names.iter().zip(self.entries.iter_mut()) {
            normalize_weights(&mut entry.gene, name, "gene")?;
            normalize_weights(&mut entry.trait_weights, name, "trait")?;
        }
        self.normalized = true;
        Ok(())
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PersonPosterior> {
        self.names.iter().position(|n| n == name).map(|i| &self.entries[i])
    }

    /// People and their distributions, in pedigree order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PersonPosterior)> {
        self.names.iter().map(String::as_str).zip(self.entries.iter())
    }
}

fn normalize_weights(weights: &mut [f64], person: &str, field: &str) -> Result<(), InferenceError> {
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(InferenceError::state(format!(
            "{} distribution of '{}' sums to {} and cannot be normalized",
            field, person, total
        )));
    }
    for w in weights.iter_mut() {
        *w /= total;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Person;
    use proptest::prelude::*;

    fn pair() -> Pedigree {
        Pedigree::new(vec![Person::founder("A", None), Person::founder("B", Some(true))]).unwrap()
    }

    #[test]
    fn test_update_accumulates_by_assignment() {
        let pedigree = pair();
        let mut table = PosteriorTable::new(&pedigree);

        let h1 = Hypothesis::new(vec![GeneCount::One, GeneCount::Two], vec![false, true]).unwrap();
        let h2 = Hypothesis::new(vec![GeneCount::Zero, GeneCount::Two], vec![true, true]).unwrap();
        table.update(&h1, 0.25);
        table.update(&h2, 0.5);

        let a = table.get("A").unwrap();
        assert_eq!(a.gene, [0.5, 0.25, 0.0]);
        assert_eq!(a.trait_weights, [0.25, 0.5]);
        let b = table.get("B").unwrap();
        assert_eq!(b.gene, [0.0, 0.0, 0.75]);
        assert_eq!(b.trait_probability(false), 0.0);
    }

    #[test]
    fn test_update_with_sets() {
        let pedigree = pair();
        let mut table = PosteriorTable::new(&pedigree);
        let one: HashSet<String> = HashSet::new();
        let two: HashSet<String> = ["A".to_string()].into_iter().collect();
        let have: HashSet<String> = ["B".to_string()].into_iter().collect();
        table.update_with_sets(&pedigree, &one, &two, &have, 0.1).unwrap();

        assert_eq!(table.get("A").unwrap().gene(GeneCount::Two), 0.1);
        assert_eq!(table.get("B").unwrap().gene(GeneCount::Zero), 0.1);
        assert_eq!(table.get("B").unwrap().trait_probability(true), 0.1);
    }

    #[test]
    fn test_normalize_keeps_proportions() {
        let pedigree = pair();
        let mut table = PosteriorTable::new(&pedigree);
        table.update(&Hypothesis::new(vec![GeneCount::Zero, GeneCount::One], vec![false, true]).unwrap(), 0.3);
        table.update(&Hypothesis::new(vec![GeneCount::Two, GeneCount::One], vec![true, true]).unwrap(), 0.1);
        table.normalize().unwrap();

        let a = table.get("A").unwrap();
        assert!((a.gene[0] - 0.75).abs() < 1e-12);
        assert!((a.gene[2] - 0.25).abs() < 1e-12);
        assert!((a.trait_weights[0] - 0.75).abs() < 1e-12);
        assert_eq!(table.get("B").unwrap().gene[1], 1.0);
        assert!(table.is_normalized());
    }

    #[test]
    fn test_normalize_failures() {
        let pedigree = pair();
        let mut zero = PosteriorTable::new(&pedigree);
        assert!(matches!(zero.normalize(), Err(InferenceError::InvalidState(_))));

        let empty_pedigree = Pedigree::new(Vec::new()).unwrap();
        let mut empty = PosteriorTable::new(&empty_pedigree);
        assert!(matches!(empty.normalize(), Err(InferenceError::InvalidState(_))));

        let mut table = PosteriorTable::new(&pedigree);
        table.update(&Hypothesis::new(vec![GeneCount::Zero; 2], vec![true; 2]).unwrap(), 1.0);
        table.normalize().unwrap();
        assert!(table.normalize().is_err());
    }

    #[test]
    fn test_merge() {
        let pedigree = pair();
        let h = Hypothesis::new(vec![GeneCount::One, GeneCount::Zero], vec![true, true]).unwrap();
        let mut left = PosteriorTable::new(&pedigree);
        let mut right = PosteriorTable::new(&pedigree);
        left.update(&h, 0.2);
        right.update(&h, 0.3);
        left.merge(&right).unwrap();
        assert!((left.get("A").unwrap().gene[1] - 0.5).abs() < 1e-12);

        let other = Pedigree::new(vec![Person::founder("Z", None)]).unwrap();
        assert!(left.merge(&PosteriorTable::new(&other)).is_err());
    }

    proptest! {
        #[test]
        fn prop_normalized_distributions_sum_to_one(
            weights in proptest::collection::vec((0usize..3, any::<bool>(), 1e-6f64..1.0), 1..40)
        ) {
            let pedigree = Pedigree::new(vec![Person::founder("X", None)]).unwrap();
            let mut table = PosteriorTable::new(&pedigree);
            for (gene, present, p) in weights {
                let gene = GeneCount::from_index(gene).unwrap();
                table.update(&Hypothesis::new(vec![gene], vec![present]).unwrap(), p);
            }
            table.normalize().unwrap();
            let x = table.get("X").unwrap();
            prop_assert!((x.gene.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            prop_assert!((x.trait_weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }
}
