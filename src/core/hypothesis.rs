// hypothesis.rs - Gene/trait assignments and their lazy enumeration

use crate::core::error::InferenceError;
use crate::data::Pedigree;
use std::collections::{BTreeSet, HashSet};
use std::fmt::{Display, Formatter};

/// Number of copies of the gene a person carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeneCount {
    Zero,
    One,
    Two,
}

impl GeneCount {
    pub const ALL: [GeneCount; 3] = [GeneCount::Zero, GeneCount::One, GeneCount::Two];

    pub fn index(self) -> usize {
        match self {
            GeneCount::Zero => 0,
            GeneCount::One => 1,
            GeneCount::Two => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(GeneCount::Zero),
            1 => Some(GeneCount::One),
            2 => Some(GeneCount::Two),
            _ => None,
        }
    }

    /// Next value in base-3 order, `None` when wrapping past `Two`
    fn successor(self) -> Option<Self> {
        match self {
            GeneCount::Zero => Some(GeneCount::One),
            GeneCount::One => Some(GeneCount::Two),
            GeneCount::Two => None,
        }
    }
}

impl Display for GeneCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// One complete assignment of gene count and trait presence to every person
///
/// Both vectors are indexed by the person's position in the `Pedigree`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    genes: Vec<GeneCount>,
    traits: Vec<bool>,
}

impl Hypothesis {
    pub fn new(genes: Vec<GeneCount>, traits: Vec<bool>) -> Result<Self, InferenceError> {
        if genes.len() != traits.len() {
            return Err(InferenceError::input(format!(
                "Hypothesis has {} gene assignments but {} trait assignments",
                genes.len(),
                traits.len()
            )));
        }
        Ok(Self { genes, traits })
    }

    /// Build a hypothesis from the three named groups
    ///
    /// Everyone outside `one_gene` and `two_genes` carries zero copies, and
    /// everyone outside `have_trait` lacks the trait.
    pub fn from_sets(
        pedigree: &Pedigree,
        one_gene: &HashSet<String>,
        two_genes: &HashSet<String>,
        have_trait: &HashSet<String>,
    ) -> Result<Self, InferenceError> {
        let lookup = |name: &String, group: &str| {
            pedigree.index_of(name).ok_or_else(|| {
                InferenceError::input(format!("Unknown person '{}' in {} set", name, group))
            })
        };

        let mut genes = vec![GeneCount::Zero; pedigree.len()];
        let mut traits = vec![false; pedigree.len()];

        for name in one_gene {
            genes[lookup(name, "one_gene")?] = GeneCount::One;
        }
        for name in two_genes {
            let idx = lookup(name, "two_genes")?;
            if genes[idx] == GeneCount::One {
                return Err(InferenceError::input(format!(
                    "Person '{}' cannot carry both one and two copies",
                    name
                )));
            }
            genes[idx] = GeneCount::Two;
        }
        for name in have_trait {
            traits[lookup(name, "have_trait")?] = true;
        }

        Ok(Self { genes, traits })
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn gene(&self, person: usize) -> GeneCount {
        self.genes[person]
    }

    pub fn has_trait(&self, person: usize) -> bool {
        self.traits[person]
    }

    pub fn genes(&self) -> &[GeneCount] {
        &self.genes
    }

    pub fn traits(&self) -> &[bool] {
        &self.traits
    }

    /// Names of the people carrying exactly `gene` copies
    pub fn group<'a>(&self, pedigree: &'a Pedigree, gene: GeneCount) -> BTreeSet<&'a str> {
        self.genes
            .iter()
            .enumerate()
            .filter(|(_, g)| **g == gene)
            .map(|(i, _)| pedigree.person(i).name.as_str())
            .collect()
    }

    /// Names of the people showing the trait
    pub fn have_trait<'a>(&self, pedigree: &'a Pedigree) -> BTreeSet<&'a str> {
        self.traits
            .iter()
            .enumerate()
            .filter(|(_, t)| **t)
            .map(|(i, _)| pedigree.person(i).name.as_str())
            .collect()
    }

    /// True when no observed trait disagrees with this assignment
    pub fn consistent_with(&self, pedigree: &Pedigree) -> bool {
        self.traits
            .iter()
            .enumerate()
            .all(|(i, t)| pedigree.evidence(i).map_or(true, |observed| observed == *t))
    }
}

/// Number of gene assignments for a population of `people`, i.e. 3^N
pub fn gene_assignment_count(people: usize) -> Option<u128> {
    3u128.checked_pow(u32::try_from(people).ok()?)
}

/// Number of evidence-consistent hypotheses, 3^N * 2^(unobserved people)
pub fn hypothesis_count(pedigree: &Pedigree) -> Option<u128> {
    let unobserved = pedigree.unobserved_count();
    let trait_assignments = 2u128.checked_pow(u32::try_from(unobserved).ok()?)?;
    gene_assignment_count(pedigree.len())?.checked_mul(trait_assignments)
}

/// Split `[0, total)` into at most `shards` contiguous, non-empty ranges
pub fn shard_ranges(total: u128, shards: usize) -> Vec<(u128, u128)> {
    if total == 0 || shards == 0 {
        return Vec::new();
    }
    let shards = (shards as u128).min(total);
    let base = total / shards;
    let extra = total % shards;

    let mut ranges = Vec::with_capacity(shards as usize);
    let mut start = 0u128;
    for i in 0..shards {
        let len = base + u128::from(i < extra);
        ranges.push((start, start + len));
        start += len;
    }
    ranges
}

/// Lazy iterator over every hypothesis of a pedigree
///
/// Genes advance as a base-3 odometer over all people; for each gene
/// assignment the traits of people without evidence advance as a binary
/// odometer. Observed people are pinned to their evidence, so triples that
/// contradict the evidence are never produced.
pub struct HypothesisEnumerator {
    genes: Vec<GeneCount>,
    traits: Vec<bool>,
    free: Vec<usize>,
    remaining_genes: u128,
}

impl HypothesisEnumerator {
    /// All evidence-consistent hypotheses
    pub fn new(pedigree: &Pedigree) -> Result<Self, InferenceError> {
        let total = Self::total_genes(pedigree)?;
        Self::build(pedigree, 0, total, true)
    }

    /// Every hypothesis, ignoring the evidence
    pub fn unfiltered(pedigree: &Pedigree) -> Result<Self, InferenceError> {
        let total = Self::total_genes(pedigree)?;
        Self::build(pedigree, 0, total, false)
    }

    /// Evidence-consistent hypotheses whose gene rank lies in `[start, end)`
    pub fn with_gene_range(pedigree: &Pedigree, start: u128, end: u128) -> Result<Self, InferenceError> {
        let total = Self::total_genes(pedigree)?;
        if start > end || end > total {
            return Err(InferenceError::input(format!(
                "Gene range [{}, {}) is outside [0, {})",
                start, end, total
            )));
        }
        Self::build(pedigree, start, end, true)
    }

    fn total_genes(pedigree: &Pedigree) -> Result<u128, InferenceError> {
        gene_assignment_count(pedigree.len()).ok_or_else(|| {
            InferenceError::input(format!(
                "Pedigree of {} people is too large to enumerate",
                pedigree.len()
            ))
        })
    }

    fn build(pedigree: &Pedigree, start: u128, end: u128, use_evidence: bool) -> Result<Self, InferenceError> {
        let n = pedigree.len();

        // Decode the starting rank into base-3 digits, person 0 least significant
        let mut genes = Vec::with_capacity(n);
        let mut rank = start;
        for _ in 0..n {
            let digit = (rank % 3) as usize;
            genes.push(GeneCount::from_index(digit).unwrap_or(GeneCount::Zero));
            rank /= 3;
        }

        let mut traits = vec![false; n];
        let mut free = Vec::with_capacity(n);
        for (i, slot) in traits.iter_mut().enumerate() {
            match pedigree.evidence(i) {
                Some(observed) if use_evidence => *slot = observed,
                _ => free.push(i),
            }
        }

        Ok(Self {
            genes,
            traits,
            free,
            remaining_genes: end - start,
        })
    }

    /// Advance the trait odometer; false once it wraps back to the start
    fn advance_traits(&mut self) -> bool {
        for &i in &self.free {
            if self.traits[i] {
                self.traits[i] = false;
            } else {
                self.traits[i] = true;
                return true;
            }
        }
        false
    }

    fn advance_genes(&mut self) {
        for gene in self.genes.iter_mut() {
            match gene.successor() {
                Some(next) => {
                    *gene = next;
                    return;
                }
                None => *gene = GeneCount::Zero,
            }
        }
    }
}

impl Iterator for HypothesisEnumerator {
    type Item = Hypothesis;

    fn next(&mut self) -> Option<Hypothesis> {
        if self.remaining_genes == 0 {
            return None;
        }

        let current = Hypothesis {
            genes: self.genes.clone(),
            traits: self.traits.clone(),
        };

        if !self.advance_traits() {
            self.remaining_genes -= 1;
            if self.remaining_genes > 0 {
                self.advance_genes();
            }
        }

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Person;

    fn trio(child_trait: Option<bool>) -> Pedigree {
        Pedigree::new(vec![
            Person::founder("Lily", Some(false)),
            Person::founder("James", Some(true)),
            Person::child("Harry", "Lily", "James", child_trait),
        ])
        .unwrap()
    }

    fn unobserved(n: usize) -> Pedigree {
        Pedigree::new((0..n).map(|i| Person::founder(&format!("P{}", i), None)).collect()).unwrap()
    }

    #[test]
    fn test_gene_count_roundtrip() {
        for gene in GeneCount::ALL {
            assert_eq!(GeneCount::from_index(gene.index()), Some(gene));
        }
        assert_eq!(GeneCount::from_index(3), None);
        assert_eq!(GeneCount::Two.to_string(), "2");
    }

    #[test]
    fn test_counts() {
        assert_eq!(gene_assignment_count(0), Some(1));
        assert_eq!(gene_assignment_count(4), Some(81));
        assert_eq!(gene_assignment_count(200), None);
        assert_eq!(hypothesis_count(&trio(None)), Some(27 * 2));
        assert_eq!(hypothesis_count(&unobserved(3)), Some(27 * 8));
    }

    #[test]
    fn test_enumeration_is_exhaustive_and_unique() {
        let pedigree = unobserved(3);
        let all: Vec<Hypothesis> = HypothesisEnumerator::new(&pedigree).unwrap().collect();
        assert_eq!(all.len(), 27 * 8);

        let unique: HashSet<(Vec<GeneCount>, Vec<bool>)> = all
            .iter()
            .map(|h| (h.genes().to_vec(), h.traits().to_vec()))
            .collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_enumeration_respects_evidence() {
        let pedigree = trio(None);
        let all: Vec<Hypothesis> = HypothesisEnumerator::new(&pedigree).unwrap().collect();
        assert_eq!(all.len(), 54);
        for hypothesis in &all {
            assert!(hypothesis.consistent_with(&pedigree));
            assert!(!hypothesis.has_trait(0));
            assert!(hypothesis.has_trait(1));
        }

        let unfiltered: Vec<Hypothesis> = HypothesisEnumerator::unfiltered(&pedigree).unwrap().collect();
        assert_eq!(unfiltered.len(), 27 * 8);
        let consistent = unfiltered.iter().filter(|h| h.consistent_with(&pedigree)).count();
        assert_eq!(consistent, 54);
    }

    #[test]
    fn test_gene_groups_partition_population() {
        let pedigree = unobserved(2);
        for hypothesis in HypothesisEnumerator::new(&pedigree).unwrap() {
            let zero = hypothesis.group(&pedigree, GeneCount::Zero);
            let one = hypothesis.group(&pedigree, GeneCount::One);
            let two = hypothesis.group(&pedigree, GeneCount::Two);
            assert_eq!(zero.len() + one.len() + two.len(), 2);
            assert!(one.is_disjoint(&two));
            assert!(zero.is_disjoint(&one));
        }
    }

    #[test]
    fn test_shards_cover_the_space() {
        let pedigree = unobserved(3);
        let full: Vec<Hypothesis> = HypothesisEnumerator::new(&pedigree).unwrap().collect();

        let ranges = shard_ranges(27, 4);
        assert_eq!(ranges, vec![(0, 7), (7, 14), (14, 21), (21, 27)]);

        let sharded: Vec<Hypothesis> = ranges
            .iter()
            .flat_map(|(start, end)| HypothesisEnumerator::with_gene_range(&pedigree, *start, *end).unwrap())
            .collect();
        assert_eq!(sharded, full);
    }

    #[test]
    fn test_shard_ranges_edge_cases() {
        assert!(shard_ranges(0, 4).is_empty());
        assert!(shard_ranges(10, 0).is_empty());
        assert_eq!(shard_ranges(2, 8), vec![(0, 1), (1, 2)]);
        assert!(HypothesisEnumerator::with_gene_range(&unobserved(2), 3, 10).is_err());
        assert_eq!(HypothesisEnumerator::with_gene_range(&unobserved(2), 4, 4).unwrap().count(), 0);
    }

    #[test]
    fn test_from_sets() {
        let pedigree = trio(None);
        let one: HashSet<String> = ["Harry".to_string()].into_iter().collect();
        let two: HashSet<String> = ["James".to_string()].into_iter().collect();
        let have: HashSet<String> = ["James".to_string()].into_iter().collect();

        let hypothesis = Hypothesis::from_sets(&pedigree, &one, &two, &have).unwrap();
        assert_eq!(hypothesis.genes(), &[GeneCount::Zero, GeneCount::Two, GeneCount::One]);
        assert_eq!(hypothesis.traits(), &[false, true, false]);
        assert_eq!(hypothesis.have_trait(&pedigree), ["James"].into_iter().collect());

        let overlap: HashSet<String> = ["Harry".to_string()].into_iter().collect();
        assert!(Hypothesis::from_sets(&pedigree, &one, &overlap, &have).is_err());

        let unknown: HashSet<String> = ["Ron".to_string()].into_iter().collect();
        assert!(matches!(
            Hypothesis::from_sets(&pedigree, &unknown, &HashSet::new(), &HashSet::new()),
            Err(InferenceError::InputValidation(_))
        ));
    }
}
