// pedigree.rs - People, parent links and observed trait evidence

use crate::core::error::InferenceError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// A single record of the pedigree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub mother: Option<String>,
    pub father: Option<String>,
    /// Observed trait status, `None` when unknown
    pub trait_observed: Option<bool>,
}

impl Person {
    pub fn new(name: &str, mother: Option<&str>, father: Option<&str>, trait_observed: Option<bool>) -> Self {
        Self {
            name: name.to_string(),
            mother: mother.map(str::to_string),
            father: father.map(str::to_string),
            trait_observed,
        }
    }

    /// A person without recorded parents
    pub fn founder(name: &str, trait_observed: Option<bool>) -> Self {
        Self::new(name, None, None, trait_observed)
    }

    pub fn child(name: &str, mother: &str, father: &str, trait_observed: Option<bool>) -> Self {
        Self::new(name, Some(mother), Some(father), trait_observed)
    }

    pub fn is_founder(&self) -> bool {
        self.mother.is_none() && self.father.is_none()
    }
}

/// Summary statistics of a pedigree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedigreeStats {
    pub people: usize,
    pub founders: usize,
    pub observed_with_trait: usize,
    pub observed_without_trait: usize,
    pub unobserved: usize,
    pub generations: usize,
}

/// A validated pedigree: unique names, complete parent pairs, no cycles
///
/// People keep the order they were supplied in; the engine addresses them
/// by that position.
#[derive(Debug, Clone)]
pub struct Pedigree {
    people: Vec<Person>,
    index: HashMap<String, usize>,
    parents: Vec<Option<(usize, usize)>>,
}

impl Pedigree {
    /// Validate the records and build the pedigree
    pub fn new(people: Vec<Person>) -> Result<Self, InferenceError> {
        let mut index = HashMap::with_capacity(people.len());
        for (i, person) in people.iter().enumerate() {
            if person.name.trim().is_empty() {
                return Err(InferenceError::input(format!("Person #{} has an empty name", i + 1)));
            }
            if index.insert(person.name.clone(), i).is_some() {
                return Err(InferenceError::input(format!("Duplicate person '{}'", person.name)));
            }
        }

        let resolve = |child: &str, parent: &str, role: &str| {
            if parent == child {
                return Err(InferenceError::input(format!("'{}' is listed as their own {}", child, role)));
            }
            index.get(parent).copied().ok_or_else(|| {
                InferenceError::input(format!("{} '{}' of '{}' is not in the pedigree", role, parent, child))
            })
        };

        let mut parents = Vec::with_capacity(people.len());
        for person in &people {
            let link = match (&person.mother, &person.father) {
                (None, None) => None,
                (Some(mother), Some(father)) => Some((
                    resolve(&person.name, mother, "mother")?,
                    resolve(&person.name, father, "father")?,
                )),
                _ => {
                    return Err(InferenceError::input(format!(
                        "'{}' must have both parents or neither",
                        person.name
                    )))
                }
            };
            parents.push(link);
        }

        let pedigree = Self { people, index, parents };
        pedigree.check_acyclic()?;
        Ok(pedigree)
    }

    /// Depth-first search over parent links, failing on a back edge
    fn check_acyclic(&self) -> Result<(), InferenceError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.people.len()];
        for root in 0..self.people.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            // (person, whether its parents were already pushed)
            let mut stack = vec![(root, false)];
            while let Some((person, expanded)) = stack.pop() {
                if expanded {
                    marks[person] = Mark::Done;
                    continue;
                }
                match marks[person] {
                    Mark::Done => continue,
                    Mark::InProgress => continue,
                    Mark::Unvisited => {}
                }
                marks[person] = Mark::InProgress;
                stack.push((person, true));
                if let Some((mother, father)) = self.parents[person] {
                    for parent in [mother, father] {
                        match marks[parent] {
                            Mark::InProgress => {
                                return Err(InferenceError::input(format!(
                                    "Cyclic ancestry involving '{}' and '{}'",
                                    self.people[person].name, self.people[parent].name
                                )))
                            }
                            Mark::Unvisited => stack.push((parent, false)),
                            Mark::Done => {}
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn person(&self, index: usize) -> &Person {
        &self.people[index]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Indices of (mother, father), or `None` for a founder
    pub fn parents(&self, index: usize) -> Option<(usize, usize)> {
        self.parents[index]
    }

    pub fn evidence(&self, index: usize) -> Option<bool> {
        self.people[index].trait_observed
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.people.iter().map(|p| p.name.as_str())
    }

    pub fn founders(&self) -> Vec<usize> {
        (0..self.people.len()).filter(|i| self.people[*i].is_founder()).collect()
    }

    pub fn unobserved_count(&self) -> usize {
        self.people.iter().filter(|p| p.trait_observed.is_none()).count()
    }

    /// Generation of every person: founders are 1, children one more than
    /// their deepest parent
    pub fn generations(&self) -> Vec<usize> {
        fn depth(pedigree: &Pedigree, person: usize, memo: &mut [usize]) -> usize {
            if memo[person] > 0 {
                return memo[person];
            }
            let d = match pedigree.parents[person] {
                None => 1,
                Some((mother, father)) => 1 + depth(pedigree, mother, memo).max(depth(pedigree, father, memo)),
            };
            memo[person] = d;
            d
        }

        let mut memo = vec![0; self.people.len()];
        (0..self.people.len()).map(|i| depth(self, i, &mut memo)).collect()
    }

    pub fn stats(&self) -> PedigreeStats {
        let observed_with_trait = self.people.iter().filter(|p| p.trait_observed == Some(true)).count();
        let observed_without_trait = self.people.iter().filter(|p| p.trait_observed == Some(false)).count();
        PedigreeStats {
            people: self.people.len(),
            founders: self.founders().len(),
            observed_with_trait,
            observed_without_trait,
            unobserved: self.unobserved_count(),
            generations: self.generations().into_iter().max().unwrap_or(0),
        }
    }

    /// SHA256 over a canonical rendering of the records, in load order
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for person in &self.people {
            let trait_str = match person.trait_observed {
                Some(true) => "1",
                Some(false) => "0",
                None => "",
            };
            hasher.update(
                format!(
                    "{}\t{}\t{}\t{}\n",
                    person.name,
                    person.mother.as_deref().unwrap_or(""),
                    person.father.as_deref().unwrap_or(""),
                    trait_str
                )
                .as_bytes(),
            );
        }
        format!("{:x}", hasher.finalize())
    }

    /// Print summary statistics
    pub fn print_statistics(&self, phase: &str) {
        let stats = self.stats();
        eprintln!("\n📊 === PEDIGREE STATISTICS ({}) ===", phase);
        eprintln!("  • People: {}", stats.people);
        eprintln!("  • Founders: {}", stats.founders);
        eprintln!("  • Generations: {}", stats.generations);
        eprintln!(
            "  • Evidence: {} with trait, {} without trait, {} unknown",
            stats.observed_with_trait, stats.observed_without_trait, stats.unobserved
        );
    }
}
