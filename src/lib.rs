// lib.rs - heredity library root

//! # heredity - Exact Bayesian inference of gene copies and traits over a pedigree
//!
//! Given a family tree where some people have an observed trait, this library
//! computes for every person the posterior probability of carrying 0, 1 or 2
//! copies of a gene and of exhibiting the trait. Inference is exact: every
//! hypothesis consistent with the evidence is enumerated and weighted by its
//! joint probability under an inheritance model with mutation.
//!
//! ## Features
//!
//! - **Exact inference**: Exhaustive enumeration, no sampling
//! - **Parallel**: Gene space split into shards on the rayon pool, merged deterministically
//! - **Configurable model**: Gene prior, trait penetrance and mutation rate
//! - **Multiple formats**: Text, TSV, CSV and JSON reports
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use heredity::prelude::*;
//!
//! let pedigree = Pedigree::from_file(std::path::Path::new("data/family0.csv"))?;
//! let engine = InferenceEngine::new(InheritanceModel::default());
//! let table = engine.infer(&pedigree)?;
//!
//! if let Some(harry) = table.get("Harry") {
//!     println!("P(Harry has trait) = {:.4}", harry.trait_probability(true));
//! }
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{joint_probability, GeneCount, Hypothesis, HypothesisEnumerator};
    pub use crate::core::{InferenceEngine, InferenceError, InheritanceModel, PersonPosterior, PosteriorTable};
    pub use crate::data::{Pedigree, Person};
    pub use crate::output::{write_report, ReportFormat};
}

// Re-export main types at the root level for convenience
pub use crate::core::{infer, InferenceEngine, InferenceError, InheritanceModel, PosteriorTable};
pub use cli::{Args, ValidationResult};
pub use data::{Pedigree, Person};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!("heredity v{} - Exact Bayesian inference over pedigrees", VERSION)
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::path::PathBuf;

    fn family(name: &str) -> Pedigree {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name);
        Pedigree::from_file(&path).unwrap()
    }

    fn assert_gene(table: &PosteriorTable, name: &str, expected: [f64; 3]) {
        let posterior = table.get(name).unwrap();
        for (i, gene) in GeneCount::ALL.iter().enumerate() {
            assert!(
                (posterior.gene(*gene) - expected[i]).abs() < 1e-4,
                "{} gene {}: {} vs {}",
                name,
                gene,
                posterior.gene(*gene),
                expected[i]
            );
        }
    }

    #[test]
    fn test_family0() {
        let table = InferenceEngine::default().infer(&family("family0.csv")).unwrap();
        assert_gene(&table, "Harry", [0.5351, 0.4557, 0.0092]);
        assert_gene(&table, "James", [0.2918, 0.5106, 0.1976]);
        assert_gene(&table, "Lily", [0.9827, 0.0136, 0.0036]);
        assert!((table.get("Harry").unwrap().trait_probability(true) - 0.2665).abs() < 1e-4);
        assert_eq!(table.get("James").unwrap().trait_probability(true), 1.0);
        assert_eq!(table.get("Lily").unwrap().trait_probability(true), 0.0);
    }

    #[test]
    fn test_family1() {
        let table = InferenceEngine::default()
            .with_shards(8)
            .infer(&family("family1.csv"))
            .unwrap();
        assert_gene(&table, "Arthur", [0.8636, 0.1035, 0.0329]);
        assert_gene(&table, "Molly", [0.8636, 0.1035, 0.0329]);
        assert_gene(&table, "Charlie", [0.8651, 0.1331, 0.0018]);
        assert_gene(&table, "Fred", [0.3449, 0.6486, 0.0065]);
        assert_gene(&table, "Ginny", [0.8168, 0.1805, 0.0027]);
        assert_gene(&table, "Ron", [0.8168, 0.1805, 0.0027]);
        assert!((table.get("Ron").unwrap().trait_probability(true) - 0.1110).abs() < 1e-4);
    }

    #[test]
    fn test_family2() {
        let table = InferenceEngine::default()
            .with_shards(4)
            .infer(&family("family2.csv"))
            .unwrap();
        assert_gene(&table, "Arthur", [0.9509, 0.0344, 0.0147]);
        assert_gene(&table, "Hermione", [0.8189, 0.1203, 0.0608]);
        assert_gene(&table, "Molly", [0.8852, 0.0744, 0.0404]);
        assert_gene(&table, "Ron", [0.7808, 0.2149, 0.0043]);
        assert_gene(&table, "Rose", [0.2890, 0.7022, 0.0088]);
        assert!((table.get("Molly").unwrap().trait_probability(true) - 0.0768).abs() < 1e-4);
    }

    #[test]
    fn test_info() {
        assert!(super::get_info().starts_with("heredity v"));
    }
}
