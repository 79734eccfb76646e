// model.rs - Inheritance and trait-expression model parameters

use crate::core::error::InferenceError;
use crate::core::hypothesis::GeneCount;
use serde::{Deserialize, Serialize};

/// Tolerance used when checking that the gene prior sums to one
const PRIOR_SUM_TOLERANCE: f64 = 1e-9;

/// Probability tables driving the joint probability calculation
///
/// The model is an immutable value handed to the engine; nothing in the
/// crate reads these numbers from global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InheritanceModel {
    /// Unconditional probability of 0, 1 and 2 copies for a founder
    pub gene_prior: [f64; 3],
    /// Probability of showing the trait given 0, 1 and 2 copies
    pub trait_given_gene: [f64; 3],
    /// Probability that a transmitted copy flips on its way to the child
    pub mutation_rate: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl Default for InheritanceModel {
    fn default() -> Self {
        Self {
            gene_prior: [0.96, 0.03, 0.01],
            trait_given_gene: [0.01, 0.56, 0.65],
            mutation_rate: 0.01,
            description: Some("Default heredity model".to_string()),
        }
    }
}

impl InheritanceModel {
    /// Create a custom model
    pub fn custom(gene_prior: [f64; 3], trait_given_gene: [f64; 3], mutation_rate: f64) -> Self {
        Self {
            gene_prior,
            trait_given_gene,
            mutation_rate,
            description: Some("Custom model parameters".to_string()),
        }
    }

    /// Default tables with a different mutation rate
    pub fn with_mutation_rate(mutation_rate: f64) -> Self {
        Self {
            mutation_rate,
            description: Some(format!("Default heredity model (mutation rate {})", mutation_rate)),
            ..Self::default()
        }
    }

    /// Check every parameter is a probability and the prior is a distribution
    pub fn validate(&self) -> Result<(), InferenceError> {
        let named = self
            .gene_prior
            .iter()
            .enumerate()
            .map(|(i, p)| (format!("gene_prior[{}]", i), *p))
            .chain(
                self.trait_given_gene
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (format!("trait_given_gene[{}]", i), *p)),
            )
            .chain(std::iter::once(("mutation_rate".to_string(), self.mutation_rate)));

        for (name, p) in named {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(InferenceError::input(format!(
                    "{} must be a probability between 0.0 and 1.0, got {}",
                    name, p
                )));
            }
        }

        let prior_sum: f64 = self.gene_prior.iter().sum();
        if (prior_sum - 1.0).abs() > PRIOR_SUM_TOLERANCE {
            return Err(InferenceError::input(format!(
                "gene_prior must sum to 1.0, got {}",
                prior_sum
            )));
        }

        Ok(())
    }

    /// Prior probability of `gene` copies for a person without parents
    pub fn founder_probability(&self, gene: GeneCount) -> f64 {
        self.gene_prior[gene.index()]
    }

    /// Probability that a parent with `gene` copies passes the gene on
    pub fn transmission_probability(&self, gene: GeneCount) -> f64 {
        match gene {
            GeneCount::Zero => self.mutation_rate,
            GeneCount::One => 0.5,
            GeneCount::Two => 1.0 - self.mutation_rate,
        }
    }

    /// Probability of a child having `child` copies given both parents
    pub fn inherited_probability(&self, child: GeneCount, mother: GeneCount, father: GeneCount) -> f64 {
        let from_mother = self.transmission_probability(mother);
        let from_father = self.transmission_probability(father);

        match child {
            GeneCount::Zero => (1.0 - from_mother) * (1.0 - from_father),
            GeneCount::One => from_mother * (1.0 - from_father) + (1.0 - from_mother) * from_father,
            GeneCount::Two => from_mother * from_father,
        }
    }

    /// Probability of the trait being `present` (or absent) given `gene` copies
    pub fn trait_probability(&self, gene: GeneCount, present: bool) -> f64 {
        let p_present = self.trait_given_gene[gene.index()];
        if present {
            p_present
        } else {
            1.0 - p_present
        }
    }

    /// Human-readable summary used in logs and report headers
    pub fn summary(&self) -> String {
        format!(
            "prior(0,1,2)=({}, {}, {}) trait|gene(0,1,2)=({}, {}, {}) mutation={}",
            self.gene_prior[0],
            self.gene_prior[1],
            self.gene_prior[2],
            self.trait_given_gene[0],
            self.trait_given_gene[1],
            self.trait_given_gene[2],
            self.mutation_rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let model = InheritanceModel::default();
        assert!(model.validate().is_ok());
        assert_eq!(model.founder_probability(GeneCount::Zero), 0.96);
        assert_eq!(model.founder_probability(GeneCount::One), 0.03);
        assert_eq!(model.founder_probability(GeneCount::Two), 0.01);
        assert_eq!(model.trait_probability(GeneCount::Two, true), 0.65);
        assert!((model.trait_probability(GeneCount::Two, false) - 0.35).abs() < 1e-12);
        assert!((model.trait_probability(GeneCount::One, false) - 0.44).abs() < 1e-12);
        assert!((model.trait_probability(GeneCount::Zero, false) - 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_transmission_with_mutation() {
        let model = InheritanceModel::default();
        assert_eq!(model.transmission_probability(GeneCount::Zero), 0.01);
        assert_eq!(model.transmission_probability(GeneCount::One), 0.5);
        assert_eq!(model.transmission_probability(GeneCount::Two), 0.99);
    }

    #[test]
    fn test_inherited_probabilities_form_distribution() {
        let model = InheritanceModel::default();
        for mother in GeneCount::ALL {
            for father in GeneCount::ALL {
                let total: f64 = GeneCount::ALL
                    .iter()
                    .map(|child| model.inherited_probability(*child, mother, father))
                    .sum();
                assert!((total - 1.0).abs() < 1e-12);
            }
        }

        // Two copies from each parent: both must pass, 0.99 * 0.99
        let p = model.inherited_probability(GeneCount::Two, GeneCount::Two, GeneCount::Two);
        assert!((p - 0.9801).abs() < 1e-12);
        // No copies anywhere: both must mutate to give one copy each
        let p = model.inherited_probability(GeneCount::Two, GeneCount::Zero, GeneCount::Zero);
        assert!((p - 0.0001).abs() < 1e-12);
        assert!(p > 0.0);
    }

    #[test]
    fn test_validation_rejects_bad_parameters() {
        let bad_prior = InheritanceModel::custom([0.5, 0.3, 0.1], [0.01, 0.56, 0.65], 0.01);
        assert!(matches!(bad_prior.validate(), Err(InferenceError::InputValidation(_))));

        let bad_mutation = InheritanceModel::with_mutation_rate(1.5);
        assert!(bad_mutation.validate().is_err());

        let nan_trait = InheritanceModel::custom([0.96, 0.03, 0.01], [f64::NAN, 0.56, 0.65], 0.01);
        assert!(nan_trait.validate().is_err());

        assert!(InheritanceModel::with_mutation_rate(0.05).validate().is_ok());
    }

    #[test]
    fn test_model_from_toml() {
        let model: InheritanceModel = toml::from_str(
            "gene_prior = [0.9, 0.08, 0.02]\ntrait_given_gene = [0.0, 0.5, 0.9]\nmutation_rate = 0.02\n",
        )
        .unwrap();
        assert_eq!(model.gene_prior, [0.9, 0.08, 0.02]);
        assert_eq!(model.mutation_rate, 0.02);
        assert!(model.description.is_none());
        assert!(model.validate().is_ok());
    }
}
