// joint.rs - Joint probability of a fully specified hypothesis

use crate::core::error::InferenceError;
use crate::core::hypothesis::{GeneCount, Hypothesis};
use crate::core::model::InheritanceModel;
use crate::data::Pedigree;
use std::collections::HashSet;

/// Probability of `person` carrying the gene count assigned by `hypothesis`
///
/// Founders draw from the prior; everyone else depends only on the counts
/// the hypothesis assigns to their two parents.
pub fn gene_probability(pedigree: &Pedigree, model: &InheritanceModel, hypothesis: &Hypothesis, person: usize) -> f64 {
    let gene = hypothesis.gene(person);
    match pedigree.parents(person) {
        None => model.founder_probability(gene),
        Some((mother, father)) => model.inherited_probability(gene, hypothesis.gene(mother), hypothesis.gene(father)),
    }
}

/// Probability that every person has exactly the genes and trait status
/// assigned by `hypothesis`
pub fn joint_probability(pedigree: &Pedigree, model: &InheritanceModel, hypothesis: &Hypothesis) -> f64 {
    (0..pedigree.len())
        .map(|person| {
            let gene: GeneCount = hypothesis.gene(person);
            gene_probability(pedigree, model, hypothesis, person)
                * model.trait_probability(gene, hypothesis.has_trait(person))
        })
        .product()
}

/// `joint_probability` with the hypothesis given as named groups
pub fn joint_probability_for_sets(
    pedigree: &Pedigree,
    model: &InheritanceModel,
    one_gene: &HashSet<String>,
    two_genes: &HashSet<String>,
    have_trait: &HashSet<String>,
) -> Result<f64, InferenceError> {
    let hypothesis = Hypothesis::from_sets(pedigree, one_gene, two_genes, have_trait)?;
    Ok(joint_probability(pedigree, model, &hypothesis))
}
