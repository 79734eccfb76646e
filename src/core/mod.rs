// mod.rs - Core inference module

pub mod engine;
pub mod error;
pub mod hypothesis;
pub mod joint;
pub mod model;
pub mod posterior;

// Re-export main types for convenience
pub use engine::{infer, InferenceEngine, MAX_POPULATION};
pub use error::InferenceError;
pub use hypothesis::{gene_assignment_count, hypothesis_count, GeneCount, Hypothesis, HypothesisEnumerator};
pub use joint::{gene_probability, joint_probability, joint_probability_for_sets};
pub use model::InheritanceModel;
pub use posterior::{PersonPosterior, PosteriorTable};
