// mod.rs - Data structures module

pub mod loaders;
pub mod pedigree;

// Re-export main types for convenience
pub use loaders::parse_trait;
pub use pedigree::{Pedigree, PedigreeStats, Person};
