// engine.rs - Exact inference by exhaustive enumeration

use crate::core::error::InferenceError;
use crate::core::hypothesis::{gene_assignment_count, hypothesis_count, shard_ranges, HypothesisEnumerator};
use crate::core::joint::joint_probability;
use crate::core::model::InheritanceModel;
use crate::core::posterior::PosteriorTable;
use crate::data::Pedigree;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

/// Largest population the engine will enumerate
pub const MAX_POPULATION: usize = 40;

/// Hypotheses processed between progress bar updates
const PROGRESS_BATCH: u64 = 4096;

/// Exact inference engine: enumerate, weigh, accumulate, normalize
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    model: InheritanceModel,
    shards: Option<usize>,
    show_progress: bool,
    verbose: bool,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new(InheritanceModel::default())
    }
}

impl InferenceEngine {
    /// Sequential, silent engine for `model`
    pub fn new(model: InheritanceModel) -> Self {
        Self {
            model,
            shards: None,
            show_progress: false,
            verbose: false,
        }
    }

    /// Split the gene space into `shards` ranges processed on the rayon pool
    pub fn with_shards(mut self, shards: usize) -> Self {
        self.shards = if shards > 1 { Some(shards) } else { None };
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn model(&self) -> &InheritanceModel {
        &self.model
    }

    pub fn shards(&self) -> usize {
        self.shards.unwrap_or(1)
    }

    /// Reject inputs the engine cannot enumerate; returns the hypothesis count
    pub fn validate(&self, pedigree: &Pedigree) -> Result<u128, InferenceError> {
        self.model.validate()?;
        if pedigree.is_empty() {
            return Err(InferenceError::input("Pedigree is empty"));
        }
        if pedigree.len() > MAX_POPULATION {
            return Err(InferenceError::input(format!(
                "Pedigree has {} people; exact enumeration supports at most {}",
                pedigree.len(),
                MAX_POPULATION
            )));
        }
        hypothesis_count(pedigree).ok_or_else(|| InferenceError::input("Hypothesis space is too large to enumerate"))
    }

    /// Sum joint probabilities of all evidence-consistent hypotheses,
    /// without normalizing
    pub fn accumulate(&self, pedigree: &Pedigree) -> Result<PosteriorTable, InferenceError> {
        let total_hypotheses = self.validate(pedigree)?;
        let total_genes = gene_assignment_count(pedigree.len())
            .ok_or_else(|| InferenceError::input("Hypothesis space is too large to enumerate"))?;

        if self.verbose {
            eprintln!("🧬 Model: {}", self.model.summary());
            eprintln!(
                "🔍 Enumerating {} hypotheses ({} gene assignments × {} trait assignments)",
                total_hypotheses,
                total_genes,
                total_hypotheses / total_genes
            );
        }

        let pb = self.progress_bar(total_hypotheses);
        let start = Instant::now();

        let table = match self.shards {
            None => accumulate_range(pedigree, &self.model, 0, total_genes, &pb)?,
            Some(shards) => {
                let ranges = shard_ranges(total_genes, shards);
                if self.verbose {
                    eprintln!(
                        "🧵 Sharding gene space into {} ranges on {} threads",
                        ranges.len(),
                        rayon::current_num_threads()
                    );
                }

                let partials: Vec<PosteriorTable> = ranges
                    .into_par_iter()
                    .map(|(first, last)| accumulate_range(pedigree, &self.model, first, last, &pb))
                    .collect::<Result<Vec<_>, _>>()?;

                // Merge in shard order so results do not depend on scheduling
                let mut merged = PosteriorTable::new(pedigree);
                for partial in &partials {
                    merged.merge(partial)?;
                }
                merged
            }
        };

        pb.finish_and_clear();
        if self.verbose {
            eprintln!("✅ Enumeration completed in {:.2}s", start.elapsed().as_secs_f64());
        }
        Ok(table)
    }

    /// Posterior gene and trait distributions for every person
    pub fn infer(&self, pedigree: &Pedigree) -> Result<PosteriorTable, InferenceError> {
        let mut table = self.accumulate(pedigree)?;
        table.normalize()?;
        Ok(table)
    }

    fn progress_bar(&self, total: u128) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

/// Accumulate every hypothesis whose gene rank lies in `[first, last)`
fn accumulate_range(
    pedigree: &Pedigree,
    model: &InheritanceModel,
    first: u128,
    last: u128,
    pb: &ProgressBar,
) -> Result<PosteriorTable, InferenceError> {
    #[cfg(feature = "debug-stats")]
    let started = Instant::now();

    let mut table = PosteriorTable::new(pedigree);
    let mut pending = 0u64;
    for hypothesis in HypothesisEnumerator::with_gene_range(pedigree, first, last)? {
        let p = joint_probability(pedigree, model, &hypothesis);
        table.update(&hypothesis, p);

        pending += 1;
        if pending == PROGRESS_BATCH {
            pb.inc(pending);
            pending = 0;
        }
    }
    pb.inc(pending);

    #[cfg(feature = "debug-stats")]
    eprintln!(
        "   shard [{}, {}) done in {:.3}s",
        first,
        last,
        started.elapsed().as_secs_f64()
    );

    Ok(table)
}

/// Run the default model sequentially
pub fn infer(pedigree: &Pedigree) -> Result<PosteriorTable, InferenceError> {
    InferenceEngine::default().infer(pedigree)
}
