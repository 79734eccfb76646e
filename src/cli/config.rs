// config.rs - Configuration file support

use crate::core::InheritanceModel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub pedigree: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,
    pub precision: Option<usize>,

    // Performance
    pub threads: Option<usize>,
    pub shards: Option<usize>,
    pub sequential: Option<bool>,
    pub max_people: Option<usize>,

    // Report filtering
    pub include_people: Option<String>,
    pub exclude_people: Option<String>,

    // Flags
    pub no_header: Option<bool>,
    pub no_progress: Option<bool>,
    pub dry_run: Option<bool>,

    // Model parameters
    pub model: Option<InheritanceModel>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        eprintln!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        eprintln!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# heredity.toml - Configuration file for heredity
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Pedigree file with columns name, mother, father, trait (.csv or .tsv)
pedigree = "data/family0.csv"

# Report file (omit to print to stdout)
output = "posteriors.tsv"

# Report format: text, tsv, csv, json
format = "tsv"

# Decimal places in text, tsv and csv reports
precision = 4

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
threads = 8

# Number of gene-space shards (omit for 4 per thread)
# shards = 32

# Enumerate on a single thread
sequential = false

# Refuse pedigrees with more people than this
max_people = 20

# =============================================================================
# REPORT FILTERING
# =============================================================================

# Report only people matching regex pattern
# include_people = "^(Harry|Ron)$"

# Omit people matching regex pattern
# exclude_people = "^Unknown"

# =============================================================================
# FLAGS
# =============================================================================

# Omit provenance comments from the report
no_header = false

# Hide the progress bar
no_progress = false

# Validate inputs without computation (dry run)
dry_run = false

# =============================================================================
# MODEL
# =============================================================================

[model]
# Probability of 0, 1 and 2 copies for people without parents (must sum to 1)
gene_prior = [0.96, 0.03, 0.01]

# Probability of showing the trait given 0, 1 and 2 copies
trait_given_gene = [0.01, 0.56, 0.65]

# Probability that a transmitted copy mutates
mutation_rate = 0.01
"#
        .to_string()
    }
}
