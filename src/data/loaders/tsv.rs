// tsv.rs - Tab-separated pedigree loader

use crate::data::Pedigree;
use std::fs::File;
use std::path::Path;

impl Pedigree {
    /// Load a tab-separated pedigree file
    pub fn from_tsv(file_path: &Path) -> Result<Self, String> {
        let file = File::open(file_path)
            .map_err(|e| format!("Failed to open pedigree file '{}': {}", file_path.display(), e))?;
        Self::from_delimited_reader(file, b'\t')
    }
}
