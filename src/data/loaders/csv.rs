// csv.rs - Delimited pedigree loader (name, mother, father, trait)

use crate::data::loaders::parse_trait;
use crate::data::{Pedigree, Person};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 4] = ["name", "mother", "father", "trait"];

impl Pedigree {
    /// Load a comma-separated pedigree file
    pub fn from_csv(file_path: &Path) -> Result<Self, String> {
        let file = File::open(file_path)
            .map_err(|e| format!("Failed to open pedigree file '{}': {}", file_path.display(), e))?;
        Self::from_delimited_reader(file, b',')
    }

    /// Parse pedigree records from any reader
    ///
    /// Columns may appear in any order; header names are matched
    /// case-insensitively. Lines starting with `#` are ignored.
    pub fn from_delimited_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, String> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| format!("Failed to read pedigree header: {}", e))?
            .clone();

        let mut columns = [0usize; 4];
        for (slot, required) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim_matches('"').eq_ignore_ascii_case(required))
                .ok_or_else(|| format!("Pedigree header is missing the '{}' column", required))?;
        }
        let [name_col, mother_col, father_col, trait_col] = columns;

        let mut people = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| format!("Failed to read pedigree record: {}", e))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let field = |col: usize| record.get(col).unwrap_or("").trim_matches('"');
            let optional = |col: usize| Some(field(col)).filter(|s| !s.is_empty());

            let name = field(name_col);
            if name.is_empty() {
                return Err(format!("Pedigree line {} has an empty name", line));
            }
            let trait_observed = parse_trait(field(trait_col))
                .map_err(|e| format!("Pedigree line {} ({}): {}", line, name, e))?;

            people.push(Person::new(name, optional(mother_col), optional(father_col), trait_observed));
        }

        if people.is_empty() {
            return Err("Pedigree file contains no people".to_string());
        }

        Pedigree::new(people).map_err(String::from)
    }
}
