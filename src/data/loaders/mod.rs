// mod.rs - Pedigree loaders

pub mod csv;
pub mod tsv;

use crate::data::Pedigree;
use std::path::Path;

/// Parse the trait column: known true, known false, or unknown
pub fn parse_trait(value: &str) -> Result<Option<bool>, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(Some(true)),
        "0" | "false" | "no" => Ok(Some(false)),
        "" | "na" | "-" | "?" => Ok(None),
        other => Err(format!("Invalid trait value '{}' (expected 1, 0 or blank)", other)),
    }
}

impl Pedigree {
    /// Load a pedigree, choosing the delimiter from the file extension
    pub fn from_file(file_path: &Path) -> Result<Self, String> {
        let extension = file_path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("csv")
            .to_lowercase();

        match extension.as_str() {
            "tsv" | "txt" => Self::from_tsv(file_path),
            _ => Self::from_csv(file_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_trait() {
        assert_eq!(parse_trait("1"), Ok(Some(true)));
        assert_eq!(parse_trait(" TRUE "), Ok(Some(true)));
        assert_eq!(parse_trait("0"), Ok(Some(false)));
        assert_eq!(parse_trait("no"), Ok(Some(false)));
        assert_eq!(parse_trait(""), Ok(None));
        assert_eq!(parse_trait("NA"), Ok(None));
        assert!(parse_trait("2").is_err());
    }

    #[test]
    fn test_from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("family.csv");
        let mut f = std::fs::File::create(&csv_path).unwrap();
        writeln!(f, "name,mother,father,trait\nHarry,Lily,James,\nJames,,,1\nLily,,,0").unwrap();

        let tsv_path = dir.path().join("family.tsv");
        let mut f = std::fs::File::create(&tsv_path).unwrap();
        writeln!(f, "name\tmother\tfather\ttrait\nHarry\tLily\tJames\t\nJames\t\t\t1\nLily\t\t\t0").unwrap();

        let from_csv = Pedigree::from_file(&csv_path).unwrap();
        let from_tsv = Pedigree::from_file(&tsv_path).unwrap();
        assert_eq!(from_csv.people(), from_tsv.people());
        assert_eq!(from_csv.fingerprint(), from_tsv.fingerprint());
    }
}
