// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::core::InheritanceModel;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> (Self, Option<InheritanceModel>) {
        // Input/Output
        if self.pedigree_path().is_none() {
            self.pedigree = config.pedigree;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Core settings (only override defaults, not explicit CLI values)
        if let (true, Some(format)) = (self.format == "text", config.format) {
            self.format = format;
        }
        if let (true, Some(precision)) = (self.precision == 4, config.precision) {
            self.precision = precision;
        }
        if let (true, Some(max_people)) = (self.max_people == 20, config.max_people) {
            self.max_people = max_people;
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }
        if self.shards.is_none() {
            self.shards = config.shards;
        }

        // Report filtering
        if self.include_people.is_none() {
            self.include_people = config.include_people;
        }
        if self.exclude_people.is_none() {
            self.exclude_people = config.exclude_people;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.sequential && config.sequential.unwrap_or(false) {
            self.sequential = true;
        }
        if !self.no_header && config.no_header.unwrap_or(false) {
            self.no_header = true;
        }
        if !self.no_progress && config.no_progress.unwrap_or(false) {
            self.no_progress = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        (self, config.model)
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<(Self, Option<InheritanceModel>), String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["heredity"], args).unwrap()
    }

    #[test]
    fn test_cli_values_win() {
        let args = parse(&["family.csv", "--format", "json", "--threads", "2"]);
        let mut config = Config::new();
        config.pedigree = Some("other.csv".to_string());
        config.format = Some("tsv".to_string());
        config.threads = Some(16);
        config.output = Some("out.tsv".to_string());

        let (merged, model) = args.merge_with_config(config);
        assert_eq!(merged.pedigree_path(), Some("family.csv"));
        assert_eq!(merged.format, "json");
        assert_eq!(merged.threads, Some(2));
        assert_eq!(merged.output.as_deref(), Some("out.tsv"));
        assert!(model.is_none());
    }

    #[test]
    fn test_config_fills_defaults() {
        let args = parse(&[]);
        let mut config = Config::new();
        config.pedigree = Some("family.csv".to_string());
        config.precision = Some(6);
        config.no_progress = Some(true);
        config.model = Some(InheritanceModel::with_mutation_rate(0.03));

        let (merged, model) = args.merge_with_config(config);
        assert_eq!(merged.pedigree_path(), Some("family.csv"));
        assert_eq!(merged.precision, 6);
        assert!(merged.no_progress);
        assert_eq!(model.map(|m| m.mutation_rate), Some(0.03));
    }
}
