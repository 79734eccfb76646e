// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::InheritanceModel;
use crate::output::{PeopleFilter, ReportFormat};
use regex::Regex;
use std::str::FromStr;

/// Maximum number of decimal places accepted for reports
const MAX_PRECISION: usize = 17;

#[derive(Debug)]
pub struct ValidationResult {
    pub format: ReportFormat,
    pub model: InheritanceModel,
    pub filter: PeopleFilter,
}

/// Validate all command line arguments
///
/// `config_model` is the `[model]` table of the configuration file, if any;
/// `--mutation-rate` overrides its mutation rate.
pub fn validate_args(args: &Args, config_model: Option<InheritanceModel>) -> Result<ValidationResult, String> {
    let format = ReportFormat::from_str(&args.format)?;

    if args.precision > MAX_PRECISION {
        return Err(format!("Precision must be at most {}", MAX_PRECISION));
    }
    if args.max_people == 0 {
        return Err("--max-people must be at least 1".to_string());
    }
    if args.threads == Some(0) {
        return Err("--threads must be at least 1".to_string());
    }
    if args.shards == Some(0) {
        return Err("--shards must be at least 1".to_string());
    }
    if args.sequential && args.shards.is_some() {
        return Err("--shards is not compatible with --sequential".to_string());
    }
    if args.sequential && args.threads.is_some() {
        return Err("--threads is not compatible with --sequential".to_string());
    }

    let mut model = config_model.unwrap_or_default();
    if let Some(rate) = args.mutation_rate {
        model.mutation_rate = rate;
        model.description = Some(format!("Mutation rate {} from command line", rate));
    }
    model.validate().map_err(String::from)?;

    // Compile regex patterns
    let include = if let Some(pattern) = &args.include_people {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid include_people regex: {}", e))?)
    } else {
        None
    };

    let exclude = if let Some(pattern) = &args.exclude_people {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid exclude_people regex: {}", e))?)
    } else {
        None
    };

    Ok(ValidationResult {
        format,
        model,
        filter: PeopleFilter { include, exclude },
    })
}
