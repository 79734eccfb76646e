// compare_posteriors.rs - Compare two TSV posterior reports within a tolerance
// Used to check sharded runs, alternate models or rebuilt binaries against a reference report

use clap::{Arg, Command};
use heredity::output::{read_tsv_report, ReportRow};
use std::collections::BTreeMap;

const COLUMNS: [&str; 5] = ["Gene0", "Gene1", "Gene2", "TraitTrue", "TraitFalse"];

/// Largest difference per person, plus people present in only one report
struct Comparison {
    max_diff: Vec<(String, f64, &'static str)>,
    only_reference: Vec<String>,
    only_candidate: Vec<String>,
}

fn compare(reference: &[ReportRow], candidate: &[ReportRow]) -> Comparison {
    let candidate_map: BTreeMap<&str, &[f64; 5]> =
        candidate.iter().map(|(name, values)| (name.as_str(), values)).collect();
    let reference_names: BTreeMap<&str, ()> = reference.iter().map(|(name, _)| (name.as_str(), ())).collect();

    let mut max_diff = Vec::new();
    let mut only_reference = Vec::new();
    for (name, expected) in reference {
        match candidate_map.get(name.as_str()) {
            Some(actual) => {
                let (column, diff) = expected
                    .iter()
                    .zip(actual.iter())
                    .map(|(a, b)| {
                        let d = (a - b).abs();
                        if d.is_nan() { f64::INFINITY } else { d }
                    })
                    .enumerate()
                    .fold((0, 0.0f64), |best, (i, d)| if d > best.1 { (i, d) } else { best });
                max_diff.push((name.clone(), diff, COLUMNS[column]));
            }
            None => only_reference.push(name.clone()),
        }
    }

    let only_candidate = candidate
        .iter()
        .filter(|(name, _)| !reference_names.contains_key(name.as_str()))
        .map(|(name, _)| name.clone())
        .collect();

    Comparison {
        max_diff,
        only_reference,
        only_candidate,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("Compare Posteriors")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compares two heredity TSV reports person by person")
        .arg(Arg::new("reference")
            .long("reference")
            .value_name("FILE")
            .help("Reference report (.tsv)")
            .required(true))
        .arg(Arg::new("candidate")
            .long("candidate")
            .value_name("FILE")
            .help("Report to check against the reference (.tsv)")
            .required(true))
        .arg(Arg::new("tolerance")
            .long("tolerance")
            .value_name("DELTA")
            .help("Largest accepted absolute difference (default: 1e-9)")
            .default_value("1e-9"))
        .get_matches();

    let reference_path = matches.get_one::<String>("reference").ok_or("Missing --reference")?;
    let candidate_path = matches.get_one::<String>("candidate").ok_or("Missing --candidate")?;
    let tolerance_str = matches.get_one::<String>("tolerance").ok_or("Missing --tolerance")?;

    let tolerance = tolerance_str
        .parse::<f64>()
        .map_err(|_| format!("Invalid tolerance value: {}", tolerance_str))?;
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(format!("Tolerance must be a non-negative number, got {}", tolerance).into());
    }

    println!("🔬 heredity posterior comparison");
    println!("================================");
    println!("📂 Reference: {}", reference_path);
    println!("📂 Candidate: {}", candidate_path);
    println!("🎯 Tolerance: {:e}", tolerance);
    println!();

    let reference = read_tsv_report(reference_path)?;
    let candidate = read_tsv_report(candidate_path)?;
    let comparison = compare(&reference, &candidate);

    let mut failures = 0;
    for (name, diff, column) in &comparison.max_diff {
        if *diff > tolerance {
            println!("❌ {:<16} max |Δ| = {:.3e} ({})", name, diff, column);
            failures += 1;
        } else {
            println!("✅ {:<16} max |Δ| = {:.3e}", name, diff);
        }
    }
    for name in &comparison.only_reference {
        println!("❌ {:<16} missing from candidate", name);
        failures += 1;
    }
    for name in &comparison.only_candidate {
        println!("❌ {:<16} missing from reference", name);
        failures += 1;
    }

    println!();
    if failures > 0 {
        println!("⚠️  {} of {} people differ", failures, reference.len().max(candidate.len()));
        std::process::exit(1);
    }
    println!("🎉 Reports agree for all {} people", reference.len());
    Ok(())
}
