// inspector.rs - Pedigree inspector: structure, evidence and hypothesis space
// Features: validation report, per-person parents and generations, enumeration size

use std::path::Path;

use argh::FromArgs;
use heredity::core::{gene_assignment_count, hypothesis_count, MAX_POPULATION};
use heredity::data::Pedigree;

// ============================================================================
// CLI ARGUMENTS
// ============================================================================

#[derive(FromArgs)]
/// Inspect a pedigree file without running inference
struct Args {
    /// pedigree file to inspect (.csv or .tsv)
    #[argh(positional)]
    pedigree: String,

    /// list every person with parents, generation and evidence
    #[argh(switch)]
    people: bool,
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    let args: Args = argh::from_env();

    let pedigree = match Pedigree::from_file(Path::new(&args.pedigree)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("❌ Invalid pedigree '{}': {}", args.pedigree, e);
            std::process::exit(1);
        }
    };

    println!("🔍 PEDIGREE INSPECTOR");
    println!("═══════════════════════════════════════════════");
    println!("📁 File: {}", args.pedigree);
    println!("🔑 SHA256: {}", pedigree.fingerprint());

    let stats = pedigree.stats();
    println!("\n📊 STRUCTURE");
    println!("  • People: {}", stats.people);
    println!("  • Founders: {}", stats.founders);
    println!("  • Children: {}", stats.people - stats.founders);
    println!("  • Generations: {}", stats.generations);

    println!("\n🧬 EVIDENCE");
    println!("  • Trait observed present: {}", stats.observed_with_trait);
    println!("  • Trait observed absent: {}", stats.observed_without_trait);
    println!("  • Trait unknown: {}", stats.unobserved);

    println!("\n🎯 HYPOTHESIS SPACE");
    match (gene_assignment_count(pedigree.len()), hypothesis_count(&pedigree)) {
        (Some(genes), Some(total)) => {
            println!("  • Gene assignments: {}", genes);
            println!("  • Trait assignments per gene assignment: {}", total / genes);
            println!("  • Evidence-consistent hypotheses: {}", total);
        }
        _ => println!("  • Too large to count"),
    }
    if pedigree.len() > MAX_POPULATION {
        println!("  ⚠️  Exceeds the {} people the engine can enumerate", MAX_POPULATION);
    }

    if args.people {
        let generations = pedigree.generations();
        println!("\n👪 PEOPLE");
        for (i, person) in pedigree.people().iter().enumerate() {
            let parents = if person.is_founder() {
                "founder".to_string()
            } else {
                format!(
                    "mother={}, father={}",
                    person.mother.as_deref().unwrap_or("?"),
                    person.father.as_deref().unwrap_or("?")
                )
            };
            let evidence = match person.trait_observed {
                Some(true) => "trait present",
                Some(false) => "trait absent",
                None => "trait unknown",
            };
            println!(
                "  {:<16} gen {}  {:<32} {}",
                person.name, generations[i], parents, evidence
            );
        }
    }
}
