// main.rs - CLI entry point

use std::path::Path;
use std::time::Instant;

use heredity::cli::Config;
use heredity::output::ReportContext;
use heredity::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        eprintln!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    let (args, config_model) = match args.config.clone() {
        Some(config_path) => args.with_config_file(&config_path)?,
        None => (args, None),
    };

    let validation = validate_args(&args, config_model)?;
    let pedigree_path = args
        .pedigree_path()
        .ok_or("A pedigree file is required. Usage: heredity data.csv")?
        .to_string();

    eprintln!("🚀 heredity v{}", heredity::VERSION);

    // Configure thread pool
    if !args.sequential {
        if let Some(n) = args.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build_global()
                .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
            eprintln!("🧵 Threads: {}", n);
        } else {
            eprintln!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
        }
    } else {
        eprintln!("🧵 Sequential enumeration");
    }

    let total_start = Instant::now();

    // Load the pedigree
    eprintln!("📋 Loading pedigree: {}", pedigree_path);
    let pedigree = Pedigree::from_file(Path::new(&pedigree_path))?;
    pedigree.print_statistics("LOADED");

    if pedigree.len() > args.max_people {
        return Err(format!(
            "Pedigree has {} people, more than --max-people {} (exact enumeration grows as 6^N)",
            pedigree.len(),
            args.max_people
        ));
    }

    let shards = if args.sequential {
        1
    } else {
        args.shards.unwrap_or(4 * rayon::current_num_threads())
    };

    let engine = InferenceEngine::new(validation.model.clone())
        .with_shards(shards)
        .with_progress(!args.no_progress)
        .with_verbose(true);
    if engine.shards() > 1 {
        eprintln!("🧩 Shards: {}", engine.shards());
    }

    let hypotheses = engine.validate(&pedigree)?;

    if args.dry_run {
        eprintln!("✅ Dry run completed successfully");
        eprintln!("📊 Hypothesis space: {} evidence-consistent hypotheses", hypotheses);
        return Ok(());
    }

    let table = engine.infer(&pedigree)?;

    let ctx = ReportContext {
        command_line: &command_line,
        pedigree: &pedigree,
        model: engine.model(),
        hypotheses,
        precision: args.precision,
        header: !args.no_header,
    };
    write_report(args.output.as_deref(), validation.format, &table, &ctx, &validation.filter)?;

    eprintln!("⏱️  Total time: {:.2}s", total_start.elapsed().as_secs_f64());
    Ok(())
}
