// mod.rs - Posterior report writers

use crate::core::{GeneCount, InheritanceModel, PersonPosterior, PosteriorTable};
use crate::data::Pedigree;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Report layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Tsv,
    Csv,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "tsv" => Ok(ReportFormat::Tsv),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unsupported output format: {}. Use: text, tsv, csv, json", s)),
        }
    }
}

impl ReportFormat {
    pub fn description(&self) -> &str {
        match self {
            ReportFormat::Text => "plain text (one block per person)",
            ReportFormat::Tsv => "tab-separated table",
            ReportFormat::Csv => "comma-separated table",
            ReportFormat::Json => "JSON document",
        }
    }
}

/// Include/exclude regexes applied to person names before reporting
#[derive(Debug, Clone, Default)]
pub struct PeopleFilter {
    pub include: Option<Regex>,
    pub exclude: Option<Regex>,
}

impl PeopleFilter {
    pub fn matches(&self, name: &str) -> bool {
        if let Some(regex) = &self.include {
            if !regex.is_match(name) {
                return false;
            }
        }
        if let Some(regex) = &self.exclude {
            if regex.is_match(name) {
                return false;
            }
        }
        true
    }
}

/// Provenance and formatting options shared by every writer
pub struct ReportContext<'a> {
    pub command_line: &'a str,
    pub pedigree: &'a Pedigree,
    pub model: &'a InheritanceModel,
    pub hypotheses: u128,
    pub precision: usize,
    pub header: bool,
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)
                .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
        }
    }
    Ok(())
}

fn write_err(e: std::io::Error) -> String {
    format!("Write error: {}", e)
}

/// Provenance lines, each prefixed with `prefix`
fn write_provenance(writer: &mut dyn Write, ctx: &ReportContext, prefix: &str) -> Result<(), String> {
    writeln!(writer, "{} Command: {}", prefix, ctx.command_line).map_err(write_err)?;
    writeln!(writer, "{} Generated: {}", prefix, chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))
        .map_err(write_err)?;
    writeln!(writer, "{} heredity v{}", prefix, env!("CARGO_PKG_VERSION")).map_err(write_err)?;
    writeln!(writer, "{} Pedigree SHA256: {}", prefix, ctx.pedigree.fingerprint()).map_err(write_err)?;
    writeln!(writer, "{} Model: {}", prefix, ctx.model.summary()).map_err(write_err)?;
    writeln!(writer, "{} Hypotheses: {}", prefix, ctx.hypotheses).map_err(write_err)?;
    Ok(())
}

fn reported<'t>(
    table: &'t PosteriorTable,
    filter: &'t PeopleFilter,
) -> impl Iterator<Item = (&'t str, &'t PersonPosterior)> {
    table.iter().filter(move |(name, _)| filter.matches(name))
}

/// Write one block per person: gene counts 2, 1, 0 then trait True, False
pub fn write_text(
    writer: &mut dyn Write,
    table: &PosteriorTable,
    ctx: &ReportContext,
    filter: &PeopleFilter,
) -> Result<(), String> {
    if ctx.header {
        write_provenance(writer, ctx, "#")?;
    }
    let precision = ctx.precision;
    for (name, posterior) in reported(table, filter) {
        writeln!(writer, "{}:", name).map_err(write_err)?;
        writeln!(writer, "  Gene:").map_err(write_err)?;
        for gene in GeneCount::ALL.iter().rev() {
            writeln!(writer, "    {}: {:.*}", gene, precision, posterior.gene(*gene)).map_err(write_err)?;
        }
        writeln!(writer, "  Trait:").map_err(write_err)?;
        writeln!(writer, "    True: {:.*}", precision, posterior.trait_probability(true)).map_err(write_err)?;
        writeln!(writer, "    False: {:.*}", precision, posterior.trait_probability(false)).map_err(write_err)?;
    }
    Ok(())
}

/// Write one row per person using `delimiter`
pub fn write_delimited(
    writer: &mut dyn Write,
    delimiter: u8,
    table: &PosteriorTable,
    ctx: &ReportContext,
    filter: &PeopleFilter,
) -> Result<(), String> {
    if ctx.header {
        write_provenance(writer, ctx, "#")?;
    }

    let mut out = csv::WriterBuilder::new().delimiter(delimiter).from_writer(writer);
    out.write_record(["Person", "Gene0", "Gene1", "Gene2", "TraitTrue", "TraitFalse"])
        .map_err(|e| format!("Write error: {}", e))?;

    for (name, posterior) in reported(table, filter) {
        let mut row = vec![name.to_string()];
        row.extend(posterior.gene.iter().map(|p| format!("{:.*}", ctx.precision, p)));
        row.push(format!("{:.*}", ctx.precision, posterior.trait_probability(true)));
        row.push(format!("{:.*}", ctx.precision, posterior.trait_probability(false)));
        out.write_record(&row).map_err(|e| format!("Write error: {}", e))?;
    }
    out.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}

pub fn write_tsv(
    writer: &mut dyn Write,
    table: &PosteriorTable,
    ctx: &ReportContext,
    filter: &PeopleFilter,
) -> Result<(), String> {
    write_delimited(writer, b'\t', table, ctx, filter)
}

pub fn write_csv(
    writer: &mut dyn Write,
    table: &PosteriorTable,
    ctx: &ReportContext,
    filter: &PeopleFilter,
) -> Result<(), String> {
    write_delimited(writer, b',', table, ctx, filter)
}

#[derive(Serialize)]
struct JsonMetadata<'a> {
    tool: String,
    command: &'a str,
    generated: String,
    pedigree_sha256: String,
    hypotheses: String,
    model: &'a InheritanceModel,
}

#[derive(Serialize)]
struct JsonPerson<'a> {
    name: &'a str,
    mother: Option<&'a str>,
    father: Option<&'a str>,
    observed_trait: Option<bool>,
    gene: BTreeMap<String, f64>,
    #[serde(rename = "trait")]
    trait_dist: BTreeMap<String, f64>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: Option<JsonMetadata<'a>>,
    people: Vec<JsonPerson<'a>>,
}

/// Write the full-precision posteriors as a JSON document
pub fn write_json(
    writer: &mut dyn Write,
    table: &PosteriorTable,
    ctx: &ReportContext,
    filter: &PeopleFilter,
) -> Result<(), String> {
    let metadata = ctx.header.then(|| JsonMetadata {
        tool: format!("heredity v{}", env!("CARGO_PKG_VERSION")),
        command: ctx.command_line,
        generated: chrono::Utc::now().to_rfc3339(),
        pedigree_sha256: ctx.pedigree.fingerprint(),
        hypotheses: ctx.hypotheses.to_string(),
        model: ctx.model,
    });

    let people = reported(table, filter)
        .map(|(name, posterior)| {
            let record = ctx.pedigree.index_of(name).map(|i| ctx.pedigree.person(i));
            JsonPerson {
                name,
                mother: record.and_then(|p| p.mother.as_deref()),
                father: record.and_then(|p| p.father.as_deref()),
                observed_trait: record.and_then(|p| p.trait_observed),
                gene: GeneCount::ALL
                    .iter()
                    .map(|g| (g.to_string(), posterior.gene(*g)))
                    .collect(),
                trait_dist: [true, false]
                    .iter()
                    .map(|t| (t.to_string(), posterior.trait_probability(*t)))
                    .collect(),
            }
        })
        .collect();

    let report = JsonReport { metadata, people };
    serde_json::to_writer_pretty(&mut *writer, &report).map_err(|e| format!("Failed to write JSON report: {}", e))?;
    writeln!(writer).map_err(write_err)?;
    Ok(())
}

/// Write the report to `file_path`, or to stdout when no path is given
pub fn write_report(
    file_path: Option<&str>,
    format: ReportFormat,
    table: &PosteriorTable,
    ctx: &ReportContext,
    filter: &PeopleFilter,
) -> Result<(), String> {
    let mut writer: Box<dyn Write> = match file_path {
        Some(path) => {
            ensure_parent_dir(path)?;
            let file = File::create(path).map_err(|e| format!("Failed to create output file '{}': {}", path, e))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    match format {
        ReportFormat::Text => write_text(writer.as_mut(), table, ctx, filter)?,
        ReportFormat::Tsv => write_tsv(writer.as_mut(), table, ctx, filter)?,
        ReportFormat::Csv => write_csv(writer.as_mut(), table, ctx, filter)?,
        ReportFormat::Json => write_json(writer.as_mut(), table, ctx, filter)?,
    }
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;

    if let Some(path) = file_path {
        eprintln!("✅ Posteriors written to: {} ({})", path, format.description());
    }
    Ok(())
}

/// Posteriors read back from a TSV report: gene 0..2 then trait true/false
pub type ReportRow = (String, [f64; 5]);

/// Load a TSV report written by `write_tsv`, skipping `#` comment lines
pub fn read_tsv_report(file_path: &str) -> Result<Vec<ReportRow>, String> {
    let file = File::open(file_path).map_err(|e| format!("Failed to open report '{}': {}", file_path, e))?;
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(file);

    let headers = rdr
        .headers()
        .map_err(|e| format!("Failed to read header of report '{}': {}", file_path, e))?;
    if headers.is_empty() {
        return Err(format!("No header found in report '{}'", file_path));
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| format!("Failed to read report '{}': {}", file_path, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() != 6 {
            return Err(format!("Report line {} has {} columns, expected 6", line, record.len()));
        }

        let mut values = [0.0; 5];
        for (slot, raw) in values.iter_mut().zip(record.iter().skip(1)) {
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("Failed to parse '{}' at line {}: {}", raw, line, e))?;
            if !value.is_finite() {
                return Err(format!("Non-finite probability '{}' at line {}", raw, line));
            }
            *slot = value;
        }
        rows.push((record[0].to_string(), values));
    }
    Ok(rows)
}
