// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// heredity - Exact posterior gene and trait probabilities for a pedigree
pub struct Args {
    /// pedigree file (name,mother,father,trait; .csv or .tsv)
    #[argh(positional)]
    pub data: Option<String>,

    /// pedigree file, alternative to the positional argument
    #[argh(option)]
    pub pedigree: Option<String>,

    /// output report file (default: stdout)
    #[argh(option)]
    pub output: Option<String>,

    /// output format: text, tsv, csv, json (default: text)
    #[argh(option, default = "String::from(\"text\")")]
    pub format: String,

    /// decimal places in text, tsv and csv reports (default: 4)
    #[argh(option, default = "4")]
    pub precision: usize,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// number of gene-space shards (default: 4 per thread)
    #[argh(option)]
    pub shards: Option<usize>,

    /// enumerate on a single thread without sharding
    #[argh(switch)]
    pub sequential: bool,

    /// probability that a transmitted gene copy mutates (default: 0.01)
    #[argh(option)]
    pub mutation_rate: Option<f64>,

    /// refuse pedigrees larger than this (default: 20)
    #[argh(option, default = "20")]
    pub max_people: usize,

    /// report only people whose name matches this regex
    #[argh(option)]
    pub include_people: Option<String>,

    /// omit people whose name matches this regex from the report
    #[argh(option)]
    pub exclude_people: Option<String>,

    /// omit provenance comments from the report
    #[argh(switch)]
    pub no_header: bool,

    /// hide the progress bar
    #[argh(switch)]
    pub no_progress: bool,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

impl Args {
    /// Pedigree path from the option or the positional argument
    pub fn pedigree_path(&self) -> Option<&str> {
        self.pedigree.as_deref().or(self.data.as_deref())
    }
}
