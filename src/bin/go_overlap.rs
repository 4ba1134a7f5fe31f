use std::path::PathBuf;

use clap::Parser;

use go_overlap::logging::init_tracing;
use go_overlap::summary::{IntersectInput, SummaryConfig, summarize};

/// Ranks GO/BUSCO annotation terms by AF_Gap evidence across labeled SNP
/// sets. Invoked bare, it reads the standard file layout of the orthologous
/// SNP workflow; the flags only point the same pipeline at relocated files.
#[derive(Parser)]
#[command(name = "go-overlap")]
#[command(about = "Summarize GO/BUSCO term overlap across SNP sets", long_about = None)]
struct Cli {
    /// AF_Gap table for the high-Fst outlier SNPs (TSV: CHROM, POS, AF_Gap)
    #[arg(long, default_value = "high_fst_outliers_af_gaps_with_freq.tsv")]
    high_fst_af_gaps: PathBuf,
    /// AF_Gap table for all private SNPs (TSV: CHROM, POS, AF_Gap)
    #[arg(long, default_value = "all_private_snps_af_gaps_with_freq.tsv")]
    private_af_gaps: PathBuf,
    /// Intersection of high-Fst outlier SNPs with GO/BUSCO annotations
    #[arg(long, default_value = "intersect_high_fst_outliers.tsv")]
    high_fst_intersect: PathBuf,
    /// Intersection of South-American private SNPs with GO/BUSCO annotations
    #[arg(long, default_value = "intersect_privateSA_go.tsv")]
    private_sa_intersect: PathBuf,
    /// Intersection of Australian private SNPs with GO/BUSCO annotations
    #[arg(long, default_value = "intersect_privateAUS_go.tsv")]
    private_aus_intersect: PathBuf,
    /// Output summary table (overwritten if present)
    #[arg(long, default_value = "go_term_snp_overlap_confident_summary.tsv")]
    output: PathBuf,
    /// Base name of the run log file
    #[arg(long)]
    log_name: Option<String>,
    /// Number of top summary rows to print
    #[arg(long, default_value_t = 20)]
    preview: usize,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = SummaryConfig {
        af_gap_files: vec![cli.high_fst_af_gaps, cli.private_af_gaps],
        intersect_files: vec![
            IntersectInput {
                label: "HighFST".to_string(),
                path: cli.high_fst_intersect,
            },
            IntersectInput {
                label: "PrivateSA".to_string(),
                path: cli.private_sa_intersect,
            },
            IntersectInput {
                label: "PrivateAUS".to_string(),
                path: cli.private_aus_intersect,
            },
        ],
        output: cli.output,
        log_name: cli.log_name,
        preview_rows: cli.preview,
    };

    summarize(&config)?;
    Ok(())
}
