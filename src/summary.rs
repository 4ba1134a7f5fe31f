use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::afgap::{AF_GAP, combine_af_gap_tables, load_af_gap_table};
use crate::df_utils::UNIQUE_SNP_KEY;
use crate::error::GoOverlapError;
use crate::intersect::{GO_BUSCO, INITIAL_SOURCE, load_intersect_table};
use crate::io::write_dataframe;
use crate::logging::{log_line, open_log_file, warn_line};

pub const COMBINED_SOURCE: &str = "combined_source";
pub const N_SNPS: &str = "n_snps";
pub const SUM_AF_GAP: &str = "sum_AF_Gap";
pub const MEAN_AF_GAP: &str = "mean_AF_Gap";
pub const MAX_AF_GAP: &str = "max_AF_Gap";

#[derive(Debug, Clone)]
pub struct IntersectInput {
    pub label: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub af_gap_files: Vec<PathBuf>,
    pub intersect_files: Vec<IntersectInput>,
    pub output: PathBuf,
    pub log_name: Option<String>,
    pub preview_rows: usize,
}

/// Runs the whole pipeline: load and combine the AF_Gap references, load the
/// labeled intersection tables, join, aggregate per SNP and per term, write
/// the ranked summary and print its head.
pub fn summarize(config: &SummaryConfig) -> Result<DataFrame> {
    let mut log = open_log_file(config.log_name.as_deref())?;

    let mut af_frames = Vec::with_capacity(config.af_gap_files.len());
    for path in &config.af_gap_files {
        log_line(
            &mut log,
            &format!("Loading AF_Gap data from {}", path.display()),
            true,
        )?;
        let df = load_af_gap_table(path)?;
        log_line(
            &mut log,
            &format!(
                "Loaded {} SNPs with AF_Gap data from {}",
                df.height(),
                path.display()
            ),
            true,
        )?;
        af_frames.push(df);
    }

    let (af_combined, conflicts) = combine_af_gap_tables(af_frames)?;
    if conflicts > 0 {
        warn_line(
            &mut log,
            &format!(
                "{conflicts} duplicate unique_snp_key row(s) carried differing AF_Gap values; keeping the first occurrence"
            ),
        )?;
    }
    log_line(
        &mut log,
        &format!("Combined AF_Gap data for {} unique SNPs", af_combined.height()),
        true,
    )?;

    let mut intersect_frames = Vec::new();
    for input in &config.intersect_files {
        match load_intersect_table(&input.path, &input.label)? {
            Some(df) => {
                log_line(
                    &mut log,
                    &format!(
                        "Loaded {} rows from {} with label '{}'",
                        df.height(),
                        input.path.display(),
                        input.label
                    ),
                    true,
                )?;
                intersect_frames.push(df);
            }
            None => {
                warn_line(
                    &mut log,
                    &format!("{} not found; skipping", input.path.display()),
                )?;
            }
        }
    }
    if intersect_frames.is_empty() {
        return Err(GoOverlapError::NoIntersectTables.into());
    }

    let mut intersections = intersect_frames.remove(0);
    for df in intersect_frames {
        intersections.vstack_mut(&df)?;
    }

    let joined = attach_af_gap(intersections, &af_combined)?;
    let per_snp = collapse_sources(&joined)?;
    let summary = rank_terms(&per_snp)?;

    write_dataframe(&summary, &config.output)?;
    log_line(
        &mut log,
        &format!(
            "Summary of {} (term, source) group(s) written to {}",
            summary.height(),
            config.output.display()
        ),
        true,
    )?;

    log_line(
        &mut log,
        &format!("GO term summary with confidence metrics (top {}):", config.preview_rows),
        true,
    )?;
    println!("{}", summary.head(Some(config.preview_rows)));

    log_line(&mut log, "Analysis complete.", true)?;
    Ok(summary)
}

/// Left-joins the stacked intersection rows against the combined AF_Gap
/// table on `unique_snp_key`. Every input row survives; keys absent from the
/// reference get AF_Gap 0.
pub fn attach_af_gap(intersections: DataFrame, af_gap: &DataFrame) -> Result<DataFrame> {
    let af_cols = af_gap.select([UNIQUE_SNP_KEY, AF_GAP])?;
    let mut joined = intersections.join(
        &af_cols,
        [UNIQUE_SNP_KEY],
        [UNIQUE_SNP_KEY],
        JoinType::Left.into(),
        None,
    )?;

    let filled: Float64Chunked = joined
        .column(AF_GAP)?
        .as_series()
        .context("AF_Gap")?
        .f64()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(0.0)))
        .collect();
    let mut series = filled.into_series();
    series.rename(AF_GAP.into());
    joined.with_column(series)?;
    Ok(joined)
}

struct SnpTermGroup {
    sources: BTreeSet<String>,
    af_gap: f64,
}

/// Stage-one aggregation: one row per (`unique_snp_key`, `go_busco`) with
/// the contributing source labels collapsed into a sorted ", "-joined
/// string. The AF_Gap of the first row seen stands for the group.
pub fn collapse_sources(joined: &DataFrame) -> Result<DataFrame> {
    let keys = joined
        .column(UNIQUE_SNP_KEY)?
        .as_series()
        .context("unique_snp_key")?
        .str()?;
    let terms = joined
        .column(GO_BUSCO)?
        .as_series()
        .context("go_busco")?
        .str()?;
    let sources = joined
        .column(INITIAL_SOURCE)?
        .as_series()
        .context("initial_source")?
        .str()?;
    let gaps = joined
        .column(AF_GAP)?
        .as_series()
        .context("AF_Gap")?
        .f64()?;

    let mut groups: BTreeMap<(String, String), SnpTermGroup> = BTreeMap::new();
    for idx in 0..joined.height() {
        let (Some(key), Some(term)) = (keys.get(idx), terms.get(idx)) else {
            continue;
        };
        let entry = groups
            .entry((key.to_string(), term.to_string()))
            .or_insert_with(|| SnpTermGroup {
                sources: BTreeSet::new(),
                af_gap: gaps.get(idx).unwrap_or(0.0),
            });
        if let Some(source) = sources.get(idx) {
            entry.sources.insert(source.to_string());
        }
    }

    let mut key_col = Vec::with_capacity(groups.len());
    let mut term_col = Vec::with_capacity(groups.len());
    let mut source_col = Vec::with_capacity(groups.len());
    let mut gap_col = Vec::with_capacity(groups.len());
    for ((key, term), group) in groups {
        key_col.push(key);
        term_col.push(term);
        source_col.push(group.sources.into_iter().collect::<Vec<_>>().join(", "));
        gap_col.push(group.af_gap);
    }

    let df = df!(
        UNIQUE_SNP_KEY => key_col,
        GO_BUSCO => term_col,
        COMBINED_SOURCE => source_col,
        AF_GAP => gap_col
    )?;
    Ok(df)
}

struct TermStats {
    n: u32,
    sum: f64,
    max: f64,
}

/// Stage-two aggregation: one row per (`go_busco`, `combined_source`) with
/// the SNP count and the sum/mean/max of AF_Gap, sorted by sum descending
/// then count descending.
pub fn rank_terms(per_snp: &DataFrame) -> Result<DataFrame> {
    let terms = per_snp
        .column(GO_BUSCO)?
        .as_series()
        .context("go_busco")?
        .str()?;
    let sources = per_snp
        .column(COMBINED_SOURCE)?
        .as_series()
        .context("combined_source")?
        .str()?;
    let gaps = per_snp
        .column(AF_GAP)?
        .as_series()
        .context("AF_Gap")?
        .f64()?;

    let mut groups: BTreeMap<(String, String), TermStats> = BTreeMap::new();
    for idx in 0..per_snp.height() {
        let (Some(term), Some(source)) = (terms.get(idx), sources.get(idx)) else {
            continue;
        };
        let gap = gaps.get(idx).unwrap_or(0.0);
        let entry = groups
            .entry((term.to_string(), source.to_string()))
            .or_insert(TermStats {
                n: 0,
                sum: 0.0,
                max: f64::NEG_INFINITY,
            });
        entry.n += 1;
        entry.sum += gap;
        entry.max = entry.max.max(gap);
    }

    let mut rows: Vec<(String, String, TermStats)> = groups
        .into_iter()
        .map(|((term, source), stats)| (term, source, stats))
        .collect();
    rows.sort_by(|a, b| {
        b.2.sum
            .total_cmp(&a.2.sum)
            .then_with(|| b.2.n.cmp(&a.2.n))
    });

    let mut term_col = Vec::with_capacity(rows.len());
    let mut source_col = Vec::with_capacity(rows.len());
    let mut n_col = Vec::with_capacity(rows.len());
    let mut sum_col = Vec::with_capacity(rows.len());
    let mut mean_col = Vec::with_capacity(rows.len());
    let mut max_col = Vec::with_capacity(rows.len());
    for (term, source, stats) in rows {
        term_col.push(term);
        source_col.push(source);
        n_col.push(stats.n);
        sum_col.push(stats.sum);
        mean_col.push(stats.sum / f64::from(stats.n));
        max_col.push(stats.max);
    }

    let df = df!(
        GO_BUSCO => term_col,
        COMBINED_SOURCE => source_col,
        N_SNPS => n_col,
        SUM_AF_GAP => sum_col,
        MEAN_AF_GAP => mean_col,
        MAX_AF_GAP => max_col
    )?;
    Ok(df)
}
