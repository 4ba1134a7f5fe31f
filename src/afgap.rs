use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::df_utils::{UNIQUE_SNP_KEY, ensure_f64, with_position_key};
use crate::io::read_table;
use crate::qc::{check_file_exists, check_has_columns};

pub const AF_GAP: &str = "AF_Gap";
pub const CHROM: &str = "CHROM";
pub const POS: &str = "POS";

/// Loads one AF_Gap reference table (tab-separated, header with
/// CHROM/POS/AF_Gap) and derives the position key. A missing file or a
/// missing column is an error: the downstream join depends on this table.
pub fn load_af_gap_table(path: &Path) -> Result<DataFrame> {
    check_file_exists(path, "AF_Gap reference")?;
    let mut df = read_table(path)?;
    check_has_columns(&df, &[CHROM, POS, AF_GAP], path)?;
    df = ensure_f64(df, &[AF_GAP])?;
    df = with_position_key(df, CHROM, POS)?;
    Ok(df)
}

/// Stacks the reference tables and keeps one row per `unique_snp_key`, first
/// occurrence winning. Returns the combined table and the number of dropped
/// duplicate rows whose AF_Gap disagreed with the kept one; duplicate keys
/// are expected to carry identical values, so a nonzero count is worth a
/// warning upstream.
pub fn combine_af_gap_tables(frames: Vec<DataFrame>) -> Result<(DataFrame, usize)> {
    let mut iter = frames.into_iter();
    let first = iter
        .next()
        .context("at least one AF_Gap table is required")?;
    let mut combined = first.select([UNIQUE_SNP_KEY, AF_GAP])?;
    for df in iter {
        combined.vstack_mut(&df.select([UNIQUE_SNP_KEY, AF_GAP])?)?;
    }

    let keys = combined
        .column(UNIQUE_SNP_KEY)?
        .as_series()
        .context("unique_snp_key")?
        .str()?;
    let gaps = combined
        .column(AF_GAP)?
        .as_series()
        .context("AF_Gap")?
        .f64()?;

    let mut seen: HashMap<String, f64> = HashMap::new();
    let mut mask = Vec::with_capacity(combined.height());
    let mut conflicts = 0usize;
    for (key, gap) in keys.into_iter().zip(gaps) {
        let Some(key) = key else {
            mask.push(true);
            continue;
        };
        if let Some(first_gap) = seen.get(key) {
            mask.push(false);
            // NaN-vs-NaN compares as equal here; only a real difference counts.
            if let Some(gap) = gap
                && (gap - first_gap).abs() > 0.0
            {
                conflicts += 1;
            }
        } else {
            seen.insert(key.to_string(), gap.unwrap_or(f64::NAN));
            mask.push(true);
        }
    }

    let mask = BooleanChunked::from_iter(mask);
    let deduped = combined.filter(&mask)?;
    Ok((deduped, conflicts))
}
