use anyhow::{Context, Result};
use polars::prelude::*;

/// Composite key identifying a SNP across files: `chromosome:position`.
pub const UNIQUE_SNP_KEY: &str = "unique_snp_key";

pub fn ensure_utf8(mut df: DataFrame, cols: &[&str]) -> Result<DataFrame> {
    for col in cols {
        if let Ok(column) = df.column(col)
            && let Some(series) = column.as_series()
            && series.dtype() != &DataType::String
        {
            let mut casted = series.cast(&DataType::String)?;
            casted.rename((*col).into());
            df.with_column(casted)?;
        }
    }
    Ok(df)
}

pub fn ensure_f64(mut df: DataFrame, cols: &[&str]) -> Result<DataFrame> {
    for col in cols {
        if let Ok(column) = df.column(col)
            && let Some(series) = column.as_series()
            && series.dtype() != &DataType::Float64
        {
            let mut casted = series.cast(&DataType::Float64)?;
            casted.rename((*col).into());
            df.with_column(casted)?;
        }
    }
    Ok(df)
}

/// Adds the `unique_snp_key` column as `str(chrom) + ":" + str(pos)`. The
/// concatenation is textual, so `chr1:100` and `1:100` are distinct keys.
pub fn with_position_key(mut df: DataFrame, chrom: &str, pos: &str) -> Result<DataFrame> {
    let chrom_str = df
        .column(chrom)?
        .as_series()
        .context("chromosome column")?
        .cast(&DataType::String)?;
    let pos_str = df
        .column(pos)?
        .as_series()
        .context("position column")?
        .cast(&DataType::String)?;

    let keys: StringChunked = chrom_str
        .str()?
        .into_iter()
        .zip(pos_str.str()?)
        .map(|(c, p)| match (c, p) {
            (Some(c), Some(p)) => Some(format!("{c}:{p}")),
            _ => None,
        })
        .collect();

    let mut series = keys.into_series();
    series.rename(UNIQUE_SNP_KEY.into());
    df.with_column(series)?;
    Ok(df)
}

/// Adds the `unique_snp_key` column from the first two ":"-delimited segments
/// of an embedded SNP identifier (`chr1:100:rsX` keys as `chr1:100`). An
/// identifier with fewer segments keys on itself unchanged.
pub fn with_snp_id_key(mut df: DataFrame, snp_id: &str) -> Result<DataFrame> {
    let ids = df
        .column(snp_id)?
        .as_series()
        .context("snp identifier column")?
        .str()?;

    let keys: StringChunked = ids
        .into_iter()
        .map(|v| {
            v.map(|id| {
                id.splitn(3, ':')
                    .take(2)
                    .collect::<Vec<_>>()
                    .join(":")
            })
        })
        .collect();

    let mut series = keys.into_series();
    series.rename(UNIQUE_SNP_KEY.into());
    df.with_column(series)?;
    Ok(df)
}
