use std::path::Path;

use anyhow::Result;
use polars::prelude::*;

use crate::df_utils::{ensure_utf8, with_snp_id_key};
use crate::io::read_table_headerless;

/// Fixed schema of a SNP-to-annotation intersection table: BED-style SNP
/// interval, the SNP identifier, the overlapping gene interval, and the
/// GO/BUSCO term of that gene.
pub const INTERSECT_COLUMNS: [&str; 8] = [
    "snp_chr",
    "snp_start",
    "snp_end",
    "snp_id",
    "gene_chr",
    "gene_start",
    "gene_end",
    "go_busco",
];

pub const SNP_ID: &str = "snp_id";
pub const GO_BUSCO: &str = "go_busco";
pub const INITIAL_SOURCE: &str = "initial_source";

/// Loads one labeled intersection table (tab-separated, no header). Returns
/// `None` when the file does not exist; the pipeline treats that as an empty
/// contribution rather than an error.
pub fn load_intersect_table(path: &Path, label: &str) -> Result<Option<DataFrame>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut df = read_table_headerless(path, &INTERSECT_COLUMNS)?;
    df = ensure_utf8(df, &[SNP_ID, GO_BUSCO])?;

    let labels = Series::new(
        INITIAL_SOURCE.into(),
        vec![label.to_string(); df.height()],
    );
    df.with_column(labels)?;

    df = with_snp_id_key(df, SNP_ID)?;
    Ok(Some(df))
}
