use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use polars::prelude::*;
use tempfile::NamedTempFile;

/// Reads a tab-separated table with a header row. `.gz` inputs are
/// decompressed transparently.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    if is_gzipped(path) {
        let tmp = decompress_to_temp(path)?;
        return read_tsv(tmp.path(), true);
    }
    read_tsv(path, true)
}

/// Reads a headerless tab-separated table and assigns `names` to its columns.
/// The file must have exactly `names.len()` columns.
pub fn read_table_headerless(path: &Path, names: &[&str]) -> Result<DataFrame> {
    let mut df = if is_gzipped(path) {
        let tmp = decompress_to_temp(path)?;
        read_tsv(tmp.path(), false)?
    } else {
        read_tsv(path, false)?
    };
    df.set_column_names(names.iter().map(|s| s.to_string()))
        .with_context(|| format!("assign column names to {}", path.display()))?;
    Ok(df)
}

fn read_tsv(path: &Path, has_header: bool) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(has_header)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(b'\t')
                .with_null_values(Some(NullValues::AllColumns(vec![
                    "".into(),
                    "NA".into(),
                    "NaN".into(),
                ])))
                .with_missing_is_null(true),
        )
        .with_ignore_errors(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .with_context(|| format!("read {}", path.display()))
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

fn decompress_to_temp(path: &Path) -> Result<NamedTempFile> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut decoder = GzDecoder::new(file);
    let mut tmp = NamedTempFile::new()?;
    std::io::copy(&mut decoder, &mut tmp)
        .with_context(|| format!("decompress {}", path.display()))?;
    Ok(tmp)
}

/// Writes `df` as tab-separated text with a header row, overwriting `path`.
pub fn write_dataframe(df: &DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut csv = CsvWriter::new(&mut file).with_separator(b'\t');
    let mut df = df.clone();
    csv.finish(&mut df)?;
    Ok(())
}
