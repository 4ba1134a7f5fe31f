use std::path::Path;

use polars::prelude::DataFrame;

use crate::error::{GoOverlapError, Result};

pub fn check_file_exists(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        return Err(GoOverlapError::InvalidArgument(format!(
            "File {path:?} passed to {name} does not exist"
        )));
    }
    Ok(())
}

pub fn check_has_columns(df: &DataFrame, cols: &[&str], path: &Path) -> Result<()> {
    for col in cols {
        if df.column(col).is_err() {
            return Err(GoOverlapError::MissingColumn(format!(
                "{col} in {}",
                path.display()
            )));
        }
    }
    Ok(())
}
