//! Ranks GO/BUSCO annotation terms by allele-frequency-gap evidence
//! aggregated over labeled SNP sets.
//!
//! The pipeline loads per-SNP AF_Gap reference tables and SNP-to-annotation
//! intersection tables, joins them on a `chromosome:position` key, and writes
//! a summary of per-term confidence metrics.

pub mod error;
pub mod logging;

pub mod df_utils;
pub mod io;
pub mod qc;

pub mod afgap;
pub mod intersect;
pub mod summary;
