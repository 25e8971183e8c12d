use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::{
    error::Result,
    export::{export_agri, export_bo},
    locator::latest_tariff_file,
    records::read_tariff,
    transform::transform_records,
};

/// Both export files of one run, already encoded.
#[derive(Debug)]
pub struct Exports {
    /// Tariff file the exports were built from.
    pub source: PathBuf,
    pub rows: usize,
    pub bo: Vec<u8>,
    pub agri: Vec<u8>,
}

/// Runs the whole tariff conversion over the newest `.txt` file in `dir`.
pub fn run<P: AsRef<Path>>(dir: P) -> Result<Exports> {
    run_at(dir, Local::now().naive_local())
}

pub fn run_at<P: AsRef<Path>>(dir: P, applied_at: NaiveDateTime) -> Result<Exports> {
    let source = latest_tariff_file(dir)?;
    info!(file = %source.display(), "latest tariff file");

    let records = read_tariff(&source)?;
    info!(rows = records.len(), "tariff file loaded");

    let rows = transform_records(records, applied_at);
    let bo = export_bo(&rows)?;
    let agri = export_agri(&rows)?;

    Ok(Exports {
        source,
        rows: rows.len(),
        bo,
        agri,
    })
}
