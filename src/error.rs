use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TariffError {
    #[error("no .txt tariff file found in {}", dir.display())]
    NoMatchingFile { dir: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("character {ch:?} on export row {row} cannot be encoded as Latin-1")]
    Unencodable { ch: char, row: usize },

    #[error("output directory {} is the input directory", dir.display())]
    OutputIsInput { dir: PathBuf },
}

pub type Result<T> = std::result::Result<T, TariffError>;
