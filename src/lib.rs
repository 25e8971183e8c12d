//! # cnh-tariff
//!
//! Turns a CNH fixed-width supplier tariff into the two semicolon-separated
//! price import files used by the BO and Agri back offices.
//!
//! The work is a straight pipeline:
//! - **locate** the newest `.txt` tariff in a directory
//! - **parse** its fixed-width lines into raw records
//! - **transform** them: numeric coercion, unit scaling, discount lookup,
//!   net price
//! - **export** two Latin-1 CSV projections of the resulting table
//!
//! ```no_run
//! let exports = cnh_tariff::run("/srv/tarifs/cnh")?;
//! std::fs::write(cnh_tariff::BO_FILE_NAME, &exports.bo)?;
//! std::fs::write(cnh_tariff::AGRI_FILE_NAME, &exports.agri)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod discount;
pub mod error;
pub mod export;
pub mod locator;
pub mod pipeline;
pub mod records;
pub mod transform;

pub use discount::{discount_rate, DISCOUNT_RATES};
pub use error::{Result, TariffError};
pub use export::{export_agri, export_bo, AGRI_FILE_NAME, BO_FILE_NAME};
pub use locator::latest_tariff_file;
pub use pipeline::{run, run_at, Exports};
pub use records::{read_tariff, RawRecord, COLUMN_SPECS};
pub use transform::{transform_records, PriceRow};
