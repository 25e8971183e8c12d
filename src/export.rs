use serde::{Serialize, Serializer};
use std::io;

use crate::{
    error::{Result, TariffError},
    transform::PriceRow,
};

pub const BO_FILE_NAME: &str = "import-prix-bo.csv";
pub const AGRI_FILE_NAME: &str = "import-prix-article-pole-agri.csv";

/// Identifier of CNH in both downstream systems.
pub const SUPPLIER_ID: u32 = 102;

const DELIMITER: u8 = b';';

pub const BO_HEADER: [&str; 6] = [
    "Identifiant fournisseur",
    "Référence fournisseur",
    "Prix d'achat HT",
    "Date d'application du prix",
    "Prix de vente public",
    "Poids",
];

pub const AGRI_HEADER: [&str; 6] = [
    "Référence - Fournisseur (identifiant)",
    "Référence - Référence Fournisseur",
    "Prix d'achat",
    "Prix tarif",
    "Conditionnement d'achat",
    "Poids",
];

#[derive(Debug, Serialize, PartialEq)]
pub struct BoRow<'a> {
    pub supplier_id: u32,
    pub supplier_reference: &'a str,
    #[serde(serialize_with = "serialize_optional_decimal")]
    pub purchase_price: Option<f64>,
    pub applied_at: &'a str,
    #[serde(serialize_with = "serialize_decimal")]
    pub public_price: f64,
    #[serde(serialize_with = "serialize_decimal")]
    pub weight: f64,
}

impl<'a> From<&'a PriceRow> for BoRow<'a> {
    fn from(row: &'a PriceRow) -> Self {
        BoRow {
            supplier_id: SUPPLIER_ID,
            supplier_reference: &row.reference,
            purchase_price: row.net_price,
            applied_at: &row.applied_at,
            public_price: row.list_price,
            weight: row.weight_kg,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AgriRow<'a> {
    pub supplier_id: u32,
    pub supplier_reference: &'a str,
    #[serde(serialize_with = "serialize_optional_decimal")]
    pub purchase_price: Option<f64>,
    #[serde(serialize_with = "serialize_decimal")]
    pub list_price: f64,
    pub purchase_packaging: i64,
    #[serde(serialize_with = "serialize_decimal")]
    pub weight: f64,
}

impl<'a> From<&'a PriceRow> for AgriRow<'a> {
    fn from(row: &'a PriceRow) -> Self {
        AgriRow {
            supplier_id: SUPPLIER_ID,
            supplier_reference: &row.reference,
            purchase_price: row.net_price,
            list_price: row.list_price,
            purchase_packaging: row.quantity,
            weight: row.weight_kg,
        }
    }
}

pub fn export_bo(rows: &[PriceRow]) -> Result<Vec<u8>> {
    write_export(&BO_HEADER, rows.iter().map(BoRow::from))
}

pub fn export_agri(rows: &[PriceRow]) -> Result<Vec<u8>> {
    write_export(&AGRI_HEADER, rows.iter().map(AgriRow::from))
}

/// Writes a header line and one `;`-separated line per row, Latin-1 encoded.
fn write_export<T, I>(header: &[&str], rows: I) -> Result<Vec<u8>>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(csv::Terminator::CRLF)
        .has_headers(false)
        .from_writer(Vec::new());

    wtr.write_record(header)?;
    for row in rows {
        wtr.serialize(row)?;
    }

    let buf = wtr.into_inner().map_err(|e| e.into_error())?;
    let text =
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    encode_latin1(&text)
}

/// Encodes `text` as ISO-8859-1, failing on the first character outside it.
pub fn encode_latin1(text: &str) -> Result<Vec<u8>> {
    let mut row = 0;
    let mut out = Vec::with_capacity(text.len());

    for ch in text.chars() {
        if ch == '\n' {
            row += 1;
        }
        let byte = u8::try_from(ch).map_err(|_| TariffError::Unencodable { ch, row })?;
        out.push(byte);
    }

    Ok(out)
}

/// Shortest form, keeping one decimal on whole numbers (`15.0`, `2.5`).
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn serialize_decimal<S>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_decimal(*value))
}

fn serialize_optional_decimal<S>(
    value: &Option<f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serialize_decimal(value, serializer),
        None => serializer.serialize_none(),
    }
}
