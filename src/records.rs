use std::{fs, path::Path};

use crate::error::Result;

/// Half-open byte ranges of the 14 fields of a CNH tariff line.
pub const COLUMN_SPECS: [(usize, usize); 14] = [
    (0, 18),
    (18, 58),
    (58, 59),
    (59, 60),
    (60, 68),
    (68, 79),
    (79, 92),
    (92, 97),
    (97, 101),
    (101, 102),
    (102, 107),
    (107, 112),
    (112, 113),
    (113, 116),
];

/// Lines consumed before the first data row.
const HEADER_LINES: usize = 1;

/// One data line of the tariff file, sliced but not yet typed.
///
/// Every field is trimmed; a field beyond the end of a short line is empty.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct RawRecord {
    pub reference: String,
    pub description: String,
    pub kind: String,
    pub free: String,
    pub price_date: String,
    pub price_cents: String,
    pub weight_grams: String,
    pub quantity: String,
    pub product_line: String,
    pub discount_code: String,
    pub pcc: String,
    pub mpc: String,
    pub column13: String,
    pub column14: String,
}

pub fn read_tariff<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let content = fs::read(path)?;
    Ok(parse_tariff(&content))
}

/// Parses the whole file body, header included.
pub fn parse_tariff(content: &[u8]) -> Vec<RawRecord> {
    content
        .split(|&b| b == b'\n')
        .skip(HEADER_LINES)
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(parse_line)
        .collect()
}

pub fn parse_line(line: &[u8]) -> RawRecord {
    let [
        reference,
        description,
        kind,
        free,
        price_date,
        price_cents,
        weight_grams,
        quantity,
        product_line,
        discount_code,
        pcc,
        mpc,
        column13,
        column14,
    ] = COLUMN_SPECS.map(|(start, end)| slice_field(line, start, end));

    RawRecord {
        reference,
        description,
        kind,
        free,
        price_date,
        price_cents,
        weight_grams,
        quantity,
        product_line,
        discount_code,
        pcc,
        mpc,
        column13,
        column14,
    }
}

fn slice_field(line: &[u8], start: usize, end: usize) -> String {
    let start = start.min(line.len());
    let end = end.min(line.len());
    decode(&line[start..end]).trim().to_owned()
}

// Legacy exports are Latin-1; newer ones may arrive as UTF-8.
fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
