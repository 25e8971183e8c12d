use std::str::FromStr;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::{discount::discount_rate, records::RawRecord};

/// Layout of the "Date d'application du prix" column.
pub const APPLIED_AT_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Substitute for any text field left empty by the parser.
const MISSING_TEXT: &str = "0";

const MISTRAL_FAMILY_LEN: usize = 3;

/// One row of the working table, fully derived.
#[derive(Debug, PartialEq, Clone)]
pub struct PriceRow {
    /// Référence pièce
    pub reference: String,
    /// Description Pièces
    pub description: String,
    /// Type
    pub kind: String,
    /// Libre
    pub free: String,
    /// Date du prix
    pub price_date: i64,
    /// Prix tarif
    pub list_price: f64,
    /// Poids kg
    pub weight_kg: f64,
    /// Quantité, never zero.
    pub quantity: i64,
    /// Première ligne de produit
    pub product_line: String,
    /// Code remise
    pub discount_code: String,
    /// PCC
    pub pcc: String,
    /// MPC, numerically coerced then rendered as text.
    pub mpc: String,
    /// Famille Mistral
    pub mistral_family: String,
    /// Taux de remise, `None` when the code is not in the discount table.
    pub discount_rate: Option<f64>,
    /// Prix net, `None` exactly when `discount_rate` is.
    pub net_price: Option<f64>,
    /// Date d'application du prix
    pub applied_at: String,
}

pub fn transform_records(records: Vec<RawRecord>, applied_at: NaiveDateTime) -> Vec<PriceRow> {
    let applied_at = applied_at.format(APPLIED_AT_FORMAT).to_string();

    let rows: Vec<PriceRow> = records
        .into_iter()
        .map(|record| transform_record(record, &applied_at))
        .collect();

    let unmatched = rows.iter().filter(|r| r.discount_rate.is_none()).count();
    info!(rows = rows.len(), unmatched, "discount rates applied");

    rows
}

pub fn transform_record(record: RawRecord, applied_at: &str) -> PriceRow {
    let price_date = parse_integer(&record.price_date);
    let price_cents = parse_decimal(&record.price_cents);
    let weight_grams = parse_decimal(&record.weight_grams);
    let quantity = parse_integer(&record.quantity);
    let mpc = parse_decimal(&record.mpc);

    let discount_code = fill_missing(record.discount_code);
    let mpc = mpc.to_string();
    let mistral_family = mpc.chars().take(MISTRAL_FAMILY_LEN).collect();

    let list_price = price_cents / 100.0;
    let discount_rate = discount_rate(&discount_code);
    if discount_rate.is_none() {
        debug!(reference = %record.reference, code = %discount_code, "no discount rate");
    }
    let net_price = discount_rate.map(|rate| round_2dp(list_price * (1.0 - rate)));

    PriceRow {
        reference: fill_missing(record.reference),
        description: fill_missing(record.description),
        kind: fill_missing(record.kind),
        free: fill_missing(record.free),
        price_date,
        list_price,
        weight_kg: weight_grams / 1000.0,
        quantity: if quantity == 0 { 1 } else { quantity },
        product_line: fill_missing(record.product_line),
        discount_code,
        pcc: fill_missing(record.pcc),
        mpc,
        mistral_family,
        discount_rate,
        net_price,
        applied_at: applied_at.to_owned(),
    }
}

/// Parses a numeric field, yielding zero for anything unparsable.
pub fn parse_or_zero<T: FromStr + Default>(text: &str) -> T {
    text.trim().parse().unwrap_or_default()
}

fn parse_decimal(text: &str) -> f64 {
    let value: f64 = parse_or_zero(text);
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// Accepts any numeric text ("2", "2.0", "2e0"); a fractional part is dropped.
fn parse_integer(text: &str) -> i64 {
    match text.trim().parse::<i64>() {
        Ok(value) => value,
        Err(_) => parse_decimal(text).trunc() as i64,
    }
}

fn fill_missing(text: String) -> String {
    if text.is_empty() {
        MISSING_TEXT.to_owned()
    } else {
        text
    }
}

/// Rounds half to even on the second decimal.
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
