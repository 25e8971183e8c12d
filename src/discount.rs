/// CNH discount codes and the rate each one takes off the list price.
pub const DISCOUNT_RATES: [(&str, f64); 14] = [
    ("A", 0.50),
    ("B", 0.44),
    ("C", 0.40),
    ("D", 0.30),
    ("E", 0.30),
    ("F", 0.30),
    ("G", 0.40),
    ("H", 0.25),
    ("I", 0.15),
    ("K", 0.46),
    ("M", 0.24),
    ("Z", 0.00),
    ("1", 0.38),
    ("2", 0.45),
];

/// Looks up the rate for a discount code. Unknown codes have no rate.
pub fn discount_rate(code: &str) -> Option<f64> {
    DISCOUNT_RATES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|&(_, rate)| rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(discount_rate("A"), Some(0.50));
        assert_eq!(discount_rate("K"), Some(0.46));
        assert_eq!(discount_rate("Z"), Some(0.00));
        assert_eq!(discount_rate("2"), Some(0.45));
    }

    #[test]
    fn unknown_codes_have_no_rate() {
        for code in ["J", "L", "N", "Y", "a", "0", "", "AB"] {
            assert_eq!(discount_rate(code), None, "code {code:?}");
        }
    }

    #[test]
    fn rates_are_fractions() {
        assert!(DISCOUNT_RATES
            .iter()
            .all(|&(_, rate)| (0.0..=1.0).contains(&rate)));
    }
}
