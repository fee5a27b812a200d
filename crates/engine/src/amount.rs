//! Amount normalization: raw cell value to a numeric amount.
//!
//! Total function — unparseable input yields 0, never an error, so that
//! aggregation can never fail mid-sum.

use crate::cell::CellValue;

/// Currency unit codes stripped case-insensitively before parsing.
const UNIT_CODES: [&str; 14] = [
    "USD", "EUR", "JPY", "GBP", "CNY", "RMB", "AUD", "CAD", "CHF", "HKD",
    "SGD", "KRW", "NZD", "TWD",
];

/// Currency symbols, including full-width variants.
const SYMBOLS: [char; 10] = ['$', '＄', '¢', '¥', '￥', '€', '£', '￡', '₩', '￦'];

/// Normalize a cell to a numeric amount. Empty and unparseable cells
/// read as 0.
pub fn normalize_amount(value: &CellValue) -> f64 {
    match value {
        CellValue::Empty => 0.0,
        _ => parse_amount(value).unwrap_or(0.0),
    }
}

/// Like [`normalize_amount`] but distinguishes "unparseable" from "zero":
/// returns `None` for empty cells, NaN numbers and strings that carry no
/// digits after cleanup.
pub fn parse_amount(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Empty => None,
        CellValue::Number(n) => {
            if n.is_nan() {
                None
            } else {
                Some(*n)
            }
        }
        other => parse_amount_text(&other.canonical_string()),
    }
}

fn parse_amount_text(raw: &str) -> Option<f64> {
    let mut s = raw.trim().to_string();
    if s.is_empty() {
        return None;
    }

    for code in UNIT_CODES {
        s = strip_token_ci(&s, code);
    }
    s.retain(|c| !SYMBOLS.contains(&c));

    // Thousands separators, half- and full-width
    s.retain(|c| c != ',' && c != '，');
    s.retain(|c| !c.is_whitespace());

    // Only a single leading minus is significant; anything else is noise
    let negative = s.starts_with('-');
    if negative {
        s.remove(0);
    }

    s.retain(|c| c.is_ascii_digit() || c == '.');
    let cleaned = keep_first_period(&s);

    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(if negative { -n } else { n }),
        _ => None,
    }
}

/// Remove every case-insensitive occurrence of an ASCII token.
fn strip_token_ci(s: &str, token: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let token: Vec<char> = token.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        if i + token.len() <= chars.len()
            && chars[i..i + token.len()]
                .iter()
                .zip(&token)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
        {
            i += token.len();
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Keep the first period, drop every later one (digits are kept).
fn keep_first_period(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut seen = false;
    for c in s.chars() {
        if c == '.' {
            if seen {
                continue;
            }
            seen = true;
        }
        out.push(c);
    }
    out
}
