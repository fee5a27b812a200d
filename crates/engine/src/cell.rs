use serde::{Deserialize, Serialize};

/// A single cell's value.
///
/// Closed variant: profiling, visibility checks and consolidation all go
/// through [`CellValue::canonical_string`], so every component agrees on
/// what a cell "reads as".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl CellValue {
    /// Coerce raw textual input (CSV field, user entry) into a typed value.
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Bool(false);
        }

        if let Ok(num) = trimmed.parse::<f64>() {
            return CellValue::Number(num);
        }

        CellValue::Text(trimmed.to_string())
    }

    /// Canonical string form. Numbers render without a trailing `.0` when
    /// fractionless; booleans render as spreadsheets display them.
    pub fn canonical_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }

    /// True when the cell reads as empty: `Empty` itself, or text that is
    /// all whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_coercion() {
        assert_eq!(CellValue::from_input("  "), CellValue::Empty);
        assert_eq!(CellValue::from_input("42"), CellValue::Number(42.0));
        assert_eq!(CellValue::from_input("-1.5"), CellValue::Number(-1.5));
        assert_eq!(CellValue::from_input("TRUE"), CellValue::Bool(true));
        assert_eq!(CellValue::from_input("false"), CellValue::Bool(false));
        assert_eq!(
            CellValue::from_input(" East "),
            CellValue::Text("East".to_string())
        );
    }

    #[test]
    fn canonical_strings() {
        assert_eq!(CellValue::Empty.canonical_string(), "");
        assert_eq!(CellValue::Number(42.0).canonical_string(), "42");
        assert_eq!(CellValue::Number(42.5).canonical_string(), "42.5");
        assert_eq!(CellValue::Bool(true).canonical_string(), "TRUE");
        assert_eq!(
            CellValue::Text("a b".to_string()).canonical_string(),
            "a b"
        );
    }

    #[test]
    fn blank_detection() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("   ".to_string()).is_blank());
        assert!(!CellValue::Text("x".to_string()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(!CellValue::Bool(false).is_blank());
    }
}
