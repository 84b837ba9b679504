//! Value formatting
//!
//! Renders stored values as display strings. Formatting never mutates the
//! stored value, only the display string derived from it.

use crate::cell::CellValue;

/// Presentational number format for a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellFormat {
    /// No formatting; the value renders as-is
    #[default]
    None,
    /// Fixed two-decimal number with digit grouping
    Number,
    /// Two-decimal number with digit grouping and the currency symbol
    Currency,
    /// Value times 100 with one decimal and a trailing `%`
    Percent,
}

/// Locale conventions used when rendering numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// Decimal separator
    pub decimal_sep: char,
    /// Digit grouping separator
    pub group_sep: char,
    /// Currency symbol
    pub currency_symbol: String,
    /// Whether the currency symbol precedes the amount
    pub currency_prefix: bool,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            decimal_sep: '.',
            group_sep: ',',
            currency_symbol: "$".to_string(),
            currency_prefix: true,
        }
    }
}

/// Render `value` under `format`
///
/// For the numeric formats the value is first parsed as a decimal number; a
/// value with no numeric view passes through verbatim.
pub fn format_value(value: &CellValue, format: CellFormat, locale: &Locale) -> String {
    match (format, value.as_number()) {
        (CellFormat::Number, Some(n)) => grouped(n, 2, locale),
        (CellFormat::Currency, Some(n)) => {
            let amount = grouped(n, 2, locale);
            if locale.currency_prefix {
                format!("{}{}", locale.currency_symbol, amount)
            } else {
                format!("{}{}", amount, locale.currency_symbol)
            }
        }
        (CellFormat::Percent, Some(n)) => format!("{}%", fixed(n * 100.0, 1, locale)),
        // No format, or a value with no numeric view: render as-is
        (CellFormat::None, _) | (_, None) => value.to_string(),
    }
}

/// Fixed-decimal rendering with the locale's decimal separator
fn fixed(n: f64, decimals: usize, locale: &Locale) -> String {
    let s = format!("{:.*}", decimals, n);
    if locale.decimal_sep == '.' {
        s
    } else {
        s.replace('.', &locale.decimal_sep.to_string())
    }
}

/// Fixed-decimal rendering with digit grouping
fn grouped(n: f64, decimals: usize, locale: &Locale) -> String {
    let s = format!("{:.*}", decimals, n);
    let (sign, s) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };

    let mut out = String::with_capacity(s.len() + sign.len() + int_part.len() / 3);
    out.push_str(sign);
    let digits = int_part.as_bytes();
    for (i, b) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(locale.group_sep);
        }
        out.push(*b as char);
    }
    if let Some(frac) = frac_part {
        out.push(locale.decimal_sep);
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fmt(value: &CellValue, format: CellFormat) -> String {
        format_value(value, format, &Locale::default())
    }

    #[test]
    fn test_none_passthrough() {
        assert_eq!(fmt(&CellValue::Number(0.5), CellFormat::None), "0.5");
        assert_eq!(fmt(&CellValue::Text("hi".into()), CellFormat::None), "hi");
        assert_eq!(fmt(&CellValue::Error, CellFormat::None), "#ERROR");
    }

    #[test]
    fn test_number() {
        assert_eq!(fmt(&CellValue::Number(1234.5), CellFormat::Number), "1,234.50");
        assert_eq!(fmt(&CellValue::Number(-1234.5), CellFormat::Number), "-1,234.50");
        assert_eq!(fmt(&CellValue::Number(0.126), CellFormat::Number), "0.13");
        assert_eq!(
            fmt(&CellValue::Number(1_000_000.0), CellFormat::Number),
            "1,000,000.00"
        );
        // Parseable text formats like a number
        assert_eq!(fmt(&CellValue::Text("7".into()), CellFormat::Number), "7.00");
    }

    #[test]
    fn test_currency() {
        assert_eq!(fmt(&CellValue::Number(1234.5), CellFormat::Currency), "$1,234.50");
        assert_eq!(fmt(&CellValue::Number(-2.0), CellFormat::Currency), "$-2.00");
    }

    #[test]
    fn test_currency_suffix_locale() {
        let locale = Locale {
            decimal_sep: ',',
            group_sep: ' ',
            currency_symbol: " kr".to_string(),
            currency_prefix: false,
        };
        assert_eq!(
            format_value(&CellValue::Number(1234.5), CellFormat::Currency, &locale),
            "1 234,50 kr"
        );
    }

    #[test]
    fn test_percent() {
        assert_eq!(fmt(&CellValue::Number(0.5), CellFormat::Percent), "50.0%");
        assert_eq!(fmt(&CellValue::Number(1.0), CellFormat::Percent), "100.0%");
        assert_eq!(fmt(&CellValue::Number(0.333), CellFormat::Percent), "33.3%");
    }

    #[test]
    fn test_unparsable_passthrough() {
        assert_eq!(fmt(&CellValue::Text("abc".into()), CellFormat::Number), "abc");
        assert_eq!(fmt(&CellValue::Text("abc".into()), CellFormat::Percent), "abc");
        assert_eq!(fmt(&CellValue::Error, CellFormat::Currency), "#ERROR");
    }
}
