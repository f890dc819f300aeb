//! Field probing over loosely shaped JSON records.
//!
//! Records exported from the backend use several spellings for the same
//! field and mix numbers, numeric strings and nulls. These helpers give the
//! adapters in this module tree a single place to coalesce field variants,
//! coerce numbers and parse dates without ever failing.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

/// First of `names` whose value is present and not null.
pub fn first_present<'a>(record: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| record.get(*name))
        .find(|value| !value.is_null())
}

/// First of `names` whose value is truthy.
pub fn first_populated<'a>(record: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| record.get(*name))
        .find(|value| is_populated(value))
}

/// Truthiness of a loosely typed value: null, false, 0 and "" are empty.
pub fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Outcome of coercing a loosely typed value to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberCoercion {
    Exact(Decimal),
    /// A real number outside the `Decimal` range, saturated to its nearest bound.
    Clamped(Decimal),
    NotANumber,
}

impl NumberCoercion {
    pub fn value(self) -> Option<Decimal> {
        match self {
            NumberCoercion::Exact(value) | NumberCoercion::Clamped(value) => Some(value),
            NumberCoercion::NotANumber => None,
        }
    }
}

/// Numeric coercion with `Number(...)` semantics.
///
/// Booleans become 1/0, null and blank strings 0, numeric strings (including
/// exponent notation) their value. Magnitudes beyond `Decimal` saturate to
/// `Decimal::MAX`/`Decimal::MIN`. Arrays, objects and unparseable strings are
/// NaN.
pub fn coerce(value: &Value) -> NumberCoercion {
    match value {
        Value::Null | Value::Bool(false) => NumberCoercion::Exact(Decimal::ZERO),
        Value::Bool(true) => NumberCoercion::Exact(Decimal::ONE),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                NumberCoercion::Exact(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                NumberCoercion::Exact(Decimal::from(u))
            } else {
                n.as_f64()
                    .map(coerce_float)
                    .unwrap_or(NumberCoercion::NotANumber)
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return NumberCoercion::Exact(Decimal::ZERO);
            }
            if let Ok(value) =
                Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed))
            {
                return NumberCoercion::Exact(value);
            }
            match trimmed.parse::<f64>() {
                Ok(f) if f.is_finite() || is_infinity_literal(trimmed) => coerce_float(f),
                _ => NumberCoercion::NotANumber,
            }
        }
        Value::Array(_) | Value::Object(_) => NumberCoercion::NotANumber,
    }
}

/// [`coerce`] with out-of-range values saturated. `None` stands for NaN.
pub fn coerce_number(value: &Value) -> Option<Decimal> {
    coerce(value).value()
}

fn coerce_float(f: f64) -> NumberCoercion {
    if f.is_nan() {
        return NumberCoercion::NotANumber;
    }
    match Decimal::from_f64(f) {
        Some(value) => NumberCoercion::Exact(value),
        None if f > 0.0 => NumberCoercion::Clamped(Decimal::MAX),
        None => NumberCoercion::Clamped(Decimal::MIN),
    }
}

/// Rust's float parser also takes `inf` and `nan`; only `Infinity` and
/// overflowing exponents count as infinite here.
fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.trim_start_matches(|c| c == '+' || c == '-');
    if unsigned == "Infinity" {
        return true;
    }
    let lower = unsigned.to_ascii_lowercase();
    !lower.contains("inf") && !lower.contains("nan")
}

/// Text form of a string or number field; empty strings count as absent.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Text of the first present field among `names`.
pub fn first_text(record: &Value, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| record.get(*name))
        .find_map(text)
}

/// Parses a date field, returning `None` for anything that is not a date.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.f]` and
/// `YYYY-MM-DD HH:MM:SS` (read as UTC), plain `YYYY-MM-DD` (UTC midnight)
/// and numbers as epoch milliseconds.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        _ => None,
    }
}

pub fn parse_date_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Date of the first populated field among `names`.
pub fn first_date(record: &Value, names: &[&str]) -> Option<DateTime<Utc>> {
    first_populated(record, names).and_then(parse_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn first_present_skips_nulls_but_not_zero() {
        let record = json!({ "quantity_required": null, "required_qty": 0, "quantity": 4 });
        let value = first_present(&record, &["quantity_required", "required_qty", "quantity"]);
        assert_eq!(value, Some(&json!(0)));
    }

    #[test]
    fn first_populated_skips_empty_values() {
        let record = json!({ "purchase_order_id": "", "linked_po_id": null, "po_id": "po-7" });
        let value = first_populated(
            &record,
            &["purchase_order_id", "linked_po_id", "po_id", "purchase_order_line_id"],
        );
        assert_eq!(value, Some(&json!("po-7")));
    }

    #[test]
    fn coerces_like_number() {
        assert_eq!(coerce_number(&json!(3)), Some(dec!(3)));
        assert_eq!(coerce_number(&json!(2.5)), Some(dec!(2.5)));
        assert_eq!(coerce_number(&json!(" 7 ")), Some(dec!(7)));
        assert_eq!(coerce_number(&json!("")), Some(Decimal::ZERO));
        assert_eq!(coerce_number(&json!("1e2")), Some(dec!(100)));
        assert_eq!(coerce_number(&json!(true)), Some(Decimal::ONE));
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!([1])), None);
    }

    #[test]
    fn out_of_range_numbers_saturate() {
        assert_eq!(coerce(&json!(1e30)), NumberCoercion::Clamped(Decimal::MAX));
        assert_eq!(coerce(&json!(-1e30)), NumberCoercion::Clamped(Decimal::MIN));
        assert_eq!(coerce(&json!("1e30")), NumberCoercion::Clamped(Decimal::MAX));
        assert_eq!(coerce(&json!("1e400")), NumberCoercion::Clamped(Decimal::MAX));
        assert_eq!(coerce(&json!("-Infinity")), NumberCoercion::Clamped(Decimal::MIN));
        assert_eq!(coerce(&json!(5e28)).value().map(|v| v > dec!(0)), Some(true));
        assert_eq!(coerce(&json!("inf")), NumberCoercion::NotANumber);
        assert_eq!(coerce(&json!("NaN")), NumberCoercion::NotANumber);
    }

    #[test]
    fn parses_common_date_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date(&json!("2024-03-01")), Some(expected));
        assert_eq!(parse_date(&json!("2024-03-01T00:00:00Z")), Some(expected));
        assert_eq!(parse_date(&json!("2024-03-01T00:00:00")), Some(expected));
        assert_eq!(parse_date(&json!("2024-03-01T10:00:00+10:00")), Some(expected));
        assert_eq!(parse_date(&json!(expected.timestamp_millis())), Some(expected));
    }

    #[test]
    fn invalid_dates_are_absent() {
        assert_eq!(parse_date(&json!("soon")), None);
        assert_eq!(parse_date(&json!("")), None);
        assert_eq!(parse_date(&json!("2024-13-45")), None);
        assert_eq!(parse_date(&json!(null)), None);
        assert_eq!(parse_date(&json!({ "date": "2024-01-01" })), None);
    }

    #[test]
    fn text_accepts_numbers() {
        let record = json!({ "po_number": 1042, "reference": "REF" });
        assert_eq!(first_text(&record, &["po_number", "reference"]), Some("1042".into()));
        assert_eq!(first_text(&json!({ "name": "" }), &["name"]), None);
    }
}
