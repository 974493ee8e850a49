//! Raw attribute normalization.

use serde_json::{Map, Value};

use super::value::{DisplayValue, NormalizedValue};

const PERCENT_KEY_SUFFIX: &str = ".pct";

/// Convert a raw attribute into its display-ready form.
///
/// `key` is the attribute path the value was read from; numbers read from a
/// path ending in `.pct` are rendered as percentages.
///
/// Returns `None` when there is nothing worth displaying.
pub fn normalize(attribute: &Value, key: Option<&str>) -> Option<NormalizedValue> {
    if attribute.is_null() {
        return None;
    }

    if is_valid(attribute) {
        return Some(NormalizedValue::new(scalar_display(attribute, key)));
    }

    match attribute {
        Value::Object(fields) => normalize_object(fields),
        _ => None,
    }
}

fn normalize_object(fields: &Map<String, Value>) -> Option<NormalizedValue> {
    let valid_field = |name: &str| fields.get(name).filter(|v| is_valid(v));

    let max = valid_field("max");
    let current = if let Some(total) = valid_field("total") {
        total.clone()
    } else if let Some(value) = valid_field("value") {
        if value.is_array() {
            // Sibling max/temp/units are dropped for list-valued attributes.
            return normalize(value, None);
        }
        value.clone()
    } else if max.is_some() {
        Value::from(0)
    } else {
        return None;
    };

    let temp = number_like(&current).and(fields.get("temp").and_then(number_like));
    let tempmax = max
        .and_then(number_like)
        .and(fields.get("tempmax").and_then(number_like));
    let units = fields.get("units").and_then(Value::as_str).map(String::from);

    Some(NormalizedValue {
        value: scalar_display(&current, None),
        max: max.map(|m| scalar_display(m, None)),
        temp,
        tempmax,
        units,
    })
}

/// A value is valid when it is a non-empty string, a finite number, or a
/// non-empty array made only of such scalars.
pub fn is_valid(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty() && items.iter().all(is_valid_scalar),
        other => is_valid_scalar(other),
    }
}

fn is_valid_scalar(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| !f.is_nan()),
        _ => false,
    }
}

/// Only called on values that passed [`is_valid`].
fn scalar_display(value: &Value, key: Option<&str>) -> DisplayValue {
    match value {
        Value::Array(items) => DisplayValue::Text(
            items
                .iter()
                .map(|item| scalar_display(item, None).to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Number(n) => {
            let n = n.as_f64().unwrap_or_default();
            match key {
                Some(k) if k.ends_with(PERCENT_KEY_SUFFIX) => DisplayValue::Text(format_percent(n)),
                _ => DisplayValue::Number(n),
            }
        }
        Value::String(s) => DisplayValue::Text(s.clone()),
        other => DisplayValue::Text(other.to_string()),
    }
}

/// Two decimals at most, trailing zeros dropped: `12.345` -> `12.35%`, `50` -> `50%`.
///
/// Ties round away from zero, so `0.125` -> `0.13%`.
fn format_percent(n: f64) -> String {
    let scaled = n * 100.0;
    // Only multiples of 1/8 sit exactly on a tie; everything else rounds on its
    // exact decimal expansion.
    let rounded = if scaled.fract().abs() == 0.5 && (n * 8.0).fract() == 0.0 {
        scaled.round() / 100.0
    } else {
        format!("{:.2}", n).parse().unwrap_or(n)
    };
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}%", rounded)
}

/// Parse a raw value the way a loose float parser would: numbers pass through,
/// strings are read up to the first character that cannot continue a float,
/// arrays are read from their comma-joined text.
pub fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(",");
            parse_float_prefix(&joined)
        }
        Value::Null | Value::Bool(_) | Value::Object(_) => None,
    }
}

/// Longest leading float in `input`, ignoring leading whitespace.
pub(crate) fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s[end..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
        } else if int_digits == 0 {
            return None;
        }
    } else if int_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
