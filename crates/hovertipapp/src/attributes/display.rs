//! Formatting of normalized values into display text.
//!
//! Rules:
//! - `0.125`, `0.25` and `0.5` render as `⅛`, `¼` and `½` (challenge ratings, mostly).
//! - A nonzero temp modifier is added to its value and the part is flagged `has_temp`.
//! - Falsy non-numeric values render as `0`.
//! - `max` and `units` are omitted when falsy.

use serde::Serialize;

use super::normalize::parse_float_prefix;
use super::value::{DisplayValue, NormalizedValue};

/// One rendered number (current or max).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedPart {
    pub text: String,
    pub has_temp: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedValue {
    pub current: FormattedPart,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<FormattedPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl FormattedValue {
    /// Single-line text such as `12/20 ft`.
    pub fn plain(&self) -> String {
        let mut out = self.current.text.clone();
        if let Some(max) = &self.max {
            out.push('/');
            out.push_str(&max.text);
        }
        if let Some(units) = &self.units {
            out.push(' ');
            out.push_str(units);
        }
        out
    }
}

pub fn format_value(value: &NormalizedValue) -> FormattedValue {
    FormattedValue {
        current: with_temp(&value.value, value.temp),
        max: value
            .max
            .as_ref()
            .filter(|m| m.is_truthy())
            .map(|m| with_temp(m, value.tempmax)),
        units: value.units.clone().filter(|u| !u.is_empty()),
    }
}

fn with_temp(value: &DisplayValue, temp: Option<f64>) -> FormattedPart {
    match temp.filter(|t| *t != 0.0 && !t.is_nan()) {
        Some(t) => FormattedPart {
            text: format_number(nan_to_zero(value) + t),
            has_temp: true,
        },
        None => FormattedPart {
            text: format_plain(value),
            has_temp: false,
        },
    }
}

fn nan_to_zero(value: &DisplayValue) -> f64 {
    match value {
        DisplayValue::Number(n) if n.is_nan() => 0.0,
        DisplayValue::Number(n) => *n,
        DisplayValue::Text(s) => parse_float_prefix(s).unwrap_or(0.0),
    }
}

fn format_plain(value: &DisplayValue) -> String {
    match value {
        DisplayValue::Number(n) => format_number(*n),
        DisplayValue::Text(s) if s.is_empty() => "0".to_string(),
        DisplayValue::Text(s) => s.clone(),
    }
}

/// Renders common fractions as glyphs, everything else as plain decimal text.
pub fn format_number(n: f64) -> String {
    if n == 0.125 {
        "⅛".to_string()
    } else if n == 0.25 {
        "¼".to_string()
    } else if n == 0.5 {
        "½".to_string()
    } else {
        n.to_string()
    }
}
