//! Canonical attribute value types.
//!
//! Numbers display in plain positional notation at every magnitude: `1e21`
//! prints as `1000000000000000000000` and `1e-7` as `0.0000001`, never in
//! exponent form like `1e+21`.

use serde::Serialize;
use std::fmt;

/// A single displayable scalar.
///
/// Arrays never survive normalization: they are joined into [`DisplayValue::Text`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Number(f64),
    Text(String),
}

impl DisplayValue {
    /// `false` for `0` and the empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            DisplayValue::Number(n) => *n != 0.0 && !n.is_nan(),
            DisplayValue::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Number(n) => write!(f, "{}", n),
            DisplayValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for DisplayValue {
    fn from(n: f64) -> Self {
        DisplayValue::Number(n)
    }
}

impl From<i64> for DisplayValue {
    fn from(n: i64) -> Self {
        DisplayValue::Number(n as f64)
    }
}

impl From<&str> for DisplayValue {
    fn from(s: &str) -> Self {
        DisplayValue::Text(s.to_string())
    }
}

impl From<String> for DisplayValue {
    fn from(s: String) -> Self {
        DisplayValue::Text(s)
    }
}

/// Display-ready attribute.
///
/// `temp` and `tempmax` are only set when both they and their paired value
/// parse as numbers; `units` only when the raw attribute carried a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedValue {
    pub value: DisplayValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<DisplayValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempmax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl NormalizedValue {
    pub fn new(value: impl Into<DisplayValue>) -> Self {
        Self {
            value: value.into(),
            max: None,
            temp: None,
            tempmax: None,
            units: None,
        }
    }

    pub fn with_max(mut self, max: impl Into<DisplayValue>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn with_temp(mut self, temp: f64) -> Self {
        self.temp = Some(temp);
        self
    }

    pub fn with_tempmax(mut self, tempmax: f64) -> Self {
        self.tempmax = Some(tempmax);
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }
}
