//! # Attribute Values
//!
//! Game systems store the numbers a tooltip shows in wildly different shapes.
//! Hit points may be `{value, max, temp, tempmax}`, armor class may be a bare
//! number or `{total}`, damage resistances are arrays of strings, and movement
//! carries `units`. This module turns all of them into one canonical form.
//!
//! ## Pipeline
//!
//! | Stage | Function | Output |
//! |-------|----------|--------|
//! | Normalize | [`normalize`] | [`NormalizedValue`] or `None` |
//! | Format | [`format_value`] | [`FormattedValue`] (strings + temp flags) |
//!
//! `None` from [`normalize`] means "nothing to show": the caller drops the row.
//!
//! ## Accepted Shapes
//!
//! | Raw | Normalized |
//! |-----|------------|
//! | `7`, `"Darkvision"` | `{value}` |
//! | `["fire", "cold"]` | `{value: "fire, cold"}` |
//! | `{total: 15, value: 12}` | `{value: 15}` |
//! | `{value: 5, max: 10, temp: 3}` | `{value: 5, max: 10, temp: 3}` |
//! | `{max: 10}` | `{value: 0, max: 10}` |
//! | `null`, `""`, `false`, `{}` | `None` |

mod display;
mod normalize;
mod value;

pub use display::{format_number, format_value, FormattedPart, FormattedValue};
pub use normalize::{is_valid, normalize, number_like};
pub use value::{DisplayValue, NormalizedValue};
