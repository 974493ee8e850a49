//! Terminal styles for tooltip output.
//!
//! Code refers to styles by what they mark (a name, a badge, a value boosted
//! by temporary points), never by colour. All of them are built once.

use console::Style;
use once_cell::sync::Lazy;

pub static NAME: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static CAPTION: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static BADGE: Lazy<Style> = Lazy::new(|| Style::new().yellow().bold());
pub static VALUE: Lazy<Style> = Lazy::new(Style::new);
pub static TEMP: Lazy<Style> = Lazy::new(|| Style::new().green().bold());
pub static UNITS: Lazy<Style> = Lazy::new(|| Style::new().dim().italic());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static SEPARATOR: Lazy<Style> = Lazy::new(|| Style::new().color256(240));
