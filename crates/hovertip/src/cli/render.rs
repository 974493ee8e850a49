//! Tooltip rendering for the terminal.
//!
//! Rows are split into columns of `rows_per_column`. Each cell is a caption
//! (the badge text when the row has one, the label otherwise) and a value.
//! Widths are measured with `unicode-width` before styling, so glyphs like `½`
//! and wide labels line up.

use hovertipapp::api::Tooltip;
use hovertipapp::assemble::DisplayRow;
use hovertipapp::attributes::FormattedPart;
use hovertipapp::config::TooltipSettings;
use hovertipapp::placement::{Anchor, Side};
use hovertipapp::source::Icon;
use unicode_width::UnicodeWidthStr;

use super::styles::{BADGE, CAPTION, MUTED, NAME, SEPARATOR, TEMP, UNITS, VALUE};

const NO_TOOLTIP: &str = "No tooltip";
const COLUMN_GAP: &str = "  │  ";

struct Cell {
    caption: String,
    caption_is_badge: bool,
    value: String,
    value_width: usize,
}

impl Cell {
    fn from_row(row: &DisplayRow) -> Self {
        let (caption, caption_is_badge) = match &row.icon {
            Icon::Badge(text) => (text.clone(), true),
            _ => (row.label.clone(), false),
        };
        let formatted = row.formatted();
        let mut value = styled_part(&formatted.current);
        if let Some(max) = &formatted.max {
            value.push('/');
            value.push_str(&styled_part(max));
        }
        if let Some(units) = &formatted.units {
            value.push(' ');
            value.push_str(&UNITS.apply_to(units).to_string());
        }
        Self {
            caption,
            caption_is_badge,
            value,
            value_width: formatted.plain().width(),
        }
    }

    fn render(&self, caption_width: usize, value_width: usize) -> String {
        let style = if self.caption_is_badge { &*BADGE } else { &*CAPTION };
        format!(
            "{}{} {}{}",
            style.apply_to(&self.caption),
            pad(self.caption.width(), caption_width),
            self.value,
            pad(self.value_width, value_width),
        )
    }
}

fn styled_part(part: &FormattedPart) -> String {
    let style = if part.has_temp { &*TEMP } else { &*VALUE };
    style.apply_to(&part.text).to_string()
}

fn pad(width: usize, target: usize) -> String {
    " ".repeat(target.saturating_sub(width))
}

/// Render a tooltip, or the "no tooltip" notice when gated off.
pub fn render_tooltip(tooltip: Option<&Tooltip>) -> String {
    let Some(tooltip) = tooltip else {
        return format!("{}\n", MUTED.apply_to(NO_TOOLTIP));
    };

    let mut out = String::new();
    if let Some(name) = &tooltip.name {
        out.push_str(&NAME.apply_to(name).to_string());
        out.push('\n');
    }
    if tooltip.rows.is_empty() {
        return out;
    }

    let per_column = usize::from(tooltip.layout.rows_per_column.max(1));
    let mut columns: Vec<Vec<Cell>> = (0..tooltip.layout.columns(tooltip.rows.len()))
        .map(|index| {
            let start = index * per_column;
            let end = (start + per_column).min(tooltip.rows.len());
            tooltip.rows[start..end].iter().map(Cell::from_row).collect()
        })
        .collect();
    // The first column sits next to the token.
    if tooltip.layout.side == Side::Left {
        columns.reverse();
    }

    let widths: Vec<(usize, usize)> = columns
        .iter()
        .map(|column| {
            let caption = column.iter().map(|c| c.caption.width()).max().unwrap_or(0);
            let value = column.iter().map(|c| c.value_width).max().unwrap_or(0);
            (caption, value)
        })
        .collect();

    let gap = SEPARATOR.apply_to(COLUMN_GAP).to_string();
    for line in 0..per_column {
        let Some(last) = columns.iter().rposition(|column| line < column.len()) else {
            break;
        };
        let cells: Vec<String> = columns[..=last]
            .iter()
            .zip(&widths)
            .map(|(column, &(caption_width, value_width))| match column.get(line) {
                Some(cell) => cell.render(caption_width, value_width),
                None => pad(0, caption_width + 1 + value_width),
            })
            .collect();
        out.push_str(cells.join(&gap).trim_end());
        out.push('\n');
    }
    out
}

/// One muted line telling where the tooltip opens.
pub fn render_anchor(anchor: &Anchor) -> String {
    let side = match anchor.side {
        Side::Left => "right",
        Side::Right => "left",
    };
    let line = format!("anchor: {} {}, top {}", side, anchor.offset, anchor.top);
    format!("{}\n", MUTED.apply_to(line))
}

/// Render the effective settings as TOML.
pub fn render_settings(settings: &TooltipSettings) -> Result<String, toml::ser::Error> {
    toml::to_string(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hovertipapp::api::Layout;
    use hovertipapp::attributes::NormalizedValue;

    fn row(label: &str, icon: Icon, value: NormalizedValue) -> DisplayRow {
        DisplayRow {
            label: label.to_string(),
            icon,
            value,
        }
    }

    fn tooltip(rows: Vec<DisplayRow>, rows_per_column: u8, side: Side) -> Tooltip {
        Tooltip {
            name: Some("Mira".to_string()),
            rows,
            layout: Layout {
                rows_per_column,
                side,
            },
        }
    }

    fn plain(s: String) -> String {
        console::strip_ansi_codes(&s).into_owned()
    }

    #[test]
    fn test_render_gated_off() {
        assert_eq!(plain(render_tooltip(None)), "No tooltip\n");
    }

    #[test]
    fn test_render_single_column_aligns_values() {
        let t = tooltip(
            vec![
                row("HP", Icon::named("fa-heart"), NormalizedValue::new(12i64).with_max(20i64)),
                row("Walk", Icon::None, NormalizedValue::new(30i64).with_units("ft")),
            ],
            5,
            Side::Right,
        );
        assert_eq!(plain(render_tooltip(Some(&t))), "Mira\nHP   12/20\nWalk 30 ft\n");
    }

    #[test]
    fn test_render_badges_replace_labels() {
        let t = tooltip(
            vec![row("1", Icon::badge("1"), NormalizedValue::new(2i64).with_max(3i64))],
            5,
            Side::Right,
        );
        assert_eq!(plain(render_tooltip(Some(&t))), "Mira\n1 2/3\n");
    }

    #[test]
    fn test_render_wraps_into_columns() {
        let rows = vec![
            row("HP", Icon::None, NormalizedValue::new(1i64)),
            row("AC", Icon::None, NormalizedValue::new(15i64)),
            row("CR", Icon::None, NormalizedValue::new(0.5)),
        ];
        let right = plain(render_tooltip(Some(&tooltip(rows.clone(), 2, Side::Right))));
        assert_eq!(right, "Mira\nHP 1   │  CR ½\nAC 15\n");

        let left = plain(render_tooltip(Some(&tooltip(rows, 2, Side::Left))));
        assert_eq!(left, "Mira\nCR ½  │  HP 1\n      │  AC 15\n");
    }

    #[test]
    fn test_render_temp_value_is_summed() {
        let t = tooltip(
            vec![row("HP", Icon::None, NormalizedValue::new(10i64).with_temp(5.0))],
            5,
            Side::Right,
        );
        assert_eq!(plain(render_tooltip(Some(&t))), "Mira\nHP 15\n");
    }

    #[test]
    fn test_render_anchor_names_the_measured_edge() {
        let right = Anchor {
            side: Side::Right,
            offset: 259.0,
            top: 42.0,
        };
        assert_eq!(plain(render_anchor(&right)), "anchor: left 259, top 42\n");

        let left = Anchor {
            side: Side::Left,
            offset: 1827.0,
            top: 42.0,
        };
        assert_eq!(plain(render_anchor(&left)), "anchor: right 1827, top 42\n");
    }

    #[test]
    fn test_render_settings_as_toml() {
        let toml = render_settings(&TooltipSettings::default()).unwrap();
        assert!(toml.contains("rows_per_tooltip = 5"));
        assert!(toml.contains("visibility = \"gm\""));
    }
}
