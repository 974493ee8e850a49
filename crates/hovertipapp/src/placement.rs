//! Where to anchor the tooltip next to a hovered token.
//!
//! Coordinates are screen pixels. The token rect is in canvas space and gets
//! scaled by the stage zoom before use.

use serde::Serialize;

/// Gap between token edge and tooltip.
pub const MARGIN: f64 = 8.0;

/// Side of the token the tooltip opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    #[default]
    Right,
}

impl Side {
    pub fn from_show_on_left(show_on_left: bool) -> Self {
        if show_on_left {
            Side::Left
        } else {
            Side::Right
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// Tooltip position. `offset` is measured from the left edge of the viewport
/// for [`Side::Right`] and from the right edge for [`Side::Left`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Anchor {
    pub side: Side,
    pub offset: f64,
    pub top: f64,
}

pub fn place(
    token: TokenRect,
    viewport_width: f64,
    stage_scale: f64,
    show_on_left: bool,
) -> Anchor {
    let side = Side::from_show_on_left(show_on_left);
    let offset = match side {
        Side::Right => (token.x + token.width * stage_scale + MARGIN).ceil(),
        Side::Left => viewport_width - (token.x - MARGIN).ceil(),
    };
    Anchor {
        side,
        offset,
        top: (token.y - MARGIN).floor(),
    }
}
