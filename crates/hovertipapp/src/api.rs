//! # API Facade
//!
//! [`Hovertip`] is the single entry point a host drives. It owns the game-system
//! adapter, the source registry and the current settings snapshot, and turns
//! hover events into [`Tooltip`] values.
//!
//! ## Hover Lifecycle
//!
//! ```text
//! hover start ──▶ tooltip gate ──no──▶ None (and any previous tooltip is cleared)
//!                      │ yes
//!                      ▼
//!                 assemble rows ──▶ Some(&Tooltip)
//!
//! hover end   ──▶ current tooltip cleared
//! ```
//!
//! Every hover start runs a fresh assembly pass. Nothing from an earlier pass
//! leaks into the next one apart from the fixed-source label cache.
//!
//! ## What the API Does NOT Do
//!
//! - No terminal or DOM output: a [`Tooltip`] is plain data.
//! - No settings persistence: hosts load a [`TooltipSettings`] and hand it over.

use serde::Serialize;
use tracing::debug;

use crate::assemble::{assemble, DisplayRow, Registry};
use crate::config::TooltipSettings;
use crate::error::Result;
use crate::model::Token;
use crate::placement::{place, Anchor, Side, TokenRect};
use crate::systems::{system_for, GameSystem};
use crate::visibility::{should_show_tooltip, Viewer};

/// Column layout hints for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub rows_per_column: u8,
    pub side: Side,
}

impl Layout {
    pub fn from_settings(settings: &TooltipSettings) -> Self {
        Self {
            rows_per_column: settings.rows_per_tooltip(),
            side: Side::from_show_on_left(settings.show_on_left),
        }
    }

    /// Number of columns needed for `rows` rows.
    pub fn columns(&self, rows: usize) -> usize {
        rows.div_ceil(usize::from(self.rows_per_column.max(1)))
    }
}

/// Everything needed to draw one tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub name: Option<String>,
    pub rows: Vec<DisplayRow>,
    pub layout: Layout,
}

impl Tooltip {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.rows.is_empty()
    }
}

pub struct Hovertip {
    system: Box<dyn GameSystem>,
    registry: Registry,
    settings: TooltipSettings,
    current: Option<Tooltip>,
}

impl Hovertip {
    pub fn new(system: Box<dyn GameSystem>, settings: TooltipSettings) -> Self {
        let registry = Registry::for_system(system.as_ref());
        debug!(
            system = system.id(),
            sources = registry.len(),
            "hovertip initialized"
        );
        Self {
            system,
            registry,
            settings,
            current: None,
        }
    }

    /// Build a facade for a system id such as `dnd5e`.
    pub fn for_system(id: &str, settings: TooltipSettings) -> Result<Self> {
        Ok(Self::new(system_for(id)?, settings))
    }

    pub fn settings(&self) -> &TooltipSettings {
        &self.settings
    }

    /// Replace the settings snapshot. Takes effect on the next hover.
    pub fn set_settings(&mut self, settings: TooltipSettings) {
        self.settings = settings;
    }

    pub fn current(&self) -> Option<&Tooltip> {
        self.current.as_ref()
    }

    pub fn on_hover_start(&mut self, token: &Token, viewer: &Viewer) -> Option<&Tooltip> {
        self.current = self.build(token, viewer);
        self.current.as_ref()
    }

    pub fn on_hover_end(&mut self) {
        if self.current.take().is_some() {
            debug!("tooltip cleared");
        }
    }

    /// Where the tooltip opens for `token`, following the `show_on_left` setting.
    pub fn anchor(&self, token: TokenRect, viewport_width: f64, stage_scale: f64) -> Anchor {
        place(token, viewport_width, stage_scale, self.settings.show_on_left)
    }

    /// Single entry point for hosts that report hover as a boolean.
    pub fn on_hover(&mut self, token: &Token, viewer: &Viewer, hovered: bool) -> Option<&Tooltip> {
        if hovered {
            self.on_hover_start(token, viewer)
        } else {
            self.on_hover_end();
            None
        }
    }

    fn build(&self, token: &Token, viewer: &Viewer) -> Option<Tooltip> {
        let rule = self.settings.visibility_rule();
        if !should_show_tooltip(viewer, token, rule) {
            debug!(token = %token.name, rule = rule.name(), "tooltip gated off");
            return None;
        }
        let actor = token.actor.as_ref()?;

        let name_only = self.system.show_name_only(actor);
        let rows = assemble(actor, viewer, &self.registry, &self.settings, name_only);
        let name = (self.settings.show_token_name || name_only).then(|| token.name.clone());
        debug!(token = %token.name, rows = rows.len(), "tooltip assembled");

        Some(Tooltip {
            name,
            rows,
            layout: Layout::from_settings(&self.settings),
        })
    }
}
