//! # Configuration
//!
//! Tooltip settings are managed by [`confique`], which handles layered loading
//! from a TOML file, environment variables and compiled defaults.
//!
//! ## Layers
//!
//! Resolved in priority order:
//! 1. **Environment variables**: `HOVERTIP_ROWS_PER_TOOLTIP`, `HOVERTIP_VISIBILITY`, etc.
//! 2. **Settings file**: an explicit `hovertip.toml`.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! A loaded [`TooltipSettings`] is a snapshot: callers pass it into each render
//! pass, so a change takes effect on the next hover.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `rows_per_tooltip` | `5` | Rows per column (1-20) |
//! | `show_on_left` | `false` | Place the tooltip left of the token |
//! | `show_token_name` | `true` | Show the token name above the rows |
//! | `visibility` | `gm` | Rule for when players see tooltips |
//! | `<category>_minimum_permission` | `NONE` | Minimum ownership to see a category |
//! | `hide_player_<category>_from_gm` | `false` | Hide player-owned data from GMs |
//! | `custom_rows` | none | Extra rows read from arbitrary data paths |
//!
//! Saving throws, damage resistances and condition immunities default to
//! `HIDE_FROM_EVERYONE`.

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{HovertipError, Result};
use crate::source::Category;
use crate::visibility::{PermissionConfig, VisibilityRule, HIDE_FROM_EVERYONE};

pub const MIN_ROWS_PER_TOOLTIP: u8 = 1;
pub const MAX_ROWS_PER_TOOLTIP: u8 = 20;

/// A user-defined row reading an arbitrary data path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CustomRow {
    pub label: String,
    /// Dotted path into the actor's system data.
    pub path: String,
    #[serde(default = "default_permission")]
    pub permission: String,
    #[serde(default, rename = "hideFromGM", alias = "hide_from_gm")]
    pub hide_from_gm: bool,
}

impl CustomRow {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            permission: default_permission(),
            hide_from_gm: false,
        }
    }

    pub fn permission_config(&self) -> PermissionConfig {
        PermissionConfig::from_setting(&self.permission, self.hide_from_gm)
    }
}

fn default_permission() -> String {
    "NONE".to_string()
}

/// Tooltip settings, stored in `hovertip.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TooltipSettings {
    /// Rows per tooltip column.
    #[config(default = 5, env = "HOVERTIP_ROWS_PER_TOOLTIP")]
    pub rows_per_tooltip: u8,

    #[config(default = false, env = "HOVERTIP_SHOW_ON_LEFT")]
    pub show_on_left: bool,

    #[config(default = true, env = "HOVERTIP_SHOW_TOKEN_NAME")]
    pub show_token_name: bool,

    /// Name of the rule deciding when players see tooltips.
    #[config(default = "gm", env = "HOVERTIP_VISIBILITY")]
    pub visibility: String,

    #[config(default = "NONE")]
    pub hp_minimum_permission: String,
    #[config(default = false)]
    pub hide_player_hp_from_gm: bool,

    #[config(default = "NONE")]
    pub ac_minimum_permission: String,
    #[config(default = false)]
    pub hide_player_ac_from_gm: bool,

    #[config(default = "HIDE_FROM_EVERYONE")]
    pub saving_throws_minimum_permission: String,
    #[config(default = false)]
    pub hide_player_saving_throws_from_gm: bool,

    #[config(default = "HIDE_FROM_EVERYONE")]
    pub dmg_res_vuln_minimum_permission: String,
    #[config(default = false)]
    pub hide_player_dmg_res_vuln_from_gm: bool,

    #[config(default = "HIDE_FROM_EVERYONE")]
    pub cond_imm_minimum_permission: String,
    #[config(default = false)]
    pub hide_player_cond_imm_from_gm: bool,

    #[config(default = "NONE")]
    pub passives_minimum_permission: String,
    #[config(default = false)]
    pub hide_player_passives_from_gm: bool,

    #[config(default = "NONE")]
    pub movement_minimum_permission: String,
    #[config(default = false)]
    pub hide_player_movement_from_gm: bool,

    #[config(default = "NONE")]
    pub resources_minimum_permission: String,
    #[config(default = false)]
    pub hide_player_resources_from_gm: bool,

    #[config(default = "NONE")]
    pub spells_minimum_permission: String,
    #[config(default = false)]
    pub hide_player_spells_from_gm: bool,

    #[config(default = "NONE")]
    pub talents_minimum_permission: String,
    #[config(default = false)]
    pub hide_player_talents_from_gm: bool,

    #[config(default = "NONE")]
    pub items_minimum_permission: String,
    #[config(default = false)]
    pub hide_player_items_from_gm: bool,

    /// Extra rows, shown after all categories in list order.
    pub custom_rows: Option<Vec<CustomRow>>,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        let none = || "NONE".to_string();
        let hidden = || HIDE_FROM_EVERYONE.to_string();
        Self {
            rows_per_tooltip: 5,
            show_on_left: false,
            show_token_name: true,
            visibility: VisibilityRule::default().name().to_string(),
            hp_minimum_permission: none(),
            hide_player_hp_from_gm: false,
            ac_minimum_permission: none(),
            hide_player_ac_from_gm: false,
            saving_throws_minimum_permission: hidden(),
            hide_player_saving_throws_from_gm: false,
            dmg_res_vuln_minimum_permission: hidden(),
            hide_player_dmg_res_vuln_from_gm: false,
            cond_imm_minimum_permission: hidden(),
            hide_player_cond_imm_from_gm: false,
            passives_minimum_permission: none(),
            hide_player_passives_from_gm: false,
            movement_minimum_permission: none(),
            hide_player_movement_from_gm: false,
            resources_minimum_permission: none(),
            hide_player_resources_from_gm: false,
            spells_minimum_permission: none(),
            hide_player_spells_from_gm: false,
            talents_minimum_permission: none(),
            hide_player_talents_from_gm: false,
            items_minimum_permission: none(),
            hide_player_items_from_gm: false,
            custom_rows: None,
        }
    }
}

impl TooltipSettings {
    /// Load settings from the environment and, if given, a TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            if !path.exists() {
                return Err(HovertipError::SettingsNotFound(path.to_path_buf()));
            }
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// Visibility policy for a category, read from this snapshot.
    pub fn permission_for(&self, category: Category) -> PermissionConfig {
        let (minimum, hide_from_gm) = match category {
            Category::Hp => (&self.hp_minimum_permission, self.hide_player_hp_from_gm),
            Category::Ac => (&self.ac_minimum_permission, self.hide_player_ac_from_gm),
            Category::SavingThrows => (
                &self.saving_throws_minimum_permission,
                self.hide_player_saving_throws_from_gm,
            ),
            Category::DamageResImmVuln => (
                &self.dmg_res_vuln_minimum_permission,
                self.hide_player_dmg_res_vuln_from_gm,
            ),
            Category::ConditionImmunities => (
                &self.cond_imm_minimum_permission,
                self.hide_player_cond_imm_from_gm,
            ),
            Category::Passives => (
                &self.passives_minimum_permission,
                self.hide_player_passives_from_gm,
            ),
            Category::Movement => (
                &self.movement_minimum_permission,
                self.hide_player_movement_from_gm,
            ),
            Category::Resources => (
                &self.resources_minimum_permission,
                self.hide_player_resources_from_gm,
            ),
            Category::SpellSlots => (
                &self.spells_minimum_permission,
                self.hide_player_spells_from_gm,
            ),
            Category::Talents => (
                &self.talents_minimum_permission,
                self.hide_player_talents_from_gm,
            ),
            Category::Items => (
                &self.items_minimum_permission,
                self.hide_player_items_from_gm,
            ),
        };
        PermissionConfig::from_setting(minimum, hide_from_gm)
    }

    /// Set a category's visibility (used by hosts with a settings editor).
    pub fn set_permission(&mut self, category: Category, config: PermissionConfig) {
        let value = config.minimum_permission.as_setting().to_string();
        let hide = config.hide_from_gm_if_player_owned;
        let (minimum, hide_from_gm) = match category {
            Category::Hp => (&mut self.hp_minimum_permission, &mut self.hide_player_hp_from_gm),
            Category::Ac => (&mut self.ac_minimum_permission, &mut self.hide_player_ac_from_gm),
            Category::SavingThrows => (
                &mut self.saving_throws_minimum_permission,
                &mut self.hide_player_saving_throws_from_gm,
            ),
            Category::DamageResImmVuln => (
                &mut self.dmg_res_vuln_minimum_permission,
                &mut self.hide_player_dmg_res_vuln_from_gm,
            ),
            Category::ConditionImmunities => (
                &mut self.cond_imm_minimum_permission,
                &mut self.hide_player_cond_imm_from_gm,
            ),
            Category::Passives => (
                &mut self.passives_minimum_permission,
                &mut self.hide_player_passives_from_gm,
            ),
            Category::Movement => (
                &mut self.movement_minimum_permission,
                &mut self.hide_player_movement_from_gm,
            ),
            Category::Resources => (
                &mut self.resources_minimum_permission,
                &mut self.hide_player_resources_from_gm,
            ),
            Category::SpellSlots => (
                &mut self.spells_minimum_permission,
                &mut self.hide_player_spells_from_gm,
            ),
            Category::Talents => (
                &mut self.talents_minimum_permission,
                &mut self.hide_player_talents_from_gm,
            ),
            Category::Items => (
                &mut self.items_minimum_permission,
                &mut self.hide_player_items_from_gm,
            ),
        };
        *minimum = value;
        *hide_from_gm = hide;
    }

    /// Rows per column, clamped to the supported range.
    pub fn rows_per_tooltip(&self) -> u8 {
        self.rows_per_tooltip
            .clamp(MIN_ROWS_PER_TOOLTIP, MAX_ROWS_PER_TOOLTIP)
    }

    pub fn visibility_rule(&self) -> VisibilityRule {
        VisibilityRule::from_setting(&self.visibility)
    }

    pub fn custom_rows(&self) -> &[CustomRow] {
        self.custom_rows.as_deref().unwrap_or_default()
    }
}
