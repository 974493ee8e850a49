//! # Visibility
//!
//! Two independent gates decide what a viewer sees:
//!
//! 1. **Tooltip gate** ([`should_show_tooltip`]): is there a tooltip at all?
//!    GMs always get one for tokens with an actor; players get one only if the
//!    configured [`VisibilityRule`] approves the token.
//! 2. **Category gate** ([`is_visible`]): within a tooltip, is a data category
//!    (HP, AC, spell slots, ...) visible to this viewer?
//!
//! ## Category Gate Order
//!
//! | Setting | GM viewer | Player viewer |
//! |---------|-----------|---------------|
//! | `HIDE_FROM_EVERYONE` | hidden | hidden |
//! | `SHOW_TO_GMS_ONLY` | shown* | hidden |
//! | a permission level | shown* | shown if permission >= level |
//!
//! \* unless the actor has a player owner and the category is marked
//! hide-from-GM.
//!
//! Unknown setting strings behave as `NONE`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{Actor, Disposition, Token};

pub const HIDE_FROM_EVERYONE: &str = "HIDE_FROM_EVERYONE";
pub const SHOW_TO_GMS_ONLY: &str = "SHOW_TO_GMS_ONLY";

/// Standard ownership levels, ordered from least to most access.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionLevel {
    #[default]
    None,
    Limited,
    Observer,
    Owner,
}

impl PermissionLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NONE" => Some(PermissionLevel::None),
            "LIMITED" => Some(PermissionLevel::Limited),
            "OBSERVER" => Some(PermissionLevel::Observer),
            "OWNER" => Some(PermissionLevel::Owner),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLevel::None => "NONE",
            PermissionLevel::Limited => "LIMITED",
            PermissionLevel::Observer => "OBSERVER",
            PermissionLevel::Owner => "OWNER",
        }
    }
}

/// The minimum-permission setting of a data category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinimumPermission {
    Level(PermissionLevel),
    HideFromEveryone,
    ShowToGmsOnly,
}

impl Default for MinimumPermission {
    fn default() -> Self {
        MinimumPermission::Level(PermissionLevel::None)
    }
}

impl MinimumPermission {
    /// Parse a setting string. Never fails: unknown values are `NONE`.
    pub fn from_setting(s: &str) -> Self {
        match s {
            HIDE_FROM_EVERYONE => MinimumPermission::HideFromEveryone,
            SHOW_TO_GMS_ONLY => MinimumPermission::ShowToGmsOnly,
            other => MinimumPermission::Level(PermissionLevel::parse(other).unwrap_or_default()),
        }
    }

    pub fn as_setting(&self) -> &'static str {
        match self {
            MinimumPermission::Level(level) => level.as_str(),
            MinimumPermission::HideFromEveryone => HIDE_FROM_EVERYONE,
            MinimumPermission::ShowToGmsOnly => SHOW_TO_GMS_ONLY,
        }
    }
}

impl From<&str> for MinimumPermission {
    fn from(s: &str) -> Self {
        Self::from_setting(s)
    }
}

impl fmt::Display for MinimumPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_setting())
    }
}

/// Visibility policy of one data category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionConfig {
    pub minimum_permission: MinimumPermission,
    pub hide_from_gm_if_player_owned: bool,
}

impl PermissionConfig {
    pub fn new(minimum_permission: MinimumPermission, hide_from_gm_if_player_owned: bool) -> Self {
        Self {
            minimum_permission,
            hide_from_gm_if_player_owned,
        }
    }

    pub fn from_setting(minimum_permission: &str, hide_from_gm_if_player_owned: bool) -> Self {
        Self::new(
            MinimumPermission::from_setting(minimum_permission),
            hide_from_gm_if_player_owned,
        )
    }
}

/// The user looking at the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub id: String,
    pub is_gm: bool,
}

impl Viewer {
    pub fn gm(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_gm: true,
        }
    }

    pub fn player(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_gm: false,
        }
    }

    pub fn permission_of(&self, actor: &Actor) -> PermissionLevel {
        actor.ownership.level_for(&self.id)
    }
}

/// Whether a data category is visible to `viewer` for `actor`.
pub fn is_visible(viewer: &Viewer, actor: &Actor, config: &PermissionConfig) -> bool {
    match config.minimum_permission {
        MinimumPermission::HideFromEveryone => false,
        _ if viewer.is_gm => !(actor.has_player_owner && config.hide_from_gm_if_player_owned),
        MinimumPermission::ShowToGmsOnly => false,
        MinimumPermission::Level(level) => viewer.permission_of(actor) >= level,
    }
}

/// Named rule deciding when players see tooltips at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisibilityRule {
    /// Players never see tooltips.
    #[default]
    GmOnly,
    /// Tokens whose actor the player owns.
    Owned,
    /// Owned tokens plus friendly ones.
    Friendly,
    /// Owned tokens plus friendly and neutral ones.
    FriendlyAndNeutral,
    /// Every token.
    All,
}

impl VisibilityRule {
    /// Rules in settings order; the first is the fallback.
    pub const ALL: [VisibilityRule; 5] = [
        VisibilityRule::GmOnly,
        VisibilityRule::Owned,
        VisibilityRule::Friendly,
        VisibilityRule::FriendlyAndNeutral,
        VisibilityRule::All,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            VisibilityRule::GmOnly => "gm",
            VisibilityRule::Owned => "owned",
            VisibilityRule::Friendly => "friendly",
            VisibilityRule::FriendlyAndNeutral => "friendlyAndNeutral",
            VisibilityRule::All => "all",
        }
    }

    /// Find a rule by setting name, falling back to the first rule.
    pub fn from_setting(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|rule| rule.name() == name)
            .unwrap_or(Self::ALL[0])
    }

    /// Whether a non-GM viewer may see the tooltip of `token`.
    pub fn approves(&self, viewer: &Viewer, token: &Token) -> bool {
        let owned = token
            .actor
            .as_ref()
            .is_some_and(|actor| viewer.permission_of(actor) == PermissionLevel::Owner);
        match self {
            VisibilityRule::GmOnly => false,
            VisibilityRule::Owned => owned,
            VisibilityRule::Friendly => owned || token.disposition == Disposition::Friendly,
            VisibilityRule::FriendlyAndNeutral => {
                owned || token.disposition != Disposition::Hostile
            }
            VisibilityRule::All => true,
        }
    }
}

/// Whether hovering `token` should show a tooltip at all.
pub fn should_show_tooltip(viewer: &Viewer, token: &Token, rule: VisibilityRule) -> bool {
    if token.actor.is_none() {
        return false;
    }
    viewer.is_gm || rule.approves(viewer, token)
}
