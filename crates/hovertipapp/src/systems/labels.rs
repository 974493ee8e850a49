//! English labels and icon names shared by the game-system adapters.

pub const HP: &str = "HP";
pub const AC: &str = "AC";
pub const FOCUS_ABBREVIATION: &str = "F";
pub const CANTRIP_ABBREVIATION: &str = "C";
pub const PACT_ABBREVIATION: &str = "P";

pub const ICON_HP: &str = "fa-heart";
pub const ICON_AC: &str = "fa-user-shield";
pub const ICON_RESISTANCE: &str = "fa-shield-alt";
pub const ICON_IMMUNITY: &str = "fa-shield-virus";
pub const ICON_VULNERABILITY: &str = "fa-heart-broken";
pub const ICON_CONDITION_IMMUNITY: &str = "fa-user-lock";
pub const ICON_PERCEPTION: &str = "fa-eye";
pub const ICON_INSIGHT: &str = "fa-brain";
pub const ICON_INVESTIGATION: &str = "fa-search";
pub const ICON_RESOURCE: &str = "fa-battery-half";
pub const ICON_ITEM: &str = "fa-flask";
pub const ICON_TALENT: &str = "fa-fist-raised";

pub const ICON_WALK: &str = "fa-walking";
pub const ICON_FLY: &str = "fa-feather-alt";
pub const ICON_SWIM: &str = "fa-swimmer";
pub const ICON_CLIMB: &str = "fa-grip-lines";
pub const ICON_BURROW: &str = "fa-mountain";
