//! # Domain Model: Actors and Tokens
//!
//! An [`Actor`] is the character or creature whose attributes a tooltip shows;
//! a [`Token`] is its on-board representation and the hover target. A token may
//! have no actor (a bare image on the map), in which case no tooltip appears.
//!
//! Actor system data is kept as raw JSON ([`Actor::system`]) because every game
//! system lays it out differently. Adapters in [`crate::systems`] know the paths;
//! nothing else in the crate interprets that blob.
//!
//! Everything here deserializes from the JSON a host exports, e.g.:
//!
//! ```json
//! {
//!   "name": "Mira",
//!   "type": "character",
//!   "hasPlayerOwner": true,
//!   "ownership": { "default": "LIMITED", "users": { "u1": "OWNER" } },
//!   "system": { "attributes": { "hp": { "value": 12, "max": 20 } } }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::visibility::PermissionLevel;

/// Flag namespace this crate reads from `Actor::flags`.
pub const FLAG_SCOPE: &str = "hovertip";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    Hostile,
    #[default]
    Neutral,
    Friendly,
}

/// Per-user permission table for an actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ownership {
    #[serde(default)]
    pub default: PermissionLevel,
    #[serde(default)]
    pub users: HashMap<String, PermissionLevel>,
}

impl Ownership {
    /// Explicit entry for the user, else the default level.
    pub fn level_for(&self, user_id: &str) -> PermissionLevel {
        self.users.get(user_id).copied().unwrap_or(self.default)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub system: Value,
}

/// One spell level as reported by a spellcasting entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellLevel {
    pub level: i64,
    #[serde(default)]
    pub is_cantrip: bool,
    /// Raw slot usage, usually `{value, max}`. Kept raw so a present-but-null
    /// `value` can be told apart from a missing one.
    #[serde(default)]
    pub uses: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellcastingEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub is_focus_pool: bool,
    /// `None` when the entry exposes no per-level slot data.
    #[serde(default)]
    pub levels: Option<Vec<SpellLevel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub has_player_owner: bool,
    #[serde(default)]
    pub ownership: Ownership,
    #[serde(default)]
    pub system: Value,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub spellcasting: Vec<SpellcastingEntry>,
    #[serde(default)]
    pub flags: Value,
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Look up a dotted path in the system data. A leading `system.` is accepted.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let path = path.strip_prefix("system.").unwrap_or(path);
        lookup_path(&self.system, path)
    }

    /// Read a boolean flag from the crate's own flag namespace.
    pub fn flag(&self, name: &str) -> bool {
        self.flags
            .get(FLAG_SCOPE)
            .and_then(|scope| scope.get(name))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn items_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |item| item.kind == kind)
    }
}

/// The hover target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub name: String,
    #[serde(default)]
    pub disposition: Disposition,
    #[serde(default)]
    pub actor: Option<Actor>,
}

impl Token {
    pub fn new(name: impl Into<String>, actor: Option<Actor>) -> Self {
        Self {
            name: name.into(),
            disposition: Disposition::default(),
            actor,
        }
    }

    pub fn with_disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = disposition;
        self
    }
}

/// Resolve a dotted path (`attributes.hp.value`, `list.0.name`) in raw data.
///
/// Numeric segments index into arrays. An empty path resolves to `data` itself.
pub fn lookup_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(data);
    }
    path.split('.').try_fold(data, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_path_walks_objects_and_arrays() {
        let data = json!({"a": {"b": [{"c": 3}]}});
        assert_eq!(lookup_path(&data, "a.b.0.c"), Some(&json!(3)));
        assert_eq!(lookup_path(&data, "a.b.1.c"), None);
        assert_eq!(lookup_path(&data, "a.x"), None);
        assert_eq!(lookup_path(&data, "a.b.c"), None);
        assert_eq!(lookup_path(&data, ""), Some(&data));
    }

    #[test]
    fn actor_lookup_accepts_system_prefix() {
        let mut actor = Actor::new("Mira");
        actor.system = json!({"attributes": {"hp": {"value": 4}}});
        assert_eq!(actor.lookup("attributes.hp.value"), Some(&json!(4)));
        assert_eq!(actor.lookup("system.attributes.hp.value"), Some(&json!(4)));
    }

    #[test]
    fn ownership_prefers_explicit_user_entry() {
        let mut ownership = Ownership {
            default: PermissionLevel::Limited,
            ..Default::default()
        };
        ownership
            .users
            .insert("u1".to_string(), PermissionLevel::Owner);
        assert_eq!(ownership.level_for("u1"), PermissionLevel::Owner);
        assert_eq!(ownership.level_for("u2"), PermissionLevel::Limited);
    }

    #[test]
    fn actor_deserializes_from_host_json() {
        let actor = Actor::from_json(
            r#"{
                "name": "Mira",
                "type": "character",
                "hasPlayerOwner": true,
                "ownership": {"default": "LIMITED", "users": {"u1": "OWNER"}},
                "system": {"attributes": {"hp": {"value": 12, "max": 20}}},
                "spellcasting": [{"id": "e1", "isFocusPool": true}],
                "flags": {"hovertip": {"nameOnly": true}}
            }"#,
        )
        .unwrap();
        assert_eq!(actor.kind, "character");
        assert!(actor.has_player_owner);
        assert_eq!(actor.ownership.level_for("u1"), PermissionLevel::Owner);
        assert!(actor.spellcasting[0].is_focus_pool);
        assert!(actor.spellcasting[0].levels.is_none());
        assert!(actor.flag("nameOnly"));
        assert!(!actor.flag("missing"));
    }

    #[test]
    fn invalid_json_is_a_serialization_error() {
        let err = Actor::from_json("{").unwrap_err();
        assert!(matches!(err, crate::error::HovertipError::Serialization(_)));
    }

    #[test]
    fn token_defaults_to_neutral() {
        let token: Token = serde_json::from_str(r#"{"name": "Goblin"}"#).unwrap();
        assert_eq!(token.disposition, Disposition::Neutral);
        assert!(token.actor.is_none());
    }
}
