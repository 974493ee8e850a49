//! # Row Assembly
//!
//! Builds the ordered row list for one actor and one viewer:
//!
//! ```text
//! name-only actor? ──yes──▶ []
//!        │ no
//!        ▼
//! for each registration (category order, then registration order)
//!   ├─ category hidden for viewer?   ──▶ skip
//!   ├─ Fixed:   cached label/icon + fresh value      ─┐
//!   └─ Dynamic: fresh rows, stable-sorted by `sort`  ─┤
//!                                                     ▼
//!                              normalize each value, drop `None`
//!        │
//!        ▼
//! custom rows (each gated by its own permission), in list order
//! ```
//!
//! A pass reads only its inputs. The one piece of retained state is the
//! label/icon of fixed sources, resolved on first use and reused afterwards.

use once_cell::unsync::OnceCell;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::attributes::{format_value, normalize, FormattedValue, NormalizedValue};
use crate::config::{CustomRow, TooltipSettings};
use crate::model::Actor;
use crate::source::{Category, Icon, Row, RowSource};
use crate::systems::GameSystem;
use crate::visibility::{is_visible, PermissionConfig, Viewer};

/// A row ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub label: String,
    pub icon: Icon,
    pub value: NormalizedValue,
}

impl DisplayRow {
    pub fn formatted(&self) -> FormattedValue {
        format_value(&self.value)
    }
}

/// A source registered under a category.
pub struct Registration {
    category: Category,
    source: RowSource,
    header: OnceCell<(String, Icon)>,
}

impl Registration {
    pub fn new(category: Category, source: RowSource) -> Self {
        Self {
            category,
            source,
            header: OnceCell::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Raw rows for this pass. Dynamic rows come back stable-sorted by `sort`.
    pub fn rows(&self, actor: &Actor) -> Vec<Row> {
        match &self.source {
            RowSource::Fixed(source) => {
                let (label, icon) = self
                    .header
                    .get_or_init(|| (source.label(), source.icon()));
                vec![Row::new(label.clone(), icon.clone(), source.value(actor))]
            }
            RowSource::Dynamic(source) => {
                let mut rows = source.rows(actor);
                rows.sort_by_key(|row| row.sort.unwrap_or(0));
                rows
            }
        }
    }
}

/// Ordered set of registrations.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Registration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every source the system offers, in category order.
    pub fn for_system(system: &dyn GameSystem) -> Self {
        let mut registry = Self::new();
        for category in Category::ALL {
            for source in system.sources(category) {
                registry.register(category, source);
            }
        }
        registry
    }

    pub fn register(&mut self, category: Category, source: RowSource) {
        self.entries.push(Registration::new(category, source));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registrations in display order: by category, then by registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        let mut ordered: Vec<&Registration> = self.entries.iter().collect();
        ordered.sort_by_key(|registration| registration.category);
        ordered.into_iter()
    }

    /// Registrations paired with their visibility policy from `settings`.
    pub fn with_permissions<'a>(
        &'a self,
        settings: &'a TooltipSettings,
    ) -> impl Iterator<Item = (&'a Registration, PermissionConfig)> + 'a {
        self.iter()
            .map(move |registration| (registration, settings.permission_for(registration.category)))
    }
}

/// Assemble the display rows for `actor` as seen by `viewer`.
pub fn assemble(
    actor: &Actor,
    viewer: &Viewer,
    registry: &Registry,
    settings: &TooltipSettings,
    name_only: bool,
) -> Vec<DisplayRow> {
    if name_only {
        debug!(actor = %actor.name, "name-only actor, no rows");
        return Vec::new();
    }

    let mut rows = Vec::new();
    for (registration, config) in registry.with_permissions(settings) {
        if !is_visible(viewer, actor, &config) {
            debug!(
                category = registration.category.key(),
                actor = %actor.name,
                "category hidden from viewer"
            );
            continue;
        }
        rows.extend(
            registration
                .rows(actor)
                .into_iter()
                .filter_map(|row| display_row(row.label, row.icon, &row.value, None)),
        );
    }

    rows.extend(custom_rows(actor, viewer, settings.custom_rows()));
    rows
}

fn custom_rows<'a>(
    actor: &'a Actor,
    viewer: &'a Viewer,
    custom: &'a [CustomRow],
) -> impl Iterator<Item = DisplayRow> + 'a {
    custom
        .iter()
        .filter(move |row| is_visible(viewer, actor, &row.permission_config()))
        .filter_map(move |row| {
            let value = actor.lookup(&row.path).unwrap_or(&Value::Null);
            display_row(row.label.clone(), Icon::None, value, Some(&row.path))
        })
}

fn display_row(label: String, icon: Icon, value: &Value, key: Option<&str>) -> Option<DisplayRow> {
    match normalize(value, key) {
        Some(value) => Some(DisplayRow { label, icon, value }),
        None => {
            trace!(label = %label, "no displayable value, row dropped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{DynamicRowSource, FixedRowSource};
    use crate::visibility::HIDE_FROM_EVERYONE;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Fixed {
        label: &'static str,
        path: &'static str,
        header_calls: Rc<Cell<u32>>,
    }

    impl Fixed {
        fn new(label: &'static str, path: &'static str) -> Self {
            Self {
                label,
                path,
                header_calls: Rc::new(Cell::new(0)),
            }
        }
    }

    impl FixedRowSource for Fixed {
        fn label(&self) -> String {
            self.header_calls.set(self.header_calls.get() + 1);
            self.label.to_string()
        }

        fn icon(&self) -> Icon {
            Icon::None
        }

        fn value(&self, actor: &Actor) -> Value {
            actor.lookup(self.path).cloned().unwrap_or(Value::Null)
        }
    }

    struct Listed(Vec<Row>);

    impl DynamicRowSource for Listed {
        fn rows(&self, _actor: &Actor) -> Vec<Row> {
            self.0.clone()
        }
    }

    fn actor() -> Actor {
        let mut actor = Actor::new("Mira");
        actor.has_player_owner = true;
        actor.system = json!({
            "hp": {"value": 5, "max": 10},
            "ac": {"total": 15},
            "rank": null,
            "xp": {"pct": 42.123}
        });
        actor
    }

    fn labels(rows: &[DisplayRow]) -> Vec<&str> {
        rows.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn rows_follow_category_order_not_registration_order() {
        let mut registry = Registry::new();
        registry.register(Category::Ac, RowSource::fixed(Fixed::new("AC", "ac")));
        registry.register(Category::Hp, RowSource::fixed(Fixed::new("HP", "hp")));

        let rows = assemble(
            &actor(),
            &Viewer::gm("gm"),
            &registry,
            &TooltipSettings::default(),
            false,
        );
        assert_eq!(labels(&rows), vec!["HP", "AC"]);
        assert_eq!(rows[0].value, NormalizedValue::new(5i64).with_max(10i64));
        assert_eq!(rows[1].value, NormalizedValue::new(15i64));
    }

    #[test]
    fn rows_without_values_are_dropped() {
        let mut registry = Registry::new();
        registry.register(Category::Passives, RowSource::fixed(Fixed::new("Rank", "rank")));
        registry.register(Category::Passives, RowSource::fixed(Fixed::new("Gone", "missing")));
        registry.register(Category::Hp, RowSource::fixed(Fixed::new("HP", "hp")));

        let rows = assemble(
            &actor(),
            &Viewer::gm("gm"),
            &registry,
            &TooltipSettings::default(),
            false,
        );
        assert_eq!(labels(&rows), vec!["HP"]);
    }

    #[test]
    fn name_only_returns_nothing() {
        let registry = Registry::for_system(&crate::systems::Dnd5e);
        let rows = assemble(
            &actor(),
            &Viewer::gm("gm"),
            &registry,
            &TooltipSettings::default(),
            true,
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn hidden_categories_are_skipped() {
        let mut registry = Registry::new();
        registry.register(Category::Hp, RowSource::fixed(Fixed::new("HP", "hp")));
        registry.register(Category::Ac, RowSource::fixed(Fixed::new("AC", "ac")));

        let mut settings = TooltipSettings::default();
        settings.hp_minimum_permission = HIDE_FROM_EVERYONE.to_string();
        settings.hide_player_ac_from_gm = true;

        let rows = assemble(&actor(), &Viewer::gm("gm"), &registry, &settings, false);
        assert!(rows.is_empty());

        let rows = assemble(&actor(), &Viewer::player("p"), &registry, &settings, false);
        assert_eq!(labels(&rows), vec!["AC"]);
    }

    #[test]
    fn dynamic_rows_are_stably_sorted() {
        let rows = vec![
            Row::new("b", Icon::None, json!(1)).with_sort(2),
            Row::new("a", Icon::None, json!(1)).with_sort(1),
            Row::new("c", Icon::None, json!(1)).with_sort(2),
            Row::new("unsorted", Icon::None, json!(1)),
        ];
        let mut registry = Registry::new();
        registry.register(Category::Items, RowSource::dynamic(Listed(rows)));

        let rows = assemble(
            &actor(),
            &Viewer::gm("gm"),
            &registry,
            &TooltipSettings::default(),
            false,
        );
        assert_eq!(labels(&rows), vec!["unsorted", "a", "b", "c"]);
    }

    #[test]
    fn fixed_header_is_resolved_once() {
        let source = Fixed::new("HP", "hp");
        let calls = Rc::clone(&source.header_calls);
        let mut registry = Registry::new();
        registry.register(Category::Hp, RowSource::fixed(source));

        let settings = TooltipSettings::default();
        for _ in 0..3 {
            let rows = assemble(&actor(), &Viewer::gm("gm"), &registry, &settings, false);
            assert_eq!(rows.len(), 1);
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn custom_rows_come_last_with_their_own_gate() {
        let mut registry = Registry::new();
        registry.register(Category::Hp, RowSource::fixed(Fixed::new("HP", "hp")));

        let mut hidden = CustomRow::new("Secret", "hp");
        hidden.permission = "SHOW_TO_GMS_ONLY".to_string();
        let settings = TooltipSettings {
            custom_rows: Some(vec![
                CustomRow::new("XP", "system.xp.pct"),
                hidden,
                CustomRow::new("Missing", "nowhere"),
            ]),
            ..Default::default()
        };

        let rows = assemble(&actor(), &Viewer::player("p"), &registry, &settings, false);
        assert_eq!(labels(&rows), vec!["HP", "XP"]);
        assert_eq!(rows[1].value, NormalizedValue::new("42.12%"));

        let rows = assemble(&actor(), &Viewer::gm("gm"), &registry, &settings, false);
        assert_eq!(labels(&rows), vec!["HP", "XP", "Secret"]);
    }

    #[test]
    fn registry_for_system_registers_every_category_source() {
        let registry = Registry::for_system(&crate::systems::Pf2e);
        let categories: Vec<_> = registry.iter().map(Registration::category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Hp,
                Category::Ac,
                Category::SavingThrows,
                Category::SavingThrows,
                Category::SavingThrows,
                Category::Passives,
                Category::SpellSlots,
                Category::Items,
            ]
        );
    }
}
