//! # Hovertip Architecture
//!
//! Hovertip builds the tooltip a virtual tabletop shows when the pointer rests on
//! a token: hit points, armor class, saves, resistances, spell slots, items. It
//! is a **UI-agnostic library**; the `hovertip` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host / CLI                                                 │
//! │  - Loads actors, settings; reports hover start/end          │
//! │  - Draws the returned Tooltip                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Tooltip gate, hover lifecycle, layout hints              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Assembly (assemble.rs)                                     │
//! │  - Walks registered sources in category order               │
//! │  - Category gate (visibility.rs), normalization (attributes)│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sources (source.rs, systems/)                              │
//! │  - One adapter per game system, reading raw actor JSON      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Passes Are Pure
//!
//! A hover pass reads an [`model::Actor`], a [`visibility::Viewer`] and a
//! [`config::TooltipSettings`] snapshot, and returns plain data. Nothing in this
//! crate writes to stdout, touches global state, or remembers an earlier pass
//! beyond the label/icon cache of fixed sources.
//!
//! ## Module Overview
//!
//! - [`api`]: The [`api::Hovertip`] facade
//! - [`assemble`]: Row assembly and the source registry
//! - [`attributes`]: Raw value normalization and display formatting
//! - [`visibility`]: Permission levels, category and tooltip gates
//! - [`source`]: Row source contract and data categories
//! - [`systems`]: Game-system adapters (`dnd5e`, `pf2e`)
//! - [`model`]: Actors, tokens, items
//! - [`config`]: Settings via confique
//! - [`placement`]: Tooltip anchor next to a token
//! - [`error`]: Error types

pub mod api;
pub mod assemble;
pub mod attributes;
pub mod config;
pub mod error;
pub mod model;
pub mod placement;
pub mod source;
pub mod systems;
pub mod visibility;
