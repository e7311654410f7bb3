//! Use-Case-Funktionen für die Kreisverkehr-Edits.
//!
//! Aufgeteilt nach Operation:
//! - `action`: gemeinsamer Rahmen: Snapshot, Batch, Commit oder Rollback
//! - `roundabout`: Mini-Kreisverkehr taggen, aufweiten, geschlossenen Way taggen
//! - `flares`: Flares an mehreren Nodes bauen
//! - `lollipop`: Lollipop-Endpunkt weiterschieben
mod action;
mod flares;
mod lollipop;
mod roundabout;

pub use action::run_edit;
pub use flares::make_flares;
pub use lollipop::move_lollipop;
pub use roundabout::{expand_roundabout, tag_node_as_mini_roundabout, tag_way_as_roundabout};
