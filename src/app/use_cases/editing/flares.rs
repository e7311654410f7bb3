//! Use-Case: Flares an mehreren selektierten Nodes bauen.

use super::run_edit;
use crate::app::AppState;
use crate::core::{NodeId, PrimitiveId};

/// Baut an allen `nodes` Flares (eine Aktion) und selektiert den Kreisverkehr.
pub fn make_flares(state: &mut AppState, nodes: &[NodeId]) {
    let length = state.action_options().flare_length_meters;
    if let Some(roundabout) = run_edit(state, "Flares", |batch| {
        crate::core::build_flares(batch, nodes, length)
    }) {
        state.selection.set([PrimitiveId::Way(roundabout)]);
    }
}
