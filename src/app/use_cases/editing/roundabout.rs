//! Use-Cases: Mini-Kreisverkehr taggen, aufweiten, geschlossenen Way taggen.

use super::run_edit;
use crate::app::use_cases::selection::select_flare_candidates_after_edit;
use crate::app::AppState;
use crate::core::{NodeId, Notice, PrimitiveId, RoundaboutParams, WayId};

/// Erster Tastendruck: taggt den Node als Mini-Kreisverkehr.
pub fn tag_node_as_mini_roundabout(state: &mut AppState, node: NodeId) {
    let diameter = state.action_options().diameter_meter;
    if run_edit(state, "Mini-Kreisverkehr", |batch| {
        crate::core::tag_node_as_mini_roundabout(batch, node, diameter)
    })
    .is_some()
    {
        log::info!("{} als Mini-Kreisverkehr getaggt ({} m)", node, diameter);
    }
}

/// Zweiter Tastendruck: weitet den Mini-Kreisverkehr zu einem Ring-Way auf.
///
/// Der neue Ring wird selektiert; je nach Option danach die Flare-Kandidaten.
pub fn expand_roundabout(state: &mut AppState, node: NodeId) {
    let Some(center) = state.map.as_ref().and_then(|m| m.node(node)).cloned() else {
        state.report(Notice::info(format!(
            "Kreisverkehr: {} nicht gefunden",
            node
        )));
        return;
    };
    let (params, notices) = RoundaboutParams::resolve(&state.options, &center);
    for notice in notices {
        state.report(notice);
    }

    let Some(way) = run_edit(state, "Kreisverkehr aufweiten", |batch| {
        crate::core::build_roundabout(batch, node, &params)
    }) else {
        return;
    };
    state.selection.set([PrimitiveId::Way(way)]);
    select_flare_candidates_after_edit(state, way);
}

/// Taggt einen geschlossenen Way als Kreisverkehr.
pub fn tag_way_as_roundabout(state: &mut AppState, way: WayId) {
    let closed = state
        .map
        .as_ref()
        .and_then(|m| m.way(way))
        .is_some_and(|w| w.is_closed());
    if !closed {
        state.report(Notice::info(format!(
            "{} ist kein geschlossener Way",
            way
        )));
        return;
    }

    if run_edit(state, "Way als Kreisverkehr", |batch| {
        crate::core::tag_way_as_roundabout(batch, way)
    })
    .is_some()
    {
        state.selection.set([PrimitiveId::Way(way)]);
        select_flare_candidates_after_edit(state, way);
    }
}
