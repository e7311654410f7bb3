//! Use-Case: Lollipop-Endpunkt entlang des anderen Ways weiterschieben.

use super::run_edit;
use crate::app::AppState;
use crate::core::{NodeId, PrimitiveId, WayId};

/// Schiebt den Endpunkt weiter und selektiert Way + neuen Endpunkt,
/// sodass ein erneuter Tastendruck weiterwandert.
pub fn move_lollipop(state: &mut AppState, way: WayId, node: NodeId) {
    if let Some(target) = run_edit(state, "Lollipop", |batch| {
        crate::core::move_lollipop(batch, way, node)
    }) {
        state
            .selection
            .set([PrimitiveId::Way(way), PrimitiveId::Node(target)]);
    }
}
