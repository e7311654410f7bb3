//! Use-Case-Funktionen für die Selektion (keine History-Einträge).

use crate::app::AppState;
use crate::core::{flare_candidates, Notice, PrimitiveId, WayId};

/// Ersetzt die Selektion; unbekannte Primitive werden verworfen.
pub fn set_selection(state: &mut AppState, selection: Vec<PrimitiveId>) {
    let Some(map) = state.map.as_deref() else {
        state.selection.set(selection);
        return;
    };
    let known: Vec<PrimitiveId> = selection
        .into_iter()
        .filter(|p| match p {
            PrimitiveId::Node(id) => map.node(*id).is_some(),
            PrimitiveId::Way(id) => map.way(*id).is_some(),
        })
        .collect();
    log::debug!("Selektion: {} Primitive", known.len());
    state.selection.set(known);
}

/// Selektiert die Flare-Kandidaten des einzeln selektierten Kreisverkehrs.
pub fn select_flare_candidates(state: &mut AppState) {
    let ways = state.selection.ways();
    let [way] = ways.as_slice() else {
        state.report(Notice::info(
            "Flare-Kandidaten: genau ein Kreisverkehr-Way muss selektiert sein",
        ));
        return;
    };
    if !state.selection.nodes().is_empty() {
        state.report(Notice::info(
            "Flare-Kandidaten: nur den Kreisverkehr-Way selektieren",
        ));
        return;
    }
    select_candidates_of(state, *way);
}

/// Folgeschritt nach Aufweiten/Taggen, falls in den Optionen aktiviert.
pub fn select_flare_candidates_after_edit(state: &mut AppState, way: WayId) {
    if state.options.select_flare_candidates_after_expand {
        select_candidates_of(state, way);
    }
}

fn select_candidates_of(state: &mut AppState, way: WayId) {
    let Some(map) = state.map.as_deref() else {
        return;
    };
    match flare_candidates(map, way) {
        Ok(candidates) if candidates.is_empty() => {
            log::info!("Keine Flare-Kandidaten an {}", way);
        }
        Ok(candidates) => {
            log::info!("{} Flare-Kandidaten an {}", candidates.len(), way);
            state
                .selection
                .set(candidates.into_iter().map(PrimitiveId::Node));
        }
        Err(err) => state.report(Notice::from_error(&err)),
    }
}
