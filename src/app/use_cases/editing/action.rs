//! Gemeinsamer Rahmen jeder Edit-Aktion: eine Aktion = ein Undo-Schritt.

use crate::app::AppState;
use crate::core::{EditBatch, Notice};
use crate::error::RexResult;
use std::sync::Arc;

/// Führt `edit` als atomare Aktion auf dem geladenen Datensatz aus.
///
/// Vor der Aktion wird ein O(1)-Snapshot gezogen. Bei Erfolg landet er in
/// der History und die Operationen im Command-Log; bei Fehler wird er
/// wiederhergestellt und der Fehler als Hinweis gemeldet. Hinweise der
/// Engine werden in beiden Fällen an den State weitergereicht.
pub fn run_edit<T>(
    state: &mut AppState,
    label: &str,
    edit: impl FnOnce(&mut EditBatch<'_>) -> RexResult<T>,
) -> Option<T> {
    if state.map.is_none() {
        state.report(Notice::info(format!("{}: keine Karte geladen", label)));
        return None;
    }

    // Snapshot VOR Mutation
    let snapshot = state.snapshot();

    let (result, ops, notices) = {
        let map = Arc::make_mut(state.map.as_mut()?);
        let mut batch = EditBatch::new(map);
        let result = edit(&mut batch);
        let (ops, notices) = batch.into_parts();
        (result, ops, notices)
    };
    state.notices.extend(notices);

    match result {
        Ok(value) => {
            if ops.is_empty() {
                log::debug!("{}: keine Änderungen", label);
            } else {
                log::info!("{}: {} Operationen übernommen", label, ops.len());
                state.history.record_snapshot(label, snapshot);
                state.command_log.record(label, ops);
            }
            Some(value)
        }
        Err(err) => {
            log::debug!("{}: Rollback nach {} Operationen", label, ops.len());
            snapshot.apply_to(state);
            state.report(Notice::from_error(&err));
            None
        }
    }
}
