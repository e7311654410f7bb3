use super::SelectionState;
use crate::core::MapDataset;
use std::collections::VecDeque;
use std::sync::Arc;

/// Snapshot reduziert auf die für Undo/Redo relevanten Teile.
///
/// Nutzt Arc-Clone (Copy-on-Write): Das Erstellen eines Snapshots ist O(1),
/// der Klon des Datensatzes findet erst beim nächsten `Arc::make_mut()` in
/// einem Use-Case statt.
#[derive(Clone)]
pub struct Snapshot {
    /// Optionaler Datensatz (Arc-Klon für O(1)-Snapshot)
    pub map: Option<Arc<MapDataset>>,
    /// Selektionszustand zum Zeitpunkt des Snapshots
    pub selection: SelectionState,
}

impl Snapshot {
    /// Erstellt einen O(1)-Snapshot durch Arc-Clone statt Deep-Clone.
    pub fn from_state(state: &crate::app::AppState) -> Self {
        Self {
            map: state.map.clone(),
            selection: state.selection.clone(),
        }
    }

    /// Stellt den Snapshot wieder her (O(1) Arc-Zuweisung).
    pub fn apply_to(self, state: &mut crate::app::AppState) {
        state.map = self.map;
        state.selection = self.selection;
    }
}

/// Ein History-Eintrag: Zustand vor bzw. nach einer benannten Aktion
struct HistoryEntry {
    label: String,
    snapshot: Snapshot,
}

/// Undo/Redo-Manager mit Snapshotting; eine Aktion = ein Eintrag.
#[derive(Default)]
pub struct EditHistory {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: VecDeque<HistoryEntry>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_depth),
            redo_stack: VecDeque::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Speichert den Zustand vor der Aktion `label`. Leert den Redo-Stack.
    pub fn record_snapshot(&mut self, label: impl Into<String>, snap: Snapshot) {
        push_bounded(
            &mut self.undo_stack,
            HistoryEntry {
                label: label.into(),
                snapshot: snap,
            },
            self.max_depth,
        );
        self.redo_stack.clear();
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Name der Aktion, die ein Undo rückgängig machen würde
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.label.as_str())
    }

    /// Name der Aktion, die ein Redo wiederherstellen würde
    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.back().map(|e| e.label.as_str())
    }

    /// Pop undo stack and push `current` onto redo stack; returns the snapshot to apply.
    pub fn pop_undo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let prev = self.undo_stack.pop_back()?;
        push_bounded(
            &mut self.redo_stack,
            HistoryEntry {
                label: prev.label,
                snapshot: current,
            },
            self.max_depth,
        );
        Some(prev.snapshot)
    }

    /// Pop redo stack and push `current` onto undo stack; returns the snapshot to apply.
    pub fn pop_redo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop_back()?;
        push_bounded(
            &mut self.undo_stack,
            HistoryEntry {
                label: next.label,
                snapshot: current,
            },
            self.max_depth,
        );
        Some(next.snapshot)
    }
}

fn push_bounded(stack: &mut VecDeque<HistoryEntry>, entry: HistoryEntry, max_depth: usize) {
    if max_depth == 0 {
        return;
    }
    while stack.len() >= max_depth {
        stack.pop_front();
    }
    stack.push_back(entry);
}
