//! Application State: zentrale Datenhaltung.

use super::history::{EditHistory, Snapshot};
use super::CommandLog;
use crate::core::{MapDataset, NodeId, Notice, PrimitiveId, WayId};
use crate::shared::RexOptions;
use indexmap::IndexSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Auswahlbezogener Anwendungszustand
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Selektierte Primitive in Auswahl-Reihenfolge (Arc für O(1)-Snapshots)
    pub selected: Arc<IndexSet<PrimitiveId>>,
}

impl SelectionState {
    /// Erstellt einen leeren Selektionszustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gibt eine mutable Referenz auf das Set zurück (CoW: klont nur wenn nötig).
    #[inline]
    pub fn ids_mut(&mut self) -> &mut IndexSet<PrimitiveId> {
        Arc::make_mut(&mut self.selected)
    }

    /// Ersetzt die Selektion vollständig.
    pub fn set(&mut self, items: impl IntoIterator<Item = PrimitiveId>) {
        let ids = self.ids_mut();
        ids.clear();
        ids.extend(items);
    }

    /// Selektierte Nodes in Auswahl-Reihenfolge
    pub fn nodes(&self) -> Vec<NodeId> {
        self.selected
            .iter()
            .filter_map(|p| match p {
                PrimitiveId::Node(id) => Some(*id),
                PrimitiveId::Way(_) => None,
            })
            .collect()
    }

    /// Selektierte Ways in Auswahl-Reihenfolge
    pub fn ways(&self) -> Vec<WayId> {
        self.selected
            .iter()
            .filter_map(|p| match p {
                PrimitiveId::Way(id) => Some(*id),
                PrimitiveId::Node(_) => None,
            })
            .collect()
    }

    /// Prüft, ob ein Primitiv selektiert ist.
    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.selected.contains(&id)
    }

    /// Anzahl selektierter Primitive
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Gibt `true` zurück, wenn nichts selektiert ist.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Aktuell geladener Datensatz (None = keine Datei geladen)
    pub map: Option<Arc<MapDataset>>,
    /// Selection-State
    pub selection: SelectionState,
    /// Verlauf übernommener Aktionen
    pub command_log: CommandLog,
    /// Undo/Redo-History (Snapshot-basiert)
    pub history: EditHistory,
    /// Laufzeit-Optionen
    pub options: RexOptions,
    /// Zieldatei beim Übernehmen geänderter Optionen
    pub options_path: PathBuf,
    /// Hinweise der zuletzt ausgeführten Aktion
    pub notices: Vec<Notice>,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self::with_options(RexOptions::default())
    }

    /// Erstellt einen leeren App-State mit den gegebenen Optionen
    pub fn with_options(options: RexOptions) -> Self {
        Self {
            map: None,
            selection: SelectionState::new(),
            command_log: CommandLog::new(),
            history: EditHistory::new_with_capacity(options.history_depth),
            options,
            options_path: RexOptions::config_path(),
            notices: Vec::new(),
        }
    }

    /// Setzt einen neuen Datensatz; Selektion und History beginnen leer.
    pub fn set_map(&mut self, map: MapDataset) {
        self.map = Some(Arc::new(map));
        self.selection = SelectionState::new();
        self.history = EditHistory::new_with_capacity(self.options.history_depth);
    }

    /// Gibt die Anzahl der Nodes zurück
    pub fn node_count(&self) -> usize {
        self.map.as_ref().map_or(0, |m| m.node_count())
    }

    /// Gibt die Anzahl der Ways zurück
    pub fn way_count(&self) -> usize {
        self.map.as_ref().map_or(0, |m| m.way_count())
    }

    /// Undo/Redo helpers
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Meldet einen Hinweis (Log + Liste der aktuellen Aktion).
    pub fn report(&mut self, notice: Notice) {
        notice.log();
        self.notices.push(notice);
    }

    /// Optionen dieser Aktion; ungültige Werte werden mit Warnung ersetzt.
    pub fn action_options(&mut self) -> RexOptions {
        let mut options = self.options.clone();
        for correction in options.sanitize() {
            self.report(Notice::warning(correction));
        }
        options
    }

    /// Erstellt einen O(1)-Snapshot des aktuellen Zustands.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_state(self)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
