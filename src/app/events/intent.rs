use crate::core::PrimitiveId;
use crate::shared::RexOptions;
use std::path::PathBuf;

/// Intents sind Benutzer- oder Host-Absichten, noch ohne Entscheidung,
/// welche Operation ausgeführt wird.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Das Tastenkürzel des Expanders wurde gedrückt (Operation nach Selektion)
    RexShortcutPressed,
    /// Der Host hat die Selektion geändert
    SelectionChanged { selection: Vec<PrimitiveId> },
    /// Flare-Kandidaten am selektierten Kreisverkehr auswählen
    SelectFlareCandidatesRequested,
    /// Undo anfordern
    UndoRequested,
    /// Redo anfordern
    RedoRequested,
    /// OSM-Datei zum Laden gewählt
    FileSelected { path: PathBuf },
    /// Zielpfad zum Speichern gewählt
    SaveFilePathSelected { path: PathBuf },
    /// Optionen wurden geändert
    OptionsChanged { options: RexOptions },
}
