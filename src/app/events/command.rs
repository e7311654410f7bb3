use crate::core::{NodeId, Notice, PrimitiveId, WayId};
use crate::shared::RexOptions;
use std::path::PathBuf;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Node als Mini-Kreisverkehr taggen (erster Tastendruck)
    TagNodeAsMiniRoundabout { node: NodeId },
    /// Mini-Kreisverkehr zu einem Ring-Way aufweiten (zweiter Tastendruck)
    ExpandRoundabout { node: NodeId },
    /// Geschlossenen Way als Kreisverkehr taggen
    TagWayAsRoundabout { way: WayId },
    /// Flares an allen Nodes eines gemeinsamen Ways bauen
    MakeFlares { nodes: Vec<NodeId> },
    /// Lollipop-Endpunkt weiterschieben
    MoveLollipop { way: WayId, node: NodeId },
    /// Flare-Kandidaten des selektierten Kreisverkehrs selektieren
    SelectFlareCandidates,
    /// Selektion ersetzen
    SetSelection { selection: Vec<PrimitiveId> },
    /// Letzte Aktion rückgängig machen
    Undo,
    /// Rückgängig gemachte Aktion wiederholen
    Redo,
    /// Hinweis ohne weitere Aktion melden
    ReportNotice { notice: Notice },
    /// OSM-Datei laden
    LoadFile { path: PathBuf },
    /// Datensatz als OSM-Datei speichern
    SaveFile { path: PathBuf },
    /// Optionen übernehmen
    ApplyOptions { options: RexOptions },
}
