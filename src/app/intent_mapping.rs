//! Mapping von Intents auf mutierende App-Commands.
//!
//! Für `RexShortcutPressed` entscheidet die aktuelle Selektion, welche
//! einzelne Operation ausgeführt wird.

use super::{AppCommand, AppIntent, AppState};
use crate::core::{MapDataset, NodeId, Notice, WayId};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::RexShortcutPressed => vec![classify_selection(state)],
        AppIntent::SelectionChanged { selection } => vec![AppCommand::SetSelection { selection }],
        AppIntent::SelectFlareCandidatesRequested => vec![AppCommand::SelectFlareCandidates],
        AppIntent::UndoRequested => vec![AppCommand::Undo],
        AppIntent::RedoRequested => vec![AppCommand::Redo],
        AppIntent::FileSelected { path } => vec![AppCommand::LoadFile { path }],
        AppIntent::SaveFilePathSelected { path } => vec![AppCommand::SaveFile { path }],
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
    }
}

/// Wählt die Operation für das Tastenkürzel anhand der Selektion.
fn classify_selection(state: &AppState) -> AppCommand {
    let Some(map) = state.map.as_deref() else {
        return not_applicable("keine Karte geladen");
    };
    let nodes = state.selection.nodes();
    let ways = state.selection.ways();

    match (nodes.as_slice(), ways.as_slice()) {
        ([node], []) => classify_single_node(map, *node),
        ([], [way]) => classify_single_way(map, *way),
        ([node], [way]) => AppCommand::MoveLollipop {
            way: *way,
            node: *node,
        },
        (many, []) if (2..state.options.max_flare_nodes).contains(&many.len()) => {
            AppCommand::MakeFlares {
                nodes: many.to_vec(),
            }
        }
        ([], []) => not_applicable("nichts selektiert"),
        _ => not_applicable("Selektion passt zu keiner Operation"),
    }
}

fn classify_single_node(map: &MapDataset, node: NodeId) -> AppCommand {
    match map.node(node) {
        Some(n) if n.tag("highway") == Some("mini_roundabout") => {
            AppCommand::ExpandRoundabout { node }
        }
        Some(_) => AppCommand::TagNodeAsMiniRoundabout { node },
        None => not_applicable("selektierter Node existiert nicht"),
    }
}

fn classify_single_way(map: &MapDataset, way: WayId) -> AppCommand {
    match map.way(way) {
        Some(w) if w.is_closed() => AppCommand::TagWayAsRoundabout { way },
        Some(_) => not_applicable("nur geschlossene Ways können Kreisverkehr werden"),
        None => not_applicable("selektierter Way existiert nicht"),
    }
}

fn not_applicable(reason: &str) -> AppCommand {
    AppCommand::ReportNotice {
        notice: Notice::info(format!("Keine Operation: {}", reason)),
    }
}
