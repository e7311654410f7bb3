//! Application Controller für zentrale Event-Verarbeitung.

use super::use_cases;
use super::{AppCommand, AppIntent, AppState};

/// Orchestriert Host-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    ///
    /// Die Hinweise im State gehören danach zu genau diesem Intent.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        state.notices.clear();
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        log::debug!("Command: {:?}", command);
        use use_cases::editing;

        match command {
            // === Kreisverkehr ===
            AppCommand::TagNodeAsMiniRoundabout { node } => {
                editing::tag_node_as_mini_roundabout(state, node)
            }
            AppCommand::ExpandRoundabout { node } => editing::expand_roundabout(state, node),
            AppCommand::TagWayAsRoundabout { way } => editing::tag_way_as_roundabout(state, way),

            // === Flares & Lollipop ===
            AppCommand::MakeFlares { nodes } => editing::make_flares(state, &nodes),
            AppCommand::MoveLollipop { way, node } => editing::move_lollipop(state, way, node),

            // === Selektion ===
            AppCommand::SelectFlareCandidates => {
                use_cases::selection::select_flare_candidates(state)
            }
            AppCommand::SetSelection { selection } => {
                use_cases::selection::set_selection(state, selection)
            }

            // === History ===
            AppCommand::Undo => use_cases::history::undo(state),
            AppCommand::Redo => use_cases::history::redo(state),

            // === Hinweise ===
            AppCommand::ReportNotice { notice } => state.report(notice),

            // === Datei-I/O & Optionen ===
            AppCommand::LoadFile { path } => use_cases::file_io::load_osm_file(state, &path)?,
            AppCommand::SaveFile { path } => use_cases::file_io::save_osm_file(state, &path)?,
            AppCommand::ApplyOptions { options } => {
                use_cases::options::apply_options(state, options)?
            }
        }

        Ok(())
    }
}
