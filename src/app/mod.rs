//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod history;
mod intent_mapping;
/// Application State und Controller
///
/// Dieses Modul verwaltet den Zustand der Anwendung (geladener Datensatz,
/// Selektion, History, Optionen, Hinweise).
pub mod state;
pub mod use_cases;

pub use command_log::{CommandLog, CommandLogEntry};
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use history::{EditHistory, Snapshot};
pub use state::{AppState, SelectionState};
