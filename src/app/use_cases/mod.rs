//! Use-Cases der Application-Layer-Orchestrierung.

pub mod editing;
pub mod file_io;
pub mod history;
pub mod options;
pub mod selection;
