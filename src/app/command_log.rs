//! Command-Log der übernommenen Aktionen mit ihren Edit-Operationen.

use crate::core::EditOp;

/// Eine übernommene Benutzeraktion
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLogEntry {
    /// Name der Aktion
    pub label: String,
    /// Angewendete Operationen in Reihenfolge
    pub ops: Vec<EditOp>,
}

/// Speichert übernommene Aktionen in Reihenfolge.
#[derive(Default)]
pub struct CommandLog {
    entries: Vec<CommandLogEntry>,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;
}

impl CommandLog {
    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fügt eine übernommene Aktion hinzu.
    /// Begrenzt auf MAX_ENTRIES, ältere Einträge werden verworfen.
    pub fn record(&mut self, label: impl Into<String>, ops: Vec<EditOp>) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(CommandLogEntry {
            label: label.into(),
            ops,
        });
    }

    /// Gibt die Anzahl der geloggten Aktionen zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Aktionen vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[CommandLogEntry] {
        &self.entries
    }

    /// Zuletzt übernommene Aktion
    pub fn last(&self) -> Option<&CommandLogEntry> {
        self.entries.last()
    }
}
