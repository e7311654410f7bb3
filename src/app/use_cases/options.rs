//! Use-Case: Laufzeit-Optionen übernehmen.

use crate::app::AppState;
use crate::core::Notice;
use crate::shared::RexOptions;

/// Übernimmt neue Optionen und speichert sie nach `state.options_path`.
///
/// Ungültige Zahlenwerte werden mit Warnung auf den Standard zurückgesetzt.
/// Eine geänderte History-Tiefe gilt ab dem nächsten geladenen Datensatz.
pub fn apply_options(state: &mut AppState, mut options: RexOptions) -> anyhow::Result<()> {
    for correction in options.sanitize() {
        state.report(Notice::warning(correction));
    }
    state.options = options;
    state.options.save_to_file(&state.options_path)
}
