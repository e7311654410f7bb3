//! Use-Case-Funktionen für Dateiaktionen.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use crate::app::AppState;
use anyhow::Context;
use std::path::Path;

/// Lädt eine OSM-Datei in den AppState (Selektion und History werden zurückgesetzt).
pub fn load_osm_file(state: &mut AppState, path: &Path) -> anyhow::Result<()> {
    let xml_content = std::fs::read_to_string(path)
        .with_context(|| format!("Datei nicht lesbar: {}", path.display()))?;
    let map = crate::xml::parse_osm(&xml_content)
        .with_context(|| format!("Ungültiges OSM in {}", path.display()))?;

    log::info!(
        "Geladen: {} ({} Nodes, {} Ways)",
        path.display(),
        map.node_count(),
        map.way_count()
    );
    state.set_map(map);
    Ok(())
}

/// Speichert den aktuellen Datensatz als OSM-Datei.
pub fn save_osm_file(state: &AppState, path: &Path) -> anyhow::Result<()> {
    let map = state
        .map
        .as_deref()
        .context("Keine Karte geladen, nichts zu speichern")?;
    let xml = crate::xml::write_osm(map)?;
    std::fs::write(path, xml)
        .with_context(|| format!("Schreiben fehlgeschlagen: {}", path.display()))?;
    log::info!("Gespeichert: {}", path.display());
    Ok(())
}
