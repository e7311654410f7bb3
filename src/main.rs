//! Roundabout Expander (rex).
//!
//! Kommandozeilen-Host: lädt eine OSM-Datei, setzt die Selektion, drückt das
//! Tastenkürzel `presses`-mal und schreibt das Ergebnis.

use clap::Parser;
use roundabout_expander::{AppController, AppIntent, AppState, NoticeLevel, PrimitiveId, RexOptions};
use std::path::PathBuf;

/// Erweitert Kreuzungen in OSM-Daten zu Kreisverkehren
#[derive(Parser, Debug)]
#[command(name = "rex")]
#[command(version)]
struct Cli {
    /// Eingabedatei (.osm)
    input: PathBuf,

    /// Ausgabedatei (.osm)
    output: PathBuf,

    /// Selektion als Kommaliste, z.B. `n12` oder `n12,w7`
    #[arg(value_parser = parse_selection)]
    selection: Selection,

    /// Anzahl Tastendrücke
    #[arg(default_value_t = 1)]
    presses: usize,
}

/// Ein Positionsargument, damit `presses` danach optional bleiben kann
#[derive(Debug, Clone, PartialEq)]
struct Selection(Vec<PrimitiveId>);

fn parse_selection(raw: &str) -> Result<Selection, String> {
    let ids = raw
        .split(',')
        .map(str::parse::<PrimitiveId>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    Ok(Selection(ids))
}

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    log::info!("Roundabout Expander v{} startet...", env!("CARGO_PKG_VERSION"));

    // Optionen aus TOML laden (oder Standardwerte)
    let options = RexOptions::load_from_file(&RexOptions::config_path());
    let mut state = AppState::with_options(options);
    let mut controller = AppController::new();

    controller.handle_intent(&mut state, AppIntent::FileSelected { path: cli.input })?;
    controller.handle_intent(
        &mut state,
        AppIntent::SelectionChanged {
            selection: cli.selection.0,
        },
    )?;

    for press in 1..=cli.presses {
        controller.handle_intent(&mut state, AppIntent::RexShortcutPressed)?;
        for notice in &state.notices {
            let prefix = match notice.level {
                NoticeLevel::Info => "Info",
                NoticeLevel::Warning => "Warnung",
            };
            eprintln!("[{}] {}: {}", press, prefix, notice.message);
        }
    }

    controller.handle_intent(
        &mut state,
        AppIntent::SaveFilePathSelected { path: cli.output },
    )?;

    let selected: Vec<String> = state
        .selection
        .selected
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("Selektion: {}", selected.join(","));
    Ok(())
}
