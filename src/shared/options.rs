//! Zentrale Konfiguration des Roundabout-Expanders.
//!
//! `RexOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Kreisverkehr ────────────────────────────────────────────────────

/// Standard-Durchmesser neuer Kreisverkehre in Metern.
pub const DEFAULT_DIAMETER_METER: f64 = 12.0;
/// Maximale Winkellücke zwischen zwei Ring-Nodes in Grad.
pub const DEFAULT_MAX_GAP_DEGREES: f64 = 30.0;

// ── Flares ──────────────────────────────────────────────────────────

/// Abstand, um den die Zufahrt für ein Flare zurückgesetzt wird (Meter).
pub const DEFAULT_FLARE_LENGTH_METERS: f64 = 6.0;
/// Multi-Flare akzeptiert weniger als so viele selektierte Nodes.
pub const DEFAULT_MAX_FLARE_NODES: usize = 10;

// ── History ─────────────────────────────────────────────────────────

/// Maximale Undo-Tiefe.
pub const DEFAULT_HISTORY_DEPTH: usize = 200;

/// Name der Optionen-Datei neben der Binary.
pub const CONFIG_FILE_NAME: &str = "rex.toml";

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `rex.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RexOptions {
    // ── Kreisverkehr ────────────────────────────────────────────
    /// Durchmesser neuer Kreisverkehre (Meter); `diameter=*` am Node hat Vorrang
    pub diameter_meter: f64,
    /// Maximale Winkellücke zwischen Ring-Nodes (Grad)
    pub max_gap_degrees: f64,
    /// Linksverkehr: Ring im Uhrzeigersinn
    #[serde(default)]
    pub lefthand_traffic: bool,

    // ── Flares ──────────────────────────────────────────────────
    /// Rücksetz-Länge der Zufahrt (Meter)
    #[serde(default = "default_flare_length_meters")]
    pub flare_length_meters: f64,
    /// Nach dem Aufweiten die Flare-Kandidaten selektieren
    #[serde(default = "default_true")]
    pub select_flare_candidates_after_expand: bool,
    /// Obergrenze (exklusiv) für Multi-Flare-Selektionen
    #[serde(default = "default_max_flare_nodes")]
    pub max_flare_nodes: usize,

    // ── History ─────────────────────────────────────────────────
    /// Maximale Undo-Tiefe
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
}

impl Default for RexOptions {
    fn default() -> Self {
        Self {
            diameter_meter: DEFAULT_DIAMETER_METER,
            max_gap_degrees: DEFAULT_MAX_GAP_DEGREES,
            lefthand_traffic: false,
            flare_length_meters: DEFAULT_FLARE_LENGTH_METERS,
            select_flare_candidates_after_expand: true,
            max_flare_nodes: DEFAULT_MAX_FLARE_NODES,
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

fn default_flare_length_meters() -> f64 {
    DEFAULT_FLARE_LENGTH_METERS
}

fn default_true() -> bool {
    true
}

fn default_max_flare_nodes() -> usize {
    DEFAULT_MAX_FLARE_NODES
}

fn default_history_depth() -> usize {
    DEFAULT_HISTORY_DEPTH
}

impl RexOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler → Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(mut opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    for correction in opts.sanitize() {
                        log::warn!("{}", correction);
                    }
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Ersetzt ungültige Zahlenwerte feldweise durch ihren Standardwert.
    ///
    /// Liefert je korrigiertem Feld eine Meldung.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut corrections = Vec::new();
        let mut check = |name: &str, value: &mut f64, valid: bool, default: f64| {
            if !valid {
                corrections.push(format!(
                    "Option {} = {} ist ungültig, verwende {}",
                    name, value, default
                ));
                *value = default;
            }
        };

        let diameter = self.diameter_meter;
        check(
            "diameter_meter",
            &mut self.diameter_meter,
            diameter.is_finite() && diameter > 0.0,
            DEFAULT_DIAMETER_METER,
        );
        let max_gap = self.max_gap_degrees;
        check(
            "max_gap_degrees",
            &mut self.max_gap_degrees,
            max_gap > 0.0 && max_gap < 360.0,
            DEFAULT_MAX_GAP_DEGREES,
        );
        let flare = self.flare_length_meters;
        check(
            "flare_length_meters",
            &mut self.flare_length_meters,
            flare.is_finite() && flare > 0.0,
            DEFAULT_FLARE_LENGTH_METERS,
        );
        corrections
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("rex"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Maximale Winkellücke in Radiant.
    pub fn max_gap_radians(&self) -> f64 {
        self.max_gap_degrees.to_radians()
    }
}
