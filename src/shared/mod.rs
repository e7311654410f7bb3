//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die `core`-Engines und `app` gemeinsam lesen.
pub mod options;

pub use options::RexOptions;
pub use options::{CONFIG_FILE_NAME, DEFAULT_DIAMETER_METER};
