//! XML Import/Export für OSM-Datensätze.
//!
//! Dieses Modul implementiert das Parsen und Schreiben von OSM-XML (API 0.6)
//! für Nodes, Ways und Tags.
pub mod parser;
pub mod writer;

pub use parser::parse_osm;
pub use writer::write_osm;
