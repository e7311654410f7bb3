//! Repräsentiert einen einzelnen OSM-Node.

use super::{LatLon, Tags};
use std::fmt;

/// Identität eines Nodes. Negative IDs kennzeichnen neu erzeugte Nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Ein Node mit Position und Tags
#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    /// Eindeutige ID
    pub id: NodeId,
    /// Geografische Position
    pub coord: LatLon,
    /// Tags (key → value)
    pub tags: Tags,
}

impl MapNode {
    /// Erstellt einen Node ohne Tags
    pub fn new(id: NodeId, coord: LatLon) -> Self {
        Self {
            id,
            coord,
            tags: Tags::new(),
        }
    }

    /// Erstellt einen Node mit Tags
    pub fn with_tags(id: NodeId, coord: LatLon, tags: Tags) -> Self {
        Self { id, coord, tags }
    }

    /// Liefert den Wert eines Tags
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}
