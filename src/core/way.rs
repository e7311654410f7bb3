//! Repräsentiert einen OSM-Way als geordnete Folge von Node-Referenzen.

use super::{NodeId, Tags};
use std::fmt;

/// Identität eines Ways. Negative IDs kennzeichnen neu erzeugte Ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WayId(pub i64);

impl fmt::Display for WayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Ein Way: geordnete Node-Referenzen plus Tags
#[derive(Debug, Clone, PartialEq)]
pub struct MapWay {
    /// Eindeutige ID
    pub id: WayId,
    /// Node-Referenzen in Reihenfolge (geschlossen: letzter == erster)
    pub nodes: Vec<NodeId>,
    /// Tags (key → value)
    pub tags: Tags,
}

impl MapWay {
    /// Erstellt einen Way ohne Tags
    pub fn new(id: WayId, nodes: Vec<NodeId>) -> Self {
        Self {
            id,
            nodes,
            tags: Tags::new(),
        }
    }

    /// Erstellt einen Way mit Tags
    pub fn with_tags(id: WayId, nodes: Vec<NodeId>, tags: Tags) -> Self {
        Self { id, nodes, tags }
    }

    /// Liefert den Wert eines Tags
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Erster Node des Ways
    pub fn first_node(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Letzter Node des Ways
    pub fn last_node(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Geschlossen, wenn erste und letzte Referenz denselben Node bezeichnen.
    pub fn is_closed(&self) -> bool {
        self.nodes.len() >= 2 && self.first_node() == self.last_node()
    }

    /// Prüft, ob `node` erster oder letzter Node ist.
    pub fn is_first_last_node(&self, node: NodeId) -> bool {
        self.first_node() == Some(node) || self.last_node() == Some(node)
    }

    /// Prüft, ob der Way `node` enthält.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Prüft, ob `node` ausschließlich als innerer Vertex vorkommt.
    pub fn has_interior_node(&self, node: NodeId) -> bool {
        self.contains_node(node) && !self.is_first_last_node(node)
    }

    /// Index des ersten Vorkommens von `node`.
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    /// Anzahl unterschiedlicher Vertices (Schließ-Referenz nicht doppelt gezählt).
    pub fn real_node_count(&self) -> usize {
        if self.is_closed() {
            self.nodes.len() - 1
        } else {
            self.nodes.len()
        }
    }

    /// Einziger Nachbar eines End-Nodes entlang des Ways.
    ///
    /// `None`, wenn `node` kein End-Node ist oder der Way zu kurz ist.
    pub fn endpoint_neighbor(&self, node: NodeId) -> Option<NodeId> {
        if self.nodes.len() < 2 {
            return None;
        }
        if self.first_node() == Some(node) {
            Some(self.nodes[1])
        } else if self.last_node() == Some(node) {
            Some(self.nodes[self.nodes.len() - 2])
        } else {
            None
        }
    }

    /// Ersetzt alle Vorkommen von `from` durch `to`; liefert die Anzahl Ersetzungen.
    pub fn replace_node(&mut self, from: NodeId, to: NodeId) -> usize {
        let mut replaced = 0;
        for n in self.nodes.iter_mut().filter(|n| **n == from) {
            *n = to;
            replaced += 1;
        }
        replaced
    }
}
