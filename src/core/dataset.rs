//! Der zentrale Kartendatensatz mit Nodes, Ways und Referrer-Index.

use super::{apply_tag_changes, EditOp, LatLon, MapNode, MapWay, NodeId, WayId};
use crate::error::{RexError, RexResult};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Verweis auf ein beliebiges Primitiv (für Selektion und Tag-Änderungen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveId {
    /// Ein Node
    Node(NodeId),
    /// Ein Way
    Way(WayId),
}

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveId::Node(id) => id.fmt(f),
            PrimitiveId::Way(id) => id.fmt(f),
        }
    }
}

/// Kurzform `n12` / `w7` (wie in der Anzeige)
impl FromStr for PrimitiveId {
    type Err = RexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || RexError::PreconditionNotMet(format!("ungültige Primitiv-Angabe '{}'", s));
        let (kind, digits) = s.split_at_checked(1).ok_or_else(invalid)?;
        let id: i64 = digits.parse().map_err(|_| invalid())?;
        match kind {
            "n" | "N" => Ok(PrimitiveId::Node(NodeId(id))),
            "w" | "W" => Ok(PrimitiveId::Way(WayId(id))),
            _ => Err(invalid()),
        }
    }
}

/// Alle Nodes und Ways einer Karte.
///
/// Invariante: jeder von einem Way referenzierte Node existiert. Der
/// Referrer-Index wird bei jeder Way-Mutation mitgeführt.
#[derive(Debug, Clone, Default)]
pub struct MapDataset {
    /// Alle Nodes in Einfüge-Reihenfolge
    nodes: IndexMap<NodeId, MapNode>,
    /// Alle Ways in Einfüge-Reihenfolge
    ways: IndexMap<WayId, MapWay>,
    /// Node → Ways, die ihn enthalten
    referrers: HashMap<NodeId, IndexSet<WayId>>,
    /// Kleinste vergebene Node-ID (für neue, negative IDs)
    min_node_id: i64,
    /// Kleinste vergebene Way-ID (für neue, negative IDs)
    min_way_id: i64,
}

impl MapDataset {
    /// Erstellt einen leeren Datensatz
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen Node hinzu (ersetzt einen gleichnamigen Node inkl. Position/Tags)
    pub fn add_node(&mut self, node: MapNode) {
        self.min_node_id = self.min_node_id.min(node.id.0);
        self.nodes.insert(node.id, node);
    }

    /// Fügt einen Way hinzu. Alle referenzierten Nodes müssen existieren.
    pub fn add_way(&mut self, way: MapWay) -> RexResult<()> {
        self.check_references(way.id, &way.nodes)?;
        if let Some(old) = self.ways.get(&way.id) {
            let old_nodes = old.nodes.clone();
            self.unindex_way(way.id, &old_nodes);
        }
        self.min_way_id = self.min_way_id.min(way.id.0);
        self.index_way(way.id, &way.nodes);
        self.ways.insert(way.id, way);
        Ok(())
    }

    /// Liefert einen Node
    pub fn node(&self, id: NodeId) -> Option<&MapNode> {
        self.nodes.get(&id)
    }

    /// Liefert einen Way
    pub fn way(&self, id: WayId) -> Option<&MapWay> {
        self.ways.get(&id)
    }

    /// Liefert einen Node oder `MissingNode`
    pub fn require_node(&self, id: NodeId) -> RexResult<&MapNode> {
        self.nodes.get(&id).ok_or(RexError::MissingNode(id))
    }

    /// Liefert einen Way oder `MissingWay`
    pub fn require_way(&self, id: WayId) -> RexResult<&MapWay> {
        self.ways.get(&id).ok_or(RexError::MissingWay(id))
    }

    /// Iterator über alle Nodes (Einfüge-Reihenfolge)
    pub fn nodes_iter(&self) -> impl Iterator<Item = &MapNode> {
        self.nodes.values()
    }

    /// Iterator über alle Ways (Einfüge-Reihenfolge)
    pub fn ways_iter(&self) -> impl Iterator<Item = &MapWay> {
        self.ways.values()
    }

    /// Anzahl der Nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Anzahl der Ways
    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    /// Alle Ways, die `node` enthalten, in Datensatz-Reihenfolge.
    pub fn referrers(&self, node: NodeId) -> Vec<WayId> {
        let Some(set) = self.referrers.get(&node) else {
            return Vec::new();
        };
        let mut ways: Vec<WayId> = set.iter().copied().collect();
        ways.sort_by_key(|w| self.ways.get_index_of(w).unwrap_or(usize::MAX));
        ways
    }

    /// Anzahl der Ways, die `node` enthalten
    pub fn referrer_count(&self, node: NodeId) -> usize {
        self.referrers.get(&node).map_or(0, IndexSet::len)
    }

    /// Nächste freie ID für einen neuen Node (negativ, absteigend)
    pub fn next_new_node_id(&self) -> NodeId {
        NodeId(self.min_node_id.min(0) - 1)
    }

    /// Nächste freie ID für einen neuen Way (negativ, absteigend)
    pub fn next_new_way_id(&self) -> WayId {
        WayId(self.min_way_id.min(0) - 1)
    }

    /// Wendet eine einzelne Edit-Operation an.
    pub fn apply(&mut self, op: &EditOp) -> RexResult<()> {
        match op {
            EditOp::AddNode(node) => {
                self.add_node(node.clone());
                Ok(())
            }
            EditOp::AddWay(way) => {
                if way.nodes.is_empty() {
                    return Err(RexError::EmptyWay(way.id));
                }
                self.add_way(way.clone())
            }
            EditOp::ReplaceWayNodes { way, nodes } => self.set_way_nodes(*way, nodes.clone()),
            EditOp::SetTags { target, changes } => {
                let tags = match target {
                    PrimitiveId::Node(id) => {
                        &mut self
                            .nodes
                            .get_mut(id)
                            .ok_or(RexError::MissingNode(*id))?
                            .tags
                    }
                    PrimitiveId::Way(id) => {
                        &mut self
                            .ways
                            .get_mut(id)
                            .ok_or(RexError::MissingWay(*id))?
                            .tags
                    }
                };
                apply_tag_changes(tags, changes);
                Ok(())
            }
            EditOp::MoveNode { node, coord } => self.set_node_coord(*node, *coord),
        }
    }

    fn set_way_nodes(&mut self, way_id: WayId, nodes: Vec<NodeId>) -> RexResult<()> {
        if nodes.is_empty() {
            return Err(RexError::EmptyWay(way_id));
        }
        self.check_references(way_id, &nodes)?;
        let old_nodes = self.require_way(way_id)?.nodes.clone();
        self.unindex_way(way_id, &old_nodes);
        self.index_way(way_id, &nodes);
        if let Some(way) = self.ways.get_mut(&way_id) {
            way.nodes = nodes;
        }
        Ok(())
    }

    fn set_node_coord(&mut self, node_id: NodeId, coord: LatLon) -> RexResult<()> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(RexError::MissingNode(node_id))?;
        node.coord = coord;
        Ok(())
    }

    fn check_references(&self, way: WayId, nodes: &[NodeId]) -> RexResult<()> {
        match nodes.iter().find(|n| !self.nodes.contains_key(*n)) {
            Some(&node) => Err(RexError::DanglingReference { way, node }),
            None => Ok(()),
        }
    }

    fn index_way(&mut self, way: WayId, nodes: &[NodeId]) {
        for &node in nodes {
            self.referrers.entry(node).or_default().insert(way);
        }
    }

    fn unindex_way(&mut self, way: WayId, nodes: &[NodeId]) {
        for node in nodes {
            if let Some(set) = self.referrers.get_mut(node) {
                set.shift_remove(&way);
                if set.is_empty() {
                    self.referrers.remove(node);
                }
            }
        }
    }
}
