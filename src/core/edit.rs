//! Edit-Operationen, Hinweise und das Edit-Log einer einzelnen Aktion.
//!
//! Jede Engine-Operation beschreibt ihre Mutationen als geordnete Folge von
//! [`EditOp`]s. Das [`EditLog`] wendet jede Operation sofort an, damit
//! nachfolgende Schritte (z.B. Referrer nach einem Split) den neuen Stand sehen.

use super::{LatLon, MapDataset, MapNode, MapWay, NodeId, PrimitiveId, TagChanges, Tags, WayId};
use crate::error::{RexError, RexResult};

/// Eine diskrete, anwendbare Mutation des Datensatzes
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Neuen Node einfügen
    AddNode(MapNode),
    /// Neuen Way einfügen
    AddWay(MapWay),
    /// Node-Folge eines bestehenden Ways ersetzen
    ReplaceWayNodes { way: WayId, nodes: Vec<NodeId> },
    /// Tags eines Primitivs ändern
    SetTags {
        target: PrimitiveId,
        changes: TagChanges,
    },
    /// Node auf neue Position verschieben
    MoveNode { node: NodeId, coord: LatLon },
}

/// Schweregrad eines Hinweises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Information (z.B. No-Op ohne Fehler)
    Info,
    /// Warnung (Teilerfolg, Fallback, Mehrdeutigkeit)
    Warning,
}

/// Klartext-Hinweis an den Benutzer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Schweregrad
    pub level: NoticeLevel,
    /// Nachricht
    pub message: String,
}

impl Notice {
    /// Info-Hinweis
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Warn-Hinweis
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// Hinweis für eine abgebrochene Aktion
    pub fn from_error(err: &RexError) -> Self {
        match err {
            RexError::PreconditionNotMet(_) => Self::info(err.to_string()),
            _ => Self::warning(err.to_string()),
        }
    }

    /// Schreibt den Hinweis zusätzlich ins Log.
    pub fn log(&self) {
        match self.level {
            NoticeLevel::Info => log::info!("{}", self.message),
            NoticeLevel::Warning => log::warn!("{}", self.message),
        }
    }
}

/// Schnittstelle, über die Engine-Operationen ihre Mutationen absetzen.
pub trait EditLog {
    /// Aktueller Stand des Datensatzes (inkl. bereits angewendeter Ops)
    fn map(&self) -> &MapDataset;

    /// Wendet eine Operation sofort an und zeichnet sie auf.
    fn append(&mut self, op: EditOp) -> RexResult<()>;

    /// Meldet einen Hinweis an den Benutzer.
    fn notify(&mut self, notice: Notice);

    /// Legt einen neuen Node an und liefert dessen ID.
    fn add_node(&mut self, coord: LatLon, tags: Tags) -> RexResult<NodeId> {
        let id = self.map().next_new_node_id();
        self.append(EditOp::AddNode(MapNode::with_tags(id, coord, tags)))?;
        Ok(id)
    }

    /// Legt einen neuen Way an und liefert dessen ID.
    fn add_way(&mut self, nodes: Vec<NodeId>, tags: Tags) -> RexResult<WayId> {
        let id = self.map().next_new_way_id();
        self.append(EditOp::AddWay(MapWay::with_tags(id, nodes, tags)))?;
        Ok(id)
    }

    /// Ersetzt die Node-Folge eines Ways.
    fn replace_way_nodes(&mut self, way: WayId, nodes: Vec<NodeId>) -> RexResult<()> {
        self.append(EditOp::ReplaceWayNodes { way, nodes })
    }

    /// Ändert Tags; leere Änderungsmengen erzeugen keine Operation.
    fn set_tags(&mut self, target: PrimitiveId, changes: TagChanges) -> RexResult<()> {
        if changes.is_empty() {
            return Ok(());
        }
        self.append(EditOp::SetTags { target, changes })
    }

    /// Verschiebt einen Node.
    fn move_node(&mut self, node: NodeId, coord: LatLon) -> RexResult<()> {
        self.append(EditOp::MoveNode { node, coord })
    }
}

/// Edit-Log einer einzelnen Benutzeraktion.
///
/// Hält die Arbeitskopie des Datensatzes exklusiv für die Dauer der Aktion.
/// Ob die Ops übernommen oder verworfen werden, entscheidet der Aufrufer.
pub struct EditBatch<'a> {
    map: &'a mut MapDataset,
    ops: Vec<EditOp>,
    notices: Vec<Notice>,
}

impl<'a> EditBatch<'a> {
    /// Startet ein neues Batch auf der Arbeitskopie
    pub fn new(map: &'a mut MapDataset) -> Self {
        Self {
            map,
            ops: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Bisher angewendete Operationen
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    /// Bisher gemeldete Hinweise
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Zerlegt das Batch in Operationen und Hinweise.
    pub fn into_parts(self) -> (Vec<EditOp>, Vec<Notice>) {
        (self.ops, self.notices)
    }
}

impl EditLog for EditBatch<'_> {
    fn map(&self) -> &MapDataset {
        self.map
    }

    fn append(&mut self, op: EditOp) -> RexResult<()> {
        self.map.apply(&op)?;
        log::debug!("EditOp angewendet: {:?}", op);
        self.ops.push(op);
        Ok(())
    }

    fn notify(&mut self, notice: Notice) {
        notice.log();
        self.notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tags_from;

    #[test]
    fn test_batch_wendet_sofort_an_und_zeichnet_auf() {
        let mut map = MapDataset::new();
        let mut batch = EditBatch::new(&mut map);

        let a = batch.add_node(LatLon::new(0.0, 0.0), Tags::new()).unwrap();
        let b = batch.add_node(LatLon::new(0.0, 0.001), Tags::new()).unwrap();
        assert_ne!(a, b, "IDs müssen nach sofortiger Anwendung fortlaufen");

        let w = batch
            .add_way(vec![a, b], tags_from([("highway", "road")]))
            .unwrap();
        assert_eq!(batch.map().referrers(a), vec![w]);

        batch.set_tags(PrimitiveId::Way(w), TagChanges::new()).unwrap();
        let (ops, notices) = batch.into_parts();
        assert_eq!(ops.len(), 3, "leere Tag-Änderung erzeugt keine Op");
        assert!(notices.is_empty());
        assert_eq!(map.way_count(), 1);
    }

    #[test]
    fn test_fehlgeschlagene_op_wird_nicht_aufgezeichnet() {
        let mut map = MapDataset::new();
        let mut batch = EditBatch::new(&mut map);
        let err = batch.add_way(vec![NodeId(5)], Tags::new()).unwrap_err();
        assert!(matches!(err, RexError::DanglingReference { .. }));
        assert!(batch.ops().is_empty());
    }

    #[test]
    fn test_notice_aus_fehler() {
        let n = Notice::from_error(&RexError::PreconditionNotMet("x".into()));
        assert_eq!(n.level, NoticeLevel::Info);
        let n = Notice::from_error(&RexError::AmbiguousTopology {
            node: NodeId(1),
            referrers: 3,
        });
        assert_eq!(n.level, NoticeLevel::Warning);
    }
}
