//! Topologie-Mutationen: Ways an einem Node teilen, Nodes "ablösen" (unglue).

use super::{EditLog, NodeId, Notice, WayId};
use crate::error::RexResult;

/// Ergebnis von [`split_ways_at_node`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitOutcome {
    /// Neu entstandene Ways (der Ursprungs-Way behält jeweils das erste Teilstück)
    pub new_ways: Vec<WayId>,
    /// Geschlossene Ways, die nicht geteilt wurden
    pub skipped_closed: Vec<WayId>,
}

/// Teilt jeden Way, in dem `node` innerer Vertex ist, an diesem Node.
///
/// Ways mit `node` als Endpunkt bleiben unverändert. Geschlossene Ways werden
/// nicht geteilt, sondern übersprungen und gemeldet.
pub fn split_ways_at_node<L: EditLog + ?Sized>(log: &mut L, node: NodeId) -> RexResult<SplitOutcome> {
    log.map().require_node(node)?;
    let mut outcome = SplitOutcome::default();

    for way_id in log.map().referrers(node) {
        let way = log.map().require_way(way_id)?;
        if way.is_closed() {
            log.notify(Notice::warning(format!(
                "Geschlossener Way {} an {} wird nicht geteilt",
                way_id, node
            )));
            outcome.skipped_closed.push(way_id);
            continue;
        }

        let last = way.nodes.len() - 1;
        let cut_points: Vec<usize> = (1..last).filter(|&i| way.nodes[i] == node).collect();
        if cut_points.is_empty() {
            continue;
        }

        let mut pieces: Vec<Vec<NodeId>> = Vec::with_capacity(cut_points.len() + 1);
        let mut start = 0;
        for &cut in &cut_points {
            pieces.push(way.nodes[start..=cut].to_vec());
            start = cut;
        }
        pieces.push(way.nodes[start..].to_vec());

        let tags = way.tags.clone();
        let mut pieces = pieces.into_iter();
        if let Some(first) = pieces.next() {
            log.replace_way_nodes(way_id, first)?;
        }
        for piece in pieces {
            let new_way = log.add_way(piece, tags.clone())?;
            outcome.new_ways.push(new_way);
        }
        log::debug!("{} an {} in {} Teile geteilt", way_id, node, cut_points.len() + 1);
    }

    Ok(outcome)
}

/// Wählt den Way, der beim Ablösen den ursprünglichen Node behält.
///
/// Bevorzugt den ersten Way, in dem `node` innerer Vertex ist; sonst den
/// ersten referenzierenden Way überhaupt.
pub fn primary_way<L: EditLog + ?Sized>(log: &L, node: NodeId, candidates: &[WayId]) -> Option<WayId> {
    let map = log.map();
    candidates
        .iter()
        .copied()
        .find(|w| map.way(*w).is_some_and(|way| way.has_interior_node(node)))
        .or_else(|| candidates.first().copied())
}

/// Gibt `way` eine eigene, positionsgleiche Kopie von `node`.
///
/// Liefert die ID der Kopie. Alle Vorkommen im Way werden ersetzt, sodass
/// ein geschlossener Way geschlossen bleibt.
pub fn unglue_node_from_way<L: EditLog + ?Sized>(
    log: &mut L,
    node: NodeId,
    way: WayId,
) -> RexResult<NodeId> {
    let original = log.map().require_node(node)?;
    let coord = original.coord;
    let tags = original.tags.clone();

    let mut nodes = log.map().require_way(way)?.nodes.clone();
    let duplicate = log.add_node(coord, tags)?;
    for n in nodes.iter_mut().filter(|n| **n == node) {
        *n = duplicate;
    }
    log.replace_way_nodes(way, nodes)?;
    Ok(duplicate)
}

/// Löst `node` von allen Ways außer dem Primär-Way ab.
///
/// Liefert den ursprünglichen Node gefolgt von je einer Kopie pro
/// abgelöstem Way.
pub fn unglue_node<L: EditLog + ?Sized>(log: &mut L, node: NodeId) -> RexResult<Vec<NodeId>> {
    log.map().require_node(node)?;
    let referrers = log.map().referrers(node);
    let primary = primary_way(&*log, node, &referrers);

    let mut result = vec![node];
    for way in referrers.into_iter().filter(|w| Some(*w) != primary) {
        result.push(unglue_node_from_way(log, node, way)?);
    }
    log::debug!("{} abgelöst: {} Nodes", node, result.len());
    Ok(result)
}
