//! Lollipop-Verschiebung: hängt den Endpunkt eines Ways einen Node weiter
//! entlang des anderen Ways am selben Node um.

use super::{EditLog, NodeId, WayId};
use crate::error::{RexError, RexResult};

/// Verschiebt den Endpunkt `node` von `way` auf den `+1`-Nachbarn im anderen Way.
///
/// `node` muss Endpunkt von `way` sein und von genau zwei Ways referenziert
/// werden. Liefert den neuen Endpunkt.
pub fn move_lollipop<L: EditLog + ?Sized>(
    log: &mut L,
    way: WayId,
    node: NodeId,
) -> RexResult<NodeId> {
    let map = log.map();
    let stick = map.require_way(way)?;
    if !stick.is_first_last_node(node) {
        return Err(RexError::PreconditionNotMet(format!(
            "{} ist kein Endpunkt von {}",
            node, way
        )));
    }

    let referrers = map.referrers(node);
    let other = match referrers.as_slice() {
        [a, b] if *a == way => *b,
        [a, b] if *b == way => *a,
        [_, _, _, ..] => {
            return Err(RexError::AmbiguousTopology {
                node,
                referrers: referrers.len(),
            })
        }
        _ => {
            return Err(RexError::PreconditionNotMet(format!(
                "{} wird von {} Ways referenziert, erwartet 2",
                node,
                referrers.len()
            )))
        }
    };

    let along = map.require_way(other)?;
    let index = along.index_of(node).ok_or(RexError::MissingNode(node))?;
    let target = along.nodes[(index + 1) % along.nodes.len()];

    let mut nodes = stick.nodes.clone();
    let last = nodes.len() - 1;
    let position = if nodes[0] == node { 0 } else { last };
    let opposite = if position == 0 { nodes[last] } else { nodes[0] };
    if target == node || (nodes.len() == 2 && target == opposite) {
        return Err(RexError::PreconditionNotMet(format!(
            "{} kann nicht weiter entlang {} verschoben werden",
            way, other
        )));
    }
    nodes[position] = target;

    log.replace_way_nodes(way, nodes)?;
    log::info!("Lollipop {}: Endpunkt {} → {}", way, node, target);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EditBatch, LatLon, MapDataset, MapNode, MapWay};

    fn ids(raw: &[i64]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    /// Durchgangsstraße 1-2-3-4 (Way 1), Stichstraße 9-2 (Way 2)
    fn lollipop_map() -> MapDataset {
        let mut map = MapDataset::new();
        for id in [1, 2, 3, 4, 9] {
            map.add_node(MapNode::new(NodeId(id), LatLon::new(0.0, id as f64 * 0.0001)));
        }
        map.add_way(MapWay::new(WayId(1), ids(&[1, 2, 3, 4]))).unwrap();
        map.add_way(MapWay::new(WayId(2), ids(&[9, 2]))).unwrap();
        map
    }

    #[test]
    fn test_lollipop_wandert_zum_naechsten_node() {
        let mut map = lollipop_map();
        let mut batch = EditBatch::new(&mut map);
        let target = move_lollipop(&mut batch, WayId(2), NodeId(2)).unwrap();
        assert_eq!(target, NodeId(3));
        assert_eq!(batch.map().way(WayId(2)).unwrap().nodes, ids(&[9, 3]));

        // Nochmal: weiter zu 4
        let target = move_lollipop(&mut batch, WayId(2), NodeId(3)).unwrap();
        assert_eq!(target, NodeId(4));
        // Am Ende des anderen Ways: zyklisch zurück zum Anfang
        let target = move_lollipop(&mut batch, WayId(2), NodeId(4)).unwrap();
        assert_eq!(target, NodeId(1));
    }

    #[test]
    fn test_lollipop_bei_drei_referrern_no_op() {
        let mut map = lollipop_map();
        map.add_way(MapWay::new(WayId(3), ids(&[2, 9]))).unwrap();
        let mut batch = EditBatch::new(&mut map);
        let err = move_lollipop(&mut batch, WayId(2), NodeId(2)).unwrap_err();
        assert!(matches!(err, RexError::AmbiguousTopology { referrers: 3, .. }));
        assert!(batch.ops().is_empty());
    }

    #[test]
    fn test_lollipop_vorbedingungen() {
        let mut map = lollipop_map();
        let mut batch = EditBatch::new(&mut map);
        // Node 2 ist innerer Vertex von Way 1
        assert!(matches!(
            move_lollipop(&mut batch, WayId(1), NodeId(2)),
            Err(RexError::PreconditionNotMet(_))
        ));
        // Node 9 hat nur einen Referrer
        assert!(matches!(
            move_lollipop(&mut batch, WayId(2), NodeId(9)),
            Err(RexError::PreconditionNotMet(_))
        ));
    }
}
