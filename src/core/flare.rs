//! Flare-Builder: teilt die Anbindung einer Zufahrt an den Kreisverkehr in
//! eine Einfahrt und eine Ausfahrt (je ein Einbahn-Way mit zwei Nodes).

use super::geometry::move_endpoint_toward_neighbor;
use super::topology::unglue_node_from_way;
use super::{EditLog, MapDataset, NodeId, Notice, Tags, WayId};
use crate::error::{RexError, RexResult};

/// Wert von `oneway_type` an beiden Flare-Ways
pub const FLARE_ONEWAY_TYPE: &str = "roundabout_flare";

/// Erzeugte Ways eines Flares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flare {
    /// Einfahrt: verschobener Zufahrts-Endpunkt → Kreisverkehr-Node
    pub entry: WayId,
    /// Ausfahrt: nächster Kreisverkehr-Node → verschobener Zufahrts-Endpunkt
    pub exit: WayId,
}

/// Baut ein Flare an `shared`, der Verbindung von `incoming` und `roundabout`.
///
/// Alle Vorbedingungen werden vor der ersten Mutation geprüft.
pub fn build_flare<L: EditLog + ?Sized>(
    log: &mut L,
    roundabout: WayId,
    incoming: WayId,
    shared: NodeId,
    length_m: f64,
) -> RexResult<Flare> {
    if !(length_m.is_finite() && length_m > 0.0) {
        return Err(RexError::PreconditionNotMet(format!(
            "Flare-Länge {} m ist ungültig",
            length_m
        )));
    }
    let map = log.map();
    map.require_node(shared)?;
    let ring = map.require_way(roundabout)?;
    let road = map.require_way(incoming)?;

    if !road.is_first_last_node(shared) {
        return Err(RexError::PreconditionNotMet(format!(
            "{} ist kein Endpunkt der Zufahrt {}",
            shared, incoming
        )));
    }
    let referrer_count = map.referrer_count(shared);
    if referrer_count > 2 {
        return Err(RexError::AmbiguousTopology {
            node: shared,
            referrers: referrer_count,
        });
    }
    let referrers = map.referrers(shared);
    if referrers.len() != 2 || !referrers.contains(&roundabout) || !referrers.contains(&incoming) {
        return Err(RexError::PreconditionNotMet(format!(
            "{} verbindet nicht genau {} und {}",
            shared, roundabout, incoming
        )));
    }
    let ring_next = next_ring_node(ring.nodes.as_slice(), ring.is_closed(), shared).ok_or_else(|| {
        RexError::PreconditionNotMet(format!("{} hat in {} keinen Folge-Node", shared, roundabout))
    })?;
    let neighbor = road
        .endpoint_neighbor(shared)
        .and_then(|n| map.node(n))
        .ok_or_else(|| RexError::PreconditionNotMet(format!("Zufahrt {} ist zu kurz", incoming)))?;
    if neighbor.coord.same_position(&map.require_node(shared)?.coord) {
        return Err(RexError::PreconditionNotMet(format!(
            "Zufahrt {} hat keine Richtung an {}",
            incoming, shared
        )));
    }
    let tags = flare_tags(&road.tags);

    let moved = unglue_node_from_way(log, shared, incoming)?;
    if !move_endpoint_toward_neighbor(log, moved, length_m)? {
        // Nach dem Ablösen bereits mutiert: ganze Aktion abbrechen
        return Err(RexError::UnsupportedTopology(format!(
            "Zufahrt {} an {} lässt sich nicht zurücksetzen",
            incoming, shared
        )));
    }

    let entry = log.add_way(vec![moved, shared], tags.clone())?;
    let exit = log.add_way(vec![ring_next, moved], tags)?;
    log::info!(
        "Flare an {}: Einfahrt {}, Ausfahrt {} (Zufahrt {})",
        shared,
        entry,
        exit,
        incoming
    );
    Ok(Flare { entry, exit })
}

/// Nachfolger von `node` in der Node-Folge (`+1`, bei geschlossenen Ways zyklisch).
fn next_ring_node(nodes: &[NodeId], closed: bool, node: NodeId) -> Option<NodeId> {
    let index = nodes.iter().position(|&n| n == node)?;
    if closed {
        let real = nodes.len() - 1;
        Some(nodes[(index + 1) % real])
    } else {
        nodes.get(index + 1).copied()
    }
}

/// Tags der Zufahrt ohne Einbahn-Angaben, ergänzt um die Flare-Kennzeichnung.
fn flare_tags(incoming: &Tags) -> Tags {
    let mut tags: Tags = incoming
        .iter()
        .filter(|(k, _)| k.as_str() != "oneway" && k.as_str() != "oneway_type")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    tags.insert("oneway".into(), "yes".into());
    tags.insert("oneway_type".into(), FLARE_ONEWAY_TYPE.into());
    tags
}

/// Alle Ways, die jeden der Nodes enthalten (Reihenfolge des ersten Nodes).
pub fn find_common_ways(map: &MapDataset, nodes: &[NodeId]) -> Vec<WayId> {
    let Some((first, rest)) = nodes.split_first() else {
        return Vec::new();
    };
    map.referrers(*first)
        .into_iter()
        .filter(|w| {
            map.way(*w)
                .is_some_and(|way| rest.iter().all(|n| way.contains_node(*n)))
        })
        .collect()
}

/// Kreisverkehr-Nodes, an denen eine Zufahrt ohne `oneway=yes` endet.
pub fn flare_candidates(map: &MapDataset, roundabout: WayId) -> RexResult<Vec<NodeId>> {
    let ring = map.require_way(roundabout)?;
    if !ring.is_closed() || ring.tag("junction") != Some("roundabout") {
        return Err(RexError::PreconditionNotMet(format!(
            "{} ist kein geschlossener Kreisverkehr",
            roundabout
        )));
    }

    let mut candidates = Vec::new();
    for &node in &ring.nodes[..ring.real_node_count()] {
        let is_candidate = map.referrers(node).into_iter().any(|w| {
            w != roundabout
                && map.way(w).is_some_and(|way| {
                    way.is_first_last_node(node) && way.tag("oneway") != Some("yes")
                })
        });
        if is_candidate && !candidates.contains(&node) {
            candidates.push(node);
        }
    }
    Ok(candidates)
}

/// Baut Flares an allen `nodes`, die genau einen gemeinsamen Way teilen.
///
/// Nodes ohne genau zwei Referrer werden mit Hinweis übersprungen. Liefert
/// den gemeinsamen Kreisverkehr-Way.
pub fn build_flares<L: EditLog + ?Sized>(
    log: &mut L,
    nodes: &[NodeId],
    length_m: f64,
) -> RexResult<WayId> {
    let common = find_common_ways(log.map(), nodes);
    let roundabout = match common.as_slice() {
        [way] => *way,
        [] => {
            return Err(RexError::PreconditionNotMet(
                "die gewählten Nodes liegen auf keinem gemeinsamen Way".into(),
            ))
        }
        [..] => {
            return Err(RexError::AmbiguousTopology {
                node: nodes[0],
                referrers: common.len(),
            })
        }
    };

    let mut built = 0;
    for &node in nodes {
        let referrers = log.map().referrers(node);
        let [a, b] = referrers.as_slice() else {
            log.notify(Notice::info(format!(
                "{} hat {} Referrer, kein Flare",
                node,
                referrers.len()
            )));
            continue;
        };
        let incoming = if *a == roundabout { *b } else { *a };

        match build_flare(log, roundabout, incoming, node, length_m) {
            Ok(_) => built += 1,
            Err(err @ (RexError::PreconditionNotMet(_) | RexError::AmbiguousTopology { .. })) => {
                log.notify(Notice::from_error(&err));
            }
            Err(err) => return Err(err),
        }
    }

    if built == 0 {
        return Err(RexError::PreconditionNotMet("kein Flare erzeugt".into()));
    }
    Ok(roundabout)
}
