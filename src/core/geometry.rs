//! Geometrie-Engine: Endpunkt-Verschiebung, Winkel-Sortierung, Lückenfüllung.
//!
//! Alle Winkel sind wahre Peilungen (atan2-basiert) vom Zentrum aus, siehe
//! [`LatLon::bearing_to`]. Aufsteigende Peilung entspricht dem Uhrzeigersinn.

use super::{normalize_angle, EditLog, LatLon, NodeId};
use crate::error::RexResult;
use std::cmp::Ordering;
use std::f64::consts::TAU;

/// Relative Toleranz, innerhalb derer ein Lückenverhältnis als ganzzahlig gilt.
///
/// Peilungen realer Koordinaten weichen um einige 1e-4 vom Idealwinkel ab
/// (N/O/S/W bei 50° Breite: 89.9997° bzw. 90.0003°).
pub const GAP_RATIO_TOLERANCE: f64 = 1e-3;

/// Verschiebt einen Way-Endpunkt um `distance_m` in Richtung seines Nachbarn.
///
/// Voraussetzungen: `node` gehört zu genau einem Way, ist dessen erster oder
/// letzter Vertex, der Way hat mindestens zwei Vertices und der Nachbar liegt
/// nicht auf derselben Position. Sonst `Ok(false)` ohne Mutation.
pub fn move_endpoint_toward_neighbor<L: EditLog + ?Sized>(
    log: &mut L,
    node: NodeId,
    distance_m: f64,
) -> RexResult<bool> {
    let map = log.map();
    let Some(current) = map.node(node) else {
        return Ok(false);
    };

    let referrers = map.referrers(node);
    let [way_id] = referrers.as_slice() else {
        log::debug!(
            "{} gehört zu {} Ways, Verschiebung übersprungen",
            node,
            referrers.len()
        );
        return Ok(false);
    };

    let Some(way) = map.way(*way_id) else {
        return Ok(false);
    };
    let Some(neighbor_id) = way.endpoint_neighbor(node) else {
        log::debug!("{} ist kein Endpunkt von {}", node, way_id);
        return Ok(false);
    };
    let Some(neighbor) = map.node(neighbor_id) else {
        return Ok(false);
    };
    if neighbor.coord.same_position(&current.coord) {
        return Ok(false);
    }

    let bearing = current.coord.bearing_to(&neighbor.coord);
    let target = current.coord.destination_point(bearing, distance_m);
    log.move_node(node, target)?;
    Ok(true)
}

/// Sortiert Elemente stabil nach wahrer Peilung vom Zentrum aus.
///
/// `clockwise = true` sortiert aufsteigend (Nord → Ost → Süd → West),
/// sonst absteigend. Elemente auf dem Zentrum selbst sind vorher auszuschließen.
pub fn angular_sort<T>(
    items: &mut [T],
    center: &LatLon,
    clockwise: bool,
    coord_of: impl Fn(&T) -> LatLon,
) {
    let bearing = |item: &T| center.bearing_to(&coord_of(item));
    if clockwise {
        items.sort_by(|a, b| bearing(a).partial_cmp(&bearing(b)).unwrap_or(Ordering::Equal));
    } else {
        items.sort_by(|a, b| bearing(b).partial_cmp(&bearing(a)).unwrap_or(Ordering::Equal));
    }
}

/// Sortiert Node-IDs nach Peilung ihrer aktuellen Position vom Zentrum.
///
/// Aufrufer übergeben nur existierende Nodes abseits des Zentrums.
pub fn angular_sort_nodes<L: EditLog + ?Sized>(
    log: &L,
    nodes: &mut [NodeId],
    center: &LatLon,
    clockwise: bool,
) {
    let map = log.map();
    angular_sort(nodes, center, clockwise, |id| {
        map.node(*id).map(|n| n.coord).unwrap_or(*center)
    });
}

/// Anzahl der Füllpunkte für eine Winkellücke.
///
/// `ceil(gap / max_gap) − 1`; bei ganzzahligen Vielfachen identisch mit
/// `floor(gap / max_gap) − 1`. Verhältnisse nahe einer ganzen Zahl werden
/// vorher auf diese gerundet, Teilstücke bleiben ≤ `max_gap · (1 + GAP_RATIO_TOLERANCE)`.
pub fn fillers_for_gap(gap: f64, max_gap: f64) -> usize {
    if !(max_gap > 0.0) || !gap.is_finite() {
        return 0;
    }
    let mut ratio = gap / max_gap;
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= GAP_RATIO_TOLERANCE * nearest.max(1.0) {
        ratio = nearest;
    }
    if ratio <= 1.0 {
        return 0;
    }
    (ratio.ceil() as usize).saturating_sub(1)
}

/// Berechnet Füllpunkte auf dem Kreis, sodass keine Winkellücke `max_gap_rad` übersteigt.
///
/// Die Eingabe wird zyklisch in Uhrzeigersinn-Reihenfolge betrachtet (unabhängig
/// von der übergebenen Orientierung). Die Füllpunkte werden angehängt geliefert,
/// nicht einsortiert: Aufrufer sortieren danach neu.
pub fn fill_gaps(
    ordered: &[LatLon],
    center: &LatLon,
    radius_m: f64,
    max_gap_rad: f64,
) -> Vec<LatLon> {
    if ordered.is_empty() || !(max_gap_rad > 0.0) {
        return Vec::new();
    }

    let mut bearings: Vec<f64> = ordered.iter().map(|c| center.bearing_to(c)).collect();
    bearings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let count = bearings.len();
    let mut extra = Vec::new();
    for i in 0..count {
        let from = bearings[i];
        let gap = if count == 1 {
            TAU
        } else {
            normalize_angle(bearings[(i + 1) % count] - from)
        };

        let fillers = fillers_for_gap(gap, max_gap_rad);
        if fillers == 0 {
            continue;
        }
        let step = gap / (fillers + 1) as f64;
        for j in 1..=fillers {
            let bearing = normalize_angle(from + step * j as f64);
            extra.push(center.destination_point(bearing, radius_m));
        }
    }

    log::debug!(
        "Lückenfüllung: {} Punkte, {} Füllpunkte (max. {:.1}°)",
        count,
        extra.len(),
        max_gap_rad.to_degrees()
    );
    extra
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{tags_from, EditBatch, MapDataset, MapNode, MapWay, Tags, WayId};
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI};

    const CENTER: LatLon = LatLon::new(0.0, 0.0);

    fn ring_points(bearings_deg: &[f64], radius: f64) -> Vec<LatLon> {
        bearings_deg
            .iter()
            .map(|b| CENTER.destination_point(b.to_radians(), radius))
            .collect()
    }

    fn max_cyclic_gap(points: &[LatLon]) -> f64 {
        let mut b: Vec<f64> = points.iter().map(|p| CENTER.bearing_to(p)).collect();
        b.sort_by(|x, y| x.partial_cmp(y).unwrap());
        (0..b.len())
            .map(|i| {
                if b.len() == 1 {
                    TAU
                } else {
                    normalize_angle(b[(i + 1) % b.len()] - b[i])
                }
            })
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_angular_sort_im_uhrzeigersinn() {
        let mut pts = ring_points(&[270.0, 10.0, 180.0, 95.0], 10.0);
        angular_sort(&mut pts, &CENTER, true, |p| *p);
        let bearings: Vec<f64> = pts
            .iter()
            .map(|p| CENTER.bearing_to(p).to_degrees().round())
            .collect();
        assert_eq!(bearings, vec![10.0, 95.0, 180.0, 270.0]);

        angular_sort(&mut pts, &CENTER, false, |p| *p);
        let bearings: Vec<f64> = pts
            .iter()
            .map(|p| CENTER.bearing_to(p).to_degrees().round())
            .collect();
        assert_eq!(bearings, vec![270.0, 180.0, 95.0, 10.0]);
    }

    #[test]
    fn test_angular_sort_ist_idempotent() {
        for clockwise in [true, false] {
            // Zwei Punkte mit identischer Peilung prüfen die Stabilität
            let mut items: Vec<(u32, LatLon)> = ring_points(&[40.0, 300.0, 40.0, 120.0], 10.0)
                .into_iter()
                .enumerate()
                .map(|(i, p)| (i as u32, p))
                .collect();
            angular_sort(&mut items, &CENTER, clockwise, |(_, p)| *p);
            let once: Vec<u32> = items.iter().map(|(i, _)| *i).collect();
            angular_sort(&mut items, &CENTER, clockwise, |(_, p)| *p);
            let twice: Vec<u32> = items.iter().map(|(i, _)| *i).collect();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_fillers_for_gap() {
        assert_eq!(fillers_for_gap(FRAC_PI_2, FRAC_PI_6), 2);
        assert_eq!(fillers_for_gap(FRAC_PI_6, FRAC_PI_6), 0);
        assert_eq!(fillers_for_gap(0.1, FRAC_PI_6), 0);
        assert_eq!(fillers_for_gap(TAU, FRAC_PI_6), 11);
        // 100° bei 30°: vier Teilstücke à 25°
        assert_eq!(fillers_for_gap(100f64.to_radians(), FRAC_PI_6), 3);
        assert_eq!(fillers_for_gap(PI, 0.0), 0);
    }

    #[test]
    fn test_fillers_for_gap_toleriert_rundungsabweichung() {
        let max_gap = 30f64.to_radians();
        assert_eq!(fillers_for_gap(90.0003f64.to_radians(), max_gap), 2);
        assert_eq!(fillers_for_gap(89.9997f64.to_radians(), max_gap), 2);
        assert_eq!(fillers_for_gap(30.02f64.to_radians(), max_gap), 0);
        // Deutlich über einem Vielfachen zählt weiter aufwärts
        assert_eq!(fillers_for_gap(91.0f64.to_radians(), max_gap), 3);
    }

    #[test]
    fn test_fill_gaps_bei_hoher_breite_wie_am_aequator() {
        let center = LatLon::new(50.0, 8.0);
        let pts = [
            LatLon::new(50.0004500, 8.0),
            LatLon::new(50.0, 8.0007),
            LatLon::new(49.9995500, 8.0),
            LatLon::new(50.0, 7.9993),
        ];
        assert_eq!(fill_gaps(&pts, &center, 6.0, FRAC_PI_6).len(), 8);
    }

    #[test]
    fn test_fill_gaps_vier_richtungen() {
        let pts = ring_points(&[0.0, 90.0, 180.0, 270.0], 6.0);
        let extra = fill_gaps(&pts, &CENTER, 6.0, FRAC_PI_6);
        assert_eq!(extra.len(), 8);
        for p in &extra {
            assert_relative_eq!(CENTER.distance_to(p), 6.0, epsilon = 1e-6);
        }

        let mut all = pts.clone();
        all.extend(extra);
        assert!(max_cyclic_gap(&all) <= FRAC_PI_6 + 1e-6);
    }

    #[test]
    fn test_fill_gaps_nachbedingung_bei_unregelmaessigen_luecken() {
        let pts = ring_points(&[5.0, 47.0, 200.0, 201.0], 8.0);
        for max_gap_deg in [10.0f64, 25.0, 30.0, 45.0, 100.0] {
            let max_gap = max_gap_deg.to_radians();
            let extra = fill_gaps(&pts, &CENTER, 8.0, max_gap);
            let mut all = pts.clone();
            all.extend(extra);
            assert!(
                max_cyclic_gap(&all) <= max_gap * (1.0 + GAP_RATIO_TOLERANCE) + 1e-9,
                "Lücke > {}° nach Füllung",
                max_gap_deg
            );
            // Eingabepunkte bleiben erhalten
            for p in &pts {
                assert!(all.contains(p));
            }
        }
    }

    #[test]
    fn test_fill_gaps_einzelpunkt_ergibt_vollkreis() {
        let pts = ring_points(&[45.0], 6.0);
        let extra = fill_gaps(&pts, &CENTER, 6.0, FRAC_PI_6);
        assert_eq!(extra.len(), 11);
    }

    #[test]
    fn test_fill_gaps_unabhaengig_von_orientierung() {
        let mut pts = ring_points(&[0.0, 90.0, 180.0, 270.0], 6.0);
        let a = fill_gaps(&pts, &CENTER, 6.0, FRAC_PI_6).len();
        pts.reverse();
        let b = fill_gaps(&pts, &CENTER, 6.0, FRAC_PI_6).len();
        assert_eq!(a, b);
    }

    fn line_map() -> MapDataset {
        let mut map = MapDataset::new();
        map.add_node(MapNode::new(NodeId(1), CENTER));
        map.add_node(MapNode::new(NodeId(2), LatLon::new(0.0, 0.001)));
        map.add_node(MapNode::new(NodeId(3), LatLon::new(0.0, 0.002)));
        map.add_way(MapWay::with_tags(
            WayId(1),
            vec![NodeId(1), NodeId(2), NodeId(3)],
            tags_from([("highway", "residential")]),
        ))
        .unwrap();
        map
    }

    #[test]
    fn test_move_endpoint_richtung_nachbar() {
        let mut map = line_map();
        let mut batch = EditBatch::new(&mut map);
        assert!(move_endpoint_toward_neighbor(&mut batch, NodeId(1), 6.0).unwrap());

        let moved = batch.map().node(NodeId(1)).unwrap().coord;
        assert_relative_eq!(CENTER.distance_to(&moved), 6.0, epsilon = 1e-6);
        assert_relative_eq!(CENTER.bearing_to(&moved), FRAC_PI_2, epsilon = 1e-9);

        // Letzter Node bewegt sich nach Westen (Richtung Node 2)
        assert!(move_endpoint_toward_neighbor(&mut batch, NodeId(3), 6.0).unwrap());
        let start = LatLon::new(0.0, 0.002);
        let moved = batch.map().node(NodeId(3)).unwrap().coord;
        assert_relative_eq!(start.bearing_to(&moved), 3.0 * FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn test_move_endpoint_vorbedingungen() {
        let mut map = line_map();
        map.add_node(MapNode::new(NodeId(4), LatLon::new(0.001, 0.0)));
        map.add_way(MapWay::new(WayId(2), vec![NodeId(1), NodeId(4)]))
            .unwrap();
        let mut batch = EditBatch::new(&mut map);

        // Innerer Vertex
        assert!(!move_endpoint_toward_neighbor(&mut batch, NodeId(2), 6.0).unwrap());
        // Zwei Referrer
        assert!(!move_endpoint_toward_neighbor(&mut batch, NodeId(1), 6.0).unwrap());
        // Unbekannter Node
        assert!(!move_endpoint_toward_neighbor(&mut batch, NodeId(99), 6.0).unwrap());
        assert!(batch.ops().is_empty());

        let lonely = batch.add_node(CENTER, Tags::new()).unwrap();
        assert!(!move_endpoint_toward_neighbor(&mut batch, lonely, 6.0).unwrap());
    }
}
