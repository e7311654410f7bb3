//! Kreisverkehr-Builder: macht aus einem Kreuzungs-Node einen geschlossenen Ring-Way.
//!
//! Ablauf: dominanten Way bestimmen, Zentrums-Tags entfernen, Ways am Zentrum
//! teilen, Zentrum ablösen, Endpunkte auf den Kreis schieben, nach Peilung
//! sortieren, Lücken füllen, Ring-Way anlegen und taggen.

use super::geometry::{angular_sort_nodes, fill_gaps, move_endpoint_toward_neighbor};
use super::tag_policy::{select_dominant_way, strip_center_tags, tag_way_as_roundabout};
use super::topology::{split_ways_at_node, unglue_node};
use super::{normalize_angle, EditLog, LatLon, MapNode, NodeId, Notice, Tags, WayId};
use crate::error::{RexError, RexResult};
use crate::shared::RexOptions;
use std::f64::consts::{PI, TAU};

/// Aufgelöste Parameter einer Kreisverkehr-Konstruktion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundaboutParams {
    /// Ring-Radius in Metern
    pub radius_m: f64,
    /// Ring im Uhrzeigersinn (Linksverkehr oder `direction=clockwise`)
    pub clockwise: bool,
    /// Maximale Winkellücke zwischen zwei Ring-Nodes in Radiant
    pub max_gap_rad: f64,
}

impl RoundaboutParams {
    /// Liest die Parameter aus den Optionen und den Overrides am Zentrums-Node.
    ///
    /// `direction=clockwise` erzwingt den Uhrzeigersinn, `diameter=<Zahl>`
    /// ersetzt den Standard-Durchmesser. Ungültige Zahlenwerte (Option oder
    /// Tag) fallen mit Warnung auf den Standard zurück.
    pub fn resolve(options: &RexOptions, center: &MapNode) -> (Self, Vec<Notice>) {
        let mut options = options.clone();
        let mut notices: Vec<Notice> = options
            .sanitize()
            .into_iter()
            .map(Notice::warning)
            .collect();

        let diameter = match center.tag("diameter") {
            None => options.diameter_meter,
            Some(raw) => match parse_meters(raw) {
                Some(value) => value,
                None => {
                    notices.push(Notice::warning(format!(
                        "diameter={} an {} ist ungültig, verwende {} m",
                        raw, center.id, options.diameter_meter
                    )));
                    options.diameter_meter
                }
            },
        };

        let params = Self {
            radius_m: diameter / 2.0,
            clockwise: options.lefthand_traffic || center.tag("direction") == Some("clockwise"),
            max_gap_rad: options.max_gap_radians(),
        };
        (params, notices)
    }
}

/// Positive Meter-Angabe, optional mit Einheit (`"14"`, `"14.5 m"`).
fn parse_meters(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().trim_end_matches('m').trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Baut um `center` einen Kreisverkehr und liefert die ID des neuen Ring-Ways.
///
/// Vor der ersten Mutation wird nur geprüft, ob der Node existiert und
/// überhaupt von Ways referenziert wird. Geschlossene Ways am Zentrum werden
/// übersprungen (Hinweis), der Rest der Konstruktion läuft weiter.
pub fn build_roundabout<L: EditLog + ?Sized>(
    log: &mut L,
    center: NodeId,
    params: &RoundaboutParams,
) -> RexResult<WayId> {
    let map = log.map();
    let center_coord = map.require_node(center)?.coord;
    let referrers = map.referrers(center);
    let dominant = select_dominant_way(map, &referrers).ok_or_else(|| {
        RexError::PreconditionNotMet(format!("{} wird von keinem Way referenziert", center))
    })?;
    let dominant_tags = map.require_way(dominant)?.tags.clone();
    log::info!(
        "Kreisverkehr an {}: {} Ways, Radius {:.1} m, dominant {}",
        center,
        referrers.len(),
        params.radius_m,
        dominant
    );

    strip_center_tags(log, center)?;
    split_ways_at_node(log, center)?;
    let candidates = unglue_node(log, center)?;

    let mut ring: Vec<NodeId> = Vec::with_capacity(candidates.len() + 1);
    for node in candidates {
        if move_endpoint_toward_neighbor(log, node, params.radius_m)? {
            ring.push(node);
        } else {
            log.notify(Notice::warning(format!(
                "{} konnte nicht auf den Ring verschoben werden und bleibt im Zentrum",
                node
            )));
        }
    }

    if ring.is_empty() {
        return Err(RexError::UnsupportedTopology(format!(
            "kein Way an {} lässt sich auf den Ring verschieben",
            center
        )));
    }

    if ring.len() == 2 {
        let bearings = ring_bearings(&*log, &ring, &center_coord);
        let bearing = larger_arc_bisector(bearings[0], bearings[1]);
        let synthetic = log.add_node(
            center_coord.destination_point(bearing, params.radius_m),
            Tags::new(),
        )?;
        ring.push(synthetic);
    }

    angular_sort_nodes(&*log, &mut ring, &center_coord, params.clockwise);

    let ring_coords: Vec<LatLon> = ring
        .iter()
        .filter_map(|id| log.map().node(*id).map(|n| n.coord))
        .collect();
    for coord in fill_gaps(&ring_coords, &center_coord, params.radius_m, params.max_gap_rad) {
        ring.push(log.add_node(coord, Tags::new())?);
    }
    angular_sort_nodes(&*log, &mut ring, &center_coord, params.clockwise);

    let first = ring[0];
    ring.push(first);
    let way = log.add_way(ring, dominant_tags)?;
    tag_way_as_roundabout(log, way)?;

    log::info!("Kreisverkehr {} angelegt", way);
    Ok(way)
}

fn ring_bearings<L: EditLog + ?Sized>(log: &L, ring: &[NodeId], center: &LatLon) -> Vec<f64> {
    ring.iter()
        .map(|id| {
            log.map()
                .node(*id)
                .map_or(0.0, |n| center.bearing_to(&n.coord))
        })
        .collect()
}

/// Peilung der Mitte des größeren Bogens zwischen zwei Peilungen.
fn larger_arc_bisector(a: f64, b: f64) -> f64 {
    let gap = normalize_angle(b - a);
    if gap >= PI {
        normalize_angle(a + gap / 2.0)
    } else {
        normalize_angle(b + (TAU - gap) / 2.0)
    }
}
