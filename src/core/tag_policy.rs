//! Tag-Regeln: Highway-Rangfolge, dominanter Way, Kreisverkehr-Tagging.

use super::{EditLog, MapDataset, NodeId, Notice, PrimitiveId, TagChanges, Tags, WayId};
use crate::error::RexResult;

/// Highway-Klassen in absteigender Wichtigkeit.
pub const HIGHWAY_RANKING: [&str; 18] = [
    "motorway",
    "motorway_link",
    "trunk",
    "trunk_link",
    "primary",
    "primary_link",
    "secondary",
    "secondary_link",
    "tertiary",
    "unclassified",
    "residential",
    "service",
    "track",
    "cycleway",
    "footway",
    "path",
    "road",
    "construction",
];

/// Tags, die beim Aufweiten vom Zentrums-Node entfernt werden.
pub const TRANSIENT_CENTER_TAGS: [&str; 5] = ["highway", "junction", "direction", "diameter", "oneway"];

/// Rang einer Highway-Klasse: kleiner = wichtiger; unbekannt/fehlend = schlechtester Rang.
pub fn rank_highway_class(value: Option<&str>) -> usize {
    value
        .and_then(|v| HIGHWAY_RANKING.iter().position(|r| *r == v))
        .unwrap_or(HIGHWAY_RANKING.len())
}

/// Wählt den Way mit der wichtigsten Highway-Klasse; Gleichstand → erster Kandidat.
pub fn select_dominant_way(map: &MapDataset, candidates: &[WayId]) -> Option<WayId> {
    let mut best: Option<(usize, WayId)> = None;
    for &way_id in candidates {
        let Some(way) = map.way(way_id) else {
            continue;
        };
        let rank = rank_highway_class(way.tag("highway"));
        if best.is_none_or(|(best_rank, _)| rank < best_rank) {
            best = Some((rank, way_id));
        }
    }
    best.map(|(_, id)| id)
}

/// Tag-Änderungen, die einen geschlossenen Way zum Kreisverkehr machen.
///
/// `highway=mini_roundabout` wird nur entfernt; `highway=road` erhält
/// ausschließlich ein Way, der vorher gar keinen `highway`-Key hatte.
pub fn roundabout_tag_changes(tags: &Tags) -> TagChanges {
    let mut changes = TagChanges::new();
    changes.insert("junction".into(), Some("roundabout".into()));
    if tags.contains_key("oneway") {
        changes.insert("oneway".into(), None);
    }

    match tags.get("highway").map(String::as_str) {
        Some("mini_roundabout") => {
            changes.insert("highway".into(), None);
        }
        Some(_) => {}
        None => {
            changes.insert("highway".into(), Some("road".into()));
        }
    }
    changes
}

/// Hinweis für `oneway=-1`: die Richtungsumkehr wird nicht durchgeführt.
pub fn reversed_oneway_notice(tags: &Tags, subject: impl std::fmt::Display) -> Option<Notice> {
    (tags.get("oneway").map(String::as_str) == Some("-1")).then(|| {
        Notice::warning(format!(
            "{} war oneway=-1: Tag entfernt, Richtung NICHT umgekehrt",
            subject
        ))
    })
}

/// Tag-Änderungen für einen Mini-Kreisverkehr-Node.
pub fn mini_roundabout_tag_changes(diameter_m: f64) -> TagChanges {
    let mut changes = TagChanges::new();
    changes.insert("junction".into(), Some("roundabout".into()));
    changes.insert("highway".into(), Some("mini_roundabout".into()));
    changes.insert("diameter".into(), Some(format_meters(diameter_m)));
    changes
}

/// Taggt einen bestehenden Way als Kreisverkehr.
pub fn tag_way_as_roundabout<L: EditLog + ?Sized>(log: &mut L, way: WayId) -> RexResult<()> {
    let tags = log.map().require_way(way)?.tags.clone();
    if let Some(notice) = reversed_oneway_notice(&tags, way) {
        log.notify(notice);
    }
    log.set_tags(PrimitiveId::Way(way), roundabout_tag_changes(&tags))
}

/// Taggt einen Node als Mini-Kreisverkehr.
pub fn tag_node_as_mini_roundabout<L: EditLog + ?Sized>(
    log: &mut L,
    node: NodeId,
    diameter_m: f64,
) -> RexResult<()> {
    log.map().require_node(node)?;
    log.set_tags(PrimitiveId::Node(node), mini_roundabout_tag_changes(diameter_m))
}

/// Entfernt die Kreuzungs-Tags vom Zentrums-Node.
pub fn strip_center_tags<L: EditLog + ?Sized>(log: &mut L, node: NodeId) -> RexResult<()> {
    let tags = &log.map().require_node(node)?.tags;
    let changes: TagChanges = TRANSIENT_CENTER_TAGS
        .iter()
        .filter(|key| tags.contains_key(**key))
        .map(|key| (key.to_string(), None))
        .collect();
    log.set_tags(PrimitiveId::Node(node), changes)
}

/// Meter-Wert ohne überflüssige Nachkommastellen ("12", "12.5").
pub fn format_meters(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
