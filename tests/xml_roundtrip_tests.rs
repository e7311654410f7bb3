use approx::assert_relative_eq;
use roundabout_expander::core::build_roundabout;
use roundabout_expander::{parse_osm, write_osm, EditBatch, MapDataset, NodeId, RexOptions, RoundaboutParams, WayId};

const FIXTURE: &str = include_str!("fixtures/junction.osm");

fn expand(map: &mut MapDataset, center: NodeId) -> WayId {
    let node = map.node(center).unwrap().clone();
    let (params, _) = RoundaboutParams::resolve(&RexOptions::default(), &node);
    let mut batch = EditBatch::new(map);
    build_roundabout(&mut batch, center, &params).expect("Aufweiten sollte gelingen")
}

#[test]
fn test_fixture_wird_vollstaendig_gelesen() {
    let map = parse_osm(FIXTURE).expect("Fixture sollte parsebar sein");

    assert_eq!(map.node_count(), 5);
    assert_eq!(map.way_count(), 3);
    let through = map.way(WayId(10)).unwrap();
    assert_eq!(through.nodes, vec![NodeId(2), NodeId(1), NodeId(3)]);
    assert_eq!(through.tag("ref"), Some("B 42"));
    assert_eq!(map.way(WayId(12)).unwrap().tag("name"), Some("Mühlweg & Co"));
    assert_eq!(map.node(NodeId(4)).unwrap().tag("highway"), Some("give_way"));
    assert_eq!(map.referrers(NodeId(1)), vec![WayId(10), WayId(11), WayId(12)]);
}

#[test]
fn test_roundtrip_erhaelt_ids_tags_und_koordinaten() {
    let original = parse_osm(FIXTURE).unwrap();
    let xml = write_osm(&original).unwrap();
    let reparsed = parse_osm(&xml).unwrap();

    assert_eq!(reparsed.node_count(), original.node_count());
    assert_eq!(reparsed.way_count(), original.way_count());
    for node in original.nodes_iter() {
        let other = reparsed.node(node.id).expect("Node sollte erhalten bleiben");
        assert_relative_eq!(other.coord.lat, node.coord.lat, epsilon = 1e-7);
        assert_relative_eq!(other.coord.lon, node.coord.lon, epsilon = 1e-7);
        assert_eq!(other.tags, node.tags);
    }
    for way in original.ways_iter() {
        assert_eq!(reparsed.way(way.id), Some(way));
    }
    assert!(xml.contains("Mühlweg &amp; Co"));
}

#[test]
fn test_neue_primitive_behalten_negative_ids() {
    let mut map = parse_osm(FIXTURE).unwrap();
    let ring = expand(&mut map, NodeId(1));
    assert!(ring.0 < 0);

    let reparsed = parse_osm(&write_osm(&map).unwrap()).unwrap();
    let ring_way = reparsed.way(ring).expect("Ring sollte geschrieben werden");
    assert!(ring_way.is_closed());
    assert_eq!(ring_way.tag("junction"), Some("roundabout"));
    assert!(reparsed.nodes_iter().any(|n| n.id.0 < 0));
}

#[test]
fn test_ungueltiges_xml_wird_abgelehnt() {
    assert!(parse_osm("<osm><node id=\"x\" lat=\"0\" lon=\"0\"/></osm>").is_err());
    assert!(parse_osm("<osm><way id=\"1\"><nd ref=\"7\"/></way></osm>").is_err());
    assert!(parse_osm("<gpx></gpx>").is_err());
}
