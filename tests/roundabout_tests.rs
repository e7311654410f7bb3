use approx::assert_abs_diff_eq;
use roundabout_expander::core::geometry::GAP_RATIO_TOLERANCE;
use roundabout_expander::core::{build_flares, build_roundabout, normalize_angle, tags_from};
use roundabout_expander::{
    parse_osm, EditBatch, EditLog, LatLon, MapDataset, MapNode, MapWay, NodeId, NoticeLevel,
    RexOptions, RoundaboutParams, WayId,
};

const FIXTURE: &str = include_str!("fixtures/junction.osm");
const CENTER: LatLon = LatLon::new(50.0, 8.0);

fn params_for(map: &MapDataset, center: NodeId, options: &RexOptions) -> RoundaboutParams {
    let node = map.node(center).unwrap();
    RoundaboutParams::resolve(options, node).0
}

/// Peilungen der Ring-Nodes (ohne Schluss-Node) vom Zentrum aus.
fn ring_bearings(map: &MapDataset, ring: WayId) -> Vec<f64> {
    let way = map.way(ring).unwrap();
    way.nodes[..way.nodes.len() - 1]
        .iter()
        .map(|id| CENTER.bearing_to(&map.node(*id).unwrap().coord))
        .collect()
}

#[test]
fn test_ring_liegt_auf_dem_kreis_mit_begrenzten_luecken() {
    let mut map = parse_osm(FIXTURE).unwrap();
    let options = RexOptions::default();
    let params = params_for(&map, NodeId(1), &options);
    let mut batch = EditBatch::new(&mut map);
    let ring = build_roundabout(&mut batch, NodeId(1), &params).unwrap();
    drop(batch);

    let way = map.way(ring).unwrap();
    for id in &way.nodes {
        let distance = CENTER.distance_to(&map.node(*id).unwrap().coord);
        assert_abs_diff_eq!(distance, 6.0, epsilon = 1e-3);
    }

    let bearings = ring_bearings(&map, ring);
    let max_gap = options.max_gap_radians() * (1.0 + GAP_RATIO_TOLERANCE);
    for (i, bearing) in bearings.iter().enumerate() {
        let next = bearings[(i + 1) % bearings.len()];
        // Gegen den Uhrzeigersinn: Peilung nimmt ab
        let gap = normalize_angle(bearing - next);
        assert!(gap > 0.0 && gap <= max_gap, "Lücke {} zu groß", gap.to_degrees());
    }
}

#[test]
fn test_linksverkehr_dreht_die_richtung_um() {
    let mut map = parse_osm(FIXTURE).unwrap();
    let options = RexOptions {
        lefthand_traffic: true,
        ..RexOptions::default()
    };
    let params = params_for(&map, NodeId(1), &options);
    assert!(params.clockwise);

    let mut batch = EditBatch::new(&mut map);
    let ring = build_roundabout(&mut batch, NodeId(1), &params).unwrap();
    drop(batch);

    let bearings = ring_bearings(&map, ring);
    for (i, bearing) in bearings.iter().enumerate() {
        let next = bearings[(i + 1) % bearings.len()];
        assert!(normalize_angle(next - bearing) < std::f64::consts::PI);
    }
}

#[test]
fn test_durchmesser_am_node_ueberschreibt_option() {
    let mut map = parse_osm(FIXTURE).unwrap();
    let mut batch = EditBatch::new(&mut map);
    batch
        .set_tags(
            roundabout_expander::PrimitiveId::Node(NodeId(1)),
            [("diameter".to_string(), Some("20 m".to_string()))]
                .into_iter()
                .collect(),
        )
        .unwrap();
    drop(batch);

    let params = params_for(&map, NodeId(1), &RexOptions::default());
    assert_abs_diff_eq!(params.radius_m, 10.0);

    let mut batch = EditBatch::new(&mut map);
    let ring = build_roundabout(&mut batch, NodeId(1), &params).unwrap();
    drop(batch);
    let first = map.way(ring).unwrap().nodes[0];
    assert_abs_diff_eq!(
        CENTER.distance_to(&map.node(first).unwrap().coord),
        10.0,
        epsilon = 1e-3
    );
}

#[test]
fn test_ungueltiger_durchmesser_warnt() {
    let center = MapNode::with_tags(NodeId(1), CENTER, tags_from([("diameter", "groß")]));
    let (params, notices) = RoundaboutParams::resolve(&RexOptions::default(), &center);
    assert_abs_diff_eq!(params.radius_m, 6.0);
    assert_eq!(
        notices.iter().map(|n| n.level).collect::<Vec<_>>(),
        vec![NoticeLevel::Warning]
    );
}

/// Gerade Straße 1-0-2 durch das Zentrum: nur zwei Zufahrten
fn straight_road() -> MapDataset {
    let mut map = MapDataset::new();
    map.add_node(MapNode::new(NodeId(0), CENTER));
    map.add_node(MapNode::new(NodeId(1), LatLon::new(50.0, 7.9993)));
    map.add_node(MapNode::new(NodeId(2), LatLon::new(50.0, 8.0007)));
    map.add_way(MapWay::with_tags(
        WayId(1),
        vec![NodeId(1), NodeId(0), NodeId(2)],
        tags_from([("highway", "tertiary"), ("oneway", "-1")]),
    ))
    .unwrap();
    map
}

#[test]
fn test_zwei_zufahrten_bekommen_synthetischen_node() {
    let mut map = straight_road();
    let params = params_for(&map, NodeId(0), &RexOptions::default());
    let mut batch = EditBatch::new(&mut map);
    let ring = build_roundabout(&mut batch, NodeId(0), &params).unwrap();
    let (_, notices) = batch.into_parts();

    let way = map.way(ring).unwrap();
    assert!(way.is_closed());
    // 12 Nodes bei 30°-Lücken, geschlossen
    assert_eq!(way.nodes.len(), 13);
    assert_eq!(way.tag("highway"), Some("tertiary"));
    assert_eq!(way.tag("oneway"), None);
    assert!(notices.iter().any(|n| n.level == NoticeLevel::Warning));
}

#[test]
fn test_flares_am_aufgeweiteten_ring() {
    let mut map = parse_osm(FIXTURE).unwrap();
    let params = params_for(&map, NodeId(1), &RexOptions::default());
    let mut batch = EditBatch::new(&mut map);
    let ring = build_roundabout(&mut batch, NodeId(1), &params).unwrap();

    let candidates =
        roundabout_expander::core::flare_candidates(batch.map(), ring).unwrap();
    assert_eq!(candidates.len(), 4);
    let ways_before = batch.map().way_count();

    let shared = build_flares(&mut batch, &candidates[..2], 6.0).unwrap();
    assert_eq!(shared, ring);
    assert_eq!(batch.map().way_count(), ways_before + 4);
    // Der Ring selbst bleibt unverändert geschlossen
    assert!(batch.map().way(ring).unwrap().is_closed());
}
