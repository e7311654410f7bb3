use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use roundabout_expander::core::build_roundabout;
use roundabout_expander::{
    parse_osm, write_osm, EditBatch, LatLon, MapDataset, MapNode, MapWay, NodeId, RexOptions,
    RoundaboutParams, WayId,
};
use std::hint::black_box;

fn bench_osm_parsing(c: &mut Criterion) {
    let xml_content = include_str!("../tests/fixtures/junction.osm");

    c.bench_function("osm_parse_junction", |b| {
        b.iter(|| {
            let map = parse_osm(black_box(xml_content)).expect("OSM parse failed");
            black_box(map.node_count())
        })
    });
}

/// Sternförmige Kreuzung mit `arms` Zufahrten, Zentrum = Node 0.
fn build_star_junction(arms: usize) -> MapDataset {
    let center = LatLon::new(50.0, 8.0);
    let mut map = MapDataset::new();
    map.add_node(MapNode::new(NodeId(0), center));

    for arm in 0..arms {
        let bearing = std::f64::consts::TAU * arm as f64 / arms as f64;
        let id = arm as i64 + 1;
        map.add_node(MapNode::new(
            NodeId(id),
            center.destination_point(bearing, 60.0),
        ));
        map.add_way(MapWay::new(WayId(id), vec![NodeId(0), NodeId(id)]))
            .expect("Arm sollte gültig sein");
    }
    map
}

fn bench_roundabout_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundabout_expansion");
    let options = RexOptions::default();

    for &arms in &[3usize, 8, 32] {
        let template = build_star_junction(arms);
        let center = template.node(NodeId(0)).cloned().expect("Zentrum fehlt");
        let (params, _) = RoundaboutParams::resolve(&options, &center);

        group.bench_with_input(BenchmarkId::from_parameter(arms), &arms, |b, _| {
            b.iter(|| {
                let mut map = template.clone();
                let mut batch = EditBatch::new(&mut map);
                let ring = build_roundabout(&mut batch, NodeId(0), &params)
                    .expect("Aufweiten fehlgeschlagen");
                black_box(ring)
            })
        });
    }

    group.finish();
}

fn bench_osm_writing(c: &mut Criterion) {
    let map = build_star_junction(1_000);

    c.bench_function("osm_write_star_1000", |b| {
        b.iter(|| {
            let xml = write_osm(black_box(&map)).expect("OSM write failed");
            black_box(xml.len())
        })
    });
}

criterion_group!(
    benches,
    bench_osm_parsing,
    bench_roundabout_expansion,
    bench_osm_writing
);
criterion_main!(benches);
