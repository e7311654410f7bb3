//! Core-Domänentypen und Engines: Datensatz, Edit-Log, Geometrie, Topologie,
//! Tag-Regeln sowie die Kreisverkehr-, Flare- und Lollipop-Operationen.

pub mod coord;
pub mod dataset;
pub mod edit;
pub mod flare;
pub mod geometry;
pub mod lollipop;
/// Node- und Way-Primitive
///
/// - MapNode: Punkt mit Koordinate und Tags
/// - MapWay: geordnete Node-Folge mit Tags (geschlossen, wenn erster == letzter Node)
pub mod node;
pub mod roundabout;
pub mod tag_policy;
pub mod tags;
pub mod topology;
pub mod way;

pub use coord::{normalize_angle, LatLon, EARTH_RADIUS_METERS};
pub use dataset::{MapDataset, PrimitiveId};
pub use edit::{EditBatch, EditLog, EditOp, Notice, NoticeLevel};
pub use flare::{build_flare, build_flares, find_common_ways, flare_candidates, Flare};
pub use geometry::{angular_sort, angular_sort_nodes, fill_gaps, move_endpoint_toward_neighbor};
pub use lollipop::move_lollipop;
pub use node::{MapNode, NodeId};
pub use roundabout::{build_roundabout, RoundaboutParams};
pub use tag_policy::{
    rank_highway_class, select_dominant_way, tag_node_as_mini_roundabout, tag_way_as_roundabout,
};
pub use tags::{apply_tag_changes, tags_from, TagChanges, Tags};
pub use topology::{split_ways_at_node, unglue_node, unglue_node_from_way, SplitOutcome};
pub use way::{MapWay, WayId};
