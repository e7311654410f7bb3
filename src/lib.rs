//! Roundabout Expander Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod error;
pub mod shared;
pub mod xml;

pub use app::{AppCommand, AppController, AppIntent, AppState, SelectionState};
pub use core::{
    LatLon, MapDataset, MapNode, MapWay, NodeId, Notice, NoticeLevel, PrimitiveId, WayId,
};
pub use core::{EditBatch, EditLog, EditOp, RoundaboutParams};
pub use error::{RexError, RexResult};
pub use shared::RexOptions;
pub use xml::{parse_osm, write_osm};
