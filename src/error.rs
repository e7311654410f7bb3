//! Fehler-Taxonomie der Geometrie-/Topologie-Engine.
//!
//! Engine-Funktionen liefern `Result<_, RexError>`. Die Use-Cases in `app`
//! setzen jeden Fehler in einen No-Op plus Hinweis um, sodass nie ein
//! harter Fehler beim Host ankommt.

use crate::core::{NodeId, WayId};

/// Fehler einer einzelnen Engine-Operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RexError {
    /// Selektion oder Topologie passt nicht zur Operation
    #[error("Vorbedingung nicht erfüllt: {0}")]
    PreconditionNotMet(String),
    /// Ein gemeinsamer Node hat mehr Referrer als eindeutig auflösbar
    #[error("Mehrdeutige Topologie an Node {node}: {referrers} Ways referenzieren ihn")]
    AmbiguousTopology { node: NodeId, referrers: usize },
    /// Topologie, die bewusst nicht unterstützt wird (z.B. geschlossene Ways)
    #[error("Nicht unterstützte Topologie: {0}")]
    UnsupportedTopology(String),
    /// Node-ID existiert nicht im Datensatz
    #[error("Node {0} existiert nicht")]
    MissingNode(NodeId),
    /// Way-ID existiert nicht im Datensatz
    #[error("Way {0} existiert nicht")]
    MissingWay(WayId),
    /// Way verweist auf einen Node, der nicht im Datensatz liegt
    #[error("Way {way} referenziert fehlenden Node {node}")]
    DanglingReference { way: WayId, node: NodeId },
    /// Way ohne Node-Referenzen
    #[error("Way {0} hat keine Nodes")]
    EmptyWay(WayId),
}

/// Kurzform für Engine-Ergebnisse.
pub type RexResult<T> = Result<T, RexError>;
