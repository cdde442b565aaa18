//! A record of the decisions taken while triangulating.
//!
//! Every event is also sent to the `log` facade at trace level; keeping them
//! in memory as well is opt-in (see [`crate::Options::trace`]).

use crate::{
    contours::{VertexId, VertexType},
    edges::EdgeId,
    geom::Point,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum TraceEvent {
    /// The sweep line reached a vertex.
    Vertex {
        vertex: VertexId,
        kind: VertexType,
        point: Point,
    },
    /// An edge entered the sweep status with the given key, at the given
    /// index from the left.
    Inserted {
        edge: EdgeId,
        position: usize,
        key: f64,
    },
    /// An edge left the sweep status.
    Removed { edge: EdgeId },
    /// The edge immediately to the left of a vertex was looked up.
    LeftEdge { edge: EdgeId, vertex: VertexId },
    /// An edge got a new helper.
    Helper { edge: EdgeId, helper: VertexId },
    /// A diagonal was added to the decomposition.
    Diagonal {
        edge: EdgeId,
        from: VertexId,
        to: VertexId,
    },
    /// A monotone loop was closed.
    Loop { vertices: Vec<VertexId> },
    /// A triangle was emitted.
    Triangle { vertices: [VertexId; 3] },
}

impl std::fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceEvent::Vertex { vertex, kind, .. } => write!(f, "{vertex} {kind}"),
            TraceEvent::Inserted { edge, key, .. } => write!(f, "insert {edge} at {key}"),
            TraceEvent::Removed { edge } => write!(f, "remove {edge}"),
            TraceEvent::LeftEdge { edge, vertex } => write!(f, "{edge} is left of {vertex}"),
            TraceEvent::Helper { edge, helper } => write!(f, "helper {edge} = {helper}"),
            TraceEvent::Diagonal { edge, from, to } => {
                write!(f, "diagonal {edge}: {from} -- {to}")
            }
            TraceEvent::Loop { vertices } => {
                f.write_str("loop")?;
                for v in vertices {
                    write!(f, " {v}")?;
                }
                Ok(())
            }
            TraceEvent::Triangle { vertices: [a, b, c] } => {
                write!(f, "triangle {a} {b} {c}")
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Trace {
    enabled: bool,
    events: Vec<TraceEvent>,
}

impl Trace {
    pub fn new(enabled: bool) -> Self {
        Trace {
            enabled,
            events: Vec::new(),
        }
    }

    pub fn record(&mut self, event: TraceEvent) {
        log::trace!("{event}");
        if self.enabled {
            self.events.push(event);
        }
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }
}
