use crate::contours::{Contours, VertexId};

/// An index into [`Edges`].
///
/// Boundary edge `e_i` starts at vertex `v_i`. Diagonals are numbered after
/// all the boundary edges, in the order they are created.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct EdgeId(pub usize);

impl std::fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum EdgeKind {
    Boundary,
    Diagonal,
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub id: EdgeId,
    pub start: VertexId,
    pub end: VertexId,
    pub kind: EdgeKind,
    /// The horizontal position of this edge at the sweep line, as of the last
    /// call to [`Edges::update_key`].
    pub key: f64,
    /// The lowest vertex above the sweep line that sees this edge to its
    /// right, if the edge is in the sweep status.
    pub helper: Option<VertexId>,
}

impl Edge {
    /// The endpoint of this edge that isn't `v`.
    pub fn other(&self, v: VertexId) -> VertexId {
        if self.start == v {
            self.end
        } else {
            self.start
        }
    }

    pub fn is_diagonal(&self) -> bool {
        self.kind == EdgeKind::Diagonal
    }
}

/// An arena of edges: first the boundary edges, then the diagonals.
///
/// Edges are never removed, so an [`EdgeId`] stays valid for the whole run.
#[derive(Clone, Debug, Default)]
pub struct Edges {
    edges: Vec<Edge>,
}

impl Edges {
    /// Creates one boundary edge per vertex, from each vertex to its successor.
    pub fn boundary(contours: &Contours) -> Self {
        let edges = contours
            .ids()
            .map(|v| Edge {
                id: EdgeId(v.0),
                start: v,
                end: contours.next(v),
                kind: EdgeKind::Boundary,
                key: contours.point(v).x(),
                helper: None,
            })
            .collect();
        Edges { edges }
    }

    /// Adds a diagonal from `a` to `b`, returning its id.
    pub fn add_diagonal(&mut self, a: VertexId, b: VertexId, contours: &Contours) -> EdgeId {
        let id = EdgeId(self.edges.len() + 1);
        self.edges.push(Edge {
            id,
            start: a,
            end: b,
            kind: EdgeKind::Diagonal,
            key: contours.point(a).x(),
            helper: None,
        });
        id
    }

    pub fn get(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0 - 1]
    }

    pub fn get_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0 - 1]
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = EdgeId> {
        (1..=self.edges.len()).map(EdgeId)
    }

    /// Recomputes the key of an edge for a sweep line at height `y`.
    pub fn update_key(&mut self, id: EdgeId, y: f64, contours: &Contours) {
        let edge = self.get_mut(id);
        edge.key = key_at(contours, edge.start, edge.end, y);
    }
}

/// The `x` coordinate at which the line through `a` and `b` meets the
/// horizontal line at `y`.
///
/// For a horizontal edge, this is the smaller of the two `x` coordinates.
pub fn key_at(contours: &Contours, a: VertexId, b: VertexId, y: f64) -> f64 {
    let p0 = contours.point(a);
    let p1 = contours.point(b);
    if p0.y == p1.y {
        p0.x().min(p1.x())
    } else {
        let t = (y - p0.y()) / (p1.y() - p0.y());
        p0.x() + (p1.x() - p0.x()) * t
    }
}
