//! Splitting a polygon into y-monotone pieces.
//!
//! We sweep a horizontal line from top to bottom, keeping track of the
//! boundary edges that have the polygon's interior immediately to their
//! right. Each of those edges has a "helper": the lowest vertex seen so far
//! that can be connected to anything just below the sweep line without
//! crossing the boundary. Split vertices (which would open a second lower
//! chain) and merge vertices (which close one) are resolved by adding
//! diagonals to helpers.

use crate::{
    contours::{Contours, VertexId, VertexType},
    edges::{EdgeId, Edges},
    sweep::{EventQueue, SweepEvent, SweepStatus},
    topology::Adjacency,
    trace::{Trace, TraceEvent},
    Error,
};

/// The result of the sweep: the input boundary plus the diagonals that
/// cut it into monotone pieces.
#[derive(Clone, Debug, Default)]
pub struct Decomposition {
    pub edges: Edges,
    pub adjacency: Adjacency,
    /// Diagonals, in the order they were added.
    pub diagonals: Vec<EdgeId>,
}

impl Decomposition {
    /// The endpoints of each diagonal, in the order they were added.
    pub fn diagonal_endpoints(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.diagonals.iter().map(|d| {
            let e = self.edges.get(*d);
            (e.start, e.end)
        })
    }
}

struct State<'a> {
    contours: &'a Contours,
    trace: &'a mut Trace,
    events: EventQueue,
    status: SweepStatus,
    edges: Edges,
    adjacency: Adjacency,
    diagonals: Vec<EdgeId>,
}

/// Adds diagonals to `contours` until every piece is y-monotone.
pub fn decompose(contours: &Contours, trace: &mut Trace) -> Result<Decomposition, Error> {
    let events = EventQueue::from_contours(contours);
    if let Some(first) = events.peek() {
        if first.kind != VertexType::Start {
            return Err(Error::NotStart {
                vertex: first.vertex,
                kind: first.kind,
                point: first.point,
            });
        }
    }

    let mut state = State {
        contours,
        trace,
        events,
        status: SweepStatus::new(),
        edges: Edges::boundary(contours),
        adjacency: Adjacency::new(contours),
        diagonals: Vec::new(),
    };
    while let Some(ev) = state.events.pop() {
        state.step(ev)?;
        #[cfg(debug_assertions)]
        state.status.check_invariants(&state.edges);
    }

    if !state.status.is_empty() {
        log::warn!(
            "sweep finished with {} edges still active",
            state.status.len()
        );
    }
    log::debug!(
        "decomposed {} vertices with {} diagonals",
        contours.len(),
        state.diagonals.len()
    );

    Ok(Decomposition {
        edges: state.edges,
        adjacency: state.adjacency,
        diagonals: state.diagonals,
    })
}

impl State<'_> {
    fn step(&mut self, ev: SweepEvent) -> Result<(), Error> {
        let v = ev.vertex;
        self.status
            .rekey(&mut self.edges, self.contours, ev.point.y());
        self.trace.record(TraceEvent::Vertex {
            vertex: v,
            kind: ev.kind,
            point: ev.point,
        });

        match ev.kind {
            VertexType::Start => {
                self.open(v);
            }
            VertexType::End => {
                self.close(v)?;
            }
            VertexType::Split => {
                let left = self.left_edge(v)?;
                let helper = self.helper(left, v)?;
                self.add_diagonal(v, helper);
                self.set_helper(left, v);
                self.open(v);
            }
            VertexType::Merge => {
                self.close(v)?;
                self.connect_left(v)?;
            }
            VertexType::RegularDown => {
                self.close(v)?;
                self.open(v);
            }
            VertexType::RegularUp => {
                self.connect_left(v)?;
            }
        }
        Ok(())
    }

    /// Inserts the edge starting at `v` into the status, with `v` as its
    /// helper.
    fn open(&mut self, v: VertexId) {
        let e = EdgeId(v.0);
        self.set_helper(e, v);
        self.edges
            .update_key(e, self.contours.point(v).y(), self.contours);
        let position = self.status.insert(&mut self.edges, e);
        self.trace.record(TraceEvent::Inserted {
            edge: e,
            position,
            key: self.edges.get(e).key,
        });
    }

    /// Removes the edge ending at `v` from the status, first connecting `v`
    /// to the edge's helper if that helper is a merge vertex.
    fn close(&mut self, v: VertexId) -> Result<(), Error> {
        let e = EdgeId(self.contours.prev(v).0);
        let helper = self.helper(e, v)?;
        if self.contours.kind(helper) == VertexType::Merge {
            self.add_diagonal(v, helper);
        }
        if !self.status.remove(&self.edges, e) {
            return Err(self.inactive(v, e));
        }
        self.trace.record(TraceEvent::Removed { edge: e });
        Ok(())
    }

    /// Makes `v` the helper of the edge directly to its left, first
    /// connecting `v` to the old helper if that was a merge vertex.
    fn connect_left(&mut self, v: VertexId) -> Result<(), Error> {
        let left = self.left_edge(v)?;
        let helper = self.helper(left, v)?;
        if self.contours.kind(helper) == VertexType::Merge {
            self.add_diagonal(v, helper);
        }
        self.set_helper(left, v);
        Ok(())
    }

    fn left_edge(&mut self, v: VertexId) -> Result<EdgeId, Error> {
        let point = self.contours.point(v);
        let edge = self
            .status
            .max_smaller_than(&self.edges, point.x())
            .ok_or(Error::NoLeftEdge { vertex: v, point })?;
        self.trace.record(TraceEvent::LeftEdge { edge, vertex: v });
        Ok(edge)
    }

    // The helper of an edge that should be in the status, looked up while
    // handling `v`.
    fn helper(&self, e: EdgeId, v: VertexId) -> Result<VertexId, Error> {
        self.edges
            .get(e)
            .helper
            .ok_or_else(|| self.inactive(v, e))
    }

    fn set_helper(&mut self, e: EdgeId, helper: VertexId) {
        self.edges.get_mut(e).helper = Some(helper);
        self.trace.record(TraceEvent::Helper { edge: e, helper });
    }

    fn add_diagonal(&mut self, from: VertexId, to: VertexId) {
        let id = self.edges.add_diagonal(from, to, self.contours);
        self.adjacency.add_diagonal(self.edges.get(id));
        self.diagonals.push(id);
        self.trace.record(TraceEvent::Diagonal { edge: id, from, to });
    }

    fn inactive(&self, v: VertexId, edge: EdgeId) -> Error {
        Error::InactiveEdge {
            vertex: v,
            point: self.contours.point(v),
            edge,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn run(contours: &[Vec<(f64, f64)>]) -> Result<Decomposition, Error> {
        let contours = Contours::new(contours.iter().cloned())?;
        decompose(&contours, &mut Trace::default())
    }

    fn diagonals(d: &Decomposition) -> Vec<(usize, usize)> {
        d.diagonal_endpoints().map(|(a, b)| (a.0, b.0)).collect()
    }

    #[test]
    fn convex_polygon_needs_no_diagonals() {
        let d = run(&[vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]]).unwrap();
        assert!(d.diagonals.is_empty());
        assert_eq!(d.edges.len(), 4);
    }

    #[test]
    fn merge_vertex() {
        let d = run(&[vec![
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (2.0, 3.0),
            (0.0, 4.0),
        ]])
        .unwrap();
        assert_eq!(diagonals(&d), vec![(1, 4)]);
        assert_eq!(d.diagonals, vec![EdgeId(6)]);
    }

    #[test]
    fn split_vertex() {
        // The comb, upside down.
        let d = run(&[vec![
            (0.0, 0.0),
            (2.0, 1.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (0.0, 4.0),
        ]])
        .unwrap();
        // v2 is a split vertex; the helper of the edge to its left is v4,
        // the top-right corner.
        assert_eq!(diagonals(&d), vec![(2, 4)]);
    }

    #[test]
    fn hole() {
        let d = run(&[
            vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
            vec![(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)],
        ])
        .unwrap();
        assert_eq!(diagonals(&d), vec![(6, 3), (1, 8)]);
        assert_eq!(d.diagonals, vec![EdgeId(9), EdgeId(10)]);
    }

    #[test]
    fn empty() {
        let d = run(&[]).unwrap();
        assert!(d.edges.is_empty());
        assert!(d.diagonals.is_empty());
    }

    #[test]
    fn clockwise_outer_boundary() {
        // The highest vertex of a clockwise contour is a split vertex.
        assert_matches!(
            run(&[vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]]),
            Err(Error::NotStart {
                vertex: VertexId(2),
                kind: VertexType::Split,
                ..
            })
        );
    }
}
