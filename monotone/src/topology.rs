//! Recovering the monotone pieces from a [`Decomposition`].
//!
//! Every piece is a closed loop of boundary edges and diagonals with the
//! interior on its left. Boundary edges belong to exactly one piece, while a
//! diagonal separates two pieces and so is walked twice, once in each
//! direction.

use std::collections::BTreeSet;

use crate::{
    contours::{Contours, VertexId},
    edges::{Edge, EdgeId},
    geom::{angle_cos, orient},
    monotone::Decomposition,
    trace::{Trace, TraceEvent},
    Error,
};

/// For each vertex, the edges that can be walked away from it.
///
/// Boundary edges are only registered at their start, since the walk always
/// follows the boundary in its own direction. Diagonals are registered at
/// both ends.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    // Indexed by `VertexId.0 - 1`.
    out: Vec<BTreeSet<EdgeId>>,
}

impl Adjacency {
    pub fn new(contours: &Contours) -> Self {
        Adjacency {
            out: contours
                .ids()
                .map(|v| BTreeSet::from([EdgeId(v.0)]))
                .collect(),
        }
    }

    pub fn add_diagonal(&mut self, edge: &Edge) {
        self.out[edge.start.0 - 1].insert(edge.id);
        self.out[edge.end.0 - 1].insert(edge.id);
    }

    pub fn edges_at(&self, v: VertexId) -> &BTreeSet<EdgeId> {
        &self.out[v.0 - 1]
    }

    fn take(&mut self, v: VertexId, e: EdgeId) {
        self.out[v.0 - 1].remove(&e);
    }
}

// One step of a walk: edge `edge`, traversed from `from` to `to`. Diagonals
// are stored with a fixed direction, so the orientation of the traversal
// lives here rather than in the edge.
#[derive(Clone, Copy, Debug)]
struct Step {
    edge: EdgeId,
    from: VertexId,
    to: VertexId,
}

/// Walks the faces of a decomposition, returning each monotone piece as the
/// list of its vertices in counter-clockwise order.
pub fn monotone_loops(
    contours: &Contours,
    decomposition: &Decomposition,
    trace: &mut Trace,
) -> Result<Vec<Vec<VertexId>>, Error> {
    let edges = &decomposition.edges;
    let mut adjacency = decomposition.adjacency.clone();
    let mut remaining: BTreeSet<EdgeId> = edges.ids().collect();
    let mut loops = Vec::new();

    // Diagonals are never consumed, so we're done when only they are left.
    while remaining.len() > decomposition.diagonals.len() {
        let Some(&first) = remaining.first() else {
            break;
        };
        let edge = edges.get(first);
        debug_assert!(!edge.is_diagonal());

        let origin = edge.start;
        remaining.remove(&first);
        adjacency.take(origin, first);
        let mut step = Step {
            edge: first,
            from: origin,
            to: edge.end,
        };
        let mut vertices = vec![origin];

        while step.to != origin {
            if vertices.len() > edges.len() {
                return Err(Error::UnclosedLoop {
                    vertex: origin,
                    steps: vertices.len(),
                });
            }
            vertices.push(step.to);

            let next = select_next(contours, decomposition, &adjacency, step)?;
            if !edges.get(next.edge).is_diagonal() {
                remaining.remove(&next.edge);
                adjacency.take(next.from, next.edge);
            }
            step = next;
        }

        trace.record(TraceEvent::Loop {
            vertices: vertices.clone(),
        });
        loops.push(vertices);
    }

    log::debug!("found {} monotone loops", loops.len());
    Ok(loops)
}

// Chooses how to leave `arrival.to`. Among the edges turning left we take
// the sharpest turn; if nothing turns left, we take the edge that turns
// right the least.
fn select_next(
    contours: &Contours,
    decomposition: &Decomposition,
    adjacency: &Adjacency,
    arrival: Step,
) -> Result<Step, Error> {
    let b = arrival.to;
    let candidates: Vec<Step> = adjacency
        .edges_at(b)
        .iter()
        .filter(|&&e| e != arrival.edge)
        .map(|&e| Step {
            edge: e,
            from: b,
            to: decomposition.edges.get(e).other(b),
        })
        .collect();

    match candidates.as_slice() {
        [] => Err(Error::DeadEnd {
            vertex: b,
            point: contours.point(b),
        }),
        [only] => Ok(*only),
        _ => {
            let pa = contours.point(arrival.from);
            let pb = contours.point(b);

            let mut left: Option<(f64, Step)> = None;
            let mut right: Option<(f64, Step)> = None;
            for &step in &candidates {
                let pc = contours.point(step.to);
                let cos = angle_cos(&pa, &pb, &pc);
                if orient(&pa, &pb, &pc) > 0.0 {
                    if left.map_or(true, |(best, _)| best < cos) {
                        left = Some((cos, step));
                    }
                } else if right.map_or(true, |(best, _)| best > cos) {
                    right = Some((cos, step));
                }
            }

            // `candidates` is non-empty, so one of these is set.
            left.or(right).map(|(_, step)| step).ok_or(Error::DeadEnd {
                vertex: b,
                point: pb,
            })
        }
    }
}
