use std::collections::BinaryHeap;

use crate::{
    contours::{Contours, VertexId, VertexType},
    edges::{EdgeId, Edges},
    geom::Point,
};

/// Keys that collide exactly are pushed apart by this much.
pub const KEY_EPSILON: f64 = 1e-10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepEvent {
    pub point: Point,
    pub vertex: VertexId,
    pub kind: VertexType,
}

// Larger events come out of the heap first, so the sweep order of the points
// is exactly the order we want.
impl Ord for SweepEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.point
            .cmp(&other.point)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for SweepEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// The vertices of a polygon, from top to bottom.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    inner: BinaryHeap<SweepEvent>,
}

impl EventQueue {
    /// Builds an event queue containing every vertex of `contours`.
    pub fn from_contours(contours: &Contours) -> Self {
        let inner = contours
            .vertices()
            .map(|v| SweepEvent {
                point: v.point,
                vertex: v.id,
                kind: v.kind,
            })
            .collect();
        EventQueue { inner }
    }

    pub fn pop(&mut self) -> Option<SweepEvent> {
        self.inner.pop()
    }

    pub fn peek(&self) -> Option<&SweepEvent> {
        self.inner.peek()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// The edges crossing the sweep line, from left to right.
///
/// The status only stores ids; the horizontal positions live in the `key`
/// field of the [`Edges`] arena, and are refreshed by [`SweepStatus::rekey`]
/// every time the sweep line moves.
#[derive(Clone, Debug, Default)]
pub struct SweepStatus {
    edges: Vec<EdgeId>,
}

impl SweepStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().copied()
    }

    /// Moves the sweep line to height `y`, updating the keys of every
    /// resident edge.
    ///
    /// The re-sort is stable, so edges whose keys become equal keep their
    /// relative order.
    pub fn rekey(&mut self, edges: &mut Edges, contours: &Contours, y: f64) {
        for &id in &self.edges {
            edges.update_key(id, y, contours);
        }
        self.edges
            .sort_by(|a, b| edges.get(*a).key.total_cmp(&edges.get(*b).key));
    }

    /// Inserts an edge at the position given by its current key, returning
    /// that position.
    ///
    /// If another resident edge has exactly the same key, the new edge's key
    /// is nudged to the right until it is unique.
    pub fn insert(&mut self, edges: &mut Edges, id: EdgeId) -> usize {
        let mut key = edges.get(id).key;
        while self.find(edges, key).is_some() {
            key += KEY_EPSILON;
        }
        edges.get_mut(id).key = key;

        let pos = self.edges.partition_point(|e| edges.get(*e).key < key);
        self.edges.insert(pos, id);
        pos
    }

    /// Removes an edge, returning `false` if it wasn't present.
    pub fn remove(&mut self, edges: &Edges, id: EdgeId) -> bool {
        let key = edges.get(id).key;
        let start = self.edges.partition_point(|e| edges.get(*e).key < key);
        let found = self.edges[start..]
            .iter()
            .take_while(|e| edges.get(**e).key == key)
            .position(|e| *e == id)
            .map(|i| start + i)
            // Only reachable if the keys got out of order; fall back to a scan.
            .or_else(|| self.edges.iter().position(|e| *e == id));

        match found {
            Some(pos) => {
                self.edges.remove(pos);
                true
            }
            None => false,
        }
    }

    /// The resident edge whose key is exactly `key`.
    pub fn find(&self, edges: &Edges, key: f64) -> Option<EdgeId> {
        let pos = self.edges.partition_point(|e| edges.get(*e).key < key);
        self.edges
            .get(pos)
            .copied()
            .filter(|e| edges.get(*e).key == key)
    }

    /// The resident edge with the largest key strictly smaller than `x`.
    pub fn max_smaller_than(&self, edges: &Edges, x: f64) -> Option<EdgeId> {
        let pos = self.edges.partition_point(|e| edges.get(*e).key < x);
        pos.checked_sub(1).map(|i| self.edges[i])
    }

    #[cfg(debug_assertions)]
    pub fn check_invariants(&self, edges: &Edges) {
        for w in self.edges.windows(2) {
            let (a, b) = (edges.get(w[0]), edges.get(w[1]));
            // Keys may coincide after a rekey; the epsilon only separates
            // them at insertion time.
            assert!(
                a.key <= b.key,
                "sweep status out of order: {:?} at {} and {:?} at {}",
                a.id,
                a.key,
                b.id,
                b.key
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Three disjoint triangles side by side, so there are plenty of
    // non-horizontal edges at y = 1.
    fn contours() -> Contours {
        Contours::new([
            vec![(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)],
            vec![(3.0, 0.0), (5.0, 0.0), (4.0, 2.0)],
            vec![(6.0, 0.0), (8.0, 0.0), (7.0, 2.0)],
        ])
        .unwrap()
    }

    #[test]
    fn queue_order() {
        let c = Contours::new([vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]]).unwrap();
        let mut queue = EventQueue::from_contours(&c);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.peek().map(|ev| ev.kind), Some(VertexType::Start));

        let mut order = Vec::new();
        while let Some(ev) = queue.pop() {
            order.push(ev.vertex.0);
        }
        assert_eq!(order, vec![4, 3, 1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn insert_and_query() {
        let c = contours();
        let mut edges = Edges::boundary(&c);
        let mut status = SweepStatus::new();

        // The left-hand edges of the triangles run from the apex down to
        // the left corner: e3, e6 and e9.
        for id in [EdgeId(6), EdgeId(9), EdgeId(3)] {
            edges.update_key(id, 1.0, &c);
            status.insert(&mut edges, id);
        }
        status.check_invariants(&edges);
        assert_eq!(
            status.iter().collect::<Vec<_>>(),
            vec![EdgeId(3), EdgeId(6), EdgeId(9)]
        );

        assert_eq!(status.find(&edges, 3.5), Some(EdgeId(6)));
        assert_eq!(status.find(&edges, 3.6), None);
        assert_eq!(status.max_smaller_than(&edges, 3.5), Some(EdgeId(3)));
        assert_eq!(status.max_smaller_than(&edges, 3.6), Some(EdgeId(6)));
        assert_eq!(status.max_smaller_than(&edges, 0.5), None);
        assert_eq!(status.max_smaller_than(&edges, 100.0), Some(EdgeId(9)));

        assert!(status.remove(&edges, EdgeId(6)));
        assert!(!status.remove(&edges, EdgeId(6)));
        assert_eq!(status.len(), 2);
    }

    #[test]
    fn equal_keys_are_separated() {
        let c = contours();
        let mut edges = Edges::boundary(&c);
        let mut status = SweepStatus::new();

        // e1 and e3 both have key 0 at y = 0.
        edges.update_key(EdgeId(3), 0.0, &c);
        edges.update_key(EdgeId(1), 0.0, &c);
        assert_eq!(status.insert(&mut edges, EdgeId(3)), 0);
        assert_eq!(status.insert(&mut edges, EdgeId(1)), 1);
        assert_eq!(edges.get(EdgeId(1)).key, KEY_EPSILON);
        status.check_invariants(&edges);

        assert!(status.remove(&edges, EdgeId(1)));
        assert_eq!(status.iter().collect::<Vec<_>>(), vec![EdgeId(3)]);
    }

    #[test]
    fn rekey_reorders() {
        let c = contours();
        let mut edges = Edges::boundary(&c);
        let mut status = SweepStatus::new();

        // e2 goes from (2, 0) up to (1, 2); e3 from (1, 2) down to (0, 0).
        status.rekey(&mut edges, &c, 1.0);
        for id in [EdgeId(3), EdgeId(2)] {
            edges.update_key(id, 1.0, &c);
            status.insert(&mut edges, id);
        }
        assert_eq!(
            status.iter().collect::<Vec<_>>(),
            vec![EdgeId(3), EdgeId(2)]
        );

        status.rekey(&mut edges, &c, 0.0);
        assert_eq!(edges.get(EdgeId(3)).key, 0.0);
        assert_eq!(edges.get(EdgeId(2)).key, 2.0);
        assert_eq!(
            status.iter().collect::<Vec<_>>(),
            vec![EdgeId(3), EdgeId(2)]
        );
    }
}
