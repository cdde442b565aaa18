#![doc = include_str!("../README.md")]

mod contours;
mod edges;
mod geom;
pub mod monotone;
pub mod sweep;
pub mod topology;
mod trace;
pub mod triangulate;

pub use contours::{Bounds, Contours, Vertex, VertexId, VertexType, MAX_COORDINATE};
pub use edges::{Edge, EdgeId, EdgeKind, Edges};
pub use geom::{angle_cos, orient, Point};
pub use trace::{Trace, TraceEvent};
pub use triangulate::Triangle;

#[cfg(test)]
pub mod perturbation;

/// Broad categories of [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The input isn't a valid polygon with holes.
    MalformedInput,
    /// The input looked valid, but its topology couldn't be decomposed.
    /// Usually this means that contours cross one another.
    DegenerateTopology,
}

/// Everything that can go wrong while triangulating.
///
/// No partial output is produced when any of these occur.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A coordinate was infinite.
    #[error("vertex {vertex} has an infinite coordinate")]
    Infinity { vertex: VertexId },
    /// A coordinate was larger than [`MAX_COORDINATE`] in absolute value.
    #[error("vertex {vertex} at {point:?} is too far from the origin")]
    TooLarge { vertex: VertexId, point: Point },
    /// A coordinate was not a number.
    #[error("vertex {vertex} has a NaN coordinate")]
    NaN { vertex: VertexId },
    /// Two vertices have the same coordinates.
    #[error("vertex {vertex} at {point:?} duplicates vertex {first}")]
    DuplicatePoint {
        first: VertexId,
        vertex: VertexId,
        point: Point,
    },
    /// A contour had one or two vertices.
    #[error("contour {contour} has only {len} vertices")]
    ShortContour { contour: usize, len: usize },
    /// The topmost vertex isn't a start vertex, so the outer boundary is
    /// probably clockwise.
    #[error("the first vertex {vertex} at {point:?} is a {kind} vertex, not a start vertex")]
    NotStart {
        vertex: VertexId,
        kind: VertexType,
        point: Point,
    },
    /// There was no edge to the left of a vertex that needed one.
    #[error("no edge to the left of {vertex} at {point:?}")]
    NoLeftEdge { vertex: VertexId, point: Point },
    /// An edge that should have been crossing the sweep line wasn't.
    ///
    /// Every edge ending at a vertex is opened when the sweep passes its
    /// upper endpoint, so this points to a bug in the sweep rather than to
    /// bad input.
    #[error("edge {edge} is not active at {vertex} ({point:?})")]
    InactiveEdge {
        vertex: VertexId,
        point: Point,
        edge: EdgeId,
    },
    /// A face walk arrived at a vertex with no way out.
    #[error("dead end at {vertex} ({point:?}) while collecting monotone pieces")]
    DeadEnd { vertex: VertexId, point: Point },
    /// A face walk didn't return to its starting vertex.
    #[error("the loop starting at {vertex} did not close after {steps} steps")]
    UnclosedLoop { vertex: VertexId, steps: usize },
    /// A monotone piece had fewer than three vertices.
    #[error("monotone piece {vertices:?} has fewer than three vertices")]
    ShortLoop { vertices: Vec<VertexId> },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Infinity { .. }
            | Error::TooLarge { .. }
            | Error::NaN { .. }
            | Error::DuplicatePoint { .. }
            | Error::ShortContour { .. }
            | Error::NotStart { .. } => ErrorKind::MalformedInput,
            Error::NoLeftEdge { .. }
            | Error::InactiveEdge { .. }
            | Error::DeadEnd { .. }
            | Error::UnclosedLoop { .. }
            | Error::ShortLoop { .. } => ErrorKind::DegenerateTopology,
        }
    }
}

/// Knobs for [`triangulate_with`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Keep a [`TraceEvent`] for every decision taken. The events are always
    /// sent to the `log` facade at trace level, whether or not this is set.
    pub trace: bool,
}

impl Options {
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// Everything computed while triangulating a polygon.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct Triangulation {
    /// The triangles, each in counter-clockwise order.
    pub triangles: Vec<Triangle>,
    /// The diagonals added to make the pieces monotone, in the order they
    /// were added.
    pub diagonals: Vec<(VertexId, VertexId)>,
    /// The monotone pieces, each listed counter-clockwise.
    pub monotone_loops: Vec<Vec<VertexId>>,
    /// Empty unless [`Options::trace`] was set.
    pub trace: Vec<TraceEvent>,
}

/// Triangulates a polygon with holes, given as a collection of closed
/// contours.
///
/// The outer boundary must be counter-clockwise and the holes clockwise, and
/// no coordinate may exceed [`MAX_COORDINATE`] in absolute value. The
/// vertices are numbered from 1 in the order they appear, and the returned
/// triangles refer to them by these numbers.
pub fn triangulate(contours: &[Vec<(f64, f64)>]) -> Result<Vec<Triangle>, Error> {
    Ok(triangulate_with(contours, &Options::default())?.triangles)
}

/// Like [`triangulate`], but with more options and more output.
pub fn triangulate_with(
    contours: &[Vec<(f64, f64)>],
    options: &Options,
) -> Result<Triangulation, Error> {
    let contours = Contours::new(contours.iter().map(|c| c.iter().copied()))?;
    let mut trace = Trace::new(options.trace);

    let decomposition = monotone::decompose(&contours, &mut trace)?;
    let loops = topology::monotone_loops(&contours, &decomposition, &mut trace)?;

    let mut triangles = Vec::with_capacity(contours.len());
    for lp in &loops {
        triangulate::triangulate_monotone(&contours, lp, &mut triangles, &mut trace)?;
    }
    log::debug!(
        "{} vertices, {} diagonals, {} monotone pieces, {} triangles",
        contours.len(),
        decomposition.diagonals.len(),
        loops.len(),
        triangles.len()
    );

    Ok(Triangulation {
        triangles,
        diagonals: decomposition.diagonal_endpoints().collect(),
        monotone_loops: loops,
        trace: trace.into_events(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn error_kinds() {
        let dup = triangulate(&[vec![(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]]).unwrap_err();
        assert_eq!(dup.kind(), ErrorKind::MalformedInput);

        let cw = triangulate(&[vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)]]).unwrap_err();
        assert_matches!(cw, Error::NotStart { .. });
        assert_eq!(cw.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn error_messages() {
        let err = triangulate(&[vec![(0.0, 0.0), (1.0, 0.0)]]).unwrap_err();
        assert_eq!(err.to_string(), "contour 0 has only 2 vertices");

        let err = triangulate(&[vec![(0.0, 0.0), (1.0, f64::NAN), (0.0, 1.0)]]).unwrap_err();
        assert_eq!(err.to_string(), "vertex v2 has a NaN coordinate");
    }

    #[test]
    fn options() {
        assert!(!Options::default().trace);
        assert!(Options::default().with_trace(true).trace);
    }

    #[test]
    fn empty_input() {
        assert!(triangulate(&[]).unwrap().is_empty());
        // An empty contour ends the input.
        let t = triangulate(&[vec![], vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]]).unwrap();
        assert!(t.is_empty());
    }
}
