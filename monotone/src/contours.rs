use std::collections::HashMap;

use crate::{
    geom::{orient, Point},
    Error,
};

/// The largest coordinate, in absolute value, that [`Contours::new`] accepts.
///
/// Orientation tests multiply differences of coordinates, and those products
/// have to stay finite.
pub const MAX_COORDINATE: f64 = 1e150;

/// An index into the vertices of [`Contours`].
///
/// Vertex ids are 1-based and dense: the vertices of the first contour are
/// numbered first, then those of the second contour, and so on.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct VertexId(pub usize);

impl std::fmt::Debug for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// How a vertex interacts with the sweep line.
///
/// "Above" and "below" refer to the sweep order of [`Point`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum VertexType {
    /// Both neighbors are below, and the interior angle is convex.
    Start,
    /// Both neighbors are above, and the interior angle is convex.
    End,
    /// Both neighbors are below, and the interior angle is reflex.
    Split,
    /// Both neighbors are above, and the interior angle is reflex.
    Merge,
    /// The contour passes upwards through this vertex; the interior is on its left.
    RegularUp,
    /// The contour passes downwards through this vertex; the interior is on its right.
    RegularDown,
}

impl std::fmt::Display for VertexType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VertexType::Start => "start",
            VertexType::End => "end",
            VertexType::Split => "split",
            VertexType::Merge => "merge",
            VertexType::RegularUp => "regular up",
            VertexType::RegularDown => "regular down",
        };
        f.write_str(name)
    }
}

impl VertexType {
    /// Classifies the vertex `v` given its predecessor `p` and successor `n`
    /// along its contour.
    pub fn classify(p: &Point, v: &Point, n: &Point) -> VertexType {
        if p > v && v > n {
            VertexType::RegularDown
        } else if n > v && v > p {
            VertexType::RegularUp
        } else {
            let convex = orient(p, v, n) > 0.0;
            match (p > v, convex) {
                (true, true) => VertexType::End,
                (true, false) => VertexType::Merge,
                (false, true) => VertexType::Start,
                (false, false) => VertexType::Split,
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub id: VertexId,
    pub point: Point,
    pub kind: VertexType,
}

/// An axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    fn empty() -> Self {
        Bounds {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        }
    }

    fn add(&mut self, p: &Point) {
        self.x_min = self.x_min.min(p.x());
        self.x_max = self.x_max.max(p.x());
        self.y_min = self.y_min.min(p.y());
        self.y_max = self.y_max.max(p.y());
    }

    fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// A polygon with holes, given as a collection of closed contours.
///
/// The outer boundary should be oriented counter-clockwise and the holes
/// clockwise. Every vertex is classified (see [`VertexType`]) as soon as the
/// contours are built.
#[derive(Clone, Debug, Default)]
pub struct Contours {
    // Indexed by `VertexId.0 - 1`.
    vertices: Vec<Vertex>,
    // `ends[c]` is the id of the last vertex of contour `c`.
    ends: Vec<usize>,
    bounds: Vec<Bounds>,
}

impl Contours {
    /// Builds and classifies the vertices of a polygon.
    ///
    /// Reading stops at the first empty contour. Contours with one or two
    /// points, non-finite coordinates, coordinates beyond [`MAX_COORDINATE`]
    /// and repeated points are errors.
    pub fn new<C, P>(contours: impl IntoIterator<Item = C>) -> Result<Self, Error>
    where
        C: IntoIterator<Item = P>,
        P: Into<(f64, f64)>,
    {
        let mut ret = Contours::default();
        let mut seen: HashMap<Point, VertexId> = HashMap::new();

        for contour in contours {
            let first = ret.vertices.len() + 1;
            let mut bounds = Bounds::empty();
            for p in contour {
                let (x, y) = p.into();
                let id = VertexId(ret.vertices.len() + 1);
                let point = Point::try_from((x, y)).map_err(|_| Error::NaN { vertex: id })?;
                if x.is_infinite() || y.is_infinite() {
                    return Err(Error::Infinity { vertex: id });
                }
                if x.abs() > MAX_COORDINATE || y.abs() > MAX_COORDINATE {
                    return Err(Error::TooLarge { vertex: id, point });
                }
                if let Some(&earlier) = seen.get(&point) {
                    return Err(Error::DuplicatePoint {
                        first: earlier,
                        vertex: id,
                        point,
                    });
                }
                seen.insert(point, id);
                bounds.add(&point);
                ret.vertices.push(Vertex {
                    id,
                    point,
                    // Placeholder until the whole contour is known.
                    kind: VertexType::Start,
                });
            }

            let len = ret.vertices.len() + 1 - first;
            if len == 0 {
                break;
            }
            if len < 3 {
                return Err(Error::ShortContour {
                    contour: ret.ends.len(),
                    len,
                });
            }
            ret.ends.push(ret.vertices.len());
            ret.bounds.push(bounds);
        }

        ret.classify();
        log::debug!(
            "read {} vertices in {} contours",
            ret.vertices.len(),
            ret.ends.len()
        );
        Ok(ret)
    }

    fn classify(&mut self) {
        for idx in 0..self.vertices.len() {
            let id = VertexId(idx + 1);
            let p = self.point(self.prev(id));
            let n = self.point(self.next(id));
            let v = self.point(id);
            self.vertices[idx].kind = VertexType::classify(&p, &v, &n);
        }
    }

    /// The total number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contour_count(&self) -> usize {
        self.ends.len()
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0 - 1]
    }

    pub fn point(&self, id: VertexId) -> Point {
        self.vertex(id).point
    }

    pub fn kind(&self, id: VertexId) -> VertexType {
        self.vertex(id).kind
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = VertexId> {
        (1..=self.vertices.len()).map(VertexId)
    }

    /// The index of the contour containing `id`.
    pub fn contour_of(&self, id: VertexId) -> usize {
        self.ends.partition_point(|&end| end < id.0)
    }

    /// The ids of the vertices in contour `contour`, in order.
    pub fn contour(&self, contour: usize) -> impl Iterator<Item = VertexId> {
        let start = self.contour_start(contour);
        (start..=self.ends[contour]).map(VertexId)
    }

    fn contour_start(&self, contour: usize) -> usize {
        if contour == 0 {
            1
        } else {
            self.ends[contour - 1] + 1
        }
    }

    /// The vertex before `id` on its contour.
    pub fn prev(&self, id: VertexId) -> VertexId {
        let c = self.contour_of(id);
        if id.0 == self.contour_start(c) {
            VertexId(self.ends[c])
        } else {
            VertexId(id.0 - 1)
        }
    }

    /// The vertex after `id` on its contour.
    pub fn next(&self, id: VertexId) -> VertexId {
        let c = self.contour_of(id);
        if id.0 == self.ends[c] {
            VertexId(self.contour_start(c))
        } else {
            VertexId(id.0 + 1)
        }
    }

    /// The bounding box of a single contour.
    pub fn contour_bounds(&self, contour: usize) -> Bounds {
        self.bounds[contour]
    }

    /// The bounding box of all the contours, or `None` if there are none.
    pub fn bounds(&self) -> Option<Bounds> {
        let (first, rest) = self.bounds.split_first()?;
        Some(rest.iter().fold(*first, |acc, b| acc.union(b)))
    }
}
