use ordered_float::NotNan;

/// A point in the plane.
///
/// Points are ordered by the sweep: the sweep line moves from large `y` to
/// small `y`, so a point is *greater* than another if it is visited earlier:
/// if it has a larger `y` coordinate or, for equal `y`, a smaller `x`
/// coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Point {
    pub x: NotNan<f64>,
    pub y: NotNan<f64>,
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x.into_inner(), self.y.into_inner())
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then_with(|| other.x.cmp(&self.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Point {
    pub fn new(x: NotNan<f64>, y: NotNan<f64>) -> Self {
        Point { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x.into_inner()
    }

    pub fn y(&self) -> f64 {
        self.y.into_inner()
    }

    fn coord(&self) -> robust::Coord<f64> {
        robust::Coord {
            x: self.x(),
            y: self.y(),
        }
    }
}

impl TryFrom<(f64, f64)> for Point {
    type Error = ordered_float::FloatIsNan;

    fn try_from((x, y): (f64, f64)) -> Result<Self, Self::Error> {
        Ok(Point {
            x: NotNan::new(x)?,
            y: NotNan::new(y)?,
        })
    }
}

impl std::ops::Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x() - rhs.x(),
            y: self.y() - rhs.y(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn normalized(&self) -> Vector {
        let n = self.norm();
        Vector {
            x: self.x / n,
            y: self.y / n,
        }
    }
}

/// Twice the signed area of the triangle `a`, `b`, `c`, computed exactly.
///
/// Positive if the three points are in counter-clockwise order, negative if
/// they are clockwise and zero if they are collinear.
pub fn orient(a: &Point, b: &Point, c: &Point) -> f64 {
    robust::orient2d(a.coord(), b.coord(), c.coord())
}

/// The cosine of the angle at `b` in the triangle `a`, `b`, `c`.
///
/// The two sides are normalized before taking the dot product, so this stays
/// finite for any coordinates whose differences are finite.
pub fn angle_cos(a: &Point, b: &Point, c: &Point) -> f64 {
    let ba = (*a - *b).normalized();
    let bc = (*c - *b).normalized();
    ba.dot(&bc)
}
