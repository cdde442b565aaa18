//! Random polygons for property tests.

use std::f64::consts::TAU;

use proptest::{collection::vec, prelude::*};

/// A star-shaped polygon around the origin, possibly with a hole.
///
/// Vertex `i` of the outer boundary sits at angle `(i + t_i / 2) * 2π / n`,
/// with `t_i` in `[0, 1)`, and at a distance between 2 and 10 from the
/// origin. The angles are strictly increasing, so the boundary is simple and
/// counter-clockwise. With at least eight vertices, every boundary edge stays
/// more than 1.6 away from the origin, leaving room for a hole of radius 1.
#[derive(Clone, Debug)]
pub struct Star {
    pub outer: Vec<(f64, f64)>,
    pub hole: Option<Vec<(f64, f64)>>,
}

impl Star {
    pub fn contours(&self) -> Vec<Vec<(f64, f64)>> {
        let mut ret = vec![self.outer.clone()];
        ret.extend(self.hole.clone());
        ret
    }

    pub fn vertex_count(&self) -> usize {
        self.outer.len() + self.hole.as_ref().map_or(0, Vec::len)
    }

    pub fn hole_count(&self) -> usize {
        usize::from(self.hole.is_some())
    }
}

fn outer(n: usize, radii: &[f64], jitter: &[f64]) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let angle = (i as f64 + jitter[i] / 2.0) * TAU / n as f64;
            (radii[i] * angle.cos(), radii[i] * angle.sin())
        })
        .collect()
}

// A regular polygon of radius 1, clockwise.
fn hole(m: usize, rotation: f64) -> Vec<(f64, f64)> {
    (0..m)
        .map(|k| {
            let angle = -(k as f64 + rotation) * TAU / m as f64;
            (angle.cos(), angle.sin())
        })
        .collect()
}

/// Stars with between 3 and `max_vertices` outer vertices, and no hole.
pub fn star(max_vertices: usize) -> impl Strategy<Value = Star> {
    (3..=max_vertices)
        .prop_flat_map(|n| (vec(2.0..10.0f64, n), vec(0.0..1.0f64, n)))
        .prop_map(|(radii, jitter)| Star {
            outer: outer(radii.len(), &radii, &jitter),
            hole: None,
        })
}

/// Stars with between 8 and `max_vertices` outer vertices, and a hole with
/// between 3 and 6 vertices.
pub fn star_with_hole(max_vertices: usize) -> impl Strategy<Value = Star> {
    (8..=max_vertices.max(8))
        .prop_flat_map(|n| {
            (
                vec(2.0..10.0f64, n),
                vec(0.0..1.0f64, n),
                3..=6usize,
                0.01..0.99f64,
            )
        })
        .prop_map(|(radii, jitter, m, rotation)| Star {
            outer: outer(radii.len(), &radii, &jitter),
            hole: Some(hole(m, rotation)),
        })
}

/// Either of the above.
pub fn any_star(max_vertices: usize) -> impl Strategy<Value = Star> {
    prop_oneof![star(max_vertices), star_with_hole(max_vertices)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geom::orient, Point};

    fn signed_area(c: &[(f64, f64)]) -> f64 {
        c.iter()
            .zip(c.iter().cycle().skip(1))
            .map(|(a, b)| a.0 * b.1 - b.0 * a.1)
            .sum()
    }

    proptest! {
        #[test]
        fn stars_are_counter_clockwise(s in star_with_hole(16)) {
            prop_assert!(signed_area(&s.outer) > 0.0);
            prop_assert!(signed_area(s.hole.as_ref().unwrap()) < 0.0);
        }

        #[test]
        fn outer_boundary_is_convex_at_the_origin(s in star(16)) {
            // The origin sees every edge from the inside.
            let o = Point::try_from((0.0, 0.0)).unwrap();
            for (a, b) in s.outer.iter().zip(s.outer.iter().cycle().skip(1)) {
                let a = Point::try_from(*a).unwrap();
                let b = Point::try_from(*b).unwrap();
                prop_assert!(orient(&o, &a, &b) > 0.0);
            }
        }
    }
}
