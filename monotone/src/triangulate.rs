use crate::{
    contours::{Contours, VertexId},
    geom::{orient, Point},
    trace::{Trace, TraceEvent},
    Error,
};

/// Three vertex ids, in counter-clockwise order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Triangle(pub [VertexId; 3]);

impl Triangle {
    fn counter_clockwise(contours: &Contours, a: VertexId, b: VertexId, c: VertexId) -> Self {
        if orient(&contours.point(a), &contours.point(b), &contours.point(c)) < 0.0 {
            Triangle([a, c, b])
        } else {
            Triangle([a, b, c])
        }
    }

    pub fn vertices(&self) -> [VertexId; 3] {
        self.0
    }
}

#[derive(Clone, Copy, Debug)]
struct ChainVertex {
    id: VertexId,
    point: Point,
    // Whether the vertex is on the left chain, i.e. its successor along the
    // loop comes after it in the sweep.
    left: bool,
}

fn emit(
    contours: &Contours,
    out: &mut Vec<Triangle>,
    trace: &mut Trace,
    a: VertexId,
    b: VertexId,
    c: VertexId,
) {
    let tri = Triangle::counter_clockwise(contours, a, b, c);
    trace.record(TraceEvent::Triangle { vertices: tri.0 });
    out.push(tri);
}

/// Triangulates a y-monotone loop, appending the triangles to `out`.
///
/// `vertices` must be a counter-clockwise y-monotone loop, like the ones
/// produced by [`crate::topology::monotone_loops`]. A loop of `n` vertices
/// produces `n - 2` triangles.
pub fn triangulate_monotone(
    contours: &Contours,
    vertices: &[VertexId],
    out: &mut Vec<Triangle>,
    trace: &mut Trace,
) -> Result<(), Error> {
    if vertices.len() < 3 {
        return Err(Error::ShortLoop {
            vertices: vertices.to_vec(),
        });
    }

    let mut queue: Vec<ChainVertex> = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(&id, &next)| {
            let point = contours.point(id);
            ChainVertex {
                id,
                point,
                left: point > contours.point(next),
            }
        })
        .collect();
    queue.sort_by(|a, b| b.point.cmp(&a.point));

    let (last, rest) = queue.split_last().ok_or(Error::ShortLoop {
        vertices: vertices.to_vec(),
    })?;
    let mut stack: Vec<ChainVertex> = rest[..2].to_vec();

    for &q in &rest[2..] {
        match stack.last().copied() {
            Some(top) if top.left != q.left => {
                for pair in stack.windows(2) {
                    emit(contours, out, trace, q.id, pair[0].id, pair[1].id);
                }
                stack.clear();
                stack.push(top);
            }
            _ => {
                while let &[.., s2, s1] = stack.as_slice() {
                    let area = orient(&q.point, &s2.point, &s1.point);
                    if (area > 0.0 && s1.left) || (area < 0.0 && !s1.left) {
                        emit(contours, out, trace, q.id, s2.id, s1.id);
                        stack.pop();
                    } else {
                        break;
                    }
                }
            }
        }
        stack.push(q);
    }

    for pair in stack.windows(2) {
        emit(contours, out, trace, last.id, pair[0].id, pair[1].id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn ids(ids: &[usize]) -> Vec<VertexId> {
        ids.iter().copied().map(VertexId).collect()
    }

    fn triangles(contours: &Contours, lp: &[usize]) -> Vec<[usize; 3]> {
        let mut out = Vec::new();
        triangulate_monotone(contours, &ids(lp), &mut out, &mut Trace::default()).unwrap();
        out.iter().map(|t| t.0.map(|v| v.0)).collect()
    }

    #[test]
    fn square() {
        let c = Contours::new([vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]]).unwrap();
        assert_eq!(triangles(&c, &[1, 2, 3, 4]), vec![[1, 3, 4], [2, 3, 1]]);
    }

    #[test]
    fn reflex_chain() {
        // The right chain is reflex at v3, so v2 can't see v5 and the stack
        // has to hold three vertices until the bottom is reached.
        let c = Contours::new([vec![
            (0.0, 0.0),
            (4.0, 1.0),
            (2.0, 3.0),
            (1.0, 5.0),
            (0.0, 6.0),
        ]])
        .unwrap();
        assert_eq!(
            triangles(&c, &[1, 2, 3, 4, 5]),
            vec![[3, 4, 5], [1, 3, 5], [1, 2, 3]]
        );
    }

    #[test]
    fn too_short() {
        let c = Contours::new([vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]]).unwrap();
        let mut out = Vec::new();
        assert_matches!(
            triangulate_monotone(&c, &ids(&[1, 2]), &mut out, &mut Trace::default()),
            Err(Error::ShortLoop { .. })
        );
        assert!(out.is_empty());
    }
}
