use num_traits::Float;

use crate::{
    Location, MalformedError, Result, Scalar, Segment,
    cartesian::{Point, determinant::Determinant},
    crossing::{BoundaryCrossing, Cut},
    geometry::{Arc, is_between, localize_in_range},
};

/// Finds crossings on the infinite cartesian plane, where the boundary is made of straight lines.
///
/// Crossings are the same location on both sides of the cut.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planar;

impl<T> BoundaryCrossing<T> for Planar
where
    T: Scalar,
{
    fn edge_crossings(
        &self,
        start: Location<T>,
        segment: &Segment<T>,
        edge_start: Location<T>,
        edge: &Segment<T>,
    ) -> Result<Vec<Cut<T>>> {
        let Segment::LineTo(edge_end) = edge else {
            return Err(MalformedError::Unsupported {
                kind: edge.kind(),
                operation: "planar boundary edges",
            }
            .into());
        };

        let edge = [Point::from(edge_start), Point::from(*edge_end)];

        let cuts = match segment {
            Segment::LineTo(end) => line_crossing([start.into(), (*end).into()], edge)
                .map(|(point, progress)| vec![(point, progress)])
                .unwrap_or_default(),
            Segment::ArcTo { .. } => arc_crossings(&Arc::new(start, segment)?, edge)?,
            other => {
                return Err(MalformedError::Unsupported {
                    kind: other.kind(),
                    operation: "planar crossings",
                }
                .into());
            }
        };

        Ok(cuts
            .into_iter()
            .map(|(point, progress)| Cut {
                before: point.into(),
                after: point.into(),
                progress,
            })
            .collect())
    }
}

/// Returns the single common point between both lines, if any, together with how far along the
/// first one it is.
///
/// Endpoints are inclusive: a line touching the edge with one of its ends crosses it at exactly
/// that end. Parallel lines never cross.
fn line_crossing<T>([a, b]: [Point<T>; 2], [c, d]: [Point<T>; 2]) -> Option<(Point<T>, T)>
where
    T: Float,
{
    let determinant = Determinant::of_directions([&a, &b], [&c, &d]).into_inner();
    if determinant.is_zero() {
        return None;
    }

    let t = (a.x - c.x) * (c.y - d.y) - (a.y - c.y) * (c.x - d.x);

    // Predict if the division `t / determinant` will be in the range `[0,1]`
    if t.abs() > determinant.abs() || !t.is_zero() && t.signum() != determinant.signum() {
        return None;
    }

    let u = -((a.x - b.x) * (a.y - c.y) - (a.y - b.y) * (a.x - c.x));

    // Predict if the division `u / determinant` will be in the range `[0,1]`
    if u.abs() > determinant.abs() || !u.is_zero() && u.signum() != determinant.signum() {
        return None;
    }

    let t = t / determinant;
    let u = u / determinant;

    let point = if t.is_zero() {
        a
    } else if t == T::one() {
        b
    } else if u.is_zero() {
        c
    } else if u == T::one() {
        d
    } else {
        // Interpolating along the edge keeps axis-aligned edges exact.
        Point {
            x: c.x + u * (d.x - c.x),
            y: c.y + u * (d.y - c.y),
        }
    };

    Some((point, t))
}

/// Returns every point where the arc meets the straight edge, together with the angle swept from
/// the start of the arc up to each of them.
fn arc_crossings<T>(arc: &Arc<T>, [c, d]: [Point<T>; 2]) -> Result<Vec<(Point<T>, T)>>
where
    T: Scalar,
{
    let center = arc.center()?;
    let normalized = arc.normalized();

    let direction = Point {
        x: d.x - c.x,
        y: d.y - c.y,
    };
    let offset = Point {
        x: c.x - center.x,
        y: c.y - center.y,
    };

    let two = T::one() + T::one();
    let a = direction.x * direction.x + direction.y * direction.y;
    let b = two * (offset.x * direction.x + offset.y * direction.y);
    let k = offset.x * offset.x + offset.y * offset.y - arc.radius * arc.radius;

    if a.is_zero() {
        return Ok(Vec::new());
    }

    let discriminant = b * b - two * two * a * k;
    let mut roots = Vec::new();
    if discriminant.is_zero() {
        roots.push(-b / (two * a));
    } else if discriminant > T::zero() {
        let root = discriminant.sqrt();
        roots.push((-b - root) / (two * a));
        roots.push((-b + root) / (two * a));
    }

    let mut points: Vec<Point<T>> = roots
        .into_iter()
        .filter(|u| is_between(*u, T::zero(), T::one()))
        .map(|u| Point {
            x: c.x + u * direction.x,
            y: c.y + u * direction.y,
        })
        .collect();

    // Endpoints lying exactly on the edge must be reported as themselves.
    for endpoint in [arc.start, arc.end] {
        let on_edge = Determinant::from([&c, &d, &endpoint]).into_inner().is_zero()
            && is_between(endpoint.x, c.x, d.x)
            && is_between(endpoint.y, c.y, d.y);

        if !on_edge || points.contains(&endpoint) {
            continue;
        }

        let nearest = points
            .iter()
            .enumerate()
            .filter(|(_, point)| ![arc.start, arc.end].contains(point))
            .min_by(|(_, p), (_, q)| {
                p.distance(&endpoint)
                    .partial_cmp(&q.distance(&endpoint))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(index, _)| index);

        match nearest {
            Some(index) => points[index] = endpoint,
            None => points.push(endpoint),
        }
    }

    let angle = |point: &Point<T>| (point.y - center.y).atan2(point.x - center.x);
    let origin = angle(&arc.start);

    Ok(points
        .into_iter()
        .filter(|point| normalized.covers(point))
        .map(|point| {
            let swept = if point == arc.start {
                T::zero()
            } else if arc.sweep {
                angle(&point) - origin
            } else {
                origin - angle(&point)
            };

            (point, localize_in_range(swept, T::zero(), T::TAU()))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use crate::{
        Location, Segment,
        cartesian::Planar,
        crossing::{BoundaryCrossing, Cut},
        location,
    };

    #[test]
    fn planar_edge_crossings() {
        struct Test {
            name: &'static str,
            start: Location<f64>,
            segment: Segment<f64>,
            want: Vec<Cut<f64>>,
        }

        let edge_start = location!(0., 0.);
        let edge = Segment::line_to(0., 1.);

        vec![
            Test {
                name: "line across the edge",
                start: location!(-1., 0.5),
                segment: Segment::line_to(2., 0.5),
                want: vec![Cut {
                    before: location!(0., 0.5),
                    after: location!(0., 0.5),
                    progress: 1. / 3.,
                }],
            },
            Test {
                name: "parallel line",
                start: location!(1., 0.),
                segment: Segment::line_to(1., 1.),
                want: vec![],
            },
            Test {
                name: "line short of the edge",
                start: location!(-2., 0.5),
                segment: Segment::line_to(-1., 0.5),
                want: vec![],
            },
            Test {
                name: "line ending on the edge",
                start: location!(-1., 0.25),
                segment: Segment::line_to(0., 0.25),
                want: vec![Cut {
                    before: location!(0., 0.25),
                    after: location!(0., 0.25),
                    progress: 1.,
                }],
            },
            Test {
                name: "line through the edge vertex",
                start: location!(-1., 1.),
                segment: Segment::line_to(1., 1.),
                want: vec![Cut {
                    before: location!(0., 1.),
                    after: location!(0., 1.),
                    progress: 0.5,
                }],
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = Planar
                .edge_crossings(test.start, &test.segment, edge_start, &edge)
                .unwrap_or_else(|error| panic!("{}: {error}", test.name));

            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    #[test]
    fn arc_crossings_are_ordered_by_sweep() {
        // Half a circle of radius 1 around the origin, from (-1, 0) to (1, 0) through (0, 1).
        let start = location!(-1., 0.);
        let arc = Segment::ArcTo {
            rx: 1.,
            ry: 1.,
            rotation: 0.,
            large_arc: false,
            sweep: false,
            end: location!(1., 0.),
        };

        let got = Planar
            .edge_crossings(start, &arc, location!(-2., 0.5), &Segment::line_to(2., 0.5))
            .unwrap_or_else(|error| panic!("{error}"));

        assert_eq!(got.len(), 2, "{got:?}");

        let [first, second] = [got[0], got[1]];
        let (first, second) = if first.progress < second.progress {
            (first, second)
        } else {
            (second, first)
        };

        let half = 0.75f64.sqrt();
        assert!((first.before.s + half).abs() < 1e-12, "{first:?}");
        assert!((second.before.s - half).abs() < 1e-12, "{second:?}");
        assert_eq!(first.before.t, 0.5);
    }

    #[test]
    fn arc_ending_on_the_edge() {
        let got = Planar
            .edge_crossings(
                location!(-1., 0.),
                &Segment::ArcTo {
                    rx: 1.,
                    ry: 1.,
                    rotation: 0.,
                    large_arc: false,
                    sweep: false,
                    end: location!(0., 1.),
                },
                location!(0., -2.),
                &Segment::line_to(0., 2.),
            )
            .unwrap_or_else(|error| panic!("{error}"));

        assert_eq!(got.len(), 1, "{got:?}");
        assert_eq!(got[0].before, location!(0., 1.));
    }

    #[test]
    fn curved_edges_are_unsupported() {
        let got = Planar.edge_crossings(
            location!(0., 0.),
            &Segment::line_to(1., 1.),
            location!(0., 1.),
            &Segment::meridian_to(1., 0.),
        );

        assert!(got.is_err());
    }
}
