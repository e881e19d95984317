use crate::{
    Location, MalformedError, Result, Scalar, Segment,
    crossing::{BoundaryCrossing, Cut, periodic_distance},
    geometry::{is_between, localize_in_range},
};

/// Finds crossings on the periodic geographic domain, where the boundary is made of meridians
/// and parallels.
///
/// Boundary edges on the antimeridian, or at the `±π` latitude of a rotated frame, cut the
/// domain in two sides: crossings there are reported as two different locations, one per side.
#[derive(Debug, Clone, Copy, Default)]
pub struct Periodic;

impl<T> BoundaryCrossing<T> for Periodic
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
        let frame = match edge {
            Segment::ParallelArc(_) => Frame::Upright,
            Segment::MeridianArc(_) => Frame::Rotated,
            other => {
                return Err(MalformedError::Unsupported {
                    kind: other.kind(),
                    operation: "periodic boundary edges",
                }
                .into());
            }
        };

        let crossing = parallel_edge_crossing(
            frame.rotate(start),
            &frame.rotate_segment(segment)?,
            frame.rotate(edge_start),
            frame.rotate(edge.end()?),
        )?;

        Ok(crossing
            .map(|[before, after]| {
                let before = frame.restore(before);
                Cut {
                    before,
                    after: frame.restore(after),
                    progress: periodic_distance(&start, &before),
                }
            })
            .into_iter()
            .collect())
    }
}

/// The orientation in which a crossing is computed.
///
/// Meridians are solved as parallels by turning the whole picture a quarter turn, so that
/// `(φ, λ)` becomes `(λ, -φ)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Upright,
    Rotated,
}

impl Frame {
    fn rotate<T>(self, location: Location<T>) -> Location<T>
    where
        T: Scalar,
    {
        match self {
            Frame::Upright => location,
            Frame::Rotated => Location {
                s: location.t,
                t: -location.s,
            },
        }
    }

    fn restore<T>(self, location: Location<T>) -> Location<T>
    where
        T: Scalar,
    {
        match self {
            Frame::Upright => location,
            Frame::Rotated => Location {
                s: -location.t,
                t: location.s,
            },
        }
    }

    fn rotate_segment<T>(self, segment: &Segment<T>) -> Result<Segment<T>>
    where
        T: Scalar,
    {
        if self == Frame::Upright {
            return Ok(*segment);
        }

        match *segment {
            Segment::LineTo(end) => Ok(Segment::LineTo(self.rotate(end))),
            Segment::MeridianArc(end) => Ok(Segment::ParallelArc(self.rotate(end))),
            Segment::ParallelArc(end) => Ok(Segment::MeridianArc(self.rotate(end))),
            other => Err(MalformedError::Unsupported {
                kind: other.kind(),
                operation: "periodic crossings",
            }
            .into()),
        }
    }
}

/// Returns where the segment starting at start crosses the parallel going from edge_start to
/// edge_end, as seen from both sides of the crossing.
fn parallel_edge_crossing<T>(
    start: Location<T>,
    segment: &Segment<T>,
    edge_start: Location<T>,
    edge_end: Location<T>,
) -> Result<Option<[Location<T>; 2]>>
where
    T: Scalar,
{
    let latitude = edge_start.s;

    match *segment {
        Segment::LineTo(end) => {
            let lower = latitude;
            let upper = latitude + T::TAU();
            let s0 = localize_in_range(start.s, lower, upper);
            let s1 = localize_in_range(end.s, lower, upper);

            if (s0 - s1).abs() < T::PI() {
                return Ok(None);
            }

            let crossing = parallel_crossing(
                Location { s: s0, t: start.t },
                Location { s: s1, t: end.t },
                latitude,
            );

            Ok(is_between(crossing[0].t, edge_start.t, edge_end.t).then_some(crossing))
        }
        Segment::ParallelArc(_) => Ok(None),
        Segment::MeridianArc(end) => {
            let crosses = is_between(start.t, edge_start.t, edge_end.t)
                && (start.s >= latitude) != (end.s >= latitude);

            let place = Location {
                s: latitude,
                t: start.t,
            };

            Ok(crosses.then_some([place, place]))
        }
        other => Err(MalformedError::Unsupported {
            kind: other.kind(),
            operation: "periodic crossings",
        }
        .into()),
    }
}

/// Returns where the straight line from start to end crosses the given latitude, as seen from
/// the side of start and from the side of end.
///
/// Both sides only differ when the latitude is `±π`, which is the antimeridian of a rotated
/// frame.
pub(crate) fn parallel_crossing<T>(
    start: Location<T>,
    end: Location<T>,
    latitude: T,
) -> [Location<T>; 2]
where
    T: Scalar,
{
    let w0 = localize_in_range(end.s - latitude, -T::PI(), T::PI());
    let w1 = localize_in_range(latitude - start.s, -T::PI(), T::PI());

    let longitude = if w0.is_zero() {
        end.t
    } else if w1.is_zero() || start.t == end.t {
        start.t
    } else {
        let (mut t0, mut t1) = (start.t, end.t);
        if (t1 - t0).abs() > T::PI() {
            let lower = t0.max(t1);
            t0 = localize_in_range(t0, lower, lower + T::TAU());
            t1 = localize_in_range(t1, lower, lower + T::TAU());
        }

        localize_in_range((w0 * t0 + w1 * t1) / (w0 + w1), -T::PI(), T::PI())
    };

    if latitude.abs() != T::PI() {
        let place = Location {
            s: latitude,
            t: longitude,
        };

        return [place, place];
    }

    let side = |positive: bool| Location {
        s: if positive { T::PI() } else { -T::PI() },
        t: longitude,
    };

    [side(start.s >= end.s), side(start.s < end.s)]
}
