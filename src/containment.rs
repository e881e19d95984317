use tracing::debug;

use crate::{
    ConsistencyError, Location, MalformedError, Result, Scalar, Segment,
    cartesian::Point,
    geometry::{self, Arc, is_between, localize_in_range},
};

/// The position of a location relative to a closed path.
///
/// Paths are directed: walking along the path, everything on the left is [`Side::In`] and
/// everything on the right is [`Side::Out`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    In,
    Out,
    Borderline,
}

/// Returns the side of the polygon the given location is on.
///
/// An empty polygon contains everything.
pub fn contains<T>(polygon: &[Segment<T>], location: &Location<T>, periodic: bool) -> Result<Side>
where
    T: Scalar,
{
    probe(polygon, location, periodic, false)
}

/// Returns the side of the polygon the given path lies on, judging by the first of its endpoints
/// (or, failing that, of its midpoints) that is not on the polygon itself.
pub fn encompasses<T>(polygon: &[Segment<T>], path: &[Segment<T>], periodic: bool) -> Result<Side>
where
    T: Scalar,
{
    for segment in path {
        let side = contains(polygon, &segment.end()?, periodic)?;
        if side != Side::Borderline {
            return Ok(side);
        }
    }

    for (previous, segment) in path.iter().zip(path.iter().skip(1)) {
        if segment.is_move() {
            continue;
        }

        let midpoint = geometry::midpoint(previous, segment, periodic)?;
        let side = contains(polygon, &midpoint, periodic)?;
        if side != Side::Borderline {
            return Ok(side);
        }
    }

    Ok(Side::Borderline)
}

/// A place where the line of constant `t` through the probed location meets the polygon.
struct RayCrossing<T> {
    s: T,
    going_east: bool,
}

fn probe<T>(
    polygon: &[Segment<T>],
    location: &Location<T>,
    periodic: bool,
    guaranteed: bool,
) -> Result<Side>
where
    T: Scalar,
{
    if polygon.is_empty() {
        return Ok(Side::In);
    }

    if is_on_straight_edge(polygon, location, periodic)? {
        return Ok(Side::Borderline);
    }

    // Crossings are weighted by the inverse of their distance, so coincident crossings in
    // opposite directions cancel out and the sign of the sum follows the nearest one.
    let mut sum = T::zero();
    for (previous, segment) in polygon.iter().zip(polygon.iter().skip(1)) {
        let start = previous.end()?;
        for crossing in ray_crossings(start, segment, location, periodic)? {
            let distance = crossing.s - location.s;
            if distance.is_zero() {
                return Ok(Side::Borderline);
            }

            sum = if crossing.going_east {
                sum - distance.recip()
            } else {
                sum + distance.recip()
            };
        }
    }

    if sum > T::zero() {
        return Ok(Side::In);
    }

    if sum < T::zero() {
        return Ok(Side::Out);
    }

    if guaranteed {
        return Err(ConsistencyError::Indeterminate(format!("{location}")).into());
    }

    // Nothing was hit, or the hits cancelled out: probe again from a location known to be
    // beyond the polygon, in line with some segment of it.
    let bounds = geometry::bounds(polygon)?;
    let two = T::one() + T::one();

    let mut t_out = None;
    for (previous, segment) in polygon.iter().zip(polygon.iter().skip(1)) {
        if segment.is_move() {
            continue;
        }

        let is_arc = matches!(segment, Segment::ArcTo { .. });
        if !is_arc && previous.end()?.t == segment.end()?.t {
            continue;
        }

        let midpoint = geometry::midpoint(previous, segment, periodic)?;
        if midpoint.s != location.s {
            t_out = Some(midpoint.t);
            break;
        }
    }

    let Some(t_out) = t_out else {
        return Err(ConsistencyError::Featureless(format!("{polygon:?}")).into());
    };

    let outside = Location {
        s: two * bounds.s_max - bounds.s_min,
        t: t_out,
    };

    debug!(probed = %location, outside = %outside, "containment was indeterminate, probing again");
    probe(polygon, &outside, periodic, true)
}

/// Returns true if the location lies exactly on some meridian, parallel or axis-aligned line of
/// the polygon.
fn is_on_straight_edge<T>(polygon: &[Segment<T>], location: &Location<T>, periodic: bool) -> Result<bool>
where
    T: Scalar,
{
    for (previous, segment) in polygon.iter().zip(polygon.iter().skip(1)) {
        if !matches!(
            segment,
            Segment::LineTo(_) | Segment::MeridianArc(_) | Segment::ParallelArc(_)
        ) {
            continue;
        }

        let start = previous.end()?;
        let end = segment.end()?;

        let mut within_s = is_between(location.s, start.s, end.s);
        let mut within_t = is_between(location.t, start.t, end.t);
        if periodic && matches!(segment, Segment::LineTo(_)) {
            within_s ^= (start.s - end.s).abs() > T::PI();
            within_t ^= (start.t - end.t).abs() > T::PI();
        }

        let on_line = (start.s == end.s && start.s == location.s)
            || (start.t == end.t && start.t == location.t);

        if within_s && within_t && on_line {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Returns where the segment starting at start meets the ray probing from location.
fn ray_crossings<T>(
    start: Location<T>,
    segment: &Segment<T>,
    location: &Location<T>,
    periodic: bool,
) -> Result<Vec<RayCrossing<T>>>
where
    T: Scalar,
{
    match *segment {
        Segment::MoveTo(_) | Segment::MeridianArc(_) => Ok(Vec::new()),
        Segment::ParallelArc(end) => {
            let crosses = (start.t < location.t) != (end.t < location.t);
            Ok(crosses
                .then_some(RayCrossing {
                    s: end.s,
                    going_east: end.t > start.t,
                })
                .into_iter()
                .collect())
        }
        Segment::LineTo(end) => {
            let (mut start, mut end) = (start, end);
            let mut crosses = (start.t < location.t) != (end.t < location.t);
            let mut going_east = end.t > start.t;

            if periodic {
                if (end.t - start.t).abs() > T::PI() {
                    crosses = !crosses;
                    going_east = !going_east;
                    start.t = localize_in_range(start.t, location.t - T::PI(), location.t + T::PI());
                    end.t = localize_in_range(end.t, location.t - T::PI(), location.t + T::PI());
                }

                end.s = localize_in_range(end.s, start.s - T::PI(), start.s + T::PI());
            }

            if !crosses {
                return Ok(Vec::new());
            }

            let weight = (end.t - location.t) / (end.t - start.t);
            let mut s = weight * start.s + (T::one() - weight) * end.s;
            if periodic {
                s = localize_in_range(s, -T::PI(), T::PI());
            }

            Ok(vec![RayCrossing { s, going_east }])
        }
        Segment::ArcTo { .. } => {
            if periodic {
                return Err(MalformedError::Unsupported {
                    kind: segment.kind(),
                    operation: "periodic containment",
                }
                .into());
            }

            ray_arc_crossings(&Arc::new(start, segment)?, location)
        }
        other => Err(MalformedError::Unsupported {
            kind: other.kind(),
            operation: "containment",
        }
        .into()),
    }
}

fn ray_arc_crossings<T>(arc: &Arc<T>, location: &Location<T>) -> Result<Vec<RayCrossing<T>>>
where
    T: Scalar,
{
    let center = arc.center()?;
    let discriminant = arc.radius * arc.radius - (location.t - center.y).powi(2);
    if discriminant < T::zero() {
        return Ok(Vec::new());
    }

    let mut crossings = Vec::new();
    for sign in [-T::one(), T::one()] {
        let x = center.x + sign * discriminant.sqrt();
        let vy = if arc.sweep { x - center.x } else { center.x - x };

        // Tangencies are not crossings.
        if vy.is_zero() || !arc.covers(&Point { x, y: location.t }) {
            continue;
        }

        // Crossings on an endpoint only count when the rest of the arc is below it, as for lines.
        if (location.t == arc.start.y && vy > T::zero()) || (location.t == arc.end.y && vy < T::zero())
        {
            continue;
        }

        crossings.push(RayCrossing {
            s: x,
            going_east: vy > T::zero(),
        });
    }

    Ok(crossings)
}
