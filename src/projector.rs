//! Projection of geographic paths onto the plane.

use tracing::trace;

use crate::{
    Budget, Error, Location, MalformedError, Path, Result, Scalar, Segment, SegmentKind,
    cartesian::Point,
    geometry::{localize_in_range, midpoint},
    path::check_finite,
    spherical::Place,
};

/// A map projection, turning places on the globe into points on the plane.
pub trait MapProjection<T> {
    /// Returns the point the given place is projected into.
    fn project_point(&self, place: &Place<T>) -> Point<T>;

    /// Returns the projection of the meridian at longitude `lon`, going from `lat0` to `lat1`.
    ///
    /// The returned segments start wherever the projection of the meridian start is.
    fn project_meridian(&self, lat0: T, lat1: T, lon: T) -> Vec<Segment<T>>;

    /// Returns the projection of the parallel at latitude `lat`, going from `lon0` to `lon1`.
    ///
    /// The returned segments start wherever the projection of the parallel start is.
    fn project_parallel(&self, lon0: T, lon1: T, lat: T) -> Vec<Segment<T>>;
}

/// Projects the given geographic path onto the plane.
///
/// Straight lines are subdivided until no projected piece is as long as precision, so the
/// result stays faithful however distorted the projection is. The path must have been cropped
/// beforehand: a line spanning more than half a turn is an error.
pub fn project_path<T, P>(
    projection: &P,
    segments: &[Segment<T>],
    precision: T,
    budget: &Budget,
) -> Result<Path<T>>
where
    T: Scalar,
    P: MapProjection<T>,
{
    check_finite(segments)?;

    let mut output: Vec<Segment<T>> = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        let previous = match index.checked_sub(1).and_then(|index| segments.get(index)) {
            Some(previous) => Some(previous.end()?),
            None => None,
        };

        let start = |segment: &Segment<T>| match previous {
            Some(previous) => Ok(previous),
            None => Err(MalformedError::MissingMoveTo(segment.kind())),
        };

        match *segment {
            Segment::MoveTo(end) => {
                let point = projection.project_point(&end.into());
                output.push(Segment::MoveTo(point.into()));
            }
            Segment::MeridianArc(end) => {
                let start = start(segment)?;
                if start.t != end.t {
                    return Err(mismatched(segment, start, end));
                }

                output.extend(projection.project_meridian(start.s, end.s, start.t));
            }
            Segment::ParallelArc(end) => {
                let start = start(segment)?;
                if start.s != end.s {
                    return Err(mismatched(segment, start, end));
                }

                output.extend(projection.project_parallel(start.t, end.t, start.s));
            }
            Segment::LineTo(end) => {
                let start = start(segment)?;
                project_line(projection, start, end, precision, budget, &mut output)?;
            }
            other => {
                return Err(MalformedError::Unsupported {
                    kind: other.kind(),
                    operation: "projection",
                }
                .into());
            }
        }
    }

    check_finite(&output)?;
    Ok(output.into())
}

fn mismatched<T>(segment: &Segment<T>, start: Location<T>, end: Location<T>) -> Error
where
    T: Scalar,
{
    MalformedError::MismatchedEndpoints {
        kind: segment.kind(),
        from: format!("{start}"),
        to: format!("{end}"),
    }
    .into()
}

/// Appends the projection of the straight line from start to end to the output, breaking it at
/// geographic midpoints until every piece is shorter than precision.
fn project_line<T, P>(
    projection: &P,
    start: Location<T>,
    end: Location<T>,
    precision: T,
    budget: &Budget,
    output: &mut Vec<Segment<T>>,
) -> Result<()>
where
    T: Scalar,
    P: MapProjection<T>,
{
    let mut pending = vec![end];
    let mut last = start;

    while let Some(next) = pending.pop() {
        let projected = projection.project_point(&next.into());
        let Some(last_projected) = output.last().map(Segment::end).transpose()? else {
            return Err(MalformedError::MissingMoveTo(SegmentKind::LineTo).into());
        };

        if Point::from(last_projected).distance(&projected) < precision {
            output.push(Segment::LineTo(projected.into()));
            last = next;
            continue;
        }

        if (next.t - last.t).abs() > T::PI() || (next.s - last.s).abs() > T::PI() {
            return Err(MalformedError::Uncropped {
                from: format!("{last}"),
                to: format!("{next}"),
            }
            .into());
        }

        let halfway = midpoint(&Segment::MoveTo(last), &Segment::LineTo(next), true)?;
        trace!(from = %last, to = %next, halfway = %halfway, "subdividing line");

        pending.push(next);
        pending.push(halfway);

        budget.check(pending.len() + output.len(), || {
            format!("no point between {last_projected} and {next} projects close enough")
        })?;
    }

    Ok(())
}

/// Shifts every longitude of the given geographic path so that center becomes the zero
/// meridian.
///
/// A zero center leaves the path untouched, so places on the antimeridian are not flipped to
/// the other side.
pub fn transform_input<T>(center: T, segments: &[Segment<T>]) -> Result<Path<T>>
where
    T: Scalar,
{
    if center.is_zero() {
        return Ok(segments.to_vec().into());
    }

    segments
        .iter()
        .map(|segment| -> Result<Segment<T>> {
            match segment {
                Segment::MoveTo(_)
                | Segment::LineTo(_)
                | Segment::MeridianArc(_)
                | Segment::ParallelArc(_) => {
                    let end = segment.end()?;
                    Ok(segment.with_end(Location {
                        s: end.s,
                        t: localize_in_range(end.t - center, -T::PI(), T::PI()),
                    }))
                }
                other => Err(MalformedError::Unsupported {
                    kind: other.kind(),
                    operation: "central meridian shifts",
                }
                .into()),
            }
        })
        .collect()
}

/// Turns the given planar path upside down, unless north_up is true.
pub fn transform_output<T>(north_up: bool, segments: &[Segment<T>]) -> Result<Path<T>>
where
    T: Scalar,
{
    if north_up {
        return Ok(segments.to_vec().into());
    }

    let flip = |location: Location<T>| Location {
        s: -location.s,
        t: -location.t,
    };

    segments
        .iter()
        .map(|segment| match *segment {
            Segment::MoveTo(end) => Ok(Segment::MoveTo(flip(end))),
            Segment::LineTo(end) => Ok(Segment::LineTo(flip(end))),
            Segment::ArcTo { end, .. } => Ok(segment.with_end(flip(end))),
            Segment::QuadraticTo { control, end } => Ok(Segment::QuadraticTo {
                control: flip(control),
                end: flip(end),
            }),
            Segment::CubicTo { controls, end } => Ok(Segment::CubicTo {
                controls: controls.map(flip),
                end: flip(end),
            }),
            Segment::ClosePath => Ok(Segment::ClosePath),
            Segment::MeridianArc(_) | Segment::ParallelArc(_) => {
                Err(MalformedError::Unsupported {
                    kind: segment.kind(),
                    operation: "north-up rotations",
                }
                .into())
            }
        })
        .collect()
}

/// Returns the longitude that best centers the given geographic path: the one opposite to the
/// middle of the widest range of longitudes the path never goes through.
///
/// Every segment is taken to cover the shorter way around between its endpoints. A path
/// covering every longitude is centered at zero.
pub fn choose_central_meridian<T>(segments: &[Segment<T>]) -> Result<T>
where
    T: Scalar,
{
    let mut covered: Vec<(T, T)> = Vec::new();
    for (previous, segment) in segments.iter().zip(segments.iter().skip(1)) {
        if segment.is_move() {
            continue;
        }

        let (mut west, mut east) = (previous.end()?.t, segment.end()?.t);
        if east < west {
            (west, east) = (east, west);
        }

        if east - west > T::PI() {
            (west, east) = (east, west + T::TAU());
        }

        let start = localize_in_range(west, -T::PI(), T::PI());
        covered.push((start, start + (east - west)));
    }

    covered.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut merged: Vec<(T, T)> = Vec::new();
    for (start, end) in covered {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    let (Some(first), Some(last)) = (merged.first().copied(), merged.last().copied()) else {
        return Ok(T::zero());
    };

    // Coverage spilling over the end of the turn closes gaps at its beginning.
    let spill = last.1 - T::TAU();
    let widest = merged
        .windows(2)
        .map(|pair| (pair[0].1, pair[1].0))
        .chain(std::iter::once((last.1, first.0 + T::TAU())))
        .map(|(start, end)| (start.max(spill), end))
        .filter(|(start, end)| end > start)
        .reduce(|widest, gap| {
            if gap.1 - gap.0 > widest.1 - widest.0 {
                gap
            } else {
                widest
            }
        });

    let Some((start, end)) = widest else {
        return Ok(T::zero());
    };

    let two = T::one() + T::one();
    Ok(localize_in_range(
        (start + end) / two + T::PI(),
        -T::PI(),
        T::PI(),
    ))
}
