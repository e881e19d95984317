//! Pure functions over coordinate pairs: bounds, midpoints and circular arc geometry.

use num_traits::Float;

use crate::{
    Location, MalformedError, Result, Scalar, Segment, SegmentKind,
    cartesian::{Point, determinant::Determinant},
};

/// Returns the equivalent of value inside the half-open range `[min, max)`, assuming the
/// coordinate is periodic with period `max - min`.
pub fn localize_in_range<T>(value: T, min: T, max: T) -> T
where
    T: Float,
{
    let period = max - min;
    value - ((value - min) / period).floor() * period
}

/// Returns true if, and only if, value lies in the closed range spanned by a and b, whatever
/// their order.
pub fn is_between<T>(value: T, a: T, b: T) -> bool
where
    T: PartialOrd,
{
    if a <= b {
        a <= value && value <= b
    } else {
        b <= value && value <= a
    }
}

/// Returns true if, and only if, the angle `a-vertex-c` is strictly acute.
pub fn is_acute<T>(a: &Point<T>, vertex: &Point<T>, c: &Point<T>) -> bool
where
    T: Float,
{
    (a.x - vertex.x) * (c.x - vertex.x) + (a.y - vertex.y) * (c.y - vertex.y) > T::zero()
}

/// The circular arc drawn by an [`Segment::ArcTo`] from a known start.
///
/// The sweep flag follows SVG: a sweeping arc goes in the direction of increasing angle, which
/// leaves the arc on the right-hand side of its directed chord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc<T> {
    pub start: Point<T>,
    pub end: Point<T>,
    pub radius: T,
    pub large_arc: bool,
    pub sweep: bool,
}

impl<T> Arc<T>
where
    T: Scalar,
{
    /// Returns the arc drawn by the given segment when starting at start.
    pub fn new(start: Location<T>, segment: &Segment<T>) -> Result<Self> {
        let Segment::ArcTo {
            rx,
            ry,
            large_arc,
            sweep,
            end,
            ..
        } = *segment
        else {
            return Err(MalformedError::Unsupported {
                kind: segment.kind(),
                operation: "arc geometry",
            }
            .into());
        };

        if rx != ry {
            return Err(MalformedError::EllipticalArc(format!("{segment:?}")).into());
        }

        Ok(Self {
            start: start.into(),
            end: end.into(),
            radius: rx,
            large_arc,
            sweep,
        })
    }

    /// Returns the same arc, drawn in the sweeping direction.
    pub fn normalized(self) -> Self {
        if self.sweep {
            return self;
        }

        Self {
            start: self.end,
            end: self.start,
            sweep: true,
            ..self
        }
    }

    /// Returns the length of the straight line between both endpoints.
    pub fn chord(&self) -> T {
        self.start.distance(&self.end)
    }

    /// Returns the center of the circle this arc belongs to.
    pub fn center(&self) -> Result<Point<T>> {
        let two = T::one() + T::one();
        let chord = self.chord();

        if chord.is_zero() {
            return Err(MalformedError::DegenerateArc(format!("{self:?}")).into());
        }

        if chord > two * self.radius {
            return Err(MalformedError::ImpossibleArc {
                chord: format!("{chord:?}"),
                radius: format!("{:?}", self.radius),
            }
            .into());
        }

        let apothem = (self.radius * self.radius - chord * chord / (two * two))
            .max(T::zero())
            .sqrt();

        // The center is on the left of the chord when a sweeping arc is small, or when a
        // non-sweeping one is large.
        let sign = if self.sweep != self.large_arc {
            T::one()
        } else {
            -T::one()
        };

        let [nx, ny] = self.left_normal();
        Ok(Point {
            x: (self.start.x + self.end.x) / two + sign * apothem * nx,
            y: (self.start.y + self.end.y) / two + sign * apothem * ny,
        })
    }

    /// Returns the signed side of the chord the given point lies on: negative for the right,
    /// positive for the left, zero on the line.
    pub fn chord_side(&self, point: &Point<T>) -> T {
        Determinant::from([&self.start, &self.end, point]).into_inner()
    }

    /// Being point a location on the circle of this arc, returns true if, and only if, it lies
    /// strictly inside the swept part of the circle.
    pub fn sweeps_over(&self, point: &Point<T>) -> bool {
        let side = self.chord_side(point);
        if self.sweep {
            side < T::zero()
        } else {
            side > T::zero()
        }
    }

    /// Being point a location on the circle of this arc, returns true if, and only if, it lies
    /// on the arc, endpoints included.
    pub fn covers(&self, point: &Point<T>) -> bool {
        self.chord_side(point).is_zero() || self.sweeps_over(point)
    }

    /// Returns the point of the arc bisecting its sweep.
    pub fn midpoint(&self) -> Result<Point<T>> {
        let center = self.center()?;
        let [nx, ny] = self.left_normal();
        let sign = if self.sweep { -T::one() } else { T::one() };

        Ok(Point {
            x: center.x + sign * self.radius * nx,
            y: center.y + sign * self.radius * ny,
        })
    }

    /// Returns the unit vector perpendicular to the chord, pointing to its left.
    fn left_normal(&self) -> [T; 2] {
        let chord = self.chord();
        [
            (self.start.y - self.end.y) / chord,
            (self.end.x - self.start.x) / chord,
        ]
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub s_min: T,
    pub s_max: T,
    pub t_min: T,
    pub t_max: T,
}

impl<T> Bounds<T>
where
    T: Float,
{
    fn empty() -> Self {
        Self {
            s_min: T::infinity(),
            s_max: T::neg_infinity(),
            t_min: T::infinity(),
            t_max: T::neg_infinity(),
        }
    }

    /// Returns the smallest bounds including both locations.
    pub fn spanning(from: Location<T>, to: Location<T>) -> Self {
        Self::empty().with(from).with(to)
    }

    fn with(self, location: Location<T>) -> Self {
        Self {
            s_min: self.s_min.min(location.s),
            s_max: self.s_max.max(location.s),
            t_min: self.t_min.min(location.t),
            t_max: self.t_max.max(location.t),
        }
    }

    /// Returns true if, and only if, the given location is inside or on these bounds.
    pub fn contains(&self, location: &Location<T>) -> bool {
        is_between(location.s, self.s_min, self.s_max)
            && is_between(location.t, self.t_min, self.t_max)
    }
}

/// Returns the axis-aligned box enclosing every segment of the path.
///
/// Lines contribute their endpoints, Bezier curves their control points, and arcs whichever
/// of the four axis extrema of their circle they actually sweep over.
pub fn bounds<T>(segments: &[Segment<T>]) -> Result<Bounds<T>>
where
    T: Scalar,
{
    if segments.is_empty() {
        return Err(MalformedError::EmptyPath.into());
    }

    segments
        .iter()
        .enumerate()
        .try_fold(Bounds::empty(), |bounds, (index, segment)| {
            let extrema = match segment {
                Segment::MoveTo(end)
                | Segment::LineTo(end)
                | Segment::MeridianArc(end)
                | Segment::ParallelArc(end) => vec![*end],
                Segment::QuadraticTo { control, end } => vec![*control, *end],
                Segment::CubicTo { controls, end } => vec![controls[0], controls[1], *end],
                Segment::ArcTo { end, .. } => {
                    let Some(previous) = index.checked_sub(1).map(|index| &segments[index]) else {
                        return Err(MalformedError::MissingMoveTo(SegmentKind::ArcTo).into());
                    };

                    let arc = Arc::new(previous.end()?, segment)?;
                    let center = arc.center()?;
                    let radius = arc.radius;

                    let mut extrema = vec![*end];
                    extrema.extend(
                        [
                            Point { x: center.x + radius, y: center.y },
                            Point { x: center.x, y: center.y + radius },
                            Point { x: center.x - radius, y: center.y },
                            Point { x: center.x, y: center.y - radius },
                        ]
                        .into_iter()
                        .filter(|node| arc.sweeps_over(node))
                        .map(Location::from),
                    );

                    extrema
                }
                Segment::ClosePath => Vec::new(),
            };

            Ok(extrema.into_iter().fold(bounds, Bounds::with))
        })
}

/// Returns a point in the interior of the given segment, being previous the segment before it.
///
/// When periodic, lines crossing the boundary of the `[-π, π)` domain are taken the short way
/// around.
pub fn midpoint<T>(previous: &Segment<T>, segment: &Segment<T>, periodic: bool) -> Result<Location<T>>
where
    T: Scalar,
{
    let two = T::one() + T::one();
    let start = previous.end()?;

    match segment {
        Segment::LineTo(end) => {
            let mut midpoint = Location {
                s: (start.s + end.s) / two,
                t: (start.t + end.t) / two,
            };

            if periodic {
                if (end.s - start.s).abs() > T::PI() {
                    midpoint.s = localize_in_range(midpoint.s + T::PI(), -T::PI(), T::PI());
                }

                if (end.t - start.t).abs() > T::PI() {
                    midpoint.t = localize_in_range(midpoint.t + T::PI(), -T::PI(), T::PI());
                }
            }

            Ok(midpoint)
        }
        Segment::MeridianArc(end) | Segment::ParallelArc(end) => Ok(Location {
            s: (start.s + end.s) / two,
            t: (start.t + end.t) / two,
        }),
        Segment::ArcTo { .. } => Arc::new(start, segment)?.midpoint().map(Location::from),
        other => Err(MalformedError::Unsupported {
            kind: other.kind(),
            operation: "midpoints",
        }
        .into()),
    }
}
