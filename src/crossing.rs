use crate::{
    Location, Result, Scalar, Segment, cartesian::Planar, geometry::localize_in_range,
    spherical::Periodic,
};

/// A single place where a segment crosses a boundary edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cut<T> {
    /// The crossing as seen from the side the segment starts on.
    pub before: Location<T>,
    /// The crossing as seen from the side the segment ends on.
    ///
    /// On the plane both sides are the same location; on a periodic domain they are the two
    /// sides of the cut.
    pub after: Location<T>,
    /// How far along the segment the crossing happens. Only meaningful to order the crossings of
    /// the same segment.
    pub progress: T,
}

/// A [`Cut`] on a specific loop of the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing<T> {
    pub before: Location<T>,
    pub after: Location<T>,
    pub progress: T,
    /// The index of the edge loop the crossing lies on.
    pub loop_index: usize,
}

impl<T> Crossing<T> {
    fn new(cut: Cut<T>, loop_index: usize) -> Self {
        Self {
            before: cut.before,
            after: cut.after,
            progress: cut.progress,
            loop_index,
        }
    }
}

/// A strategy to find where a path segment crosses a boundary.
pub trait BoundaryCrossing<T>
where
    T: Scalar,
{
    /// Returns every place where the segment starting at start crosses the boundary edge
    /// starting at edge_start.
    ///
    /// Points on the edge generally count as crossings, so a segment going through the vertex
    /// between two edges may yield the same crossing twice.
    fn edge_crossings(
        &self,
        start: Location<T>,
        segment: &Segment<T>,
        edge_start: Location<T>,
        edge: &Segment<T>,
    ) -> Result<Vec<Cut<T>>>;

    /// Returns every place where the segment starting at start crosses any edge of the given
    /// boundary.
    fn crossings(
        &self,
        start: Location<T>,
        segment: &Segment<T>,
        boundary: &[Segment<T>],
    ) -> Result<Vec<Crossing<T>>> {
        let mut loop_index = 0;
        let mut crossings = Vec::new();

        for (previous, edge) in boundary.iter().zip(boundary.iter().skip(1)) {
            if edge.is_move() {
                loop_index += 1;
                continue;
            }

            crossings.extend(
                self.edge_crossings(start, segment, previous.end()?, edge)?
                    .into_iter()
                    .map(|cut| Crossing::new(cut, loop_index)),
            );
        }

        Ok(crossings)
    }
}

/// Returns every place where the segment starting at start crosses the given boundary, using
/// the periodic engine if the domain is periodic or the planar one otherwise.
pub fn boundary_crossings<T>(
    start: Location<T>,
    segment: &Segment<T>,
    boundary: &[Segment<T>],
    periodic: bool,
) -> Result<Vec<Crossing<T>>>
where
    T: Scalar,
{
    if periodic {
        Periodic.crossings(start, segment, boundary)
    } else {
        Planar.crossings(start, segment, boundary)
    }
}

/// Returns the squared distance between both locations, taking each coordinate the short way
/// around a `[-π, π)` periodic domain.
pub(crate) fn periodic_distance<T>(from: &Location<T>, to: &Location<T>) -> T
where
    T: Scalar,
{
    let ds = localize_in_range(to.s - from.s, -T::PI(), T::PI());
    let dt = localize_in_range(to.t - from.t, -T::PI(), T::PI());
    ds * ds + dt * dt
}
