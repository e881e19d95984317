use crate::{
    Location, Result, Scalar, Segment,
    geometry::Bounds,
};

/// A single closed loop of a boundary: a [`Segment::MoveTo`] followed by the edges it is made of.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLoop<T> {
    segments: Vec<Segment<T>>,
}

impl<T> EdgeLoop<T>
where
    T: Copy,
{
    /// Breaks the given boundary into its loops, one per [`Segment::MoveTo`].
    ///
    /// Anything before the first move is not part of any loop.
    pub fn split(boundary: &[Segment<T>]) -> Vec<Self> {
        let mut loops: Vec<Self> = Vec::new();
        for segment in boundary {
            if segment.is_move() {
                loops.push(Self {
                    segments: vec![*segment],
                });
            } else if let Some(current) = loops.last_mut() {
                current.segments.push(*segment);
            }
        }

        loops
    }

    /// Returns the move and edges of this loop, in order.
    pub fn segments(&self) -> &[Segment<T>] {
        &self.segments
    }

    /// Returns the amount of edges in this loop.
    pub fn edge_count(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    /// Returns the edge at the given index, wrapping around the loop as many times as needed.
    ///
    /// Edge indices start at one, since the move that opens the loop is not an edge.
    pub(crate) fn edge(&self, index: usize) -> Option<&Segment<T>> {
        let count = self.edge_count();
        if count == 0 || index == 0 {
            return None;
        }

        self.segments.get((index - 1) % count + 1)
    }
}

/// A location on a boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position<T> {
    /// The index of the [`EdgeLoop`] the location is on.
    pub loop_index: usize,
    /// The index of the edge the location is on, within its loop, plus the fraction of that edge
    /// it is away from the edge start.
    pub index: T,
}

/// Returns where on the boundary the given location lies, if it does.
///
/// The first edge whose bounding box includes the location is taken, so the location is assumed
/// to be exactly on that edge.
pub fn position_on_boundary<T>(location: &Location<T>, boundary: &[Segment<T>]) -> Result<Option<Position<T>>>
where
    T: Scalar,
{
    let mut loop_index = 0;
    let mut edge_index = 0;

    for (previous, edge) in boundary.iter().zip(boundary.iter().skip(1)) {
        if edge.is_move() {
            loop_index += 1;
            edge_index = 0;
            continue;
        }

        let start = previous.end()?;
        let end = edge.end()?;

        if Bounds::spanning(start, end).contains(location) {
            let ds = end.s - start.s;
            let dt = end.t - start.t;
            let fraction =
                ((location.s - start.s) * ds + (location.t - start.t) * dt) / (ds * ds + dt * dt);

            return Ok(Some(Position {
                loop_index,
                index: T::from(edge_index).unwrap_or_else(T::zero) + fraction,
            }));
        }

        edge_index += 1;
    }

    Ok(None)
}
