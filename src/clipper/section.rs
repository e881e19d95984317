use tracing::trace;

use crate::{
    Budget, Crossing, Location, MalformedError, Result, Scalar, Segment, Side,
    cartesian::Point,
    crossing::BoundaryCrossing,
    encompasses,
    geometry::is_acute,
};

/// A segment waiting to be sectioned.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Pending<T> {
    segment: Segment<T>,
    /// The crossings of the segment, if they are already known.
    crossings: Option<Vec<Crossing<T>>>,
}

impl<T> Pending<T> {
    fn new(segment: Segment<T>) -> Self {
        Self {
            segment,
            crossings: None,
        }
    }

    fn known(segment: Segment<T>, crossings: Vec<Crossing<T>>) -> Self {
        Self {
            segment,
            crossings: Some(crossings),
        }
    }
}

/// Breaks the path into sections at every crossing with the boundary, and returns those sections
/// inside the boundary.
///
/// Every section starts with a [`Segment::MoveTo`].
pub(super) fn split_sections<T, C>(
    finder: &C,
    segments: &[Segment<T>],
    boundary: &[Segment<T>],
    periodic: bool,
    budget: &Budget,
) -> Result<Vec<Vec<Segment<T>>>>
where
    T: Scalar,
    C: BoundaryCrossing<T>,
{
    let keep_if_inside = |section: Vec<Segment<T>>, sections: &mut Vec<Vec<Segment<T>>>| {
        if encompasses(boundary, &section, periodic)? == Side::In {
            sections.push(section);
        }

        Result::Ok(())
    };

    let mut queue: Vec<Pending<T>> = segments.iter().rev().copied().map(Pending::new).collect();
    let mut sections = Vec::new();
    let mut current: Option<Vec<Segment<T>>> = None;
    let mut iterations = 0;

    loop {
        let Some(Pending { segment, crossings }) = queue.pop() else {
            if let Some(section) = current.take() {
                keep_if_inside(section, &mut sections)?;
            }

            break;
        };

        if segment.is_move() {
            if let Some(section) = current.replace(vec![segment]) {
                keep_if_inside(section, &mut sections)?;
            }
        } else {
            let Some(last) = current.as_ref().and_then(|section| section.last()).copied() else {
                return Err(MalformedError::MissingMoveTo(segment.kind()).into());
            };

            let start = last.end()?;
            let end = segment.end()?;

            let crossings = match crossings {
                Some(crossings) => crossings,
                None => finder.crossings(start, &segment, boundary)?,
            };

            // Crossings coinciding with a break in the path are no interruption at all.
            let ends_on_break = queue.last().is_none_or(|next| next.segment.is_move());
            let crossings: Vec<_> = crossings
                .into_iter()
                .filter(|crossing| !(last.is_move() && crossing.after == start))
                .filter(|crossing| !(ends_on_break && crossing.before == end))
                .collect();

            let nearest = crossings.iter().copied().reduce(|nearest, crossing| {
                if crossing.progress < nearest.progress {
                    crossing
                } else {
                    nearest
                }
            });

            match nearest {
                None => {
                    if let Some(section) = current.as_mut() {
                        section.push(segment);
                    }
                }
                Some(cut) => {
                    trace!(
                        segment = %segment_label(&segment),
                        before = %cut.before,
                        after = %cut.after,
                        edge_loop = cut.loop_index,
                        "splitting segment at boundary crossing"
                    );

                    let rest = crossings
                        .into_iter()
                        .filter(|crossing| crossing.before != cut.before)
                        .filter(|crossing| crossing.progress >= cut.progress)
                        .collect();

                    queue.extend(splice_segment(start, &segment, &cut, rest)?.into_iter().rev());
                }
            }
        }

        iterations += 1;
        budget.check(iterations, || {
            format!("sectioning the path stalled at {}", segment_label(&segment))
        })?;
    }

    Ok(sections)
}

/// Returns the replacement for the segment starting at start when cut at the given crossing: the
/// part before the cut, a jump to the other side of the cut, and the part after it.
///
/// Cuts at either end of the segment only insert the jump.
pub(super) fn splice_segment<T>(
    start: Location<T>,
    segment: &Segment<T>,
    cut: &Crossing<T>,
    rest: Vec<Crossing<T>>,
) -> Result<Vec<Pending<T>>>
where
    T: Scalar,
{
    let end = segment.end()?;

    if cut.before == start {
        return Ok(vec![
            Pending::new(Segment::MoveTo(cut.after)),
            Pending::known(*segment, rest),
        ]);
    }

    if cut.before == end || cut.after == end {
        return Ok(vec![
            Pending::known(segment.with_end(cut.before), Vec::new()),
            Pending::new(Segment::MoveTo(cut.after)),
        ]);
    }

    let (head, tail) = match *segment {
        Segment::LineTo(_) | Segment::MeridianArc(_) | Segment::ParallelArc(_) => {
            (segment.with_end(cut.before), *segment)
        }
        Segment::ArcTo {
            rx,
            ry,
            rotation,
            sweep,
            ..
        } => {
            let a = Point::from(start);
            let b = Point::from(cut.before);
            let d = Point::from(end);

            // By the inscribed angle theorem, each half is large if, and only if, the angle it
            // subtends from the other half is obtuse.
            let head = Segment::ArcTo {
                rx,
                ry,
                rotation,
                large_arc: !is_acute(&a, &d, &b),
                sweep,
                end: cut.before,
            };

            let tail = Segment::ArcTo {
                rx,
                ry,
                rotation,
                large_arc: !is_acute(&b, &a, &d),
                sweep,
                end,
            };

            (head, tail)
        }
        other => {
            return Err(MalformedError::Unsupported {
                kind: other.kind(),
                operation: "splicing",
            }
            .into());
        }
    };

    Ok(vec![
        Pending::known(head, Vec::new()),
        Pending::new(Segment::MoveTo(cut.after)),
        Pending::known(tail, rest),
    ])
}

fn segment_label<T>(segment: &Segment<T>) -> String
where
    T: Scalar,
{
    format!("{}{:?}", segment.kind(), segment.args())
}
