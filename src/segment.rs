use std::fmt;

use num_traits::Float;

use crate::{Location, MalformedError, Result};

/// The kind of a [`Segment`], as written in the textual form of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    MoveTo,
    LineTo,
    ArcTo,
    QuadraticTo,
    CubicTo,
    ClosePath,
    MeridianArc,
    ParallelArc,
}

impl SegmentKind {
    /// Returns the letter naming this kind in the textual form of a path.
    pub fn letter(&self) -> char {
        match self {
            SegmentKind::MoveTo => 'M',
            SegmentKind::LineTo => 'L',
            SegmentKind::ArcTo => 'A',
            SegmentKind::QuadraticTo => 'Q',
            SegmentKind::CubicTo => 'C',
            SegmentKind::ClosePath => 'Z',
            SegmentKind::MeridianArc => 'Λ',
            SegmentKind::ParallelArc => 'Φ',
        }
    }

    /// Returns the kind named by the given letter, if any.
    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'M' => SegmentKind::MoveTo,
            'L' => SegmentKind::LineTo,
            'A' => SegmentKind::ArcTo,
            'Q' => SegmentKind::QuadraticTo,
            'C' => SegmentKind::CubicTo,
            'Z' => SegmentKind::ClosePath,
            'Λ' => SegmentKind::MeridianArc,
            'Φ' => SegmentKind::ParallelArc,
            _ => return None,
        })
    }

    /// Returns the amount of numbers describing a segment of this kind.
    pub fn arity(&self) -> usize {
        match self {
            SegmentKind::ClosePath => 0,
            SegmentKind::MoveTo
            | SegmentKind::LineTo
            | SegmentKind::MeridianArc
            | SegmentKind::ParallelArc => 2,
            SegmentKind::QuadraticTo => 4,
            SegmentKind::CubicTo => 6,
            SegmentKind::ArcTo => 7,
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single step of a path, starting wherever the previous one ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment<T = f64> {
    /// Lifts the pen and puts it down at the given location.
    MoveTo(Location<T>),
    /// A straight line.
    LineTo(Location<T>),
    /// A circular (or elliptical) arc, as defined by SVG.
    ArcTo {
        rx: T,
        ry: T,
        rotation: T,
        large_arc: bool,
        sweep: bool,
        end: Location<T>,
    },
    /// A quadratic Bezier curve.
    QuadraticTo {
        control: Location<T>,
        end: Location<T>,
    },
    /// A cubic Bezier curve.
    CubicTo {
        controls: [Location<T>; 2],
        end: Location<T>,
    },
    /// Closes the current subpath.
    ClosePath,
    /// A path of constant longitude, monotonic in latitude.
    MeridianArc(Location<T>),
    /// A path of constant latitude, monotonic in longitude.
    ParallelArc(Location<T>),
}

impl<T> Segment<T> {
    pub fn move_to(s: T, t: T) -> Self {
        Segment::MoveTo(Location { s, t })
    }

    pub fn line_to(s: T, t: T) -> Self {
        Segment::LineTo(Location { s, t })
    }

    pub fn meridian_to(s: T, t: T) -> Self {
        Segment::MeridianArc(Location { s, t })
    }

    pub fn parallel_to(s: T, t: T) -> Self {
        Segment::ParallelArc(Location { s, t })
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::MoveTo(_) => SegmentKind::MoveTo,
            Segment::LineTo(_) => SegmentKind::LineTo,
            Segment::ArcTo { .. } => SegmentKind::ArcTo,
            Segment::QuadraticTo { .. } => SegmentKind::QuadraticTo,
            Segment::CubicTo { .. } => SegmentKind::CubicTo,
            Segment::ClosePath => SegmentKind::ClosePath,
            Segment::MeridianArc(_) => SegmentKind::MeridianArc,
            Segment::ParallelArc(_) => SegmentKind::ParallelArc,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Segment::MoveTo(_))
    }
}

impl<T> Segment<T>
where
    T: Copy,
{
    /// Returns the location where this segment ends.
    ///
    /// A [`Segment::ClosePath`] carries no coordinates of its own, so it has no endpoint.
    pub fn end(&self) -> Result<Location<T>> {
        match self {
            Segment::MoveTo(end)
            | Segment::LineTo(end)
            | Segment::MeridianArc(end)
            | Segment::ParallelArc(end)
            | Segment::ArcTo { end, .. }
            | Segment::QuadraticTo { end, .. }
            | Segment::CubicTo { end, .. } => Ok(*end),
            Segment::ClosePath => Err(MalformedError::Unsupported {
                kind: SegmentKind::ClosePath,
                operation: "endpoint lookups",
            }
            .into()),
        }
    }

    /// Returns a copy of this segment ending at the given location instead.
    ///
    /// Arcs keep their radii and flags; Bezier curves keep their control points.
    pub fn with_end(&self, location: Location<T>) -> Self {
        match *self {
            Segment::MoveTo(_) => Segment::MoveTo(location),
            Segment::LineTo(_) => Segment::LineTo(location),
            Segment::MeridianArc(_) => Segment::MeridianArc(location),
            Segment::ParallelArc(_) => Segment::ParallelArc(location),
            Segment::ArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                ..
            } => Segment::ArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                end: location,
            },
            Segment::QuadraticTo { control, .. } => Segment::QuadraticTo {
                control,
                end: location,
            },
            Segment::CubicTo { controls, .. } => Segment::CubicTo {
                controls,
                end: location,
            },
            Segment::ClosePath => Segment::ClosePath,
        }
    }

    /// Returns the numbers describing this segment, in textual order.
    pub fn args(&self) -> Vec<T>
    where
        T: Float,
    {
        let flag = |value: bool| if value { T::one() } else { T::zero() };
        match *self {
            Segment::MoveTo(end)
            | Segment::LineTo(end)
            | Segment::MeridianArc(end)
            | Segment::ParallelArc(end) => vec![end.s, end.t],
            Segment::ArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                end,
            } => vec![rx, ry, rotation, flag(large_arc), flag(sweep), end.s, end.t],
            Segment::QuadraticTo { control, end } => vec![control.s, control.t, end.s, end.t],
            Segment::CubicTo { controls, end } => vec![
                controls[0].s,
                controls[0].t,
                controls[1].s,
                controls[1].t,
                end.s,
                end.t,
            ],
            Segment::ClosePath => Vec::new(),
        }
    }

    /// Builds a segment of the given kind out of its textual numbers.
    pub fn from_args(kind: SegmentKind, args: &[T]) -> Result<Self>
    where
        T: Float + fmt::Debug,
    {
        if args.len() != kind.arity() {
            return Err(MalformedError::Syntax(format!(
                "{kind} takes {} numbers, got {args:?}",
                kind.arity()
            ))
            .into());
        }

        let at = |index: usize| Location {
            s: args[index],
            t: args[index + 1],
        };

        Ok(match kind {
            SegmentKind::MoveTo => Segment::MoveTo(at(0)),
            SegmentKind::LineTo => Segment::LineTo(at(0)),
            SegmentKind::MeridianArc => Segment::MeridianArc(at(0)),
            SegmentKind::ParallelArc => Segment::ParallelArc(at(0)),
            SegmentKind::ArcTo => Segment::ArcTo {
                rx: args[0],
                ry: args[1],
                rotation: args[2],
                large_arc: !args[3].is_zero(),
                sweep: !args[4].is_zero(),
                end: at(5),
            },
            SegmentKind::QuadraticTo => Segment::QuadraticTo {
                control: at(0),
                end: at(2),
            },
            SegmentKind::CubicTo => Segment::CubicTo {
                controls: [at(0), at(2)],
                end: at(4),
            },
            SegmentKind::ClosePath => Segment::ClosePath,
        })
    }

    /// Returns true if, and only if, every number describing this segment is finite.
    pub fn is_finite(&self) -> bool
    where
        T: Float,
    {
        self.args().iter().all(|arg| arg.is_finite())
    }
}

impl<T> fmt::Display for Segment<T>
where
    T: Float + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        for (index, arg) in self.args().iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, "{arg}")?;
        }

        Ok(())
    }
}
