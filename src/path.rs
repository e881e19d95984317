use std::{fmt, ops::Deref, str::FromStr};

use crate::{
    Domain, Error, Location, MalformedError, Result, Scalar, Segment, SegmentKind,
    geometry::localize_in_range,
};

/// An ordered sequence of segments, each starting wherever the previous one ended.
///
/// ## Example
/// ```
/// use pathcrop::{Path, Segment};
///
/// let path: Path = "M0,0 L0,1 Φ1,4".parse().unwrap();
///
/// assert_eq!(path[1], Segment::line_to(0., 1.));
/// assert_eq!(path.to_string(), "M0,0 L0,1 Φ1,4");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path<T = f64>(Vec<Segment<T>>);

impl<T> From<Vec<Segment<T>>> for Path<T> {
    fn from(segments: Vec<Segment<T>>) -> Self {
        Self(segments)
    }
}

impl<T> FromIterator<Segment<T>> for Path<T> {
    fn from_iter<I: IntoIterator<Item = Segment<T>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> Extend<Segment<T>> for Path<T> {
    fn extend<I: IntoIterator<Item = Segment<T>>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<T> IntoIterator for Path<T> {
    type Item = Segment<T>;
    type IntoIter = std::vec::IntoIter<Segment<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T> Deref for Path<T> {
    type Target = [Segment<T>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> AsRef<[Segment<T>]> for Path<T> {
    fn as_ref(&self) -> &[Segment<T>] {
        &self.0
    }
}

impl<T> Path<T> {
    /// Returns the inner vector of segments.
    pub fn into_inner(self) -> Vec<Segment<T>> {
        self.0
    }
}

impl<T> fmt::Display for Path<T>
where
    T: Scalar + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{segment}")?;
        }

        Ok(())
    }
}

impl<T> FromStr for Path<T>
where
    T: Scalar + FromStr,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut pending: Vec<(SegmentKind, String)> = Vec::new();

        for character in s.chars() {
            if let Some(kind) = SegmentKind::from_letter(character) {
                pending.push((kind, String::new()));
            } else if let Some((_, args)) = pending.last_mut() {
                args.push(character);
            } else if !character.is_whitespace() {
                return Err(MalformedError::Syntax(format!(
                    "expected a segment letter, got {character:?}"
                ))
                .into());
            }
        }

        pending
            .into_iter()
            .map(|(kind, args)| {
                let args = args
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|arg| !arg.is_empty())
                    .map(|arg| {
                        arg.parse::<T>().map_err(|_| {
                            Error::from(MalformedError::Syntax(format!("{arg:?} is not a number")))
                        })
                    })
                    .collect::<Result<Vec<T>>>()?;

                Segment::from_args(kind, &args)
            })
            .collect()
    }
}

/// Fails if any number in the given segments is not finite.
pub(crate) fn check_finite<T>(segments: &[Segment<T>]) -> Result<()>
where
    T: Scalar,
{
    match segments.iter().find(|segment| !segment.is_finite()) {
        Some(segment) => Err(MalformedError::NonFinite(format!("{segment:?}")).into()),
        None => Ok(()),
    }
}

/// Returns true if, and only if, every contiguous run of the path either ends where it started
/// or starts and ends on the edge of the domain.
///
/// On periodic domains both coordinates are compared modulo 2π.
pub fn is_closed<T, D>(segments: &[Segment<T>], domain: &D) -> Result<bool>
where
    T: Scalar,
    D: Domain<T>,
{
    let localize = |location: Location<T>| {
        if !domain.is_periodic() {
            return location;
        }

        Location {
            s: localize_in_range(location.s, -T::PI(), T::PI()),
            t: localize_in_range(location.t, -T::PI(), T::PI()),
        }
    };

    let mut start = None;
    for (index, segment) in segments.iter().enumerate() {
        if let Segment::MoveTo(location) = segment {
            start = Some(*location);
        }

        let ends_run = segments
            .get(index + 1)
            .is_none_or(|next| next.is_move());

        if !ends_run {
            continue;
        }

        let Some(run_start) = start else {
            return Err(MalformedError::MissingMoveTo(segments[0].kind()).into());
        };

        let run_start = localize(run_start);
        let run_end = localize(segment.end()?);

        let ends_on_start = run_start == run_end;
        let ends_on_edge =
            domain.is_on_edge(&run_start.into()) && domain.is_on_edge(&run_end.into());

        if !ends_on_start && !ends_on_edge {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Returns the closed path going around the given rectangle.
///
/// When geographic, its edges are the two parallels at `s0` and `s1` and the two meridians at
/// `t0` and `t1`; otherwise they are straight lines.
pub fn rectangle<T>(s0: T, t0: T, s1: T, t1: T, geographic: bool) -> Path<T>
where
    T: Copy,
{
    let (along_t, along_s): (fn(T, T) -> Segment<T>, fn(T, T) -> Segment<T>) = if geographic {
        (Segment::parallel_to, Segment::meridian_to)
    } else {
        (Segment::line_to, Segment::line_to)
    };

    Path(vec![
        Segment::move_to(s0, t0),
        along_t(s0, t1),
        along_s(s1, t1),
        along_t(s1, t0),
        along_s(s0, t0),
    ])
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use crate::{Globe, Location, Path, Plane, Segment, is_closed, path::check_finite, rectangle};

    #[test]
    fn path_from_str() {
        struct Test {
            name: &'static str,
            input: &'static str,
            want: Option<Vec<Segment<f64>>>,
        }

        vec![
            Test {
                name: "lines and geographic arcs",
                input: "M0,0 L0,1 Φ1,4 Λ3,4",
                want: Some(vec![
                    Segment::move_to(0., 0.),
                    Segment::line_to(0., 1.),
                    Segment::parallel_to(1., 4.),
                    Segment::meridian_to(3., 4.),
                ]),
            },
            Test {
                name: "arc and close path",
                input: "M1,0 A1,1,0,0,1,0,1 Z",
                want: Some(vec![
                    Segment::move_to(1., 0.),
                    Segment::ArcTo {
                        rx: 1.,
                        ry: 1.,
                        rotation: 0.,
                        large_arc: false,
                        sweep: true,
                        end: Location { s: 0., t: 1. },
                    },
                    Segment::ClosePath,
                ]),
            },
            Test {
                name: "whitespace separated numbers",
                input: "  M 0 0 L-1.5 2e3",
                want: Some(vec![Segment::move_to(0., 0.), Segment::line_to(-1.5, 2000.)]),
            },
            Test {
                name: "missing numbers",
                input: "M0,0 L1",
                want: None,
            },
            Test {
                name: "not a number",
                input: "M0,zero",
                want: None,
            },
            Test {
                name: "no leading letter",
                input: "0,0 L1,1",
                want: None,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = test.input.parse::<Path<f64>>().ok().map(Path::into_inner);
            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    #[test]
    fn path_to_string() {
        let path = Path::from(vec![
            Segment::move_to(0., 0.),
            Segment::line_to(0., 1.),
            Segment::ArcTo {
                rx: 1.,
                ry: 1.,
                rotation: 0.,
                large_arc: false,
                sweep: true,
                end: Location { s: 1., t: 0. },
            },
            Segment::parallel_to(1., 4.),
            Segment::meridian_to(3., 4.),
            Segment::ClosePath,
        ]);

        assert_eq!(path.to_string(), "M0,0 L0,1 A1,1,0,0,1,1,0 Φ1,4 Λ3,4 Z");
    }

    #[test]
    fn closed_paths() {
        struct Test {
            name: &'static str,
            path: Vec<Segment<f64>>,
            periodic: bool,
            want: Option<bool>,
        }

        vec![
            Test {
                name: "square",
                path: rectangle(0., 0., 1., 1., false).into_inner(),
                periodic: false,
                want: Some(true),
            },
            Test {
                name: "open polyline",
                path: vec![Segment::move_to(0., 0.), Segment::line_to(1., 1.)],
                periodic: false,
                want: Some(false),
            },
            Test {
                name: "second run left open",
                path: vec![
                    Segment::move_to(0., 0.),
                    Segment::line_to(1., 1.),
                    Segment::line_to(0., 0.),
                    Segment::move_to(5., 5.),
                    Segment::line_to(6., 6.),
                ],
                periodic: false,
                want: Some(false),
            },
            Test {
                name: "closing over the antimeridian",
                path: vec![
                    Segment::move_to(0., -PI),
                    Segment::line_to(1., 0.),
                    Segment::line_to(0., PI),
                ],
                periodic: true,
                want: Some(true),
            },
            Test {
                name: "antimeridian is not special on the plane",
                path: vec![
                    Segment::move_to(0., -PI),
                    Segment::line_to(1., 0.),
                    Segment::line_to(0., PI),
                ],
                periodic: false,
                want: Some(false),
            },
            Test {
                name: "empty path",
                path: vec![],
                periodic: false,
                want: Some(true),
            },
            Test {
                name: "no leading move",
                path: vec![Segment::line_to(0., 0.), Segment::line_to(1., 1.)],
                periodic: false,
                want: None,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = if test.periodic {
                is_closed(&test.path, &Globe)
            } else {
                is_closed(&test.path, &Plane)
            };

            assert_eq!(got.ok(), test.want, "{}", test.name);
        });
    }

    #[test]
    fn geographic_rectangle() {
        assert_eq!(
            rectangle(-1., -2., 1., 2., true).into_inner(),
            vec![
                Segment::move_to(-1., -2.),
                Segment::parallel_to(-1., 2.),
                Segment::meridian_to(1., 2.),
                Segment::parallel_to(1., -2.),
                Segment::meridian_to(-1., -2.),
            ]
        );
    }

    #[test]
    fn non_finite_segments() {
        assert!(check_finite(&[Segment::move_to(0., 0.), Segment::line_to(1., 1.)]).is_ok());
        assert!(check_finite(&[Segment::move_to(0., 0.), Segment::line_to(f64::NAN, 1.)]).is_err());
        assert!(check_finite(&[Segment::move_to(f64::INFINITY, 0.)]).is_err());
    }
}
