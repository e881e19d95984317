mod section;
mod stitch;

use tracing::debug;

use self::section::split_sections;
use self::stitch::{cleanup, complete_outline, stitch};

use crate::{
    Budget, Domain, MalformedError, Path, Result, Scalar, Segment, cartesian::Planar, is_closed,
    path::check_finite, spherical::Periodic,
};

/// Marker for yet undefined generic parameters.
pub struct Unknown;

/// Crops a path to a boundary.
///
/// ## Example
/// ```
/// use pathcrop::{Budget, Clipper, Path, Plane, rectangle};
///
/// let boundary = rectangle(0., 0., 1., 1., false);
/// let path: Path = "M-1,0.5 L2,0.5".parse().unwrap();
///
/// let cropped = Clipper::new(Budget::default())
///     .with_domain(&Plane)
///     .with_subject(&path)
///     .with_boundary(&boundary)
///     .execute(false)
///     .unwrap();
///
/// assert_eq!(cropped.to_string(), "M0,0.5 L1,0.5");
/// ```
pub struct Clipper<Dom, Sub, Bound> {
    budget: Budget,
    domain: Dom,
    subject: Sub,
    boundary: Bound,
}

impl Clipper<Unknown, Unknown, Unknown> {
    pub fn new(budget: impl Into<Budget>) -> Self {
        Self {
            budget: budget.into(),
            domain: Unknown,
            subject: Unknown,
            boundary: Unknown,
        }
    }
}

impl<Sub, Bound> Clipper<Unknown, Sub, Bound> {
    pub fn with_domain<D>(self, domain: &D) -> Clipper<&D, Sub, Bound> {
        Clipper {
            budget: self.budget,
            domain,
            subject: self.subject,
            boundary: self.boundary,
        }
    }
}

impl<Dom, Bound> Clipper<Dom, Unknown, Bound> {
    pub fn with_subject<T>(self, subject: &[Segment<T>]) -> Clipper<Dom, &[Segment<T>], Bound> {
        Clipper {
            budget: self.budget,
            domain: self.domain,
            subject,
            boundary: self.boundary,
        }
    }
}

impl<Dom, Sub> Clipper<Dom, Sub, Unknown> {
    pub fn with_boundary<T>(self, boundary: &[Segment<T>]) -> Clipper<Dom, Sub, &[Segment<T>]> {
        Clipper {
            budget: self.budget,
            domain: self.domain,
            subject: self.subject,
            boundary,
        }
    }
}

impl<T, D> Clipper<&D, &[Segment<T>], &[Segment<T>]>
where
    T: Scalar,
    D: Domain<T>,
{
    /// Performs the cropping and returns the resulting [`Path`].
    ///
    /// When close_path is true the subject must be closed, and the output is completed with as
    /// much of the boundary as it takes to enclose the same region.
    pub fn execute(self, close_path: bool) -> Result<Path<T>> {
        check_finite(self.subject)?;
        check_finite(self.boundary)?;

        if close_path && !is_closed(self.subject, self.domain)? {
            return Err(MalformedError::OpenPath(format!("{:?}", self.subject)).into());
        }

        if !is_closed(self.boundary, self.domain)? {
            return Err(MalformedError::OpenBoundary(format!("{:?}", self.boundary)).into());
        }

        let periodic = self.domain.is_periodic();
        debug!(
            segments = self.subject.len(),
            edges = self.boundary.len(),
            periodic,
            close_path,
            "cropping path"
        );

        let sections = if periodic {
            split_sections(&Periodic, self.subject, self.boundary, periodic, &self.budget)?
        } else {
            split_sections(&Planar, self.subject, self.boundary, periodic, &self.budget)?
        };

        let mut output = stitch(&sections, self.boundary, close_path, &self.budget)?;
        if close_path {
            complete_outline(&mut output, self.subject, self.boundary, periodic)?;
        }

        cleanup(&mut output)?;
        check_finite(&output)?;

        debug!(
            sections = sections.len(),
            segments = output.len(),
            "path cropped"
        );

        Ok(output.into())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use crate::{
        Budget, Clipper, ConvergenceError, Error, Globe, MalformedError, Plane, Segment, rectangle,
    };

    #[test]
    fn crop_on_the_plane() {
        struct Test {
            name: &'static str,
            subject: Vec<Segment<f64>>,
            close_path: bool,
            want: Vec<Segment<f64>>,
        }

        vec![
            Test {
                name: "line across the boundary",
                subject: vec![Segment::move_to(-1., 0.5), Segment::line_to(2., 0.5)],
                close_path: false,
                want: vec![Segment::move_to(0., 0.5), Segment::line_to(1., 0.5)],
            },
            Test {
                name: "path already inside",
                subject: vec![
                    Segment::move_to(0.25, 0.25),
                    Segment::line_to(0.5, 0.75),
                    Segment::line_to(0.75, 0.25),
                ],
                close_path: false,
                want: vec![
                    Segment::move_to(0.25, 0.25),
                    Segment::line_to(0.5, 0.75),
                    Segment::line_to(0.75, 0.25),
                ],
            },
            Test {
                name: "path outside",
                subject: vec![Segment::move_to(2., 2.), Segment::line_to(3., 3.)],
                close_path: false,
                want: vec![],
            },
            Test {
                name: "closed path sticking out",
                subject: vec![
                    Segment::move_to(0.5, 0.25),
                    Segment::line_to(0.5, 0.75),
                    Segment::line_to(1.5, 0.75),
                    Segment::line_to(1.5, 0.25),
                    Segment::line_to(0.5, 0.25),
                ],
                close_path: true,
                want: vec![
                    Segment::move_to(0.5, 0.25),
                    Segment::line_to(0.5, 0.75),
                    Segment::line_to(1., 0.75),
                    Segment::line_to(1., 0.25),
                    Segment::line_to(0.5, 0.25),
                ],
            },
            Test {
                name: "closed path enclosing the boundary",
                subject: rectangle(-1., -1., 2., 2., false).into_inner(),
                close_path: true,
                want: rectangle(0., 0., 1., 1., false).into_inner(),
            },
        ]
        .into_iter()
        .for_each(|test| {
            let boundary = rectangle(0., 0., 1., 1., false);
            let got = Clipper::new(Budget::default())
                .with_domain(&Plane)
                .with_subject(&test.subject)
                .with_boundary(&boundary)
                .execute(test.close_path)
                .unwrap_or_else(|error| panic!("{}: {error}", test.name));

            assert_eq!(got.into_inner(), test.want, "{}", test.name);
        });
    }

    #[test]
    fn crop_over_the_antimeridian() {
        let boundary = rectangle(-PI / 2., -PI, PI / 2., PI, true);
        let subject = vec![Segment::move_to(0., -PI + 0.25), Segment::line_to(0., PI - 0.25)];

        let got = Clipper::new(Budget::default())
            .with_domain(&Globe)
            .with_subject(&subject)
            .with_boundary(&boundary)
            .execute(false)
            .unwrap();

        assert_eq!(
            got.into_inner(),
            vec![
                Segment::move_to(0., -PI + 0.25),
                Segment::line_to(0., -PI),
                Segment::move_to(0., PI),
                Segment::line_to(0., PI - 0.25),
            ]
        );
    }

    #[test]
    fn preconditions() {
        let boundary = rectangle(0., 0., 1., 1., false);
        let open = vec![Segment::move_to(0., 0.), Segment::line_to(1., 1.)];

        let got = Clipper::new(Budget::default())
            .with_domain(&Plane)
            .with_subject(&open)
            .with_boundary(&boundary)
            .execute(true);

        assert!(matches!(
            got,
            Err(Error::Malformed(MalformedError::OpenPath(_)))
        ));

        let got = Clipper::new(Budget::default())
            .with_domain(&Plane)
            .with_subject(&boundary)
            .with_boundary(&open)
            .execute(false);

        assert!(matches!(
            got,
            Err(Error::Malformed(MalformedError::OpenBoundary(_)))
        ));

        let non_finite = vec![Segment::move_to(0., 0.), Segment::line_to(f64::NAN, 1.)];
        let got = Clipper::new(Budget::default())
            .with_domain(&Plane)
            .with_subject(&non_finite)
            .with_boundary(&boundary)
            .execute(false);

        assert!(matches!(
            got,
            Err(Error::Malformed(MalformedError::NonFinite(_)))
        ));
    }

    #[test]
    fn exhausted_budget() {
        let boundary = rectangle(0., 0., 1., 1., false);
        let subject = vec![Segment::move_to(-1., 0.5), Segment::line_to(2., 0.5)];

        let got = Clipper::new(2_usize)
            .with_domain(&Plane)
            .with_subject(&subject)
            .with_boundary(&boundary)
            .execute(false);

        assert!(matches!(
            got,
            Err(Error::Convergence(ConvergenceError::Exhausted { budget: 2, .. }))
        ));
    }
}
