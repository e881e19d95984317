//! Clipping of vector paths against closed boundaries.
//!
//! A path (lines, circular arcs, meridians and parallels) is cut at every crossing with a
//! boundary, the pieces outside the boundary are dropped, and the surviving pieces are stitched
//! back together along the boundary into valid closed paths. Both the infinite cartesian plane
//! and the periodic geographic domain, where longitude wraps at ±π, are supported.

mod boundary;
mod budget;
mod clipper;
mod containment;
mod crossing;
mod domain;
mod error;
mod location;
mod path;
mod segment;

pub mod cartesian;
pub mod geometry;
pub mod projector;
pub mod spherical;

use std::fmt::Debug;

use num_traits::{Float, FloatConst};

pub use self::boundary::{EdgeLoop, Position, position_on_boundary};
pub use self::budget::Budget;
pub use self::clipper::Clipper;
pub use self::containment::{Side, contains, encompasses};
pub use self::crossing::{BoundaryCrossing, Crossing, Cut, boundary_crossings};
pub use self::domain::{Domain, Globe, Plane};
pub use self::error::{ConsistencyError, ConvergenceError, Error, MalformedError, Result};
pub use self::location::Location;
pub use self::path::{Path, is_closed, rectangle};
pub use self::segment::{Segment, SegmentKind};

/// The scalar type every coordinate is made of.
pub trait Scalar: Float + FloatConst + Debug {}

impl<T> Scalar for T where T: Float + FloatConst + Debug {}

/// Crops the given path to the given boundary, using the default [`Budget`].
///
/// When close_path is true the input must be closed, and the output is completed with as much
/// of the boundary as required for it to enclose the same region.
pub fn clip<T, D>(
    segments: &[Segment<T>],
    boundary: &[Segment<T>],
    domain: &D,
    close_path: bool,
) -> Result<Path<T>>
where
    T: Scalar,
    D: Domain<T>,
{
    Clipper::new(Budget::default())
        .with_domain(domain)
        .with_subject(segments)
        .with_boundary(boundary)
        .execute(close_path)
}
