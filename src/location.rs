use std::fmt;

use num_traits::Float;

/// A coordinate pair in an abstract two-axis system.
///
/// The clipping and containment code never cares whether the axes stand for `(x, y)` or for
/// `(latitude, longitude)`; it only ever deals with `(s, t)`. Use [`Point`](crate::cartesian::Point)
/// or [`Place`](crate::spherical::Place) to reinterpret a location in a concrete system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location<T = f64> {
    /// The first coordinate.
    pub s: T,
    /// The second coordinate.
    pub t: T,
}

impl<T> From<[T; 2]> for Location<T> {
    fn from([s, t]: [T; 2]) -> Self {
        Self { s, t }
    }
}

impl<T> Location<T>
where
    T: Float,
{
    /// Returns true if, and only if, both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.s.is_finite() && self.t.is_finite()
    }
}

impl<T> fmt::Display for Location<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", self.s, self.t)
    }
}

/// A constructor macro for [`Location`].
#[macro_export]
macro_rules! location {
    ($s:expr, $t:expr) => {
        $crate::Location { s: $s, t: $t }
    };
}
