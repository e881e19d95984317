use num_traits::Float;

use crate::Location;

/// A point in the plane.
///
/// This is a [`Location`] whose `s` and `t` coordinates are interpreted as `x` and `y`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<T = f64> {
    /// The horizontal coordinate of the point.
    pub x: T,
    /// The vertical coordinate of the point.
    pub y: T,
}

impl<T> From<[T; 2]> for Point<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self { x, y }
    }
}

impl<T> From<Location<T>> for Point<T> {
    fn from(location: Location<T>) -> Self {
        Self {
            x: location.s,
            y: location.t,
        }
    }
}

impl<T> From<Point<T>> for Location<T> {
    fn from(point: Point<T>) -> Self {
        Self {
            s: point.x,
            t: point.y,
        }
    }
}

impl<T> Point<T>
where
    T: Float,
{
    /// Returns the euclidean distance between self and rhs.
    pub fn distance(&self, rhs: &Self) -> T {
        (self.x - rhs.x).hypot(self.y - rhs.y)
    }
}

/// A constructor macro for the cartesian [`Point`].
#[macro_export]
macro_rules! cartesian_point {
    ($x:expr, $y:expr) => {
        $crate::cartesian::Point { x: $x, y: $y }
    };
}

pub use cartesian_point;
