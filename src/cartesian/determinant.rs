use std::ops::{Mul, Sub};

use super::Point;

/// The scalar value representing the determinant of a matrix.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Determinant<T>(T);

impl<T> From<[&Point<T>; 3]> for Determinant<T>
where
    T: Copy + Sub<Output = T> + Mul<Output = T>,
{
    /// Being `A`, `B` and `C` the given [`Point`]s, returns the determinant of the matrix
    /// representing the direction vectors `AB` and `AC`.
    ///
    /// It is negative when `C` lies to the right of the directed line `AB`, in a right-handed
    /// sense.
    fn from([a, b, c]: [&Point<T>; 3]) -> Self {
        Self((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y))
    }
}

impl<T> Determinant<T>
where
    T: Copy + Sub<Output = T> + Mul<Output = T>,
{
    /// Returns the determinant of the direction vectors `AB` and `CD`.
    pub(crate) fn of_directions([a, b]: [&Point<T>; 2], [c, d]: [&Point<T>; 2]) -> Self {
        Self((b.x - a.x) * (d.y - c.y) - (d.x - c.x) * (b.y - a.y))
    }
}

impl<T> Determinant<T> {
    /// Returns the inner value of self.
    pub(crate) fn into_inner(self) -> T {
        self.0
    }
}
