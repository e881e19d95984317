use crate::spherical::Place;

/// The space paths live in.
pub trait Domain<T> {
    /// Returns true if, and only if, the coordinates of this domain wrap around modulo 2π.
    fn is_periodic(&self) -> bool;

    /// Returns true if, and only if, the given place lies on the edge of this domain.
    fn is_on_edge(&self, place: &Place<T>) -> bool;
}

/// The infinite cartesian plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plane;

impl<T> Domain<T> for Plane {
    fn is_periodic(&self) -> bool {
        false
    }

    fn is_on_edge(&self, _: &Place<T>) -> bool {
        false
    }
}

/// The surface of a sphere, in geographic coordinates.
///
/// A sphere has no edges: every path on it may wrap around freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Globe;

impl<T> Domain<T> for Globe {
    fn is_periodic(&self) -> bool {
        true
    }

    fn is_on_edge(&self, _: &Place<T>) -> bool {
        false
    }
}
