use num_traits::Float;

use crate::{Location, geometry::localize_in_range};

/// A place on the surface of a sphere, in radians.
///
/// This is a [`Location`] whose `s` and `t` coordinates are interpreted as latitude and
/// longitude.
///
/// ## Example
/// ```
/// use std::f64::consts::PI;
///
/// use pathcrop::{Location, spherical::Place};
///
/// let place = Place::from(Location { s: 0.5, t: PI });
///
/// assert_eq!(place.lat, 0.5);
/// assert_eq!(place.normalized().lon, -PI);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Place<T = f64> {
    /// The angle north of the equator, in the range __\[-π/2, π/2\]__.
    pub lat: T,
    /// The angle east of the prime meridian, nominally in the range __\[-π, π\)__.
    pub lon: T,
}

impl<T> From<Location<T>> for Place<T> {
    fn from(location: Location<T>) -> Self {
        Self {
            lat: location.s,
            lon: location.t,
        }
    }
}

impl<T> From<Place<T>> for Location<T> {
    fn from(place: Place<T>) -> Self {
        Self {
            s: place.lat,
            t: place.lon,
        }
    }
}

impl<T> Place<T>
where
    T: Float,
{
    /// Returns the same place with its longitude wrapped into __\[-π, π\)__.
    pub fn normalized(self) -> Self
    where
        T: num_traits::FloatConst,
    {
        Self {
            lat: self.lat,
            lon: localize_in_range(self.lon, -T::PI(), T::PI()),
        }
    }
}

/// A constructor macro for the spherical [`Place`].
#[macro_export]
macro_rules! place {
    ($lat:expr, $lon:expr) => {
        $crate::spherical::Place {
            lat: $lat,
            lon: $lon,
        }
    };
}

pub use place;
