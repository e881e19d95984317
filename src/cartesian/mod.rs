mod crossing;
pub(crate) mod determinant;
mod point;

pub use self::crossing::Planar;
pub use self::point::{Point, cartesian_point};
