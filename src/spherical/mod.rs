mod crossing;
mod place;

pub use self::crossing::Periodic;
pub use self::place::{Place, place};
