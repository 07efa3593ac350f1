//! Value objects - Immutable objects defined by their attributes

mod category;
mod player;
mod theme;

pub use category::Category;
pub use player::Player;
pub use theme::{Theme, ThemeColors};
