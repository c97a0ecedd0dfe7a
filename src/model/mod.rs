pub mod board;
pub mod config;
pub mod container;
pub mod geometry;
pub mod item;
pub mod list;
pub mod store;

pub use board::*;
pub use config::*;
pub use container::*;
pub use geometry::*;
pub use item::*;
pub use list::*;
pub use store::*;
