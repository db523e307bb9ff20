pub mod backend;
pub mod item;
pub mod price;
pub mod shop;

pub use backend::*;
pub use item::*;
pub use price::*;
pub use shop::*;
