//! Domain models for the shop.
//!
//! These types represent validated domain objects separate from database
//! row types.

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartLine};
pub use product::Product;
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
