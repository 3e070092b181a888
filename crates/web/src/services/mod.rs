//! Business logic services for the shop.
//!
//! # Services
//!
//! - `auth` - User registration and password login
//! - `cart` - Cart mutation and viewing

pub mod auth;
pub mod cart;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
