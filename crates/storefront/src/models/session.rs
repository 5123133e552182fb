//! Session-related types.
//!
//! The visitor's cart is the only thing kept in the session.

/// Session keys.
pub mod keys {
    /// Key for the serialized [`Cart`](brew_haven_core::Cart).
    pub const CART: &str = "cart";
}
