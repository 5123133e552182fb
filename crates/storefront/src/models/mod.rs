//! Storefront models that are not shared with other crates.

pub mod session;

pub use session::keys as session_keys;
