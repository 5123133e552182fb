//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `cart` - Session-held cart driven through the core `CartStore`
//! - `contact_client` - Posts contact submissions to the contact endpoint
//! - `submissions` - Stores contact submissions (`PostgreSQL` or memory)

pub mod cart;
pub mod contact_client;
pub mod submissions;

pub use cart::SessionCart;
pub use contact_client::{ContactClient, ContactClientError};
pub use submissions::SubmissionStore;
