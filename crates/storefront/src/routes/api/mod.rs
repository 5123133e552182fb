//! JSON API endpoints.

pub mod contact;
