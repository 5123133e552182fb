//! Brew Haven storefront library.
//!
//! The website as a library: the binary wires it to a listener, the
//! integration tests drive the router in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use app::build_router;
