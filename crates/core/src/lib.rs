//! Brew Haven Core - Shared domain library.
//!
//! This crate provides the types used across all Brew Haven components:
//! - `storefront` - Public marketing site with menu, cart and contact form
//! - `cli` - Command-line tools for migrations and contact submissions
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. The cart store lives here so that every surface
//! mutates a cart the same way.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and emails
//! - [`catalog`] - Menu, offers, testimonials and shop information
//! - [`cart`] - The cart aggregate and its single point of mutation
//! - [`contact`] - Contact form validation and stored submissions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod contact;
pub mod types;

pub use cart::{Cart, CartEvent, CartLine, CartStore, QuantityUpdate, SubscriptionId};
pub use catalog::{Catalog, CatalogItem, Menu, MenuCategory, Offer, OfferKind, ShopInfo, Testimonial};
pub use contact::{ContactError, ContactForm, ContactSubmission, ValidContact};
pub use types::*;
