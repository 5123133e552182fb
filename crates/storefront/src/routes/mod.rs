//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Home page
//! GET  /about            - Our story
//! GET  /offers           - Current offers
//! GET  /coffee-shop      - Menu (?category=<id>&q=<search>) with cart sidebar
//! GET  /contact          - Contact page
//! POST /contact          - Contact form submit (fragment for HTMX, page otherwise)
//!
//! # Cart (HTMX fragments)
//! GET  /cart             - Cart page
//! POST /cart/add         - Add one item (returns count badge, triggers cart-updated)
//! POST /cart/update      - Change quantity by delta (returns cart panel)
//! POST /cart/clear       - Empty the cart (returns cart panel)
//! GET  /cart/count       - Cart count badge
//! GET  /cart/panel       - Cart panel
//!
//! # Contact API (JSON)
//! POST /api/contact      - Store a submission (rate limited per IP)
//! GET  /api/contact      - Latest submissions, newest first
//!
//! # Health
//! GET  /health           - Liveness
//! GET  /health/ready     - Readiness
//! ```

pub mod api;
pub mod cart;
pub mod contact;
pub mod health;
pub mod home;
pub mod menu;
pub mod pages;

use axum::{
    Router,
    handler::Handler,
    routing::{get, post},
};
use tower_sessions::Session;

use brew_haven_core::ShopInfo;

use crate::middleware::{api_rate_limiter, contact_rate_limiter};
use crate::services::SessionCart;
use crate::state::AppState;

/// Response header HTMX listens on for client-side events.
pub const HX_TRIGGER: &str = "HX-Trigger";

/// Event fired after every cart mutation; badge and panels re-fetch on it.
pub const CART_UPDATED: &str = "cart-updated";

/// Navigation entries in header order.
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/about", "About Us"),
    ("/offers", "Offers"),
    ("/coffee-shop", "Coffee Shop"),
];

/// Header navigation entry.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Data every full page needs for the header and footer.
pub struct PageContext {
    /// Path of the current page, for highlighting the nav entry.
    pub path: &'static str,
    pub nav: Vec<NavLink>,
    /// Units in the visitor's cart.
    pub cart_count: u64,
    pub shop: ShopInfo,
}

impl PageContext {
    /// Gather header and footer data for the page at `path`.
    pub async fn load(state: &AppState, session: &Session, path: &'static str) -> Self {
        let cart = SessionCart::load(session.clone()).await;
        Self::new(
            path,
            cart.cart().item_count(),
            state.content().catalog().shop_info.clone(),
        )
    }

    /// Build a context from already known parts.
    #[must_use]
    pub fn new(path: &'static str, cart_count: u64, shop: ShopInfo) -> Self {
        let nav = NAV_LINKS
            .iter()
            .map(|&(href, label)| NavLink {
                href,
                label,
                active: href == path,
            })
            .collect();
        Self {
            path,
            nav,
            cart_count,
            shop,
        }
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
        .route("/panel", get(cart::panel))
}

/// Create the contact API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/contact",
        get(api::contact::list).post(api::contact::create.layer(api_rate_limiter())),
    )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/about", get(pages::about))
        .route("/offers", get(pages::offers))
        .route("/coffee-shop", get(menu::coffee_shop))
        .route(
            "/contact",
            get(contact::show).post(contact::submit.layer(contact_rate_limiter())),
        )
        .nest("/cart", cart_routes())
        .nest("/api", api_routes())
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}
