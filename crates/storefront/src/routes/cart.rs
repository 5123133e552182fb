//! Cart route handlers.
//!
//! Cart operations use HTMX for updates without full page reloads. The cart
//! itself lives in the session; every mutation goes through the core
//! `CartStore` and answers with `HX-Trigger: cart-updated` so the header
//! badge and any cart panel on the page re-fetch themselves.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use brew_haven_core::{Cart, CartLine, ItemId, QuantityUpdate};

use super::{CART_UPDATED, HX_TRIGGER, PageContext};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::services::SessionCart;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u64,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.get(),
            name: line.name.clone(),
            description: line.description.clone(),
            image: line.image.clone(),
            price: line.price.to_string(),
            quantity: line.quantity,
            line_total: line.line_total().to_string(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub item_id: ItemId,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: ItemId,
    pub delta: i64,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: PageContext,
    pub cart: CartView,
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let page = PageContext::load(&state, &session, "/cart").await;
    let cart = SessionCart::load(session).await;

    CartShowTemplate {
        page,
        cart: CartView::from(cart.cart()),
    }
}

/// Add one unit of a menu item (HTMX).
///
/// Returns the updated count badge.
///
/// # Errors
///
/// Returns 404 if the item is not on the menu, 500 if the session write fails.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let item = state
        .content()
        .find_item(form.item_id)
        .ok_or_else(|| AppError::NotFound(format!("menu item {}", form.item_id)))?;

    let mut cart = SessionCart::load(session).await;
    cart.store().add_item(item);
    let cart = cart.save().await?;

    add_breadcrumb("cart", "Added item", &[("item_id", form.item_id.to_string())]);
    tracing::info!(item_id = %form.item_id, count = cart.item_count(), "Added item to cart");

    Ok((
        AppendHeaders([(HX_TRIGGER, CART_UPDATED)]),
        CartCountTemplate {
            count: cart.item_count(),
        },
    )
        .into_response())
}

/// Change the quantity of a cart line by `delta` (HTMX).
///
/// Dropping to zero or below removes the line; unknown items are ignored and
/// fire no event. Returns the updated cart panel.
///
/// # Errors
///
/// Returns 500 if the session write fails.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    let mut cart = SessionCart::load(session).await;
    let outcome = cart.store().update_quantity(form.item_id, form.delta);
    let changed = cart.is_changed();
    let cart = cart.save().await?;

    if outcome == QuantityUpdate::NotInCart {
        tracing::debug!(item_id = %form.item_id, "Quantity update for item not in cart");
    }

    let panel = CartPanelTemplate {
        cart: CartView::from(&cart),
    };
    if changed {
        Ok((AppendHeaders([(HX_TRIGGER, CART_UPDATED)]), panel).into_response())
    } else {
        Ok(panel.into_response())
    }
}

/// Empty the cart (HTMX).
///
/// # Errors
///
/// Returns 500 if the session write fails.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Response> {
    let mut cart = SessionCart::load(session).await;
    cart.store().clear();
    let cart = cart.save().await?;

    add_breadcrumb("cart", "Cleared cart", &[]);

    Ok((
        AppendHeaders([(HX_TRIGGER, CART_UPDATED)]),
        CartPanelTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = SessionCart::load(session).await;
    CartCountTemplate {
        count: cart.cart().item_count(),
    }
}

/// Get cart panel (HTMX).
#[instrument(skip(session))]
pub async fn panel(session: Session) -> impl IntoResponse {
    let cart = SessionCart::load(session).await;
    CartPanelTemplate {
        cart: CartView::from(cart.cart()),
    }
}
