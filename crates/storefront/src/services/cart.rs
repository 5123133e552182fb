//! Session-held cart.
//!
//! Each request restores the visitor's [`Cart`] from the session, mutates it
//! through a [`CartStore`] and writes it back only if a mutation actually
//! happened. The store's observer is what tells us that.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tower_sessions::Session;

use brew_haven_core::{Cart, CartEvent, CartStore};

use crate::models::session_keys;

/// A [`CartStore`] bound to the visitor's session.
pub struct SessionCart {
    session: Session,
    store: CartStore,
    changed: Arc<AtomicBool>,
}

impl SessionCart {
    /// Restore the cart from the session.
    ///
    /// A missing or unreadable cart starts out empty.
    pub async fn load(session: Session) -> Self {
        let cart = match session.get::<Cart>(session_keys::CART).await {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to read cart from session: {e}");
                Cart::default()
            }
        };

        let mut store = CartStore::from_cart(cart);
        let changed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&changed);
        store.subscribe(move |event: &CartEvent, cart: &Cart| {
            flag.store(true, Ordering::Relaxed);
            tracing::debug!(
                ?event,
                lines = cart.lines().len(),
                items = cart.item_count(),
                "cart changed"
            );
        });

        Self {
            session,
            store,
            changed,
        }
    }

    /// The store to mutate the cart through.
    pub const fn store(&mut self) -> &mut CartStore {
        &mut self.store
    }

    /// Read-only view of the current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        self.store.cart()
    }

    /// Whether any mutation happened since [`load`](Self::load).
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.changed.load(Ordering::Relaxed)
    }

    /// Write the cart back to the session if it changed and return it.
    ///
    /// # Errors
    ///
    /// Returns the session error if the write fails.
    pub async fn save(self) -> Result<Cart, tower_sessions::session::Error> {
        let changed = self.is_changed();
        let cart = self.store.into_cart();
        if changed {
            self.session.insert(session_keys::CART, &cart).await?;
        }
        Ok(cart)
    }
}
