//! Shopping cart aggregate and the store that owns it.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s keyed by item id. It can be
//! read by anyone, but it is only ever changed through a [`CartStore`], which
//! notifies its subscribers after every change.
//!
//! ```
//! use brew_haven_core::{CartStore, CatalogItem, ItemId, Price};
//!
//! let espresso = CatalogItem {
//!     id: ItemId::new(1),
//!     name: "Classic Espresso".to_string(),
//!     price: Price::from_cents(250),
//!     description: "Rich, bold shot".to_string(),
//!     image: "/static/images/menu/espresso.svg".to_string(),
//! };
//!
//! let mut store = CartStore::default();
//! store.add_item(&espresso);
//! store.add_item(&espresso);
//!
//! assert_eq!(store.cart().item_count(), 2);
//! assert_eq!(store.cart().total(), Price::from_cents(500));
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::types::{ItemId, Price};

/// One catalog item in the cart, with its quantity.
///
/// Name, price, description and image are copied from the catalog when the
/// line is created, so later catalog edits do not change an existing cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub image: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    fn new(item: &CatalogItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            description: item.description.clone(),
            image: item.image.clone(),
            quantity: 1,
        }
    }

    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// Ordered cart contents.
///
/// Lines keep the order in which their items were first added and no item
/// id appears twice. Totals are derived on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if the item is in the cart.
    #[must_use]
    pub fn line(&self, id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Quantity of `id` in the cart, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, id: ItemId) -> u32 {
        self.line(id).map_or(0, |line| line.quantity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units, not the number of lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }
}

/// What a call to [`CartStore::update_quantity`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line now holds this quantity.
    Changed(u32),
    /// The quantity reached zero or below and the line was dropped.
    Removed,
    /// No line with that id; the cart is unchanged.
    NotInCart,
}

/// A change that has been applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// An item was added; `quantity` is the line's new quantity.
    ItemAdded { id: ItemId, quantity: u32 },
    QuantityChanged { id: ItemId, quantity: u32 },
    LineRemoved { id: ItemId },
    Cleared,
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&CartEvent, &Cart) + Send + Sync>;

/// Sole owner and mutator of a [`Cart`].
///
/// Every successful mutation calls each subscriber once, in subscription
/// order, with the event and the updated cart. Operations are total: none of
/// them can fail.
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl CartStore {
    /// Take ownership of an existing cart, e.g. one restored from a session.
    #[must_use]
    pub fn from_cart(cart: Cart) -> Self {
        Self {
            cart,
            ..Self::default()
        }
    }

    /// Read-only view of the current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Give the cart back, dropping all subscribers.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    /// Register an observer called after every change.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&CartEvent, &Cart) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Add one unit of `item`.
    ///
    /// Re-adding an item bumps its quantity in place; a new item is appended.
    pub fn add_item(&mut self, item: &CatalogItem) {
        let existing = self.cart.lines.iter_mut().find(|line| line.id == item.id);
        let quantity = if let Some(line) = existing {
            line.quantity = line.quantity.saturating_add(1);
            line.quantity
        } else {
            self.cart.lines.push(CartLine::new(item));
            1
        };
        self.notify(&CartEvent::ItemAdded {
            id: item.id,
            quantity,
        });
    }

    /// Adjust the quantity of `id` by `delta`.
    ///
    /// A result of zero or less removes the line. Unknown ids leave the cart
    /// untouched and notify nobody.
    pub fn update_quantity(&mut self, id: ItemId, delta: i64) -> QuantityUpdate {
        let Some(index) = self.cart.position(id) else {
            return QuantityUpdate::NotInCart;
        };

        let current = self
            .cart
            .lines
            .get(index)
            .map_or(0, |line| i64::from(line.quantity));
        let new_quantity = current.saturating_add(delta);

        if new_quantity <= 0 {
            self.cart.lines.remove(index);
            self.notify(&CartEvent::LineRemoved { id });
            return QuantityUpdate::Removed;
        }

        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.cart.lines.get_mut(index) {
            line.quantity = quantity;
        }
        self.notify(&CartEvent::QuantityChanged { id, quantity });
        QuantityUpdate::Changed(quantity)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.lines.clear();
        self.notify(&CartEvent::Cleared);
    }

    /// Current total; see [`Cart::total`].
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// Current unit count; see [`Cart::item_count`].
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    fn notify(&self, event: &CartEvent) {
        for (_, observer) in &self.observers {
            observer(event, &self.cart);
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish()
    }
}
