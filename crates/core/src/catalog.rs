//! Product catalog: menu categories, offers, testimonials and shop details.
//!
//! The catalog is read-only once loaded. The cart snapshots the fields it
//! needs from a [`CatalogItem`] and never writes back.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ItemId, OfferId, Price, TestimonialId};

/// A purchasable menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub image: String,
}

/// A named group of menu items, e.g. "Hot Beverages".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: CategoryId,
    pub name: String,
    pub items: Vec<CatalogItem>,
}

/// The full menu, categories in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub categories: Vec<MenuCategory>,
}

impl Menu {
    /// The category shown when none is selected.
    #[must_use]
    pub fn first_category(&self) -> Option<&MenuCategory> {
        self.categories.first()
    }

    /// Look up a category, falling back to the first one for unknown ids.
    #[must_use]
    pub fn category_or_first(&self, id: Option<CategoryId>) -> Option<&MenuCategory> {
        id.and_then(|id| self.categories.iter().find(|c| c.id == id))
            .or_else(|| self.first_category())
    }

    /// Find an item anywhere on the menu.
    #[must_use]
    pub fn find_item(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items().find(|item| item.id == id)
    }

    /// Iterate over every item in menu order.
    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }
}

impl MenuCategory {
    /// Items whose name contains `query`, ignoring case.
    ///
    /// An empty query matches everything. Whitespace is matched literally.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&CatalogItem> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Kind of promotion, used for badge styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OfferKind {
    TimeBased,
    Loyalty,
    Combo,
    Student,
}

impl OfferKind {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TimeBased => "Limited Time",
            Self::Loyalty => "Loyalty",
            Self::Combo => "Combo",
            Self::Student => "Student",
        }
    }

    /// Serialized name, e.g. `time-based`; used as a CSS modifier.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::TimeBased => "time-based",
            Self::Loyalty => "loyalty",
            Self::Combo => "combo",
            Self::Student => "student",
        }
    }
}

/// A promotion shown on the offers page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub description: String,
    /// Either an ISO date or `"ongoing"`.
    pub valid_until: String,
    pub discount: String,
    pub kind: OfferKind,
    pub image: String,
}

impl Offer {
    /// Whether the offer has no end date.
    #[must_use]
    pub fn is_ongoing(&self) -> bool {
        self.valid_until.eq_ignore_ascii_case("ongoing")
    }
}

/// A customer quote for the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub role: String,
    pub content: String,
    /// Stars out of five.
    pub rating: u8,
    pub image: String,
}

/// Opening hours as display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub weekdays: String,
    pub saturday: String,
    pub sunday: String,
}

/// Address and contact details of the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopInfo {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub hours: OpeningHours,
}

/// Everything the site renders that is not page copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub menu: Menu,
    pub offers: Vec<Offer>,
    pub testimonials: Vec<Testimonial>,
    pub shop_info: ShopInfo,
}

impl Catalog {
    /// Parse a catalog from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document is malformed, a price
    /// is negative, or a required field is missing.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Find a menu item by id.
    #[must_use]
    pub fn find_item(&self, id: ItemId) -> Option<&CatalogItem> {
        self.menu.find_item(id)
    }
}
