//! Coffee shop menu page.
//!
//! One category is shown at a time (the first by default), optionally
//! narrowed by a case-insensitive search on item names. The cart panel sits
//! beside the menu.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use brew_haven_core::{CatalogItem, CategoryId, Menu};

use super::PageContext;
use super::cart::CartView;
use crate::filters;
use crate::services::SessionCart;
use crate::state::AppState;

/// Menu page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    /// Category id; anything unparseable falls back to the first category.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

/// Category tab display data.
#[derive(Debug, Clone)]
pub struct CategoryTab {
    pub id: u32,
    pub name: String,
    pub selected: bool,
}

/// Menu item display data.
#[derive(Debug, Clone)]
pub struct MenuItemView {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl From<&CatalogItem> for MenuItemView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.get(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            image: item.image.clone(),
        }
    }
}

/// The slice of the menu a query selects.
#[derive(Debug, Clone)]
pub struct MenuSelection {
    pub tabs: Vec<CategoryTab>,
    pub category_id: u32,
    pub category_name: String,
    pub items: Vec<MenuItemView>,
}

impl MenuSelection {
    /// Resolve `query` against `menu`.
    #[must_use]
    pub fn resolve(menu: &Menu, query: &MenuQuery) -> Self {
        let requested = query
            .category
            .as_deref()
            .and_then(|raw| raw.parse::<CategoryId>().ok());
        let search = query.q.as_deref().unwrap_or_default();

        let Some(category) = menu.category_or_first(requested) else {
            return Self {
                tabs: Vec::new(),
                category_id: 0,
                category_name: String::new(),
                items: Vec::new(),
            };
        };

        Self {
            tabs: menu
                .categories
                .iter()
                .map(|c| CategoryTab {
                    id: c.id.get(),
                    name: c.name.clone(),
                    selected: c.id == category.id,
                })
                .collect(),
            category_id: category.id.get(),
            category_name: category.name.clone(),
            items: category
                .search(search)
                .into_iter()
                .map(MenuItemView::from)
                .collect(),
        }
    }
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "coffee_shop.html")]
pub struct CoffeeShopTemplate {
    pub page: PageContext,
    pub menu: MenuSelection,
    pub search: String,
    pub cart: CartView,
}

/// Display the menu.
#[instrument(skip(state, session))]
pub async fn coffee_shop(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<MenuQuery>,
) -> impl IntoResponse {
    let page = PageContext::load(&state, &session, "/coffee-shop").await;
    let cart = SessionCart::load(session).await;
    let menu = MenuSelection::resolve(&state.content().catalog().menu, &query);

    CoffeeShopTemplate {
        page,
        menu,
        search: query.q.unwrap_or_default(),
        cart: CartView::from(cart.cart()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::content::ContentStore;

    fn query(category: Option<&str>, q: Option<&str>) -> MenuQuery {
        MenuQuery {
            category: category.map(String::from),
            q: q.map(String::from),
        }
    }

    #[test]
    fn test_defaults_to_first_category() {
        let content = ContentStore::bundled().unwrap();
        let menu = &content.catalog().menu;

        let selection = MenuSelection::resolve(menu, &MenuQuery::default());
        assert_eq!(selection.category_name, "Hot Beverages");
        assert_eq!(selection.items.len(), 4);
        assert!(selection.tabs[0].selected);
        assert!(!selection.tabs[1].selected);

        let selection = MenuSelection::resolve(menu, &query(Some("99"), None));
        assert_eq!(selection.category_name, "Hot Beverages");

        let selection = MenuSelection::resolve(menu, &query(Some("cold"), None));
        assert_eq!(selection.category_name, "Hot Beverages");
    }

    #[test]
    fn test_search_within_category() {
        let content = ContentStore::bundled().unwrap();
        let menu = &content.catalog().menu;

        let selection = MenuSelection::resolve(menu, &query(Some("2"), Some("LATTE")));
        assert_eq!(selection.category_name, "Cold Beverages");
        assert_eq!(selection.items.len(), 1);
        assert_eq!(selection.items[0].name, "Iced Latte");
        assert_eq!(selection.items[0].price, "$4.75");

        // Caffe Latte is hot, so it is not found among cold drinks
        let selection = MenuSelection::resolve(menu, &query(Some("2"), Some("caffe")));
        assert!(selection.items.is_empty());
    }
}
