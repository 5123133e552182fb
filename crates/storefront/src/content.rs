//! Catalog content loaded at startup.
//!
//! The menu, offers, testimonials and shop details live in
//! `content/catalog.json`. The file is read from the configured content
//! directory so it can be edited without a rebuild; when it is absent the
//! copy compiled into the binary is used instead.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use brew_haven_core::{Catalog, CatalogItem, ItemId};
use thiserror::Error;

/// Name of the catalog file inside the content directory.
pub const CATALOG_FILE: &str = "catalog.json";

/// Catalog shipped with the binary.
const BUNDLED_CATALOG: &str = include_str!("../content/catalog.json");

/// Errors loading catalog content.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog JSON is malformed or breaks a type rule.
    #[error("invalid catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two menu items share an id.
    #[error("duplicate menu item id {0}")]
    DuplicateItem(ItemId),
}

/// Read-only catalog shared by all handlers.
#[derive(Debug, Clone)]
pub struct ContentStore {
    catalog: Arc<Catalog>,
}

impl ContentStore {
    /// Load `catalog.json` from `content_dir`, falling back to the bundled copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(content_dir: &Path) -> Result<Self, CatalogError> {
        let path = content_dir.join(CATALOG_FILE);
        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Catalog file not found, using bundled catalog"
            );
            return Self::bundled();
        }

        let json = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        let store = Self::from_json(&json, &path.display().to_string())?;
        tracing::info!(
            path = %path.display(),
            items = store.catalog.menu.items().count(),
            offers = store.catalog.offers.len(),
            "Loaded catalog"
        );
        Ok(store)
    }

    /// The catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled file is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG, "(bundled)")
    }

    fn from_json(json: &str, origin: &str) -> Result<Self, CatalogError> {
        let catalog = Catalog::from_json(json).map_err(|source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        check_unique_ids(&catalog)?;
        Ok(Self {
            catalog: Arc::new(catalog),
        })
    }

    /// The loaded catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Find a menu item by id.
    #[must_use]
    pub fn find_item(&self, id: ItemId) -> Option<&CatalogItem> {
        self.catalog.find_item(id)
    }

    /// The first `limit` menu items, for the home page.
    #[must_use]
    pub fn featured_items(&self, limit: usize) -> Vec<&CatalogItem> {
        self.catalog.menu.items().take(limit).collect()
    }
}

fn check_unique_ids(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut seen: Vec<ItemId> = Vec::new();
    for item in catalog.menu.items() {
        if seen.contains(&item.id) {
            return Err(CatalogError::DuplicateItem(item.id));
        }
        seen.push(item.id);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use brew_haven_core::Price;

    use super::*;

    #[test]
    fn test_bundled_catalog() {
        let store = ContentStore::bundled().unwrap();
        let catalog = store.catalog();
        assert_eq!(catalog.menu.categories.len(), 3);
        assert_eq!(catalog.menu.items().count(), 10);
        assert_eq!(catalog.offers.len(), 4);
        assert_eq!(catalog.testimonials.len(), 3);

        let espresso = store.find_item(ItemId::new(1)).unwrap();
        assert_eq!(espresso.name, "Classic Espresso");
        assert_eq!(espresso.price, Price::from_cents(250));
        assert_eq!(
            store.find_item(ItemId::new(8)).unwrap().price,
            Price::from_cents(325)
        );
    }

    #[test]
    fn test_missing_directory_uses_bundled() {
        let store = ContentStore::load(Path::new("/nonexistent/brew-haven-content")).unwrap();
        assert_eq!(store.catalog().menu.items().count(), 10);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = BUNDLED_CATALOG.replace("\"id\": 2, \"name\": \"Cappuccino\"", "\"id\": 1, \"name\": \"Cappuccino\"");
        assert!(matches!(
            ContentStore::from_json(&json, "test"),
            Err(CatalogError::DuplicateItem(id)) if id == ItemId::new(1)
        ));
    }

    #[test]
    fn test_featured_items() {
        let store = ContentStore::bundled().unwrap();
        let featured = store.featured_items(3);
        assert_eq!(featured.len(), 3);
        assert_eq!(featured[0].name, "Classic Espresso");
    }
}
