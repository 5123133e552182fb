//! Catalog content commands.

use std::path::Path;

use brew_haven_storefront::content::{CATALOG_FILE, CatalogError, ContentStore};

/// Parse the catalog in `dir` and report what it contains.
///
/// A missing file is an error here, unlike at server startup.
pub fn check(dir: &Path) -> Result<(), CatalogError> {
    let path = dir.join(CATALOG_FILE);
    if !path.exists() {
        return Err(CatalogError::Io {
            path,
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }

    let content = ContentStore::load(dir)?;
    let catalog = content.catalog();

    tracing::info!(
        path = %path.display(),
        categories = catalog.menu.categories.len(),
        items = catalog.menu.items().count(),
        offers = catalog.offers.len(),
        testimonials = catalog.testimonials.len(),
        "Catalog is valid"
    );
    Ok(())
}
