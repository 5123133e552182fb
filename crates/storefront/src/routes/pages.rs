//! About and offers pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use brew_haven_core::Offer;

use super::PageContext;
use crate::filters;
use crate::state::AppState;

/// Offer display data.
#[derive(Debug, Clone)]
pub struct OfferView {
    pub title: String,
    pub description: String,
    pub discount: String,
    pub kind_label: &'static str,
    pub kind_class: &'static str,
    pub validity: String,
    pub image: String,
}

impl From<&Offer> for OfferView {
    fn from(offer: &Offer) -> Self {
        let validity = if offer.is_ongoing() {
            "Ongoing".to_string()
        } else {
            format!("Valid until {}", offer.valid_until)
        };

        Self {
            title: offer.title.clone(),
            description: offer.description.clone(),
            discount: offer.discount.clone(),
            kind_label: offer.kind.label(),
            kind_class: offer.kind.slug(),
            validity,
            image: offer.image.clone(),
        }
    }
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page: PageContext,
}

/// Offers page template.
#[derive(Template, WebTemplate)]
#[template(path = "offers.html")]
pub struct OffersTemplate {
    pub page: PageContext,
    pub offers: Vec<OfferView>,
}

/// Display the About page.
#[instrument(skip(state, session))]
pub async fn about(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    AboutTemplate {
        page: PageContext::load(&state, &session, "/about").await,
    }
}

/// Display the Offers page.
#[instrument(skip(state, session))]
pub async fn offers(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let page = PageContext::load(&state, &session, "/offers").await;
    let offers = state
        .content()
        .catalog()
        .offers
        .iter()
        .map(OfferView::from)
        .collect();

    OffersTemplate { page, offers }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::content::ContentStore;

    #[test]
    fn test_offer_views() {
        let content = ContentStore::bundled().unwrap();
        let views: Vec<OfferView> = content
            .catalog()
            .offers
            .iter()
            .map(OfferView::from)
            .collect();

        assert_eq!(views[0].title, "Happy Hour Special");
        assert_eq!(views[0].kind_class, "time-based");
        assert_eq!(views[0].kind_label, "Limited Time");
        assert_eq!(views[0].validity, "Valid until 2024-12-31");
        assert_eq!(views[1].validity, "Ongoing");
        assert_eq!(views[3].kind_class, "student");
    }

    #[test]
    fn test_layout_shows_badge_only_when_cart_has_items() {
        let shop = ContentStore::bundled().unwrap().catalog().shop_info.clone();

        let html = AboutTemplate {
            page: PageContext::new("/about", 3, shop.clone()),
        }
        .render()
        .unwrap();
        assert!(html.contains(r#"<span class="cart-badge">3</span>"#));

        let html = AboutTemplate {
            page: PageContext::new("/about", 0, shop),
        }
        .render()
        .unwrap();
        assert!(!html.contains("cart-badge\">"));
    }
}
