//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use brew_haven_core::Testimonial;

use super::PageContext;
use super::menu::MenuItemView;
use crate::filters;
use crate::state::AppState;

/// Menu items shown on the home page.
const FEATURED_ITEMS: usize = 3;

/// Testimonial display data.
#[derive(Debug, Clone)]
pub struct TestimonialView {
    pub name: String,
    pub role: String,
    pub content: String,
    pub rating: u8,
    pub image: String,
}

impl From<&Testimonial> for TestimonialView {
    fn from(t: &Testimonial) -> Self {
        Self {
            name: t.name.clone(),
            role: t.role.clone(),
            content: t.content.clone(),
            rating: t.rating.min(5),
            image: t.image.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub featured: Vec<MenuItemView>,
    pub testimonials: Vec<TestimonialView>,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let page = PageContext::load(&state, &session, "/").await;
    let content = state.content();

    HomeTemplate {
        page,
        featured: content
            .featured_items(FEATURED_ITEMS)
            .into_iter()
            .map(MenuItemView::from)
            .collect(),
        testimonials: content
            .catalog()
            .testimonials
            .iter()
            .map(TestimonialView::from)
            .collect(),
    }
}
