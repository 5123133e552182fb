//! Integration tests for Brew Haven.
//!
//! Each test starts the full storefront router on an ephemeral local port
//! and talks to it over HTTP with a cookie-keeping client, so the session
//! cart behaves as it does in a browser. No database is needed: contact
//! submissions go to the in-memory store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p brew-haven-integration-tests
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;

use brew_haven_core::ItemId;
use brew_haven_storefront::build_router;
use brew_haven_storefront::config::StorefrontConfig;
use brew_haven_storefront::services::SubmissionStore;
use brew_haven_storefront::state::AppState;
use reqwest::Client;
use tokio::net::TcpListener;

/// Storefront crate directory, for content and static assets.
const STOREFRONT_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront");

/// A storefront running in the test process.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    /// Start a storefront whose contact form posts to its own API.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn spawn() -> Self {
        Self::spawn_with(&[]).await
    }

    /// Start a storefront with extra environment overrides.
    ///
    /// `{base}` in an override value is replaced with the server's own URL.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn spawn_with(overrides: &[(&str, &str)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let base_url = format!("http://{addr}");

        let mut vars: HashMap<String, String> = HashMap::from([
            ("BREW_HAVEN_BASE_URL".to_string(), base_url.clone()),
            (
                "BREW_HAVEN_CONTENT_DIR".to_string(),
                format!("{STOREFRONT_DIR}/content"),
            ),
            (
                "BREW_HAVEN_STATIC_DIR".to_string(),
                format!("{STOREFRONT_DIR}/static"),
            ),
            ("CONTACT_TIMEOUT_SECS".to_string(), "5".to_string()),
        ]);
        for (key, value) in overrides {
            vars.insert((*key).to_string(), value.replace("{base}", &base_url));
        }

        let config = StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
            .expect("Failed to build test configuration");
        let state = AppState::new(config, SubmissionStore::memory())
            .expect("Failed to build application state");
        let app = build_router(state);

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Test server failed");
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Add one unit of `item_id` to the cart.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn add_to_cart(&self, item_id: ItemId) -> reqwest::Response {
        self.client
            .post(self.url("/cart/add"))
            .header("hx-request", "true")
            .form(&[("item_id", item_id.to_string())])
            .send()
            .await
            .expect("Failed to add to cart")
    }

    /// Change the quantity of `item_id` by `delta`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn update_cart(&self, item_id: ItemId, delta: i64) -> reqwest::Response {
        self.client
            .post(self.url("/cart/update"))
            .header("hx-request", "true")
            .form(&[("item_id", item_id.to_string()), ("delta", delta.to_string())])
            .send()
            .await
            .expect("Failed to update cart")
    }

    /// GET `path` and return the body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the status is not 200.
    pub async fn get_text(&self, path: &str) -> String {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(resp.status(), reqwest::StatusCode::OK, "GET {path}");
        resp.text().await.expect("Failed to read response")
    }
}

/// Form fields for a contact submission that passes validation.
#[must_use]
pub fn valid_contact_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Emily Rodriguez"),
        ("email", "emily@example.com"),
        ("phone", ""),
        ("subject", "Private Events"),
        ("message", "Could we book the back room for a birthday?"),
    ]
}
