//! Session cart over HTTP.

#![allow(clippy::unwrap_used)]

use brew_haven_core::ItemId;
use brew_haven_integration_tests::TestServer;
use reqwest::StatusCode;

#[tokio::test]
async fn test_add_items_updates_badge_and_total() {
    let server = TestServer::spawn().await;

    // Classic Espresso twice, Caffe Latte once
    server.add_to_cart(ItemId::new(1)).await;
    server.add_to_cart(ItemId::new(1)).await;
    let resp = server.add_to_cart(ItemId::new(3)).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("hx-trigger").unwrap(),
        "cart-updated"
    );
    let badge = resp.text().await.unwrap();
    assert!(badge.contains(">3<"), "badge was {badge}");

    let count = server.get_text("/cart/count").await;
    assert!(count.contains(">3<"));

    let cart = server.get_text("/cart").await;
    assert!(cart.contains("Classic Espresso"));
    assert!(cart.contains("Caffe Latte"));
    assert!(cart.contains("$5.00"));
    assert!(cart.contains("$9.75"));
}

#[tokio::test]
async fn test_unknown_item_is_not_found() {
    let server = TestServer::spawn().await;

    let resp = server.add_to_cart(ItemId::new(999)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().get("hx-trigger").is_none());

    let count = server.get_text("/cart/count").await;
    assert!(!count.contains("cart-badge"));
}

#[tokio::test]
async fn test_update_quantity_and_remove() {
    let server = TestServer::spawn().await;
    server.add_to_cart(ItemId::new(8)).await;

    let resp = server.update_cart(ItemId::new(8), 2).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("hx-trigger").is_some());
    let panel = resp.text().await.unwrap();
    assert!(panel.contains("id=\"cart-panel\""));
    assert!(panel.contains("$9.75"));

    // Dropping below one removes the line
    let panel = server.update_cart(ItemId::new(8), -3).await.text().await.unwrap();
    assert!(panel.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_update_unknown_item_fires_no_event() {
    let server = TestServer::spawn().await;
    server.add_to_cart(ItemId::new(2)).await;

    let resp = server.update_cart(ItemId::new(5), 1).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get("hx-trigger").is_none());

    let panel = resp.text().await.unwrap();
    assert!(panel.contains("Cappuccino"));
    assert!(!panel.contains("Iced Coffee"));
}

#[tokio::test]
async fn test_clear_cart() {
    let server = TestServer::spawn().await;
    server.add_to_cart(ItemId::new(6)).await;
    server.add_to_cart(ItemId::new(10)).await;

    let resp = server
        .client
        .post(server.url("/cart/clear"))
        .header("hx-request", "true")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("hx-trigger").unwrap(),
        "cart-updated"
    );
    assert!(resp.text().await.unwrap().contains("Your cart is empty"));

    let count = server.get_text("/cart/count").await;
    assert!(!count.contains("cart-badge"));
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let server = TestServer::spawn().await;
    server.add_to_cart(ItemId::new(1)).await;

    let stranger = TestServer {
        base_url: server.base_url.clone(),
        client: reqwest::Client::new(),
    };
    let count = stranger.get_text("/cart/count").await;
    assert!(!count.contains("cart-badge"));
}
