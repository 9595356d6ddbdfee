//! End-to-end checkout: client cart and orchestrator against the real HTTP
//! server.

use std::sync::Arc;

use rust_decimal_macros::dec;

use cartwheel_client::{
    ApiError, ApiSession, CartStore, CheckoutError, MemoryStorage, Orchestrator,
};
use cartwheel_core::{OrderStatus, Product, ProductId};
use cartwheel_integration_tests::TestServer;

fn empty_cart() -> CartStore {
    CartStore::load(Arc::new(MemoryStorage::new()))
}

async fn product_named(session: &ApiSession, name: &str) -> Product {
    session
        .products(None, Some(name))
        .await
        .expect("product search failed")
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("no product named {name}"))
}

#[tokio::test]
async fn test_checkout_subset_and_pricing() {
    let server = TestServer::spawn().await;
    server.session().seed_products().await.expect("seed failed");
    let session = server.logged_in_session("buyer@example.com").await;

    let iphone = product_named(&session, "iPhone 15 Pro").await;
    let basketball = product_named(&session, "Basketball").await;

    let mut orchestrator = Orchestrator::new(session, empty_cart());
    orchestrator.cart_mut().add(iphone.clone(), 1);
    orchestrator.cart_mut().add(basketball.clone(), 2);

    // Check out only the basketballs: subtotal 50.00, shipping 12.99,
    // tax 4.00.
    let order = orchestrator
        .checkout(&[basketball.id])
        .await
        .expect("checkout failed");

    assert_eq!(order.total, dec!(66.99));
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].product_name, "Basketball");

    // The unselected entry is untouched.
    assert_eq!(orchestrator.cart().len(), 1);
    assert_eq!(orchestrator.cart().get(iphone.id).unwrap().quantity, 1);
    assert_eq!(orchestrator.history().len(), 1);

    // Check out the rest: 999.00 subtotal clears the free-shipping
    // threshold, tax 79.92.
    let order = orchestrator
        .checkout(&[iphone.id])
        .await
        .expect("second checkout failed");

    assert_eq!(order.total, dec!(1078.92));
    assert!(orchestrator.cart().is_empty());

    // Local history is most-recent-first.
    assert_eq!(orchestrator.history().len(), 2);
    assert_eq!(orchestrator.history()[0].id, order.id);
}

#[tokio::test]
async fn test_unknown_product_fails_and_cart_is_preserved() {
    let server = TestServer::spawn().await;
    server.session().seed_products().await.expect("seed failed");
    let session = server.logged_in_session("buyer@example.com").await;

    let phantom = Product {
        id: ProductId::new(9999),
        name: "Discontinued Gadget".to_owned(),
        price: dec!(10.00),
        category: "Electronics".to_owned(),
        image: String::new(),
    };

    let mut orchestrator = Orchestrator::new(session, empty_cart());
    orchestrator.cart_mut().add(phantom.clone(), 1);

    let err = orchestrator.checkout(&[phantom.id]).await.unwrap_err();
    match err {
        CheckoutError::Api(ApiError::Api { status, message }) => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "Products not found: 9999");
        }
        other => panic!("unexpected error: {other}"),
    }

    // Nothing was persisted and the cart is unchanged.
    assert_eq!(orchestrator.cart().len(), 1);
    assert!(orchestrator.history().is_empty());
    let history = orchestrator.session().orders().await.expect("orders failed");
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_server_reprices_tampered_client_prices() {
    let server = TestServer::spawn().await;
    server.session().seed_products().await.expect("seed failed");
    let session = server.logged_in_session("buyer@example.com").await;

    let airpods = product_named(&session, "AirPods Pro").await;
    let airpods_id = airpods.id;
    let tampered = Product {
        price: dec!(1.00),
        ..airpods
    };

    let mut orchestrator = Orchestrator::new(session, empty_cart());
    orchestrator.cart_mut().add(tampered, 1);

    let order = orchestrator
        .checkout(&[airpods_id])
        .await
        .expect("checkout failed");

    // Authoritative price 249.00: free shipping, tax 19.92.
    assert_eq!(order.total, dec!(268.92));
    assert_eq!(order.items[0].price, dec!(249.00));
}

#[tokio::test]
async fn test_order_history_is_owner_scoped() {
    let server = TestServer::spawn().await;
    server.session().seed_products().await.expect("seed failed");
    let owner = server.logged_in_session("owner@example.com").await;
    let stranger = server.logged_in_session("stranger@example.com").await;

    let basketball = product_named(&owner, "Basketball").await;
    let mut orchestrator = Orchestrator::new(owner, empty_cart());
    orchestrator.cart_mut().add(basketball.clone(), 1);
    let order = orchestrator
        .checkout(&[basketball.id])
        .await
        .expect("checkout failed");

    let fetched = orchestrator
        .session()
        .order(order.id)
        .await
        .expect("fetch failed");
    assert_eq!(fetched.id, order.id);

    let err = stranger.order(order.id).await.unwrap_err();
    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "Order not found or access denied");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(stranger.orders().await.expect("orders failed").is_empty());
}
