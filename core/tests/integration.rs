//! Full CRUD lifecycle tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every
//! `CategoryClient` operation over real HTTP through `ReqwestTransport`.
//! Validates that request building, transport and response parsing work
//! end-to-end with the actual server.

use std::sync::Arc;

use category_core::{ApiError, CategoryClient, CategoryId, CategoryInput, ClientConfig, ReqwestTransport};

/// Serve `app` on an ephemeral loopback port and return its base URL.
async fn spawn_server(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener, app));
    format!("http://{addr}")
}

fn client(config: ClientConfig) -> CategoryClient {
    CategoryClient::new(Arc::new(ReqwestTransport::new(config).unwrap()))
}

#[tokio::test]
async fn crud_lifecycle() {
    let base_url = spawn_server(mock_server::app()).await;
    let client = client(ClientConfig::new(&base_url));

    // Step 1: list — should be empty.
    let categories = client.list_categories().await.unwrap();
    assert!(categories.is_empty(), "expected empty list");

    // Step 2: create a category.
    let created = client.create_category(&CategoryInput::new("Books")).await.unwrap();
    assert_eq!(created.name, "Books");
    let id = created.id;

    // Step 3: get the created category, twice; both reach the server.
    let fetched = client.get_category(id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(client.get_category(id).await.unwrap(), fetched);

    // Step 4: rename.
    let updated = client
        .update_category(id, &CategoryInput::new("Literature"))
        .await
        .unwrap()
        .expect("server returns the updated category");
    assert_eq!(updated.id, id);
    assert_eq!(updated.name, "Literature");

    // Step 5: list — should have one item with the new name.
    let categories = client.list_categories().await.unwrap();
    assert_eq!(categories, vec![updated]);

    // Step 6: delete.
    client.delete_category(id).await.unwrap();

    // Step 7: get after delete — should be NotFound with the server's message.
    let err = client.get_category(id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(err.best_message(), format!("Category with id {id} not found."));

    // Step 8: delete again — should be NotFound.
    let err = client.delete_category(id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));

    // Step 9: list — should be empty again.
    let categories = client.list_categories().await.unwrap();
    assert!(categories.is_empty(), "expected empty list after delete");
}

#[tokio::test]
async fn blank_name_is_rejected_by_server_not_client() {
    let base_url = spawn_server(mock_server::app()).await;
    let client = client(ClientConfig::new(&base_url));

    let err = client.create_category(&CategoryInput::new("")).await.unwrap_err();

    assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
    assert_eq!(err.best_message(), "Category name must not be empty.");
}

#[tokio::test]
async fn update_missing_category_is_not_found() {
    let base_url = spawn_server(mock_server::app()).await;
    let client = client(ClientConfig::new(&base_url));

    let err = client
        .update_category(CategoryId(99), &CategoryInput::new("Ghost"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn admin_writes_use_configured_bearer_token() {
    let base_url = spawn_server(mock_server::app_with_admin_token("s3cret")).await;

    let anonymous = client(ClientConfig::new(&base_url));
    let err = anonymous.create_category(&CategoryInput::new("Books")).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.best_message(), "Administrator token required.");
    // Reads stay public.
    assert!(anonymous.list_categories().await.unwrap().is_empty());

    let admin = client(ClientConfig::new(&base_url).with_bearer_token("s3cret"));
    let created = admin.create_category(&CategoryInput::new("Books")).await.unwrap();
    admin.delete_category(created.id).await.unwrap();
}

#[tokio::test]
async fn base_url_prefix_is_preserved() {
    let base_url = spawn_server(axum::Router::new().nest("/api", mock_server::app())).await;
    let client = client(ClientConfig::new(&format!("{base_url}/api/")));

    let created = client.create_category(&CategoryInput::new("Books")).await.unwrap();
    assert_eq!(client.list_categories().await.unwrap(), vec![created]);
}
