//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro drives the real router over a storage
//! backend and checks status codes, messages and bodies end to end.
//!
//! # Generated Tests
//!
//! ## Orders
//! - creation, display ID sequence, table rules, validation failures
//! - get / update / delete, UUID handling
//! - status and payment-method transitions
//! - listing pagination and the `orders-listing` search
//!
//! ## Menu, reservations, categories
//! - create / list / update / delete and their not-found cases
//!
//! ## Auth
//! - admin routes reject missing, wrong, expired and foreign tokens
//! - login hands out a token that opens admin routes; bad credentials are 400
//!
//! ## Bills and export
//! - PDF bill and split bill, their 404/400 cases and headers
//! - Excel export headers, body and the empty-store 404

/// Generate a REST integration test suite for a storage backend.
///
/// `$storage_factory` must evaluate to a fresh `StorageServices`.
#[macro_export]
macro_rules! rest_integration_tests {
    ($storage_factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};
            use crate::storage_harness::integration::*;

            async fn make_server() -> TestServer {
                build_test_server($storage_factory)
            }

            // ==============================================================
            // Orders: create
            // ==============================================================

            #[tokio::test]
            async fn test_create_orders_get_sequential_display_ids() {
                let server = make_server().await;

                let first = create_order(&server, &dine_in_body(1, "2025-01-15")).await;
                let second = create_order(&server, &pickup_body("2025-01-15")).await;

                assert_eq!(first["displayId"], "B00000001");
                assert_eq!(second["displayId"], "B00000002");
                assert_eq!(first["status"], "INPROGRESS");
                assert!(uuid::Uuid::parse_str(first["orderId"].as_str().unwrap()).is_ok());
                assert!(second.get("tableNumber").is_none());
            }

            #[tokio::test]
            async fn test_create_response_shape() {
                let server = make_server().await;

                let response = server
                    .post("/api/orders")
                    .authorization_bearer(admin_token())
                    .json(&dine_in_body(3, "2025-01-15"))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(body["message"], "Order created successfully");
                assert_eq!(body["order"]["tableNumber"], 3);
                assert_eq!(body["order"]["orderItems"].as_array().unwrap().len(), 2);
            }

            #[tokio::test]
            async fn test_dine_in_order_requires_table() {
                let server = make_server().await;
                let mut body = dine_in_body(1, "2025-01-15");
                body.as_object_mut().unwrap().remove("tableNumber");

                let response = server
                    .post("/api/orders")
                    .authorization_bearer(admin_token())
                    .json(&body)
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(
                    body["message"],
                    "Table number is required unless it's a pickup order."
                );
            }

            #[tokio::test]
            async fn test_occupied_table_rejected_and_consumes_display_id() {
                let server = make_server().await;
                create_order(&server, &dine_in_body(7, "2025-01-15")).await;

                let response = server
                    .post("/api/orders")
                    .authorization_bearer(admin_token())
                    .json(&dine_in_body(7, "2025-01-15"))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(
                    body["message"],
                    "An active order already exists for this table. Please update the existing order!"
                );

                let next = create_order(&server, &pickup_body("2025-01-15")).await;
                assert_eq!(next["displayId"], "B00000003");
            }

            #[tokio::test]
            async fn test_create_order_validation_errors() {
                let server = make_server().await;

                let mut no_items = dine_in_body(1, "2025-01-15");
                no_items["orderItems"] = json!([]);
                let response = server
                    .post("/api/orders")
                    .authorization_bearer(admin_token())
                    .json(&no_items)
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");

                let bad_date = dine_in_body(1, "15/01/2025");
                let response = server
                    .post("/api/orders")
                    .authorization_bearer(admin_token())
                    .json(&bad_date)
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let response = server
                    .post("/api/orders")
                    .authorization_bearer(admin_token())
                    .text("{not json")
                    .content_type("application/json")
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            // ==============================================================
            // Orders: get / update / delete
            // ==============================================================

            #[tokio::test]
            async fn test_get_order() {
                let server = make_server().await;
                let created = create_order(&server, &dine_in_body(2, "2025-01-15")).await;
                let order_id = created["orderId"].as_str().unwrap();

                let response = server
                    .get(&format!("/api/orders/{}", order_id))
                    .authorization_bearer(admin_token())
                    .await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["orderId"], order_id);
                assert_eq!(body["displayId"], "B00000001");
            }

            #[tokio::test]
            async fn test_get_order_errors() {
                let server = make_server().await;

                let response = server
                    .get(&format!("/api/orders/{}", uuid::Uuid::new_v4()))
                    .authorization_bearer(admin_token())
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);

                let response = server
                    .get("/api/orders/not-a-valid-uuid")
                    .authorization_bearer(admin_token())
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_update_order() {
                let server = make_server().await;
                let created = create_order(&server, &dine_in_body(2, "2025-01-15")).await;
                let path = format!("/api/orders/{}", created["orderId"].as_str().unwrap());

                let mut update = dine_in_body(5, "2025-01-16");
                update["orderItems"] = json!([
                    { "itemId": "3003", "itemName": "Soup", "category": "Starters", "quantity": 3, "price": 6.0 }
                ]);
                let response = server
                    .put(&path)
                    .authorization_bearer(admin_token())
                    .json(&update)
                    .await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["message"], "Order updated successfully");
                assert_eq!(body["order"]["tableNumber"], 5);
                assert_eq!(body["order"]["orderDate"], "2025-01-16");
                assert_eq!(body["order"]["displayId"], "B00000001");
                assert_eq!(body["order"]["orderItems"][0]["itemId"], "3003");
            }

            #[tokio::test]
            async fn test_update_order_rules() {
                let server = make_server().await;
                let created = create_order(&server, &dine_in_body(2, "2025-01-15")).await;
                let path = format!("/api/orders/{}", created["orderId"].as_str().unwrap());

                let mut no_items = dine_in_body(2, "2025-01-15");
                no_items["orderItems"] = json!([]);
                let response = server
                    .put(&path)
                    .authorization_bearer(admin_token())
                    .json(&no_items)
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(
                    response.json::<Value>()["message"],
                    "Please select at least one item to update the order."
                );

                let mut no_table = dine_in_body(2, "2025-01-15");
                no_table.as_object_mut().unwrap().remove("tableNumber");
                let response = server
                    .put(&path)
                    .authorization_bearer(admin_token())
                    .json(&no_table)
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(
                    response.json::<Value>()["message"],
                    "Table number is required for dine-in orders."
                );

                let response = server
                    .put(&format!("/api/orders/{}", uuid::Uuid::new_v4()))
                    .authorization_bearer(admin_token())
                    .json(&dine_in_body(2, "2025-01-15"))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_delete_order() {
                let server = make_server().await;
                let created = create_order(&server, &dine_in_body(2, "2025-01-15")).await;
                let path = format!("/api/orders/{}", created["orderId"].as_str().unwrap());

                let response = server.delete(&path).authorization_bearer(admin_token()).await;
                response.assert_status_ok();
                assert_eq!(response.json::<Value>()["message"], "Order deleted successfully");

                let response = server.get(&path).authorization_bearer(admin_token()).await;
                response.assert_status(StatusCode::NOT_FOUND);

                let response = server.delete(&path).authorization_bearer(admin_token()).await;
                response.assert_status(StatusCode::NOT_FOUND);
            }

            // ==============================================================
            // Orders: status and payment
            // ==============================================================

            #[tokio::test]
            async fn test_status_and_payment_lifecycle() {
                let server = make_server().await;
                let created = create_order(&server, &dine_in_body(9, "2025-01-15")).await;
                let path = format!("/api/orders/{}", created["orderId"].as_str().unwrap());

                // completing requires a payment method
                let response = server
                    .put(&format!("{}/status", path))
                    .authorization_bearer(admin_token())
                    .json(&json!({ "status": "COMPLETED" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(
                    response.json::<Value>()["message"],
                    "Order payment method is missing. Please add a payment method before completing the order."
                );

                let response = server
                    .put(&format!("{}/paymentMethod", path))
                    .authorization_bearer(admin_token())
                    .json(&json!({ "paymentMethod": "Cash" }))
                    .await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["message"], "Order payment updated successfully");
                assert_eq!(body["order"]["paymentMethod"], "Cash");

                let response = server
                    .put(&format!("{}/status", path))
                    .authorization_bearer(admin_token())
                    .json(&json!({ "status": "COMPLETED" }))
                    .await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["message"], "Order status updated successfully");
                assert_eq!(body["order"]["status"], "COMPLETED");

                // completed orders keep their payment method
                let response = server
                    .put(&format!("{}/paymentMethod", path))
                    .authorization_bearer(admin_token())
                    .json(&json!({ "paymentMethod": "Card" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(
                    response.json::<Value>()["message"],
                    "Order status is completed, so unable to add payment method."
                );

                // and no longer occupy their table
                create_order(&server, &dine_in_body(9, "2025-01-15")).await;
            }

            #[tokio::test]
            async fn test_unknown_status_rejected() {
                let server = make_server().await;
                let created = create_order(&server, &dine_in_body(9, "2025-01-15")).await;
                let path = format!("/api/orders/{}/status", created["orderId"].as_str().unwrap());

                let response = server
                    .put(&path)
                    .authorization_bearer(admin_token())
                    .json(&json!({ "status": "SHIPPED" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            // ==============================================================
            // Orders: listing and search
            // ==============================================================

            #[tokio::test]
            async fn test_list_orders_empty_is_not_found() {
                let server = make_server().await;

                let response = server.get("/api/orders").authorization_bearer(admin_token()).await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["message"], "No orders found");
            }

            #[tokio::test]
            async fn test_list_orders_paginates_newest_first() {
                let server = make_server().await;
                for table in 1..=3 {
                    create_order(&server, &dine_in_body(table, "2025-01-15")).await;
                }

                let response = server
                    .get("/api/orders?currentPage=1&pageSize=2")
                    .authorization_bearer(admin_token())
                    .await;
                response.assert_status_ok();
                let body: Value = response.json();
                let orders = body["orders"].as_array().unwrap();
                assert_eq!(orders.len(), 2);
                assert_eq!(orders[0]["displayId"], "B00000003");
                assert_eq!(orders[1]["displayId"], "B00000002");
                assert_eq!(body["pagination"]["totalCount"], 3);
                assert_eq!(body["pagination"]["currentPage"], 1);
                assert_eq!(body["pagination"]["pageSize"], 2);
            }

            #[tokio::test]
            async fn test_orders_listing_on_empty_store() {
                let server = make_server().await;

                let response = server
                    .post("/api/orders-listing")
                    .authorization_bearer(admin_token())
                    .json(&json!({ "search": "paymentMethod:Cash" }))
                    .await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["orders"], json!([]));
                assert_eq!(body["pagination"]["totalCount"], 0);
                assert_eq!(body["totalPrice"], 0.0);
            }

            #[tokio::test]
            async fn test_orders_listing_search() {
                let server = make_server().await;
                let cash = create_order(&server, &dine_in_body(1, "2025-01-15")).await;
                create_order(&server, &pickup_body("2025-01-16")).await;
                create_order(&server, &pickup_body("2025-02-20")).await;

                server
                    .put(&format!("/api/orders/{}/paymentMethod", cash["orderId"].as_str().unwrap()))
                    .authorization_bearer(admin_token())
                    .json(&json!({ "paymentMethod": "Cash" }))
                    .await
                    .assert_status_ok();

                let search = |query: &'static str| {
                    server
                        .post("/api/orders-listing")
                        .authorization_bearer(admin_token())
                        .json(&json!({ "search": query }))
                };

                let body: Value = search("paymentMethod:cash").await.json();
                assert_eq!(body["pagination"]["totalCount"], 1);
                assert_eq!(body["orders"][0]["displayId"], "B00000001");
                assert_eq!(body["totalPrice"], 24.5);

                let body: Value = search("dateRange:2025-01-01 TO 2025-01-31 AND orderType:pickup")
                    .await
                    .json();
                assert_eq!(body["pagination"]["totalCount"], 1);
                assert_eq!(body["orders"][0]["displayId"], "B00000002");

                let body: Value = search("nonsense:value").await.json();
                assert_eq!(body["pagination"]["totalCount"], 3);
                assert_eq!(body["totalPrice"], 73.5);
            }

            #[tokio::test]
            async fn test_orders_listing_without_search() {
                let server = make_server().await;
                create_order(&server, &pickup_body("2025-01-16")).await;

                let response = server
                    .post("/api/orders-listing?currentPage=1&pageSize=5")
                    .authorization_bearer(admin_token())
                    .json(&json!({}))
                    .await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["pagination"]["totalCount"], 1);
                assert_eq!(body["pagination"]["pageSize"], 5);
            }

            #[tokio::test]
            async fn test_orders_listing_without_body() {
                let server = make_server().await;
                create_order(&server, &pickup_body("2025-01-16")).await;
                create_order(&server, &pickup_body("2025-01-17")).await;

                let response = server
                    .post("/api/orders-listing")
                    .authorization_bearer(admin_token())
                    .await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["pagination"]["totalCount"], 2);

                let response = server
                    .post("/api/orders-listing")
                    .authorization_bearer(admin_token())
                    .text("{broken")
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            // ==============================================================
            // Menu
            // ==============================================================

            fn menu_body(ids: &[&str]) -> Value {
                let items: Vec<Value> = ids
                    .iter()
                    .map(|id| json!({ "itemId": id, "itemName": "Dish", "price": 9.5, "category": "Main Course" }))
                    .collect();
                json!({ "menuItems": items })
            }

            #[tokio::test]
            async fn test_menu_crud() {
                let server = make_server().await;

                let response = server.get("/api/menu").await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["message"], "No menu found");

                let response = server
                    .post("/api/menu")
                    .authorization_bearer(admin_token())
                    .json(&menu_body(&["1001", "1002"]))
                    .await;
                response.assert_status(StatusCode::CREATED);
                assert_eq!(response.json::<Value>()["message"], "Menu items created successfully");

                let response = server.get("/api/menu").await;
                response.assert_status_ok();
                assert_eq!(response.json::<Value>().as_array().unwrap().len(), 2);

                let response = server
                    .put("/api/menu/1001")
                    .authorization_bearer(admin_token())
                    .json(&json!({ "itemName": "Big Dish", "price": 12.0, "category": "Specials" }))
                    .await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["message"], "Menu item updated successfully");
                assert_eq!(body["menuItem"]["price"], 12.0);
                assert_eq!(body["menuItem"]["itemId"], "1001");

                let response = server.delete("/api/menu/1002").authorization_bearer(admin_token()).await;
                response.assert_status_ok();
                assert_eq!(response.json::<Value>()["message"], "Menu item deleted successfully");

                let response = server.delete("/api/menu/1002").authorization_bearer(admin_token()).await;
                response.assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_menu_rejects_duplicates_and_empty_batches() {
                let server = make_server().await;
                server
                    .post("/api/menu")
                    .authorization_bearer(admin_token())
                    .json(&menu_body(&["1001"]))
                    .await
                    .assert_status(StatusCode::CREATED);

                let response = server
                    .post("/api/menu")
                    .authorization_bearer(admin_token())
                    .json(&menu_body(&["1001"]))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(
                    response.json::<Value>()["message"],
                    "Item ID 1001 already exists. Please use a unique ID."
                );

                let response = server
                    .post("/api/menu")
                    .authorization_bearer(admin_token())
                    .json(&json!({ "menuItems": [] }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            // ==============================================================
            // Reservations and categories
            // ==============================================================

            #[tokio::test]
            async fn test_reservations_are_public() {
                let server = make_server().await;

                let response = server.get("/api/reservations").await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["message"], "No reservation found");

                let response = server
                    .post("/api/reservations")
                    .json(&json!({
                        "bookingDate": "2025-03-01",
                        "bookingName": "Alice",
                        "numberOfPeople": 4,
                        "bookingTime": "19:30",
                        "phoneNumber": "+31 6 1234 5678"
                    }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(body["message"], "Booking created successfully");
                assert_eq!(body["booking"]["status"], true);
                let booking_id = body["booking"]["bookingId"].clone();

                let response = server.get("/api/reservations").await;
                response.assert_status_ok();
                let list: Value = response.json();
                assert_eq!(list[0]["id"], booking_id);
                assert_eq!(list[0]["numberOfPeople"], 4);
            }

            #[tokio::test]
            async fn test_reservation_validation() {
                let server = make_server().await;

                let response = server
                    .post("/api/reservations")
                    .json(&json!({
                        "bookingDate": "2025-03-01",
                        "numberOfPeople": 0,
                        "bookingTime": "19:30"
                    }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_categories() {
                let server = make_server().await;

                let response = server.get("/api/category").await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["message"], "No category found");

                let response = server
                    .post("/api/category")
                    .authorization_bearer(admin_token())
                    .json(&json!({ "categoryId": "starters", "categoryName": "Starters" }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(body["message"], "Category created successfully");
                assert_eq!(body["category"]["categoryId"], "starters");

                let response = server.get("/api/category").await;
                response.assert_status_ok();
                assert_eq!(response.json::<Value>().as_array().unwrap().len(), 1);
            }

            // ==============================================================
            // Auth
            // ==============================================================

            #[tokio::test]
            async fn test_admin_routes_require_token() {
                let server = make_server().await;

                let response = server.get("/api/orders").await;
                response.assert_status(StatusCode::UNAUTHORIZED);
                assert_eq!(
                    response.json::<Value>()["message"],
                    "Unauthorized access, token required"
                );

                let response = server
                    .post("/api/orders")
                    .authorization_bearer("wrong-token")
                    .json(&dine_in_body(1, "2025-01-15"))
                    .await;
                response.assert_status(StatusCode::UNAUTHORIZED);
                assert_eq!(response.json::<Value>()["message"], "Invalid or expired token");

                let response = server
                    .post("/api/category")
                    .json(&json!({ "categoryId": "starters" }))
                    .await;
                response.assert_status(StatusCode::UNAUTHORIZED);
            }

            #[tokio::test]
            async fn test_login_issues_a_working_token() {
                let server = build_test_server_with_admin($storage_factory).await;

                let response = server
                    .post("/api/auth/login")
                    .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
                    .await;
                response.assert_status_ok();
                let token = response.json::<Value>()["token"].as_str().unwrap().to_string();

                let claims = test_jwt().verify(&token).unwrap();
                assert_eq!(claims.exp - claims.iat, 4 * 3600);

                let response = server
                    .post("/api/category")
                    .authorization_bearer(&token)
                    .json(&json!({ "categoryId": "starters" }))
                    .await;
                response.assert_status(StatusCode::CREATED);

                // the short alias answers the same way
                server
                    .post("/api/login")
                    .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
                    .await
                    .assert_status_ok();
            }

            #[tokio::test]
            async fn test_login_rejections() {
                let server = build_test_server_with_admin($storage_factory).await;

                let response = server
                    .post("/api/auth/login")
                    .json(&json!({ "username": "nobody", "password": ADMIN_PASSWORD }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["message"], "Invalid username");

                let response = server
                    .post("/api/auth/login")
                    .json(&json!({ "username": ADMIN_USERNAME, "password": "wrong" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["message"], "Invalid password");
                assert_eq!(response.json::<Value>()["code"], "INVALID_CREDENTIALS");

                let response = server
                    .post("/api/auth/login")
                    .json(&json!({ "username": " " }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
            }

            #[tokio::test]
            async fn test_expired_and_foreign_tokens_are_rejected() {
                let server = make_server().await;

                let expired = test_jwt()
                    .issue_at("test-admin", chrono::Utc::now() - chrono::Duration::hours(5))
                    .unwrap();
                let response = server.get("/api/orders").authorization_bearer(expired).await;
                response.assert_status(StatusCode::UNAUTHORIZED);
                assert_eq!(response.json::<Value>()["message"], "Invalid or expired token");

                let foreign = restro::core::JwtAuthProvider::new("another-secret")
                    .issue("test-admin")
                    .unwrap();
                let response = server.get("/api/orders").authorization_bearer(foreign).await;
                response.assert_status(StatusCode::UNAUTHORIZED);
            }

            // ==============================================================
            // Bills and export
            // ==============================================================

            fn header_text(response: &axum_test::TestResponse, name: axum::http::HeaderName) -> String {
                response.header(name).to_str().unwrap().to_string()
            }

            #[tokio::test]
            async fn test_generate_bill() {
                let server = make_server().await;
                let order = create_order(&server, &dine_in_body(4, "2025-01-15")).await;
                let path = format!("/api/generate-bill/{}", order["orderId"].as_str().unwrap());

                server.get(&path).await.assert_status(StatusCode::UNAUTHORIZED);

                let response = server.get(&path).authorization_bearer(admin_token()).await;
                response.assert_status_ok();
                assert_eq!(
                    header_text(&response, axum::http::header::CONTENT_TYPE),
                    "application/pdf"
                );
                assert!(
                    header_text(&response, axum::http::header::CONTENT_DISPOSITION)
                        .contains("bill_B00000001.pdf")
                );
                assert!(response.as_bytes().starts_with(b"%PDF"));
            }

            #[tokio::test]
            async fn test_generate_bill_errors() {
                let server = make_server().await;

                let response = server
                    .get(&format!("/api/generate-bill/{}", uuid::Uuid::new_v4()))
                    .authorization_bearer(admin_token())
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);

                let response = server
                    .get("/api/generate-bill/not-a-uuid")
                    .authorization_bearer(admin_token())
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["code"], "INVALID_UUID");
            }

            #[tokio::test]
            async fn test_generate_bill_for_person() {
                let server = make_server().await;
                let order = create_order(&server, &dine_in_body(4, "2025-01-15")).await;
                let order_id = order["orderId"].as_str().unwrap();

                let response = server
                    .post("/api/generate-bill-for-person")
                    .authorization_bearer(admin_token())
                    .json(&json!({
                        "orderId": order_id,
                        "personIndex": 1,
                        "personItems": [
                            { "itemId": "2002", "itemName": "Lemonade", "quantity": 1, "price": 4.5 }
                        ]
                    }))
                    .await;
                response.assert_status_ok();
                assert_eq!(
                    header_text(&response, axum::http::header::CONTENT_TYPE),
                    "application/pdf"
                );
                assert_eq!(
                    header_text(&response, axum::http::header::CONTENT_DISPOSITION),
                    "attachment; filename=bill_person_2_B00000001.pdf"
                );
                assert!(response.as_bytes().starts_with(b"%PDF"));
            }

            #[tokio::test]
            async fn test_generate_bill_for_person_errors() {
                let server = make_server().await;

                // a missing order wins over an empty item list
                let response = server
                    .post("/api/generate-bill-for-person")
                    .authorization_bearer(admin_token())
                    .json(&json!({ "orderId": uuid::Uuid::new_v4(), "personIndex": 0, "personItems": [] }))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);

                let order = create_order(&server, &dine_in_body(4, "2025-01-15")).await;
                let response = server
                    .post("/api/generate-bill-for-person")
                    .authorization_bearer(admin_token())
                    .json(&json!({ "orderId": order["orderId"], "personIndex": 0, "personItems": [] }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["message"], "No items selected for this person");
                assert_eq!(body["details"]["field"], "personItems");
            }

            #[tokio::test]
            async fn test_export_orders() {
                let server = make_server().await;

                let response = server
                    .get("/api/orders/exportData")
                    .authorization_bearer(admin_token())
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["message"], "No orders found to export.");

                create_order(&server, &dine_in_body(4, "2025-01-15")).await;
                create_order(&server, &pickup_body("2025-01-16")).await;

                server
                    .get("/api/orders/exportData")
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);

                let response = server
                    .get("/api/orders/exportData")
                    .authorization_bearer(admin_token())
                    .await;
                response.assert_status_ok();
                assert_eq!(
                    header_text(&response, axum::http::header::CONTENT_TYPE),
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                );
                assert_eq!(
                    header_text(&response, axum::http::header::CONTENT_DISPOSITION),
                    "attachment; filename=orders.xlsx"
                );
                assert!(response.as_bytes().starts_with(b"PK"));
            }

            #[tokio::test]
            async fn test_health() {
                let server = make_server().await;

                let response = server.get("/health").await;
                response.assert_status_ok();
                assert_eq!(response.json::<Value>()["status"], "ok");

                server.get("/healthz").await.assert_status_ok();
            }
        }
    };
}
