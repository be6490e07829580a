//! Macro-generated test suite for the menu, booking and category services.
//!
//! # Generated Tests
//!
//! ## Menu
//! - `test_menu_create_and_find`: find by `itemId`, unknown IDs return None
//! - `test_menu_list_keeps_creation_order`
//! - `test_menu_update`: update existing, update unknown returns None
//! - `test_menu_delete`: delete returns the removed item, then it is gone
//!
//! ## Bookings / Categories
//! - `test_bookings_create_and_list`
//! - `test_categories_create_and_list`
//! - `test_empty_lists`

/// Generate conformance tests for `MenuService`, `BookingService` and `CategoryService`.
///
/// Each factory must evaluate to a fresh, empty service.
#[macro_export]
macro_rules! catalog_service_tests {
    (menu: $menu:expr, bookings: $bookings:expr, categories: $categories:expr $(,)?) => {
        mod catalog_service_contract_tests {
            use super::*;
            use restro::core::service::{BookingService, CategoryService, MenuService};

            // ==================================================================
            // Menu
            // ==================================================================

            #[tokio::test]
            async fn test_menu_create_and_find() {
                let service = $menu;
                let item = menu_item("1001", 12.5, "Main Course");
                service.create(item.clone()).await.unwrap();

                let found = service.find_by_item_id("1001").await.unwrap().unwrap();
                assert_eq!(found.id, item.id);
                assert_eq!(found.item_name.as_deref(), Some("Dish 1001"));
                assert_eq!(found.price, 12.5);
                assert_eq!(found.category, "Main Course");

                assert!(service.find_by_item_id("9999").await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_menu_list_keeps_creation_order() {
                let service = $menu;
                for (i, id) in ["1003", "1001", "1002"].iter().enumerate() {
                    let mut item = menu_item(id, 5.0, "Drinks");
                    item.created_at = base_time() + chrono::Duration::seconds(i as i64);
                    service.create(item).await.unwrap();
                }

                let items = service.list().await.unwrap();
                let ids: Vec<&str> = items.iter().map(|i| i.item_id.as_str()).collect();
                assert_eq!(ids, vec!["1003", "1001", "1002"]);
            }

            #[tokio::test]
            async fn test_menu_update() {
                let service = $menu;
                let mut item = service
                    .create(menu_item("1001", 12.5, "Main Course"))
                    .await
                    .unwrap();

                item.price = 14.0;
                item.category = "Specials".to_string();
                assert!(service.update(item).await.unwrap().is_some());

                let stored = service.find_by_item_id("1001").await.unwrap().unwrap();
                assert_eq!(stored.price, 14.0);
                assert_eq!(stored.category, "Specials");

                let ghost = menu_item("4040", 1.0, "Nowhere");
                assert!(service.update(ghost).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_menu_delete() {
                let service = $menu;
                service.create(menu_item("1001", 12.5, "Main Course")).await.unwrap();

                let deleted = service.delete("1001").await.unwrap();
                assert_eq!(deleted.map(|i| i.item_id), Some("1001".to_string()));
                assert!(service.find_by_item_id("1001").await.unwrap().is_none());
                assert!(service.delete("1001").await.unwrap().is_none());
            }

            // ==================================================================
            // Bookings / Categories
            // ==================================================================

            #[tokio::test]
            async fn test_bookings_create_and_list() {
                let service = $bookings;
                let first = service.create(booking("2025-03-01", 4)).await.unwrap();
                service.create(booking("2025-03-02", 2)).await.unwrap();

                let all = service.list().await.unwrap();
                assert_eq!(all.len(), 2);
                let stored = all.iter().find(|b| b.id == first.id).unwrap();
                assert_eq!(stored.number_of_people, 4);
                assert_eq!(stored.booking_date.to_string(), "2025-03-01");
                assert_eq!(stored.booking_time, "19:30");
            }

            #[tokio::test]
            async fn test_categories_create_and_list() {
                let service = $categories;
                service.create(category("starters")).await.unwrap();
                service.create(category("desserts")).await.unwrap();

                let ids: Vec<String> = service
                    .list()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|c| c.category_id)
                    .collect();
                assert_eq!(ids.len(), 2);
                assert!(ids.contains(&"starters".to_string()));
                assert!(ids.contains(&"desserts".to_string()));
            }

            #[tokio::test]
            async fn test_empty_lists() {
                assert!($menu.list().await.unwrap().is_empty());
                assert!($bookings.list().await.unwrap().is_empty());
                assert!($categories.list().await.unwrap().is_empty());
            }
        }
    };
}
