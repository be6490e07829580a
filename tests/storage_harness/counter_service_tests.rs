//! Macro-generated test suite for the `CounterService` contract.
//!
//! # Generated Tests
//!
//! - `test_first_increment_is_one`: a fresh counter starts at 1
//! - `test_increments_are_sequential`: consecutive calls return 1, 2, 3
//! - `test_counters_are_independent`: two names never share values
//! - `test_concurrent_increments_are_distinct`: N parallel calls return exactly 1..=N
//! - `test_sequencer_formats_values`: display IDs built on the counter are `B` + 8 digits

/// Generate a `CounterService` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty `impl CounterService + 'static`.
#[macro_export]
macro_rules! counter_service_tests {
    ($factory:expr) => {
        mod counter_service_contract_tests {
            use super::*;
            use restro::core::service::CounterService;
            use restro::core::DisplayIdSequencer;
            use std::collections::HashSet;
            use std::sync::Arc;

            #[tokio::test]
            async fn test_first_increment_is_one() {
                let service = $factory;
                assert_eq!(service.increment("orderId").await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_increments_are_sequential() {
                let service = $factory;
                let values = vec![
                    service.increment("orderId").await.unwrap(),
                    service.increment("orderId").await.unwrap(),
                    service.increment("orderId").await.unwrap(),
                ];
                assert_eq!(values, vec![1, 2, 3]);
            }

            #[tokio::test]
            async fn test_counters_are_independent() {
                let service = $factory;
                service.increment("orderId").await.unwrap();
                service.increment("orderId").await.unwrap();

                assert_eq!(service.increment("invoiceId").await.unwrap(), 1);
                assert_eq!(service.increment("orderId").await.unwrap(), 3);
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
            async fn test_concurrent_increments_are_distinct() {
                const TASKS: u64 = 32;
                let service: Arc<dyn CounterService> = Arc::new($factory);

                let handles: Vec<_> = (0..TASKS)
                    .map(|_| {
                        let service = service.clone();
                        tokio::spawn(async move { service.increment("orderId").await.unwrap() })
                    })
                    .collect();

                let mut seen = HashSet::new();
                for handle in handles {
                    let value = handle.await.unwrap();
                    assert!(seen.insert(value), "value {} handed out twice", value);
                }

                let expected: HashSet<u64> = (1..=TASKS).collect();
                assert_eq!(seen, expected);
            }

            #[tokio::test]
            async fn test_sequencer_formats_values() {
                let sequencer = DisplayIdSequencer::new(Arc::new($factory));

                let first = sequencer.next_display_id().await.unwrap();
                let second = sequencer.next_display_id().await.unwrap();

                assert_eq!(first.as_str(), "B00000001");
                assert_eq!(second.as_str(), "B00000002");
            }
        }
    };
}
