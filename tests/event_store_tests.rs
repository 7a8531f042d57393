//! Event Store Integration Tests
//!
//! Exercises the complete flow through the public API:
//! - Recording events and deriving metrics, ledger and profiles
//! - FIFO retention
//! - Persistence across store instances via FileStorage
//! - Serialized concurrent writers

use std::fs;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use storefront_events::{
    EventFilter, EventStore, EventType, FileStorage, MemoryStorage, ProductAction,
    ProductEventOptions, PurchaseOptions, SaleKind, StoreConfig, TradeAction,
};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn test_store_path() -> std::path::PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::path::PathBuf::from(format!(
        "target/test_event_store_{}_{}/event-store.json",
        std::process::id(),
        id
    ))
}

fn cleanup(path: &std::path::Path) {
    if let Some(dir) = path.parent() {
        let _ = fs::remove_dir_all(dir);
    }
}

fn memory_store() -> EventStore {
    EventStore::new(Box::new(MemoryStorage::new()))
}

#[test]
fn test_purchase_scenario_end_to_end() {
    let store = memory_store();

    store
        .record_purchase("tee-1", "Tee", "neo", 149.0, PurchaseOptions::default())
        .expect("purchase should be recorded");

    let metrics = store.get_metrics().expect("metrics");
    assert_eq!(metrics.total_sales, 1);
    assert_eq!(metrics.total_revenue, 149.0);
    assert_eq!(metrics.average_transaction_value, 149.0);

    let profile = store.get_collector_profile("neo").expect("profile");
    assert_eq!(profile.items_owned, vec!["Tee".to_string()]);
    assert_eq!(profile.total_spent, 149.0);

    let ledger = store.get_inventory_ledger().expect("ledger");
    assert!(ledger["tee-1"].sold);
    assert_eq!(ledger["tee-1"].current_owner.as_deref(), Some("neo"));
}

#[test]
fn test_append_only_monotonicity() {
    let store = memory_store();

    let mut recorded_ids = Vec::new();
    for _ in 0..20 {
        let event = store.track_page_view(None).expect("append");
        recorded_ids.push(event.id);
    }

    let events = store.get_events(&EventFilter::new()).expect("events");
    assert_eq!(events.len(), 20);

    // Every previously returned id is still present, in order
    let log_ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    for (i, id) in recorded_ids.iter().enumerate() {
        assert_eq!(log_ids[i], id);
    }
}

#[test]
fn test_fifo_eviction_drops_oldest() {
    let store = EventStore::with_config(
        Box::new(MemoryStorage::new()),
        StoreConfig::new().with_max_events(10),
    );

    let mut ids = Vec::new();
    for _ in 0..15 {
        ids.push(store.track_visitor(None).expect("append").id);
    }

    let events = store.get_events(&EventFilter::new()).expect("events");
    assert_eq!(events.len(), 10);

    // The five oldest are gone, the ten newest remain in order
    let remaining: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(remaining, ids[5..].iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn test_filter_composition() {
    let store = memory_store();

    for i in 0..8 {
        store
            .track_product_event(
                ProductAction::Click,
                format!("p{}", i),
                format!("Product {}", i),
                ProductEventOptions::default(),
            )
            .expect("click");
        store.track_page_view(None).expect("page view");
    }

    let filter = EventFilter::new()
        .with_type(EventType::ProductClick)
        .with_limit(5);
    let events = store.get_events(&filter).expect("events");

    assert_eq!(events.len(), 5);
    assert!(events.iter().all(|e| e.event_type() == EventType::ProductClick));
    // Trailing N, oldest of the kept set first
    let ids: Vec<&str> = events.iter().filter_map(|e| e.payload.product_id()).collect();
    assert_eq!(ids, vec!["p3", "p4", "p5", "p6", "p7"]);
}

#[test]
fn test_resale_flow_and_classification() {
    let store = memory_store();

    store
        .record_purchase("tee-1", "Tee", "neo", 149.0, PurchaseOptions::default())
        .expect("initial sale");
    store
        .record_purchase(
            "tee-1",
            "Tee",
            "trinity",
            200.0,
            PurchaseOptions {
                seller_nickname: Some("neo".to_string()),
                original_price: Some(149.0),
                ..Default::default()
            },
        )
        .expect("resale");

    let history = store.get_transaction_history(Some("tee-1")).expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].kind, SaleKind::InitialSale);
    assert_eq!(history[1].kind, SaleKind::Resale);
    assert_eq!(history[1].seller.as_deref(), Some("neo"));

    let metrics = store.get_metrics().expect("metrics");
    assert_eq!(metrics.resale_volume, 1);
    assert_eq!(metrics.average_price_appreciation, 51.0);

    // neo bought at 149 and sold at 200
    let profile = store.get_collector_profile("neo").expect("profile");
    assert_eq!(profile.net_position, 51.0);
    assert!(profile.items_owned.is_empty());
    assert_eq!(profile.items_sold, 1);
    assert_eq!(profile.timeline[0].action, TradeAction::Sold);
}

#[test]
fn test_collector_profile_net_position() {
    let store = memory_store();

    store
        .record_purchase("p1", "One", "neo", 100.0, PurchaseOptions::default())
        .expect("buy one");
    store
        .record_purchase("p2", "Two", "neo", 150.0, PurchaseOptions::default())
        .expect("buy two");
    store
        .record_purchase(
            "p1",
            "One",
            "trinity",
            200.0,
            PurchaseOptions {
                seller_nickname: Some("neo".to_string()),
                ..Default::default()
            },
        )
        .expect("sell one");

    let profile = store.get_collector_profile("neo").expect("profile");
    assert_eq!(profile.total_spent, 250.0);
    assert_eq!(profile.total_earned, 200.0);
    assert_eq!(profile.net_position, -50.0);
    assert_eq!(profile.items_owned, vec!["Two".to_string()]);
}

#[test]
fn test_file_backed_store_survives_reopen() {
    let path = test_store_path();

    {
        let store = EventStore::new(Box::new(FileStorage::new(&path)));
        store
            .record_purchase("tee-1", "Tee", "neo", 149.0, PurchaseOptions::default())
            .expect("purchase");
        store.track_page_view(Some("sess-1".to_string())).expect("page view");
    }

    // A fresh store instance over the same file sees everything
    let reopened = EventStore::new(Box::new(FileStorage::new(&path)));
    let events = reopened.get_events(&EventFilter::new()).expect("events");
    assert_eq!(events.len(), 2);

    let metrics = reopened.get_metrics().expect("metrics");
    assert_eq!(metrics.total_sales, 1);
    assert_eq!(metrics.total_page_views, 1);

    let ledger = reopened.get_inventory_ledger().expect("ledger");
    assert_eq!(ledger["tee-1"].current_owner.as_deref(), Some("neo"));

    cleanup(&path);
}

#[test]
fn test_lazy_initialization_on_missing_file() {
    let path = test_store_path();

    let store = EventStore::new(Box::new(FileStorage::new(&path)));
    assert!(store.get_events(&EventFilter::new()).expect("events").is_empty());
    assert_eq!(store.get_metrics().expect("metrics").total_sales, 0);

    // First write materializes the document
    store.track_visitor(None).expect("visitor");
    assert!(path.exists());

    cleanup(&path);
}

#[test]
fn test_concurrent_writers_lose_no_events() {
    let store = Arc::new(memory_store());

    let mut handles = Vec::new();
    for t in 0..8 {
        let store = Arc::clone(&store);
        handles.push(std::thread::spawn(move || {
            for i in 0..5 {
                store
                    .track_product_event(
                        ProductAction::View,
                        format!("p{}-{}", t, i),
                        "Product",
                        ProductEventOptions::default(),
                    )
                    .expect("append");
            }
        }));
    }
    for handle in handles {
        handle.join().expect("writer thread");
    }

    // Writers are serialized: every append survives
    let events = store.get_events(&EventFilter::new()).expect("events");
    assert_eq!(events.len(), 40);

    let metrics = store.get_metrics().expect("metrics");
    assert_eq!(metrics.product_views.len(), 40);
}

#[test]
fn test_product_timeline_reads_across_kinds() {
    let store = memory_store();

    store
        .track_product_event(
            ProductAction::Click,
            "tee-1",
            "Tee",
            ProductEventOptions::default(),
        )
        .expect("click");
    store
        .record_purchase("tee-1", "Tee", "neo", 149.0, PurchaseOptions::default())
        .expect("purchase");

    let timeline = store.get_product_timeline("tee-1").expect("timeline");
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].event_type, EventType::ProductClick);
    assert_eq!(timeline[1].event_type, EventType::PurchaseCompleted);
    assert!(timeline[1].details.contains("neo"));
}
