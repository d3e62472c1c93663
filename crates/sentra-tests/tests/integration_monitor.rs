// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Monitored-item integration tests: end-to-end notification delivery
//! through the server boundary, mode changes, deletion, and periodic
//! producers feeding the pipeline.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sentra_core::{AccessLevel, AttributeId, NodeId, StatusCode, Variant};
use sentra_monitor::{
    ItemNotification, MonitoredItemHandle, MonitoredItemRequest, MonitoringMode, PeriodicProducer,
};
use sentra_tests::common::{self, add_double_variable, test_server};

async fn recv_with_timeout(handle: &mut MonitoredItemHandle) -> Option<ItemNotification> {
    tokio::time::timeout(Duration::from_secs(1), handle.notifications.recv())
        .await
        .ok()
        .flatten()
}

async fn expect_data_change(handle: &mut MonitoredItemHandle) -> (NodeId, Variant) {
    match recv_with_timeout(handle).await {
        Some(ItemNotification::DataChange { node_id, value }) => (node_id, value.value),
        other => panic!("expected a data change, got {other:?}"),
    }
}

// =============================================================================
// Creation and delivery through the server
// =============================================================================

#[tokio::test]
async fn test_posted_value_reaches_monitored_item() {
    common::init_test_logging();
    let server = test_server();
    let speed = add_double_variable(server.manager(), "Plant/Speed", 0.0, AccessLevel::READ_WRITE);

    let mut handles =
        server.create_monitored_items(vec![MonitoredItemRequest::value_of(speed.clone())]);
    let mut handle = handles.remove(0).expect("item creation");

    assert_eq!(server.post_value(&speed, Variant::Double(42.5)), StatusCode::GOOD);

    let (from, value) = expect_data_change(&mut handle).await;
    assert_eq!(from, speed);
    assert_eq!(value, Variant::Double(42.5));
}

#[tokio::test]
async fn test_create_validates_against_address_space() {
    common::init_test_logging();
    let server = test_server();
    let speed = add_double_variable(server.manager(), "Plant/Speed", 0.0, AccessLevel::READ_WRITE);

    let results = server.create_monitored_items(vec![
        MonitoredItemRequest::value_of(NodeId::string(2, "no-such-node")),
        MonitoredItemRequest {
            attribute: AttributeId::BrowseName,
            ..MonitoredItemRequest::value_of(speed.clone())
        },
        MonitoredItemRequest::value_of(speed),
    ]);

    match &results[0] {
        Err(status) => assert_eq!(*status, StatusCode::BAD_NODE_ID_UNKNOWN),
        Ok(_) => panic!("unknown node accepted"),
    }
    match &results[1] {
        Err(status) => assert_eq!(*status, StatusCode::BAD_ATTRIBUTE_ID_INVALID),
        Ok(_) => panic!("unmonitorable attribute accepted"),
    }
    assert!(results[2].is_ok());
    assert_eq!(server.subscriptions().monitored_count(), 1);
}

#[tokio::test]
async fn test_deleted_item_stops_receiving() {
    common::init_test_logging();
    let server = test_server();
    let speed = add_double_variable(server.manager(), "Plant/Speed", 0.0, AccessLevel::READ_WRITE);

    let mut handles =
        server.create_monitored_items(vec![MonitoredItemRequest::value_of(speed.clone())]);
    let mut handle = handles.remove(0).expect("item creation");

    server.post_value(&speed, Variant::Double(1.0));
    let (_, value) = expect_data_change(&mut handle).await;
    assert_eq!(value, Variant::Double(1.0));

    assert_eq!(
        server.delete_monitored_items(&[handle.id]),
        vec![StatusCode::GOOD]
    );
    server.post_value(&speed, Variant::Double(2.0));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(handle.notifications.try_recv().is_err());
}

// =============================================================================
// Monitoring modes
// =============================================================================

#[tokio::test]
async fn test_disabled_item_silent_while_sibling_reports() {
    common::init_test_logging();
    let server = test_server();
    let speed = add_double_variable(server.manager(), "Plant/Speed", 0.0, AccessLevel::READ_WRITE);

    let mut handles = server.create_monitored_items(vec![
        MonitoredItemRequest::value_of(speed.clone()).with_mode(MonitoringMode::Disabled),
        MonitoredItemRequest::value_of(speed.clone()),
    ]);
    let mut reporting = handles.remove(1).expect("reporting item");
    let mut disabled = handles.remove(0).expect("disabled item");

    server.post_value(&speed, Variant::Double(7.0));

    let (_, value) = expect_data_change(&mut reporting).await;
    assert_eq!(value, Variant::Double(7.0));
    assert!(disabled.notifications.try_recv().is_err());
}

#[tokio::test]
async fn test_monitoring_mode_round_trip() {
    common::init_test_logging();
    let server = test_server();
    let speed = add_double_variable(server.manager(), "Plant/Speed", 0.0, AccessLevel::READ_WRITE);

    let mut handles =
        server.create_monitored_items(vec![MonitoredItemRequest::value_of(speed.clone())]);
    let mut handle = handles.remove(0).expect("item creation");

    assert_eq!(
        server.set_monitoring_mode(&[(handle.id, MonitoringMode::Disabled)]),
        vec![StatusCode::GOOD]
    );
    server.post_value(&speed, Variant::Double(1.0));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(handle.notifications.try_recv().is_err());

    assert_eq!(
        server.set_monitoring_mode(&[(handle.id, MonitoringMode::Reporting)]),
        vec![StatusCode::GOOD]
    );
    server.post_value(&speed, Variant::Double(2.0));
    let (_, value) = expect_data_change(&mut handle).await;
    assert_eq!(value, Variant::Double(2.0));
}

#[tokio::test]
async fn test_modify_sampling_interval() {
    common::init_test_logging();
    let server = test_server();
    let speed = add_double_variable(server.manager(), "Plant/Speed", 0.0, AccessLevel::READ_WRITE);

    let mut handles =
        server.create_monitored_items(vec![MonitoredItemRequest::value_of(speed)]);
    let handle = handles.remove(0).expect("item creation");
    assert_eq!(
        server.subscriptions().sampling_interval(handle.id),
        Some(Duration::from_millis(250))
    );

    assert_eq!(
        server.modify_monitored_items(&[(handle.id, Duration::from_millis(500))]),
        vec![StatusCode::GOOD]
    );
    assert_eq!(
        server.subscriptions().sampling_interval(handle.id),
        Some(Duration::from_millis(500))
    );

    // A deleted item can no longer be modified.
    server.delete_monitored_items(&[handle.id]);
    assert_eq!(server.subscriptions().sampling_interval(handle.id), None);
    assert_eq!(
        server.modify_monitored_items(&[(handle.id, Duration::from_millis(100))]),
        vec![StatusCode::BAD_MONITORED_ITEM_ID_INVALID]
    );
}

// =============================================================================
// Periodic producers
// =============================================================================

#[tokio::test]
async fn test_producer_feeds_monitored_item() {
    common::init_test_logging();
    let server = Arc::new(test_server());
    let speed = add_double_variable(server.manager(), "Plant/Speed", 0.0, AccessLevel::READ_WRITE);

    let mut handles =
        server.create_monitored_items(vec![MonitoredItemRequest::value_of(speed.clone())]);
    let mut handle = handles.remove(0).expect("item creation");

    let tick_server = Arc::clone(&server);
    let tick_node = speed.clone();
    let counter = Arc::new(AtomicU32::new(0));
    let tick_counter = Arc::clone(&counter);
    let producer = PeriodicProducer::spawn("speed-ramp", Duration::from_millis(10), move || {
        let n = tick_counter.fetch_add(1, Ordering::Relaxed);
        let status = tick_server.post_value(&tick_node, Variant::Double(f64::from(n)));
        if status.is_bad() {
            return Err(status);
        }
        Ok(())
    });

    // The drain preserves per-node order, so the ramp arrives in sequence.
    for expected in 0..3 {
        let (_, value) = expect_data_change(&mut handle).await;
        assert_eq!(value, Variant::Double(f64::from(expected)));
    }

    producer.stop().await;
    let posted = counter.load(Ordering::Relaxed);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(counter.load(Ordering::Relaxed), posted);
}
