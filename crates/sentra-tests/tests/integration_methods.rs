// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Method service integration tests: object wiring, argument validation,
//! domain failures, and event-generating handlers.

use std::sync::Arc;
use std::time::Duration;

use sentra_core::ids::{ObjectId, ReferenceTypeId, TypeDefinitionId};
use sentra_core::{AttributeId, NodeId, QualifiedName, StatusCode, Variant};
use sentra_monitor::{ItemNotification, MonitoredItemHandle, MonitoredItemRequest};
use sentra_server::{GenerateEventMethod, Server, SqrtMethod};
use sentra_space::{AttributeContext, MethodNodeBuilder};
use sentra_tests::common::{self, add_object, test_server};

fn sqrt_fixture() -> (Server, NodeId, NodeId) {
    let server = test_server();
    let object_id = add_object(server.manager(), "Methods");
    let method_id = SqrtMethod::register(server.manager(), &object_id).expect("sqrt registration");
    (server, object_id, method_id)
}

async fn recv_with_timeout(handle: &mut MonitoredItemHandle) -> Option<ItemNotification> {
    tokio::time::timeout(Duration::from_secs(1), handle.notifications.recv())
        .await
        .ok()
        .flatten()
}

// =============================================================================
// Dispatch through the server boundary
// =============================================================================

#[tokio::test]
async fn test_sqrt_call_through_server() {
    common::init_test_logging();
    let (server, object_id, method_id) = sqrt_fixture();
    let ctx = AttributeContext::anonymous();

    let result = server.call(&ctx, &object_id, &method_id, &[Variant::Double(16.0)]);
    assert!(result.is_good());
    assert_eq!(result.input_argument_results, vec![StatusCode::GOOD]);
    assert_eq!(result.output_arguments, vec![Variant::Double(4.0)]);
}

#[tokio::test]
async fn test_call_requires_component_relationship() {
    common::init_test_logging();
    let (server, _object_id, method_id) = sqrt_fixture();
    let ctx = AttributeContext::anonymous();

    // The Objects folder exists but does not own the method.
    let result = server.call(
        &ctx,
        &ObjectId::OBJECTS_FOLDER,
        &method_id,
        &[Variant::Double(16.0)],
    );
    assert_eq!(result.status, StatusCode::BAD_METHOD_INVALID);
}

#[tokio::test]
async fn test_call_on_unknown_nodes() {
    common::init_test_logging();
    let (server, object_id, method_id) = sqrt_fixture();
    let ctx = AttributeContext::anonymous();
    let missing = NodeId::string(2, "no-such-node");

    let result = server.call(&ctx, &missing, &method_id, &[]);
    assert_eq!(result.status, StatusCode::BAD_NODE_ID_UNKNOWN);

    let result = server.call(&ctx, &object_id, &missing, &[]);
    assert_eq!(result.status, StatusCode::BAD_NODE_ID_UNKNOWN);
}

// =============================================================================
// Argument validation
// =============================================================================

#[tokio::test]
async fn test_missing_argument_reported_per_position() {
    common::init_test_logging();
    let (server, object_id, method_id) = sqrt_fixture();

    let result = server.call(&AttributeContext::anonymous(), &object_id, &method_id, &[]);
    assert_eq!(result.status, StatusCode::BAD_INVALID_ARGUMENT);
    assert_eq!(
        result.input_argument_results,
        vec![StatusCode::BAD_ARGUMENTS_MISSING]
    );
    assert!(result.output_arguments.is_empty());
}

#[tokio::test]
async fn test_wrong_argument_type_reported_per_position() {
    common::init_test_logging();
    let (server, object_id, method_id) = sqrt_fixture();

    let result = server.call(
        &AttributeContext::anonymous(),
        &object_id,
        &method_id,
        &[Variant::String("sixteen".into())],
    );
    assert_eq!(result.status, StatusCode::BAD_INVALID_ARGUMENT);
    assert_eq!(
        result.input_argument_results,
        vec![StatusCode::BAD_TYPE_MISMATCH]
    );
    assert!(result.output_arguments.is_empty());
}

#[tokio::test]
async fn test_too_many_arguments_rejected_outright() {
    common::init_test_logging();
    let (server, object_id, method_id) = sqrt_fixture();

    let result = server.call(
        &AttributeContext::anonymous(),
        &object_id,
        &method_id,
        &[Variant::Double(16.0), Variant::Double(25.0)],
    );
    assert_eq!(result.status, StatusCode::BAD_TOO_MANY_ARGUMENTS);
    assert!(result.input_argument_results.is_empty());
    assert!(result.output_arguments.is_empty());
}

// =============================================================================
// Domain failures and executability
// =============================================================================

#[tokio::test]
async fn test_negative_input_is_a_domain_failure() {
    common::init_test_logging();
    let (server, object_id, method_id) = sqrt_fixture();

    // Validation passed, so the per-argument results stay good; only the
    // overall status carries the handler's verdict.
    let result = server.call(
        &AttributeContext::anonymous(),
        &object_id,
        &method_id,
        &[Variant::Double(-4.0)],
    );
    assert_eq!(result.status, StatusCode::BAD_OUT_OF_RANGE);
    assert_eq!(result.input_argument_results, vec![StatusCode::GOOD]);
    assert!(result.output_arguments.is_empty());
}

#[tokio::test]
async fn test_handler_less_method_is_not_executable() {
    common::init_test_logging();
    let server = test_server();
    let object_id = add_object(server.manager(), "Methods");
    let method_id = server.manager().new_node_id("Methods/detached");
    server
        .manager()
        .add_node(
            MethodNodeBuilder::new()
                .node_id(method_id.clone())
                .browse_name(QualifiedName::new(2, "detached"))
                .build()
                .unwrap(),
        )
        .unwrap();
    server
        .manager()
        .add_reference(&object_id, ReferenceTypeId::HAS_COMPONENT, &method_id)
        .unwrap();

    let executable = server.read(
        &AttributeContext::anonymous(),
        &method_id,
        AttributeId::Executable,
    );
    assert_eq!(executable.value, Variant::Boolean(false));

    let result = server.call(&AttributeContext::anonymous(), &object_id, &method_id, &[]);
    assert_eq!(result.status, StatusCode::BAD_NOT_EXECUTABLE);
}

#[tokio::test]
async fn test_registered_method_reports_executable() {
    common::init_test_logging();
    let (server, _object_id, method_id) = sqrt_fixture();

    let executable = server.read(
        &AttributeContext::anonymous(),
        &method_id,
        AttributeId::Executable,
    );
    assert_eq!(executable.value, Variant::Boolean(true));
}

// =============================================================================
// Event-generating methods
// =============================================================================

#[tokio::test]
async fn test_generate_event_reaches_event_subscriber() {
    common::init_test_logging();
    let server = test_server();
    let object_id = add_object(server.manager(), "Methods");
    let handler = GenerateEventMethod::new(Arc::clone(server.subscriptions()), ObjectId::SERVER, 2);
    let method_id =
        GenerateEventMethod::register(server.manager(), &object_id, handler).unwrap();

    let mut handles =
        server.create_monitored_items(vec![MonitoredItemRequest::events_of(ObjectId::SERVER)]);
    let mut handle = handles.remove(0).expect("event item creation");

    let result = server.call(
        &AttributeContext::anonymous(),
        &object_id,
        &method_id,
        &[Variant::NodeId(TypeDefinitionId::BASE_EVENT_TYPE)],
    );
    assert!(result.is_good());
    assert!(result.output_arguments.is_empty());

    match recv_with_timeout(&mut handle).await {
        Some(ItemNotification::Event(payload)) => {
            assert_eq!(payload.event_type, TypeDefinitionId::BASE_EVENT_TYPE);
            assert_eq!(payload.source_node, ObjectId::SERVER);
            assert_eq!(payload.message.text, "event message!");
            assert_eq!(payload.severity, 2);
        }
        other => panic!("expected an event notification, got {other:?}"),
    }
}
