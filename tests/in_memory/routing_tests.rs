//! In-memory integration tests for routers in front of channels.

use super::helpers::{Behaviour, ProbeHandler, clock, drain, queue, text};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use switchyard::channel::{
    adapters::{ChannelRegistry, SubscribableChannel},
    ports::{MessageChannel, MessageHandler},
};
use switchyard::correlation::{adapters::SequenceSizeCompletion, services::CorrelationHandler};
use switchyard::message::domain::{Message, Payload, PayloadKind};
use switchyard::routing::{
    adapters::{FunctionRoutes, PayloadKindRoutes},
    domain::{Destination, RouterOptions},
    services::RouterBuilder,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn payload_kind_router_splits_traffic(clock: Arc<DefaultClock>) {
    let texts = queue("inbox.text", 4);
    let blobs = queue("inbox.bytes", 4);
    let registry = ChannelRegistry::new();
    registry
        .register(Arc::clone(&texts) as Arc<dyn MessageChannel>)
        .expect("unique");
    registry
        .register(Arc::clone(&blobs) as Arc<dyn MessageChannel>)
        .expect("unique");
    let strategy = PayloadKindRoutes::new()
        .with_route(PayloadKind::Text, Destination::name("text"))
        .with_route(PayloadKind::Bytes, Destination::name("bytes"));
    let router = RouterBuilder::new("by-kind", Arc::new(strategy))
        .with_options(RouterOptions::default().with_prefix("inbox."))
        .with_resolver(Arc::new(registry))
        .build(clock)
        .expect("valid router");

    router.route(&text("hello")).await.expect("text routed");
    router
        .route(&Message::new(Payload::Bytes(vec![0xff]), &DefaultClock))
        .await
        .expect("bytes routed");
    let unroutable = router
        .route(&Message::new(Payload::Json(json!({})), &DefaultClock))
        .await;

    assert_eq!(drain(&texts).await.len(), 1);
    assert_eq!(drain(&blobs).await.len(), 1);
    assert!(unroutable.is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn scatter_gather_rejoins_copies_through_an_aggregator(clock: Arc<DefaultClock>) {
    let gathered = queue("gathered", 4);
    let aggregator = Arc::new(CorrelationHandler::aggregator(
        "gather",
        Arc::clone(&gathered) as Arc<dyn MessageChannel>,
        Arc::new(SequenceSizeCompletion),
        Arc::clone(&clock),
    ));
    let replies = Arc::new(SubscribableChannel::direct("replies"));
    replies.subscribe(aggregator as Arc<dyn MessageHandler>);
    let router = RouterBuilder::new(
        "scatter",
        Arc::new(FunctionRoutes::new(|_: &Message| {
            Value::from(vec!["replies", "replies", "replies"])
        })),
    )
    .with_options(RouterOptions::default().with_apply_sequence(true))
    .with_channel(replies as Arc<dyn MessageChannel>)
    .build(clock)
    .expect("valid router");
    let request = text("quote");

    let sent = router.route(&request).await.expect("scattered");

    assert_eq!(sent, 3);
    let results = drain(&gathered).await;
    let [joined] = results.as_slice() else {
        panic!("expected one gathered result, got {}", results.len());
    };
    assert_eq!(
        joined.correlation_id().map(|id| id.as_str().to_owned()),
        Some(request.id().to_string())
    );
    assert_eq!(
        joined.payload().as_list().map(<[Payload]>::len),
        Some(3)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn router_subscribed_to_a_channel_forwards_to_handlers(clock: Arc<DefaultClock>) {
    let audit = Arc::new(SubscribableChannel::direct("audit"));
    let auditor = ProbeHandler::new("auditor", Behaviour::Accept);
    audit.subscribe(Arc::clone(&auditor) as Arc<dyn MessageHandler>);
    let router = RouterBuilder::new(
        "audit-router",
        Arc::new(FunctionRoutes::new(|_: &Message| json!("audit"))),
    )
    .with_channel(audit as Arc<dyn MessageChannel>)
    .build(clock)
    .expect("valid router");
    let inbound = SubscribableChannel::direct("inbound");
    inbound.subscribe(Arc::new(router));

    assert!(inbound.send(text("entry"), None).await.expect("routed"));

    assert_eq!(auditor.received().len(), 1);
}
