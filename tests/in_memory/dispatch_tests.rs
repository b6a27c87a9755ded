//! In-memory integration tests for channel dispatch.

use super::helpers::{Behaviour, InstantSleeper, ProbeHandler, text};
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;
use switchyard::channel::{
    adapters::{ChannelRegistry, SubscribableChannel},
    domain::DispatcherPolicy,
    error::{ChannelConfigError, ChannelError, DeliveryError},
    ports::{ChannelResolver, MessageChannel, MessageHandler, Sleeper},
};

fn channel(policy: DispatcherPolicy, sleeper: &Arc<InstantSleeper>) -> SubscribableChannel {
    SubscribableChannel::new(
        "work",
        policy.with_retry_interval(Duration::from_millis(5)),
        Arc::clone(sleeper) as Arc<dyn Sleeper>,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn direct_channel_delivers_each_message_once() {
    let sleeper = InstantSleeper::new();
    let work = channel(DispatcherPolicy::unicast(), &sleeper);
    let first = ProbeHandler::new("first", Behaviour::Accept);
    let second = ProbeHandler::new("second", Behaviour::Accept);
    work.subscribe(Arc::clone(&first) as Arc<dyn MessageHandler>);
    work.subscribe(Arc::clone(&second) as Arc<dyn MessageHandler>);

    for value in ["a", "b", "c"] {
        assert!(work.send(text(value), None).await.expect("delivered"));
    }

    assert_eq!(first.received().len() + second.received().len(), 3);
    assert_eq!(second.attempts(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn publish_subscribe_channel_reaches_every_active_subscriber() {
    let sleeper = InstantSleeper::new();
    let events = channel(DispatcherPolicy::broadcast(), &sleeper);
    let probes: Vec<_> = ["x", "y", "z"]
        .into_iter()
        .map(|name| ProbeHandler::new(name, Behaviour::Accept))
        .collect();
    for probe in &probes {
        events.subscribe(Arc::clone(probe) as Arc<dyn MessageHandler>);
    }

    assert!(events.send(text("event"), None).await.expect("broadcast"));

    assert!(probes.iter().all(|probe| probe.received().len() == 1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_limit_failure_reaches_the_sender() {
    let sleeper = InstantSleeper::new();
    let work = channel(DispatcherPolicy::unicast().with_rejection_limit(2), &sleeper);
    let busy = ProbeHandler::new("busy", Behaviour::Reject);
    let slow = ProbeHandler::new("slow", Behaviour::Reject);
    work.subscribe(Arc::clone(&busy) as Arc<dyn MessageHandler>);
    work.subscribe(Arc::clone(&slow) as Arc<dyn MessageHandler>);

    let result = work.send(text("job"), None).await;

    assert!(matches!(
        result,
        Err(ChannelError::Delivery(DeliveryError::RejectionLimitExceeded { ref exhausted, .. }))
            if exhausted == &["busy".to_owned(), "slow".to_owned()]
    ));
    assert_eq!(busy.attempts() + slow.attempts(), 4);
    assert_eq!(sleeper.pauses(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tolerated_rejection_limit_reports_not_sent() {
    let sleeper = InstantSleeper::new();
    let work = channel(
        DispatcherPolicy::unicast()
            .with_rejection_limit(2)
            .with_fail_on_rejection_limit(false),
        &sleeper,
    );
    let busy = ProbeHandler::new("busy", Behaviour::Reject);
    let slow = ProbeHandler::new("slow", Behaviour::Reject);
    work.subscribe(Arc::clone(&busy) as Arc<dyn MessageHandler>);
    work.subscribe(Arc::clone(&slow) as Arc<dyn MessageHandler>);

    let sent = work.send(text("job"), None).await.expect("no error");

    assert!(!sent);
    assert_eq!(busy.attempts() + slow.attempts(), 4);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_handler_fails_over_then_surfaces_when_alone() {
    let sleeper = InstantSleeper::new();
    let work = channel(DispatcherPolicy::unicast(), &sleeper);
    let broken = ProbeHandler::new("broken", Behaviour::Fail);
    let spare = ProbeHandler::new("spare", Behaviour::Accept);
    let broken_id = work.subscribe(Arc::clone(&broken) as Arc<dyn MessageHandler>);
    let spare_id = work.subscribe(Arc::clone(&spare) as Arc<dyn MessageHandler>);

    assert!(work.send(text("one"), None).await.expect("failover"));
    assert!(work.unsubscribe(spare_id));
    let result = work.send(text("two"), None).await;

    assert_eq!(spare.received().len(), 1);
    assert!(matches!(
        result,
        Err(ChannelError::Delivery(DeliveryError::HandlerFailed { ref handler, .. })) if handler == "broken"
    ));
    assert!(work.unsubscribe(broken_id));
    assert!(matches!(
        work.send(text("three"), None).await,
        Err(ChannelError::Delivery(DeliveryError::NoSubscribers { .. }))
    ));
}

#[rstest]
fn registry_resolves_registered_channels_by_name() {
    let registry = ChannelRegistry::new();
    let work: Arc<dyn MessageChannel> = Arc::new(SubscribableChannel::direct("work"));
    registry.register(Arc::clone(&work)).expect("first registration");

    let duplicate = registry.register(Arc::new(SubscribableChannel::direct("work")));

    assert_eq!(
        duplicate,
        Err(ChannelConfigError::DuplicateChannel("work".to_owned()))
    );
    assert!(
        registry
            .resolve("work")
            .is_some_and(|found| Arc::ptr_eq(&found, &work))
    );
    assert!(registry.remove("work").is_some());
    assert!(registry.resolve("work").is_none());
}
