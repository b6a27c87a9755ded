//! In-memory integration tests for polling consumers and the error channel.

use super::helpers::{
    Behaviour, InstantSleeper, ProbeHandler, clock, drain, init_tracing, queue, text,
};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;
use switchyard::channel::{
    adapters::{BoundedExecutor, ChannelBridge, SubscribableChannel},
    domain::{DispatcherPolicy, ExecutorLimits},
    ports::{MessageChannel, MessageHandler, PollableChannel, Sleeper},
    services::{ErrorPublisher, PollingConsumer},
};
use tokio::sync::watch;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exhausted_retries_are_published_to_the_error_channel(clock: Arc<DefaultClock>) {
    init_tracing();
    let inbound = queue("inbound", 4);
    let errors = queue("errors", 4);
    let sleeper = InstantSleeper::new();
    let work = Arc::new(SubscribableChannel::new(
        "work",
        DispatcherPolicy::unicast().with_rejection_limit(2),
        Arc::clone(&sleeper) as Arc<dyn Sleeper>,
    ));
    let busy = ProbeHandler::new("busy", Behaviour::Reject);
    let slow = ProbeHandler::new("slow", Behaviour::Reject);
    work.subscribe(Arc::clone(&busy) as Arc<dyn MessageHandler>);
    work.subscribe(Arc::clone(&slow) as Arc<dyn MessageHandler>);
    let consumer = PollingConsumer::new(
        Arc::clone(&inbound) as Arc<dyn PollableChannel>,
        Arc::new(ChannelBridge::new(work as Arc<dyn MessageChannel>)),
        ErrorPublisher::new(Arc::clone(&errors) as Arc<dyn MessageChannel>, clock),
    )
    .with_receive_timeout(Duration::ZERO);
    let job = text("job");
    inbound.send(job.clone(), None).await.expect("queued");

    assert!(consumer.poll_once().await.expect("polled"));
    assert!(!consumer.poll_once().await.expect("polled"));

    assert_eq!(busy.attempts() + slow.attempts(), 4);
    let published = drain(&errors).await;
    let [error_message] = published.as_slice() else {
        panic!("expected one error message, got {}", published.len());
    };
    let payload = error_message.payload().as_error().expect("error payload");
    assert!(payload.description().contains("rejection limit"));
    assert_eq!(payload.failed_message().map(|failed| failed.id()), Some(job.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn running_consumer_drains_into_an_executor_until_shutdown(clock: Arc<DefaultClock>) {
    init_tracing();
    let inbound = queue("inbound", 8);
    let errors = queue("errors", 8);
    let worker = ProbeHandler::new("worker", Behaviour::Accept);
    let executor = BoundedExecutor::new(
        Arc::clone(&worker) as Arc<dyn MessageHandler>,
        ExecutorLimits::new(4),
    )
    .expect("valid limits")
    .with_error_publisher(ErrorPublisher::new(
        Arc::clone(&errors) as Arc<dyn MessageChannel>,
        Arc::clone(&clock),
    ));
    let consumer = Arc::new(
        PollingConsumer::new(
            Arc::clone(&inbound) as Arc<dyn PollableChannel>,
            Arc::new(executor),
            ErrorPublisher::new(Arc::clone(&errors) as Arc<dyn MessageChannel>, clock),
        )
        .with_receive_timeout(Duration::from_millis(10)),
    );
    let (shutdown, signal) = watch::channel(false);
    let running = {
        let consumer = Arc::clone(&consumer);
        tokio::spawn(async move { consumer.run(signal).await })
    };

    for value in ["a", "b", "c"] {
        inbound.send(text(value), None).await.expect("queued");
    }
    for _ in 0..200 {
        if worker.received().len() == 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    shutdown.send(true).expect("consumer listening");
    running.await.expect("consumer stops");

    assert_eq!(worker.received().len(), 3);
    assert!(drain(&errors).await.is_empty());
}
